//! CLI argument definitions and handlers
//!
//! This module organizes the CLI into logical submodules:
//! - [`commands`] - Argument definitions
//! - [`handlers`] - Request execution handlers

mod commands;
mod handlers;

pub use commands::*;
pub use handlers::*;
