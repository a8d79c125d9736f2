//! restctl library
//!
//! Core functionality for the restctl command-line REST client.
//!
//! # Public API
//!
//! The primary public API is [`client::ApiClient`], which dispatches a
//! single GET or POST request and returns the parsed JSON response, and
//! [`output::write_to_file`], which serializes a response as JSON or CSV.
//! Configuration types are available via [`config::CliConfig`] and
//! [`config::ConfigBuilder`].
//!
//! ```no_run
//! use restctl::client::{ApiClient, Method};
//!
//! # async fn example() -> restctl::error::Result<()> {
//! let client = ApiClient::with_config(
//!     "https://jsonplaceholder.typicode.com".to_string(),
//!     30, // timeout in seconds
//! )?;
//!
//! let post = client.dispatch(Method::Get, "/posts/1", None).await?;
//! println!("{}", post["title"]);
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for dispatching requests to the remote API.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

/// Tagged error type covering every failure category.
pub mod error;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

/// Output serialization (JSON and CSV files).
pub mod output;

// Mock API server for integration tests - not part of public API
#[doc(hidden)]
pub mod test_utils;
