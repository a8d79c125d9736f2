//! Request execution handlers

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use crate::client::{ApiClient, Method};
use crate::error::RestError;
use crate::format::format_success;
use crate::output;

/// Parse one line of input as a JSON body for a POST request.
pub fn parse_json_body(line: &str) -> std::result::Result<Value, RestError> {
    serde_json::from_str(line.trim()).map_err(|e| RestError::JsonDecode(e.to_string()))
}

/// Prompt on stdout and read one line of JSON from stdin.
///
/// Blocking read with no timeout; the interactive prompt only appears for
/// POST invocations.
pub fn read_post_body() -> std::result::Result<Value, RestError> {
    print!("Enter JSON data for POST request: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    parse_json_body(&line)
}

/// Render a response the way the no-output print path does: an indented
/// JSON document.
pub fn render_response(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Execute one request: optional stdin body, dispatch, then write or print.
pub async fn handle_request(
    client: &ApiClient,
    method: Method,
    endpoint: &str,
    output_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    // The body is read and validated before any network call; a decode
    // failure aborts the run without dispatching.
    let body = match method {
        Method::Post => Some(read_post_body()?),
        Method::Get => None,
    };

    if verbose {
        eprintln!("Dispatching {} {}{}", method, client.base_url(), endpoint);
    }

    let response = client.dispatch(method, endpoint, body.as_ref()).await?;

    match output_path {
        Some(path) => {
            output::write_to_file(&response, path)?;
            println!(
                "{}",
                format_success(&format!("Data saved to {}", path.display()))
            );
        }
        None => {
            println!("{}", render_response(&response)?);
        }
    }

    Ok(())
}
