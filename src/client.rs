//! HTTP client for dispatching requests to the remote JSON API.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::error::{RestError, Result};

/// Default base URL when no configuration overrides it.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Normalize a base URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// HTTP method accepted by the dispatcher.
///
/// The CLI surface restricts input to these two values via clap; library
/// callers go through [`FromStr`], which rejects anything else with
/// [`RestError::InvalidMethod`]. A `Method` that reaches [`ApiClient::dispatch`]
/// is therefore valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    Get,
    Post,
}

impl FromStr for Method {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            other => Err(RestError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "get"),
            Method::Post => write!(f, "post"),
        }
    }
}

/// HTTP client for a single JSON API.
///
/// One request per call, no retries: every failure surfaces immediately as
/// a [`RestError::Request`] so the caller can report it once and stop.
///
/// # Examples
///
/// ```no_run
/// use restctl::client::{ApiClient, Method};
///
/// # async fn example() -> restctl::error::Result<()> {
/// let client = ApiClient::with_config(
///     "https://jsonplaceholder.typicode.com".to_string(),
///     30, // timeout in seconds
/// )?;
///
/// let post = client.dispatch(Method::Get, "/posts/1", None).await?;
/// println!("{}", post["title"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn with_config(base_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("restctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RestError::Request {
                endpoint: String::new(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: normalize_url(&base_url),
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return the parsed JSON response.
    ///
    /// The target URL is the base URL with the endpoint fragment appended
    /// verbatim; malformed fragments are passed through to the HTTP layer.
    /// For POST, `body` is sent as a JSON payload with
    /// `Content-Type: application/json`; an absent body is sent as JSON
    /// `null`. `body` is ignored for GET.
    ///
    /// # Errors
    ///
    /// Connection failures, timeouts, non-2xx statuses, and malformed
    /// response bodies all return [`RestError::Request`].
    pub async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        match method {
            Method::Get => self.get(endpoint).await,
            Method::Post => self.post(endpoint, body.unwrap_or(&Value::Null)).await,
        }
    }

    /// Issue a GET request with no body.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(endpoint, &e))?;

        Self::handle_response(response, endpoint).await
    }

    /// Issue a POST request with a JSON body.
    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| request_error(endpoint, &e))?;

        Self::handle_response(response, endpoint).await
    }

    /// Process an HTTP response and extract the JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP status code indicates failure (4xx or 5xx)
    /// - The response body cannot be read
    /// - The body is not valid JSON
    async fn handle_response(response: Response, endpoint: &str) -> Result<Value> {
        let status = response.status();
        let text = response.text().await.map_err(|e| RestError::Request {
            endpoint: endpoint.to_string(),
            reason: format!("failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            let reason = match status {
                StatusCode::NOT_FOUND => "resource not found (HTTP 404)".to_string(),
                StatusCode::BAD_REQUEST => format!("bad request (HTTP 400): {}", text),
                StatusCode::UNAUTHORIZED => "unauthorized (HTTP 401)".to_string(),
                StatusCode::FORBIDDEN => "access forbidden (HTTP 403)".to_string(),
                StatusCode::INTERNAL_SERVER_ERROR => {
                    format!("server error (HTTP 500): {}", text)
                }
                StatusCode::SERVICE_UNAVAILABLE => "service unavailable (HTTP 503)".to_string(),
                _ => format!("HTTP {} error: {}", status, text),
            };
            return Err(RestError::Request {
                endpoint: endpoint.to_string(),
                reason,
            });
        }

        serde_json::from_str(&text).map_err(|e| RestError::Request {
            endpoint: endpoint.to_string(),
            reason: format!("malformed JSON response: {}", e),
        })
    }
}

fn request_error(endpoint: &str, err: &reqwest::Error) -> RestError {
    let reason = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    };

    RestError::Request {
        endpoint: endpoint.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("https://example.com"),
            "https://example.com"
        );
        assert_eq!(
            normalize_url("https://example.com/"),
            "https://example.com"
        );
        assert_eq!(
            normalize_url("https://example.com///"),
            "https://example.com"
        );
        assert_eq!(
            normalize_url("http://localhost:3000/api/"),
            "http://localhost:3000/api"
        );
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        // Case-insensitive on the library surface
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);

        let err = "put".parse::<Method>().unwrap_err();
        match err {
            RestError::InvalidMethod(m) => assert_eq!(m, "put"),
            _ => panic!("Expected InvalidMethod error"),
        }

        assert!("delete".parse::<Method>().is_err());
        assert!("".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "get");
        assert_eq!(Method::Post.to_string(), "post");
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::with_config(DEFAULT_BASE_URL.to_string(), 30).unwrap();
        assert_eq!(client.base_url(), "https://jsonplaceholder.typicode.com");

        let client = ApiClient::with_config("http://localhost:3000/".to_string(), 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
