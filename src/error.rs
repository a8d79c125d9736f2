//! Error types for restctl operations

use thiserror::Error;

/// Error type covering every failure category of the tool.
///
/// Each variant is one reportable condition; callers can match on the
/// variant instead of parsing diagnostic text.
#[derive(Error, Debug)]
pub enum RestError {
    /// Network failure, timeout, non-2xx status, or malformed response body
    #[error("request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    /// Method other than GET or POST
    #[error("invalid method '{0}': supported methods are get and post")]
    InvalidMethod(String),

    /// Input text that is not valid JSON
    #[error("error decoding JSON data: {0}")]
    JsonDecode(String),

    /// Output path with an extension other than .json or .csv
    #[error("invalid output file format '{0}': supported formats are json and csv")]
    UnsupportedFormat(String),

    /// Value that cannot be laid out as CSV rows
    #[error("cannot write CSV: {0}")]
    UnsupportedShape(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for restctl operations
pub type Result<T> = std::result::Result<T, RestError>;

impl From<csv::Error> for RestError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => RestError::Io(e),
            other => RestError::Io(std::io::Error::other(format!("{:?}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RestError::Request {
            endpoint: "/posts/1".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "request to /posts/1 failed: connection refused"
        );

        let err = RestError::InvalidMethod("put".to_string());
        assert_eq!(
            format!("{}", err),
            "invalid method 'put': supported methods are get and post"
        );

        let err = RestError::UnsupportedFormat("txt".to_string());
        assert_eq!(
            format!("{}", err),
            "invalid output file format 'txt': supported formats are json and csv"
        );

        let err = RestError::UnsupportedShape("value is not an array".to_string());
        assert_eq!(format!("{}", err), "cannot write CSV: value is not an array");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let rest_err: RestError = io_err.into();

        match rest_err {
            RestError::Io(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_csv_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let csv_err = csv::Error::from(io_err);
        let rest_err: RestError = csv_err.into();

        match rest_err {
            RestError::Io(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Io error"),
        }
    }
}
