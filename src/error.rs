//! Error taxonomy shared by the stores, the request aggregate and uploads.
//!
//! Every error is a local validation failure. Nothing here is retried; the
//! caller decides how to surface it, usually by mapping [`HttpioError::status`]
//! onto a response.

use thiserror::Error;

use crate::http::status::HttpStatus;

#[derive(Debug, Error)]
pub enum HttpioError {
    /// Requested key is absent from the store.
    #[error("Request data for key '{key}' missing.")]
    DataNotSet { key: String },

    /// Key is present but the filter rejected its value.
    #[error("Request data for key '{key}' not valid.")]
    DataNotValid { key: String },

    /// Upload lifecycle failure.
    #[error("{0}")]
    FileUpload(String),

    #[error("Unknown request method '{0}'")]
    UnknownMethod(String),

    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HttpioError {
    pub fn status(&self) -> HttpStatus {
        match self {
            HttpioError::DataNotSet { .. } => HttpStatus::BadRequest,
            HttpioError::DataNotValid { .. } => HttpStatus::BadRequest,
            HttpioError::FileUpload(_) => HttpStatus::BadRequest,
            HttpioError::UnknownMethod(_) => HttpStatus::NotImplemented,
            HttpioError::InvalidPattern(_) => HttpStatus::InternalServerError,
            HttpioError::Config(_) => HttpStatus::InternalServerError,
        }
    }
}

pub type HttpioResult<T> = Result<T, HttpioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_errors_map_to_bad_request() {
        let err = HttpioError::DataNotSet { key: "foo".into() };
        assert_eq!(err.status(), HttpStatus::BadRequest);
        assert_eq!(err.to_string(), "Request data for key 'foo' missing.");

        let err = HttpioError::DataNotValid { key: "foo".into() };
        assert_eq!(err.status().code(), 400);
        assert_eq!(err.to_string(), "Request data for key 'foo' not valid.");
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let err = HttpioError::UnknownMethod("BREW".into());
        assert_eq!(err.status(), HttpStatus::NotImplemented);
        assert!(err.to_string().contains("BREW"));
    }
}
