use std::{error::Error, fmt::Display};

use reqwest::StatusCode;
use serde::Deserialize;

/// Body of a failed API call. Depending on the endpoint the message sits in either field.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ErrorBody {
    pub(super) fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug)]
pub enum ServiceError {
    /// The base URL in the config could not be used
    InvalidURL(String),
    /// The request never got an answer (connection refused, timeout, too many redirects...)
    Request(reqwest::Error),
    /// The server answered with an error message
    Server(String),
    /// The server answered with an error status and nothing else
    Status(StatusCode),
    /// The answer could not be understood
    Decoding(serde_json::Error),
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Request(e) => Some(e),
            ServiceError::Decoding(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidURL(url) => write!(f, "Invalid API URL: {url}"),
            ServiceError::Request(e) => write!(f, "Request failed: {e}"),
            ServiceError::Server(message) => write!(f, "{message}"),
            ServiceError::Status(status) => write!(f, "Server responded with {status}"),
            ServiceError::Decoding(e) => write!(f, "Unexpected response: {e}"),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        ServiceError::Request(value)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        ServiceError::Decoding(value)
    }
}
