//! The client error type.

use reqwest::{Method, StatusCode};
use thiserror::Error;
use url::Url;

pub type FeedbackClientResult<T> = Result<T, FeedbackClientError>;

/// The main error type for feedback-client.
#[derive(Debug, Error)]
pub enum FeedbackClientError {
    #[error("HTTP error {status} for {url}")]
    HttpError { url: Url, status: StatusCode },
    #[error("Connection error trying to {0} {1}")]
    ConnectionError(Method, Url, #[source] reqwest::Error),
    #[error("Failed to parse as URL: {0}")]
    UrlParse(String, #[source] url::ParseError),

    #[error("Failed to encode screenshot as PNG")]
    PngEncode(#[source] image::ImageError),
    #[error("Failed to encode custom params as JSON")]
    JsonEncode(#[source] serde_json::Error),
    #[error("Invalid HMAC key")]
    HmacKey(#[from] hmac::digest::InvalidLength),

    #[error("Failed to run log command '{0}'")]
    LogCommand(String, #[source] std::io::Error),

    #[error(transparent)]
    SystemTime(#[from] std::time::SystemTimeError),
}
