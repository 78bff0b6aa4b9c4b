use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearxError>;

#[derive(Debug, Error)]
pub enum SearxError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for SearxError {
    fn from(err: reqwest::Error) -> Self {
        SearxError::Network(err.to_string())
    }
}
