use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("network error: {0}")]
    Network(String),

    #[error("timeout after {0}s")]
    Timeout(u64),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
