use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    Server(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(String),
}
