pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid question document: {0}")]
    Structural(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Test already submitted")]
    DuplicateSubmission,

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
