use board_core::{ApiError, ViewError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown command `{0}`; type `help` for a list")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid post id `{0}`")]
    InvalidId(String),
}
