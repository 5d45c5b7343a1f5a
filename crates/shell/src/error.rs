use thiserror::Error;

use banksim_core::DomainError;

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),

    #[error("please enter a valid amount, got {0:?}")]
    InvalidAmount(String),

    #[error("no account selected (use `create` or `select`)")]
    NoAccountSelected,

    #[error("a password is required to create an account")]
    EmptyPassword,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("cannot render operation script: {0}")]
    Script(#[from] serde_json::Error),
}
