//! Domain error model.

use thiserror::Error;

use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every business-rule failure of the ledger is one of these variants; none of
/// them is raised as a panic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed configuration).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An amount was rejected by strict amount checking.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. blank owner name).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The operation referenced an owner that is not in the ledger.
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    /// An account with this owner already exists.
    #[error("account already exists: {0}")]
    DuplicateAccount(String),

    /// A debit exceeded the current balance.
    #[error("insufficient funds for {owner}: requested {requested}, available {available}")]
    InsufficientFunds {
        owner: String,
        requested: Money,
        available: Money,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_account(owner: impl Into<String>) -> Self {
        Self::UnknownAccount(owner.into())
    }

    pub fn duplicate_account(owner: impl Into<String>) -> Self {
        Self::DuplicateAccount(owner.into())
    }

    pub fn insufficient_funds(owner: impl Into<String>, requested: Money, available: Money) -> Self {
        Self::InsufficientFunds {
            owner: owner.into(),
            requested,
            available,
        }
    }
}
