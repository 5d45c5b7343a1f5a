//! Ledger behavior switches.
//!
//! The defaults reproduce the simulator's historical behavior, except that
//! creating an account under an existing owner is refused.

use serde::{Deserialize, Serialize};

use banksim_core::{DomainError, DomainResult};

pub const ENV_DUPLICATE_ACCOUNTS: &str = "BANKSIM_DUPLICATE_ACCOUNTS";
pub const ENV_STRICT_AMOUNTS: &str = "BANKSIM_STRICT_AMOUNTS";
pub const ENV_LOG_FAILED_TRANSFERS: &str = "BANKSIM_LOG_FAILED_TRANSFERS";

/// What `create_account` does when the owner already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateAccount`; the existing account is untouched.
    #[default]
    Reject,
    /// Replace the existing account, discarding its balance and history.
    Replace,
}

impl core::str::FromStr for DuplicatePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "replace" => Ok(Self::Replace),
            other => Err(DomainError::validation(format!(
                "{ENV_DUPLICATE_ACCOUNTS}: expected `reject` or `replace`, got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub duplicate_accounts: DuplicatePolicy,
    /// Reject zero or negative deposit/withdraw/transfer amounts with
    /// `InvalidAmount`. Interest rates are never restricted.
    pub strict_amounts: bool,
    /// Record a failed-withdrawal line on the sender when a transfer is
    /// refused for insufficient funds.
    pub log_failed_transfers: bool,
}

impl LedgerConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DUPLICATE_ACCOUNTS) {
            config.duplicate_accounts = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_STRICT_AMOUNTS) {
            config.strict_amounts = parse_flag(ENV_STRICT_AMOUNTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_FAILED_TRANSFERS) {
            config.log_failed_transfers = parse_flag(ENV_LOG_FAILED_TRANSFERS, &raw)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> DomainResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DomainError::validation(format!(
            "{key}: expected a boolean, got {other:?}"
        ))),
    }
}
