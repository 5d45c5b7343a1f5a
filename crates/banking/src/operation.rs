//! Replayable ledger operations.
//!
//! An operation script is the ordered list of calls a session made against a
//! ledger, together with the `LedgerConfig` the ledger ran under. Scripts
//! serialize to JSON so a session can be inspected and replayed against a
//! fresh ledger; replay is deterministic apart from event timestamps.

use serde::{Deserialize, Serialize};

use banksim_core::{AccountId, Money, Rate};

use crate::config::LedgerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    CreateAccount {
        owner: String,
        credential: String,
    },
    Deposit {
        owner: String,
        amount: Money,
    },
    Withdraw {
        owner: String,
        amount: Money,
    },
    Transfer {
        from: String,
        to: String,
        amount: Money,
    },
    AccrueInterest {
        owner: String,
        rate: Rate,
    },
}

impl Operation {
    /// Owner the operation acts on (the sender, for transfers).
    pub fn owner(&self) -> &str {
        match self {
            Operation::CreateAccount { owner, .. }
            | Operation::Deposit { owner, .. }
            | Operation::Withdraw { owner, .. }
            | Operation::AccrueInterest { owner, .. } => owner,
            Operation::Transfer { from, .. } => from,
        }
    }
}

/// Result of executing one operation.
///
/// Insufficient funds is an expected outcome of a withdrawal or transfer, so it
/// is reported here rather than as an error that would abort a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Created { account_id: AccountId },
    Balance { balance: Money },
    InsufficientFunds { requested: Money, available: Money },
    Transferred { completed: bool },
    InterestAccrued { balance: Money },
}

/// A recorded session.
///
/// Duplicate handling and failed-transfer logging change what an operation
/// does, so the config travels with the operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: LedgerConfig,
    pub ops: Vec<Operation>,
}

impl Script {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
