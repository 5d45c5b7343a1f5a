//! Line-oriented front-end for the bank simulator.
//!
//! Owns the ledger for the lifetime of the process and drives it one command
//! at a time. Amount parsing and input validation live here, not in the ledger.

pub mod command;
pub mod error;
pub mod session;

pub use command::Command;
pub use error::{ShellError, ShellResult};
pub use session::{Reply, Session};
