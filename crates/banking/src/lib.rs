//! Banking module (account ledger, event-driven accounts).
//!
//! Pure domain logic only: no IO, no presentation, no persistence.

pub mod account;
pub mod config;
pub mod ledger;
pub mod operation;

pub use account::{
    Account, AccountCommand, AccountEvent, AccountOpened, AccrueInterest, Credential, Deposit,
    Deposited, InterestAccrued, OpenAccount, ReceiveTransfer, SendTransfer, TransferReceived,
    TransferSent, Withdraw, WithdrawalRejected, Withdrawn,
};
pub use config::{DuplicatePolicy, LedgerConfig};
pub use ledger::AccountLedger;
pub use operation::{Operation, Outcome, Script};
