//! Domain events emitted by ledger operations.

pub mod event;

pub use event::Event;
