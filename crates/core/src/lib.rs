//! `banksim-core` — domain building blocks for the bank simulator.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::AccountId;
pub use money::{Money, Rate};
pub use value_object::ValueObject;
