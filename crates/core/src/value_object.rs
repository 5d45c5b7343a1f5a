//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values:
/// `Money(100)` equals any other `Money(100)`, whereas two accounts with the same
/// balance are still different accounts.
///
/// ```ignore
/// let a = Money::from(100);
/// let b = Money::from(100);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
