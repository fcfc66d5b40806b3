//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In this
/// workspace the season window of a seasonal product is one: two windows with
/// the same bounds are interchangeable.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct SeasonWindow { start: NaiveDate, end: NaiveDate }
///
/// impl ValueObject for SeasonWindow {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
