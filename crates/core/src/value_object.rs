//! Value object trait: equality by value, not identity.
//!
//! Derived views (timeline steps, pricing breakdowns) are value objects: they
//! are recomputed from domain state on demand and never stored.

/// Marker trait for value objects.
///
/// Two value objects with the same attribute values are equal. To "modify" one,
/// compute a new one from the underlying state.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
