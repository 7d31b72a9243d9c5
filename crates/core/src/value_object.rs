//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two value
/// objects with the same attribute values are equal. To "modify" one, build
/// a new one. Order line snapshots are the canonical example here: two lines
/// for the same item at the same price and quantity are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
