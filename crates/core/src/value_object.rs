//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. They represent
/// concepts where identity doesn't matter - only the values matter.
///
/// Example:
/// - `EmailAddress("a@b.com")` is a value object: any two instances holding
///   the same string are the same address.
/// - A subscription record keyed by that address is not: it carries state
///   (when it was created, where it came from) tied to one stored entry.
///
/// To "modify" a value object, create a new one with the new values. The
/// trait bounds follow from that:
/// - **Clone**: values are cheap to copy around
/// - **PartialEq**: compared by attribute values
/// - **Debug**: debuggable (logging, testing)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
