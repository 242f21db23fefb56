//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Persisted records implement this so the store can locate them by id
/// without knowing anything else about their shape.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
