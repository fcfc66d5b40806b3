//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products and orders are entities: two records with the same id are the same
/// thing even when their attributes differ (e.g. a product before and after a
/// stock decrement).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` denotes the same entity, regardless of state.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
