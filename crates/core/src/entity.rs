//! Entity trait: records that stores look up by identifier.

/// A record with an identifier.
///
/// Identifiers are compared for lookup only; nothing here requires them to be
/// unique (see [`crate::store::Store`]).
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
