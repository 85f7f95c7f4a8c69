//! Capability traits for records that carry their own accessors.
//!
//! Implementing these lets callers use [`crate::reconcile`] and
//! [`crate::reconcile_entities`] instead of passing closures.

/// A record with an optional, persisted identity.
pub trait Identified {
    type Id: Ord + Clone;

    /// `None` until the record has been persisted.
    fn id(&self) -> Option<Self::Id>;

    fn set_id(&mut self, id: Self::Id);
}

/// A record with a business-unique secondary key.
///
/// The key must be unique among the records of one side. Collisions are not
/// detected by the total entry points; later records silently replace earlier
/// ones.
pub trait CommonKey {
    type Key: Ord;

    fn common_key(&self) -> Self::Key;
}
