use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marker for the kind of entity an [`Id`] refers to.
pub trait IdTag {
    const NAME: &'static str;
}

/// A dense, typed index into an arena.
///
/// Ids are one-based internally so that `Option<Id<T>>` stays the size of the id itself.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Id<T> {
    inner: NonZeroU32,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// # Panics
    ///
    /// Panics if `id` is zero or does not fit into 32 bits.
    pub fn new(id: usize) -> Self {
        let id = u32::try_from(id).expect("Id out of range");

        Id {
            inner: NonZeroU32::new(id).expect("Id cannot be zero"),
            _marker: PhantomData,
        }
    }

    /// # Panics
    ///
    /// Panics if the index does not fit into 32 bits.
    pub fn from_index(index: usize) -> Self {
        Id::new(index + 1)
    }

    pub fn index(self) -> usize {
        self.inner.get() as usize - 1
    }
}

// Manual impls, the derives would put bounds on `T`.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<T: IdTag> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.inner)
    }
}

impl<T: IdTag> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", T::NAME, self.inner)
    }
}

#[derive(Debug)]
pub struct IdAllocator<T: IdTag> {
    next_index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: IdTag> IdAllocator<T> {
    pub fn new() -> Self {
        IdAllocator {
            next_index: 0,
            _marker: PhantomData,
        }
    }

    pub fn next_id(&mut self) -> Id<T> {
        let id = Id::from_index(self.next_index);
        self.next_index += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn len(&self) -> usize {
        self.next_index
    }

    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }
}

impl<T: IdTag> Default for IdAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct TestTag;

    impl IdTag for TestTag {
        const NAME: &'static str = "TestId";
    }

    #[test]
    fn test_ids_are_dense_indices() {
        let mut allocator = IdAllocator::<TestTag>::new();

        let first = allocator.next_id();
        let second = allocator.next_id();

        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(allocator.len(), 2);
        assert_eq!(Id::<TestTag>::from_index(1), second);
    }

    #[test]
    fn test_debug_uses_tag_name() {
        let id = Id::<TestTag>::from_index(4);

        assert_eq!(format!("{id:?}"), "TestId(5)");
        assert_eq!(id.to_string(), "TestId#5");
    }

    #[test]
    fn test_optional_id_is_niche_optimized() {
        assert_eq!(
            std::mem::size_of::<Option<Id<TestTag>>>(),
            std::mem::size_of::<Id<TestTag>>()
        );
    }
}
