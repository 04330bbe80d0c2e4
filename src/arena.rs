use core::ops::{Index, IndexMut};

/// A grow-only arena owning every node of a trie.
///
/// Nodes refer to each other through [`NodeIndex`] handles instead of boxes, so a whole tree is a
/// single allocation that is cloned and dropped in one go. Nothing is ever removed: tries have no
/// delete operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arena<T> {
    /// Storage for allocated items
    items: Vec<T>,
}

impl<T> Arena<T> {
    /// Creates a new arena holding `root` at [`NodeIndex::ROOT`].
    #[inline]
    pub(crate) fn with_root(root: T) -> Self {
        Self { items: vec![root] }
    }

    /// Pushes an item into the arena and returns a handle to it.
    #[inline]
    pub(crate) fn push(&mut self, item: T) -> NodeIndex {
        let index = self.items.len();
        self.items.push(item);
        NodeIndex(index)
    }

    /// Returns the current number of items in the arena.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Index<NodeIndex> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: NodeIndex) -> &T {
        &self.items[index.0]
    }
}

impl<T> IndexMut<NodeIndex> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, index: NodeIndex) -> &mut T {
        &mut self.items[index.0]
    }
}

/// An index into an [`Arena`].
///
/// Handles are only ever produced by [`Arena::push`] on the arena they index, so indexing with
/// them cannot go out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeIndex(usize);

impl NodeIndex {
    /// The slot of the root node.
    pub(crate) const ROOT: Self = Self(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_basic_operations() {
        let mut arena = Arena::with_root(0);
        assert_eq!(arena.len(), 1);

        let idx1 = arena.push(42);
        let idx2 = arena.push(84);

        assert_eq!(arena[NodeIndex::ROOT], 0);
        assert_eq!(arena[idx1], 42);
        assert_eq!(arena[idx2], 84);
        assert_eq!(arena.len(), 3);

        arena[idx1] += 1;
        assert_eq!(arena[idx1], 43);
    }

    #[test]
    fn arena_clone_is_independent() {
        let mut arena = Arena::with_root(String::from("root"));
        let idx = arena.push(String::from("a"));
        let snapshot = arena.clone();

        arena[idx].push('b');
        assert_eq!(arena[idx], "ab");
        assert_eq!(snapshot[idx], "a");
    }
}
