//! Nodes of a [`BitTrie`](crate::BitTrie).

use crate::{arena::NodeIndex, key::Bit};

/// A node in a bit trie.
///
/// There is a single node type for internal nodes and leaves: a node is a leaf exactly when its
/// depth equals the trie's key length, which only the trie knows. Internal nodes use `children`
/// and leave `value` empty; leaves never get children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Node {
    /// Child slots, indexed by [`Bit::index`].
    children: [Option<NodeIndex>; 2],
    /// The value stored at a leaf. Empty until set.
    value: String,
}

impl Node {
    /// Returns the child reached by following `bit`.
    #[inline]
    pub(crate) const fn child(&self, bit: Bit) -> Option<NodeIndex> {
        self.children[bit.index()]
    }

    /// Links `child` under `bit`.
    #[inline]
    pub(crate) fn set_child(&mut self, bit: Bit, child: NodeIndex) {
        debug_assert!(self.children[bit.index()].is_none(), "child slot {bit:?} already taken");
        self.children[bit.index()] = Some(child);
    }

    /// Returns the children in traversal order, left (`0`) before right (`1`).
    #[inline]
    pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = (Bit, NodeIndex)> + '_ {
        [Bit::Zero, Bit::One]
            .into_iter()
            .filter_map(|bit| self.child(bit).map(|child| (bit, child)))
    }

    /// Returns the value stored at this node.
    #[inline]
    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value stored at this node.
    #[inline]
    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    #[test]
    fn children_in_order() {
        let mut arena = Arena::with_root(Node::default());
        let right = arena.push(Node::default());
        let left = arena.push(Node::default());
        arena[NodeIndex::ROOT].set_child(Bit::One, right);
        arena[NodeIndex::ROOT].set_child(Bit::Zero, left);

        let root = &arena[NodeIndex::ROOT];
        let children: Vec<_> = root.children().collect();
        assert_eq!(children, vec![(Bit::Zero, left), (Bit::One, right)]);
        let reversed: Vec<_> = root.children().rev().map(|(bit, _)| bit).collect();
        assert_eq!(reversed, vec![Bit::One, Bit::Zero]);
    }

    #[test]
    fn default_value_is_empty() {
        let mut node = Node::default();
        assert_eq!(node.value(), "");
        assert_eq!(node.child(Bit::Zero), None);
        node.set_value("x".to_owned());
        assert_eq!(node.value(), "x");
    }
}
