//! The fixed-depth binary trie.

use crate::{
    arena::{Arena, NodeIndex},
    error::{InvalidKeyReason, TrieError},
    key::{Bit, BitKey, parse_bits},
    nodes::Node,
};
use core::iter::FusedIterator;
use tracing::trace;

/// A mapping from fixed-length bit strings to string values.
///
/// Every key of a `BitTrie` has exactly [`key_len`](Self::key_len) bits. A key is a path from the
/// root: each `0` bit descends to the left child and each `1` bit to the right child. The node at
/// the end of the path, at depth `key_len`, is a leaf and holds the value.
///
/// Nodes are created on the first [`set`](Self::set) along a path and are never removed. A leaf
/// that exists but was never given a value reads as the empty string, which is different from a
/// key whose path does not exist: the latter fails with [`TrieError::PathNotFound`].
///
/// ```
/// use braille_trie::BitTrie;
///
/// let mut trie = BitTrie::new(4);
/// trie.set("0110", "six")?;
/// assert_eq!(trie.get("0110")?, "six");
/// assert!(trie.get("0111").is_err());
/// # Ok::<(), braille_trie::TrieError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BitTrie {
    key_len: usize,
    nodes: Arena<Node>,
    leaves: usize,
}

impl BitTrie {
    /// Creates an empty trie for keys of `key_len` bits.
    ///
    /// # Panics
    ///
    /// Panics if `key_len` is zero. Use [`try_new`](Self::try_new) to get an error instead.
    pub fn new(key_len: usize) -> Self {
        assert!(key_len > 0, "trie key length must be positive");
        Self { key_len, nodes: Arena::with_root(Node::default()), leaves: 0 }
    }

    /// Creates an empty trie for keys of `key_len` bits, failing with
    /// [`TrieError::ZeroKeyLength`] if `key_len` is zero.
    pub fn try_new(key_len: usize) -> Result<Self, TrieError> {
        if key_len == 0 {
            return Err(TrieError::ZeroKeyLength);
        }
        Ok(Self::new(key_len))
    }

    /// Returns the number of bits in every key of this trie.
    #[inline]
    pub const fn key_len(&self) -> usize {
        self.key_len
    }

    /// Returns the number of distinct keys that have been set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.leaves
    }

    /// Returns `true` if no key has been set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.leaves == 0
    }

    /// Returns the number of nodes in the trie, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// `key` must consist of exactly [`key_len`](Self::key_len) `0`/`1` characters, otherwise
    /// [`TrieError::InvalidKey`] is returned and the trie is left untouched.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), TrieError> {
        let bits = parse_bits(key, self.key_len)?;
        self.insert_bits(bits, value.into());
        trace!(target: "trie::bit_trie", key, "set value");
        Ok(())
    }

    /// Stores `value` under an already parsed key.
    ///
    /// Fails with [`TrieError::InvalidKey`] if the key length differs from the trie's.
    pub fn set_key(&mut self, key: &BitKey, value: impl Into<String>) -> Result<(), TrieError> {
        self.check_len(key)?;
        self.insert_bits(key.iter().copied(), value.into());
        Ok(())
    }

    /// Returns the value stored under `key`.
    ///
    /// Fails with [`TrieError::InvalidKey`] for a malformed key and with
    /// [`TrieError::PathNotFound`] if no [`set`](Self::set) ever created the key's path.
    pub fn get(&self, key: &str) -> Result<&str, TrieError> {
        let bits = parse_bits(key, self.key_len)?;
        self.find(bits).map_err(|depth| TrieError::PathNotFound { key: key.to_owned(), depth })
    }

    /// Returns the value stored under an already parsed key.
    ///
    /// Same failure modes as [`get`](Self::get).
    pub fn get_key(&self, key: &BitKey) -> Result<&str, TrieError> {
        self.check_len(key)?;
        self.find(key.iter().copied())
            .map_err(|depth| TrieError::PathNotFound { key: key.to_string(), depth })
    }

    /// Returns `Ok(true)` if [`get`](Self::get) would return a value for `key`.
    ///
    /// Malformed keys are still reported as [`TrieError::InvalidKey`].
    pub fn contains(&self, key: &str) -> Result<bool, TrieError> {
        let bits = parse_bits(key, self.key_len)?;
        Ok(self.find(bits).is_ok())
    }

    /// Returns an iterator over every leaf as `(key, value)`, in ascending key order.
    ///
    /// The walk is depth-first, visiting the `0` child before the `1` child. The iterator borrows
    /// the trie and can be recreated any number of times.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    fn check_len(&self, key: &BitKey) -> Result<(), TrieError> {
        if key.len() != self.key_len {
            return Err(TrieError::InvalidKey {
                key: key.to_string(),
                reason: InvalidKeyReason::Length { expected: self.key_len, actual: key.len() },
            });
        }
        Ok(())
    }

    /// Walks `bits` from the root, creating missing nodes, and stores `value` at the end.
    /// `bits` must already have the trie's key length.
    fn insert_bits(&mut self, bits: impl Iterator<Item = Bit>, value: String) {
        let mut current = NodeIndex::ROOT;
        let mut created = false;
        for bit in bits {
            current = match self.nodes[current].child(bit) {
                Some(child) => child,
                None => {
                    let child = self.nodes.push(Node::default());
                    self.nodes[current].set_child(bit, child);
                    created = true;
                    child
                }
            };
        }
        // A new node at the last level is a new leaf.
        if created {
            self.leaves += 1;
        }
        self.nodes[current].set_value(value);
    }

    /// Walks `bits` from the root. On a missing child, returns the depth of that child.
    fn find(&self, bits: impl Iterator<Item = Bit>) -> Result<&str, usize> {
        let mut current = NodeIndex::ROOT;
        for (depth, bit) in bits.enumerate() {
            current = self.nodes[current].child(bit).ok_or(depth + 1)?;
        }
        Ok(self.nodes[current].value())
    }
}

impl<'a> IntoIterator for &'a BitTrie {
    type Item = (BitKey, &'a str);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first iterator over the leaves of a [`BitTrie`].
///
/// Created by [`BitTrie::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    trie: &'a BitTrie,
    /// Nodes still to visit, with their depth and the bit that led to them.
    stack: Vec<(NodeIndex, usize, Option<Bit>)>,
    /// Bits taken from the root to the node last popped.
    path: BitKey,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(trie: &'a BitTrie) -> Self {
        let mut stack = Vec::with_capacity(trie.key_len + 1);
        stack.push((NodeIndex::ROOT, 0, None));
        Self { trie, stack, path: BitKey::new(), remaining: trie.leaves }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (BitKey, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.trie;
        while let Some((index, depth, bit)) = self.stack.pop() {
            if let Some(bit) = bit {
                self.path.truncate(depth - 1);
                self.path.push(bit);
            }

            let node = &trie.nodes[index];
            if depth == trie.key_len {
                self.remaining -= 1;
                return Some((self.path.clone(), node.value()));
            }

            // Pushed right first so that the left child is popped first.
            for (bit, child) in node.children().rev() {
                self.stack.push((child, depth + 1, Some(bit)));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
