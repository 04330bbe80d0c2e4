use std::{io, path::PathBuf};
use thiserror::Error;

/// Error type for trie operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TrieError {
    /// The key is not a bit string of the trie's key length.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key, as given.
        key: String,
        /// Why the key was rejected.
        reason: InvalidKeyReason,
    },

    /// No node exists along the path of the key.
    #[error("path not found for key {key:?}: no node at depth {depth}")]
    PathNotFound {
        /// The key that was looked up.
        key: String,
        /// Depth of the first missing node.
        depth: usize,
    },

    /// A trie does not have the key length its use requires.
    #[error("trie key length mismatch: expected {expected} bits, got {actual}")]
    KeyLengthMismatch {
        /// The required key length.
        expected: usize,
        /// The trie's key length.
        actual: usize,
    },

    /// A trie was requested with a key length of zero.
    #[error("trie key length must be positive")]
    ZeroKeyLength,

    /// Reading or writing the text form of the trie failed.
    #[error("trie I/O error: {0}")]
    Io(
        /// The underlying I/O error
        #[from]
        io::Error,
    ),
}

impl TrieError {
    /// Returns `true` if this is an [`TrieError::InvalidKey`] error.
    pub const fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey { .. })
    }

    /// Returns `true` if this is a [`TrieError::PathNotFound`] error.
    pub const fn is_path_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }
}

/// The reason a key was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKeyReason {
    /// The key does not have exactly the trie's key length.
    #[error("expected {expected} bits, got {actual}")]
    Length {
        /// The trie's key length.
        expected: usize,
        /// Number of symbols in the key.
        actual: usize,
    },
    /// The key contains a symbol other than `0` or `1`.
    #[error("non-bit symbol {symbol:?} at position {position}")]
    Symbol {
        /// Position of the symbol, counted in characters.
        position: usize,
        /// The offending symbol.
        symbol: char,
    },
}

/// Error type for building and driving the Braille conversion tables.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BrailleError {
    /// A mapping table could not be opened or read.
    #[error("mapping table {} is unavailable: {source}", .path.display())]
    ResourceUnavailable {
        /// Path of the table.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The conversion target is not one of `braille`, `ascii` or `unicode`.
    #[error("unknown character set {0:?}, supported: braille, ascii, unicode")]
    UnknownCharacterSet(
        /// The name that failed to parse
        String,
    ),

    /// A lookup in one of the tables failed.
    #[error(transparent)]
    Trie(#[from] TrieError),
}
