#![doc = include_str!("../README.md")]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod arena;

pub mod braille;
pub use braille::{BrailleTables, CharacterSet};

pub mod codec;
pub use codec::LoadStats;

mod error;
pub use error::{BrailleError, InvalidKeyReason, TrieError};

mod key;
pub use key::{Bit, BitKey};

mod nodes;

mod trie;
pub use trie::{BitTrie, Iter};
