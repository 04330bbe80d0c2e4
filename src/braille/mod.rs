//! Conversion between ASCII, Braille cells and Unicode Braille glyphs.
//!
//! A Braille cell is written as six bits, one per dot. The conversions are plain lookups in three
//! [`BitTrie`](crate::BitTrie)s held by [`BrailleTables`]:
//!
//! * ASCII to Braille, keyed by the 8-bit character code,
//! * Braille to ASCII, keyed by the 6-bit cell,
//! * Braille to Unicode, keyed by the 6-bit cell.

use crate::error::BrailleError;
use core::str::FromStr;
use derive_more::Display;

mod tables;
pub use tables::{
    ASCII_TO_BRAILLE_FILE, BRAILLE_TO_ASCII_FILE, BRAILLE_TO_UNICODE_FILE, BrailleTables,
};

/// Number of bits in an ASCII character key.
pub const ASCII_BITS: usize = 8;

/// Number of bits (dots) in a Braille cell.
pub const CELL_BITS: usize = 6;

/// The target of a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterSet {
    /// Braille cells as bit strings.
    #[display("braille")]
    Braille,
    /// ASCII text.
    #[display("ascii")]
    Ascii,
    /// Unicode Braille glyphs.
    #[display("unicode")]
    Unicode,
}

impl FromStr for CharacterSet {
    type Err = BrailleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "braille" => Ok(Self::Braille),
            "ascii" => Ok(Self::Ascii),
            "unicode" => Ok(Self::Unicode),
            _ => Err(BrailleError::UnknownCharacterSet(s.to_owned())),
        }
    }
}

/// Splits `text` into consecutive chunks of `width` characters. The last chunk is shorter when the
/// length of `text` is not a multiple of `width`.
pub(crate) fn chunks(text: &str, width: usize) -> impl Iterator<Item = &str> {
    let mut rest = text;
    core::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.char_indices().nth(width).map_or(rest.len(), |(at, _)| at);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
