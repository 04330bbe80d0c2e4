use crate::error::{InvalidKeyReason, TrieError};
use core::{
    fmt::{self, Write as _},
    str::FromStr,
};
use derive_more::{Deref, From};
use smallvec::SmallVec;

/// A single bit of a trie key.
///
/// In text form a bit is the character `0` or `1`. [`Bit::Zero`] selects the left child of a
/// node and [`Bit::One`] the right child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(derive_arbitrary::Arbitrary, proptest_derive::Arbitrary))]
#[repr(u8)]
pub enum Bit {
    /// The `0` bit.
    Zero = 0,
    /// The `1` bit.
    One = 1,
}

impl Bit {
    /// Parses a bit from its text symbol.
    #[inline]
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '0' => Some(Self::Zero),
            '1' => Some(Self::One),
            _ => None,
        }
    }

    /// Returns the text symbol of the bit.
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }

    /// Returns the child slot selected by this bit.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<bool> for Bit {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Self::One } else { Self::Zero }
    }
}

/// Inline storage for key bits. Keys up to 8 bits never allocate.
pub(crate) type BitVec = SmallVec<[Bit; 8]>;

/// An owned bit string.
///
/// A `BitKey` only guarantees that every symbol is a bit. Whether its length matches a trie's key
/// length is checked by the trie itself.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitKey(BitVec);

impl BitKey {
    /// Creates an empty key.
    #[inline]
    pub const fn new() -> Self {
        Self(SmallVec::new_const())
    }

    /// Creates a key from the big-endian binary form of `code`, left-padded with zeros to
    /// `width` bits.
    ///
    /// Codes that need more than `width` bits are not truncated: the resulting key is longer than
    /// `width`, and a trie with key length `width` rejects it.
    pub fn from_code(code: u32, width: usize) -> Self {
        let significant = (u32::BITS - code.leading_zeros()) as usize;
        let len = significant.max(width);
        (0..len).rev().map(|shift| Bit::from(shift < 32 && (code >> shift) & 1 == 1)).collect()
    }

    /// Appends a bit to the end of the key.
    #[inline]
    pub fn push(&mut self, bit: Bit) {
        self.0.push(bit);
    }

    /// Shortens the key to `len` bits.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

impl FromIterator<Bit> for BitKey {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for BitKey {
    type Err = TrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, symbol)| {
                Bit::from_char(symbol).ok_or_else(|| TrieError::InvalidKey {
                    key: s.to_owned(),
                    reason: InvalidKeyReason::Symbol { position, symbol },
                })
            })
            .collect()
    }
}

impl fmt::Display for BitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|bit| f.write_char(bit.as_char()))
    }
}

impl fmt::Debug for BitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitKey({self})")
    }
}

/// Validates `key` against `key_len` and returns an iterator over its bits.
///
/// The whole key is checked before the iterator is returned, so callers may act on the bits
/// without worrying about a failure halfway through.
pub(crate) fn parse_bits(
    key: &str,
    key_len: usize,
) -> Result<impl ExactSizeIterator<Item = Bit> + '_, TrieError> {
    let invalid = |reason| TrieError::InvalidKey { key: key.to_owned(), reason };

    let mut actual = 0;
    for (position, symbol) in key.chars().enumerate() {
        if Bit::from_char(symbol).is_none() {
            return Err(invalid(InvalidKeyReason::Symbol { position, symbol }));
        }
        actual += 1;
    }
    if actual != key_len {
        return Err(invalid(InvalidKeyReason::Length { expected: key_len, actual }));
    }

    // Every symbol is a single byte bit, so bytes and chars coincide here.
    Ok(key.bytes().map(|b| if b == b'1' { Bit::One } else { Bit::Zero }))
}
