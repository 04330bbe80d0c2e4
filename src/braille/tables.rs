use super::{ASCII_BITS, CELL_BITS, CharacterSet, chunks};
use crate::{
    BitTrie,
    codec::LoadStats,
    error::{BrailleError, TrieError},
    key::BitKey,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};
use tracing::{debug, error};

/// File name of the ASCII to Braille table.
pub const ASCII_TO_BRAILLE_FILE: &str = "ASCIIToBraille.txt";
/// File name of the Braille to ASCII table.
pub const BRAILLE_TO_ASCII_FILE: &str = "brailleToASCII.txt";
/// File name of the Braille to Unicode table.
pub const BRAILLE_TO_UNICODE_FILE: &str = "brailleToUnicode.txt";

/// The three lookup tables used for conversion.
///
/// Tables are built once and only read afterwards. All conversion methods take `&self`, so a
/// `BrailleTables` can be shared between threads without locking.
#[derive(Clone, Debug)]
pub struct BrailleTables {
    ascii_to_braille: BitTrie,
    braille_to_ascii: BitTrie,
    braille_to_unicode: BitTrie,
}

impl Default for BrailleTables {
    fn default() -> Self {
        Self::empty()
    }
}

impl BrailleTables {
    /// Creates tables with no mappings. Every lookup fails with [`TrieError::PathNotFound`].
    pub fn empty() -> Self {
        Self {
            ascii_to_braille: BitTrie::new(ASCII_BITS),
            braille_to_ascii: BitTrie::new(CELL_BITS),
            braille_to_unicode: BitTrie::new(CELL_BITS),
        }
    }

    /// Builds the tables from already populated tries.
    ///
    /// Fails with [`TrieError::KeyLengthMismatch`] if a trie does not have the key length of its
    /// table.
    pub fn from_tries(
        ascii_to_braille: BitTrie,
        braille_to_ascii: BitTrie,
        braille_to_unicode: BitTrie,
    ) -> Result<Self, TrieError> {
        for (trie, expected) in [
            (&ascii_to_braille, ASCII_BITS),
            (&braille_to_ascii, CELL_BITS),
            (&braille_to_unicode, CELL_BITS),
        ] {
            if trie.key_len() != expected {
                return Err(TrieError::KeyLengthMismatch { expected, actual: trie.key_len() });
            }
        }
        Ok(Self { ascii_to_braille, braille_to_ascii, braille_to_unicode })
    }

    /// Loads the tables from three sources in the `bits,value` line format.
    ///
    /// Malformed lines and records are skipped as described in [`BitTrie::load`]; only read
    /// failures are returned.
    pub fn from_readers<A, B, U>(
        ascii_to_braille: A,
        braille_to_ascii: B,
        braille_to_unicode: U,
    ) -> Result<Self, TrieError>
    where
        A: BufRead,
        B: BufRead,
        U: BufRead,
    {
        let mut tables = Self::empty();
        tables.ascii_to_braille.load(ascii_to_braille)?;
        tables.braille_to_ascii.load(braille_to_ascii)?;
        tables.braille_to_unicode.load(braille_to_unicode)?;
        Ok(tables)
    }

    /// Loads the tables from [`ASCII_TO_BRAILLE_FILE`], [`BRAILLE_TO_ASCII_FILE`] and
    /// [`BRAILLE_TO_UNICODE_FILE`] in `dir`.
    ///
    /// A table that cannot be opened or read is logged and reported as
    /// [`BrailleError::ResourceUnavailable`] in the returned list. It stays empty, so lookups in
    /// it fail with [`TrieError::PathNotFound`]; the other tables are still usable.
    pub fn load_dir(dir: impl AsRef<Path>) -> (Self, Vec<BrailleError>) {
        let dir = dir.as_ref();
        let mut tables = Self::empty();
        let mut failures = Vec::new();

        for (name, trie) in [
            (ASCII_TO_BRAILLE_FILE, &mut tables.ascii_to_braille),
            (BRAILLE_TO_ASCII_FILE, &mut tables.braille_to_ascii),
            (BRAILLE_TO_UNICODE_FILE, &mut tables.braille_to_unicode),
        ] {
            let path = dir.join(name);
            let source = File::open(&path).map(BufReader::new);
            if let Err(err) = load_table(trie, path, source) {
                failures.push(err);
            }
        }

        (tables, failures)
    }

    /// Returns the Braille cell of an ASCII character.
    ///
    /// The character code is looked up as an 8-bit key. Characters above `U+00FF` need more than
    /// 8 bits and fail with [`TrieError::InvalidKey`]; unmapped characters fail with
    /// [`TrieError::PathNotFound`].
    pub fn to_braille(&self, letter: char) -> Result<&str, TrieError> {
        self.ascii_to_braille.get_key(&BitKey::from_code(letter as u32, ASCII_BITS))
    }

    /// Converts every character of `text` to Braille and concatenates the cells.
    pub fn text_to_braille(&self, text: &str) -> Result<String, TrieError> {
        text.chars().map(|letter| self.to_braille(letter)).collect()
    }

    /// Converts a string of Braille cells to ASCII.
    ///
    /// The input is read six characters at a time. A trailing partial cell is looked up as is,
    /// which fails with [`TrieError::InvalidKey`].
    pub fn to_ascii(&self, bits: &str) -> Result<String, TrieError> {
        chunks(bits, CELL_BITS).map(|cell| self.braille_to_ascii.get(cell)).collect()
    }

    /// Converts a string of Braille cells to Unicode Braille.
    ///
    /// The input is read six characters at a time. A trailing partial cell is padded with `0` on
    /// the right before the lookup.
    pub fn to_unicode(&self, bits: &str) -> Result<String, TrieError> {
        chunks(bits, CELL_BITS)
            .map(|cell| {
                let missing = CELL_BITS.saturating_sub(cell.chars().count());
                if missing == 0 {
                    return self.braille_to_unicode.get(cell);
                }
                let padded = format!("{cell}{}", "0".repeat(missing));
                self.braille_to_unicode.get(&padded)
            })
            .collect()
    }

    /// Converts `text` to `target`.
    pub fn convert(&self, target: CharacterSet, text: &str) -> Result<String, TrieError> {
        let converted = match target {
            CharacterSet::Braille => self.text_to_braille(text),
            CharacterSet::Ascii => self.to_ascii(text),
            CharacterSet::Unicode => self.to_unicode(text),
        };
        if let Err(err) = &converted {
            debug!(target: "trie::braille", charset = %target, %err, "conversion failed");
        }
        converted
    }

    /// Returns the ASCII to Braille trie.
    pub const fn ascii_to_braille(&self) -> &BitTrie {
        &self.ascii_to_braille
    }

    /// Returns the Braille to ASCII trie.
    pub const fn braille_to_ascii(&self) -> &BitTrie {
        &self.braille_to_ascii
    }

    /// Returns the Braille to Unicode trie.
    pub const fn braille_to_unicode(&self) -> &BitTrie {
        &self.braille_to_unicode
    }
}

/// Loads one table file into `trie`.
///
/// If the file cannot be opened or read, `trie` is left empty, even when some records were read
/// before the failure.
fn load_table<R: BufRead>(
    trie: &mut BitTrie,
    path: PathBuf,
    source: io::Result<R>,
) -> Result<LoadStats, BrailleError> {
    match source.map_err(TrieError::from).and_then(|source| trie.load(source)) {
        Ok(stats) => {
            debug!(target: "trie::braille", path = %path.display(), ?stats, "loaded table");
            Ok(stats)
        }
        Err(TrieError::Io(source)) => {
            error!(
                target: "trie::braille",
                path = %path.display(),
                %source,
                "mapping table unavailable"
            );
            *trie = BitTrie::new(trie.key_len());
            Err(BrailleError::ResourceUnavailable { path, source })
        }
        Err(err) => Err(err.into()),
    }
}
