//! Line-oriented text form of a [`BitTrie`].
//!
//! Each leaf is one line `key,value`, where `key` is the leaf's bit string. Values are written
//! verbatim: a value containing a comma or a line break does not survive a round trip.

use crate::{BitTrie, error::TrieError};
use std::io::{BufRead, Write};
use tracing::{debug, trace, warn};

/// The record separator.
pub const SEPARATOR: char = ',';

/// Byte order mark some editors put at the start of UTF-8 files.
const BOM: char = '\u{feff}';

/// Summary of a [`BitTrie::load`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadStats {
    /// Records stored in the trie.
    pub inserted: usize,
    /// Lines ignored because they were not valid UTF-8 or did not contain exactly one separator.
    pub skipped_lines: usize,
    /// Well-formed records whose key the trie rejected.
    pub rejected_keys: usize,
}

impl BitTrie {
    /// Writes every leaf as a `key,value` line, in ascending key order.
    pub fn dump<W: Write>(&self, mut out: W) -> Result<(), TrieError> {
        for (key, value) in self {
            writeln!(out, "{key}{SEPARATOR}{value}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Returns the text form produced by [`dump`](Self::dump) as a string.
    pub fn dump_to_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in self {
            out.push_str(&key.to_string());
            out.push(SEPARATOR);
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Reads `key,value` lines from `source` and [`set`](Self::set)s each record.
    ///
    /// Lines that do not contain exactly one comma, or that are not valid UTF-8, are skipped. A
    /// leading byte order mark is ignored. A record whose key is not valid for this trie is logged
    /// and skipped; the rest of the source is still loaded. Only a failure to read from `source`
    /// aborts the load, with [`TrieError::Io`].
    pub fn load<R: BufRead>(&mut self, mut source: R) -> Result<LoadStats, TrieError> {
        let mut stats = LoadStats::default();
        let mut buf = Vec::new();
        for number in 1.. {
            buf.clear();
            if source.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let Ok(line) = core::str::from_utf8(trim_line_end(&buf)) else {
                warn!(target: "trie::codec", line = number, "skipping line that is not UTF-8");
                stats.skipped_lines += 1;
                continue;
            };
            let line = if number == 1 { line.strip_prefix(BOM).unwrap_or(line) } else { line };

            let Some((key, value)) = split_record(line) else {
                trace!(
                    target: "trie::codec",
                    line = number,
                    "skipping line without a single separator"
                );
                stats.skipped_lines += 1;
                continue;
            };
            match self.set(key, value) {
                Ok(()) => stats.inserted += 1,
                Err(err) if err.is_invalid_key() => {
                    warn!(target: "trie::codec", line = number, %err, "rejected record");
                    stats.rejected_keys += 1;
                }
                Err(err) => return Err(err),
            }
        }
        debug!(target: "trie::codec", ?stats, "loaded trie");
        Ok(stats)
    }

    /// Creates a trie for keys of `key_len` bits and [`load`](Self::load)s it from `source`.
    ///
    /// # Panics
    ///
    /// Panics if `key_len` is zero.
    pub fn from_reader<R: BufRead>(
        key_len: usize,
        source: R,
    ) -> Result<(Self, LoadStats), TrieError> {
        let mut trie = Self::new(key_len);
        let stats = trie.load(source)?;
        Ok((trie, stats))
    }
}

/// Strips a trailing `\n` or `\r\n`.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Splits a line into `(key, value)` if it contains exactly one separator.
fn split_record(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(SEPARATOR)?;
    if value.contains(SEPARATOR) {
        return None;
    }
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::{self, Read};

    const TABLE: &str = "000001,a\n000011,b\n100000,A\n";

    #[test]
    fn split_records() {
        assert_eq!(split_record("0101,x"), Some(("0101", "x")));
        assert_eq!(split_record("0101,"), Some(("0101", "")));
        assert_eq!(split_record(",x"), Some(("", "x")));
        assert_eq!(split_record("0101"), None);
        assert_eq!(split_record("0101,x,y"), None);
        assert_eq!(split_record(""), None);
    }

    #[test]
    fn load_table() {
        let mut trie = BitTrie::new(6);
        let stats = trie.load(TABLE.as_bytes()).unwrap();
        assert_eq!(stats, LoadStats { inserted: 3, skipped_lines: 0, rejected_keys: 0 });
        assert_eq!(trie.get("100000").unwrap(), "A");
        assert_eq!(trie.get("000011").unwrap(), "b");
    }

    #[test]
    fn load_skips_malformed_lines() {
        let source = "000001,a\n\nno separator\n000010,b,c\n000011,c\r\n000100,d";
        let (trie, stats) = BitTrie::from_reader(6, source.as_bytes()).unwrap();
        assert_eq!(stats, LoadStats { inserted: 3, skipped_lines: 3, rejected_keys: 0 });
        assert!(trie.get("000010").unwrap_err().is_path_not_found());
        // CRLF endings are stripped, and the last line needs no newline.
        assert_eq!(trie.get("000011").unwrap(), "c");
        assert_eq!(trie.get("000100").unwrap(), "d");
    }

    #[test]
    fn load_continues_past_bad_keys() {
        let source = "0001,short\n00000x,bad\n000001,ok\n";
        let (trie, stats) = BitTrie::from_reader(6, source.as_bytes()).unwrap();
        assert_eq!(stats, LoadStats { inserted: 1, skipped_lines: 0, rejected_keys: 2 });
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("000001").unwrap(), "ok");
    }

    #[test]
    fn load_skips_invalid_utf8_lines() {
        let source: &[u8] = b"100000,A\n\xff\xfe,bad\n110000,B\n";
        let (trie, stats) = BitTrie::from_reader(6, source).unwrap();
        assert_eq!(stats, LoadStats { inserted: 2, skipped_lines: 1, rejected_keys: 0 });
        assert_eq!(trie.get("100000").unwrap(), "A");
        assert_eq!(trie.get("110000").unwrap(), "B");
    }

    #[test]
    fn load_ignores_leading_bom() {
        let source = "\u{feff}100000,A\n110000,B\n";
        let (trie, stats) = BitTrie::from_reader(6, source.as_bytes()).unwrap();
        assert_eq!(stats, LoadStats { inserted: 2, skipped_lines: 0, rejected_keys: 0 });
        assert_eq!(trie.get("100000").unwrap(), "A");

        // Only the first line may carry one.
        let source = "100000,A\n\u{feff}110000,B\n";
        let (_, stats) = BitTrie::from_reader(6, source.as_bytes()).unwrap();
        assert_eq!(stats, LoadStats { inserted: 1, skipped_lines: 0, rejected_keys: 1 });
    }

    #[test]
    fn trims_line_endings() {
        assert_eq!(trim_line_end(b"01,a\r\n"), b"01,a");
        assert_eq!(trim_line_end(b"01,a\n"), b"01,a");
        assert_eq!(trim_line_end(b"01,a"), b"01,a");
        assert_eq!(trim_line_end(b"01,a\r"), b"01,a");
    }

    #[test]
    fn load_later_records_overwrite() {
        let (trie, stats) = BitTrie::from_reader(2, "01,a\n01,b\n".as_bytes()).unwrap();
        assert_eq!(stats.inserted, 2);
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("01").unwrap(), "b");
    }

    #[test]
    fn load_propagates_read_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let mut trie = BitTrie::new(6);
        let err = trie.load(io::BufReader::new(Broken)).unwrap_err();
        assert!(matches!(err, TrieError::Io(_)));
    }

    #[test]
    fn dump_format() {
        let mut trie = BitTrie::new(6);
        trie.load(TABLE.as_bytes()).unwrap();
        trie.set("000010", "").unwrap();

        let expected = "000001,a\n000010,\n000011,b\n100000,A\n";
        assert_eq!(trie.dump_to_string(), expected);

        let mut buf = Vec::new();
        trie.dump(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }

    #[test]
    fn dump_empty() {
        assert_eq!(BitTrie::new(3).dump_to_string(), "");
    }

    proptest! {
        #[test]
        fn dump_then_load_round_trips(
            entries in proptest::collection::vec(
                (proptest::collection::vec(any::<bool>(), 6), "[^,\r\n]{0,5}"),
                0..30,
            ),
        ) {
            let mut trie = BitTrie::new(6);
            for (bits, value) in &entries {
                let key: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
                trie.set(&key, value.as_str()).unwrap();
            }

            let text = trie.dump_to_string();
            let (reloaded, stats) = BitTrie::from_reader(6, text.as_bytes()).unwrap();
            prop_assert_eq!(stats.inserted, trie.len());
            prop_assert_eq!(stats.skipped_lines + stats.rejected_keys, 0);
            prop_assert!(trie.iter().eq(reloaded.iter()));
        }
    }
}
