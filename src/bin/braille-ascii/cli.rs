use std::path::PathBuf;

use braille_trie::CharacterSet;
use clap::Parser;

/// Convert text between ASCII, Braille cells and Unicode Braille.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Target character set: braille, ascii or unicode (case-insensitive).
    pub(crate) target: CharacterSet,

    /// Text to convert. Braille input is a string of `0`/`1`, six per cell.
    pub(crate) text: String,

    /// Directory holding ASCIIToBraille.txt, brailleToASCII.txt and brailleToUnicode.txt.
    #[arg(long, env = "BRAILLE_TABLES_DIR", default_value = ".")]
    pub(crate) tables: PathBuf,

    /// Log level: off, error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub(crate) log_level: log::LevelFilter,
}
