//! Support for writing Apple `.strings` localization files.
//!
//! One line per pair, `"key" = "value";`, in insertion order. Values are
//! written as given; run them through [`crate::normalize::normalize_value`]
//! first.

use std::io::Write;

use crate::{error::Error, traits::Encoder, types::StringEntry};

/// Represents an Apple `.strings` localization file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// All key-value pairs in the file.
    pub pairs: Vec<Pair>,
}

impl Encoder for Format {
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for pair in &self.pairs {
            writeln!(writer, "{}", pair)?;
        }
        Ok(())
    }
}

impl FromIterator<StringEntry> for Format {
    fn from_iter<I: IntoIterator<Item = StringEntry>>(iter: I) -> Self {
        Format {
            pairs: iter.into_iter().map(Pair::from).collect(),
        }
    }
}

/// A single key-value pair in a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl From<StringEntry> for Pair {
    fn from(entry: StringEntry) -> Self {
        Pair {
            key: entry.key,
            value: entry.value,
        }
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" = \"{}\";", self.key, self.value)
    }
}
