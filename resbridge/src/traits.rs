//! Traits for reading source resources and writing Apple outputs.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use encoding_rs::Encoding;

use crate::error::Error;

/// A trait for parsing a localization resource from one file.
///
/// # Example
///
/// ```rust,no_run
/// use resbridge::traits::Parser;
/// let format = resbridge::formats::android_strings::Format::read_from(
///     "res/values/strings.xml",
///     encoding_rs::UTF_8,
/// )?;
/// println!("{} strings", format.strings.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader yielding UTF-8.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path, decoding the bytes with `encoding`.
    ///
    /// A byte order mark takes precedence over `encoding`.
    fn read_from<P: AsRef<Path>>(path: P, encoding: &'static Encoding) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Error::MissingSource {
                path: path.to_path_buf(),
                source,
            },
            _ => Error::Io(source),
        })?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .bom_override(true)
            .build(file);
        Self::from_reader(BufReader::new(decoder))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// A trait for serializing an output file.
pub trait Encoder {
    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path, truncating any previous content.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize into an in-memory string.
    #[cfg(test)]
    fn to_string_lossy(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Resolve an encoding label such as `utf-8` or `utf-16le`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, Error> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}
