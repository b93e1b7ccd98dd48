//! All error types for the resbridge crate.
//!
//! These are returned from all fallible operations (reading resources,
//! writing string tables, walking resource trees).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("source file not found: {}", path.display())]
    MissingSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new invalid resource error
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Error::InvalidResource(message.into())
    }

    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_missing_source_names_path() {
        let error = Error::MissingSource {
            path: PathBuf::from("res/values-fr/strings.xml"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(
            error.to_string(),
            "source file not found: res/values-fr/strings.xml"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_resource_error() {
        let error = Error::invalid_resource("string tag missing 'name'");
        assert_eq!(
            error.to_string(),
            "invalid resource: string tag missing 'name'"
        );
    }

    #[test]
    fn test_unknown_encoding_error() {
        let error = Error::UnknownEncoding("klingon-8".to_string());
        assert_eq!(error.to_string(), "unknown encoding `klingon-8`");
    }

    #[test]
    fn test_config_error() {
        let error = Error::config_error("empty table name");
        assert_eq!(error.to_string(), "configuration error: empty table name");
    }
}
