//! Options controlling a conversion run.

use std::{collections::BTreeMap, path::PathBuf};

use encoding_rs::Encoding;
use serde::Deserialize;

use crate::{
    error::Error,
    formats::{ANDROID_SOURCE_FILE, DEFAULT_TABLE_NAME},
    locale::LocaleMapper,
    process::ToolCommand,
    traits::encoding_for_label,
};

/// Conversion behavior for [`crate::convert_tree`] and [`crate::convert_file`].
///
/// Deserializable so it can be loaded straight from a configuration file;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Locale used for the unqualified `values` directory.
    pub default_language: String,
    /// File read from each `values*` directory.
    pub source_file_name: String,
    /// Apple table name, `Localizable` gives `Localizable.strings`.
    pub table_name: String,
    /// Encoding label of the source files.
    pub encoding: String,
    /// Extra tag mappings applied before the built-in ones.
    pub locale_overrides: BTreeMap<String, String>,
    /// Whether to run `canonicalizer` on written `.stringsdict` files.
    pub canonicalize: bool,
    pub canonicalizer: ToolCommand,
    /// Run once after all languages, without arguments.
    pub project_generator: Option<ToolCommand>,
    /// Working directory of the project generator.
    pub project_dir: Option<PathBuf>,
    /// Only convert these locales (after normalization), if non-empty.
    pub include_languages: Vec<String>,
    /// Never convert these locales (after normalization).
    pub exclude_languages: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            source_file_name: ANDROID_SOURCE_FILE.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            encoding: "utf-8".to_string(),
            locale_overrides: BTreeMap::new(),
            canonicalize: true,
            canonicalizer: ToolCommand::plutil_xml1(),
            project_generator: None,
            project_dir: None,
            include_languages: Vec::new(),
            exclude_languages: Vec::new(),
        }
    }
}

impl ConvertOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locale of the `values` directory.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Sets the source encoding label.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Sets the Apple table name.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Enables/disables the plist canonicalizer.
    pub fn with_canonicalize(mut self, canonicalize: bool) -> Self {
        self.canonicalize = canonicalize;
        self
    }

    /// Replaces the plist canonicalizer command.
    pub fn with_canonicalizer(mut self, canonicalizer: ToolCommand) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    /// Sets the project generator and its working directory.
    pub fn with_project_generator(
        mut self,
        generator: Option<ToolCommand>,
        dir: Option<PathBuf>,
    ) -> Self {
        self.project_generator = generator;
        self.project_dir = dir;
        self
    }

    /// Adds a locale override.
    pub fn with_locale_override(
        mut self,
        tag: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        self.locale_overrides.insert(tag.into(), locale.into());
        self
    }

    /// Sets include/exclude locale filters.
    pub fn with_language_filters(mut self, include: Vec<String>, exclude: Vec<String>) -> Self {
        self.include_languages = include;
        self.exclude_languages = exclude;
        self
    }

    /// Resolved source encoding.
    pub fn encoding(&self) -> Result<&'static Encoding, Error> {
        encoding_for_label(&self.encoding)
    }

    pub fn locale_mapper(&self) -> LocaleMapper {
        LocaleMapper::new().with_overrides(self.locale_overrides.clone())
    }

    /// Whether a normalized locale passes the include/exclude filters.
    pub fn accepts_locale(&self, locale: &str) -> bool {
        if !self.include_languages.is_empty()
            && !self.include_languages.iter().any(|l| l == locale)
        {
            return false;
        }
        !self.exclude_languages.iter().any(|l| l == locale)
    }

    /// Rejects options that cannot produce a usable run.
    pub fn validate(&self) -> Result<(), Error> {
        if self.default_language.trim().is_empty() {
            return Err(Error::config_error("default_language must not be empty"));
        }
        if self.source_file_name.trim().is_empty() {
            return Err(Error::config_error("source_file_name must not be empty"));
        }
        if self.table_name.trim().is_empty() {
            return Err(Error::config_error("table_name must not be empty"));
        }
        if self.canonicalize && self.canonicalizer.program.trim().is_empty() {
            return Err(Error::config_error("canonicalizer program must not be empty"));
        }
        self.encoding()?;
        Ok(())
    }
}
