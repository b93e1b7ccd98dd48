//! Configuration loading for the CLI.
//!
//! Options come from an optional TOML file, then command line flags are
//! applied on top:
//!
//! ```toml
//! default_language = "en"
//! table_name = "Localizable"
//! exclude_languages = ["vls", "ang"]
//!
//! [locale_overrides]
//! "zh-rTW" = "zh-Hant"
//!
//! [canonicalizer]
//! program = "plutil"
//! args = ["-convert", "xml1"]
//!
//! [project_generator]
//! program = "xcodegen"
//! ```

use std::{fs, path::Path, path::PathBuf};

use resbridge::{ConvertOptions, Error, ToolCommand};

/// Flags shared by the converting subcommands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Locale of the unqualified `values` directory
    #[arg(long)]
    pub default_language: Option<String>,

    /// Name of the resource file inside each `values*` directory
    #[arg(long)]
    pub source_file: Option<String>,

    /// Apple table name (`Localizable` writes `Localizable.strings`)
    #[arg(long)]
    pub table_name: Option<String>,

    /// Encoding of the source files (e.g. utf-8, utf-16le, iso-8859-1)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Do not run the plist canonicalizer on `.stringsdict` files
    #[arg(long)]
    pub no_canonicalize: bool,

    /// Canonicalizer command line; the plist path is appended
    #[arg(long)]
    pub canonicalizer: Option<String>,

    /// Command run once after all languages are converted
    #[arg(long)]
    pub project_generator: Option<String>,

    /// Working directory of the project generator
    #[arg(long)]
    pub project_dir: Option<PathBuf>,

    /// Only convert these locales (repeatable, after normalization)
    #[arg(long = "include-lang", value_name = "LOCALE")]
    pub include_lang: Vec<String>,

    /// Skip these locales (repeatable, after normalization)
    #[arg(long = "exclude-lang", value_name = "LOCALE")]
    pub exclude_lang: Vec<String>,
}

impl OptionArgs {
    /// Load the configuration file (if any) and apply the flags.
    pub fn resolve(&self) -> Result<ConvertOptions, Error> {
        let options = load_options(self.config.as_deref())?;
        self.apply(options)
    }

    pub fn apply(&self, mut options: ConvertOptions) -> Result<ConvertOptions, Error> {
        if let Some(language) = &self.default_language {
            options.default_language = language.clone();
        }
        if let Some(source_file) = &self.source_file {
            options.source_file_name = source_file.clone();
        }
        if let Some(table_name) = &self.table_name {
            options.table_name = table_name.clone();
        }
        if let Some(encoding) = &self.encoding {
            options.encoding = encoding.clone();
        }
        if let Some(command_line) = &self.canonicalizer {
            options.canonicalizer = parse_command(command_line, "canonicalizer")?;
        }
        if self.no_canonicalize {
            options.canonicalize = false;
        }
        if let Some(command_line) = &self.project_generator {
            options.project_generator = Some(parse_command(command_line, "project generator")?);
        }
        if let Some(dir) = &self.project_dir {
            options.project_dir = Some(dir.clone());
        }
        if !self.include_lang.is_empty() {
            options.include_languages = self.include_lang.clone();
        }
        if !self.exclude_lang.is_empty() {
            options.exclude_languages = self.exclude_lang.clone();
        }
        options.validate()?;
        Ok(options)
    }
}

/// Read options from a TOML file, or defaults when `path` is `None`.
pub fn load_options(path: Option<&Path>) -> Result<ConvertOptions, Error> {
    let Some(path) = path else {
        return Ok(ConvertOptions::default());
    };
    let content = fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config_error(format!("{}: {}", path.display(), e)))
}

/// Parse options from TOML text.
pub fn parse_options(content: &str) -> Result<ConvertOptions, Error> {
    toml::from_str(content).map_err(|e| Error::config_error(e.to_string()))
}

fn parse_command(command_line: &str, what: &str) -> Result<ToolCommand, Error> {
    ToolCommand::parse(command_line)
        .ok_or_else(|| Error::config_error(format!("empty {} command", what)))
}
