#![forbid(unsafe_code)]
//! Android → Apple localization resource converter.
//!
//! Reads Android `res/values*/strings.xml` files and writes Apple
//! `<locale>.lproj/Localizable.strings` string tables, plus a
//! `Localizable.stringsdict` for languages that define plurals.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resbridge::{ConvertOptions, convert_tree};
//!
//! // Convert a whole resource tree
//! let summary = convert_tree(
//!     "app/src/main/res",
//!     "Resources/Localizations",
//!     &ConvertOptions::default(),
//! )?;
//! for language in &summary.languages {
//!     println!("{}: {} strings", language.locale, language.conversion.strings);
//! }
//! # Ok::<(), resbridge::Error>(())
//! ```
//!
//! # Conversion rules
//!
//! - Directory names map to locales: `values` → default language,
//!   `values-zh-rTW` → `zh-TW`, `values-b+sr+Latn` → `sr-Latn`.
//! - Values are trimmed, unescaped quotes are dropped, `%s` / `%1$s` become
//!   `%@` / `%1$@`, `${app_name}` becomes `%@`, `&amp;` `&lt;` `&gt;` are
//!   decoded and newlines removed.
//! - `<plurals>` become `NSStringPluralRuleType` rules over an integer.

pub mod converter;
pub mod error;
pub mod formats;
pub mod locale;
pub mod normalize;
pub mod options;
pub mod process;
pub mod traits;
pub mod types;
pub mod walk;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{ConversionReport, convert_file, create_directories_for},
    error::Error,
    locale::{LocaleMapper, normalize_language_code},
    normalize::normalize_value,
    options::ConvertOptions,
    process::{ToolCommand, ToolOutcome},
    types::{LanguageBundle, PluralCategory, PluralGroup, PluralItem, StringEntry},
    walk::{LanguageReport, RunSummary, convert_tree, discover_bundles},
};
