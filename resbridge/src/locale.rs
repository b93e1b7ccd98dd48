//! Android resource qualifier → Apple locale identifier mapping.
//!
//! Android encodes locales in directory names (`values-zh-rTW`,
//! `values-b+sr+Latn`), Apple expects plain identifiers (`zh-TW`, `sr-Latn`).
//! The mapping is total: anything it does not recognise passes through as is.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

lazy_static! {
    /// Tags whose shape cannot be fixed by the structural rule.
    static ref OVERRIDES: BTreeMap<&'static str, &'static str> = {
        let mut m = BTreeMap::new();
        m.insert("b+sr+Latn", "sr-Latn");
        m
    };
}

/// Languages Android ships that have no Apple equivalent.
const UNTRANSLATABLE: [&str; 4] = ["vls", "ang", "szl", "tzm"];

/// Directory holding the default language resources.
pub const DEFAULT_VALUES_DIR: &str = "values";

const VALUES_PREFIX: &str = "values-";

/// Normalize an Android language tag to an Apple locale identifier.
///
/// ```
/// use resbridge::locale::normalize_language_code;
///
/// assert_eq!(normalize_language_code("b+sr+Latn"), "sr-Latn");
/// assert_eq!(normalize_language_code("zh-rTW"), "zh-TW");
/// assert_eq!(normalize_language_code("en"), "en");
/// ```
pub fn normalize_language_code(tag: &str) -> String {
    if let Some(mapped) = OVERRIDES.get(tag) {
        return (*mapped).to_string();
    }
    strip_region_marker(tag)
}

// `xx-rYY` is the only shape where the `r` marker can be dropped safely.
fn strip_region_marker(tag: &str) -> String {
    if tag.len() == 6 && tag.contains("-r") {
        tag.replace("-r", "-")
    } else {
        tag.to_string()
    }
}

/// Whether `tag` is one of the known tags that stay invalid after mapping.
pub fn is_known_untranslatable(tag: &str) -> bool {
    UNTRANSLATABLE.contains(&tag)
}

/// Whether `locale` parses as a Unicode language identifier.
pub fn is_valid_locale(locale: &str) -> bool {
    locale.parse::<LanguageIdentifier>().is_ok()
}

/// Extract the raw language tag from a resource directory name.
///
/// Returns `None` for directories that are not `values` or `values-*`.
pub fn language_tag_for_directory(dir_name: &str, default_language: &str) -> Option<String> {
    if dir_name == DEFAULT_VALUES_DIR {
        return Some(default_language.to_string());
    }
    dir_name
        .strip_prefix(VALUES_PREFIX)
        .filter(|rest| !rest.is_empty())
        .map(str::to_string)
}

/// Locale normalizer with project specific overrides on top of the
/// built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleMapper {
    overrides: BTreeMap<String, String>,
}

impl LocaleMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds overrides that take precedence over the built-in table.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn normalize(&self, tag: &str) -> String {
        match self.overrides.get(tag) {
            Some(mapped) => mapped.clone(),
            None => normalize_language_code(tag),
        }
    }
}
