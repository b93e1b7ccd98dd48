//! Core types shared by the parser, the encoders and the directory driver.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

/// One source locale discovered during a directory walk.
///
/// Built once per `values*` directory and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBundle {
    /// Tag derived from the directory name (`zh-rTW` for `values-zh-rTW`).
    pub raw_tag: String,
    /// Apple locale identifier (`zh-TW`).
    pub locale: String,
    /// The Android `strings.xml` to read.
    pub source: PathBuf,
    /// Destination `.strings` file.
    pub strings_path: PathBuf,
    /// Destination `.stringsdict` file, only written when plurals exist.
    pub plurals_path: PathBuf,
}

impl LanguageBundle {
    pub fn new(
        raw_tag: impl Into<String>,
        locale: impl Into<String>,
        source: impl Into<PathBuf>,
        strings_path: impl Into<PathBuf>,
    ) -> Self {
        let strings_path = strings_path.into();
        let plurals_path = plurals_path_for(&strings_path);
        Self {
            raw_tag: raw_tag.into(),
            locale: locale.into(),
            source: source.into(),
            strings_path,
            plurals_path,
        }
    }
}

/// Path of the plural rules file that sits next to a string table.
///
/// `Localizable.strings` becomes `Localizable.stringsdict`.
pub fn plurals_path_for(strings_path: &Path) -> PathBuf {
    let mut raw = strings_path.as_os_str().to_os_string();
    raw.push("dict");
    PathBuf::from(raw)
}

/// A single `<string>` resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub key: String,
    pub value: String,
}

impl StringEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One `<item>` of a `<plurals>` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralItem {
    /// Quantity attribute, kept verbatim.
    pub quantity: String,
    pub text: String,
}

/// A `<plurals>` group with its non-empty items in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralGroup {
    pub name: String,
    pub items: Vec<PluralItem>,
}

impl PluralGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, quantity: impl Into<String>, text: impl Into<String>) {
        self.items.push(PluralItem {
            quantity: quantity.into(),
            text: text.into(),
        });
    }

    /// Groups without items produce no output.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Standard CLDR plural forms.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl FromStr for PluralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ZERO" => Ok(PluralCategory::Zero),
            "ONE" => Ok(PluralCategory::One),
            "TWO" => Ok(PluralCategory::Two),
            "FEW" => Ok(PluralCategory::Few),
            "MANY" => Ok(PluralCategory::Many),
            "OTHER" => Ok(PluralCategory::Other),
            _ => Err(format!("Unknown plural category: {}", s)),
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plurals_path_appends_dict() {
        let path = Path::new("out/fr.lproj/Localizable.strings");
        assert_eq!(
            plurals_path_for(path),
            PathBuf::from("out/fr.lproj/Localizable.stringsdict")
        );
    }

    #[test]
    fn test_bundle_derives_plurals_path() {
        let bundle = LanguageBundle::new(
            "zh-rTW",
            "zh-TW",
            "res/values-zh-rTW/strings.xml",
            "out/zh-TW.lproj/Localizable.strings",
        );
        assert_eq!(bundle.raw_tag, "zh-rTW");
        assert_eq!(
            bundle.plurals_path,
            PathBuf::from("out/zh-TW.lproj/Localizable.stringsdict")
        );
    }

    #[test]
    fn test_plural_group_keeps_items_in_order() {
        let mut group = PluralGroup::new("items");
        assert!(group.is_empty());
        group.push("one", "%d item");
        group.push("other", "");
        assert!(!group.is_empty());
        let quantities: Vec<&str> = group.items.iter().map(|i| i.quantity.as_str()).collect();
        assert_eq!(quantities, vec!["one", "other"]);
        assert_eq!(group.items[1].text, "");
    }

    #[test]
    fn test_plural_category_round_trip_names() {
        for name in ["zero", "one", "two", "few", "many", "other"] {
            let category: PluralCategory = name.parse().unwrap();
            assert_eq!(category.to_string(), name);
        }
        assert!("several".parse::<PluralCategory>().is_err());
    }
}
