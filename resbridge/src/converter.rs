//! Conversion of one Android `strings.xml` into Apple outputs.
//!
//! The source is parsed completely before anything is written, so a
//! malformed document leaves no output behind for its language.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::Error,
    formats::{AndroidStringsFormat, StringsDict, StringsFormat},
    normalize::normalize_value,
    options::ConvertOptions,
    process::{ToolOutcome, run_tool},
    traits::{Encoder, Parser},
    types::{PluralCategory, PluralGroup, StringEntry, plurals_path_for},
};

/// What [`convert_file`] wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub strings_path: PathBuf,
    /// Set only when a `.stringsdict` was written.
    pub plurals_path: Option<PathBuf>,
    pub strings: usize,
    pub plural_groups: usize,
    /// Top-level source elements that are not converted.
    pub skipped_elements: usize,
    pub canonicalizer: ToolOutcome,
}

/// Convert `input` (Android `strings.xml`) to `output` (Apple `.strings`).
///
/// When the source defines non-empty plurals, a `.stringsdict` is written
/// next to `output` and the configured canonicalizer is run on it.
///
/// # Example
///
/// ```rust,no_run
/// use resbridge::{ConvertOptions, convert_file};
///
/// let report = convert_file(
///     "res/values-fr/strings.xml",
///     "Localizations/fr.lproj/Localizable.strings",
///     &ConvertOptions::default().with_canonicalize(false),
/// )?;
/// println!("{} strings", report.strings);
/// # Ok::<(), resbridge::Error>(())
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConversionReport, Error> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let source = AndroidStringsFormat::read_from(input, options.encoding()?)?;
    debug!(
        input = %input.display(),
        strings = source.strings.len(),
        plurals = source.plurals.len(),
        skipped = source.skipped,
        "parsed source"
    );

    let (table, dict) = to_apple_formats(&source);

    create_directories_for(output)?;
    table.write_to(output)?;

    let mut report = ConversionReport {
        strings_path: output.to_path_buf(),
        plurals_path: None,
        strings: table.pairs.len(),
        plural_groups: dict.rules.len(),
        skipped_elements: source.skipped,
        canonicalizer: ToolOutcome::Skipped,
    };

    if !dict.is_empty() {
        let plurals_path = plurals_path_for(output);
        dict.write_to(&plurals_path)?;
        if options.canonicalize {
            report.canonicalizer =
                run_tool(&options.canonicalizer, &[plurals_path.as_os_str()], None);
        }
        report.plurals_path = Some(plurals_path);
    }

    Ok(report)
}

/// Normalize a parsed source into the string table and plural rules.
pub fn to_apple_formats(source: &AndroidStringsFormat) -> (StringsFormat, StringsDict) {
    let table = source
        .strings
        .iter()
        .map(|entry| {
            StringEntry::new(normalize_value(&entry.key), normalize_value(&entry.value))
        })
        .collect::<StringsFormat>();

    let groups = source
        .plurals
        .iter()
        .map(normalize_group)
        .collect::<Vec<_>>();

    (table, StringsDict::from_groups(&groups))
}

fn normalize_group(group: &PluralGroup) -> PluralGroup {
    let mut normalized = PluralGroup::new(group.name.clone());
    for item in &group.items {
        let quantity = normalize_value(&item.quantity);
        if quantity.parse::<PluralCategory>().is_err() {
            warn!(group = %group.name, %quantity, "unknown plural quantity");
        }
        normalized.push(quantity, normalize_value(&item.text));
    }
    normalized
}

/// Create the parent directory of `output` if needed.
///
/// Another process creating the directory concurrently is not an error.
pub fn create_directories_for(output: &Path) -> Result<(), Error> {
    let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    match fs::create_dir_all(parent) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    #[test]
    fn test_to_apple_formats_normalizes_everything() {
        let xml = r#"<resources>
            <string name="greet">Hello %1$s &amp; &quot;friends&quot;</string>
            <plurals name="items">
                <item quantity="one">%d item</item>
                <item quantity="other">  </item>
                <item quantity="many">""</item>
            </plurals>
            <plurals name="empty"><item quantity="one"></item></plurals>
        </resources>"#;
        let source = AndroidStringsFormat::from_str(xml).unwrap();
        let (table, dict) = to_apple_formats(&source);

        assert_eq!(table.pairs.len(), 1);
        assert_eq!(table.pairs[0].key, "greet");
        assert_eq!(table.pairs[0].value, "Hello %1$@ & friends");

        assert_eq!(dict.rules.len(), 1);
        assert_eq!(dict.rules[0].name, "items");
        // Only empty source text is dropped; text that normalizes to nothing is kept.
        assert_eq!(
            dict.rules[0].forms,
            vec![
                ("one".to_string(), "%d item".to_string()),
                ("other".to_string(), String::new()),
                ("many".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_create_directories_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("a/b/Localizable.strings");
        create_directories_for(&output).unwrap();
        create_directories_for(&output).unwrap();
        assert!(dir.path().join("a/b").is_dir());
        create_directories_for(Path::new("Localizable.strings")).unwrap();
    }

    #[test]
    fn test_create_directories_propagates_other_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let output = blocker.join("nested/Localizable.strings");
        assert!(create_directories_for(&output).is_err());
    }
}
