//! Conversion of a whole Android `res` directory.
//!
//! Every immediate `values` / `values-*` subdirectory is one language. Each
//! language is converted independently; the first failure aborts the run.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    converter::{ConversionReport, convert_file},
    error::Error,
    formats::strings_path_for,
    locale::{is_known_untranslatable, is_valid_locale, language_tag_for_directory},
    options::ConvertOptions,
    process::{ToolOutcome, run_tool},
    types::LanguageBundle,
};

/// Result of one language conversion in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageReport {
    pub raw_tag: String,
    pub locale: String,
    #[serde(flatten)]
    pub conversion: ConversionReport,
}

/// Result of [`convert_tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub languages: Vec<LanguageReport>,
    pub project_generator: ToolOutcome,
}

impl RunSummary {
    pub fn total_strings(&self) -> usize {
        self.languages.iter().map(|l| l.conversion.strings).sum()
    }

    pub fn total_plural_groups(&self) -> usize {
        self.languages.iter().map(|l| l.conversion.plural_groups).sum()
    }
}

/// List the languages below `res_dir` and where their outputs go.
///
/// Bundles are sorted by directory name.
pub fn discover_bundles<P: AsRef<Path>, Q: AsRef<Path>>(
    res_dir: P,
    output_dir: Q,
    options: &ConvertOptions,
) -> Result<Vec<LanguageBundle>, Error> {
    let (res_dir, output_dir) = (res_dir.as_ref(), output_dir.as_ref());
    let mapper = options.locale_mapper();
    let mut bundles = Vec::new();

    let walker = WalkDir::new(res_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy();
        let Some(raw_tag) = language_tag_for_directory(&dir_name, &options.default_language)
        else {
            debug!(directory = %dir_name, "not a values directory, skipping");
            continue;
        };

        let locale = mapper.normalize(&raw_tag);
        if !options.accepts_locale(&locale) {
            debug!(%locale, "filtered out");
            continue;
        }
        if is_known_untranslatable(&raw_tag) || !is_valid_locale(&locale) {
            warn!(%raw_tag, %locale, "locale has no valid Apple identifier, keeping it as is");
        }

        let source = entry.path().join(&options.source_file_name);
        let strings_path = strings_path_for(output_dir, &locale, &options.table_name);
        bundles.push(LanguageBundle::new(raw_tag, locale, source, strings_path));
    }

    Ok(bundles)
}

/// Convert one discovered language.
pub fn convert_bundle(
    bundle: &LanguageBundle,
    options: &ConvertOptions,
) -> Result<LanguageReport, Error> {
    info!(raw_tag = %bundle.raw_tag, locale = %bundle.locale, "processing language");
    let conversion = convert_file(&bundle.source, &bundle.strings_path, options)?;
    Ok(LanguageReport {
        raw_tag: bundle.raw_tag.clone(),
        locale: bundle.locale.clone(),
        conversion,
    })
}

/// Convert every language in `res_dir` into `output_dir`, then run the
/// project generator if one is configured.
///
/// # Example
///
/// ```rust,no_run
/// use resbridge::{ConvertOptions, convert_tree};
///
/// let summary = convert_tree(
///     "library/ui-strings/src/main/res",
///     "Resources/Localizations",
///     &ConvertOptions::default(),
/// )?;
/// println!("{} languages", summary.languages.len());
/// # Ok::<(), resbridge::Error>(())
/// ```
pub fn convert_tree<P: AsRef<Path>, Q: AsRef<Path>>(
    res_dir: P,
    output_dir: Q,
    options: &ConvertOptions,
) -> Result<RunSummary, Error> {
    options.validate()?;
    let bundles = discover_bundles(res_dir, output_dir, options)?;

    let languages = bundles
        .iter()
        .map(|bundle| convert_bundle(bundle, options))
        .collect::<Result<Vec<_>, _>>()?;

    let project_generator = match &options.project_generator {
        Some(generator) => {
            info!(tool = %generator, "running project generator");
            run_tool(generator, &[], options.project_dir.as_deref())
        }
        None => ToolOutcome::Skipped,
    };

    Ok(RunSummary {
        languages,
        project_generator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn res_tree(dirs: &[&str]) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        for dir in dirs {
            fs::create_dir_all(root.path().join(dir)).unwrap();
        }
        fs::write(root.path().join("README.txt"), "not a directory").unwrap();
        root
    }

    #[test]
    fn test_discover_maps_directories() {
        let res = res_tree(&[
            "values",
            "values-zh-rTW",
            "values-b+sr+Latn",
            "drawable",
            "values-fr",
        ]);
        let bundles = discover_bundles(res.path(), "out", &ConvertOptions::default()).unwrap();

        let locales: Vec<&str> = bundles.iter().map(|b| b.locale.as_str()).collect();
        assert_eq!(locales, vec!["en", "sr-Latn", "fr", "zh-TW"]);

        let zh = &bundles[3];
        assert_eq!(zh.raw_tag, "zh-rTW");
        assert_eq!(zh.source, res.path().join("values-zh-rTW/strings.xml"));
        assert_eq!(
            zh.strings_path,
            PathBuf::from("out/zh-TW.lproj/Localizable.strings")
        );
        assert_eq!(
            zh.plurals_path,
            PathBuf::from("out/zh-TW.lproj/Localizable.stringsdict")
        );
    }

    #[test]
    fn test_discover_uses_configured_default_and_filters() {
        let res = res_tree(&["values", "values-de", "values-fr"]);
        let options = ConvertOptions::new()
            .with_default_language("de")
            .with_language_filters(vec![], vec!["fr".into()]);
        let bundles = discover_bundles(res.path(), "out", &options).unwrap();
        let tags: Vec<(&str, &str)> = bundles
            .iter()
            .map(|b| (b.raw_tag.as_str(), b.locale.as_str()))
            .collect();
        assert_eq!(tags, vec![("de", "de"), ("de", "de")]);
    }

    #[test]
    fn test_missing_res_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_bundles(dir.path().join("absent"), "out", &ConvertOptions::default());
        assert!(matches!(result, Err(Error::Walk(_))));
    }
}
