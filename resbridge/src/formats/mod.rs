//! File formats read and written by resbridge.
//!
//! Android `strings.xml` is the only input; Apple `.strings` and
//! `.stringsdict` are the outputs.

pub mod android_strings;
pub mod strings;
pub mod stringsdict;

use std::path::{Path, PathBuf};

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
pub use strings::Format as StringsFormat;
pub use stringsdict::StringsDict;

/// Default name of the Android resource file inside each `values*` directory.
pub const ANDROID_SOURCE_FILE: &str = "strings.xml";

/// Default Apple string table name.
pub const DEFAULT_TABLE_NAME: &str = "Localizable";

/// Extension of the Apple string table.
pub const STRINGS_EXTENSION: &str = "strings";

const LPROJ_SUFFIX: &str = ".lproj";

/// Path of the string table for `locale` below `output_dir`.
///
/// ```
/// use std::path::Path;
/// use resbridge::formats::strings_path_for;
///
/// assert_eq!(
///     strings_path_for(Path::new("Localizations"), "zh-TW", "Localizable"),
///     Path::new("Localizations/zh-TW.lproj/Localizable.strings"),
/// );
/// ```
pub fn strings_path_for(output_dir: &Path, locale: &str, table_name: &str) -> PathBuf {
    output_dir
        .join(format!("{}{}", locale, LPROJ_SUFFIX))
        .join(format!("{}.{}", table_name, STRINGS_EXTENSION))
}
