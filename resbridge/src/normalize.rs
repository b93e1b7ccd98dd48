//! Android → Apple string value normalization.
//!
//! Android values are XML escaped, Java style format templates. Apple
//! `.strings` values are single line quoted literals using `%@` for objects.
//! Each step below fixes one incompatibility and the order matters: escaped
//! quotes must survive the blanket quote removal.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref POSITIONAL_STRING: Regex = Regex::new(r"%([0-9]+)\$s").unwrap();
}

const ESCAPED_QUOTE: &str = "\\\"";
const QUOTE: char = '"';

const APP_NAME_TEMPLATES: [&str; 2] = ["${app_name}", "$ {app_name}"];

// Decoded in this order; `&amp;lt;` ends up as `<`.
const ENTITIES: [(&str, &str); 3] = [("&amp;", "&"), ("&lt;", "<"), ("&gt;", ">")];

/// Normalize a raw Android value (or key) for an Apple `.strings` file.
///
/// ```
/// use resbridge::normalize::normalize_value;
///
/// assert_eq!(
///     normalize_value("Hello %s, you have %1$s items &amp; more\n"),
///     "Hello %@, you have %1$@ items & more"
/// );
/// ```
pub fn normalize_value(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    let unquoted = strip_unescaped_quotes(trimmed);
    let specifiers = to_apple_specifiers(&unquoted);
    let templated = replace_app_name(&specifiers);
    let decoded = decode_entities(&templated);
    decoded.replace('\n', "")
}

/// Remove every `"` that is not part of a `\"` escape.
pub fn strip_unescaped_quotes(input: &str) -> String {
    input
        .split(ESCAPED_QUOTE)
        .map(|piece| piece.replace(QUOTE, ""))
        .collect::<Vec<_>>()
        .join(ESCAPED_QUOTE)
}

/// Convert string format specifiers to object specifiers.
/// - %s   -> %@
/// - %1$s -> %1$@
///
/// Numeric specifiers (`%d`, `%1$d`, `%.2f`) are left unchanged.
pub fn to_apple_specifiers(input: &str) -> String {
    let simple = input.replace("%s", "%@");
    match POSITIONAL_STRING.replace_all(&simple, "%${1}$$@") {
        Cow::Borrowed(_) => simple,
        Cow::Owned(replaced) => replaced,
    }
}

fn replace_app_name(input: &str) -> String {
    APP_NAME_TEMPLATES
        .iter()
        .fold(input.to_string(), |acc, template| acc.replace(template, "%@"))
}

fn decode_entities(input: &str) -> String {
    ENTITIES
        .iter()
        .fold(input.to_string(), |acc, (entity, ch)| acc.replace(entity, ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specifiers_entities_and_newline() {
        let raw = "Hello %s, you have %1$s items & <b>bold</b> text\n";
        assert_eq!(
            normalize_value(raw),
            "Hello %@, you have %1$@ items & <b>bold</b> text"
        );
    }

    #[test]
    fn test_escaped_quotes_preserved() {
        let raw = r#"She said \"hi\" to "Bob""#;
        assert_eq!(normalize_value(raw), r#"She said \"hi\" to Bob"#);
    }

    #[test]
    fn test_sentinel_like_text_survives() {
        assert_eq!(normalize_value("snake___case \"x\""), "snake___case x");
    }

    #[test]
    fn test_positional_beyond_five() {
        assert_eq!(
            normalize_value("%6$s and %12$s but %2$d"),
            "%6$@ and %12$@ but %2$d"
        );
    }

    #[test]
    fn test_app_name_templates() {
        assert_eq!(
            normalize_value("Welcome to ${app_name}, $ {app_name} fan"),
            "Welcome to %@, %@ fan"
        );
    }

    #[test]
    fn test_entities_decoded_in_order() {
        assert_eq!(normalize_value("a &lt;b&gt; &amp;lt;"), "a <b> <");
    }

    #[test]
    fn test_embedded_newlines_removed() {
        assert_eq!(normalize_value("  line one\nline two\n  "), "line oneline two");
    }

    #[test]
    fn test_only_ascii_whitespace_trimmed() {
        assert_eq!(normalize_value(" \t50\u{a0}%\u{a0}\r\n"), "50\u{a0}%\u{a0}");
    }

    #[test]
    fn test_positional_index_is_ascii_digits() {
        assert_eq!(normalize_value("%\u{661}$s"), "%\u{661}$s");
        assert_eq!(to_apple_specifiers("%3$s"), "%3$@");
    }

    #[test]
    fn test_numeric_specifiers_untouched() {
        assert_eq!(normalize_value("%d files, %.1f%%"), "%d files, %.1f%%");
    }

    #[test]
    fn test_strip_unescaped_quotes_only_escapes_left() {
        assert_eq!(strip_unescaped_quotes(r#"\"""\""#), r#"\"\""#);
        assert_eq!(strip_unescaped_quotes(r#""""#), "");
    }
}
