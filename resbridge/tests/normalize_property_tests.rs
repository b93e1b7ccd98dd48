use proptest::prelude::*;
use resbridge::{normalize_language_code, normalize_value};

fn raw_value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r#"[A-Za-z0-9 _\\"%$&;<>{}\n\.,!\?]{0,40}"#)
        .expect("valid value regex")
}

fn tag_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z+\\-]{0,10}").expect("valid tag regex")
}

/// True if every `"` in `s` is directly preceded by a backslash.
fn quotes_are_escaped(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes
        .iter()
        .enumerate()
        .all(|(i, &b)| b != b'"' || (i > 0 && bytes[i - 1] == b'\\'))
}

proptest! {
    #[test]
    fn prop_value_is_single_line(raw in raw_value_strategy()) {
        let normalized = normalize_value(&raw);
        prop_assert!(!normalized.contains('\n'));
    }

    #[test]
    fn prop_no_bare_quotes(raw in raw_value_strategy()) {
        let normalized = normalize_value(&raw);
        prop_assert!(quotes_are_escaped(&normalized), "bare quote in {:?}", normalized);
    }

    #[test]
    fn prop_no_string_specifiers_left(raw in "[a-z %0-9$s]{0,30}") {
        let normalized = normalize_value(&raw);
        prop_assert!(!normalized.contains("%s"));
        let positional = regex::Regex::new(r"%\d+\$s").unwrap();
        prop_assert!(!positional.is_match(&normalized));
    }

    #[test]
    fn prop_plain_text_is_trimmed_only(raw in "[A-Za-z0-9 ,\\.!]{0,30}") {
        prop_assert_eq!(normalize_value(&raw), raw.trim());
    }

    #[test]
    fn prop_language_code_is_total_and_stable(tag in tag_strategy()) {
        let once = normalize_language_code(&tag);
        if tag.len() != 6 || !tag.contains("-r") {
            if tag != "b+sr+Latn" {
                prop_assert_eq!(&once, &tag);
            }
        } else {
            prop_assert!(once.len() < tag.len());
        }
    }
}
