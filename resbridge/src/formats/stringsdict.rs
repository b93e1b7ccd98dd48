//! Support for writing Apple `.stringsdict` plural rules.
//!
//! A [`StringsDict`] is built from [`PluralGroup`] values and then encoded
//! as an XML property list, tab indented like `plutil -convert xml1` output.
//! Every rule uses a single `VARIABLE` over an integer argument:
//!
//! ```text
//! <key>items</key>
//! <dict>
//!     <key>NSStringLocalizedFormatKey</key>
//!     <string>%#@VARIABLE@</string>
//!     <key>VARIABLE</key>
//!     <dict>
//!         <key>NSStringFormatSpecTypeKey</key>
//!         <string>NSStringPluralRuleType</string>
//!         <key>NSStringFormatValueTypeKey</key>
//!         <string>d</string>
//!         <key>one</key>
//!         <string>%d item</string>
//!     </dict>
//! </dict>
//! ```

use std::io::Write;

use indoc::indoc;
use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::{error::Error, traits::Encoder, types::PluralGroup};

pub const FORMAT_KEY: &str = "NSStringLocalizedFormatKey";
pub const SPEC_TYPE_KEY: &str = "NSStringFormatSpecTypeKey";
pub const VALUE_TYPE_KEY: &str = "NSStringFormatValueTypeKey";
pub const PLURAL_RULE_TYPE: &str = "NSStringPluralRuleType";
pub const INTEGER_VALUE_TYPE: &str = "d";
pub const VARIABLE_NAME: &str = "VARIABLE";

const PLIST_HEADER: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
    <plist version="1.0">
"#};

const PLIST_FOOTER: &str = "\n</plist>\n";

/// All plural rules of one language, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringsDict {
    pub rules: Vec<PluralRule>,
}

impl StringsDict {
    /// Build rules from parsed groups, dropping groups without items.
    pub fn from_groups<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = &'a PluralGroup>,
    {
        StringsDict {
            rules: groups
                .into_iter()
                .filter(|group| !group.is_empty())
                .map(PluralRule::from_group)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A single localized format string with one plural variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    pub name: String,
    /// Value of `NSStringLocalizedFormatKey`.
    pub format: String,
    pub variable: String,
    pub spec_type: String,
    pub value_type: String,
    /// `(quantity, text)` pairs.
    pub forms: Vec<(String, String)>,
}

impl PluralRule {
    pub fn from_group(group: &PluralGroup) -> Self {
        PluralRule {
            name: group.name.clone(),
            format: format!("%#@{}@", VARIABLE_NAME),
            variable: VARIABLE_NAME.to_string(),
            spec_type: PLURAL_RULE_TYPE.to_string(),
            value_type: INTEGER_VALUE_TYPE.to_string(),
            forms: group
                .items
                .iter()
                .map(|item| (item.quantity.clone(), item.text.clone()))
                .collect(),
        }
    }
}

impl Encoder for StringsDict {
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer.write_all(PLIST_HEADER.as_bytes())?;

        let mut xml_writer = Writer::new_with_indent(&mut writer, b'\t', 1);
        start(&mut xml_writer, "dict")?;
        for rule in &self.rules {
            write_rule(&mut xml_writer, rule)?;
        }
        end(&mut xml_writer, "dict")?;

        writer.write_all(PLIST_FOOTER.as_bytes())?;
        Ok(())
    }
}

fn write_rule<W: Write>(xml_writer: &mut Writer<W>, rule: &PluralRule) -> Result<(), Error> {
    text_element(xml_writer, "key", &rule.name)?;
    start(xml_writer, "dict")?;
    text_element(xml_writer, "key", FORMAT_KEY)?;
    text_element(xml_writer, "string", &rule.format)?;
    text_element(xml_writer, "key", &rule.variable)?;

    start(xml_writer, "dict")?;
    text_element(xml_writer, "key", SPEC_TYPE_KEY)?;
    text_element(xml_writer, "string", &rule.spec_type)?;
    text_element(xml_writer, "key", VALUE_TYPE_KEY)?;
    text_element(xml_writer, "string", &rule.value_type)?;
    for (quantity, text) in &rule.forms {
        text_element(xml_writer, "key", quantity)?;
        text_element(xml_writer, "string", text)?;
    }
    end(xml_writer, "dict")?;

    end(xml_writer, "dict")
}

fn start<W: Write>(xml_writer: &mut Writer<W>, name: &str) -> Result<(), Error> {
    xml_writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end<W: Write>(xml_writer: &mut Writer<W>, name: &str) -> Result<(), Error> {
    xml_writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

// plist text only escapes `&`, `<` and `>`.
fn text_element<W: Write>(xml_writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), Error> {
    start(xml_writer, name)?;
    xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    end(xml_writer, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items_group() -> PluralGroup {
        let mut group = PluralGroup::new("items");
        group.push("one", "%d item");
        group.push("other", "%d items");
        group
    }

    #[test]
    fn test_rule_from_group() {
        let rule = PluralRule::from_group(&items_group());
        assert_eq!(rule.name, "items");
        assert_eq!(rule.format, "%#@VARIABLE@");
        assert_eq!(rule.variable, "VARIABLE");
        assert_eq!(rule.spec_type, "NSStringPluralRuleType");
        assert_eq!(rule.value_type, "d");
        assert_eq!(
            rule.forms,
            vec![
                ("one".to_string(), "%d item".to_string()),
                ("other".to_string(), "%d items".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_groups_dropped() {
        let groups = vec![PluralGroup::new("nothing"), items_group()];
        let dict = StringsDict::from_groups(&groups);
        assert_eq!(dict.rules.len(), 1);
        assert_eq!(dict.rules[0].name, "items");

        let only_empty = vec![PluralGroup::new("nothing")];
        assert!(StringsDict::from_groups(&only_empty).is_empty());
    }

    #[test]
    fn test_encoded_plist_layout() {
        let groups = vec![items_group()];
        let out = StringsDict::from_groups(&groups).to_string_lossy().unwrap();

        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE plist"));
        assert!(out.contains("<plist version=\"1.0\">\n<dict>\n\t<key>items</key>\n\t<dict>"));
        assert!(out.contains(
            "\t\t<key>NSStringLocalizedFormatKey</key>\n\t\t<string>%#@VARIABLE@</string>"
        ));
        assert!(out.contains("\t\t\t<key>one</key>\n\t\t\t<string>%d item</string>"));
        assert!(out.ends_with("</dict>\n</plist>\n"));

        let spec = out.find(SPEC_TYPE_KEY).unwrap();
        let value = out.find(VALUE_TYPE_KEY).unwrap();
        let one = out.find("<key>one</key>").unwrap();
        let other = out.find("<key>other</key>").unwrap();
        assert!(spec < value && value < one && one < other);
    }

    #[test]
    fn test_text_escaping() {
        let mut group = PluralGroup::new("a&b");
        group.push("other", "<%d> \"things\" & 'stuff'");
        let out = StringsDict::from_groups(&[group]).to_string_lossy().unwrap();
        assert!(out.contains("<key>a&amp;b</key>"));
        assert!(out.contains("<string>&lt;%d&gt; \"things\" &amp; 'stuff'</string>"));
    }
}
