//! Support for reading Android `strings.xml` resources.
//!
//! Only direct children of the root element are considered: `<string>`
//! elements become [`StringEntry`] values and `<plurals>` elements become
//! [`PluralGroup`] values. Anything else (`<string-array>`, `<integer>`, …) is
//! skipped and counted.
//!
//! Values keep their inner markup: `<string name="k">a <b>b</b></string>`
//! yields `a <b>b</b>`. Character data is unescaped and then re-escaped for
//! `&`, `<` and `>`, so `&quot;` becomes a bare quote while `&amp;` stays an
//! entity until [`crate::normalize::normalize_value`] decodes it.

use quick_xml::{
    Reader,
    escape::partial_escape,
    events::{BytesStart, Event},
};
use std::io::BufRead;

use crate::{
    error::Error,
    traits::Parser,
    types::{PluralGroup, StringEntry},
};

#[derive(Debug, Default)]
pub struct Format {
    pub strings: Vec<StringEntry>,
    pub plurals: Vec<PluralGroup>,
    /// Top-level elements that are neither `<string>` nor `<plurals>`.
    pub skipped: usize,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        // Whitespace inside values is significant, so text is not trimmed.
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut skip_buf = Vec::new();
        let mut format = Format::default();
        let mut depth = 0usize;
        let mut seen_root = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(_) if depth == 0 => {
                    if seen_root {
                        return Err(Error::invalid_resource("multiple root elements"));
                    }
                    seen_root = true;
                    depth = 1;
                }
                Event::Start(ref e) => match e.name().as_ref() {
                    b"string" => {
                        let key = required_attribute(e, b"name", "string")?;
                        let value = read_inner_markup(&mut xml_reader, "string")?;
                        format.strings.push(StringEntry::new(key, value));
                    }
                    b"plurals" => {
                        let group = parse_plurals(e, &mut xml_reader)?;
                        format.plurals.push(group);
                    }
                    _ => {
                        format.skipped += 1;
                        xml_reader.read_to_end_into(e.name(), &mut skip_buf)?;
                        skip_buf.clear();
                    }
                },
                Event::Empty(_) if depth == 0 => {
                    if seen_root {
                        return Err(Error::invalid_resource("multiple root elements"));
                    }
                    seen_root = true;
                }
                Event::Empty(ref e) => match e.name().as_ref() {
                    b"string" => {
                        let key = required_attribute(e, b"name", "string")?;
                        format.strings.push(StringEntry::new(key, String::new()));
                    }
                    b"plurals" => {
                        let name = required_attribute(e, b"name", "plurals")?;
                        format.plurals.push(PluralGroup::new(name));
                    }
                    _ => format.skipped += 1,
                },
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| Error::invalid_resource("unmatched end tag"))?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(Error::invalid_resource("document has no root element"));
        }
        if depth != 0 {
            return Err(Error::invalid_resource(
                "unexpected end of document: root element is not closed",
            ));
        }
        Ok(format)
    }
}

fn parse_plurals<R: BufRead>(
    e: &BytesStart,
    xml_reader: &mut Reader<R>,
) -> Result<PluralGroup, Error> {
    let name = required_attribute(e, b"name", "plurals")?;
    let mut group = PluralGroup::new(name);

    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref item) if item.name().as_ref() == b"item" => {
                let quantity = attribute(item, b"quantity")?;
                let text = read_inner_markup(xml_reader, "item")?;
                if text.is_empty() {
                    continue;
                }
                let quantity = quantity.ok_or_else(|| {
                    Error::invalid_resource(format!(
                        "item in plurals '{}' missing 'quantity'",
                        group.name
                    ))
                })?;
                group.push(quantity, text);
            }
            Event::Start(ref other) => {
                xml_reader.read_to_end_into(other.name(), &mut skip_buf)?;
                skip_buf.clear();
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::invalid_resource(format!(
                    "unexpected end of document inside plurals '{}'",
                    group.name
                )));
            }
            // Self-closing items carry no text.
            _ => {}
        }
        buf.clear();
    }
    Ok(group)
}

/// Read everything up to the end tag of the element just opened and return
/// it as markup text.
fn read_inner_markup<R: BufRead>(
    xml_reader: &mut Reader<R>,
    element: &str,
) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut depth = 0usize;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                out.push('<');
                out.push_str(utf8(&e)?);
                out.push('>');
            }
            Event::Empty(e) => {
                out.push('<');
                out.push_str(utf8(&e)?);
                out.push_str("/>");
            }
            Event::End(e) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                out.push_str("</");
                out.push_str(utf8(e.name().as_ref())?);
                out.push('>');
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                let text: &str = &text;
                out.push_str(&partial_escape(text));
            }
            Event::CData(e) => {
                out.push_str(&partial_escape(utf8(&e)?));
            }
            Event::Eof => {
                return Err(Error::invalid_resource(format!(
                    "unexpected end of document inside <{}>",
                    element
                )));
            }
            // Comments and processing instructions are not part of the value.
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<String>, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn required_attribute(e: &BytesStart, key: &[u8], element: &str) -> Result<String, Error> {
    attribute(e, key)?.ok_or_else(|| {
        Error::invalid_resource(format!(
            "{} tag missing '{}'",
            element,
            String::from_utf8_lossy(key)
        ))
    })
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(|e| Error::DataMismatch(e.to_string()))
}
