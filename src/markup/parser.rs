//! quick-xml event stream → markup tree.

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::reader::Reader;

use super::{Element, Node};
use crate::error::MarkupError;

/// Parse an XML document and return its root element.
///
/// Comments, declarations, processing instructions and doctypes are dropped.
/// Whitespace is preserved so that text extraction sees the source layout.
pub fn parse(xml: &str) -> Result<Element, MarkupError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut root = start_element(&reader, &e);
                parse_children(&mut reader, &mut root)?;
                return Ok(root);
            }
            Event::Empty(e) => return Ok(start_element(&reader, &e)),
            Event::Eof => return Err(MarkupError::NoRoot),
            _ => {}
        }
        buf.clear();
    }
}

fn parse_children<R: BufRead>(
    reader: &mut Reader<R>,
    parent: &mut Element,
) -> Result<(), MarkupError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut child = start_element(reader, &e);
                parse_children(reader, &mut child)?;
                parent.children.push(Node::Element(child));
            }
            Event::Empty(e) => {
                parent.children.push(Node::Element(start_element(reader, &e)));
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                parent.push_text(&text);
            }
            Event::GeneralRef(e) => {
                parent.push_text(&resolve_reference(reader, &e)?);
            }
            Event::CData(e) => {
                parent.push_text(&String::from_utf8_lossy(&e));
            }
            Event::End(_) | Event::Eof => return Ok(()),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

fn start_element<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> Element {
    let mut element = Element::new(decode_lossy(reader, e.name().as_ref()));
    for attr in e.attributes().flatten() {
        let key = decode_lossy(reader, attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );
        element.attrs.insert(key, value);
    }
    element
}

fn decode_lossy<R: BufRead>(reader: &Reader<R>, bytes: &[u8]) -> String {
    reader.decoder().decode(bytes).map_or_else(
        |_| String::from_utf8_lossy(bytes).into_owned(),
        Cow::into_owned,
    )
}

/// Text of `&name;`. Character references and the five XML entities are
/// resolved; anything else stays verbatim.
fn resolve_reference<R: BufRead>(
    reader: &Reader<R>,
    reference: &BytesRef,
) -> Result<String, MarkupError> {
    if let Ok(Some(ch)) = reference.resolve_char_ref() {
        return Ok(ch.to_string());
    }
    let name = reader.decoder().decode(reference)?;
    Ok(resolve_predefined_entity(&name).map_or_else(|| format!("&{name};"), str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_and_tail() {
        let root = parse("<para>A <computeroutput>x</computeroutput> b</para>").unwrap();
        assert_eq!(root.tag, "para");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[0], Node::Text("A ".to_string()));
        assert_eq!(root.children[2], Node::Text(" b".to_string()));
    }

    #[test]
    fn decodes_entities_into_one_text_run() {
        let root = parse("<include>&lt;mylib/a.h&gt;</include>").unwrap();
        assert_eq!(root.children, vec![Node::Text("<mylib/a.h>".to_string())]);
    }

    #[test]
    fn character_references_and_unknown_entities() {
        let root = parse("<p>&#x41;&#66;&quot;&nbsp;&#xZZ;</p>").unwrap();
        assert_eq!(root.children, vec![Node::Text("AB\"&nbsp;&#xZZ;".to_string())]);
    }

    #[test]
    fn skips_declaration_and_reads_attributes() {
        let xml = "<?xml version='1.0' encoding='UTF-8' standalone='no'?>\n\
                   <doxygen version=\"1.9.1\"><compounddef kind=\"class\"/></doxygen>";
        let root = parse(xml).unwrap();
        assert_eq!(root.tag, "doxygen");
        assert_eq!(root.attr("version"), Some("1.9.1"));
        assert_eq!(root.child("compounddef").and_then(|c| c.attr("kind")), Some("class"));
    }

    #[test]
    fn empty_input_has_no_root() {
        assert!(matches!(parse(""), Err(MarkupError::NoRoot)));
    }
}
