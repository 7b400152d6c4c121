//! Linearize markup subtrees into text.
//!
//! Two flavours: plain text (every text run in document order, untouched)
//! and description text, which renders `<computeroutput>` as inline code
//! spans and trims the result.

use super::{Element, Node};

const CODE_TAG: &str = "computeroutput";

/// All text under `el`, in document order.
pub fn plain_text(el: &Element) -> String {
    plain_text_excluding(el, &[])
}

/// Like [`plain_text`], but children whose tag is in `exclude` are skipped.
/// Text following a skipped child is kept.
pub fn plain_text_excluding(el: &Element, exclude: &[&str]) -> String {
    let mut out = String::new();
    push_plain(el, exclude, &mut out);
    out
}

fn push_plain(el: &Element, exclude: &[&str], out: &mut String) {
    for node in &el.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) if exclude.contains(&child.tag.as_str()) => {}
            Node::Element(child) => push_plain(child, exclude, out),
        }
    }
}

/// Description text with inline code spans, trimmed.
pub fn description_text(el: &Element) -> String {
    description_text_excluding(el, &[])
}

/// Like [`description_text`], skipping children whose tag is in `exclude`.
///
/// Nested elements are trimmed individually, so markup such as
/// `<ref> Foo </ref>` contributes `Foo`.
pub fn description_text_excluding(el: &Element, exclude: &[&str]) -> String {
    let mut out = String::new();
    for node in &el.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) if exclude.contains(&child.tag.as_str()) => {}
            Node::Element(child) if child.tag == CODE_TAG => {
                out.push('`');
                out.push_str(&plain_text(child));
                out.push('`');
            }
            Node::Element(child) => out.push_str(&description_text_excluding(child, exclude)),
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse;

    #[test]
    fn plain_concatenates_text_children_and_tails() {
        let el = parse("<p>a<b>b<i>c</i>d</b>e</p>").unwrap();
        assert_eq!(plain_text(&el), "abcde");
    }

    #[test]
    fn plain_keeps_whitespace() {
        let el = parse("<type>\n  const <ref>Nested</ref> &amp;\n</type>").unwrap();
        assert_eq!(plain_text(&el), "\n  const Nested &\n");
    }

    #[test]
    fn excluded_child_keeps_tail() {
        let el = parse("<para>x<simplesect>skip</simplesect> y</para>").unwrap();
        assert_eq!(plain_text_excluding(&el, &["simplesect"]), "x y");
    }

    #[test]
    fn empty_element_is_empty_string() {
        let el = parse("<briefdescription/>").unwrap();
        assert_eq!(plain_text(&el), "");
        assert_eq!(description_text(&el), "");
    }

    #[test]
    fn description_renders_code_spans_and_trims() {
        let el = parse(
            "<briefdescription>\n<para>Create a <computeroutput>Nested</computeroutput> object. </para>\n</briefdescription>",
        )
        .unwrap();
        assert_eq!(description_text(&el), "Create a `Nested` object.");
    }

    #[test]
    fn description_flattens_refs_inside_code() {
        let el = parse(
            r#"<para>A <computeroutput><ref refid="x" kindref="compound">Nested</ref></computeroutput> object.</para>"#,
        )
        .unwrap();
        assert_eq!(description_text(&el), "A `Nested` object.");
    }

    #[test]
    fn description_excludes_param_list_and_since() {
        let el = parse(concat!(
            "<para><simplesect kind=\"since\"><para>0.1 </para>\n</simplesect>\n",
            "<parameterlist kind=\"param\"><parameteritem><parametername>nested</parametername>",
            "</parameteritem></parameterlist>\n",
            "This function does something. </para>"
        ))
        .unwrap();
        assert_eq!(
            description_text_excluding(&el, &["simplesect", "parameterlist"]),
            "This function does something."
        );
    }
}
