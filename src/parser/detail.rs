//! `<detaileddescription>` → free text, `\since` and `\param` docs.

use crate::markup::text::{description_text, description_text_excluding, plain_text};
use crate::markup::Element;
use crate::model::ParamDoc;

/// Children of a paragraph that are rendered separately, not as prose.
const STRUCTURED: &[&str] = &["simplesect", "parameterlist"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DetailedDescription {
    /// Paragraph text without the structured parts, paragraphs separated by
    /// a blank line
    pub description: String,
    pub since: String,
    pub params: Vec<ParamDoc>,
}

impl DetailedDescription {
    pub fn parse(el: &Element) -> Self {
        let mut detail = Self::default();
        let mut paragraphs = Vec::new();

        for para in el.children_named("para") {
            if detail.since.is_empty() {
                if let Some(since) = para
                    .children_named("simplesect")
                    .find(|s| s.attr("kind") == Some("since"))
                {
                    detail.since = plain_text(since).trim().to_string();
                }
            }

            // kind="templateparam", "exception" and "retval" lists are not \param docs
            for list in para
                .children_named("parameterlist")
                .filter(|l| !matches!(l.attr("kind"), Some(kind) if kind != "param"))
            {
                for item in list.children_named("parameteritem") {
                    let (Some(name), Some(description)) =
                        (item.find("parametername"), item.find("parameterdescription"))
                    else {
                        continue;
                    };
                    detail.params.push(ParamDoc {
                        name: plain_text(name).trim().to_string(),
                        description: description_text(description),
                    });
                }
            }

            let text = description_text_excluding(para, STRUCTURED);
            if !text.is_empty() {
                paragraphs.push(text);
            }
        }

        detail.description = paragraphs.join("\n\n");
        detail
    }
}
