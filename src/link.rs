//! Qualified-name surgery and link/anchor generation.
//!
//! Names are `::`-separated and never contain `::` inside a single segment,
//! so splitting on the last separator is enough to find enclosing types.

const SEPARATOR: &str = "::";

/// `A::B::C` → `A::B`; empty for a top-level name.
pub fn enclosing_name(name: &str) -> &str {
    name.rsplit_once(SEPARATOR).map_or("", |(enclosing, _)| enclosing)
}

/// `A::B::C` → `C`.
pub fn relative_name(name: &str) -> &str {
    name.rsplit_once(SEPARATOR).map_or(name, |(_, relative)| relative)
}

/// Page slug for a class: lowercased with the separators removed.
///
/// `Enclosing::Nested` → `enclosingnested`. Also the output file stem.
pub fn page_slug(name: &str) -> String {
    name.to_lowercase().replace(SEPARATOR, "")
}

/// In-page anchor of an enum heading.
pub fn enum_anchor(name: &str) -> String {
    format!("enum-{}", name.to_lowercase())
}

/// In-page anchor of a member function heading; overloads get a numeric suffix.
pub fn function_anchor(name: &str, overload_index: usize) -> String {
    let anchor = name.to_lowercase();
    if overload_index > 0 {
        format!("{anchor}{overload_index}")
    } else {
        anchor
    }
}

/// `[text](url)`.
pub fn markdown_link(text: &str, url: &str) -> String {
    format!("[{}]({})", text, url)
}

/// Prefix a site-absolute link (`/foo`) with the configured base path.
pub fn with_basepath(basepath: &str, link: &str) -> String {
    format!("{}{}", basepath.trim_end_matches('/'), link)
}
