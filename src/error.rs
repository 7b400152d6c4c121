//! Error types for the documentation pipeline.

use std::path::PathBuf;

/// Error while building a markup tree from XML text.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MarkupError {
    /// XML parsing error.
    #[error("XML parse error")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// The input contained no root element.
    #[error("document has no root element")]
    NoRoot,
}

/// A parameter declaration that does not have the shape `[const] type [&] [*] [name]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("no base type in parameter declaration `{raw}`")]
    MissingType { raw: String },

    #[error("unexpected `{token}` in parameter declaration `{raw}`")]
    UnexpectedToken { raw: String, token: String },

    #[error("unbalanced `{open}` in parameter declaration `{raw}`")]
    Unbalanced { raw: String, open: char },
}

/// A symbol document that is missing required structure.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("missing <{element}> in {context}")]
    MissingElement {
        element: &'static str,
        context: String,
    },

    #[error("bad parameter in {function}")]
    Signature {
        function: String,
        #[source]
        source: SignatureError,
    },

    #[error(transparent)]
    Markup(#[from] MarkupError),
}

/// Error in the project file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read project file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse project file {}", path.display())]
    Markup {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },

    #[error("project file is missing <{0}>")]
    MissingElement(&'static str),

    #[error("class entry in category `{category}` has no <name>")]
    UnnamedClass { category: String },

    #[error("no Doxygen XML file found for class `{class}` in {}", docdir.display())]
    ClassFileNotFound { class: String, docdir: PathBuf },

    #[error("invalid file search pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Error while loading or writing a site.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed symbol document {}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
