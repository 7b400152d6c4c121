//! Parser module: Doxygen XML documents into the documentation model.

pub mod detail;
pub mod doxygen;

use crate::error::ExtractError;
use crate::markup;
use crate::model::Class;

/// Parse one Doxygen class document.
pub fn parse_class(xml: &str, namespace: &str) -> Result<Class, ExtractError> {
    let root = markup::parse(xml)?;
    doxygen::extract_class(&root, namespace)
}
