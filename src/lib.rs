//! paradocs: cross-linked Markdown API reference pages from Doxygen XML.
//!
//! Pipeline: [`config::Project`] names the class documents, [`site::Site`]
//! extracts each one into the [`model`] and registers it in the
//! [`dictionary`], then [`render`] turns the model into Markdown pages.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod link;
pub mod markup;
pub mod model;
pub mod parser;
pub mod render;
pub mod signature;
pub mod site;

pub use config::Project;
pub use site::{OnError, Page, Site};
