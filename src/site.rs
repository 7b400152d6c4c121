//! Project-level orchestration: parse every class document, build the type
//! dictionary, then render and write the pages.
//!
//! Loading and rendering are strictly separated. [`Site::load`] finishes
//! the dictionary before any page is rendered, so pages can link to any
//! class of the project regardless of category order.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::config::{ClassConfig, Project};
use crate::dictionary::{TypeDictionary, TypeDictionaryBuilder};
use crate::error::BuildError;
use crate::model::{Category, Class};
use crate::parser;
use crate::render;

/// What to do with a class document that cannot be extracted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Stop the build with the first malformed document.
    #[default]
    Abort,
    /// Log the document at `warn` and leave the class out of the site.
    Skip,
}

/// A rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// File name relative to the output directory
    pub filename: String,
    pub content: String,
}

pub const INDEX_FILENAME: &str = "index.md";

#[derive(Debug)]
pub struct Site {
    project: Project,
    categories: Vec<Category>,
    types: TypeDictionary,
}

impl Site {
    pub fn load(project: &Project, on_error: OnError) -> Result<Self, BuildError> {
        let mut builder = TypeDictionaryBuilder::new();
        let mut filenames = HashSet::new();
        let mut categories = Vec::with_capacity(project.categories.len());

        for category in &project.categories {
            let mut classes = Vec::with_capacity(category.classes.len());
            for entry in &category.classes {
                let class = match load_class(entry) {
                    Ok(class) => class,
                    Err(err @ BuildError::Document { .. }) if on_error == OnError::Skip => {
                        tracing::warn!(
                            class = %entry.name,
                            "skipping: {}",
                            error_chain(&err)
                        );
                        continue;
                    }
                    Err(err) => return Err(err),
                };

                for name in builder.register_class(&class) {
                    tracing::warn!(name = %name, "duplicate type name, keeping the first definition");
                }
                if !filenames.insert(class.filename()) {
                    tracing::warn!(
                        class = %class.name,
                        file = %class.filename(),
                        "page file name collides with another class"
                    );
                }
                classes.push(class);
            }
            categories.push(Category {
                name: category.name.clone(),
                classes,
            });
        }

        let types = builder.finish();
        tracing::debug!(types = types.len(), "type dictionary complete");

        Ok(Self {
            project: project.clone(),
            categories,
            types,
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn types(&self) -> &TypeDictionary {
        &self.types
    }

    /// All loaded classes, category order first.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.categories.iter().flat_map(|c| c.classes.iter())
    }

    /// The index page followed by one page per class.
    pub fn pages(&self) -> Vec<Page> {
        let mut pages = vec![Page {
            filename: INDEX_FILENAME.to_string(),
            content: render::index_page(&self.project, &self.categories),
        }];
        pages.extend(self.classes().map(|class| Page {
            filename: class.filename(),
            content: render::class_page(class, &self.types, &self.project.basepath),
        }));
        pages
    }

    /// Render every page into `outdir`, creating it if needed.
    pub fn write(&self, outdir: &Path) -> Result<Vec<Page>, BuildError> {
        fs::create_dir_all(outdir).map_err(|source| BuildError::Write {
            path: outdir.to_path_buf(),
            source,
        })?;

        let pages = self.pages();
        for page in &pages {
            let path = outdir.join(&page.filename);
            fs::write(&path, &page.content).map_err(|source| BuildError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote page");
        }
        Ok(pages)
    }
}

fn load_class(entry: &ClassConfig) -> Result<Class, BuildError> {
    let xml = fs::read_to_string(&entry.file).map_err(|source| BuildError::Read {
        path: entry.file.clone(),
        source,
    })?;
    let mut class =
        parser::parse_class(&xml, &entry.namespace).map_err(|source| BuildError::Document {
            path: entry.file.clone(),
            source,
        })?;
    tracing::debug!(
        path = %entry.file.display(),
        class = %class.name,
        functions = class.member_functions.len(),
        types = class.member_types.len(),
        "parsed class document"
    );
    class.include = entry.include.clone();
    Ok(class)
}

/// `outer: inner: innermost`
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryConfig;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn class_xml(name: &str, functions: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<doxygen>
  <compounddef kind="class">
    <compoundname>my::{name}</compoundname>
    <sectiondef kind="public-func">{functions}</sectiondef>
    <briefdescription><para>The {name} class.</para></briefdescription>
    <detaileddescription></detaileddescription>
  </compounddef>
</doxygen>"#
        )
    }

    const GET: &str = r#"<memberdef kind="function" const="no">
        <type>int</type><name>Get</name>
        <briefdescription></briefdescription><detaileddescription></detaileddescription>
      </memberdef>"#;

    fn project(dir: &Path, classes: &[(&str, &str)]) -> Project {
        let classes = classes
            .iter()
            .map(|(name, file)| ClassConfig {
                name: name.to_string(),
                namespace: "my".to_string(),
                file: dir.join(file),
                include: format!("<mylib/{}.h>", name.to_lowercase()),
            })
            .collect();
        Project {
            name: "My Library".to_string(),
            description: String::new(),
            version: "0.1".to_string(),
            namespace: "my".to_string(),
            docdir: dir.to_path_buf(),
            outdir: dir.join("out"),
            basepath: "/".to_string(),
            categories: vec![CategoryConfig {
                name: "Core".to_string(),
                classes,
            }],
        }
    }

    #[test]
    fn loads_and_renders_pages() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.xml"), class_xml("Outer", GET)).unwrap();
        fs::write(dir.path().join("b.xml"), class_xml("Outer::Inner", "")).unwrap();

        let site = Site::load(
            &project(dir.path(), &[("Outer", "a.xml"), ("Outer::Inner", "b.xml")]),
            OnError::Abort,
        )
        .unwrap();
        assert_eq!(site.types().len(), 2);

        let pages = site.pages();
        let names: Vec<_> = pages.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, vec!["index.md", "outer.md", "outerinner.md"]);
        assert!(pages[0].content.contains("| [Outer::Inner](/outerinner) | The Outer::Inner class. |"));
        assert!(pages[1].content.contains("| Include | \\<mylib/outer.h\\> |"));
        assert!(pages[2].content.contains("| Hierarchy | [Outer](/outer)::Inner |"));
    }

    #[test]
    fn malformed_document_aborts_by_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.xml"), "<doxygen><compounddef/></doxygen>").unwrap();

        let err = Site::load(&project(dir.path(), &[("Bad", "bad.xml")]), OnError::Abort)
            .unwrap_err();
        assert!(matches!(err, BuildError::Document { path, .. } if path.ends_with("bad.xml")));
    }

    #[test]
    fn malformed_document_skipped_on_request() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.xml"), "<doxygen><compounddef/></doxygen>").unwrap();
        fs::write(dir.path().join("good.xml"), class_xml("Good", GET)).unwrap();

        let site = Site::load(
            &project(dir.path(), &[("Bad", "bad.xml"), ("Good", "good.xml")]),
            OnError::Skip,
        )
        .unwrap();
        let names: Vec<_> = site.classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Good"]);
    }

    #[test]
    fn missing_file_is_fatal_even_when_skipping() {
        let dir = TempDir::new().unwrap();
        let err = Site::load(&project(dir.path(), &[("Gone", "gone.xml")]), OnError::Skip)
            .unwrap_err();
        assert!(matches!(err, BuildError::Read { .. }));
    }

    #[test]
    fn writes_pages_to_outdir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.xml"), class_xml("Outer", GET)).unwrap();
        let site = Site::load(&project(dir.path(), &[("Outer", "a.xml")]), OnError::Abort).unwrap();

        let outdir: PathBuf = dir.path().join("out/nested");
        let pages = site.write(&outdir).unwrap();
        assert_eq!(pages.len(), 2);
        let index = fs::read_to_string(outdir.join("index.md")).unwrap();
        assert!(index.starts_with("# My Library\n"));
        assert!(outdir.join("outer.md").is_file());
    }

    #[test]
    fn error_chain_is_flattened() {
        let err = BuildError::Document {
            path: PathBuf::from("x.xml"),
            source: crate::error::ExtractError::MissingElement {
                element: "compoundname",
                context: "compounddef".to_string(),
            },
        };
        assert_eq!(
            error_chain(&err),
            "malformed symbol document x.xml: missing <compoundname> in compounddef"
        );
    }
}
