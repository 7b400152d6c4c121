//! Project file (`paradocs.xml`) loading.
//!
//! ```xml
//! <paradocs>
//!   <project>
//!     <name>My Library</name>
//!     <description>Free text for the index page.</description>
//!     <version>0.1</version>
//!     <namespace>my</namespace>
//!     <docdir>doxygen/xml</docdir>
//!     <outdir>docs</outdir>
//!     <basepath>/api</basepath>
//!     <category>
//!       <name>Core</name>
//!       <class namespace="my" file="classmy_1_1Enclosing.xml">
//!         <name>Enclosing</name>
//!         <include>&lt;mylib/nested-test.h&gt;</include>
//!       </class>
//!     </category>
//!   </project>
//! </paradocs>
//! ```
//!
//! Relative `docdir` and `outdir` are resolved against the project file's
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::markup::text::plain_text;
use crate::markup::{self, Element};

const DEFAULT_OUTDIR: &str = "paradocs";
const DEFAULT_BASEPATH: &str = "/";
const DEFAULT_VERSION: &str = "x.y";

/// Doxygen compound kinds that produce class pages.
const COMPOUND_KINDS: &[&str] = &["class", "struct", "union"];

#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub version: String,
    pub namespace: String,
    pub docdir: PathBuf,
    pub outdir: PathBuf,
    pub basepath: String,
    pub categories: Vec<CategoryConfig>,
}

#[derive(Debug, Clone)]
pub struct CategoryConfig {
    pub name: String,
    pub classes: Vec<ClassConfig>,
}

#[derive(Debug, Clone)]
pub struct ClassConfig {
    pub name: String,
    pub namespace: String,
    /// Doxygen XML document, resolved against `docdir`
    pub file: PathBuf,
    pub include: String,
}

impl Project {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let xml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root = markup::parse(&xml).map_err(|source| ConfigError::Markup {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_element(&root, base_dir)
    }

    pub fn from_element(root: &Element, base_dir: &Path) -> Result<Self, ConfigError> {
        let project = root
            .find("project")
            .ok_or(ConfigError::MissingElement("project"))?;

        let name = child_text(project, "name").ok_or(ConfigError::MissingElement("name"))?;
        let docdir = child_text(project, "docdir")
            .map(|dir| base_dir.join(dir))
            .ok_or(ConfigError::MissingElement("docdir"))?;
        let outdir = base_dir.join(
            child_text(project, "outdir").unwrap_or_else(|| DEFAULT_OUTDIR.to_string()),
        );
        let namespace = child_text(project, "namespace").unwrap_or_default();

        let mut categories = Vec::new();
        for category in project.children_named("category") {
            let category_name = child_text(category, "name")
                .ok_or(ConfigError::MissingElement("category/name"))?;
            let mut classes = Vec::new();
            for class in category.children_named("class") {
                let class_name =
                    child_text(class, "name").ok_or_else(|| ConfigError::UnnamedClass {
                        category: category_name.clone(),
                    })?;
                let class_namespace = class
                    .attr("namespace")
                    .map_or_else(|| namespace.clone(), str::to_string);
                let file = match class.attr("file") {
                    Some(file) => docdir.join(file),
                    None => find_compound_file(&docdir, &class_namespace, &class_name)?,
                };
                classes.push(ClassConfig {
                    include: child_text(class, "include").unwrap_or_default(),
                    name: class_name,
                    namespace: class_namespace,
                    file,
                });
            }
            categories.push(CategoryConfig {
                name: category_name,
                classes,
            });
        }

        Ok(Self {
            name,
            description: child_text(project, "description").unwrap_or_default(),
            version: child_text(project, "version").unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            namespace,
            docdir,
            outdir,
            basepath: child_text(project, "basepath")
                .unwrap_or_else(|| DEFAULT_BASEPATH.to_string()),
            categories,
        })
    }

    /// All class entries, category order first.
    pub fn classes(&self) -> impl Iterator<Item = &ClassConfig> {
        self.categories.iter().flat_map(|c| c.classes.iter())
    }
}

fn child_text(el: &Element, tag: &str) -> Option<String> {
    el.child(tag).map(|c| plain_text(c).trim().to_string())
}

/// Doxygen's file-name mangling of a qualified name:
/// `my::Enclosing_Type` → `my_1_1Enclosing__Type`.
fn mangle(qualified: &str) -> String {
    qualified.replace('_', "__").replace("::", "_1_1")
}

/// Locate `class…`/`struct…`/`union…` XML for a class when the project file
/// names no file.
fn find_compound_file(docdir: &Path, namespace: &str, name: &str) -> Result<PathBuf, ConfigError> {
    let qualified = if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}::{name}")
    };
    let mangled = mangle(&qualified);
    let pattern = format!(
        "{}/*{}.xml",
        glob::Pattern::escape(&docdir.to_string_lossy()),
        mangled
    );

    let candidates = glob::glob(&pattern).map_err(|source| ConfigError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;
    candidates
        .filter_map(Result::ok)
        .find(|path| {
            path.file_name()
                .and_then(|f| f.to_str())
                .and_then(|f| f.strip_suffix(&format!("{mangled}.xml")))
                .is_some_and(|kind| COMPOUND_KINDS.contains(&kind))
        })
        .ok_or_else(|| ConfigError::ClassFileNotFound {
            class: qualified,
            docdir: docdir.to_path_buf(),
        })
}
