//! Project-wide registry of documented types for cross-page links.
//!
//! Built in two phases: a [`TypeDictionaryBuilder`] collects every class and
//! enum while documents are parsed, then [`TypeDictionaryBuilder::finish`]
//! freezes it into a read-only [`TypeDictionary`] used while rendering.

use std::fmt;

use crate::link;
use crate::model::Class;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Enum,
}

/// A registered type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    /// Qualified name, namespace excluded
    pub name: String,
    pub kind: TypeKind,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn enclosing_class(&self) -> &str {
        link::enclosing_name(&self.name)
    }

    pub fn relative_name(&self) -> &str {
        link::relative_name(&self.name)
    }

    /// Site-absolute link to the type. Prepend the base path when rendering.
    ///
    /// Classes link to their page (`/ab`); enums to an anchor on the page of
    /// the enclosing class (`/ab#enum-color`).
    pub fn link(&self) -> String {
        match self.kind {
            TypeKind::Class => format!("/{}", link::page_slug(&self.name)),
            TypeKind::Enum => format!(
                "/{}#{}",
                link::page_slug(self.enclosing_class()),
                link::enum_anchor(self.relative_name())
            ),
        }
    }
}

/// Outcome of [`TypeDictionaryBuilder::register`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// The name was already registered. The new entry is still appended,
    /// but lookups keep returning the first one.
    Duplicate { name: String },
}

/// Append-only dictionary used while documents are parsed.
#[derive(Debug, Default)]
pub struct TypeDictionaryBuilder {
    entries: Vec<TypeEntry>,
}

impl TypeDictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: TypeEntry) -> Registration {
        let duplicate = self.entries.iter().any(|e| e.name == entry.name);
        let name = entry.name.clone();
        self.entries.push(entry);
        if duplicate {
            Registration::Duplicate { name }
        } else {
            Registration::Added
        }
    }

    /// Register a class and its enums. Aliases are not addressable and are
    /// skipped. Returns the names that were already registered.
    pub fn register_class(&mut self, class: &Class) -> Vec<String> {
        let mut duplicates = Vec::new();
        let entries = std::iter::once(TypeEntry::new(&class.name, TypeKind::Class))
            .chain(class.enums().map(|e| TypeEntry::new(e.full_name(), TypeKind::Enum)));
        for entry in entries {
            if let Registration::Duplicate { name } = self.register(entry) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    pub fn finish(self) -> TypeDictionary {
        TypeDictionary {
            entries: self.entries,
        }
    }
}

/// Read-only dictionary used while rendering.
#[derive(Debug, Default)]
pub struct TypeDictionary {
    entries: Vec<TypeEntry>,
}

impl TypeDictionary {
    /// Exact match on the qualified name; the first registration wins.
    pub fn lookup(&self, name: &str) -> Option<&TypeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Every entry whose last name segment is `name`.
    pub fn find_by_relative_name(&self, name: &str) -> Vec<&TypeEntry> {
        self.entries
            .iter()
            .filter(|e| e.relative_name() == name)
            .collect()
    }

    /// Registered enclosing classes of `name`, outermost first.
    ///
    /// Walks up the enclosing-name chain until a name is not registered;
    /// enclosing types outside the documented set simply end the chain.
    pub fn enclosing_chain(&self, name: &str) -> Vec<&TypeEntry> {
        let mut chain = Vec::new();
        let mut enclosing = link::enclosing_name(name);
        while !enclosing.is_empty() {
            let Some(entry) = self.lookup(enclosing) else {
                break;
            };
            chain.push(entry);
            enclosing = entry.enclosing_class();
        }
        chain.reverse();
        chain
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }
}

impl fmt::Display for TypeDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for entry in &self.entries {
            let kind = match entry.kind {
                TypeKind::Class => "Class",
                TypeKind::Enum => "Enum",
            };
            writeln!(f, "  {} -> {}", entry.name, kind)?;
        }
        write!(f, "}}")
    }
}
