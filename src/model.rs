//! Render-ready documentation model for parsed Doxygen classes.

use crate::link;

/// A named group of classes on the index page, in project-file order.
#[derive(Debug, Default, Clone)]
pub struct Category {
    pub name: String,
    pub classes: Vec<Class>,
}

/// A documented class, struct or class template.
#[derive(Debug, Default, Clone)]
pub struct Class {
    /// Qualified name without the project namespace, e.g. `Enclosing::Nested`
    pub name: String,
    pub brief: String,
    pub detail: String,
    /// `\since` annotation of the class, empty if absent
    pub since: String,
    /// Include directive text, e.g. `<mylib/nested-test.h>`
    pub include: String,
    /// e.g. `["typename T", "int32_t num"]`; empty if not a template
    pub template_params: Vec<String>,
    pub member_functions: Vec<MemberFunction>,
    pub member_types: Vec<MemberType>,
}

impl Class {
    pub fn relative_name(&self) -> &str {
        link::relative_name(&self.name)
    }

    /// Enclosing class name if this is a nested class, otherwise empty.
    pub fn enclosing_class(&self) -> &str {
        link::enclosing_name(&self.name)
    }

    /// Link slug of this class page.
    pub fn link(&self) -> String {
        link::page_slug(&self.name)
    }

    /// Output file name.
    pub fn filename(&self) -> String {
        format!("{}.md", self.link())
    }

    pub fn is_template(&self) -> bool {
        !self.template_params.is_empty()
    }

    /// Enum-kind member types in declaration order.
    pub fn enums(&self) -> impl Iterator<Item = &MemberType> {
        self.member_types.iter().filter(|t| t.is_enum())
    }
}

/// A public member function.
#[derive(Debug, Default, Clone)]
pub struct MemberFunction {
    pub class_name: String,
    pub name: String,
    /// Empty for constructors
    pub return_type: String,
    /// Normalized parameter declarations
    pub params: Vec<String>,
    pub is_const: bool,
    pub template_params: Vec<String>,
    /// 0 for the first of a run of same-named functions, then 1, 2, …
    pub overload_index: usize,
    pub brief: String,
    pub detail: String,
    pub since: String,
    /// `\param` documentation
    pub param_docs: Vec<ParamDoc>,
}

impl MemberFunction {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_empty()
    }

    pub fn is_template(&self) -> bool {
        !self.template_params.is_empty()
    }

    pub fn anchor_id(&self) -> String {
        link::function_anchor(&self.name, self.overload_index)
    }
}

/// A documented `\param`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDoc {
    pub name: String,
    pub description: String,
}

/// A public member type: type alias or enumeration.
#[derive(Debug, Clone)]
pub struct MemberType {
    pub class_name: String,
    pub name: String,
    pub kind: MemberTypeKind,
    pub brief: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberTypeKind {
    /// `using Name = target`
    Alias { target: String },
    Enum { values: Vec<EnumValue> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub brief: String,
    pub detail: String,
}

impl MemberType {
    /// Qualified name, namespace excluded.
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.class_name, self.name)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, MemberTypeKind::Enum { .. })
    }

    /// Heading anchor; aliases are not individually linkable.
    pub fn anchor_id(&self) -> Option<String> {
        self.is_enum().then(|| link::enum_anchor(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_has_empty_return_type() {
        let ctor = MemberFunction {
            name: "Enclosing".to_string(),
            ..Default::default()
        };
        assert!(ctor.is_constructor());

        let method = MemberFunction {
            name: "do_something".to_string(),
            return_type: "void".to_string(),
            ..Default::default()
        };
        assert!(!method.is_constructor());
    }

    #[test]
    fn overloads_get_suffixed_anchors() {
        let f = |index| MemberFunction {
            name: "Get".to_string(),
            overload_index: index,
            ..Default::default()
        };
        assert_eq!(f(0).anchor_id(), "get");
        assert_eq!(f(1).anchor_id(), "get1");
    }

    #[test]
    fn class_derived_names() {
        let class = Class {
            name: "Enclosing::Nested".to_string(),
            ..Default::default()
        };
        assert_eq!(class.relative_name(), "Nested");
        assert_eq!(class.enclosing_class(), "Enclosing");
        assert_eq!(class.link(), "enclosingnested");
        assert_eq!(class.filename(), "enclosingnested.md");
    }

    #[test]
    fn only_enums_have_anchors() {
        let alias = MemberType {
            class_name: "EnumTest".to_string(),
            name: "CType".to_string(),
            kind: MemberTypeKind::Alias {
                target: "int32_t".to_string(),
            },
            brief: String::new(),
            detail: String::new(),
        };
        assert_eq!(alias.anchor_id(), None);
        assert_eq!(alias.full_name(), "EnumTest::CType");

        let enumeration = MemberType {
            name: "Type".to_string(),
            kind: MemberTypeKind::Enum { values: Vec::new() },
            ..alias
        };
        assert_eq!(enumeration.anchor_id().as_deref(), Some("enum-type"));
    }
}
