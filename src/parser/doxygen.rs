//! Doxygen class XML → [`Class`].
//!
//! Reads one `<compounddef>`: name, descriptions, template parameters, the
//! `public-func` section and the `public-type` section. Structural holes are
//! errors; a class page is never built from a partial document.

use crate::error::ExtractError;
use crate::markup::text::{description_text, plain_text};
use crate::markup::Element;
use crate::model::{Class, EnumValue, MemberFunction, MemberType, MemberTypeKind};
use crate::parser::detail::DetailedDescription;
use crate::signature::{normalize_param, normalize_template};

/// Extract the class documented by a parsed Doxygen document.
///
/// `namespace` is stripped from the front of the compound name, so
/// `my::Enclosing::Nested` in namespace `my` becomes `Enclosing::Nested`.
pub fn extract_class(root: &Element, namespace: &str) -> Result<Class, ExtractError> {
    let compounddef = root
        .find("compounddef")
        .ok_or_else(|| missing("compounddef", "document"))?;
    let qualified = compounddef
        .child("compoundname")
        .map(|el| plain_text(el).trim().to_string())
        .ok_or_else(|| missing("compoundname", "compounddef"))?;
    let name = strip_namespace(&qualified, namespace).to_string();

    let brief = compounddef
        .child("briefdescription")
        .ok_or_else(|| missing("briefdescription", &qualified))?;
    let detail = compounddef
        .child("detaileddescription")
        .map(DetailedDescription::parse)
        .ok_or_else(|| missing("detaileddescription", &qualified))?;

    let member_functions = match section(compounddef, "public-func") {
        Some(section) => extract_functions(section, &name)?,
        None => Vec::new(),
    };
    let member_types = match section(compounddef, "public-type") {
        Some(section) => extract_types(section, &name)?,
        None => Vec::new(),
    };

    Ok(Class {
        brief: brief
            .child("para")
            .map(description_text)
            .unwrap_or_default(),
        detail: detail.description,
        since: detail.since,
        include: String::new(),
        template_params: template_params(compounddef),
        member_functions,
        member_types,
        name,
    })
}

fn strip_namespace<'a>(qualified: &'a str, namespace: &str) -> &'a str {
    if namespace.is_empty() {
        return qualified;
    }
    qualified
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix("::"))
        .unwrap_or(qualified)
}

fn section<'a>(compounddef: &'a Element, kind: &str) -> Option<&'a Element> {
    compounddef
        .children_named("sectiondef")
        .find(|s| s.attr("kind") == Some(kind))
}

fn missing(element: &'static str, context: impl Into<String>) -> ExtractError {
    ExtractError::MissingElement {
        element,
        context: context.into(),
    }
}

/// `<templateparamlist>` of `el` as declarations (`typename T`).
fn template_params(el: &Element) -> Vec<String> {
    let Some(list) = el.child("templateparamlist") else {
        return Vec::new();
    };
    list.children_named("param")
        .map(|param| {
            let mut decl = param
                .child("type")
                .map(|t| normalize_template(&plain_text(t)))
                .unwrap_or_default();
            if let Some(declname) = param.child("declname") {
                decl.push(' ');
                decl.push_str(plain_text(declname).trim());
            }
            if let Some(defval) = param.child("defval") {
                decl.push_str(" = ");
                decl.push_str(&normalize_template(&plain_text(defval)));
            }
            decl
        })
        .collect()
}

fn extract_functions(section: &Element, class_name: &str) -> Result<Vec<MemberFunction>, ExtractError> {
    let mut functions: Vec<MemberFunction> = Vec::new();
    for memberdef in section.children_named("memberdef") {
        let mut function = extract_function(memberdef, class_name)?;
        // Only adjacent same-named entries count as one overload run
        if let Some(prev) = functions.last() {
            if prev.name == function.name {
                function.overload_index = prev.overload_index + 1;
            }
        }
        functions.push(function);
    }
    Ok(functions)
}

fn extract_function(memberdef: &Element, class_name: &str) -> Result<MemberFunction, ExtractError> {
    let name = memberdef
        .child("name")
        .map(|el| plain_text(el).trim().to_string())
        .ok_or_else(|| missing("name", format!("public function of {class_name}")))?;
    let context = format!("{class_name}::{name}");
    let signature_error = |source| ExtractError::Signature {
        function: context.clone(),
        source,
    };

    let raw_type = memberdef
        .child("type")
        .map(plain_text)
        .ok_or_else(|| missing("type", &context))?;
    let return_type = if raw_type.trim().is_empty() {
        String::new()
    } else {
        normalize_param(&raw_type).map_err(signature_error)?
    };

    let mut params = Vec::new();
    for param in memberdef.children_named("param") {
        let mut raw = param.child("type").map(plain_text).unwrap_or_default();
        if let Some(declname) = param.child("declname") {
            raw.push(' ');
            raw.push_str(plain_text(declname).trim());
        }
        if let Some(array) = param.child("array") {
            raw.push_str(plain_text(array).trim());
        }
        let mut decl = normalize_param(&raw).map_err(signature_error)?;
        if let Some(defval) = param.child("defval") {
            decl.push_str(" = ");
            decl.push_str(&normalize_template(&plain_text(defval)));
        }
        params.push(decl);
    }

    let brief = memberdef
        .child("briefdescription")
        .map(description_text)
        .ok_or_else(|| missing("briefdescription", &context))?;
    let detail = memberdef
        .child("detaileddescription")
        .map(DetailedDescription::parse)
        .ok_or_else(|| missing("detaileddescription", &context))?;

    Ok(MemberFunction {
        class_name: class_name.to_string(),
        return_type,
        params,
        is_const: memberdef.attr("const") == Some("yes"),
        template_params: template_params(memberdef),
        overload_index: 0,
        brief,
        detail: detail.description,
        since: detail.since,
        param_docs: detail.params,
        name,
    })
}

fn extract_types(section: &Element, class_name: &str) -> Result<Vec<MemberType>, ExtractError> {
    let mut types = Vec::new();
    for memberdef in section.children_named("memberdef") {
        let kind = match memberdef.attr("kind") {
            Some("typedef") => {
                let target = memberdef
                    .child("type")
                    .map(|t| normalize_template(&plain_text(t)))
                    .ok_or_else(|| missing("type", format!("type alias of {class_name}")))?;
                MemberTypeKind::Alias { target }
            }
            Some("enum") => MemberTypeKind::Enum {
                values: memberdef
                    .children_named("enumvalue")
                    .map(extract_enum_value)
                    .collect::<Result<_, _>>()?,
            },
            other => {
                tracing::debug!(class = class_name, kind = ?other, "skipping public type member");
                continue;
            }
        };

        let name = memberdef
            .child("name")
            .map(|el| plain_text(el).trim().to_string())
            .ok_or_else(|| missing("name", format!("public type of {class_name}")))?;
        types.push(MemberType {
            class_name: class_name.to_string(),
            name,
            kind,
            brief: child_description(memberdef, "briefdescription"),
            detail: child_description(memberdef, "detaileddescription"),
        });
    }
    Ok(types)
}

fn extract_enum_value(enumvalue: &Element) -> Result<EnumValue, ExtractError> {
    let name = enumvalue
        .child("name")
        .map(|el| plain_text(el).trim().to_string())
        .ok_or_else(|| missing("name", "enumvalue"))?;
    Ok(EnumValue {
        name,
        brief: child_description(enumvalue, "briefdescription"),
        detail: child_description(enumvalue, "detaileddescription"),
    })
}

fn child_description(el: &Element, tag: &str) -> String {
    el.child(tag).map(description_text).unwrap_or_default()
}
