//! Markdown page renderer.
//!
//! Pages are plain GitHub-flavored Markdown with `<h3 id="…">` headings where
//! a stable anchor is needed (enums and member functions). Every list is
//! emitted in the order it was extracted.

use crate::config::Project;
use crate::dictionary::TypeDictionary;
use crate::link;
use crate::model::*;
use crate::render::{escape_angle_brackets, escape_html, table};

/// Render the project index page.
pub fn index_page(project: &Project, categories: &[Category]) -> String {
    let mut output = format!("# {}\n\n", project.name);
    output.push_str(&table(
        ["-", "-"],
        &[
            ["Version".to_string(), project.version.clone()],
            ["Namespace".to_string(), project.namespace.clone()],
        ],
    ));
    output.push('\n');

    if !project.description.is_empty() {
        output.push_str(&project.description);
        output.push_str("\n\n");
    }

    for category in categories {
        output.push_str(&format!("## {}\n\n", category.name));
        let rows: Vec<[String; 2]> = category
            .classes
            .iter()
            .map(|class| {
                let url = link::with_basepath(&project.basepath, &format!("/{}", class.link()));
                [link::markdown_link(&class.name, &url), class.brief.clone()]
            })
            .collect();
        output.push_str(&table(["Name", "Brief"], &rows));
        output.push('\n');
    }

    output
}

/// Render one class page. `types` resolves the breadcrumb of nested classes.
pub fn class_page(class: &Class, types: &TypeDictionary, basepath: &str) -> String {
    let mut output = format!("# {}\n\n", class.name);

    if class.is_template() {
        output.push_str(&template_line(&class.template_params));
        output.push_str("\n\n");
    }
    push_paragraph(&mut output, &class.brief);

    output.push_str(&metadata_table(class, types, basepath));
    output.push('\n');
    push_paragraph(&mut output, &class.detail);

    if !class.member_types.is_empty() {
        output.push_str("## Member Types\n\n");
        output.push_str(&member_types_table(&class.member_types));
        output.push('\n');
    }

    output.push_str("## Member Functions\n\n");
    output.push_str(&member_functions_table(&class.member_functions));
    output.push('\n');

    let mut enums = class.enums().peekable();
    if enums.peek().is_some() {
        output.push_str("## Member Type Details\n\n");
        for member_type in enums {
            output.push_str(&render_enum(member_type));
        }
    }

    output.push_str("## Member Function Details\n\n");
    for func in &class.member_functions {
        output.push_str(&render_function(func));
    }

    output
}

/// `**template \<typename T, int N\>**`
fn template_line(params: &[String]) -> String {
    format!("**template \\<{}\\>**", escape_angle_brackets(&params.join(", ")))
}

/// Append `text` as its own paragraph; nothing for empty text.
fn push_paragraph(output: &mut String, text: &str) {
    if !text.is_empty() {
        output.push_str(text);
        output.push_str("\n\n");
    }
}

fn metadata_table(class: &Class, types: &TypeDictionary, basepath: &str) -> String {
    let mut rows = vec![["Include".to_string(), escape_angle_brackets(&class.include)]];
    if let Some(crumbs) = breadcrumb(class, types, basepath) {
        rows.push(["Hierarchy".to_string(), crumbs]);
    }
    if !class.since.is_empty() {
        rows.push(["Since".to_string(), class.since.clone()]);
    }
    table(["-", "-"], &rows)
}

/// `[Outer](/outer)::[Middle](/outermiddle)::Inner`
///
/// The outermost registered class keeps its qualified name as link text so
/// a chain cut short by a missing enclosing class still reads correctly.
/// `None` for top-level classes and when the immediate enclosing class is
/// not registered.
fn breadcrumb(class: &Class, types: &TypeDictionary, basepath: &str) -> Option<String> {
    let chain = types.enclosing_chain(&class.name);
    if chain.is_empty() {
        return None;
    }

    let mut crumbs: Vec<String> = chain
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let text = if i == 0 { entry.name.as_str() } else { entry.relative_name() };
            link::markdown_link(text, &link::with_basepath(basepath, &entry.link()))
        })
        .collect();
    crumbs.push(class.relative_name().to_string());
    Some(crumbs.join("::"))
}

fn member_types_table(member_types: &[MemberType]) -> String {
    let rows: Vec<[String; 2]> = member_types
        .iter()
        .map(|member_type| {
            let declaration = match &member_type.kind {
                MemberTypeKind::Alias { target } => {
                    format!("using {} = {}", member_type.name, escape_angle_brackets(target))
                }
                MemberTypeKind::Enum { .. } => {
                    let anchor = link::enum_anchor(&member_type.name);
                    format!("enum {}", link::markdown_link(&member_type.name, &format!("#{anchor}")))
                }
            };
            [declaration, member_type.brief.clone()]
        })
        .collect();
    table(["Type", "Description"], &rows)
}

fn member_functions_table(functions: &[MemberFunction]) -> String {
    let rows: Vec<[String; 2]> = functions
        .iter()
        .map(|func| {
            let mut declaration = format!(
                "{}({})",
                link::markdown_link(&func.name, &format!("#{}", func.anchor_id())),
                escape_angle_brackets(&func.params.join(", "))
            );
            if func.is_const {
                declaration.push_str(" const");
            }
            [escape_angle_brackets(&func.return_type), declaration]
        })
        .collect();
    table(["Return", "Declaration"], &rows)
}

fn render_enum(member_type: &MemberType) -> String {
    let mut output = String::new();
    let anchor = link::enum_anchor(&member_type.name);
    output.push_str(&format!(
        "<h3 id=\"{}\">{}</h3>\n\n",
        anchor,
        escape_html(&member_type.name)
    ));
    push_paragraph(&mut output, &member_type.brief);
    push_paragraph(&mut output, &member_type.detail);

    if let MemberTypeKind::Enum { values } = &member_type.kind {
        let rows: Vec<[String; 2]> = values
            .iter()
            .map(|value| {
                let description = if value.detail.is_empty() {
                    value.brief.clone()
                } else {
                    format!("{}<br />{}", value.brief, value.detail)
                };
                [value.name.clone(), description]
            })
            .collect();
        output.push_str(&table(["Name", "Description"], &rows));
        output.push('\n');
    }

    output
}

/// Heading text: `ReturnType Class::name(args) const`; constructors have no
/// return type.
fn function_heading(func: &MemberFunction) -> String {
    let mut heading = String::new();
    if !func.is_constructor() {
        heading.push_str(&func.return_type);
        heading.push(' ');
    }
    heading.push_str(&format!("{}::{}({})", func.class_name, func.name, func.params.join(", ")));
    if func.is_const {
        heading.push_str(" const");
    }
    heading
}

fn render_function(func: &MemberFunction) -> String {
    let mut output = format!(
        "<h3 id=\"{}\">{}</h3>\n\n",
        func.anchor_id(),
        escape_html(&function_heading(func))
    );

    if func.is_template() {
        output.push_str(&template_line(&func.template_params));
        output.push_str("\n\n");
    }
    push_paragraph(&mut output, &func.brief);
    push_paragraph(&mut output, &func.detail);

    if !func.param_docs.is_empty() {
        let rows: Vec<[String; 2]> = func
            .param_docs
            .iter()
            .map(|p| [format!("`{}`", p.name), p.description.clone()])
            .collect();
        output.push_str(&table(["Parameter", "Description"], &rows));
        output.push('\n');
    }
    if !func.since.is_empty() {
        output.push_str(&format!("*Since {}*\n\n", func.since));
    }

    output
}
