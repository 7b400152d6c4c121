//! C++ parameter and template-argument normalization.
//!
//! Doxygen flattens `<param>` markup into text such as
//! `const TemplateTest< T > &   other`. Rendering wants one canonical form:
//! `const TemplateTest<T>& other`.

use crate::error::SignatureError;
use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Keywords that make up multi-word fundamental types (`unsigned int`).
const FUNDAMENTAL: &[&str] = &[
    "void", "bool", "char", "char8_t", "char16_t", "char32_t", "wchar_t", "short", "int",
    "long", "float", "double", "signed", "unsigned", "auto",
];

/// Collapse whitespace around template brackets and between arguments.
///
/// `Foo < Bar < T > >` → `Foo<Bar<T>>`, `Map<K,V>` → `Map<K, V>`.
/// Text without a balanced `<...>` group is returned whitespace-collapsed.
pub fn normalize_template(code: &str) -> String {
    let code = collapse_whitespace(code);
    let Some((open, close)) = angle_group(&code) else {
        return code;
    };

    let head = code[..open].trim_end();
    let mut out = format!("{head}<{}>", normalize_args(&code[open + 1..close]));

    let tail = &code[close + 1..];
    if !tail.trim().is_empty() {
        if tail.starts_with(' ') {
            out.push(' ');
        }
        out.push_str(&normalize_template(tail));
    }
    out
}

/// Canonical form of one parameter declaration:
/// `specifiers base[<args>][&][ *…][...][ name]`.
///
/// Specifiers keep their source order; only a `const` written right after
/// the type name moves in front of it (`Foo const &` → `const Foo&`).
pub fn normalize_param(code: &str) -> Result<String, SignatureError> {
    let raw = collapse_whitespace(code);
    let tokens = tokenize(&raw)?;
    // C variadic `...`
    if tokens == [Token::Pack] {
        return Ok(ELLIPSIS.to_string());
    }
    let decl = Declaration::from_tokens(&raw, tokens)?;
    Ok(decl.render())
}

const ELLIPSIS: &str = "...";

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Ref(String),
    Star,
    /// `...` of a parameter pack
    Pack,
}

#[derive(Debug, Default)]
struct Declaration {
    /// Specifiers and type words in source order, cv-qualifiers included
    base: Vec<String>,
    reference: Option<String>,
    stars: usize,
    pack: bool,
    name: Vec<String>,
}

fn is_cv(word: &str) -> bool {
    matches!(word, "const" | "volatile")
}

impl Declaration {
    fn from_tokens(raw: &str, tokens: Vec<Token>) -> Result<Self, SignatureError> {
        let mut decl = Declaration::default();

        for token in tokens {
            let after_marker = decl.reference.is_some() || decl.stars > 0 || decl.pack;
            let open = decl.name.is_empty() && !decl.pack;
            match token {
                Token::Word(w) if !after_marker => decl.base.push(w),
                Token::Word(w) => decl.name.push(w),
                Token::Ref(r) if decl.reference.is_none() && open => decl.reference = Some(r),
                Token::Star if open => decl.stars += 1,
                Token::Pack if open => decl.pack = true,
                Token::Ref(r) => return Err(unexpected(raw, &r)),
                Token::Star => return Err(unexpected(raw, "*")),
                Token::Pack => return Err(unexpected(raw, ELLIPSIS)),
            }
        }

        if decl.base.iter().all(|w| is_cv(w)) {
            return Err(SignatureError::MissingType {
                raw: raw.to_string(),
            });
        }

        // Without a marker the name is the last word, unless that word is
        // part of a fundamental type (`unsigned int`) or a cv-qualifier.
        let unmarked = decl.reference.is_none() && decl.stars == 0 && !decl.pack;
        let last_is_name = match decl.base.split_last() {
            Some((last, rest)) => {
                !FUNDAMENTAL.contains(&last.as_str())
                    && !is_cv(last)
                    && rest.iter().any(|w| !is_cv(w))
            }
            None => false,
        };
        if unmarked && last_is_name {
            if let Some(name) = decl.base.pop() {
                decl.name.push(name);
            }
        }

        // East const: `Foo const` → `const Foo`
        let east_const =
            matches!(decl.base.as_slice(), [.., ty, last] if last == "const" && !is_cv(ty));
        if east_const {
            let len = decl.base.len();
            decl.base.swap(len - 2, len - 1);
        }

        // Only cv-qualifiers may precede the name (`int *const p`).
        if let Some((_, qualifiers)) = decl.name.split_last() {
            if let Some(bad) = qualifiers
                .iter()
                .find(|w| !matches!(w.as_str(), "const" | "volatile"))
            {
                return Err(unexpected(raw, bad));
            }
        }

        Ok(decl)
    }

    fn render(&self) -> String {
        let mut out = self.base.join(" ");
        if let Some(ref r) = self.reference {
            out.push_str(r);
        }
        if self.stars > 0 {
            out.push(' ');
            out.push_str(&"*".repeat(self.stars));
        }
        if self.pack {
            out.push_str(ELLIPSIS);
        }
        if !self.name.is_empty() {
            // `int *p`, but `Args&&... args`
            if self.stars == 0 || self.pack {
                out.push(' ');
            }
            out.push_str(&self.name.join(" "));
        }
        out
    }
}

fn unexpected(raw: &str, token: &str) -> SignatureError {
    SignatureError::UnexpectedToken {
        raw: raw.to_string(),
        token: token.to_string(),
    }
}

fn tokenize(raw: &str) -> Result<Vec<Token>, SignatureError> {
    let chars: Vec<char> = raw.chars().collect();
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => flush(&mut word, &mut tokens),
            '&' => {
                flush(&mut word, &mut tokens);
                match tokens.last_mut() {
                    Some(Token::Ref(r)) => r.push('&'),
                    _ => tokens.push(Token::Ref("&".to_string())),
                }
            }
            '*' => {
                flush(&mut word, &mut tokens);
                tokens.push(Token::Star);
            }
            '.' if chars[i..].starts_with(&['.', '.', '.']) => {
                flush(&mut word, &mut tokens);
                tokens.push(Token::Pack);
                i += 2;
            }
            '<' | '(' | '[' => {
                // `Foo <T>`: the bracket group belongs to the preceding word
                if word.is_empty() && c == '<' && matches!(tokens.last(), Some(Token::Word(_))) {
                    if let Some(Token::Word(prev)) = tokens.pop() {
                        word = prev;
                    }
                }
                let close = matching(&chars, i, raw)?;
                let inner: String = chars[i + 1..close].iter().collect();
                if c == '<' {
                    word.push('<');
                    word.push_str(&normalize_args(&inner));
                    word.push('>');
                } else {
                    word.push(c);
                    word.push_str(&collapse_whitespace(&inner));
                    word.push(chars[close]);
                }
                i = close;
            }
            '>' | ')' | ']' => return Err(unexpected(raw, &c.to_string())),
            _ => word.push(c),
        }
        i += 1;
    }
    flush(&mut word, &mut tokens);

    Ok(tokens)
}

fn flush(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(Token::Word(std::mem::take(word)));
    }
}

/// Index of the bracket closing the one at `open`.
///
/// Inside a `<...>` group, parenthesized text is skipped so comparisons in
/// non-type arguments (`(N > 0)`) do not close the group.
fn matching(chars: &[char], open: usize, raw: &str) -> Result<usize, SignatureError> {
    let (lhs, rhs) = match chars[open] {
        '<' => ('<', '>'),
        '(' => ('(', ')'),
        _ => ('[', ']'),
    };
    let mut depth = 0usize;
    let mut parens = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        if lhs == '<' {
            match c {
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                _ => {}
            }
            if parens > 0 || c == ')' {
                continue;
            }
        }
        if c == lhs {
            depth += 1;
        } else if c == rhs {
            depth -= 1;
            if depth == 0 {
                return Ok(i);
            }
        }
    }
    Err(SignatureError::Unbalanced {
        raw: raw.to_string(),
        open: lhs,
    })
}

/// Byte range of the first balanced `<...>` group outside parentheses.
fn angle_group(code: &str) -> Option<(usize, usize)> {
    let mut open = None;
    let mut depth = 0usize;
    let mut parens = 0usize;
    for (i, c) in code.char_indices() {
        match c {
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            _ if parens > 0 => {}
            '<' => {
                open.get_or_insert(i);
                depth += 1;
            }
            '>' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return open.map(|open| (open, i));
                }
            }
            _ => {}
        }
    }
    None
}

/// Normalize a comma-separated template argument list.
fn normalize_args(inner: &str) -> String {
    split_top_level(inner)
        .iter()
        .map(|arg| normalize_template(arg))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split at commas that are not nested inside `<>` or `()`. Angle brackets
/// inside parentheses are comparisons.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut angles = 0i32;
    let mut parens = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => parens += 1,
            ')' => parens -= 1,
            '<' if parens == 0 => angles += 1,
            '>' if parens == 0 => angles -= 1,
            ',' if angles == 0 && parens == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn template_nested_spacing() {
        assert_eq!(normalize_template("Foo < Bar < T > >"), "Foo<Bar<T>>");
    }

    #[test]
    fn template_already_normal() {
        assert_eq!(normalize_template("Vector<int>"), "Vector<int>");
    }

    #[test]
    fn template_arguments_get_one_space() {
        assert_eq!(normalize_template("std::map< K ,V >"), "std::map<K, V>");
        assert_eq!(normalize_template("Pair<A<B>,C<D> >"), "Pair<A<B>, C<D>>");
    }

    #[test]
    fn template_without_brackets() {
        assert_eq!(normalize_template("  int32_t \n"), "int32_t");
    }

    #[test]
    fn template_keeps_scoped_tail() {
        assert_eq!(normalize_template("std::vector< int >::iterator"), "std::vector<int>::iterator");
    }

    #[test]
    fn param_plain_value() {
        assert_eq!(normalize_param("int   a").unwrap(), "int a");
    }

    #[test]
    fn param_const_reference() {
        assert_eq!(normalize_param("const Nested &\n  nested").unwrap(), "const Nested& nested");
    }

    #[test]
    fn param_template_reference() {
        assert_eq!(
            normalize_param("const TemplateTest< T > & other").unwrap(),
            "const TemplateTest<T>& other"
        );
    }

    #[test]
    fn param_function_type_template() {
        assert_eq!(
            normalize_param("std::function< void(int32_t)> func").unwrap(),
            "std::function<void(int32_t)> func"
        );
    }

    #[test]
    fn param_pointer() {
        assert_eq!(normalize_param("char* name").unwrap(), "char *name");
        assert_eq!(normalize_param("const char ** argv").unwrap(), "const char **argv");
    }

    #[test]
    fn param_unnamed() {
        assert_eq!(normalize_param("int").unwrap(), "int");
        assert_eq!(normalize_param("unsigned int").unwrap(), "unsigned int");
        assert_eq!(normalize_param("const Foo &").unwrap(), "const Foo&");
        assert_eq!(normalize_param("Foo *").unwrap(), "Foo *");
    }

    #[test]
    fn param_rvalue_reference() {
        assert_eq!(normalize_param("Foo && f").unwrap(), "Foo&& f");
    }

    #[test]
    fn param_east_const() {
        assert_eq!(normalize_param("Foo const & f").unwrap(), "const Foo& f");
    }

    #[test]
    fn param_const_pointer() {
        assert_eq!(normalize_param("int * const p").unwrap(), "int *const p");
    }

    #[test]
    fn param_array() {
        assert_eq!(normalize_param("int values[ 4 ]").unwrap(), "int values[4]");
    }

    #[test]
    fn param_without_type_is_an_error() {
        assert!(matches!(
            normalize_param("&"),
            Err(SignatureError::MissingType { .. })
        ));
        assert!(normalize_param("").is_err());
    }

    #[test]
    fn param_unbalanced_template_is_an_error() {
        assert!(matches!(
            normalize_param("Foo<int x"),
            Err(SignatureError::Unbalanced { open: '<', .. })
        ));
    }

    #[test]
    fn param_garbage_after_name_is_an_error() {
        assert!(matches!(
            normalize_param("int *p q"),
            Err(SignatureError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn param_parameter_pack() {
        assert_eq!(normalize_param("Args &&... args").unwrap(), "Args&&... args");
        assert_eq!(normalize_param("Args &&...").unwrap(), "Args&&...");
        assert_eq!(normalize_param("Ts ... values").unwrap(), "Ts... values");
        assert_eq!(normalize_param("const T & ... rest").unwrap(), "const T&... rest");
        assert_eq!(normalize_param("T *... ptrs").unwrap(), "T *... ptrs");
    }

    #[test]
    fn param_c_variadic() {
        assert_eq!(normalize_param(" ... ").unwrap(), "...");
    }

    #[test]
    fn param_second_name_after_pack_is_an_error() {
        assert!(matches!(
            normalize_param("Args &&... a b"),
            Err(SignatureError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn param_leading_specifiers_keep_order() {
        assert_eq!(normalize_param("inline const Foo &").unwrap(), "inline const Foo&");
        assert_eq!(
            normalize_param("static std::vector< int > v").unwrap(),
            "static std::vector<int> v"
        );
        assert_eq!(normalize_param("volatile int x").unwrap(), "volatile int x");
    }

    #[test]
    fn param_only_qualifiers_is_an_error() {
        assert!(matches!(
            normalize_param("const &"),
            Err(SignatureError::MissingType { .. })
        ));
    }

    #[test]
    fn param_parenthesized_template_argument() {
        assert_eq!(
            normalize_param("std::array< int, (N > 0) ? N : 1 > a").unwrap(),
            "std::array<int, (N > 0) ? N : 1> a"
        );
        assert_eq!(
            normalize_template("Foo< (A < B), C >"),
            "Foo<(A < B), C>"
        );
    }

    fn raw_param() -> impl Strategy<Value = String> {
        let base = prop::sample::select(vec![
            "int",
            "Foo",
            "std::string",
            "unsigned int",
            "Vector<int>",
            "Map < K , V >",
            "std::function<void(int32_t)>",
            "Foo< Bar <T> >",
            "std::tuple< Args... >",
            "std::array< int, (N > 0) ? N : 1 >",
            "inline const Foo",
            "Foo const",
        ]);
        let space = prop::sample::select(vec![" ", "  ", "\n "]);
        (
            any::<bool>(),
            base,
            prop::sample::select(vec!["", "&", "&&"]),
            0usize..3,
            prop::sample::select(vec!["", "..."]),
            prop::sample::select(vec!["", "x", "value"]),
            space,
        )
            .prop_map(|(is_const, base, reference, stars, pack, name, sp)| {
                let mut raw = String::new();
                if is_const {
                    raw.push_str("const");
                    raw.push_str(sp);
                }
                raw.push_str(base);
                raw.push_str(sp);
                raw.push_str(reference);
                raw.push_str(&"*".repeat(stars));
                raw.push_str(pack);
                raw.push_str(sp);
                raw.push_str(name);
                raw
            })
    }

    proptest! {
        #[test]
        fn normalize_param_is_idempotent(raw in raw_param()) {
            let once = normalize_param(&raw).unwrap();
            let twice = normalize_param(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_template_is_idempotent(raw in raw_param()) {
            let once = normalize_template(&raw);
            prop_assert_eq!(normalize_template(&once), once);
        }
    }
}
