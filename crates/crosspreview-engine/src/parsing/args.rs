//! Argument text helpers shared by both parser backends.
//!
//! Backends split a call into [`CallArgs`]; everything after that works on
//! argument source text, so the structural and fallback paths read
//! arguments identically.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{RangeValue, ViewNode};

/// One argument of a call: `label: text`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arg {
    pub label: Option<String>,
    pub text: String,
    /// The argument translated as a view, when the callee takes views.
    pub view: Option<ViewNode>,
}

impl Arg {
    pub fn is_string_literal(&self) -> bool {
        is_string_literal(&self.text)
    }
}

/// The arguments of one call together with the views of any view-valued
/// trailing closure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub values: Vec<Arg>,
    pub trailing: Vec<ViewNode>,
}

impl CallArgs {
    pub fn new(values: Vec<Arg>) -> Self {
        Self {
            values,
            trailing: Vec::new(),
        }
    }

    pub fn labeled(&self, label: &str) -> Option<&Arg> {
        self.values
            .iter()
            .find(|arg| arg.label.as_deref() == Some(label))
    }

    pub fn unlabeled(&self) -> impl Iterator<Item = &Arg> {
        self.values.iter().filter(|arg| arg.label.is_none())
    }

    pub fn first_unlabeled(&self) -> Option<&Arg> {
        self.unlabeled().next()
    }

    /// Content of the first unlabeled string literal.
    pub fn first_string(&self) -> Option<String> {
        self.unlabeled()
            .find(|arg| arg.is_string_literal())
            .and_then(|arg| string_literal(&arg.text))
    }

    pub fn labeled_number(&self, label: &str) -> Option<f64> {
        self.labeled(label).and_then(|arg| number(&arg.text))
    }

    pub fn labeled_token(&self, label: &str) -> Option<String> {
        self.labeled(label).and_then(|arg| enum_token(&arg.text))
    }

    pub fn labeled_string(&self, label: &str) -> Option<String> {
        self.labeled(label).and_then(|arg| string_literal(&arg.text))
    }
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?(?:\d+(?:\.\d+)?|\.\d+)").expect("Invalid number regex"))
}

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("Invalid identifier regex"))
}

fn dot_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\.([A-Za-z_][A-Za-z0-9_]*)").expect("Invalid dot token regex")
    })
}

fn type_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Z][A-Za-z0-9_]*\.([A-Za-z_][A-Za-z0-9_]*)")
            .expect("Invalid type token regex")
    })
}

fn string_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("Invalid string regex"))
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*:\s*").expect("Invalid label regex")
    })
}

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(-?\d+)\s*(\.\.<|\.\.\.)\s*(-?\d+)$").expect("Invalid range regex")
    })
}

/// Enum value of an argument: `.token` and `Type.token` give `token`,
/// anything else gives its last bare identifier.
pub fn enum_token(text: &str) -> Option<String> {
    let text = text.trim();
    if let Some(caps) = dot_token_re().captures(text) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = type_token_re().captures(text) {
        return Some(caps[1].to_string());
    }
    identifier_re()
        .find_iter(text)
        .last()
        .map(|m| m.as_str().to_string())
}

/// The first number-looking substring.
pub fn number(text: &str) -> Option<f64> {
    number_re()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

pub fn is_string_literal(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

/// Content of the first string literal, with `\"` and `\\` unescaped.
/// Interpolations such as `\(name)` are left as written.
pub fn string_literal(text: &str) -> Option<String> {
    let caps = string_re().captures(text)?;
    let raw = &caps[1];
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('"') | Some('\\') => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    Some(out)
}

/// `true`, `false`, or a `.constant(...)` binding of either.
pub fn bool_literal(text: &str) -> Option<bool> {
    let text = text.trim();
    let inner = text
        .strip_prefix(".constant(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(text);
    match inner {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Split on `sep` where it is not nested in brackets or a string literal.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Split `label: value` into its parts.
pub fn parse_arg(text: &str) -> Arg {
    let text = text.trim();
    if let Some(caps) = label_re().captures(text) {
        let whole = caps.get(0).map_or(0, |m| m.end());
        return Arg {
            label: Some(caps[1].to_string()),
            text: text[whole..].trim().to_string(),
            view: None,
        };
    }
    Arg {
        label: None,
        text: text.to_string(),
        view: None,
    }
}

/// Parse the text between a call's parentheses.
pub fn parse_arg_list(inner: &str) -> Vec<Arg> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(inner, ',')
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .map(parse_arg)
        .collect()
}

/// Items of an array literal of strings or enum tokens.
pub fn list_items(text: &str) -> Option<Vec<String>> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    Some(
        split_top_level(inner, ',')
            .into_iter()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .filter_map(|item| {
                if is_string_literal(item) {
                    string_literal(item)
                } else {
                    enum_token(item)
                }
            })
            .collect(),
    )
}

/// The first array literal inside `text`, as items.
pub fn first_list(text: &str) -> Option<Vec<String>> {
    let start = text.find('[')?;
    let mut depth = 0i32;
    for (i, c) in text[start..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return list_items(&text[start..=start + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// A numeric range literal, optionally wrapped in parentheses.
pub fn range(text: &str) -> Option<RangeValue> {
    let mut text = text.trim();
    while let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        text = inner.trim();
    }
    let caps = range_re().captures(text)?;
    Some(RangeValue {
        start: caps[1].parse().ok()?,
        end: caps[3].parse().ok()?,
        inclusive: &caps[2] == "...",
    })
}

/// Text between the first `(` and its matching `)`.
pub fn call_inner(text: &str) -> Option<&str> {
    let open = text.find('(')?;
    let mut depth = 0i32;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Leading identifier of an expression such as `Circle()` or `Foo.bar`.
pub fn leading_identifier(text: &str) -> Option<&str> {
    let m = identifier_re().find(text.trim_start())?;
    (m.start() == 0).then_some(m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::dot(".blue", Some("blue"))]
    #[case::typed("Color.blue", Some("blue"))]
    #[case::dot_with_suffix(".blue.opacity(0.5)", Some("blue"))]
    #[case::typed_with_suffix("Font.title.bold()", Some("title"))]
    #[case::last_identifier("RoundedBorderTextFieldStyle()", Some("RoundedBorderTextFieldStyle"))]
    #[case::bare("someVar", Some("someVar"))]
    #[case::nothing("42", None)]
    fn enum_token_rules(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(enum_token(input).as_deref(), expected);
    }

    #[rstest]
    #[case("12", Some(12.0))]
    #[case("-3.5", Some(-3.5))]
    #[case("radius: 4", Some(4.0))]
    #[case(".infinity", None)]
    #[case::leading_dot(".5", Some(0.5))]
    #[case::negative_leading_dot("-.25", Some(-0.25))]
    #[case::inside_call(".opacity(0.5)", Some(0.5))]
    fn number_takes_first_match(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(number(input), expected);
    }

    #[test]
    fn string_literal_unescapes_quotes_only() {
        assert_eq!(
            string_literal(r#""say \"hi\" \(name)""#).as_deref(),
            Some(r#"say "hi" \(name)"#)
        );
        assert_eq!(string_literal("title"), None);
    }

    #[test]
    fn arg_list_keeps_labels_and_nesting() {
        let args = parse_arg_list(r#""Title", systemImage: "star", action: { run(a, b) }"#);
        assert_eq!(args.len(), 3);
        assert_eq!(args[0].label, None);
        assert_eq!(args[1].label.as_deref(), Some("systemImage"));
        assert_eq!(args[1].text, "\"star\"");
        assert_eq!(args[2].text, "{ run(a, b) }");
    }

    #[test]
    fn commas_inside_strings_do_not_split() {
        assert_eq!(split_top_level(r#""a, b", c"#, ',').len(), 2);
    }

    #[test]
    fn ternary_is_not_a_label() {
        let arg = parse_arg("flag ? 1 : 2");
        assert_eq!(arg.label, None);
    }

    #[rstest]
    #[case("0..<5", Some((0, 5, false)))]
    #[case("(1...3)", Some((1, 3, true)))]
    #[case("items", None)]
    fn range_literals(#[case] input: &str, #[case] expected: Option<(i64, i64, bool)>) {
        assert_eq!(
            range(input).map(|r| (r.start, r.end, r.inclusive)),
            expected
        );
    }

    #[test]
    fn list_items_reads_strings_and_tokens() {
        assert_eq!(
            list_items(r#"["A", "B"]"#),
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(
            first_list("Gradient(colors: [.red, Color.blue])"),
            Some(vec!["red".to_string(), "blue".to_string()])
        );
    }

    #[test]
    fn bool_literals() {
        assert_eq!(bool_literal("true"), Some(true));
        assert_eq!(bool_literal(".constant(false)"), Some(false));
        assert_eq!(bool_literal("$isOn"), None);
    }

    #[test]
    fn call_inner_matches_parens() {
        assert_eq!(call_inner(".system(size: f(2), weight: .bold)"), Some("size: f(2), weight: .bold"));
    }
}
