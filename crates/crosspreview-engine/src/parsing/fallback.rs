//! Text backend used when the syntax provider is unavailable.
//!
//! Declarations are found with regexes and blocks with a brace-counting
//! scanner that treats every `{` and `}` alike. Modifier arguments must not
//! contain parentheses; such modifiers are skipped with a caveat rather
//! than misread.

use std::sync::OnceLock;

use regex::Regex;

use super::args::{self, CallArgs};
use super::views::{self, BuiltClosure, ClosureRole};
use super::{Extraction, ParserBackend, modifiers};
use crate::diagnostics::{Diagnostics, line_of};
use crate::error::{ExtractError, snippet};
use crate::models::{Modifier, ViewKind, ViewNode};

pub struct FallbackBackend;

fn declaration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:struct|class)\s+(\w+)\s*(?:<[^>{]*>)?\s*:\s*([^{]+)\{")
            .expect("Invalid declaration regex")
    })
}

fn body_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\bvar\s+body\s*:\s*some\s+(?:SwiftUI\.)?View\b").expect("Invalid body regex")
    })
}

fn modifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.(\w+)\(([^)]*)\)").expect("Invalid modifier regex"))
}

fn modifier_closure_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.(\w+)\s*\{").expect("Invalid modifier closure regex"))
}

fn closure_param_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\(?\s*([A-Za-z_]\w*)\s*(?:,\s*[A-Za-z_]\w*\s*)*\)?\s+in\b")
            .expect("Invalid closure parameter regex")
    })
}

fn closure_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z_]\w*)\s*:\s*\{").expect("Invalid closure label regex"))
}

impl ParserBackend for FallbackBackend {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn extract(&mut self, source: &str) -> Result<Extraction, ExtractError> {
        let decl = find_view_declaration(source).ok_or(ExtractError::NoViewDeclaration)?;
        let Declaration {
            view,
            start: decl_start,
            text: decl_text,
            closed,
        } = decl;

        let marker = body_re()
            .find(decl_text)
            .ok_or_else(|| ExtractError::NoBodyProperty { view: view.clone() })?;
        let after = marker.end();
        let open = decl_text[after..]
            .find('{')
            .map(|i| after + i)
            .ok_or_else(|| ExtractError::EmptyBody { view: view.clone() })?;
        let inner = balanced(decl_text, open, b'{', b'}')
            .ok_or_else(|| ExtractError::EmptyBody { view: view.clone() })?;
        if inner.trim().is_empty() {
            return Err(ExtractError::EmptyBody { view });
        }

        let base = decl_start + open + 1;
        let mut scanner = Scanner {
            source,
            diags: Diagnostics::new(),
        };
        if !closed {
            scanner.caveat(
                decl_start - 1,
                format!("Unbalanced braces: the declaration of '{view}' is never closed"),
            );
        }
        let mut cur = Cursor::new(inner, base);
        cur.skip_ws();
        if cur.starts_with(b"return") && cur.rest()[6..].starts_with(char::is_whitespace) {
            cur.bump_n(6);
        }
        let root = scanner
            .expression(&mut cur)
            .ok_or_else(|| ExtractError::unsupported(cur.rest()))?;
        Ok(Extraction {
            root,
            caveats: scanner.diags.into_messages(),
        })
    }
}

/// A `View` declaration and the text of its braced body. An unclosed body
/// runs to the end of the source.
struct Declaration<'a> {
    view: String,
    start: usize,
    text: &'a str,
    closed: bool,
}

/// The first declaration that lists exactly `View` among its conformances.
fn find_view_declaration(source: &str) -> Option<Declaration<'_>> {
    declaration_re().captures_iter(source).find_map(|caps| {
        let conforms = caps[2]
            .split(',')
            .map(str::trim)
            .any(|name| name == "View" || name == "SwiftUI.View");
        if !conforms {
            return None;
        }
        let whole = caps.get(0)?;
        let open = whole.end() - 1;
        let body = balanced(source, open, b'{', b'}');
        Some(Declaration {
            view: caps[1].to_string(),
            start: open + 1,
            text: body.unwrap_or(&source[open + 1..]),
            closed: body.is_some(),
        })
    })
}

/// Text strictly inside the block opened at `open`, or `None` when it is
/// never closed. Every delimiter counts, including those in strings.
fn balanced(text: &str, open: usize, left: u8, right: u8) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&left) {
        return None;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if b == left {
            depth += 1;
        } else if b == right {
            depth -= 1;
            if depth == 0 {
                return text.get(open + 1..i);
            }
        }
    }
    None
}

/// Byte cursor over a slice of the source, tracking absolute offsets.
#[derive(Clone)]
struct Cursor<'a> {
    s: &'a str,
    /// Offset of `s` in the full source.
    base: usize,
    i: usize,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    fn pos(&self) -> usize {
        self.base + self.i
    }

    fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.i += 1;
        }
    }

    fn skip_inline_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.i += 1;
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let name = args::leading_identifier(self.rest())?;
        if !self.rest().starts_with(name) {
            return None;
        }
        self.i += name.len();
        Some(name)
    }

    /// Consume a balanced block at the cursor and return its inside, with
    /// the absolute offset of its first byte.
    fn block(&mut self, left: u8, right: u8) -> Option<(&'a str, usize)> {
        let inner = balanced(self.s, self.i, left, right)?;
        let start = self.pos() + 1;
        self.i += inner.len() + 2;
        Some((inner, start))
    }
}

struct RawClosure<'a> {
    label: Option<String>,
    inner: &'a str,
    base: usize,
}

struct Scanner<'s> {
    source: &'s str,
    diags: Diagnostics,
}

impl Scanner<'_> {
    fn caveat(&mut self, pos: usize, message: String) {
        log::debug!("{message}");
        self.diags.push_at(line_of(self.source, pos), message);
    }

    /// A constructor call with its closures and modifier chain. Leaves the
    /// cursor untouched when nothing matches.
    fn expression(&mut self, cur: &mut Cursor) -> Option<ViewNode> {
        let start = cur.i;
        let name = cur.ident()?;
        let args_text = if cur.peek() == Some(b'(') {
            match cur.block(b'(', b')') {
                Some((inner, _)) => Some(inner),
                None => {
                    cur.i = start;
                    return None;
                }
            }
        } else {
            None
        };
        let closures = self.closures(cur);

        let kind = ViewKind::from_name(name);
        let bare = args_text.is_none() && closures.is_empty();
        let node = match kind {
            Some(kind) if bare && !kind.is_bare_leaf() => None,
            Some(kind) => Some(self.construct(kind, args_text.unwrap_or(""), closures)),
            None if !bare && views::is_placeholder_name(name) => Some(ViewNode::placeholder(name)),
            None => None,
        };
        let Some(mut node) = node else {
            cur.i = start;
            return None;
        };
        self.modifier_chain(cur, &mut node);
        Some(node)
    }

    fn closures<'a>(&mut self, cur: &mut Cursor<'a>) -> Vec<RawClosure<'a>> {
        let mut closures = Vec::new();
        let saved = cur.i;
        cur.skip_inline_ws();
        if cur.peek() == Some(b'{') {
            if let Some((inner, base)) = cur.block(b'{', b'}') {
                closures.push(RawClosure {
                    label: None,
                    inner,
                    base,
                });
            }
        } else {
            cur.i = saved;
        }
        loop {
            let saved = cur.i;
            cur.skip_ws();
            let Some(caps) = closure_label_re().captures(cur.rest()) else {
                cur.i = saved;
                break;
            };
            let label = caps[1].to_string();
            cur.bump_n(caps.get(0).map_or(0, |m| m.end()) - 1);
            match cur.block(b'{', b'}') {
                Some((inner, base)) => closures.push(RawClosure {
                    label: Some(label),
                    inner,
                    base,
                }),
                None => {
                    cur.i = saved;
                    break;
                }
            }
        }
        closures
    }

    fn construct(&mut self, kind: ViewKind, args_text: &str, raw: Vec<RawClosure>) -> ViewNode {
        let mut call = CallArgs::new(args::parse_arg_list(args_text));
        if views::arguments_take_views(kind) {
            self.fill_views(&mut call);
        }
        let has_label_closure = raw.iter().any(|c| c.label.as_deref() == Some("label"));
        let closures = raw
            .into_iter()
            .map(|closure| {
                let role = views::closure_role(kind, &call, closure.label.as_deref(), has_label_closure);
                let (param, views) = if role == ClosureRole::Ignore {
                    (None, Vec::new())
                } else {
                    self.closure_body(closure.inner, closure.base)
                };
                BuiltClosure {
                    role,
                    label: closure.label,
                    param,
                    views,
                }
            })
            .collect();
        views::build(kind, &call, closures)
    }

    fn fill_views(&mut self, call: &mut CallArgs) {
        for arg in &mut call.values {
            arg.view = self.view_from_text(&arg.text);
        }
    }

    /// Translate an argument that must be exactly one view expression.
    fn view_from_text(&mut self, text: &str) -> Option<ViewNode> {
        let text = text.trim();
        let mut cur = Cursor::new(text, 0);
        let mut scratch = Scanner {
            source: text,
            diags: Diagnostics::new(),
        };
        let view = scratch.expression(&mut cur)?;
        cur.skip_ws();
        cur.eof().then_some(view)
    }

    fn closure_body(&mut self, inner: &str, base: usize) -> (Option<String>, Vec<ViewNode>) {
        let (param, offset) = match closure_param_re().captures(inner) {
            Some(caps) => (
                Some(caps[1].to_string()),
                caps.get(0).map_or(0, |m| m.end()),
            ),
            None => (None, 0),
        };
        let views = self.statements(&inner[offset..], base + offset);
        (param, views)
    }

    fn statements(&mut self, inner: &str, base: usize) -> Vec<ViewNode> {
        let mut cur = Cursor::new(inner, base);
        let mut views = Vec::new();
        loop {
            cur.skip_ws();
            while cur.peek() == Some(b';') {
                cur.bump();
                cur.skip_ws();
            }
            if cur.eof() {
                break;
            }
            match self.expression(&mut cur) {
                Some(view) => views.push(view),
                None => {
                    let pos = cur.pos();
                    let text = snippet(cur.rest());
                    self.caveat(pos, format!("Skipped unsupported statement: {text}"));
                    skip_statement(&mut cur);
                }
            }
        }
        views
    }

    fn modifier_chain(&mut self, cur: &mut Cursor, node: &mut ViewNode) {
        loop {
            let saved = cur.i;
            cur.skip_ws();
            if cur.peek() != Some(b'.') {
                cur.i = saved;
                return;
            }
            let pos = cur.pos();
            if let Some(caps) = modifier_re().captures(cur.rest()) {
                let name = caps[1].to_string();
                let args_text = caps[2].to_string();
                if args_text.contains('(') {
                    // `[^)]*` stopped at an inner `)`; skip the whole call.
                    cur.bump_n(1 + name.len());
                    cur.block(b'(', b')');
                    self.skip_trailing_closure(cur);
                    self.caveat(
                        pos,
                        format!("Modifier '.{name}' skipped: nested arguments need the syntax provider"),
                    );
                    continue;
                }
                cur.bump_n(caps.get(0).map_or(0, |m| m.end()));
                let mut call = CallArgs::new(args::parse_arg_list(&args_text));
                if modifiers::argument_takes_view(&name) {
                    self.fill_views(&mut call);
                }
                self.modifier_closure(cur, &name, &mut call);
                self.push_modifier(node, &name, &call, pos);
            } else if let Some(caps) = modifier_closure_re().captures(cur.rest()) {
                let name = caps[1].to_string();
                cur.bump_n(1 + name.len());
                let mut call = CallArgs::default();
                self.modifier_closure(cur, &name, &mut call);
                self.push_modifier(node, &name, &call, pos);
            } else {
                cur.i = saved;
                return;
            }
        }
    }

    /// A trailing closure after a modifier: translated when it builds a
    /// view, otherwise consumed.
    fn modifier_closure(&mut self, cur: &mut Cursor, name: &str, call: &mut CallArgs) {
        let saved = cur.i;
        cur.skip_inline_ws();
        if cur.peek() != Some(b'{') {
            cur.i = saved;
            return;
        }
        let Some((inner, base)) = cur.block(b'{', b'}') else {
            cur.i = saved;
            return;
        };
        if modifiers::closure_takes_view(name) {
            let (_, views) = self.closure_body(inner, base);
            call.trailing.extend(views);
        }
    }

    fn skip_trailing_closure(&mut self, cur: &mut Cursor) {
        let saved = cur.i;
        cur.skip_inline_ws();
        if cur.peek() != Some(b'{') || cur.block(b'{', b'}').is_none() {
            cur.i = saved;
        }
    }

    fn push_modifier(&mut self, node: &mut ViewNode, name: &str, call: &CallArgs, pos: usize) {
        match modifiers::interpret(name, call) {
            Ok(args) => node.modifiers.push(Modifier::new(name, args)),
            Err(e) => {
                self.caveat(pos, e.to_string());
                node.modifiers.push(Modifier::bare(name));
            }
        }
    }
}

/// Skip to the end of the line, continuing while brackets opened since the
/// statement start are still open. Always advances.
fn skip_statement(cur: &mut Cursor) {
    let mut depth = 0i32;
    let start = cur.i;
    while let Some(b) = cur.bump() {
        match b {
            b'{' | b'(' | b'[' => depth += 1,
            b'}' | b')' | b']' => depth -= 1,
            b'\n' if depth <= 0 => break,
            _ => {}
        }
    }
    if cur.i == start {
        cur.bump_n(1);
    }
}
