//! Syntax-tree backend built on tree-sitter and the Swift grammar.

use tree_sitter::{Node, Parser};

use super::args::{self, Arg, CallArgs};
use super::views::{self, BuiltClosure, ClosureRole};
use super::{Extraction, ParserBackend, modifiers};
use crate::diagnostics::Diagnostics;
use crate::error::{BackendError, ExtractError, snippet};
use crate::models::{Modifier, ViewKind, ViewNode};

pub struct StructuralBackend {
    parser: Parser,
}

impl StructuralBackend {
    pub fn new() -> Result<Self, BackendError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_swift::LANGUAGE.into())?;
        Ok(Self { parser })
    }
}

impl ParserBackend for StructuralBackend {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn extract(&mut self, source: &str) -> Result<Extraction, ExtractError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::ProviderFailed("parser produced no tree".into()))?;
        let root = tree.root_node();

        let decl = find_view_declaration(root, source).ok_or(ExtractError::NoViewDeclaration)?;
        let view = decl
            .child_by_field_name("name")
            .map(|n| node_text(n, source).to_string())
            .unwrap_or_default();
        let body = find_body_property(decl, source)
            .ok_or_else(|| ExtractError::NoBodyProperty { view: view.clone() })?;
        let expr = body_expression(body).ok_or(ExtractError::EmptyBody { view })?;

        let mut translator = Translator {
            source,
            diags: Diagnostics::new(),
        };
        if root.has_error() {
            translator
                .diags
                .push("Source contains syntax errors; the preview may be incomplete");
        }
        let tree = translator
            .translate(expr)
            .ok_or_else(|| ExtractError::unsupported(node_text(expr, source)))?;
        Ok(Extraction {
            root: tree,
            caveats: translator.diags.into_messages(),
        })
    }
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn is_comment(node: Node) -> bool {
    matches!(node.kind(), "comment" | "multiline_comment")
}

fn conforms_to_view(decl: Node, source: &str) -> bool {
    children(decl)
        .into_iter()
        .filter(|c| c.kind() == "inheritance_specifier")
        .any(|c| {
            let name: String = node_text(c, source).split_whitespace().collect();
            name == "View" || name == "SwiftUI.View"
        })
}

fn find_view_declaration<'t>(node: Node<'t>, source: &str) -> Option<Node<'t>> {
    if node.kind() == "class_declaration" && conforms_to_view(node, source) {
        return Some(node);
    }
    children(node)
        .into_iter()
        .find_map(|child| find_view_declaration(child, source))
}

fn find_body_property<'t>(decl: Node<'t>, source: &str) -> Option<Node<'t>> {
    let body = decl
        .child_by_field_name("body")
        .or_else(|| children(decl).into_iter().find(|c| c.kind() == "class_body"))?;
    named_children(body).into_iter().find(|member| {
        member.kind() == "property_declaration"
            && member
                .child_by_field_name("name")
                .into_iter()
                .chain(children(*member).into_iter().filter(|c| c.kind() == "pattern"))
                .any(|name| node_text(name, source).trim() == "body")
    })
}

fn body_expression(property: Node) -> Option<Node> {
    let computed = children(property)
        .into_iter()
        .find(|c| c.kind() == "computed_property")?;
    let statements = children(computed).into_iter().find_map(|c| match c.kind() {
        "statements" => Some(c),
        "computed_getter" => children(c).into_iter().find(|g| g.kind() == "statements"),
        _ => None,
    })?;
    named_children(statements)
        .into_iter()
        .find(|stmt| !is_comment(*stmt))
}

/// A closure before translation.
struct RawClosure<'t> {
    label: Option<String>,
    node: Node<'t>,
}

/// Arguments of a call, each with the node of its value expression.
struct RawCall<'t> {
    values: Vec<(Arg, Option<Node<'t>>)>,
    closures: Vec<RawClosure<'t>>,
}

impl RawCall<'_> {
    fn args(&self) -> CallArgs {
        CallArgs::new(self.values.iter().map(|(arg, _)| arg.clone()).collect())
    }
}

struct Translator<'s> {
    source: &'s str,
    diags: Diagnostics,
}

impl<'s> Translator<'s> {
    fn text(&self, node: Node) -> &'s str {
        node_text(node, self.source)
    }

    fn translate(&mut self, node: Node) -> Option<ViewNode> {
        match node.kind() {
            "call_expression" => self.call(node),
            "navigation_expression" => {
                let target = node.child_by_field_name("target")?;
                let name = self.suffix_name(node)?;
                let mut base = self.translate(target)?;
                self.push_modifier(&mut base, &name, &CallArgs::default(), node);
                Some(base)
            }
            "simple_identifier" => ViewKind::from_name(self.text(node))
                .filter(|kind| kind.is_bare_leaf())
                .map(ViewNode::new),
            "parenthesized_expression" | "control_transfer_statement" => named_children(node)
                .into_iter()
                .find(|c| !is_comment(*c))
                .and_then(|inner| self.translate(inner)),
            _ => None,
        }
    }

    fn suffix_name(&self, navigation: Node) -> Option<String> {
        let suffix = navigation
            .child_by_field_name("suffix")
            .or_else(|| {
                children(navigation)
                    .into_iter()
                    .find(|c| c.kind() == "navigation_suffix")
            })?;
        let ident = suffix
            .child_by_field_name("suffix")
            .or_else(|| {
                children(suffix)
                    .into_iter()
                    .find(|c| c.kind() == "simple_identifier")
            })?;
        Some(self.text(ident).to_string())
    }

    /// `f(a)(b) { }` nests call expressions; gather every suffix in order
    /// and return the callee.
    fn call(&mut self, node: Node) -> Option<ViewNode> {
        let mut suffixes = Vec::new();
        let mut head = node;
        while head.kind() == "call_expression" {
            let parts = children(head);
            suffixes.extend(parts.iter().copied().filter(|c| c.kind() == "call_suffix"));
            head = *parts.first()?;
        }
        suffixes.reverse();
        let raw = self.collect_call(&suffixes);

        match head.kind() {
            "simple_identifier" => self.construct(self.text(head), raw),
            "navigation_expression" => {
                let target = head.child_by_field_name("target")?;
                let name = self.suffix_name(head)?;
                let mut base = self.translate(target)?;
                let mut call = raw.args();
                if modifiers::argument_takes_view(&name) {
                    self.fill_views(&mut call, &raw);
                }
                if modifiers::closure_takes_view(&name) {
                    for closure in &raw.closures {
                        let views = self.statements(closure.node);
                        call.trailing.extend(views);
                    }
                }
                self.push_modifier(&mut base, &name, &call, head);
                Some(base)
            }
            _ => None,
        }
    }

    fn collect_call<'t>(&self, suffixes: &[Node<'t>]) -> RawCall<'t> {
        let mut raw = RawCall {
            values: Vec::new(),
            closures: Vec::new(),
        };
        for suffix in suffixes {
            let mut pending_label = None;
            for part in children(*suffix) {
                match part.kind() {
                    "value_arguments" => {
                        for value_arg in named_children(part)
                            .into_iter()
                            .filter(|c| c.kind() == "value_argument")
                        {
                            let arg = args::parse_arg(self.text(value_arg));
                            let value = value_arg
                                .child_by_field_name("value")
                                .or_else(|| named_children(value_arg).into_iter().last());
                            if let Some(lambda) = value.filter(|v| v.kind() == "lambda_literal") {
                                raw.closures.push(RawClosure {
                                    label: arg.label.clone(),
                                    node: lambda,
                                });
                            }
                            raw.values.push((arg, value));
                        }
                    }
                    "simple_identifier" => pending_label = Some(self.text(part).to_string()),
                    "lambda_literal" => raw.closures.push(RawClosure {
                        label: pending_label.take(),
                        node: part,
                    }),
                    "annotated_lambda" => {
                        if let Some(lambda) = children(part)
                            .into_iter()
                            .find(|c| c.kind() == "lambda_literal")
                        {
                            raw.closures.push(RawClosure {
                                label: pending_label.take(),
                                node: lambda,
                            });
                        }
                    }
                    _ => {}
                }
            }
        }
        raw
    }

    fn fill_views(&mut self, call: &mut CallArgs, raw: &RawCall) {
        for (arg, (_, value)) in call.values.iter_mut().zip(&raw.values) {
            arg.view = value
                .filter(|v| v.kind() != "lambda_literal")
                .and_then(|v| self.translate(v));
        }
    }

    fn construct(&mut self, name: &str, raw: RawCall) -> Option<ViewNode> {
        let Some(kind) = ViewKind::from_name(name) else {
            return views::is_placeholder_name(name).then(|| ViewNode::placeholder(name));
        };
        let mut call = raw.args();
        if views::arguments_take_views(kind) {
            self.fill_views(&mut call, &raw);
        }
        let has_label_closure = raw
            .closures
            .iter()
            .any(|c| c.label.as_deref() == Some("label"));
        let mut closures = Vec::with_capacity(raw.closures.len());
        for closure in raw.closures {
            let role = views::closure_role(kind, &call, closure.label.as_deref(), has_label_closure);
            let (param, views) = if role == ClosureRole::Ignore {
                (None, Vec::new())
            } else {
                (self.lambda_param(closure.node), self.statements(closure.node))
            };
            closures.push(BuiltClosure {
                role,
                label: closure.label,
                param,
                views,
            });
        }
        Some(views::build(kind, &call, closures))
    }

    fn lambda_param(&self, lambda: Node) -> Option<String> {
        let signature = children(lambda)
            .into_iter()
            .find(|c| c.kind() == "lambda_function_type")?;
        let text = self.text(signature).trim_start_matches(['(', ' ']);
        args::leading_identifier(text).map(str::to_string)
    }

    /// Translate each statement of a closure, skipping what is not a view.
    fn statements(&mut self, lambda: Node) -> Vec<ViewNode> {
        let Some(statements) = children(lambda)
            .into_iter()
            .find(|c| c.kind() == "statements")
        else {
            return Vec::new();
        };
        let mut views = Vec::new();
        for stmt in named_children(statements) {
            if is_comment(stmt) {
                continue;
            }
            match self.translate(stmt) {
                Some(view) => views.push(view),
                None => {
                    let text = snippet(self.text(stmt));
                    log::debug!("Skipping unsupported statement: {text}");
                    self.diags.push_at(
                        stmt.start_position().row + 1,
                        format!("Skipped unsupported statement: {text}"),
                    );
                }
            }
        }
        views
    }

    fn push_modifier(&mut self, base: &mut ViewNode, name: &str, call: &CallArgs, at: Node) {
        match modifiers::interpret(name, call) {
            Ok(args) => base.modifiers.push(Modifier::new(name, args)),
            Err(e) => {
                log::debug!("Keeping .{name} without arguments: {e}");
                self.diags.push_at(at.start_position().row + 1, &e);
                base.modifiers.push(Modifier::bare(name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edges, FontSpec, ModifierArgs, Padding, Paint, PropValue};
    use pretty_assertions::assert_eq;

    fn extract(source: &str) -> Result<Extraction, ExtractError> {
        StructuralBackend::new()
            .expect("Swift grammar loads")
            .extract(source)
    }

    fn body(expr: &str) -> String {
        format!("import SwiftUI\n\nstruct Demo: View {{\n    var body: some View {{\n        {expr}\n    }}\n}}\n")
    }

    #[test]
    fn hello_scenario() {
        let source = r#"struct H: View { var body: some View { VStack(spacing: 12) { Text("Hello").font(.title).foregroundColor(.blue) } } }"#;
        let Extraction { root, caveats } = extract(source).expect("tree");
        assert!(caveats.is_empty(), "{caveats:?}");
        assert_eq!(root.kind, ViewKind::VStack);
        assert_eq!(root.prop_f64("spacing"), Some(12.0));
        assert_eq!(root.children.len(), 1);
        let text = &root.children[0];
        assert_eq!(text.kind, ViewKind::Text);
        assert_eq!(text.prop_str("text"), Some("Hello"));
        assert_eq!(
            text.modifiers,
            vec![
                Modifier::new(
                    "font",
                    ModifierArgs::Font(FontSpec {
                        style: Some("title".into()),
                        ..FontSpec::default()
                    })
                ),
                Modifier::new("foregroundColor", ModifierArgs::Paint(Paint::color("blue"))),
            ]
        );
    }

    #[test]
    fn missing_conformance() {
        let err = extract("struct Model { var body: String { \"x\" } }").unwrap_err();
        assert_eq!(err, ExtractError::NoViewDeclaration);
    }

    #[test]
    fn preview_provider_is_not_a_view() {
        let err = extract("struct P: PreviewProvider { static var previews: some View { Text(\"x\") } }")
            .unwrap_err();
        assert_eq!(err, ExtractError::NoViewDeclaration);
    }

    #[test]
    fn missing_body() {
        let err = extract("struct A: View { var title: String { \"x\" } }").unwrap_err();
        assert_eq!(err, ExtractError::NoBodyProperty { view: "A".into() });
    }

    #[test]
    fn custom_view_becomes_placeholder() {
        let root = extract(&body("VStack { MyCustomView() }")).expect("tree").root;
        assert_eq!(root.children, vec![ViewNode::placeholder("MyCustomView")]);
    }

    #[test]
    fn modifiers_apply_in_chain_order() {
        let root = extract(&body("Text(\"x\").padding(4).padding(16).bold()"))
            .expect("tree")
            .root;
        let names: Vec<_> = root.modifiers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["padding", "padding", "bold"]);
        assert_eq!(
            root.modifiers[1].args,
            ModifierArgs::Padding(Padding {
                edges: vec![Edges::All],
                amount: Some(16.0)
            })
        );
    }

    #[test]
    fn for_each_reads_range_param_and_template() {
        let root = extract(&body("ForEach(0..<3) { i in Text(\"Row \\(i)\") }"))
            .expect("tree")
            .root;
        assert_eq!(root.kind, ViewKind::ForEach);
        assert_eq!(root.prop_range("forEachRange").map(|r| r.len()), Some(3));
        assert_eq!(root.prop_str("rowVariable"), Some("i"));
        assert_eq!(
            root.prop_node("rowTemplate").and_then(|t| t.prop_str("text")),
            Some("Row \\(i)")
        );
    }

    #[test]
    fn button_action_closure_is_not_translated() {
        let root = extract(&body("Button(\"Save\") { save() }")).expect("tree").root;
        assert_eq!(root.prop_str("title"), Some("Save"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn button_label_closure_becomes_children() {
        let root = extract(&body(
            "Button(action: { save() }) {\n            Label(\"Save\", systemImage: \"tray\")\n        }",
        ))
        .expect("tree")
        .root;
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].kind, ViewKind::Label);
        assert_eq!(root.children[0].prop_str("systemImage"), Some("tray"));
    }

    #[test]
    fn overlay_content_is_translated() {
        let root = extract(&body("Circle().overlay(Text(\"1\"))")).expect("tree").root;
        let Some(Modifier {
            args: ModifierArgs::Content(content),
            ..
        }) = root.modifier("overlay")
        else {
            panic!("expected overlay content");
        };
        assert_eq!(content.view.prop_str("text"), Some("1"));
    }

    #[test]
    fn unreadable_modifier_args_are_caveats() {
        let Extraction { root, caveats } =
            extract(&body("Text(\"x\").frame()")).expect("tree");
        assert_eq!(root.modifiers, vec![Modifier::bare("frame")]);
        assert_eq!(caveats.len(), 1);
        assert!(caveats[0].contains(".frame"), "{caveats:?}");
    }

    #[test]
    fn unsupported_child_statement_is_skipped() {
        let Extraction { root, caveats } =
            extract(&body("VStack {\n            let x = 1\n            Text(\"a\")\n        }"))
                .expect("tree");
        assert_eq!(root.children.len(), 1);
        assert_eq!(caveats.len(), 1);
        assert!(caveats[0].starts_with("line 6:"), "{caveats:?}");
    }

    #[test]
    fn navigation_link_destination_argument() {
        let root = extract(&body(
            "NavigationLink(destination: DetailView()) { Text(\"Open\") }",
        ))
        .expect("tree")
        .root;
        assert_eq!(
            root.prop("destination"),
            Some(&PropValue::Node(Box::new(ViewNode::placeholder("DetailView"))))
        );
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn return_is_unwrapped() {
        let root = extract(&body("return Spacer()")).expect("tree").root;
        assert_eq!(root.kind, ViewKind::Spacer);
    }
}
