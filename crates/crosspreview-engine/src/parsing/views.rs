//! View constructor table: which arguments each kind reads and what its
//! trailing closures mean.

use std::sync::OnceLock;

use regex::Regex;

use super::args::{self, CallArgs};
use crate::models::{PropValue, ViewKind, ViewNode};

/// What a closure attached to a constructor call contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureRole {
    /// Child views.
    Content,
    /// The per-row view of a `ForEach`.
    RowTemplate,
    /// The view a `NavigationLink` pushes.
    Destination,
    /// A label, header or footer view.
    Label,
    /// An action closure; never translated.
    Ignore,
}

/// A closure after its statements have been translated.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltClosure {
    pub role: ClosureRole,
    /// `label` in `label: { ... }`.
    pub label: Option<String>,
    /// `i` in `{ i in ... }`.
    pub param: Option<String>,
    pub views: Vec<ViewNode>,
}

/// Role of a closure given the call it belongs to. `has_label_closure` is
/// true when the same call also has a `label:` closure.
pub fn closure_role(
    kind: ViewKind,
    args: &CallArgs,
    label: Option<&str>,
    has_label_closure: bool,
) -> ClosureRole {
    match label {
        Some("label" | "header" | "footer" | "icon") => return ClosureRole::Label,
        Some("content" | "detail" | "sidebar") => return ClosureRole::Content,
        Some("destination") => return ClosureRole::Destination,
        Some(_) => return ClosureRole::Ignore,
        None => {}
    }
    match kind {
        ViewKind::Button => {
            if args.first_string().is_some() || has_label_closure {
                ClosureRole::Ignore
            } else {
                ClosureRole::Label
            }
        }
        ViewKind::NavigationLink => {
            if args.first_string().is_some() {
                ClosureRole::Destination
            } else {
                ClosureRole::Label
            }
        }
        ViewKind::Toggle
        | ViewKind::Stepper
        | ViewKind::Link
        | ViewKind::DatePicker
        | ViewKind::ColorPicker
        | ViewKind::ProgressView
        | ViewKind::Slider
        | ViewKind::Label => ClosureRole::Label,
        ViewKind::ForEach => ClosureRole::RowTemplate,
        kind if kind.is_container() => ClosureRole::Content,
        _ => ClosureRole::Ignore,
    }
}

/// Kinds whose arguments may themselves be views.
pub fn arguments_take_views(kind: ViewKind) -> bool {
    matches!(kind, ViewKind::NavigationLink)
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*View$").expect("Invalid placeholder regex"))
}

/// Names of custom views that become placeholders instead of errors.
pub fn is_placeholder_name(name: &str) -> bool {
    ViewKind::from_name(name).is_none() && placeholder_re().is_match(name)
}

/// Build a node of `kind` from its arguments and translated closures.
pub fn build(kind: ViewKind, args: &CallArgs, closures: Vec<BuiltClosure>) -> ViewNode {
    let mut node = ViewNode::new(kind);
    read_props(&mut node, args);
    for closure in closures {
        attach_closure(&mut node, closure);
    }
    node
}

fn set_number(node: &mut ViewNode, key: &str, value: Option<f64>) {
    if let Some(v) = value {
        node.set_prop(key, PropValue::Number(v));
    }
}

fn set_token(node: &mut ViewNode, key: &str, value: Option<String>) {
    if let Some(v) = value {
        node.set_prop(key, PropValue::Token(v));
    }
}

fn set_text(node: &mut ViewNode, key: &str, value: Option<String>) {
    if let Some(v) = value {
        node.set_prop(key, PropValue::Text(v));
    }
}

fn read_props(node: &mut ViewNode, args: &CallArgs) {
    let kind = node.kind;
    match kind {
        ViewKind::Text => {
            let text = match args.first_unlabeled().or_else(|| args.labeled("verbatim")) {
                Some(arg) if arg.is_string_literal() => args::string_literal(&arg.text),
                Some(arg) => Some(arg.text.clone()),
                None => None,
            };
            node.set_prop("text", PropValue::Text(text.unwrap_or_default()));
        }
        ViewKind::Image => {
            if let Some(symbol) = args.labeled_string("systemName") {
                node.set_prop("systemName", PropValue::Text(symbol));
            } else {
                let name = args
                    .first_string()
                    .or_else(|| args.first_unlabeled().map(|a| a.text.clone()));
                node.set_prop("name", PropValue::Text(name.unwrap_or_default()));
            }
        }
        ViewKind::Label => {
            set_text(node, "title", args.first_string());
            set_text(node, "systemImage", args.labeled_string("systemImage"));
        }
        ViewKind::VStack
        | ViewKind::HStack
        | ViewKind::ZStack
        | ViewKind::LazyVStack
        | ViewKind::LazyHStack
        | ViewKind::Grid => {
            set_number(node, "spacing", args.labeled_number("spacing"));
            set_token(node, "alignment", args.labeled_token("alignment"));
        }
        ViewKind::ScrollView => {
            set_token(
                node,
                "axis",
                args.first_unlabeled().and_then(|a| args::enum_token(&a.text)),
            );
        }
        ViewKind::Section => {
            set_text(node, "title", args.first_string());
            set_text(node, "header", args.labeled_string("header"));
            set_text(node, "footer", args.labeled_string("footer"));
        }
        ViewKind::RoundedRectangle => {
            set_number(node, "cornerRadius", args.labeled_number("cornerRadius"));
        }
        ViewKind::Spacer => {
            set_number(node, "minLength", args.labeled_number("minLength"));
        }
        ViewKind::LinearGradient | ViewKind::RadialGradient => {
            let colors = args
                .labeled("colors")
                .or_else(|| args.labeled("gradient"))
                .and_then(|a| args::first_list(&a.text));
            if let Some(colors) = colors {
                node.set_prop("colors", PropValue::List(colors));
            }
            set_token(node, "startPoint", args.labeled_token("startPoint"));
            set_token(node, "endPoint", args.labeled_token("endPoint"));
        }
        ViewKind::AsyncImage => {
            set_text(node, "url", args.labeled_string("url"));
        }
        ViewKind::ForEach => read_item_source(node, args),
        _ => {}
    }

    match kind {
        ViewKind::Button
        | ViewKind::Toggle
        | ViewKind::TextField
        | ViewKind::SecureField
        | ViewKind::Picker
        | ViewKind::Menu
        | ViewKind::DisclosureGroup
        | ViewKind::NavigationLink
        | ViewKind::Link
        | ViewKind::Stepper
        | ViewKind::DatePicker
        | ViewKind::ColorPicker
        | ViewKind::ProgressView => set_text(node, "title", args.first_string()),
        _ => {}
    }

    match kind {
        ViewKind::TextField | ViewKind::SecureField | ViewKind::TextEditor => {
            set_text(node, "text", args.labeled_string("text"));
        }
        ViewKind::Toggle => {
            if let Some(on) = args.labeled("isOn").and_then(|a| args::bool_literal(&a.text)) {
                node.set_prop("isOn", PropValue::Bool(on));
            }
        }
        ViewKind::Slider | ViewKind::ProgressView => {
            set_number(node, "value", args.labeled_number("value"));
            set_number(node, "total", args.labeled_number("total"));
            if let Some(range) = args.labeled("in").and_then(|a| args::range(&a.text)) {
                node.set_prop("range", PropValue::Range(range));
            }
        }
        ViewKind::Link => {
            set_text(node, "url", args.labeled_string("destination"));
        }
        ViewKind::NavigationLink => {
            if let Some(view) = args.labeled("destination").and_then(|a| a.view.clone()) {
                node.set_prop("destination", PropValue::Node(Box::new(view)));
            }
        }
        _ => {}
    }
}

fn read_item_source(node: &mut ViewNode, args: &CallArgs) {
    let Some(source) = args.first_unlabeled() else {
        return;
    };
    if let Some(range) = args::range(&source.text) {
        node.set_prop("forEachRange", PropValue::Range(range));
    } else if let Some(items) = args::list_items(&source.text) {
        node.set_prop("forEachItems", PropValue::List(items));
    } else {
        // An identifier is expanded once, with its own name as the value.
        let name = source.text.trim().trim_start_matches('$').to_string();
        node.set_prop("forEachItems", PropValue::List(vec![name]));
    }
}

/// Several views where one is expected are grouped.
fn single_view(mut views: Vec<ViewNode>) -> Option<ViewNode> {
    match views.len() {
        0 => None,
        1 => views.pop(),
        _ => Some(ViewNode::new(ViewKind::Group).with_children(views)),
    }
}

fn attach_closure(node: &mut ViewNode, closure: BuiltClosure) {
    match closure.role {
        ClosureRole::Ignore => {}
        ClosureRole::Content if node.kind == ViewKind::NavigationSplitView => {
            node.children
                .push(ViewNode::new(ViewKind::Group).with_children(closure.views));
        }
        ClosureRole::Content => node.children.extend(closure.views),
        ClosureRole::RowTemplate => {
            if let Some(param) = closure.param {
                node.set_prop("rowVariable", PropValue::Text(param));
            }
            if let Some(template) = single_view(closure.views) {
                node.set_prop("rowTemplate", PropValue::Node(Box::new(template)));
            }
        }
        ClosureRole::Destination => {
            if let Some(view) = single_view(closure.views) {
                node.set_prop("destination", PropValue::Node(Box::new(view)));
            }
        }
        ClosureRole::Label => {
            let key = match closure.label.as_deref() {
                Some("header") => Some("header"),
                Some("footer") => Some("footer"),
                Some("icon") => Some("icon"),
                _ if matches!(
                    node.kind,
                    ViewKind::Menu | ViewKind::DisclosureGroup | ViewKind::Picker | ViewKind::Section
                ) =>
                {
                    Some("label")
                }
                _ => None,
            };
            match key {
                Some(key) => {
                    if let Some(view) = single_view(closure.views) {
                        node.set_prop(key, PropValue::Node(Box::new(view)));
                    }
                }
                None => node.children.extend(closure.views),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::args::parse_arg_list;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn call(inner: &str) -> CallArgs {
        CallArgs::new(parse_arg_list(inner))
    }

    fn closure(role: ClosureRole, views: Vec<ViewNode>) -> BuiltClosure {
        BuiltClosure {
            role,
            label: None,
            param: None,
            views,
        }
    }

    #[test]
    fn stack_reads_spacing_and_alignment() {
        let node = build(
            ViewKind::VStack,
            &call("alignment: .leading, spacing: 12"),
            vec![closure(ClosureRole::Content, vec![ViewNode::text("a")])],
        );
        assert_eq!(node.prop_f64("spacing"), Some(12.0));
        assert_eq!(node.prop_str("alignment"), Some("leading"));
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn text_with_expression_keeps_source() {
        let node = build(ViewKind::Text, &call("title"), vec![]);
        assert_eq!(node.prop_str("text"), Some("title"));
    }

    #[rstest]
    #[case::titled_button(ViewKind::Button, r#""Save""#, None, false, ClosureRole::Ignore)]
    #[case::label_button(ViewKind::Button, "action: save", None, false, ClosureRole::Label)]
    #[case::action_then_label(ViewKind::Button, "", None, true, ClosureRole::Ignore)]
    #[case::label_closure(ViewKind::Button, "", Some("label"), true, ClosureRole::Label)]
    #[case::titled_link(ViewKind::NavigationLink, r#""Next""#, None, false, ClosureRole::Destination)]
    #[case::link_label(ViewKind::NavigationLink, "destination: Detail()", None, false, ClosureRole::Label)]
    #[case::for_each(ViewKind::ForEach, "0..<3", None, false, ClosureRole::RowTemplate)]
    #[case::container(ViewKind::List, "", None, false, ClosureRole::Content)]
    #[case::leaf(ViewKind::Text, "", None, false, ClosureRole::Ignore)]
    fn closure_roles(
        #[case] kind: ViewKind,
        #[case] inner: &str,
        #[case] label: Option<&str>,
        #[case] has_label_closure: bool,
        #[case] expected: ClosureRole,
    ) {
        assert_eq!(
            closure_role(kind, &call(inner), label, has_label_closure),
            expected
        );
    }

    #[test]
    fn for_each_range_and_template() {
        let node = build(
            ViewKind::ForEach,
            &call("0..<5"),
            vec![BuiltClosure {
                role: ClosureRole::RowTemplate,
                label: None,
                param: Some("i".into()),
                views: vec![ViewNode::text("Row \\(i)")],
            }],
        );
        assert_eq!(node.prop_range("forEachRange").map(|r| r.len()), Some(5));
        assert_eq!(node.prop_str("rowVariable"), Some("i"));
        assert_eq!(
            node.prop_node("rowTemplate").and_then(|t| t.prop_str("text")),
            Some("Row \\(i)")
        );
    }

    #[test]
    fn for_each_multiple_views_become_group_template() {
        let node = build(
            ViewKind::ForEach,
            &call(r#"["a", "b"]"#),
            vec![closure(
                ClosureRole::RowTemplate,
                vec![ViewNode::text("x"), ViewNode::text("y")],
            )],
        );
        assert_eq!(node.prop_list("forEachItems").map(<[String]>::len), Some(2));
        let template = node.prop_node("rowTemplate").expect("template");
        assert_eq!(template.kind, ViewKind::Group);
        assert_eq!(template.children.len(), 2);
    }

    #[test]
    fn for_each_identifier_is_one_item() {
        let node = build(ViewKind::ForEach, &call("items, id: \\.self"), vec![]);
        assert_eq!(node.prop_list("forEachItems"), Some(&["items".to_string()][..]));
    }

    #[rstest]
    #[case("MyCustomView", true)]
    #[case("ProfileView", true)]
    #[case("ScrollView", false)]
    #[case("View", false)]
    #[case("myView", false)]
    #[case("Color", false)]
    fn placeholder_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_placeholder_name(name), expected);
    }

    #[test]
    fn toggle_and_slider_props() {
        let toggle = build(ViewKind::Toggle, &call(r#""Wi-Fi", isOn: .constant(true)"#), vec![]);
        assert_eq!(toggle.prop_str("title"), Some("Wi-Fi"));
        assert_eq!(toggle.prop_bool("isOn"), Some(true));

        let slider = build(ViewKind::Slider, &call("value: 0.5, in: 0...1"), vec![]);
        assert_eq!(slider.prop_f64("value"), Some(0.5));
        assert_eq!(slider.prop_range("range").map(|r| r.inclusive), Some(true));
    }

    #[test]
    fn section_header_closure_becomes_prop() {
        let node = build(
            ViewKind::Section,
            &CallArgs::default(),
            vec![
                closure(ClosureRole::Content, vec![ViewNode::text("row")]),
                BuiltClosure {
                    role: ClosureRole::Label,
                    label: Some("header".into()),
                    param: None,
                    views: vec![ViewNode::text("Head")],
                },
            ],
        );
        assert_eq!(node.children.len(), 1);
        assert_eq!(
            node.prop_node("header").and_then(|h| h.prop_str("text")),
            Some("Head")
        );
    }
}
