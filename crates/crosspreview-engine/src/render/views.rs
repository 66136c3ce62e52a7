//! Per-kind markup.

use std::borrow::Cow;

use super::style::{attributes, node_style, plain_text, prop_text};
use super::{Renderer, badge_text, escape, fmt_num, palette};
use crate::models::{ModifierArgs, PropValue, ViewKind, ViewNode};

fn class_name(kind: ViewKind) -> String {
    format!("sv-{}", kind.name().to_ascii_lowercase())
}

/// Opening tag with the node's class, inline style and attributes.
fn open(r: &Renderer<'_>, tag: &str, node: &ViewNode, extra_class: &str) -> String {
    let mut tag_html = format!("<{tag} class=\"{}", class_name(node.kind));
    if !extra_class.is_empty() {
        tag_html.push(' ');
        tag_html.push_str(extra_class);
    }
    tag_html.push('"');
    let css = node_style(node, r.options());
    if !css.is_empty() {
        tag_html.push_str(&format!(" style=\"{}\"", escape(&css)));
    }
    tag_html.push_str(&attributes(node));
    tag_html
}

fn element(r: &Renderer<'_>, tag: &str, node: &ViewNode, extra_class: &str, inner: &str) -> String {
    format!("{}>{inner}</{tag}>", open(r, tag, node, extra_class))
}

fn void_element(r: &Renderer<'_>, tag: &str, node: &ViewNode, attrs: &str) -> String {
    format!("{}{attrs}>", open(r, tag, node, ""))
}

/// The token of the last modifier named `name`.
fn style_token<'n>(node: &'n ViewNode, name: &str) -> Option<&'n str> {
    match &node.modifier(name)?.args {
        ModifierArgs::Token(token) => Some(token),
        _ => None,
    }
}

/// Row values of a `ForEach`, capped at `max_repeat`.
fn row_values(node: &ViewNode, max_repeat: usize) -> Vec<String> {
    let (total, values): (usize, Vec<String>) = if let Some(range) = node.prop_range("forEachRange") {
        let total = range.len();
        let count = total.min(max_repeat);
        let values = (0..count)
            .map_while(|i| range.value_at(i))
            .map(|value| value.to_string())
            .collect();
        (total, values)
    } else if let Some(items) = node.prop_list("forEachItems") {
        (items.len(), items.iter().take(max_repeat).cloned().collect())
    } else {
        (0, Vec::new())
    };
    if total > values.len() {
        log::warn!(
            "ForEach expands to {total} rows; rendering the first {}",
            values.len()
        );
    }
    values
}

/// One independent clone of the row template per iteration, with the row
/// variable substituted into string interpolations.
pub fn expand_for_each(node: &ViewNode, max_repeat: usize) -> Vec<ViewNode> {
    let Some(template) = node.prop_node("rowTemplate") else {
        return Vec::new();
    };
    let variable = node.prop_str("rowVariable");
    row_values(node, max_repeat)
        .into_iter()
        .map(|value| {
            let mut row = template.clone();
            if let Some(var) = variable {
                row.replace_text(&format!("\\({var})"), &value);
            }
            row
        })
        .collect()
}

/// Children with every `ForEach` replaced by its expanded rows.
pub fn rows<'n>(r: &Renderer<'_>, children: &'n [ViewNode]) -> Vec<Cow<'n, ViewNode>> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        if child.kind == ViewKind::ForEach && child.modifiers.is_empty() {
            out.extend(
                expand_for_each(child, r.options().max_repeat)
                    .into_iter()
                    .map(Cow::Owned),
            );
        } else {
            out.push(Cow::Borrowed(child));
        }
    }
    out
}

fn children(r: &Renderer<'_>, node: &ViewNode) -> String {
    r.nodes(&node.children)
}

/// Text from a prop that may be a string or a view.
fn prop_markup(r: &Renderer<'_>, node: &ViewNode, key: &str) -> Option<String> {
    match node.prop(key)? {
        PropValue::Text(s) | PropValue::Token(s) => Some(escape(s)),
        PropValue::Node(view) => Some(r.node(view)),
        _ => None,
    }
}

/// A control's label: its title, else its label prop, else its children.
fn label_markup(r: &Renderer<'_>, node: &ViewNode) -> String {
    if let Some(title) = node.prop_str("title") {
        return escape(title);
    }
    if let Some(label) = prop_markup(r, node, "label") {
        return label;
    }
    children(r, node)
}

pub fn markup(r: &Renderer<'_>, node: &ViewNode) -> String {
    match node.kind {
        ViewKind::VStack
        | ViewKind::HStack
        | ViewKind::LazyVStack
        | ViewKind::LazyHStack
        | ViewKind::Grid
        | ViewKind::GridRow
        | ViewKind::ScrollView
        | ViewKind::GeometryReader => element(r, "div", node, "", &children(r, node)),
        ViewKind::ZStack => {
            let layers: String = node
                .children
                .iter()
                .map(|c| format!("<div style=\"grid-area: 1 / 1\">{}</div>", r.node(c)))
                .collect();
            element(r, "div", node, "", &layers)
        }
        ViewKind::Group => group(r, node),
        ViewKind::ForEach => {
            let rows: String = expand_for_each(node, r.options().max_repeat)
                .iter()
                .map(|row| r.node(row))
                .collect();
            element(r, "div", node, "", &rows)
        }
        ViewKind::List | ViewKind::Form => list(r, node),
        ViewKind::Section => section(r, node),
        ViewKind::NavigationView | ViewKind::NavigationStack => navigation(r, node),
        ViewKind::NavigationSplitView => {
            let columns: String = node
                .children
                .iter()
                .map(|c| format!("<div class=\"sv-split-column\">{}</div>", r.node(c)))
                .collect();
            element(r, "div", node, "", &columns)
        }
        ViewKind::TabView => tab_view(r, node),
        ViewKind::DisclosureGroup => {
            let label = node
                .prop_str("title")
                .map(escape)
                .or_else(|| prop_markup(r, node, "label"))
                .unwrap_or_default();
            format!(
                "{} open><summary>{label}</summary><div class=\"sv-disclosure-content\">{}</div></details>",
                open(r, "details", node, ""),
                children(r, node)
            )
        }
        ViewKind::Menu => {
            let label = node
                .prop_str("title")
                .map(escape)
                .or_else(|| prop_markup(r, node, "label"))
                .unwrap_or_default();
            let items: String = rows(r, &node.children)
                .iter()
                .map(|item| format!("<div class=\"sv-menu-item\">{}</div>", r.node(item)))
                .collect();
            element(
                r,
                "details",
                node,
                "",
                &format!("<summary>{label} \u{25BE}</summary><div class=\"sv-menu-items\">{items}</div>"),
            )
        }
        ViewKind::Picker => picker(r, node),
        ViewKind::NavigationLink => element(
            r,
            "a",
            node,
            "",
            &format!(
                "<span class=\"sv-navlink-label\">{}</span><span class=\"sv-chevron\">\u{203A}</span>",
                label_markup(r, node)
            ),
        ),
        ViewKind::Text => {
            let text = node.prop_str("text").unwrap_or_default();
            element(r, "span", node, "", &escape(text))
        }
        ViewKind::Image => image(r, node),
        ViewKind::Label => {
            let icon = match node.prop_str("systemImage") {
                Some(symbol) => palette::symbol(symbol).to_string(),
                None => prop_markup(r, node, "icon").unwrap_or_default(),
            };
            let title = match node.prop_str("title") {
                Some(title) => escape(title),
                None => children(r, node),
            };
            element(
                r,
                "span",
                node,
                "",
                &format!(
                    "<span class=\"sv-label-icon\" aria-hidden=\"true\">{icon}</span><span class=\"sv-label-title\">{title}</span>"
                ),
            )
        }
        ViewKind::Spacer => element(r, "div", node, "", ""),
        ViewKind::Divider => void_element(r, "hr", node, ""),
        ViewKind::Button => {
            let variant = style_token(node, "buttonStyle").unwrap_or("automatic");
            let class = format!("sv-button-{}", variant.to_ascii_lowercase());
            let start = open(r, "button", node, &class);
            format!("{start} type=\"button\">{}</button>", label_markup(r, node))
        }
        ViewKind::Toggle => {
            let checked = if node.prop_bool("isOn").unwrap_or(false) {
                " checked"
            } else {
                ""
            };
            element(
                r,
                "label",
                node,
                "",
                &format!(
                    "<span class=\"sv-toggle-label\">{}</span><input type=\"checkbox\" role=\"switch\"{checked}>",
                    label_markup(r, node)
                ),
            )
        }
        ViewKind::TextField | ViewKind::SecureField => {
            let input_type = if node.kind == ViewKind::SecureField {
                "password"
            } else {
                "text"
            };
            let variant = style_token(node, "textFieldStyle").unwrap_or("automatic");
            let class = format!("sv-field-{}", variant.to_ascii_lowercase());
            let mut attrs = format!(
                " type=\"{input_type}\" placeholder=\"{}\"",
                escape(node.prop_str("title").unwrap_or_default())
            );
            if let Some(text) = node.prop_str("text") {
                attrs.push_str(&format!(" value=\"{}\"", escape(text)));
            }
            format!("{}{attrs}>", open(r, "input", node, &class))
        }
        ViewKind::TextEditor => element(
            r,
            "textarea",
            node,
            "",
            &escape(node.prop_str("text").unwrap_or_default()),
        ),
        ViewKind::Slider => {
            let range = node.prop_range("range");
            let (min, max) = range.map_or((0.0, 1.0), |bounds| (bounds.start as f64, bounds.end as f64));
            let value = node.prop_f64("value").unwrap_or((min + max) / 2.0);
            let input = void_element(
                r,
                "input",
                node,
                &format!(
                    " type=\"range\" min=\"{}\" max=\"{}\" step=\"any\" value=\"{}\"",
                    fmt_num(min),
                    fmt_num(max),
                    fmt_num(value)
                ),
            );
            let label = children(r, node);
            if label.is_empty() {
                input
            } else {
                format!("<label class=\"sv-slider-row\">{label}{input}</label>")
            }
        }
        ViewKind::Stepper => element(
            r,
            "div",
            node,
            "",
            &format!(
                "<span class=\"sv-stepper-label\">{}</span><span class=\"sv-stepper-buttons\"><button type=\"button\">\u{2212}</button><button type=\"button\">+</button></span>",
                label_markup(r, node)
            ),
        ),
        ViewKind::ProgressView => progress(r, node),
        ViewKind::DatePicker => element(
            r,
            "label",
            node,
            "",
            &format!(
                "<span>{}</span><input type=\"date\">",
                label_markup(r, node)
            ),
        ),
        ViewKind::ColorPicker => element(
            r,
            "label",
            node,
            "",
            &format!(
                "<span>{}</span><input type=\"color\">",
                label_markup(r, node)
            ),
        ),
        ViewKind::Link => {
            let href = escape(node.prop_str("url").unwrap_or("#"));
            format!(
                "{} href=\"{href}\">{}</a>",
                open(r, "a", node, ""),
                label_markup(r, node)
            )
        }
        ViewKind::AsyncImage => {
            let src = escape(node.prop_str("url").unwrap_or_default());
            void_element(r, "img", node, &format!(" src=\"{src}\" alt=\"\""))
        }
        ViewKind::Rectangle
        | ViewKind::Circle
        | ViewKind::RoundedRectangle
        | ViewKind::Capsule
        | ViewKind::Ellipse
        | ViewKind::LinearGradient
        | ViewKind::RadialGradient => element(r, "div", node, "", ""),
        ViewKind::Custom => unknown(r, node),
    }
}

fn unknown(r: &Renderer<'_>, node: &ViewNode) -> String {
    element(
        r,
        "div",
        node,
        "sv-placeholder",
        &escape(&format!("<{}>", node.kind)),
    )
}

fn group(r: &Renderer<'_>, node: &ViewNode) -> String {
    if node.prop("placeholder").is_some() {
        return element(r, "div", node, "sv-placeholder", &children(r, node));
    }
    element(r, "div", node, "", &children(r, node))
}

fn list(r: &Renderer<'_>, node: &ViewNode) -> String {
    let variant = style_token(node, "listStyle").unwrap_or("automatic");
    let class = format!("sv-list-{}", variant.to_ascii_lowercase());
    let items: String = rows(r, &node.children)
        .iter()
        .map(|row| {
            if row.kind == ViewKind::Section {
                r.node(row)
            } else {
                format!("<div class=\"sv-row\" role=\"listitem\">{}</div>", r.node(row))
            }
        })
        .collect();
    format!("{} role=\"list\">{items}</div>", open(r, "div", node, &class))
}

fn section(r: &Renderer<'_>, node: &ViewNode) -> String {
    let header = prop_markup(r, node, "header")
        .or_else(|| node.prop_str("title").map(escape))
        .or_else(|| prop_markup(r, node, "label"));
    let footer = prop_markup(r, node, "footer");
    let body: String = rows(r, &node.children)
        .iter()
        .map(|row| format!("<div class=\"sv-row\" role=\"listitem\">{}</div>", r.node(row)))
        .collect();
    let mut inner = String::new();
    if let Some(header) = header {
        inner.push_str(&format!("<header class=\"sv-section-header\">{header}</header>"));
    }
    inner.push_str(&format!("<div class=\"sv-section-body\" role=\"list\">{body}</div>"));
    if let Some(footer) = footer {
        inner.push_str(&format!("<footer class=\"sv-section-footer\">{footer}</footer>"));
    }
    element(r, "section", node, "", &inner)
}

/// The first `navigationTitle` among the descendants and whether it is
/// displayed inline.
fn navigation_title(node: &ViewNode) -> Option<(String, bool)> {
    for child in &node.children {
        if let Some(modifier) = child.modifier("navigationTitle")
            && let ModifierArgs::Text(title) = &modifier.args
        {
            let inline = style_token(child, "navigationBarTitleDisplayMode") == Some("inline");
            return Some((title.clone(), inline));
        }
        if let Some(found) = navigation_title(child) {
            return Some(found);
        }
    }
    None
}

fn navigation(r: &Renderer<'_>, node: &ViewNode) -> String {
    let bar = match navigation_title(node) {
        Some((title, inline)) => format!(
            "<header class=\"sv-navbar{}\"><h1 class=\"sv-navtitle\">{}</h1></header>",
            if inline { " sv-navbar-inline" } else { "" },
            escape(&title)
        ),
        None => String::new(),
    };
    element(
        r,
        "div",
        node,
        "",
        &format!("{bar}<div class=\"sv-navigation-content\">{}</div>", children(r, node)),
    )
}

fn tab_view(r: &Renderer<'_>, node: &ViewNode) -> String {
    let tabs = rows(r, &node.children);
    let content = tabs
        .first()
        .map(|first| {
            let mut shown = first.clone().into_owned();
            shown
                .modifiers
                .retain(|m| m.name != "tabItem" && m.name != "badge");
            r.node(&shown)
        })
        .unwrap_or_default();
    let bar: String = tabs
        .iter()
        .enumerate()
        .map(|(index, tab)| {
            let item = match tab.modifier("tabItem").map(|m| &m.args) {
                Some(ModifierArgs::Content(content)) => r.node(&content.view),
                _ => format!("Tab {}", index + 1),
            };
            let badge = tab
                .modifier("badge")
                .and_then(|m| badge_text(&m.args))
                .map(|text| format!("<span class=\"sv-badge\">{text}</span>"))
                .unwrap_or_default();
            let active = if index == 0 { " sv-tab-active" } else { "" };
            format!("<button type=\"button\" class=\"sv-tab{active}\">{item}{badge}</button>")
        })
        .collect();
    element(
        r,
        "div",
        node,
        "",
        &format!(
            "<div class=\"sv-tab-content\">{content}</div><nav class=\"sv-tabbar\">{bar}</nav>"
        ),
    )
}

fn picker(r: &Renderer<'_>, node: &ViewNode) -> String {
    let label = node
        .prop_str("title")
        .map(escape)
        .or_else(|| prop_markup(r, node, "label"))
        .unwrap_or_default();
    let options: Vec<String> = rows(r, &node.children)
        .iter()
        .map(|option| escape(&plain_text(option).unwrap_or_default()))
        .collect();
    let control = if style_token(node, "pickerStyle") == Some("segmented") {
        let segments: String = options
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let active = if i == 0 { " sv-segment-active" } else { "" };
                format!("<button type=\"button\" class=\"sv-segment{active}\">{text}</button>")
            })
            .collect();
        format!("<div class=\"sv-segmented\" role=\"radiogroup\">{segments}</div>")
    } else {
        let items: String = options
            .iter()
            .map(|text| format!("<option>{text}</option>"))
            .collect();
        format!("<select>{items}</select>")
    };
    element(
        r,
        "label",
        node,
        "",
        &format!("<span class=\"sv-picker-label\">{label}</span>{control}"),
    )
}

fn image(r: &Renderer<'_>, node: &ViewNode) -> String {
    if let Some(symbol) = node.prop_str("systemName") {
        let start = open(r, "span", node, "sv-symbol");
        return format!(
            "{start} role=\"img\" aria-label=\"{}\">{}</span>",
            escape(symbol),
            palette::symbol(symbol)
        );
    }
    let name = prop_text(node, "name").unwrap_or_default();
    let start = open(r, "div", node, "sv-image-asset");
    format!(
        "{start} role=\"img\" aria-label=\"{0}\">{0}</div>",
        escape(&name)
    )
}

fn progress(r: &Renderer<'_>, node: &ViewNode) -> String {
    let label = node.prop_str("title").map(escape).unwrap_or_default();
    let Some(value) = node.prop_f64("value") else {
        let start = open(r, "div", node, "sv-progress-spinner");
        return format!(
            "{start} role=\"progressbar\"><span class=\"sv-spinner\"></span>{label}</div>"
        );
    };
    let total = node
        .prop_f64("total")
        .or_else(|| node.prop_range("range").map(|range| range.end as f64))
        .unwrap_or(1.0);
    let bar = format!(
        "<progress max=\"{}\" value=\"{}\"></progress>",
        fmt_num(total),
        fmt_num(value)
    );
    element(r, "div", node, "", &format!("{label}{bar}"))
}
