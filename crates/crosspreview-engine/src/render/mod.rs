//! HTML rendering of a view tree.
//!
//! Rendering is pure and total: every node kind produces markup, unknown
//! kinds degrade to a placeholder, and no input makes it fail. Text taken
//! from the source is escaped exactly once, at the point of insertion.

pub mod page;
pub mod palette;
pub mod style;
pub mod views;

use crate::models::{ModifierArgs, ViewNode};

pub use page::render_page;

/// Page chrome colours for [`render_page`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Padding applied by `.padding()` with no amount.
    pub default_padding: f64,
    /// Gap between stack children when no `spacing:` is given.
    pub default_spacing: f64,
    /// Upper bound on the rows produced by one `ForEach`.
    pub max_repeat: usize,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_padding: 8.0,
            default_spacing: 8.0,
            max_repeat: 500,
            theme: Theme::Light,
        }
    }
}

/// Render a tree with default options.
pub fn render(root: &ViewNode) -> String {
    render_with(root, &RenderOptions::default())
}

pub fn render_with(root: &ViewNode, options: &RenderOptions) -> String {
    Renderer::new(options).node(root)
}

/// A diagnostic block listing `errors`, or an empty string when there are
/// none.
pub fn render_error_banner(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let heading = if errors.len() == 1 {
        "1 problem".to_string()
    } else {
        format!("{} problems", errors.len())
    };
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!(
        "<div class=\"sv-error-banner\" role=\"alert\"><strong class=\"sv-error-heading\">Preview: {heading}</strong><ul>{items}</ul></div>"
    )
}

/// Escape `&`, `<`, `>` and `"` for text and attribute positions.
pub(crate) fn escape(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// A number as CSS expects it: at most three decimals, no trailing zeros.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

pub struct Renderer<'a> {
    options: &'a RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// Markup for `node` and its subtree, including modifier wrappers.
    pub fn node(&self, node: &ViewNode) -> String {
        let base = views::markup(self, node);
        self.wrap(node, base)
    }

    pub fn nodes<'n>(&self, nodes: impl IntoIterator<Item = &'n ViewNode>) -> String {
        nodes.into_iter().map(|n| self.node(n)).collect()
    }

    /// Apply structural modifiers in chain order; each one wraps the
    /// markup built so far.
    fn wrap(&self, node: &ViewNode, mut html: String) -> String {
        for modifier in &node.modifiers {
            html = match (modifier.name.as_str(), &modifier.args) {
                ("overlay", ModifierArgs::Content(content)) => layered(
                    &html,
                    &self.node(&content.view),
                    content.alignment.as_deref(),
                    Layer::Above,
                ),
                ("overlay", ModifierArgs::Paint(paint)) => layered(
                    &html,
                    &format!(
                        "<div class=\"sv-fill\" style=\"width: 100%; height: 100%; background: {}\"></div>",
                        palette::paint(paint)
                    ),
                    None,
                    Layer::Above,
                ),
                ("background", ModifierArgs::Content(content)) => layered(
                    &html,
                    &self.node(&content.view),
                    content.alignment.as_deref(),
                    Layer::Below,
                ),
                ("badge", args) => match badge_text(args) {
                    Some(text) => format!(
                        "<div class=\"sv-badged\">{html}<span class=\"sv-badge\">{text}</span></div>"
                    ),
                    None => html,
                },
                ("searchable", ModifierArgs::Flag(true)) => format!(
                    "<div class=\"sv-searchable\"><input type=\"search\" class=\"sv-search\" placeholder=\"Search\">{html}</div>"
                ),
                _ => html,
            };
        }
        html
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Layer {
    Above,
    Below,
}

/// Stack `layer` on the same grid cell as `base`.
fn layered(base: &str, layer: &str, alignment: Option<&str>, position: Layer) -> String {
    let base = format!("<div class=\"sv-layer-base\" style=\"grid-area: 1 / 1\">{base}</div>");
    let extra = match position {
        Layer::Above => format!(
            "<div class=\"sv-overlay\" style=\"grid-area: 1 / 1; place-self: {}; pointer-events: none\">{layer}</div>",
            style::place(alignment)
        ),
        Layer::Below => format!(
            "<div class=\"sv-underlay\" style=\"grid-area: 1 / 1; place-self: {}; z-index: -1\">{layer}</div>",
            style::place(alignment)
        ),
    };
    let inner = match position {
        Layer::Above => format!("{base}{extra}"),
        Layer::Below => format!("{extra}{base}"),
    };
    format!("<div class=\"sv-layered\" style=\"display: grid; position: relative; isolation: isolate\">{inner}</div>")
}

/// The visible text of a `badge` modifier.
pub(crate) fn badge_text(args: &ModifierArgs) -> Option<String> {
    match args {
        ModifierArgs::Text(text) if !text.is_empty() => Some(escape(text)),
        ModifierArgs::Number(n) if *n != 0.0 => Some(fmt_num(*n)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Content, Modifier, Paint, ViewKind};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(12.0, "12")]
    #[case(0.5, "0.5")]
    #[case(1.0 / 3.0, "0.333")]
    #[case(-0.0001, "0")]
    #[case(-4.25, "-4.25")]
    fn numbers(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(fmt_num(value), expected);
    }

    #[test]
    fn text_is_escaped_once() {
        let node = ViewNode::text("<b>&\"x\"</b>");
        let first = render(&node);
        let second = render(&node);
        assert!(first.contains("&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;"));
        assert!(!first.contains("&amp;lt;"));
        assert_eq!(first, second);
    }

    #[test]
    fn banner_is_empty_without_errors() {
        assert_eq!(render_error_banner(&[]), "");
    }

    #[test]
    fn banner_lists_escaped_errors() {
        let banner = render_error_banner(&["bad <thing>".to_string(), "worse".to_string()]);
        assert!(banner.contains("role=\"alert\""));
        assert!(banner.contains("2 problems"));
        assert!(banner.contains("<li>bad &lt;thing&gt;</li><li>worse</li>"));
    }

    #[test]
    fn overlay_renders_on_top_without_pointer_events() {
        let node = ViewNode::new(ViewKind::Circle).with_modifier(Modifier::new(
            "overlay",
            ModifierArgs::Content(Content {
                view: Box::new(ViewNode::text("3")),
                alignment: None,
            }),
        ));
        let html = render(&node);
        let base = html.find("sv-circle").unwrap_or(usize::MAX);
        let overlay = html.find("sv-overlay").unwrap_or(0);
        assert!(base < overlay);
        assert!(html.contains("place-self: center center; pointer-events: none"));
    }

    #[test]
    fn background_view_renders_behind() {
        let node = ViewNode::text("x").with_modifier(Modifier::new(
            "background",
            ModifierArgs::Content(Content {
                view: Box::new(ViewNode::new(ViewKind::Capsule)),
                alignment: None,
            }),
        ));
        let html = render(&node);
        assert!(html.find("sv-underlay") < html.find("sv-layer-base"));
    }

    #[test]
    fn overlay_color_fills_the_cell() {
        let node = ViewNode::new(ViewKind::Rectangle)
            .with_modifier(Modifier::new("overlay", ModifierArgs::Paint(Paint::color("red"))));
        assert!(render(&node).contains("background: #ff3b30\"></div>"));
    }

    #[test]
    fn badge_and_search_wrap_the_view() {
        let node = ViewNode::new(ViewKind::List)
            .with_modifier(Modifier::new("badge", ModifierArgs::Number(5.0)))
            .with_modifier(Modifier::new("searchable", ModifierArgs::Flag(true)));
        let html = render(&node);
        assert!(html.starts_with("<div class=\"sv-searchable\"><input type=\"search\""));
        assert!(html.contains("<span class=\"sv-badge\">5</span>"));
    }
}
