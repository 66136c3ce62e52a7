//! Inline style emission.
//!
//! A node's style is its kind's base declarations followed by one group of
//! declarations per modifier, in chain order. Later declarations of the
//! same property win, which is how modifier precedence is expressed.

use super::{RenderOptions, escape, fmt_num, palette};
use crate::models::{Dimension, Edges, FontSpec, ModifierArgs, Paint, PropValue, ViewKind, ViewNode};

#[derive(Debug, Default)]
pub struct Style {
    decls: Vec<(&'static str, String)>,
    filters: Vec<String>,
}

impl Style {
    pub fn push(&mut self, property: &'static str, value: impl Into<String>) {
        self.decls.push((property, value.into()));
    }

    pub fn px(&mut self, property: &'static str, value: f64) {
        self.push(property, format!("{}px", fmt_num(value)));
    }

    /// Adds a filter function, replacing an earlier one of the same name.
    fn filter(&mut self, function: String) {
        let name = function.split('(').next().unwrap_or_default().to_string();
        self.filters
            .retain(|existing| existing.split('(').next() != Some(name.as_str()));
        self.filters.push(function);
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty() && self.filters.is_empty()
    }

    pub fn to_css(&self) -> String {
        let mut parts: Vec<String> = self
            .decls
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect();
        if !self.filters.is_empty() {
            parts.push(format!("filter: {}", self.filters.join(" ")));
        }
        parts.join("; ")
    }
}

fn flex_alignment(token: Option<&str>) -> &'static str {
    match token {
        Some("leading" | "top" | "topLeading" | "firstTextBaseline") => "flex-start",
        Some("trailing" | "bottom" | "bottomTrailing" | "lastTextBaseline") => "flex-end",
        _ => "center",
    }
}

/// `justify-content` and `align-items` for a two-dimensional alignment.
fn grid_alignment(token: Option<&str>) -> (&'static str, &'static str) {
    let token = token.unwrap_or("center");
    let vertical = if token.starts_with("top") {
        "flex-start"
    } else if token.starts_with("bottom") {
        "flex-end"
    } else {
        "center"
    };
    let lower = token.to_ascii_lowercase();
    let horizontal = if lower.ends_with("leading") {
        "flex-start"
    } else if lower.ends_with("trailing") {
        "flex-end"
    } else {
        "center"
    };
    (horizontal, vertical)
}

/// `place-items` equivalent for `ZStack` and overlay alignment.
pub fn place(token: Option<&str>) -> String {
    let (horizontal, vertical) = grid_alignment(token);
    let css = |v: &str| match v {
        "flex-start" => "start",
        "flex-end" => "end",
        _ => "center",
    };
    format!("{} {}", css(vertical), css(horizontal))
}

/// Declarations every node of a kind starts with.
pub fn base_style(node: &ViewNode, options: &RenderOptions) -> Style {
    let mut style = Style::default();
    let spacing = node.prop_f64("spacing").unwrap_or(options.default_spacing);
    match node.kind {
        ViewKind::VStack | ViewKind::LazyVStack => {
            style.push("display", "flex");
            style.push("flex-direction", "column");
            style.push("align-items", flex_alignment(node.prop_str("alignment")));
            style.px("gap", spacing);
        }
        ViewKind::HStack | ViewKind::LazyHStack | ViewKind::GridRow => {
            style.push("display", "flex");
            style.push("flex-direction", "row");
            style.push("align-items", flex_alignment(node.prop_str("alignment")));
            style.px("gap", spacing);
        }
        ViewKind::Grid => {
            style.push("display", "flex");
            style.push("flex-direction", "column");
            style.px("gap", spacing);
        }
        ViewKind::ZStack => {
            style.push("display", "grid");
            style.push("place-items", place(node.prop_str("alignment")));
        }
        ViewKind::ScrollView => {
            let horizontal = node.prop_str("axis") == Some("horizontal");
            style.push("display", "flex");
            style.push("flex-direction", if horizontal { "row" } else { "column" });
            style.push(if horizontal { "overflow-x" } else { "overflow-y" }, "auto");
            style.px("gap", spacing);
        }
        ViewKind::Spacer => {
            style.push("flex", "1 1 0");
            match node.prop_f64("minLength") {
                Some(min) => {
                    style.px("min-width", min);
                    style.px("min-height", min);
                }
                None => style.px("min-width", options.default_spacing),
            }
        }
        ViewKind::Group | ViewKind::ForEach => {
            if node.modifiers.is_empty() && node.prop("placeholder").is_none() {
                style.push("display", "contents");
            } else {
                style.push("display", "flex");
                style.push("flex-direction", "column");
                style.px("gap", spacing);
            }
        }
        ViewKind::Text => {
            style.push("font-size", "17px");
        }
        ViewKind::Rectangle
        | ViewKind::Circle
        | ViewKind::RoundedRectangle
        | ViewKind::Capsule
        | ViewKind::Ellipse => {
            style.push("background", "#000000");
            style.push("flex", "1 1 auto");
            style.push("align-self", "stretch");
            style.px("min-width", 20.0);
            style.px("min-height", 20.0);
            match node.kind {
                ViewKind::Circle => {
                    style.push("border-radius", "50%");
                    style.push("aspect-ratio", "1");
                }
                ViewKind::Ellipse => style.push("border-radius", "50%"),
                ViewKind::Capsule => style.push("border-radius", "9999px"),
                ViewKind::RoundedRectangle => {
                    style.px("border-radius", node.prop_f64("cornerRadius").unwrap_or(0.0));
                }
                _ => {}
            }
        }
        ViewKind::LinearGradient | ViewKind::RadialGradient => {
            let colors = node.prop_list("colors").unwrap_or(&[]);
            let background = if node.kind == ViewKind::LinearGradient {
                palette::linear_gradient(colors, node.prop_str("startPoint"), node.prop_str("endPoint"))
            } else {
                palette::radial_gradient(colors)
            };
            style.push("background", background);
            style.push("flex", "1 1 auto");
            style.push("align-self", "stretch");
            style.px("min-height", 20.0);
        }
        ViewKind::GeometryReader => {
            style.push("display", "flex");
            style.push("flex-direction", "column");
            style.push("width", "100%");
            style.push("height", "100%");
        }
        _ => {}
    }
    style
}

fn dimension(style: &mut Style, property: &'static str, dim: Option<Dimension>, fill: &'static str) {
    match dim {
        Some(Dimension::Fixed(v)) => style.px(property, v),
        Some(Dimension::Infinity) => {
            style.push(fill, "100%");
            if property.starts_with("max") {
                style.push(property, "none");
            }
        }
        None => {}
    }
}

fn font(style: &mut Style, spec: &FontSpec) {
    if let Some(text_style) = &spec.style {
        let (size, weight) = palette::text_style(text_style);
        style.px("font-size", size);
        style.push("font-weight", weight.to_string());
    }
    if let Some(size) = spec.size {
        style.px("font-size", size);
    }
    if let Some(weight) = &spec.weight {
        style.push("font-weight", palette::font_weight(weight).to_string());
    }
    if let Some(design) = &spec.design {
        style.push("font-family", palette::font_design(design));
    }
    if let Some(family) = &spec.family {
        style.push("font-family", format!("'{}', sans-serif", escape(family).replace('\'', "")));
    }
}

fn foreground(style: &mut Style, node: &ViewNode, paint: &Paint) {
    let css = palette::paint(paint);
    if node.kind.is_shape() {
        style.push("background", css);
        return;
    }
    match paint {
        Paint::LinearGradient { .. } | Paint::RadialGradient { .. } => {
            style.push("background", css);
            style.push("-webkit-background-clip", "text");
            style.push("background-clip", "text");
            style.push("color", "transparent");
        }
        _ => style.push("color", css),
    }
}

fn background(style: &mut Style, paint: &Paint) {
    style.push("background", palette::paint(paint));
    if let Paint::Material { name } = paint {
        let (_, blur) = palette::material(name);
        style.push("backdrop-filter", format!("blur({blur}px)"));
        style.push("-webkit-backdrop-filter", format!("blur({blur}px)"));
    }
}

fn stroke_paint(paint: Option<&Paint>) -> String {
    paint.map_or_else(|| "currentColor".to_string(), palette::paint)
}

fn flag_on(args: &ModifierArgs) -> bool {
    !matches!(args, ModifierArgs::Flag(false))
}

/// Append the declarations of every modifier on `node`.
pub fn modifier_style(style: &mut Style, node: &ViewNode, options: &RenderOptions) {
    for modifier in &node.modifiers {
        let args = &modifier.args;
        match (modifier.name.as_str(), args) {
            ("padding", ModifierArgs::Padding(padding)) => {
                let amount = padding.amount.unwrap_or(options.default_padding);
                for edge in &padding.edges {
                    match edge {
                        Edges::All => style.px("padding", amount),
                        Edges::Top => style.px("padding-top", amount),
                        Edges::Bottom => style.px("padding-bottom", amount),
                        Edges::Leading => style.px("padding-left", amount),
                        Edges::Trailing => style.px("padding-right", amount),
                        Edges::Horizontal => {
                            style.px("padding-left", amount);
                            style.px("padding-right", amount);
                        }
                        Edges::Vertical => {
                            style.px("padding-top", amount);
                            style.px("padding-bottom", amount);
                        }
                    }
                }
            }
            ("foregroundColor" | "foregroundStyle", ModifierArgs::Paint(paint)) => {
                foreground(style, node, paint)
            }
            ("tint" | "accentColor", ModifierArgs::Paint(paint)) => {
                let css = palette::paint(paint);
                style.push("accent-color", css.clone());
                style.push("--tint", css);
            }
            ("fill", ModifierArgs::Paint(paint)) => style.push("background", palette::paint(paint)),
            ("background", ModifierArgs::Paint(paint)) => background(style, paint),
            ("stroke" | "strokeBorder", ModifierArgs::Stroke(stroke)) => {
                style.push("background", "transparent");
                style.push(
                    "border",
                    format!(
                        "{}px solid {}",
                        fmt_num(stroke.width.unwrap_or(1.0)),
                        stroke_paint(stroke.paint.as_ref())
                    ),
                );
            }
            ("border", ModifierArgs::Border(stroke)) => style.push(
                "border",
                format!(
                    "{}px solid {}",
                    fmt_num(stroke.width.unwrap_or(1.0)),
                    stroke_paint(stroke.paint.as_ref())
                ),
            ),
            ("font", ModifierArgs::Font(spec)) => font(style, spec),
            ("fontWeight", ModifierArgs::Token(weight)) => {
                style.push("font-weight", palette::font_weight(weight).to_string())
            }
            ("bold", _) => style.push("font-weight", if flag_on(args) { "700" } else { "400" }),
            ("italic", _) => style.push("font-style", if flag_on(args) { "italic" } else { "normal" }),
            ("underline", _) if flag_on(args) => style.push("text-decoration", "underline"),
            ("strikethrough", _) if flag_on(args) => style.push("text-decoration", "line-through"),
            ("monospaced", _) if flag_on(args) => {
                style.push("font-family", palette::font_design("monospaced"))
            }
            ("multilineTextAlignment", ModifierArgs::Token(align)) => style.push(
                "text-align",
                match align.as_str() {
                    "leading" => "left",
                    "trailing" => "right",
                    _ => "center",
                },
            ),
            ("textCase", ModifierArgs::Token(case)) => style.push(
                "text-transform",
                match case.as_str() {
                    "uppercase" => "uppercase",
                    "lowercase" => "lowercase",
                    _ => "none",
                },
            ),
            ("lineLimit", ModifierArgs::Number(lines)) => {
                style.push("display", "-webkit-box");
                style.push("-webkit-line-clamp", fmt_num(*lines));
                style.push("-webkit-box-orient", "vertical");
                style.push("overflow", "hidden");
            }
            ("kerning" | "tracking", ModifierArgs::Number(v)) => style.px("letter-spacing", *v),
            ("lineSpacing", ModifierArgs::Number(v)) => {
                style.push("line-height", format!("calc(1.2em + {}px)", fmt_num(*v)))
            }
            ("cornerRadius", ModifierArgs::Number(v)) => {
                style.px("border-radius", *v);
                style.push("overflow", "hidden");
            }
            ("opacity", ModifierArgs::Number(v)) => style.push("opacity", fmt_num(*v)),
            ("frame", ModifierArgs::Frame(frame)) => {
                dimension(style, "width", frame.width, "width");
                dimension(style, "height", frame.height, "height");
                dimension(style, "min-width", frame.min_width, "min-width");
                dimension(style, "max-width", frame.max_width, "width");
                dimension(style, "min-height", frame.min_height, "min-height");
                dimension(style, "max-height", frame.max_height, "height");
                if matches!(frame.width, Some(Dimension::Fixed(_)))
                    || matches!(frame.height, Some(Dimension::Fixed(_)))
                {
                    style.push("flex-shrink", "0");
                }
                if frame.alignment.is_some() {
                    let (horizontal, vertical) = grid_alignment(frame.alignment.as_deref());
                    style.push("display", "flex");
                    style.push("justify-content", horizontal);
                    style.push("align-items", vertical);
                }
            }
            ("offset", ModifierArgs::Point(p)) => style.push(
                "translate",
                format!(
                    "{}px {}px",
                    fmt_num(p.x.unwrap_or(0.0)),
                    fmt_num(p.y.unwrap_or(0.0))
                ),
            ),
            ("position", ModifierArgs::Point(p)) => {
                style.push("position", "absolute");
                style.px("left", p.x.unwrap_or(0.0));
                style.px("top", p.y.unwrap_or(0.0));
                style.push("translate", "-50% -50%");
            }
            ("aspectRatio", ModifierArgs::AspectRatio(ratio)) => {
                if let Some(r) = ratio.ratio {
                    style.push("aspect-ratio", fmt_num(r));
                }
                match ratio.mode.as_deref() {
                    Some("fit") => style.push("object-fit", "contain"),
                    Some("fill") => style.push("object-fit", "cover"),
                    _ => {}
                }
            }
            ("scaledToFit", _) => style.push("object-fit", "contain"),
            ("scaledToFill", _) => style.push("object-fit", "cover"),
            ("rotationEffect", ModifierArgs::Angle(angle)) => {
                style.push("rotate", format!("{}deg", fmt_num(angle.to_degrees())))
            }
            ("hueRotation", ModifierArgs::Angle(angle)) => {
                style.filter(format!("hue-rotate({}deg)", fmt_num(angle.to_degrees())))
            }
            ("scaleEffect", ModifierArgs::Number(s)) => style.push("scale", fmt_num(*s)),
            ("scaleEffect", ModifierArgs::Point(p)) => style.push(
                "scale",
                format!(
                    "{} {}",
                    fmt_num(p.x.unwrap_or(1.0)),
                    fmt_num(p.y.unwrap_or(1.0))
                ),
            ),
            ("blur", ModifierArgs::Number(r)) => style.filter(format!("blur({}px)", fmt_num(*r))),
            ("brightness", ModifierArgs::Number(v)) => {
                style.filter(format!("brightness({})", fmt_num(1.0 + v)))
            }
            ("contrast", ModifierArgs::Number(v)) => style.filter(format!("contrast({})", fmt_num(*v))),
            ("saturation", ModifierArgs::Number(v)) => style.filter(format!("saturate({})", fmt_num(*v))),
            ("grayscale", ModifierArgs::Number(v)) => style.filter(format!("grayscale({})", fmt_num(*v))),
            ("shadow", ModifierArgs::Shadow(shadow)) => {
                let color = shadow
                    .color
                    .as_ref()
                    .map_or_else(|| "rgba(0, 0, 0, 0.33)".to_string(), palette::paint);
                let value = format!(
                    "{}px {}px {}px {}",
                    fmt_num(shadow.x.unwrap_or(0.0)),
                    fmt_num(shadow.y.unwrap_or(0.0)),
                    fmt_num(shadow.radius.unwrap_or(0.0)),
                    color
                );
                let property = if node.kind == ViewKind::Text { "text-shadow" } else { "box-shadow" };
                style.push(property, value);
            }
            ("clipShape", ModifierArgs::ClipShape(clip)) => {
                let radius = match clip.shape.as_str() {
                    "Circle" | "Ellipse" => "50%".to_string(),
                    "Capsule" => "9999px".to_string(),
                    "RoundedRectangle" => format!("{}px", fmt_num(clip.corner_radius.unwrap_or(0.0))),
                    _ => "0".to_string(),
                };
                style.push("border-radius", radius);
                style.push("overflow", "hidden");
            }
            ("clipped", _) if flag_on(args) => style.push("overflow", "hidden"),
            ("zIndex", ModifierArgs::Number(z)) => {
                style.push("position", "relative");
                style.push("z-index", fmt_num(*z));
            }
            ("layoutPriority", ModifierArgs::Number(p)) if *p > 0.0 => {
                style.push("flex-shrink", "0")
            }
            ("disabled", _) if flag_on(args) => {
                style.push("opacity", "0.5");
                style.push("pointer-events", "none");
            }
            ("hidden", _) if flag_on(args) => style.push("visibility", "hidden"),
            ("fixedSize", _) if flag_on(args) => {
                style.push("flex-shrink", "0");
                style.push("white-space", "nowrap");
            }
            ("onTapGesture" | "onLongPressGesture", _) => style.push("cursor", "pointer"),
            _ => {}
        }
    }
}

/// The full inline style of a node.
pub fn node_style(node: &ViewNode, options: &RenderOptions) -> String {
    let mut style = base_style(node, options);
    modifier_style(&mut style, node, options);
    style.to_css()
}

/// Extra attributes from accessibility and help modifiers, each with a
/// leading space.
pub fn attributes(node: &ViewNode) -> String {
    let mut attrs = String::new();
    for modifier in &node.modifiers {
        let ModifierArgs::Text(text) = &modifier.args else {
            continue;
        };
        let attribute = match modifier.name.as_str() {
            "accessibilityLabel" => "aria-label",
            "accessibilityHint" => "aria-description",
            "accessibilityValue" => "aria-valuetext",
            "help" => "title",
            _ => continue,
        };
        attrs.push_str(&format!(" {attribute}=\"{}\"", escape(text)));
    }
    if node.modifier("hidden").is_some_and(|m| flag_on(&m.args)) {
        attrs.push_str(" aria-hidden=\"true\"");
    }
    attrs
}

/// A text-valued property, whether written as a literal or as a view.
pub fn prop_text(node: &ViewNode, key: &str) -> Option<String> {
    match node.prop(key)? {
        PropValue::Text(s) | PropValue::Token(s) => Some(s.clone()),
        PropValue::Node(view) => plain_text(view),
        _ => None,
    }
}

/// The first text content found in a subtree.
pub fn plain_text(node: &ViewNode) -> Option<String> {
    if let Some(text) = node.prop_str("text").or_else(|| node.prop_str("title")) {
        return Some(text.to_string());
    }
    node.children.iter().find_map(plain_text)
}
