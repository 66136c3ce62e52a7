//! Modifier argument interpretation.
//!
//! Each recognised modifier name maps to one [`ModifierArgs`] category.
//! Unknown names are preserved with no arguments; known names whose
//! arguments cannot be read yield an [`ArgError`].

use std::sync::OnceLock;

use regex::Regex;

use super::args::{self, Arg, CallArgs};
use crate::error::ArgError;
use crate::models::{
    Angle, AspectRatio, ClipShape, Content, Dimension, Edges, FontSpec, FrameSpec, ModifierArgs,
    Padding, Paint, Point, Shadow, Stroke, ViewKind, ViewNode,
};

const PAINT: &[&str] = &["foregroundColor", "foregroundStyle", "tint", "accentColor", "fill"];

const TOKEN: &[&str] = &[
    "fontWeight",
    "multilineTextAlignment",
    "textCase",
    "textFieldStyle",
    "buttonStyle",
    "listStyle",
    "pickerStyle",
    "toggleStyle",
    "navigationBarTitleDisplayMode",
    "animation",
    "transition",
];

const NUMBER: &[&str] = &[
    "cornerRadius",
    "opacity",
    "lineLimit",
    "kerning",
    "tracking",
    "lineSpacing",
    "brightness",
    "contrast",
    "saturation",
    "grayscale",
    "scaleEffect",
    "zIndex",
    "layoutPriority",
    "blur",
];

const TEXT: &[&str] = &[
    "navigationTitle",
    "accessibilityLabel",
    "accessibilityHint",
    "accessibilityValue",
    "help",
];

const FLAG: &[&str] = &[
    "bold",
    "italic",
    "underline",
    "strikethrough",
    "clipped",
    "onTapGesture",
    "onLongPressGesture",
    "disabled",
    "onAppear",
    "onDisappear",
    "hidden",
    "scaledToFit",
    "scaledToFill",
    "fixedSize",
    "ignoresSafeArea",
    "edgesIgnoringSafeArea",
    "toolbar",
    "searchable",
    "monospaced",
];

const CONTENT: &[&str] = &["overlay", "mask", "tabItem"];

const MATERIALS: &[&str] = &[
    "ultraThinMaterial",
    "thinMaterial",
    "regularMaterial",
    "thickMaterial",
    "ultraThickMaterial",
    "bar",
];

/// Modifiers whose arguments may be views, such as `.overlay(Circle())`.
pub fn argument_takes_view(name: &str) -> bool {
    matches!(name, "overlay" | "background" | "mask")
}

/// Modifiers whose trailing closure builds a view.
pub fn closure_takes_view(name: &str) -> bool {
    matches!(name, "overlay" | "background" | "mask" | "tabItem")
}

/// Interpret the arguments of modifier `name`.
pub fn interpret(name: &str, args: &CallArgs) -> Result<ModifierArgs, ArgError> {
    if PAINT.contains(&name) {
        return first_arg(args)
            .and_then(|a| paint(&a.text))
            .map(ModifierArgs::Paint)
            .ok_or_else(|| ArgError::missing(name, "a color or style"));
    }
    if TOKEN.contains(&name) {
        return first_arg(args)
            .and_then(|a| args::enum_token(&a.text))
            .map(|token| ModifierArgs::Token(normalize_style(&token)))
            .ok_or_else(|| ArgError::missing(name, "a style token"));
    }
    if NUMBER.contains(&name) {
        return numeric(name, args);
    }
    if TEXT.contains(&name) {
        return first_arg(args)
            .and_then(text_value)
            .map(ModifierArgs::Text)
            .ok_or_else(|| ArgError::missing(name, "a string"));
    }
    if FLAG.contains(&name) {
        let flag = args
            .first_unlabeled()
            .and_then(|a| args::bool_literal(&a.text))
            .unwrap_or(true);
        return Ok(ModifierArgs::Flag(flag));
    }
    match name {
        "padding" => padding(args),
        "background" => background(args),
        "overlay" => match content(args) {
            Some(content) => Ok(ModifierArgs::Content(content)),
            None => first_arg(args)
                .and_then(|a| paint(&a.text))
                .map(ModifierArgs::Paint)
                .ok_or_else(|| ArgError::missing(name, "a view")),
        },
        "mask" | "tabItem" => content(args)
            .map(ModifierArgs::Content)
            .ok_or_else(|| ArgError::missing(name, "a view")),
        "stroke" | "strokeBorder" => Ok(ModifierArgs::Stroke(Stroke {
            paint: args.first_unlabeled().and_then(|a| paint(&a.text)),
            width: args.labeled_number("lineWidth"),
        })),
        "border" => {
            let paint = args
                .first_unlabeled()
                .and_then(|a| paint(&a.text))
                .ok_or_else(|| ArgError::missing(name, "a color"))?;
            Ok(ModifierArgs::Border(Stroke {
                paint: Some(paint),
                width: args.labeled_number("width"),
            }))
        }
        "font" => first_arg(args)
            .map(|a| font(&a.text))
            .filter(|spec| !spec.is_empty())
            .map(ModifierArgs::Font)
            .ok_or_else(|| ArgError::missing(name, "a font")),
        "frame" => frame(args),
        "offset" | "position" => point(args)
            .map(ModifierArgs::Point)
            .ok_or_else(|| ArgError::missing(name, "an x or y value")),
        "aspectRatio" => aspect_ratio(args),
        "rotationEffect" | "hueRotation" => first_arg(args)
            .and_then(|a| angle(&a.text))
            .map(ModifierArgs::Angle)
            .ok_or_else(|| ArgError::missing(name, "an angle")),
        "shadow" => shadow(args),
        "clipShape" => first_arg(args)
            .and_then(|a| clip_shape(&a.text))
            .map(ModifierArgs::ClipShape)
            .ok_or_else(|| ArgError::missing(name, "a shape")),
        "badge" => match first_arg(args) {
            Some(arg) if arg.is_string_literal() => Ok(ModifierArgs::Text(
                args::string_literal(&arg.text).unwrap_or_default(),
            )),
            Some(arg) => args::number(&arg.text)
                .map(ModifierArgs::Number)
                .ok_or_else(|| ArgError::missing(name, "a number or string")),
            None => Err(ArgError::missing(name, "a number or string")),
        },
        _ => Ok(ModifierArgs::None),
    }
}

fn first_arg(args: &CallArgs) -> Option<&Arg> {
    args.first_unlabeled().or_else(|| args.values.first())
}

fn text_value(arg: &Arg) -> Option<String> {
    if arg.is_string_literal() {
        args::string_literal(&arg.text)
    } else {
        let text = arg.text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

fn numeric(name: &str, args: &CallArgs) -> Result<ModifierArgs, ArgError> {
    let arg = first_arg(args);
    if name == "lineLimit" && arg.is_some_and(|a| a.text.trim() == "nil") {
        return Ok(ModifierArgs::None);
    }
    if name == "scaleEffect" && (args.labeled("x").is_some() || args.labeled("y").is_some()) {
        return Ok(ModifierArgs::Point(Point {
            x: args.labeled_number("x"),
            y: args.labeled_number("y"),
        }));
    }
    arg.and_then(|a| args::number(&a.text))
        .map(ModifierArgs::Number)
        .ok_or_else(|| ArgError::missing(name, "a number"))
}

fn padding(args: &CallArgs) -> Result<ModifierArgs, ArgError> {
    let mut edges = Vec::new();
    let mut amount = None;
    for arg in args.unlabeled() {
        let text = arg.text.trim();
        if text.starts_with('[') {
            edges.extend(
                args::list_items(text)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|t| Edges::from_token(t)),
            );
        } else if text.starts_with('.') {
            let edge = args::enum_token(text).and_then(|t| Edges::from_token(&t));
            match edge {
                Some(edge) => edges.push(edge),
                None => return Err(ArgError::missing("padding", "an edge set or a number")),
            }
        } else if let Some(n) = args::number(text) {
            amount = Some(n);
        } else {
            return Err(ArgError::missing("padding", "an edge set or a number"));
        }
    }
    if edges.is_empty() {
        edges.push(Edges::All);
    }
    Ok(ModifierArgs::Padding(Padding { edges, amount }))
}

fn background(args: &CallArgs) -> Result<ModifierArgs, ArgError> {
    let alignment = args.labeled_token("alignment");
    if let Some(view) = single_view(args.trailing.clone()) {
        return Ok(ModifierArgs::Content(Content {
            view: Box::new(view),
            alignment,
        }));
    }
    let arg = first_arg(args).ok_or_else(|| ArgError::missing("background", "a color or view"))?;
    if is_gradient(&arg.text) {
        if let Some(paint) = paint(&arg.text) {
            return Ok(ModifierArgs::Paint(paint));
        }
    }
    if let Some(view) = &arg.view {
        return Ok(ModifierArgs::Content(Content {
            view: Box::new(view.clone()),
            alignment,
        }));
    }
    paint(&arg.text)
        .map(ModifierArgs::Paint)
        .ok_or_else(|| ArgError::missing("background", "a color or view"))
}

fn content(args: &CallArgs) -> Option<Content> {
    let view = single_view(args.trailing.clone())
        .or_else(|| args.values.iter().find_map(|a| a.view.clone()))?;
    Some(Content {
        view: Box::new(view),
        alignment: args.labeled_token("alignment"),
    })
}

fn single_view(mut views: Vec<ViewNode>) -> Option<ViewNode> {
    match views.len() {
        0 => None,
        1 => views.pop(),
        _ => Some(ViewNode::new(ViewKind::ZStack).with_children(views)),
    }
}

fn is_gradient(text: &str) -> bool {
    let text = text.trim().trim_start_matches('.');
    text.starts_with("LinearGradient")
        || text.starts_with("RadialGradient")
        || text.starts_with("AngularGradient")
        || text.starts_with("linearGradient")
        || text.starts_with("radialGradient")
}

fn opacity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\.opacity\(\s*(-?\d+(?:\.\d+)?)\s*\)").expect("Invalid opacity regex")
    })
}

/// Read a color, material or gradient expression.
pub fn paint(text: &str) -> Option<Paint> {
    let text = text.trim();
    if is_gradient(text) {
        let inner = args::call_inner(text).unwrap_or("");
        let parsed = CallArgs::new(args::parse_arg_list(inner));
        let colors = args::first_list(inner).unwrap_or_default();
        let bare = text.trim_start_matches('.');
        return Some(if bare.starts_with("LinearGradient") || bare.starts_with("linearGradient") {
            Paint::LinearGradient {
                colors,
                start: parsed.labeled_token("startPoint"),
                end: parsed.labeled_token("endPoint"),
            }
        } else {
            Paint::RadialGradient { colors }
        });
    }
    if let Some(rgb) = text.strip_prefix("Color(") {
        if let Some(color) = rgb_color(rgb) {
            return Some(color);
        }
        if let Some(asset) = args::string_literal(rgb) {
            return Some(Paint::color(asset));
        }
    }
    let token = args::enum_token(text)?;
    if MATERIALS.contains(&token.as_str()) {
        return Some(Paint::Material { name: token });
    }
    let opacity = opacity_re()
        .captures(text)
        .and_then(|caps| caps[1].parse().ok());
    Some(Paint::Color {
        name: token,
        opacity,
    })
}

fn rgb_color(inner: &str) -> Option<Paint> {
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    let parsed = CallArgs::new(args::parse_arg_list(inner));
    let channel = |label: &str| -> Option<u8> {
        let v = parsed.labeled_number(label)?.clamp(0.0, 1.0);
        Some((v * 255.0).round() as u8)
    };
    let (r, g, b) = (channel("red")?, channel("green")?, channel("blue")?);
    Some(Paint::Color {
        name: format!("#{r:02x}{g:02x}{b:02x}"),
        opacity: parsed.labeled_number("opacity"),
    })
}

fn weight_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\.weight\(\s*\.([A-Za-z]+)\s*\)|\.(bold)\(\)").expect("Invalid weight regex")
    })
}

/// Read a font expression: a text style, `.system(...)` or `.custom(...)`.
pub fn font(text: &str) -> FontSpec {
    let text = text.trim();
    let bare = text.strip_prefix("Font").unwrap_or(text);
    let mut spec = FontSpec::default();
    if bare.starts_with(".system(") {
        let parsed = CallArgs::new(args::parse_arg_list(args::call_inner(bare).unwrap_or("")));
        spec.size = parsed.labeled_number("size");
        spec.weight = parsed.labeled_token("weight");
        spec.design = parsed.labeled_token("design");
        spec.style = parsed
            .first_unlabeled()
            .and_then(|a| args::enum_token(&a.text));
    } else if bare.starts_with(".custom(") {
        let parsed = CallArgs::new(args::parse_arg_list(args::call_inner(bare).unwrap_or("")));
        spec.family = parsed.first_string();
        spec.size = parsed
            .labeled_number("size")
            .or_else(|| parsed.labeled_number("fixedSize"));
    } else {
        spec.style = args::enum_token(bare);
    }
    if let Some(caps) = weight_suffix_re().captures(bare) {
        spec.weight = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string());
    }
    spec
}

/// `RoundedBorderTextFieldStyle()` and `.roundedBorder` both give `roundedBorder`.
fn normalize_style(token: &str) -> String {
    const SUFFIXES: &[&str] = &[
        "TextFieldStyle",
        "ButtonStyle",
        "ListStyle",
        "PickerStyle",
        "ToggleStyle",
    ];
    let stem = SUFFIXES
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(token);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) if stem != token => first.to_lowercase().chain(chars).collect(),
        _ => token.to_string(),
    }
}

fn dimension(text: &str) -> Option<Dimension> {
    if text.contains("infinity") {
        Some(Dimension::Infinity)
    } else {
        args::number(text).map(Dimension::Fixed)
    }
}

fn frame(args: &CallArgs) -> Result<ModifierArgs, ArgError> {
    let dim = |label: &str| args.labeled(label).and_then(|a| dimension(&a.text));
    let spec = FrameSpec {
        width: dim("width"),
        height: dim("height"),
        min_width: dim("minWidth"),
        max_width: dim("maxWidth"),
        min_height: dim("minHeight"),
        max_height: dim("maxHeight"),
        alignment: args.labeled_token("alignment"),
    };
    if spec.has_dimensions() || spec.alignment.is_some() {
        Ok(ModifierArgs::Frame(spec))
    } else {
        Err(ArgError::missing("frame", "a width or height"))
    }
}

fn point(args: &CallArgs) -> Option<Point> {
    let mut point = Point {
        x: args.labeled_number("x"),
        y: args.labeled_number("y"),
    };
    if point.x.is_none() && point.y.is_none() {
        // offset(CGSize(width:height:))
        let inner = args.first_unlabeled().and_then(|a| args::call_inner(&a.text))?;
        let parsed = CallArgs::new(args::parse_arg_list(inner));
        point = Point {
            x: parsed.labeled_number("width").or_else(|| parsed.labeled_number("x")),
            y: parsed.labeled_number("height").or_else(|| parsed.labeled_number("y")),
        };
    }
    (point.x.is_some() || point.y.is_some()).then_some(point)
}

fn ratio(text: &str) -> Option<f64> {
    match text.split_once('/') {
        Some((num, den)) => {
            let (num, den) = (args::number(num)?, args::number(den)?);
            (den != 0.0).then(|| num / den)
        }
        None => args::number(text),
    }
}

fn aspect_ratio(args: &CallArgs) -> Result<ModifierArgs, ArgError> {
    let mut spec = AspectRatio {
        ratio: None,
        mode: args.labeled_token("contentMode"),
    };
    for arg in args.unlabeled() {
        let text = arg.text.trim();
        if text.starts_with('.') {
            spec.mode = args::enum_token(text);
        } else {
            spec.ratio = ratio(text);
        }
    }
    if spec.ratio.is_none() && spec.mode.is_none() {
        return Err(ArgError::missing("aspectRatio", "a ratio or content mode"));
    }
    Ok(ModifierArgs::AspectRatio(spec))
}

fn angle_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(degrees|radians)\s*[:(]\s*(-?\d+(?:\.\d+)?)").expect("Invalid angle regex")
    })
}

fn angle(text: &str) -> Option<Angle> {
    let caps = angle_re().captures(text)?;
    let value = caps[2].parse().ok()?;
    Some(match &caps[1] {
        "radians" => Angle::Radians(value),
        _ => Angle::Degrees(value),
    })
}

fn shadow(args: &CallArgs) -> Result<ModifierArgs, ArgError> {
    let radius = args
        .labeled_number("radius")
        .or_else(|| args.first_unlabeled().and_then(|a| args::number(&a.text)));
    if radius.is_none() {
        return Err(ArgError::missing("shadow", "a radius"));
    }
    Ok(ModifierArgs::Shadow(Shadow {
        color: args.labeled("color").and_then(|a| paint(&a.text)),
        radius,
        x: args.labeled_number("x"),
        y: args.labeled_number("y"),
    }))
}

fn clip_shape(text: &str) -> Option<ClipShape> {
    let text = text.trim();
    let corner_radius = args::call_inner(text)
        .map(|inner| CallArgs::new(args::parse_arg_list(inner)))
        .and_then(|parsed| parsed.labeled_number("cornerRadius"));
    let shape = if let Some(token) = text.strip_prefix('.') {
        match args::leading_identifier(token)? {
            "circle" => "Circle",
            "capsule" => "Capsule",
            "ellipse" => "Ellipse",
            "rect" | "rectangle" if corner_radius.is_some() => "RoundedRectangle",
            "rect" | "rectangle" => "Rectangle",
            other => return Some(ClipShape {
                shape: other.to_string(),
                corner_radius,
            }),
        }
        .to_string()
    } else {
        args::leading_identifier(text)?.to_string()
    };
    Some(ClipShape {
        shape,
        corner_radius,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::args::parse_arg_list;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(name: &str, inner: &str) -> Result<ModifierArgs, ArgError> {
        interpret(name, &CallArgs::new(parse_arg_list(inner)))
    }

    #[test]
    fn unknown_modifier_has_no_args_and_no_error() {
        assert_eq!(run("glassEffect", ".regular"), Ok(ModifierArgs::None));
    }

    #[rstest]
    #[case("", vec![Edges::All], None)]
    #[case("16", vec![Edges::All], Some(16.0))]
    #[case(".horizontal, 20", vec![Edges::Horizontal], Some(20.0))]
    #[case("[.top, .bottom], 4", vec![Edges::Top, Edges::Bottom], Some(4.0))]
    fn padding_forms(#[case] inner: &str, #[case] edges: Vec<Edges>, #[case] amount: Option<f64>) {
        assert_eq!(
            run("padding", inner),
            Ok(ModifierArgs::Padding(Padding { edges, amount }))
        );
    }

    #[rstest]
    #[case(".blue", Paint::color("blue"))]
    #[case("Color.red", Paint::color("red"))]
    #[case(".blue.opacity(0.5)", Paint::Color { name: "blue".into(), opacity: Some(0.5) })]
    #[case(".ultraThinMaterial", Paint::Material { name: "ultraThinMaterial".into() })]
    #[case("Color(red: 1, green: 0, blue: 0.5)", Paint::color("#ff0080"))]
    fn paint_forms(#[case] inner: &str, #[case] expected: Paint) {
        assert_eq!(run("foregroundColor", inner), Ok(ModifierArgs::Paint(expected)));
    }

    #[test]
    fn gradient_paint_reads_colors_and_points() {
        let result = run(
            "background",
            "LinearGradient(colors: [.purple, .blue], startPoint: .top, endPoint: .bottom)",
        );
        assert_eq!(
            result,
            Ok(ModifierArgs::Paint(Paint::LinearGradient {
                colors: vec!["purple".into(), "blue".into()],
                start: Some("top".into()),
                end: Some("bottom".into()),
            }))
        );
    }

    #[test]
    fn missing_paint_is_an_arg_error() {
        assert!(run("foregroundColor", "").is_err());
    }

    #[rstest]
    #[case(".title", FontSpec { style: Some("title".into()), ..FontSpec::default() })]
    #[case(".title.weight(.bold)", FontSpec { style: Some("title".into()), weight: Some("bold".into()), ..FontSpec::default() })]
    #[case(".system(size: 24, weight: .semibold)", FontSpec { size: Some(24.0), weight: Some("semibold".into()), ..FontSpec::default() })]
    #[case(".custom(\"Menlo\", size: 12)", FontSpec { family: Some("Menlo".into()), size: Some(12.0), ..FontSpec::default() })]
    fn font_forms(#[case] inner: &str, #[case] expected: FontSpec) {
        assert_eq!(run("font", inner), Ok(ModifierArgs::Font(expected)));
    }

    #[test]
    fn frame_keeps_infinity_and_rejects_empty() {
        let Ok(ModifierArgs::Frame(spec)) = run("frame", "maxWidth: .infinity, height: 40") else {
            panic!("expected frame");
        };
        assert_eq!(spec.max_width, Some(Dimension::Infinity));
        assert_eq!(spec.height, Some(Dimension::Fixed(40.0)));
        assert_eq!(
            run("frame", ""),
            Err(ArgError::missing("frame", "a width or height"))
        );
    }

    #[rstest]
    #[case("cornerRadius", "12", Ok(ModifierArgs::Number(12.0)))]
    #[case("blur", "radius: 3", Ok(ModifierArgs::Number(3.0)))]
    #[case("lineLimit", "nil", Ok(ModifierArgs::None))]
    #[case("cornerRadius", "radius", Err(ArgError::missing("cornerRadius", "a number")))]
    fn numeric_forms(
        #[case] name: &str,
        #[case] inner: &str,
        #[case] expected: Result<ModifierArgs, ArgError>,
    ) {
        assert_eq!(run(name, inner), expected);
    }

    #[rstest]
    #[case(".degrees(45)", Angle::Degrees(45.0))]
    #[case("Angle(degrees: -90)", Angle::Degrees(-90.0))]
    #[case(".radians(1.5)", Angle::Radians(1.5))]
    fn angles(#[case] inner: &str, #[case] expected: Angle) {
        assert_eq!(run("rotationEffect", inner), Ok(ModifierArgs::Angle(expected)));
    }

    #[rstest]
    #[case("", true)]
    #[case("true", true)]
    #[case("false", false)]
    #[case("isLoading", true)]
    fn flags(#[case] inner: &str, #[case] expected: bool) {
        assert_eq!(run("disabled", inner), Ok(ModifierArgs::Flag(expected)));
    }

    #[rstest]
    #[case("RoundedBorderTextFieldStyle()", "roundedBorder")]
    #[case(".roundedBorder", "roundedBorder")]
    #[case("PlainButtonStyle()", "plain")]
    #[case(".easeInOut(duration: 0.3)", "easeInOut")]
    fn style_tokens(#[case] inner: &str, #[case] expected: &str) {
        assert_eq!(run("textFieldStyle", inner), Ok(ModifierArgs::Token(expected.into())));
    }

    #[test]
    fn offset_and_scale_points() {
        assert_eq!(
            run("offset", "x: 10, y: -5"),
            Ok(ModifierArgs::Point(Point { x: Some(10.0), y: Some(-5.0) }))
        );
        assert_eq!(
            run("offset", "CGSize(width: 3, height: 4)"),
            Ok(ModifierArgs::Point(Point { x: Some(3.0), y: Some(4.0) }))
        );
        assert_eq!(
            run("scaleEffect", "x: 2, y: 1"),
            Ok(ModifierArgs::Point(Point { x: Some(2.0), y: Some(1.0) }))
        );
    }

    #[test]
    fn shadow_and_clip_shape() {
        assert_eq!(
            run("shadow", "color: .black.opacity(0.2), radius: 8, x: 0, y: 4"),
            Ok(ModifierArgs::Shadow(Shadow {
                color: Some(Paint::Color { name: "black".into(), opacity: Some(0.2) }),
                radius: Some(8.0),
                x: Some(0.0),
                y: Some(4.0),
            }))
        );
        assert_eq!(
            run("clipShape", "RoundedRectangle(cornerRadius: 10)"),
            Ok(ModifierArgs::ClipShape(ClipShape {
                shape: "RoundedRectangle".into(),
                corner_radius: Some(10.0),
            }))
        );
        assert_eq!(
            run("clipShape", ".rect(cornerRadius: 6)"),
            Ok(ModifierArgs::ClipShape(ClipShape {
                shape: "RoundedRectangle".into(),
                corner_radius: Some(6.0),
            }))
        );
    }

    #[test]
    fn aspect_ratio_division() {
        assert_eq!(
            run("aspectRatio", "16/9, contentMode: .fit"),
            Ok(ModifierArgs::AspectRatio(AspectRatio {
                ratio: Some(16.0 / 9.0),
                mode: Some("fit".into()),
            }))
        );
    }

    #[test]
    fn overlay_uses_trailing_views() {
        let mut call = CallArgs::new(parse_arg_list("alignment: .topTrailing"));
        call.trailing = vec![ViewNode::new(ViewKind::Circle)];
        let Ok(ModifierArgs::Content(content)) = interpret("overlay", &call) else {
            panic!("expected content");
        };
        assert_eq!(content.view.kind, ViewKind::Circle);
        assert_eq!(content.alignment.as_deref(), Some("topTrailing"));
    }

    #[test]
    fn badge_text_or_number() {
        assert_eq!(run("badge", "3"), Ok(ModifierArgs::Number(3.0)));
        assert_eq!(run("badge", "\"New\""), Ok(ModifierArgs::Text("New".into())));
    }
}
