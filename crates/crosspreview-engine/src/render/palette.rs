//! Lookup tables: system colors, materials, text styles and SF Symbols.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Paint;

fn hex_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{3,8}$").expect("Invalid hex color regex"))
}

/// CSS for a named SwiftUI color. Well-formed hex strings pass through;
/// anything else unknown inherits the current color.
pub fn color(name: &str) -> &str {
    match name {
        "red" => "#ff3b30",
        "orange" => "#ff9500",
        "yellow" => "#ffcc00",
        "green" => "#34c759",
        "mint" => "#00c7be",
        "teal" => "#30b0c7",
        "cyan" => "#32ade6",
        "blue" | "accentColor" | "accent" => "#007aff",
        "indigo" => "#5856d6",
        "purple" => "#af52de",
        "pink" => "#ff2d55",
        "brown" => "#a2845e",
        "gray" | "grey" => "#8e8e93",
        "black" | "primary" => "#000000",
        "white" => "#ffffff",
        "secondary" => "#3c3c4399",
        "clear" => "transparent",
        hex if hex_color_re().is_match(hex) => hex,
        _ => "currentColor",
    }
}

/// A color with an opacity applied, as `rgba(...)` when the base is hex.
pub fn color_with_opacity(name: &str, opacity: Option<f64>) -> String {
    let base = color(name);
    let Some(alpha) = opacity else {
        return base.to_string();
    };
    match hex_rgb(base) {
        Some((r, g, b)) => format!("rgba({r}, {g}, {b}, {})", super::fmt_num(alpha.clamp(0.0, 1.0))),
        None if base == "transparent" => base.to_string(),
        None => format!("color-mix(in srgb, {base} {}%, transparent)", super::fmt_num(alpha * 100.0)),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() < 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Translucent fill and blur radius for a material.
pub fn material(name: &str) -> (&'static str, u32) {
    match name {
        "ultraThinMaterial" => ("rgba(255, 255, 255, 0.35)", 10),
        "thinMaterial" => ("rgba(255, 255, 255, 0.5)", 15),
        "thickMaterial" => ("rgba(255, 255, 255, 0.8)", 25),
        "ultraThickMaterial" => ("rgba(255, 255, 255, 0.9)", 30),
        "bar" => ("rgba(249, 249, 249, 0.94)", 20),
        _ => ("rgba(255, 255, 255, 0.65)", 20),
    }
}

fn gradient_direction(start: Option<&str>, end: Option<&str>) -> &'static str {
    match (start.unwrap_or("top"), end.unwrap_or("bottom")) {
        ("leading", "trailing") => "to right",
        ("trailing", "leading") => "to left",
        ("bottom", "top") => "to top",
        ("topLeading", "bottomTrailing") => "to bottom right",
        ("topTrailing", "bottomLeading") => "to bottom left",
        ("bottomLeading", "topTrailing") => "to top right",
        ("bottomTrailing", "topLeading") => "to top left",
        _ => "to bottom",
    }
}

fn color_stops(colors: &[String]) -> String {
    if colors.is_empty() {
        return "transparent, transparent".to_string();
    }
    colors
        .iter()
        .map(|c| color(c))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn linear_gradient(colors: &[String], start: Option<&str>, end: Option<&str>) -> String {
    format!(
        "linear-gradient({}, {})",
        gradient_direction(start, end),
        color_stops(colors)
    )
}

pub fn radial_gradient(colors: &[String]) -> String {
    format!("radial-gradient(circle, {})", color_stops(colors))
}

/// CSS `background` value for a paint.
pub fn paint(paint: &Paint) -> String {
    match paint {
        Paint::Color { name, opacity } => color_with_opacity(name, *opacity),
        Paint::Material { name } => material(name).0.to_string(),
        Paint::LinearGradient { colors, start, end } => {
            linear_gradient(colors, start.as_deref(), end.as_deref())
        }
        Paint::RadialGradient { colors } => radial_gradient(colors),
    }
}

/// Point size and weight of a named text style.
pub fn text_style(style: &str) -> (f64, u16) {
    match style {
        "largeTitle" => (34.0, 400),
        "title" => (28.0, 400),
        "title2" => (22.0, 400),
        "title3" => (20.0, 400),
        "headline" => (17.0, 600),
        "subheadline" => (15.0, 400),
        "callout" => (16.0, 400),
        "footnote" => (13.0, 400),
        "caption" => (12.0, 400),
        "caption2" => (11.0, 400),
        _ => (17.0, 400),
    }
}

pub fn font_weight(weight: &str) -> u16 {
    match weight {
        "ultraLight" => 100,
        "thin" => 200,
        "light" => 300,
        "medium" => 500,
        "semibold" => 600,
        "bold" => 700,
        "heavy" => 800,
        "black" => 900,
        _ => 400,
    }
}

pub fn font_design(design: &str) -> &'static str {
    match design {
        "monospaced" => "ui-monospace, Menlo, monospace",
        "serif" => "ui-serif, Georgia, serif",
        "rounded" => "ui-rounded, -apple-system, sans-serif",
        _ => "-apple-system, BlinkMacSystemFont, 'Helvetica Neue', sans-serif",
    }
}

/// A stand-in glyph for an SF Symbol. Variants such as `.fill` and
/// `.circle` fall back to their base symbol.
pub fn symbol(name: &str) -> &'static str {
    let mut key = name;
    loop {
        if let Some(glyph) = base_symbol(key) {
            return glyph;
        }
        match key.rsplit_once('.') {
            Some((head, _)) => key = head,
            None => return "\u{25FB}",
        }
    }
}

fn base_symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        "star.fill" => "\u{2605}",
        "star" => "\u{2606}",
        "heart.fill" => "\u{2665}",
        "heart" => "\u{2661}",
        "house" => "\u{2302}",
        "gear" | "gearshape" => "\u{2699}",
        "person" => "\u{1F464}",
        "person.2" => "\u{1F465}",
        "magnifyingglass" => "\u{1F50D}",
        "plus" => "+",
        "minus" => "\u{2212}",
        "xmark" => "\u{2715}",
        "checkmark" => "\u{2713}",
        "trash" => "\u{1F5D1}",
        "bell" => "\u{1F514}",
        "envelope" => "\u{2709}",
        "paperplane" => "\u{27A4}",
        "chevron.right" => "\u{203A}",
        "chevron.left" => "\u{2039}",
        "chevron.down" => "\u{2304}",
        "chevron.up" => "\u{2303}",
        "arrow.right" => "\u{2192}",
        "arrow.left" => "\u{2190}",
        "arrow.up" => "\u{2191}",
        "arrow.down" => "\u{2193}",
        "info" => "\u{24D8}",
        "exclamationmark.triangle" => "\u{26A0}",
        "photo" => "\u{1F5BC}",
        "folder" => "\u{1F4C1}",
        "doc" => "\u{1F4C4}",
        "calendar" => "\u{1F4C5}",
        "clock" => "\u{1F552}",
        "globe" => "\u{1F310}",
        "sun.max" => "\u{2600}",
        "moon" => "\u{263E}",
        "cloud" => "\u{2601}",
        "bolt" => "\u{26A1}",
        "play" => "\u{25B6}",
        "pause" => "\u{23F8}",
        "square.and.arrow.up" => "\u{21EA}",
        "cart" => "\u{1F6D2}",
        "lock" => "\u{1F512}",
        "bookmark" => "\u{1F516}",
        "flag" => "\u{2691}",
        "pencil" => "\u{270E}",
        "wifi" => "\u{1F4F6}",
        "circle" => "\u{25CB}",
        "square" => "\u{25A1}",
        _ => return None,
    })
}
