use serde::Serialize;

use super::view_node::ViewNode;

/// A postfix `.name(args)` call attached to a view.
///
/// Unknown modifier names are kept with `ModifierArgs::None` so the tree
/// records everything the source said, even what the renderer ignores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modifier {
    pub name: String,
    pub args: ModifierArgs,
}

impl Modifier {
    pub fn new(name: impl Into<String>, args: ModifierArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// A modifier that carries no arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, ModifierArgs::None)
    }
}

/// Arguments of a modifier, one variant per argument category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ModifierArgs {
    /// No arguments, an unknown modifier, or arguments that failed validation.
    None,
    Flag(bool),
    Number(f64),
    Text(String),
    Token(String),
    Padding(Padding),
    Paint(Paint),
    Stroke(Stroke),
    Border(Stroke),
    Font(FontSpec),
    Frame(FrameSpec),
    Point(Point),
    AspectRatio(AspectRatio),
    Angle(Angle),
    Shadow(Shadow),
    ClipShape(ClipShape),
    Content(Content),
}

/// Which edges a `padding` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Edges {
    All,
    Top,
    Bottom,
    Leading,
    Trailing,
    Horizontal,
    Vertical,
}

impl Edges {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Edges::All),
            "top" => Some(Edges::Top),
            "bottom" => Some(Edges::Bottom),
            "leading" => Some(Edges::Leading),
            "trailing" => Some(Edges::Trailing),
            "horizontal" => Some(Edges::Horizontal),
            "vertical" => Some(Edges::Vertical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Padding {
    pub edges: Vec<Edges>,
    /// Absent means the renderer's default padding.
    pub amount: Option<f64>,
}

/// Anything that can color a view: a named color, a material, or a gradient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Paint {
    Color {
        name: String,
        opacity: Option<f64>,
    },
    Material {
        name: String,
    },
    LinearGradient {
        colors: Vec<String>,
        start: Option<String>,
        end: Option<String>,
    },
    RadialGradient {
        colors: Vec<String>,
    },
}

impl Paint {
    pub fn color(name: impl Into<String>) -> Self {
        Paint::Color {
            name: name.into(),
            opacity: None,
        }
    }
}

/// `stroke(color, lineWidth:)` and `border(color, width:)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub paint: Option<Paint>,
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontSpec {
    /// Named text style: `title`, `headline`, ...
    pub style: Option<String>,
    pub size: Option<f64>,
    pub weight: Option<String>,
    pub design: Option<String>,
    pub family: Option<String>,
}

impl FontSpec {
    pub fn is_empty(&self) -> bool {
        self.style.is_none()
            && self.size.is_none()
            && self.weight.is_none()
            && self.design.is_none()
            && self.family.is_none()
    }
}

/// A frame dimension: a fixed length or `.infinity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Fixed(f64),
    Infinity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameSpec {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_height: Option<Dimension>,
    pub alignment: Option<String>,
}

impl FrameSpec {
    pub fn has_dimensions(&self) -> bool {
        [
            self.width,
            self.height,
            self.min_width,
            self.max_width,
            self.min_height,
            self.max_height,
        ]
        .iter()
        .any(Option::is_some)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectRatio {
    pub ratio: Option<f64>,
    /// `fit` or `fill`.
    pub mode: Option<String>,
}

/// An angle written as `.degrees(n)` or `.radians(n)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Angle {
    Degrees(f64),
    Radians(f64),
}

impl Angle {
    pub fn to_degrees(self) -> f64 {
        match self {
            Angle::Degrees(d) => d,
            Angle::Radians(r) => r.to_degrees(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shadow {
    pub color: Option<Paint>,
    pub radius: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipShape {
    /// `Circle`, `Capsule`, `RoundedRectangle`, ...
    pub shape: String,
    pub corner_radius: Option<f64>,
}

/// A nested view carried by `overlay`, `background`, `mask` or `tabItem`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub view: Box<ViewNode>,
    pub alignment: Option<String>,
}
