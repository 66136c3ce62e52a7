use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::modifier::{Modifier, ModifierArgs};

/// Every view constructor the parser recognizes.
///
/// The set is closed: a constructor outside it either becomes a placeholder
/// `Group` (names shaped like `FooView`) or is reported as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViewKind {
    // Containers
    VStack,
    HStack,
    ZStack,
    List,
    Form,
    Section,
    ScrollView,
    LazyVStack,
    LazyHStack,
    Grid,
    GridRow,
    Group,
    GeometryReader,
    NavigationView,
    NavigationStack,
    NavigationSplitView,
    TabView,
    DisclosureGroup,
    Menu,
    Picker,
    // Leaves and controls
    Text,
    Image,
    Spacer,
    Button,
    Toggle,
    TextField,
    SecureField,
    Rectangle,
    Circle,
    RoundedRectangle,
    Capsule,
    Ellipse,
    Divider,
    Label,
    Slider,
    Stepper,
    DatePicker,
    ColorPicker,
    ProgressView,
    Link,
    LinearGradient,
    RadialGradient,
    AsyncImage,
    TextEditor,
    NavigationLink,
    // Repetition
    ForEach,
    /// Never produced by the parser; renders as a generic placeholder.
    Custom,
}

impl ViewKind {
    pub const ALL: [ViewKind; 47] = [
        ViewKind::VStack,
        ViewKind::HStack,
        ViewKind::ZStack,
        ViewKind::List,
        ViewKind::Form,
        ViewKind::Section,
        ViewKind::ScrollView,
        ViewKind::LazyVStack,
        ViewKind::LazyHStack,
        ViewKind::Grid,
        ViewKind::GridRow,
        ViewKind::Group,
        ViewKind::GeometryReader,
        ViewKind::NavigationView,
        ViewKind::NavigationStack,
        ViewKind::NavigationSplitView,
        ViewKind::TabView,
        ViewKind::DisclosureGroup,
        ViewKind::Menu,
        ViewKind::Picker,
        ViewKind::Text,
        ViewKind::Image,
        ViewKind::Spacer,
        ViewKind::Button,
        ViewKind::Toggle,
        ViewKind::TextField,
        ViewKind::SecureField,
        ViewKind::Rectangle,
        ViewKind::Circle,
        ViewKind::RoundedRectangle,
        ViewKind::Capsule,
        ViewKind::Ellipse,
        ViewKind::Divider,
        ViewKind::Label,
        ViewKind::Slider,
        ViewKind::Stepper,
        ViewKind::DatePicker,
        ViewKind::ColorPicker,
        ViewKind::ProgressView,
        ViewKind::Link,
        ViewKind::LinearGradient,
        ViewKind::RadialGradient,
        ViewKind::AsyncImage,
        ViewKind::TextEditor,
        ViewKind::NavigationLink,
        ViewKind::ForEach,
        ViewKind::Custom,
    ];

    /// Resolve a constructor name. `Custom` is not reachable by name.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "Custom" {
            return None;
        }
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewKind::VStack => "VStack",
            ViewKind::HStack => "HStack",
            ViewKind::ZStack => "ZStack",
            ViewKind::List => "List",
            ViewKind::Form => "Form",
            ViewKind::Section => "Section",
            ViewKind::ScrollView => "ScrollView",
            ViewKind::LazyVStack => "LazyVStack",
            ViewKind::LazyHStack => "LazyHStack",
            ViewKind::Grid => "Grid",
            ViewKind::GridRow => "GridRow",
            ViewKind::Group => "Group",
            ViewKind::GeometryReader => "GeometryReader",
            ViewKind::NavigationView => "NavigationView",
            ViewKind::NavigationStack => "NavigationStack",
            ViewKind::NavigationSplitView => "NavigationSplitView",
            ViewKind::TabView => "TabView",
            ViewKind::DisclosureGroup => "DisclosureGroup",
            ViewKind::Menu => "Menu",
            ViewKind::Picker => "Picker",
            ViewKind::Text => "Text",
            ViewKind::Image => "Image",
            ViewKind::Spacer => "Spacer",
            ViewKind::Button => "Button",
            ViewKind::Toggle => "Toggle",
            ViewKind::TextField => "TextField",
            ViewKind::SecureField => "SecureField",
            ViewKind::Rectangle => "Rectangle",
            ViewKind::Circle => "Circle",
            ViewKind::RoundedRectangle => "RoundedRectangle",
            ViewKind::Capsule => "Capsule",
            ViewKind::Ellipse => "Ellipse",
            ViewKind::Divider => "Divider",
            ViewKind::Label => "Label",
            ViewKind::Slider => "Slider",
            ViewKind::Stepper => "Stepper",
            ViewKind::DatePicker => "DatePicker",
            ViewKind::ColorPicker => "ColorPicker",
            ViewKind::ProgressView => "ProgressView",
            ViewKind::Link => "Link",
            ViewKind::LinearGradient => "LinearGradient",
            ViewKind::RadialGradient => "RadialGradient",
            ViewKind::AsyncImage => "AsyncImage",
            ViewKind::TextEditor => "TextEditor",
            ViewKind::NavigationLink => "NavigationLink",
            ViewKind::ForEach => "ForEach",
            ViewKind::Custom => "Custom",
        }
    }

    /// Kinds whose trailing closure holds child views.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ViewKind::VStack
                | ViewKind::HStack
                | ViewKind::ZStack
                | ViewKind::List
                | ViewKind::Form
                | ViewKind::Section
                | ViewKind::ScrollView
                | ViewKind::LazyVStack
                | ViewKind::LazyHStack
                | ViewKind::Grid
                | ViewKind::GridRow
                | ViewKind::Group
                | ViewKind::GeometryReader
                | ViewKind::NavigationView
                | ViewKind::NavigationStack
                | ViewKind::NavigationSplitView
                | ViewKind::TabView
                | ViewKind::DisclosureGroup
                | ViewKind::Menu
                | ViewKind::Picker
        )
    }

    /// Shapes fill with the foreground color instead of tinting text.
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            ViewKind::Rectangle
                | ViewKind::Circle
                | ViewKind::RoundedRectangle
                | ViewKind::Capsule
                | ViewKind::Ellipse
        )
    }

    /// Kinds that are valid as a bare identifier (`Spacer`, `Divider`).
    pub fn is_bare_leaf(self) -> bool {
        matches!(self, ViewKind::Spacer | ViewKind::Divider)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric range literal such as `0..<5` or `1...3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeValue {
    pub start: i64,
    pub end: i64,
    pub inclusive: bool,
}

impl RangeValue {
    /// Number of values in the range: `end - start`, plus one when inclusive.
    /// Empty when the bounds are reversed, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        let span = i128::from(self.end) - i128::from(self.start) + i128::from(self.inclusive);
        if span <= 0 {
            0
        } else {
            usize::try_from(span).unwrap_or(usize::MAX)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value at iteration `index`, or `None` past `i64::MAX`.
    pub fn value_at(&self, index: usize) -> Option<i64> {
        i64::try_from(index)
            .ok()
            .and_then(|offset| self.start.checked_add(offset))
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PropValue {
    Number(f64),
    Bool(bool),
    Text(String),
    /// An enum token such as `leading` from `.leading`.
    Token(String),
    List(Vec<String>),
    Range(RangeValue),
    Node(Box<ViewNode>),
}

/// A node of the view tree produced by parsing and consumed by rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    pub kind: ViewKind,
    pub props: BTreeMap<String, PropValue>,
    /// Modifiers in source order, left to right along the chain.
    pub modifiers: Vec<Modifier>,
    /// Children in source order.
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            props: BTreeMap::new(),
            modifiers: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A `Text` node with the given content.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(ViewKind::Text).with_prop("text", PropValue::Text(content.into()))
    }

    /// The stand-in for a custom view that cannot be expanded: a `Group`
    /// wrapping a single `Text` showing `<Name>`.
    pub fn placeholder(name: &str) -> Self {
        Self::new(ViewKind::Group)
            .with_prop("placeholder", PropValue::Text(name.to_string()))
            .with_children(vec![Self::text(format!("<{name}>"))])
    }

    pub fn with_prop(mut self, key: &str, value: PropValue) -> Self {
        self.props.insert(key.to_string(), value);
        self
    }

    pub fn with_children(mut self, children: Vec<ViewNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn set_prop(&mut self, key: &str, value: PropValue) {
        self.props.insert(key.to_string(), value);
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn prop_f64(&self, key: &str) -> Option<f64> {
        match self.prop(key)? {
            PropValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// A property as `&str` if it is `Text` or `Token`.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            PropValue::Text(s) | PropValue::Token(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        match self.prop(key)? {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn prop_list(&self, key: &str) -> Option<&[String]> {
        match self.prop(key)? {
            PropValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn prop_range(&self, key: &str) -> Option<RangeValue> {
        match self.prop(key)? {
            PropValue::Range(r) => Some(*r),
            _ => None,
        }
    }

    pub fn prop_node(&self, key: &str) -> Option<&ViewNode> {
        match self.prop(key)? {
            PropValue::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The last modifier with this name, which is the one that takes effect.
    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.iter().rev().find(|m| m.name == name)
    }

    /// Replace `needle` with `replacement` in every string property of this
    /// node and its descendants, including views nested in props and
    /// modifiers. Used on per-row clones when expanding `ForEach`.
    pub fn replace_text(&mut self, needle: &str, replacement: &str) {
        for value in self.props.values_mut() {
            match value {
                PropValue::Text(s) if s.contains(needle) => {
                    *s = s.replace(needle, replacement);
                }
                PropValue::Node(node) => node.replace_text(needle, replacement),
                _ => {}
            }
        }
        for modifier in &mut self.modifiers {
            match &mut modifier.args {
                ModifierArgs::Text(s) if s.contains(needle) => {
                    *s = s.replace(needle, replacement);
                }
                ModifierArgs::Content(content) => content.view.replace_text(needle, replacement),
                _ => {}
            }
        }
        for child in &mut self.children {
            child.replace_text(needle, replacement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in ViewKind::ALL {
            if kind == ViewKind::Custom {
                assert_eq!(ViewKind::from_name("Custom"), None);
                continue;
            }
            assert_eq!(ViewKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ViewKind::from_name("MyCustomView"), None);
    }

    #[test]
    fn range_lengths() {
        let exclusive = RangeValue {
            start: 1,
            end: 4,
            inclusive: false,
        };
        let inclusive = RangeValue {
            inclusive: true,
            ..exclusive
        };
        let reversed = RangeValue {
            start: 5,
            end: 2,
            inclusive: false,
        };
        assert_eq!(exclusive.len(), 3);
        assert_eq!(inclusive.len(), 4);
        assert!(reversed.is_empty());
        assert_eq!(exclusive.value_at(2), Some(3));
    }

    #[test]
    fn extreme_ranges_saturate() {
        let to_max = RangeValue {
            start: 0,
            end: i64::MAX,
            inclusive: true,
        };
        let full = RangeValue {
            start: i64::MIN,
            end: i64::MAX,
            inclusive: false,
        };
        assert!(to_max.len() >= usize::MAX / 2);
        assert_eq!(full.len(), usize::MAX);
        assert_eq!(full.value_at(0), Some(i64::MIN));
        let near_end = RangeValue {
            start: i64::MAX - 1,
            ..to_max
        };
        assert_eq!(near_end.len(), 2);
        assert_eq!(near_end.value_at(1), Some(i64::MAX));
        assert_eq!(near_end.value_at(2), None);
    }

    #[test]
    fn placeholder_wraps_name_in_text() {
        let node = ViewNode::placeholder("MyCustomView");
        assert_eq!(node.kind, ViewKind::Group);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].prop_str("text"), Some("<MyCustomView>"));
    }

    #[test]
    fn replace_text_only_touches_the_receiver() {
        let original = ViewNode::new(ViewKind::HStack)
            .with_children(vec![ViewNode::text("Item \\(i)"), ViewNode::text("fixed")]);
        let mut clone = original.clone();
        clone.replace_text("\\(i)", "3");

        assert_eq!(clone.children[0].prop_str("text"), Some("Item 3"));
        assert_eq!(clone.children[1].prop_str("text"), Some("fixed"));
        assert_eq!(original.children[0].prop_str("text"), Some("Item \\(i)"));
    }
}
