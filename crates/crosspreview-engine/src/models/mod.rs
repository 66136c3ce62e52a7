pub mod modifier;
pub mod view_node;

pub use modifier::*;
pub use view_node::{PropValue, RangeValue, ViewKind, ViewNode};
