pub mod diagnostics;
pub mod error;
pub mod models;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use error::{ArgError, BackendError, ExtractError};
pub use models::*;
pub use parsing::{BackendChoice, ParseResult, SwiftUiParser, parse};
pub use render::{RenderOptions, Theme, render, render_error_banner, render_page, render_with};
