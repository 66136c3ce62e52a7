pub mod args;
pub mod comments;
pub mod fallback;
pub mod modifiers;
pub mod structural;
pub mod views;

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BackendError, ExtractError};
use crate::models::ViewNode;

pub use comments::strip_line_comments;
pub use fallback::FallbackBackend;
pub use structural::StructuralBackend;

/// The tree extracted from a source text, with caveats raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub root: ViewNode,
    pub caveats: Vec<String>,
}

/// A strategy for turning comment-free source text into a view tree.
pub trait ParserBackend {
    fn name(&self) -> &'static str;

    fn extract(&mut self, source: &str) -> Result<Extraction, ExtractError>;
}

/// Which backend a [`SwiftUiParser`] should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendChoice {
    /// The syntax provider when it loads, else the fallback.
    #[default]
    Auto,
    Structural,
    Fallback,
}

impl FromStr for BackendChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(BackendChoice::Auto),
            "structural" => Ok(BackendChoice::Structural),
            "fallback" => Ok(BackendChoice::Fallback),
            other => Err(format!(
                "unknown backend '{other}' (expected auto, structural or fallback)"
            )),
        }
    }
}

impl Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendChoice::Auto => "auto",
            BackendChoice::Structural => "structural",
            BackendChoice::Fallback => "fallback",
        })
    }
}

/// Outcome of a parse: a tree, a list of errors, or both.
///
/// An absent root always comes with at least one error. A root with errors
/// is a partial success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    root: Option<ViewNode>,
    errors: Vec<String>,
}

impl ParseResult {
    pub fn success(root: ViewNode, errors: Vec<String>) -> Self {
        Self {
            root: Some(root),
            errors,
        }
    }

    pub fn failure(err: impl Display) -> Self {
        Self {
            root: None,
            errors: vec![err.to_string()],
        }
    }

    pub fn root(&self) -> Option<&ViewNode> {
        self.root.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// A tree was produced but some of the source was not understood.
    pub fn is_partial(&self) -> bool {
        self.root.is_some() && !self.errors.is_empty()
    }

    fn prepend_error(&mut self, err: String) {
        self.errors.insert(0, err);
    }
}

/// A parser handle owning its backends. Construct once and reuse across
/// parses; nothing is carried over from one source text to the next.
pub struct SwiftUiParser {
    primary: Box<dyn ParserBackend>,
    fallback: FallbackBackend,
}

impl SwiftUiParser {
    /// Select a backend. `Auto` falls back when the grammar does not load;
    /// `Structural` reports that as an error.
    pub fn new(choice: BackendChoice) -> Result<Self, BackendError> {
        let primary: Box<dyn ParserBackend> = match choice {
            BackendChoice::Fallback => Box::new(FallbackBackend),
            BackendChoice::Structural => Box::new(StructuralBackend::new()?),
            BackendChoice::Auto => match StructuralBackend::new() {
                Ok(backend) => Box::new(backend),
                Err(e) => {
                    log::warn!("Syntax provider unavailable, using fallback parser: {e}");
                    Box::new(FallbackBackend)
                }
            },
        };
        log::debug!("Using {} parser backend", primary.name());
        Ok(Self {
            primary,
            fallback: FallbackBackend,
        })
    }

    /// A parser with automatic backend selection.
    pub fn auto() -> Self {
        match Self::new(BackendChoice::Auto) {
            Ok(parser) => parser,
            Err(_) => Self {
                primary: Box::new(FallbackBackend),
                fallback: FallbackBackend,
            },
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.primary.name()
    }

    /// Parse `source` into a view tree. Never panics on malformed input;
    /// every failure is reported in the result's errors.
    pub fn parse(&mut self, source: &str) -> ParseResult {
        let source = strip_line_comments(source);
        match self.primary.extract(&source) {
            Ok(extraction) => ParseResult::success(extraction.root, extraction.caveats),
            Err(ExtractError::ProviderFailed(reason)) => {
                let provider = ExtractError::ProviderFailed(reason).to_string();
                log::warn!("{provider}; retrying with the fallback parser");
                let mut result = match self.fallback.extract(&source) {
                    Ok(extraction) => ParseResult::success(extraction.root, extraction.caveats),
                    Err(e) => ParseResult::failure(e),
                };
                result.prepend_error(provider);
                result
            }
            Err(e) => ParseResult::failure(e),
        }
    }
}

/// Parse with a fresh automatically selected parser.
pub fn parse(source: &str) -> ParseResult {
    SwiftUiParser::auto().parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViewKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct FailingProvider;

    impl ParserBackend for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn extract(&mut self, _source: &str) -> Result<Extraction, ExtractError> {
            Err(ExtractError::ProviderFailed("no tree".into()))
        }
    }

    #[test]
    fn provider_failure_retries_with_fallback() {
        let mut parser = SwiftUiParser {
            primary: Box::new(FailingProvider),
            fallback: FallbackBackend,
        };
        let result = parser.parse(r#"struct A: View { var body: some View { Text("x") } }"#);
        assert_eq!(result.root().map(|r| r.kind), Some(ViewKind::Text));
        assert_eq!(result.errors(), ["Syntax provider failed: no tree"]);
        assert!(result.is_partial());
    }

    #[rstest]
    #[case("auto", BackendChoice::Auto)]
    #[case("Structural", BackendChoice::Structural)]
    #[case("fallback", BackendChoice::Fallback)]
    fn backend_choice_from_str(#[case] input: &str, #[case] expected: BackendChoice) {
        assert_eq!(input.parse::<BackendChoice>(), Ok(expected));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!("fast".parse::<BackendChoice>().is_err());
    }

    #[test]
    fn failure_always_carries_an_error() {
        let result = ParseResult::failure(ExtractError::NoViewDeclaration);
        assert!(result.root().is_none());
        assert_eq!(result.errors().len(), 1);
        assert!(!result.is_partial());
    }

    #[test]
    fn fallback_choice_reports_its_name() {
        let parser = SwiftUiParser::new(BackendChoice::Fallback).expect("fallback");
        assert_eq!(parser.backend_name(), "fallback");
    }
}
