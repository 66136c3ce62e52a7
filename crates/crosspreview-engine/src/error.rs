/// Reasons a view tree could not be extracted from a source text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    #[error("No struct conforming to View found")]
    NoViewDeclaration,
    #[error("View '{view}' has no `body` property")]
    NoBodyProperty { view: String },
    #[error("Could not find a view expression in the body of '{view}'")]
    EmptyBody { view: String },
    #[error("Unsupported body expression: {snippet}")]
    UnsupportedBody { snippet: String },
    #[error("Syntax provider failed: {0}")]
    ProviderFailed(String),
}

impl ExtractError {
    /// An `UnsupportedBody` error quoting the start of `text`.
    pub fn unsupported(text: &str) -> Self {
        ExtractError::UnsupportedBody {
            snippet: snippet(text),
        }
    }
}

/// The first line of `text`, cut to 60 characters.
pub fn snippet(text: &str) -> String {
    let line = text.trim().lines().next().unwrap_or("");
    if line.chars().count() > 60 {
        let cut: String = line.chars().take(60).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

/// The syntax provider could not be initialised.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to load the Swift grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}

/// A recognised modifier whose arguments could not be read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgError {
    #[error("Modifier '.{modifier}' expects {expected}")]
    Missing {
        modifier: String,
        expected: &'static str,
    },
}

impl ArgError {
    pub fn missing(modifier: &str, expected: &'static str) -> Self {
        ArgError::Missing {
            modifier: modifier.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_conformance_message_names_view() {
        assert!(ExtractError::NoViewDeclaration.to_string().contains("View"));
    }

    #[test]
    fn unsupported_snippet_is_truncated_to_first_line() {
        let long = format!("{}\nsecond line", "x".repeat(80));
        let ExtractError::UnsupportedBody { snippet } = ExtractError::unsupported(&long) else {
            panic!("expected UnsupportedBody");
        };
        assert_eq!(snippet.len(), 63);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn arg_error_formats_modifier() {
        let err = ArgError::missing("frame", "a width or height");
        assert_eq!(
            err.to_string(),
            "Modifier '.frame' expects a width or height"
        );
    }
}
