use std::fmt::Display;

/// Collects caveats raised while translating a body that still produced a
/// tree. Messages keep the order in which they were raised.
#[derive(Debug, Default)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Display) {
        self.messages.push(message.to_string());
    }

    /// Record a caveat tied to a 1-based source line.
    pub fn push_at(&mut self, line: usize, message: impl Display) {
        self.messages.push(format!("line {line}: {message}"));
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// 1-based line number of a byte offset in `source`.
pub fn line_of(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgError;

    #[test]
    fn messages_keep_order_and_line_prefix() {
        let mut diags = Diagnostics::new();
        diags.push("first");
        diags.push_at(3, ArgError::missing("frame", "a width or height"));
        assert_eq!(
            diags.into_messages(),
            vec![
                "first".to_string(),
                "line 3: Modifier '.frame' expects a width or height".to_string()
            ]
        );
    }

    #[test]
    fn line_of_counts_newlines() {
        let src = "a\nb\nc";
        assert_eq!(line_of(src, 0), 1);
        assert_eq!(line_of(src, 2), 2);
        assert_eq!(line_of(src, 4), 3);
        assert_eq!(line_of(src, 100), 3);
    }
}
