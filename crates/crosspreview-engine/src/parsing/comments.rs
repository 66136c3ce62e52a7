/// Remove `//` line comments that sit outside string literals.
///
/// A `//` preceded by an even number of `"` characters on its line starts a
/// comment and the rest of the line is dropped. After an odd count it is
/// inside a string and kept verbatim. Line terminators are preserved, so
/// byte offsets of later lines shift but line numbers do not.
pub fn strip_line_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);
        out.push_str(&body[..comment_start(body).unwrap_or(body.len())]);
        out.push_str(terminator);
    }
    out
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut quotes = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => quotes += 1,
            b'/' if quotes % 2 == 0 && bytes.get(i + 1) == Some(&b'/') => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::trailing_comment("Text(\"a\") // note", "Text(\"a\") ")]
    #[case::whole_line("// only a comment", "")]
    #[case::url_in_string("Link(\"x\", destination: \"https://a.b\")", "Link(\"x\", destination: \"https://a.b\")")]
    #[case::comment_after_closed_string("Text(\"https://a\") // c", "Text(\"https://a\") ")]
    #[case::no_comment("VStack {", "VStack {")]
    fn strips_single_line(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_line_comments(input), expected);
    }

    #[test]
    fn preserves_line_terminators() {
        let src = "a // x\r\nb\n// y\nc";
        assert_eq!(strip_line_comments(src), "a \r\nb\n\nc");
    }

    #[test]
    fn line_count_is_unchanged() {
        let src = "struct A: View {\n  // body\n  var body: some View { Text(\"x\") }\n}\n";
        assert_eq!(
            strip_line_comments(src).lines().count(),
            src.lines().count()
        );
    }
}
