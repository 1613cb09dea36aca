//! CSV scanning implementation.
//!
//! This module handles the low-level, character by character scanning of CSV text
//! into rows of field strings.

use crate::csv::CsvConfig;

/// Scan CSV text into rows of fields.
///
/// Scanning is total: any input yields some rows. A leading byte order mark is
/// skipped. Rows whose fields are all blank (quoted whitespace included) are
/// dropped, and a trailing row without a newline is still emitted.
pub(crate) fn csv_parse<S: AsRef<str>>(csv_text: S, config: &CsvConfig) -> Vec<Vec<String>> {
    let text = csv_text.as_ref();
    let text = normalize_line_endings(text.strip_prefix('\u{feff}').unwrap_or(text));
    let mut scanner = RowScanner::new(config.trim);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if scanner.in_quotes => {
                if chars.peek() == Some(&'"') {
                    // escaped quote
                    chars.next();
                    scanner.push('"');
                } else {
                    scanner.close_quote();
                }
            }
            '"' => scanner.open_quote(),
            '\n' if !scanner.in_quotes => scanner.end_row(),
            c if c == config.delimiter && !scanner.in_quotes => scanner.end_field(),
            c => scanner.push(c),
        }
    }

    scanner.finish()
}

/// Convert `\r\n` and lone `\r` to `\n` so quoted multi-line values keep plain newlines.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Accumulator state for [csv_parse].
struct RowScanner {
    trim: bool,
    in_quotes: bool,
    field: String,
    /// Byte span of `field` covered by quoted sections: start of the first opening
    /// quote to the end of the last closing quote. Whitespace inside it is never trimmed.
    quoted: Option<(usize, usize)>,
    row: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RowScanner {
    fn new(trim: bool) -> Self {
        Self {
            trim,
            in_quotes: false,
            field: String::new(),
            quoted: None,
            row: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, c: char) {
        self.field.push(c);
    }

    fn open_quote(&mut self) {
        self.in_quotes = true;
        let at = self.field.len();
        self.quoted = Some(match self.quoted {
            Some((start, _)) => (start, at),
            None => (at, at),
        });
    }

    fn close_quote(&mut self) {
        self.in_quotes = false;
        if let Some((_, end)) = self.quoted.as_mut() {
            *end = self.field.len();
        }
    }

    fn end_field(&mut self) {
        let field = self.take_field();
        self.row.push(field);
    }

    fn end_row(&mut self) {
        self.end_field();
        let row = std::mem::take(&mut self.row);
        if row.iter().any(|field| !field.trim().is_empty()) {
            self.rows.push(row);
        }
    }

    /// Take the pending field, trimming whitespace that lies outside quoted sections.
    fn take_field(&mut self) -> String {
        let field = std::mem::take(&mut self.field);
        let quoted = self.quoted.take();
        if !self.trim {
            return field;
        }

        let (keep_from, keep_to) = quoted.unwrap_or((field.len(), 0));
        let head = &field[..keep_from];
        let start = head.len() - head.trim_start().len();
        let end = keep_to + field[keep_to..].trim_end().len();
        field[start..end.max(start)].to_string()
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        if self.in_quotes {
            // unterminated quote runs to end of input
            self.close_quote();
        }
        if !self.field.is_empty() || !self.row.is_empty() || self.quoted.is_some() {
            self.end_row();
        }
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn parse(text: &str) -> Vec<Vec<String>> {
        csv_parse(text, &CsvConfig::new())
    }

    fn rows(expected: &[&[&str]]) -> Vec<Vec<String>> {
        expected
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_quoted_comma_and_doubled_quote() {
        let result = parse(r#""Kim, J.","He said ""hi""",2022"#);
        assert_eq!(result, rows(&[&["Kim, J.", r#"He said "hi""#, "2022"]]));
    }

    #[test]
    fn test_quoted_newline_does_not_end_row() {
        let result = parse("a,b\n\"line one\nline two\",x\n");
        assert_eq!(result, rows(&[&["a", "b"], &["line one\nline two", "x"]]));
    }

    #[rstest]
    #[case("a,b\r\nc,d\r\n")]
    #[case("a,b\rc,d\r")]
    #[case("a,b\nc,d")]
    fn test_line_endings_are_normalized(#[case] input: &str) {
        assert_eq!(parse(input), rows(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn test_crlf_inside_quotes_becomes_lf() {
        let result = parse("\"x\r\ny\"\r\n");
        assert_eq!(result, rows(&[&["x\ny"]]));
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let result = parse("h\n\n1\n   \n2\n,,\n\n");
        assert_eq!(result, rows(&[&["h"], &["1"], &["2"]]));
    }

    #[rstest]
    #[case("  plain  ", "plain")]
    #[case("\"  padded  \"", "  padded  ")]
    #[case("  \"  padded  \"  ", "  padded  ")]
    #[case("\"\"", "")]
    #[case("\"a\"b", "ab")]
    fn test_trimming_respects_quotes(#[case] input: &str, #[case] expected: &str) {
        // a trailing column keeps rows with an empty first field from being blank
        let input = format!("{input},x");
        assert_eq!(parse(&input), rows(&[&[expected, "x"]]));
    }

    #[test]
    fn test_quoted_whitespace_only_row_is_blank() {
        assert_eq!(parse(r#"h
"  "
""," "
1
"#), rows(&[&["h"], &["1"]]));
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        assert_eq!(parse("\u{feff}type,title\nJournal,A\n"), rows(&[&["type", "title"], &["Journal", "A"]]));
    }

    #[test]
    fn test_no_trim_keeps_unquoted_whitespace() {
        let mut config = CsvConfig::new();
        config.set_trim(false);
        assert_eq!(csv_parse(" a , b ", &config), rows(&[&[" a ", " b "]]));
    }

    #[test]
    fn test_empty_fields_are_kept_inside_rows() {
        assert_eq!(parse("a,,c,"), rows(&[&["a", "", "c", ""]]));
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(parse("a,\"b,c\nd"), rows(&[&["a", "b,c\nd"]]));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let mut config = CsvConfig::new();
        config.set_delimiter(';');
        assert_eq!(
            csv_parse("a;\"b;c\",d", &config),
            rows(&[&["a", "b;c,d"]])
        );
    }
}
