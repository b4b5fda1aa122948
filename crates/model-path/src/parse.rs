//! Model path parser and formatter.
//!
//! Grammar: `.`-separated names, each optionally followed by bracket groups.
//! `[n]` is a position, `[]` the wildcard marker, `['k']` / `["k"]` a quoted
//! key that may contain `.` or brackets. Empty names are dropped, so `""` is
//! the root and `"a..b"` equals `"a.b"`.

use crate::types::{Path, Segment};
use crate::util::is_valid_index;
use crate::validate::ValidationError;

/// Parse a model path, never failing.
///
/// Unclosed brackets and quotes take the rest of the input.
///
/// # Example
///
/// ```
/// use form_model_path::{parse_model_path, Segment};
///
/// assert_eq!(parse_model_path(""), Vec::<Segment>::new());
/// assert_eq!(
///     parse_model_path("user.groups[2].name"),
///     vec![
///         Segment::Key("user".into()),
///         Segment::Key("groups".into()),
///         Segment::Index(2),
///         Segment::Key("name".into()),
///     ]
/// );
/// assert_eq!(parse_model_path("groups[]")[1], Segment::Wildcard);
/// ```
pub fn parse_model_path(model: &str) -> Path {
    let mut parser = ModelPathParser::new(model, false);
    parser.parse_path().unwrap_or_default()
}

/// Parse a model path, rejecting unclosed brackets and quotes.
pub fn parse_model_path_strict(model: &str) -> Result<Path, ValidationError> {
    let mut parser = ModelPathParser::new(model, true);
    parser.parse_path()
}

/// Format a path back into its string form.
///
/// `parse_model_path(&format_model_path(p)) == p` for every path.
///
/// # Example
///
/// ```
/// use form_model_path::{format_model_path, parse_model_path};
///
/// let path = parse_model_path("a.b[3]['x.y']");
/// assert_eq!(format_model_path(&path), r#"a.b[3]["x.y"]"#);
/// ```
pub fn format_model_path(path: &[Segment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            Segment::Key(key) if needs_quoting(key) => {
                out.push_str("[\"");
                for c in key.chars() {
                    if c == '"' || c == '\\' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push_str("\"]");
            }
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
            Segment::Wildcard => out.push_str("[]"),
        }
    }
    out
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"', '\'', '\\'])
}

struct ModelPathParser<'a> {
    input: &'a str,
    pos: usize,
    strict: bool,
}

impl<'a> ModelPathParser<'a> {
    fn new(input: &'a str, strict: bool) -> Self {
        Self {
            input,
            pos: 0,
            strict,
        }
    }

    fn parse_path(&mut self) -> Result<Path, ValidationError> {
        let mut segments = Vec::new();
        let mut name = String::new();

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    Self::flush(&mut name, &mut segments);
                }
                '[' => {
                    Self::flush(&mut name, &mut segments);
                    if let Some(segment) = self.parse_bracket()? {
                        segments.push(segment);
                    }
                }
                _ => {
                    self.advance();
                    name.push(c);
                }
            }
        }
        Self::flush(&mut name, &mut segments);

        Ok(segments)
    }

    fn flush(name: &mut String, segments: &mut Path) {
        if !name.is_empty() {
            segments.push(Segment::Key(std::mem::take(name)));
        }
    }

    fn parse_bracket(&mut self) -> Result<Option<Segment>, ValidationError> {
        let open = self.pos;
        self.advance();

        match self.peek() {
            Some(']') => {
                self.advance();
                Ok(Some(Segment::Wildcard))
            }
            Some(quote @ ('\'' | '"')) => {
                let key = self.parse_quoted(quote)?;
                self.close_bracket(open)?;
                Ok(Some(Segment::Key(key)))
            }
            _ => {
                let input = self.input;
                let start = self.pos;
                let (raw, closed) = match input[start..].find(']') {
                    Some(offset) => {
                        self.pos = start + offset + 1;
                        (&input[start..start + offset], true)
                    }
                    None => {
                        if self.strict {
                            return Err(ValidationError::UnclosedBracket(open));
                        }
                        self.pos = input.len();
                        (&input[start..], false)
                    }
                };
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(closed.then_some(Segment::Wildcard));
                }
                if is_valid_index(raw) {
                    if let Ok(index) = raw.parse() {
                        return Ok(Some(Segment::Index(index)));
                    }
                }
                Ok(Some(Segment::Key(raw.to_string())))
            }
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, ValidationError> {
        let start = self.pos;
        self.advance();
        let mut key = String::new();

        loop {
            match self.peek() {
                None => {
                    if self.strict {
                        return Err(ValidationError::UnterminatedQuote(start));
                    }
                    return Ok(key);
                }
                Some('\\') => {
                    self.advance();
                    if let Some(c) = self.peek() {
                        self.advance();
                        key.push(c);
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(key);
                }
                Some(c) => {
                    self.advance();
                    key.push(c);
                }
            }
        }
    }

    fn close_bracket(&mut self, open: usize) -> Result<(), ValidationError> {
        match self.peek() {
            Some(']') => {
                self.advance();
                Ok(())
            }
            None if self.strict => Err(ValidationError::UnclosedBracket(open)),
            None => Ok(()),
            Some(_) if self.strict => Err(ValidationError::UnexpectedChar(self.pos)),
            Some(_) => {
                // Lenient: drop whatever sits between the quote and `]`.
                match self.input[self.pos..].find(']') {
                    Some(offset) => self.pos += offset + 1,
                    None => self.pos = self.input.len(),
                }
                Ok(())
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> Segment {
        Segment::Key(k.to_string())
    }

    #[test]
    fn test_parse_root() {
        assert_eq!(parse_model_path(""), Vec::<Segment>::new());
        assert_eq!(parse_model_path("..."), Vec::<Segment>::new());
    }

    #[test]
    fn test_parse_dotted() {
        assert_eq!(parse_model_path("a.b.c"), vec![key("a"), key("b"), key("c")]);
        assert_eq!(parse_model_path("a..b."), vec![key("a"), key("b")]);
        assert_eq!(parse_model_path("groups.1.name"), vec![key("groups"), key("1"), key("name")]);
    }

    #[test]
    fn test_parse_brackets() {
        assert_eq!(
            parse_model_path("a[0][12].b"),
            vec![key("a"), Segment::Index(0), Segment::Index(12), key("b")]
        );
        assert_eq!(parse_model_path("a[].b"), vec![key("a"), Segment::Wildcard, key("b")]);
        assert_eq!(parse_model_path("a[x]"), vec![key("a"), key("x")]);
        assert_eq!(parse_model_path("a[01]"), vec![key("a"), key("01")]);
        assert_eq!(parse_model_path("a[0]b"), vec![key("a"), Segment::Index(0), key("b")]);
    }

    #[test]
    fn test_parse_quoted() {
        assert_eq!(parse_model_path("a['x.y']"), vec![key("a"), key("x.y")]);
        assert_eq!(parse_model_path(r#"a["q\"r"]"#), vec![key("a"), key("q\"r")]);
        assert_eq!(parse_model_path("['']"), vec![key("")]);
    }

    #[test]
    fn test_parse_lenient_unclosed() {
        assert_eq!(parse_model_path("a[3"), vec![key("a"), Segment::Index(3)]);
        assert_eq!(parse_model_path("a["), vec![key("a")]);
        assert_eq!(parse_model_path("a['x"), vec![key("a"), key("x")]);
        assert_eq!(parse_model_path("a['x'y].b"), vec![key("a"), key("x"), key("b")]);
    }

    #[test]
    fn test_parse_strict_errors() {
        assert_eq!(
            parse_model_path_strict("a[3"),
            Err(ValidationError::UnclosedBracket(1))
        );
        assert!(parse_model_path_strict("a[3].b").is_ok());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_model_path(&[]), "");
        assert_eq!(format_model_path(&[key("a"), Segment::Index(2), key("b")]), "a[2].b");
        assert_eq!(format_model_path(&[key("a"), Segment::Wildcard]), "a[]");
        assert_eq!(format_model_path(&[Segment::Index(0), key("a")]), "[0].a");
        assert_eq!(format_model_path(&[key("")]), r#"[""]"#);
    }

    #[test]
    fn test_roundtrip() {
        let paths = [
            "",
            "a",
            "a.b",
            "a[0].b",
            "a[].b",
            "groups.1.name",
            "[0][1]",
            r#"a["x.y"]["q\"r"]"#,
        ];
        for model in paths {
            let path = parse_model_path(model);
            let formatted = format_model_path(&path);
            assert_eq!(parse_model_path(&formatted), path, "Failed roundtrip for: {:?}", model);
        }
    }
}
