use std::fmt;

/// Error from page markup or a selector string.
///
/// Positions are 1-based. Selector errors always report line 1, with the
/// column pointing into the selector text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: message.into(), line, col }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use crate::{parse_str, Selector};

    #[test]
    fn reports_position_of_the_offending_token() {
        let e = parse_str("Page {\n  scope: : Canvas\n}").unwrap_err();
        assert_eq!((e.line, e.col), (2, 10));
        assert!(e.to_string().starts_with("2:10: "));
    }

    #[test]
    fn selector_errors_point_into_the_selector() {
        let e = Selector::parse("Canvas[ref").unwrap_err();
        assert_eq!((e.line, e.col), (1, 7));
    }
}
