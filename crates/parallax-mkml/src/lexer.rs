use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Ident(String),
    Str(String),
    Number(f32),
    Bool(bool),
    /// Color literal: `[r, g, b, a]` straight-alpha bytes as parsed from `#rrggbbaa`.
    Color([u8; 4]),
    // Punctuation
    Colon,
    LBrace,
    RBrace,
    // Keywords
    Import,
    As,
    // Sentinel
    Eof,
}

/// A token plus the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let (line, col) = (self.line, self.col);
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(TokenWithPos { token, line, col });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            if self.src[self.pos..].starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if self.src[self.pos..].starts_with("/*") {
                self.advance();
                self.advance();
                loop {
                    if self.src[self.pos..].starts_with("*/") {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.advance().is_none() {
                        break; // unterminated: EOF surfaces on the next token
                    }
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let ch = match self.peek() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        match ch {
            ':' => { self.advance(); Ok(Token::Colon) }
            '{' => { self.advance(); Ok(Token::LBrace) }
            '}' => { self.advance(); Ok(Token::RBrace) }
            '"' => self.lex_string(),
            '#' => self.lex_color(),
            c if c.is_ascii_digit() || c == '-' || c == '.' => self.lex_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.lex_ident_or_keyword()),
            other => Err(self.err(format!("unexpected character {:?}", other))),
        }
    }

    fn lex_string(&mut self) -> Result<Token, ParseError> {
        self.advance(); // opening `"`
        let mut s = String::new();
        loop {
            match self.advance() {
                None => return Err(self.err("unterminated string literal")),
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('"') => s.push('"'),
                    Some('\\') => s.push('\\'),
                    Some(c) => s.push(c),
                    None => return Err(self.err("unterminated escape sequence")),
                },
                Some(c) => s.push(c),
            }
        }
        Ok(Token::Str(s))
    }

    fn lex_color(&mut self) -> Result<Token, ParseError> {
        self.advance(); // `#`
        let start = self.pos;
        let mut count = 0;
        while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            self.advance();
            count += 1;
        }
        if count != 6 && count != 8 {
            return Err(self.err(format!(
                "color literal must be #rrggbb or #rrggbbaa, got {} digits",
                count
            )));
        }
        let hex = &self.src[start..self.pos];
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        let parsed = (|| -> Result<[u8; 4], std::num::ParseIntError> {
            let a = if count == 8 { byte(6)? } else { 255 };
            Ok([byte(0)?, byte(2)?, byte(4)?, a])
        })();
        parsed
            .map(Token::Color)
            .map_err(|e| self.err(format!("invalid color literal #{hex}: {e}")))
    }

    fn lex_number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let s = &self.src[start..self.pos];
        s.parse::<f32>()
            .map(Token::Number)
            .map_err(|_| self.err(format!("invalid number {:?}", s)))
    }

    /// Identifiers may contain `-` after the first character so that
    /// attribute-style keys such as `data-webgl-canvas` lex as one token.
    fn lex_ident_or_keyword(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '-') {
            self.advance();
        }
        let word = &self.src[start..self.pos];
        match word {
            "import" => Token::Import,
            "as" => Token::As,
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            _ => Token::Ident(word.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn hyphenated_ident_is_one_token() {
        assert_eq!(
            tokens("data-webgl-canvas: true"),
            vec![
                Token::Ident("data-webgl-canvas".into()),
                Token::Colon,
                Token::Bool(true),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn negative_number_still_lexes() {
        assert_eq!(tokens("-4.5"), vec![Token::Number(-4.5), Token::Eof]);
    }

    #[test]
    fn positions_are_one_based() {
        let toks = Lexer::new("Page {\n  title: \"x\"\n}").tokenize().unwrap();
        assert_eq!((toks[0].line, toks[0].col), (1, 1));
        assert_eq!((toks[2].line, toks[2].col), (2, 3));
    }

    #[test]
    fn six_digit_color_is_opaque() {
        assert_eq!(tokens("#c7bcbc"), vec![Token::Color([0xc7, 0xbc, 0xbc, 0xff]), Token::Eof]);
    }

    #[test]
    fn error_carries_position() {
        let err = Lexer::new("Page {\n  @").tokenize().unwrap_err();
        assert_eq!((err.line, err.col), (2, 3));
    }
}
