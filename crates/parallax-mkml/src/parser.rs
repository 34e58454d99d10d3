use crate::ast::{DslDocument, Import, Node, Prop, Value};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::new(msg, line, col)
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek().clone() {
            Token::Ident(s) => {
                self.advance();
                Ok(s)
            }
            tok => Err(self.err(format!("expected identifier, got {:?}", tok))),
        }
    }

    fn expect_str(&mut self) -> Result<String, ParseError> {
        match self.peek().clone() {
            Token::Str(s) => {
                self.advance();
                Ok(s)
            }
            tok => Err(self.err(format!("expected string, got {:?}", tok))),
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<(), ParseError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected {:?}, got {:?}", expected, self.peek())))
        }
    }

    // ── Document ──────────────────────────────────────────────────────────

    pub fn parse_document(&mut self) -> Result<DslDocument, ParseError> {
        let mut imports = Vec::new();
        while self.peek() == &Token::Import {
            imports.push(self.parse_import()?);
        }

        let root = self.parse_node()?;

        if self.peek() != &Token::Eof {
            return Err(self.err(format!(
                "unexpected {:?} after the root element",
                self.peek()
            )));
        }

        Ok(DslDocument { imports, root })
    }

    fn parse_import(&mut self) -> Result<Import, ParseError> {
        self.advance(); // `import`
        let path = self.expect_str()?;
        self.expect_token(&Token::As)?;
        let alias = self.expect_ident()?;
        Ok(Import { path, alias })
    }

    // ── Node ──────────────────────────────────────────────────────────────

    fn parse_node(&mut self) -> Result<Node, ParseError> {
        let widget = self.expect_ident()?;

        let content = match self.peek() {
            Token::Str(_) => Some(self.expect_str()?),
            _ => None,
        };

        let (props, children) = if self.peek() == &Token::LBrace {
            self.parse_block()?
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Node { widget, content, props, children })
    }

    /// Parse `{ item* }` where each item is a `key: value` property or a child
    /// node. `Ident ":"` is a property; any other `Ident` starts a child.
    fn parse_block(&mut self) -> Result<(Vec<Prop>, Vec<Node>), ParseError> {
        self.advance(); // `{`
        let mut props = Vec::new();
        let mut children = Vec::new();

        loop {
            match self.peek() {
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Eof => return Err(self.err("unclosed '{' block")),
                Token::Ident(_) => {
                    if self.peek_ahead(1) == &Token::Colon {
                        props.push(self.parse_prop()?);
                    } else {
                        children.push(self.parse_node()?);
                    }
                }
                tok => {
                    return Err(self.err(format!(
                        "unexpected {:?} inside block, expected a property (key: value) or an element name",
                        tok
                    )));
                }
            }
        }

        Ok((props, children))
    }

    fn parse_prop(&mut self) -> Result<Prop, ParseError> {
        let key = self.expect_ident()?;
        self.advance(); // `:`
        let value = self.parse_value()?;
        Ok(Prop { key, value })
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match self.peek().clone() {
            Token::Str(s) => Value::Str(s),
            Token::Number(n) => Value::Number(n),
            Token::Bool(b) => Value::Bool(b),
            Token::Color(c) => Value::Color(c),
            Token::Ident(s) => Value::Ident(s),
            tok => return Err(self.err(format!("expected a value, got {:?}", tok))),
        };
        self.advance();
        Ok(value)
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse a `.mkml` source string into a [`DslDocument`].
pub fn parse_str(src: &str) -> Result<DslDocument, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_document()
}
