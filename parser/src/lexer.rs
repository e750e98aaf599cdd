//! Lexer (tokenizer) for predicate source text.

use crate::{ParseError, ParseResult, Span};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords (case-insensitive)
    And,
    Or,
    Not,
    In,
    Is,
    Null,
    True,
    False,

    // Literals
    Ident(String),
    Int(i64),
    Float(f64),
    String(String),

    // Symbols
    LParen,       // (
    RParen,       // )
    LBracket,     // [
    RBracket,     // ]
    Comma,        // ,
    Dot,          // .
    Eq,           // = or ==
    NotEq,        // !=
    Lt,           // <
    LtEq,         // <=
    Gt,           // >
    GtEq,         // >=
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    Percent,      // %
    NullCoalesce, // ??

    // End of file
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::In => "IN",
            TokenKind::Is => "IS",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::String(_) => "string",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::NullCoalesce => "??",
            TokenKind::Eof => "end of input",
        }
    }

    /// Returns true if this token is a keyword (not an identifier, literal, or punctuation).
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::In
                | TokenKind::Is
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
        )
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn current_span(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Consume the next character if it equals `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => {
                // `=` and `==` both mean equality
                self.eat('=');
                TokenKind::Eq
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Not
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::And
                } else {
                    return Err(ParseError::new(
                        "unexpected character '&', did you mean '&&'?",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::Or
                } else {
                    return Err(ParseError::new(
                        "unexpected character '|', did you mean '||'?",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
            '?' => {
                if self.eat('?') {
                    TokenKind::NullCoalesce
                } else {
                    return Err(ParseError::new(
                        "unexpected character '?', did you mean '??'?",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
            '"' | '\'' => self.scan_string(c, start, start_line, start_col)?,
            '`' => self.scan_quoted_ident(start, start_line, start_col)?,
            '_' | 'a'..='z' | 'A'..='Z' => self.scan_ident_or_keyword(c),
            '0'..='9' => self.scan_number(c, start, start_line, start_col)?,
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", c),
                    self.span_from(start, start_line, start_col),
                ));
            }
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn scan_string(
        &mut self,
        quote: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::new(
                        "unterminated string literal",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some(c) if c == quote => break,
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some(c) => {
                            return Err(ParseError::new(
                                format!("invalid escape sequence '\\{}'", c),
                                self.current_span(),
                            ));
                        }
                        None => {
                            return Err(ParseError::new(
                                "unterminated escape sequence",
                                self.current_span(),
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    /// Scan a backtick-quoted field name such as `` `ram-gb` ``.
    fn scan_quoted_ident(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut name = String::new();

        loop {
            match self.next_char() {
                None | Some('\n') => {
                    return Err(ParseError::new(
                        "unterminated quoted name",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('`') => break,
                Some(c) => name.push(c),
            }
        }

        if name.is_empty() {
            return Err(ParseError::new(
                "quoted name cannot be empty",
                self.span_from(start, start_line, start_col),
            ));
        }

        Ok(TokenKind::Ident(name))
    }

    fn scan_ident_or_keyword(&mut self, first: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first);

        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        // Check for keywords (case-insensitive)
        match ident.to_uppercase().as_str() {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            "IN" => TokenKind::In,
            "IS" => TokenKind::Is,
            "NULL" => TokenKind::Null,
            "TRUE" => TokenKind::True,
            "FALSE" => TokenKind::False,
            // CONTAINS, STARTS, ENDS, WITH, MATCHES are context-specific
            // and handled as identifiers to avoid conflicts with field names
            _ => TokenKind::Ident(ident),
        }
    }

    fn scan_number(
        &mut self,
        first: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut number = String::new();
        number.push(first);

        // Integer part
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                number.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        // Check for decimal point
        let has_decimal = if self.peek_char() == Some('.') {
            // Look ahead to see what follows the '.'
            let mut lookahead = self.chars.clone();
            lookahead.next(); // consume '.'
            match lookahead.peek() {
                // Digit follows '.': consume it and the fractional part
                Some((_, next_c)) if next_c.is_ascii_digit() => {
                    number.push('.');
                    self.next_char();
                    while let Some(c) = self.peek_char() {
                        if c.is_ascii_digit() {
                            number.push(c);
                            self.next_char();
                        } else {
                            break;
                        }
                    }
                    true
                }
                // No digit after '.': leave it for the parser to reject
                _ => false,
            }
        } else {
            false
        };

        // Check for exponent (scientific notation)
        let has_exponent = matches!(self.peek_char(), Some('e' | 'E'));
        if has_exponent {
            self.scan_exponent(&mut number)?;
        }

        if !has_decimal && !has_exponent {
            if let Ok(value) = number.parse::<i64>() {
                return Ok(TokenKind::Int(value));
            }
        }

        // Integers beyond i64 read as floats, as document numbers do
        let value: f64 = number.parse().map_err(|_| {
            ParseError::new(
                format!("invalid number literal '{}'", number),
                self.span_from(start, start_line, start_col),
            )
        })?;
        Ok(TokenKind::Float(value))
    }

    /// Scan the exponent part of a number (e.g., e10, E-5, e+3)
    fn scan_exponent(&mut self, number: &mut String) -> ParseResult<()> {
        // Consume 'e' or 'E'
        if let Some(c) = self.next_char() {
            number.push(c);
        }

        // Optional sign
        if let Some(c) = self.peek_char() {
            if c == '+' || c == '-' {
                number.push(c);
                self.next_char();
            }
        }

        // Exponent digits (at least one required)
        let mut has_digits = false;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                number.push(c);
                self.next_char();
                has_digits = true;
            } else {
                break;
            }
        }

        if !has_digits {
            return Err(ParseError::new(
                format!("invalid exponent in number literal '{}'", number),
                self.current_span(),
            ));
        }

        Ok(())
    }
}
