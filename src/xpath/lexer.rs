//! Path Lexer
//!
//! Tokenizes path expressions into tokens. Malformed input never fails here:
//! unterminated quotes and stray characters come out as
//! [`Token::Unrecognized`] and are reported by the parser.

use memchr::memchr;

/// Path token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Separators
    Slash,       // /
    DoubleSlash, // //
    At,          // @
    Star,        // *

    // Relational operators
    Eq,    // =
    NotEq, // !=
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=

    // Brackets
    LeftBracket,  // [
    RightBracket, // ]

    // Literals
    Number(f64),
    String(String),

    // Names
    Name(String),

    /// Text the lexer could not make sense of
    Unrecognized(String),

    // End of input
    Eof,
}

impl Token {
    /// Short description used in parser error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Slash => "'/'".to_string(),
            Token::DoubleSlash => "'//'".to_string(),
            Token::At => "'@'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Eq => "'='".to_string(),
            Token::NotEq => "'!='".to_string(),
            Token::Lt => "'<'".to_string(),
            Token::LtEq => "'<='".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::GtEq => "'>='".to_string(),
            Token::LeftBracket => "'['".to_string(),
            Token::RightBracket => "']'".to_string(),
            Token::Number(n) => format!("number {}", n),
            Token::String(s) => format!("string '{}'", s),
            Token::Name(n) => format!("name '{}'", n),
            Token::Unrecognized(s) => format!("unrecognized input '{}'", s),
            Token::Eof => "end of expression".to_string(),
        }
    }
}

/// Path lexer
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            token_start: 0,
        }
    }

    /// Byte offset where the most recently returned token started
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the remaining input
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Peek at current character
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peek at character at offset
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.remaining().chars().nth(offset)
    }

    /// Advance by n bytes
    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Skip whitespace
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }
    }

    /// Consume `second` if it follows, choosing between two tokens
    fn one_or_two(&mut self, second: char, single: Token, double: Token) -> Token {
        self.advance(1);
        if self.peek() == Some(second) {
            self.advance(1);
            double
        } else {
            single
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.token_start = self.pos;

        let c = match self.peek() {
            Some(c) => c,
            None => return Token::Eof,
        };

        match c {
            '/' => self.one_or_two('/', Token::Slash, Token::DoubleSlash),
            '<' => self.one_or_two('=', Token::Lt, Token::LtEq),
            '>' => self.one_or_two('=', Token::Gt, Token::GtEq),
            '@' => {
                self.advance(1);
                Token::At
            }
            '*' => {
                self.advance(1);
                Token::Star
            }
            '=' => {
                self.advance(1);
                Token::Eq
            }
            '!' => {
                self.advance(1);
                if self.peek() == Some('=') {
                    self.advance(1);
                    Token::NotEq
                } else {
                    Token::Unrecognized("!".to_string())
                }
            }
            '[' => {
                self.advance(1);
                Token::LeftBracket
            }
            ']' => {
                self.advance(1);
                Token::RightBracket
            }
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.read_number(),
            '"' | '\'' => self.read_string(c),
            '0'..='9' => self.read_number(),
            _ if is_name_start_char(c) => self.read_name(),
            _ => {
                self.advance(c.len_utf8());
                Token::Unrecognized(c.to_string())
            }
        }
    }

    /// Read a number literal
    fn read_number(&mut self) -> Token {
        let start = self.pos;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(1);
        }

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(1); // Skip '.'
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance(1);
            }
        }

        let num_str = &self.input[start..self.pos];
        match num_str.parse() {
            Ok(value) => Token::Number(value),
            Err(_) => Token::Unrecognized(num_str.to_string()),
        }
    }

    /// Read a quoted string literal
    fn read_string(&mut self, quote: char) -> Token {
        self.advance(1); // Skip opening quote
        let start = self.pos;

        match memchr(quote as u8, self.remaining().as_bytes()) {
            Some(len) => {
                let value = self.input[start..start + len].to_string();
                self.advance(len + 1); // Content plus closing quote
                Token::String(value)
            }
            None => {
                let rest = self.remaining();
                self.advance(rest.len());
                Token::Unrecognized(format!("{}{}", quote, rest))
            }
        }
    }

    /// Read a name
    fn read_name(&mut self) -> Token {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if is_name_char(c) {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }

        Token::Name(self.input[start..self.pos].to_string())
    }

    /// Tokenize entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        tokens
    }
}

fn is_name_start_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || c == ':'
}
