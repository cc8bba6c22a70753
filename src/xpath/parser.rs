//! Path Parser
//!
//! Recursive descent parser producing a small syntax tree. Predicates own
//! their sub-path as a nested [`PathExpr`], so scope follows the tree shape
//! and the compiler can lower each level independently.
//!
//! Grammar:
//!
//! ```text
//! path       := '/' relative? | relative
//! relative   := step ( '/' step | desc_step )*
//! step       := child_step | attr_step | desc_step
//! child_step := ( Name | '*' ) predicate*
//! attr_step  := '@' ( Name | '*' )? predicate*
//! desc_step  := '//' ( Name | '*' )? predicate*
//! predicate  := '[' path relop literal ']'
//! literal    := String | Number | 'true' | 'false'
//! ```

use std::fmt;

use super::lexer::{Lexer, Token};
use super::value::{Literal, RelOp};
use crate::error::{PathError, Result};

/// Nested predicates deeper than this are rejected
pub const MAX_PREDICATE_DEPTH: usize = 64;

/// A parsed path: optional root anchor followed by steps
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpr {
    pub absolute: bool,
    pub steps: Vec<Step>,
}

/// Location step in a path
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub axis: Axis,
    /// Name test; None for `*` or an unnamed `//` / `@`
    pub name: Option<String>,
    pub predicates: Vec<PredicateExpr>,
}

/// Supported axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    DescendantOrSelf,
    Attribute,
}

/// Bracketed `[sub-path relop literal]` filter
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateExpr {
    pub path: PathExpr,
    pub op: RelOp,
    pub literal: Literal,
}

/// Path parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    current_start: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        let current_start = lexer.token_start();
        Parser {
            lexer,
            current,
            current_start,
            depth: 0,
        }
    }

    /// Parse a complete path expression
    pub fn parse(&mut self) -> Result<PathExpr> {
        let path = self.parse_path()?;
        if !matches!(self.current, Token::Eof) {
            return Err(self.unexpected("after path"));
        }
        Ok(path)
    }

    /// Advance to next token
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
        self.current_start = self.lexer.token_start();
    }

    fn error(&self, message: String) -> PathError {
        PathError::syntax(message, self.current_start)
    }

    fn unexpected(&self, context: &str) -> PathError {
        self.error(format!("Unexpected {} {}", self.current.describe(), context))
    }

    /// Whether the current token ends a (sub-)path
    fn at_path_end(&self) -> bool {
        matches!(
            self.current,
            Token::Eof
                | Token::RightBracket
                | Token::Eq
                | Token::NotEq
                | Token::Lt
                | Token::LtEq
                | Token::Gt
                | Token::GtEq
        )
    }

    /// Parse a path (top level or inside a predicate)
    fn parse_path(&mut self) -> Result<PathExpr> {
        let mut absolute = false;
        if matches!(self.current, Token::Slash) {
            absolute = true;
            self.advance();
            if self.at_path_end() {
                // Just /
                return Ok(PathExpr {
                    absolute,
                    steps: Vec::new(),
                });
            }
        } else if self.at_path_end() {
            return Err(self.error(format!(
                "Expected a path step, found {}",
                self.current.describe()
            )));
        }

        let mut steps = vec![self.parse_step()?];

        loop {
            match &self.current {
                Token::Slash => {
                    self.advance();
                    if !matches!(self.current, Token::Name(_) | Token::Star | Token::At) {
                        return Err(self.unexpected("after '/'"));
                    }
                    steps.push(self.parse_step()?);
                }
                Token::DoubleSlash => {
                    steps.push(self.parse_step()?);
                }
                // `//@name`: an attribute step may follow an unnamed `//` directly
                Token::At if steps.last().is_some_and(Step::is_bare_descendant) => {
                    steps.push(self.parse_step()?);
                }
                _ => break,
            }
        }

        Ok(PathExpr { absolute, steps })
    }

    /// Parse a location step
    fn parse_step(&mut self) -> Result<Step> {
        let (axis, name) = match &self.current {
            Token::DoubleSlash => {
                self.advance();
                (Axis::DescendantOrSelf, self.parse_optional_name())
            }
            Token::At => {
                self.advance();
                (Axis::Attribute, self.parse_optional_name())
            }
            Token::Name(name) => {
                let name = name.clone();
                self.advance();
                (Axis::Child, Some(name))
            }
            Token::Star => {
                self.advance();
                (Axis::Child, None)
            }
            _ => {
                return Err(self.error(format!(
                    "Expected a path step, found {}",
                    self.current.describe()
                )))
            }
        };

        let mut predicates = Vec::new();
        while matches!(self.current, Token::LeftBracket) {
            predicates.push(self.parse_predicate()?);
        }

        Ok(Step {
            axis,
            name,
            predicates,
        })
    }

    /// Name test after `//` or `@`; `*` and absence both mean unfiltered
    fn parse_optional_name(&mut self) -> Option<String> {
        match &self.current {
            Token::Name(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            Token::Star => {
                self.advance();
                None
            }
            _ => None,
        }
    }

    /// Parse `[ path relop literal ]`
    fn parse_predicate(&mut self) -> Result<PredicateExpr> {
        let open = self.current_start;
        if self.depth >= MAX_PREDICATE_DEPTH {
            return Err(self.error(format!(
                "Predicates nested deeper than {}",
                MAX_PREDICATE_DEPTH
            )));
        }
        self.advance(); // Skip [

        self.depth += 1;
        let path = self.parse_path();
        self.depth -= 1;
        let path = path?;

        let op = match &self.current {
            Token::Eq => RelOp::Eq,
            Token::NotEq => RelOp::NotEq,
            Token::Lt => RelOp::Lt,
            Token::LtEq => RelOp::LtEq,
            Token::Gt => RelOp::Gt,
            Token::GtEq => RelOp::GtEq,
            _ => return Err(self.unexpected("in predicate, expected a relational operator")),
        };
        self.advance();

        let literal = match &self.current {
            Token::String(s) => Literal::String(s.clone()),
            Token::Number(n) => Literal::Number(*n),
            Token::Name(n) if n == "true" => Literal::Boolean(true),
            Token::Name(n) if n == "false" => Literal::Boolean(false),
            _ => return Err(self.unexpected(&format!("after '{}', expected a literal", op))),
        };
        self.advance();

        if !matches!(self.current, Token::RightBracket) {
            return Err(self.error(format!(
                "Expected ']' to close predicate opened at offset {}, found {}",
                open,
                self.current.describe()
            )));
        }
        self.advance();

        Ok(PredicateExpr { path, op, literal })
    }
}

impl Step {
    /// `//` with no name test and no predicates
    fn is_bare_descendant(&self) -> bool {
        self.axis == Axis::DescendantOrSelf && self.name.is_none() && self.predicates.is_empty()
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            f.write_str("/")?;
        }
        for (i, step) in self.steps.iter().enumerate() {
            let joined = i == 0
                || step.axis == Axis::DescendantOrSelf
                || (step.axis == Axis::Attribute && self.steps[i - 1].is_bare_descendant());
            if !joined {
                f.write_str("/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.axis, &self.name) {
            (Axis::Child, Some(name)) => f.write_str(name)?,
            (Axis::Child, None) => f.write_str("*")?,
            (Axis::DescendantOrSelf, name) => write!(f, "//{}", name.as_deref().unwrap_or(""))?,
            (Axis::Attribute, name) => write!(f, "@{}", name.as_deref().unwrap_or(""))?,
        }
        for pred in &self.predicates {
            write!(f, "[{} {} {}]", pred.path, pred.op, pred.literal)?;
        }
        Ok(())
    }
}

/// Parse a path expression string
pub fn parse(input: &str) -> Result<PathExpr> {
    Parser::new(input).parse()
}
