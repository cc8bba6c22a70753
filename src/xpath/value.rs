//! Predicate Values
//!
//! Literals that appear on the right-hand side of a predicate, the six
//! relational operators, and the coercion rules used to compare a node's
//! value against a literal.

use std::cmp::Ordering;
use std::fmt;

/// Relational operator in a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl RelOp {
    /// Whether an ordering outcome satisfies this operator
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            RelOp::Eq => ordering == Ordering::Equal,
            RelOp::NotEq => ordering != Ordering::Equal,
            RelOp::Lt => ordering == Ordering::Less,
            RelOp::LtEq => ordering != Ordering::Greater,
            RelOp::Gt => ordering == Ordering::Greater,
            RelOp::GtEq => ordering != Ordering::Less,
        }
    }

    /// Compare two numbers; any NaN operand fails every operator except `!=`
    fn compare_f64(self, left: f64, right: f64) -> bool {
        match left.partial_cmp(&right) {
            Some(ordering) => self.accepts(ordering),
            None => self == RelOp::NotEq,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelOp::Eq => "=",
            RelOp::NotEq => "!=",
            RelOp::Lt => "<",
            RelOp::LtEq => "<=",
            RelOp::Gt => ">",
            RelOp::GtEq => ">=",
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed comparison operand
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl Literal {
    /// Compare a node value against this literal with `op`.
    ///
    /// Numeric comparison is used when both sides parse as numbers, lexical
    /// comparison otherwise. A boolean literal only matches values that
    /// coerce to a boolean; anything else does not satisfy the comparison.
    pub fn satisfied_by(&self, value: &str, op: RelOp) -> bool {
        match self {
            Literal::Number(n) => match parse_number(value) {
                Some(v) => op.compare_f64(v, *n),
                None => op.accepts(value.cmp(format_number(*n).as_str())),
            },
            Literal::String(s) => match (parse_number(value), parse_number(s)) {
                (Some(v), Some(n)) => op.compare_f64(v, n),
                _ => op.accepts(value.cmp(s.as_str())),
            },
            Literal::Boolean(b) => match parse_boolean(value) {
                Some(v) => op.accepts(v.cmp(b)),
                None => false,
            },
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) if s.contains('\'') => write!(f, "\"{}\"", s),
            Literal::String(s) => write!(f, "'{}'", s),
            Literal::Number(n) => f.write_str(&format_number(*n)),
            Literal::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Parse a trimmed value as a number
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Coerce a value to a boolean (`true`/`false` in any case, `1`/`0`)
pub fn parse_boolean(s: &str) -> Option<bool> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        Some(false)
    } else {
        None
    }
}

/// Canonical text of a number (integers without a fractional part)
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_comparison() {
        let lit = Literal::Number(25.0);
        assert!(lit.satisfied_by("30", RelOp::Gt));
        assert!(lit.satisfied_by(" 25 ", RelOp::Eq));
        assert!(!lit.satisfied_by("20", RelOp::GtEq));
        assert!(lit.satisfied_by("20", RelOp::LtEq));
        assert!(lit.satisfied_by("20", RelOp::NotEq));
    }

    #[test]
    fn test_numeric_not_lexical() {
        // Lexically "100" < "25", numerically it is greater
        assert!(Literal::Number(25.0).satisfied_by("100", RelOp::Gt));
        assert!(Literal::String("25".to_string()).satisfied_by("100", RelOp::Gt));
    }

    #[test]
    fn test_number_literal_against_text_falls_back_to_lexical() {
        let lit = Literal::Number(30.0);
        assert!(!lit.satisfied_by("thirty", RelOp::Eq));
        assert!(lit.satisfied_by("thirty", RelOp::NotEq));
        assert!(lit.satisfied_by("thirty", RelOp::Gt));
    }

    #[test]
    fn test_string_comparison() {
        let lit = Literal::String("WEB".to_string());
        assert!(lit.satisfied_by("WEB", RelOp::Eq));
        assert!(!lit.satisfied_by("web", RelOp::Eq));
        assert!(lit.satisfied_by("COOKING", RelOp::Lt));
        assert!(lit.satisfied_by("COOKING", RelOp::NotEq));
    }

    #[test]
    fn test_boolean_comparison() {
        let lit = Literal::Boolean(true);
        assert!(lit.satisfied_by("true", RelOp::Eq));
        assert!(lit.satisfied_by(" TRUE ", RelOp::Eq));
        assert!(lit.satisfied_by("1", RelOp::Eq));
        assert!(lit.satisfied_by("false", RelOp::Lt));
        assert!(!lit.satisfied_by("yes", RelOp::Eq));
        assert!(!lit.satisfied_by("yes", RelOp::NotEq));
    }

    #[test]
    fn test_nan_never_equal() {
        assert!(!Literal::Number(f64::NAN).satisfied_by("1", RelOp::Eq));
        assert!(Literal::Number(f64::NAN).satisfied_by("1", RelOp::NotEq));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(3.25), "3.25");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::String("en".to_string()).to_string(), "'en'");
        assert_eq!(Literal::String("it's".to_string()).to_string(), "\"it's\"");
        assert_eq!(Literal::Number(20.0).to_string(), "20");
        assert_eq!(RelOp::GtEq.to_string(), ">=");
    }
}
