//! Path Expression Compiler
//!
//! Lowers a parsed [`PathExpr`] into a flat, ordered pipeline of operators.
//! Predicates keep their own nested pipeline inside [`Op::Predicate`].

use super::operator::Op;
use super::parser::{Axis, PathExpr, Step};
use crate::error::{PathError, Result};

/// Compiled path expression
///
/// Immutable once built; safe to share across threads and to evaluate any
/// number of times against any document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPath {
    expression: String,
    ops: Vec<Op>,
}

impl CompiledPath {
    /// Lower a parsed path expression
    pub fn compile(expr: &PathExpr, expression: &str) -> Self {
        let mut ops = Vec::new();
        Self::compile_path(expr, &mut ops);
        CompiledPath {
            expression: expression.to_string(),
            ops,
        }
    }

    /// Pipeline that raises `error` when evaluated
    pub fn deferred_error(expression: &str, error: &PathError) -> Self {
        let offset = match error {
            PathError::Syntax { offset, .. } => *offset,
            _ => 0,
        };
        CompiledPath {
            expression: expression.to_string(),
            ops: vec![Op::Error {
                message: error.message(),
                offset,
            }],
        }
    }

    fn compile_path(expr: &PathExpr, ops: &mut Vec<Op>) {
        if expr.absolute {
            ops.push(Op::Root);
        }
        for step in &expr.steps {
            Self::compile_step(step, ops);
        }
    }

    fn compile_step(step: &Step, ops: &mut Vec<Op>) {
        match step.axis {
            Axis::Child => ops.push(Op::Children(step.name.clone())),
            Axis::DescendantOrSelf | Axis::Attribute => {
                ops.push(if step.axis == Axis::Attribute {
                    Op::AttributeAxis
                } else {
                    Op::DescendantOrSelf
                });
                // Unfiltered axes take their name test as a separate filter
                if let Some(name) = &step.name {
                    ops.push(Op::NamedFilter(name.clone()));
                }
            }
        }

        for pred in &step.predicates {
            ops.push(Op::Predicate {
                path: CompiledPath::compile(&pred.path, &pred.path.to_string()),
                op: pred.op,
                literal: pred.literal.clone(),
            });
        }
    }

    /// Source text this pipeline was compiled from
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Operators in evaluation order
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The syntax error this pipeline defers, if any
    pub fn error(&self) -> Option<PathError> {
        self.ops.iter().find_map(|op| match op {
            Op::Error { message, offset } => Some(PathError::syntax(message.clone(), *offset)),
            _ => None,
        })
    }
}

/// Compile a path expression string.
///
/// Never fails: malformed input yields a pipeline whose only operator is
/// [`Op::Error`], so the failure surfaces when the pipeline is evaluated.
pub fn compile(expression: &str) -> CompiledPath {
    match try_compile(expression) {
        Ok(compiled) => compiled,
        Err(err) => {
            tracing::debug!(expression, error = %err, "deferring path syntax error");
            CompiledPath::deferred_error(expression, &err)
        }
    }
}

/// Compile a path expression string, reporting syntax errors immediately
pub fn try_compile(expression: &str) -> Result<CompiledPath> {
    let expr = super::parser::parse(expression)?;
    Ok(CompiledPath::compile(&expr, expression))
}
