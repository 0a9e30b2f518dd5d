use std::num::ParseIntError;

use thiserror::Error;

use crate::{Op, Pos};

/// Everything that can go wrong while compiling one SLCS formula.
///
/// Tree errors carry the path of the offending node from the root, rendered
/// like `root/left/right`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("{pos}: {message}")]
    Lexical { pos: Pos, message: String },

    #[error("{pos}: operator '{op}' has no preceding argument (at {path})")]
    MissingLeftOperand { op: Op, pos: Pos, path: String },

    #[error("{pos}: {} has no succeeding argument (at {path})", describe_parent(.op))]
    MissingRightOperand { op: Option<Op>, pos: Pos, path: String },

    #[error(
        "{pos}: operator '{op}' follows a complete binary formula, add parentheses (at {path})"
    )]
    ChainedOperator { op: Op, pos: Pos, path: String },

    #[error("{pos}: atomic proposition '{prop}' has no binding operator (at {path})")]
    UnboundProposition { prop: String, pos: Pos, path: String },

    #[error("{pos}: subformula has no binding operator (at {path})")]
    UnboundGroup { pos: Pos, path: String },

    #[error("{pos}: operator '{op}' has an invalid preceding argument (at {path})")]
    InvalidUnaryOperand { op: Op, pos: Pos, path: String },

    #[error("{pos}: unmatched ')'")]
    UnmatchedClose { pos: Pos },

    #[error("{pos}: unclosed '(' at end of input (at {path})")]
    UnclosedGroup { pos: Pos, path: String },

    #[error("{pos}: formula nests deeper than {limit} levels")]
    TooDeep { pos: Pos, limit: usize },

    #[error("{pos}: invalid range '{range}' in proposition '{prop}'")]
    NumericParse {
        prop: String,
        range: String,
        pos: Pos,
        #[source]
        source: Option<ParseIntError>,
    },
}

fn describe_parent(op: &Option<Op>) -> String {
    match op {
        Some(op) => format!("operator '{op}'"),
        None => "group".to_string(),
    }
}
