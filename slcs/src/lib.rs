mod arena;
mod conv;
mod emit;
mod error;
mod lexer;
mod parser;
mod tree;


use std::fmt;

pub use conv::translate;
pub use emit::{compile, compile_file, emit, mcf_path, MU_PREFIX};
pub use error::CompileError;
pub use lexer::{tokenize, tokenize_line, Token, TokenKind};
pub use parser::{build_tree, parse_slcs};
pub use tree::{Node, NodeId, SyntaxTree, Value, MAX_DEPTH};

/// How atomic propositions are read and translated.
///
/// `Plain` produces a free-standing formula over named actions. The other two
/// modes are bound to the image encoder's mCRL2 vocabulary (`Pixel`, `report`,
/// `R`) and differ in how many colour channels a proposition constrains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Plain,
    SingleChannel,
    ThreeChannel,
}

impl Mode {
    /// Folds the two command line switches into a mode. The single channel
    /// switch only matters for the mCRL2-bound translation.
    pub fn from_flags(mcrl2: bool, single_channel: bool) -> Self {
        match (mcrl2, single_channel) {
            (false, _) => Mode::Plain,
            (true, true) => Mode::SingleChannel,
            (true, false) => Mode::ThreeChannel,
        }
    }

    pub fn is_bound(self) -> bool {
        self != Mode::Plain
    }

    /// Number of `lo-hi` ranges a bracketed proposition must contain.
    pub fn channels(self) -> Option<usize> {
        match self {
            Mode::Plain => None,
            Mode::SingleChannel => Some(1),
            Mode::ThreeChannel => Some(3),
        }
    }
}

/// The SLCS operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Not,
    Near,
    And,
    Or,
    Surround,
}

impl Op {
    pub fn is_unary(self) -> bool {
        matches!(self, Op::Not | Op::Near)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Op::Not => "!",
            Op::Near => "N",
            Op::And => "&&",
            Op::Or => "||",
            Op::Surround => "S",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A 1-based line and column in the formula source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(line: usize, col: usize) -> Self {
        Pos { line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
