use log::debug;

use crate::lexer::tokenize;
use crate::tree::{NodeId, SyntaxTree, Value, MAX_DEPTH};
use crate::{CompileError, Mode, Op, Pos, Token, TokenKind};

// <Form> ::= <Atom>
//          | `(' <Form> `)'
//          | `!' <Form>
//          | `N' <Form>
//          | <Form> `&&' <Form>
//          | <Form> `||' <Form>
//          | <Form> `S' <Form>
//
// Binary operators don't associate: chaining two of them needs parentheses.
// Unary operators bind to the single term after them.
pub fn parse_slcs(source: &str, mode: Mode) -> Result<SyntaxTree, CompileError> {
    let tokens = tokenize(source, mode)?;
    build_tree(&tokens, mode)
}

/// Builds the syntax tree of a token stream, as if the whole stream was
/// wrapped in one more pair of parentheses.
pub fn build_tree(tokens: &[Token], mode: Mode) -> Result<SyntaxTree, CompileError> {
    let mut builder = TreeBuilder::new(mode);

    builder.open(Pos::new(1, 1))?;
    for token in tokens {
        builder.feed(token)?;
    }

    let end = match tokens.last() {
        Some(last) => Pos::new(last.pos.line, last.pos.col + last.lexeme.chars().count()),
        None => Pos::new(1, 1),
    };
    let tree = builder.finish(end)?;

    debug!("Built syntax tree: {tree}");

    Ok(tree)
}

/// What the cursor is waiting for.
enum State {
    /// The cursor is an empty slot: a proposition, a group or a unary operator
    /// must fill it.
    ExpectingTerm,
    /// The cursor is a group or a binary operator whose last operand is
    /// complete: a binary operator or `)` may follow.
    AfterTerm,
}

struct TreeBuilder {
    tree: SyntaxTree,
    cursor: NodeId,
    mode: Mode,
}

impl TreeBuilder {
    fn new(mode: Mode) -> Self {
        let tree = SyntaxTree::new();
        let cursor = tree.root();
        Self { tree, cursor, mode }
    }

    fn state(&self) -> State {
        match self.tree.node(self.cursor).is_leaf() {
            true => State::ExpectingTerm,
            false => State::AfterTerm,
        }
    }

    fn path(&self) -> String {
        self.tree.path(self.cursor)
    }

    fn feed(&mut self, token: &Token) -> Result<(), CompileError> {
        let pos = token.pos;
        match token.kind {
            TokenKind::Comment => Ok(()),
            TokenKind::Open => self.open(pos),
            TokenKind::Close => self.close(pos),
            TokenKind::Atom => self.proposition(&token.lexeme, pos),
            TokenKind::Not => self.unary(Op::Not, pos),
            TokenKind::Near => self.unary(Op::Near, pos),
            TokenKind::And => self.binary(Op::And, pos),
            TokenKind::Or => self.binary(Op::Or, pos),
            TokenKind::Surround => self.binary(Op::Surround, pos),
        }
    }

    fn open(&mut self, pos: Pos) -> Result<(), CompileError> {
        match self.state() {
            State::ExpectingTerm => {
                self.tree.set_pos(self.cursor, pos);
                let group = self.tree.insert_left(self.cursor);
                self.descend(group, pos)
            }
            State::AfterTerm => Err(CompileError::UnboundGroup { pos, path: self.path() }),
        }
    }

    fn close(&mut self, pos: Pos) -> Result<(), CompileError> {
        match self.state() {
            // The empty slot never got a value, so blame whatever created it.
            State::ExpectingTerm => {
                let op = self.tree.node(self.tree.parent_of(self.cursor)).op();
                Err(CompileError::MissingRightOperand { op, pos, path: self.path() })
            }
            State::AfterTerm if self.cursor == self.tree.root() => {
                Err(CompileError::UnmatchedClose { pos })
            }
            State::AfterTerm => {
                self.complete(self.cursor);
                Ok(())
            }
        }
    }

    fn binary(&mut self, op: Op, pos: Pos) -> Result<(), CompileError> {
        let node = self.tree.node(self.cursor);
        if node.left().is_none() {
            return Err(CompileError::MissingLeftOperand { op, pos, path: self.path() });
        }
        if node.right().is_some() {
            return Err(CompileError::ChainedOperator { op, pos, path: self.path() });
        }

        self.tree.set_value(self.cursor, Value::Op(op), pos);
        let operand = self.tree.insert_right(self.cursor);
        self.descend(operand, pos)
    }

    fn unary(&mut self, op: Op, pos: Pos) -> Result<(), CompileError> {
        if self.tree.node(self.cursor).left().is_some() {
            return Err(CompileError::InvalidUnaryOperand { op, pos, path: self.path() });
        }

        self.tree.set_value(self.cursor, Value::Op(op), pos);
        let operand = self.tree.insert_right(self.cursor);
        self.descend(operand, pos)
    }

    fn proposition(&mut self, lexeme: &str, pos: Pos) -> Result<(), CompileError> {
        if let State::AfterTerm = self.state() {
            let prop = lexeme.to_string();
            return Err(CompileError::UnboundProposition { prop, pos, path: self.path() });
        }

        let payload = match self.mode.is_bound() {
            true => lexeme.strip_prefix('[').and_then(|l| l.strip_suffix(']')).unwrap_or(lexeme),
            false => lexeme,
        };
        self.tree.set_value(self.cursor, Value::Prop(payload.to_string()), pos);
        self.complete(self.cursor);
        Ok(())
    }

    fn descend(&mut self, child: NodeId, pos: Pos) -> Result<(), CompileError> {
        if self.tree.node(child).depth() > MAX_DEPTH {
            return Err(CompileError::TooDeep { pos, limit: MAX_DEPTH });
        }
        self.cursor = child;
        Ok(())
    }

    /// Moves the cursor past the completed term `id`. A unary operator is
    /// complete as soon as its operand is, so nested ones close together.
    fn complete(&mut self, id: NodeId) {
        let mut cur = self.tree.parent_of(id);
        while self.tree.node(cur).op().is_some_and(Op::is_unary) {
            cur = self.tree.parent_of(cur);
        }
        self.cursor = cur;
    }

    /// Closes the implicit outer group.
    fn finish(self, end: Pos) -> Result<SyntaxTree, CompileError> {
        match self.state() {
            State::ExpectingTerm => {
                let op = self.tree.node(self.tree.parent_of(self.cursor)).op();
                Err(CompileError::MissingRightOperand { op, pos: end, path: self.path() })
            }
            State::AfterTerm if self.cursor != self.tree.root() => {
                Err(CompileError::UnclosedGroup { pos: end, path: self.path() })
            }
            State::AfterTerm => Ok(self.tree),
        }
    }
}
