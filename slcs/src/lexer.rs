use std::ops::Range;

use chumsky::error::{Simple, SimpleReason};
use chumsky::primitive::{any, choice, end, filter, just, none_of};
use chumsky::text;
use chumsky::Parser;
use log::debug;

use crate::{CompileError, Mode, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Atom,
    Open,
    Close,
    And,
    Or,
    Not,
    Near,
    Surround,
    Comment,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: Pos,
}

// <Line>    ::= ( <Token> )* [ <Comment> ]
// <Token>   ::= `(' | `)' | `!' | `&&' | `||' | <Word> | <Bracket>
// <Word>    ::= ( ASCII letter | digit | `_' | `+' )+      `N' and `S' are operators
// <Bracket> ::= `[' ( anything but `]' )* `]'
// <Comment> ::= `%' ( rest of the line )
fn line_lexer() -> impl Parser<char, Vec<(TokenKind, String, Range<usize>)>, Error = Simple<char>>
{
    let fixed = choice((
        just("&&").to(TokenKind::And),
        just("||").to(TokenKind::Or),
        just('!').to(TokenKind::Not),
        just('(').to(TokenKind::Open),
        just(')').to(TokenKind::Close),
    ))
    .map(|kind| (kind, fixed_lexeme(kind).to_string()));

    let word = filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '+')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(|word| {
            let kind = match word.as_str() {
                "N" => TokenKind::Near,
                "S" => TokenKind::Surround,
                _ => TokenKind::Atom,
            };
            (kind, word)
        });

    let bracket = none_of("]")
        .repeated()
        .collect::<String>()
        .delimited_by(just('['), just(']'))
        .map(|inner| (TokenKind::Atom, format!("[{inner}]")));

    let comment = just('%')
        .ignore_then(any().repeated().collect::<String>())
        .map(|rest| (TokenKind::Comment, format!("%{rest}")));

    let token = choice((fixed, word, bracket, comment))
        .map_with_span(|(kind, lexeme), span: Range<usize>| (kind, lexeme, span));

    text::whitespace()
        .ignore_then(token.then_ignore(text::whitespace()).repeated())
        .then_ignore(end())
}

fn fixed_lexeme(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::And => "&&",
        TokenKind::Or => "||",
        TokenKind::Not => "!",
        TokenKind::Open => "(",
        TokenKind::Close => ")",
        TokenKind::Atom | TokenKind::Near | TokenKind::Surround | TokenKind::Comment => "",
    }
}

/// Tokenizes one line of formula source. `line` is the 1-based line number
/// used for positions.
///
/// Everything after a `%` becomes a single comment token. Atomic propositions
/// are checked against `mode`: plain mode takes words, the mCRL2 modes take a
/// bracket with exactly as many comma separated ranges as the mode has
/// channels.
pub fn tokenize_line(source: &str, line: usize, mode: Mode) -> Result<Vec<Token>, CompileError> {
    let raw = line_lexer().parse(source).map_err(|errs| lexical_error(&errs, line))?;

    let mut tokens = Vec::with_capacity(raw.len());
    for (kind, lexeme, span) in raw {
        let pos = Pos::new(line, span.start + 1);
        if kind == TokenKind::Atom {
            check_atom(&lexeme, mode).map_err(|message| CompileError::Lexical { pos, message })?;
        }
        tokens.push(Token { kind, lexeme, pos });
    }

    Ok(tokens)
}

/// Tokenizes a whole formula source, line by line.
pub fn tokenize(source: &str, mode: Mode) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    for (i, line) in source.lines().enumerate() {
        tokens.extend(tokenize_line(line, i + 1, mode)?);
    }

    debug!("Tokenized {} lines into {} tokens", source.lines().count(), tokens.len());

    Ok(tokens)
}

fn check_atom(lexeme: &str, mode: Mode) -> Result<(), String> {
    let inner = lexeme.strip_prefix('[').and_then(|l| l.strip_suffix(']'));
    match (inner, mode.channels()) {
        (None, None) => Ok(()),
        (Some(_), None) => {
            Err(format!("bracketed proposition '{lexeme}' is only allowed when bound to mCRL2"))
        }
        (None, Some(_)) => Err(format!("proposition '{lexeme}' must be a bracketed range")),
        (Some(inner), Some(channels)) => {
            let arity = inner.split(',').count();
            if arity == channels {
                Ok(())
            } else {
                Err(format!("proposition '{lexeme}' has {arity} range(s), expected {channels}"))
            }
        }
    }
}

fn lexical_error(errs: &[Simple<char>], line: usize) -> CompileError {
    let Some(err) = errs.first() else {
        return CompileError::Lexical { pos: Pos::new(line, 1), message: "invalid input".into() };
    };

    let message = match err.reason() {
        SimpleReason::Unclosed { delimiter, .. } => format!("unclosed '{delimiter}'"),
        SimpleReason::Custom(message) => message.clone(),
        SimpleReason::Unexpected => match err.found() {
            Some(c) => format!("unexpected character '{c}'"),
            None => "unexpected end of line".to_string(),
        },
    };

    CompileError::Lexical { pos: Pos::new(line, err.span().start + 1), message }
}
