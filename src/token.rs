use std::fmt::{self, Display};
use std::rc::Rc;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::expr::Val;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    Identifier,
    String,
    Number,

    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    // Only produced when the scanner is configured to keep comments.
    SingleLineComment,
    MultiLineComment,

    Eof,
}

lazy_static! {
    static ref KEYWORDS: FxHashMap<&'static str, TokenKind> = {
        let mut map = FxHashMap::default();
        map.insert("and", TokenKind::And);
        map.insert("class", TokenKind::Class);
        map.insert("else", TokenKind::Else);
        map.insert("false", TokenKind::False);
        map.insert("fun", TokenKind::Fun);
        map.insert("for", TokenKind::For);
        map.insert("if", TokenKind::If);
        map.insert("nil", TokenKind::Nil);
        map.insert("or", TokenKind::Or);
        map.insert("print", TokenKind::Print);
        map.insert("return", TokenKind::Return);
        map.insert("super", TokenKind::Super);
        map.insert("this", TokenKind::This);
        map.insert("true", TokenKind::True);
        map.insert("var", TokenKind::Var);
        map.insert("while", TokenKind::While);
        map
    };
}

/// Reserved-word lookup for a scanned identifier.
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Rc<str>,
    pub literal: Option<Val>,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: Rc<str>, literal: Option<Val>, line: usize) -> Self {
        Token {
            kind,
            lexeme,
            literal,
            line,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match self.kind {
            // The lexeme of a string or block comment may span several
            // physical lines; the decoded literal is the value that matters.
            TokenKind::String | TokenKind::SingleLineComment | TokenKind::MultiLineComment => {
                (&self.literal, self.line) == (&other.literal, other.line)
            }
            _ => (&self.lexeme, self.line) == (&other.lexeme, other.line),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {:?} {}", self.line, self.kind, self.lexeme)?;
        if let Some(literal) = &self.literal {
            write!(f, " {}", literal)?;
        }
        Ok(())
    }
}
