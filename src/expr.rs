use std::{fmt, rc::Rc};

use crate::token::TokenKind;

#[derive(Debug, PartialEq, Clone)]
pub enum Val {
    String(Rc<str>),
    Num(f64),
    Bool(bool),
    Nil,
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::String(x) => write!(f, "{}", x),
            Self::Num(x) => write!(f, "{}", x),
            Self::Bool(x) => write!(f, "{}", x),
            Self::Nil => write!(f, "nil"),
        }
    }
}

pub type ExprRef = Box<Expr>;

/// Expression tree. Every node exclusively owns its children, so the
/// structure is acyclic by construction.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Binary(TokenKind, ExprRef, ExprRef),
    Unary(TokenKind, ExprRef),
    /// Explicit parentheses kept as their own node, so `(a + b) * c` stays
    /// distinguishable from `a + b * c` after parsing.
    Group(ExprRef),
    Literal(Val),
}
