use thiserror::Error;

use crate::expr::{Expr, ExprRef, Val};
use crate::report::Reporter;
use crate::token::{Token, TokenKind};

type ExprResult = Result<ExprRef, SyntaxError>;

/// A grammar violation. Aborts the parse in progress; the caller never sees
/// a partially built tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("Expect ')' after expression.")]
    UnclosedGroup { token: Token },
    #[error("Expect expression.")]
    ExpectExpression { token: Token },
}

impl SyntaxError {
    /// The token the parser was looking at when the grammar broke down.
    pub fn token(&self) -> &Token {
        match self {
            Self::UnclosedGroup { token } | Self::ExpectExpression { token } => token,
        }
    }
}

/// Recursive-descent parser for a single expression.
///
/// `tokens` must come from [`crate::scanner::scan`], which guarantees the
/// sequence is terminated by an `Eof` token.
pub struct Parser<'a> {
    tokens: &'a [Token],
    reporter: &'a mut Reporter,
    index: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], reporter: &'a mut Reporter) -> Parser<'a> {
        Parser {
            tokens,
            reporter,
            index: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Expr, SyntaxError> {
        self.expression().map(|expr| *expr)
    }

    // Grammar, lowest to highest precedence. Every binary level parses its
    // right operand one level up and folds left.
    fn expression(&mut self) -> ExprResult {
        self.equality()
    }

    fn equality(&mut self) -> ExprResult {
        let mut expr = self.comparison()?;

        while let Some(op) = self.match_next([TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let right = self.comparison()?;
            expr = Box::new(Expr::Binary(op, expr, right));
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ExprResult {
        let mut expr = self.term()?;

        // The right operand parses at the term level. Recursing into
        // comparison itself would group `a < b < c` to the right.
        while let Some(op) = self.match_next([
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let right = self.term()?;
            expr = Box::new(Expr::Binary(op, expr, right));
        }

        Ok(expr)
    }

    fn term(&mut self) -> ExprResult {
        let mut expr = self.factor()?;

        while let Some(op) = self.match_next([TokenKind::Minus, TokenKind::Plus]) {
            let right = self.factor()?;
            expr = Box::new(Expr::Binary(op, expr, right));
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ExprResult {
        let mut expr = self.unary()?;

        while let Some(op) = self.match_next([TokenKind::Slash, TokenKind::Star]) {
            let right = self.unary()?;
            expr = Box::new(Expr::Binary(op, expr, right));
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ExprResult {
        if let Some(op) = self.match_next([TokenKind::Bang, TokenKind::Minus]) {
            let right = self.unary()?;
            Ok(Box::new(Expr::Unary(op, right)))
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> ExprResult {
        if let Some(kind) = self.match_next([TokenKind::True, TokenKind::False, TokenKind::Nil]) {
            let val = match kind {
                TokenKind::True => Val::Bool(true),
                TokenKind::False => Val::Bool(false),
                _ => Val::Nil,
            };
            return Ok(Box::new(Expr::Literal(val)));
        }

        if self
            .match_next([TokenKind::Number, TokenKind::String])
            .is_some()
        {
            let val = self.previous().literal.clone().unwrap_or(Val::Nil);
            return Ok(Box::new(Expr::Literal(val)));
        }

        if self.match_next([TokenKind::LeftParen]).is_some() {
            let inner = self.expression()?;
            if !self.check(TokenKind::RightParen) {
                let token = self.peek().clone();
                return Err(self.error(SyntaxError::UnclosedGroup { token }));
            }
            self.index += 1;
            return Ok(Box::new(Expr::Group(inner)));
        }

        let token = self.peek().clone();
        Err(self.error(SyntaxError::ExpectExpression { token }))
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.index - 1]
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn match_next<const N: usize>(&mut self, kinds: [TokenKind; N]) -> Option<TokenKind> {
        if self.is_at_end() {
            return None;
        }

        let kind = self.peek().kind;
        if kinds.contains(&kind) {
            self.index += 1;
            Some(kind)
        } else {
            None
        }
    }

    // Funnel every syntax error through the reporter before handing it up.
    fn error(&mut self, err: SyntaxError) -> SyntaxError {
        let msg = err.to_string();
        self.reporter.report_at(err.token(), &msg);
        err
    }
}
