use std::rc::Rc;

use thiserror::Error;

use crate::expr::Val;
use crate::report::Reporter;
use crate::token::{keyword, Token, TokenKind};

/// Lexical extensions. Everything off means: `//` comments only, and all
/// comments are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScannerConfig {
    /// Emit comment bodies as tokens instead of dropping them.
    pub comment_as_token: bool,
    /// Recognize `/* ... */`.
    pub multi_line_comments: bool,
    /// Allow balanced nesting of `/* ... */`; otherwise the first `*/`
    /// closes regardless of depth.
    pub nest_comments: bool,
}

/// Diagnostics the scanner can emit. All of them are recovered locally;
/// scanning always continues with the next character.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unexpected character: {0}.")]
    UnexpectedChar(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unterminated block comment.")]
    UnterminatedComment,
}

/// Turns source text into tokens. Total: malformed input is reported through
/// `reporter` and skipped, never raised. The returned sequence always ends
/// with exactly one `Eof` token.
pub fn scan(source: &str, config: &ScannerConfig, reporter: &mut Reporter) -> Vec<Token> {
    let chars = source.chars().collect::<Vec<_>>();
    let mut scanner = Scanner {
        chars: &chars,
        config,
        reporter,
        tokens: vec![],
        start: 0,
        current: 0,
        line: 1,
    };
    scanner.run();
    scanner.tokens
}

struct Scanner<'a> {
    // TODO: a byte cursor over &str would avoid the up-front char collect;
    // lookahead never reaches further than two characters anyway.
    chars: &'a [char],
    config: &'a ScannerConfig,
    reporter: &'a mut Reporter,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn run(&mut self) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, "".into(), None, self.line));
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => {
                let kind = if self.match_next('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_next('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_next('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_next('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }
            '/' => self.slash(),
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            '0'..='9' => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),
            c => self.error(LexError::UnexpectedChar(c)),
        }
    }

    fn slash(&mut self) {
        if self.match_next('/') {
            while !matches!(self.peek(), Some('\n') | None) {
                self.advance();
            }
            if self.config.comment_as_token {
                let body = self.text(self.start + 2, self.current);
                self.add_literal_token(TokenKind::SingleLineComment, Val::String(body));
            }
        } else if self.config.multi_line_comments && self.match_next('*') {
            self.block_comment();
        } else {
            self.add_token(TokenKind::Slash);
        }
    }

    fn block_comment(&mut self) {
        let mut depth: usize = 1;
        while !self.is_at_end() {
            if self.match_next('\n') {
                self.line += 1;
            } else if self.match_pair('*', '/') {
                depth -= 1;
                if depth == 0 {
                    if self.config.comment_as_token {
                        let body = self.text(self.start + 2, self.current - 2);
                        self.add_literal_token(TokenKind::MultiLineComment, Val::String(body));
                    }
                    return;
                }
            } else if self.config.nest_comments && self.match_pair('/', '*') {
                depth += 1;
            } else {
                self.advance();
            }
        }

        self.error(LexError::UnterminatedComment);
    }

    fn string(&mut self) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error(LexError::UnterminatedString);
            // Best effort: still hand back what was scanned.
            let value = self.text(self.start + 1, self.current);
            self.add_literal_token(TokenKind::String, Val::String(value));
            return;
        }

        // Consume the closing quote.
        self.advance();

        // The value is the raw substring between the quotes. No escape
        // sequences; a backslash is kept verbatim.
        let value = self.text(self.start + 1, self.current - 1);
        self.add_literal_token(TokenKind::String, Val::String(value));
    }

    fn number(&mut self) {
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        // A dot is only absorbed when a fraction actually follows, so the
        // trailing dot in `123.` stays a separate token.
        if self.peek() == Some('.') && matches!(self.peek_next(), Some('0'..='9')) {
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        let text = self.text(self.start, self.current);
        match text.parse::<f64>() {
            Ok(num) => self.add_literal_token(TokenKind::Number, Val::Num(num)),
            Err(err) => {
                let msg = err.to_string();
                self.reporter.report(self.line, &msg);
            }
        }
    }

    fn identifier(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = self.text(self.start, self.current);
        self.add_token(keyword(&text).unwrap_or(TokenKind::Identifier));
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    // Only called after an is_at_end check.
    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    fn match_next(&mut self, expected: char) -> bool {
        let res = self.chars.get(self.current) == Some(&expected);
        if res {
            self.current += 1;
        }
        res
    }

    fn match_pair(&mut self, first: char, second: char) -> bool {
        let res = self.chars.get(self.current) == Some(&first)
            && self.chars.get(self.current + 1) == Some(&second);
        if res {
            self.current += 2;
        }
        res
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn text(&self, from: usize, to: usize) -> Rc<str> {
        self.chars[from..to].iter().collect::<String>().into()
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.push_token(kind, None);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Val) {
        self.push_token(kind, Some(literal));
    }

    fn push_token(&mut self, kind: TokenKind, literal: Option<Val>) {
        let lexeme = self.text(self.start, self.current);
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn error(&mut self, err: LexError) {
        let msg = err.to_string();
        self.reporter.report(self.line, &msg);
    }
}
