use crate::token::{Token, TokenKind};

/// Diagnostic sink shared by the scanner and the parser.
///
/// Callers own one of these per scan/parse run (one per file, or one reset
/// before every interactive line) and ask `had_error` once at the end instead
/// of checking individual return values.
#[derive(Debug, Default)]
pub struct Reporter {
    had_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: usize, message: &str) {
        eprintln!("[line {line}] Error: {message}");
        self.had_error = true;
    }

    /// Like `report`, but anchored to a token. End-of-input has no lexeme
    /// worth quoting, so it renders as "at end".
    pub fn report_at(&mut self, token: &Token, message: &str) {
        if token.kind == TokenKind::Eof {
            eprintln!("[line {}] Error at end: {message}", token.line);
        } else {
            eprintln!("[line {}] Error at '{}': {message}", token.line, token.lexeme);
        }
        self.had_error = true;
    }

    pub fn reset(&mut self) {
        self.had_error = false;
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }
}
