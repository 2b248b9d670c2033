use lesebuch::expr::Val;
use lesebuch::report::Reporter;
use lesebuch::scanner::{scan, ScannerConfig};
use lesebuch::token::{Token, TokenKind};

fn scan_default(source: &str) -> (Vec<Token>, bool) {
    let mut reporter = Reporter::new();
    let tokens = scan(source, &ScannerConfig::default(), &mut reporter);
    (tokens, reporter.had_error())
}

fn tok(kind: TokenKind, lexeme: &str, line: usize) -> Token {
    Token::new(kind, lexeme.into(), None, line)
}

fn string_tok(kind: TokenKind, value: &str, line: usize) -> Token {
    Token::new(kind, "".into(), Some(Val::String(value.into())), line)
}

#[test]
fn number() {
    let (tokens, err) = scan_default("233");
    assert!(!err);
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Number, "233", 1),
            tok(TokenKind::Eof, "", 1),
        ]
    );
}

#[test]
fn number_literal_is_decoded() {
    let (tokens, _) = scan_default("12.5");
    assert_eq!(tokens[0].literal, Some(Val::Num(12.5)));
    assert_eq!(&*tokens[0].lexeme, "12.5");
}

#[test]
fn trailing_dot_stays_separate() {
    let (tokens, err) = scan_default("123.");
    assert!(!err);
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Number, "123", 1),
            tok(TokenKind::Dot, ".", 1),
            tok(TokenKind::Eof, "", 1),
        ]
    );
}

#[test]
fn string_spanning_lines() {
    let (tokens, err) = scan_default("s = \"multiple\n        line\"");
    assert!(!err);
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Identifier, "s", 1),
            tok(TokenKind::Equal, "=", 1),
            string_tok(TokenKind::String, "multiple\n        line", 2),
            tok(TokenKind::Eof, "", 2),
        ]
    );
}

#[test]
fn string_keeps_backslash_verbatim() {
    let (tokens, err) = scan_default("\"a\\nb\"");
    assert!(!err);
    assert_eq!(tokens[0].literal, Some(Val::String("a\\nb".into())));
}

#[test]
fn unterminated_string_still_terminates() {
    let (tokens, err) = scan_default("\"abc");
    assert!(err);
    assert_eq!(
        tokens,
        vec![
            string_tok(TokenKind::String, "abc", 1),
            tok(TokenKind::Eof, "", 1),
        ]
    );
}

#[test]
fn comments_are_skipped_by_default() {
    let source = " is1 = a  == 1 // inline comments
        // all line are comments
        ";
    let (tokens, err) = scan_default(source);
    assert!(!err);
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Identifier, "is1", 1),
            tok(TokenKind::Equal, "=", 1),
            tok(TokenKind::Identifier, "a", 1),
            tok(TokenKind::EqualEqual, "==", 1),
            tok(TokenKind::Number, "1", 1),
            tok(TokenKind::Eof, "", 3),
        ]
    );
}

#[test]
fn keywords_and_punctuation() {
    let source = "fun printSum(a, b) {
        print a + b;
        }";
    let (tokens, err) = scan_default(source);
    assert!(!err);
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Fun, "fun", 1),
            tok(TokenKind::Identifier, "printSum", 1),
            tok(TokenKind::LeftParen, "(", 1),
            tok(TokenKind::Identifier, "a", 1),
            tok(TokenKind::Comma, ",", 1),
            tok(TokenKind::Identifier, "b", 1),
            tok(TokenKind::RightParen, ")", 1),
            tok(TokenKind::LeftBrace, "{", 1),
            tok(TokenKind::Print, "print", 2),
            tok(TokenKind::Identifier, "a", 2),
            tok(TokenKind::Plus, "+", 2),
            tok(TokenKind::Identifier, "b", 2),
            tok(TokenKind::Semicolon, ";", 2),
            tok(TokenKind::RightBrace, "}", 3),
            tok(TokenKind::Eof, "", 3),
        ]
    );
}

#[test]
fn maximal_munch_prefers_two_char_operators() {
    let (tokens, err) = scan_default("<= < == = != ! >= >");
    assert!(!err);
    let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LessEqual,
            TokenKind::Less,
            TokenKind::EqualEqual,
            TokenKind::Equal,
            TokenKind::BangEqual,
            TokenKind::Bang,
            TokenKind::GreaterEqual,
            TokenKind::Greater,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unexpected_character_is_recovered() {
    let (tokens, err) = scan_default("@ 1");
    assert!(err);
    assert_eq!(
        tokens,
        vec![tok(TokenKind::Number, "1", 1), tok(TokenKind::Eof, "", 1)]
    );
}

#[test]
fn line_counting() {
    let (tokens, _) = scan_default("\n\n7");
    assert_eq!(tokens[0].line, 3);
}

#[test]
fn lexemes_round_trip() {
    let source = "var x = (1.5 + foo) * 2; // tail";
    let (tokens, err) = scan_default(source);
    assert!(!err);
    for token in &tokens {
        if token.kind == TokenKind::Eof {
            continue;
        }
        assert!(
            source.contains(&*token.lexeme),
            "lexeme {:?} not found in source",
            token.lexeme
        );
    }
}

#[test]
fn single_line_comment_as_token() {
    let config = ScannerConfig {
        comment_as_token: true,
        ..Default::default()
    };
    let mut reporter = Reporter::new();
    let tokens = scan("1 // this is comment", &config, &mut reporter);
    assert!(!reporter.had_error());
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Number, "1", 1),
            string_tok(TokenKind::SingleLineComment, " this is comment", 1),
            tok(TokenKind::Eof, "", 1),
        ]
    );
}

#[test]
fn multi_line_comments_as_tokens() {
    let source = "1 /*23*3*/
        2 /* 00
        90
        */";
    let config = ScannerConfig {
        comment_as_token: true,
        multi_line_comments: true,
        ..Default::default()
    };
    let mut reporter = Reporter::new();
    let tokens = scan(source, &config, &mut reporter);
    assert!(!reporter.had_error());
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Number, "1", 1),
            string_tok(TokenKind::MultiLineComment, "23*3", 1),
            tok(TokenKind::Number, "2", 2),
            string_tok(TokenKind::MultiLineComment, " 00\n        90\n        ", 4),
            tok(TokenKind::Eof, "", 4),
        ]
    );
}

#[test]
fn nested_block_comment_ends_at_matching_close() {
    let source = "1 /*23*3/*
        2 */ 00
        90
        */";
    let config = ScannerConfig {
        comment_as_token: true,
        multi_line_comments: true,
        nest_comments: true,
    };
    let mut reporter = Reporter::new();
    let tokens = scan(source, &config, &mut reporter);
    assert!(!reporter.had_error());
    assert_eq!(
        tokens,
        vec![
            tok(TokenKind::Number, "1", 1),
            string_tok(
                TokenKind::MultiLineComment,
                "23*3/*\n        2 */ 00\n        90\n        ",
                4
            ),
            tok(TokenKind::Eof, "", 4),
        ]
    );
}

#[test]
fn unnested_block_comment_ends_at_first_close() {
    let config = ScannerConfig {
        multi_line_comments: true,
        ..Default::default()
    };
    let mut reporter = Reporter::new();
    let tokens = scan("/* a /* b */ 1", &config, &mut reporter);
    assert!(!reporter.had_error());
    assert_eq!(
        tokens,
        vec![tok(TokenKind::Number, "1", 1), tok(TokenKind::Eof, "", 1)]
    );
}

#[test]
fn unterminated_block_comment_reports() {
    let config = ScannerConfig {
        multi_line_comments: true,
        ..Default::default()
    };
    let mut reporter = Reporter::new();
    let tokens = scan("/* never\nends", &config, &mut reporter);
    assert!(reporter.had_error());
    assert_eq!(tokens, vec![tok(TokenKind::Eof, "", 2)]);
}

#[test]
fn slash_without_comment_config_is_division() {
    let (tokens, err) = scan_default("8 / 2");
    assert!(!err);
    assert_eq!(tokens[1].kind, TokenKind::Slash);
}

#[test]
fn every_scan_ends_with_exactly_one_eof() {
    for source in ["", "   ", "@#$", "\"open", "1 + 2", "// only a comment"] {
        let (tokens, _) = scan_default(source);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "source {source:?}");
    }
}

#[test]
fn reset_clears_the_error_flag() {
    let mut reporter = Reporter::new();
    scan("@", &ScannerConfig::default(), &mut reporter);
    assert!(reporter.had_error());
    reporter.reset();
    assert!(!reporter.had_error());
    scan("1 + 2", &ScannerConfig::default(), &mut reporter);
    assert!(!reporter.had_error());
}
