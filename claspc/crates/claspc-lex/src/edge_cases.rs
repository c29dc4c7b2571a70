//! Edge case and property tests for claspc-lex.

use crate::{Lexer, Token, TokenKind};
use claspc_util::Handler;

fn lex_all(source: &str) -> Vec<Token> {
    let handler = Handler::new();
    let mut lexer = Lexer::from_text(source, &handler);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.advance();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}

// ==================== EDGE CASES ====================

#[test]
fn test_edge_single_char_ident() {
    let tokens = lex_all("x");
    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[0].lexeme, "x");
}

#[test]
fn test_edge_underscore_alone_is_ident() {
    let tokens = lex_all("_");
    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[0].lexeme, "_");
}

#[test]
fn test_edge_ident_cannot_start_with_digit() {
    // `1x` is a number followed by an identifier.
    let tokens = lex_all("1x");
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "1");
    assert_eq!(tokens[1].kind, TokenKind::Id);
    assert_eq!(tokens[1].lexeme, "x");
}

#[test]
fn test_edge_dot_alone_is_number() {
    let tokens = lex_all(".");
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, ".");
}

#[test]
fn test_edge_trailing_dot_consumed() {
    let tokens = lex_all("5.");
    assert_eq!(tokens[0].lexeme, "5.");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_edge_many_dots() {
    // A second dot terminates, so `1...2` is `1.` `.` `.2`.
    let tokens = lex_all("1...2");
    assert_eq!(tokens[0].lexeme, "1.");
    assert_eq!(tokens[1].lexeme, ".");
    assert_eq!(tokens[2].lexeme, ".2");
}

#[test]
fn test_edge_number_cap_discards_overflow() {
    let digits = "9".repeat(300);
    let tokens = lex_all(&digits);
    assert_eq!(tokens[0].lexeme.len(), 128);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_edge_no_spaces_between_tokens() {
    let tokens = lex_all("x=x+1;");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Id,
            TokenKind::Eq,
            TokenKind::Id,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_edge_crlf_and_tabs() {
    let tokens = lex_all("x;\r\n\ty;");
    assert_eq!(tokens[0].lexeme, "x");
    assert_eq!(tokens[2].lexeme, "y");
    // '\r' is whitespace; only '\n' ends the line.
    assert_eq!(tokens[2].span.line, 1);
}

#[test]
fn test_edge_unknown_does_not_stop_stream() {
    let tokens = lex_all("a # b");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Id, TokenKind::Unknown, TokenKind::Id, TokenKind::Eof]
    );
}

#[test]
fn test_edge_multiple_statements_one_line() {
    let tokens = lex_all("5 * 2; 85/6;; 4;");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Number,
            TokenKind::Slash,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Semicolon,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

// ==================== PROPERTY TESTS ====================

#[test]
fn prop_identifiers_roundtrip() {
    use proptest::prelude::*;

    proptest!(|(input in "[a-zA-Z_][a-zA-Z0-9_]{0,100}")| {
        let tokens = lex_all(&input);
        prop_assert_eq!(tokens.len(), 2);
        if crate::keyword_from_ident(&input).is_none() {
            prop_assert_eq!(tokens[0].kind, TokenKind::Id);
        }
        prop_assert_eq!(&tokens[0].lexeme, &input);
    });
}

#[test]
fn prop_numbers_roundtrip() {
    use proptest::prelude::*;

    proptest!(|(input in "[0-9]{1,20}")| {
        let tokens = lex_all(&input);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::Number);
        prop_assert_eq!(&tokens[0].lexeme, &input);
    });
}

#[test]
fn prop_lexemes_appear_at_recorded_positions() {
    use proptest::prelude::*;

    proptest!(|(names in proptest::collection::vec("[a-z]{1,8}", 1..8))| {
        let source = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{} = {};", name, i))
            .collect::<Vec<_>>()
            .join("\n");
        let source_lines: Vec<&str> = source.lines().collect();

        for token in lex_all(&source) {
            if token.is_eof() {
                continue;
            }
            let line = source_lines[token.span.line as usize];
            let column = token.span.column as usize;
            prop_assert_eq!(&line[column..column + token.lexeme.len()], &token.lexeme);
        }
    });
}

#[test]
fn prop_lexing_is_deterministic() {
    use proptest::prelude::*;

    proptest!(|(input in "[a-z0-9 +*;=()<>-]{0,80}")| {
        let first: Vec<_> = lex_all(&input).iter().map(|t| (t.kind, t.lexeme.clone())).collect();
        let second: Vec<_> = lex_all(&input).iter().map(|t| (t.kind, t.lexeme.clone())).collect();
        prop_assert_eq!(first, second);
    });
}
