//! Windowed lexer implementation.
//!
//! The lexer consumes a [`CharSource`] one character at a time and
//! maintains three observable tokens: `previous`, `current`, and one
//! token of lookahead. [`Lexer::advance`] shifts the window forward and
//! returns the token that was `current` before the shift.

use claspc_util::{DiagnosticBuilder, Handler, SourceSnippet, Span};
use std::mem;

use crate::source::{CharSource, StrSource};
use crate::token::{keyword_from_ident, Token, TokenKind, EOF_LEXEME};

/// Identifiers and number literals are capped at this many characters;
/// overflow characters are consumed and discarded.
const MAX_LEXEME_LEN: usize = 128;

/// Streaming lexer with one token of lookback and one of lookahead.
///
/// # Examples
///
/// ```
/// use claspc_lex::{Lexer, TokenKind};
/// use claspc_util::Handler;
///
/// let handler = Handler::new();
/// let mut lexer = Lexer::from_text("var x = 42;", &handler);
///
/// assert_eq!(lexer.current().kind, TokenKind::KwVar);
/// assert_eq!(lexer.lookahead().kind, TokenKind::Id);
///
/// let var = lexer.advance();
/// assert_eq!(var.kind, TokenKind::KwVar);
/// assert_eq!(lexer.current().kind, TokenKind::Id);
/// ```
pub struct Lexer<'a> {
    /// Character source being drained.
    source: Box<dyn CharSource>,

    /// Diagnostic handler for lexical errors.
    handler: &'a Handler,

    /// Next character, read from the source but not yet consumed.
    pending: Option<char>,

    /// Token most recently shifted out of `current`.
    previous: Option<Token>,

    /// Token under the cursor.
    current: Token,

    /// One token of lookahead.
    next: Token,

    /// Line index of `pending` (0-based).
    line: u32,

    /// Column index of `pending` (0-based).
    column: u32,

    /// Characters consumed so far on the current line.
    current_line: String,

    /// Archive of completed lines.
    lines: Vec<String>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over an arbitrary character source.
    pub fn new(source: Box<dyn CharSource>, handler: &'a Handler) -> Self {
        let placeholder = Token::synthetic(TokenKind::Eof, EOF_LEXEME.to_string());
        let mut lexer = Self {
            source,
            handler,
            pending: None,
            previous: None,
            current: placeholder.clone(),
            next: placeholder,
            line: 0,
            column: 0,
            current_line: String::new(),
            lines: Vec::new(),
        };
        lexer.pending = lexer.source.next_char();
        lexer.current = lexer.scan();
        lexer.next = lexer.scan();
        lexer
    }

    /// Create a lexer over in-memory text.
    pub fn from_text(text: &str, handler: &'a Handler) -> Self {
        Self::new(Box::new(StrSource::new(text)), handler)
    }

    /// The token under the cursor.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// The token one position ahead of the cursor.
    #[inline]
    pub fn lookahead(&self) -> &Token {
        &self.next
    }

    /// The token most recently shifted past, if any.
    #[inline]
    pub fn previous(&self) -> Option<&Token> {
        self.previous.as_ref()
    }

    /// True if the current token has the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Shift the window forward by one token and return the token that
    /// was `current` before the shift.
    pub fn advance(&mut self) -> Token {
        let scanned = self.scan();
        let shifted = mem::replace(&mut self.next, scanned);
        let consumed = mem::replace(&mut self.current, shifted);
        self.previous = Some(consumed.clone());
        consumed
    }

    /// The diagnostic handler this lexer reports into.
    #[inline]
    pub fn handler(&self) -> &'a Handler {
        self.handler
    }

    /// Completed source lines seen so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    // ------------------------------------------------------------------
    // Character plumbing
    // ------------------------------------------------------------------

    /// Consume the pending character, updating line/column tracking and
    /// the current-line buffer, and pull the next one from the source.
    fn bump(&mut self) {
        if let Some(c) = self.pending {
            if c == '\n' {
                let finished = mem::take(&mut self.current_line);
                self.lines.push(finished);
                self.line += 1;
                self.column = 0;
            } else {
                self.current_line.push(c);
                self.column += 1;
            }
            self.pending = self.source.next_char();
        }
    }

    /// Consume the pending character if it equals `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.pending == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Build a token starting at (`line`, `column`), snapshotting the
    /// current-line buffer.
    fn make_token(&self, kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Token {
        Token::new(kind, lexeme, Span::new(line, column), self.current_line.clone())
    }

    // ------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------

    /// Scan the next token from the stream.
    fn scan(&mut self) -> Token {
        while matches!(self.pending, Some(c) if c.is_whitespace()) {
            self.bump();
        }

        let line = self.line;
        let column = self.column;

        match self.pending {
            None => self.make_token(TokenKind::Eof, EOF_LEXEME.to_string(), line, column),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(line, column),
            Some(c) if c.is_ascii_digit() || c == '.' => self.scan_number(line, column),
            Some(c) => self.scan_operator(c, line, column),
        }
    }

    /// Scan an identifier or keyword.
    ///
    /// First character `[A-Za-z_]`, continued by `[A-Za-z_0-9]`.
    /// Characters beyond [`MAX_LEXEME_LEN`] are consumed but discarded.
    fn scan_identifier(&mut self, line: u32, column: u32) -> Token {
        let mut text = String::new();
        while let Some(c) = self.pending {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            if text.len() < MAX_LEXEME_LEN {
                text.push(c);
            }
            self.bump();
        }

        let kind = keyword_from_ident(&text).unwrap_or(TokenKind::Id);
        self.make_token(kind, text, line, column)
    }

    /// Scan a number literal.
    ///
    /// Accepts `[0-9.]` with at most one `.`; a second `.` terminates
    /// the token without being consumed, so `1.2.3` lexes as `1.2`
    /// followed by `.3`. The length cap applies as for identifiers.
    fn scan_number(&mut self, line: u32, column: u32) -> Token {
        let mut text = String::new();
        let mut seen_dot = false;
        while let Some(c) = self.pending {
            if c == '.' {
                if seen_dot {
                    break;
                }
                seen_dot = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            if text.len() < MAX_LEXEME_LEN {
                text.push(c);
            }
            self.bump();
        }

        self.make_token(TokenKind::Number, text, line, column)
    }

    /// Scan an operator or delimiter, maximal-munch.
    fn scan_operator(&mut self, c: char, line: u32, column: u32) -> Token {
        use TokenKind::*;

        self.bump();
        let (kind, lexeme): (TokenKind, &str) = match c {
            '+' => {
                if self.match_char('=') {
                    (PlusEq, "+=")
                } else if self.match_char('+') {
                    (PlusPlus, "++")
                } else {
                    (Plus, "+")
                }
            }
            '-' => {
                if self.match_char('=') {
                    (MinusEq, "-=")
                } else if self.match_char('>') {
                    (Arrow, "->")
                } else if self.match_char('-') {
                    (MinusMinus, "--")
                } else {
                    (Minus, "-")
                }
            }
            '*' => {
                if self.match_char('=') {
                    (StarEq, "*=")
                } else {
                    (Star, "*")
                }
            }
            '/' => {
                if self.match_char('=') {
                    (SlashEq, "/=")
                } else {
                    (Slash, "/")
                }
            }
            '%' => {
                if self.match_char('=') {
                    (PercentEq, "%=")
                } else {
                    (Percent, "%")
                }
            }
            '^' => {
                if self.match_char('=') {
                    (CaretEq, "^=")
                } else {
                    (Caret, "^")
                }
            }
            '=' => {
                if self.match_char('=') {
                    (EqEq, "==")
                } else {
                    (Eq, "=")
                }
            }
            '!' => {
                if self.match_char('=') {
                    (BangEq, "!=")
                } else {
                    (Bang, "!")
                }
            }
            '~' => {
                if self.match_char('=') {
                    (TildeEq, "~=")
                } else {
                    (Tilde, "~")
                }
            }
            '<' => {
                if self.match_char('=') {
                    (LtEq, "<=")
                } else if self.match_char('-') {
                    (LeftArrow, "<-")
                } else {
                    (Lt, "<")
                }
            }
            '>' => {
                if self.match_char('=') {
                    (GtEq, ">=")
                } else {
                    (Gt, ">")
                }
            }
            '(' => (LParen, "("),
            ')' => (RParen, ")"),
            '[' => (LBracket, "["),
            ']' => (RBracket, "]"),
            '{' => (LBrace, "{"),
            '}' => (RBrace, "}"),
            ',' => (Comma, ","),
            ';' => (Semicolon, ";"),
            ':' => (Colon, ":"),
            _ => {
                DiagnosticBuilder::error(format!(
                    "Syntax error on character '{}': \"Unexpected character '{}' (0x{:02x}).\"",
                    c, c, c as u32
                ))
                .span(Span::new(line, column))
                .snippet(SourceSnippet::point(self.current_line.clone(), line, column))
                .emit(self.handler);
                return self.make_token(Unknown, c.to_string(), line, column);
            }
        };

        self.make_token(kind, lexeme, line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        lex_all(source).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input_is_eof() {
        let handler = Handler::new();
        let lexer = Lexer::from_text("", &handler);
        assert!(lexer.current().is_eof());
        assert!(lexer.lookahead().is_eof());
    }

    #[test]
    fn test_whitespace_only_is_eof() {
        let handler = Handler::new();
        let lexer = Lexer::from_text("  \t\n\n  ", &handler);
        assert!(lexer.current().is_eof());
    }

    #[test]
    fn test_eof_lexeme_is_sentinel() {
        let tokens = lex_all("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lexeme, "\u{FF}");
    }

    #[test]
    fn test_window_previous_current_lookahead() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_text("a + b", &handler);

        assert!(lexer.previous().is_none());
        assert_eq!(lexer.current().lexeme, "a");
        assert_eq!(lexer.lookahead().lexeme, "+");

        let a = lexer.advance();
        assert_eq!(a.lexeme, "a");
        assert_eq!(lexer.previous().map(|t| t.lexeme.as_str()), Some("a"));
        assert_eq!(lexer.current().lexeme, "+");
        assert_eq!(lexer.lookahead().lexeme, "b");

        lexer.advance();
        lexer.advance();
        assert!(lexer.current().is_eof());
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            lex_kinds("return if while for fn var let const"),
            vec![
                TokenKind::KwReturn,
                TokenKind::KwIf,
                TokenKind::KwWhile,
                TokenKind::KwFor,
                TokenKind::KwFn,
                TokenKind::KwVar,
                TokenKind::KwLet,
                TokenKind::KwConst,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_with_digits_and_underscores() {
        let tokens = lex_all("foo_bar2 _x");
        assert_eq!(tokens[0].kind, TokenKind::Id);
        assert_eq!(tokens[0].lexeme, "foo_bar2");
        assert_eq!(tokens[1].lexeme, "_x");
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = lex_all("returns whiled");
        assert_eq!(tokens[0].kind, TokenKind::Id);
        assert_eq!(tokens[1].kind, TokenKind::Id);
    }

    #[test]
    fn test_identifier_truncated_at_cap() {
        let long = "a".repeat(200);
        let tokens = lex_all(&format!("{} b", long));
        assert_eq!(tokens[0].kind, TokenKind::Id);
        assert_eq!(tokens[0].lexeme.len(), 128);
        // The overflow was consumed, not re-lexed.
        assert_eq!(tokens[1].lexeme, "b");
    }

    #[test]
    fn test_number_simple() {
        let tokens = lex_all("42");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "42");
    }

    #[test]
    fn test_number_with_fraction() {
        let tokens = lex_all("25.0");
        assert_eq!(tokens[0].lexeme, "25.0");
    }

    #[test]
    fn test_number_leading_dot() {
        let tokens = lex_all(".5");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, ".5");
    }

    #[test]
    fn test_second_dot_terminates_number() {
        let tokens = lex_all("1.2.3");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "1.2");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].lexeme, ".3");
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn test_two_char_operators_maximal_munch() {
        let cases = [
            ("++", TokenKind::PlusPlus),
            ("--", TokenKind::MinusMinus),
            ("==", TokenKind::EqEq),
            ("!=", TokenKind::BangEq),
            ("<=", TokenKind::LtEq),
            (">=", TokenKind::GtEq),
            ("+=", TokenKind::PlusEq),
            ("-=", TokenKind::MinusEq),
            ("*=", TokenKind::StarEq),
            ("/=", TokenKind::SlashEq),
            ("%=", TokenKind::PercentEq),
            ("^=", TokenKind::CaretEq),
            ("~=", TokenKind::TildeEq),
            ("->", TokenKind::Arrow),
            ("<-", TokenKind::LeftArrow),
        ];
        for (text, kind) in cases {
            let tokens = lex_all(text);
            assert_eq!(tokens.len(), 2, "{:?} should be one token plus Eof", text);
            assert_eq!(tokens[0].kind, kind);
            assert_eq!(tokens[0].lexeme, text);
        }
    }

    #[test]
    fn test_single_char_operators() {
        assert_eq!(
            lex_kinds("+ - * / % ^ = ! ~ < >"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Caret,
                TokenKind::Eq,
                TokenKind::Bang,
                TokenKind::Tilde,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            lex_kinds("( ) [ ] { } , ; :"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Colon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_adjacent_operators_without_spaces() {
        // `x+++y` munches `++` then `+`.
        assert_eq!(
            lex_kinds("x+++y"),
            vec![
                TokenKind::Id,
                TokenKind::PlusPlus,
                TokenKind::Plus,
                TokenKind::Id,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_declaration_statement() {
        let tokens = lex_all("var test: int = 42;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwVar,
                TokenKind::Id,
                TokenKind::Colon,
                TokenKind::Id,
                TokenKind::Eq,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].lexeme, "test");
        assert_eq!(tokens[3].lexeme, "int");
    }

    #[test]
    fn test_positions_single_line() {
        let tokens = lex_all("x = 10;");
        assert_eq!(tokens[0].span, Span::new(0, 0)); // x
        assert_eq!(tokens[1].span, Span::new(0, 2)); // =
        assert_eq!(tokens[2].span, Span::new(0, 4)); // 10
        assert_eq!(tokens[3].span, Span::new(0, 6)); // ;
    }

    #[test]
    fn test_positions_across_lines() {
        let tokens = lex_all("x;\n  y;");
        assert_eq!(tokens[0].span, Span::new(0, 0)); // x
        assert_eq!(tokens[1].span, Span::new(0, 1)); // ;
        assert_eq!(tokens[2].span, Span::new(1, 2)); // y
        assert_eq!(tokens[3].span, Span::new(1, 3)); // ;
    }

    #[test]
    fn test_line_snapshot_at_emission() {
        let tokens = lex_all("ab = 1;");
        // The snapshot holds everything consumed on the line so far.
        assert_eq!(tokens[0].line_text, "ab");
        assert_eq!(tokens[1].line_text, "ab =");
        assert_eq!(tokens[2].line_text, "ab = 1");
    }

    #[test]
    fn test_line_archive() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_text("x;\ny;\nz;", &handler);
        while !lexer.current().is_eof() {
            lexer.advance();
        }
        assert_eq!(lexer.lines(), &["x;".to_string(), "y;".to_string()]);
    }

    #[test]
    fn test_unknown_character_reports_diagnostic() {
        let handler = Handler::new();
        let mut lexer = Lexer::from_text("x @ y", &handler);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.advance();
            let done = token.is_eof();
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        assert!(kinds.contains(&TokenKind::Unknown));
        assert!(handler.has_errors());
        let rendered = handler.diagnostics()[0].render();
        assert!(rendered.contains("Unexpected character '@'"));
    }

    #[test]
    fn test_unknown_character_keeps_lexeme() {
        let tokens = lex_all("#");
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].lexeme, "#");
    }

    #[test]
    fn test_lexeme_found_at_recorded_position() {
        let source = "var foo = 1 + 2;\nwhile (foo <= 10) foo += 1;";
        let source_lines: Vec<&str> = source.lines().collect();
        for token in lex_all(source) {
            if token.is_eof() {
                continue;
            }
            let line = source_lines[token.span.line as usize];
            let column = token.span.column as usize;
            assert_eq!(&line[column..column + token.lexeme.len()], token.lexeme);
        }
    }

    #[test]
    fn test_reader_source_matches_str_source() {
        let text = "fn f(a: int) -> int { return a; }";
        let handler = Handler::new();
        let mut from_reader = Lexer::new(
            Box::new(crate::ReaderSource::new(text.as_bytes())),
            &handler,
        );
        let mut kinds = Vec::new();
        loop {
            let token = from_reader.advance();
            let done = token.is_eof();
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        assert_eq!(kinds, lex_kinds(text));
    }
}
