//! Token model.
//!
//! A [`Token`] is an owned record: its kind, the exact lexeme text it
//! matched, the position of its first character, and a snapshot of the
//! line it was scanned from. AST nodes store tokens by value, so tokens
//! never dangle once the lexer is gone.

use claspc_util::Span;
use std::fmt;

/// Lexeme of the end-of-input token: a single U+00FF character, which
/// cannot appear in any real lexeme.
pub const EOF_LEXEME: char = '\u{FF}';

/// The closed set of token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier.
    Id,
    /// Number literal.
    Number,

    /// "return"
    KwReturn,
    /// "if"
    KwIf,
    /// "while"
    KwWhile,
    /// "for"
    KwFor,
    /// "fn"
    KwFn,
    /// "var"
    KwVar,
    /// "let"
    KwLet,
    /// "const"
    KwConst,

    /// "+"
    Plus,
    /// "+="
    PlusEq,
    /// "++"
    PlusPlus,
    /// "-"
    Minus,
    /// "-="
    MinusEq,
    /// "--"
    MinusMinus,
    /// "->"
    Arrow,
    /// "<-"
    LeftArrow,
    /// "*"
    Star,
    /// "*="
    StarEq,
    /// "/"
    Slash,
    /// "/="
    SlashEq,
    /// "%"
    Percent,
    /// "%="
    PercentEq,
    /// "^"
    Caret,
    /// "^="
    CaretEq,
    /// "="
    Eq,
    /// "=="
    EqEq,
    /// "!"
    Bang,
    /// "!="
    BangEq,
    /// "~"
    Tilde,
    /// "~="
    TildeEq,
    /// "<"
    Lt,
    /// "<="
    LtEq,
    /// ">"
    Gt,
    /// ">="
    GtEq,

    /// "("
    LParen,
    /// ")"
    RParen,
    /// "["
    LBracket,
    /// "]"
    RBracket,
    /// "{"
    LBrace,
    /// "}"
    RBrace,
    /// ","
    Comma,
    /// ";"
    Semicolon,
    /// ":"
    Colon,

    /// End of input.
    Eof,
    /// Unrecognised character.
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Map a scanned identifier to its keyword kind, if it is reserved.
///
/// # Examples
///
/// ```
/// use claspc_lex::{keyword_from_ident, TokenKind};
///
/// assert_eq!(keyword_from_ident("while"), Some(TokenKind::KwWhile));
/// assert_eq!(keyword_from_ident("whiled"), None);
/// ```
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    match text {
        "return" => Some(TokenKind::KwReturn),
        "if" => Some(TokenKind::KwIf),
        "while" => Some(TokenKind::KwWhile),
        "for" => Some(TokenKind::KwFor),
        "fn" => Some(TokenKind::KwFn),
        "var" => Some(TokenKind::KwVar),
        "let" => Some(TokenKind::KwLet),
        "const" => Some(TokenKind::KwConst),
        _ => None,
    }
}

/// A single lexical unit.
///
/// Immutable after construction. `line_text` holds the current-line
/// buffer as it stood when the token was emitted, so diagnostics can
/// show the surrounding source.
#[derive(Clone, Debug)]
pub struct Token {
    /// Syntactic category.
    pub kind: TokenKind,
    /// The exact text matched.
    pub lexeme: String,
    /// Position of the first character (0-based line and column).
    pub span: Span,
    /// Snapshot of the source line at emission time.
    pub line_text: String,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span, line_text: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            line_text: line_text.into(),
        }
    }

    /// Create a token with no real source position, for
    /// compiler-synthesised nodes (e.g. the implicit `int` type of a
    /// number literal).
    pub fn synthetic(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span: Span::DUMMY,
            line_text: String::new(),
        }
    }

    /// True for the end-of-input token.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}) {{ {} }}", self.kind, self.lexeme)
    }
}
