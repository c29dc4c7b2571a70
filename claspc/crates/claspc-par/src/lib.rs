//! claspc-par - Parser and AST for the Clasp language.
//!
//! A hand-written recursive-descent parser over the windowed lexer.
//! [`Parser::compile`] drains the token stream and returns a single
//! `Block` node wrapping every top-level statement.
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | assignment | `=` `+=` `-=` `*=` `/=` `%=` `^=` `~=` | Right |
//! | equality | `==` `!=` | Left |
//! | comparison | `<` `<=` `>` `>=` | Left |
//! | term | `+` `-` | Left |
//! | factor | `*` `/` `%` | Left |
//! | exponent | `^` | Right |
//! | unary | `-` `!` `~` | Prefix |
//! | postfix | `++` `--` `(args)` | Suffix chain |
//!
//! # Statements
//!
//! ```text
//! statement := returnStmt | ifStmt | whileStmt | blockStmt
//!            | varDecl | letDecl | constDecl | fnDecl | exprStmt
//! ```
//!
//! Leaf statements require a terminating `;`; block-tailed statements
//! (`if`, `while`, `fn`, `{}`) do not. The parser tracks this with a
//! single `punc_next_stmt` flag that each production sets or clears.
//!
//! # Types
//!
//! ```text
//! type := "*" type
//!       | "[" type "]"
//!       | "fn" "(" typeList? ")" "->" type
//!       | ID ( "<" typeList ">" )?
//! ```
//!
//! # Failure model
//!
//! There is no error recovery. The first unexpected token emits a
//! diagnostic of the form `Syntax error on token '<lexeme>':
//! "<explanation>"` into the shared handler and unwinds the parse;
//! `compile` returns `None`.

pub mod ast;
pub mod print;
pub mod vars;
pub mod visit;

mod expr;
mod stmt;
mod types;

use claspc_lex::{Lexer, Token, TokenKind};
use claspc_util::{DiagnosticBuilder, Handler, SourceSnippet};

use crate::ast::AstNode;
use crate::vars::ScopeStack;

/// Recursive-descent parser.
///
/// # Examples
///
/// ```
/// use claspc_lex::Lexer;
/// use claspc_par::Parser;
/// use claspc_util::Handler;
///
/// let handler = Handler::new();
/// let lexer = Lexer::from_text("5 * 2 + 3;", &handler);
/// let mut parser = Parser::new(lexer);
/// let ast = parser.compile();
/// assert!(ast.is_some());
/// assert!(!handler.has_errors());
/// ```
pub struct Parser<'a> {
    /// Token window.
    lexer: Lexer<'a>,

    /// Shared diagnostic handler (same one the lexer reports into).
    handler: &'a Handler,

    /// Variable table, mutated by declaration statements.
    vars: ScopeStack,

    /// Whether the statement just parsed requires a terminating `;`.
    punc_next_stmt: bool,
}

impl<'a> Parser<'a> {
    /// Create a parser over a lexer. Diagnostics go to the lexer's
    /// handler.
    pub fn new(lexer: Lexer<'a>) -> Self {
        let handler = lexer.handler();
        Self {
            lexer,
            handler,
            vars: ScopeStack::new(),
            punc_next_stmt: false,
        }
    }

    /// Parse the whole input into a `Block` node wrapping all top-level
    /// statements. Returns `None` after the first syntax error.
    pub fn compile(&mut self) -> Option<AstNode> {
        let mut body = Vec::new();
        while !self.check(TokenKind::Eof) {
            body.push(self.stmt()?);
        }
        Some(AstNode::block_stmt(body))
    }

    // ------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------

    /// The token under the cursor.
    fn current(&self) -> &Token {
        self.lexer.current()
    }

    /// Consume and return the current token.
    fn advance(&mut self) -> Token {
        self.lexer.advance()
    }

    /// True if the current token has the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.lexer.check(kind)
    }

    /// Consume the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or report a syntax error.
    fn expect(&mut self, kind: TokenKind, why: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            let token = self.current().clone();
            self.syntax_error(&token, why);
            None
        }
    }

    /// Emit a fatal syntax diagnostic anchored at `token`.
    fn syntax_error(&self, token: &Token, why: &str) {
        let shown = if token.kind == TokenKind::Eof {
            "<end of input>"
        } else {
            token.lexeme.as_str()
        };
        DiagnosticBuilder::error(format!("Syntax error on token '{}': \"{}\"", shown, why))
            .span(token.span)
            .snippet(SourceSnippet::new(
                token.line_text.clone(),
                token.span.line,
                token.span.column,
                token.lexeme.chars().count(),
            ))
            .emit(self.handler);
    }
}
