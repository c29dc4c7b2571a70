//! claspc-lex - Lexical analyzer for the Clasp language.
//!
//! The lexer pulls characters one at a time from a [`CharSource`] and
//! produces [`Token`]s on demand. It keeps a window of three observable
//! tokens - `previous`, `current`, and the lookahead - so the parser
//! gets one token of lookback and one of lookahead without ever
//! materialising the whole token stream.
//!
//! # Token categories
//!
//! - **Keywords**: `return`, `if`, `while`, `for`, `fn`, `var`, `let`,
//!   `const`
//! - **Identifiers**: `[A-Za-z_][A-Za-z_0-9]*`, capped at 128 characters
//! - **Number literals**: `[0-9.]+` with at most one `.`
//! - **Operators**: single- and two-character forms (`+` `+=` `++`, `-`
//!   `-=` `--` `->`, `*` `*=`, `/` `/=`, `%` `%=`, `^` `^=`, `=` `==`,
//!   `!` `!=`, `~` `~=`, `<` `<=` `<-`, `>` `>=`), matched
//!   maximal-munch
//! - **Delimiters**: `( ) [ ] { } , ; :`
//! - **Sentinels**: end-of-input and an `Unknown` kind for characters
//!   outside the language
//!
//! # Position tracking
//!
//! Every token records the 0-based line and column of its first
//! character plus a snapshot of the current-line buffer at emission
//! time, so error reporters can underline the offending source long
//! after the stream has moved on.
//!
//! # Failure model
//!
//! The lexer does not fail. An unrecognised character produces a
//! diagnostic on the shared [`Handler`](claspc_util::Handler) and an
//! [`TokenKind::Unknown`] token; the parser treats that token as a
//! fatal syntax error.

mod lexer;
pub mod source;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use lexer::Lexer;
pub use source::{CharSource, ReaderSource, StrSource};
pub use token::{keyword_from_ident, Token, TokenKind, EOF_LEXEME};
