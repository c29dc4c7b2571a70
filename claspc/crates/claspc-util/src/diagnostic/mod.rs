//! Diagnostic module - Error and warning reporting infrastructure.
//!
//! Phases create diagnostics with the fluent [`DiagnosticBuilder`] and
//! emit them into a shared [`Handler`]; the driver renders the collected
//! diagnostics to stderr after the phase completes.
//!
//! # Examples
//!
//! ```
//! use claspc_util::{DiagnosticBuilder, Handler, Span};
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("unexpected token")
//!     .span(Span::new(0, 4))
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! ```

mod builder;

pub use builder::{DiagnosticBuilder, SourceSnippet};

use crate::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that aborts the compilation.
    Error,
    /// A warning that does not prevent compilation.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with severity, location, and optional source
/// snippets.
///
/// # Examples
///
/// ```
/// use claspc_util::{Diagnostic, Level, Span};
///
/// let diag = Diagnostic::error("something went wrong", Span::DUMMY);
/// assert_eq!(diag.level, Level::Error);
/// ```
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Main diagnostic message.
    pub message: String,
    /// Source location.
    pub span: Span,
    /// Source snippets for display.
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            snippets: Vec::new(),
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Attach a source snippet.
    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    /// Format the diagnostic for terminal output.
    ///
    /// The message comes first, followed by a `--> line:column` locator
    /// and the underlined source line for each attached snippet.
    ///
    /// # Examples
    ///
    /// ```
    /// use claspc_util::{Diagnostic, SourceSnippet, Span};
    ///
    /// let diag = Diagnostic::error("unexpected character '@'", Span::new(0, 4))
    ///     .with_snippet(SourceSnippet::point("let @", 0, 4));
    /// let text = diag.render();
    /// assert!(text.contains("--> 1:5"));
    /// assert!(text.contains('^'));
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.message);
        for snippet in &self.snippets {
            out.push('\n');
            out.push_str(&format!(
                "  --> {}:{}\n",
                snippet.line_number + 1,
                snippet.column + 1
            ));
            out.push_str(&snippet.format());
        }
        out
    }
}

/// Handler for collecting diagnostics.
///
/// The handler is shared by reference between the lexer and the parser,
/// so emission takes `&self`; the buffer lives behind a `RefCell`.
///
/// # Examples
///
/// ```
/// use claspc_util::{Diagnostic, Handler, Span};
///
/// let handler = Handler::new();
/// handler.emit(Diagnostic::error("bad input", Span::DUMMY));
/// assert_eq!(handler.error_count(), 1);
/// ```
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    /// Panic on the first error instead of collecting it. Test-only aid.
    panic_on_error: bool,
}

impl Handler {
    /// Create a new handler.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: false,
        }
    }

    /// Create a handler that panics on errors, for tests that expect a
    /// clean run.
    pub fn new_panicking() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            panic_on_error: true,
        }
    }

    /// Emit a diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        if self.panic_on_error && diagnostic.level == Level::Error {
            panic!("diagnostic error: {}", diagnostic.message);
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// True if any error-level diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// All collected diagnostics, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Discard all collected diagnostics.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
