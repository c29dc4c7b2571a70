//! Diagnostic builder for fluent diagnostic construction.
//!
//! [`DiagnosticBuilder`] assembles a diagnostic step by step;
//! [`SourceSnippet`] carries the source line a diagnostic points into,
//! so it can be underlined even though the character stream the lexer
//! consumed is long gone.

use super::{Diagnostic, Level};
use crate::Span;

/// A source line attached to a diagnostic, with the range to underline.
///
/// Positions are 0-based, matching [`Span`]; rendering converts to the
/// conventional 1-based display.
///
/// # Examples
///
/// ```
/// use claspc_util::SourceSnippet;
///
/// let snippet = SourceSnippet::point("var x = 42;", 0, 4);
/// assert_eq!(snippet.width, 1);
/// ```
#[derive(Clone, Debug)]
pub struct SourceSnippet {
    /// The source line content.
    pub line: String,
    /// Line index of the line (0-based).
    pub line_number: u32,
    /// Column index where the underline starts (0-based).
    pub column: u32,
    /// Number of characters to underline (at least 1).
    pub width: usize,
}

impl SourceSnippet {
    /// Create a snippet underlining `width` characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use claspc_util::SourceSnippet;
    ///
    /// let snippet = SourceSnippet::new("x <= y;", 0, 2, 2);
    /// assert!(snippet.format().contains("^^"));
    /// ```
    pub fn new(line: impl Into<String>, line_number: u32, column: u32, width: usize) -> Self {
        Self {
            line: line.into(),
            line_number,
            column,
            width: width.max(1),
        }
    }

    /// Create a snippet underlining a single character.
    pub fn point(line: impl Into<String>, line_number: u32, column: u32) -> Self {
        Self::new(line, line_number, column, 1)
    }

    /// Format the snippet: the numbered source line plus a caret line.
    ///
    /// ```text
    ///  3 | var err = ;
    ///    |           ^
    /// ```
    pub fn format(&self) -> String {
        let display_line = self.line_number + 1;
        let gutter = display_line.to_string().len().max(2);
        let mut out = String::new();

        out.push_str(&format!(
            "{:>width$} | {}\n",
            display_line,
            self.line,
            width = gutter
        ));
        out.push_str(&format!("{:>width$} | ", "", width = gutter));
        for _ in 0..self.column {
            out.push(' ');
        }
        for _ in 0..self.width {
            out.push('^');
        }
        out
    }
}

/// Builder for constructing diagnostics with a fluent API.
///
/// # Examples
///
/// ```
/// use claspc_util::{DiagnosticBuilder, Handler, SourceSnippet, Span};
///
/// let handler = Handler::new();
/// DiagnosticBuilder::error("unexpected character '@'")
///     .span(Span::new(0, 4))
///     .snippet(SourceSnippet::point("let @", 0, 4))
///     .emit(&handler);
///
/// assert!(handler.has_errors());
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    snippets: Vec<SourceSnippet>,
}

impl DiagnosticBuilder {
    /// Create a new builder with the given level and message.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: Span::DUMMY,
            snippets: Vec::new(),
        }
    }

    /// Create an error builder.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Create a warning builder.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Set the source span.
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Add a source snippet.
    pub fn snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    /// Build the diagnostic.
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            snippets: self.snippets,
        }
    }

    /// Build and emit the diagnostic to the given handler.
    pub fn emit(self, handler: &super::Handler) {
        handler.emit(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Handler;

    #[test]
    fn test_snippet_new() {
        let snippet = SourceSnippet::new("var x = 42;", 0, 4, 1);
        assert_eq!(snippet.line, "var x = 42;");
        assert_eq!(snippet.line_number, 0);
        assert_eq!(snippet.column, 4);
        assert_eq!(snippet.width, 1);
    }

    #[test]
    fn test_snippet_width_is_at_least_one() {
        let snippet = SourceSnippet::new("x", 0, 0, 0);
        assert_eq!(snippet.width, 1);
    }

    #[test]
    fn test_snippet_format_underlines_column() {
        let snippet = SourceSnippet::point("var err = ;", 2, 10);
        let formatted = snippet.format();
        assert!(formatted.contains(" 3 | var err = ;"));
        let caret_line = formatted.lines().nth(1).unwrap();
        assert_eq!(caret_line.chars().filter(|&c| c == '^').count(), 1);
        assert!(caret_line.ends_with('^'));
    }

    #[test]
    fn test_snippet_format_wide_underline() {
        let snippet = SourceSnippet::new("a <= b;", 0, 2, 2);
        assert!(snippet.format().contains("^^"));
    }

    #[test]
    fn test_builder_error() {
        let diag = DiagnosticBuilder::error("test error")
            .span(Span::new(1, 2))
            .build();
        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.message, "test error");
        assert_eq!(diag.span, Span::new(1, 2));
    }

    #[test]
    fn test_builder_warning() {
        let diag = DiagnosticBuilder::warning("test warning").build();
        assert_eq!(diag.level, Level::Warning);
    }

    #[test]
    fn test_builder_snippet() {
        let diag = DiagnosticBuilder::error("test")
            .snippet(SourceSnippet::point("line", 0, 0))
            .build();
        assert_eq!(diag.snippets.len(), 1);
        assert_eq!(diag.snippets[0].line, "line");
    }

    #[test]
    fn test_builder_emit() {
        let handler = Handler::new();
        DiagnosticBuilder::error("test error")
            .span(Span::DUMMY)
            .emit(&handler);
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }
}
