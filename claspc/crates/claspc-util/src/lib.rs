//! claspc-util - Foundation types for the Clasp compiler front-end.
//!
//! This crate holds the pieces every phase of the pipeline needs:
//!
//! - [`Span`] - source locations (line and column of a token's first
//!   character)
//! - [`Diagnostic`], [`DiagnosticBuilder`], [`Handler`] - error and
//!   warning reporting with source snippets
//! - `FxHashMap`/`FxHashSet` re-exports for name-keyed tables
//!
//! The diagnostic flow is collect-then-render: phases emit
//! [`Diagnostic`] values into a shared [`Handler`] as they run, and the
//! driver renders everything to stderr once the phase finishes. Phases
//! signal failure through their return values, not by printing.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level, SourceSnippet};
pub use span::Span;

// Re-export commonly used hash containers
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
