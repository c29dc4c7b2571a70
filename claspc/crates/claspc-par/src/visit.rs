//! Visitor dispatch.
//!
//! A [`Visitor`] is a flat table of callables indexed by [`NodeKind`],
//! sized to the node-kind universe. Downstream passes register an entry
//! per kind they care about and call [`visit`] to dispatch; the AST
//! module never needs to change when a pass is added.

use crate::ast::{AstNode, NodeKind};

/// A visitor table entry: called with the node and a caller context.
pub type VisitFn<C, R> = fn(&AstNode, &mut C) -> R;

/// Table of per-kind visitor functions.
///
/// Unset entries yield a null dispatch (`None` from [`visit`]);
/// consumers that iterate over the whole kind universe must handle
/// that. Partial tables are fine for passes that only visit a subset
/// of kinds.
///
/// # Examples
///
/// ```
/// use claspc_lex::{Token, TokenKind};
/// use claspc_par::ast::{AstNode, NodeKind};
/// use claspc_par::visit::{visit, Visitor};
///
/// fn count(_node: &AstNode, hits: &mut usize) {
///     *hits += 1;
/// }
///
/// let table: Visitor<usize, ()> = Visitor::new().set(NodeKind::NumberLiteral, count);
/// let lit = AstNode::lit_num(Token::synthetic(TokenKind::Number, "5"));
///
/// let mut hits = 0;
/// visit(Some(&lit), &mut hits, &table);
/// assert_eq!(hits, 1);
/// ```
pub struct Visitor<C, R> {
    table: [Option<VisitFn<C, R>>; NodeKind::COUNT],
}

impl<C, R> Visitor<C, R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            table: [None; NodeKind::COUNT],
        }
    }

    /// Register the entry for a kind, replacing any previous one.
    pub fn set(mut self, kind: NodeKind, f: VisitFn<C, R>) -> Self {
        self.table[kind as usize] = Some(f);
        self
    }

    /// The entry for a kind, if one is registered.
    pub fn get(&self, kind: NodeKind) -> Option<VisitFn<C, R>> {
        self.table[kind as usize]
    }
}

impl<C, R> Default for Visitor<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatch `node` to the matching table entry.
///
/// Returns `None` if the node is absent or the table has no entry for
/// its kind.
pub fn visit<C, R>(node: Option<&AstNode>, ctx: &mut C, visitor: &Visitor<C, R>) -> Option<R> {
    let node = node?;
    let f = visitor.get(node.kind())?;
    Some(f(node, ctx))
}
