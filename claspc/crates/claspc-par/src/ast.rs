//! AST node definitions.
//!
//! The tree is a single tagged sum type, [`AstNode`], covering
//! expression, statement, and type nodes; [`NodeKind`] is the parallel
//! fieldless enumeration that indexes visitor tables. Expression nodes
//! carry an [`ExprType`] annotation stamped at construction time, which
//! is where the constness propagation rules live.

use claspc_lex::{Token, TokenKind};

use crate::vars::ScopeStack;

/// Mutability/constness bitset attached to expression nodes.
///
/// - [`CONST`](TypeFlags::CONST): compile-time constant
/// - [`IMMUTABLE`](TypeFlags::IMMUTABLE): run-time value, not an lvalue
/// - [`MUTABLE`](TypeFlags::MUTABLE): assignable lvalue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeFlags(u8);

impl TypeFlags {
    /// Compile-time constant.
    pub const CONST: TypeFlags = TypeFlags(0b0000_0001);
    /// Assignable lvalue.
    pub const MUTABLE: TypeFlags = TypeFlags(0b0000_0010);
    /// Run-time value that is not an lvalue.
    pub const IMMUTABLE: TypeFlags = TypeFlags(0b0000_0100);

    /// The empty flag set.
    pub const fn empty() -> Self {
        TypeFlags(0)
    }

    /// True if every flag in `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: TypeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for TypeFlags {
    type Output = TypeFlags;

    fn bitor(self, rhs: TypeFlags) -> TypeFlags {
        TypeFlags(self.0 | rhs.0)
    }
}

/// Expression type annotation: an optional type node plus flags.
///
/// The type may be `None` when the parser could not determine one (an
/// unresolved variable reference, a function call result).
#[derive(Clone, Debug)]
pub struct ExprType {
    /// Declared or inferred type node, when known.
    pub ty: Option<Box<AstNode>>,
    /// Constness/mutability flags.
    pub flags: TypeFlags,
}

impl ExprType {
    /// An annotation with flags but no known type.
    pub fn unresolved(flags: TypeFlags) -> Self {
        Self { ty: None, flags }
    }

    /// An annotation with a known type node.
    pub fn with_type(ty: AstNode, flags: TypeFlags) -> Self {
        Self {
            ty: Some(Box::new(ty)),
            flags,
        }
    }

    /// True if the `CONST` flag is set.
    #[inline]
    pub fn is_const(&self) -> bool {
        self.flags.contains(TypeFlags::CONST)
    }
}

/// A function parameter: name plus declared type.
#[derive(Clone, Debug)]
pub struct FnArg {
    /// Parameter name token.
    pub name: Token,
    /// Declared parameter type (a type node).
    pub ty: AstNode,
}

/// The closed enumeration of node shapes, used to index visitor tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    BinOp,
    UnaryOp,
    Postfix,
    NumberLiteral,
    VarRef,
    FnCall,

    Return,
    ExprStmt,
    Block,
    VarDecl,
    LetDecl,
    ConstDecl,
    FnDecl,

    If,
    While,

    TypeSingle,
    TypeArray,
    TypeFn,
    TypeTemplate,
    TypePtr,
}

impl NodeKind {
    /// Number of node kinds; visitor tables are sized by this.
    pub const COUNT: usize = 20;
}

/// An AST node: a tagged variant with per-kind payload.
///
/// Child nodes are owned; tokens are stored by value. The tree produced
/// by the parser is strict - no node is shared between parents.
#[derive(Clone, Debug)]
pub enum AstNode {
    /// Binary operation (`5 + 3`, `x = 1`).
    BinOp {
        left: Box<AstNode>,
        right: Box<AstNode>,
        op: Token,
        ty: ExprType,
    },
    /// Unary operation (`-8`, `!ok`, `~bits`).
    UnaryOp {
        right: Box<AstNode>,
        op: Token,
        ty: ExprType,
    },
    /// Postfix operation (`x++`, `n--`).
    Postfix {
        left: Box<AstNode>,
        op: Token,
        ty: ExprType,
    },
    /// Number literal (`22`, `1.5`).
    NumberLiteral { value: Token, ty: ExprType },
    /// Variable reference (`x`, `foo`).
    VarRef { name: Token, ty: ExprType },
    /// Function call (`foo()`, `mul(a, b)`).
    FnCall {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
        ty: ExprType,
    },

    /// `return expr?;`
    Return { value: Option<Box<AstNode>> },
    /// Expression in statement position.
    ExprStmt { expr: Box<AstNode> },
    /// `{ stmt* }`
    Block { body: Vec<AstNode> },
    /// `var name: type? = init?;`
    VarDecl {
        name: Token,
        ty: Option<Box<AstNode>>,
        init: Option<Box<AstNode>>,
    },
    /// `let name: type? = init?;`
    LetDecl {
        name: Token,
        ty: Option<Box<AstNode>>,
        init: Option<Box<AstNode>>,
    },
    /// `const name: type? = init?;`
    ConstDecl {
        name: Token,
        ty: Option<Box<AstNode>>,
        init: Option<Box<AstNode>>,
    },
    /// `fn name(params) -> ret { body }`
    FnDecl {
        name: Token,
        ret: Box<AstNode>,
        params: Vec<FnArg>,
        body: Box<AstNode>,
    },

    /// `if (cond) body`
    If {
        cond: Box<AstNode>,
        body: Box<AstNode>,
    },
    /// `while (cond) body`
    While {
        cond: Box<AstNode>,
        body: Box<AstNode>,
    },

    /// Named type (`int`).
    TypeSingle { name: Token },
    /// Array type (`[int]`).
    TypeArray { elem: Box<AstNode> },
    /// Function type (`fn(int) -> int`).
    TypeFn {
        params: Vec<AstNode>,
        ret: Box<AstNode>,
    },
    /// Template type (`map<int, int>`).
    TypeTemplate { name: Token, args: Vec<AstNode> },
    /// Pointer type (`*int`).
    TypePtr { pointee: Box<AstNode> },
}

impl AstNode {
    /// The kind discriminator of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::BinOp { .. } => NodeKind::BinOp,
            AstNode::UnaryOp { .. } => NodeKind::UnaryOp,
            AstNode::Postfix { .. } => NodeKind::Postfix,
            AstNode::NumberLiteral { .. } => NodeKind::NumberLiteral,
            AstNode::VarRef { .. } => NodeKind::VarRef,
            AstNode::FnCall { .. } => NodeKind::FnCall,
            AstNode::Return { .. } => NodeKind::Return,
            AstNode::ExprStmt { .. } => NodeKind::ExprStmt,
            AstNode::Block { .. } => NodeKind::Block,
            AstNode::VarDecl { .. } => NodeKind::VarDecl,
            AstNode::LetDecl { .. } => NodeKind::LetDecl,
            AstNode::ConstDecl { .. } => NodeKind::ConstDecl,
            AstNode::FnDecl { .. } => NodeKind::FnDecl,
            AstNode::If { .. } => NodeKind::If,
            AstNode::While { .. } => NodeKind::While,
            AstNode::TypeSingle { .. } => NodeKind::TypeSingle,
            AstNode::TypeArray { .. } => NodeKind::TypeArray,
            AstNode::TypeFn { .. } => NodeKind::TypeFn,
            AstNode::TypeTemplate { .. } => NodeKind::TypeTemplate,
            AstNode::TypePtr { .. } => NodeKind::TypePtr,
        }
    }

    /// The expression type annotation, for expression nodes.
    pub fn expr_type(&self) -> Option<&ExprType> {
        match self {
            AstNode::BinOp { ty, .. }
            | AstNode::UnaryOp { ty, .. }
            | AstNode::Postfix { ty, .. }
            | AstNode::NumberLiteral { ty, .. }
            | AstNode::VarRef { ty, .. }
            | AstNode::FnCall { ty, .. } => Some(ty),
            _ => None,
        }
    }

    fn is_const_expr(&self) -> bool {
        self.expr_type().map_or(false, ExprType::is_const)
    }

    // ------------------------------------------------------------------
    // Expression constructors
    // ------------------------------------------------------------------

    /// Binary operation. Constant iff both operands are constant.
    pub fn binop(left: AstNode, right: AstNode, op: Token) -> AstNode {
        let flags = if left.is_const_expr() && right.is_const_expr() {
            TypeFlags::CONST
        } else {
            TypeFlags::IMMUTABLE
        };
        AstNode::BinOp {
            left: Box::new(left),
            right: Box::new(right),
            op,
            ty: ExprType::unresolved(flags),
        }
    }

    /// Assignment operation. An assignment evaluates to its left-hand
    /// side, so the result keeps the lvalue's expression type.
    pub fn assign(left: AstNode, right: AstNode, op: Token) -> AstNode {
        let ty = left
            .expr_type()
            .cloned()
            .unwrap_or_else(|| ExprType::unresolved(TypeFlags::IMMUTABLE));
        AstNode::BinOp {
            left: Box::new(left),
            right: Box::new(right),
            op,
            ty,
        }
    }

    /// Unary operation. Constant iff the operand is constant.
    pub fn unop(right: AstNode, op: Token) -> AstNode {
        let flags = if right.is_const_expr() {
            TypeFlags::CONST
        } else {
            TypeFlags::IMMUTABLE
        };
        AstNode::UnaryOp {
            right: Box::new(right),
            op,
            ty: ExprType::unresolved(flags),
        }
    }

    /// Postfix operation. Constant iff the operand is constant.
    pub fn postfix(left: AstNode, op: Token) -> AstNode {
        let flags = if left.is_const_expr() {
            TypeFlags::CONST
        } else {
            TypeFlags::IMMUTABLE
        };
        AstNode::Postfix {
            left: Box::new(left),
            op,
            ty: ExprType::unresolved(flags),
        }
    }

    /// Number literal: constant, typed `int`.
    pub fn lit_num(value: Token) -> AstNode {
        // TODO: floats
        let int_type = AstNode::type_single(Token::synthetic(TokenKind::Id, "int"));
        AstNode::NumberLiteral {
            value,
            ty: ExprType::with_type(int_type, TypeFlags::CONST),
        }
    }

    /// Variable reference. Inherits flags and type from the variable
    /// table; unknown names default to a mutable, unresolved reference.
    pub fn var_ref(vars: &ScopeStack, name: Token) -> AstNode {
        let ty = match vars.lookup(&name.lexeme) {
            Some(var) => ExprType {
                ty: var.ty.clone().map(Box::new),
                flags: var.flags,
            },
            None => ExprType::unresolved(TypeFlags::MUTABLE),
        };
        AstNode::VarRef { name, ty }
    }

    /// Function call. The result is a plain run-time value; its type
    /// stays unresolved until functions get a symbol table.
    pub fn fn_call(callee: AstNode, args: Vec<AstNode>) -> AstNode {
        AstNode::FnCall {
            callee: Box::new(callee),
            args,
            ty: ExprType::unresolved(TypeFlags::IMMUTABLE),
        }
    }

    // ------------------------------------------------------------------
    // Statement constructors
    // ------------------------------------------------------------------

    /// Return statement.
    pub fn return_stmt(value: Option<AstNode>) -> AstNode {
        AstNode::Return {
            value: value.map(Box::new),
        }
    }

    /// Expression statement.
    pub fn expr_stmt(expr: AstNode) -> AstNode {
        AstNode::ExprStmt {
            expr: Box::new(expr),
        }
    }

    /// Block statement.
    pub fn block_stmt(body: Vec<AstNode>) -> AstNode {
        AstNode::Block { body }
    }

    /// `var` declaration statement.
    pub fn var_decl(name: Token, ty: Option<AstNode>, init: Option<AstNode>) -> AstNode {
        AstNode::VarDecl {
            name,
            ty: ty.map(Box::new),
            init: init.map(Box::new),
        }
    }

    /// `let` declaration statement.
    pub fn let_decl(name: Token, ty: Option<AstNode>, init: Option<AstNode>) -> AstNode {
        AstNode::LetDecl {
            name,
            ty: ty.map(Box::new),
            init: init.map(Box::new),
        }
    }

    /// `const` declaration statement.
    pub fn const_decl(name: Token, ty: Option<AstNode>, init: Option<AstNode>) -> AstNode {
        AstNode::ConstDecl {
            name,
            ty: ty.map(Box::new),
            init: init.map(Box::new),
        }
    }

    /// Function declaration statement.
    pub fn fn_decl(name: Token, ret: AstNode, params: Vec<FnArg>, body: AstNode) -> AstNode {
        AstNode::FnDecl {
            name,
            ret: Box::new(ret),
            params,
            body: Box::new(body),
        }
    }

    /// If statement.
    pub fn if_stmt(cond: AstNode, body: AstNode) -> AstNode {
        AstNode::If {
            cond: Box::new(cond),
            body: Box::new(body),
        }
    }

    /// While statement.
    pub fn while_stmt(cond: AstNode, body: AstNode) -> AstNode {
        AstNode::While {
            cond: Box::new(cond),
            body: Box::new(body),
        }
    }

    // ------------------------------------------------------------------
    // Type constructors
    // ------------------------------------------------------------------

    /// Named type.
    pub fn type_single(name: Token) -> AstNode {
        AstNode::TypeSingle { name }
    }

    /// Array type.
    pub fn type_array(elem: AstNode) -> AstNode {
        AstNode::TypeArray {
            elem: Box::new(elem),
        }
    }

    /// Function type.
    pub fn type_fn(params: Vec<AstNode>, ret: AstNode) -> AstNode {
        AstNode::TypeFn {
            params,
            ret: Box::new(ret),
        }
    }

    /// Template type.
    pub fn type_template(name: Token, args: Vec<AstNode>) -> AstNode {
        AstNode::TypeTemplate { name, args }
    }

    /// Pointer type.
    pub fn type_ptr(pointee: AstNode) -> AstNode {
        AstNode::TypePtr {
            pointee: Box::new(pointee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> AstNode {
        AstNode::lit_num(Token::synthetic(TokenKind::Number, text))
    }

    fn op(kind: TokenKind, text: &str) -> Token {
        Token::synthetic(kind, text)
    }

    #[test]
    fn test_flags_contains() {
        let both = TypeFlags::CONST | TypeFlags::IMMUTABLE;
        assert!(both.contains(TypeFlags::CONST));
        assert!(both.contains(TypeFlags::IMMUTABLE));
        assert!(!both.contains(TypeFlags::MUTABLE));
        assert!(!TypeFlags::empty().contains(TypeFlags::CONST));
    }

    #[test]
    fn test_lit_num_is_const_int() {
        let lit = num("42");
        let ty = lit.expr_type().unwrap();
        assert!(ty.is_const());
        match ty.ty.as_deref() {
            Some(AstNode::TypeSingle { name }) => assert_eq!(name.lexeme, "int"),
            other => panic!("expected single type, got {:?}", other),
        }
    }

    #[test]
    fn test_binop_const_iff_both_const() {
        let both = AstNode::binop(num("1"), num("2"), op(TokenKind::Plus, "+"));
        assert!(both.expr_type().unwrap().is_const());

        let vars = ScopeStack::new();
        let var = AstNode::var_ref(&vars, Token::synthetic(TokenKind::Id, "x"));
        let mixed = AstNode::binop(num("1"), var, op(TokenKind::Plus, "+"));
        let ty = mixed.expr_type().unwrap();
        assert!(!ty.is_const());
        assert!(ty.flags.contains(TypeFlags::IMMUTABLE));
    }

    #[test]
    fn test_unop_and_postfix_propagate_const() {
        let negated = AstNode::unop(num("8"), op(TokenKind::Minus, "-"));
        assert!(negated.expr_type().unwrap().is_const());

        let bumped = AstNode::postfix(num("8"), op(TokenKind::PlusPlus, "++"));
        assert!(bumped.expr_type().unwrap().is_const());

        let vars = ScopeStack::new();
        let var = AstNode::var_ref(&vars, Token::synthetic(TokenKind::Id, "x"));
        let negated_var = AstNode::unop(var, op(TokenKind::Minus, "-"));
        assert!(!negated_var.expr_type().unwrap().is_const());
    }

    #[test]
    fn test_assign_keeps_lvalue_type() {
        let vars = ScopeStack::new();
        let lhs = AstNode::var_ref(&vars, Token::synthetic(TokenKind::Id, "x"));
        let node = AstNode::assign(lhs, num("1"), op(TokenKind::Eq, "="));
        assert!(node.expr_type().unwrap().flags.contains(TypeFlags::MUTABLE));
    }

    #[test]
    fn test_unknown_var_ref_is_mutable_unresolved() {
        let vars = ScopeStack::new();
        let var = AstNode::var_ref(&vars, Token::synthetic(TokenKind::Id, "nope"));
        let ty = var.expr_type().unwrap();
        assert!(ty.flags.contains(TypeFlags::MUTABLE));
        assert!(ty.ty.is_none());
    }

    #[test]
    fn test_fn_call_is_immutable_unresolved() {
        let vars = ScopeStack::new();
        let callee = AstNode::var_ref(&vars, Token::synthetic(TokenKind::Id, "foo"));
        let call = AstNode::fn_call(callee, vec![num("1")]);
        let ty = call.expr_type().unwrap();
        assert!(ty.flags.contains(TypeFlags::IMMUTABLE));
        assert!(ty.ty.is_none());
    }

    #[test]
    fn test_statement_nodes_have_no_expr_type() {
        let ret = AstNode::return_stmt(None);
        assert!(ret.expr_type().is_none());
        let block = AstNode::block_stmt(vec![]);
        assert!(block.expr_type().is_none());
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(num("1").kind(), NodeKind::NumberLiteral);
        assert_eq!(AstNode::return_stmt(None).kind(), NodeKind::Return);
        assert_eq!(AstNode::block_stmt(vec![]).kind(), NodeKind::Block);
        let ty = AstNode::type_single(Token::synthetic(TokenKind::Id, "int"));
        assert_eq!(ty.kind(), NodeKind::TypeSingle);
        assert_eq!(AstNode::type_ptr(num("1")).kind(), NodeKind::TypePtr);
    }

    #[test]
    fn test_kind_indices_are_dense() {
        assert_eq!(NodeKind::BinOp as usize, 0);
        assert_eq!(NodeKind::TypePtr as usize, NodeKind::COUNT - 1);
    }
}
