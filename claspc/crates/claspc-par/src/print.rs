//! AST printer - the reference visitor consumer.
//!
//! Renders the tree as a parenthesised s-expression-like form, one
//! table entry per node kind. The printer establishes the traversal
//! contract other passes follow: operands left-to-right, argument
//! lists in index order, block bodies in declaration order. Output is
//! deterministic for a given tree.

use std::sync::OnceLock;

use crate::ast::{AstNode, NodeKind};
use crate::visit::{visit, Visitor};

/// Render a whole tree to a string.
///
/// # Examples
///
/// ```
/// use claspc_lex::{Token, TokenKind};
/// use claspc_par::ast::AstNode;
/// use claspc_par::print::print_ast;
///
/// let lit = AstNode::lit_num(Token::synthetic(TokenKind::Number, "5"));
/// assert_eq!(print_ast(&lit), "(num_literal: val=5)");
/// ```
pub fn print_ast(ast: &AstNode) -> String {
    let mut out = String::new();
    visit(Some(ast), &mut out, printer());
    out
}

/// The printer's visitor table. Covers every node kind.
pub fn printer() -> &'static Visitor<String, ()> {
    static PRINTER: OnceLock<Visitor<String, ()>> = OnceLock::new();
    PRINTER.get_or_init(|| {
        Visitor::new()
            .set(NodeKind::BinOp, print_binop)
            .set(NodeKind::UnaryOp, print_unop)
            .set(NodeKind::Postfix, print_postfix)
            .set(NodeKind::NumberLiteral, print_num_literal)
            .set(NodeKind::VarRef, print_var_ref)
            .set(NodeKind::FnCall, print_fn_call)
            .set(NodeKind::Return, print_return)
            .set(NodeKind::ExprStmt, print_expr_stmt)
            .set(NodeKind::Block, print_block_stmt)
            .set(NodeKind::VarDecl, print_var_decl)
            .set(NodeKind::LetDecl, print_var_decl)
            .set(NodeKind::ConstDecl, print_var_decl)
            .set(NodeKind::FnDecl, print_fn_decl)
            .set(NodeKind::If, print_if)
            .set(NodeKind::While, print_while)
            .set(NodeKind::TypeSingle, print_type_single)
            .set(NodeKind::TypeArray, print_type_array)
            .set(NodeKind::TypeFn, print_type_fn)
            .set(NodeKind::TypeTemplate, print_type_template)
            .set(NodeKind::TypePtr, print_type_ptr)
    })
}

fn print_child(node: &AstNode, out: &mut String) {
    visit(Some(node), out, printer());
}

fn print_list(items: &[AstNode], out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        print_child(item, out);
    }
}

fn print_binop(node: &AstNode, out: &mut String) {
    let AstNode::BinOp {
        left, right, op, ..
    } = node
    else {
        unreachable!()
    };
    out.push_str("(binop: left=");
    print_child(left, out);
    out.push_str(&format!(" op={} right=", op.lexeme));
    print_child(right, out);
    out.push(')');
}

fn print_unop(node: &AstNode, out: &mut String) {
    let AstNode::UnaryOp { right, op, .. } = node else {
        unreachable!()
    };
    out.push_str(&format!("(unop: op={} right=", op.lexeme));
    print_child(right, out);
    out.push(')');
}

fn print_postfix(node: &AstNode, out: &mut String) {
    let AstNode::Postfix { left, op, .. } = node else {
        unreachable!()
    };
    out.push_str("(postfix: left=");
    print_child(left, out);
    out.push_str(&format!(" op={})", op.lexeme));
}

fn print_num_literal(node: &AstNode, out: &mut String) {
    let AstNode::NumberLiteral { value, .. } = node else {
        unreachable!()
    };
    out.push_str(&format!("(num_literal: val={})", value.lexeme));
}

fn print_var_ref(node: &AstNode, out: &mut String) {
    let AstNode::VarRef { name, .. } = node else {
        unreachable!()
    };
    out.push_str(&format!("(var_ref: name={})", name.lexeme));
}

fn print_fn_call(node: &AstNode, out: &mut String) {
    let AstNode::FnCall { callee, args, .. } = node else {
        unreachable!()
    };
    out.push_str("(fn_call: ref=");
    print_child(callee, out);
    out.push_str(" args=[");
    print_list(args, out);
    out.push_str("])");
}

fn print_return(node: &AstNode, out: &mut String) {
    let AstNode::Return { value } = node else {
        unreachable!()
    };
    match value {
        Some(value) => {
            out.push_str("(returnStmt: value=");
            print_child(value, out);
            out.push_str(")\n");
        }
        None => out.push_str("(returnStmt)\n"),
    }
}

fn print_expr_stmt(node: &AstNode, out: &mut String) {
    let AstNode::ExprStmt { expr } = node else {
        unreachable!()
    };
    out.push_str("(exprStmt: ");
    print_child(expr, out);
    out.push_str(")\n");
}

fn print_block_stmt(node: &AstNode, out: &mut String) {
    let AstNode::Block { body } = node else {
        unreachable!()
    };
    out.push_str("(blockStmt:\n");
    for stmt in body {
        print_child(stmt, out);
    }
    out.push_str(")\n");
}

fn print_var_decl(node: &AstNode, out: &mut String) {
    let (label, name, ty, init) = match node {
        AstNode::VarDecl { name, ty, init } => ("varDecl", name, ty, init),
        AstNode::LetDecl { name, ty, init } => ("letDecl", name, ty, init),
        AstNode::ConstDecl { name, ty, init } => ("constDecl", name, ty, init),
        _ => unreachable!(),
    };
    out.push_str(&format!("({}: name=\"{}\"", label, name.lexeme));
    if let Some(ty) = ty {
        out.push_str(" type=");
        print_child(ty, out);
    }
    if let Some(init) = init {
        out.push_str(" initializer=");
        print_child(init, out);
    }
    out.push_str(")\n");
}

fn print_fn_decl(node: &AstNode, out: &mut String) {
    let AstNode::FnDecl {
        name,
        ret,
        params,
        body,
    } = node
    else {
        unreachable!()
    };
    out.push_str(&format!("(fnDecl: name=\"{}\" ret=", name.lexeme));
    print_child(ret, out);
    out.push_str(" args=[");
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("({} ", param.name.lexeme));
        print_child(&param.ty, out);
        out.push(')');
    }
    out.push_str("] body=");
    print_child(body, out);
    out.push_str(")\n");
}

fn print_if(node: &AstNode, out: &mut String) {
    let AstNode::If { cond, body } = node else {
        unreachable!()
    };
    out.push_str("(ifStmt: cond=");
    print_child(cond, out);
    out.push_str(" body=");
    print_child(body, out);
    out.push_str(")\n");
}

fn print_while(node: &AstNode, out: &mut String) {
    let AstNode::While { cond, body } = node else {
        unreachable!()
    };
    out.push_str("(whileStmt: cond=");
    print_child(cond, out);
    out.push_str(" body=");
    print_child(body, out);
    out.push_str(")\n");
}

fn print_type_single(node: &AstNode, out: &mut String) {
    let AstNode::TypeSingle { name } = node else {
        unreachable!()
    };
    out.push_str(&format!("[single name=\"{}\"]", name.lexeme));
}

fn print_type_array(node: &AstNode, out: &mut String) {
    let AstNode::TypeArray { elem } = node else {
        unreachable!()
    };
    out.push_str("[array of=");
    print_child(elem, out);
    out.push(']');
}

fn print_type_fn(node: &AstNode, out: &mut String) {
    let AstNode::TypeFn { params, ret } = node else {
        unreachable!()
    };
    out.push_str("[fn args=[");
    print_list(params, out);
    out.push_str("] ret=");
    print_child(ret, out);
    out.push(']');
}

fn print_type_template(node: &AstNode, out: &mut String) {
    let AstNode::TypeTemplate { name, args } = node else {
        unreachable!()
    };
    out.push_str(&format!("[template name=\"{}\" args=[", name.lexeme));
    print_list(args, out);
    out.push_str("]]");
}

fn print_type_ptr(node: &AstNode, out: &mut String) {
    let AstNode::TypePtr { pointee } = node else {
        unreachable!()
    };
    out.push_str("[ptr to=");
    print_child(pointee, out);
    out.push(']');
}
