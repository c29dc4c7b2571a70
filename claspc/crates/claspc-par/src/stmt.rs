//! Statement parsing.
//!
//! Each production also decides the semicolon policy: leaf statements
//! set `punc_next_stmt`, block-tailed ones clear it, and [`Parser::stmt`]
//! consumes the trailing `;` when the flag is set.

use claspc_lex::TokenKind;

use crate::ast::{AstNode, FnArg};
use crate::vars::{DeclKind, Variable};
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parse a single statement, including its terminating `;` when the
    /// production requires one.
    pub fn stmt(&mut self) -> Option<AstNode> {
        let node = match self.current().kind {
            TokenKind::KwReturn => self.return_stmt(),
            TokenKind::KwIf => self.if_stmt(),
            TokenKind::KwWhile => self.while_stmt(),
            TokenKind::LBrace => self.block(),
            TokenKind::KwVar => self.decl_stmt(DeclKind::Var),
            TokenKind::KwLet => self.decl_stmt(DeclKind::Let),
            TokenKind::KwConst => self.decl_stmt(DeclKind::Const),
            TokenKind::KwFn => self.fn_decl(),
            TokenKind::Unknown => {
                let token = self.current().clone();
                self.syntax_error(&token, "Unknown token.");
                return None;
            }
            _ => self.expr_stmt(),
        }?;

        if self.punc_next_stmt {
            self.expect(TokenKind::Semicolon, "Expected ';' after statement.")?;
        }
        Some(node)
    }

    /// returnStmt := "return" expression? ";"
    fn return_stmt(&mut self) -> Option<AstNode> {
        self.advance();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.punc_next_stmt = true;
        Some(AstNode::return_stmt(value))
    }

    /// ifStmt := "if" "(" expression ")" statement
    fn if_stmt(&mut self) -> Option<AstNode> {
        self.advance();
        self.expect(TokenKind::LParen, "Expected '(' after 'if'.")?;
        let cond = self.expression()?;
        self.expect(TokenKind::RParen, "Expected ')' after condition.")?;
        let body = self.stmt()?;
        self.punc_next_stmt = false;
        Some(AstNode::if_stmt(cond, body))
    }

    /// whileStmt := "while" "(" expression ")" statement
    fn while_stmt(&mut self) -> Option<AstNode> {
        self.advance();
        self.expect(TokenKind::LParen, "Expected '(' after 'while'.")?;
        let cond = self.expression()?;
        self.expect(TokenKind::RParen, "Expected ')' after condition.")?;
        let body = self.stmt()?;
        self.punc_next_stmt = false;
        Some(AstNode::while_stmt(cond, body))
    }

    /// blockStmt := "{" statement* "}"
    pub(crate) fn block(&mut self) -> Option<AstNode> {
        self.expect(TokenKind::LBrace, "Expected '{'.")?;
        self.vars.push_scope();
        let mut body = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            body.push(self.stmt()?);
        }
        self.expect(TokenKind::RBrace, "Expected '}' after block.")?;
        self.vars.pop_scope();
        self.punc_next_stmt = false;
        Some(AstNode::block_stmt(body))
    }

    /// varDecl | letDecl | constDecl :=
    ///     ("var" | "let" | "const") ID (":" type)? ("=" expression)? ";"
    ///
    /// The variable is recorded after its type annotation and before its
    /// initializer, so the initializer may not reference the name being
    /// declared as if it were already initialized elsewhere.
    fn decl_stmt(&mut self, kind: DeclKind) -> Option<AstNode> {
        let keyword = self.advance();
        let name = self.expect(TokenKind::Id, "Expected variable name.")?;

        let ty = if self.eat(TokenKind::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };

        self.vars.declare(
            name.lexeme.clone(),
            Variable {
                kind,
                ty: ty.clone(),
                flags: kind.flags(),
                depth: self.vars.depth(),
            },
        );

        let init = if self.eat(TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };

        match kind {
            DeclKind::Var if init.is_none() => {
                self.syntax_error(&keyword, "'var' declarations require an initializer.");
                return None;
            }
            DeclKind::Let | DeclKind::Const if ty.is_none() && init.is_none() => {
                self.syntax_error(
                    &keyword,
                    "Declarations require a type annotation or an initializer.",
                );
                return None;
            }
            _ => {}
        }

        self.punc_next_stmt = true;
        Some(match kind {
            DeclKind::Var => AstNode::var_decl(name, ty, init),
            DeclKind::Let => AstNode::let_decl(name, ty, init),
            DeclKind::Const => AstNode::const_decl(name, ty, init),
        })
    }

    /// fnDecl := "fn" ID "(" (ID ":" type ("," ID ":" type)*)? ")"
    ///           "->" type blockStmt
    ///
    /// Parameters are declared into a scope wrapping the body, so body
    /// statements see them like ordinary mutable variables.
    fn fn_decl(&mut self) -> Option<AstNode> {
        self.advance();
        let name = self.expect(TokenKind::Id, "Expected function name.")?;
        self.expect(TokenKind::LParen, "Expected '(' after function name.")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let pname = self.expect(TokenKind::Id, "Expected parameter name.")?;
                self.expect(TokenKind::Colon, "Expected ':' after parameter name.")?;
                let pty = self.type_expr()?;
                params.push(FnArg {
                    name: pname,
                    ty: pty,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "Expected ')' after parameters.")?;
        self.expect(TokenKind::Arrow, "Expected '->' before return type.")?;
        let ret = self.type_expr()?;

        self.vars.push_scope();
        for param in &params {
            self.vars.declare(
                param.name.lexeme.clone(),
                Variable {
                    kind: DeclKind::Var,
                    ty: Some(param.ty.clone()),
                    flags: DeclKind::Var.flags(),
                    depth: self.vars.depth(),
                },
            );
        }
        let body = self.block();
        self.vars.pop_scope();
        let body = body?;

        self.punc_next_stmt = false;
        Some(AstNode::fn_decl(name, ret, params, body))
    }

    /// exprStmt := expression ";"
    fn expr_stmt(&mut self) -> Option<AstNode> {
        let expr = self.expression()?;
        self.punc_next_stmt = true;
        Some(AstNode::expr_stmt(expr))
    }
}
