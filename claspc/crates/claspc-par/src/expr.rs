//! Expression parsing.
//!
//! One method per precedence level, lowest first. Binary levels above
//! `exponent` are left-associative loops; `exponent` and `assignment`
//! recurse on their own level for right associativity.

use claspc_lex::TokenKind;

use crate::ast::AstNode;
use crate::Parser;

/// Operators accepted at the assignment level.
fn is_assignment_op(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::CaretEq
            | TokenKind::TildeEq
    )
}

impl<'a> Parser<'a> {
    /// Parse an expression.
    pub(crate) fn expression(&mut self) -> Option<AstNode> {
        self.assignment()
    }

    /// assignment := equality ( assignOp assignment )?   -- right-assoc
    fn assignment(&mut self) -> Option<AstNode> {
        let left = self.equality()?;
        if is_assignment_op(self.current().kind) {
            let op = self.advance();
            let right = self.assignment()?;
            return Some(AstNode::assign(left, right, op));
        }
        Some(left)
    }

    /// equality := comparison ( ( == | != ) comparison )*
    fn equality(&mut self) -> Option<AstNode> {
        let mut left = self.comparison()?;
        while matches!(self.current().kind, TokenKind::EqEq | TokenKind::BangEq) {
            let op = self.advance();
            let right = self.comparison()?;
            left = AstNode::binop(left, right, op);
        }
        Some(left)
    }

    /// comparison := term ( ( < | <= | > | >= ) term )*
    fn comparison(&mut self) -> Option<AstNode> {
        let mut left = self.term()?;
        while matches!(
            self.current().kind,
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq
        ) {
            let op = self.advance();
            let right = self.term()?;
            left = AstNode::binop(left, right, op);
        }
        Some(left)
    }

    /// term := factor ( ( + | - ) factor )*
    fn term(&mut self) -> Option<AstNode> {
        let mut left = self.factor()?;
        while matches!(self.current().kind, TokenKind::Plus | TokenKind::Minus) {
            let op = self.advance();
            let right = self.factor()?;
            left = AstNode::binop(left, right, op);
        }
        Some(left)
    }

    /// factor := exponent ( ( * | / | % ) exponent )*
    fn factor(&mut self) -> Option<AstNode> {
        let mut left = self.exponent()?;
        while matches!(
            self.current().kind,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            let op = self.advance();
            let right = self.exponent()?;
            left = AstNode::binop(left, right, op);
        }
        Some(left)
    }

    /// exponent := unary ( ^ exponent )?   -- right-assoc
    fn exponent(&mut self) -> Option<AstNode> {
        let left = self.unary()?;
        if self.check(TokenKind::Caret) {
            let op = self.advance();
            let right = self.exponent()?;
            return Some(AstNode::binop(left, right, op));
        }
        Some(left)
    }

    /// unary := ( - | ! | ~ ) unary | postfix
    fn unary(&mut self) -> Option<AstNode> {
        if matches!(
            self.current().kind,
            TokenKind::Minus | TokenKind::Bang | TokenKind::Tilde
        ) {
            let op = self.advance();
            let right = self.unary()?;
            return Some(AstNode::unop(right, op));
        }
        self.postfix()
    }

    /// postfix := primary ( ++ | -- | "(" args ")" )*
    fn postfix(&mut self) -> Option<AstNode> {
        let mut left = self.primary()?;
        loop {
            match self.current().kind {
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = self.advance();
                    left = AstNode::postfix(left, op);
                }
                TokenKind::LParen => {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        loop {
                            args.push(self.expression()?);
                            if !self.eat(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(TokenKind::RParen, "Expected ')' after arguments.")?;
                    left = AstNode::fn_call(left, args);
                }
                _ => break,
            }
        }
        Some(left)
    }

    /// primary := NUMBER | ID | "(" expression ")"
    fn primary(&mut self) -> Option<AstNode> {
        match self.current().kind {
            TokenKind::Number => {
                let value = self.advance();
                Some(AstNode::lit_num(value))
            }
            TokenKind::Id => {
                let name = self.advance();
                Some(AstNode::var_ref(&self.vars, name))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.expression()?;
                self.expect(TokenKind::RParen, "Expected ')' after expression.")?;
                Some(expr)
            }
            _ => {
                let token = self.current().clone();
                self.syntax_error(&token, "Expected expression.");
                None
            }
        }
    }
}
