//! Type grammar parsing.
//!
//! ```text
//! type := "*" type                          -- pointer
//!       | "[" type "]"                      -- array
//!       | "fn" "(" typeList? ")" "->" type  -- function
//!       | ID ( "<" typeList ">" )?          -- single or template
//! ```

use claspc_lex::TokenKind;

use crate::ast::AstNode;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parse a type node.
    pub(crate) fn type_expr(&mut self) -> Option<AstNode> {
        match self.current().kind {
            TokenKind::Star => {
                self.advance();
                let pointee = self.type_expr()?;
                Some(AstNode::type_ptr(pointee))
            }
            TokenKind::LBracket => {
                self.advance();
                let elem = self.type_expr()?;
                self.expect(TokenKind::RBracket, "Expected ']' after array element type.")?;
                Some(AstNode::type_array(elem))
            }
            TokenKind::KwFn => {
                self.advance();
                self.expect(TokenKind::LParen, "Expected '(' after 'fn'.")?;
                let mut params = Vec::new();
                if !self.check(TokenKind::RParen) {
                    loop {
                        params.push(self.type_expr()?);
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RParen, "Expected ')' after parameter types.")?;
                self.expect(TokenKind::Arrow, "Expected '->' before return type.")?;
                let ret = self.type_expr()?;
                Some(AstNode::type_fn(params, ret))
            }
            TokenKind::Id => {
                let name = self.advance();
                if self.eat(TokenKind::Lt) {
                    let mut args = vec![self.type_expr()?];
                    while self.eat(TokenKind::Comma) {
                        args.push(self.type_expr()?);
                    }
                    self.expect(TokenKind::Gt, "Expected '>' after template arguments.")?;
                    Some(AstNode::type_template(name, args))
                } else {
                    Some(AstNode::type_single(name))
                }
            }
            _ => {
                let token = self.current().clone();
                self.syntax_error(&token, "Expected type.");
                None
            }
        }
    }
}
