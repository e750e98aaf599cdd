//! Expression parsing.
//!
//! Handles operator precedence parsing for predicates:
//! - Logical: OR, ??, AND, NOT
//! - Comparison: =, !=, <, <=, >, >=, IN, CONTAINS, STARTS WITH, ENDS WITH, MATCHES
//! - Additive: +, -
//! - Multiplicative: *, /, %
//! - Unary: -
//! - Primary: literals, lists, field paths, function calls

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;
use forge_core::FieldPath;

impl Parser {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_null_coalesce()?;

        while self.check(&TokenKind::Or) {
            let start = left.span();
            self.advance();
            let right = self.parse_null_coalesce()?;
            let span = self.span_from(start);
            left = self.bounded(Expr::BinaryOp(
                BinaryOp::Or,
                Box::new(left),
                Box::new(right),
                span,
            ))?;
        }

        Ok(left)
    }

    fn parse_null_coalesce(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;

        while self.check(&TokenKind::NullCoalesce) {
            let start = left.span();
            self.advance();
            let right = self.parse_and()?;
            let span = self.span_from(start);
            left = self.bounded(Expr::BinaryOp(
                BinaryOp::NullCoalesce,
                Box::new(left),
                Box::new(right),
                span,
            ))?;
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_not()?;

        while self.check(&TokenKind::And) {
            let start = left.span();
            self.advance();
            let right = self.parse_not()?;
            let span = self.span_from(start);
            left = self.bounded(Expr::BinaryOp(
                BinaryOp::And,
                Box::new(left),
                Box::new(right),
                span,
            ))?;
        }

        Ok(left)
    }

    fn parse_not(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Not) {
            let start = self.advance().span;
            let expr = self.nested(|p| p.parse_not())?;
            let span = self.span_from(start);
            self.bounded(Expr::UnaryOp(UnaryOp::Not, Box::new(expr), span))
        } else {
            self.parse_comparison()
        }
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => break,
            };

            let start = left.span();
            self.advance();
            let right = self.parse_additive()?;
            let span = self.span_from(start);
            left = self.bounded(Expr::BinaryOp(op, Box::new(left), Box::new(right), span))?;
        }

        // Handle string operators as contextual keywords.
        // These parse to function calls: `a STARTS WITH b` -> starts_with(a, b)
        let mut negated = false;
        let string_op = if self.check_ident("STARTS") {
            self.advance();
            self.expect_keyword("WITH")?;
            Some("starts_with")
        } else if self.check_ident("ENDS") {
            self.advance();
            self.expect_keyword("WITH")?;
            Some("ends_with")
        } else if self.check_ident("CONTAINS") {
            self.advance();
            Some("contains")
        } else if self.check_ident("MATCHES") {
            self.advance();
            Some("matches")
        } else if self.check(&TokenKind::In) {
            self.advance();
            Some("in")
        } else if self.check(&TokenKind::Not) && matches!(self.peek_next(), TokenKind::In) {
            // a NOT IN b -> not(in(a, b))
            self.advance();
            self.advance();
            negated = true;
            Some("in")
        } else {
            None
        };

        if let Some(fn_name) = string_op {
            let start = left.span();
            let right = self.parse_additive()?;
            let span = self.span_from(start);
            left = self.bounded(Expr::FnCall(FnCall {
                name: fn_name.to_string(),
                args: vec![left, right],
                span,
            }))?;
            if negated {
                left = self.bounded(Expr::UnaryOp(UnaryOp::Not, Box::new(left), span))?;
            }
        }

        // Handle IS [NOT] NULL
        if self.check(&TokenKind::Is) {
            let start = left.span();
            self.advance(); // consume IS

            let is_not = if self.check(&TokenKind::Not) {
                self.advance(); // consume NOT
                true
            } else {
                false
            };

            self.expect(&TokenKind::Null)?;
            let span = self.span_from(start);

            // Transform to comparison: expr = null or expr != null
            let null_expr = Expr::Literal(Literal {
                kind: LiteralKind::Null,
                span,
            });

            let op = if is_not { BinaryOp::NotEq } else { BinaryOp::Eq };
            left = self.bounded(Expr::BinaryOp(op, Box::new(left), Box::new(null_expr), span))?;
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };

            let start = left.span();
            self.advance();
            let right = self.parse_multiplicative()?;
            let span = self.span_from(start);
            left = self.bounded(Expr::BinaryOp(op, Box::new(left), Box::new(right), span))?;
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };

            let start = left.span();
            self.advance();
            let right = self.parse_unary()?;
            let span = self.span_from(start);
            left = self.bounded(Expr::BinaryOp(op, Box::new(left), Box::new(right), span))?;
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Minus) {
            let start = self.advance().span;
            let expr = self.nested(|p| p.parse_unary())?;
            let span = self.span_from(start);
            self.bounded(Expr::UnaryOp(UnaryOp::Neg, Box::new(expr), span))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        match &token.kind {
            // Literals
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Literal(Literal {
                    kind: LiteralKind::Null,
                    span: token.span,
                }))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal(Literal {
                    kind: LiteralKind::Bool(true),
                    span: token.span,
                }))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal(Literal {
                    kind: LiteralKind::Bool(false),
                    span: token.span,
                }))
            }
            TokenKind::Int(n) => {
                let n = *n;
                self.advance();
                Ok(Expr::Literal(Literal {
                    kind: LiteralKind::Int(n),
                    span: token.span,
                }))
            }
            TokenKind::Float(f) => {
                let f = *f;
                self.advance();
                Ok(Expr::Literal(Literal {
                    kind: LiteralKind::Float(f),
                    span: token.span,
                }))
            }
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(Expr::Literal(Literal {
                    kind: LiteralKind::String(s),
                    span: token.span,
                }))
            }

            // Parenthesized expression
            TokenKind::LParen => {
                self.advance();
                let expr = self.nested(|p| p.parse_expr())?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }

            // List literal: [a, b, c]
            TokenKind::LBracket => {
                let start = self.advance().span;
                let elements = self.nested(|p| p.parse_list_items(&TokenKind::RBracket))?;
                self.expect(&TokenKind::RBracket)?;
                let span = self.span_from(start);
                self.bounded(Expr::List(elements, span))
            }

            // Identifier (field path or function call)
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();

                if self.check(&TokenKind::LParen) {
                    self.advance();
                    let args = self.nested(|p| p.parse_list_items(&TokenKind::RParen))?;
                    self.expect(&TokenKind::RParen)?;
                    let span = self.span_from(token.span);
                    return self.bounded(Expr::FnCall(FnCall { name, args, span }));
                }

                let mut segments = vec![name];
                while self.check(&TokenKind::Dot) {
                    self.advance();
                    segments.push(self.expect_name()?);
                }
                let span = self.span_from(token.span);
                let path = FieldPath::new(segments)
                    .map_err(|e| ParseError::new(e.to_string(), span))?;
                Ok(Expr::Field(path, span))
            }

            _ => Err(ParseError::unexpected_token(
                token.span,
                "expression",
                token.kind.name(),
            )),
        }
    }

    /// Parse comma-separated expressions up to (not including) `close`.
    /// A trailing comma is allowed.
    fn parse_list_items(&mut self, close: &TokenKind) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.check(close) {
            return Ok(items);
        }
        items.push(self.parse_expr()?);
        while self.check(&TokenKind::Comma) {
            self.advance();
            if self.check(close) {
                break; // trailing comma
            }
            items.push(self.parse_expr()?);
        }
        Ok(items)
    }
}
