//! Parser for predicate source text.
//!
//! Token helpers and the public entry point live here; the precedence
//! climbing itself is in `expr`.

mod expr;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

/// Deepest nesting accepted before the parser gives up. Bounds both the
/// parser's own recursion (parentheses, lists, calls, prefix operators)
/// and the height of the resulting expression tree, so a long flat
/// `a or b or ...` chain counts one level per operator.
pub const MAX_NESTING_DEPTH: usize = 64;

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self {
            tokens,
            pos: 0,
            depth: 0,
        })
    }

    /// Parse a complete predicate. Trailing tokens are an error.
    pub fn parse_predicate(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_expr()?;
        if !self.check(&TokenKind::Eof) {
            let token = self.peek();
            return Err(ParseError::unexpected_token(
                token.span,
                "end of input",
                token.kind.name(),
            ));
        }
        Ok(expr)
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    pub(crate) fn peek_next(&self) -> &TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + 1).min(last)].kind
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn check_ident(&self, name: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(s) if s.eq_ignore_ascii_case(name))
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                kind.name(),
                token.kind.name(),
            ))
        }
    }

    pub(crate) fn expect_keyword(&mut self, name: &str) -> ParseResult<Token> {
        if self.check_ident(name) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                name,
                token.kind.name(),
            ))
        }
    }

    /// Expect an identifier or a keyword that can be used as a name.
    /// This allows keywords like `in` or `null` as path segments after a dot.
    pub(crate) fn expect_name(&mut self) -> ParseResult<String> {
        let token = self.peek().clone();
        let name = match &token.kind {
            TokenKind::Ident(name) => name.clone(),
            kind if kind.is_keyword() => kind.name().to_lowercase(),
            _ => {
                return Err(ParseError::unexpected_token(
                    token.span,
                    "field name",
                    token.kind.name(),
                ));
            }
        };
        self.advance();
        Ok(name)
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        let end = if self.pos > 0 {
            self.tokens[self.pos - 1].span.end
        } else {
            self.peek().span.end
        };
        Span::new(start.start, end, start.line, start.column)
    }

    /// Run `f` one nesting level deeper, failing once the limit is passed.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::too_deep(self.peek().span, MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Reject `expr` once its tree is deeper than the nesting limit.
    pub(crate) fn bounded(&self, expr: Expr) -> ParseResult<Expr> {
        if expr.depth() > MAX_NESTING_DEPTH {
            return Err(ParseError::too_deep(expr.span(), MAX_NESTING_DEPTH));
        }
        Ok(expr)
    }
}

// ==================== PUBLIC API ====================

/// Parse a predicate from source text.
pub fn parse_predicate(input: &str) -> ParseResult<Expr> {
    Parser::new(input)?.parse_predicate()
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn field(expr: &Expr) -> String {
        match expr {
            Expr::Field(path, _) => path.to_string(),
            other => panic!("Expected field, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_comparison() {
        let expr = parse_predicate("ram_gb >= 8").unwrap();
        match expr {
            Expr::BinaryOp(BinaryOp::GtEq, left, right, _) => {
                assert_eq!(field(&left), "ram_gb");
                assert!(matches!(
                    *right,
                    Expr::Literal(Literal {
                        kind: LiteralKind::Int(8),
                        ..
                    })
                ));
            }
            other => panic!("Expected >=, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_dotted_path() {
        let expr = parse_predicate("constraints.hardware = \"desktop\"").unwrap();
        match expr {
            Expr::BinaryOp(BinaryOp::Eq, left, _, _) => {
                assert_eq!(field(&left), "constraints.hardware");
            }
            other => panic!("Expected =, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_allowed_after_dot() {
        let expr = parse_predicate("limits.in > 0").unwrap();
        match expr {
            Expr::BinaryOp(_, left, _, _) => assert_eq!(field(&left), "limits.in"),
            other => panic!("Expected comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // GIVEN a predicate mixing and/or without parentheses
        let expr = parse_predicate("a or b and c").unwrap();

        // THEN the and-expression is the right operand of or
        match expr {
            Expr::BinaryOp(BinaryOp::Or, left, right, _) => {
                assert_eq!(field(&left), "a");
                assert!(matches!(*right, Expr::BinaryOp(BinaryOp::And, _, _, _)));
            }
            other => panic!("Expected or, got {:?}", other),
        }
    }

    #[test]
    fn test_symbolic_logic_operators() {
        let words = parse_predicate("not a and b or c").unwrap();
        let symbols = parse_predicate("!a && b || c").unwrap();

        // Spans differ, shapes must not
        fn shape(e: &Expr) -> String {
            match e {
                Expr::BinaryOp(op, l, r, _) => {
                    format!("({} {} {})", shape(l), op.symbol(), shape(r))
                }
                Expr::UnaryOp(UnaryOp::Not, e, _) => format!("(not {})", shape(e)),
                Expr::Field(p, _) => p.to_string(),
                _ => "?".to_string(),
            }
        }
        assert_eq!(shape(&words), shape(&symbols));
        assert_eq!(shape(&words), "(((not a) and b) or c)");
    }

    #[test]
    fn test_arithmetic_precedence() {
        let expr = parse_predicate("a + b * 2 > 10").unwrap();
        match expr {
            Expr::BinaryOp(BinaryOp::Gt, left, _, _) => match *left {
                Expr::BinaryOp(BinaryOp::Add, _, right, _) => {
                    assert!(matches!(*right, Expr::BinaryOp(BinaryOp::Mul, _, _, _)));
                }
                other => panic!("Expected +, got {:?}", other),
            },
            other => panic!("Expected >, got {:?}", other),
        }
    }

    #[test]
    fn test_string_operators_become_calls() {
        let cases = [
            ("name contains \"x\"", "contains"),
            ("name STARTS WITH \"x\"", "starts_with"),
            ("name ends with \"x\"", "ends_with"),
            ("name matches \"^x\"", "matches"),
            ("hardware in [\"desktop\", \"cloud\"]", "in"),
        ];
        for (src, expected) in cases {
            match parse_predicate(src).unwrap() {
                Expr::FnCall(call) => {
                    assert_eq!(call.name, expected, "for {}", src);
                    assert_eq!(call.args.len(), 2);
                }
                other => panic!("Expected call for {}, got {:?}", src, other),
            }
        }
    }

    #[test]
    fn test_not_in() {
        let expr = parse_predicate("hardware not in [\"toaster\"]").unwrap();
        match expr {
            Expr::UnaryOp(UnaryOp::Not, inner, _) => {
                assert!(matches!(*inner, Expr::FnCall(FnCall { ref name, .. }) if name == "in"));
            }
            other => panic!("Expected not(in(..)), got {:?}", other),
        }
    }

    #[test]
    fn test_is_null_and_is_not_null() {
        assert!(matches!(
            parse_predicate("owner is null").unwrap(),
            Expr::BinaryOp(BinaryOp::Eq, _, _, _)
        ));
        assert!(matches!(
            parse_predicate("owner IS NOT NULL").unwrap(),
            Expr::BinaryOp(BinaryOp::NotEq, _, _, _)
        ));
    }

    #[test]
    fn test_function_call() {
        match parse_predicate("exists(context)").unwrap() {
            Expr::FnCall(call) => {
                assert_eq!(call.name, "exists");
                assert_eq!(call.args.len(), 1);
                assert_eq!(field(&call.args[0]), "context");
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_fields_are_collected_once_in_order() {
        let expr = parse_predicate("b > 1 and a < 2 and b != 3").unwrap();
        let names: Vec<String> = expr.fields().iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_predicate("ram_gb >= 8 8").unwrap_err();
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn test_empty_predicate_rejected() {
        let err = parse_predicate("   ").unwrap_err();
        assert_eq!(err.found(), Some("end of input"));
    }

    #[test]
    fn test_unbalanced_parens_rejected() {
        assert!(parse_predicate("(a and b").is_err());
        assert!(parse_predicate("a and b)").is_err());
    }

    #[test]
    fn test_error_position() {
        // GIVEN an operator with a missing right operand on the second line
        let err = parse_predicate("ram_gb >= 8 and\n  >").unwrap_err();

        // THEN the error points at the stray token
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 3);
    }

    #[test]
    fn test_nesting_limit() {
        let ok = format!("{}a{}", "(".repeat(10), ")".repeat(10));
        assert!(parse_predicate(&ok).is_ok());

        let deep = format!(
            "{}a{}",
            "(".repeat(MAX_NESTING_DEPTH + 1),
            ")".repeat(MAX_NESTING_DEPTH + 1)
        );
        let err = parse_predicate(&deep).unwrap_err();
        assert!(err.message.contains("nested"));

        let nots = format!("{}a", "not ".repeat(MAX_NESTING_DEPTH + 1));
        assert!(parse_predicate(&nots).is_err());
    }

    #[test]
    fn test_flat_chain_limit() {
        // GIVEN chains of `or` terms, one node per operator
        let chain = |terms: usize| vec!["ram_gb == 1"; terms].join(" or ");

        // THEN a chain at the limit parses
        let expr = parse_predicate(&chain(MAX_NESTING_DEPTH)).unwrap();
        assert_eq!(expr.depth(), MAX_NESTING_DEPTH);

        // AND a 10k-term chain is rejected instead of building a huge tree
        let err = parse_predicate(&chain(10_000)).unwrap_err();
        assert!(err.message.contains("nested more than 64 levels"));
        assert_eq!((err.line(), err.column()), (1, 1));
    }

    #[test]
    fn test_long_arithmetic_chain_is_rejected() {
        let sum = vec!["1"; 10_000].join(" + ");
        assert!(parse_predicate(&format!("{} > 0", sum)).is_err());

        let list = format!("x in [{}]", vec!["1"; 10_000].join(", "));
        assert!(parse_predicate(&list).is_ok());
    }
}
