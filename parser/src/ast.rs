//! Abstract Syntax Tree types for predicates.

use forge_core::FieldPath;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// An expression in the predicate language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Field(FieldPath, Span),
    List(Vec<Expr>, Span),
    BinaryOp(BinaryOp, Box<Expr>, Box<Expr>, Span),
    UnaryOp(UnaryOp, Box<Expr>, Span),
    FnCall(FnCall),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(l) => l.span,
            Expr::Field(_, s) => *s,
            Expr::List(_, s) => *s,
            Expr::BinaryOp(_, _, _, s) => *s,
            Expr::UnaryOp(_, _, s) => *s,
            Expr::FnCall(f) => f.span,
        }
    }

    /// Height of the expression tree. Literals and fields are 0.
    pub fn depth(&self) -> usize {
        let deepest = |items: &[Expr]| items.iter().map(Expr::depth).max().unwrap_or(0);
        match self {
            Expr::Literal(_) | Expr::Field(..) => 0,
            Expr::List(items, _) => 1 + deepest(items),
            Expr::BinaryOp(_, left, right, _) => 1 + left.depth().max(right.depth()),
            Expr::UnaryOp(_, operand, _) => 1 + operand.depth(),
            Expr::FnCall(fc) => 1 + deepest(&fc.args),
        }
    }

    /// All field paths referenced by this expression, in source order,
    /// without duplicates.
    pub fn fields(&self) -> Vec<&FieldPath> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldPath>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Field(path, _) => {
                if !out.contains(&path) {
                    out.push(path);
                }
            }
            Expr::List(items, _) => items.iter().for_each(|e| e.collect_fields(out)),
            Expr::BinaryOp(_, left, right, _) => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
            Expr::UnaryOp(_, operand, _) => operand.collect_fields(out),
            Expr::FnCall(fc) => fc.args.iter().for_each(|e| e.collect_fields(out)),
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    // Logical
    And,
    Or,
    // Null handling
    NullCoalesce,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::NullCoalesce => "??",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// Function call.
#[derive(Debug, Clone, PartialEq)]
pub struct FnCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}
