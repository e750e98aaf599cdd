//! Expression evaluation.

use std::cmp::Ordering;

use forge_core::{Map, Value};
use forge_parser::{BinaryOp, Expr, FnCall, Literal, LiteralKind, UnaryOp};
use regex_lite::Regex;

use crate::{EvalError, EvalResult};

/// Expression evaluator over one domain specification.
///
/// Evaluation only reads `fields`; the same evaluator can be reused for
/// every constraint of a rule document.
pub struct Evaluator<'a> {
    fields: &'a Map,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator.
    pub fn new(fields: &'a Map) -> Self {
        Self { fields }
    }

    /// Evaluate an expression.
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(lit) => Ok(self.eval_literal(lit)),
            Expr::Field(path, _) => path
                .resolve(self.fields)
                .cloned()
                .ok_or_else(|| EvalError::field_absent(path.to_string())),
            Expr::List(elements, _) => {
                let values: EvalResult<Vec<Value>> =
                    elements.iter().map(|e| self.eval(e)).collect();
                Ok(Value::List(values?))
            }
            Expr::BinaryOp(op, left, right, _) => self.eval_binary_op(*op, left, right),
            Expr::UnaryOp(op, operand, _) => self.eval_unary_op(*op, operand),
            Expr::FnCall(fc) => self.eval_fn_call(fc),
        }
    }

    fn eval_literal(&self, lit: &Literal) -> Value {
        match &lit.kind {
            LiteralKind::Null => Value::Null,
            LiteralKind::Bool(b) => Value::Bool(*b),
            LiteralKind::Int(i) => Value::Int(*i),
            LiteralKind::Float(f) => Value::Float(*f),
            LiteralKind::String(s) => Value::String(s.clone()),
        }
    }

    /// Evaluate a binary operation.
    fn eval_binary_op(&self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult<Value> {
        match op {
            // Operators that may skip their right operand
            BinaryOp::And => self.eval_and(left, right),
            BinaryOp::Or => self.eval_or(left, right),
            BinaryOp::NullCoalesce => match self.eval(left) {
                Ok(Value::Null) => self.eval(right),
                Err(e) if e.is_field_absent() => self.eval(right),
                other => other,
            },
            _ => {
                let left_val = self.eval(left)?;
                let right_val = self.eval(right)?;
                apply_binary(op, &left_val, &right_val)
            }
        }
    }

    // ========== Logical helpers ==========

    // Three-valued AND: false wins, then null, then true.
    fn eval_and(&self, left: &Expr, right: &Expr) -> EvalResult<Value> {
        let left_val = self.eval(left)?;
        match left_val {
            Value::Bool(false) => Ok(Value::Bool(false)),
            Value::Bool(true) | Value::Null => {
                let right_val = self.eval(right)?;
                match (&left_val, &right_val) {
                    (_, Value::Bool(false)) => Ok(Value::Bool(false)),
                    (Value::Bool(true), Value::Bool(true)) => Ok(Value::Bool(true)),
                    (_, Value::Bool(_) | Value::Null) => Ok(Value::Null),
                    _ => Err(EvalError::type_error(format!(
                        "cannot apply and to {}",
                        right_val.type_name()
                    ))),
                }
            }
            _ => Err(EvalError::type_error(format!(
                "cannot apply and to {}",
                left_val.type_name()
            ))),
        }
    }

    // Three-valued OR: true wins, then null, then false.
    fn eval_or(&self, left: &Expr, right: &Expr) -> EvalResult<Value> {
        let left_val = self.eval(left)?;
        match left_val {
            Value::Bool(true) => Ok(Value::Bool(true)),
            Value::Bool(false) | Value::Null => {
                let right_val = self.eval(right)?;
                match (&left_val, &right_val) {
                    (_, Value::Bool(true)) => Ok(Value::Bool(true)),
                    (Value::Bool(false), Value::Bool(false)) => Ok(Value::Bool(false)),
                    (_, Value::Bool(_) | Value::Null) => Ok(Value::Null),
                    _ => Err(EvalError::type_error(format!(
                        "cannot apply or to {}",
                        right_val.type_name()
                    ))),
                }
            }
            _ => Err(EvalError::type_error(format!(
                "cannot apply or to {}",
                left_val.type_name()
            ))),
        }
    }

    /// Evaluate a unary operation.
    fn eval_unary_op(&self, op: UnaryOp, operand: &Expr) -> EvalResult<Value> {
        let val = self.eval(operand)?;

        match op {
            UnaryOp::Neg => match val {
                Value::Int(i) => i.checked_neg().map(Value::Int).ok_or(EvalError::Overflow),
                Value::Float(f) => Ok(Value::Float(-f)),
                Value::Null => Ok(Value::Null),
                _ => Err(EvalError::type_error(format!(
                    "cannot negate {}",
                    val.type_name()
                ))),
            },
            UnaryOp::Not => match val {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                Value::Null => Ok(Value::Null), // NOT NULL = NULL
                _ => Err(EvalError::type_error(format!(
                    "cannot apply not to {}",
                    val.type_name()
                ))),
            },
        }
    }

    // ========== Functions ==========

    /// Evaluate a function call.
    fn eval_fn_call(&self, call: &FnCall) -> EvalResult<Value> {
        let name = call.name.to_lowercase();
        let args = &call.args;

        // exists() inspects its argument instead of evaluating it
        if name == "exists" {
            return match args.as_slice() {
                [Expr::Field(path, _)] => Ok(Value::Bool(path.resolve(self.fields).is_some())),
                [_] => Err(EvalError::type_error("exists() expects a field path")),
                _ => Err(EvalError::arity("exists", "1 argument", args.len())),
            };
        }

        // coalesce() tolerates absent fields like `??`
        if name == "coalesce" {
            for arg in args {
                match self.eval(arg) {
                    Ok(Value::Null) => {}
                    Err(e) if e.is_field_absent() => {}
                    other => return other,
                }
            }
            return Ok(Value::Null);
        }

        let values: EvalResult<Vec<Value>> = args.iter().map(|e| self.eval(e)).collect();
        let values = values?;

        match name.as_str() {
            "len" | "length" => {
                let [val] = unary(&name, &values)?;
                match val {
                    Value::String(s) => Ok(Value::Int(s.chars().count() as i64)),
                    Value::List(items) => Ok(Value::Int(items.len() as i64)),
                    Value::Map(map) => Ok(Value::Int(map.len() as i64)),
                    Value::Null => Ok(Value::Null),
                    other => Err(EvalError::type_error(format!(
                        "{}() expects a string, list or mapping, got {}",
                        name,
                        other.type_name()
                    ))),
                }
            }
            "lower" | "upper" | "trim" => {
                let [val] = unary(&name, &values)?;
                match val {
                    Value::String(s) => Ok(Value::String(match name.as_str() {
                        "lower" => s.to_lowercase(),
                        "upper" => s.to_uppercase(),
                        _ => s.trim().to_string(),
                    })),
                    Value::Null => Ok(Value::Null),
                    other => Err(EvalError::type_error(format!(
                        "{}() expects a string, got {}",
                        name,
                        other.type_name()
                    ))),
                }
            }
            "abs" => {
                let [val] = unary(&name, &values)?;
                match val {
                    Value::Int(i) => i.checked_abs().map(Value::Int).ok_or(EvalError::Overflow),
                    Value::Float(f) => Ok(Value::Float(f.abs())),
                    Value::Null => Ok(Value::Null),
                    other => Err(EvalError::type_error(format!(
                        "abs() expects a number, got {}",
                        other.type_name()
                    ))),
                }
            }
            "min" => extremum(&name, &values, Ordering::is_lt),
            "max" => extremum(&name, &values, Ordering::is_gt),
            "starts_with" | "ends_with" => {
                let [s, affix] = binary(&name, &values)?;
                match (s, affix) {
                    (Value::String(s), Value::String(affix)) => Ok(Value::Bool(
                        if name == "starts_with" {
                            s.starts_with(affix.as_str())
                        } else {
                            s.ends_with(affix.as_str())
                        },
                    )),
                    (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
                    (a, b) => Err(EvalError::type_error(format!(
                        "{}() expects (String, String), got ({}, {})",
                        name,
                        a.type_name(),
                        b.type_name()
                    ))),
                }
            }
            "contains" => {
                let [haystack, needle] = binary(&name, &values)?;
                contains(haystack, needle, "contains")
            }
            "in" => {
                let [needle, haystack] = binary(&name, &values)?;
                contains(haystack, needle, "in")
            }
            "matches" => {
                let [s, pattern] = binary(&name, &values)?;
                match (s, pattern) {
                    (Value::String(s), Value::String(pattern)) => {
                        let re = Regex::new(pattern)
                            .map_err(|e| EvalError::invalid_pattern(pattern, e.to_string()))?;
                        Ok(Value::Bool(re.is_match(s)))
                    }
                    (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
                    (a, b) => Err(EvalError::type_error(format!(
                        "matches() expects (String, String), got ({}, {})",
                        a.type_name(),
                        b.type_name()
                    ))),
                }
            }
            _ => Err(EvalError::unknown_function(&call.name)),
        }
    }
}

fn unary<'v>(name: &str, values: &'v [Value]) -> EvalResult<[&'v Value; 1]> {
    match values {
        [a] => Ok([a]),
        _ => Err(EvalError::arity(name, "1 argument", values.len())),
    }
}

fn binary<'v>(name: &str, values: &'v [Value]) -> EvalResult<[&'v Value; 2]> {
    match values {
        [a, b] => Ok([a, b]),
        _ => Err(EvalError::arity(name, "2 arguments", values.len())),
    }
}

/// Apply an operator that needs both operands evaluated.
fn apply_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<Value> {
    match op {
        // Arithmetic
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub => eval_sub(left, right),
        BinaryOp::Mul => eval_mul(left, right),
        BinaryOp::Div => eval_div(left, right),
        BinaryOp::Mod => eval_mod(left, right),

        // Comparison
        BinaryOp::Eq => Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(left, right))),
        BinaryOp::Lt => eval_ordering(op, left, right, Ordering::is_lt),
        BinaryOp::LtEq => eval_ordering(op, left, right, Ordering::is_le),
        BinaryOp::Gt => eval_ordering(op, left, right, Ordering::is_gt),
        BinaryOp::GtEq => eval_ordering(op, left, right, Ordering::is_ge),

        BinaryOp::And | BinaryOp::Or | BinaryOp::NullCoalesce => Err(EvalError::type_error(
            format!("'{}' needs lazy evaluation", op.symbol()),
        )),
    }
}

/// Membership: substring for strings, element for lists, key for mappings.
fn contains(haystack: &Value, needle: &Value, op: &str) -> EvalResult<Value> {
    match (haystack, needle) {
        (Value::List(items), _) => Ok(Value::Bool(
            items.iter().any(|item| values_equal(item, needle)),
        )),
        (Value::String(s), Value::String(sub)) => Ok(Value::Bool(s.contains(sub.as_str()))),
        (Value::Map(map), Value::String(key)) => Ok(Value::Bool(map.contains_key(key))),
        (Value::Null, _) => Ok(Value::Null),
        _ => Err(EvalError::type_error(format!(
            "{} cannot test {} against {}",
            op,
            needle.type_name(),
            haystack.type_name()
        ))),
    }
}

/// Smallest or largest of one or more numbers (or strings).
fn extremum(name: &str, values: &[Value], prefer: fn(Ordering) -> bool) -> EvalResult<Value> {
    let Some((first, rest)) = values.split_first() else {
        return Err(EvalError::arity(name, "at least 1 argument", 0));
    };
    let mut best = first;
    for candidate in rest {
        match compare(candidate, best) {
            Some(ordering) => {
                if prefer(ordering) {
                    best = candidate;
                }
            }
            None => {
                return Err(EvalError::type_error(format!(
                    "{}() cannot compare {} with {}",
                    name,
                    candidate.type_name(),
                    best.type_name()
                )));
            }
        }
    }
    if !(best.is_number() || matches!(best, Value::String(_))) {
        return Err(EvalError::type_error(format!(
            "{}() expects numbers or strings, got {}",
            name,
            best.type_name()
        )));
    }
    Ok(best.clone())
}

// ========== Arithmetic helpers ==========

fn eval_add(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        // Null propagation
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Int(a), Value::Int(b)) => a.checked_add(*b).map(Value::Int).ok_or(EvalError::Overflow),
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
        _ => float_op(left, right, "add", |a, b| a + b),
    }
}

fn eval_sub(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Int(a), Value::Int(b)) => a.checked_sub(*b).map(Value::Int).ok_or(EvalError::Overflow),
        _ => float_op(left, right, "subtract", |a, b| a - b),
    }
}

fn eval_mul(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Int(a), Value::Int(b)) => a.checked_mul(*b).map(Value::Int).ok_or(EvalError::Overflow),
        _ => float_op(left, right, "multiply", |a, b| a * b),
    }
}

fn eval_div(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Int(_), Value::Int(0)) => Err(EvalError::DivisionByZero),
        (Value::Int(a), Value::Int(b)) => a.checked_div(*b).map(Value::Int).ok_or(EvalError::Overflow),
        _ => {
            if right.as_number() == Some(0.0) {
                return Err(EvalError::DivisionByZero);
            }
            float_op(left, right, "divide", |a, b| a / b)
        }
    }
}

fn eval_mod(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Int(_), Value::Int(0)) => Err(EvalError::DivisionByZero),
        (Value::Int(a), Value::Int(b)) => a.checked_rem(*b).map(Value::Int).ok_or(EvalError::Overflow),
        _ => Err(EvalError::type_error(format!(
            "cannot mod {} and {}",
            left.type_name(),
            right.type_name()
        ))),
    }
}

/// Apply a float operation when both sides are numeric (at least one a float).
fn float_op(left: &Value, right: &Value, verb: &str, op: fn(f64, f64) -> f64) -> EvalResult<Value> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok(Value::Float(op(a, b))),
        _ => Err(EvalError::type_error(format!(
            "cannot {} {} and {}",
            verb,
            left.type_name(),
            right.type_name()
        ))),
    }
}

// ========== Comparison helpers ==========

/// Structural equality. Int and Float compare numerically.
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            left.as_number() == right.as_number()
        }
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|((ka, va), (kb, vb))| ka == kb && values_equal(va, vb))
        }
        _ => left == right,
    }
}

/// Ordering between two values, if they are comparable.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => left.as_number()?.partial_cmp(&right.as_number()?),
    }
}

fn eval_ordering(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    accept: fn(Ordering) -> bool,
) -> EvalResult<Value> {
    if left.is_null() || right.is_null() {
        // Null propagation - comparison with null returns null
        return Ok(Value::Null);
    }
    match compare(left, right) {
        Some(ordering) => Ok(Value::Bool(accept(ordering))),
        None if left.is_number() && right.is_number() => Ok(Value::Bool(false)), // NaN
        None => Err(EvalError::type_error(format!(
            "cannot compare {} {} {}",
            left.type_name(),
            op.symbol(),
            right.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::fields;
    use forge_parser::parse_predicate;
    use pretty_assertions::assert_eq;

    fn spec() -> Map {
        fields! {
            "ram_gb" => 16,
            "cpu_ghz" => 2.5,
            "name" => "Skyrim Modding",
            "owner" => Value::Null,
            "tags" => vec![Value::from("pc"), Value::from("mods")],
            "constraints" => fields! {
                "hardware" => "desktop",
                "technical_capacity" => "advanced",
            },
        }
    }

    fn eval(src: &str) -> EvalResult<Value> {
        let fields = spec();
        let expr = parse_predicate(src).unwrap();
        Evaluator::new(&fields).eval(&expr)
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eval("ram_gb >= 8"), Ok(Value::Bool(true)));
        assert_eq!(eval("ram_gb < 8"), Ok(Value::Bool(false)));
        assert_eq!(eval("cpu_ghz > 2"), Ok(Value::Bool(true)));
        assert_eq!(eval("ram_gb = 16.0"), Ok(Value::Bool(true)));
        assert_eq!(eval("name != \"Oblivion\""), Ok(Value::Bool(true)));
        assert_eq!(eval("\"abc\" < \"abd\""), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_nested_field_access() {
        assert_eq!(
            eval("constraints.hardware = \"desktop\""),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn test_absent_field_is_error() {
        // GIVEN a predicate over a field the specification lacks
        // WHEN it is evaluated
        let result = eval("gpu_gb >= 8");

        // THEN evaluation reports the absent path
        assert_eq!(result, Err(EvalError::field_absent("gpu_gb")));
        assert_eq!(
            eval("constraints.storage = 1"),
            Err(EvalError::field_absent("constraints.storage"))
        );
    }

    #[test]
    fn test_integer_literal_beyond_i64() {
        // GIVEN a document number above i64::MAX, which loads as a float
        let doc = serde_json::json!({ "bytes": 12_000_000_000_000_000_000u64 });
        let fields = match Value::from(doc) {
            Value::Map(map) => map,
            other => panic!("expected map, got {:?}", other),
        };

        // WHEN compared with an integer literal of the same size
        let expr = parse_predicate("bytes >= 10000000000000000000").unwrap();

        // THEN both sides compare as numbers
        assert_eq!(Evaluator::new(&fields).eval(&expr), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_explicit_null_is_present() {
        assert_eq!(eval("owner = null"), Ok(Value::Bool(true)));
        assert_eq!(eval("owner is null"), Ok(Value::Bool(true)));
        assert_eq!(eval("exists(owner)"), Ok(Value::Bool(true)));
        assert_eq!(eval("owner > 1"), Ok(Value::Null));
    }

    #[test]
    fn test_exists() {
        assert_eq!(eval("exists(constraints.hardware)"), Ok(Value::Bool(true)));
        assert_eq!(eval("exists(gpu)"), Ok(Value::Bool(false)));
        assert!(matches!(eval("exists(1)"), Err(EvalError::TypeError { .. })));
        assert!(matches!(eval("exists()"), Err(EvalError::Arity { .. })));
    }

    #[test]
    fn test_short_circuit_skips_absent_fields() {
        // GIVEN guards written before the access of an absent field
        // THEN the right-hand side is never evaluated
        assert_eq!(eval("not exists(gpu) or gpu > 3"), Ok(Value::Bool(true)));
        assert_eq!(eval("exists(gpu) and gpu > 3"), Ok(Value::Bool(false)));

        // AND the unguarded order still fails
        assert!(eval("gpu > 3 or true").is_err());
    }

    #[test]
    fn test_three_valued_logic() {
        assert_eq!(eval("null and false"), Ok(Value::Bool(false)));
        assert_eq!(eval("null and true"), Ok(Value::Null));
        assert_eq!(eval("null or true"), Ok(Value::Bool(true)));
        assert_eq!(eval("null or false"), Ok(Value::Null));
        assert_eq!(eval("not null"), Ok(Value::Null));
        assert!(eval("1 and true").is_err());
        assert!(eval("true and 1").is_err());
    }

    #[test]
    fn test_null_coalesce() {
        assert_eq!(eval("(gpu_gb ?? 0) >= 0"), Ok(Value::Bool(true)));
        assert_eq!(eval("owner ?? \"nobody\""), Ok(Value::from("nobody")));
        assert_eq!(eval("ram_gb ?? 0"), Ok(Value::Int(16)));
        assert_eq!(eval("coalesce(gpu_gb, owner, 4)"), Ok(Value::Int(4)));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("ram_gb / 2 + 1"), Ok(Value::Int(9)));
        assert_eq!(eval("ram_gb % 5"), Ok(Value::Int(1)));
        assert_eq!(eval("ram_gb * 0.5"), Ok(Value::Float(8.0)));
        assert_eq!(eval("-ram_gb"), Ok(Value::Int(-16)));
        assert_eq!(eval("\"a\" + \"b\""), Ok(Value::from("ab")));
        assert_eq!(eval("ram_gb / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("cpu_ghz / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("ram_gb % 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("9223372036854775807 + 1"), Err(EvalError::Overflow));
    }

    #[test]
    fn test_type_errors() {
        assert!(matches!(eval("name > 3"), Err(EvalError::TypeError { .. })));
        assert!(matches!(eval("name - 1"), Err(EvalError::TypeError { .. })));
        assert!(matches!(eval("not name"), Err(EvalError::TypeError { .. })));
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(eval("lower(name)"), Ok(Value::from("skyrim modding")));
        assert_eq!(eval("upper(\"pi\")"), Ok(Value::from("PI")));
        assert_eq!(eval("trim(\"  x \")"), Ok(Value::from("x")));
        assert_eq!(eval("len(name)"), Ok(Value::Int(14)));
        assert_eq!(eval("length(tags)"), Ok(Value::Int(2)));
        assert_eq!(eval("len(constraints)"), Ok(Value::Int(2)));
        assert_eq!(eval("name starts with \"Sky\""), Ok(Value::Bool(true)));
        assert_eq!(eval("name ends with \"ing\""), Ok(Value::Bool(true)));
        assert_eq!(eval("name contains \"rim\""), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_membership() {
        assert_eq!(
            eval("constraints.hardware in [\"desktop\", \"raspberry_pi\"]"),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            eval("constraints.hardware not in [\"cloud\"]"),
            Ok(Value::Bool(true))
        );
        assert_eq!(eval("\"pc\" in tags"), Ok(Value::Bool(true)));
        assert_eq!(eval("tags contains \"mods\""), Ok(Value::Bool(true)));
        assert_eq!(eval("\"hardware\" in constraints"), Ok(Value::Bool(true)));
        assert_eq!(eval("16.0 in [8, 16]"), Ok(Value::Bool(true)));
        assert!(eval("1 in 2").is_err());
    }

    #[test]
    fn test_matches() {
        assert_eq!(eval("name matches \"^Sky\\\\w+\""), Ok(Value::Bool(true)));
        assert_eq!(eval("name matches \"^Obl\""), Ok(Value::Bool(false)));
        assert!(matches!(
            eval("name matches \"(\""),
            Err(EvalError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_min_max_abs() {
        assert_eq!(eval("min(ram_gb, 8, 32)"), Ok(Value::Int(8)));
        assert_eq!(eval("max(ram_gb, cpu_ghz)"), Ok(Value::Int(16)));
        assert_eq!(eval("abs(-3)"), Ok(Value::Int(3)));
        assert!(eval("min()").is_err());
        assert!(eval("max(1, \"a\")").is_err());
    }

    #[test]
    fn test_unknown_function_and_arity() {
        assert_eq!(eval("shell(\"ls\")"), Err(EvalError::unknown_function("shell")));
        assert_eq!(
            eval("lower(name, name)"),
            Err(EvalError::arity("lower", "1 argument", 2))
        );
    }

    #[test]
    fn test_list_and_map_equality() {
        assert_eq!(eval("tags = [\"pc\", \"mods\"]"), Ok(Value::Bool(true)));
        assert_eq!(eval("tags = [\"mods\", \"pc\"]"), Ok(Value::Bool(false)));
        assert_eq!(eval("[1, 2.0] = [1.0, 2]"), Ok(Value::Bool(true)));
    }
}
