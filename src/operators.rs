use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::value::{Type, Value};

/// Operators usable inside a [`crate::condition::Condition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// Operators usable inside a [`crate::effect::Effect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentOperator {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Concat,
}

/// Evaluates `lhs <op> rhs`, dispatching on `op` and the shared operand type.
///
/// `lhs` and `rhs` must already agree on [`Value::type_of`]; callers resolve
/// that once up front so the mismatch is reported against the right
/// variable id, which this free function doesn't know.
pub fn evaluate(op: ComparisonOperator, lhs: &Value, rhs: &Value) -> Result<bool, EngineError> {
    use ComparisonOperator::*;
    let ty = lhs.type_of();
    match op {
        Eq => Ok(lhs.equal(rhs)),
        Ne => Ok(!lhs.equal(rhs)),
        Lt => match ty {
            Type::Int | Type::Float | Type::String => Ok(lhs.compare(rhs)?.is_lt()),
            Type::Boolean => unsupported(op, ty),
        },
        Le => match ty {
            Type::Int | Type::Float | Type::String => Ok(lhs.compare(rhs)?.is_le()),
            Type::Boolean => unsupported(op, ty),
        },
        Gt => match ty {
            Type::Int | Type::Float | Type::String => Ok(lhs.compare(rhs)?.is_gt()),
            Type::Boolean => unsupported(op, ty),
        },
        Ge => match ty {
            Type::Int | Type::Float | Type::String => Ok(lhs.compare(rhs)?.is_ge()),
            Type::Boolean => unsupported(op, ty),
        },
        And => match (lhs, rhs) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(*a && *b),
            _ => unsupported(op, ty),
        },
        Or => match (lhs, rhs) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(*a || *b),
            _ => unsupported(op, ty),
        },
    }
}

fn unsupported<T>(op: ComparisonOperator, ty: Type) -> Result<T, EngineError> {
    Err(EngineError::UnsupportedOperator { operator: format!("{op:?}"), value_type: ty })
}

/// Whether `(op, ty)` has a registered implementation, independent of any
/// particular operand values. Used by model validation to report
/// [`EngineError::UnsupportedOperator`] up front rather than at search time.
pub fn comparison_supported(op: ComparisonOperator, ty: Type) -> bool {
    use ComparisonOperator::*;
    match op {
        Eq | Ne => true,
        Lt | Le | Gt | Ge => matches!(ty, Type::Int | Type::Float | Type::String),
        And | Or => matches!(ty, Type::Boolean),
    }
}

/// Assignment-operator analogue of [`comparison_supported`].
pub fn assignment_supported(op: AssignmentOperator, ty: Type) -> bool {
    use AssignmentOperator::*;
    match op {
        Set => true,
        Add | Sub | Mul | Div => matches!(ty, Type::Int | Type::Float),
        And | Or | Xor => matches!(ty, Type::Boolean),
        Concat => matches!(ty, Type::String),
    }
}

/// Applies `prior <op> arg`, producing the new value an effect assigns.
///
/// `ArithmeticError` (division by zero, checked-arithmetic overflow) is
/// reported via [`EngineError::Arithmetic`]; callers treat it as pruning the
/// one transition being fired, not as a model-level failure.
pub fn apply(
    op: AssignmentOperator,
    variable_id: &str,
    prior: &Value,
    arg: &Value,
) -> Result<Value, EngineError> {
    use AssignmentOperator::*;
    let ty = prior.type_of();
    match op {
        Set => Ok(arg.clone()),
        Add => match (prior, arg) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(*b)
                .map(Value::Int)
                .ok_or_else(|| arithmetic(variable_id, "integer overflow in ADD")),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
            _ => unsupported_assign(op, ty, variable_id),
        },
        Sub => match (prior, arg) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_sub(*b)
                .map(Value::Int)
                .ok_or_else(|| arithmetic(variable_id, "integer overflow in SUB")),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
            _ => unsupported_assign(op, ty, variable_id),
        },
        Mul => match (prior, arg) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_mul(*b)
                .map(Value::Int)
                .ok_or_else(|| arithmetic(variable_id, "integer overflow in MUL")),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
            _ => unsupported_assign(op, ty, variable_id),
        },
        Div => match (prior, arg) {
            (Value::Int(_), Value::Int(0)) => Err(arithmetic(variable_id, "division by zero")),
            (Value::Int(a), Value::Int(b)) => a
                .checked_div(*b)
                .map(Value::Int)
                .ok_or_else(|| arithmetic(variable_id, "integer overflow in DIV")),
            (Value::Float(_), Value::Float(b)) if *b == 0.0 => {
                Err(arithmetic(variable_id, "division by zero"))
            }
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a / b)),
            _ => unsupported_assign(op, ty, variable_id),
        },
        And => match (prior, arg) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a && *b)),
            _ => unsupported_assign(op, ty, variable_id),
        },
        Or => match (prior, arg) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a || *b)),
            _ => unsupported_assign(op, ty, variable_id),
        },
        Xor => match (prior, arg) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a != *b)),
            _ => unsupported_assign(op, ty, variable_id),
        },
        Concat => match (prior, arg) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            _ => unsupported_assign(op, ty, variable_id),
        },
    }
}

fn arithmetic(variable_id: &str, reason: &str) -> EngineError {
    EngineError::Arithmetic { variable_id: variable_id.to_string(), reason: reason.to_string() }
}

fn unsupported_assign(
    op: AssignmentOperator,
    ty: Type,
    variable_id: &str,
) -> Result<Value, EngineError> {
    let _ = variable_id;
    Err(EngineError::UnsupportedOperator { operator: format!("{op:?}"), value_type: ty })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_by_zero_is_arithmetic_error() {
        let err = apply(AssignmentOperator::Div, "x", &Value::Int(10), &Value::Int(0));
        assert!(matches!(err, Err(EngineError::Arithmetic { .. })));
    }

    #[test]
    fn checked_add_overflow_is_arithmetic_error() {
        let err = apply(AssignmentOperator::Add, "x", &Value::Int(i64::MAX), &Value::Int(1));
        assert!(matches!(err, Err(EngineError::Arithmetic { .. })));
    }

    #[test]
    fn concat_appends_strings() {
        let result =
            apply(AssignmentOperator::Concat, "s", &Value::String("a".into()), &Value::String("b".into()))
                .unwrap();
        assert_eq!(result, Value::String("ab".into()));
    }

    #[test]
    fn boolean_and_or_xor() {
        let t = Value::Boolean(true);
        let f = Value::Boolean(false);
        assert_eq!(apply(AssignmentOperator::And, "b", &t, &f).unwrap(), Value::Boolean(false));
        assert_eq!(apply(AssignmentOperator::Or, "b", &t, &f).unwrap(), Value::Boolean(true));
        assert_eq!(apply(AssignmentOperator::Xor, "b", &t, &f).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn comparison_lt_on_string() {
        assert!(evaluate(
            ComparisonOperator::Lt,
            &Value::String("a".into()),
            &Value::String("b".into())
        )
        .unwrap());
    }

    #[test]
    fn comparison_lt_on_boolean_unsupported() {
        let err = evaluate(ComparisonOperator::Lt, &Value::Boolean(true), &Value::Boolean(false));
        assert!(matches!(err, Err(EngineError::UnsupportedOperator { .. })));
    }
}
