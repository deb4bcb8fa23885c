use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// The four scalar kinds a [`Value`] can hold.
///
/// Every [`crate::variable::Variable`] is pinned to exactly one of these at
/// model-build time, and every [`Value`] flowing through conditions and
/// effects is checked against the variable it is compared or assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    String,
    Int,
    Float,
    Boolean,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::String => write!(f, "STRING"),
            Type::Int => write!(f, "INT"),
            Type::Float => write!(f, "FLOAT"),
            Type::Boolean => write!(f, "BOOLEAN"),
        }
    }
}

/// A typed scalar carried by world-state variables, condition arguments and
/// effect arguments alike.
///
/// Equality and ordering are only ever defined within a variant; comparing
/// across variants is a [`EngineError::TypeMismatch`], not a silent `false`.
#[derive(Clone, Debug)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn type_of(&self) -> Type {
        match self {
            Value::String(_) => Type::String,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Boolean(_) => Type::Boolean,
        }
    }

    /// The zero-default used to fill in a variable absent from an initial
    /// state assignment.
    pub fn zero(ty: Type) -> Value {
        match ty {
            Type::String => Value::String(String::new()),
            Type::Int => Value::Int(0),
            Type::Float => Value::Float(0.0),
            Type::Boolean => Value::Boolean(false),
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            _ => false,
        }
    }

    /// Typed ordering. Fails with [`EngineError::TypeMismatch`] across
    /// variants, and for `Boolean`, which has no ordering beyond equality.
    pub fn compare(&self, other: &Value) -> Result<Ordering, EngineError> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => {
                a.partial_cmp(b).ok_or_else(|| EngineError::Arithmetic {
                    variable_id: String::new(),
                    reason: "NaN is not comparable".to_string(),
                })
            }
            (Value::Boolean(_), Value::Boolean(_)) => Err(EngineError::UnsupportedOperator {
                operator: "ordering".to_string(),
                value_type: Type::Boolean,
            }),
            _ => Err(EngineError::TypeMismatch {
                variable_id: String::new(),
                expected: self.type_of(),
                found: other.type_of(),
            }),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Boolean(b) => b.hash(state),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(v) => write!(f, "STRING({v:?})"),
            Value::Int(v) => write!(f, "INT({v})"),
            Value::Float(v) => write!(f, "FLOAT({v})"),
            Value::Boolean(v) => write!(f, "BOOLEAN({v})"),
        }
    }
}

/// Wire shape for a value literal: exactly one of the four fields set.
/// Shared by [`Value`]'s own (de)serialization and by
/// [`crate::variable::VariableValue`] / [`crate::variable::Operand`], which
/// embed the same four optional fields alongside their own keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ValueFields {
    #[serde(rename = "STRING", default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(rename = "INT", default, skip_serializing_if = "Option::is_none")]
    pub int: Option<i64>,
    #[serde(rename = "FLOAT", default, skip_serializing_if = "Option::is_none")]
    pub float: Option<f64>,
    #[serde(rename = "BOOLEAN", default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
}

impl ValueFields {
    fn populated_count(&self) -> usize {
        [self.string.is_some(), self.int.is_some(), self.float.is_some(), self.boolean.is_some()]
            .into_iter()
            .filter(|set| *set)
            .count()
    }

    pub(crate) fn into_value(self) -> Result<Value, EngineError> {
        match self.populated_count() {
            1 => {
                if let Some(s) = self.string {
                    return Ok(Value::String(s));
                }
                if let Some(i) = self.int {
                    return Ok(Value::Int(i));
                }
                if let Some(f) = self.float {
                    return Ok(Value::Float(f));
                }
                if let Some(b) = self.boolean {
                    return Ok(Value::Boolean(b));
                }
                unreachable!("exactly one field was populated")
            }
            0 => Err(EngineError::MalformedValue("no value field set".to_string())),
            n => Err(EngineError::MalformedValue(format!("{n} value fields set, expected 1"))),
        }
    }
}

impl From<&Value> for ValueFields {
    fn from(value: &Value) -> Self {
        let mut fields = ValueFields::default();
        match value {
            Value::String(s) => fields.string = Some(s.clone()),
            Value::Int(i) => fields.int = Some(*i),
            Value::Float(f) => fields.float = Some(*f),
            Value::Boolean(b) => fields.boolean = Some(*b),
        }
        fields
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ValueFields::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = ValueFields::deserialize(deserializer)?;
        fields.into_value().map_err(serde::de::Error::custom)
    }
}
