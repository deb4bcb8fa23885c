use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;
use crate::value::{Type, Value, ValueFields};

/// A named, typed slot in the world-state.
///
/// `weight` feeds the planner's heuristic (see
/// [`crate::plan::planner::heuristic`]); it defaults to `1.0` so a model
/// that never mentions weights still gets the plain unsatisfied-condition
/// count the distilled scenarios expect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    #[serde(rename = "typeOf")]
    pub type_of: Type,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_weight() -> f64 {
    1.0
}

impl Variable {
    pub fn new(id: impl Into<String>, type_of: Type) -> Self {
        Self { id: id.into(), type_of, weight: default_weight(), description: None }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// An assignment of one [`Value`] to one variable id, as carried by initial
/// states and by `single_step`'s returned state snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableValue {
    pub variable_id: String,
    pub value: Value,
}

impl VariableValue {
    pub fn new(variable_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { variable_id: variable_id.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct VariableValueWire {
    #[serde(rename = "variableId")]
    variable_id: String,
    #[serde(flatten)]
    fields: ValueFields,
}

impl Serialize for VariableValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        VariableValueWire {
            variable_id: self.variable_id.clone(),
            fields: ValueFields::from(&self.value),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VariableValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = VariableValueWire::deserialize(deserializer)?;
        let value = wire.fields.into_value().map_err(serde::de::Error::custom)?;
        Ok(VariableValue { variable_id: wire.variable_id, value })
    }
}

/// Either a literal value or a reference to another variable, resolved
/// against the current world-state at evaluation time.
///
/// This is the in-memory normalization of the wire `VariableOrValue` shape
/// (at most one of `variableId` or a value field set); a model is parsed
/// once into this form so the inner search loop never re-inspects the wire
/// representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Literal(Value),
    Ref(String),
}

impl Operand {
    /// Resolves this operand to a concrete value against `state`.
    pub fn resolve(&self, state: &crate::world_state::WorldState) -> Result<Value, EngineError> {
        match self {
            Operand::Literal(v) => Ok(v.clone()),
            Operand::Ref(variable_id) => Ok(state.get(variable_id).clone()),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Literal(value)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct OperandWire {
    #[serde(rename = "variableId", default, skip_serializing_if = "Option::is_none")]
    variable_id: Option<String>,
    #[serde(flatten)]
    fields: ValueFields,
}

impl Serialize for Operand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Operand::Literal(v) => {
                OperandWire { variable_id: None, fields: ValueFields::from(v) }.serialize(serializer)
            }
            Operand::Ref(id) => OperandWire {
                variable_id: Some(id.clone()),
                fields: ValueFields::default(),
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Operand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = OperandWire::deserialize(deserializer)?;
        let value_set = wire.fields.clone().into_value().is_ok();
        match (wire.variable_id, value_set) {
            (Some(id), false) => Ok(Operand::Ref(id)),
            (None, true) => Ok(Operand::Literal(
                wire.fields.into_value().map_err(serde::de::Error::custom)?,
            )),
            (Some(_), true) => Err(serde::de::Error::custom(EngineError::MalformedArgument(
                "both variableId and a value field were set".to_string(),
            ))),
            (None, false) => Err(serde::de::Error::custom(EngineError::MalformedArgument(
                "neither variableId nor a value field was set".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_literal_resolves_without_state() {
        let op = Operand::Literal(Value::Int(5));
        let state = crate::world_state::WorldState::default();
        assert_eq!(op.resolve(&state).unwrap(), Value::Int(5));
    }
}
