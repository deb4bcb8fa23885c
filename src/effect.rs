use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::operators::{self, AssignmentOperator};
use crate::variable::Operand;
use crate::world_state::WorldState;

/// One mutation applied to the world-state when a transition fires:
/// `variableId <assignmentOperator> argument`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    pub variable_id: String,
    pub assignment_operator: AssignmentOperator,
    pub argument: Operand,
}

impl Effect {
    pub fn new(
        variable_id: impl Into<String>,
        assignment_operator: AssignmentOperator,
        argument: impl Into<Operand>,
    ) -> Self {
        Self { variable_id: variable_id.into(), assignment_operator, argument: argument.into() }
    }
}

/// Applies a single effect to `state`, returning the updated state.
///
/// The argument is resolved against `state` as it stands at the moment this
/// effect runs, so within one transition's effect list, a later effect sees
/// the results of an earlier one on the same variable.
pub fn apply_effect(effect: &Effect, state: &WorldState) -> Result<WorldState, EngineError> {
    let prior = state.get(&effect.variable_id);
    let arg = effect.argument.resolve(state)?;
    let new_value = operators::apply(effect.assignment_operator, &effect.variable_id, prior, &arg)?;
    Ok(state.with(&effect.variable_id, new_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Type, Value};
    use crate::variable::{Variable, VariableValue};

    #[test]
    fn set_effect_overwrites_value() {
        let vars = [Variable::new("x", Type::Int)];
        let state = WorldState::build(&vars, &[VariableValue::new("x", 1)]).unwrap();
        let effect = Effect::new("x", AssignmentOperator::Set, Value::Int(9));
        let next = apply_effect(&effect, &state).unwrap();
        assert_eq!(next.get("x"), &Value::Int(9));
    }

    #[test]
    fn add_effect_accumulates() {
        let vars = [Variable::new("x", Type::Int)];
        let state = WorldState::build(&vars, &[VariableValue::new("x", 1)]).unwrap();
        let effect = Effect::new("x", AssignmentOperator::Add, Value::Int(2));
        let next = apply_effect(&effect, &state).unwrap();
        assert_eq!(next.get("x"), &Value::Int(3));
    }

    #[test]
    fn later_effect_sees_earlier_effect_on_same_variable() {
        let vars = [Variable::new("x", Type::Int)];
        let state = WorldState::build(&vars, &[VariableValue::new("x", 1)]).unwrap();
        let first = Effect::new("x", AssignmentOperator::Add, Value::Int(2));
        let second = Effect::new("x", AssignmentOperator::Add, Value::Int(3));
        let mid = apply_effect(&first, &state).unwrap();
        let end = apply_effect(&second, &mid).unwrap();
        assert_eq!(end.get("x"), &Value::Int(6));
    }

    #[test]
    fn division_by_zero_is_arithmetic_error() {
        let vars = [Variable::new("x", Type::Int)];
        let state = WorldState::build(&vars, &[VariableValue::new("x", 10)]).unwrap();
        let effect = Effect::new("x", AssignmentOperator::Div, Value::Int(0));
        assert!(matches!(apply_effect(&effect, &state), Err(EngineError::Arithmetic { .. })));
    }
}
