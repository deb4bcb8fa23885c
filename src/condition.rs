use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::operators::{self, ComparisonOperator};
use crate::variable::Operand;
use crate::world_state::WorldState;

/// One test against the world-state: `variableId <comparisonOperator> argument`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub variable_id: String,
    pub comparison_operator: ComparisonOperator,
    pub argument: Operand,
}

impl Condition {
    pub fn new(
        variable_id: impl Into<String>,
        comparison_operator: ComparisonOperator,
        argument: impl Into<Operand>,
    ) -> Self {
        Self { variable_id: variable_id.into(), comparison_operator, argument: argument.into() }
    }
}

/// Evaluates a single condition against `state`.
pub fn eval_condition(condition: &Condition, state: &WorldState) -> Result<bool, EngineError> {
    let lhs = state.get(&condition.variable_id);
    let rhs = condition.argument.resolve(state)?;
    if lhs.type_of() != rhs.type_of() {
        return Err(EngineError::TypeMismatch {
            variable_id: condition.variable_id.clone(),
            expected: lhs.type_of(),
            found: rhs.type_of(),
        });
    }
    operators::evaluate(condition.comparison_operator, lhs, &rhs)
}

/// Conjunction over a condition list. An empty list is trivially satisfied,
/// which is what makes an empty goal and an empty precondition list both
/// succeed immediately.
pub fn all_satisfied(conditions: &[Condition], state: &WorldState) -> Result<bool, EngineError> {
    for condition in conditions {
        if !eval_condition(condition, state)? {
            return Ok(false);
        }
    }
    Ok(true)
}
