use serde::{Deserialize, Serialize};

use crate::condition::{self, Condition};
use crate::effect::{self, Effect};
use crate::error::EngineError;
use crate::world_state::WorldState;

/// An edge the planner may cross: a set of preconditions, a set of effects
/// fired in order when those preconditions hold, an optional externally
/// visible action label, and a cost.
///
/// `action` is `None` for housekeeping transitions that should shape the
/// search but never appear in the plan's reported action list (`id` still
/// appears in `ActionPlan.transitions`, just not in `ActionPlan.actions`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transition {
    pub fn new(id: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            conditions: Vec::new(),
            effects: Vec::new(),
            action: None,
            cost,
            description: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Whether every precondition of `transition` holds in `state`. An empty
/// condition list is trivially enabled.
pub fn is_enabled(transition: &Transition, state: &WorldState) -> Result<bool, EngineError> {
    condition::all_satisfied(&transition.conditions, state)
}

/// Fires `transition`'s effects against `state`, in list order.
///
/// Callers that need "enabled AND fires cleanly" (the planner's successor
/// generation) check `is_enabled` first; a transition whose effects raise
/// [`EngineError::Arithmetic`] is treated as not applicable from that state
/// rather than as a hard failure of the whole query.
pub fn fire(transition: &Transition, state: &WorldState) -> Result<WorldState, EngineError> {
    let mut working = state.clone();
    for eff in &transition.effects {
        working = effect::apply_effect(eff, &working)?;
    }
    Ok(working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{AssignmentOperator, ComparisonOperator};
    use crate::value::{Type, Value};
    use crate::variable::{Variable, VariableValue};

    #[test]
    fn disabled_transition_is_not_fired() {
        let vars = [Variable::new("x", Type::Int)];
        let state = WorldState::build(&vars, &[VariableValue::new("x", 1)]).unwrap();
        let t = Transition::new("t", 1.0)
            .with_condition(Condition::new("x", ComparisonOperator::Gt, Value::Int(10)));
        assert!(!is_enabled(&t, &state).unwrap());
    }

    #[test]
    fn enabled_transition_fires_effects_in_order() {
        let vars = [Variable::new("x", Type::Int)];
        let state = WorldState::build(&vars, &[VariableValue::new("x", 0)]).unwrap();
        let t = Transition::new("inc-twice", 1.0)
            .with_effect(Effect::new("x", AssignmentOperator::Add, Value::Int(1)))
            .with_effect(Effect::new("x", AssignmentOperator::Add, Value::Int(1)));
        let next = fire(&t, &state).unwrap();
        assert_eq!(next.get("x"), &Value::Int(2));
    }
}
