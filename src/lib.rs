//! A Goal-Oriented Action Planning engine: a typed world-state, conditional
//! transitions with costs, and an A* search that ties them together.
//!
//! The four functions below are the crate's entry points; everything else
//! (the data model in [`variable`]/[`condition`]/[`effect`]/[`transition`],
//! the operator tables in [`operators`], and the search in [`plan`]) exists
//! to support them.
//!
//! # Examples
//! ```
//! use goap_engine::prelude::*;
//!
//! let vars = vec![Variable::new("hunger", Type::Boolean)];
//! let model = Model::new(
//!     vars,
//!     vec![Transition::new("eat", 1.0)
//!         .with_effect(Effect::new("hunger", AssignmentOperator::Set, Value::Boolean(false)))
//!         .with_action("eat")],
//! );
//! let initial = vec![VariableValue::new("hunger", true)];
//! let goal = Goal::new().with(Condition::new("hunger", ComparisonOperator::Eq, Value::Boolean(false)));
//!
//! let plan = generate_action_plan(&model, &initial, &goal, &PlannerConfig::default(), &NeverCancelled).unwrap();
//! assert_eq!(plan.status, PlanStatus::Found);
//! ```

pub mod condition;
pub mod effect;
pub mod error;
pub mod goal;
pub mod model;
pub mod operators;
pub mod plan;
pub mod transition;
pub mod value;
pub mod variable;
pub mod world_state;

pub mod prelude;

use condition::Condition;
use error::EngineError;
use goal::Goal;
use model::Model;
use plan::{ActionPlan, CancellationSignal, PlannerConfig};
use transition::Transition;
use variable::{Variable, VariableValue};
use world_state::WorldState;

/// Whether `state` (built from `variables` and `initial_state`) satisfies
/// every condition in `goal`.
///
/// Validates only `goal`'s own conditions against `variables` — this is a
/// narrowly-scoped call, not a full model-level entry point, so it never
/// looks at any transition list.
pub fn are_goals_satisfied(
    variables: &[Variable],
    initial_state: &[VariableValue],
    goal: &Goal,
) -> Result<bool, EngineError> {
    model::validate_conditions(variables, &goal.0)?;
    let state = WorldState::build(variables, initial_state)?;
    goal::goals_satisfied(goal, &state)
}

/// Fires a single transition against `state`, if enabled.
///
/// Returns `None` (not an error) when the transition's preconditions are
/// not met. On success, returns every variable's value in canonical order,
/// not just the ones the transition's effects touched. Validates only
/// `transition` itself against `variables`, not any surrounding model.
pub fn single_step(
    variables: &[Variable],
    initial_state: &[VariableValue],
    transition: &Transition,
) -> Result<Option<Vec<VariableValue>>, EngineError> {
    model::validate_transition(variables, transition)?;
    let state = WorldState::build(variables, initial_state)?;
    if !transition::is_enabled(transition, &state)? {
        return Ok(None);
    }
    let next = transition::fire(transition, &state)?;
    Ok(Some(next.to_variable_values()))
}

/// The ids of every transition in `transitions` whose preconditions are
/// currently met, in input order. Validates exactly the `transitions` slice
/// passed in against `variables`, not any model's own transition list.
pub fn enabled_transitions(
    variables: &[Variable],
    initial_state: &[VariableValue],
    transitions: &[Transition],
) -> Result<Vec<String>, EngineError> {
    model::validate_transitions(variables, transitions)?;
    let state = WorldState::build(variables, initial_state)?;
    let mut enabled = Vec::new();
    for transition in transitions {
        if transition::is_enabled(transition, &state)? {
            enabled.push(transition.id.clone());
        }
    }
    Ok(enabled)
}

/// Finds a minimum-cost transition sequence from `initial_state` to any
/// state satisfying `goal`. See [`plan::planner::generate_action_plan`]
/// for the search's full contract.
pub fn generate_action_plan(
    model: &Model,
    initial_state: &[VariableValue],
    goal: &Goal,
    config: &PlannerConfig,
    cancellation: &dyn CancellationSignal,
) -> Result<ActionPlan, EngineError> {
    plan::planner::generate_action_plan(model, initial_state, goal, config, cancellation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::operators::{AssignmentOperator, ComparisonOperator};
    use crate::value::{Type, Value};
    use crate::variable::Variable;

    fn hunger_model() -> Model {
        Model::new(
            vec![Variable::new("hunger", Type::Boolean)],
            vec![Transition::new("eat", 1.0)
                .with_condition(Condition::new("hunger", ComparisonOperator::Eq, Value::Boolean(true)))
                .with_effect(Effect::new("hunger", AssignmentOperator::Set, Value::Boolean(false)))
                .with_action("eat")],
        )
    }

    #[test]
    fn are_goals_satisfied_true_when_already_met() {
        let model = hunger_model();
        let initial = vec![VariableValue::new("hunger", false)];
        let goal = Goal::new().with(Condition::new("hunger", ComparisonOperator::Eq, Value::Boolean(false)));
        assert!(are_goals_satisfied(&model.variables, &initial, &goal).unwrap());
    }

    #[test]
    fn single_step_returns_none_when_disabled() {
        let model = hunger_model();
        let initial = vec![VariableValue::new("hunger", false)];
        let transition = model.transitions[0].clone();
        assert!(single_step(&model.variables, &initial, &transition).unwrap().is_none());
    }

    #[test]
    fn single_step_returns_full_state_on_success() {
        let model = hunger_model();
        let initial = vec![VariableValue::new("hunger", true)];
        let transition = model.transitions[0].clone();
        let result = single_step(&model.variables, &initial, &transition).unwrap().unwrap();
        assert_eq!(result, vec![VariableValue::new("hunger", false)]);
    }

    #[test]
    fn enabled_transitions_preserves_input_order() {
        let model = hunger_model();
        let initial = vec![VariableValue::new("hunger", true)];
        let other = Transition::new("nap", 1.0);
        let transitions = vec![other.clone(), model.transitions[0].clone()];
        let ids = enabled_transitions(&model.variables, &initial, &transitions).unwrap();
        assert_eq!(ids, vec!["nap".to_string(), "eat".to_string()]);
    }
}
