use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::effect::Effect;
use crate::error::EngineError;
use crate::operators;
use crate::transition::Transition;
use crate::variable::{Operand, Variable};

/// The declarative model a planning query runs against: every variable
/// that can appear in the world-state, and every transition the planner
/// may cross.
///
/// [`Model::validate`] walks the whole model once and reports the first
/// schema, type, or operator-support problem it finds before any search
/// node is expanded (see the model-level error kinds in
/// [`crate::error::EngineError`]).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Model {
    pub variables: Vec<Variable>,
    pub transitions: Vec<Transition>,
}

impl Model {
    pub fn new(variables: Vec<Variable>, transitions: Vec<Transition>) -> Self {
        Self { variables, transitions }
    }

    /// Validates every condition and effect in every transition, plus
    /// `extra_conditions` (typically the goal), against the variable table.
    ///
    /// This is the full-model pass [`crate::generate_action_plan`] runs
    /// before expanding its first search node. The narrower,
    /// single-transition and single-condition-list entry points below serve
    /// the cheaper query-surface operations, which only ever touch a slice
    /// of the model and shouldn't pay to validate transitions they never
    /// look at.
    pub fn validate(&self, extra_conditions: &[Condition]) -> Result<(), EngineError> {
        validate_transitions(&self.variables, &self.transitions)?;
        validate_conditions(&self.variables, extra_conditions)
    }
}

fn variable_types(variables: &[Variable]) -> HashMap<&str, crate::value::Type> {
    variables.iter().map(|v| (v.id.as_str(), v.type_of)).collect()
}

/// Validates a condition list (e.g. a goal) against `variables` alone,
/// without requiring the rest of a model.
pub fn validate_conditions(variables: &[Variable], conditions: &[Condition]) -> Result<(), EngineError> {
    let types = variable_types(variables);
    for condition in conditions {
        validate_condition(condition, &types)?;
    }
    Ok(())
}

/// Validates one transition's conditions, effects, and cost against
/// `variables` alone. Used by [`crate::single_step`], which is handed one
/// transition that need not belong to any particular model.
pub fn validate_transition(variables: &[Variable], transition: &Transition) -> Result<(), EngineError> {
    let types = variable_types(variables);
    for condition in &transition.conditions {
        validate_condition(condition, &types)?;
    }
    for effect in &transition.effects {
        validate_effect(effect, &types)?;
    }
    if transition.cost.is_nan() || transition.cost < 0.0 || !transition.cost.is_finite() {
        return Err(EngineError::Schema(format!(
            "transition {:?} has non-finite or negative cost {}",
            transition.id, transition.cost
        )));
    }
    Ok(())
}

/// Validates every transition in `transitions` against `variables` alone.
/// Used both by [`Model::validate`] (with the model's own transitions) and
/// by [`crate::enabled_transitions`] (with whatever transition slice the
/// caller passed in, which need not equal any model's transition list).
pub fn validate_transitions(variables: &[Variable], transitions: &[Transition]) -> Result<(), EngineError> {
    for transition in transitions {
        validate_transition(variables, transition)?;
    }
    Ok(())
}

fn operand_type(
    operand: &Operand,
    types: &HashMap<&str, crate::value::Type>,
) -> Result<crate::value::Type, EngineError> {
    match operand {
        Operand::Literal(v) => Ok(v.type_of()),
        Operand::Ref(id) => types
            .get(id.as_str())
            .copied()
            .ok_or_else(|| EngineError::UnknownVariable(id.clone())),
    }
}

fn validate_condition(
    condition: &Condition,
    types: &HashMap<&str, crate::value::Type>,
) -> Result<(), EngineError> {
    let lhs_type = *types
        .get(condition.variable_id.as_str())
        .ok_or_else(|| EngineError::UnknownVariable(condition.variable_id.clone()))?;
    let rhs_type = operand_type(&condition.argument, types)?;
    if lhs_type != rhs_type {
        return Err(EngineError::TypeMismatch {
            variable_id: condition.variable_id.clone(),
            expected: lhs_type,
            found: rhs_type,
        });
    }
    if !operators::comparison_supported(condition.comparison_operator, lhs_type) {
        return Err(EngineError::UnsupportedOperator {
            operator: format!("{:?}", condition.comparison_operator),
            value_type: lhs_type,
        });
    }
    Ok(())
}

fn validate_effect(
    effect: &Effect,
    types: &HashMap<&str, crate::value::Type>,
) -> Result<(), EngineError> {
    let lhs_type = *types
        .get(effect.variable_id.as_str())
        .ok_or_else(|| EngineError::UnknownVariable(effect.variable_id.clone()))?;
    let rhs_type = operand_type(&effect.argument, types)?;
    if lhs_type != rhs_type {
        return Err(EngineError::TypeMismatch {
            variable_id: effect.variable_id.clone(),
            expected: lhs_type,
            found: rhs_type,
        });
    }
    if !operators::assignment_supported(effect.assignment_operator, lhs_type) {
        return Err(EngineError::UnsupportedOperator {
            operator: format!("{:?}", effect.assignment_operator),
            value_type: lhs_type,
        });
    }
    Ok(())
}
