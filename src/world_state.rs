use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::error::EngineError;
use crate::value::Value;
use crate::variable::{Variable, VariableValue};

/// A total assignment of every model variable to a typed value.
///
/// Canonical form is the sorted-by-id [`BTreeMap`], which makes
/// [`WorldState::identity`] a stable content hash: two states with the same
/// assignments always hash identically, independent of the order they were
/// built in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldState(BTreeMap<String, Value>);

impl WorldState {
    /// Builds a total state from the model's variables and a (possibly
    /// partial) list of initial assignments.
    ///
    /// Variables absent from `values` default to their type's zero value.
    /// Duplicate assignments to the same variable, assignments to an
    /// unknown variable, and type-mismatched assignments are all rejected
    /// up front rather than surfacing later during search.
    pub fn build(variables: &[Variable], values: &[VariableValue]) -> Result<WorldState, EngineError> {
        let mut map = BTreeMap::new();
        for variable in variables {
            map.insert(variable.id.clone(), Value::zero(variable.type_of));
        }
        let mut seen = std::collections::HashSet::new();
        for assignment in values {
            let variable = variables
                .iter()
                .find(|v| v.id == assignment.variable_id)
                .ok_or_else(|| EngineError::UnknownVariable(assignment.variable_id.clone()))?;
            if !seen.insert(assignment.variable_id.clone()) {
                return Err(EngineError::DuplicateAssignment(assignment.variable_id.clone()));
            }
            if assignment.value.type_of() != variable.type_of {
                return Err(EngineError::TypeMismatch {
                    variable_id: assignment.variable_id.clone(),
                    expected: variable.type_of,
                    found: assignment.value.type_of(),
                });
            }
            map.insert(assignment.variable_id.clone(), assignment.value.clone());
        }
        Ok(WorldState(map))
    }

    /// Looks up a variable's current value.
    ///
    /// # Panics
    /// Panics if `variable_id` is not part of this state. Model validation
    /// guarantees every variable id referenced by a condition or effect
    /// exists in the variable table before search begins, so this is a
    /// precondition violation, not a recoverable runtime error.
    pub fn get(&self, variable_id: &str) -> &Value {
        self.0
            .get(variable_id)
            .unwrap_or_else(|| panic!("unknown variable {variable_id:?} in world state"))
    }

    /// Returns a new state with `variable_id` rebound to `new_value`,
    /// leaving `self` untouched.
    pub fn with(&self, variable_id: &str, new_value: Value) -> WorldState {
        let mut next = self.0.clone();
        next.insert(variable_id.to_string(), new_value);
        WorldState(next)
    }

    /// Stable content hash of the canonical (sorted) assignment sequence.
    ///
    /// Uses [`DefaultHasher`], whose seed is fixed (unlike `HashMap`'s
    /// randomized `RandomState`), so the same state hashes identically
    /// across runs and processes.
    pub fn identity(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.0.len().hash(&mut hasher);
        for (key, value) in &self.0 {
            key.hash(&mut hasher);
            value.hash(&mut hasher);
        }
        hasher.finish()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical (sorted-by-id) list of every variable's assignment, the
    /// shape `ActionPlan.initialState`/`finalState` are reported in.
    pub fn to_variable_values(&self) -> Vec<VariableValue> {
        self.0
            .iter()
            .map(|(id, value)| VariableValue { variable_id: id.clone(), value: value.clone() })
            .collect()
    }
}

impl Display for WorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WorldState {{ ")?;
        let mut first = true;
        for (key, value) in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Type;

    #[test]
    fn build_defaults_missing_variables() {
        let vars = [Variable::new("x", Type::Int), Variable::new("flag", Type::Boolean)];
        let state = WorldState::build(&vars, &[VariableValue::new("x", 5)]).unwrap();
        assert_eq!(state.get("x"), &Value::Int(5));
        assert_eq!(state.get("flag"), &Value::Boolean(false));
    }

    #[test]
    fn build_rejects_duplicate_assignment() {
        let vars = [Variable::new("x", Type::Int)];
        let values = [VariableValue::new("x", 1), VariableValue::new("x", 2)];
        assert!(matches!(
            WorldState::build(&vars, &values),
            Err(EngineError::DuplicateAssignment(_))
        ));
    }

    #[test]
    fn build_rejects_unknown_variable() {
        let vars = [Variable::new("x", Type::Int)];
        let values = [VariableValue::new("y", 1)];
        assert!(matches!(WorldState::build(&vars, &values), Err(EngineError::UnknownVariable(_))));
    }

    #[test]
    fn identity_is_order_independent() {
        let vars = [Variable::new("a", Type::Int), Variable::new("b", Type::Int)];
        let s1 =
            WorldState::build(&vars, &[VariableValue::new("a", 1), VariableValue::new("b", 2)]).unwrap();
        let s2 =
            WorldState::build(&vars, &[VariableValue::new("b", 2), VariableValue::new("a", 1)]).unwrap();
        assert_eq!(s1.identity(), s2.identity());
        assert_eq!(s1, s2);
    }

    #[test]
    fn with_does_not_mutate_original() {
        let vars = [Variable::new("x", Type::Int)];
        let state = WorldState::build(&vars, &[VariableValue::new("x", 1)]).unwrap();
        let next = state.with("x", Value::Int(2));
        assert_eq!(state.get("x"), &Value::Int(1));
        assert_eq!(next.get("x"), &Value::Int(2));
    }
}
