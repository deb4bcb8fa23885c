use serde::{Deserialize, Serialize};

use crate::condition::{self, Condition};
use crate::error::EngineError;
use crate::world_state::WorldState;

/// A goal is nothing more than a list of conditions a world-state must all
/// satisfy; an empty goal is satisfied by any state, including the initial
/// one.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Goal(pub Vec<Condition>);

impl Goal {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.0.push(condition);
        self
    }
}

pub fn goals_satisfied(goal: &Goal, state: &WorldState) -> Result<bool, EngineError> {
    condition::all_satisfied(&goal.0, state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_goal_is_always_satisfied() {
        let state = WorldState::default();
        assert!(goals_satisfied(&Goal::new(), &state).unwrap());
    }
}
