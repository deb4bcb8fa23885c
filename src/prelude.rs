pub use crate::condition::{Condition, eval_condition};
pub use crate::effect::Effect;
pub use crate::error::EngineError;
pub use crate::goal::Goal;
pub use crate::model::Model;
pub use crate::operators::{AssignmentOperator, ComparisonOperator};
pub use crate::plan::{ActionPlan, CancellationSignal, NeverCancelled, PlanStatus, PlannerConfig};
pub use crate::transition::Transition;
pub use crate::value::{Type, Value};
pub use crate::variable::{Operand, Variable, VariableValue};
pub use crate::world_state::WorldState;

pub use crate::{are_goals_satisfied, enabled_transitions, generate_action_plan, single_step};
