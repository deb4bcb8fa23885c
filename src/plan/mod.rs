pub mod planner;

pub use planner::{ActionPlan, CancellationSignal, NeverCancelled, PlanStatus, PlannerConfig};
