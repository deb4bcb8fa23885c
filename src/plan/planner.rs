//! A* search over world-states.
//!
//! The search loop is written out explicitly rather than delegated to a
//! generic pathfinding library: the tie-break order, expansion bound, and
//! per-node cancellation check below have no hook in a closure-based
//! `astar()` entry point. See the top-level design notes for the tradeoff.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::condition;
use crate::error::EngineError;
use crate::goal::{self, Goal};
use crate::model::Model;
use crate::transition;
use crate::variable::VariableValue;
use crate::world_state::WorldState;

/// Caps and cancellation handle shared by every planning query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Search aborts with [`PlanStatus::Aborted`] once this many nodes have
    /// been expanded. Guards against zero-cost cycles and pathological
    /// models alike.
    pub max_expansions: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { max_expansions: 100_000 }
    }
}

/// A caller-supplied hook checked once per node expansion. Timeouts are
/// implemented by callers via this same mechanism (e.g. a background
/// thread flipping an `AtomicBool` after a deadline); the planner itself
/// starts no timers.
pub trait CancellationSignal {
    fn is_cancelled(&self) -> bool;
}

/// The default signal for callers with nothing to cancel on.
pub struct NeverCancelled;

impl CancellationSignal for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancellationSignal for std::sync::Arc<std::sync::atomic::AtomicBool> {
    fn is_cancelled(&self) -> bool {
        self.load(std::sync::atomic::Ordering::Relaxed)
    }
}

/// Outcome of a [`generate_action_plan`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Found,
    Unreachable,
    Aborted,
}

/// The result of planning: the transition sequence found (if any), the
/// action labels it carries, and the states it connects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionPlan {
    pub actions: Vec<String>,
    pub transitions: Vec<String>,
    #[serde(rename = "totalSteps")]
    pub total_steps: usize,
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
    #[serde(rename = "initialState")]
    pub initial_state: Vec<VariableValue>,
    #[serde(rename = "finalState")]
    pub final_state: Vec<VariableValue>,
    pub status: PlanStatus,
}

impl ActionPlan {
    fn empty(status: PlanStatus, start: &WorldState) -> Self {
        let snapshot = start.to_variable_values();
        Self {
            actions: Vec::new(),
            transitions: Vec::new(),
            total_steps: 0,
            total_cost: 0.0,
            initial_state: snapshot.clone(),
            final_state: snapshot,
            status,
        }
    }
}

/// Sum, over each unsatisfied goal condition, of its variable's weight.
///
/// Admissible whenever every transition's cost is at least the smallest
/// weight in play; the crate has no way to check that in general, so this
/// indicator form — proven safe unconditionally — is used rather than a
/// tighter heuristic that would need that unproven assumption.
fn heuristic(
    goal: &Goal,
    state: &WorldState,
    weights: &HashMap<&str, f64>,
) -> Result<f64, EngineError> {
    let mut total = 0.0;
    for cond in &goal.0 {
        if !condition::eval_condition(cond, state)? {
            total += weights.get(cond.variable_id.as_str()).copied().unwrap_or(1.0);
        }
    }
    Ok(total)
}

/// Min-heap entry ordered by `(f, -g, seq)`: lowest `f` first, ties broken
/// by higher `g` (deeper states first), remaining ties broken by
/// insertion order. `BinaryHeap` is a max-heap, so every comparison below
/// is phrased as "which entry should come out of the heap first is the
/// greater one".
struct HeapEntry {
    f: f64,
    g: f64,
    seq: u64,
    state_id: u64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g && self.seq == other.seq
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.g.partial_cmp(&other.g).unwrap_or(Ordering::Equal))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Runs A* from `initial_state` to any state satisfying `goal`.
///
/// Validates the whole model (plus the goal's own conditions) before
/// expanding the first node; a validation failure is returned as `Err`
/// rather than folded into [`ActionPlan::status`], matching the other
/// model-level error kinds.
pub fn generate_action_plan(
    model: &Model,
    initial_state: &[VariableValue],
    goal: &Goal,
    config: &PlannerConfig,
    cancellation: &dyn CancellationSignal,
) -> Result<ActionPlan, EngineError> {
    model.validate(&goal.0)?;

    let start_state = WorldState::build(&model.variables, initial_state)?;
    let start_id = start_state.identity();
    let weights: HashMap<&str, f64> = model.variables.iter().map(|v| (v.id.as_str(), v.weight)).collect();

    if goal::goals_satisfied(goal, &start_state)? {
        info!(status = "FOUND", total_steps = 0, "planning complete");
        let snapshot = start_state.to_variable_values();
        return Ok(ActionPlan {
            actions: Vec::new(),
            transitions: Vec::new(),
            total_steps: 0,
            total_cost: 0.0,
            initial_state: snapshot.clone(),
            final_state: snapshot,
            status: PlanStatus::Found,
        });
    }

    let mut open: BinaryHeap<HeapEntry> = BinaryHeap::new();
    let mut best_g: HashMap<u64, f64> = HashMap::new();
    let mut states: HashMap<u64, WorldState> = HashMap::new();
    let mut came_from: HashMap<u64, (u64, String)> = HashMap::new();
    let mut seq: u64 = 0;

    best_g.insert(start_id, 0.0);
    states.insert(start_id, start_state.clone());
    let h0 = heuristic(goal, &start_state, &weights)?;
    open.push(HeapEntry { f: h0, g: 0.0, seq, state_id: start_id });
    seq += 1;

    let mut expansions: usize = 0;

    while let Some(entry) = open.pop() {
        if cancellation.is_cancelled() {
            warn!("planning cancelled by caller");
            return Ok(ActionPlan::empty(PlanStatus::Aborted, &start_state));
        }

        let current_best = *best_g.get(&entry.state_id).expect("visited state has a recorded g");
        if entry.g > current_best {
            continue; // stale heap entry, superseded by a cheaper path
        }

        expansions += 1;
        if expansions > config.max_expansions {
            warn!(max_expansions = config.max_expansions, "expansion limit exceeded");
            return Ok(ActionPlan::empty(PlanStatus::Aborted, &start_state));
        }

        let current_state = states.get(&entry.state_id).expect("visited state is recorded").clone();

        if goal::goals_satisfied(goal, &current_state)? {
            let plan = reconstruct(&came_from, &states, model, start_id, entry.state_id, entry.g, &start_state);
            info!(status = "FOUND", total_steps = plan.total_steps, total_cost = plan.total_cost, "planning complete");
            return Ok(plan);
        }

        for transition in &model.transitions {
            if !transition::is_enabled(transition, &current_state)? {
                continue;
            }
            let next_state = match transition::fire(transition, &current_state) {
                Ok(s) => s,
                Err(EngineError::Arithmetic { variable_id, reason }) => {
                    debug!(transition = %transition.id, variable_id, reason, "pruned transition: arithmetic error");
                    continue;
                }
                Err(e) => return Err(e),
            };
            let next_id = next_state.identity();
            let tentative_g = entry.g + transition.cost;
            let strictly_better = best_g.get(&next_id).is_none_or(|&g| tentative_g < g);
            if strictly_better {
                best_g.insert(next_id, tentative_g);
                states.insert(next_id, next_state.clone());
                came_from.insert(next_id, (entry.state_id, transition.id.clone()));
                let h = heuristic(goal, &next_state, &weights)?;
                open.push(HeapEntry { f: tentative_g + h, g: tentative_g, seq, state_id: next_id });
                seq += 1;
            }
        }
    }

    info!(status = "UNREACHABLE", "planning complete");
    Ok(ActionPlan::empty(PlanStatus::Unreachable, &start_state))
}

fn reconstruct(
    came_from: &HashMap<u64, (u64, String)>,
    states: &HashMap<u64, WorldState>,
    model: &Model,
    start_id: u64,
    goal_id: u64,
    total_cost: f64,
    start_state: &WorldState,
) -> ActionPlan {
    let mut transition_ids = Vec::new();
    let mut node = goal_id;
    while node != start_id {
        let (prev, transition_id) = came_from.get(&node).expect("path exists from reconstruction");
        transition_ids.push(transition_id.clone());
        node = *prev;
    }
    transition_ids.reverse();

    let actions = transition_ids
        .iter()
        .filter_map(|id| model.transitions.iter().find(|t| &t.id == id))
        .filter_map(|t| t.action.clone())
        .collect();

    let final_state = states.get(&goal_id).expect("goal state recorded").to_variable_values();

    ActionPlan {
        total_steps: transition_ids.len(),
        actions,
        transitions: transition_ids,
        total_cost,
        initial_state: start_state.to_variable_values(),
        final_state,
        status: PlanStatus::Found,
    }
}
