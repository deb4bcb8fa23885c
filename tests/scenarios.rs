use goap_engine::prelude::*;

fn plan_config() -> PlannerConfig {
    PlannerConfig::default()
}

#[test]
fn boundary_empty_goal_is_zero_step_found() {
    let model = Model::new(vec![Variable::new("x", Type::Int)], vec![]);
    let initial = vec![VariableValue::new("x", 5)];
    let goal = Goal::new();
    let plan = generate_action_plan(&model, &initial, &goal, &plan_config(), &NeverCancelled).unwrap();
    assert_eq!(plan.status, PlanStatus::Found);
    assert_eq!(plan.total_steps, 0);
    assert_eq!(plan.initial_state, plan.final_state);
}

#[test]
fn boundary_empty_transitions_with_goal_is_unreachable() {
    let model = Model::new(vec![Variable::new("x", Type::Int)], vec![]);
    let initial = vec![VariableValue::new("x", 5)];
    let goal = Goal::new().with(Condition::new("x", ComparisonOperator::Eq, Value::Int(6)));
    let plan = generate_action_plan(&model, &initial, &goal, &plan_config(), &NeverCancelled).unwrap();
    assert_eq!(plan.status, PlanStatus::Unreachable);
    assert!(plan.actions.is_empty());
}

#[test]
fn choose_cheaper_of_two_paths_to_the_same_goal() {
    let model = Model::new(
        vec![Variable::new("x", Type::Int)],
        vec![
            Transition::new("big", 5.0)
                .with_effect(Effect::new("x", AssignmentOperator::Set, Value::Int(10)))
                .with_action("big"),
            Transition::new("small", 1.0)
                .with_condition(Condition::new("x", ComparisonOperator::Lt, Value::Int(10)))
                .with_effect(Effect::new("x", AssignmentOperator::Add, Value::Int(5)))
                .with_action("small"),
        ],
    );
    let initial = vec![VariableValue::new("x", 0)];
    let goal = Goal::new().with(Condition::new("x", ComparisonOperator::Eq, Value::Int(10)));
    let plan = generate_action_plan(&model, &initial, &goal, &plan_config(), &NeverCancelled).unwrap();
    assert_eq!(plan.status, PlanStatus::Found);
    assert_eq!(plan.total_cost, 2.0);
}

#[test]
fn enabled_transitions_reports_only_applicable_ones_in_order() {
    let model = Model::new(vec![Variable::new("x", Type::Int)], vec![]);
    let initial = vec![VariableValue::new("x", 5)];
    let high = Transition::new("needs_high", 1.0)
        .with_condition(Condition::new("x", ComparisonOperator::Gt, Value::Int(100)));
    let low =
        Transition::new("needs_low", 1.0).with_condition(Condition::new("x", ComparisonOperator::Lt, Value::Int(100)));
    let ids = enabled_transitions(&model.variables, &initial, &[high, low]).unwrap();
    assert_eq!(ids, vec!["needs_low".to_string()]);
}

#[test]
fn model_validation_rejects_bad_model_before_search_starts() {
    let model = Model::new(
        vec![Variable::new("x", Type::Int)],
        vec![Transition::new("t", 1.0)
            .with_effect(Effect::new("x", AssignmentOperator::Set, Value::Boolean(true)))],
    );
    let initial = vec![VariableValue::new("x", 1)];
    let goal = Goal::new();
    let err = generate_action_plan(&model, &initial, &goal, &plan_config(), &NeverCancelled).unwrap_err();
    assert!(matches!(err, EngineError::TypeMismatch { .. }));
}
