use goap_engine::prelude::*;

fn main() {
    tracing_subscriber::fmt::init();

    let variables =
        vec![Variable::new("is_hungry", Type::Boolean), Variable::new("has_food", Type::Boolean)];

    let buy_food = Transition::new("buy_food", 2.0)
        .with_effect(Effect::new("has_food", AssignmentOperator::Set, Value::Boolean(true)))
        .with_action("buy_food");

    let eat = Transition::new("eat", 1.0)
        .with_condition(Condition::new("has_food", ComparisonOperator::Eq, Value::Boolean(true)))
        .with_effect(Effect::new("is_hungry", AssignmentOperator::Set, Value::Boolean(false)))
        .with_effect(Effect::new("has_food", AssignmentOperator::Set, Value::Boolean(false)))
        .with_action("eat");

    let model = Model::new(variables, vec![buy_food, eat]);

    let initial = vec![VariableValue::new("is_hungry", true), VariableValue::new("has_food", false)];
    let goal = Goal::new().with(Condition::new("is_hungry", ComparisonOperator::Eq, Value::Boolean(false)));

    let plan = generate_action_plan(&model, &initial, &goal, &PlannerConfig::default(), &NeverCancelled)
        .expect("model validates");

    println!("status: {:?}", plan.status);
    println!("actions: {:?}", plan.actions);
    println!("total cost: {}", plan.total_cost);
}
