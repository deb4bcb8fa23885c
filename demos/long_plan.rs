//! Shows a plan with enough steps that the A* heuristic actually matters:
//! reaching a gold target costs 7 trips through a sleep/eat/rob cycle.

use goap_engine::prelude::*;

fn main() {
    let variables = vec![
        Variable::new("energy", Type::Int),
        Variable::new("hunger", Type::Int),
        Variable::new("gold", Type::Int),
    ];

    let sleep = Transition::new("sleep", 1.0)
        .with_effect(Effect::new("energy", AssignmentOperator::Add, Value::Int(10)))
        .with_action("sleep");

    let eat = Transition::new("eat", 1.0)
        .with_condition(Condition::new("energy", ComparisonOperator::Ge, Value::Int(26)))
        .with_effect(Effect::new("hunger", AssignmentOperator::Sub, Value::Int(10)))
        .with_action("eat");

    let rob = Transition::new("rob", 1.0)
        .with_condition(Condition::new("hunger", ComparisonOperator::Le, Value::Int(50)))
        .with_condition(Condition::new("energy", ComparisonOperator::Ge, Value::Int(50)))
        .with_effect(Effect::new("gold", AssignmentOperator::Add, Value::Int(1)))
        .with_effect(Effect::new("energy", AssignmentOperator::Sub, Value::Int(5)))
        .with_effect(Effect::new("hunger", AssignmentOperator::Add, Value::Int(5)))
        .with_action("rob");

    let model = Model::new(variables, vec![sleep, eat, rob]);

    let initial = vec![
        VariableValue::new("energy", 30),
        VariableValue::new("hunger", 70),
        VariableValue::new("gold", 0),
    ];
    let goal = Goal::new().with(Condition::new("gold", ComparisonOperator::Eq, Value::Int(7)));

    let plan = generate_action_plan(&model, &initial, &goal, &PlannerConfig::default(), &NeverCancelled)
        .expect("model validates");

    println!("status: {:?}", plan.status);
    println!("steps: {}", plan.total_steps);
    println!("actions: {:?}", plan.actions);
    println!("total cost: {}", plan.total_cost);
}
