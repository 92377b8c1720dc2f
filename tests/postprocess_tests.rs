//! Post-processor tests with scripted solver oracles.

use fmerust::prelude::*;

/// Oracle that replays a fixed script of outcomes.
struct ScriptedOracle {
    script: Vec<OracleOutcome>,
    calls: usize,
}

impl ScriptedOracle {
    fn new(script: Vec<OracleOutcome>) -> Self {
        ScriptedOracle { script, calls: 0 }
    }
}

impl SolverOracle for ScriptedOracle {
    fn solve(&mut self, _model: &Model) -> OracleOutcome {
        let outcome = self.script[self.calls].clone();
        self.calls += 1;
        outcome
    }
}

/// Oracle that records what the model looked like during the first
/// solve, then answers unbounded.
struct FirstProbeInspector {
    constraint: ConstraintId,
    recorded: bool,
    active_objective_count: usize,
    objective_sense: Option<Sense>,
    objective_constant: Option<f64>,
    probed_constraint_active: Option<bool>,
    integer_domains_seen: usize,
}

impl FirstProbeInspector {
    fn new(constraint: ConstraintId) -> Self {
        FirstProbeInspector {
            constraint,
            recorded: false,
            active_objective_count: 0,
            objective_sense: None,
            objective_constant: None,
            probed_constraint_active: None,
            integer_domains_seen: 0,
        }
    }
}

impl SolverOracle for FirstProbeInspector {
    fn solve(&mut self, model: &Model) -> OracleOutcome {
        if !self.recorded {
            self.recorded = true;
            let objectives = model.active_objectives();
            self.active_objective_count = objectives.len();
            if let [id] = objectives.as_slice() {
                let obj = model.objective(*id).unwrap();
                self.objective_sense = Some(obj.sense());
                self.objective_constant = Some(obj.body().constant_value());
            }
            self.probed_constraint_active =
                model.constraint(self.constraint).map(|c| c.is_active());
            self.integer_domains_seen = model
                .variables()
                .iter()
                .filter(|v| v.is_integer())
                .count();
        }
        OracleOutcome::unbounded()
    }
}

/// y - x >= 0 and x >= 1 projected through x, with NoFilter so both
/// y >= 1 and y >= 0 survive into the projection.
fn projected_model() -> (Model, Projection) {
    let mut model = Model::new();
    let x = model.add_variable(VariableBuilder::continuous().name("x").bounds(0.0, 10.0));
    let y = model.add_variable(VariableBuilder::continuous().name("y"));
    model.add_constraint(Constraint::geq(
        LinearExpr::variable(y) - LinearExpr::variable(x),
        0.0,
    ));
    model.add_constraint(Constraint::geq(LinearExpr::variable(x), 1.0));

    let projection = FourierMotzkinElimination::new(vec![x])
        .with_filter(ConstraintFilter::NoFilter)
        .apply_to(&mut model)
        .unwrap();
    assert_eq!(projection.constraint_ids().len(), 2);
    (model, projection)
}

#[test]
fn test_redundant_constraint_removed() {
    let (mut model, projection) = projected_model();
    // First probe keeps y >= 1 (slack can go negative), second finds
    // y >= 0 redundant given y >= 1.
    let mut oracle = ScriptedOracle::new(vec![
        OracleOutcome::optimal(-1.0),
        OracleOutcome::optimal(1.0),
    ]);

    post_process_projected_constraints(&mut model, &mut oracle, &projection, 0.0).unwrap();

    assert_eq!(oracle.calls, 2);
    let first = projection.constraint_ids()[0];
    let second = projection.constraint_ids()[1];
    assert!(model.constraint(first).unwrap().is_active());
    assert!(model.constraint(second).is_none());
    // Removal also drops the constraint from the stored list.
    assert_eq!(
        model.constraint_list(projection.name()),
        Some(&[first][..])
    );
}

#[test]
fn test_unbounded_probe_keeps_constraint() {
    let (mut model, projection) = projected_model();
    let mut oracle = ScriptedOracle::new(vec![
        OracleOutcome::unbounded(),
        OracleOutcome::unbounded(),
    ]);

    post_process_projected_constraints(&mut model, &mut oracle, &projection, 0.0).unwrap();

    for &id in projection.constraint_ids() {
        assert!(model.constraint(id).unwrap().is_active());
    }
}

#[test]
fn test_tolerance_threshold() {
    let (mut model, projection) = projected_model();
    // Slack minimum of 0.5 is below a tolerance of 1.0, so the
    // constraint stays; exactly at tolerance it goes.
    let mut oracle = ScriptedOracle::new(vec![
        OracleOutcome::optimal(0.5),
        OracleOutcome::optimal(1.0),
    ]);

    post_process_projected_constraints(&mut model, &mut oracle, &projection, 1.0).unwrap();

    assert!(model
        .constraint(projection.constraint_ids()[0])
        .unwrap()
        .is_active());
    assert!(model.constraint(projection.constraint_ids()[1]).is_none());
}

#[test]
fn test_failed_solve_is_error_and_restores_state() {
    let mut model = Model::new();
    let x = model.add_variable(VariableBuilder::integer().name("x").bounds(0.0, 10.0));
    let y = model.add_variable(VariableBuilder::continuous().name("y"));
    model.add_constraint(Constraint::geq(
        LinearExpr::variable(y) - LinearExpr::variable(x),
        0.0,
    ));
    model.add_constraint(Constraint::geq(LinearExpr::variable(x), 1.0));
    let user_obj = model.add_objective(Objective::minimize(LinearExpr::variable(y)));

    let projection = FourierMotzkinElimination::new(vec![x])
        .with_filter(ConstraintFilter::NoFilter)
        .apply_to(&mut model)
        .unwrap();

    let mut oracle = ScriptedOracle::new(vec![OracleOutcome::other("NumericalError")]);
    let err = post_process_projected_constraints(&mut model, &mut oracle, &projection, 0.0)
        .unwrap_err();

    match err {
        FmeError::SolveFailed { status, .. } => assert_eq!(status, "NumericalError"),
        other => panic!("unexpected error: {other}"),
    }

    // Everything the pass touched is back in place.
    assert_eq!(model.variable(x).domain(), Domain::Integer);
    assert!(model.objective(user_obj).unwrap().is_active());
    assert_eq!(model.active_objectives(), vec![user_obj]);
    for &id in projection.constraint_ids() {
        assert!(model.constraint(id).unwrap().is_active());
    }
}

#[test]
fn test_probe_setup_during_solve() {
    let mut model = Model::new();
    let x = model.add_variable(VariableBuilder::integer().name("x").bounds(0.0, 10.0));
    let y = model.add_variable(VariableBuilder::continuous().name("y"));
    model.add_constraint(Constraint::geq(
        LinearExpr::variable(y) - LinearExpr::variable(x),
        0.0,
    ));
    model.add_constraint(Constraint::geq(LinearExpr::variable(x), 1.0));
    let user_obj = model.add_objective(Objective::minimize(LinearExpr::variable(y)));

    let projection = FourierMotzkinElimination::new(vec![x])
        .with_filter(ConstraintFilter::NoFilter)
        .apply_to(&mut model)
        .unwrap();
    let probed = projection.constraint_ids()[0];

    let mut oracle = FirstProbeInspector::new(probed);
    post_process_projected_constraints(&mut model, &mut oracle, &projection, 0.0).unwrap();

    // During the first solve: one active objective (the probe),
    // minimizing body - lower, with the probed constraint deactivated
    // and integer domains relaxed.
    assert_eq!(oracle.active_objective_count, 1);
    assert_eq!(oracle.objective_sense, Some(Sense::Minimize));
    // The probed constraint is y >= 1, so the probe body is y - 1.
    assert_eq!(oracle.objective_constant, Some(-1.0));
    assert_eq!(oracle.probed_constraint_active, Some(false));
    assert_eq!(oracle.integer_domains_seen, 0);

    // After the pass: the user objective is active again and the
    // integer domain is restored.
    assert_eq!(model.active_objectives(), vec![user_obj]);
    assert_eq!(model.variable(x).domain(), Domain::Integer);
}

#[test]
fn test_already_inactive_constraints_skipped() {
    let (mut model, projection) = projected_model();
    model
        .constraint_mut(projection.constraint_ids()[0])
        .unwrap()
        .deactivate();

    let mut oracle = ScriptedOracle::new(vec![OracleOutcome::unbounded()]);
    post_process_projected_constraints(&mut model, &mut oracle, &projection, 0.0).unwrap();

    // Only the active constraint was probed.
    assert_eq!(oracle.calls, 1);
    assert!(!model
        .constraint(projection.constraint_ids()[0])
        .unwrap()
        .is_active());
}
