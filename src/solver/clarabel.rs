//! Clarabel LP backend for the redundancy post-processor.
//!
//! Assembles the model's active objective, active constraints, and
//! variable bounds into Clarabel's `Ax + s = b, s in K` form, with the
//! zero cone carrying equalities and the nonnegative cone carrying
//! inequalities.

use clarabel::algebra::CscMatrix as ClarabelCsc;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use nalgebra_sparse::{CooMatrix, CscMatrix};

use super::oracle::{OracleOutcome, SolverOracle, TerminationStatus};
use crate::model::{LinearExpr, Model, Sense};

impl From<SolverStatus> for TerminationStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved => TerminationStatus::Optimal,
            SolverStatus::DualInfeasible => TerminationStatus::Unbounded,
            SolverStatus::PrimalInfeasible => {
                TerminationStatus::Other("PrimalInfeasible".to_string())
            }
            other => TerminationStatus::Other(format!("{other:?}")),
        }
    }
}

/// Solver settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Print solver output.
    pub verbose: bool,
    /// Maximum iterations.
    pub max_iter: u32,
    /// Time limit in seconds.
    pub time_limit: f64,
    /// Absolute tolerance.
    pub tol_gap_abs: f64,
    /// Relative tolerance.
    pub tol_gap_rel: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            verbose: false,
            max_iter: 100,
            time_limit: f64::INFINITY,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
        }
    }
}

/// LP oracle backed by Clarabel.
#[derive(Debug, Clone, Default)]
pub struct ClarabelOracle {
    settings: Settings,
}

impl ClarabelOracle {
    /// Create an oracle with default settings.
    pub fn new() -> Self {
        ClarabelOracle::default()
    }

    /// Create an oracle with explicit settings.
    pub fn with_settings(settings: Settings) -> Self {
        ClarabelOracle { settings }
    }
}

impl SolverOracle for ClarabelOracle {
    fn solve(&mut self, model: &Model) -> OracleOutcome {
        let stuffed = match stuff_model(model) {
            Ok(stuffed) => stuffed,
            Err(msg) => return OracleOutcome::other(msg),
        };
        solve_stuffed(&stuffed, &self.settings)
    }
}

/// An LP in Clarabel's standard form.
struct StuffedLp {
    q: Vec<f64>,
    a: CscMatrix<f64>,
    b: Vec<f64>,
    n_eq: usize,
    n_ineq: usize,
    /// Added to the raw solver objective to recover the model value.
    offset: f64,
    /// The model objective was a maximization.
    negated: bool,
}

/// Assemble the model's active components into standard form.
fn stuff_model(model: &Model) -> Result<StuffedLp, String> {
    let n = model.num_variables();

    let objectives = model.active_objectives();
    let obj = match objectives.as_slice() {
        [id] => model.objective(*id).unwrap(),
        [] => return Err("model has no active objective".to_string()),
        _ => return Err("model has more than one active objective".to_string()),
    };
    if !obj.body().is_linear() {
        return Err(format!("objective '{}' is nonlinear", obj.name()));
    }

    let negated = obj.sense() == Sense::Maximize;
    let sign = if negated { -1.0 } else { 1.0 };
    let mut q = vec![0.0; n];
    for var in obj.body().variables() {
        q[var.raw() as usize] = sign * obj.body().coef(var);
    }
    let offset = obj.body().constant_value();

    let active = model.active_constraints();
    for &id in &active {
        let c = model.constraint(id).unwrap();
        if !c.body().is_linear() {
            return Err(format!("constraint '{}' is nonlinear", c.name()));
        }
    }

    let mut rows: Vec<usize> = Vec::new();
    let mut cols: Vec<usize> = Vec::new();
    let mut vals: Vec<f64> = Vec::new();
    let mut b: Vec<f64> = Vec::new();

    let mut push_row = |rows: &mut Vec<usize>,
                        cols: &mut Vec<usize>,
                        vals: &mut Vec<f64>,
                        b: &mut Vec<f64>,
                        body: &LinearExpr,
                        scale: f64,
                        rhs: f64| {
        let row = b.len();
        for var in body.variables() {
            rows.push(row);
            cols.push(var.raw() as usize);
            vals.push(scale * body.coef(var));
        }
        b.push(rhs);
    };

    // Zero cone rows first: equalities as coeffs . x = value - constant.
    for &id in &active {
        let c = model.constraint(id).unwrap();
        if c.is_equality() {
            let value = c.lower().unwrap_or(0.0);
            push_row(
                &mut rows,
                &mut cols,
                &mut vals,
                &mut b,
                c.body(),
                1.0,
                value - c.body().constant_value(),
            );
        }
    }
    let n_eq = b.len();

    // Nonnegative cone rows: every inequality as a . x <= rhs.
    for &id in &active {
        let c = model.constraint(id).unwrap();
        if c.is_equality() {
            continue;
        }
        let constant = c.body().constant_value();
        if let Some(lower) = c.lower() {
            push_row(
                &mut rows,
                &mut cols,
                &mut vals,
                &mut b,
                c.body(),
                -1.0,
                constant - lower,
            );
        }
        if let Some(upper) = c.upper() {
            push_row(
                &mut rows,
                &mut cols,
                &mut vals,
                &mut b,
                c.body(),
                1.0,
                upper - constant,
            );
        }
    }

    // Variable bounds as inequality rows.
    for var in model.variables() {
        let col = var.id().raw() as usize;
        if let Some(lb) = var.lower() {
            let row = b.len();
            rows.push(row);
            cols.push(col);
            vals.push(-1.0);
            b.push(-lb);
        }
        if let Some(ub) = var.upper() {
            let row = b.len();
            rows.push(row);
            cols.push(col);
            vals.push(1.0);
            b.push(ub);
        }
    }
    let n_ineq = b.len() - n_eq;

    Ok(StuffedLp {
        q,
        a: csc_from_triplets(b.len(), n, rows, cols, vals),
        b,
        n_eq,
        n_ineq,
        offset,
        negated,
    })
}

fn solve_stuffed(lp: &StuffedLp, settings: &Settings) -> OracleOutcome {
    let n = lp.q.len();
    let p = to_clarabel_csc(&CscMatrix::zeros(n, n));
    let a = to_clarabel_csc(&lp.a);

    let mut cones = Vec::new();
    if lp.n_eq > 0 {
        cones.push(SupportedConeT::ZeroConeT(lp.n_eq));
    }
    if lp.n_ineq > 0 {
        cones.push(SupportedConeT::NonnegativeConeT(lp.n_ineq));
    }

    let clarabel_settings = DefaultSettingsBuilder::default()
        .verbose(settings.verbose)
        .max_iter(settings.max_iter)
        .time_limit(settings.time_limit)
        .tol_gap_abs(settings.tol_gap_abs)
        .tol_gap_rel(settings.tol_gap_rel)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&p, &lp.q, &a, &lp.b, &cones, clarabel_settings);
    solver.solve();

    let status: TerminationStatus = solver.solution.status.into();
    if status == TerminationStatus::Optimal {
        let raw: f64 = lp
            .q
            .iter()
            .zip(solver.solution.x.iter())
            .map(|(qi, xi)| qi * xi)
            .sum();
        let value = if lp.negated { -raw } else { raw } + lp.offset;
        OracleOutcome::optimal(value)
    } else {
        OracleOutcome {
            status,
            objective_value: None,
        }
    }
}

/// Create a CSC matrix from triplets (row, col, value).
fn csc_from_triplets(
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
) -> CscMatrix<f64> {
    if rows.is_empty() {
        return CscMatrix::zeros(nrows, ncols);
    }
    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), val) in rows.into_iter().zip(cols).zip(vals) {
        coo.push(row, col, val);
    }
    CscMatrix::from(&coo)
}

/// Convert nalgebra CSC to Clarabel CSC.
fn to_clarabel_csc(m: &CscMatrix<f64>) -> ClarabelCsc<f64> {
    ClarabelCsc::new(
        m.nrows(),
        m.ncols(),
        m.col_offsets().to_vec(),
        m.row_indices().to_vec(),
        m.values().to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Constraint, Objective, VariableBuilder};

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.verbose);
        assert_eq!(settings.max_iter, 100);
    }

    #[test]
    fn test_stuffing_shapes() {
        let mut model = Model::new();
        let x = model.add_variable(VariableBuilder::continuous().bounds(0.0, 2.0));
        let y = model.add_variable(VariableBuilder::continuous().lower(0.0));
        model.add_constraint(Constraint::eq(
            LinearExpr::variable(x) + LinearExpr::variable(y),
            1.0,
        ));
        model.add_constraint(Constraint::geq(LinearExpr::variable(y), 0.5));
        model.add_objective(Objective::minimize(LinearExpr::variable(x)));

        let lp = stuff_model(&model).unwrap();
        assert_eq!(lp.n_eq, 1);
        // One inequality row plus three bound rows.
        assert_eq!(lp.n_ineq, 4);
        assert_eq!(lp.q, vec![1.0, 0.0]);
        assert!(!lp.negated);
    }

    #[test]
    fn test_stuffing_requires_objective() {
        let model = Model::new();
        assert!(stuff_model(&model).is_err());
    }

    #[test]
    fn test_maximize_negates() {
        let mut model = Model::new();
        let x = model.add_variable(VariableBuilder::continuous().bounds(0.0, 1.0));
        model.add_objective(Objective::maximize(LinearExpr::term(3.0, x)));
        let lp = stuff_model(&model).unwrap();
        assert!(lp.negated);
        assert_eq!(lp.q, vec![-3.0]);
    }
}
