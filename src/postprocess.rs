//! LP-based redundancy post-processing of projected constraints.
//!
//! Each kept constraint is probed one at a time: with the constraint
//! itself deactivated, minimize its slack `body - lower` over the rest
//! of the model. If the minimum is nonnegative (up to `tolerance`) the
//! constraint can never be violated and is removed; if the probe is
//! unbounded the constraint does real work and stays.

use crate::elimination::Projection;
use crate::error::{FmeError, Result};
use crate::model::{Domain, LinearExpr, Model, Objective, ObjectiveId, VarId};
use crate::solver::{SolverOracle, TerminationStatus};

/// Probe every constraint of `projection` and remove the redundant ones
/// from `model`.
///
/// Integer and binary variables are relaxed to continuous and active
/// objectives are deactivated for the duration of the pass; both are
/// restored before returning, on success and on error alike.
pub fn post_process_projected_constraints(
    model: &mut Model,
    oracle: &mut dyn SolverOracle,
    projection: &Projection,
    tolerance: f64,
) -> Result<()> {
    let state = acquire(model);
    let result = probe_constraints(model, oracle, projection, tolerance, state.probe);
    restore(model, state);
    result
}

struct SavedState {
    domains: Vec<(VarId, Domain)>,
    objectives: Vec<ObjectiveId>,
    probe: ObjectiveId,
}

fn acquire(model: &mut Model) -> SavedState {
    let integer_vars: Vec<VarId> = model
        .variables()
        .iter()
        .filter(|v| v.is_integer())
        .map(|v| v.id())
        .collect();
    let mut domains = Vec::with_capacity(integer_vars.len());
    for var in integer_vars {
        let old = model.set_domain(var, Domain::Continuous);
        domains.push((var, old));
    }

    let objectives = model.active_objectives();
    for &id in &objectives {
        model.objective_mut(id).unwrap().deactivate();
    }

    let probe = model.add_objective(
        Objective::minimize(LinearExpr::zero()).with_name("_fme_post_process_obj"),
    );

    SavedState {
        domains,
        objectives,
        probe,
    }
}

fn restore(model: &mut Model, state: SavedState) {
    model.remove_objective(state.probe);
    for &id in &state.objectives {
        if let Some(obj) = model.objective_mut(id) {
            obj.activate();
        }
    }
    for (var, domain) in state.domains {
        model.set_domain(var, domain);
    }
}

fn probe_constraints(
    model: &mut Model,
    oracle: &mut dyn SolverOracle,
    projection: &Projection,
    tolerance: f64,
    probe: ObjectiveId,
) -> Result<()> {
    for &id in projection.constraint_ids() {
        let Some(constraint) = model.constraint(id) else {
            continue;
        };
        // Constraints someone already deactivated are left alone.
        if !constraint.is_active() {
            continue;
        }

        let name = constraint.name().to_string();
        let slack = constraint.body().clone() - constraint.lower().unwrap_or(0.0);
        model.constraint_mut(id).unwrap().deactivate();
        model.objective_mut(probe).unwrap().set_body(slack);

        let outcome = oracle.solve(model);
        let minimum = match outcome.status {
            TerminationStatus::Unbounded => f64::NEG_INFINITY,
            TerminationStatus::Optimal => match outcome.objective_value {
                Some(value) => value,
                None => {
                    model.constraint_mut(id).unwrap().activate();
                    return Err(FmeError::SolveFailed {
                        constraint: name,
                        status: "Optimal with no objective value".to_string(),
                    });
                }
            },
            TerminationStatus::Other(status) => {
                model.constraint_mut(id).unwrap().activate();
                log::error!(
                    "Failed to solve the redundancy probe for constraint '{name}': {status}"
                );
                return Err(FmeError::SolveFailed {
                    constraint: name,
                    status,
                });
            }
        };

        if minimum >= tolerance {
            log::debug!("Removing redundant constraint '{name}' (slack minimum {minimum})");
            model.remove_constraint(id);
        } else {
            model.constraint_mut(id).unwrap().activate();
        }
    }
    Ok(())
}
