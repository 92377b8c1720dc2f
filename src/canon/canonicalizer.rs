//! Constraint canonicalization.
//!
//! A constraint `lower <= body <= upper` becomes one `>=` constraint per
//! finite bound: the lower side keeps the body's coefficients, the upper
//! side negates them. The body's constant offset is folded into the
//! bound, so canonical constraints carry no constant term.

use std::collections::HashMap;

use super::constraint::CanonicalConstraint;
use crate::error::{FmeError, Result};
use crate::model::{LinearExpr, Model, QuadTerm, VarId, Variable};

/// Canonicalize a bounded constraint body.
///
/// Returns one constraint per finite bound, lower side first. An
/// equality (`lower == upper`) is the two-sided case and yields both.
pub fn canonicalize(
    body: &LinearExpr,
    lower: Option<f64>,
    upper: Option<f64>,
) -> Vec<CanonicalConstraint> {
    let mut out = Vec::new();

    if let Some(lower) = lower {
        let map: HashMap<VarId, f64> = body
            .variables()
            .into_iter()
            .map(|v| (v, body.coef(v)))
            .collect();
        out.push(CanonicalConstraint::new(
            map,
            lower - body.constant_value(),
            body.quadratic().to_vec(),
        ));
    }

    if let Some(upper) = upper {
        let map: HashMap<VarId, f64> = body
            .variables()
            .into_iter()
            .map(|v| (v, -body.coef(v)))
            .collect();
        let quadratic = body
            .quadratic()
            .iter()
            .map(|q| QuadTerm {
                coef: -q.coef,
                vars: q.vars,
            })
            .collect();
        out.push(CanonicalConstraint::new(
            map,
            body.constant_value() - upper,
            quadratic,
        ));
    }

    out
}

/// Unit constraints for a variable's finite bounds: `x >= lb` and
/// `-x >= -ub`, lower bound first.
pub fn synthesize_bound_constraints(var: &Variable) -> Vec<CanonicalConstraint> {
    let mut out = Vec::new();
    if let Some(lb) = var.lower() {
        let mut map = HashMap::new();
        map.insert(var.id(), 1.0);
        out.push(CanonicalConstraint::new(map, lb, vec![]));
    }
    if let Some(ub) = var.upper() {
        let mut map = HashMap::new();
        map.insert(var.id(), -1.0);
        out.push(CanonicalConstraint::new(map, -ub, vec![]));
    }
    out
}

/// Fail if any elimination target appears in a quadratic residual.
///
/// Targets are checked in the given order so the reported variable is
/// deterministic.
pub fn check_nonlinear_targets(
    constraints: &[CanonicalConstraint],
    targets: &[VarId],
    model: &Model,
) -> Result<()> {
    for &target in targets {
        for constraint in constraints {
            if constraint.quadratic().iter().any(|q| q.involves(target)) {
                return Err(FmeError::UnsupportedNonlinearVariable {
                    var: model.variable(target).name().to_string(),
                });
            }
        }
    }
    Ok(())
}
