//! Redundancy filtering of projected constraints.

use std::fmt;

use crate::canon::CanonicalConstraint;
use crate::error::{FmeError, Result};
use crate::model::Model;

/// Return type of a user filter callback: `Ok(true)` keeps the
/// constraint, `Ok(false)` drops it.
pub type FilterResult = std::result::Result<bool, Box<dyn std::error::Error + Send + Sync>>;

/// Decides which constraints survive after elimination.
///
/// The filter runs once, over the final constraint set; intermediate
/// rounds keep every generated constraint as combination input.
pub enum ConstraintFilter {
    /// Drop constraints already implied by variable bounds. The default.
    ImpliedByBounds,
    /// Keep everything.
    NoFilter,
    /// User-supplied predicate.
    Callback(Box<dyn Fn(&Model, &CanonicalConstraint) -> FilterResult>),
}

impl Default for ConstraintFilter {
    fn default() -> Self {
        ConstraintFilter::ImpliedByBounds
    }
}

impl fmt::Debug for ConstraintFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintFilter::ImpliedByBounds => f.write_str("ImpliedByBounds"),
            ConstraintFilter::NoFilter => f.write_str("NoFilter"),
            ConstraintFilter::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl ConstraintFilter {
    /// Wrap a closure as a filter.
    pub fn callback(
        f: impl Fn(&Model, &CanonicalConstraint) -> FilterResult + 'static,
    ) -> Self {
        ConstraintFilter::Callback(Box::new(f))
    }

    /// Whether `constraint` should be kept.
    pub(crate) fn keep(&self, model: &Model, constraint: &CanonicalConstraint) -> Result<bool> {
        match self {
            ConstraintFilter::ImpliedByBounds => {
                Ok(check_var_bounds_filter(model, constraint))
            }
            ConstraintFilter::NoFilter => Ok(true),
            ConstraintFilter::Callback(f) => match f(model, constraint) {
                Ok(keep) => Ok(keep),
                Err(source) => {
                    let body = constraint.display(model);
                    log::error!(
                        "Problem calling the constraint filter on constraint \
                         {} >= {}",
                        body,
                        constraint.lower()
                    );
                    Err(FmeError::FilterCallback {
                        lower: constraint.lower(),
                        body,
                        source,
                    })
                }
            },
        }
    }
}

/// Keep a constraint unless the variable bounds already imply it.
///
/// The minimum value of the linear part uses each variable's lower bound
/// for positive coefficients and upper bound for negative ones. A
/// missing needed bound makes the minimum unbounded below, so the
/// constraint is kept. Quadratic residuals are ignored.
pub fn check_var_bounds_filter(model: &Model, constraint: &CanonicalConstraint) -> bool {
    let mut min_lhs = 0.0;
    for var in constraint.variables() {
        let coef = constraint.coef(var).unwrap_or(0.0);
        let v = model.variable(var);
        let bound = if coef > 0.0 { v.lower() } else { v.upper() };
        match bound {
            Some(b) => min_lhs += coef * b,
            None => return true,
        }
    }
    min_lhs < constraint.lower()
}
