//! Fourier-Motzkin elimination of variables from a linear constraint
//! system.
//!
//! The transformation rewrites every active bounded constraint into
//! `>=` form, then eliminates the requested variables one at a time by
//! combining each pair of upper and lower bounds on the variable. The
//! surviving constraints are stored back on the model under a named
//! constraint list and the originals are deactivated.

use log::Level;

use crate::arith::{as_integer, lcm, Arithmetic};
use crate::canon::{
    canonicalize, check_nonlinear_targets, synthesize_bound_constraints, CanonicalConstraint,
};
use crate::error::{FmeError, Result};
use crate::filter::ConstraintFilter;
use crate::model::{Constraint, ConstraintId, Model, VarId};

/// Default name for the stored projected constraints.
pub const DEFAULT_PROJECTED_NAME: &str = "_fme_projected_constraints";

/// Configuration for the elimination.
#[derive(Debug, Default)]
pub struct FmeConfig {
    /// Variables to project out, processed from the back of the list.
    pub vars_to_eliminate: Vec<VarId>,
    /// Redundancy filter applied to the final constraint set.
    pub constraint_filter: ConstraintFilter,
    /// Use validated integer arithmetic instead of floating point.
    pub do_integer_arithmetic: bool,
    /// Magnitude below which a coefficient counts as zero.
    pub zero_tolerance: f64,
    /// Maximum allowed distance from an integer in integer arithmetic.
    pub integer_tolerance: f64,
    /// Name for the stored output. Defaults to
    /// [`DEFAULT_PROJECTED_NAME`], uniquified if taken.
    pub projected_constraints_name: Option<String>,
    /// Log the per-constraint elimination trace at info level.
    pub verbose: bool,
}

/// Handle to the stored projection output.
#[derive(Debug, Clone)]
pub struct Projection {
    name: String,
    constraints: Vec<ConstraintId>,
}

impl Projection {
    /// Name the constraints were stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the kept constraints, in generation order.
    pub fn constraint_ids(&self) -> &[ConstraintId] {
        &self.constraints
    }
}

/// The Fourier-Motzkin elimination transformation.
///
/// # Example
///
/// ```
/// use fmerust::prelude::*;
///
/// let mut model = Model::new();
/// let x = model.add_variable(VariableBuilder::continuous().name("x"));
/// let y = model.add_variable(VariableBuilder::continuous().name("y"));
/// model.add_constraint(Constraint::geq(
///     LinearExpr::variable(x) + LinearExpr::variable(y),
///     2.0,
/// ));
/// model.add_constraint(Constraint::leq(LinearExpr::variable(y), 1.0));
///
/// let projection = FourierMotzkinElimination::new(vec![y])
///     .apply_to(&mut model)
///     .unwrap();
/// assert_eq!(projection.constraint_ids().len(), 1);
/// ```
#[derive(Debug)]
pub struct FourierMotzkinElimination {
    config: FmeConfig,
}

impl FourierMotzkinElimination {
    /// Create a transformation that eliminates `vars`, with default
    /// configuration otherwise.
    pub fn new(vars: Vec<VarId>) -> Self {
        FourierMotzkinElimination {
            config: FmeConfig {
                vars_to_eliminate: vars,
                ..Default::default()
            },
        }
    }

    /// Create a transformation from a full configuration.
    pub fn from_config(config: FmeConfig) -> Self {
        FourierMotzkinElimination { config }
    }

    /// Set the redundancy filter.
    pub fn with_filter(mut self, filter: ConstraintFilter) -> Self {
        self.config.constraint_filter = filter;
        self
    }

    /// Enable validated integer arithmetic.
    pub fn with_integer_arithmetic(mut self) -> Self {
        self.config.do_integer_arithmetic = true;
        self
    }

    /// Set the zero tolerance for floating-point arithmetic.
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        self.config.zero_tolerance = tolerance;
        self
    }

    /// Set the integer tolerance for integer arithmetic.
    pub fn with_integer_tolerance(mut self, tolerance: f64) -> Self {
        self.config.integer_tolerance = tolerance;
        self
    }

    /// Store the output under this name instead of the default.
    pub fn with_projected_constraints_name(mut self, name: impl Into<String>) -> Self {
        self.config.projected_constraints_name = Some(name.into());
        self
    }

    /// Log the per-constraint elimination trace at info level.
    pub fn verbose(mut self) -> Self {
        self.config.verbose = true;
        self
    }

    /// Run the elimination on `model`.
    ///
    /// On success the original active constraints are deactivated and
    /// the projected constraints are stored on the model under the
    /// configured name. On error the model is untouched.
    pub fn apply_to(&self, model: &mut Model) -> Result<Projection> {
        self.validate(model)?;

        let arith = if self.config.do_integer_arithmetic {
            Arithmetic::Exact {
                integer_tolerance: self.config.integer_tolerance,
            }
        } else {
            Arithmetic::Tolerant {
                zero_tolerance: self.config.zero_tolerance,
            }
        };

        // Collect and canonicalize without touching the model.
        let original_ids = model.active_constraints();
        let mut constraints = Vec::new();
        for &id in &original_ids {
            let c = model.constraint(id).unwrap();
            constraints.extend(canonicalize(c.body(), c.lower(), c.upper()));
        }
        for &var in &self.config.vars_to_eliminate {
            constraints.extend(synthesize_bound_constraints(model.variable(var)));
        }

        check_nonlinear_targets(&constraints, &self.config.vars_to_eliminate, model)?;

        let mut queue = self.elimination_queue(&constraints, model);
        let total = queue.len();
        let mut round = 0;

        while let Some(var) = queue.pop() {
            round += 1;
            log::info!(
                "Projecting out variable '{}' ({round} of {total})",
                model.variable(var).name()
            );
            constraints = self.eliminate_one(constraints, var, &arith, model)?;
            log::debug!(
                "{} constraints after eliminating '{}'",
                constraints.len(),
                model.variable(var).name()
            );
        }

        // Constant constraints are decided here, before the filter sees
        // anything.
        let mut surviving = Vec::with_capacity(constraints.len());
        for constraint in constraints {
            if constraint.is_constant() {
                if constraint.lower() > 0.0 {
                    return Err(FmeError::ModelInfeasible);
                }
                continue;
            }
            surviving.push(constraint);
        }

        let mut kept = Vec::with_capacity(surviving.len());
        for constraint in surviving {
            if self.config.constraint_filter.keep(model, &constraint)? {
                kept.push(constraint);
            }
        }

        // All model mutation happens after the last fallible step.
        for &id in &original_ids {
            model.constraint_mut(id).unwrap().deactivate();
        }
        Ok(self.store(model, kept))
    }

    fn validate(&self, model: &Model) -> Result<()> {
        if self.config.vars_to_eliminate.is_empty() {
            return Err(FmeError::Configuration(
                "no variables to eliminate were specified".to_string(),
            ));
        }
        if let Some(name) = &self.config.projected_constraints_name {
            if model.component_name_taken(name) {
                return Err(FmeError::Configuration(format!(
                    "projected_constraints_name was specified as '{name}', \
                     but this name is already in use on the model"
                )));
            }
        }
        Ok(())
    }

    /// Targets in caller order, deduplicated, restricted to variables
    /// that actually appear. Processing pops from the back.
    fn elimination_queue(
        &self,
        constraints: &[CanonicalConstraint],
        model: &Model,
    ) -> Vec<VarId> {
        let mut queue = Vec::with_capacity(self.config.vars_to_eliminate.len());
        for &var in &self.config.vars_to_eliminate {
            if queue.contains(&var) {
                continue;
            }
            if constraints.iter().any(|c| c.coef(var).is_some()) {
                queue.push(var);
            } else {
                log::debug!(
                    "Variable '{}' does not appear in any constraint; \
                     nothing to project",
                    model.variable(var).name()
                );
            }
        }
        queue
    }

    /// One elimination round: partition by the sign of `var`'s
    /// coefficient, scale each participant so the coefficient is an
    /// exact cancelling pair, then combine every upper bound with every
    /// lower bound.
    fn eliminate_one(
        &self,
        constraints: Vec<CanonicalConstraint>,
        var: VarId,
        arith: &Arithmetic,
        model: &Model,
    ) -> Result<Vec<CanonicalConstraint>> {
        let mut upper = Vec::new();
        let mut lower = Vec::new();
        let mut next = Vec::new();

        for constraint in constraints {
            match constraint.coef(var) {
                Some(coef) if coef < 0.0 => upper.push((coef, constraint)),
                Some(coef) if coef > 0.0 => lower.push((coef, constraint)),
                _ => next.push(constraint),
            }
        }

        let magnitude = match arith {
            Arithmetic::Tolerant { .. } => 1.0,
            Arithmetic::Exact { integer_tolerance } => {
                let mut coefs = Vec::with_capacity(upper.len() + lower.len());
                for (coef, _) in upper.iter().chain(lower.iter()) {
                    coefs.push(as_integer(*coef, *integer_tolerance, || {
                        format!("coefficient of {}", model.variable(var).name())
                    })?);
                }
                lcm(&coefs) as f64
            }
        };

        let mut scaled_upper = Vec::with_capacity(upper.len());
        for (coef, constraint) in upper {
            let mut scaled = constraint.scaled(magnitude / -coef, arith, model)?;
            scaled.set_coef(var, -magnitude);
            scaled_upper.push(scaled);
        }
        let mut scaled_lower = Vec::with_capacity(lower.len());
        for (coef, constraint) in lower {
            let mut scaled = constraint.scaled(magnitude / coef, arith, model)?;
            scaled.set_coef(var, magnitude);
            scaled_lower.push(scaled);
        }

        for u in &scaled_upper {
            for l in &scaled_lower {
                let combined = u.combine(l, arith, model)?;
                self.trace(model, &combined);
                next.push(combined);
            }
        }
        Ok(next)
    }

    fn trace(&self, model: &Model, constraint: &CanonicalConstraint) {
        let level = if self.config.verbose {
            Level::Info
        } else {
            Level::Debug
        };
        log::log!(
            level,
            "generated: {} >= {}",
            constraint.display(model),
            constraint.lower()
        );
    }

    fn store(&self, model: &mut Model, kept: Vec<CanonicalConstraint>) -> Projection {
        let name = match &self.config.projected_constraints_name {
            Some(name) => name.clone(),
            None => model.unique_component_name(DEFAULT_PROJECTED_NAME),
        };
        let mut ids = Vec::with_capacity(kept.len());
        for (i, constraint) in kept.into_iter().enumerate() {
            let stored = Constraint::geq(constraint.body(), constraint.lower())
                .with_name(format!("{}[{}]", name, i + 1));
            ids.push(model.add_constraint(stored));
        }
        log::info!("Storing {} projected constraints as '{}'", ids.len(), name);
        model.add_constraint_list(&name, ids.clone());
        Projection {
            name,
            constraints: ids,
        }
    }
}
