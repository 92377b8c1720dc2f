//! The canonical `>=` constraint form used throughout elimination.

use std::collections::HashMap;

use crate::arith::Arithmetic;
use crate::error::Result;
use crate::model::{LinearExpr, Model, QuadTerm, VarId};

/// A constraint in the form `coefs . vars + residual >= lower`.
///
/// The coefficient map never stores zero entries, so "variable absent"
/// and "coefficient zero" are the same condition. The quadratic residual
/// is carried through untouched by scaling partners that do not involve
/// it; scaling multiplies residual coefficients like any other.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalConstraint {
    map: HashMap<VarId, f64>,
    lower: f64,
    quadratic: Vec<QuadTerm>,
}

impl CanonicalConstraint {
    /// Build a canonical constraint, dropping zero coefficients.
    pub fn new(map: HashMap<VarId, f64>, lower: f64, quadratic: Vec<QuadTerm>) -> Self {
        let map = map.into_iter().filter(|&(_, c)| c != 0.0).collect();
        CanonicalConstraint {
            map,
            lower,
            quadratic,
        }
    }

    /// Coefficient of `var`, or `None` if it does not appear.
    pub fn coef(&self, var: VarId) -> Option<f64> {
        self.map.get(&var).copied()
    }

    /// The lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// The quadratic residual.
    pub fn quadratic(&self) -> &[QuadTerm] {
        &self.quadratic
    }

    /// Variables of the linear part, sorted by id.
    pub fn variables(&self) -> Vec<VarId> {
        let mut vars: Vec<VarId> = self.map.keys().copied().collect();
        vars.sort();
        vars
    }

    /// Whether both the linear part and the residual are empty.
    pub fn is_constant(&self) -> bool {
        self.map.is_empty() && self.quadratic.is_empty()
    }

    /// Rebuild the body as a model expression (no constant offset).
    pub fn body(&self) -> LinearExpr {
        let mut body = LinearExpr::zero();
        for var in self.variables() {
            body.add_term(self.map[&var], var);
        }
        for q in &self.quadratic {
            body = body + LinearExpr::quad_term(q.coef, q.vars.0, q.vars.1);
        }
        body
    }

    /// Render the body for log and error messages, for example
    /// `2*x + -1*y + 3*x*y`.
    pub fn display(&self, model: &Model) -> String {
        let mut parts: Vec<String> = self
            .variables()
            .iter()
            .map(|&v| format!("{}*{}", self.map[&v], model.variable(v).name()))
            .collect();
        for q in &self.quadratic {
            parts.push(format!(
                "{}*{}*{}",
                q.coef,
                model.variable(q.vars.0).name(),
                model.variable(q.vars.1).name()
            ));
        }
        if parts.is_empty() {
            "0".to_string()
        } else {
            parts.join(" + ")
        }
    }

    /// Multiply the whole constraint by a positive scalar.
    pub(crate) fn scaled(
        &self,
        scalar: f64,
        arith: &Arithmetic,
        model: &Model,
    ) -> Result<CanonicalConstraint> {
        let mut map = HashMap::with_capacity(self.map.len());
        for var in self.variables() {
            let coef = arith.scale(scalar, self.map[&var], || {
                format!("coefficient of {}", model.variable(var).name())
            })?;
            if coef != 0.0 {
                map.insert(var, coef);
            }
        }
        let lower = arith.scale(scalar, self.lower, || "constraint bound".to_string())?;
        let quadratic = self
            .quadratic
            .iter()
            .map(|q| QuadTerm {
                coef: scalar * q.coef,
                vars: q.vars,
            })
            .collect();
        Ok(CanonicalConstraint {
            map,
            lower,
            quadratic,
        })
    }

    /// Coefficient-wise and bound-wise sum with `other`; residuals are
    /// concatenated.
    pub(crate) fn combine(
        &self,
        other: &CanonicalConstraint,
        arith: &Arithmetic,
        model: &Model,
    ) -> Result<CanonicalConstraint> {
        let mut vars: Vec<VarId> = self.map.keys().chain(other.map.keys()).copied().collect();
        vars.sort();
        vars.dedup();

        let mut map = HashMap::with_capacity(vars.len());
        for var in vars {
            let a = self.map.get(&var).copied().unwrap_or(0.0);
            let b = other.map.get(&var).copied().unwrap_or(0.0);
            let coef = arith.add(a, b, || {
                format!("coefficient of {}", model.variable(var).name())
            })?;
            if coef != 0.0 {
                map.insert(var, coef);
            }
        }
        let lower = arith.add(self.lower, other.lower, || "constraint bound".to_string())?;
        let mut quadratic = self.quadratic.clone();
        quadratic.extend(other.quadratic.iter().copied());
        Ok(CanonicalConstraint {
            map,
            lower,
            quadratic,
        })
    }

    /// Overwrite a coefficient, removing the entry when zero.
    pub(crate) fn set_coef(&mut self, var: VarId, coef: f64) {
        if coef == 0.0 {
            self.map.remove(&var);
        } else {
            self.map.insert(var, coef);
        }
    }
}
