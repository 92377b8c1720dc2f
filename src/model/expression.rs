//! Linear expressions with an optional quadratic residual.

use std::collections::HashMap;
use std::ops::{Add, Mul, Neg, Sub};

use super::variable::VarId;

/// A quadratic term `coef * vars.0 * vars.1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTerm {
    /// Coefficient of the term.
    pub coef: f64,
    /// The two variables of the product.
    pub vars: (VarId, VarId),
}

impl QuadTerm {
    /// Create a quadratic term.
    pub fn new(coef: f64, a: VarId, b: VarId) -> Self {
        QuadTerm { coef, vars: (a, b) }
    }

    /// Whether the given variable participates in this term.
    pub fn involves(&self, var: VarId) -> bool {
        self.vars.0 == var || self.vars.1 == var
    }
}

/// A symbolic expression: sparse linear part, constant offset, and a
/// quadratic residual.
///
/// Zero coefficients are never stored; adding terms that cancel removes
/// the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    pub(crate) coeffs: HashMap<VarId, f64>,
    pub(crate) constant: f64,
    pub(crate) quadratic: Vec<QuadTerm>,
}

impl LinearExpr {
    /// The zero expression.
    pub fn zero() -> Self {
        LinearExpr::default()
    }

    /// A constant expression.
    pub fn constant(value: f64) -> Self {
        LinearExpr {
            constant: value,
            ..Default::default()
        }
    }

    /// The expression `1.0 * var`.
    pub fn variable(var: VarId) -> Self {
        LinearExpr::term(1.0, var)
    }

    /// The expression `coef * var`.
    pub fn term(coef: f64, var: VarId) -> Self {
        let mut coeffs = HashMap::new();
        if coef != 0.0 {
            coeffs.insert(var, coef);
        }
        LinearExpr {
            coeffs,
            ..Default::default()
        }
    }

    /// The expression `coef * a * b`.
    pub fn quad_term(coef: f64, a: VarId, b: VarId) -> Self {
        LinearExpr {
            quadratic: vec![QuadTerm::new(coef, a, b)],
            ..Default::default()
        }
    }

    /// Coefficient of a variable, or 0.0 if absent.
    pub fn coef(&self, var: VarId) -> f64 {
        self.coeffs.get(&var).copied().unwrap_or(0.0)
    }

    /// The constant offset.
    pub fn constant_value(&self) -> f64 {
        self.constant
    }

    /// The quadratic residual terms.
    pub fn quadratic(&self) -> &[QuadTerm] {
        &self.quadratic
    }

    /// Variables of the linear part, sorted by id.
    pub fn variables(&self) -> Vec<VarId> {
        let mut vars: Vec<VarId> = self.coeffs.keys().copied().collect();
        vars.sort();
        vars
    }

    /// Whether the expression has no quadratic residual.
    pub fn is_linear(&self) -> bool {
        self.quadratic.is_empty()
    }

    /// Add `coef * var` in place, removing the entry if it cancels.
    pub fn add_term(&mut self, coef: f64, var: VarId) {
        let entry = self.coeffs.entry(var).or_insert(0.0);
        *entry += coef;
        if *entry == 0.0 {
            self.coeffs.remove(&var);
        }
    }

    fn merge(&mut self, other: &LinearExpr, sign: f64) {
        for (&var, &coef) in &other.coeffs {
            self.add_term(sign * coef, var);
        }
        self.constant += sign * other.constant;
        self.quadratic.extend(other.quadratic.iter().map(|q| QuadTerm {
            coef: sign * q.coef,
            vars: q.vars,
        }));
    }
}

impl From<f64> for LinearExpr {
    fn from(value: f64) -> Self {
        LinearExpr::constant(value)
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::variable(var)
    }
}

// Operator implementations for value and reference receivers.

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self.merge(&rhs, 1.0);
        self
    }
}

impl Add<&LinearExpr> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: &LinearExpr) -> LinearExpr {
        self.merge(rhs, 1.0);
        self
    }
}

impl Add<LinearExpr> for &LinearExpr {
    type Output = LinearExpr;

    fn add(self, rhs: LinearExpr) -> LinearExpr {
        self.clone() + rhs
    }
}

impl Add for &LinearExpr {
    type Output = LinearExpr;

    fn add(self, rhs: &LinearExpr) -> LinearExpr {
        self.clone() + rhs
    }
}

impl Add<f64> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: f64) -> LinearExpr {
        self.constant += rhs;
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: LinearExpr) -> LinearExpr {
        self.merge(&rhs, -1.0);
        self
    }
}

impl Sub<&LinearExpr> for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: &LinearExpr) -> LinearExpr {
        self.merge(rhs, -1.0);
        self
    }
}

impl Sub<LinearExpr> for &LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self.clone() - rhs
    }
}

impl Sub for &LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: &LinearExpr) -> LinearExpr {
        self.clone() - rhs
    }
}

impl Sub<f64> for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: f64) -> LinearExpr {
        self.constant -= rhs;
        self
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(mut self) -> LinearExpr {
        for coef in self.coeffs.values_mut() {
            *coef = -*coef;
        }
        self.constant = -self.constant;
        for q in &mut self.quadratic {
            q.coef = -q.coef;
        }
        self
    }
}

impl Neg for &LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        -self.clone()
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, rhs: f64) -> LinearExpr {
        if rhs == 0.0 {
            return LinearExpr {
                quadratic: Vec::new(),
                ..Default::default()
            };
        }
        for coef in self.coeffs.values_mut() {
            *coef *= rhs;
        }
        self.constant *= rhs;
        for q in &mut self.quadratic {
            q.coef *= rhs;
        }
        self
    }
}

impl Mul<f64> for &LinearExpr {
    type Output = LinearExpr;

    fn mul(self, rhs: f64) -> LinearExpr {
        self.clone() * rhs
    }
}

impl Mul<LinearExpr> for f64 {
    type Output = LinearExpr;

    fn mul(self, rhs: LinearExpr) -> LinearExpr {
        rhs * self
    }
}

impl Mul<&LinearExpr> for f64 {
    type Output = LinearExpr;

    fn mul(self, rhs: &LinearExpr) -> LinearExpr {
        rhs * self
    }
}
