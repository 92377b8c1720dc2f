//! Constraints and objectives.

use std::fmt;

use super::expression::LinearExpr;

/// Identifier for a constraint within a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub(crate) u32);

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A constraint `lower <= body <= upper`, with either bound optional.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub(crate) name: Option<String>,
    pub(crate) body: LinearExpr,
    pub(crate) lower: Option<f64>,
    pub(crate) upper: Option<f64>,
    pub(crate) active: bool,
}

impl Constraint {
    /// `body >= lower`.
    pub fn geq(body: LinearExpr, lower: f64) -> Self {
        Constraint {
            name: None,
            body,
            lower: Some(lower),
            upper: None,
            active: true,
        }
    }

    /// `body <= upper`.
    pub fn leq(body: LinearExpr, upper: f64) -> Self {
        Constraint {
            name: None,
            body,
            lower: None,
            upper: Some(upper),
            active: true,
        }
    }

    /// `body == value`.
    pub fn eq(body: LinearExpr, value: f64) -> Self {
        Constraint {
            name: None,
            body,
            lower: Some(value),
            upper: Some(value),
            active: true,
        }
    }

    /// `lower <= body <= upper`.
    pub fn ranged(body: LinearExpr, lower: f64, upper: f64) -> Self {
        Constraint {
            name: None,
            body,
            lower: Some(lower),
            upper: Some(upper),
            active: true,
        }
    }

    /// Set an explicit name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The constraint's name. Unnamed constraints are named when added
    /// to a model.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// The constraint body.
    pub fn body(&self) -> &LinearExpr {
        &self.body
    }

    /// Lower bound, if any.
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    /// Upper bound, if any.
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Whether the constraint is an equality.
    pub fn is_equality(&self) -> bool {
        match (self.lower, self.upper) {
            (Some(l), Some(u)) => l == u,
            _ => false,
        }
    }

    /// Whether the constraint participates in solves and transformations.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Re-enable the constraint.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Hide the constraint from solves and transformations.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Objective sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Minimize the objective body.
    Minimize,
    /// Maximize the objective body.
    Maximize,
}

/// Identifier for an objective within a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectiveId(pub(crate) u32);

/// An objective function.
#[derive(Debug, Clone)]
pub struct Objective {
    pub(crate) name: Option<String>,
    pub(crate) body: LinearExpr,
    pub(crate) sense: Sense,
    pub(crate) active: bool,
}

impl Objective {
    /// Minimize `body`.
    pub fn minimize(body: LinearExpr) -> Self {
        Objective {
            name: None,
            body,
            sense: Sense::Minimize,
            active: true,
        }
    }

    /// Maximize `body`.
    pub fn maximize(body: LinearExpr) -> Self {
        Objective {
            name: None,
            body,
            sense: Sense::Maximize,
            active: true,
        }
    }

    /// Set an explicit name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The objective's name.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// The objective body.
    pub fn body(&self) -> &LinearExpr {
        &self.body
    }

    /// Replace the objective body.
    pub fn set_body(&mut self, body: LinearExpr) {
        self.body = body;
    }

    /// The objective sense.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Whether the objective participates in solves.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Re-enable the objective.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Hide the objective from solves.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
