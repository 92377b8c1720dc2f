//! Decision variables.

use std::fmt;

/// Identifier for a variable within a model.
///
/// Ids are assigned sequentially when variables are added, so iteration
/// ordered by id is deterministic across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) u32);

impl VarId {
    /// The raw index of this variable.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Variable domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Real-valued.
    Continuous,
    /// Integer-valued.
    Integer,
    /// 0/1 valued.
    Binary,
}

/// A decision variable.
#[derive(Debug, Clone)]
pub struct Variable {
    pub(crate) id: VarId,
    pub(crate) name: String,
    pub(crate) lower: Option<f64>,
    pub(crate) upper: Option<f64>,
    pub(crate) domain: Domain,
}

impl Variable {
    /// The variable's id.
    pub fn id(&self) -> VarId {
        self.id
    }

    /// The variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower bound, if any.
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    /// Upper bound, if any.
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// The variable's domain.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Whether the domain is integer or binary.
    pub fn is_integer(&self) -> bool {
        matches!(self.domain, Domain::Integer | Domain::Binary)
    }
}

/// Builder for variables.
///
/// # Example
///
/// ```
/// use fmerust::prelude::*;
///
/// let mut model = Model::new();
/// let x = model.add_variable(VariableBuilder::continuous().name("x").bounds(0.0, 10.0));
/// let y = model.add_variable(VariableBuilder::integer().name("y").lower(0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableBuilder {
    name: Option<String>,
    lower: Option<f64>,
    upper: Option<f64>,
    domain: Option<Domain>,
}

impl VariableBuilder {
    /// Start building a continuous variable.
    pub fn continuous() -> Self {
        VariableBuilder {
            domain: Some(Domain::Continuous),
            ..Default::default()
        }
    }

    /// Start building an integer variable.
    pub fn integer() -> Self {
        VariableBuilder {
            domain: Some(Domain::Integer),
            ..Default::default()
        }
    }

    /// Start building a binary variable. Bounds default to [0, 1].
    pub fn binary() -> Self {
        VariableBuilder {
            domain: Some(Domain::Binary),
            lower: Some(0.0),
            upper: Some(1.0),
            ..Default::default()
        }
    }

    /// Set the variable name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the lower bound.
    pub fn lower(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }

    /// Set the upper bound.
    pub fn upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }

    /// Set both bounds.
    pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = Some(lower);
        self.upper = Some(upper);
        self
    }

    pub(crate) fn build(self, id: VarId) -> Variable {
        let name = self.name.unwrap_or_else(|| format!("x{}", id.0));
        Variable {
            id,
            name,
            lower: self.lower,
            upper: self.upper,
            domain: self.domain.unwrap_or(Domain::Continuous),
        }
    }
}
