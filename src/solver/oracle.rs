//! The solver seam used by the redundancy post-processor.

use std::fmt;

use crate::model::Model;

/// Solver termination status, reduced to what the post-processor
/// distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationStatus {
    /// Optimal solution found.
    Optimal,
    /// Objective unbounded below.
    Unbounded,
    /// Any other outcome, with a description.
    Other(String),
}

impl fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationStatus::Optimal => f.write_str("Optimal"),
            TerminationStatus::Unbounded => f.write_str("Unbounded"),
            TerminationStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Outcome of a solve.
#[derive(Debug, Clone)]
pub struct OracleOutcome {
    /// Termination status.
    pub status: TerminationStatus,
    /// Objective value, when the solve reached optimality.
    pub objective_value: Option<f64>,
}

impl OracleOutcome {
    /// An optimal outcome with the given objective value.
    pub fn optimal(value: f64) -> Self {
        OracleOutcome {
            status: TerminationStatus::Optimal,
            objective_value: Some(value),
        }
    }

    /// An unbounded outcome.
    pub fn unbounded() -> Self {
        OracleOutcome {
            status: TerminationStatus::Unbounded,
            objective_value: None,
        }
    }

    /// Any other outcome.
    pub fn other(status: impl Into<String>) -> Self {
        OracleOutcome {
            status: TerminationStatus::Other(status.into()),
            objective_value: None,
        }
    }
}

/// Something that can minimize the active objective of a model subject
/// to its active constraints and variable bounds.
///
/// Implementations report failures through
/// [`TerminationStatus::Other`] rather than a separate error channel.
pub trait SolverOracle {
    /// Solve the model as currently configured.
    fn solve(&mut self, model: &Model) -> OracleOutcome;
}
