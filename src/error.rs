//! Error types for fmerust.

use thiserror::Error;

/// Error type for fmerust operations.
#[derive(Debug, Error)]
pub enum FmeError {
    /// The elimination was configured incorrectly.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A variable slated for elimination appears in a nonlinear term.
    #[error("Cannot eliminate variable '{var}': it appears in a nonlinear term")]
    UnsupportedNonlinearVariable {
        /// Name of the offending variable.
        var: String,
    },

    /// Integer arithmetic was requested but the data is not integral.
    #[error(
        "{context} has non-integer value {value}; disable integer arithmetic, \
         raise integer_tolerance, or make the data integral"
    )]
    NonIntegerData {
        /// Where the value was encountered.
        context: String,
        /// The offending value.
        value: f64,
    },

    /// Elimination produced a constraint of the form 0 >= c with c > 0.
    #[error("Model is infeasible: elimination produced a trivially false constraint")]
    ModelInfeasible,

    /// A user-supplied constraint filter callback failed.
    #[error("Constraint filter callback failed on constraint with bound {lower}: {body}")]
    FilterCallback {
        /// Lower bound of the constraint being filtered.
        lower: f64,
        /// Rendered body of the constraint being filtered.
        body: String,
        /// The callback's error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The post-processing solver returned an unusable status.
    #[error("Solve failed while post-processing constraint '{constraint}': {status}")]
    SolveFailed {
        /// Name of the constraint being probed.
        constraint: String,
        /// Status reported by the solver.
        status: String,
    },
}

/// Result type for fmerust operations.
pub type Result<T> = std::result::Result<T, FmeError>;
