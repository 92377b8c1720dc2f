//! # fmerust
//!
//! Fourier-Motzkin elimination for linear constraint systems.
//!
//! fmerust projects chosen variables out of a system of linear
//! constraints, producing an equivalent system over the remaining
//! variables. An optional LP-based post-processing pass prunes the
//! redundant constraints the projection inevitably generates.
//!
//! ## Quick Start
//!
//! ```
//! use fmerust::prelude::*;
//!
//! let mut model = Model::new();
//! let x = model.add_variable(VariableBuilder::continuous().name("x"));
//! let y = model.add_variable(VariableBuilder::continuous().name("y").bounds(0.0, 3.0));
//!
//! model.add_constraint(Constraint::geq(
//!     LinearExpr::variable(x) + LinearExpr::variable(y),
//!     2.0,
//! ));
//!
//! let projection = FourierMotzkinElimination::new(vec![y])
//!     .apply_to(&mut model)
//!     .unwrap();
//!
//! for &id in projection.constraint_ids() {
//!     let c = model.constraint(id).unwrap();
//!     println!("{} >= {:?}", c.name(), c.lower());
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Model layer**: variables, linear expressions with a quadratic
//!   residual, constraints, and objectives
//! - **Canonicalization** rewrites every bounded constraint into
//!   `coefs . vars >= lower` form
//! - **Elimination engine** combines upper and lower bounds on each
//!   target variable, in floating-point or validated integer arithmetic
//! - **Redundancy filter** drops constraints already implied by
//!   variable bounds, or defers to a user callback
//! - **Post-processor** probes each kept constraint with an LP solve
//!   behind the `SolverOracle` seam (Clarabel bundled)

pub mod arith;
pub mod canon;
pub mod elimination;
pub mod error;
pub mod filter;
pub mod model;
pub mod postprocess;
pub mod solver;

/// Prelude module for convenient imports.
///
/// ```
/// use fmerust::prelude::*;
/// ```
pub mod prelude {
    // Model types
    pub use crate::model::{
        Constraint, ConstraintId, Domain, LinearExpr, Model, Objective, ObjectiveId, QuadTerm,
        Sense, VarId, Variable, VariableBuilder,
    };

    // Elimination
    pub use crate::elimination::{
        FmeConfig, FourierMotzkinElimination, Projection, DEFAULT_PROJECTED_NAME,
    };

    // Filtering
    pub use crate::filter::{ConstraintFilter, FilterResult};

    // Post-processing
    pub use crate::postprocess::post_process_projected_constraints;

    // Solver
    pub use crate::solver::{
        ClarabelOracle, OracleOutcome, Settings, SolverOracle, TerminationStatus,
    };

    // Errors
    pub use crate::error::{FmeError, Result};
}

// Re-export main types at crate root
pub use elimination::{FourierMotzkinElimination, Projection};
pub use error::{FmeError, Result};
pub use postprocess::post_process_projected_constraints;
