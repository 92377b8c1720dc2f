//! Solver interface for the redundancy post-processor.
//!
//! This module provides:
//! - The `SolverOracle` seam the post-processor talks to
//! - A bundled Clarabel LP backend

pub mod clarabel;
pub mod oracle;

pub use self::clarabel::{ClarabelOracle, Settings};
pub use oracle::{OracleOutcome, SolverOracle, TerminationStatus};
