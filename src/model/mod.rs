//! Model layer: variables, expressions, constraints, objectives.

mod constraint;
mod expression;
mod model;
mod variable;

pub use constraint::{Constraint, ConstraintId, Objective, ObjectiveId, Sense};
pub use expression::{LinearExpr, QuadTerm};
pub use model::Model;
pub use variable::{Domain, VarId, Variable, VariableBuilder};
