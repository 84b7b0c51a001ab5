//! Interactive 2D parametric sketch core.
//!
//! This module owns the sketch state machine: primitives, constraints,
//! selection, and the solve round-trip with the external constraint solver.
//! Rendering and gesture recognition live outside; they feed 2D pick/drag
//! coordinates into the [`controller::SketchController`] and read back
//! snapshots.

pub mod types;
pub mod registry;
pub mod constraints;
pub mod selection;
pub mod solver;
pub mod controller;
pub mod pick;

pub use types::{Constraint, ConstraintKind, Primitive, PrimitiveId};
pub use registry::PrimitiveRegistry;
pub use constraints::ConstraintSet;
pub use selection::Selection;
pub use solver::{solve_sketch, ConstraintSolver, SolvedCircle, SolvedPoint};
pub use controller::{ControllerPolicy, SketchController};
pub use pick::{pick, PickConfig, PickHit, PickTarget};

use thiserror::Error;

/// Errors that can occur while editing or solving a sketch.
///
/// User-input errors (`InsufficientSelection`, `ArityMismatch`,
/// `DuplicateConstraint`) are recoverable notices; referential errors
/// (`PrimitiveNotFound`, `NotAPoint`) indicate a broken invariant and are
/// surfaced loudly; `Solver` carries an external-solver failure unmodified.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SketchError {
    #[error("Insufficient selection: need at least 2 primitives, have {have}")]
    InsufficientSelection { have: usize },

    #[error("Arity mismatch: {kind} takes {expected} primitives, selection has {got}")]
    ArityMismatch {
        kind: ConstraintKind,
        expected: usize,
        got: usize,
    },

    #[error("Constraint already exists: {0}")]
    DuplicateConstraint(ConstraintKind),

    #[error("Primitive not found: {0}")]
    PrimitiveNotFound(PrimitiveId),

    #[error("Primitive id already in use: {0}")]
    DuplicateId(PrimitiveId),

    #[error("Primitive {0} is not a point")]
    NotAPoint(PrimitiveId),

    #[error("Solver failure: {0}")]
    Solver(String),
}

/// Result type for sketch operations.
pub type SketchResult<T> = Result<T, SketchError>;

#[cfg(test)]
mod tests_registry;
#[cfg(test)]
mod tests_constraints;
#[cfg(test)]
mod tests_pick;
