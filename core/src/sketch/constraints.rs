use super::registry::PrimitiveRegistry;
use super::types::Constraint;
use super::SketchResult;
use serde::{Deserialize, Serialize};

/// Append-only ordered constraint sequence.
///
/// Insertion order is the solve submission order. Constraints are never
/// mutated or removed once appended; a solve reads them, it does not touch
/// them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns a new set with the constraint appended.
    pub fn append(&self, constraint: Constraint) -> ConstraintSet {
        let mut constraints = self.constraints.clone();
        constraints.push(constraint);
        ConstraintSet { constraints }
    }

    /// Append with integrity checks: every argument id must currently exist
    /// in the registry. Arity is already fixed by construction
    /// ([`Constraint::from_args`] is the authoring double-check); this guards
    /// the referential invariant.
    pub fn push_checked(
        &mut self,
        constraint: Constraint,
        registry: &PrimitiveRegistry,
    ) -> SketchResult<()> {
        for id in constraint.arg_ids() {
            registry.require(id)?;
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// True if an identical constraint (same variant, same ids in the same
    /// roles) is already present.
    pub fn contains_equivalent(&self, constraint: &Constraint) -> bool {
        self.constraints.iter().any(|c| c == constraint)
    }
}
