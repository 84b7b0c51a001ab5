use super::constraints::ConstraintSet;
use super::pick::{pick, PickConfig};
use super::registry::PrimitiveRegistry;
use super::selection::Selection;
use super::solver::{solve_sketch, ConstraintSolver};
use super::types::{Constraint, ConstraintKind, Primitive, PrimitiveId};
use super::{SketchError, SketchResult};
use serde::{Deserialize, Serialize};

/// Tunable interaction behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerPolicy {
    /// Whether adding a constraint clears the current selection. Default is
    /// to keep it, so consecutive constraints can reuse the same selection;
    /// the user deselects explicitly.
    pub clear_selection_on_constraint: bool,
}

impl Default for ControllerPolicy {
    fn default() -> Self {
        Self {
            clear_selection_on_constraint: false,
        }
    }
}

/// Read-only sketch state for the render layer: geometry to draw, selection
/// to highlight (in order), constraints to list as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchSnapshot {
    pub primitives: Vec<Primitive>,
    pub constraints: Vec<Constraint>,
    pub selection: Vec<PrimitiveId>,
}

/// The event-driven heart of the editor.
///
/// Reacts to discrete input events (click, drag frame, add-constraint,
/// solve button) on one logical thread, drives the registry / constraint
/// set / selection, and decides when a re-solve happens: every drag frame
/// solves synchronously, constraint addition never does, the solve button
/// solves on demand.
///
/// Failure leaves state untouched. A rejected constraint appends nothing; a
/// failed solve never advances the registry.
#[derive(Debug, Clone, Default)]
pub struct SketchController {
    registry: PrimitiveRegistry,
    constraints: ConstraintSet,
    selection: Selection,
    policy: ControllerPolicy,
}

impl SketchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ControllerPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    // === Seed geometry ===

    /// Add a point with a generated id.
    pub fn add_point(&mut self, x: f64, y: f64, fixed: bool) -> PrimitiveId {
        self.registry.push_new_point(x, y, fixed)
    }

    /// Add a point with an explicit id (seed geometry, tests).
    pub fn add_point_with_id(
        &mut self,
        id: PrimitiveId,
        x: f64,
        y: f64,
        fixed: bool,
    ) -> SketchResult<PrimitiveId> {
        self.registry.push_checked(Primitive::Point {
            id: id.clone(),
            x,
            y,
            fixed,
        })?;
        Ok(id)
    }

    /// Add a line between two existing points.
    pub fn add_line(
        &mut self,
        start: PrimitiveId,
        end: PrimitiveId,
    ) -> SketchResult<PrimitiveId> {
        let id = PrimitiveId::new();
        self.registry.push_checked(Primitive::Line {
            id: id.clone(),
            start,
            end,
        })?;
        Ok(id)
    }

    /// Add a circle around an existing center point.
    pub fn add_circle(
        &mut self,
        center: PrimitiveId,
        radius: f64,
        fixed: bool,
    ) -> SketchResult<PrimitiveId> {
        let id = PrimitiveId::new();
        self.registry.push_checked(Primitive::Circle {
            id: id.clone(),
            center,
            radius,
            fixed,
        })?;
        Ok(id)
    }

    // === Input events ===

    /// Click on a primitive: toggle its selection membership. Never solves.
    /// Returns the new membership state.
    pub fn click(&mut self, id: &PrimitiveId) -> SketchResult<bool> {
        self.registry.require(id)?;
        Ok(self.selection.toggle(id.clone()))
    }

    /// Click at a cursor position: hit-test, then toggle whatever was hit.
    /// Empty space deselects nothing and hits nothing.
    pub fn click_at(
        &mut self,
        cursor: [f64; 2],
        config: &PickConfig,
    ) -> SketchResult<Option<PrimitiveId>> {
        match pick(&self.registry, cursor, config)? {
            Some(hit) => {
                self.selection.toggle(hit.id.clone());
                Ok(Some(hit.id))
            }
            None => Ok(None),
        }
    }

    /// Drag one point to a proposed position. Points only.
    ///
    /// Every drag frame is a full synchronous re-solve, not a preview: the
    /// moved point is written into a preview registry, the whole sketch is
    /// submitted to the solver, and the solved result committed. This is
    /// what makes dragging one point live-update all constrained geometry.
    /// If the solver fails, the pre-drag registry stays in place.
    pub fn drag<S: ConstraintSolver>(
        &mut self,
        solver: &mut S,
        id: &PrimitiveId,
        x: f64,
        y: f64,
    ) -> SketchResult<()> {
        let preview = self.registry.with_point_moved(id, x, y)?;
        let solved = solve_sketch(solver, &preview, &self.constraints)?;
        self.registry = solved;
        Ok(())
    }

    /// Author a constraint from the current selection, arguments taken
    /// positionally in selection order. Never triggers a solve; the user
    /// drags or presses Solve to see the effect.
    pub fn add_constraint(&mut self, kind: ConstraintKind) -> SketchResult<Constraint> {
        let have = self.selection.len();
        if have < 2 {
            return Err(SketchError::InsufficientSelection { have });
        }
        if have != kind.arity() {
            return Err(SketchError::ArityMismatch {
                kind,
                expected: kind.arity(),
                got: have,
            });
        }
        let constraint = Constraint::from_args(kind, self.selection.ids())?;
        if self.constraints.contains_equivalent(&constraint) {
            return Err(SketchError::DuplicateConstraint(kind));
        }
        self.constraints
            .push_checked(constraint.clone(), &self.registry)?;
        if self.policy.clear_selection_on_constraint {
            self.selection.clear();
        }
        Ok(constraint)
    }

    /// Solve button: one explicit full solve round-trip. Commits only on
    /// success.
    pub fn solve<S: ConstraintSolver>(&mut self, solver: &mut S) -> SketchResult<()> {
        let solved = solve_sketch(solver, &self.registry, &self.constraints)?;
        self.registry = solved;
        Ok(())
    }

    /// Explicit deselection of everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // === Read-only snapshots for the render layer ===

    pub fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    pub fn primitives(&self) -> &[Primitive] {
        self.registry.all()
    }

    pub fn constraints(&self) -> &[Constraint] {
        self.constraints.all()
    }

    pub fn selection(&self) -> &[PrimitiveId] {
        self.selection.ids()
    }

    /// Constraint list as display text, in insertion order.
    pub fn constraint_labels(&self) -> Vec<String> {
        self.constraints.iter().map(|c| c.label()).collect()
    }

    pub fn snapshot(&self) -> SketchSnapshot {
        SketchSnapshot {
            primitives: self.registry.all().to_vec(),
            constraints: self.constraints.all().to_vec(),
            selection: self.selection.ids().to_vec(),
        }
    }
}
