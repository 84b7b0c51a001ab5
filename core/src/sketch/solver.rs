use super::constraints::ConstraintSet;
use super::registry::PrimitiveRegistry;
use super::types::{Constraint, Primitive, PrimitiveId};
use super::{SketchError, SketchResult};
use serde::{Deserialize, Serialize};

/// Post-solve point readback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolvedPoint {
    pub x: f64,
    pub y: f64,
}

/// Post-solve circle readback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedCircle {
    pub center: PrimitiveId,
    pub radius: f64,
}

/// The external numeric constraint solver, treated as a black box.
///
/// One shared instance lives for the whole application and is reset at the
/// start of every solve call; it is never accessed from two logical
/// operations at once. Registration and solve failures are the solver's own
/// error strings, propagated unmodified by [`solve_sketch`].
///
/// Lines are not registered: the solver only knows points and circles, and
/// line constraints reference endpoint ids directly.
pub trait ConstraintSolver {
    /// Clear all registered primitives and constraints. Idempotent; safe to
    /// call on an empty solver.
    fn reset(&mut self) -> Result<(), String>;

    fn register_point(
        &mut self,
        id: &PrimitiveId,
        x: f64,
        y: f64,
        fixed: bool,
    ) -> Result<(), String>;

    fn register_circle(
        &mut self,
        id: &PrimitiveId,
        center: &PrimitiveId,
        radius: f64,
        fixed: bool,
    ) -> Result<(), String>;

    fn add_horizontal_constraint(
        &mut self,
        point_a: &PrimitiveId,
        point_b: &PrimitiveId,
    ) -> Result<(), String>;

    fn add_vertical_constraint(
        &mut self,
        point_a: &PrimitiveId,
        point_b: &PrimitiveId,
    ) -> Result<(), String>;

    fn add_parallel_constraint(
        &mut self,
        line_a_start: &PrimitiveId,
        line_a_end: &PrimitiveId,
        line_b_start: &PrimitiveId,
        line_b_end: &PrimitiveId,
    ) -> Result<(), String>;

    fn add_point_on_line_constraint(
        &mut self,
        point: &PrimitiveId,
        line_start: &PrimitiveId,
        line_end: &PrimitiveId,
    ) -> Result<(), String>;

    fn add_equal_radius_constraint(
        &mut self,
        circle_a: &PrimitiveId,
        circle_b: &PrimitiveId,
    ) -> Result<(), String>;

    /// Run to convergence or best effort. One shot, no retry; a degenerate
    /// system still yields readable geometry.
    fn solve(&mut self) -> Result<(), String>;

    fn get_point(&self, id: &PrimitiveId) -> Option<SolvedPoint>;

    fn get_circle(&self, id: &PrimitiveId) -> Option<SolvedCircle>;
}

/// One full solve round-trip: submit the complete sketch state, read back
/// updated geometry, return a fresh registry.
///
/// Guarantees: the output has the same id set in the same order as the
/// input; the `fixed` flag persists across the solve (an anchor stays an
/// anchor); any id missing from solver readback keeps its pre-solve value
/// unchanged. Any solver failure propagates as [`SketchError::Solver`] and
/// the caller's state never advances.
pub fn solve_sketch<S: ConstraintSolver>(
    solver: &mut S,
    registry: &PrimitiveRegistry,
    constraints: &ConstraintSet,
) -> SketchResult<PrimitiveRegistry> {
    solver.reset().map_err(SketchError::Solver)?;

    for primitive in registry.all() {
        match primitive {
            Primitive::Point { id, x, y, fixed } => solver
                .register_point(id, *x, *y, *fixed)
                .map_err(SketchError::Solver)?,
            Primitive::Circle {
                id,
                center,
                radius,
                fixed,
            } => solver
                .register_circle(id, center, *radius, *fixed)
                .map_err(SketchError::Solver)?,
            // Lines are id references only; the solver never sees them.
            Primitive::Line { .. } => {}
        }
    }

    for constraint in constraints.iter() {
        submit_constraint(solver, constraint).map_err(SketchError::Solver)?;
    }

    solver.solve().map_err(SketchError::Solver)?;

    let solved = registry
        .all()
        .iter()
        .map(|primitive| read_back(solver, primitive))
        .collect();
    Ok(registry.replace_all(solved))
}

fn submit_constraint<S: ConstraintSolver>(
    solver: &mut S,
    constraint: &Constraint,
) -> Result<(), String> {
    match constraint {
        Constraint::Horizontal { point_a, point_b } => {
            solver.add_horizontal_constraint(point_a, point_b)
        }
        Constraint::Vertical { point_a, point_b } => {
            solver.add_vertical_constraint(point_a, point_b)
        }
        Constraint::Parallel {
            line_a_start,
            line_a_end,
            line_b_start,
            line_b_end,
        } => solver.add_parallel_constraint(line_a_start, line_a_end, line_b_start, line_b_end),
        Constraint::PointOnLine {
            point,
            line_start,
            line_end,
        } => solver.add_point_on_line_constraint(point, line_start, line_end),
        Constraint::EqualRadius { circle_a, circle_b } => {
            solver.add_equal_radius_constraint(circle_a, circle_b)
        }
    }
}

/// Re-fetch one primitive's geometry from the solver by id.
///
/// Ids the solver does not report keep their pre-solve value, unchanged and
/// whole. Lines are rebuilt from their endpoint ids; the moved endpoints are
/// picked up at read time through the registry.
fn read_back<S: ConstraintSolver>(solver: &S, primitive: &Primitive) -> Primitive {
    match primitive {
        Primitive::Point { id, fixed, .. } => match solver.get_point(id) {
            Some(solved) => Primitive::Point {
                id: id.clone(),
                x: solved.x,
                y: solved.y,
                fixed: *fixed,
            },
            None => primitive.clone(),
        },
        Primitive::Circle { id, fixed, .. } => match solver.get_circle(id) {
            Some(solved) => Primitive::Circle {
                id: id.clone(),
                center: solved.center,
                radius: solved.radius,
                fixed: *fixed,
            },
            None => primitive.clone(),
        },
        Primitive::Line { id, start, end } => Primitive::Line {
            id: id.clone(),
            start: start.clone(),
            end: end.clone(),
        },
    }
}
