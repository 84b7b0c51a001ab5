//! Pass-through stand-in for the external numeric solver service.
//!
//! Registers geometry, accepts constraints, and reads everything back
//! unchanged. It fills the solver slot so the service runs end-to-end; the
//! real engine plugs in behind the same [`ConstraintSolver`] trait.

use sketch_core::sketch::{ConstraintSolver, PrimitiveId, SolvedCircle, SolvedPoint};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct EchoSolver {
    points: HashMap<PrimitiveId, SolvedPoint>,
    circles: HashMap<PrimitiveId, SolvedCircle>,
}

impl EchoSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConstraintSolver for EchoSolver {
    fn reset(&mut self) -> Result<(), String> {
        self.points.clear();
        self.circles.clear();
        Ok(())
    }

    fn register_point(
        &mut self,
        id: &PrimitiveId,
        x: f64,
        y: f64,
        _fixed: bool,
    ) -> Result<(), String> {
        self.points.insert(id.clone(), SolvedPoint { x, y });
        Ok(())
    }

    fn register_circle(
        &mut self,
        id: &PrimitiveId,
        center: &PrimitiveId,
        radius: f64,
        _fixed: bool,
    ) -> Result<(), String> {
        self.circles.insert(
            id.clone(),
            SolvedCircle {
                center: center.clone(),
                radius,
            },
        );
        Ok(())
    }

    fn add_horizontal_constraint(
        &mut self,
        _point_a: &PrimitiveId,
        _point_b: &PrimitiveId,
    ) -> Result<(), String> {
        Ok(())
    }

    fn add_vertical_constraint(
        &mut self,
        _point_a: &PrimitiveId,
        _point_b: &PrimitiveId,
    ) -> Result<(), String> {
        Ok(())
    }

    fn add_parallel_constraint(
        &mut self,
        _line_a_start: &PrimitiveId,
        _line_a_end: &PrimitiveId,
        _line_b_start: &PrimitiveId,
        _line_b_end: &PrimitiveId,
    ) -> Result<(), String> {
        Ok(())
    }

    fn add_point_on_line_constraint(
        &mut self,
        _point: &PrimitiveId,
        _line_start: &PrimitiveId,
        _line_end: &PrimitiveId,
    ) -> Result<(), String> {
        Ok(())
    }

    fn add_equal_radius_constraint(
        &mut self,
        _circle_a: &PrimitiveId,
        _circle_b: &PrimitiveId,
    ) -> Result<(), String> {
        Ok(())
    }

    fn solve(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn get_point(&self, id: &PrimitiveId) -> Option<SolvedPoint> {
        self.points.get(id).copied()
    }

    fn get_circle(&self, id: &PrimitiveId) -> Option<SolvedCircle> {
        self.circles.get(id).cloned()
    }
}
