//! Cursor hit-testing for the input layer.
//!
//! The render/input collaborator projects a pointer event into sketch space
//! and asks which primitive sits under the cursor; the controller then
//! treats the answer as a "click on primitive p". Points win over circle
//! rims, circle rims over line bodies, when several candidates fall inside
//! the pick radius at comparable distance.

use super::registry::PrimitiveRegistry;
use super::types::{Primitive, PrimitiveId};
use super::SketchResult;
use crate::geometry::{distance, point_segment_distance, project_onto_segment, EPSILON};
use serde::{Deserialize, Serialize};

/// What part of a primitive a pick landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickTarget {
    Point,
    CircleEdge,
    LineSegment,
}

impl PickTarget {
    /// Priority when multiple candidates are within the pick radius
    /// (lower = wins).
    fn priority(&self) -> u8 {
        match self {
            PickTarget::Point => 1,
            PickTarget::CircleEdge => 2,
            PickTarget::LineSegment => 3,
        }
    }
}

/// A primitive found under the cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickHit {
    pub id: PrimitiveId,
    /// Closest point of the primitive to the cursor.
    pub position: [f64; 2],
    /// Distance from cursor to that point.
    pub distance: f64,
    pub target: PickTarget,
}

/// Configuration for hit-testing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickConfig {
    /// Maximum distance (in sketch units) for a pick to land.
    pub pick_radius: f64,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self { pick_radius: 0.5 }
    }
}

/// Find the primitive under the cursor, if any.
///
/// Dangling line endpoints or circle centers surface as referential errors;
/// a sketch that cannot be hit-tested is a broken sketch.
pub fn pick(
    registry: &PrimitiveRegistry,
    cursor: [f64; 2],
    config: &PickConfig,
) -> SketchResult<Option<PickHit>> {
    let mut best: Option<PickHit> = None;

    for primitive in registry.all() {
        let candidate = match primitive {
            Primitive::Point { id, x, y, .. } => {
                let pos = [*x, *y];
                PickHit {
                    id: id.clone(),
                    position: pos,
                    distance: distance(cursor, pos),
                    target: PickTarget::Point,
                }
            }
            Primitive::Circle {
                id, center, radius, ..
            } => {
                let center_pos = registry.point_pos(center)?;
                let to_cursor = distance(cursor, center_pos);
                let rim_distance = (to_cursor - radius).abs();
                // Closest rim point along the center→cursor ray; a cursor
                // dead on the center has no direction, any rim point does.
                let position = if to_cursor < EPSILON {
                    [center_pos[0] + radius, center_pos[1]]
                } else {
                    let t = radius / to_cursor;
                    [
                        center_pos[0] + t * (cursor[0] - center_pos[0]),
                        center_pos[1] + t * (cursor[1] - center_pos[1]),
                    ]
                };
                PickHit {
                    id: id.clone(),
                    position,
                    distance: rim_distance,
                    target: PickTarget::CircleEdge,
                }
            }
            Primitive::Line { id, start, end, .. } => {
                let a = registry.point_pos(start)?;
                let b = registry.point_pos(end)?;
                let t = project_onto_segment(cursor, a, b);
                let position = [a[0] + t * (b[0] - a[0]), a[1] + t * (b[1] - a[1])];
                PickHit {
                    id: id.clone(),
                    position,
                    distance: point_segment_distance(cursor, a, b),
                    target: PickTarget::LineSegment,
                }
            }
        };

        if candidate.distance > config.pick_radius {
            continue;
        }
        let better = match &best {
            None => true,
            Some(current) => {
                (candidate.target.priority(), candidate.distance)
                    < (current.target.priority(), current.distance)
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    Ok(best)
}
