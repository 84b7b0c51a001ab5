use super::{SketchError, SketchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A stable identifier for a sketch primitive.
///
/// Wraps a `String` to keep strong typing at API boundaries while staying
/// stable across solves (the solve round-trip never mints new ids). Seed
/// geometry uses [`PrimitiveId::named`]; interactively created primitives
/// get uuid-backed ids from [`PrimitiveId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimitiveId(String);

impl PrimitiveId {
    /// Generate a new random PrimitiveId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create an id from an explicit name (seed geometry, tests, restoration).
    pub fn named(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PrimitiveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sketch primitive.
///
/// Lines and circles carry no independent point geometry; their `start`,
/// `end` and `center` fields are relational references resolved through the
/// [`super::PrimitiveRegistry`] at read time. The registry is replaced
/// wholesale on every solve, so resolved positions are never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    Point {
        id: PrimitiveId,
        x: f64,
        y: f64,
        /// Anchored: the solver must not move this point.
        fixed: bool,
    },
    Line {
        id: PrimitiveId,
        start: PrimitiveId,
        end: PrimitiveId,
    },
    Circle {
        id: PrimitiveId,
        center: PrimitiveId,
        radius: f64,
        fixed: bool,
    },
}

impl Primitive {
    pub fn id(&self) -> &PrimitiveId {
        match self {
            Primitive::Point { id, .. } => id,
            Primitive::Line { id, .. } => id,
            Primitive::Circle { id, .. } => id,
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Primitive::Point { .. })
    }

    /// Point coordinates, if this primitive is a point.
    pub fn point_pos(&self) -> Option<[f64; 2]> {
        match self {
            Primitive::Point { x, y, .. } => Some([*x, *y]),
            _ => None,
        }
    }
}

/// The constraint vocabulary. Each variant has a fixed argument arity; the
/// roles are positional (see [`Constraint::from_args`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    Horizontal,
    Vertical,
    Parallel,
    PointOnLine,
    EqualRadius,
}

impl ConstraintKind {
    /// Number of primitive ids this constraint variant takes.
    pub fn arity(&self) -> usize {
        match self {
            ConstraintKind::Horizontal => 2,
            ConstraintKind::Vertical => 2,
            ConstraintKind::Parallel => 4,
            ConstraintKind::PointOnLine => 3,
            ConstraintKind::EqualRadius => 2,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::Horizontal => "horizontal",
            ConstraintKind::Vertical => "vertical",
            ConstraintKind::Parallel => "parallel",
            ConstraintKind::PointOnLine => "point_on_line",
            ConstraintKind::EqualRadius => "equal_radius",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ConstraintKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(ConstraintKind::Horizontal),
            "vertical" => Ok(ConstraintKind::Vertical),
            "parallel" => Ok(ConstraintKind::Parallel),
            "point_on_line" => Ok(ConstraintKind::PointOnLine),
            "equal_radius" => Ok(ConstraintKind::EqualRadius),
            other => Err(format!("Unknown constraint kind: {}", other)),
        }
    }
}

/// A geometric constraint over primitive ids, with role-named arguments.
///
/// Constraints are immutable once created: the set only ever appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Constraint {
    Horizontal {
        point_a: PrimitiveId,
        point_b: PrimitiveId,
    },
    Vertical {
        point_a: PrimitiveId,
        point_b: PrimitiveId,
    },
    Parallel {
        line_a_start: PrimitiveId,
        line_a_end: PrimitiveId,
        line_b_start: PrimitiveId,
        line_b_end: PrimitiveId,
    },
    PointOnLine {
        point: PrimitiveId,
        line_start: PrimitiveId,
        line_end: PrimitiveId,
    },
    EqualRadius {
        circle_a: PrimitiveId,
        circle_b: PrimitiveId,
    },
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Horizontal { .. } => ConstraintKind::Horizontal,
            Constraint::Vertical { .. } => ConstraintKind::Vertical,
            Constraint::Parallel { .. } => ConstraintKind::Parallel,
            Constraint::PointOnLine { .. } => ConstraintKind::PointOnLine,
            Constraint::EqualRadius { .. } => ConstraintKind::EqualRadius,
        }
    }

    /// Argument ids in role order (the order the solve protocol submits them).
    pub fn arg_ids(&self) -> Vec<&PrimitiveId> {
        match self {
            Constraint::Horizontal { point_a, point_b } => vec![point_a, point_b],
            Constraint::Vertical { point_a, point_b } => vec![point_a, point_b],
            Constraint::Parallel {
                line_a_start,
                line_a_end,
                line_b_start,
                line_b_end,
            } => vec![line_a_start, line_a_end, line_b_start, line_b_end],
            Constraint::PointOnLine {
                point,
                line_start,
                line_end,
            } => vec![point, line_start, line_end],
            Constraint::EqualRadius { circle_a, circle_b } => vec![circle_a, circle_b],
        }
    }

    /// Build a constraint from positionally ordered arguments.
    ///
    /// The argument count is checked against the variant's arity even though
    /// the controller validates first; this is the defensive double-check at
    /// the authoring boundary.
    pub fn from_args(kind: ConstraintKind, args: &[PrimitiveId]) -> SketchResult<Constraint> {
        if args.len() != kind.arity() {
            return Err(SketchError::ArityMismatch {
                kind,
                expected: kind.arity(),
                got: args.len(),
            });
        }
        let c = match kind {
            ConstraintKind::Horizontal => Constraint::Horizontal {
                point_a: args[0].clone(),
                point_b: args[1].clone(),
            },
            ConstraintKind::Vertical => Constraint::Vertical {
                point_a: args[0].clone(),
                point_b: args[1].clone(),
            },
            ConstraintKind::Parallel => Constraint::Parallel {
                line_a_start: args[0].clone(),
                line_a_end: args[1].clone(),
                line_b_start: args[2].clone(),
                line_b_end: args[3].clone(),
            },
            ConstraintKind::PointOnLine => Constraint::PointOnLine {
                point: args[0].clone(),
                line_start: args[1].clone(),
                line_end: args[2].clone(),
            },
            ConstraintKind::EqualRadius => Constraint::EqualRadius {
                circle_a: args[0].clone(),
                circle_b: args[1].clone(),
            },
        };
        Ok(c)
    }

    /// Human-readable form for the UI's constraint list.
    pub fn label(&self) -> String {
        let ids: Vec<&str> = self.arg_ids().iter().map(|id| id.as_str()).collect();
        format!("{}({})", self.kind(), ids.join(", "))
    }
}
