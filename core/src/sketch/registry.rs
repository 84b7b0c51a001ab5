use super::types::{Primitive, PrimitiveId};
use super::{SketchError, SketchResult};
use serde::{Deserialize, Serialize};

/// Ordered id → primitive mapping for the current sketch.
///
/// Vec-backed for ordered iteration stability; primitive order is the solve
/// submission order and stays stable across solves. Linear scan is fine at
/// sketch scale. No primitive is ever mutated in place: every change
/// produces a new registry value, so the pre-change registry stays intact
/// for comparison.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrimitiveRegistry {
    primitives: Vec<Primitive>,
}

impl PrimitiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_primitives(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn get(&self, id: &PrimitiveId) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.id() == id)
    }

    /// Like [`get`](Self::get), but an unknown id is a broken reference and
    /// surfaces as an error rather than a silent default.
    pub fn require(&self, id: &PrimitiveId) -> SketchResult<&Primitive> {
        self.get(id)
            .ok_or_else(|| SketchError::PrimitiveNotFound(id.clone()))
    }

    pub fn contains(&self, id: &PrimitiveId) -> bool {
        self.get(id).is_some()
    }

    pub fn all(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn ids(&self) -> impl Iterator<Item = &PrimitiveId> {
        self.primitives.iter().map(|p| p.id())
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Append a point under a freshly minted id. Points carry no
    /// references, so there is nothing to validate.
    pub(crate) fn push_new_point(&mut self, x: f64, y: f64, fixed: bool) -> PrimitiveId {
        let id = PrimitiveId::new();
        self.primitives.push(Primitive::Point {
            id: id.clone(),
            x,
            y,
            fixed,
        });
        id
    }

    /// Append a primitive. Line endpoints and circle centers must already
    /// exist; a dangling reference is an integrity error.
    pub fn push_checked(&mut self, primitive: Primitive) -> SketchResult<()> {
        if self.contains(primitive.id()) {
            return Err(SketchError::DuplicateId(primitive.id().clone()));
        }
        match &primitive {
            Primitive::Line { start, end, .. } => {
                self.require_point(start)?;
                self.require_point(end)?;
            }
            Primitive::Circle { center, .. } => {
                self.require_point(center)?;
            }
            Primitive::Point { .. } => {}
        }
        self.primitives.push(primitive);
        Ok(())
    }

    fn require_point(&self, id: &PrimitiveId) -> SketchResult<()> {
        match self.require(id)? {
            Primitive::Point { .. } => Ok(()),
            _ => Err(SketchError::NotAPoint(id.clone())),
        }
    }

    /// Total replacement after a solve. Not a merge: stale geometry never
    /// lingers.
    pub fn replace_all(&self, primitives: Vec<Primitive>) -> PrimitiveRegistry {
        PrimitiveRegistry { primitives }
    }

    /// Returns a new registry with only the named point's coordinates
    /// changed (drag preview before a solve commits). Errors on an unknown
    /// id or a non-point target.
    pub fn with_point_moved(
        &self,
        id: &PrimitiveId,
        new_x: f64,
        new_y: f64,
    ) -> SketchResult<PrimitiveRegistry> {
        match self.require(id)? {
            Primitive::Point { .. } => {}
            _ => return Err(SketchError::NotAPoint(id.clone())),
        }
        let primitives = self
            .primitives
            .iter()
            .map(|p| match p {
                Primitive::Point { id: pid, fixed, .. } if pid == id => Primitive::Point {
                    id: pid.clone(),
                    x: new_x,
                    y: new_y,
                    fixed: *fixed,
                },
                other => other.clone(),
            })
            .collect();
        Ok(PrimitiveRegistry { primitives })
    }

    /// Resolve a point reference to its coordinates.
    ///
    /// Lines and circles own no point geometry; this is the read-time
    /// relational lookup used by rendering, picking, and the solve readback.
    pub fn point_pos(&self, id: &PrimitiveId) -> SketchResult<[f64; 2]> {
        match self.require(id)? {
            Primitive::Point { x, y, .. } => Ok([*x, *y]),
            _ => Err(SketchError::NotAPoint(id.clone())),
        }
    }
}
