use super::types::PrimitiveId;
use serde::{Deserialize, Serialize};

/// The ordered set of currently selected primitive ids.
///
/// Order is insertion order and is part of the contract: constraint roles
/// are positional (for point-on-line the first selected id becomes the
/// point, not a line endpoint), so the UI must communicate selection order
/// to the user, e.g. with numbered badges fed by [`Selection::position`].
/// Vec-backed; uniqueness is enforced by toggle semantics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<PrimitiveId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symmetric membership toggle: absent → appended at the end, present →
    /// removed. Returns the new membership state.
    pub fn toggle(&mut self, id: PrimitiveId) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| *existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: &PrimitiveId) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Zero-based selection order of an id, for UI order badges.
    pub fn position(&self, id: &PrimitiveId) -> Option<usize> {
        self.ids.iter().position(|existing| existing == id)
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[PrimitiveId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Explicit deselection of everything. Solves never clear the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
