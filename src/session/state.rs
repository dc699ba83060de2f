use std::collections::BTreeMap;

use crate::domain::BoundingBox;

/// Identifier of a committed box, unique for the lifetime of a [`Session`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoxId(u64);

/// The boxes drawn on the current image.
///
/// Iteration follows commit order, so the last box is drawn on top and wins
/// hit tests.
#[derive(Clone, Debug, Default)]
pub struct Session {
    boxes: BTreeMap<BoxId, BoundingBox>,
    next_id: u64,
}

impl Session {
    /// Add a box and return its new id
    pub fn insert(&mut self, bbox: BoundingBox) -> BoxId {
        let id = BoxId(self.next_id);
        self.next_id += 1;
        self.boxes.insert(id, bbox);
        id
    }

    pub fn remove(&mut self, id: BoxId) -> Option<BoundingBox> {
        self.boxes.remove(&id)
    }

    pub fn get(&self, id: BoxId) -> Option<&BoundingBox> {
        self.boxes.get(&id)
    }

    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut BoundingBox> {
        self.boxes.get_mut(&id)
    }

    pub fn contains(&self, id: BoxId) -> bool {
        self.boxes.contains_key(&id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (BoxId, &BoundingBox)> {
        self.boxes.iter().map(|(id, bbox)| (*id, bbox))
    }

    pub fn ids(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.boxes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Drop every box. Ids keep counting so stale ids never match new boxes.
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// The most recently committed box containing an image-space point
    pub fn topmost_at(&self, x: f32, y: f32) -> Option<BoxId> {
        self.iter()
            .rev()
            .find(|(_, bbox)| bbox.contains(x, y))
            .map(|(id, _)| id)
    }
}
