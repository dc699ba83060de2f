//! Bounding-box editor
//!
//! Owns the open image, its [`Session`] of boxes and the drag state machine.
//! The canvas widget translates pointer events into calls on this type; no
//! toolkit types cross this boundary.
//!
//! The editor is either idle or dragging. A drag carries a [`Gesture`]:
//! drawing a new box, moving an existing one or resizing one by a grip.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use super::state::{BoxId, Session};
use crate::capture;
use crate::domain::{BoundingBox, Grip, ImageInfo, ImageSize, PixelPoint};
use crate::error::{Error, Result};
use crate::sidecar;

/// Offset applied to pasted boxes so they do not hide their source
pub const PASTE_OFFSET: i64 = 10;

/// What the current drag is doing
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    /// Rubber-band a new box from `anchor` to `free`
    Draw {
        anchor: PixelPoint,
        free: PixelPoint,
    },
    /// Translate box `id`, which was at `origin` when grabbed at `grab`
    Move {
        id: BoxId,
        origin: BoundingBox,
        grab: (f32, f32),
    },
    /// Drag one grip of box `id`
    Resize {
        id: BoxId,
        grip: Grip,
        origin: BoundingBox,
        grab: (f32, f32),
    },
}

#[derive(Clone, Debug, Default)]
pub struct Editor {
    image: Option<ImageInfo>,
    session: Session,
    gesture: Option<Gesture>,
    selection: BTreeSet<BoxId>,
    clipboard: Vec<BoundingBox>,
    dirty: bool,
}

fn drag_delta(grab: (f32, f32), x: f32, y: f32) -> (i64, i64) {
    ((x - grab.0).round() as i64, (y - grab.1).round() as i64)
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    pub fn image_size(&self) -> Option<ImageSize> {
        self.image.as_ref().map(|info| info.size)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn boxes(&self) -> impl DoubleEndedIterator<Item = (BoxId, &BoundingBox)> {
        self.session.iter()
    }

    pub fn get(&self, id: BoxId) -> Option<&BoundingBox> {
        self.session.get(id)
    }

    pub fn len(&self) -> usize {
        self.session.len()
    }

    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Unsaved changes since the last load, import or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The box being drawn, if a draw gesture is in progress
    pub fn preview(&self) -> Option<BoundingBox> {
        match self.gesture {
            Some(Gesture::Draw { anchor, free }) => Some(BoundingBox::from_corners(anchor, free)),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Image
    // ------------------------------------------------------------------

    /// Decode `path` and make it the current image.
    ///
    /// On success the session is emptied and the pixels are returned for
    /// display. On failure nothing changes.
    pub fn load_image(&mut self, path: &Path) -> Result<RgbaImage> {
        let (rgba, size) = capture::image::decode(path)?;
        self.replace_image(ImageInfo::new(path, size));
        Ok(rgba)
    }

    /// Make `info` the current image and empty the session
    pub fn replace_image(&mut self, info: ImageInfo) {
        log::info!(
            "Opened {} ({}x{})",
            info.path.display(),
            info.size.width(),
            info.size.height()
        );
        self.image = Some(info);
        self.session.clear();
        self.selection.clear();
        self.gesture = None;
        self.dirty = false;
    }

    /// Add boxes read from an existing sidecar.
    ///
    /// Boxes are clamped onto the image and degenerate ones are dropped.
    /// Returns how many were added. Importing does not count as an edit.
    pub fn import(&mut self, boxes: impl IntoIterator<Item = BoundingBox>) -> usize {
        let Some(size) = self.image_size() else {
            return 0;
        };
        let mut added = 0;
        for bbox in boxes {
            let bbox = bbox.clamped(size);
            if bbox.is_degenerate() {
                log::debug!("Skipping degenerate imported box {bbox:?}");
                continue;
            }
            self.session.insert(bbox);
            added += 1;
        }
        added
    }

    /// Import the sidecar of the current image, if it exists
    pub fn restore_sidecar(&mut self) -> Result<usize> {
        let path = self.sidecar_path().ok_or(Error::NoImage)?;
        match sidecar::read(&path)? {
            Some(boxes) => Ok(self.import(boxes)),
            None => Ok(0),
        }
    }

    pub fn sidecar_path(&self) -> Option<PathBuf> {
        self.image.as_ref().map(|info| sidecar::sidecar_path(&info.path))
    }

    // ------------------------------------------------------------------
    // Drag state machine
    // ------------------------------------------------------------------

    /// Start drawing a new box anchored at `(x, y)`.
    ///
    /// No-op without an image or while another drag is in progress.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        let Some(size) = self.image_size() else {
            return;
        };
        if self.gesture.is_some() {
            return;
        }
        let anchor = size.clamp(x, y);
        self.gesture = Some(Gesture::Draw {
            anchor,
            free: anchor,
        });
    }

    /// Pointer-down dispatcher.
    ///
    /// A grip of the primary box starts a resize, a press inside a box
    /// selects it and starts a move, anything else starts drawing.
    /// `tolerance` is the grip reach in image pixels.
    pub fn press(&mut self, x: f32, y: f32, tolerance: f32) {
        if self.image.is_none() || self.gesture.is_some() {
            return;
        }

        if let Some(id) = self.primary()
            && let Some(bbox) = self.session.get(id)
            && let Some(grip) = bbox.grip_at(x, y, tolerance)
        {
            self.gesture = Some(Gesture::Resize {
                id,
                grip,
                origin: *bbox,
                grab: (x, y),
            });
            return;
        }

        if let Some(id) = self.session.topmost_at(x, y)
            && let Some(bbox) = self.session.get(id)
        {
            self.gesture = Some(Gesture::Move {
                id,
                origin: *bbox,
                grab: (x, y),
            });
            self.select(id);
            return;
        }

        self.selection.clear();
        self.begin_drag(x, y);
    }

    /// Follow the pointer with the current gesture. No effect when idle.
    pub fn update_drag(&mut self, x: f32, y: f32) {
        let Some(size) = self.image_size() else {
            return;
        };
        match &mut self.gesture {
            None => {}
            Some(Gesture::Draw { free, .. }) => *free = size.clamp(x, y),
            Some(Gesture::Move { id, origin, grab }) => {
                let (dx, dy) = drag_delta(*grab, x, y);
                if let Some(bbox) = self.session.get_mut(*id) {
                    *bbox = origin.translated_within(dx, dy, size);
                }
            }
            Some(Gesture::Resize {
                id,
                grip,
                origin,
                grab,
            }) => {
                let (dx, dy) = drag_delta(*grab, x, y);
                if let Some(bbox) = self.session.get_mut(*id) {
                    *bbox = origin.resized(*grip, dx, dy, size);
                }
            }
        }
    }

    /// Finish the current gesture.
    ///
    /// A drawn box is committed and selected when it has non-zero width and
    /// height, and silently discarded otherwise. A resize that ends
    /// degenerate snaps back to where it started. Returns the affected box.
    pub fn end_drag(&mut self) -> Option<BoxId> {
        match self.gesture.take()? {
            Gesture::Draw { anchor, free } => {
                let bbox = BoundingBox::from_corners(anchor, free);
                if bbox.is_degenerate() {
                    log::debug!("Discarding zero-area box {bbox:?}");
                    return None;
                }
                let id = self.session.insert(bbox);
                self.selection.clear();
                self.selection.insert(id);
                self.dirty = true;
                Some(id)
            }
            Gesture::Move { id, origin, .. } => {
                let bbox = self.session.get(id)?;
                if *bbox != origin {
                    self.dirty = true;
                }
                Some(id)
            }
            Gesture::Resize { id, origin, .. } => {
                let bbox = self.session.get_mut(id)?;
                if bbox.is_degenerate() {
                    *bbox = origin;
                } else if *bbox != origin {
                    self.dirty = true;
                }
                Some(id)
            }
        }
    }

    /// Abandon the current gesture, restoring any box it changed
    pub fn cancel_drag(&mut self) -> bool {
        match self.gesture.take() {
            None => false,
            Some(Gesture::Draw { .. }) => true,
            Some(Gesture::Move { id, origin, .. } | Gesture::Resize { id, origin, .. }) => {
                if let Some(bbox) = self.session.get_mut(id) {
                    *bbox = origin;
                }
                true
            }
        }
    }

    // ------------------------------------------------------------------
    // Selection and removal
    // ------------------------------------------------------------------

    /// Delete a box. No-op if it does not exist.
    pub fn remove(&mut self, id: BoxId) -> Option<BoundingBox> {
        let removed = self.session.remove(id)?;
        self.selection.remove(&id);
        if matches!(
            self.gesture,
            Some(Gesture::Move { id: active, .. } | Gesture::Resize { id: active, .. }) if active == id
        ) {
            self.gesture = None;
        }
        self.dirty = true;
        Some(removed)
    }

    /// Select a single box
    pub fn select(&mut self, id: BoxId) -> bool {
        if !self.session.contains(id) {
            return false;
        }
        self.selection.clear();
        self.selection.insert(id);
        true
    }

    pub fn select_all(&mut self) {
        self.selection = self.session.ids().collect();
    }

    pub fn clear_selection(&mut self) -> bool {
        let had_selection = !self.selection.is_empty();
        self.selection.clear();
        had_selection
    }

    pub fn selected(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.selection.iter().copied()
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_selected(&self, id: BoxId) -> bool {
        self.selection.contains(&id)
    }

    /// The box showing grips: the only selected box, if exactly one is
    pub fn primary(&self) -> Option<BoxId> {
        if self.selection.len() == 1 {
            self.selection.first().copied()
        } else {
            None
        }
    }

    /// Delete every selected box, returning how many went
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<BoxId> = self.selected().collect();
        ids.into_iter().filter_map(|id| self.remove(id)).count()
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copy the selected boxes. An empty selection keeps the clipboard.
    pub fn copy_selected(&mut self) -> usize {
        let copied: Vec<BoundingBox> = self
            .selected()
            .filter_map(|id| self.session.get(id).copied())
            .collect();
        let count = copied.len();
        if count > 0 {
            self.clipboard = copied;
        }
        count
    }

    pub fn cut_selected(&mut self) -> usize {
        let copied = self.copy_selected();
        self.delete_selected();
        copied
    }

    /// Paste the clipboard shifted by [`PASTE_OFFSET`], kept on the image.
    ///
    /// The pasted boxes become the selection.
    pub fn paste(&mut self) -> usize {
        let Some(size) = self.image_size() else {
            return 0;
        };
        if self.clipboard.is_empty() {
            return 0;
        }

        self.selection.clear();
        for bbox in &self.clipboard {
            let pasted = bbox.translated_within(PASTE_OFFSET, PASTE_OFFSET, size);
            if pasted.is_degenerate() {
                continue;
            }
            let id = self.session.insert(pasted);
            self.selection.insert(id);
        }
        if !self.selection.is_empty() {
            self.dirty = true;
        }
        self.selection.len()
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Write every box to `path`, replacing the file.
    ///
    /// On failure the session and the dirty flag are left as they were so
    /// the user can retry.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        sidecar::write(path, self.session.iter().map(|(_, bbox)| bbox))?;
        log::info!("Saved {} boxes to {}", self.session.len(), path.display());
        self.dirty = false;
        Ok(())
    }

    /// Save next to the current image, returning the path written
    pub fn save_sidecar(&mut self) -> Result<PathBuf> {
        let path = self.sidecar_path().ok_or(Error::NoImage)?;
        self.save(&path)?;
        Ok(path)
    }
}
