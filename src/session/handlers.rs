//! Session message handlers
//!
//! Handles canvas, edit and view messages by mutating the editor and the
//! viewport. File messages need async dialogs and live in the app.

use std::path::PathBuf;

use crate::domain::{ViewState, ZoomLimits};
use crate::error::Result;
use crate::session::editor::Editor;
use crate::session::messages::{CanvasEvent, EditMsg, ViewMsg};

/// Handle pointer input from the canvas.
///
/// `handle_size` is the grip size in widget pixels; it is converted to an
/// image-space reach so grips stay easy to hit at any zoom.
pub fn handle_canvas_event(
    editor: &mut Editor,
    view: &mut ViewState,
    event: CanvasEvent,
    limits: ZoomLimits,
    handle_size: f32,
) {
    match event {
        CanvasEvent::Press(x, y) => {
            let tolerance = view.viewport.image_distance(handle_size);
            editor.press(x, y, tolerance);
        }
        CanvasEvent::Drag(x, y) => editor.update_drag(x, y),
        CanvasEvent::Release => {
            editor.end_drag();
        }
        CanvasEvent::PanBy(dx, dy) => view.viewport.pan(dx, dy),
        CanvasEvent::Zoom { x, y, zoom_in } => {
            view.viewport.zoom_at(x, y, zoom_in, limits);
        }
        CanvasEvent::Resized(width, height) => {
            if view.area != Some((width, height)) {
                view.resize((width, height), editor.image_size());
            }
        }
    }
}

/// Handle an EditMsg
pub fn handle_edit_msg(editor: &mut Editor, msg: EditMsg) {
    match msg {
        EditMsg::DeleteSelected => {
            let removed = editor.delete_selected();
            log::debug!("Deleted {removed} boxes");
        }
        EditMsg::Cancel => {
            if !editor.cancel_drag() {
                editor.clear_selection();
            }
        }
        EditMsg::SelectAll => editor.select_all(),
        EditMsg::Copy => {
            editor.copy_selected();
        }
        EditMsg::Cut => {
            editor.cut_selected();
        }
        EditMsg::Paste => {
            editor.paste();
        }
    }
}

/// Handle a ViewMsg
pub fn handle_view_msg(editor: &Editor, view: &mut ViewState, msg: ViewMsg, limits: ZoomLimits) {
    match msg {
        ViewMsg::Fit => view.refit(editor.image_size()),
        ViewMsg::ZoomIn => {
            view.zoom_centered(true, limits);
        }
        ViewMsg::ZoomOut => {
            view.zoom_centered(false, limits);
        }
    }
}

/// Write the sidecar before the current image goes away.
///
/// Only a dirty editor with autosave `enabled` is written. Returns the path
/// written to, if any. On error the editor is left dirty.
pub fn autosave(editor: &mut Editor, enabled: bool) -> Result<Option<PathBuf>> {
    if !enabled || !editor.is_dirty() {
        return Ok(None);
    }
    editor.save_sidecar().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundingBox, ImageInfo, ImageSize};

    fn setup() -> (Editor, ViewState) {
        let mut editor = Editor::new();
        editor.replace_image(ImageInfo::new("a.png", ImageSize::new(100, 50).unwrap()));
        (editor, ViewState::default())
    }

    fn send(editor: &mut Editor, view: &mut ViewState, events: &[CanvasEvent]) {
        for event in events {
            handle_canvas_event(editor, view, *event, ZoomLimits::default(), 8.0);
        }
    }

    #[test]
    fn test_press_drag_release_commits_box() {
        let (mut editor, mut view) = setup();
        send(
            &mut editor,
            &mut view,
            &[
                CanvasEvent::Press(10.0, 10.0),
                CanvasEvent::Drag(25.0, 20.0),
                CanvasEvent::Drag(40.0, 30.0),
                CanvasEvent::Release,
            ],
        );
        let boxes: Vec<_> = editor.boxes().map(|(_, b)| *b).collect();
        assert_eq!(boxes, vec![BoundingBox::new(10, 10, 40, 30)]);
    }

    #[test]
    fn test_grip_reach_scales_with_zoom() {
        let (mut editor, mut view) = setup();
        send(
            &mut editor,
            &mut view,
            &[
                CanvasEvent::Press(10.0, 10.0),
                CanvasEvent::Drag(40.0, 30.0),
                CanvasEvent::Release,
            ],
        );

        // At scale 0.5 an 8 pixel handle reaches 16 image pixels
        view.viewport.scale = 0.5;
        send(&mut editor, &mut view, &[CanvasEvent::Press(54.0, 44.0)]);
        assert!(matches!(
            editor.gesture(),
            Some(crate::session::editor::Gesture::Resize { .. })
        ));
    }

    #[test]
    fn test_escape_cancels_then_deselects() {
        let (mut editor, mut view) = setup();
        send(
            &mut editor,
            &mut view,
            &[
                CanvasEvent::Press(10.0, 10.0),
                CanvasEvent::Drag(40.0, 30.0),
                CanvasEvent::Release,
                CanvasEvent::Press(60.0, 5.0),
                CanvasEvent::Drag(90.0, 45.0),
            ],
        );
        handle_edit_msg(&mut editor, EditMsg::Cancel);
        assert!(!editor.is_dragging());
        assert_eq!(editor.len(), 1);

        editor.select_all();
        handle_edit_msg(&mut editor, EditMsg::Cancel);
        assert_eq!(editor.selection_len(), 0);
    }

    #[test]
    fn test_edit_messages() {
        let (mut editor, mut view) = setup();
        send(
            &mut editor,
            &mut view,
            &[
                CanvasEvent::Press(10.0, 10.0),
                CanvasEvent::Drag(40.0, 30.0),
                CanvasEvent::Release,
            ],
        );
        handle_edit_msg(&mut editor, EditMsg::Copy);
        handle_edit_msg(&mut editor, EditMsg::Paste);
        assert_eq!(editor.len(), 2);

        handle_edit_msg(&mut editor, EditMsg::SelectAll);
        handle_edit_msg(&mut editor, EditMsg::Cut);
        assert!(editor.is_empty());

        handle_edit_msg(&mut editor, EditMsg::Paste);
        assert_eq!(editor.len(), 2);
        handle_edit_msg(&mut editor, EditMsg::DeleteSelected);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_resize_event_fits_view() {
        let (mut editor, mut view) = setup();
        send(&mut editor, &mut view, &[CanvasEvent::Resized(50.0, 50.0)]);
        assert_eq!(view.area, Some((50.0, 50.0)));
        assert_eq!(view.viewport.scale, 0.5);

        // Same size again keeps a user zoom
        view.viewport.scale = 2.0;
        send(&mut editor, &mut view, &[CanvasEvent::Resized(50.0, 50.0)]);
        assert_eq!(view.viewport.scale, 2.0);
    }

    #[test]
    fn test_view_messages() {
        let (editor, mut view) = setup();
        view.resize((400.0, 400.0), editor.image_size());
        assert_eq!(view.viewport.scale, 1.0);

        handle_view_msg(&editor, &mut view, ViewMsg::ZoomIn, ZoomLimits::default());
        assert!(view.viewport.scale > 1.0);
        handle_view_msg(&editor, &mut view, ViewMsg::Fit, ZoomLimits::default());
        assert_eq!(view.viewport.scale, 1.0);
        handle_view_msg(&editor, &mut view, ViewMsg::ZoomOut, ZoomLimits::default());
        assert!(view.viewport.scale < 1.0);
    }

    #[test]
    fn test_pan_and_wheel() {
        let (mut editor, mut view) = setup();
        send(
            &mut editor,
            &mut view,
            &[
                CanvasEvent::PanBy(10.0, -5.0),
                CanvasEvent::Zoom {
                    x: 0.0,
                    y: 0.0,
                    zoom_in: true,
                },
            ],
        );
        assert!(view.viewport.scale > 1.0);
        assert!(view.viewport.offset_x > 10.0);
    }

    fn drawn_on_disk(dir: &std::path::Path) -> Editor {
        let image = dir.join("photo.png");
        image::RgbaImage::new(100, 50).save(&image).unwrap();
        let mut editor = Editor::new();
        editor.load_image(&image).unwrap();
        let mut view = ViewState::default();
        send(
            &mut editor,
            &mut view,
            &[
                CanvasEvent::Press(10.0, 10.0),
                CanvasEvent::Drag(40.0, 30.0),
                CanvasEvent::Release,
            ],
        );
        editor
    }

    #[test]
    fn test_autosave_writes_dirty_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = drawn_on_disk(dir.path());
        assert!(editor.is_dirty());

        let written = autosave(&mut editor, true).unwrap();
        let sidecar = dir.path().join("photo.txt");
        assert_eq!(written.as_deref(), Some(sidecar.as_path()));
        assert_eq!(std::fs::read_to_string(&sidecar).unwrap(), "10 10 40 30\n");
        assert!(!editor.is_dirty());

        // Nothing left to save
        assert_eq!(autosave(&mut editor, true).unwrap(), None);
    }

    #[test]
    fn test_autosave_disabled_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = drawn_on_disk(dir.path());

        assert_eq!(autosave(&mut editor, false).unwrap(), None);
        assert!(!dir.path().join("photo.txt").exists());
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_failed_autosave_keeps_session_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = drawn_on_disk(dir.path());
        // A directory in the sidecar's place cannot be replaced by a file
        std::fs::create_dir(dir.path().join("photo.txt")).unwrap();

        assert!(autosave(&mut editor, true).is_err());
        assert!(editor.is_dirty());
        assert_eq!(editor.len(), 1);
    }
}
