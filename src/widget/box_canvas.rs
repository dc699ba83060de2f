//! Canvas widget that shows the image and its bounding boxes
//!
//! The widget is stateless with respect to boxes: it reads the [`Editor`]
//! to draw and publishes [`CanvasEvent`]s in image coordinates. Only the
//! right-button pan anchor and the last laid-out size live in the widget
//! tree.

use cosmic::iced::mouse;
use cosmic::iced_core::{
    self, Border, Color, Length, Point, Rectangle, Shadow, Size,
    layout::{Limits, Node},
    renderer::Quad,
    widget::{Tree, tree},
};
use cosmic::widget::Widget;

use crate::capture::image::LoadedImage;
use crate::domain::{BoundingBox, Grip, Viewport};
use crate::session::editor::{Editor, Gesture};
use crate::session::messages::CanvasEvent;

const OUTLINE_WIDTH: f32 = 2.0;
const PREVIEW_FILL_ALPHA: f32 = 0.15;

/// Colors and sizes used to paint boxes
#[derive(Debug, Clone, Copy)]
pub struct CanvasStyle {
    pub box_color: Color,
    pub selected_color: Color,
    /// Grip square side in logical pixels
    pub handle_size: f32,
}

pub struct BoxCanvas<'a, Msg> {
    editor: &'a Editor,
    picture: Option<&'a LoadedImage>,
    viewport: Viewport,
    style: CanvasStyle,
    on_event: Box<dyn Fn(CanvasEvent) -> Msg + 'a>,
}

impl<'a, Msg> BoxCanvas<'a, Msg> {
    pub fn new(
        editor: &'a Editor,
        picture: Option<&'a LoadedImage>,
        viewport: Viewport,
        style: CanvasStyle,
        on_event: impl Fn(CanvasEvent) -> Msg + 'a,
    ) -> Self {
        Self {
            editor,
            picture,
            viewport,
            style,
            on_event: Box::new(on_event),
        }
    }

    /// Widget-space rectangle of an image-space box, relative to `origin`
    fn box_bounds(&self, bbox: &BoundingBox, origin: Point) -> Rectangle {
        let (left, top) = self.viewport.to_widget(bbox.x_min as f32, bbox.y_min as f32);
        let (right, bottom) = self.viewport.to_widget(bbox.x_max as f32, bbox.y_max as f32);
        Rectangle {
            x: origin.x + left,
            y: origin.y + top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Image-space position of the cursor, or `None` when it is outside `bounds`
    fn image_position(&self, cursor: mouse::Cursor, bounds: Rectangle) -> Option<(f32, f32)> {
        let p = cursor.position_in(bounds)?;
        Some(self.viewport.to_image(p.x, p.y))
    }

    fn hovered_grip(&self, position: (f32, f32)) -> Option<Grip> {
        let id = self.editor.primary()?;
        let tolerance = self.viewport.image_distance(self.style.handle_size);
        self.editor
            .get(id)?
            .grip_at(position.0, position.1, tolerance)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CanvasState {
    left_down: bool,
    /// Last pointer position of a right-button pan, widget space
    pan_from: Option<Point>,
    area: Option<Size>,
}

fn grip_interaction(grip: Grip) -> mouse::Interaction {
    match grip {
        Grip::N | Grip::S => mouse::Interaction::ResizingVertically,
        Grip::E | Grip::W => mouse::Interaction::ResizingHorizontally,
        Grip::NW | Grip::SE => mouse::Interaction::ResizingDiagonallyDown,
        Grip::NE | Grip::SW => mouse::Interaction::ResizingDiagonallyUp,
    }
}

impl<Msg: Clone + 'static> Widget<Msg, cosmic::Theme, cosmic::Renderer> for BoxCanvas<'_, Msg> {
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn state(&self) -> tree::State {
        tree::State::new(CanvasState::default())
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<CanvasState>()
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &cosmic::Renderer, limits: &Limits) -> Node {
        let limits = limits.width(Length::Fill).height(Length::Fill);
        Node::new(limits.resolve(Length::Fill, Length::Fill, Size::ZERO))
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: iced_core::Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &cosmic::Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<CanvasState>();
        if state.pan_from.is_some() {
            return mouse::Interaction::Grabbing;
        }
        match self.editor.gesture() {
            Some(Gesture::Move { .. }) => return mouse::Interaction::Grabbing,
            Some(Gesture::Resize { grip, .. }) => return grip_interaction(*grip),
            Some(Gesture::Draw { .. }) => return mouse::Interaction::Crosshair,
            None => {}
        }

        let Some(position) = self.image_position(cursor, layout.bounds()) else {
            return mouse::Interaction::default();
        };
        if self.editor.image().is_none() {
            return mouse::Interaction::default();
        }
        if let Some(grip) = self.hovered_grip(position) {
            grip_interaction(grip)
        } else if self.editor.session().topmost_at(position.0, position.1).is_some() {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::Crosshair
        }
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: iced_core::Event,
        layout: iced_core::Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &cosmic::Renderer,
        _clipboard: &mut dyn iced_core::Clipboard,
        shell: &mut iced_core::Shell<'_, Msg>,
        _viewport: &Rectangle,
    ) -> iced_core::event::Status {
        let state = tree.state.downcast_mut::<CanvasState>();
        let bounds = layout.bounds();

        if state.area != Some(bounds.size()) {
            state.area = Some(bounds.size());
            shell.publish((self.on_event)(CanvasEvent::Resized(
                bounds.width,
                bounds.height,
            )));
        }

        let iced_core::Event::Mouse(event) = event else {
            return iced_core::event::Status::Ignored;
        };

        match event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                if self.editor.image().is_none() {
                    return iced_core::event::Status::Ignored;
                }
                let Some((x, y)) = self.image_position(cursor, bounds) else {
                    return iced_core::event::Status::Ignored;
                };
                state.left_down = true;
                shell.publish((self.on_event)(CanvasEvent::Press(x, y)));
                iced_core::event::Status::Captured
            }
            mouse::Event::ButtonPressed(mouse::Button::Right) => {
                let Some(p) = cursor.position_in(bounds) else {
                    return iced_core::event::Status::Ignored;
                };
                state.pan_from = Some(p);
                iced_core::event::Status::Captured
            }
            mouse::Event::CursorMoved { position } => {
                // Widget-relative, possibly outside the bounds; the editor clamps
                let p = Point::new(position.x - bounds.x, position.y - bounds.y);
                let mut status = iced_core::event::Status::Ignored;
                if let Some(from) = state.pan_from {
                    state.pan_from = Some(p);
                    shell.publish((self.on_event)(CanvasEvent::PanBy(p.x - from.x, p.y - from.y)));
                    status = iced_core::event::Status::Captured;
                }
                if state.left_down {
                    let (x, y) = self.viewport.to_image(p.x, p.y);
                    shell.publish((self.on_event)(CanvasEvent::Drag(x, y)));
                    status = iced_core::event::Status::Captured;
                }
                status
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if state.left_down => {
                state.left_down = false;
                shell.publish((self.on_event)(CanvasEvent::Release));
                iced_core::event::Status::Captured
            }
            mouse::Event::ButtonReleased(mouse::Button::Right) if state.pan_from.is_some() => {
                state.pan_from = None;
                iced_core::event::Status::Captured
            }
            mouse::Event::WheelScrolled { delta } => {
                let Some(p) = cursor.position_in(bounds) else {
                    return iced_core::event::Status::Ignored;
                };
                let dy = match delta {
                    mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => y,
                };
                if dy == 0.0 {
                    return iced_core::event::Status::Ignored;
                }
                shell.publish((self.on_event)(CanvasEvent::Zoom {
                    x: p.x,
                    y: p.y,
                    zoom_in: dy > 0.0,
                }));
                iced_core::event::Status::Captured
            }
            _ => iced_core::event::Status::Ignored,
        }
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut cosmic::Renderer,
        theme: &cosmic::Theme,
        _style: &iced_core::renderer::Style,
        layout: iced_core::Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        use cosmic::iced_core::Renderer as _;

        let bounds = layout.bounds();
        let origin = bounds.position();
        let cosmic_theme = theme.cosmic();
        let radius_s = cosmic_theme.radius_s();

        renderer.with_layer(bounds, |renderer| {
            if let Some(picture) = self.picture {
                let (x, y, width, height) = self.viewport.image_rect(picture.size);
                cosmic::iced_core::image::Renderer::draw_image(
                    renderer,
                    picture.handle.clone(),
                    cosmic::iced_core::image::FilterMethod::Linear,
                    Rectangle {
                        x: origin.x + x,
                        y: origin.y + y,
                        width,
                        height,
                    },
                    cosmic::iced::Radians(0.0),
                    1.0,
                    [0.0, 0.0, 0.0, 0.0],
                );
            }

            for (id, bbox) in self.editor.boxes() {
                let color = if self.editor.is_selected(id) {
                    self.style.selected_color
                } else {
                    self.style.box_color
                };
                renderer.fill_quad(
                    Quad {
                        bounds: self.box_bounds(bbox, origin),
                        border: Border {
                            radius: 0.0.into(),
                            width: OUTLINE_WIDTH,
                            color,
                        },
                        shadow: Shadow::default(),
                    },
                    Color::TRANSPARENT,
                );
            }

            if let Some(preview) = self.editor.preview() {
                let mut fill = self.style.selected_color;
                fill.a = PREVIEW_FILL_ALPHA;
                renderer.fill_quad(
                    Quad {
                        bounds: self.box_bounds(&preview, origin),
                        border: Border {
                            radius: 0.0.into(),
                            width: OUTLINE_WIDTH,
                            color: self.style.selected_color,
                        },
                        shadow: Shadow::default(),
                    },
                    fill,
                );
            }

            // Grips of the primary box
            let Some(bbox) = self.editor.primary().and_then(|id| self.editor.get(id)) else {
                return;
            };
            let side = self.style.handle_size;
            for grip in Grip::ALL {
                let (gx, gy) = bbox.grip_position(grip);
                let (wx, wy) = self.viewport.to_widget(gx, gy);
                renderer.fill_quad(
                    Quad {
                        bounds: Rectangle {
                            x: origin.x + wx - side / 2.0,
                            y: origin.y + wy - side / 2.0,
                            width: side,
                            height: side,
                        },
                        border: Border {
                            radius: radius_s.into(),
                            width: 1.0,
                            color: Color::WHITE,
                        },
                        shadow: Shadow::default(),
                    },
                    self.style.selected_color,
                );
            }
        });
    }
}

impl<'a, Message> From<BoxCanvas<'a, Message>> for cosmic::Element<'a, Message>
where
    Message: 'static + Clone,
{
    fn from(w: BoxCanvas<'a, Message>) -> cosmic::Element<'a, Message> {
        cosmic::Element::new(w)
    }
}
