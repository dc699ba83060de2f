//! Mapping between widget coordinates and image pixel coordinates

use super::geometry::ImageSize;

/// Zoom range and step used by [`Viewport::zoom_at`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    pub step: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            step: 1.1,
            min: 0.1,
            max: 5.0,
        }
    }
}

/// Scale and offset of the displayed image inside the canvas.
///
/// `widget = image * scale + offset`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Viewport {
    /// Fit the image inside `area`, centred, never scaling above 1:1
    pub fn fit(image: ImageSize, area: (f32, f32)) -> Self {
        let (area_w, area_h) = area;
        let img_w = image.width() as f32;
        let img_h = image.height() as f32;

        let scale = (area_w / img_w).min(area_h / img_h).min(1.0);
        // A collapsed canvas would give a zero or negative scale
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };

        Self {
            scale,
            offset_x: (area_w - img_w * scale) / 2.0,
            offset_y: (area_h - img_h * scale) / 2.0,
        }
    }

    /// Widget position to image position
    pub fn to_image(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.offset_x) / self.scale,
            (y - self.offset_y) / self.scale,
        )
    }

    /// Image position to widget position
    pub fn to_widget(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale + self.offset_x,
            y * self.scale + self.offset_y,
        )
    }

    /// Image-space distance covered by `pixels` widget pixels
    pub fn image_distance(&self, pixels: f32) -> f32 {
        pixels / self.scale
    }

    /// Zoom one step in or out around a widget position.
    ///
    /// The image point under `(x, y)` stays under it. Returns false when the
    /// scale is already at the limit.
    pub fn zoom_at(&mut self, x: f32, y: f32, zoom_in: bool, limits: ZoomLimits) -> bool {
        let factor = if zoom_in {
            limits.step
        } else {
            1.0 / limits.step
        };
        let new_scale = (self.scale * factor).clamp(limits.min, limits.max);
        if (new_scale - self.scale).abs() < f32::EPSILON {
            return false;
        }

        let (img_x, img_y) = self.to_image(x, y);
        self.scale = new_scale;
        self.offset_x = x - img_x * new_scale;
        self.offset_y = y - img_y * new_scale;
        true
    }

    /// Shift the image by a widget-space delta
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Widget-space rectangle `(x, y, width, height)` covered by the image
    pub fn image_rect(&self, image: ImageSize) -> (f32, f32, f32, f32) {
        (
            self.offset_x,
            self.offset_y,
            image.width() as f32 * self.scale,
            image.height() as f32 * self.scale,
        )
    }
}

/// Viewport plus the canvas area it was fitted to
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewState {
    pub viewport: Viewport,
    /// Canvas size in logical pixels, known after the first layout
    pub area: Option<(f32, f32)>,
}

impl ViewState {
    /// Re-fit the viewport to the current area, if the area is known
    pub fn refit(&mut self, image: Option<ImageSize>) {
        if let (Some(image), Some(area)) = (image, self.area) {
            self.viewport = Viewport::fit(image, area);
        }
    }

    /// Record a new canvas size and re-fit to it
    pub fn resize(&mut self, area: (f32, f32), image: Option<ImageSize>) {
        self.area = Some(area);
        self.refit(image);
    }

    /// Zoom around the canvas centre
    pub fn zoom_centered(&mut self, zoom_in: bool, limits: ZoomLimits) -> bool {
        let (w, h) = self.area.unwrap_or_default();
        self.viewport.zoom_at(w / 2.0, h / 2.0, zoom_in, limits)
    }
}
