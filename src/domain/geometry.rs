//! Geometric types for image-space boxes and coordinates

use std::num::NonZeroU32;

use super::selection::Grip;

/// Pixel dimensions of a loaded image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl ImageSize {
    /// Create a size, or `None` when either side is zero
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    /// Get the width as u32
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Get the height as u32
    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// Largest valid x coordinate
    pub fn max_x(&self) -> u32 {
        self.width() - 1
    }

    /// Largest valid y coordinate
    pub fn max_y(&self) -> u32 {
        self.height() - 1
    }

    /// Clamp an image-space position onto a pixel of this image.
    ///
    /// Values are floored first, so `9.9` lands on pixel 9. NaN lands on 0.
    pub fn clamp(&self, x: f32, y: f32) -> PixelPoint {
        PixelPoint::new(clamp_axis(x, self.max_x()), clamp_axis(y, self.max_y()))
    }
}

fn clamp_axis(value: f32, max: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let floored = value.floor();
    if floored >= max as f32 {
        max
    } else {
        floored as u32
    }
}

fn clamp_i64(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

/// A pixel position inside an image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in image pixel coordinates.
///
/// Always normalised: `x_min <= x_max` and `y_min <= y_max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl BoundingBox {
    /// Create a box from two opposite edges on each axis, in any order
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            x_min: x0.min(x1),
            y_min: y0.min(y1),
            x_max: x0.max(x1),
            y_max: y0.max(y1),
        }
    }

    /// Create a box spanning two corner points
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    pub fn width(&self) -> u32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> u32 {
        self.y_max - self.y_min
    }

    /// Zero width or zero height
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check if an image-space point lies on or inside the box
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x_min as f32
            && x <= self.x_max as f32
            && y >= self.y_min as f32
            && y <= self.y_max as f32
    }

    /// Clamp every coordinate onto the image
    pub fn clamped(&self, size: ImageSize) -> Self {
        Self::new(
            self.x_min.min(size.max_x()),
            self.y_min.min(size.max_y()),
            self.x_max.min(size.max_x()),
            self.y_max.min(size.max_y()),
        )
    }

    /// Translate by a pixel offset, keeping the box size and keeping it on the image.
    ///
    /// A box larger than the image is first shrunk to fit.
    pub fn translated_within(&self, dx: i64, dy: i64, size: ImageSize) -> Self {
        let width = self.width().min(size.max_x());
        let height = self.height().min(size.max_y());
        let x_min = clamp_i64(i64::from(self.x_min) + dx, size.max_x() - width);
        let y_min = clamp_i64(i64::from(self.y_min) + dy, size.max_y() - height);
        Self {
            x_min,
            y_min,
            x_max: x_min + width,
            y_max: y_min + height,
        }
    }

    /// Move the edges named by `grip` by a pixel offset.
    ///
    /// Edges are clamped onto the image and the result is normalised, so
    /// dragging an edge past its opposite flips the box instead of
    /// producing negative extents.
    pub fn resized(&self, grip: Grip, dx: i64, dy: i64, size: ImageSize) -> Self {
        let mut left = i64::from(self.x_min);
        let mut top = i64::from(self.y_min);
        let mut right = i64::from(self.x_max);
        let mut bottom = i64::from(self.y_max);

        if grip.moves_left() {
            left += dx;
        }
        if grip.moves_right() {
            right += dx;
        }
        if grip.moves_top() {
            top += dy;
        }
        if grip.moves_bottom() {
            bottom += dy;
        }

        Self::new(
            clamp_i64(left, size.max_x()),
            clamp_i64(top, size.max_y()),
            clamp_i64(right, size.max_x()),
            clamp_i64(bottom, size.max_y()),
        )
    }

    /// Image-space position of a grip handle
    pub fn grip_position(&self, grip: Grip) -> (f32, f32) {
        let mid_x = (self.x_min as f32 + self.x_max as f32) / 2.0;
        let mid_y = (self.y_min as f32 + self.y_max as f32) / 2.0;
        let x = if grip.moves_left() {
            self.x_min as f32
        } else if grip.moves_right() {
            self.x_max as f32
        } else {
            mid_x
        };
        let y = if grip.moves_top() {
            self.y_min as f32
        } else if grip.moves_bottom() {
            self.y_max as f32
        } else {
            mid_y
        };
        (x, y)
    }

    /// Find the grip handle within `tolerance` of a point.
    ///
    /// Corners win over edges when both are in reach.
    pub fn grip_at(&self, x: f32, y: f32, tolerance: f32) -> Option<Grip> {
        Grip::ALL.into_iter().find(|grip| {
            let (gx, gy) = self.grip_position(*grip);
            (gx - x).abs() <= tolerance && (gy - y).abs() <= tolerance
        })
    }
}
