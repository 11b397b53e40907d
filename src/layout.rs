//! Sizing and pointer math shared by the page components.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::DisplayRatios;

/// Pointer position used whenever the pointer is outside the canvas.
pub const POINTER_CENTER: [f32; 2] = [0.5, 0.5];

/// Side of the square canvas area: `ratio * min(width, height)`.
pub fn canvas_size(viewport_width: f64, viewport_height: f64, ratio: f64) -> f64 {
    viewport_width.min(viewport_height).max(0.0) * ratio
}

/// Side of the circular center display for a given canvas size.
///
/// Narrow viewports give the display a larger share of the canvas so the
/// text stays legible.
pub fn display_size(canvas_size: f64, viewport_width: f64, ratios: &DisplayRatios) -> f64 {
    let ratio = if viewport_width < ratios.narrow_below_px {
        ratios.narrow
    } else if viewport_width < ratios.moderate_below_px {
        ratios.moderate
    } else {
        ratios.base
    };
    canvas_size * ratio
}

/// Backing-store size in device pixels for a CSS-pixel size. Never zero.
pub fn device_pixels(css_width: f64, css_height: f64, pixel_ratio: f64) -> (u32, u32) {
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
    let scale = |v: f64| (v * ratio).round().max(1.0) as u32;
    (scale(css_width), scale(css_height))
}

/// On-screen bounding box of an element, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position relative to `rect`, with (0, 0) at its top-left corner.
pub fn normalize_pointer(client_x: f64, client_y: f64, rect: Rect) -> [f32; 2] {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return POINTER_CENTER;
    }
    [
        ((client_x - rect.left) / rect.width) as f32,
        ((client_y - rect.top) / rect.height) as f32,
    ]
}

/// Latest pointer position, written by pointer events and read by the render
/// step every frame. Writing it never causes the GL program to be rebuilt.
#[derive(Clone, Debug)]
pub struct PointerCell(Rc<Cell<[f32; 2]>>);

impl Default for PointerCell {
    fn default() -> Self {
        Self(Rc::new(Cell::new(POINTER_CENTER)))
    }
}

impl PointerCell {
    pub fn get(&self) -> [f32; 2] {
        self.0.get()
    }

    pub fn set(&self, position: [f32; 2]) {
        self.0.set(position);
    }

    pub fn move_to(&self, client_x: f64, client_y: f64, rect: Rect) {
        self.set(normalize_pointer(client_x, client_y, rect));
    }

    pub fn reset(&self) {
        self.set(POINTER_CENTER);
    }
}
