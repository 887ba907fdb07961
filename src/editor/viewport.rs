//! Visible model-space window of the canvas.
//!
//! The core always works in model coordinates; the viewport only records which
//! part of the plane is visible and maps between model and screen space for a
//! presentation layer. While `auto_fit` is set the window follows the blocks'
//! bounding box on every redraw; zooming, explicit fitting or dragging turn
//! it off until [`Viewport::reset`].

use crate::config::ViewConfig;
use crate::geometry::{Point, Rect};
use crate::model::Floorplan;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub auto_fit: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
            auto_fit: true,
        }
    }
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Drag the view with the pointer: limits move opposite to the delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x_min -= dx;
        self.x_max -= dx;
        self.y_min -= dy;
        self.y_max -= dy;
    }

    fn scale(&mut self, factor: f64) {
        let c = self.center();
        let half_w = self.width() * factor / 2.0;
        let half_h = self.height() * factor / 2.0;
        self.x_min = c.x - half_w;
        self.x_max = c.x + half_w;
        self.y_min = c.y - half_h;
        self.y_max = c.y + half_h;
    }

    /// Shrink the visible range about its centre. No-op on an empty floorplan.
    pub fn zoom_in(&mut self, floorplan: &Floorplan, cfg: &ViewConfig) {
        if floorplan.is_empty() {
            return;
        }
        self.auto_fit = false;
        self.scale(1.0 - cfg.zoom_step);
    }

    /// Grow the visible range about its centre. No-op on an empty floorplan.
    pub fn zoom_out(&mut self, floorplan: &Floorplan, cfg: &ViewConfig) {
        if floorplan.is_empty() {
            return;
        }
        self.auto_fit = false;
        self.scale(1.0 + cfg.zoom_step);
    }

    fn fit_with_padding(&mut self, floorplan: &Floorplan, padding: f64) -> bool {
        let Some(bounds) = Rect::bounding(floorplan.blocks.values().map(|b| b.rect())) else {
            return false;
        };
        self.x_min = bounds.left() - padding;
        self.x_max = bounds.right() + padding;
        self.y_min = bounds.bottom() - padding;
        self.y_max = bounds.top() + padding;
        true
    }

    /// Explicit "fit to screen": frame every block and stop auto-fitting.
    pub fn fit(&mut self, floorplan: &Floorplan, cfg: &ViewConfig) {
        if self.fit_with_padding(floorplan, cfg.fit_padding) {
            self.auto_fit = false;
        }
    }

    /// Called on redraw; frames the blocks only while auto-fit is enabled.
    pub fn auto_fit(&mut self, floorplan: &Floorplan, cfg: &ViewConfig) {
        if self.auto_fit {
            self.fit_with_padding(floorplan, cfg.auto_fit_padding);
        }
    }

    /// Re-enable automatic fitting.
    pub fn reset(&mut self) {
        self.auto_fit = true;
    }

    /// Map a model point to screen pixels for a canvas of `size` (y grows downwards on screen).
    pub fn to_screen(&self, p: Point, size: (f64, f64)) -> Point {
        let sx = (p.x - self.x_min) / self.width() * size.0;
        let sy = (self.y_max - p.y) / self.height() * size.1;
        Point::new(sx, sy)
    }

    /// Inverse of [`Viewport::to_screen`].
    pub fn to_model(&self, p: Point, size: (f64, f64)) -> Point {
        let mx = self.x_min + p.x / size.0 * self.width();
        let my = self.y_max - p.y / size.1 * self.height();
        Point::new(mx, my)
    }
}
