//! Resize handles of the selected block.
//!
//! Four square corner handles sit inside the block's corners. Two edge bands
//! follow: a vertical band along the right side (width resize) and a
//! horizontal band along the `y + height` side (height resize). Corners are
//! tested first, so they win where they overlap a band.

use crate::config::HandleConfig;
use crate::geometry::{Point, Rect, point_in_rect};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopRight,
    BottomRight,
    TopLeft,
    BottomLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    Corner(Corner),
    EdgeRight,
    /// The height band; it hugs the block's `y + height` side.
    EdgeBottom,
}

/// What a drag started on a block does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    Move,
    Width,
    Height,
    Corner,
}

impl Handle {
    pub fn resize_mode(self) -> ResizeMode {
        match self {
            Handle::Corner(_) => ResizeMode::Corner,
            Handle::EdgeRight => ResizeMode::Width,
            Handle::EdgeBottom => ResizeMode::Height,
        }
    }
}

fn corner_rects(r: Rect, size: f64) -> [(Corner, Rect); 4] {
    [
        (
            Corner::TopRight,
            Rect::new(r.right() - size, r.top() - size, size, size),
        ),
        (
            Corner::BottomRight,
            Rect::new(r.right() - size, r.bottom(), size, size),
        ),
        (
            Corner::TopLeft,
            Rect::new(r.left(), r.top() - size, size, size),
        ),
        (Corner::BottomLeft, Rect::new(r.left(), r.bottom(), size, size)),
    ]
}

/// Handle under `p` for a block occupying `r`, if any.
pub fn handle_at(p: Point, r: Rect, cfg: &HandleConfig) -> Option<Handle> {
    if let Some((corner, _)) = corner_rects(r, cfg.corner_size)
        .into_iter()
        .find(|(_, hr)| point_in_rect(p, *hr))
    {
        return Some(Handle::Corner(corner));
    }
    // The bands are open along their length so they never claim a corner point.
    if p.x >= r.right() - cfg.edge_width && p.y > r.bottom() && p.y < r.top() {
        return Some(Handle::EdgeRight);
    }
    if p.y >= r.top() - cfg.edge_height && p.x > r.left() && p.x < r.right() {
        return Some(Handle::EdgeBottom);
    }
    None
}

/// Resize mode for a press at `p` inside a block occupying `r`.
pub fn resize_mode_at(p: Point, r: Rect, cfg: &HandleConfig) -> ResizeMode {
    handle_at(p, r, cfg).map_or(ResizeMode::Move, Handle::resize_mode)
}

/// Rectangles to draw for each handle of a selected block.
///
/// The edge handles are drawn as small tabs centred on their band.
pub fn handle_rects(r: Rect, cfg: &HandleConfig) -> Vec<(Handle, Rect)> {
    let mut out: Vec<(Handle, Rect)> = corner_rects(r, cfg.corner_size)
        .into_iter()
        .map(|(c, hr)| (Handle::Corner(c), hr))
        .collect();
    out.push((
        Handle::EdgeRight,
        Rect::new(
            r.right() - cfg.edge_width,
            r.y + (r.height - cfg.edge_height) / 2.0,
            cfg.edge_width,
            cfg.edge_height,
        ),
    ));
    out.push((
        Handle::EdgeBottom,
        Rect::new(
            r.x + (r.width - cfg.edge_width) / 2.0,
            r.top() - cfg.edge_height,
            cfg.edge_width,
            cfg.edge_height,
        ),
    ));
    out
}
