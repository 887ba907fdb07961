//! Axis-aligned rectangle math shared by the block, port and routing layers.
//!
//! All coordinates live in model space: a single continuous plane with `x`
//! growing to the right and `y` growing upwards. A [`Rect`] is anchored at its
//! lower-left corner, so its `top` edge sits at `y + height`.
//!
//! Queries that may find nothing (edge classification, hit tests) return
//! `Option` and callers branch on `None` instead of assuming a hit.

use serde::{Deserialize, Serialize};
use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// Point
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Point, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Edge
// ────────────────────────────────────────────────────────────────────────────

/// One side of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Left and right edges are vertical lines (constant `x`).
    pub fn is_vertical(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rect
// ────────────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        point_in_rect(p, *self)
    }

    /// Coordinate of the line an edge lies on (`x` for vertical edges, `y` otherwise).
    pub fn edge_line(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Left => self.left(),
            Edge::Right => self.right(),
            Edge::Top => self.top(),
            Edge::Bottom => self.bottom(),
        }
    }

    /// Extent of an edge along its own direction as `(min, max)`.
    ///
    /// Vertical edges run bottom to top, horizontal edges run left to right.
    pub fn edge_span(&self, edge: Edge) -> (f64, f64) {
        if edge.is_vertical() {
            (self.bottom(), self.top())
        } else {
            (self.left(), self.right())
        }
    }

    /// Project `p` onto `edge`, clamping the along-edge coordinate into the edge span.
    pub fn project_onto_edge(&self, p: Point, edge: Edge) -> Point {
        let (lo, hi) = self.edge_span(edge);
        let line = self.edge_line(edge);
        if edge.is_vertical() {
            Point::new(line, clamp_span(p.y, lo, hi))
        } else {
            Point::new(clamp_span(p.x, lo, hi), line)
        }
    }

    /// True when `p` lies on the line of `edge` (within `eps`) and inside its span.
    pub fn is_on_edge(&self, p: Point, edge: Edge, eps: f64) -> bool {
        let (lo, hi) = self.edge_span(edge);
        let (across, along) = if edge.is_vertical() {
            (p.x, p.y)
        } else {
            (p.y, p.x)
        };
        (across - self.edge_line(edge)).abs() <= eps && along >= lo - eps && along <= hi + eps
    }

    /// Smallest rectangle covering every rectangle yielded by `rects`.
    pub fn bounding<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
        let mut iter = rects.into_iter();
        let first = iter.next()?;
        let (mut x0, mut y0, mut x1, mut y1) =
            (first.left(), first.bottom(), first.right(), first.top());
        for r in iter {
            x0 = x0.min(r.left());
            y0 = y0.min(r.bottom());
            x1 = x1.max(r.right());
            y1 = y1.max(r.top());
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Clamp without panicking on an inverted span (`lo > hi` yields the midpoint).
fn clamp_span(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return (lo + hi) / 2.0;
    }
    v.max(lo).min(hi)
}

// ────────────────────────────────────────────────────────────────────────────
// Free functions
// ────────────────────────────────────────────────────────────────────────────

/// Inclusive-bounds containment test used for block and handle hit-testing.
pub fn point_in_rect(p: Point, r: Rect) -> bool {
    p.x >= r.left() && p.x <= r.right() && p.y >= r.bottom() && p.y <= r.top()
}

/// Edge of `r` whose line `p` lies strictly within `tolerance` of.
///
/// Near a corner more than one edge matches; the first match in the order
/// right, left, top, bottom wins. Returns `None` when no edge is close enough.
pub fn classify_edge(p: Point, r: Rect, tolerance: f64) -> Option<Edge> {
    [Edge::Right, Edge::Left, Edge::Top, Edge::Bottom]
        .into_iter()
        .find(|&edge| {
            let d = if edge.is_vertical() {
                p.x - r.edge_line(edge)
            } else {
                p.y - r.edge_line(edge)
            };
            d.abs() < tolerance
        })
}

/// Edge minimising the perpendicular distance from `p` to that edge's line.
///
/// Exact ties resolve in the order right, left, bottom, top.
pub fn nearest_edge(p: Point, r: Rect) -> Edge {
    let candidates = [
        (Edge::Right, (p.x - r.right()).abs()),
        (Edge::Left, (p.x - r.left()).abs()),
        (Edge::Bottom, (p.y - r.bottom()).abs()),
        (Edge::Top, (p.y - r.top()).abs()),
    ];
    let mut best = candidates[0];
    for cand in &candidates[1..] {
        // Strict comparison keeps the earlier edge on ties.
        if cand.1 < best.1 {
            best = *cand;
        }
    }
    best.0
}

/// Point at fraction `t` along `edge`, with `t` clamped into `[0, 1]`.
///
/// Left/right edges are parameterised bottom to top, top/bottom edges left to right.
pub fn edge_point(r: Rect, edge: Edge, t: f64) -> Point {
    let t = t.clamp(0.0, 1.0);
    let (lo, hi) = r.edge_span(edge);
    let along = lo + (hi - lo) * t;
    let line = r.edge_line(edge);
    if edge.is_vertical() {
        Point::new(line, along)
    } else {
        Point::new(along, line)
    }
}
