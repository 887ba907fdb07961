//! Double-Z routing between two edge-bound ports.
//!
//! Each route leaves the start port perpendicular to its edge, turns parallel
//! to it (the first Z-jog), crosses over on a bridge, and arrives at the end
//! port through the mirrored jog:
//!
//! ```text
//! start -> s1 -> s2 -> bridge -> d2 -> d1 -> end
//! ```
//!
//! The jog distance widens with every other connection whose same-typed port
//! coincides with this one, so stacked ports fan out into separate lanes.
//! Routing only reads the model; call [`crate::ports::ensure_port_pairs`]
//! first so every connection has ports.

use crate::config::{RouteConfig, RouteMode};
use crate::geometry::{Edge, Point};
use crate::model::{ConnectionIndex, Floorplan, Port, PortEnd};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

/// A routed connection ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub connection: ConnectionIndex,
    pub segments: Vec<Segment>,
    /// Point at half the path length; the weight label goes here.
    pub label_anchor: Point,
    pub length: f64,
    pub lane_offset: f64,
    pub weight: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Lane offsets
// ────────────────────────────────────────────────────────────────────────────

fn coincides(a: &Port, b: &Port, tolerance: f64) -> bool {
    a.edge == b.edge && (a.x - b.x).abs() < tolerance && (a.y - b.y).abs() < tolerance
}

/// Number of other connections whose port of the same end coincides with this
/// connection's port, taking the larger of the start and end counts.
pub fn overlap_count(floorplan: &Floorplan, conn: ConnectionIndex, tolerance: f64) -> usize {
    let Some(pair) = floorplan.connections.get(conn).and_then(|c| c.ports.as_ref()) else {
        return 0;
    };
    let count = |end: PortEnd| {
        let mine = pair.get(end);
        floorplan
            .connections
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != conn)
            .filter_map(|(_, other)| other.ports.as_ref())
            .filter(|other| coincides(other.get(end), mine, tolerance))
            .count()
    };
    count(PortEnd::Start).max(count(PortEnd::End))
}

/// Jog distance for a connection: `base_offset + overlap_step * overlaps`.
pub fn lane_offset(floorplan: &Floorplan, conn: ConnectionIndex, cfg: &RouteConfig) -> f64 {
    cfg.base_offset + cfg.overlap_step * overlap_count(floorplan, conn, cfg.overlap_tolerance) as f64
}

// ────────────────────────────────────────────────────────────────────────────
// Path construction
// ────────────────────────────────────────────────────────────────────────────

/// The two jog points at `port`: one step out perpendicular to the edge, then
/// one step along it towards `other`.
fn jog(port: &Port, other: Point, offset: f64) -> (Point, Point) {
    let p = port.point();
    match port.edge {
        Edge::Left | Edge::Right => {
            let out = if port.edge == Edge::Left { -offset } else { offset };
            let side = if p.y < other.y { offset } else { -offset };
            let first = p.offset(out, 0.0);
            (first, first.offset(0.0, side))
        }
        Edge::Top | Edge::Bottom => {
            let out = if port.edge == Edge::Bottom { -offset } else { offset };
            let side = if p.x < other.x { offset } else { -offset };
            let first = p.offset(0.0, out);
            (first, first.offset(side, 0.0))
        }
    }
}

/// Build the ordered segment list between two ports.
pub fn build_path(start: &Port, end: &Port, offset: f64, mode: RouteMode) -> Vec<Segment> {
    let (s1, s2) = jog(start, end.point(), offset);
    let (d1, d2) = jog(end, start.point(), offset);

    let mut segments = vec![Segment::new(start.point(), s1), Segment::new(s1, s2)];
    match mode {
        RouteMode::Straight => segments.push(Segment::new(s2, d2)),
        RouteMode::Manhattan => {
            let corner = Point::new(s2.x, d2.y);
            segments.push(Segment::new(s2, corner));
            segments.push(Segment::new(corner, d2));
        }
    }
    segments.push(Segment::new(d2, d1));
    segments.push(Segment::new(d1, end.point()));
    segments
}

/// Total length of `segments` and the point at exactly half of it.
///
/// Zero-length segments are skipped while walking; an empty or degenerate
/// path anchors at its first point.
pub fn path_midpoint(segments: &[Segment]) -> (Point, f64) {
    let total: f64 = segments.iter().map(Segment::length).sum();
    let Some(first) = segments.first() else {
        return (Point::default(), 0.0);
    };
    let half = total / 2.0;
    let mut walked = 0.0;
    for seg in segments {
        let len = seg.length();
        if len > 0.0 && walked + len >= half {
            return (seg.from.lerp(seg.to, (half - walked) / len), total);
        }
        walked += len;
    }
    (first.from, total)
}

/// Route one connection. `None` if it does not exist or has no ports yet.
pub fn route_connection(
    floorplan: &Floorplan,
    conn: ConnectionIndex,
    cfg: &RouteConfig,
) -> Option<Route> {
    let connection = floorplan.connections.get(conn)?;
    let pair = connection.ports.as_ref()?;
    let offset = lane_offset(floorplan, conn, cfg);
    let segments = build_path(&pair.start, &pair.end, offset, cfg.mode);
    let (label_anchor, length) = path_midpoint(&segments);
    Some(Route {
        connection: conn,
        segments,
        label_anchor,
        length,
        lane_offset: offset,
        weight: connection.weight,
    })
}

/// Route every connection that has ports, in connection order.
pub fn route_all(floorplan: &Floorplan, cfg: &RouteConfig) -> Vec<Route> {
    (0..floorplan.connections.len())
        .filter_map(|i| route_connection(floorplan, i, cfg))
        .collect()
}
