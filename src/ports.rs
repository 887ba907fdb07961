//! Port model: the two edge-bound endpoints of every connection.
//!
//! A port always lies on the recorded edge of its owning block's current
//! rectangle. The hooks in this module re-establish that after the owning
//! block moves or is resized, and after the port itself is dragged.
//!
//! Port pairs are created lazily: [`ensure_port_pairs`] fills in any
//! connection that has none yet and leaves existing pairs untouched, so
//! repeated redraws never disturb a port the user has placed.

use crate::config::PortConfig;
use crate::geometry::{self, Edge, Point, Rect};
use crate::model::{Block, BlockId, ConnectionIndex, Floorplan, Port, PortEnd, PortPair};

/// Old and new dimensions of an accepted resize, as reported to [`on_block_resized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeKind {
    Width { old: f64, new: f64 },
    Height { old: f64, new: f64 },
    Corner {
        old_width: f64,
        new_width: f64,
        old_height: f64,
        new_height: f64,
    },
}

/// Point at fraction `t` along one edge of `block`.
pub fn edge_point(block: &Block, edge: Edge, t: f64) -> Point {
    geometry::edge_point(block.rect(), edge, t)
}

// ────────────────────────────────────────────────────────────────────────────
// Initial placement
// ────────────────────────────────────────────────────────────────────────────

/// Choose facing edges on `from` and `to` and place a port on each.
///
/// The dominant axis of the centre-to-centre vector picks the edge pair. Each
/// port sits at the block centre's projection shifted by
/// `lane_spread * lane_index` along the edge, kept `corner_margin` away from
/// the edge endpoints. The recorded edge is then derived from the anchor's
/// position with [`geometry::classify_edge`] and the configured
/// `edge_tolerance`.
pub fn initialize_port_pair(
    from: &Block,
    to: &Block,
    lane_index: usize,
    cfg: &PortConfig,
) -> PortPair {
    let (fc, tc) = (from.center(), to.center());
    let dx = tc.x - fc.x;
    let dy = tc.y - fc.y;

    let (start_edge, end_edge) = if dx.abs() > dy.abs() {
        if dx > 0.0 {
            (Edge::Right, Edge::Left)
        } else {
            (Edge::Left, Edge::Right)
        }
    } else if dy > 0.0 {
        (Edge::Top, Edge::Bottom)
    } else {
        (Edge::Bottom, Edge::Top)
    };

    let spread = cfg.lane_spread * lane_index as f64;
    PortPair {
        start: spread_anchor(from.rect(), start_edge, spread, cfg),
        end: spread_anchor(to.rect(), end_edge, spread, cfg),
    }
}

fn spread_anchor(rect: Rect, edge: Edge, spread: f64, cfg: &PortConfig) -> Port {
    let margin = cfg.corner_margin;
    let (lo, hi) = rect.edge_span(edge);
    let center = rect.center();
    let along = if edge.is_vertical() { center.y } else { center.x } + spread;
    let (min, max) = (lo + margin, hi - margin);
    // Edges shorter than twice the margin cannot honour it; use the middle.
    let along = if min > max {
        (lo + hi) / 2.0
    } else {
        along.clamp(min, max)
    };
    let line = rect.edge_line(edge);
    let p = if edge.is_vertical() {
        Point::new(line, along)
    } else {
        Point::new(along, line)
    };
    // The recorded edge is whichever edge line the anchor lies on, first match
    // in right, left, top, bottom order. On short edges that can be a
    // neighbouring edge, so the anchor is snapped onto it.
    let bound = geometry::classify_edge(p, rect, cfg.edge_tolerance).unwrap_or(edge);
    Port::at(rect.project_onto_edge(p, bound), bound)
}

/// Materialise port pairs for every connection that has none yet.
///
/// The lane index is the connection's ingestion index. Returns how many pairs
/// were created; a second call returns 0 and changes nothing.
pub fn ensure_port_pairs(floorplan: &mut Floorplan, cfg: &PortConfig) -> usize {
    let blocks = &floorplan.blocks;
    let mut created = 0;
    for (lane, conn) in floorplan.connections.iter_mut().enumerate() {
        if conn.ports.is_some() {
            continue;
        }
        let (Some(from), Some(to)) = (blocks.get(&conn.from), blocks.get(&conn.to)) else {
            log::warn!(
                "connection {} references missing block ({} -> {})",
                lane,
                conn.from,
                conn.to
            );
            continue;
        };
        conn.ports = Some(initialize_port_pair(from, to, lane, cfg));
        created += 1;
    }
    created
}

// ────────────────────────────────────────────────────────────────────────────
// Block mutation hooks
// ────────────────────────────────────────────────────────────────────────────

/// Collect `(connection, end)` for every materialised port owned by `block`.
pub fn ports_owned_by(floorplan: &Floorplan, block: BlockId) -> Vec<(ConnectionIndex, PortEnd)> {
    floorplan
        .connections
        .iter()
        .enumerate()
        .filter(|(_, c)| c.ports.is_some())
        .flat_map(|(i, c)| c.ends_owned_by(block).map(move |end| (i, end)))
        .collect()
}

fn for_each_owned_port(floorplan: &mut Floorplan, block: BlockId, mut f: impl FnMut(&mut Port)) {
    for conn in floorplan.connections.iter_mut() {
        let (from, to) = (conn.from, conn.to);
        let Some(pair) = conn.ports.as_mut() else {
            continue;
        };
        if from == block {
            f(&mut pair.start);
        }
        if to == block {
            f(&mut pair.end);
        }
    }
}

/// Translate every port owned by `block` by `(dx, dy)`; edges are unchanged.
pub fn on_block_moved(floorplan: &mut Floorplan, block: BlockId, dx: f64, dy: f64) {
    for_each_owned_port(floorplan, block, |port| {
        port.x += dx;
        port.y += dy;
    });
}

/// Re-bind the ports of a resized block to its new rectangle.
///
/// Edges whose line moved with the resized dimension get the moving
/// coordinate snapped; edges perpendicular to it get the along-edge
/// coordinate remapped proportionally. The block origin does not move during
/// a resize, so old and new origins coincide.
pub fn on_block_resized(floorplan: &mut Floorplan, block: BlockId, kind: ResizeKind) {
    let Some(rect) = floorplan.block(block).map(Block::rect) else {
        return;
    };
    for_each_owned_port(floorplan, block, |port| resize_port(port, rect, kind));
}

fn resize_port(port: &mut Port, rect: Rect, kind: ResizeKind) {
    match kind {
        ResizeKind::Width { old, new } => remap_width(port, rect, old, new),
        ResizeKind::Height { old, new } => remap_height(port, rect, old, new),
        ResizeKind::Corner {
            old_width,
            new_width,
            old_height,
            new_height,
        } => {
            remap_width(port, rect, old_width, new_width);
            remap_height(port, rect, old_height, new_height);
        }
    }
    // An area-preserving resize changes the other dimension too; land back on the edge.
    let p = rect.project_onto_edge(port.point(), port.edge);
    port.x = p.x;
    port.y = p.y;
}

fn remap_width(port: &mut Port, rect: Rect, old: f64, new: f64) {
    match port.edge {
        Edge::Right => port.x = rect.right(),
        Edge::Left => port.x = rect.left(),
        Edge::Top | Edge::Bottom => {
            if old > 0.0 {
                port.x = rect.x + (port.x - rect.x) / old * new;
            }
        }
    }
}

fn remap_height(port: &mut Port, rect: Rect, old: f64, new: f64) {
    match port.edge {
        Edge::Top => port.y = rect.top(),
        Edge::Bottom => port.y = rect.bottom(),
        Edge::Left | Edge::Right => {
            if old > 0.0 {
                port.y = rect.y + (port.y - rect.y) / old * new;
            }
        }
    }
}

/// Move every port of `block` from `old_rect` onto the block's current
/// rectangle, keeping each port's edge and fractional position along it.
///
/// Used after a direct property edit, which may change position and both
/// dimensions at once.
pub fn reanchor_ports(floorplan: &mut Floorplan, block: BlockId, old_rect: Rect) {
    let Some(rect) = floorplan.block(block).map(Block::rect) else {
        return;
    };
    for_each_owned_port(floorplan, block, |port| {
        let (lo, hi) = old_rect.edge_span(port.edge);
        let along = if port.edge.is_vertical() {
            port.y
        } else {
            port.x
        };
        let t = if hi > lo { (along - lo) / (hi - lo) } else { 0.5 };
        let p = geometry::edge_point(rect, port.edge, t);
        port.x = p.x;
        port.y = p.y;
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Direct port manipulation
// ────────────────────────────────────────────────────────────────────────────

/// Re-bind a port to whichever edge of its owning block is nearest to `target`.
///
/// The along-edge coordinate is clamped into the edge span, so a port can be
/// walked all the way around the block. Returns the new edge, or `None` when
/// the connection, its ports or its block do not exist.
pub fn drag_port(
    floorplan: &mut Floorplan,
    conn: ConnectionIndex,
    end: PortEnd,
    target: Point,
) -> Option<Edge> {
    let owner = floorplan.connections.get(conn)?.owner(end);
    let rect = floorplan.block(owner)?.rect();
    let pair = floorplan.connections.get_mut(conn)?.ports.as_mut()?;

    let edge = geometry::nearest_edge(target, rect);
    let port = pair.get_mut(end);
    if port.edge != edge {
        log::debug!(
            "port {}:{} moved from {} edge to {} edge",
            conn,
            end.as_str(),
            port.edge,
            edge
        );
    }
    *port = Port::at(rect.project_onto_edge(target, edge), edge);
    Some(edge)
}

/// First port (connections in creation order, start before end) whose centre
/// lies within `radius` of `p`.
pub fn hit_test_port(
    floorplan: &Floorplan,
    p: Point,
    radius: f64,
) -> Option<(ConnectionIndex, PortEnd)> {
    floorplan
        .connections
        .iter()
        .enumerate()
        .find_map(|(i, conn)| {
            let pair = conn.ports.as_ref()?;
            [PortEnd::Start, PortEnd::End]
                .into_iter()
                .find(|&end| pair.get(end).point().distance(p) <= radius)
                .map(|end| (i, end))
        })
}
