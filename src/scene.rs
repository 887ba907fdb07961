//! Snapshot of everything a presentation layer draws.
//!
//! Building a scene is a read of the editor state, apart from materialising
//! missing port pairs (which is idempotent) and letting an auto-fitting
//! viewport follow the blocks. Drawing the same state twice yields the same
//! scene.

use crate::editor::EditorState;
use crate::editor::handles::{self, Handle};
use crate::editor::state::DragMode;
use crate::editor::viewport::Viewport;
use crate::geometry::{Point, Rect};
use crate::model::{BlockId, ConnectionIndex, Port, PortEnd};
use crate::ports;
use crate::router::{self, Segment};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandleView {
    pub handle: Handle,
    pub rect: Rect,
    pub hovered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockView {
    pub id: BlockId,
    pub name: String,
    pub rect: Rect,
    pub label: String,
    pub label_anchor: Point,
    pub selected: bool,
    /// Only populated for the selected block.
    pub handles: Vec<HandleView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionView {
    pub index: ConnectionIndex,
    pub from: BlockId,
    pub to: BlockId,
    pub title: String,
    pub weight: f64,
    pub segments: Vec<Segment>,
    pub start_port: Port,
    pub end_port: Port,
    /// End currently being dragged, if any.
    pub active_port: Option<PortEnd>,
    pub label_anchor: Point,
    pub lane_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub summary: String,
    pub viewport: Viewport,
    pub port_radius: f64,
    pub blocks: Vec<BlockView>,
    pub connections: Vec<ConnectionView>,
}

impl Scene {
    pub fn build(state: &mut EditorState) -> Scene {
        ports::ensure_port_pairs(&mut state.floorplan, &state.config.ports);
        state.viewport.auto_fit(&state.floorplan, &state.config.view);

        let floorplan = &state.floorplan;
        let blocks = floorplan
            .blocks
            .values()
            .map(|b| {
                let selected = state.selected_block == Some(b.id);
                let handles = if selected && state.interactive {
                    handles::handle_rects(b.rect(), &state.config.handles)
                        .into_iter()
                        .map(|(handle, rect)| HandleView {
                            handle,
                            rect,
                            hovered: state.hover_handle == Some(handle),
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                BlockView {
                    id: b.id,
                    name: b.name.clone(),
                    rect: b.rect(),
                    label: b.label(),
                    label_anchor: b.center(),
                    selected,
                    handles,
                }
            })
            .collect();

        let connections = router::route_all(floorplan, &state.config.route)
            .into_iter()
            .filter_map(|route| {
                let conn = floorplan.connections.get(route.connection)?;
                let pair = conn.ports?;
                let active_port = match state.drag_mode {
                    DragMode::Port { connection, end } if connection == route.connection => {
                        Some(end)
                    }
                    _ => None,
                };
                Some(ConnectionView {
                    index: route.connection,
                    from: conn.from,
                    to: conn.to,
                    title: floorplan.connection_title(conn),
                    weight: route.weight,
                    segments: route.segments,
                    start_port: pair.start,
                    end_port: pair.end,
                    active_port,
                    label_anchor: route.label_anchor,
                    lane_offset: route.lane_offset,
                })
            })
            .collect();

        Scene {
            summary: floorplan.summary(),
            viewport: state.viewport,
            port_radius: state.config.ports.radius,
            blocks,
            connections,
        }
    }
}
