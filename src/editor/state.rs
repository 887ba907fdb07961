//! Editor state and the pointer-gesture state machine.
//!
//! [`EditorState`] owns the floorplan plus everything that only lives for the
//! duration of an editing session: the selected block, the hovered handle, the
//! viewport and the current gesture. A gesture is one [`DragMode`] value, so
//! combinations such as "panning while dragging a port" cannot be represented.
//!
//! Every gesture starts on [`EditorState::press`], is driven by
//! [`EditorState::pointer_move`] using the delta since the previous move
//! event, and ends on [`EditorState::release`], which always returns to
//! [`DragMode::Idle`].

use crate::config::FloorplanConfig;
use crate::geometry::Point;
use crate::model::{BlockId, ConnectionIndex, Floorplan, PortEnd};
use crate::ports;

use super::handles::{self, Handle, ResizeMode};
use super::operations::{self, EditError};
use super::viewport::Viewport;

// ────────────────────────────────────────────────────────────────────────────
// Drag state
// ────────────────────────────────────────────────────────────────────────────

/// What the current pointer gesture is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// No button held.
    #[default]
    Idle,
    /// Translating the view.
    Pan,
    /// Walking a port around its block's perimeter.
    Port {
        connection: ConnectionIndex,
        end: PortEnd,
    },
    /// Moving or resizing a block.
    Block { block: BlockId, mode: ResizeMode },
}

// ────────────────────────────────────────────────────────────────────────────
// EditorState
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EditorState {
    pub floorplan: Floorplan,
    pub config: FloorplanConfig,
    pub drag_mode: DragMode,
    pub selected_block: Option<BlockId>,
    /// Handle under the pointer on the selected block; presentation only.
    pub hover_handle: Option<Handle>,
    /// Pointer position at the previous press/move event of the gesture.
    pub last_pointer: Option<Point>,
    /// When set, every press pans the view instead of hit-testing.
    pub pan_mode: bool,
    /// When cleared, press and move events are ignored.
    pub interactive: bool,
    pub viewport: Viewport,
}

impl EditorState {
    /// The viewport starts fitted to the blocks so the first pan or zoom acts on
    /// the framed floorplan.
    pub fn new(floorplan: Floorplan, config: FloorplanConfig) -> Self {
        let mut viewport = Viewport::default();
        viewport.auto_fit(&floorplan, &config.view);
        Self {
            floorplan,
            config,
            drag_mode: DragMode::Idle,
            selected_block: None,
            hover_handle: None,
            last_pointer: None,
            pan_mode: false,
            interactive: true,
            viewport,
        }
    }

    /// Replace the whole floorplan (re-ingestion) and drop session state tied to it.
    pub fn load(&mut self, floorplan: Floorplan) {
        self.floorplan.replace_with(floorplan);
        self.drag_mode = DragMode::Idle;
        self.selected_block = None;
        self.hover_handle = None;
        self.last_pointer = None;
        self.viewport.reset();
        self.viewport.auto_fit(&self.floorplan, &self.config.view);
    }

    pub fn is_idle(&self) -> bool {
        self.drag_mode == DragMode::Idle
    }

    fn set_drag_mode(&mut self, mode: DragMode) {
        if self.drag_mode != mode {
            log::debug!("gesture {:?} -> {:?}", self.drag_mode, mode);
        }
        self.drag_mode = mode;
    }

    /// Pointer button pressed at model position `p`.
    ///
    /// Priority: pan mode, then ports, then blocks (first in list order). A
    /// press on empty canvas clears the selection.
    pub fn press(&mut self, p: Point) {
        if !self.interactive || self.floorplan.is_empty() {
            return;
        }
        if self.pan_mode {
            self.last_pointer = Some(p);
            self.set_drag_mode(DragMode::Pan);
            return;
        }

        ports::ensure_port_pairs(&mut self.floorplan, &self.config.ports);
        if let Some((connection, end)) =
            ports::hit_test_port(&self.floorplan, p, self.config.ports.radius)
        {
            self.last_pointer = Some(p);
            self.set_drag_mode(DragMode::Port { connection, end });
            return;
        }

        match self.floorplan.block_at(p) {
            Some(block) => {
                let rect = self.floorplan.blocks[&block].rect();
                let mode = handles::resize_mode_at(p, rect, &self.config.handles);
                self.selected_block = Some(block);
                self.last_pointer = Some(p);
                self.set_drag_mode(DragMode::Block { block, mode });
            }
            None => {
                self.selected_block = None;
                self.last_pointer = None;
                self.set_drag_mode(DragMode::Idle);
            }
        }
    }

    /// Pointer moved to model position `p`. Returns `true` when a redraw is needed.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        if !self.interactive {
            return false;
        }
        let mut changed = self.update_hover(p);

        let last = self.last_pointer;
        match self.drag_mode {
            DragMode::Idle => {}
            DragMode::Pan => {
                if let Some(last) = last {
                    self.viewport.pan(p.x - last.x, p.y - last.y);
                    self.viewport.auto_fit = false;
                    changed = true;
                }
                self.last_pointer = Some(p);
            }
            DragMode::Port { connection, end } => {
                ports::drag_port(&mut self.floorplan, connection, end, p);
                self.viewport.auto_fit = false;
                self.last_pointer = Some(p);
                changed = true;
            }
            DragMode::Block { block, mode } => {
                let Some(last) = last else {
                    return changed;
                };
                self.drag_block(block, mode, p.x - last.x, p.y - last.y);
                self.viewport.auto_fit = false;
                self.last_pointer = Some(p);
                changed = true;
            }
        }
        changed
    }

    fn drag_block(&mut self, id: BlockId, mode: ResizeMode, dx: f64, dy: f64) {
        let Some(block) = self.floorplan.block(id) else {
            return;
        };
        let (width, height) = (block.width, block.height);
        let min = self.config.layout.min_dimension;
        match mode {
            ResizeMode::Move => {
                operations::move_block(&mut self.floorplan, id, dx, dy);
            }
            ResizeMode::Width => {
                operations::resize_width(&mut self.floorplan, id, width + dx, min);
            }
            ResizeMode::Height => {
                operations::resize_height(&mut self.floorplan, id, height + dy, min);
            }
            ResizeMode::Corner => {
                operations::resize_corner(&mut self.floorplan, id, width + dx, height + dy, min);
            }
        }
    }

    /// Recompute the hovered handle of the selected block. Never touches the model.
    fn update_hover(&mut self, p: Point) -> bool {
        let Some(block) = self.selected_block.and_then(|id| self.floorplan.block(id)) else {
            return false;
        };
        let hover = handles::handle_at(p, block.rect(), &self.config.handles);
        if hover != self.hover_handle {
            self.hover_handle = hover;
            return true;
        }
        false
    }

    /// Pointer button released: end the gesture and clear transient flags.
    pub fn release(&mut self) {
        self.set_drag_mode(DragMode::Idle);
        self.last_pointer = None;
        self.hover_handle = None;
    }

    /// Apply the text of a block's property panel.
    pub fn edit_properties(&mut self, id: BlockId, fields: [&str; 5]) -> Result<(), EditError> {
        operations::edit_properties(&mut self.floorplan, id, fields)
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(&self.floorplan, &self.config.view);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(&self.floorplan, &self.config.view);
    }

    pub fn fit_to_screen(&mut self) {
        self.viewport.fit(&self.floorplan, &self.config.view);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }
}
