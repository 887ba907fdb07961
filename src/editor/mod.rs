//! Interactive floorplan editor.
//!
//! This module turns pointer events into block and port mutations:
//!
//! - **Block manipulation**: moving blocks and area-preserving width, height
//!   and corner resizes via handles
//! - **Port dragging**: walking a connection endpoint around its block
//! - **Property edits**: direct overwrite of area, size and position from text
//! - **Viewport**: panning, zooming and fitting the visible window
//! - **Replay**: running recorded pointer gestures headlessly

pub mod handles;
pub mod operations;
pub mod script;
pub mod state;
pub mod viewport;

pub use handles::{Corner, Handle, ResizeMode, handle_at, resize_mode_at};
pub use operations::{
    EditError, PropertyEdit, apply_property_edit, edit_properties, move_block, resize_corner,
    resize_height, resize_width, set_direct,
};
pub use script::{PointerEvent, ScriptError, parse_script};
pub use state::{DragMode, EditorState};
pub use viewport::Viewport;
