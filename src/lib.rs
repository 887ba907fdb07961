//! Interactive hardmacro floorplan geometry.
//!
//! This crate ingests a labelled adjacency matrix (diagonal = block area,
//! upper triangle = connection weight) and provides the editing core behind a
//! floorplan canvas:
//!
//! - [`geometry`]: rectangle math, edge classification and projection
//! - [`model`]: blocks, connections and their edge-bound ports
//! - [`ports`]: keeping ports on their block edges as blocks change
//! - [`router`]: double-Z orthogonal paths with lane offsets and midpoints
//! - [`editor`]: the pointer-gesture state machine and block operations
//! - [`scene`]: a serialisable snapshot for whatever draws the canvas
//!
//! The binary `floorwright` loads a matrix CSV and prints the scene as JSON.

pub mod config;
pub mod editor;
pub mod geometry;
pub mod ingest;
pub mod model;
pub mod ports;
pub mod router;
pub mod scene;

pub use config::{FloorplanConfig, RouteMode};
pub use editor::EditorState;
pub use model::{Block, BlockId, Connection, Floorplan, Port, PortEnd, PortPair};
pub use scene::Scene;
