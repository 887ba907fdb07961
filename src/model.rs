use crate::geometry::{Edge, Point, Rect};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Stable block identity, assigned at ingestion and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a connection in ingestion order. Doubles as its lane index.
pub type ConnectionIndex = usize;

// ────────────────────────────────────────────────────────────────────────────
// Block
// ────────────────────────────────────────────────────────────────────────────

/// One hardmacro: a mutable rectangle whose `area` is authoritative for resizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    pub area: f64,
    /// Lower-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Label shown inside the block: name, integer area and integer dimensions.
    pub fn label(&self) -> String {
        format!(
            "{}\n{} μm²\n{}×{}",
            self.name,
            self.area.trunc() as i64,
            self.width.trunc() as i64,
            self.height.trunc() as i64
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ports
// ────────────────────────────────────────────────────────────────────────────

/// Which end of a connection a port belongs to.
///
/// The start port is owned by the connection's `from` block, the end port by
/// its `to` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortEnd {
    Start,
    End,
}

impl PortEnd {
    pub fn as_str(self) -> &'static str {
        match self {
            PortEnd::Start => "start",
            PortEnd::End => "end",
        }
    }
}

/// A connection endpoint bound to one edge of its owning block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub x: f64,
    pub y: f64,
    pub edge: Edge,
}

impl Port {
    pub fn at(p: Point, edge: Edge) -> Self {
        Self {
            x: p.x,
            y: p.y,
            edge,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortPair {
    pub start: Port,
    pub end: Port,
}

impl PortPair {
    pub fn get(&self, end: PortEnd) -> &Port {
        match end {
            PortEnd::Start => &self.start,
            PortEnd::End => &self.end,
        }
    }

    pub fn get_mut(&mut self, end: PortEnd) -> &mut Port {
        match end {
            PortEnd::Start => &mut self.start,
            PortEnd::End => &mut self.end,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Connection
// ────────────────────────────────────────────────────────────────────────────

/// Weighted link between two blocks, stored once per unordered pair (`from < to`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: BlockId,
    pub to: BlockId,
    pub weight: f64,
    /// Materialised on first geometric need and kept across redraws.
    #[serde(default)]
    pub ports: Option<PortPair>,
}

impl Connection {
    pub fn new(from: BlockId, to: BlockId, weight: f64) -> Self {
        Self {
            from,
            to,
            weight,
            ports: None,
        }
    }

    /// Block owning the port at `end`.
    pub fn owner(&self, end: PortEnd) -> BlockId {
        match end {
            PortEnd::Start => self.from,
            PortEnd::End => self.to,
        }
    }

    /// Ends of this connection whose port is owned by `block`.
    ///
    /// Both ends are returned only for a self-loop, which ingestion never produces.
    pub fn ends_owned_by(&self, block: BlockId) -> impl Iterator<Item = PortEnd> + '_ {
        [PortEnd::Start, PortEnd::End]
            .into_iter()
            .filter(move |&end| self.owner(end) == block)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Floorplan
// ────────────────────────────────────────────────────────────────────────────

/// The complete editable model: blocks keyed by id in ingestion order, plus
/// connections in ingestion order.
///
/// The `IndexMap` gives id lookups without a linear scan while preserving the
/// list order that first-match hit-testing relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floorplan {
    pub blocks: IndexMap<BlockId, Block>,
    pub connections: Vec<Connection>,
}

impl Floorplan {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(&id)
    }

    /// First block (in list order) whose rectangle contains `p`.
    ///
    /// Blocks hidden underneath an earlier block at the same position cannot be picked.
    pub fn block_at(&self, p: Point) -> Option<BlockId> {
        self.blocks
            .values()
            .find(|b| b.rect().contains(p))
            .map(|b| b.id)
    }

    /// Replace the whole model. Materialised port pairs go with the old connections.
    pub fn replace_with(&mut self, other: Floorplan) {
        *self = other;
    }

    /// One-line status text for the toolbar.
    pub fn summary(&self) -> String {
        if self.blocks.is_empty() {
            "No data loaded".to_string()
        } else {
            format!(
                "Blocks: {} | Connections: {}",
                self.blocks.len(),
                self.connections.len()
            )
        }
    }

    /// Human readable title of a connection, e.g. `"A ↔ B"`.
    pub fn connection_title(&self, conn: &Connection) -> String {
        let name = |id: BlockId| {
            self.block(id)
                .map(|b| b.name.clone())
                .unwrap_or_else(|| format!("#{id}"))
        };
        format!("{} ↔ {}", name(conn.from), name(conn.to))
    }
}
