//! Block editing operations.
//!
//! Every operation mutates the [`Floorplan`] in place and keeps the ports of
//! the touched block bound to its edges, the same way moving a block drags
//! the ends of its connection lines along with it.
//!
//! # Area preservation
//!
//! Resizes never set both dimensions independently: the requested dimension
//! is applied and the other is derived from the block's stored `area`. A
//! resize that would leave either dimension at or below the minimum is a
//! silent no-op, since it happens continuously while a handle is dragged.

use crate::geometry::Rect;
use crate::model::{BlockId, Floorplan};
use crate::ports::{self, ResizeKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("unknown block id {0}")]
    UnknownBlock(BlockId),
    #[error("{field}: '{text}' is not a valid number")]
    NotANumber { field: &'static str, text: String },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

// ────────────────────────────────────────────────────────────────────────────
// Move
// ────────────────────────────────────────────────────────────────────────────

/// Translate a block by `(dx, dy)` and carry its ports along.
///
/// No bounds clamping. Returns `false` if the block does not exist.
pub fn move_block(floorplan: &mut Floorplan, id: BlockId, dx: f64, dy: f64) -> bool {
    let Some(block) = floorplan.block_mut(id) else {
        return false;
    };
    block.x += dx;
    block.y += dy;
    ports::on_block_moved(floorplan, id, dx, dy);
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Area-preserving resizes
// ────────────────────────────────────────────────────────────────────────────

/// Set the width and derive the height from the area.
///
/// Returns `true` when the resize was accepted.
pub fn resize_width(floorplan: &mut Floorplan, id: BlockId, new_width: f64, min: f64) -> bool {
    let Some(block) = floorplan.block_mut(id) else {
        return false;
    };
    let new_height = block.area / new_width;
    if !(new_width > min && new_height > min) {
        log::trace!("width resize of {} to {:.1} rejected", id, new_width);
        return false;
    }
    let old = block.width;
    block.width = new_width;
    block.height = new_height;
    log::debug!(
        "width resize: {:.1} × {:.1} = {:.1}",
        block.width,
        block.height,
        block.area
    );
    ports::on_block_resized(floorplan, id, ResizeKind::Width { old, new: new_width });
    true
}

/// Set the height and derive the width from the area.
pub fn resize_height(floorplan: &mut Floorplan, id: BlockId, new_height: f64, min: f64) -> bool {
    let Some(block) = floorplan.block_mut(id) else {
        return false;
    };
    let new_width = block.area / new_height;
    if !(new_height > min && new_width > min) {
        log::trace!("height resize of {} to {:.1} rejected", id, new_height);
        return false;
    }
    let old = block.height;
    block.height = new_height;
    block.width = new_width;
    log::debug!(
        "height resize: {:.1} × {:.1} = {:.1}",
        block.width,
        block.height,
        block.area
    );
    ports::on_block_resized(floorplan, id, ResizeKind::Height { old, new: new_height });
    true
}

/// Corner reshape.
///
/// The width follows the request and the height is derived from the area, so
/// `requested_height` only feeds the diagnostics; the port hook receives the
/// old and the actual new height so proportional remapping stays on the block.
pub fn resize_corner(
    floorplan: &mut Floorplan,
    id: BlockId,
    new_width: f64,
    requested_height: f64,
    min: f64,
) -> bool {
    let Some(block) = floorplan.block_mut(id) else {
        return false;
    };
    let new_height = block.area / new_width;
    if !(new_width > min && new_height > min) {
        log::trace!(
            "corner resize of {} to {:.1} × {:.1} rejected",
            id,
            new_width,
            requested_height
        );
        return false;
    }
    let (old_width, old_height) = (block.width, block.height);
    block.width = new_width;
    block.height = new_height;
    log::debug!(
        "corner reshape: {:.1} × {:.1} = {:.1}",
        block.width,
        block.height,
        block.area
    );
    ports::on_block_resized(
        floorplan,
        id,
        ResizeKind::Corner {
            old_width,
            new_width,
            old_height,
            new_height,
        },
    );
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Direct edits
// ────────────────────────────────────────────────────────────────────────────

/// Overwrite all five geometric fields of a block.
///
/// The stored `area` becomes authoritative for later resizes even if it does
/// not equal `width * height`. Materialised ports are re-anchored right away,
/// keeping their edge and relative position along it.
pub fn set_direct(
    floorplan: &mut Floorplan,
    id: BlockId,
    area: f64,
    width: f64,
    height: f64,
    x: f64,
    y: f64,
) -> Result<(), EditError> {
    let block = floorplan.block_mut(id).ok_or(EditError::UnknownBlock(id))?;
    let old_rect: Rect = block.rect();
    block.area = area;
    block.width = width;
    block.height = height;
    block.x = x;
    block.y = y;
    ports::reanchor_ports(floorplan, id, old_rect);
    Ok(())
}

/// Parsed contents of a block's property panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyEdit {
    pub area: f64,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl PropertyEdit {
    /// Parse the five text fields. Nothing is applied if any field is invalid.
    pub fn parse(
        area: &str,
        width: &str,
        height: &str,
        x: &str,
        y: &str,
    ) -> Result<Self, EditError> {
        let edit = Self {
            area: parse_field("area", area)?,
            width: parse_field("width", width)?,
            height: parse_field("height", height)?,
            x: parse_field("x", x)?,
            y: parse_field("y", y)?,
        };
        for (field, value) in [
            ("area", edit.area),
            ("width", edit.width),
            ("height", edit.height),
        ] {
            if value <= 0.0 {
                return Err(EditError::NonPositive { field, value });
            }
        }
        Ok(edit)
    }
}

fn parse_field(field: &'static str, text: &str) -> Result<f64, EditError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EditError::NotANumber {
            field,
            text: text.to_string(),
        })
}

/// Apply a parsed property edit through [`set_direct`].
pub fn apply_property_edit(
    floorplan: &mut Floorplan,
    id: BlockId,
    edit: PropertyEdit,
) -> Result<(), EditError> {
    set_direct(
        floorplan, id, edit.area, edit.width, edit.height, edit.x, edit.y,
    )
}

/// Parse and apply the raw property-panel text, logging rejected input.
pub fn edit_properties(
    floorplan: &mut Floorplan,
    id: BlockId,
    fields: [&str; 5],
) -> Result<(), EditError> {
    let [area, width, height, x, y] = fields;
    let result = PropertyEdit::parse(area, width, height, x, y)
        .and_then(|edit| apply_property_edit(floorplan, id, edit));
    if let Err(err) = &result {
        log::warn!("property edit of block {} rejected: {}", id, err);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn single(area: f64, w: f64, h: f64) -> Floorplan {
        let mut fp = Floorplan::default();
        fp.blocks.insert(
            BlockId(0),
            Block {
                id: BlockId(0),
                name: "A".into(),
                area,
                x: 0.0,
                y: 0.0,
                width: w,
                height: h,
            },
        );
        fp
    }

    #[test]
    fn width_resize_preserves_area() {
        let mut fp = single(100.0, 10.0, 10.0);
        assert!(resize_width(&mut fp, BlockId(0), 20.0, 1.0));
        let b = &fp.blocks[&BlockId(0)];
        assert_eq!((b.width, b.height, b.area), (20.0, 5.0, 100.0));
    }

    #[test]
    fn resize_below_minimum_is_a_no_op() {
        let mut fp = single(10_000.0, 100.0, 100.0);
        assert!(!resize_width(&mut fp, BlockId(0), 1_000.0, 10.0));
        assert!(!resize_height(&mut fp, BlockId(0), 10.0, 10.0));
        let b = &fp.blocks[&BlockId(0)];
        assert_eq!((b.width, b.height), (100.0, 100.0));
    }

    #[test]
    fn corner_ignores_requested_height() {
        let mut fp = single(10_000.0, 100.0, 100.0);
        assert!(resize_corner(&mut fp, BlockId(0), 200.0, 300.0, 10.0));
        let b = &fp.blocks[&BlockId(0)];
        assert_eq!((b.width, b.height), (200.0, 50.0));
    }

    #[test]
    fn unknown_block_is_reported() {
        let mut fp = single(100.0, 10.0, 10.0);
        assert!(!move_block(&mut fp, BlockId(9), 1.0, 1.0));
        assert_eq!(
            set_direct(&mut fp, BlockId(9), 1.0, 1.0, 1.0, 0.0, 0.0),
            Err(EditError::UnknownBlock(BlockId(9)))
        );
    }

    #[test]
    fn property_parse_rejects_text() {
        let err = PropertyEdit::parse("100", "ten", "10", "0", "0").unwrap_err();
        assert_eq!(
            err,
            EditError::NotANumber {
                field: "width",
                text: "ten".into()
            }
        );
        let err = PropertyEdit::parse("0", "10", "10", "0", "0").unwrap_err();
        assert!(matches!(err, EditError::NonPositive { field: "area", .. }));
    }
}
