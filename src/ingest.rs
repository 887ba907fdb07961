//! Adjacency-matrix ingestion.
//!
//! The diagonal of a square matrix gives each block's area and the upper
//! triangle gives connection weights (`> 0` means connected). Validation runs
//! to completion before any block exists, so a rejected input never leaves a
//! half-built floorplan behind.

use crate::config::LayoutConfig;
use crate::model::{Block, BlockId, Connection, Floorplan};
use anyhow::Context;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("matrix input is empty")]
    Empty,
    #[error("number of row names ({rows}) must match number of column names ({columns})")]
    LabelCountMismatch { rows: usize, columns: usize },
    #[error("matrix must be square: row {row} has {found} values, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid number '{text}' at row {row}, column {column}")]
    InvalidNumber {
        row: usize,
        column: usize,
        text: String,
    },
    #[error("block '{name}' needs a non-negative area, got {area}")]
    NegativeArea { name: String, area: f64 },
}

/// A square matrix together with its row and column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    pub labels: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Build blocks and connections from a square matrix and one name per row.
///
/// Blocks are laid out on a grid (`columns` wide) starting at the configured
/// origin; each starts as a square of side `sqrt(area)`.
pub fn create_from_matrix(
    matrix: &[Vec<f64>],
    names: &[String],
    layout: &LayoutConfig,
) -> Result<Floorplan, IngestError> {
    let n = matrix.len();
    if n == 0 {
        return Err(IngestError::Empty);
    }
    if names.len() != n {
        return Err(IngestError::LabelCountMismatch {
            rows: n,
            columns: names.len(),
        });
    }
    for (row, values) in matrix.iter().enumerate() {
        if values.len() != n {
            return Err(IngestError::NotSquare {
                row,
                expected: n,
                found: values.len(),
            });
        }
    }
    for (i, name) in names.iter().enumerate() {
        let area = matrix[i][i];
        if area.is_nan() || area < 0.0 {
            return Err(IngestError::NegativeArea {
                name: name.clone(),
                area,
            });
        }
    }

    let columns = layout.columns.max(1);
    let mut floorplan = Floorplan::default();
    for (i, name) in names.iter().enumerate() {
        let area = matrix[i][i];
        let side = area.sqrt();
        let id = BlockId(i);
        floorplan.blocks.insert(
            id,
            Block {
                id,
                name: name.clone(),
                area,
                x: layout.origin_x + (i % columns) as f64 * layout.spacing_x,
                y: layout.origin_y + (i / columns) as f64 * layout.spacing_y,
                width: side,
                height: side,
            },
        );
    }
    for i in 0..n {
        for j in (i + 1)..n {
            let weight = matrix[i][j];
            if weight > 0.0 {
                floorplan
                    .connections
                    .push(Connection::new(BlockId(i), BlockId(j), weight));
            }
        }
    }
    log::info!("{}", floorplan.summary());
    Ok(floorplan)
}

impl LabeledMatrix {
    /// Validate label counts and build the floorplan.
    pub fn into_floorplan(self, layout: &LayoutConfig) -> Result<Floorplan, IngestError> {
        if self.labels.len() != self.columns.len() {
            return Err(IngestError::LabelCountMismatch {
                rows: self.labels.len(),
                columns: self.columns.len(),
            });
        }
        create_from_matrix(&self.values, &self.labels, layout)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CSV
// ────────────────────────────────────────────────────────────────────────────

/// Parse a labelled adjacency matrix.
///
/// The header row's first cell is the (ignored) index column title; the rest
/// are column labels. Each data row starts with its row label. Blank lines are
/// skipped.
pub fn parse_csv(text: &str) -> Result<LabeledMatrix, IngestError> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty());
    let header = lines.next().ok_or(IngestError::Empty)?;
    let columns: Vec<String> = split_csv_line(header).into_iter().skip(1).collect();

    let mut labels = Vec::new();
    let mut values = Vec::new();
    for (row, line) in lines.enumerate() {
        let mut cells = split_csv_line(line).into_iter();
        let label = cells.next().unwrap_or_default();
        let mut parsed = Vec::with_capacity(columns.len());
        for (column, cell) in cells.enumerate() {
            let v = cell
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| IngestError::InvalidNumber {
                    row,
                    column,
                    text: cell.clone(),
                })?;
            parsed.push(v);
        }
        labels.push(label);
        values.push(parsed);
    }
    if labels.is_empty() {
        return Err(IngestError::Empty);
    }
    Ok(LabeledMatrix {
        labels,
        columns,
        values,
    })
}

/// Split one CSV record, honouring double-quoted cells and `""` escapes.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cur.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(cur.trim().to_string());
                cur.clear();
            }
            _ => cur.push(c),
        }
    }
    cells.push(cur.trim().to_string());
    cells
}

/// Read, parse and ingest a matrix CSV file.
pub fn load_csv(path: impl AsRef<Path>, layout: &LayoutConfig) -> anyhow::Result<Floorplan> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Open {}", path.display()))?;
    let matrix =
        parse_csv(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    let floorplan = matrix
        .into_floorplan(layout)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(floorplan)
}
