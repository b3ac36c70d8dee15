//! Plain-text form of grid snapshots for fixtures and debugging
//!
//! One grid row per line, cells separated by whitespace. A cell is its
//! options joined by `|` (or `-` when empty), followed by `!` if collapsed:
//!
//! ```text
//! 0! 0|1
//! 1  -
//! ```

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{Cell, GridSnapshot};
use std::fmt::Write;

/// Render a snapshot in the text form
pub fn format_snapshot(snapshot: &GridSnapshot) -> String {
    let mut out = String::new();
    let dimension = snapshot.dimension().max(1);
    for row in snapshot.cells().chunks(dimension) {
        let line: Vec<String> = row.iter().map(format_cell).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

fn format_cell(cell: &Cell) -> String {
    let mut token = if cell.options.is_empty() {
        "-".to_string()
    } else {
        cell.options
            .iter()
            .map(|tile| tile.to_string())
            .collect::<Vec<_>>()
            .join("|")
    };
    if cell.collapsed {
        token.push('!');
    }
    token
}

/// Parse the text form for a grid choosing among `tile_count` tiles
///
/// Blank lines are ignored. The number of non-blank lines sets the
/// dimension and every such line must hold that many cells.
///
/// # Errors
///
/// Returns an error if a row has the wrong length, a token is malformed,
/// or a tile index is not below `tile_count`
pub fn parse_snapshot(text: &str, tile_count: usize) -> Result<GridSnapshot> {
    let rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();
    let dimension = rows.len();

    let mut cells = Vec::with_capacity(dimension * dimension);
    for (line_number, line) in rows {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != dimension {
            return Err(AlgorithmError::SnapshotFormat {
                line: line_number,
                reason: format!("expected {dimension} cells, found {}", tokens.len()),
            });
        }
        for token in tokens {
            cells.push(parse_cell(token, tile_count, line_number)?);
        }
    }

    GridSnapshot::from_cells(dimension, cells).ok_or(AlgorithmError::SnapshotFormat {
        line: 0,
        reason: "grid is not square".to_string(),
    })
}

fn parse_cell(token: &str, tile_count: usize, line: usize) -> Result<Cell> {
    let (body, collapsed) = token
        .strip_suffix('!')
        .map_or((token, false), |body| (body, true));

    let mut options = TileBitset::new(tile_count);
    if body != "-" {
        for part in body.split('|') {
            let index: usize = part.parse().map_err(|e| AlgorithmError::SnapshotFormat {
                line,
                reason: format!("'{part}' in '{token}' is not a tile index: {e}"),
            })?;
            if index >= tile_count {
                return Err(AlgorithmError::InvalidTileIndex {
                    index,
                    max_tiles: tile_count,
                });
            }
            options.insert(index);
        }
    }

    Ok(Cell { options, collapsed })
}
