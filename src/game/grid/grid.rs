use serde::{Deserialize, Serialize};

use crate::game::types::{Position, TileId};

/// Row-major grid of raw tile ids. Dimensions are fixed at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<TileId>>,
}

impl Grid {
    /// Grid of `height` rows by `width` columns filled with `fill`.
    pub fn filled(width: usize, height: usize, fill: TileId) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![fill; width]; height],
        }
    }

    /// Build from rows. Returns `None` if the rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<TileId>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn get(&self, pos: Position) -> Option<TileId> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Overwrite a cell. Returns false when `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, id: TileId) -> bool {
        match self.cells.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
            Some(cell) => {
                *cell = id;
                true
            }
            None => false,
        }
    }

    /// Every cell with its position, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TileId)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, id)| (Position { row, col }, *id))
        })
    }
}
