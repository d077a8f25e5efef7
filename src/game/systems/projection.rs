//! Isometric projection.
//!
//! Grid (row, col) to screen coordinates for the 2:1 diamond layout. Rows run
//! down-left on screen and columns down-right.

use serde::{Deserialize, Serialize};

use crate::game::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

/// Size of one diamond in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileSize {
    pub width: f32,
    pub height: f32,
}

impl TileSize {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// `x = origin_x + (col - row) * half_w`, `y = origin_y + (row + col) * half_h`.
pub fn project(
    row: f32,
    col: f32,
    tile_half_width: f32,
    tile_half_height: f32,
    origin_x: f32,
    origin_y: f32,
) -> (f32, f32) {
    let x = origin_x + (col - row) * tile_half_width;
    let y = origin_y + (row + col) * tile_half_height;
    (x, y)
}

/// Screen position of a tile.
pub fn project_tile(pos: Position, tile: TileSize, origin: (f32, f32)) -> ScreenPoint {
    let (x, y) = project(
        pos.row as f32,
        pos.col as f32,
        tile.half_width(),
        tile.half_height(),
        origin.0,
        origin.1,
    );
    ScreenPoint { x, y }
}

/// Screen position of a sprite standing on a tile, vertically centred on the
/// diamond: shifted down by half a tile and up by half the sprite height.
pub fn project_sprite(
    pos: Position,
    tile: TileSize,
    origin: (f32, f32),
    sprite_height: f32,
) -> ScreenPoint {
    let base = project_tile(pos, tile, origin);
    ScreenPoint {
        x: base.x,
        y: base.y + tile.half_height() - sprite_height / 2.0,
    }
}
