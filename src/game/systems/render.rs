//! Game rendering system.
//!
//! The game rules never draw. Each frame the loop captures a read-only
//! [`FrameSnapshot`] (tile and sprite placements already projected to screen
//! space) and hands it to a [`FrameRenderer`].

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::config::game::{
    COIN_ORIGIN, FALLBACK_COIN_SPRITE_SIZE, FALLBACK_TILE_HEIGHT, FALLBACK_TILE_WIDTH,
    PLAYER_ORIGIN, PLAYER_SPRITE_SIZE, TILE_ORIGIN,
};
use crate::game::map::AssetMetadata;
use crate::game::state::GameState;
use crate::game::systems::projection::{project_sprite, project_tile, ScreenPoint, TileSize};
use crate::game::types::{Facing, GameStatus, Position, TileId, TileKind};

/// Screen layout parameters for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayout {
    pub tile: TileSize,
    pub tile_origin: (f32, f32),
    pub player_origin: (f32, f32),
    pub coin_origin: (f32, f32),
    pub player_sprite: (f32, f32),
    pub coin_sprite: (f32, f32),
}

impl RenderLayout {
    pub fn from_assets(assets: &AssetMetadata) -> Self {
        let tile = match &assets.tileset {
            Some(t) => TileSize {
                width: t.tile_width as f32,
                height: t.tile_height as f32,
            },
            None => TileSize {
                width: FALLBACK_TILE_WIDTH,
                height: FALLBACK_TILE_HEIGHT,
            },
        };
        let coin_sprite = match &assets.coin {
            Some(c) => (c.width as f32, c.height as f32),
            None => FALLBACK_COIN_SPRITE_SIZE,
        };
        Self {
            tile,
            tile_origin: TILE_ORIGIN,
            player_origin: PLAYER_ORIGIN,
            coin_origin: COIN_ORIGIN,
            player_sprite: PLAYER_SPRITE_SIZE,
            coin_sprite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub pos: Position,
    pub id: TileId,
    pub kind: TileKind,
    /// Tileset column: the digit for digit ids, the kind's ordinal otherwise.
    pub tileset_index: u8,
    pub screen: ScreenPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpritePlacement {
    pub pos: Position,
    pub screen: ScreenPoint,
    pub facing: Option<Facing>,
}

/// Read-only view of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub width: usize,
    pub height: usize,
    pub status: GameStatus,
    pub moves: u32,
    pub coin_collected: bool,
    pub tiles: Vec<TilePlacement>,
    pub player: SpritePlacement,
    pub coins: Vec<SpritePlacement>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, layout: &RenderLayout) -> Self {
        let tiles = state
            .grid
            .iter()
            .map(|(pos, id)| {
                let kind = state.table.classify(id);
                TilePlacement {
                    pos,
                    id,
                    kind,
                    tileset_index: id.digit().unwrap_or(kind as u8),
                    screen: project_tile(pos, layout.tile, layout.tile_origin),
                }
            })
            .collect();

        let player = SpritePlacement {
            pos: state.player.pos,
            screen: project_sprite(
                state.player.pos,
                layout.tile,
                layout.player_origin,
                layout.player_sprite.1,
            ),
            facing: Some(state.player.facing),
        };

        let coins = state
            .uncollected_coins()
            .map(|coin| SpritePlacement {
                pos: coin.pos,
                screen: project_sprite(coin.pos, layout.tile, layout.coin_origin, layout.coin_sprite.1),
                facing: None,
            })
            .collect();

        FrameSnapshot {
            width: state.grid.width(),
            height: state.grid.height(),
            status: state.status,
            moves: state.moves,
            coin_collected: state.coin_collected(),
            tiles,
            player,
            coins,
        }
    }
}

/// Rendering collaborator driven once per frame.
pub trait FrameRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) -> io::Result<()>;
}

/// Draws the grid as text, one row per line.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn tile_symbol(kind: TileKind) -> &'static str {
    match kind {
        TileKind::Walkable => "..",
        TileKind::NonWalkable => "██",
        TileKind::Dangerous => "~~",
        TileKind::Walked => "::",
        TileKind::Goal => "GG",
        TileKind::Player | TileKind::Coin | TileKind::Unknown => "??",
    }
}

impl<W: Write> FrameRenderer for TextRenderer<W> {
    fn draw(&mut self, frame: &FrameSnapshot) -> io::Result<()> {
        for row in frame.tiles.chunks(frame.width.max(1)) {
            for tile in row {
                // Player first, then coins.
                let symbol = if tile.pos == frame.player.pos {
                    "P"
                } else if frame.coins.iter().any(|c| c.pos == tile.pos) {
                    "C"
                } else {
                    tile_symbol(tile.kind)
                };
                write!(self.out, "{:<3}", symbol)?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "--- Player ---")?;
        writeln!(self.out, "Position: {}", frame.player.pos)?;
        writeln!(self.out, "Coin: {}", if frame.coin_collected { "collected" } else { "missing" })?;
        writeln!(self.out, "Moves: {}", frame.moves)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Writes each frame as one JSON line, for an external graphical front end.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameRenderer for JsonRenderer<W> {
    fn draw(&mut self, frame: &FrameSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
