use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate, 0-based. `row` grows "north", `col` grows "east".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 1-based view used in player-facing messages.
    pub fn one_based(&self) -> (usize, usize) {
        (self.row + 1, self.col + 1)
    }

    /// Apply a direction delta. Returns `None` when the result would be negative;
    /// the upper bound is checked against the grid by the caller.
    pub fn offset(&self, direction: Direction) -> Option<Position> {
        let (d_row, d_col) = direction.delta();
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.one_based();
        write!(f, "({}, {})", row, col)
    }
}

/// The eight movement commands.
///
/// The axis-aligned ones move along a single grid axis, which looks diagonal on
/// the isometric diamond. `Up`/`Down`/`Left`/`Right` move both axes together and
/// therefore look orthogonal on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row delta, column delta)
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::Up => (1, 1),
            Direction::Down => (-1, -1),
            Direction::Left => (1, -1),
            Direction::Right => (-1, 1),
        }
    }

    /// Which way the player sprite faces after this command.
    pub fn facing(&self) -> Facing {
        match self {
            Direction::Down => Facing::Front,
            Direction::Up => Facing::Back,
            Direction::Left | Direction::North | Direction::West => Facing::Left,
            Direction::Right | Direction::East | Direction::South => Facing::Right,
        }
    }
}

/// Sprite sheet row picked by the renderer for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

/// Raw tile identifier: one ASCII byte from the map file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// Floor id used by the digit dialect and as the preferred walkable default.
    pub const FLOOR: TileId = TileId(b'0');
    /// Trail id used when a symbolic map declares no WALKED symbol.
    pub const TRAIL: TileId = TileId(0);

    pub fn from_digit(d: u8) -> Self {
        TileId(b'0' + d)
    }

    /// Tileset index for digit ids.
    pub fn digit(&self) -> Option<u8> {
        self.0.is_ascii_digit().then(|| self.0 - b'0')
    }

    pub fn as_char(&self) -> char {
        self.0 as char
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Semantic tile category driving movement legality.
///
/// `Player` and `Coin` only exist while a map is being parsed; the loader rewrites
/// those cells before handing the grid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Walkable,
    NonWalkable,
    Dangerous,
    Walked,
    Goal,
    Player,
    Coin,
    Unknown,
}

impl TileKind {
    /// Parse a classification name from a `symbol:TYPENAME` line.
    /// Anything unrecognized is `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "WALKABLE" => TileKind::Walkable,
            "DANGEROUS" => TileKind::Dangerous,
            "NON_WALKABLE" => TileKind::NonWalkable,
            "WALKED" => TileKind::Walked,
            "GOAL" => TileKind::Goal,
            "PLAYER" => TileKind::Player,
            "COIN" => TileKind::Coin,
            _ => TileKind::Unknown,
        }
    }

    /// Kinds the player may never step onto. `Unknown` is walkable.
    pub fn blocks_movement(&self) -> bool {
        matches!(self, TileKind::NonWalkable | TileKind::Walked)
    }

    pub fn is_dangerous(&self) -> bool {
        *self == TileKind::Dangerous
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub facing: Facing,
}

impl Player {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            facing: Facing::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Position,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            collected: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Dead,
    Won,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}
