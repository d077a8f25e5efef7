//! Map file loader.
//!
//! One loader covers both map dialects:
//!
//! * **digit maps**: cells are tile ids `1`-`5`, `@` marks the player and `C`
//!   the coin; the classification comes from four value lines (non-walkable ids,
//!   dangerous ids, goal id, walked id) or, when those are absent, from the
//!   compiled-in table.
//! * **symbolic maps**: cells are arbitrary ASCII symbols classified by
//!   `symbol:TYPENAME` lines following a `#` separator.
//!
//! Either dialect may start with tileset metadata
//! (`filename tile_count tile_height tile_width`) before `width height`.

use std::collections::VecDeque;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::game::{COIN_MARKER, MAX_PLAIN_TILE_ID, MIN_PLAIN_TILE_ID, PLAYER_MARKER};
use crate::game::grid::{ClassificationTable, Grid};
use crate::game::map::error::{MapFormatError, Result};
use crate::game::types::{Position, TileId, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    Digit,
    Symbolic,
}

/// Tileset description, opaque to the game rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilesetInfo {
    pub filename: String,
    pub tile_count: u32,
    pub tile_height: u32,
    pub tile_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteAsset {
    pub filename: String,
    pub height: u32,
    pub width: u32,
}

/// Asset metadata passed through to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub tileset: Option<TilesetInfo>,
    pub coin: Option<SpriteAsset>,
}

/// Everything a map file describes.
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub dialect: Dialect,
    pub grid: Grid,
    pub table: ClassificationTable,
    pub player_spawn: Position,
    pub coins: Vec<Position>,
    pub assets: AssetMetadata,
}

/// Read and parse a map file.
pub fn load(path: impl AsRef<Path>) -> Result<LoadedMap> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| MapFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse(&text)?;
    info!(
        "Map loaded from {}: {}x{} ({:?}), player at {}, {} coin(s), goal tile {}",
        path.display(),
        map.grid.width(),
        map.grid.height(),
        map.dialect,
        map.player_spawn,
        map.coins.len(),
        map.table.goal_id().map_or('-', |id| id.as_char())
    );
    Ok(map)
}

/// Parse map text.
pub fn parse(text: &str) -> Result<LoadedMap> {
    let mut reader = LineReader::new(text);

    let first = reader.peek_token().ok_or(MapFormatError::UnexpectedEnd("map dimensions"))?;
    let tileset = if first.parse::<i64>().is_ok() {
        None
    } else {
        Some(read_tileset(&mut reader)?)
    };

    let width: i64 = read_number(&mut reader, "map width")?;
    let height: i64 = read_number(&mut reader, "map height")?;
    if width <= 0 || height <= 0 {
        return Err(MapFormatError::InvalidDimensions { width, height });
    }
    let (width, height) = (width as usize, height as usize);

    // Sized by what is read, never by the header.
    let mut rows = Vec::new();
    for row in 0..height {
        let line = reader
            .next_line()
            .ok_or(MapFormatError::MissingRows { expected: height, found: row })?;
        let bytes = line.as_bytes();
        if bytes.len() < width {
            return Err(MapFormatError::ShortRow { row, len: bytes.len(), width });
        }
        rows.push(&bytes[..width]);
    }

    let rest: Vec<&str> = reader.remaining_lines().collect();
    let dialect = if rest.iter().any(|l| classification_entry(l).is_some()) {
        Dialect::Symbolic
    } else {
        Dialect::Digit
    };
    debug!("Map header parsed: {}x{}, dialect {:?}", width, height, dialect);

    let (table, coin_asset) = match dialect {
        Dialect::Digit => read_digit_sections(&rest)?,
        Dialect::Symbolic => (read_symbol_table(&rest), None),
    };

    let mut cells = Vec::with_capacity(rows.len());
    let mut player_spawn = None;
    let mut coins = Vec::new();

    for (row, bytes) in rows.iter().enumerate() {
        let mut line = Vec::with_capacity(width);
        for (col, &byte) in bytes.iter().enumerate() {
            let pos = Position { row, col };
            let marker = match dialect {
                Dialect::Digit => match byte {
                    PLAYER_MARKER => TileKind::Player,
                    COIN_MARKER => TileKind::Coin,
                    _ => TileKind::Unknown,
                },
                Dialect::Symbolic => table.classify(TileId(byte)),
            };

            let id = match marker {
                TileKind::Player => {
                    if let Some(previous) = player_spawn.replace(pos) {
                        warn!("Several player markers, {} overrides {}", pos, previous);
                    }
                    table.walkable_default()
                }
                TileKind::Coin => {
                    coins.push(pos);
                    table.walkable_default()
                }
                _ => match dialect {
                    Dialect::Digit if is_plain_tile(byte) => TileId(byte),
                    Dialect::Digit => TileId::FLOOR,
                    Dialect::Symbolic => TileId(byte),
                },
            };
            line.push(id);
        }
        cells.push(line);
    }

    let player_spawn = player_spawn.ok_or(MapFormatError::MissingPlayer)?;
    if dialect == Dialect::Digit && coins.is_empty() {
        return Err(MapFormatError::MissingCoin);
    }

    let grid = Grid::from_rows(cells).ok_or(MapFormatError::InvalidDimensions {
        width: width as i64,
        height: height as i64,
    })?;

    Ok(LoadedMap {
        dialect,
        grid,
        table,
        player_spawn,
        coins,
        assets: AssetMetadata {
            tileset,
            coin: coin_asset,
        },
    })
}

fn is_plain_tile(byte: u8) -> bool {
    (b'0' + MIN_PLAIN_TILE_ID..=b'0' + MAX_PLAIN_TILE_ID).contains(&byte)
}

fn read_tileset(reader: &mut LineReader<'_>) -> Result<TilesetInfo> {
    let filename = reader
        .next_token()
        .ok_or(MapFormatError::UnexpectedEnd("tileset filename"))?
        .to_string();
    Ok(TilesetInfo {
        filename,
        tile_count: read_number(reader, "tile count")?,
        tile_height: read_number(reader, "tile height")?,
        tile_width: read_number(reader, "tile width")?,
    })
}

fn read_number<T: std::str::FromStr>(reader: &mut LineReader<'_>, field: &'static str) -> Result<T> {
    let token = reader.next_token().ok_or(MapFormatError::UnexpectedEnd(field))?;
    token.parse().map_err(|_| MapFormatError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}

/// Lines carrying content: not blank and not a `#` label/separator.
fn meaningful(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

/// `symbol:TYPENAME`, the symbol being the first byte.
fn classification_entry(line: &str) -> Option<(TileId, TileKind)> {
    let bytes = line.as_bytes();
    if bytes.len() < 3 || bytes[1] != b':' {
        return None;
    }
    Some((TileId(bytes[0]), TileKind::from_name(&line[2..])))
}

fn read_symbol_table(lines: &[&str]) -> ClassificationTable {
    let entries = lines.iter().filter_map(|line| {
        let entry = classification_entry(line);
        if entry.is_none() && meaningful(line) {
            debug!("Ignoring line outside the classification format: {:?}", line);
        }
        entry
    });
    ClassificationTable::from_symbols(entries)
}

/// Classification lines and coin asset of a digit map.
fn read_digit_sections(lines: &[&str]) -> Result<(ClassificationTable, Option<SpriteAsset>)> {
    let mut values = lines.iter().copied().filter(|l| meaningful(l)).peekable();

    let has_lists = values.peek().is_some_and(|l| is_id_list(l));
    let table = if has_lists {
        let non_walkable = digit_list(values.next(), "non-walkable")?;
        let dangerous = digit_list(values.next(), "dangerous")?;
        let goal = single_digit(values.next(), "goal")?;
        let walked = single_digit(values.next(), "walked")?;
        ClassificationTable::from_digit_lists(&non_walkable, &dangerous, goal, walked)
    } else {
        debug!("No classification lines, using the compiled-in table");
        ClassificationTable::compiled_default()
    };

    let rest: Vec<&str> = values.collect();
    let mut tokens = LineReader::new_from_lines(rest);
    let coin = match tokens.peek_token() {
        None => None,
        Some(_) => {
            let filename = tokens
                .next_token()
                .ok_or(MapFormatError::UnexpectedEnd("coin filename"))?
                .to_string();
            Some(SpriteAsset {
                filename,
                height: read_number(&mut tokens, "coin height")?,
                width: read_number(&mut tokens, "coin width")?,
            })
        }
    };

    Ok((table, coin))
}

/// Id lists start with a digit, or are `-` for an empty list.
fn is_id_list(line: &str) -> bool {
    let line = line.trim();
    line == "-" || line.starts_with(|c: char| c.is_ascii_digit())
}

fn digit_list(line: Option<&str>, section: &'static str) -> Result<Vec<u8>> {
    let line = line.ok_or(MapFormatError::UnexpectedEnd(section))?.trim();
    if line == "-" {
        return Ok(Vec::new());
    }
    line.chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or(MapFormatError::InvalidTileId { section, found: c })
        })
        .collect()
}

fn single_digit(line: Option<&str>, section: &'static str) -> Result<u8> {
    let line = line.ok_or(MapFormatError::UnexpectedEnd(section))?.trim();
    let c = line.chars().next().ok_or(MapFormatError::UnexpectedEnd(section))?;
    c.to_digit(10)
        .map(|d| d as u8)
        .ok_or(MapFormatError::InvalidTileId { section, found: c })
}

/// Mixes whitespace-token reads (header fields) with whole-line reads (grid rows),
/// the way a stream extraction followed by `getline` would.
struct LineReader<'a> {
    lines: VecDeque<&'a str>,
    pending: VecDeque<&'a str>,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self::new_from_lines(text.lines().collect())
    }

    fn new_from_lines(lines: Vec<&'a str>) -> Self {
        Self {
            lines: lines.into(),
            pending: VecDeque::new(),
        }
    }

    fn fill(&mut self) -> bool {
        while self.pending.is_empty() {
            match self.lines.pop_front() {
                Some(line) => self.pending.extend(line.split_whitespace()),
                None => return false,
            }
        }
        true
    }

    fn peek_token(&mut self) -> Option<&'a str> {
        if self.fill() { self.pending.front().copied() } else { None }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        if self.fill() { self.pending.pop_front() } else { None }
    }

    /// Next full line; whatever is left of the current token line is dropped.
    fn next_line(&mut self) -> Option<&'a str> {
        self.pending.clear();
        self.lines.pop_front()
    }

    fn remaining_lines(mut self) -> impl Iterator<Item = &'a str> {
        self.pending.clear();
        self.lines.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGIT_MAP: &str = "\
tilesetIso.png 7 45 75
5 3
@0120
0C345
11115
# not walkable
3
# dangerous
4
# goal
5
# walked
6
coin.png 35 35
";

    const SYMBOLIC_MAP: &str = "\
4 3
@..L
.C.X
..##
#
.:WALKABLE
L:DANGEROUS
X:NON_WALKABLE
#:GOAL
@:PLAYER
C:COIN
";

    #[test]
    fn test_digit_map() {
        let map = parse(DIGIT_MAP).expect("digit map should parse");
        assert_eq!(map.dialect, Dialect::Digit);
        assert_eq!((map.grid.width(), map.grid.height()), (5, 3));
        assert_eq!(map.player_spawn, Position::new(0, 0));
        assert_eq!(map.coins, vec![Position::new(1, 1)]);
        assert_eq!(map.grid.get(Position::new(0, 0)), Some(TileId::FLOOR));
        assert_eq!(map.grid.get(Position::new(1, 1)), Some(TileId::FLOOR));
        assert_eq!(map.table.classify(TileId(b'3')), TileKind::NonWalkable);
        assert_eq!(map.table.classify(TileId(b'4')), TileKind::Dangerous);
        assert_eq!(map.table.classify(TileId(b'5')), TileKind::Goal);
        assert_eq!(map.table.walked_id(), TileId(b'6'));

        let tileset = map.assets.tileset.expect("tileset metadata");
        assert_eq!(tileset.filename, "tilesetIso.png");
        assert_eq!((tileset.tile_count, tileset.tile_height, tileset.tile_width), (7, 45, 75));
        let coin = map.assets.coin.expect("coin asset");
        assert_eq!((coin.filename.as_str(), coin.height, coin.width), ("coin.png", 35, 35));
    }

    #[test]
    fn test_digit_map_non_plain_characters_become_floor() {
        let map = parse("3 1\n@C9\n").expect("map should parse");
        assert_eq!(map.grid.get(Position::new(0, 2)), Some(TileId::FLOOR));
    }

    #[test]
    fn test_digit_map_without_lists_uses_compiled_table() {
        let map = parse("3 1\n@C5\n").expect("map should parse");
        assert_eq!(map.table, ClassificationTable::compiled_default());
        assert!(map.assets.tileset.is_none());
        assert!(map.assets.coin.is_none());
    }

    #[test]
    fn test_empty_list_marker() {
        let map = parse("3 1\n@C1\n-\n-\n5\n6\n").expect("map should parse");
        assert_eq!(map.table.classify(TileId(b'3')), TileKind::Walkable);
        assert_eq!(map.table.classify(TileId(b'4')), TileKind::Walkable);
    }

    #[test]
    fn test_symbolic_map() {
        let map = parse(SYMBOLIC_MAP).expect("symbolic map should parse");
        assert_eq!(map.dialect, Dialect::Symbolic);
        assert_eq!((map.grid.width(), map.grid.height()), (4, 3));
        assert_eq!(map.player_spawn, Position::new(0, 0));
        assert_eq!(map.coins, vec![Position::new(1, 1)]);
        assert_eq!(map.table.walkable_default(), TileId(b'.'));
        assert_eq!(map.grid.get(Position::new(0, 0)), Some(TileId(b'.')));
        assert_eq!(map.table.classify(TileId(b'L')), TileKind::Dangerous);
        assert_eq!(map.table.classify(TileId(b'#')), TileKind::Goal);
    }

    #[test]
    fn test_markers_never_survive_in_grid() {
        for text in [DIGIT_MAP, SYMBOLIC_MAP] {
            let map = parse(text).expect("map should parse");
            for (_, id) in map.grid.iter() {
                let kind = map.table.classify(id);
                assert_ne!(kind, TileKind::Player);
                assert_ne!(kind, TileKind::Coin);
            }
        }
    }

    #[test]
    fn test_unknown_symbols() {
        let map = parse("3 1\n@?x\n#\n@:PLAYER\nx:LAVA\n").expect("map should parse");
        assert_eq!(map.table.classify(TileId(b'?')), TileKind::Unknown);
        assert_eq!(map.table.classify(TileId(b'x')), TileKind::Unknown);
        // No coin is fine for symbolic maps.
        assert!(map.coins.is_empty());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            parse("0 3\n"),
            Err(MapFormatError::InvalidDimensions { width: 0, height: 3 })
        ));
        assert!(matches!(
            parse("4 -1\n"),
            Err(MapFormatError::InvalidDimensions { width: 4, height: -1 })
        ));
        assert!(matches!(
            parse("tiles.png 7 45 75\nfour 3\n"),
            Err(MapFormatError::InvalidNumber { field: "map width", .. })
        ));
    }

    #[test]
    fn test_huge_height_is_an_error() {
        let err = parse("1 4000000000000000000\n@\n").unwrap_err();
        assert!(matches!(err, MapFormatError::MissingRows { found: 1, .. }));
    }

    #[test]
    fn test_missing_rows() {
        let err = parse("3 3\n@C0\n000\n").unwrap_err();
        assert!(matches!(err, MapFormatError::MissingRows { expected: 3, found: 2 }));
    }

    #[test]
    fn test_short_row() {
        let err = parse("3 2\n@C0\n00\n").unwrap_err();
        assert!(matches!(err, MapFormatError::ShortRow { row: 1, len: 2, width: 3 }));
    }

    #[test]
    fn test_longer_rows_are_truncated() {
        let map = parse("2 1\n@C999\n").expect("map should parse");
        assert_eq!(map.grid.width(), 2);
    }

    #[test]
    fn test_missing_markers() {
        assert!(matches!(parse("2 1\n0C\n"), Err(MapFormatError::MissingPlayer)));
        assert!(matches!(parse("2 1\n@0\n"), Err(MapFormatError::MissingCoin)));
    }

    #[test]
    fn test_invalid_tile_id_in_list() {
        let err = parse("3 1\n@C1\n3a\n4\n5\n6\n").unwrap_err();
        assert!(matches!(err, MapFormatError::InvalidTileId { section: "non-walkable", found: 'a' }));
    }

    #[test]
    fn test_missing_classification_line() {
        let err = parse("3 1\n@C1\n3\n4\n").unwrap_err();
        assert!(matches!(err, MapFormatError::UnexpectedEnd("goal")));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("iso-coin-grid-does-not-exist.txt");
        assert!(matches!(load(&path), Err(MapFormatError::Io { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("iso-coin-grid-{}.txt", std::process::id()));
        std::fs::write(&path, SYMBOLIC_MAP).expect("write fixture");
        let map = load(&path).expect("map should load");
        std::fs::remove_file(&path).ok();
        assert_eq!(map.grid.height(), 3);
    }
}
