//! Errors raised while loading a map file.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal map-loading failures. Rule-driven move refusals are not errors and never
/// show up here.
#[derive(Debug, Error)]
pub enum MapFormatError {
    #[error("cannot open map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map ended early, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("invalid {field}: {value:?} is not an integer")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid map dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("map has {found} rows but declares a height of {expected}")]
    MissingRows { expected: usize, found: usize },

    #[error("row {row} has length {len}, shorter than the declared width {width}")]
    ShortRow { row: usize, len: usize, width: usize },

    #[error("invalid tile id {found:?} in the {section} line")]
    InvalidTileId { section: &'static str, found: char },

    #[error("player position '@' not found in the map")]
    MissingPlayer,

    #[error("coin position 'C' not found in the map")]
    MissingCoin,
}

pub type Result<T> = std::result::Result<T, MapFormatError>;
