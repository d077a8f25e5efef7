//! Rendering configuration.
//!
//! The renderer is picked at startup from the `ISO_GRID_RENDERER` environment
//! variable: `text` (default) draws the grid in the terminal, `json` writes one
//! frame snapshot per line for an external graphical front end.

use log::warn;

pub const RENDERER_ENV: &str = "ISO_GRID_RENDERER";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Text,
    Json,
}

impl RendererKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(RendererKind::Text),
            "json" => Some(RendererKind::Json),
            _ => None,
        }
    }

    pub fn from_env() -> Self {
        match std::env::var(RENDERER_ENV) {
            Ok(value) => Self::parse(&value).unwrap_or_else(|| {
                warn!("Unknown {}={:?}, falling back to text", RENDERER_ENV, value);
                RendererKind::Text
            }),
            Err(_) => RendererKind::Text,
        }
    }
}
