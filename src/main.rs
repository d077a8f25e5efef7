//! Main entry point for the isometric coin-grid game.
//!
//! Loads the map, builds the session state and runs the interactive game loop
//! with the renderer selected by configuration.

use std::io;
use std::process::ExitCode;

use log::{error, info};

use iso_coin_grid::config::game::MAP_PATH;
use iso_coin_grid::config::render::RendererKind;
use iso_coin_grid::game;
use iso_coin_grid::game::demo::game_loop::run_game_loop;
use iso_coin_grid::game::state::GameState;
use iso_coin_grid::game::systems::{JsonRenderer, RenderLayout, TextRenderer};

fn main() -> ExitCode {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let map = match game::map::load(MAP_PATH) {
        Ok(map) => map,
        Err(err) => {
            error!("Map loading failed: {}", err);
            eprintln!("Failed to load map {}: {}", MAP_PATH, err);
            return ExitCode::FAILURE;
        }
    };

    let layout = RenderLayout::from_assets(&map.assets);
    let mut game_state = GameState::new(map);
    let stdin = io::stdin();

    // JSON frames own stdout, so console messages move to stderr.
    let result = match RendererKind::from_env() {
        RendererKind::Text => run_game_loop(
            &mut game_state,
            &layout,
            stdin.lock(),
            &mut TextRenderer::new(io::stdout()),
            &mut io::stdout(),
        ),
        RendererKind::Json => run_game_loop(
            &mut game_state,
            &layout,
            stdin.lock(),
            &mut JsonRenderer::new(io::stdout()),
            &mut io::stderr(),
        ),
    };

    match result {
        Ok(end) => {
            info!("Session ended: {:?}", end);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Game loop failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
