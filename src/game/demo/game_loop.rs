//! Interactive game loop.
//!
//! Reads key presses from a line-based input (every character of a line is one
//! key press), resolves each one synchronously and redraws after it. The loop
//! ends on death, on victory or when the input closes.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::game::input::{handle_key, KeyAction};
use crate::game::state::GameState;
use crate::game::systems::{FrameRenderer, FrameSnapshot, MoveEvent, MoveOutcome, RenderLayout};
use crate::game::types::GameStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Won,
    Died,
    InputClosed,
}

/// Print the player-facing messages for one resolved input.
pub fn report_outcome<W: Write>(console: &mut W, outcome: &MoveOutcome) -> io::Result<()> {
    for event in &outcome.events {
        match event {
            MoveEvent::OutOfBounds { row, col } => {
                writeln!(console, "Move out of the map! ({}, {})", row + 1, col + 1)?
            }
            MoveEvent::Blocked { .. } => writeln!(console, "You cannot walk there.")?,
            MoveEvent::CoinCollected { .. } => {
                writeln!(console, "You collected the coin, now head to the goal tile!")?
            }
            MoveEvent::NeedCoin { .. } => {
                writeln!(console, "You need to collect the coin before reaching the goal tile!")?
            }
            MoveEvent::Died { .. } => writeln!(console, "You died!")?,
            MoveEvent::Won { .. } => writeln!(console, "You reached the end of the game!")?,
            MoveEvent::Moved { .. } | MoveEvent::Ignored { .. } => {}
        }
    }
    Ok(())
}

/// Run the game until it ends.
pub fn run_game_loop<R, F, W>(
    game_state: &mut GameState,
    layout: &RenderLayout,
    input: R,
    renderer: &mut F,
    console: &mut W,
) -> io::Result<SessionEnd>
where
    R: BufRead,
    F: FrameRenderer,
    W: Write,
{
    writeln!(console, "Welcome!")?;
    writeln!(console, "Collect the coin, then reach the goal tile, in that order.")?;
    writeln!(console, "Careful! You can die in the lava!")?;
    writeln!(console, "Keys: W/S/A/D move on screen, Q/C/E/Z move along the grid. Press Enter to send.")?;
    renderer.draw(&FrameSnapshot::capture(game_state, layout))?;

    for line in input.lines() {
        let line = line?;
        for key in line.chars().filter(|c| !c.is_whitespace()) {
            let Some(outcome) = handle_key(game_state, key, KeyAction::Press) else {
                continue;
            };
            debug!("Key {:?} -> {:?}", key, outcome.events);
            report_outcome(console, &outcome)?;
            renderer.draw(&FrameSnapshot::capture(game_state, layout))?;

            match game_state.status {
                GameStatus::Dead => {
                    info!("Player died after {} moves", game_state.moves);
                    return Ok(SessionEnd::Died);
                }
                GameStatus::Won => {
                    info!("Player won after {} moves", game_state.moves);
                    return Ok(SessionEnd::Won);
                }
                GameStatus::Playing => {}
            }
        }
    }

    info!("Input closed, leaving the game");
    Ok(SessionEnd::InputClosed)
}
