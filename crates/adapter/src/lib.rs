//! Adapter module - external control through line-delimited JSON
//!
//! Lets an external agent (script, bot, training harness) drive a
//! [`GameSession`] without linking against the core types.
//!
//! # Message Types
//!
//! ## Controller → Game
//!
//! - **command**: intents to apply before the next frame
//!
//! ## Game → Controller
//!
//! - **observation**: full session state (grid, pieces, projectiles, player,
//!   targets, score)
//! - **error**: rejection of a malformed line, with a stable code
//!
//! # Example Protocol Flow
//!
//! ```text
//! Game -> Controller: {"type":"observation","seq":1,"frame":0,"episode_id":0,...}
//! Controller -> Game: {"type":"command","seq":1,"intents":["moveLeft","fire"]}
//! Game -> Controller: {"type":"observation","seq":2,"frame":1,...}
//! Controller -> Game: {"type":"command","seq":2,"intents":["jump"]}
//! Game -> Controller: {"type":"error","seq":0,"code":"invalid_command","message":"..."}
//! ```

pub mod protocol;

pub use blockshot_core as core;
pub use blockshot_types as types;

pub use protocol::{
    create_error, parse_command_line, CommandMessage, ErrorCode, ErrorMessage, IntentList,
    ObservationMessage, ProtocolError,
};

use blockshot_core::GameSession;

/// Apply every intent of `command` in order. Returns how many took effect.
pub fn apply_command(session: &mut GameSession, command: &CommandMessage) -> usize {
    command
        .intents
        .iter()
        .filter(|&intent| session.apply_intent(intent))
        .count()
}
