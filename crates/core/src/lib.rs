//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the bowling rules, per-player state and the multi-player
//! turn engine. It has **no dependencies** on UI, I/O or pin-input devices:
//! callers report how many pins fell and the engine does the rest.
//!
//! # Module Structure
//!
//! - [`frame`]: Up to three recorded throws for one frame
//! - [`player`]: Per-player frame/throw state machine
//! - [`scoring`]: Frame and cumulative score calculation with strike/spare bonuses
//! - [`game_state`]: Players, turn order, phases and winners
//! - [`snapshot`]: Read-only views for rendering and observation
//! - [`error`]: Validation failures
//!
//! # Game Rules
//!
//! - **Frames 1-9**: A strike ends the frame; otherwise two throws
//! - **Frame 10**: Two throws, plus one bonus throw after a strike or spare
//! - **Strike**: 10 + the next two throws
//! - **Spare**: 10 + the next throw
//! - **Turns**: Round-robin by whole frames; finished players are skipped
//! - **Winners**: Every player sharing the best final score
//!
//! # Example
//!
//! ```
//! use bulling_core::GameState;
//!
//! let mut game = GameState::new();
//! game.add_player("Ana").unwrap();
//! game.start_game().unwrap();
//!
//! // Strike, then an open frame.
//! game.submit_throw(10).unwrap();
//! game.submit_throw(3).unwrap();
//! game.submit_throw(4).unwrap();
//!
//! let ana = game.player(0).unwrap();
//! assert_eq!(ana.scores()[0], Some(17));
//! assert_eq!(ana.scores()[1], Some(24));
//! ```

pub mod error;
pub mod frame;
pub mod game_state;
pub mod player;
pub mod scoring;
pub mod snapshot;

pub use bulling_types as types;

// Re-export commonly used types for convenience
pub use error::GameError;
pub use frame::Frame;
pub use game_state::GameState;
pub use player::{FrameStep, Player};
pub use scoring::{calculate_all_scores, calculate_frame_score, standing_pins};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
