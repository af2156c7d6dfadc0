//! Adapter module - external control via line-delimited JSON
//!
//! This module lets a separate UI process (or a script, or a test) drive a
//! bowling game without linking against the engine. One JSON object per line
//! goes in, one or more JSON objects per line come out. The binary wires a
//! [`Session`] to stdin/stdout.
//!
//! # Message Types
//!
//! ## Client → Game
//!
//! - **add_player** `{name}`: Register a player during setup
//! - **start** / **reset**: Begin the game, or drop all players and return to setup
//! - **throw** `{pins}`: Report the pins knocked down by one throw directly
//! - **toggle_pin** `{pin}` / **dart** `{zone, segment?}` / **reset_pins**: Edit the pin rack
//! - **submit**: Report the pins knocked on the rack since the last throw
//!
//! A direct `throw` that does not end the rack detaches it from the frame:
//! rack requests get `rack_detached` until the engine asks for a re-rack.
//! - **snapshot**: Ask for an observation
//!
//! Every request may carry a `seq`, echoed back as `request_seq`.
//!
//! ## Game → Client
//!
//! - **welcome**: First line of every session, with the protocol version
//! - **ack**: Request accepted (with the throw outcome or the new player index)
//! - **error**: Request rejected, with a snake_case code and a message
//! - **observation**: Scorecards, turn, phase, winners and rack state
//!
//! # Environment Variables
//!
//! - `BULLING_STREAM_OBSERVATIONS`: Send an observation after every accepted
//!   change (default: true)
//! - `BULLING_LOG`: `tracing` filter for the binary (default: "info")
//!
//! # Example Protocol Flow
//!
//! ```text
//! Game -> Client: {"type":"welcome","seq":1,"ts":1700000000000,"protocol_version":"1.0.0","game_id":"bulling","stream_observations":false}
//! Client -> Game: {"type":"add_player","seq":1,"name":"Ana"}
//! Game -> Client: {"type":"ack","seq":2,"ts":1700000000001,"request_seq":1,"status":"ok","player":0}
//! Client -> Game: {"type":"start","seq":2}
//! Game -> Client: {"type":"ack","seq":3,"ts":1700000000002,"request_seq":2,"status":"ok"}
//! Client -> Game: {"type":"throw","seq":3,"pins":10}
//! Game -> Client: {"type":"ack","seq":4,"ts":1700000000003,"request_seq":3,"status":"ok","outcome":{"player":0,"frame":0,"throw":0,"pins":10,"skipped":false,"rack_reset":true,"turn_ended":true,"game_over":false,"next_player":0}}
//! ```
//!
//! # Example
//!
//! ```
//! use bulling_adapter::{Session, SessionConfig};
//!
//! let input = "{\"type\":\"add_player\",\"name\":\"Ana\"}\n{\"type\":\"start\"}\n";
//! let mut output = Vec::new();
//! Session::new(SessionConfig::default())
//!     .run(input.as_bytes(), &mut output)
//!     .unwrap();
//!
//! let text = String::from_utf8(output).unwrap();
//! assert!(text.lines().next().unwrap().contains("\"welcome\""));
//! ```

pub mod config;
pub mod protocol;
pub mod session;

pub use bulling_core as core;
pub use bulling_input as input;
pub use bulling_types as types;

// Re-export protocol types for convenience
pub use config::{SessionConfig, PROTOCOL_VERSION};
pub use protocol::*;
pub use session::{Outbound, Session};
