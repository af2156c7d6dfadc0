//! Pin input module (engine-facing).
//!
//! This module is independent of any UI framework. It keeps the bookkeeping a
//! bowling front-end needs before it can report a throw: which pins are down on
//! the rack ([`PinRack`]) and which pins a dart hit knocks over
//! ([`pins_for_hit`]). The engine only ever sees the resulting pin count.

pub mod dartboard;
pub mod rack;

pub use bulling_types as types;

pub use dartboard::pins_for_hit;
pub use rack::{PinRack, RackError};
