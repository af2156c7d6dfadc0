//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (scoring engine, input bookkeeping, JSON adapter).
//!
//! # Game Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_COUNT` | 10 | Frames per player game |
//! | `LAST_FRAME` | 9 | Index of the 10th frame (bonus-throw rules) |
//! | `PIN_COUNT` | 10 | Pins in a full rack |
//! | `MAX_THROWS_PER_FRAME` | 3 | Throw slots per frame (3rd only in the last frame) |
//! | `PERFECT_GAME` | 300 | Final score of twelve consecutive strikes |
//!
//! # Dartboard Vocabulary
//!
//! Dartboard hits are a closed enumeration: a bullseye ring or a numbered
//! segment (1-20) in a single, double or triple ring. The transposition of a hit
//! into knocked-down pins lives in the input crate, not here.
//!
//! # Examples
//!
//! ```
//! use bulling_types::{DartHit, Segment, FRAME_COUNT, PIN_COUNT};
//!
//! let hit = DartHit::from_parts("triple", Some(20)).unwrap();
//! assert_eq!(hit, DartHit::Triple(Segment::new(20).unwrap()));
//! assert_eq!(hit.zone_str(), "triple");
//!
//! assert_eq!(FRAME_COUNT, 10);
//! assert_eq!(PIN_COUNT, 10);
//! ```

/// Frames in a player's game
pub const FRAME_COUNT: usize = 10;

/// Index of the 10th (last) frame
pub const LAST_FRAME: usize = FRAME_COUNT - 1;

/// Pins in a full rack
pub const PIN_COUNT: u8 = 10;

/// Throw slots per frame; the third slot is only used in the last frame
pub const MAX_THROWS_PER_FRAME: usize = 3;

/// Score of a perfect game (twelve strikes)
pub const PERFECT_GAME: u16 = 300;

/// Number of segments on a dartboard (1-20)
pub const SEGMENT_COUNT: u8 = 20;

/// A numbered dartboard segment (1-20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(u8);

impl Segment {
    /// Create a segment, returning `None` outside 1-20
    pub fn new(n: u8) -> Option<Self> {
        if (1..=SEGMENT_COUNT).contains(&n) {
            Some(Self(n))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Where a dart landed
///
/// - **InnerBull**: inner bullseye ("IB")
/// - **OuterBull**: outer bullseye ("OB")
/// - **Single/Double/Triple**: a numbered segment in the given ring
/// - **Miss**: off the scoring area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DartHit {
    InnerBull,
    OuterBull,
    Single(Segment),
    Double(Segment),
    Triple(Segment),
    Miss,
}

impl DartHit {
    /// Build a hit from a zone tag and an optional segment number
    ///
    /// Zone tags are case-insensitive and accept both the short board tags
    /// ("IB", "OB", "S", "D", "T") and full names. Ring zones require a valid
    /// segment; bullseyes and misses ignore it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bulling_types::{DartHit, Segment};
    ///
    /// assert_eq!(DartHit::from_parts("IB", None), Some(DartHit::InnerBull));
    /// assert_eq!(DartHit::from_parts("d", Some(16)), Some(DartHit::Double(Segment::new(16).unwrap())));
    /// assert_eq!(DartHit::from_parts("t", None), None);
    /// ```
    pub fn from_parts(zone: &str, segment: Option<u8>) -> Option<Self> {
        match zone.to_lowercase().as_str() {
            "ib" | "inner_bull" | "bullseye" => Some(DartHit::InnerBull),
            "ob" | "outer_bull" => Some(DartHit::OuterBull),
            "miss" => Some(DartHit::Miss),
            "s" | "single" => segment.and_then(Segment::new).map(DartHit::Single),
            "d" | "double" => segment.and_then(Segment::new).map(DartHit::Double),
            "t" | "triple" => segment.and_then(Segment::new).map(DartHit::Triple),
            _ => None,
        }
    }

    /// Zone name used by the adapter protocol
    pub fn zone_str(&self) -> &'static str {
        match self {
            DartHit::InnerBull => "inner_bull",
            DartHit::OuterBull => "outer_bull",
            DartHit::Single(_) => "single",
            DartHit::Double(_) => "double",
            DartHit::Triple(_) => "triple",
            DartHit::Miss => "miss",
        }
    }

    pub fn segment(&self) -> Option<Segment> {
        match self {
            DartHit::Single(s) | DartHit::Double(s) | DartHit::Triple(s) => Some(*s),
            DartHit::InnerBull | DartHit::OuterBull | DartHit::Miss => None,
        }
    }
}

/// Lifecycle of a game
///
/// `Setup` accepts players, `InProgress` accepts throws, `Over` accepts nothing
/// until the game is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Setup,
    InProgress,
    Over,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::InProgress => "in_progress",
            GamePhase::Over => "over",
        }
    }
}

/// Engine-side event describing what a throw submission did.
///
/// Returned by the engine after every accepted submission so that the caller
/// knows whether to re-rack and whose turn it is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowOutcome {
    /// Player the throw was attributed to.
    pub player: usize,
    /// Frame index (0-9) the throw was recorded in.
    pub frame: u8,
    /// Throw index within the frame (0-2).
    pub throw: u8,
    /// Pins knocked down by this throw.
    pub pins: u8,
    /// No throw was recorded: the player had already finished and the turn moved on.
    pub skipped: bool,
    /// The caller should stand all pins up again before the next throw.
    pub rack_reset: bool,
    pub turn_ended: bool,
    pub game_over: bool,
    /// Player whose turn it is after this submission.
    pub next_player: usize,
}
