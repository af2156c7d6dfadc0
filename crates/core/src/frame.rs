//! Frame module - the throw slots of a single frame
//!
//! Throws are recorded in order into a fixed-capacity buffer, so an unrecorded
//! slot can only ever follow recorded ones.

use arrayvec::ArrayVec;

use crate::types::{MAX_THROWS_PER_FRAME, PIN_COUNT};

/// One frame of a player's game (up to 3 throws)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    throws: ArrayVec<u8, MAX_THROWS_PER_FRAME>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            throws: ArrayVec::new(),
        }
    }

    /// Recorded throws, in order
    pub fn throws(&self) -> &[u8] {
        &self.throws
    }

    /// Pin count of throw `idx` (0-based), or `None` if unrecorded
    pub fn throw(&self, idx: usize) -> Option<u8> {
        self.throws.get(idx).copied()
    }

    pub fn first(&self) -> Option<u8> {
        self.throw(0)
    }

    pub fn second(&self) -> Option<u8> {
        self.throw(1)
    }

    pub fn third(&self) -> Option<u8> {
        self.throw(2)
    }

    pub fn len(&self) -> usize {
        self.throws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throws.is_empty()
    }

    /// First throw knocked down the full rack
    pub fn is_strike(&self) -> bool {
        self.first() == Some(PIN_COUNT)
    }

    /// First two throws cleared the rack without a strike
    pub fn is_spare(&self) -> bool {
        matches!(
            (self.first(), self.second()),
            (Some(a), Some(b)) if a < PIN_COUNT && a + b == PIN_COUNT
        )
    }

    /// Sum of all recorded throws
    pub fn pin_total(&self) -> u16 {
        self.throws.iter().map(|&p| p as u16).sum()
    }

    /// Fixed-width view with unrecorded slots as `None`
    pub fn slots(&self) -> [Option<u8>; MAX_THROWS_PER_FRAME] {
        [self.first(), self.second(), self.third()]
    }

    /// Append a throw. Returns false when all slots are taken.
    pub(crate) fn record(&mut self, pins: u8) -> bool {
        self.throws.try_push(pins).is_ok()
    }
}
