//! Pin rack bookkeeping.
//!
//! Tracks which of the 10 pins (ids 1-10) are down on the current rack and turns
//! that into the single-throw pin count the engine expects. Pins that were down
//! at the previous [`PinRack::take_throw`] are locked: they cannot be stood back
//! up until the rack is reset.

use std::error::Error;
use std::fmt;

use arrayvec::ArrayVec;

use crate::types::PIN_COUNT;

const RACK_SIZE: usize = PIN_COUNT as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RackError {
    /// Pin id outside 1-10.
    InvalidPin(u8),
    /// The pin fell on an earlier throw of this rack.
    PinLocked(u8),
}

impl fmt::Display for RackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RackError::InvalidPin(pin) => write!(f, "Invalid pin {}: must be between 1 and 10", pin),
            RackError::PinLocked(pin) => {
                write!(f, "Pin {} was knocked down on an earlier throw", pin)
            }
        }
    }
}

impl Error for RackError {}

/// The 10 pins of one rack, standing or down
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PinRack {
    down: [bool; RACK_SIZE],
    /// Pins already counted by a previous `take_throw`.
    locked: [bool; RACK_SIZE],
}

impl PinRack {
    /// A full rack with every pin standing
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(pin: u8) -> Result<usize, RackError> {
        if (1..=PIN_COUNT).contains(&pin) {
            Ok((pin - 1) as usize)
        } else {
            Err(RackError::InvalidPin(pin))
        }
    }

    /// Flip a pin between standing and down. Returns `true` if it is now down.
    pub fn toggle(&mut self, pin: u8) -> Result<bool, RackError> {
        let idx = Self::slot(pin)?;
        if self.locked[idx] {
            return Err(RackError::PinLocked(pin));
        }
        self.down[idx] = !self.down[idx];
        Ok(self.down[idx])
    }

    /// Knock a pin down. Returns `true` if it was standing.
    pub fn knock_down(&mut self, pin: u8) -> Result<bool, RackError> {
        let idx = Self::slot(pin)?;
        let was_standing = !self.down[idx];
        self.down[idx] = true;
        Ok(was_standing)
    }

    /// Knock down a set of pins, e.g. from a dart hit.
    ///
    /// All ids are checked before any pin moves. Returns how many pins were
    /// standing beforehand.
    pub fn knock_down_all(&mut self, pins: &[u8]) -> Result<u8, RackError> {
        for &pin in pins {
            Self::slot(pin)?;
        }

        let mut fallen = 0;
        for &pin in pins {
            if self.knock_down(pin)? {
                fallen += 1;
            }
        }
        Ok(fallen)
    }

    /// Stand every pin up again and clear the locks
    pub fn reset(&mut self) {
        self.down = [false; RACK_SIZE];
        self.locked = [false; RACK_SIZE];
    }

    /// Stand up the pins knocked since the last `take_throw`, keeping locked ones down
    pub fn clear_pending(&mut self) {
        self.down = self.locked;
    }

    /// Whether `pin` is standing. Unknown pin ids are never standing.
    pub fn is_standing(&self, pin: u8) -> bool {
        Self::slot(pin).map(|idx| !self.down[idx]).unwrap_or(false)
    }

    pub fn is_locked(&self, pin: u8) -> bool {
        Self::slot(pin).map(|idx| self.locked[idx]).unwrap_or(false)
    }

    /// Count of pins currently down on the rack
    pub fn pins_knocked(&self) -> u8 {
        self.down.iter().filter(|&&d| d).count() as u8
    }

    /// Pins knocked down since the last `take_throw` or `reset`
    pub fn pending(&self) -> u8 {
        self.down
            .iter()
            .zip(&self.locked)
            .filter(|&(&d, &l)| d && !l)
            .count() as u8
    }

    /// Ids of the pins currently down, ascending
    pub fn down_pins(&self) -> ArrayVec<u8, RACK_SIZE> {
        (1..=PIN_COUNT).filter(|&pin| !self.is_standing(pin)).collect()
    }

    /// Close out a throw: return the pins it knocked down and lock them.
    pub fn take_throw(&mut self) -> u8 {
        let pins = self.pending();
        self.locked = self.down;
        pins
    }
}
