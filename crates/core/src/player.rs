//! Player module - per-player frame/throw state machine
//!
//! A player's position is `(current_frame, current_throw)`. Frames 1-9 end on a
//! strike or after two throws; the last frame always takes two throws and a
//! third one after a strike or spare. `current_frame == FRAME_COUNT` means the
//! player has finished.

use crate::frame::Frame;
use crate::scoring::{calculate_all_scores, standing_pins};
use crate::types::{FRAME_COUNT, LAST_FRAME, PIN_COUNT};

/// Result of recording one throw for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStep {
    /// Frame the throw was recorded in.
    pub frame: u8,
    /// Throw index within that frame.
    pub throw: u8,
    /// Stand all pins up before the next throw.
    pub rack_reset: bool,
    /// The player's turn is over.
    pub turn_ended: bool,
}

/// A bowler with 10 frames of throw data and running scores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    frames: [Frame; FRAME_COUNT],
    scores: [Option<u16>; FRAME_COUNT],
    current_frame: u8,
    current_throw: u8,
}

impl Player {
    /// Create a player with a clean scorecard
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Default::default(),
            scores: [None; FRAME_COUNT],
            current_frame: 0,
            current_throw: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[Frame; FRAME_COUNT] {
        &self.frames
    }

    pub fn frame(&self, frame_idx: usize) -> Option<&Frame> {
        self.frames.get(frame_idx)
    }

    /// Cumulative score per frame (`None` until resolvable)
    pub fn scores(&self) -> &[Option<u16>; FRAME_COUNT] {
        &self.scores
    }

    /// Cumulative score through the last frame
    pub fn final_score(&self) -> Option<u16> {
        self.scores[LAST_FRAME]
    }

    /// Latest defined cumulative score, 0 before anything resolves
    pub fn running_total(&self) -> u16 {
        self.scores.iter().rev().find_map(|s| *s).unwrap_or(0)
    }

    pub fn current_frame(&self) -> u8 {
        self.current_frame
    }

    pub fn current_throw(&self) -> u8 {
        self.current_throw
    }

    /// No throws left to take
    pub fn is_complete(&self) -> bool {
        self.current_frame as usize >= FRAME_COUNT
    }

    /// Pins available to the next throw (0 once complete)
    pub fn standing_pins(&self) -> u8 {
        self.frames
            .get(self.current_frame as usize)
            .map(|frame| standing_pins(frame, self.current_frame as usize))
            .unwrap_or(0)
    }

    /// Record a validated throw and advance the frame/throw position.
    ///
    /// Callers must check `is_complete()` and `standing_pins()` first; scores
    /// are not touched here (see [`Player::recalculate_scores`]).
    pub(crate) fn apply_throw(&mut self, pins: u8) -> FrameStep {
        let frame_idx = self.current_frame as usize;
        let throw = self.current_throw;
        self.frames[frame_idx].record(pins);

        let (rack_reset, turn_ended) = if frame_idx == LAST_FRAME {
            self.handle_last_frame(pins)
        } else {
            self.handle_regular_frame(pins)
        };

        FrameStep {
            frame: frame_idx as u8,
            throw,
            rack_reset,
            turn_ended,
        }
    }

    /// Frames 1-9: a strike or a second throw closes the frame.
    fn handle_regular_frame(&mut self, pins: u8) -> (bool, bool) {
        if self.current_throw == 0 && pins < PIN_COUNT {
            // Leave the rack as is for the second throw.
            self.current_throw = 1;
            return (false, false);
        }

        self.current_frame += 1;
        self.current_throw = 0;
        (true, true)
    }

    /// Last frame: two throws, plus a bonus throw after a strike or spare.
    fn handle_last_frame(&mut self, pins: u8) -> (bool, bool) {
        match self.current_throw {
            0 => {
                self.current_throw = 1;
                (pins == PIN_COUNT, false)
            }
            1 => {
                let first = self.frames[LAST_FRAME].first().unwrap_or(0);
                if first == PIN_COUNT || first + pins == PIN_COUNT {
                    self.current_throw = 2;
                    (true, false)
                } else {
                    self.finish();
                    (true, true)
                }
            }
            _ => {
                self.finish();
                (true, true)
            }
        }
    }

    fn finish(&mut self) {
        self.current_frame = FRAME_COUNT as u8;
        self.current_throw = 0;
    }

    /// Recompute cumulative scores from the current frames.
    pub fn recalculate_scores(&mut self) {
        self.scores = calculate_all_scores(&self.frames);
    }
}
