use crate::player::Player;
use crate::types::{GamePhase, FRAME_COUNT, MAX_THROWS_PER_FRAME};

/// Read-only view of one player's scorecard.
///
/// Throw values are raw pin counts; turning them into "X", "/" or "-" marks is
/// left to whoever draws the scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PlayerSnapshot {
    pub name: String,
    pub frames: [[Option<u8>; MAX_THROWS_PER_FRAME]; FRAME_COUNT],
    pub scores: [Option<u16>; FRAME_COUNT],
    pub current_frame: u8,
    pub current_throw: u8,
    pub complete: bool,
}

impl PlayerSnapshot {
    /// Overwrite this snapshot with `player`, reusing the name allocation.
    pub fn update_from(&mut self, player: &Player) {
        self.name.clear();
        self.name.push_str(player.name());
        for (slots, frame) in self.frames.iter_mut().zip(player.frames()) {
            *slots = frame.slots();
        }
        self.scores = *player.scores();
        self.current_frame = player.current_frame();
        self.current_throw = player.current_throw();
        self.complete = player.is_complete();
    }

    /// Cumulative score through the last frame
    pub fn final_score(&self) -> Option<u16> {
        self.scores[FRAME_COUNT - 1]
    }
}

impl From<&Player> for PlayerSnapshot {
    fn from(value: &Player) -> Self {
        let mut s = Self::default();
        s.update_from(value);
        s
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub players: Vec<PlayerSnapshot>,
    /// Index of the player whose turn it is.
    pub current_player: usize,
    /// Frame/throw of the current player (both 0 when there is none).
    pub current_frame: u8,
    pub current_throw: u8,
    pub game_over: bool,
    /// All players sharing the best final score (empty until the game is over).
    pub winners: Vec<usize>,
    pub top_score: Option<u16>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.phase = GamePhase::Setup;
        self.players.clear();
        self.current_player = 0;
        self.current_frame = 0;
        self.current_throw = 0;
        self.game_over = false;
        self.winners.clear();
        self.top_score = None;
    }

    /// Throws are being accepted
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::InProgress
    }

    pub fn current(&self) -> Option<&PlayerSnapshot> {
        if self.playable() {
            self.players.get(self.current_player)
        } else {
            None
        }
    }
}
