//! Game state module - the bowling scoring engine
//!
//! Owns the players, the turn order and the game phase. Every accepted throw is
//! recorded on the current player, all scores are recomputed, and the turn moves
//! round-robin to the next player who still has throws left. When nobody does,
//! the game ends and the winners are fixed.

use tracing::{debug, info};

use crate::error::GameError;
use crate::player::Player;
use crate::snapshot::{GameSnapshot, PlayerSnapshot};
use crate::types::{GamePhase, ThrowOutcome, FRAME_COUNT, PIN_COUNT};

/// Complete game state
#[derive(Debug, Clone, Default)]
pub struct GameState {
    players: Vec<Player>,
    current_player: usize,
    phase: GamePhase,
    /// Fixed once when the game ends.
    winners: Vec<usize>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player during setup. Returns the new player's index.
    pub fn add_player(&mut self, name: &str) -> Result<usize, GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::GameAlreadyStarted);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }

        self.players.push(Player::new(name));
        let idx = self.players.len() - 1;
        info!(player = idx, name, "player added");
        Ok(idx)
    }

    /// Start the game with the first player up
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::GameAlreadyStarted);
        }
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        self.phase = GamePhase::InProgress;
        self.current_player = 0;
        info!(players = self.players.len(), "game started");
        Ok(())
    }

    /// Drop all players and return to setup
    pub fn reset_game(&mut self) {
        self.players.clear();
        self.current_player = 0;
        self.phase = GamePhase::Setup;
        self.winners.clear();
        info!("game reset");
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase == GamePhase::InProgress
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    /// Player whose turn it is, while the game is in progress
    pub fn current_player(&self) -> Option<&Player> {
        if self.started() {
            self.players.get(self.current_player)
        } else {
            None
        }
    }

    /// Indices of every player sharing the best final score.
    ///
    /// Ties are not broken: all co-leaders are returned, in player order.
    /// Empty until the game is over.
    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    /// Final score of the winners, once the game is over
    pub fn top_score(&self) -> Option<u16> {
        self.winners
            .first()
            .and_then(|&idx| self.players.get(idx))
            .map(|p| p.final_score().unwrap_or(0))
    }

    /// Record the pins knocked down by a single throw of the current player.
    ///
    /// The returned outcome says whether the caller should re-rack and whose
    /// turn is next. Rejected throws leave the state untouched.
    pub fn submit_throw(&mut self, pins_down: u8) -> Result<ThrowOutcome, GameError> {
        match self.phase {
            GamePhase::Setup => return Err(GameError::GameNotStarted),
            GamePhase::Over => return Err(GameError::GameOver),
            GamePhase::InProgress => {}
        }

        if pins_down > PIN_COUNT {
            debug!(pins_down, "rejected pin count");
            return Err(GameError::InvalidPinCount { pins_down });
        }

        let idx = self.current_player;
        let Some(player) = self.players.get_mut(idx) else {
            return Err(GameError::NoPlayers);
        };

        if player.is_complete() {
            debug!(player = idx, "player already complete, passing turn");
            let frame = player.current_frame();
            self.next_player();
            return Ok(ThrowOutcome {
                player: idx,
                frame,
                throw: 0,
                pins: 0,
                skipped: true,
                rack_reset: true,
                turn_ended: true,
                game_over: self.game_over(),
                next_player: self.current_player,
            });
        }

        let standing = player.standing_pins();
        if pins_down > standing {
            debug!(player = idx, pins_down, standing, "rejected throw");
            return Err(GameError::TooManyPins {
                pins_down,
                standing,
            });
        }

        let step = player.apply_throw(pins_down);
        debug!(
            player = idx,
            frame = step.frame,
            throw = step.throw,
            pins = pins_down,
            "throw recorded"
        );

        self.recalculate_scores();

        if step.turn_ended {
            self.next_player();
        }

        Ok(ThrowOutcome {
            player: idx,
            frame: step.frame,
            throw: step.throw,
            pins: pins_down,
            skipped: false,
            rack_reset: step.rack_reset,
            turn_ended: step.turn_ended,
            game_over: self.game_over(),
            next_player: self.current_player,
        })
    }

    /// Recompute every player's cumulative scores from their frames
    pub fn recalculate_scores(&mut self) {
        for player in &mut self.players {
            player.recalculate_scores();
        }
    }

    /// Pass the turn to the next player with throws left, ending the game if
    /// there is none.
    fn next_player(&mut self) {
        let count = self.players.len();
        if count == 0 {
            return;
        }

        if self.players.iter().all(Player::is_complete) {
            self.finish_game();
            return;
        }

        let mut idx = (self.current_player + 1) % count;
        while self.players[idx].is_complete() {
            idx = (idx + 1) % count;
        }
        self.current_player = idx;
    }

    fn finish_game(&mut self) {
        if self.phase == GamePhase::Over {
            return;
        }
        self.phase = GamePhase::Over;

        let best = self
            .players
            .iter()
            .map(|p| p.final_score().unwrap_or(0))
            .max()
            .unwrap_or(0);
        self.winners = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.final_score().unwrap_or(0) == best)
            .map(|(idx, _)| idx)
            .collect();

        info!(winners = ?self.winners, score = best, "game over");
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.phase = self.phase;

        out.players.truncate(self.players.len());
        for (idx, player) in self.players.iter().enumerate() {
            match out.players.get_mut(idx) {
                Some(slot) => slot.update_from(player),
                None => out.players.push(PlayerSnapshot::from(player)),
            }
        }

        out.current_player = self.current_player;
        match self.current_player() {
            Some(player) => {
                out.current_frame = player.current_frame();
                out.current_throw = player.current_throw();
            }
            None if self.game_over() => {
                out.current_frame = FRAME_COUNT as u8;
                out.current_throw = 0;
            }
            None => {
                out.current_frame = 0;
                out.current_throw = 0;
            }
        }
        out.game_over = self.game_over();
        out.winners.clear();
        out.winners.extend_from_slice(&self.winners);
        out.top_score = self.top_score();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
