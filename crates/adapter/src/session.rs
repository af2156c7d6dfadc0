//! Session module - drives one game over a line-delimited JSON stream.
//!
//! A session owns the engine ([`GameState`]) and the pin rack ([`PinRack`]).
//! Each request line produces one `ack` or `error`, optionally followed by an
//! `observation` when observation streaming is enabled.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{SessionConfig, PROTOCOL_VERSION};
use crate::core::{GameError, GameSnapshot, GameState};
use crate::input::{pins_for_hit, PinRack, RackError};
use crate::protocol::{
    build_observation, create_ack, create_error, create_welcome, extract_seq_best_effort,
    parse_request, AckMessage, DartRequest, ErrorCode, ErrorMessage, ObservationMessage,
    OutcomeMessage, Request, WelcomeMessage,
};
use crate::types::{DartHit, ThrowOutcome};

/// Message produced by the session, in send order.
#[derive(Debug, Clone)]
pub enum Outbound {
    Welcome(WelcomeMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
}

impl Outbound {
    /// Serialize as a single JSON line (without the trailing newline)
    pub fn to_line(&self) -> serde_json::Result<String> {
        match self {
            Outbound::Welcome(m) => serde_json::to_string(m),
            Outbound::Ack(m) => serde_json::to_string(m),
            Outbound::Error(m) => serde_json::to_string(m),
            Outbound::Observation(m) => serde_json::to_string(m),
        }
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        fn write_json<W: Write, T: Serialize>(writer: &mut W, msg: &T) -> anyhow::Result<()> {
            serde_json::to_writer(&mut *writer, msg)?;
            writer.write_all(b"\n")?;
            Ok(())
        }

        match self {
            Outbound::Welcome(m) => write_json(writer, m),
            Outbound::Ack(m) => write_json(writer, m),
            Outbound::Error(m) => write_json(writer, m),
            Outbound::Observation(m) => write_json(writer, m),
        }
    }
}

/// Failure of a single request, reported to the client as an `error` line.
#[derive(Debug)]
enum RequestError {
    Game(GameError),
    Rack(RackError),
    InvalidDart(String),
    RackDetached,
}

impl RequestError {
    fn code(&self) -> ErrorCode {
        match self {
            RequestError::Game(e) => ErrorCode::from(e),
            RequestError::Rack(e) => ErrorCode::from(e),
            RequestError::InvalidDart(_) => ErrorCode::InvalidDart,
            RequestError::RackDetached => ErrorCode::RackDetached,
        }
    }

    fn message(&self) -> String {
        match self {
            RequestError::Game(e) => e.to_string(),
            RequestError::Rack(e) => e.to_string(),
            RequestError::InvalidDart(msg) => msg.clone(),
            RequestError::RackDetached => {
                "Pin rack is out of step with this frame; finish it with direct throws".to_string()
            }
        }
    }
}

impl From<GameError> for RequestError {
    fn from(value: GameError) -> Self {
        RequestError::Game(value)
    }
}

impl From<RackError> for RequestError {
    fn from(value: RackError) -> Self {
        RequestError::Rack(value)
    }
}

/// What an accepted request adds to its ack
#[derive(Debug, Default)]
struct Accepted {
    player: Option<usize>,
    outcome: Option<ThrowOutcome>,
}

/// One game session
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    game: GameState,
    rack: PinRack,
    /// Set when a direct throw left the rack out of step with the current frame.
    rack_detached: bool,
    seq: u64,
    snapshot: GameSnapshot,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            game: GameState::new(),
            rack: PinRack::new(),
            rack_detached: false,
            seq: 0,
            snapshot: GameSnapshot::default(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn rack(&self) -> &PinRack {
        &self.rack
    }

    /// Whether rack requests are refused until the next re-rack
    pub fn rack_detached(&self) -> bool {
        self.rack_detached
    }

    fn reset_rack(&mut self) {
        self.rack.reset();
        self.rack_detached = false;
    }

    fn ensure_rack_attached(&self) -> Result<(), RequestError> {
        if self.rack_detached {
            Err(RequestError::RackDetached)
        } else {
            Ok(())
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// First message of a session
    pub fn welcome(&mut self) -> WelcomeMessage {
        let seq = self.next_seq();
        create_welcome(seq, PROTOCOL_VERSION, self.config.stream_observations)
    }

    /// Current observation of the game and rack
    pub fn observation(&mut self) -> ObservationMessage {
        let seq = self.next_seq();
        self.game.snapshot_into(&mut self.snapshot);
        build_observation(seq, &self.snapshot, &self.rack)
    }

    /// Handle one raw input line. Blank lines produce nothing.
    pub fn handle_line(&mut self, line: &str) -> Vec<Outbound> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        match parse_request(line) {
            Ok(request) => self.handle_request(request),
            Err(e) => {
                warn!(error = %e, "malformed request line");
                let request_seq = extract_seq_best_effort(line).unwrap_or(0);
                let seq = self.next_seq();
                vec![Outbound::Error(create_error(
                    seq,
                    request_seq,
                    ErrorCode::InvalidMessage,
                    &e.to_string(),
                ))]
            }
        }
    }

    /// Apply a parsed request and collect the replies
    pub fn handle_request(&mut self, request: Request) -> Vec<Outbound> {
        let request_seq = request.seq();

        let request = match request {
            Request::Snapshot(_) => return vec![Outbound::Observation(self.observation())],
            Request::Unknown(m) => {
                debug!(msg_type = %m.msg_type, "unknown request type");
                let seq = self.next_seq();
                let message = format!("Unknown message type: {}", m.msg_type);
                return vec![Outbound::Error(create_error(
                    seq,
                    request_seq,
                    ErrorCode::UnknownType,
                    &message,
                ))];
            }
            other => other,
        };

        match self.apply(&request) {
            Ok(accepted) => {
                let mut ack = create_ack(self.next_seq(), request_seq);
                ack.player = accepted.player;
                ack.outcome = accepted.outcome.map(OutcomeMessage::from);

                let mut out = vec![Outbound::Ack(ack)];
                if self.config.stream_observations && request.is_mutating() {
                    out.push(Outbound::Observation(self.observation()));
                }
                out
            }
            Err(e) => {
                debug!(request_seq, error = %e.message(), "request rejected");
                let seq = self.next_seq();
                vec![Outbound::Error(create_error(
                    seq,
                    request_seq,
                    e.code(),
                    &e.message(),
                ))]
            }
        }
    }

    fn apply(&mut self, request: &Request) -> Result<Accepted, RequestError> {
        match request {
            Request::AddPlayer(m) => {
                let idx = self.game.add_player(&m.name)?;
                Ok(Accepted {
                    player: Some(idx),
                    ..Accepted::default()
                })
            }
            Request::Start(_) => {
                self.game.start_game()?;
                self.reset_rack();
                Ok(Accepted::default())
            }
            Request::Reset(_) => {
                self.game.reset_game();
                self.reset_rack();
                Ok(Accepted::default())
            }
            Request::Throw(m) => {
                // A direct count bypasses the rack; the rack stays detached
                // until the engine asks for a re-rack.
                let outcome = self.game.submit_throw(m.pins)?;
                if outcome.rack_reset {
                    self.reset_rack();
                } else if !outcome.skipped {
                    self.rack_detached = true;
                }
                Ok(Accepted {
                    outcome: Some(outcome),
                    ..Accepted::default()
                })
            }
            Request::TogglePin(m) => {
                self.ensure_rack_attached()?;
                self.rack.toggle(m.pin)?;
                Ok(Accepted::default())
            }
            Request::Dart(m) => {
                let hit = parse_dart(m)?;
                self.ensure_rack_attached()?;
                let fallen = self.rack.knock_down_all(pins_for_hit(hit))?;
                debug!(zone = hit.zone_str(), fallen, "dart applied to rack");
                Ok(Accepted::default())
            }
            Request::Submit(_) => {
                self.ensure_rack_attached()?;
                let outcome = self.game.submit_throw(self.rack.pending())?;
                self.rack.take_throw();
                if outcome.rack_reset {
                    self.reset_rack();
                }
                Ok(Accepted {
                    outcome: Some(outcome),
                    ..Accepted::default()
                })
            }
            Request::ResetPins(_) => {
                self.ensure_rack_attached()?;
                self.rack.clear_pending();
                Ok(Accepted::default())
            }
            Request::Snapshot(_) | Request::Unknown(_) => Ok(Accepted::default()),
        }
    }

    /// Run the session until `reader` is exhausted.
    ///
    /// Writes the welcome line first, then one batch of replies per request
    /// line, flushing after each batch. Lines that are not UTF-8 are decoded
    /// lossily and answered like any other malformed request; only I/O
    /// failures end the session early.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> anyhow::Result<()> {
        info!(
            protocol_version = PROTOCOL_VERSION,
            stream_observations = self.config.stream_observations,
            "session started"
        );

        Outbound::Welcome(self.welcome()).write_to(&mut writer)?;
        writer.flush()?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            for msg in self.handle_line(&line) {
                msg.write_to(&mut writer)?;
            }
            writer.flush()?;
        }

        info!("session ended");
        Ok(())
    }
}

fn parse_dart(m: &DartRequest) -> Result<DartHit, RequestError> {
    DartHit::from_parts(&m.zone, m.segment).ok_or_else(|| {
        let message = match m.segment {
            Some(segment) => format!("Invalid dart hit: {} {}", m.zone, segment),
            None => format!("Invalid dart hit: {}", m.zone),
        };
        RequestError::InvalidDart(message)
    })
}
