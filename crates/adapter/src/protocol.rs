//! Protocol module - JSON message types for the bowling adapter
//!
//! Implements a line-delimited JSON protocol. Every outbound message has:
//! type, seq (session sequence number), ts (timestamp in ms). Requests may carry
//! their own `seq`, which is echoed back as `request_seq`.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameSnapshot, PlayerSnapshot};
use crate::input::{PinRack, RackError};
use crate::types::{GamePhase, ThrowOutcome, FRAME_COUNT, MAX_THROWS_PER_FRAME};

// ============== Client -> Game Messages ==============

/// Request without a payload (start, reset, submit, reset_pins, snapshot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BareRequest {
    #[serde(default)]
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPlayerRequest {
    #[serde(default)]
    pub seq: u64,
    pub name: String,
}

/// Report the pins knocked down by one throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowRequest {
    #[serde(default)]
    pub seq: u64,
    pub pins: u8,
}

/// Flip a single pin on the rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRequest {
    #[serde(default)]
    pub seq: u64,
    pub pin: u8,
}

/// Knock pins down from a dart hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DartRequest {
    #[serde(default)]
    pub seq: u64,
    pub zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<u8>,
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    #[serde(rename = "unknown_type")]
    UnknownType,
    #[serde(rename = "invalid_pin_count")]
    InvalidPinCount,
    #[serde(rename = "too_many_pins")]
    TooManyPins,
    #[serde(rename = "game_not_started")]
    GameNotStarted,
    #[serde(rename = "game_over")]
    GameOver,
    #[serde(rename = "game_already_started")]
    GameAlreadyStarted,
    #[serde(rename = "no_players")]
    NoPlayers,
    #[serde(rename = "empty_player_name")]
    EmptyPlayerName,
    #[serde(rename = "invalid_pin")]
    InvalidPin,
    #[serde(rename = "pin_locked")]
    PinLocked,
    #[serde(rename = "invalid_dart")]
    InvalidDart,
    #[serde(rename = "rack_detached")]
    RackDetached,
}

impl From<&GameError> for ErrorCode {
    fn from(value: &GameError) -> Self {
        match value {
            GameError::InvalidPinCount { .. } => Self::InvalidPinCount,
            GameError::TooManyPins { .. } => Self::TooManyPins,
            GameError::GameNotStarted => Self::GameNotStarted,
            GameError::GameOver => Self::GameOver,
            GameError::GameAlreadyStarted => Self::GameAlreadyStarted,
            GameError::NoPlayers => Self::NoPlayers,
            GameError::EmptyPlayerName => Self::EmptyPlayerName,
        }
    }
}

impl From<&RackError> for ErrorCode {
    fn from(value: &RackError) -> Self {
        match value {
            RackError::InvalidPin(_) => Self::InvalidPin,
            RackError::PinLocked(_) => Self::PinLocked,
        }
    }
}

/// Welcome message (first line of every session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub game_id: String,
    pub stream_observations: bool,
}

/// Acknowledgment for an accepted request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub request_seq: u64,
    pub status: AckStatus,
    /// Index of a newly added player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<usize>,
    /// Present when the request recorded (or skipped) a throw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeMessage>,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub request_seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutcomeMessage {
    pub player: usize,
    pub frame: u8,
    pub throw: u8,
    pub pins: u8,
    pub skipped: bool,
    pub rack_reset: bool,
    pub turn_ended: bool,
    pub game_over: bool,
    pub next_player: usize,
}

impl From<ThrowOutcome> for OutcomeMessage {
    fn from(value: ThrowOutcome) -> Self {
        Self {
            player: value.player,
            frame: value.frame,
            throw: value.throw,
            pins: value.pins,
            skipped: value.skipped,
            rack_reset: value.rack_reset,
            turn_ended: value.turn_ended,
            game_over: value.game_over,
            next_player: value.next_player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseLower {
    #[serde(rename = "setup")]
    Setup,
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "over")]
    Over,
}

impl From<GamePhase> for PhaseLower {
    fn from(value: GamePhase) -> Self {
        match value {
            GamePhase::Setup => Self::Setup,
            GamePhase::InProgress => Self::InProgress,
            GamePhase::Over => Self::Over,
        }
    }
}

/// Game state observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub phase: PhaseLower,
    pub playable: bool,
    pub game_over: bool,
    /// Absent unless a game is in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_player: Option<usize>,
    pub current_frame: u8,
    pub current_throw: u8,
    pub players: Vec<PlayerObservation>,
    pub winners: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_score: Option<u16>,
    pub rack: RackObservation,
    pub state_hash: StateHash,
}

/// One player's scorecard: raw throws and cumulative scores (`null` = undefined)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerObservation {
    pub name: String,
    pub frames: [[Option<u8>; MAX_THROWS_PER_FRAME]; FRAME_COUNT],
    pub scores: [Option<u16>; FRAME_COUNT],
    pub complete: bool,
}

impl From<&PlayerSnapshot> for PlayerObservation {
    fn from(value: &PlayerSnapshot) -> Self {
        Self {
            name: value.name.clone(),
            frames: value.frames,
            scores: value.scores,
            complete: value.complete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackObservation {
    /// Ids of the pins currently down.
    pub down: Vec<u8>,
    /// Pins down since the last submitted throw.
    pub pending: u8,
}

impl From<&PinRack> for RackObservation {
    fn from(value: &PinRack) -> Self {
        Self {
            down: value.down_pins().to_vec(),
            pending: value.pending(),
        }
    }
}

/// Deterministic state hash serialized as lowercase hex (without heap allocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut buf = [0u8; 16];
        let mut v = self.0;
        for i in 0..16 {
            buf[15 - i] = HEX[(v & 0x0f) as usize];
            v >>= 4;
        }
        let s = std::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        u64::from_str_radix(s.trim(), 16)
            .map(StateHash)
            .map_err(|_| serde::de::Error::custom("invalid hex"))
    }
}

/// FNV-1a hasher used for `state_hash`.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl std::hash::Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Hash of everything an observation reports besides `seq`/`ts`
pub fn state_hash(snapshot: &GameSnapshot, rack: &PinRack) -> StateHash {
    use std::hash::{Hash, Hasher};

    let mut hasher = Fnv1aHasher::new();
    snapshot.hash(&mut hasher);
    rack.hash(&mut hasher);
    StateHash(hasher.finish())
}

// ============== Message Parsing ==============

/// Parsed incoming request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    AddPlayer(AddPlayerRequest),
    Start(BareRequest),
    Reset(BareRequest),
    Throw(ThrowRequest),
    TogglePin(PinRequest),
    Dart(DartRequest),
    Submit(BareRequest),
    ResetPins(BareRequest),
    Snapshot(BareRequest),
    Unknown(UnknownMessage),
}

impl Request {
    /// Client sequence number (0 when omitted)
    pub fn seq(&self) -> u64 {
        match self {
            Request::AddPlayer(m) => m.seq,
            Request::Throw(m) => m.seq,
            Request::TogglePin(m) => m.seq,
            Request::Dart(m) => m.seq,
            Request::Unknown(m) => m.seq,
            Request::Start(m)
            | Request::Reset(m)
            | Request::Submit(m)
            | Request::ResetPins(m)
            | Request::Snapshot(m) => m.seq,
        }
    }

    /// Whether the request can change game or rack state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Request::Snapshot(_) | Request::Unknown(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
    pub msg_type: String,
}

const KNOWN_TYPES: [&str; 9] = [
    "add_player",
    "start",
    "reset",
    "throw",
    "toggle_pin",
    "dart",
    "submit",
    "reset_pins",
    "snapshot",
];

/// Parse a JSON request from a line
pub fn parse_request(json: &str) -> Result<Request, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "add_player")]
        AddPlayer(AddPlayerRequest),
        #[serde(rename = "start")]
        Start(BareRequest),
        #[serde(rename = "reset")]
        Reset(BareRequest),
        #[serde(rename = "throw")]
        Throw(ThrowRequest),
        #[serde(rename = "toggle_pin")]
        TogglePin(PinRequest),
        #[serde(rename = "dart")]
        Dart(DartRequest),
        #[serde(rename = "submit")]
        Submit(BareRequest),
        #[serde(rename = "reset_pins")]
        ResetPins(BareRequest),
        #[serde(rename = "snapshot")]
        Snapshot(BareRequest),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::AddPlayer(m)) => Ok(Request::AddPlayer(m)),
        Ok(InboundMessage::Start(m)) => Ok(Request::Start(m)),
        Ok(InboundMessage::Reset(m)) => Ok(Request::Reset(m)),
        Ok(InboundMessage::Throw(m)) => Ok(Request::Throw(m)),
        Ok(InboundMessage::TogglePin(m)) => Ok(Request::TogglePin(m)),
        Ok(InboundMessage::Dart(m)) => Ok(Request::Dart(m)),
        Ok(InboundMessage::Submit(m)) => Ok(Request::Submit(m)),
        Ok(InboundMessage::ResetPins(m)) => Ok(Request::ResetPins(m)),
        Ok(InboundMessage::Snapshot(m)) => Ok(Request::Snapshot(m)),
        Err(e) => {
            // An unknown type is reported separately from a malformed message.
            #[derive(Debug, Deserialize)]
            struct TypeAndSeq {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let probe = serde_json::from_str::<TypeAndSeq>(json)?;
            match probe.msg_type {
                Some(t) if !KNOWN_TYPES.contains(&t.as_str()) => {
                    Ok(Request::Unknown(UnknownMessage {
                        seq: probe.seq.unwrap_or(0),
                        msg_type: t,
                    }))
                }
                _ => Err(e),
            }
        }
    }
}

/// Pull `"seq": N` out of a line that failed to parse
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest
        .as_bytes()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Utility Functions ==============

/// Create a welcome message
pub fn create_welcome(seq: u64, protocol_version: &str, stream_observations: bool) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        game_id: "bulling".to_string(),
        stream_observations,
    }
}

/// Create an acknowledgment
pub fn create_ack(seq: u64, request_seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        request_seq,
        status: AckStatus::Ok,
        player: None,
        outcome: None,
    }
}

/// Create an error message
pub fn create_error(seq: u64, request_seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        request_seq,
        code,
        message: message.to_string(),
    }
}

/// Build an observation from a game snapshot and the rack
pub fn build_observation(seq: u64, snapshot: &GameSnapshot, rack: &PinRack) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        phase: PhaseLower::from(snapshot.phase),
        playable: snapshot.playable(),
        game_over: snapshot.game_over,
        current_player: snapshot.playable().then_some(snapshot.current_player),
        current_frame: snapshot.current_frame,
        current_throw: snapshot.current_throw,
        players: snapshot.players.iter().map(PlayerObservation::from).collect(),
        winners: snapshot.winners.clone(),
        top_score: snapshot.top_score,
        rack: RackObservation::from(rack),
        state_hash: state_hash(snapshot, rack),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    #[test]
    fn test_parse_add_player() {
        let json = r#"{"type":"add_player","seq":1,"name":"Ana"}"#;
        match parse_request(json).unwrap() {
            Request::AddPlayer(msg) => {
                assert_eq!(msg.seq, 1);
                assert_eq!(msg.name, "Ana");
            }
            other => panic!("Expected AddPlayer, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bare_requests_default_seq() {
        assert_eq!(
            parse_request(r#"{"type":"start"}"#).unwrap(),
            Request::Start(BareRequest { seq: 0 })
        );
        assert_eq!(
            parse_request(r#"{"type":"submit","seq":9}"#).unwrap(),
            Request::Submit(BareRequest { seq: 9 })
        );
        assert_eq!(parse_request(r#"{"type":"snapshot","seq":4}"#).unwrap().seq(), 4);
    }

    #[test]
    fn test_parse_throw_and_pin() {
        assert_eq!(
            parse_request(r#"{"type":"throw","seq":2,"pins":7}"#).unwrap(),
            Request::Throw(ThrowRequest { seq: 2, pins: 7 })
        );
        assert_eq!(
            parse_request(r#"{"type":"toggle_pin","pin":3}"#).unwrap(),
            Request::TogglePin(PinRequest { seq: 0, pin: 3 })
        );
    }

    #[test]
    fn test_parse_dart() {
        match parse_request(r#"{"type":"dart","seq":5,"zone":"single","segment":19}"#).unwrap() {
            Request::Dart(msg) => {
                assert_eq!(msg.zone, "single");
                assert_eq!(msg.segment, Some(19));
            }
            other => panic!("Expected Dart, got {:?}", other),
        }

        match parse_request(r#"{"type":"dart","zone":"IB"}"#).unwrap() {
            Request::Dart(msg) => assert_eq!(msg.segment, None),
            other => panic!("Expected Dart, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_not_a_parse_error() {
        let req = parse_request(r#"{"type":"bowl","seq":8}"#).unwrap();
        assert_eq!(
            req,
            Request::Unknown(UnknownMessage {
                seq: 8,
                msg_type: "bowl".to_string()
            })
        );
        assert!(!req.is_mutating());
    }

    #[test]
    fn test_malformed_known_type_is_an_error() {
        assert!(parse_request(r#"{"type":"throw","pins":-1}"#).is_err());
        assert!(parse_request(r#"{"type":"add_player"}"#).is_err());
        assert!(parse_request("not json").is_err());
        assert!(parse_request(r#"{"seq":1}"#).is_err());
    }

    #[test]
    fn test_extract_seq_best_effort() {
        assert_eq!(extract_seq_best_effort(r#"{"type":"throw","seq": 42,"pins":x}"#), Some(42));
        assert_eq!(extract_seq_best_effort(r#"{"type":"throw"}"#), None);
        assert_eq!(extract_seq_best_effort(r#"{"seq":"a"}"#), None);
    }

    #[test]
    fn test_error_codes_from_engine_errors() {
        assert_eq!(
            ErrorCode::from(&GameError::TooManyPins {
                pins_down: 5,
                standing: 3
            }),
            ErrorCode::TooManyPins
        );
        assert_eq!(ErrorCode::from(&GameError::GameOver), ErrorCode::GameOver);
        assert_eq!(ErrorCode::from(&RackError::PinLocked(2)), ErrorCode::PinLocked);

        let json = serde_json::to_string(&ErrorCode::GameNotStarted).unwrap();
        assert_eq!(json, r#""game_not_started""#);
    }

    #[test]
    fn test_create_error() {
        let error = create_error(3, 7, ErrorCode::NoPlayers, "Add at least one player first.");
        assert_eq!(error.msg_type, ErrorType::Error);
        assert_eq!(error.request_seq, 7);
        assert_eq!(error.code, ErrorCode::NoPlayers);
    }

    #[test]
    fn test_ack_omits_empty_fields() {
        let ack = create_ack(10, 5);
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["type"], "ack");
        assert_eq!(value["status"], "ok");
        assert_eq!(value["request_seq"], 5);
        assert!(value.get("outcome").is_none());
        assert!(value.get("player").is_none());
    }

    #[test]
    fn test_observation_reports_scores_and_rack() {
        let mut game = GameState::new();
        game.add_player("Ana").unwrap();
        game.start_game().unwrap();
        game.submit_throw(5).unwrap();
        game.submit_throw(5).unwrap();
        game.submit_throw(3).unwrap();

        let mut rack = PinRack::new();
        rack.toggle(1).unwrap();

        let obs = build_observation(4, &game.snapshot(), &rack);
        let value = serde_json::to_value(&obs).unwrap();
        assert_eq!(value["type"], "observation");
        assert_eq!(value["phase"], "in_progress");
        assert_eq!(value["current_player"], 0);
        assert_eq!(value["current_frame"], 1);
        assert_eq!(value["current_throw"], 1);
        assert_eq!(value["players"][0]["frames"][0][0], 5);
        assert_eq!(value["players"][0]["scores"][0], 13);
        assert!(value["players"][0]["scores"][1].is_null());
        assert_eq!(value["rack"]["down"][0], 1);
        assert_eq!(value["rack"]["pending"], 1);
    }

    #[test]
    fn test_state_hash_changes_with_state() {
        let mut game = GameState::new();
        game.add_player("Ana").unwrap();
        let rack = PinRack::new();

        let a = state_hash(&game.snapshot(), &rack);
        let b = state_hash(&game.snapshot(), &rack);
        assert_eq!(a, b);

        game.start_game().unwrap();
        let c = state_hash(&game.snapshot(), &rack);
        assert_ne!(a, c);

        let mut rack = PinRack::new();
        rack.toggle(10).unwrap();
        assert_ne!(c, state_hash(&game.snapshot(), &rack));
    }

    #[test]
    fn test_state_hash_serializes_as_hex() {
        let json = serde_json::to_string(&StateHash(0xff)).unwrap();
        assert_eq!(json, r#""00000000000000ff""#);
        let parsed: StateHash = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StateHash(0xff));
    }
}
