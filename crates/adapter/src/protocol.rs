//! Protocol module - JSON message types for external controllers
//!
//! Line-delimited JSON: one message per line. Every message carries `type`
//! and `seq` (sender-assigned sequence number).

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use blockshot_core::{GameSnapshot, PieceSnapshot, TargetSnapshot};
use blockshot_types::{cell_code, GameIntent, PolicyKind, Rect, ShapeKind};

/// Most intents accepted in one command
pub const MAX_INTENTS: usize = 32;

// ============== Controller -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommandType {
    #[default]
    #[serde(rename = "command")]
    Command,
}

/// Intents to apply before the next frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    /// Frame the controller was looking at when it decided (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,
    #[serde(default)]
    pub intents: IntentList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentList(pub ArrayVec<GameIntent, MAX_INTENTS>);

impl IntentList {
    pub fn iter(&self) -> impl Iterator<Item = GameIntent> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for IntentList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = IntentList;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an array of intent strings")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut out = ArrayVec::<GameIntent, MAX_INTENTS>::new();
                while let Some(name) = seq.next_element::<std::borrow::Cow<'de, str>>()? {
                    let intent = GameIntent::from_str(&name).ok_or_else(|| {
                        serde::de::Error::custom(format!("unknown intent {name:?}"))
                    })?;
                    out.try_push(intent)
                        .map_err(|_| serde::de::Error::custom("too many intents"))?;
                }
                Ok(IntentList(out))
            }
        }

        deserializer.deserialize_seq(V)
    }
}

impl Serialize for IntentList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for intent in &self.0 {
            seq.serialize_element(intent.as_str())?;
        }
        seq.end()
    }
}

// ============== Game -> Controller Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_json")]
    InvalidJson,
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "unknown_type")]
    UnknownType,
}

/// Error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Game state observation, built from a [`GameSnapshot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub frame: u64,
    pub episode_id: u32,
    pub seed: u32,
    pub policy: PolicyKind,
    pub playable: bool,
    pub game_over: bool,
    pub score: u32,
    pub lines: u32,
    pub grid: GridObservation,
    pub player: Rect,
    pub pieces: Vec<PieceObservation>,
    pub projectiles: Vec<Rect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<TargetObservation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridObservation {
    pub width: usize,
    pub height: usize,
    /// Row-major colour codes, 0 = empty, 1-4 = colour
    pub cells: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceObservation {
    pub id: u32,
    /// Absent for single-cell pieces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShapeKind>,
    pub color: u8,
    pub x: f32,
    pub y: f32,
    /// Current mask rows, 1 = occupied
    pub mask: Vec<Vec<u8>>,
}

impl From<&PieceSnapshot> for PieceObservation {
    fn from(value: &PieceSnapshot) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            color: value.color.code(),
            x: value.x,
            y: value.y,
            mask: value
                .mask
                .iter()
                .map(|row| row.iter().map(|&c| u8::from(c)).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetObservation {
    pub kind: ShapeKind,
    pub origin: [usize; 2],
    pub cells: Vec<[usize; 2]>,
}

impl From<&TargetSnapshot> for TargetObservation {
    fn from(value: &TargetSnapshot) -> Self {
        Self {
            kind: value.kind,
            origin: [value.origin.0, value.origin.1],
            cells: value.cells.iter().map(|&(c, r)| [c, r]).collect(),
        }
    }
}

impl ObservationMessage {
    pub fn from_snapshot(seq: u64, snap: &GameSnapshot) -> Self {
        Self {
            msg_type: ObservationType::Observation,
            seq,
            frame: snap.frame,
            episode_id: snap.episode_id,
            seed: snap.seed,
            policy: snap.policy,
            playable: snap.playable(),
            game_over: snap.game_over,
            score: snap.score,
            lines: snap.lines,
            grid: GridObservation {
                width: snap.grid_width,
                height: snap.grid_height,
                cells: snap
                    .rows()
                    .map(|row| row.iter().copied().map(cell_code).collect())
                    .collect(),
            },
            player: snap.player,
            pieces: snap.pieces.iter().map(PieceObservation::from).collect(),
            projectiles: snap.projectiles.clone(),
            targets: snap.targets.iter().map(TargetObservation::from).collect(),
        }
    }
}

// ============== Message Parsing ==============

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported message type {0:?}")]
    UnknownType(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl ProtocolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProtocolError::Json(_) => ErrorCode::InvalidJson,
            ProtocolError::UnknownType(_) => ErrorCode::UnknownType,
            ProtocolError::InvalidCommand(_) => ErrorCode::InvalidCommand,
        }
    }
}

/// Parse one line of controller input into a command.
///
/// Blank lines are not commands; callers should skip them before parsing.
pub fn parse_command_line(line: &str) -> Result<CommandMessage, ProtocolError> {
    #[derive(Debug, Deserialize)]
    struct TypeOnly {
        #[serde(rename = "type")]
        msg_type: Option<String>,
    }

    let value: serde_json::Value = serde_json::from_str(line.trim())?;
    let head = TypeOnly::deserialize(&value)?;
    match head.msg_type.as_deref() {
        None | Some("command") => {}
        Some(other) => return Err(ProtocolError::UnknownType(other.to_string())),
    }
    serde_json::from_value(value).map_err(|e| ProtocolError::InvalidCommand(e.to_string()))
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.to_string(),
    }
}

impl From<&ProtocolError> for ErrorMessage {
    fn from(value: &ProtocolError) -> Self {
        create_error(0, value.code(), &value.to_string())
    }
}
