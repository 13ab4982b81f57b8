use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("config error: {0}")]
    Config(String),
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("wolf choice already recorded for hole {0}")]
    DuplicateWolfChoice(u8),
    #[error("press already exists: {0}")]
    DuplicatePress(String),
    #[error("press rejected: {0}")]
    InvalidPress(String),
    #[error("wolf choice rejected: {0}")]
    InvalidWolfChoice(String),
    #[error("late join rejected: {0}")]
    LateJoinRejected(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}

impl GameError {
    /// Stable reason code for callers that surface errors to users.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::UnknownPlayer(_) => "unknown_player",
            Self::DuplicateWolfChoice(_) => "duplicate_wolf_choice",
            Self::DuplicatePress(_) => "duplicate_press",
            Self::InvalidPress(_) => "invalid_press",
            Self::InvalidWolfChoice(_) => "invalid_wolf_choice",
            Self::LateJoinRejected(_) => "late_join_rejected",
            Self::Parse(_) => "parse",
            Self::Other(_) => "other",
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for GameError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for GameError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
