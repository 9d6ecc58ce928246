//! Run-level error type
//!
//! Everything that can abort a board refresh. Invalid cell references are
//! not represented here: they are programmer errors and panic.

use thiserror::Error;

use crate::source::CategoryId;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("category pool too small: need {requested}, only {available} available")]
    InsufficientPool { requested: usize, available: usize },

    #[error("category {id} has no clues")]
    CategoryUnavailable { id: CategoryId },

    #[error("category {id} has {available} clues, need {required}")]
    InsufficientClues {
        id: CategoryId,
        required: usize,
        available: usize,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("request to {url} timed out after {ms} ms")]
    Timeout { url: String, ms: u32 },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("a board refresh is already in progress")]
    RunInProgress,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Decode(err.to_string())
    }
}

impl GameError {
    /// Short message suitable for showing to the player
    pub fn user_message(&self) -> String {
        match self {
            GameError::RunInProgress => "Still loading, hang on...".to_string(),
            GameError::Network(_) | GameError::Http { .. } | GameError::Timeout { .. } => {
                "Couldn't reach the trivia service. Press Restart to try again.".to_string()
            }
            other => format!("Couldn't build a board ({other}). Press Restart to try again."),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
