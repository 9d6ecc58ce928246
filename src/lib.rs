//! Trivia Board - a Jeopardy-style clue board for the browser
//!
//! Core modules:
//! - `game`: Category sampling, clue fetching, board state, reveal logic, run lifecycle
//! - `source`: Trivia catalogue access (browser fetch or in-memory)
//! - `view`: DOM and text renderers behind the `View` trait
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Board shape and API configuration

pub mod error;
pub mod game;
pub mod platform;
pub mod settings;
pub mod source;
pub mod view;

pub use error::{GameError, Result};
pub use game::{Board, CellRef, Game};
pub use settings::{FetchMode, Settings};

/// Game configuration constants
pub mod consts {
    /// Default trivia API (jService-compatible)
    pub const API_BASE_URL: &str = "https://jservice.io/api/";

    /// Columns on the board
    pub const NUM_CATEGORIES: usize = 6;
    /// Rows on the board
    pub const NUM_CLUES_PER_CAT: usize = 5;

    /// Categories requested from the API to sample from (the API maximum)
    pub const CATEGORY_POOL_SIZE: usize = 100;

    /// Per-request timeout
    pub const REQUEST_TIMEOUT_MS: u32 = 10_000;
}
