//! Game core
//!
//! Sampling, clue fetching, board state and reveal logic. Nothing in here
//! touches the DOM; the view is reached only through the `View` trait.

pub mod fetcher;
pub mod lifecycle;
pub mod reveal;
pub mod sampler;
pub mod state;

pub use fetcher::{fetch_category, sample_clues};
pub use lifecycle::{Game, RunPlan, build_board, handle_click, redraw, refresh};
pub use reveal::reveal;
pub use sampler::sample_category_ids;
pub use state::{Board, Category, CellRef, Clue, PLACEHOLDER, RevealStage};
