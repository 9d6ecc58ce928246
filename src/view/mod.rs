//! View layer
//!
//! The game core only talks to the screen through [`View`]. The browser build
//! drives a DOM table; the native build renders the board as text.

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(not(target_arch = "wasm32"))]
pub mod text;

#[cfg(target_arch = "wasm32")]
pub use dom::DomView;
#[cfg(not(target_arch = "wasm32"))]
pub use text::{TextView, ViewEvent};

use crate::error::GameError;
use crate::game::{Board, CellRef};

pub trait View {
    /// Build the grid: a header of titles and one placeholder cell per clue
    fn render_board(&self, board: &Board);

    /// Toggle the loading indicator and the restart trigger
    fn set_loading(&self, loading: bool);

    /// Replace one cell's text after a reveal
    fn show_cell(&self, cell: CellRef, text: &str);

    /// Surface a failed run to the player
    fn show_error(&self, error: &GameError);
}
