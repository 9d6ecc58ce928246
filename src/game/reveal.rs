//! Reveal controller
//!
//! Each click moves a clue one stage forward:
//! unrevealed → question → answer. Clicks on an answered clue do nothing.

use super::state::{Board, CellRef};

/// Advance the clue at `cell` and return the text the cell should now show.
///
/// Returns None when the clue was already showing its answer. Panics if
/// `cell` is outside the board.
pub fn reveal(board: &mut Board, cell: CellRef) -> Option<String> {
    let clue = board.clue_mut(cell);
    let next = clue.showing.next()?;
    clue.showing = next;
    log::debug!("Cell {} -> {:?}", cell.id(), next);
    Some(clue.display_text().to_string())
}
