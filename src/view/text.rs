//! Plain-text board view
//!
//! Keeps a copy of what a screen would show and records every view call, so
//! the native demo can print the board and tests can inspect the sequence.

use std::cell::RefCell;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ColumnConstraint, ContentArrangement, Table, Width};

use super::View;
use crate::error::GameError;
use crate::game::{Board, CellRef, PLACEHOLDER};

/// Widest a column gets before its text wraps
const MAX_COLUMN_WIDTH: u16 = 24;

/// A call made on the view, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Loading(bool),
    Rendered { categories: usize, rows: usize },
    Cell(CellRef, String),
    Error(String),
}

#[derive(Debug, Default)]
struct Screen {
    titles: Vec<String>,
    /// `rows[clue][category]`
    rows: Vec<Vec<String>>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, Default)]
pub struct TextView {
    screen: RefCell<Screen>,
    events: RefCell<Vec<ViewEvent>>,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.screen.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.screen.borrow().error.clone()
    }

    /// Current text of a cell, if the board has one there
    pub fn cell_text(&self, cell: CellRef) -> Option<String> {
        self.screen
            .borrow()
            .rows
            .get(cell.clue)
            .and_then(|row| row.get(cell.category))
            .cloned()
    }

    /// Render the screen: status lines, then the board as a table
    pub fn to_text(&self) -> String {
        let screen = self.screen.borrow();
        let mut out = String::new();

        if screen.loading {
            out.push_str("Loading...\n");
        }
        if let Some(error) = &screen.error {
            out.push_str(&format!("! {error}\n"));
        }
        if !screen.titles.is_empty() {
            out.push_str(&board_table(&screen).to_string());
            out.push('\n');
        }
        out
    }

    fn record(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Titles as the header, one row per clue index. Long text wraps.
fn board_table(screen: &Screen) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(screen.titles.iter().map(Cell::new).collect::<Vec<_>>());
    for row in &screen.rows {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    table.set_constraints(
        screen
            .titles
            .iter()
            .map(|_| ColumnConstraint::UpperBoundary(Width::Fixed(MAX_COLUMN_WIDTH))),
    );
    table
}

impl View for TextView {
    fn render_board(&self, board: &Board) {
        let mut screen = self.screen.borrow_mut();
        screen.titles = board.categories.iter().map(|c| c.title.clone()).collect();
        screen.rows = (0..board.num_rows())
            .map(|_| vec![PLACEHOLDER.to_string(); board.num_categories()])
            .collect();
        drop(screen);

        self.record(ViewEvent::Rendered {
            categories: board.num_categories(),
            rows: board.num_rows(),
        });
    }

    fn set_loading(&self, loading: bool) {
        let mut screen = self.screen.borrow_mut();
        if loading {
            // Starting a run wipes the board and any old error
            screen.titles.clear();
            screen.rows.clear();
            screen.error = None;
        }
        screen.loading = loading;
        drop(screen);

        self.record(ViewEvent::Loading(loading));
    }

    fn show_cell(&self, cell: CellRef, text: &str) {
        if let Some(slot) = self
            .screen
            .borrow_mut()
            .rows
            .get_mut(cell.clue)
            .and_then(|row| row.get_mut(cell.category))
        {
            *slot = text.to_string();
        }
        self.record(ViewEvent::Cell(cell, text.to_string()));
    }

    fn show_error(&self, error: &GameError) {
        let message = error.user_message();
        self.screen.borrow_mut().error = Some(message.clone());
        self.record(ViewEvent::Error(message));
    }
}
