//! DOM view
//!
//! Expects the page to provide:
//! - `table#jeopardy` with a `thead` and `tbody`
//! - `#spin-container` loading spinner
//! - `button#restart`
//! - `#error` message line

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::View;
use crate::error::GameError;
use crate::game::{Board, CellRef, PLACEHOLDER};

pub const BOARD_ID: &str = "jeopardy";
pub const RESTART_ID: &str = "restart";
const SPINNER_ID: &str = "spin-container";
const ERROR_ID: &str = "error";

pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn select(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    fn clear_board(&self) {
        for selector in ["#jeopardy thead", "#jeopardy tbody"] {
            if let Some(el) = self.select(selector) {
                el.set_inner_html("");
            }
        }
    }

    fn build_board(&self, board: &Board) -> Result<(), JsValue> {
        self.clear_board();
        let thead = self
            .select("#jeopardy thead")
            .ok_or_else(|| JsValue::from_str("missing #jeopardy thead"))?;
        let tbody = self
            .select("#jeopardy tbody")
            .ok_or_else(|| JsValue::from_str("missing #jeopardy tbody"))?;

        let header = self.document.create_element("tr")?;
        for category in &board.categories {
            let th = self.document.create_element("th")?;
            th.set_text_content(Some(&category.title));
            header.append_child(&th)?;
        }
        thead.append_child(&header)?;

        for row in 0..board.num_rows() {
            let tr = self.document.create_element("tr")?;
            for col in 0..board.num_categories() {
                let td = self.document.create_element("td")?;
                td.set_id(&CellRef::new(col, row).id());
                td.set_text_content(Some(PLACEHOLDER));
                tr.append_child(&td)?;
            }
            tbody.append_child(&tr)?;
        }
        Ok(())
    }
}

impl View for DomView {
    fn render_board(&self, board: &Board) {
        if let Err(e) = self.build_board(board) {
            log::error!("Failed to render board: {:?}", e);
        }
    }

    fn set_loading(&self, loading: bool) {
        if loading {
            self.clear_board();
            self.set_hidden(ERROR_ID, true);
        }
        self.set_hidden(SPINNER_ID, !loading);

        if let Some(btn) = self.document.get_element_by_id(RESTART_ID) {
            if loading {
                let _ = btn.set_attribute("disabled", "");
                btn.set_text_content(Some("Loading..."));
            } else {
                let _ = btn.remove_attribute("disabled");
                btn.set_text_content(Some("Restart"));
            }
        }
    }

    fn show_cell(&self, cell: CellRef, text: &str) {
        match self.document.get_element_by_id(&cell.id()) {
            Some(td) => td.set_text_content(Some(text)),
            None => log::warn!("No cell {} on the page", cell.id()),
        }
    }

    fn show_error(&self, error: &GameError) {
        if let Some(el) = self.document.get_element_by_id(ERROR_ID) {
            el.set_text_content(Some(&error.user_message()));
            let _ = el.set_attribute("class", "");
        }
    }
}
