//! Board state and core game types
//!
//! The board is the single source of truth for what is rendered and what has
//! been revealed. It is replaced wholesale by each successful refresh.

use serde::{Deserialize, Serialize};

/// How much of a clue is currently visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevealStage {
    /// Placeholder glyph only
    #[default]
    Unrevealed,
    /// Question text visible
    QuestionShown,
    /// Answer text visible (terminal)
    AnswerShown,
}

impl RevealStage {
    /// Next stage, or None when already terminal
    pub fn next(self) -> Option<Self> {
        match self {
            RevealStage::Unrevealed => Some(RevealStage::QuestionShown),
            RevealStage::QuestionShown => Some(RevealStage::AnswerShown),
            RevealStage::AnswerShown => None,
        }
    }
}

/// One question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub question: String,
    pub answer: String,
    pub showing: RevealStage,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            showing: RevealStage::Unrevealed,
        }
    }

    /// Text the cell should currently display
    pub fn display_text(&self) -> &str {
        match self.showing {
            RevealStage::Unrevealed => PLACEHOLDER,
            RevealStage::QuestionShown => &self.question,
            RevealStage::AnswerShown => &self.answer,
        }
    }
}

/// Glyph shown in a cell before it is revealed
pub const PLACEHOLDER: &str = "?";

/// A named column of clues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub clues: Vec<Clue>,
}

/// Address of a single cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub category: usize,
    pub clue: usize,
}

impl CellRef {
    pub fn new(category: usize, clue: usize) -> Self {
        Self { category, clue }
    }

    /// DOM id of the cell, `"{category}-{clue}"`
    pub fn id(&self) -> String {
        format!("{}-{}", self.category, self.clue)
    }

    /// Parse a cell id. Anything that isn't `"<digits>-<digits>"` is not a cell.
    pub fn parse(id: &str) -> Option<Self> {
        let (category, clue) = id.split_once('-')?;
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(category) || !digits(clue) {
            return None;
        }
        Some(Self {
            category: category.parse().ok()?,
            clue: clue.parse().ok()?,
        })
    }
}

/// All categories of the current run, in sampler order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub categories: Vec<Category>,
}

impl Board {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    /// Rows on the board (clues in the shortest column)
    pub fn num_rows(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.clues.len())
            .min()
            .unwrap_or(0)
    }

    /// Whether the board has exactly the requested shape
    pub fn has_shape(&self, categories: usize, clues: usize) -> bool {
        self.categories.len() == categories
            && self.categories.iter().all(|c| c.clues.len() == clues)
    }

    /// Look up a clue.
    ///
    /// Panics if `cell` is outside the board: a bad reference means the view
    /// and the board are out of sync.
    pub fn clue(&self, cell: CellRef) -> &Clue {
        self.categories
            .get(cell.category)
            .and_then(|c| c.clues.get(cell.clue))
            .unwrap_or_else(|| panic!("cell {} is outside the board", cell.id()))
    }

    /// Mutable version of [`Board::clue`], same panics
    pub fn clue_mut(&mut self, cell: CellRef) -> &mut Clue {
        self.categories
            .get_mut(cell.category)
            .and_then(|c| c.clues.get_mut(cell.clue))
            .unwrap_or_else(|| panic!("cell {} is outside the board", cell.id()))
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        let cols = self.num_categories();
        (0..self.num_rows()).flat_map(move |row| (0..cols).map(move |col| CellRef::new(col, row)))
    }
}
