//! Game lifecycle
//!
//! A run samples categories, fetches each one, and swaps the finished board
//! in. `Game` owns the board and the re-entrancy guard; [`refresh`] drives one
//! run without holding a borrow of the game across an `.await`.

use std::cell::RefCell;

use futures::future::try_join_all;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::fetcher::fetch_category;
use super::reveal::reveal;
use super::sampler::sample_category_ids;
use super::state::{Board, CellRef, RevealStage};
use crate::error::{GameError, Result};
use crate::settings::{FetchMode, Settings};
use crate::source::{CategoryId, TriviaSource};
use crate::view::View;

/// Everything a run needs, captured when it starts
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub settings: Settings,
    pub seed: u64,
}

/// Owned game state shared by the lifecycle, reveal handling and the view
#[derive(Debug)]
pub struct Game {
    board: Board,
    settings: Settings,
    rng: Pcg32,
    in_flight: bool,
    completed_runs: u32,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            board: Board::default(),
            settings,
            rng: Pcg32::seed_from_u64(seed),
            in_flight: false,
            completed_runs: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether a run is currently fetching
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    /// Take the run guard. Fails if a run is already in flight.
    pub fn begin_run(&mut self) -> Result<RunPlan> {
        if self.in_flight {
            return Err(GameError::RunInProgress);
        }
        self.settings.validate()?;

        self.in_flight = true;
        Ok(RunPlan {
            settings: self.settings.clone(),
            seed: self.rng.random(),
        })
    }

    /// Release the run guard, installing the board if the run succeeded.
    ///
    /// A failed run leaves the previous board in place.
    pub fn finish_run(&mut self, result: Result<Board>) -> Result<()> {
        self.in_flight = false;
        let board = result?;
        debug_assert!(board.has_shape(
            self.settings.categories_per_board,
            self.settings.clues_per_category
        ));
        self.board = board;
        self.completed_runs += 1;
        Ok(())
    }

    /// Advance the clicked clue. Ignored while a run is loading.
    ///
    /// Panics if `cell` is outside the board.
    pub fn click(&mut self, cell: CellRef) -> Option<String> {
        if self.in_flight {
            log::debug!("Ignoring click on {} while loading", cell.id());
            return None;
        }
        reveal(&mut self.board, cell)
    }
}

/// Sample categories and fetch their clues into a fresh board
pub async fn build_board<S>(source: &S, settings: &Settings, rng: &mut Pcg32) -> Result<Board>
where
    S: TriviaSource + ?Sized,
{
    let clues = settings.clues_per_category;
    let listing = source.list_categories(settings.category_pool_size).await?;

    // A listed count below the column height can never fill a column
    let pool: Vec<CategoryId> = listing
        .iter()
        .filter(|c| c.clues_count.is_none_or(|n| n as usize >= clues))
        .map(|c| c.id)
        .collect();
    if pool.len() < listing.len() {
        log::debug!(
            "Skipped {} listed categories with fewer than {} clues",
            listing.len() - pool.len(),
            clues
        );
    }

    let ids = sample_category_ids(&pool, settings.categories_per_board, rng)?;
    log::info!("Sampled categories {:?} from pool of {}", ids, pool.len());

    // One RNG stream per category so both fetch modes build the same board
    let streams: Vec<Pcg32> = ids
        .iter()
        .map(|_| Pcg32::seed_from_u64(rng.random()))
        .collect();

    let categories = match settings.fetch_mode {
        FetchMode::Sequential => {
            let mut categories = Vec::with_capacity(ids.len());
            for (&id, mut stream) in ids.iter().zip(streams) {
                categories.push(fetch_category(source, id, clues, &mut stream).await?);
            }
            categories
        }
        FetchMode::Concurrent => {
            try_join_all(ids.iter().zip(streams).map(|(&id, mut stream)| async move {
                fetch_category(source, id, clues, &mut stream).await
            }))
            .await?
        }
    };

    Ok(Board::new(categories))
}

/// Run one full refresh: loading → sample → fetch → render → loaded.
///
/// On failure the previous board stays, is redrawn, and the error is shown.
pub async fn refresh<S, V>(game: &RefCell<Game>, source: &S, view: &V) -> Result<()>
where
    S: TriviaSource + ?Sized,
    V: View + ?Sized,
{
    let plan = match game.borrow_mut().begin_run() {
        Ok(plan) => plan,
        Err(GameError::RunInProgress) => {
            log::warn!("Refresh requested while a run is in flight");
            return Err(GameError::RunInProgress);
        }
        Err(e) => {
            log::error!("Cannot start run: {}", e);
            view.show_error(&e);
            return Err(e);
        }
    };

    view.set_loading(true);
    log::info!(
        "Starting run (seed {}, {} mode)",
        plan.seed,
        plan.settings.fetch_mode.as_str()
    );

    let mut rng = Pcg32::seed_from_u64(plan.seed);
    let result = build_board(source, &plan.settings, &mut rng).await;

    let mut g = game.borrow_mut();
    let outcome = g.finish_run(result);
    match &outcome {
        Ok(()) => {
            log::info!("Board ready ({} runs so far)", g.completed_runs());
            view.render_board(g.board());
        }
        Err(e) => {
            log::error!("Run failed: {}", e);
            if !g.board().is_empty() {
                redraw(view, g.board());
            }
            view.show_error(e);
        }
    }
    view.set_loading(false);
    outcome
}

/// Handle a click on `cell`, updating the view if the clue advanced
pub fn handle_click<V: View + ?Sized>(game: &RefCell<Game>, view: &V, cell: CellRef) {
    let text = game.borrow_mut().click(cell);
    if let Some(text) = text {
        view.show_cell(cell, &text);
    }
}

/// Render the board and restore every cell that was already revealed
pub fn redraw<V: View + ?Sized>(view: &V, board: &Board) {
    view.render_board(board);
    for cell in board.cells() {
        let clue = board.clue(cell);
        if clue.showing != RevealStage::Unrevealed {
            view.show_cell(cell, clue.display_text());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CategoryDetail, CategorySummary, MemorySource, RawClue};
    use crate::view::{TextView, ViewEvent};
    use futures::executor::block_on;
    use std::collections::HashSet;

    fn detail(id: CategoryId, n: usize) -> CategoryDetail {
        CategoryDetail {
            id,
            title: format!("cat{id}"),
            clues: (0..n)
                .map(|i| RawClue {
                    question: format!("q{id}.{i}"),
                    answer: format!("a{id}.{i}"),
                    value: None,
                })
                .collect(),
        }
    }

    fn source_of(n: CategoryId) -> MemorySource {
        MemorySource::new((1..=n).map(|id| detail(id, 6)).collect())
    }

    /// Listing without clue counts, as some catalogues serve it
    struct Uncounted(MemorySource);

    impl TriviaSource for Uncounted {
        async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>> {
            let mut listing = self.0.list_categories(count).await?;
            for summary in &mut listing {
                summary.clues_count = None;
            }
            Ok(listing)
        }

        async fn get_category(&self, id: CategoryId) -> Result<CategoryDetail> {
            self.0.get_category(id).await
        }
    }

    #[test]
    fn test_run_populates_board() {
        let game = RefCell::new(Game::new(Settings::default(), 42));
        let source = source_of(8);
        let view = TextView::new();

        block_on(refresh(&game, &source, &view)).unwrap();

        let g = game.borrow();
        assert!(g.board().has_shape(6, 5));
        assert!(!g.is_loading());
        assert_eq!(g.completed_runs(), 1);

        let titles: HashSet<_> = g.board().categories.iter().map(|c| &c.title).collect();
        assert_eq!(titles.len(), 6);

        // Board follows the order categories were fetched in
        let fetched: Vec<String> = source.fetched().iter().map(|id| format!("cat{id}")).collect();
        let order: Vec<String> = g.board().categories.iter().map(|c| c.title.clone()).collect();
        assert_eq!(fetched, order);

        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Loading(true),
                ViewEvent::Rendered {
                    categories: 6,
                    rows: 5
                },
                ViewEvent::Loading(false),
            ]
        );
    }

    #[test]
    fn test_insufficient_clues_aborts_run() {
        let mut categories: Vec<_> = (1..=6).map(|id| detail(id, 6)).collect();
        categories[2] = CategoryDetail {
            id: 3,
            title: "math".into(),
            clues: vec![
                RawClue {
                    question: "2+2".into(),
                    answer: "4".into(),
                    value: None,
                },
                RawClue {
                    question: "1+1".into(),
                    answer: "2".into(),
                    value: None,
                },
            ],
        };
        let source = Uncounted(MemorySource::new(categories));
        let game = RefCell::new(Game::new(Settings::default(), 1));
        let view = TextView::new();

        let err = block_on(refresh(&game, &source, &view)).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientClues {
                id: 3,
                required: 5,
                available: 2
            }
        ));

        // Fetching stopped at the bad category
        let fetched = source.0.fetched();
        assert_eq!(fetched.last(), Some(&3));
        assert!(fetched.len() <= 6);

        let g = game.borrow();
        assert!(g.board().is_empty());
        assert!(!g.is_loading());
        assert!(!view.is_loading());
        assert!(view.error().is_some());
    }

    #[test]
    fn test_pool_too_small_fails_before_fetching() {
        let source = source_of(4);
        let game = RefCell::new(Game::new(Settings::default(), 1));
        let view = TextView::new();

        let err = block_on(refresh(&game, &source, &view)).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientPool {
                requested: 6,
                available: 4
            }
        ));
        assert!(source.fetched().is_empty());
    }

    #[test]
    fn test_failed_run_keeps_previous_board() {
        let game = RefCell::new(Game::new(Settings::default(), 5));
        let view = TextView::new();
        let good = source_of(6);
        block_on(refresh(&game, &good, &view)).unwrap();

        handle_click(&game, &view, CellRef::new(0, 0));
        let before = game.borrow().board().clone();

        // Every category is needed, so this failure always hits
        let bad = source_of(6).with_failure(4);
        let err = block_on(refresh(&game, &bad, &view)).unwrap_err();
        assert!(matches!(err, GameError::Network(_)));

        let g = game.borrow();
        assert_eq!(g.board(), &before);
        assert_eq!(g.completed_runs(), 1);
        assert!(!g.is_loading());

        // Previous board redrawn with its revealed cell, trigger re-enabled
        let question = before.clue(CellRef::new(0, 0)).question.clone();
        assert_eq!(view.cell_text(CellRef::new(0, 0)), Some(question));
        assert!(!view.is_loading());
        assert!(view.error().is_some());
    }

    #[test]
    fn test_short_categories_skipped_before_sampling() {
        // Nine categories listed, three of them too short for a 5-row column
        let categories = (1..=9)
            .map(|id| detail(id, if id % 3 == 0 { 2 } else { 6 }))
            .collect();
        let source = MemorySource::new(categories);
        let game = RefCell::new(Game::new(Settings::default(), 11));

        block_on(refresh(&game, &source, &TextView::new())).unwrap();
        assert!(game.borrow().board().has_shape(6, 5));

        let mut fetched = source.fetched();
        fetched.sort();
        assert_eq!(fetched, vec![1, 2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_short_categories_shrink_the_pool() {
        let categories = (1..=8)
            .map(|id| detail(id, if id <= 3 { 1 } else { 6 }))
            .collect();
        let source = MemorySource::new(categories);
        let game = RefCell::new(Game::new(Settings::default(), 11));

        let err = block_on(refresh(&game, &source, &TextView::new())).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientPool {
                requested: 6,
                available: 5
            }
        ));
        assert!(source.fetched().is_empty());
    }

    #[test]
    fn test_concurrent_failure_keeps_previous_board() {
        let settings = Settings {
            fetch_mode: FetchMode::Concurrent,
            ..Default::default()
        };
        let game = RefCell::new(Game::new(settings, 21));
        let view = TextView::new();
        block_on(refresh(&game, &source_of(6), &view)).unwrap();
        let before = game.borrow().board().clone();

        let bad = source_of(6).with_failure(4);
        let err = block_on(refresh(&game, &bad, &view)).unwrap_err();
        assert!(matches!(err, GameError::Network(_)));
        assert!(bad.fetched().contains(&4));

        let g = game.borrow();
        assert_eq!(g.board(), &before);
        assert_eq!(g.completed_runs(), 1);
        assert!(!g.is_loading());
        assert!(!view.is_loading());
        assert!(view.error().is_some());
        assert_eq!(
            view.events().last(),
            Some(&ViewEvent::Loading(false))
        );
    }

    #[test]
    fn test_reentrant_refresh_rejected() {
        let game = RefCell::new(Game::new(Settings::default(), 5));
        let source = source_of(8);
        let view = TextView::new();

        let _plan = game.borrow_mut().begin_run().unwrap();
        let err = block_on(refresh(&game, &source, &view)).unwrap_err();
        assert!(matches!(err, GameError::RunInProgress));
        assert!(source.fetched().is_empty());
        assert!(view.events().is_empty());

        game.borrow_mut().finish_run(Err(GameError::Network("x".into()))).ok();
        assert!(block_on(refresh(&game, &source, &view)).is_ok());
    }

    #[test]
    fn test_clicks_ignored_while_loading() {
        let game = RefCell::new(Game::new(Settings::default(), 5));
        let view = TextView::new();
        block_on(refresh(&game, &source_of(6), &view)).unwrap();

        let _plan = game.borrow_mut().begin_run().unwrap();
        assert_eq!(game.borrow_mut().click(CellRef::new(0, 0)), None);
        assert_eq!(
            game.borrow().board().clue(CellRef::new(0, 0)).showing,
            RevealStage::Unrevealed
        );
    }

    #[test]
    fn test_click_flow_updates_view() {
        let game = RefCell::new(Game::new(Settings::default(), 9));
        let view = TextView::new();
        block_on(refresh(&game, &source_of(7), &view)).unwrap();

        let cell = CellRef::new(2, 3);
        let clue = game.borrow().board().clue(cell).clone();

        handle_click(&game, &view, cell);
        assert_eq!(view.cell_text(cell), Some(clue.question.clone()));
        handle_click(&game, &view, cell);
        assert_eq!(view.cell_text(cell), Some(clue.answer.clone()));

        let events_before = view.events().len();
        handle_click(&game, &view, cell);
        assert_eq!(view.events().len(), events_before);
        assert_eq!(view.cell_text(cell), Some(clue.answer));
    }

    #[test]
    fn test_fetch_modes_agree() {
        let source = source_of(20);
        let sequential = Settings::default();
        let concurrent = Settings {
            fetch_mode: FetchMode::Concurrent,
            ..Default::default()
        };

        let a = block_on(build_board(
            &source,
            &sequential,
            &mut Pcg32::seed_from_u64(77),
        ))
        .unwrap();
        let b = block_on(build_board(
            &source,
            &concurrent,
            &mut Pcg32::seed_from_u64(77),
        ))
        .unwrap();
        assert_eq!(a, b);
        assert!(b.has_shape(6, 5));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            clues_per_category: 0,
            ..Default::default()
        };
        let game = RefCell::new(Game::new(settings, 1));
        let view = TextView::new();
        let err = block_on(refresh(&game, &source_of(8), &view)).unwrap_err();
        assert!(matches!(err, GameError::InvalidSettings(_)));
        assert!(!game.borrow().is_loading());
        assert!(view.error().is_some());
    }

    #[test]
    fn test_custom_board_shape() {
        let settings = Settings {
            categories_per_board: 3,
            clues_per_category: 2,
            category_pool_size: 5,
            ..Default::default()
        };
        let game = RefCell::new(Game::new(settings, 3));
        let source = source_of(10);
        block_on(refresh(&game, &source, &TextView::new())).unwrap();
        assert!(game.borrow().board().has_shape(3, 2));
        // Only the first `category_pool_size` listed categories are eligible
        assert!(source.fetched().iter().all(|id| *id <= 5));
    }
}
