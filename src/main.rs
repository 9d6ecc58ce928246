//! Trivia Board entry point
//!
//! In the browser this wires the DOM to the game and starts the first run.
//! Natively it plays one board against the bundled demo data.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::Element;

    use trivia_board::game::{self, Game};
    use trivia_board::platform::{self, Subscription};
    use trivia_board::source::HttpSource;
    use trivia_board::view::DomView;
    use trivia_board::view::dom::{BOARD_ID, RESTART_ID};
    use trivia_board::{CellRef, Settings};

    /// Everything the event handlers share
    struct App {
        game: RefCell<Game>,
        source: HttpSource,
        view: DomView,
    }

    thread_local! {
        // Listeners live for the whole page
        static SUBSCRIPTIONS: RefCell<Vec<Subscription>> = const { RefCell::new(Vec::new()) };
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Trivia Board starting...");

        let settings = Settings::load();
        let seed = platform::now_seed();
        let app = Rc::new(App {
            source: HttpSource::from_settings(&settings),
            game: RefCell::new(Game::new(settings, seed)),
            view: DomView::new().expect("no document"),
        });

        log::info!("Game initialized with seed: {}", seed);

        let subscriptions = setup_handlers(app.clone());
        SUBSCRIPTIONS.with(|subs| subs.borrow_mut().extend(subscriptions));

        start_run(app);
    }

    /// Kick off a refresh without blocking the event handler
    fn start_run(app: Rc<App>) {
        spawn_local(async move {
            // Failures are already logged and shown by the lifecycle
            let _ = game::refresh(&app.game, &app.source, &app.view).await;
        });
    }

    fn setup_handlers(app: Rc<App>) -> Vec<Subscription> {
        let document = app.view.document().clone();
        let mut subscriptions = Vec::new();

        // Restart button
        if let Some(btn) = document.get_element_by_id(RESTART_ID) {
            let app = app.clone();
            match platform::listen(&btn, "click", move |_event| start_run(app.clone())) {
                Ok(sub) => subscriptions.push(sub),
                Err(e) => log::error!("Failed to bind restart button: {:?}", e),
            }
        } else {
            log::warn!("No #{} button on the page", RESTART_ID);
        }

        // Clue cells (delegated to the table so re-rendered cells keep working)
        if let Some(table) = document.get_element_by_id(BOARD_ID) {
            let result = platform::listen(&table, "click", move |event| {
                let cell = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest("td").ok().flatten())
                    .and_then(|td| CellRef::parse(&td.id()));
                if let Some(cell) = cell {
                    game::handle_click(&app.game, &app.view, cell);
                }
            });
            match result {
                Ok(sub) => subscriptions.push(sub),
                Err(e) => log::error!("Failed to bind board clicks: {:?}", e),
            }
        } else {
            log::warn!("No #{} table on the page", BOARD_ID);
        }

        subscriptions
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;

    use trivia_board::game::{self, Game};
    use trivia_board::platform;
    use trivia_board::source::MemorySource;
    use trivia_board::view::TextView;
    use trivia_board::{CellRef, Settings};

    env_logger::init();
    log::info!("Trivia Board (native) starting...");
    log::info!("Native mode plays the bundled demo board - run with `trunk serve` for the web version");

    let source = match MemorySource::demo() {
        Ok(source) => source,
        Err(e) => {
            log::error!("Demo data unreadable: {}", e);
            std::process::exit(1);
        }
    };

    let seed = platform::now_seed();
    let game = RefCell::new(Game::new(Settings::load(), seed));
    let view = TextView::new();

    if futures::executor::block_on(game::refresh(&game, &source, &view)).is_err() {
        print!("{}", view.to_text());
        std::process::exit(1);
    }
    println!("{}", view.to_text());

    // Reveal the first column: question, then answer
    let rows = game.borrow().board().num_rows();
    for row in 0..rows {
        let cell = CellRef::new(0, row);
        game::handle_click(&game, &view, cell);
        game::handle_click(&game, &view, cell);
    }
    println!("{}", view.to_text());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
