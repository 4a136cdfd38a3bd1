use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use pokedex_tui::action::Action;
use pokedex_tui::api;
use pokedex_tui::dispatch::EffectStore;
use pokedex_tui::effect::Effect;
use pokedex_tui::reducer::reducer;
use pokedex_tui::state::{AppState, View};
use pokedex_tui::store::{CaughtStore, FileStorage};
use pokedex_tui::ui;

#[derive(Parser, Debug)]
#[command(name = "pokedex-tui")]
#[command(about = "Paginated Pokédex browser with a persisted caught list")]
struct Args {
    /// Directory holding the persisted caught list
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Directory for the on-disk HTTP response cache
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(dir) = args.cache_dir {
        api::set_cache_root(dir);
    }
    let root = args.data_dir.unwrap_or_else(FileStorage::default_root);
    let caught_store = Arc::new(CaughtStore::new(Box::new(FileStorage::new(root))));

    let state = AppState {
        caught: caught_store.load(),
        ..AppState::default()
    };
    let mut store = EffectStore::new(state, reducer);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut store, caught_store).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    store: &mut EffectStore<AppState, Action, Effect>,
    caught_store: Arc<CaughtStore>,
) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let mut input_rx = spawn_input_reader();

    dispatch(store, Action::Init, &action_tx, &caught_store);
    terminal.draw(|frame| ui::render_app(frame, frame.area(), store.state()))?;

    loop {
        let action = tokio::select! {
            Some(action) = action_rx.recv() => action,
            Some(event) = input_rx.recv() => {
                match translate_event(event, store.state()) {
                    Some(action) => action,
                    None => continue,
                }
            }
            else => break,
        };

        if matches!(action, Action::Quit) {
            break;
        }
        if dispatch(store, action, &action_tx, &caught_store) {
            terminal.draw(|frame| ui::render_app(frame, frame.area(), store.state()))?;
        }
    }

    Ok(())
}

/// Runs the action through the reducer and hands resulting effects to the
/// async layer. Returns whether the state changed.
fn dispatch(
    store: &mut EffectStore<AppState, Action, Effect>,
    action: Action,
    action_tx: &UnboundedSender<Action>,
    caught_store: &Arc<CaughtStore>,
) -> bool {
    let result = store.dispatch(action);
    for effect in result.effects {
        handle_effect(effect, action_tx.clone(), Arc::clone(caught_store));
    }
    result.changed
}

fn handle_effect(effect: Effect, tx: UnboundedSender<Action>, caught_store: Arc<CaughtStore>) {
    match effect {
        Effect::LoadPage { page, generation } => {
            tokio::spawn(async move {
                let action = match api::fetch_page(page).await {
                    Ok(page) => Action::PageDidLoad { generation, page },
                    Err(error) => Action::PageDidError { generation, error },
                };
                let _ = tx.send(action);
            });
        }
        Effect::LoadDetail { name } => {
            tokio::spawn(async move {
                let action = match api::fetch_pokemon_detail(&name).await {
                    Ok(detail) => Action::DetailDidLoad(detail),
                    Err(error) => Action::DetailDidError { name, error },
                };
                let _ = tx.send(action);
            });
        }
        // Caught-list writes run inline, not on a task: successive mutations
        // must hit storage in dispatch order, and the payload is tiny.
        Effect::PersistCaught { names } => {
            if let Err(error) = caught_store.save(&names) {
                let _ = tx.send(Action::PersistDidError(error));
            }
        }
        Effect::ClearCaught => {
            if let Err(error) = caught_store.clear() {
                let _ = tx.send(Action::PersistDidError(error));
            }
        }
    }
}

/// Crossterm's blocking reader on its own thread, bridged into the async
/// loop over a channel.
fn spawn_input_reader() -> UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
    rx
}

fn translate_event(event: Event, state: &AppState) -> Option<Action> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if state.search.active {
        return match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::SearchStart),
        KeyCode::Esc | KeyCode::Char('b') => Some(Action::Back),
        KeyCode::Char('C') => Some(Action::ShowCaught),
        KeyCode::Up | KeyCode::Char('k') => match state.view {
            View::Caught => Some(Action::CaughtPrev),
            _ => Some(Action::SelectPrev),
        },
        KeyCode::Down | KeyCode::Char('j') => match state.view {
            View::Caught => Some(Action::CaughtNext),
            _ => Some(Action::SelectNext),
        },
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PagePrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::PageNext),
        KeyCode::Enter => Some(Action::OpenSelected),
        KeyCode::Char(digit @ '1'..='9') => {
            Some(Action::PageLoad(digit as u32 - '0' as u32))
        }
        KeyCode::Char('c') => catch_target(state).map(Action::Catch),
        KeyCode::Char('r') => match state.view {
            View::Caught => state.caught_name().map(|name| Action::Release(name.to_string())),
            _ => None,
        },
        KeyCode::Char('x') => match state.view {
            View::Caught => Some(Action::CaughtClear),
            _ => None,
        },
        _ => None,
    }
}

fn catch_target(state: &AppState) -> Option<String> {
    match state.view {
        View::Listing => state.selected_entry().map(|entry| entry.name.clone()),
        View::Detail => state.selected.as_ref().map(|detail| detail.name.clone()),
        View::Caught => None,
    }
}
