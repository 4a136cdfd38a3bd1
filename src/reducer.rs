use crate::action::Action;
use crate::dispatch::DispatchResult;
use crate::effect::Effect;
use crate::state::{AppState, View};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => request_page(state, state.pagination.current_page),

        Action::Quit => DispatchResult::unchanged(),

        Action::PageLoad(page) => {
            if state.view != View::Listing {
                return DispatchResult::unchanged();
            }
            let page = state.pagination.clamp(page);
            request_page(state, page)
        }

        Action::PagePrev => match state.pagination.prev() {
            Some(page) if state.view == View::Listing => request_page(state, page),
            _ => DispatchResult::unchanged(),
        },

        Action::PageNext => match state.pagination.next() {
            Some(page) if state.view == View::Listing => request_page(state, page),
            _ => DispatchResult::unchanged(),
        },

        Action::PageDidLoad { generation, page } => {
            if generation != state.list_generation {
                return DispatchResult::unchanged();
            }
            state.list_loading = false;
            state.entries = page.entries;
            state.selected_index = 0;
            state.pagination.total_pages = page.total_pages;
            state.pagination.current_page = page.page.clamp(1, page.total_pages);
            state.message = None;
            DispatchResult::changed()
        }

        Action::PageDidError { generation, error } => {
            if generation != state.list_generation {
                return DispatchResult::unchanged();
            }
            // Prior listing stays on screen; the user retries via another
            // page change.
            state.list_loading = false;
            state.message = Some(error.user_message("Pokémon list"));
            DispatchResult::changed()
        }

        Action::SelectNext => {
            if state.view != View::Listing {
                return DispatchResult::unchanged();
            }
            if state.move_selection(1) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SelectPrev => {
            if state.view != View::Listing {
                return DispatchResult::unchanged();
            }
            if state.move_selection(-1) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::OpenSelected => {
            if state.view != View::Listing {
                return DispatchResult::unchanged();
            }
            let Some(name) = state.selected_entry().map(|entry| entry.name.clone()) else {
                return DispatchResult::unchanged();
            };
            state.detail_loading = true;
            DispatchResult::changed_with(Effect::LoadDetail { name })
        }

        Action::DetailDidLoad(detail) => {
            state.detail_loading = false;
            // A slow completion must not pull the user out of the caught
            // view they navigated to meanwhile.
            if state.view == View::Caught {
                return DispatchResult::changed();
            }
            state.selected = Some(detail);
            state.view = View::Detail;
            state.message = None;
            DispatchResult::changed()
        }

        Action::DetailDidError { name: _, error } => {
            state.detail_loading = false;
            state.selected = None;
            if state.view == View::Detail {
                state.view = View::Listing;
            }
            state.message = Some(error.user_message("Pokémon data"));
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            state.search.query.clear();
            DispatchResult::changed()
        }

        Action::SearchInput(c) => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.push(c);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            let query = state.search.query.trim().to_string();
            state.search.active = false;
            state.search.query.clear();
            if query.is_empty() {
                return DispatchResult::changed();
            }
            state.detail_loading = true;
            DispatchResult::changed_with(Effect::LoadDetail { name: query })
        }

        Action::Catch(name) => {
            let added = state.add_caught(&name);
            // Catching from the detail view returns home either way.
            let left_detail = state.view == View::Detail;
            if left_detail {
                state.selected = None;
                state.view = View::Listing;
            }
            if added {
                DispatchResult::changed_with(Effect::PersistCaught {
                    names: state.caught.clone(),
                })
            } else if left_detail {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Release(name) => {
            if !state.remove_caught(&name) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(Effect::PersistCaught {
                names: state.caught.clone(),
            })
        }

        Action::CaughtClear => {
            state.caught.clear();
            state.caught_index = 0;
            DispatchResult::changed_with(Effect::ClearCaught)
        }

        Action::CaughtNext => {
            if state.view != View::Caught {
                return DispatchResult::unchanged();
            }
            if state.move_caught_selection(1) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CaughtPrev => {
            if state.view != View::Caught {
                return DispatchResult::unchanged();
            }
            if state.move_caught_selection(-1) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::PersistDidError(message) => {
            state.message = Some(message);
            DispatchResult::changed()
        }

        Action::ShowCaught => {
            if state.view != View::Listing {
                return DispatchResult::unchanged();
            }
            state.view = View::Caught;
            state.caught_index = 0;
            DispatchResult::changed()
        }

        Action::Back => match state.view {
            View::Detail => {
                state.selected = None;
                state.view = View::Listing;
                DispatchResult::changed()
            }
            View::Caught => {
                state.view = View::Listing;
                DispatchResult::changed()
            }
            View::Listing => DispatchResult::unchanged(),
        },
    }
}

/// Moves to the page, marks the listing as loading, and bumps the request
/// generation so completions of any in-flight fetch are dropped.
fn request_page(state: &mut AppState, page: u32) -> DispatchResult<Effect> {
    state.pagination.current_page = page;
    state.list_loading = true;
    state.message = None;
    state.list_generation += 1;
    DispatchResult::changed_with(Effect::LoadPage {
        page,
        generation: state.list_generation,
    })
}
