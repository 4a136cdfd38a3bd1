//! Pokédex terminal browser.
//!
//! Paginated listing fetched from PokeAPI, per-Pokémon detail view, name
//! search, and a caught list persisted through an injected storage backend.

pub mod action;
pub mod api;
pub mod dispatch;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod store;
pub mod ui;
