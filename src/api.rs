use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;
use tokio::task::JoinSet;

use crate::state::{
    PaginationState, PokemonDetail, PokemonPage, PokemonStat, PokemonSummary, PAGE_SIZE,
};

const API_BASE: &str = "https://pokeapi.co/api/v2";

/// Non-success HTTP status versus everything else (connect, body, decode).
/// Both surface to the user as a static message, but the wording differs.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FetchError {
    #[error("request returned status {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    pub fn user_message(&self, subject: &str) -> String {
        match self {
            FetchError::Status(_) => format!("Failed to fetch {subject}"),
            FetchError::Transport(_) => format!("Error fetching {subject}"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Transport(error.to_string()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    count: u32,
    results: Vec<PokemonSummary>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

/// Fetches one listing page and resolves every summary to its full detail
/// record concurrently. Any single failure fails the whole page; entries come
/// back in listing order.
pub async fn fetch_page(page: u32) -> Result<PokemonPage, FetchError> {
    let offset = page.saturating_sub(1) * PAGE_SIZE;
    let url = format!("{API_BASE}/pokemon?limit={PAGE_SIZE}&offset={offset}");
    let listing: ListResponse = fetch_json_cached(&url).await?;
    let total_pages = PaginationState::total_pages_for(listing.count);

    let mut join_set = JoinSet::new();
    for (index, entry) in listing.results.iter().enumerate() {
        let name = entry.name.clone();
        join_set.spawn(async move { (index, fetch_pokemon_detail(&name).await) });
    }

    let mut indexed = Vec::with_capacity(listing.results.len());
    while let Some(joined) = join_set.join_next().await {
        let (index, fetched) = joined.map_err(|err| FetchError::Transport(err.to_string()))?;
        indexed.push((index, fetched?));
    }
    indexed.sort_by_key(|(index, _)| *index);

    Ok(PokemonPage {
        page,
        total_pages,
        entries: indexed.into_iter().map(|(_, detail)| detail).collect(),
    })
}

/// Fetches a single Pokémon by name. Names are lower-cased before the
/// request, so search input is case-insensitive.
pub async fn fetch_pokemon_detail(name: &str) -> Result<PokemonDetail, FetchError> {
    let name = name.trim().to_lowercase();
    let url = format!("{API_BASE}/pokemon/{name}");
    let response: PokemonResponse = fetch_json_cached(&url).await?;

    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let abilities = response
        .abilities
        .into_iter()
        .map(|slot| slot.ability.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();

    // The sprite URL comes from the detail record itself rather than being
    // guessed from the entry's position in the page.
    let sprite_front_default = pointer_string(&response.sprites, "/front_default");

    Ok(PokemonDetail {
        id: response.id,
        name: response.name,
        sprite_front_default,
        types,
        abilities,
        stats,
    })
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn fetch_json_cached<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let bytes = fetch_bytes_cached(url).await?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(err) => {
            // A cached body that no longer decodes is useless; drop it so the
            // next attempt refetches.
            let _ = fs::remove_file(cache_path(url)).await;
            Err(FetchError::Transport(err.to_string()))
        }
    }
}

async fn fetch_bytes_cached(url: &str) -> Result<Vec<u8>, FetchError> {
    let cache_path = cache_path(url);
    if let Some(bytes) = read_cache(&cache_path).await {
        return Ok(bytes);
    }

    let response = http_client().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await?.to_vec();
    write_cache(&cache_path, &bytes).await;
    Ok(bytes)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

static CACHE_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// Overrides the on-disk response cache location. No-op once the cache has
/// been touched.
pub fn set_cache_root(path: PathBuf) {
    let _ = CACHE_ROOT.set(path);
}

fn cache_root() -> PathBuf {
    CACHE_ROOT
        .get_or_init(|| {
            dirs_next::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pokedex-tui")
        })
        .clone()
}

fn cache_path(url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());
    cache_root().join("http").join(digest)
}

async fn read_cache(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).await.ok()
}

async fn write_cache(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent).await;
    }
    let _ = fs::write(path, bytes).await;
}
