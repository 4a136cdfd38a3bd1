use serde::{Deserialize, Serialize};

/// Items per listing page, fixed by the listing endpoint query.
pub const PAGE_SIZE: u32 = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u16,
    pub name: String,
    pub sprite_front_default: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<PokemonStat>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

/// One fully resolved listing page: every summary expanded to its detail
/// record, in listing order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonPage {
    pub page: u32,
    pub total_pages: u32,
    pub entries: Vec<PokemonDetail>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginationState {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl PaginationState {
    pub fn total_pages_for(count: u32) -> u32 {
        count.div_ceil(PAGE_SIZE).max(1)
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn prev(&self) -> Option<u32> {
        self.can_prev().then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.can_next().then(|| self.current_page + 1)
    }

    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum View {
    #[default]
    Listing,
    Detail,
    Caught,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    pub view: View,

    pub entries: Vec<PokemonDetail>,
    pub selected_index: usize,
    pub pagination: PaginationState,
    /// Bumped on every page request; completions carrying an older value
    /// are stale and get dropped.
    pub list_generation: u64,
    pub list_loading: bool,

    pub selected: Option<PokemonDetail>,
    pub detail_loading: bool,

    pub caught: Vec<String>,
    pub caught_index: usize,

    pub search: SearchState,
    pub message: Option<String>,
}

impl AppState {
    pub fn selected_entry(&self) -> Option<&PokemonDetail> {
        self.entries.get(self.selected_index)
    }

    pub fn caught_name(&self) -> Option<&str> {
        self.caught.get(self.caught_index).map(String::as_str)
    }

    pub fn is_caught(&self, name: &str) -> bool {
        self.caught.iter().any(|caught| caught == name)
    }

    /// Appends the name unless it is already present. Returns whether the
    /// list changed.
    pub fn add_caught(&mut self, name: &str) -> bool {
        if self.is_caught(name) {
            return false;
        }
        self.caught.push(name.to_string());
        true
    }

    /// Drops every entry matching the name. Returns whether the list changed.
    pub fn remove_caught(&mut self, name: &str) -> bool {
        let before = self.caught.len();
        self.caught.retain(|caught| caught != name);
        if self.caught.len() == before {
            return false;
        }
        if self.caught_index >= self.caught.len() {
            self.caught_index = self.caught.len().saturating_sub(1);
        }
        true
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let last = self.entries.len() - 1;
        let next = self
            .selected_index
            .saturating_add_signed(delta)
            .min(last);
        if next == self.selected_index {
            return false;
        }
        self.selected_index = next;
        true
    }

    pub fn move_caught_selection(&mut self, delta: isize) -> bool {
        if self.caught.is_empty() {
            return false;
        }
        let last = self.caught.len() - 1;
        let next = self
            .caught_index
            .saturating_add_signed(delta)
            .min(last);
        if next == self.caught_index {
            return false;
        }
        self.caught_index = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PaginationState::total_pages_for(100), 5);
        assert_eq!(PaginationState::total_pages_for(101), 6);
        assert_eq!(PaginationState::total_pages_for(1), 1);
        assert_eq!(PaginationState::total_pages_for(0), 1);
    }

    #[test]
    fn pagination_bounds() {
        let pagination = PaginationState {
            current_page: 1,
            total_pages: 3,
        };
        assert!(!pagination.can_prev());
        assert_eq!(pagination.prev(), None);
        assert_eq!(pagination.next(), Some(2));

        let pagination = PaginationState {
            current_page: 3,
            total_pages: 3,
        };
        assert!(!pagination.can_next());
        assert_eq!(pagination.next(), None);
        assert_eq!(pagination.prev(), Some(2));

        assert_eq!(pagination.clamp(0), 1);
        assert_eq!(pagination.clamp(9), 3);
        assert_eq!(pagination.clamp(2), 2);
    }

    #[test]
    fn add_caught_rejects_duplicates() {
        let mut state = AppState::default();
        assert!(state.add_caught("pikachu"));
        assert!(!state.add_caught("pikachu"));
        assert_eq!(state.caught, vec!["pikachu".to_string()]);
    }

    #[test]
    fn remove_caught_clamps_selection() {
        let mut state = AppState::default();
        state.caught = vec!["bulbasaur".into(), "charmander".into()];
        state.caught_index = 1;
        assert!(state.remove_caught("charmander"));
        assert_eq!(state.caught_index, 0);
        assert!(!state.remove_caught("charmander"));
    }
}
