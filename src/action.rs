use crate::api::FetchError;
use crate::state::{PokemonDetail, PokemonPage};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Init,
    Quit,

    PageLoad(u32),
    PagePrev,
    PageNext,
    PageDidLoad { generation: u64, page: PokemonPage },
    PageDidError { generation: u64, error: FetchError },

    SelectNext,
    SelectPrev,
    OpenSelected,

    DetailDidLoad(PokemonDetail),
    DetailDidError { name: String, error: FetchError },

    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchCancel,
    SearchSubmit,

    Catch(String),
    Release(String),
    CaughtClear,
    CaughtNext,
    CaughtPrev,
    PersistDidError(String),

    ShowCaught,
    Back,
}
