#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadPage { page: u32, generation: u64 },
    LoadDetail { name: String },
    PersistCaught { names: Vec<String> },
    ClearCaught,
}
