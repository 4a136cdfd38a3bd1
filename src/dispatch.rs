//! Minimal reducer-store plumbing: a reducer mutates state and hands back
//! the effects the runtime should execute.

#[derive(Clone, Debug, PartialEq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    pub effects: Vec<E>,
}

impl<E> DispatchResult<E> {
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: Vec::new(),
        }
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }
}

pub type Reducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

pub struct EffectStore<S, A, E> {
    state: S,
    reducer: Reducer<S, A, E>,
}

impl<S, A, E> EffectStore<S, A, E> {
    pub fn new(state: S, reducer: Reducer<S, A, E>) -> Self {
        Self { state, reducer }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        (self.reducer)(&mut self.state, action)
    }
}
