//! Effect-aware store
//!
//! The reducer is a pure function `fn(&mut S, A) -> DispatchResult<E>`: it
//! mutates state and *declares* side effects. The runtime executes the effects
//! after dispatch, so all I/O stays out of the reducer.

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Use `#[derive(skycast_macros::Action)]` to implement it.
pub trait Action: Clone + Debug + Send + 'static {
    /// Variant name, used for logging
    fn name(&self) -> &'static str;

    /// Inferred action category (`"search"`, `"ui"`, ...)
    fn category(&self) -> Option<&'static str> {
        None
    }
}

/// Result of dispatching an action: state change indicator plus effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified (triggers a re-render).
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed and one effect should run.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
pub type Reducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Hooks called around every dispatch.
pub trait Middleware<A: Action> {
    fn before(&mut self, action: &A);
    fn after(&mut self, action: &A, changed: bool, effects: usize);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _changed: bool, _effects: usize) {}
}

/// Logs every processed action through `tracing`.
///
/// `Tick` floods the log at animation rate, so actions named in `quiet` are
/// skipped.
#[derive(Debug, Clone, Default)]
pub struct ActionLogger {
    quiet: Vec<&'static str>,
}

impl ActionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Don't log actions with this name.
    pub fn quiet(mut self, name: &'static str) -> Self {
        self.quiet.push(name);
        self
    }
}

impl<A: Action> Middleware<A> for ActionLogger {
    fn before(&mut self, _action: &A) {}

    fn after(&mut self, action: &A, changed: bool, effects: usize) {
        if self.quiet.contains(&action.name()) {
            return;
        }
        tracing::debug!(
            action = action.name(),
            category = action.category().unwrap_or("uncategorized"),
            changed,
            effects,
            "Action processed"
        );
    }
}

/// Centralized state container.
pub struct Store<S, A: Action, E, M: Middleware<A> = NoopMiddleware> {
    state: S,
    reducer: Reducer<S, A, E>,
    middleware: M,
}

impl<S, A: Action, E> Store<S, A, E, NoopMiddleware> {
    pub fn new(state: S, reducer: Reducer<S, A, E>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A: Action, E, M: Middleware<A>> Store<S, A, E, M> {
    pub fn with_middleware(state: S, reducer: Reducer<S, A, E>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[cfg(test)]
    fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch an action through middleware and reducer.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware
            .after(&action, result.changed, result.effects.len());
        result
    }
}
