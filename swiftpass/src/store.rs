//! Store runtime: drives reducers and executes their effects.
//!
//! The [`Store`] owns the session state behind an async `RwLock`, runs the
//! reducer for each incoming action, and executes the returned effects.
//! Actions produced by effects are fed back into the reducer until the
//! session is quiescent, so a caller that awaits [`Store::send`] observes a
//! settled state afterwards.

use crate::core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The Store - runtime for the reducer architecture.
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    A: std::fmt::Debug,
{
    /// Create a new store with initial state, reducer, and environment.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
        }
    }

    /// Send an action to the store.
    ///
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with `(state, action, environment)`
    /// 3. Executes the returned effects; actions they produce are reduced in
    ///    turn until no work remains
    ///
    /// The reducer runs synchronously while holding the write lock; effects
    /// are awaited with the lock released, so state reads from inside an
    /// effect do not deadlock.
    pub async fn send(&self, action: A) {
        let mut queue = VecDeque::new();
        queue.push_back(action);

        while let Some(action) = queue.pop_front() {
            tracing::trace!(?action, "reducing action");

            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut state, action, &self.environment)
            };

            for effect in effects {
                match effect {
                    Effect::None => {}
                    Effect::Future(fut) => {
                        if let Some(next) = fut.await {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
    }

    /// Read state through a closure.
    ///
    /// The closure receives a shared reference to the current state and its
    /// result is returned to the caller. Keeps lock scope minimal.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum CounterAction {
        Increment,
        IncrementLater,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = i64;
        type Action = CounterAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Vec<Effect<Self::Action>> {
            match action {
                CounterAction::Increment => {
                    *state += 1;
                    vec![Effect::None]
                }
                CounterAction::IncrementLater => {
                    vec![Effect::future(async { Some(CounterAction::Increment) })]
                }
            }
        }
    }

    #[tokio::test]
    async fn send_applies_the_action() {
        let store = Store::new(0, CounterReducer, ());
        store.send(CounterAction::Increment).await;
        assert_eq!(store.state(|s| *s).await, 1);
    }

    #[tokio::test]
    async fn effect_actions_are_fed_back_before_send_returns() {
        let store = Store::new(0, CounterReducer, ());
        store.send(CounterAction::IncrementLater).await;
        // The effect's Increment has already been reduced.
        assert_eq!(store.state(|s| *s).await, 1);
    }
}
