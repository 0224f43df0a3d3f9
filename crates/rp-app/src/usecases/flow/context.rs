use std::sync::Arc;

use tokio::sync::Mutex;

/// Shared flow state.
///
/// The lock is held only while a pure transition runs. Backend calls happen
/// outside of it, so "back" is processed while a call is in flight and the
/// ticket guard drops the late result.
pub(crate) struct StateCell<S> {
    state: Arc<Mutex<S>>,
}

impl<S: Clone> StateCell<S> {
    pub(crate) fn new(initial: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    pub(crate) async fn get(&self) -> S {
        self.state.lock().await.clone()
    }

    /// Runs `transition` on the current state and stores the result.
    ///
    /// Returns the state before, the state after and the requested actions.
    pub(crate) async fn apply<E, A>(
        &self,
        event: E,
        transition: impl FnOnce(S, E) -> (S, Vec<A>),
    ) -> (S, S, Vec<A>) {
        let mut guard = self.state.lock().await;
        let before = guard.clone();
        let (next, actions) = transition(before.clone(), event);
        *guard = next.clone();
        (before, next, actions)
    }
}
