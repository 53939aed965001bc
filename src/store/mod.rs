//! Single-writer, latest-value state holder.
//!
//! Backed by a `tokio::sync::watch` channel: replacements are serialized by
//! the channel's internal lock, and every subscriber sees the current value
//! first and then each later replacement. A slow subscriber may skip
//! intermediate values but always converges on the latest one.

use tokio::sync::watch;

use crate::ui::mvi::{Reducer, UiState};

/// Holds exactly one current state value and broadcasts replacements.
pub struct StateStore<S: UiState> {
    sender: watch::Sender<S>,
}

impl<S: UiState> StateStore<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Replace the state with `transform(current)`.
    ///
    /// Transforms run one at a time, in the order callers reach the store;
    /// no two transforms observe the same current value.
    pub fn update<F>(&self, transform: F)
    where
        F: FnOnce(S) -> S,
    {
        self.sender.send_modify(|state| {
            let next = transform(state.clone());
            *state = next;
        });
    }

    /// Conditionally replace the state.
    ///
    /// `transform` sees the current value; returning `None` leaves it
    /// untouched and notifies nobody. Returns whether a replacement happened.
    pub fn try_update<F>(&self, transform: F) -> bool
    where
        F: FnOnce(&S) -> Option<S>,
    {
        self.sender.send_if_modified(|state| match transform(state) {
            Some(next) => {
                *state = next;
                true
            }
            None => false,
        })
    }

    /// Apply a reducer transition.
    pub fn apply<R>(&self, intent: R::Intent)
    where
        R: Reducer<State = S>,
    {
        self.update(|state| R::reduce(state, intent));
    }

    /// Observe the current value and every later replacement.
    pub fn subscribe(&self) -> StateSubscription<S> {
        StateSubscription {
            receiver: self.sender.subscribe(),
            primed: false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<S: UiState> Default for StateStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// A subscriber's view of a [`StateStore`].
///
/// Dropping it unsubscribes without affecting anyone else.
pub struct StateSubscription<S: UiState> {
    receiver: watch::Receiver<S>,
    primed: bool,
}

impl<S: UiState> StateSubscription<S> {
    /// Wait for the next value.
    ///
    /// The first call returns the current value immediately. Returns `None`
    /// once the store has been dropped and no newer value is pending.
    pub async fn next(&mut self) -> Option<S> {
        if !self.primed {
            self.primed = true;
            return Some(self.receiver.borrow_and_update().clone());
        }

        if self.receiver.changed().await.is_err() {
            return None;
        }
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Treat the current value as already observed.
    ///
    /// The next call to [`next`](Self::next) waits for a later replacement.
    pub fn mark_seen(&mut self) {
        self.primed = true;
        self.receiver.borrow_and_update();
    }

    /// Wait for any replacement after the last observed value.
    ///
    /// Returns `false` once the store has been dropped.
    pub(crate) async fn changed(&mut self) -> bool {
        self.primed = true;
        self.receiver.changed().await.is_ok()
    }

    /// Wait for a replacement that satisfies `predicate` and return it.
    ///
    /// Only values written after the last one this subscription observed
    /// (or after subscribing) count; the value current at subscription time
    /// is skipped. Returns `None` if the store is dropped first.
    pub async fn wait_for_update<P>(&mut self, mut predicate: P) -> Option<S>
    where
        P: FnMut(&S) -> bool,
    {
        self.primed = true;
        loop {
            self.receiver.changed().await.ok()?;
            let state = self.receiver.borrow_and_update().clone();
            if predicate(&state) {
                return Some(state);
            }
        }
    }
}
