//! Search orchestration.
//!
//! The orchestrator owns one [`StateStore`] and one [`EventBus`]. It listens
//! to its own bus, starts a search for every `TriggerSearch` it sees, and
//! writes the lifecycle into the store. A newer search supersedes the one in
//! flight: the old task is aborted (dropping its HTTP request) and its
//! completion, should it race the abort, is discarded by a generation check
//! performed under the same lock that starts searches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::bus::{EventBus, IntentStream};
use crate::client::SearchClient;
use crate::model::Query;
use crate::store::{StateStore, StateSubscription};
use crate::ui::search::{SearchReducer, SearchTransition, SearchUiState, UiIntent};

/// Drives searches and publishes UI state.
pub struct SearchOrchestrator {
    inner: Arc<Inner>,
    intent_loop: JoinHandle<()>,
}

struct Inner {
    client: Arc<dyn SearchClient>,
    store: StateStore<SearchUiState>,
    bus: EventBus<UiIntent>,
    searches: Mutex<SearchSlot>,
    /// Search intents submitted so far.
    requested: AtomicU64,
}

#[derive(Default)]
struct SearchSlot {
    /// Bumped on every new search; a completion only lands if it still matches.
    generation: u64,
    /// Search intents the intent loop has picked up.
    started: u64,
    closed: bool,
    in_flight: Option<JoinHandle<()>>,
}

impl SearchOrchestrator {
    /// Create an orchestrator and start its intent loop.
    ///
    /// Must be called from within a tokio runtime. The bus subscription is
    /// registered before this returns, so every later intent is observed.
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        let inner = Arc::new(Inner {
            client,
            store: StateStore::new(SearchUiState::default()),
            bus: EventBus::new(),
            searches: Mutex::new(SearchSlot::default()),
            requested: AtomicU64::new(0),
        });

        let intents = inner.bus.subscribe();
        let intent_loop = tokio::spawn(run_intent_loop(Arc::downgrade(&inner), intents));

        Self { inner, intent_loop }
    }

    /// Publish an intent for every bus subscriber.
    ///
    /// `TriggerSearch` is picked up by the orchestrator's own subscription;
    /// `OpenResult` is only delivered to UI subscribers.
    pub async fn submit_intent(&self, intent: UiIntent) {
        if matches!(intent, UiIntent::TriggerSearch(_)) {
            self.inner.requested.fetch_add(1, Ordering::SeqCst);
        }
        let delivered = self.inner.bus.publish(intent);
        tracing::trace!(delivered, "Intent published");
    }

    /// Current UI state.
    pub fn state(&self) -> SearchUiState {
        self.inner.store.current()
    }

    /// Current state followed by every later replacement.
    pub fn subscribe_state(&self) -> StateSubscription<SearchUiState> {
        self.inner.store.subscribe()
    }

    /// Intents published from now on (navigation requests included).
    pub fn subscribe_intents(&self) -> IntentStream<UiIntent> {
        self.inner.bus.subscribe()
    }

    /// Wait until every submitted search has been picked up and the latest
    /// one has settled, then return the resulting state.
    ///
    /// Returns immediately when nothing is pending. After [`shutdown`]
    /// the current state is returned as-is; do not call `shutdown`
    /// concurrently with a pending `settled`.
    ///
    /// [`shutdown`]: Self::shutdown
    pub async fn settled(&self) -> SearchUiState {
        let mut states = self.inner.store.subscribe();
        loop {
            states.mark_seen();
            {
                // Store writes from the intent loop and search tasks happen
                // under this lock, so `started` and the state agree.
                let slot = self.inner.searches.lock();
                let state = self.inner.store.current();
                let requested = self.inner.requested.load(Ordering::SeqCst);
                let idle = slot.started >= requested && !state.is_loading;
                if idle || slot.closed || self.intent_loop.is_finished() {
                    return state;
                }
            }
            if !states.changed().await {
                return self.inner.store.current();
            }
        }
    }

    /// Whether a search task is currently running.
    pub fn is_searching(&self) -> bool {
        self.inner
            .searches
            .lock()
            .in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the intent loop and abort any in-flight search.
    pub fn shutdown(&self) {
        self.intent_loop.abort();
        let mut slot = self.inner.searches.lock();
        slot.generation += 1;
        slot.closed = true;
        if let Some(handle) = slot.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchOrchestrator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_intent_loop(owner: Weak<Inner>, mut intents: IntentStream<UiIntent>) {
    while let Some(intent) = intents.recv().await {
        let Some(inner) = owner.upgrade() else {
            break;
        };
        match intent {
            UiIntent::TriggerSearch(query) => start_search(&inner, query),
            UiIntent::OpenResult(url) => {
                tracing::trace!(url = %url, "Navigation intent left to the UI");
            }
        }
    }
    tracing::debug!("Intent loop stopped");
}

fn start_search(inner: &Arc<Inner>, query: Query) {
    let mut slot = inner.searches.lock();

    if let Some(previous) = slot.in_flight.take() {
        if !previous.is_finished() {
            tracing::debug!(generation = slot.generation, "Superseding in-flight search");
        }
        previous.abort();
    }

    slot.generation += 1;
    slot.started += 1;
    let generation = slot.generation;
    inner.store.apply::<SearchReducer>(SearchTransition::Started);

    tracing::info!(query = %query, generation, "Search started");
    slot.in_flight = Some(tokio::spawn(run_search(
        Arc::clone(inner),
        generation,
        query,
    )));
}

async fn run_search(inner: Arc<Inner>, generation: u64, query: Query) {
    let outcome = inner.client.search(&query).await;

    let transition = match outcome {
        Ok(items) => {
            tracing::info!(query = %query, generation, items = items.len(), "Search finished");
            SearchTransition::Succeeded(items)
        }
        Err(err) => {
            tracing::warn!(
                query = %query,
                generation,
                error_type = err.error_type(),
                error = %err,
                "Search failed"
            );
            SearchTransition::Failed(err.to_string())
        }
    };

    let mut slot = inner.searches.lock();
    if slot.generation != generation {
        tracing::debug!(generation, current = slot.generation, "Dropping stale search result");
        return;
    }
    inner.store.apply::<SearchReducer>(transition);
    slot.in_flight = None;
}
