//! Shared test utilities and scripted collaborators.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use parking_lot::Mutex;
use repo_search::client::{SearchClient, SearchError, SearchOutcome};
use repo_search::model::{Owner, Query, ResultItem};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};

/// Upper bound for any single wait in async tests.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Await `future`, failing the test if it takes longer than [`TEST_TIMEOUT`].
pub async fn within<F: std::future::Future>(future: F) -> F::Output {
    tokio::time::timeout(TEST_TIMEOUT, future)
        .await
        .expect("timed out waiting in test")
}

pub fn item(id: &str, name: &str) -> ResultItem {
    ResultItem {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        owner: Owner {
            avatar_url: format!("http://x/{}.png", id),
        },
        url: format!("http://gh/{}", name),
    }
}

pub fn query(text: &str) -> Query {
    Query::parse(text).expect("non-blank test query")
}

/// Single-item payload in the remote JSON shape.
pub const ONE_ITEM_BODY: &str = r#"{
    "total_count": 1,
    "items": [{
        "id": "1",
        "full_name": "a/b",
        "description": null,
        "owner": { "avatar_url": "http://x/a.png" },
        "html_url": "http://gh/a/b"
    }]
}"#;

// -- Scripted client ----------------------------------------------------------

/// Releases a gated response.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

struct Script {
    gate: Option<oneshot::Receiver<()>>,
    outcome: SearchOutcome,
}

/// `SearchClient` whose responses are scripted per query.
///
/// Unscripted queries succeed with no items. Gated responses wait until the
/// matching [`Gate`] is released, which lets tests hold a search in flight.
pub struct ScriptedClient {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<String>>,
    call_count: watch::Sender<usize>,
    cancelled: Arc<AtomicUsize>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        let (call_count, _) = watch::channel(0);
        Arc::new(Self {
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            call_count,
            cancelled: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn respond(&self, query: &str, outcome: SearchOutcome) {
        self.scripts.lock().insert(
            query.to_string(),
            Script {
                gate: None,
                outcome,
            },
        );
    }

    pub fn respond_when_released(&self, query: &str, outcome: SearchOutcome) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.scripts.lock().insert(
            query.to_string(),
            Script {
                gate: Some(rx),
                outcome,
            },
        );
        Gate(tx)
    }

    /// Queries received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Searches dropped before they produced an outcome.
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Wait until at least `n` searches have started.
    pub async fn wait_for_calls(&self, n: usize) {
        let mut rx = self.call_count.subscribe();
        within(rx.wait_for(|count| *count >= n))
            .await
            .expect("call counter closed");
    }
}

/// Counts the enclosing search as cancelled unless disarmed.
struct CancelWatch {
    cancelled: Arc<AtomicUsize>,
    armed: bool,
}

impl Drop for CancelWatch {
    fn drop(&mut self) {
        if self.armed {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl SearchClient for ScriptedClient {
    async fn search(&self, query: &Query) -> SearchOutcome {
        let script = self.scripts.lock().remove(query.as_str());
        self.calls.lock().push(query.as_str().to_string());
        self.call_count.send_modify(|count| *count += 1);

        let mut cancel_watch = CancelWatch {
            cancelled: Arc::clone(&self.cancelled),
            armed: true,
        };

        let outcome = match script {
            Some(Script { gate, outcome }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                outcome
            }
            None => Ok(Vec::new()),
        };

        cancel_watch.armed = false;
        outcome
    }
}

pub fn http_error(status: u16) -> SearchError {
    SearchError::http(status, "Service Unavailable")
}
