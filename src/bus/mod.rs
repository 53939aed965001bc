//! Fire-while-listening event delivery.
//!
//! Each subscriber owns an unbounded queue. `publish` pushes a clone of the
//! event onto every live queue under a single lock, which gives per-subscriber
//! FIFO order. Nothing is buffered for subscribers that arrive later.

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// At-most-once, non-replaying broadcast of transient events.
pub struct EventBus<E> {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<E>>>,
}

impl<E: Clone + Send + 'static> EventBus<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Deliver `event` to every subscriber active right now.
    ///
    /// Returns how many subscribers received it; `0` means the event was
    /// dropped.
    pub fn publish(&self, event: E) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        subscribers.len()
    }

    /// Start receiving events published from now on.
    pub fn subscribe(&self) -> IntentStream<E> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.lock().push(sender);
        IntentStream { receiver }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| !sender.is_closed());
        subscribers.len()
    }
}

impl<E: Clone + Send + 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscriber's event sequence.
///
/// Infinite while the bus lives; dropping it unsubscribes.
pub struct IntentStream<E> {
    receiver: mpsc::UnboundedReceiver<E>,
}

impl<E> IntentStream<E> {
    /// Wait for the next event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<E> {
        self.receiver.recv().await
    }

    /// Take an already-delivered event without waiting.
    pub fn try_recv(&mut self) -> Option<E> {
        self.receiver.try_recv().ok()
    }
}
