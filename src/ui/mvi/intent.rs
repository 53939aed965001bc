//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent user actions (submitting a query, activating a
/// result) and system events (a search completing). They are transient:
/// consumed once, never stored.
pub trait Intent: Send + 'static {}
