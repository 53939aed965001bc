//! Base trait for UI state.

/// Marker trait for UI state objects.
///
/// States are replaced, never mutated in place: `Clone` produces the next
/// value, `PartialEq` lets observers detect changes, and `Default` is the
/// initial value a store starts from.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
