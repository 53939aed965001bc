mod intent;
mod reducer;
mod state;

pub use intent::{SearchTransition, UiIntent};
pub use reducer::SearchReducer;
pub use state::{SearchPhase, SearchUiState, SearchView};
