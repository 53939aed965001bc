use crate::ui::mvi::Reducer;
use crate::ui::search::intent::SearchTransition;
use crate::ui::search::state::SearchUiState;

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchUiState;
    type Intent = SearchTransition;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            // Previous results stay visible under the loading indicator
            SearchTransition::Started => SearchUiState {
                is_loading: true,
                error_message: None,
                results: state.results,
            },
            SearchTransition::Succeeded(items) => SearchUiState {
                is_loading: false,
                error_message: None,
                results: items,
            },
            SearchTransition::Failed(message) => SearchUiState {
                is_loading: false,
                error_message: Some(message),
                results: state.results,
            },
        }
    }
}
