use crate::model::ResultItem;
use crate::ui::mvi::UiState;

/// Everything the search screen renders.
///
/// `error_message` and `results` are always written together by the
/// reducer; a failure never leaves fresh results next to an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchUiState {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub results: Vec<ResultItem>,
}

impl UiState for SearchUiState {}

/// Where the search state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing to show: never searched, or the last search matched nothing.
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// What a renderer should show for a given state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    /// A search is running; `stale` holds results still on screen.
    Loading { stale: &'a [ResultItem] },
    /// Shown in place of any results.
    Error(&'a str),
    Results(&'a [ResultItem]),
    /// No results and no error.
    Empty,
}

impl SearchUiState {
    pub fn phase(&self) -> SearchPhase {
        if self.is_loading {
            SearchPhase::Loading
        } else if self.error_message.is_some() {
            SearchPhase::Failed
        } else if self.results.is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Succeeded
        }
    }

    pub fn view(&self) -> SearchView<'_> {
        if self.is_loading {
            return SearchView::Loading {
                stale: &self.results,
            };
        }
        if let Some(message) = &self.error_message {
            return SearchView::Error(message);
        }
        if self.results.is_empty() {
            SearchView::Empty
        } else {
            SearchView::Results(&self.results)
        }
    }
}
