use crate::model::{Query, ResultItem};
use crate::ui::mvi::Intent;

/// One-shot UI intents carried by the event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    /// Run a search for the query.
    TriggerSearch(Query),
    /// Navigate to the detail view addressed by `url`. Handled by the UI only.
    OpenResult(String),
}

impl UiIntent {
    /// Build a search intent from raw user input.
    ///
    /// Returns `None` for empty or whitespace-only text, which must not be
    /// submitted at all.
    pub fn search(text: &str) -> Option<Self> {
        Query::parse(text).map(UiIntent::TriggerSearch)
    }

    pub fn open(url: impl Into<String>) -> Self {
        UiIntent::OpenResult(url.into())
    }
}

impl Intent for UiIntent {}

/// State transitions driven by the search lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTransition {
    /// A new search replaced whatever was in flight.
    Started,
    /// The live search returned items.
    Succeeded(Vec<ResultItem>),
    /// The live search failed; carries the user-facing message.
    Failed(String),
}

impl Intent for SearchTransition {}
