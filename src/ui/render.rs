use std::fmt::Write;

use crate::model::ResultItem;
use crate::ui::search::{SearchUiState, SearchView};

/// Render a state snapshot as console text.
pub fn render_state(state: &SearchUiState, max_results: usize) -> String {
    match state.view() {
        SearchView::Loading { stale } if stale.is_empty() => "Searching…".to_string(),
        SearchView::Loading { stale } => {
            format!(
                "Searching… ({} previous results shown below)\n{}",
                stale.len(),
                render_items(stale, max_results)
            )
        }
        SearchView::Error(message) => format!("Error: {}", message),
        SearchView::Empty => "No results.".to_string(),
        SearchView::Results(items) => render_items(items, max_results),
    }
}

fn render_items(items: &[ResultItem], max_results: usize) -> String {
    let mut out = String::new();
    for (index, item) in items.iter().take(max_results).enumerate() {
        let _ = write!(out, "{:>3}. {}", index + 1, item.name);
        if let Some(description) = &item.description {
            let _ = write!(out, " - {}", description);
        }
        out.push('\n');
    }
    if items.len() > max_results {
        let _ = writeln!(out, "     … {} more", items.len() - max_results);
    }
    out.truncate(out.trim_end().len());
    out
}
