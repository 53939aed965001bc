//! Console line parsing.
//!
//! This is the input boundary: blank text is rejected here and never turns
//! into a search intent.

use crate::model::Query;
use crate::ui::search::{SearchUiState, UiIntent};

pub const HELP: &str = "Type a query to search. Commands: :open <n>, :help, :quit";

/// What a line of console input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(Query),
    /// Open the n-th (1-based) visible result.
    Open(usize),
    Help,
    Quit,
    /// Empty or whitespace-only input; ignored.
    Blank,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return match Query::parse(trimmed) {
            Some(query) => Command::Search(query),
            None => Command::Blank,
        };
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("q" | "quit"), None, _) => Command::Quit,
        (Some("h" | "help"), None, _) => Command::Help,
        (Some("o" | "open"), Some(index), None) => match index.parse::<usize>() {
            Ok(n) if n > 0 => Command::Open(n),
            _ => Command::Invalid(format!("not a result number: {}", index)),
        },
        (Some("o" | "open"), None, _) => Command::Invalid("usage: :open <n>".to_string()),
        _ => Command::Invalid(format!("unknown command: {}", trimmed)),
    }
}

/// Build the navigation intent for the n-th (1-based) result on screen.
pub fn open_intent(state: &SearchUiState, index: usize) -> Result<UiIntent, String> {
    if state.error_message.is_some() {
        return Err("no results while an error is shown".to_string());
    }
    index
        .checked_sub(1)
        .and_then(|i| state.results.get(i))
        .map(|item| UiIntent::open(item.url.clone()))
        .ok_or_else(|| format!("no result #{} ({} shown)", index, state.results.len()))
}
