//! Console front end driving a [`SearchOrchestrator`].

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::bus::IntentStream;
use crate::model::Query;
use crate::orchestrator::SearchOrchestrator;
use crate::store::StateSubscription;
use crate::ui::input::{open_intent, parse_line, Command, HELP};
use crate::ui::render::render_state;
use crate::ui::search::{SearchUiState, UiIntent};

/// Run a single search and return the settled state.
///
/// Returns `None` if the orchestrator shut down before the search settled.
pub async fn run_once(orchestrator: &SearchOrchestrator, query: Query) -> Option<SearchUiState> {
    let mut states = orchestrator.subscribe_state();
    orchestrator
        .submit_intent(UiIntent::TriggerSearch(query))
        .await;
    states.wait_for_update(|state| !state.is_loading).await
}

/// Interactive loop: one command per input line until EOF or `:quit`.
///
/// State changes and navigation requests are printed by background tasks
/// that live as long as the loop. At end of input the loop waits for
/// submitted searches to settle so their outcome is still printed; `:quit`
/// leaves immediately.
pub async fn run_interactive<R>(
    orchestrator: &SearchOrchestrator,
    input: R,
    max_results: usize,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let (render_stop, render_task) = spawn_renderer(orchestrator.subscribe_state(), max_results);
    let (navigation_stop, navigation_task) = spawn_navigator(orchestrator.subscribe_intents());

    println!("{}", HELP);
    let mut lines = input.lines();
    let mut quit = false;
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Command::Search(query) => {
                orchestrator
                    .submit_intent(UiIntent::TriggerSearch(query))
                    .await;
            }
            Command::Open(index) => match open_intent(&orchestrator.state(), index) {
                Ok(intent) => orchestrator.submit_intent(intent).await,
                Err(reason) => eprintln!("{}", reason),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => {
                quit = true;
                break;
            }
            Command::Blank => {}
            Command::Invalid(reason) => eprintln!("{}", reason),
        }
    }

    if quit {
        render_task.abort();
        navigation_task.abort();
        return Ok(());
    }

    let state = orchestrator.settled().await;
    tracing::debug!(loading = state.is_loading, "Input ended, searches settled");

    // Both tasks drain what is already queued before stopping.
    let _ = render_stop.send(());
    let _ = navigation_stop.send(());
    let _ = render_task.await;
    let _ = navigation_task.await;
    Ok(())
}

fn spawn_renderer(
    mut states: StateSubscription<SearchUiState>,
    max_results: usize,
) -> (oneshot::Sender<()>, JoinHandle<()>) {
    // Only render what searches produce, not the state at startup.
    states.mark_seen();
    let (stop_tx, mut stop) = oneshot::channel();
    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                state = states.next() => match state {
                    Some(state) => println!("{}", render_state(&state, max_results)),
                    None => break,
                },
                _ = &mut stop => break,
            }
        }
    });
    (stop_tx, task)
}

/// Stand-in for the detail viewer: prints the address to open.
fn spawn_navigator(mut intents: IntentStream<UiIntent>) -> (oneshot::Sender<()>, JoinHandle<()>) {
    let (stop_tx, mut stop) = oneshot::channel();
    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                intent = intents.recv() => match intent {
                    Some(UiIntent::OpenResult(url)) => println!("Open: {}", url),
                    Some(UiIntent::TriggerSearch(_)) => {}
                    None => break,
                },
                _ = &mut stop => break,
            }
        }
    });
    (stop_tx, task)
}
