//! State store ordering and subscription semantics.

mod common;

use common::{item, within};
use repo_search::store::StateStore;
use repo_search::ui::search::{SearchReducer, SearchTransition, SearchUiState};
use std::sync::Arc;

#[tokio::test]
async fn reads_without_updates_are_equal() {
    let store = StateStore::<SearchUiState>::default();
    store.apply::<SearchReducer>(SearchTransition::Succeeded(vec![item("1", "a/b")]));
    assert_eq!(store.current(), store.current());
}

#[tokio::test]
async fn subscriber_sees_current_then_replacements() {
    let store = StateStore::<SearchUiState>::default();
    let mut subscription = store.subscribe();

    assert_eq!(
        within(subscription.next()).await,
        Some(SearchUiState::default())
    );

    store.apply::<SearchReducer>(SearchTransition::Started);
    let next = within(subscription.next()).await.unwrap();
    assert!(next.is_loading);
}

#[tokio::test]
async fn wait_for_update_skips_value_present_at_subscription() {
    let store = StateStore::<SearchUiState>::default();
    let mut subscription = store.subscribe();

    let waiter = tokio::spawn(async move {
        subscription
            .wait_for_update(|state| !state.is_loading)
            .await
    });
    tokio::task::yield_now().await;

    store.apply::<SearchReducer>(SearchTransition::Started);
    store.apply::<SearchReducer>(SearchTransition::Succeeded(vec![item("1", "a/b")]));

    let settled = within(waiter).await.unwrap().unwrap();
    assert_eq!(settled.results, vec![item("1", "a/b")]);
}

#[tokio::test]
async fn concurrent_updates_are_not_lost() {
    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter(u64);
    impl repo_search::ui::mvi::UiState for Counter {}

    let store = Arc::new(StateStore::new(Counter(0)));
    let writers: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for _ in 0..100 {
                    store.update(|Counter(n)| Counter(n + 1));
                }
            })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap();
    }

    assert_eq!(store.current(), Counter(800));
}

#[tokio::test]
async fn rejected_conditional_update_notifies_nobody() {
    let store = StateStore::<SearchUiState>::default();
    let mut subscription = store.subscribe();
    within(subscription.next()).await;

    assert!(!store.try_update(|_| None));
    assert!(store.try_update(|state| Some(SearchUiState {
        is_loading: true,
        ..state.clone()
    })));

    let next = within(subscription.next()).await.unwrap();
    assert!(next.is_loading);
}

#[tokio::test]
async fn dropping_a_subscription_leaves_others_intact() {
    let store = StateStore::<SearchUiState>::default();
    let first = store.subscribe();
    let mut second = store.subscribe();
    assert_eq!(store.subscriber_count(), 2);

    drop(first);
    assert_eq!(store.subscriber_count(), 1);

    within(second.next()).await;
    store.apply::<SearchReducer>(SearchTransition::Started);
    assert!(within(second.next()).await.unwrap().is_loading);
}
