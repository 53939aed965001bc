//! Repository search client.
//!
//! A query typed by the user travels as a [`UiIntent`](ui::search::UiIntent)
//! over an [`EventBus`](bus::EventBus) to the
//! [`SearchOrchestrator`](orchestrator::SearchOrchestrator), which calls a
//! [`SearchClient`](client::SearchClient) and publishes the outcome through a
//! [`StateStore`](store::StateStore).

pub mod bus;
pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod store;
pub mod ui;
