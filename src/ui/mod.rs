//! UI-facing layer: MVI primitives, search screen state, and the console
//! front end.

pub mod input;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod search;
