//! Tavernkeep Player - Dioxus desktop UI over the engine use cases.

pub mod state;
pub mod ui;
