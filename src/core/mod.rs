//! Core data and transforms — dataset model, selection store, ranking and
//! year navigation.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can cross the loader thread boundary.

pub mod dataset;
pub mod navigator;
pub mod ranking;
pub mod store;
