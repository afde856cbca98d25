//! Core types, the streak engine, and the store contract for Habitual.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! The engine in [`engine`] is pure; [`tracker::Tracker`] wires it to any
//! [`store::HabitStore`] backend.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod completion;
pub mod engine;
pub mod error;
pub mod habit;
pub mod period;
pub mod starter;
pub mod store;
pub mod streak;
pub mod tracker;

pub use error::{Error, Result};
