//! Trivia quiz engine with a terminal front end.
//!
//! `session` holds the question data and the progression state machine,
//! `engine` the derived scoring and assessment values. The binary in
//! `main.rs` drives both through `app::App`.

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod session;
pub mod store;
pub mod ui;
