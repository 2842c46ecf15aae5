//! Brume is a terminal-first chat client for Zulip-style servers, where
//! conversation happens in named streams with per-topic threads alongside
//! direct private messages.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the message model, the compose-panel
//!   state machine, narrowing, and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines the outgoing-message payloads and the messaging
//!   client used to deliver them.
//!
//! The binary entrypoint (`src/main.rs`) resolves configuration and hands
//! control to [`ui::chat_loop`] for the interactive session.

pub mod api;
pub mod core;
pub mod ui;
pub mod utils;
