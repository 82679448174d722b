//! Remote-data-backed multi-select control.
//!
//! The core is [`controller::MultiSelect`], a state machine that emits
//! [`controller::Effect`]s instead of doing I/O. [`runtime::Driver`]
//! executes those effects on tokio against a [`transport::Transport`], and
//! the `tui` module renders the control with ratatui.

pub mod app;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod events;
pub mod log;
pub mod model;
pub mod picker;
pub mod pointer;
pub mod query;
pub mod runtime;
pub mod selection;
pub mod transport;
pub mod tui;

pub use controller::{Effect, MultiSelect, Props};
pub use model::{Identifier, Item, EMPTY_VALUE};
