//! # TrainFlow
//!
//! Library half of the TrainFlow binary: configuration, wizard scripts,
//! the async generation ticker and the CLI commands. The binary in
//! `main.rs` only sets up logging and dispatches to [`cli::execute`].

pub mod cli;
pub mod config;
pub mod script;
pub mod ticker;
