//! Scripted driver for the flowdeck editor.
//!
//! Loads a catalog, an optional saved workflow, and a JSON array of editor
//! commands, replays the commands, and writes the last saved workflow.

pub mod cli;
pub mod config;
pub mod error;
pub mod run;
