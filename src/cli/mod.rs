//! Command-line interface for clipstore.

pub mod args;
pub mod commands;
