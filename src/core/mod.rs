//! Core types for clipstore.
//!
//! This module provides the entry model and the key check shared by the
//! storage layer and the CLI.

mod entry;
mod key;

pub use entry::{Entry, Payload};
pub use key::keys_match;
