//! Store module — access to the source `pass` password store.
//!
//! This module provides:
//! - entry enumeration over the store directory (`entries`)
//! - entry decryption through the `pass` command (`reader`)

pub mod entries;
pub mod reader;

// Re-export the most commonly used items.
pub use entries::{EntrySource, PassStore};
pub use reader::{EntryReader, PassReader};
