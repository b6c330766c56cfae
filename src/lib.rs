//! Personal journaling library
//!
//! This library provides named journals, each a date-keyed log of free-text
//! entries stored as one JSON file, along with the codec that turns raw entry
//! text into its stored form and back.

mod cli;
mod clock;
pub mod codec;
mod config;
mod entry;
mod errors;
mod helper;
mod journal;
mod storage;
mod types;

// Re-export key components
pub use cli::*;
pub use clock::*;
pub use config::*;
pub use entry::*;
pub use errors::*;
pub use helper::*;
pub use journal::*;
pub use storage::*;
pub use types::*;
