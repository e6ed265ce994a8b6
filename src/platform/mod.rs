//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard codes to game actions)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::{Action, InputState};
pub use storage::{KeyValueStore, MemoryStore, NullStore, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
