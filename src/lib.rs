//! Recipe Box - recipe cards kept in LocalStorage
//!
//! Core modules:
//! - `record`: Schema-less records (ordered field name → text)
//! - `storage`: Key-value storage seam and the record list slot
//! - `render`: Card surface seam and bulk rendering
//! - `controller`: Submit and clear transitions
//! - `config`: Page selectors, storage key, commit order, log level
//! - `web`: LocalStorage/DOM backends and event wiring (wasm32 only)

pub mod config;
pub mod controller;
pub mod error;
pub mod record;
pub mod render;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{CommitOrder, Config};
pub use controller::FormController;
pub use error::{Error, Result};
pub use record::{Record, RecordList};
pub use render::{CardSurface, MemorySurface, render_all};
pub use storage::{KeyValueStore, MemoryStore, RecipeStore, STORAGE_KEY};
