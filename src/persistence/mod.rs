//! Key-value persistence
//!
//! Features:
//! - One string value per key, JSON-encoded by callers
//! - In-memory backend for tests and headless use
//! - File backend with tmp → rename replacement (native)
//! - LocalStorage backend (wasm32)
//! - Corrupt values read back as absent

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use storage::{MemoryStorage, Storage, load_json, save_json};
