//! Persistent key-value stores.
//!
//! [`FileStore`] keeps the chosen environment across process restarts the
//! way browser storage keeps it across page loads.

pub mod atomic;
pub mod file_store;

pub use file_store::FileStore;
