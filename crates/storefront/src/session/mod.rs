//! The locally persisted login session.
//!
//! [`SessionStore`] is the only read/write boundary for session data. It
//! sits on a pluggable [`SessionStorage`] so the CLI can keep the session
//! on disk while tests keep it in memory.
//!
//! Session operations never fail from the caller's point of view: storage
//! and parse errors are logged and treated as "logged out".

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::{CART_KEY, SESSION_KEY, SessionStore};
