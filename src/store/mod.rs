//! Store Module
//!
//! The shared key-value store with TTL and pub/sub, and the typed adapter the
//! rest of the crate talks to.

mod adapter;
mod backend;
mod entry;
mod lru;
mod memory;
mod value;


// Re-export public types
pub use adapter::KvAdapter;
pub use backend::KvStore;
pub use entry::StoredEntry;
pub use lru::LruTracker;
pub use memory::MemoryStore;
pub use value::Value;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed encoded value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
