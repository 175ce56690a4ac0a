//! Whole-document club persistence.
//!
//! A club is stored as a single JSON document keyed by its community. Writes
//! replace the whole document and are guarded by an optimistic revision check.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryClubStore;
pub use json_file::JsonFileClubStore;
pub use r#trait::{ClubStore, StoreError};
