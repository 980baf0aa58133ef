//! A small durable document store.
//!
//! Documents are whole files addressed by a flat name (`overrides.json`) inside a single root
//! directory. Writes are atomic: the payload goes to a unique temporary file, is `fsync`ed,
//! then renamed over the target, so a crash never leaves a half-written document behind.
//! Leftover temporary files from a crash are removed when the store is opened.
//!
//! ```rust
//! use thub_storage::{Storage, StorageError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let storage = Storage::builder().root(tmp.path().join("state")).open().await?;
//!
//!     storage.write("overrides.json", b"{}").await?;
//!     assert_eq!(storage.read("overrides.json").await?.as_deref(), Some(&b"{}"[..]));
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
