//! # Catalogue Loader
//!
//! Turns the declarative TOML catalogue (`[[team]]`, `[[flag]]`, `[[retired]]`) into an
//! immutable [`Catalogue`] with an O(1) name index.
//!
//! Structural problems (malformed TOML, unknown fields, unknown stages, duplicate keys and
//! repeated names) are reported as [`CatalogueError`] and abort startup. Consistency rules
//! live in the validator.
//!
//! ```rust
//! use thub_catalogue::Catalogue;
//!
//! let catalogue = Catalogue::parse(r#"
//!     [[team]]
//!     id = "core"
//!
//!     [[flag]]
//!     name = "alpha"
//!     stage = "experimental"
//!     owner = "core"
//! "#).unwrap();
//!
//! assert!(catalogue.contains("alpha"));
//! ```

mod catalogue;
mod error;
mod loader;
mod source;

pub use crate::catalogue::Catalogue;
pub use crate::error::{CatalogueError, CatalogueErrorExt};
pub use crate::loader::load_catalogue;
pub use crate::source::CatalogueSource;
