//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports the domain and owns config loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use thub_kernel::config::load_config;
//! use thub_kernel::domain::config::ThubConfig;
//!
//! let cfg: ThubConfig = load_config(Some("toggles.toml")).unwrap_or_default();
//! ```
pub mod config;

pub use thub_domain as domain;
