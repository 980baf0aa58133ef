//! Facade crate for the toggle subsystem.
//! Re-exports the slices and composes them; keep business logic in the feature crates.
//!
//! ## Runtime
//! ```rust,no_run
//! # async fn run() -> Result<(), thub::TogglesError> {
//! use thub::{FeatureToggles, ResolveContext};
//! use thub::kernel::config::load_config;
//!
//! let config = load_config(None::<&str>).unwrap_or_default();
//! let toggles = FeatureToggles::builder().config(config).bootstrap().await?;
//!
//! let ctx = ResolveContext::builder().license_valid(true).build();
//! if toggles.is_enabled("publicDashboards", &ctx) {
//!     // ...
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Build tooling
//! [`validate_and_generate`] parses, validates and generates in one pass; `cargo xtask toggles`
//! wraps it together with the drift check.

mod error;
mod pipeline;
mod toggles;

pub use crate::error::{TogglesError, TogglesErrorExt};
pub use crate::pipeline::{PipelineReport, validate_and_generate};
pub use crate::toggles::{FeatureToggles, TogglesBuilder};

pub use thub_artifacts as artifacts;
pub use thub_catalogue as catalogue;
pub use thub_domain as domain;
pub use thub_kernel as kernel;
pub use thub_resolver as resolver;
pub use thub_validator as validator;

pub use thub_domain::{FlagState, Stage};
pub use thub_resolver::{Resolution, ResolveContext, SetOutcome};
