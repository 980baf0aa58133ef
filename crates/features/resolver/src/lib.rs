//! # Resolver
//!
//! * [`default_state`] / [`DefaultResolver`]: the pure default of a flag.
//! * [`resolve`]: precedence `Operator < Admin < Request` over that default, then license and
//!   dev-mode gating.
//! * [`OverrideStore`]: the copy-on-write admin override set, persisted through a [`Ledger`].
//!   Restart-gated flags keep their active value for the whole process lifetime; admin writes to
//!   them are pending until the next start.
//! * [`OverrideResolver`]: all of the above over a [`thub_validator::ValidatedCatalogue`].

mod context;
mod default;
mod error;
mod ledger;
mod resolution;
mod resolver;
mod store;

pub use crate::context::ResolveContext;
pub use crate::default::{DefaultResolver, default_state};
pub use crate::error::{ResolverError, ResolverErrorExt};
pub use crate::ledger::{Ledger, LedgerRecord};
pub use crate::resolution::{Gate, Origin, OverrideSources, Resolution, SourceKind, resolve};
pub use crate::resolver::{OverrideResolver, SetOutcome};
pub use crate::store::{OverrideSet, OverrideStore};
