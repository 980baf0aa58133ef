//! # Domain Models
//!
//! Pure toggle types with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O and no resolution logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod flag;
pub mod policy;
pub mod registry;
pub mod snapshot;

pub use flag::{FlagDefinition, FlagRecord, FlagState, Stage};
pub use policy::PolicySet;
pub use registry::{RetiredFlag, Team};
pub use snapshot::{Snapshot, SnapshotEntry};
