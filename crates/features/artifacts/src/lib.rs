//! # Artifact Generator
//!
//! Derives four files from a [`thub_catalogue::Catalogue`]:
//!
//! | artifact | file | content |
//! |---|---|---|
//! | docs | `toggles.md` | Markdown table per stage, `hideFromDocs` flags excluded |
//! | frontend | `frontend.json` | flags that are `frontendOnly` or `exposeToFrontend` |
//! | schema | `schema.json` | every flag with every field and its computed default |
//! | snapshot | `snapshot.json` | default-state snapshot plus SHA-256 of the canonical source |
//!
//! [`consistency_check`] regenerates in memory and reports every checked-in file that drifted.
//! Generating, then checking, is a fixed point.

mod artifacts;
mod error;
mod generator;
mod render;

pub use crate::artifacts::{ArtifactKind, Artifacts, CheckedInArtifacts};
pub use crate::error::{ArtifactsError, ArtifactsErrorExt};
pub use crate::generator::{Drift, DriftReason, Generator, consistency_check, generate};
