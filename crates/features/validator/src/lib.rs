//! # Consistency Validator
//!
//! Checks a [`Catalogue`] against naming, ownership, stage-policy and lifecycle rules, optionally
//! relative to the previously generated [`Snapshot`]. All violations are collected in one
//! [`ValidationReport`].
//!
//! A [`ValidatedCatalogue`] can only be obtained from a clean report; the resolvers accept
//! nothing else.

pub mod matrix;
mod options;
mod report;
mod rules;

pub use crate::options::ValidationOptions;
pub use crate::report::{ValidationReport, Violation, ViolationKind};
pub use crate::rules::{validate, validate_source};

use std::ops::Deref;
use thub_catalogue::Catalogue;
use thub_domain::Snapshot;

/// A catalogue that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedCatalogue {
    catalogue: Catalogue,
}

impl ValidatedCatalogue {
    /// # Errors
    /// Returns the full [`ValidationReport`] when any violation exists.
    pub fn new(
        catalogue: Catalogue,
        prior: Option<&Snapshot>,
        options: &ValidationOptions,
    ) -> Result<Self, ValidationReport> {
        let report = validate(&catalogue, prior, options);
        if report.is_ok() { Ok(Self { catalogue }) } else { Err(report) }
    }

    #[must_use]
    pub const fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }
}

impl Deref for ValidatedCatalogue {
    type Target = Catalogue;

    fn deref(&self) -> &Self::Target {
        &self.catalogue
    }
}
