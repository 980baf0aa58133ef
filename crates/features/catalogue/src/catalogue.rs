use crate::error::CatalogueError;
use crate::source::CatalogueSource;
use fxhash::FxHashMap;
use std::sync::Arc;
use thub_domain::{FlagDefinition, RetiredFlag, Stage, Team};

#[derive(Debug)]
struct CatalogueInner {
    source: CatalogueSource,
    index: FxHashMap<String, usize>,
}

/// Immutable, indexed view of a catalogue source.
///
/// Built once at startup and passed explicitly to the validator, resolvers and generator.
/// Cloning is an `Arc` bump.
#[derive(Debug, Clone)]
pub struct Catalogue {
    inner: Arc<CatalogueInner>,
}

impl Catalogue {
    /// # Errors
    /// Returns [`CatalogueError::Duplicate`] if the source repeats a name or team id.
    pub fn new(source: CatalogueSource) -> Result<Self, CatalogueError> {
        source.check_unique()?;

        let index = source.flags.iter().enumerate().map(|(i, f)| (f.name.clone(), i)).collect();

        Ok(Self { inner: Arc::new(CatalogueInner { source, index }) })
    }

    /// # Errors
    /// See [`CatalogueSource::parse`].
    pub fn parse(text: &str) -> Result<Self, CatalogueError> {
        Self::new(CatalogueSource::parse(text)?)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlagDefinition> {
        self.inner.index.get(name).map(|i| &self.inner.source.flags[*i])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.index.contains_key(name)
    }

    #[must_use]
    pub fn stage(&self, name: &str) -> Option<Stage> {
        self.get(name).map(|flag| flag.stage)
    }

    /// Flags in source order.
    #[must_use]
    pub fn flags(&self) -> &[FlagDefinition] {
        &self.inner.source.flags
    }

    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.inner.source.teams
    }

    #[must_use]
    pub fn retired(&self) -> &[RetiredFlag] {
        &self.inner.source.retired
    }

    #[must_use]
    pub fn source(&self) -> &CatalogueSource {
        &self.inner.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.source.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.source.flags.is_empty()
    }
}
