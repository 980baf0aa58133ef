use std::borrow::Cow;

#[thub_derive::thub_error]
pub enum TogglesError {
    #[error("Catalogue failure{}: {source}", format_context(.context))]
    Catalogue { source: thub_catalogue::CatalogueError, context: Option<Cow<'static, str>> },

    #[error("Refusing to serve catalogue{}: {source}", format_context(.context))]
    Validation { source: thub_validator::ValidationReport, context: Option<Cow<'static, str>> },

    #[error("Override failure{}: {source}", format_context(.context))]
    Resolver { source: thub_resolver::ResolverError, context: Option<Cow<'static, str>> },

    #[error("State storage failure{}: {source}", format_context(.context))]
    Storage { source: thub_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Artifact failure{}: {source}", format_context(.context))]
    Artifacts { source: thub_artifacts::ArtifactsError, context: Option<Cow<'static, str>> },

    #[error("Internal toggles error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl TogglesError {
    /// Violations behind a [`TogglesError::Validation`].
    #[must_use]
    pub fn violations(&self) -> &[thub_validator::Violation] {
        match self {
            Self::Validation { source, .. } => &source.violations,
            _ => &[],
        }
    }
}
