use std::borrow::Cow;

#[thub_derive::thub_error]
pub enum ArtifactsError {
    #[error("Artifact storage failure{}: {source}", format_context(.context))]
    Storage { source: thub_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Artifact encoding failed{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Checked-in artifact is not UTF-8{}: {source}", format_context(.context))]
    Encoding { source: std::string::FromUtf8Error, context: Option<Cow<'static, str>> },

    #[error("Internal artifacts error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
