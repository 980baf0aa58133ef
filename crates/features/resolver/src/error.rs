use std::borrow::Cow;

#[thub_derive::thub_error]
pub enum ResolverError {
    #[error("Unknown flag{}: {message}", format_context(.context))]
    UnknownFlag { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Override ledger storage failure{}: {source}", format_context(.context))]
    Storage { source: thub_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Override ledger is corrupted{}: {source}", format_context(.context))]
    Ledger { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal resolver error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
