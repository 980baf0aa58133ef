use std::borrow::Cow;

/// Structural failures of the catalogue source. All of them are fatal at startup.
#[thub_derive::thub_error]
pub enum CatalogueError {
    #[error("Malformed catalogue source{}: {source}", format_context(.context))]
    Parse { source: toml::de::Error, context: Option<Cow<'static, str>> },

    #[error("Catalogue serialization failed{}: {source}", format_context(.context))]
    Serialize { source: toml::ser::Error, context: Option<Cow<'static, str>> },

    #[error("Duplicate catalogue entry{}: {message}", format_context(.context))]
    Duplicate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Catalogue I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Catalogue load timed out{}: {message}", format_context(.context))]
    Timeout { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal catalogue error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
