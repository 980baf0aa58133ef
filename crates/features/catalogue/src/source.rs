use crate::error::{CatalogueError, CatalogueErrorExt};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use thub_domain::{FlagDefinition, RetiredFlag, Team};

/// The declarative catalogue exactly as written on disk.
///
/// ```toml
/// [[team]]
/// id = "grafanaSharingSquad"
///
/// [[flag]]
/// name = "publicDashboards"
/// stage = "generalAvailability"
/// owner = "grafanaSharingSquad"
/// expression = "true"
///
/// [[retired]]
/// name = "oldDashboards"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogueSource {
    #[serde(rename = "team", default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Team>,
    #[serde(rename = "flag", default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagDefinition>,
    #[serde(rename = "retired", default, skip_serializing_if = "Vec::is_empty")]
    pub retired: Vec<RetiredFlag>,
}

impl CatalogueSource {
    /// Parses and structurally checks a source document. Order is preserved.
    ///
    /// # Errors
    /// * [`CatalogueError::Parse`] for malformed TOML, unknown fields, bad enum values or
    ///   duplicate keys.
    /// * [`CatalogueError::Duplicate`] when a flag name, team id or retired name repeats.
    pub fn parse(text: &str) -> Result<Self, CatalogueError> {
        let source: Self = toml::from_str(text).context("Failed to parse catalogue")?;
        source.check_unique()?;
        Ok(source)
    }

    /// Serializes back to TOML. `parse(to_toml(s)) == s` for every parsed source.
    ///
    /// # Errors
    /// Returns [`CatalogueError::Serialize`] if a value cannot be represented.
    pub fn to_toml(&self) -> Result<String, CatalogueError> {
        toml::to_string_pretty(self).context("Failed to serialize catalogue")
    }

    /// Rejects repeated flag names, team ids and retired names.
    ///
    /// # Errors
    /// Returns [`CatalogueError::Duplicate`] naming the first repeat.
    pub fn check_unique(&self) -> Result<(), CatalogueError> {
        first_repeat(self.flags.iter().map(|f| f.name.as_str()), "flag")?;
        first_repeat(self.teams.iter().map(|t| t.id.as_str()), "team")?;
        first_repeat(self.retired.iter().map(|r| r.name.as_str()), "retired flag")?;
        Ok(())
    }
}

fn first_repeat<'a>(
    keys: impl Iterator<Item = &'a str>,
    kind: &'static str,
) -> Result<(), CatalogueError> {
    let mut seen = FxHashSet::default();
    for key in keys {
        if !seen.insert(key) {
            return Err(CatalogueError::Duplicate {
                message: format!("{kind} '{key}' is declared more than once").into(),
                context: None,
            });
        }
    }
    Ok(())
}
