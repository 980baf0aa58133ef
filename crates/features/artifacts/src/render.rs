use crate::error::{ArtifactsError, ArtifactsErrorExt};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use strum::IntoEnumIterator;
use thub_catalogue::Catalogue;
use thub_domain::{FlagDefinition, FlagRecord, PolicySet, Snapshot, SnapshotEntry, Stage};
use thub_resolver::DefaultResolver;

const DOCS_HEADER: &str = "<!-- Generated from the toggle catalogue. Do not edit by hand. -->\n\n# Feature toggles\n";

pub(crate) fn docs(catalogue: &Catalogue, defaults: &DefaultResolver) -> String {
    let mut out = String::from(DOCS_HEADER);

    for stage in Stage::iter() {
        let rows: Vec<&FlagDefinition> = catalogue
            .flags()
            .iter()
            .filter(|f| f.stage == stage && !f.has(PolicySet::HIDE_FROM_DOCS))
            .collect();
        if rows.is_empty() {
            continue;
        }

        let _ = write!(
            out,
            "\n## {}\n\n| Name | Description | Owner | Default |\n| --- | --- | --- | --- |\n",
            stage.title()
        );
        for flag in rows {
            let _ = writeln!(
                out,
                "| `{}` | {} | {} | {} |",
                flag.name,
                cell(&flag.description),
                cell(&flag.owner),
                defaults.resolve(flag)
            );
        }
    }

    out
}

/// Markdown table cells cannot hold pipes or line breaks.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrontendEntry<'a> {
    name: &'a str,
    stage: Stage,
    frontend_only: bool,
}

pub(crate) fn frontend(catalogue: &Catalogue) -> Result<String, ArtifactsError> {
    let entries: Vec<FrontendEntry<'_>> = catalogue
        .flags()
        .iter()
        .filter(|f| f.policy.is_frontend_visible())
        .map(|f| FrontendEntry {
            name: &f.name,
            stage: f.stage,
            frontend_only: f.has(PolicySet::FRONTEND_ONLY),
        })
        .collect();

    pretty(&entries).context("frontend manifest")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemaEntry {
    name: String,
    description: String,
    stage: Stage,
    owner: String,
    frontend_only: bool,
    requires_license: bool,
    requires_dev_mode: bool,
    requires_restart: bool,
    hide_from_docs: bool,
    expose_to_frontend: bool,
    restart_acknowledged: bool,
    expression: Option<String>,
    enabled: Option<bool>,
    default_enabled: bool,
}

impl SchemaEntry {
    fn new(flag: &FlagDefinition, default_enabled: bool) -> Self {
        let record = FlagRecord::from(flag.clone());
        Self {
            name: record.name,
            description: record.description,
            stage: record.stage,
            owner: record.owner,
            frontend_only: record.frontend_only,
            requires_license: record.requires_license,
            requires_dev_mode: record.requires_dev_mode,
            requires_restart: record.requires_restart,
            hide_from_docs: record.hide_from_docs,
            expose_to_frontend: record.expose_to_frontend,
            restart_acknowledged: record.restart_acknowledged,
            expression: record.expression,
            enabled: record.enabled,
            default_enabled,
        }
    }
}

pub(crate) fn schema(catalogue: &Catalogue, defaults: &DefaultResolver) -> Result<String, ArtifactsError> {
    let entries: Vec<SchemaEntry> = catalogue
        .flags()
        .iter()
        .map(|f| SchemaEntry::new(f, defaults.resolve(f).is_enabled()))
        .collect();

    pretty(&entries).context("schema")
}

pub(crate) fn snapshot(catalogue: &Catalogue, defaults: &DefaultResolver) -> Result<String, ArtifactsError> {
    pretty(&snapshot_value(catalogue, defaults)?).context("snapshot")
}

pub(crate) fn snapshot_value(
    catalogue: &Catalogue,
    defaults: &DefaultResolver,
) -> Result<Snapshot, ArtifactsError> {
    let canonical = serde_json::to_vec(catalogue.source()).context("canonical source")?;
    let digest = hex::encode(Sha256::digest(&canonical));

    let flags = catalogue
        .flags()
        .iter()
        .map(|f| SnapshotEntry {
            name: f.name.clone(),
            stage: f.stage,
            owner: f.owner.clone(),
            default_enabled: defaults.resolve(f).is_enabled(),
            requires_restart: f.has(PolicySet::REQUIRES_RESTART),
            frontend_only: f.has(PolicySet::FRONTEND_ONLY),
        })
        .collect();
    let retired = catalogue.retired().iter().map(|r| r.name.clone()).collect();

    Ok(Snapshot { digest, flags, retired })
}

/// Pretty JSON with a trailing newline.
fn pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_escaped() {
        assert_eq!(cell("a | b\nc"), "a \\| b c");
    }

    #[test]
    fn empty_catalogue_renders_header_only() {
        let catalogue = Catalogue::parse("").unwrap();
        assert_eq!(docs(&catalogue, &DefaultResolver::new()), DOCS_HEADER);
        assert_eq!(frontend(&catalogue).unwrap(), "[]\n");
    }
}
