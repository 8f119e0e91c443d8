//! Provider listing.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use listwise_core::config::Config;
use listwise_core::providers::ProviderKind;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ProviderRow {
    id: &'static str,
    label: &'static str,
    credential: &'static str,
    selected: bool,
}

pub fn list(
    config: &Config,
    provider: Option<ProviderKind>,
    api_key: Option<&str>,
    json: bool,
) -> Result<()> {
    let selected = match provider {
        Some(kind) => kind,
        None => config.provider_kind()?,
    };
    let rows = provider_rows(config, selected, api_key);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Provider", "Name", "Credential", "Selected"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(row.label),
            Cell::new(row.credential),
            Cell::new(if row.selected { "*" } else { "" }),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// The key override only applies to the selected provider.
fn provider_rows(config: &Config, selected: ProviderKind, api_key: Option<&str>) -> Vec<ProviderRow> {
    ProviderKind::all()
        .iter()
        .map(|&kind| {
            let is_selected = kind == selected;
            let generation =
                config.generation_config(kind, if is_selected { api_key } else { None });
            let credential = if !kind.requires_credential() {
                "not required"
            } else if generation.effective_api_key().is_some() {
                "set"
            } else {
                "missing"
            };
            ProviderRow {
                id: kind.id(),
                label: kind.label(),
                credential,
                selected: is_selected,
            }
        })
        .collect()
}
