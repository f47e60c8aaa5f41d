//! Rendering of cluster inventories

use crate::models::ClusterInfo;
use anyhow::{Context, Result};
use clap::ValueEnum;

/// Output format for the `clusters` command
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Yaml,
    Json,
}

const HEADERS: [&str; 6] = ["NAME", "HOME", "NETWORK", "ACCESSIBLE", "SECRET", "ENDPOINT"];

/// Render clusters in the requested format
pub fn render_clusters(clusters: &[ClusterInfo], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(clusters)),
        OutputFormat::Yaml => {
            serde_yaml::to_string(clusters).context("Failed to serialize clusters to YAML")
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(clusters).context("Failed to serialize clusters to JSON")
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn render_table(clusters: &[ClusterInfo]) -> String {
    let rows: Vec<[&str; 6]> = clusters
        .iter()
        .map(|c| {
            [
                c.name.as_str(),
                yes_no(c.is_kiali_home),
                c.network.as_str(),
                yes_no(c.accessible),
                if c.secret_name.is_empty() { "-" } else { c.secret_name.as_str() },
                if c.api_endpoint.is_empty() { "-" } else { c.api_endpoint.as_str() },
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    std::iter::once(HEADERS)
        .chain(rows)
        .map(|row| {
            let last = row.len() - 1;
            row.iter()
                .enumerate()
                .map(|(i, cell)| {
                    // no padding after the last column
                    if i == last {
                        cell.to_string()
                    } else {
                        format!("{:<width$}", cell, width = widths[i])
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
