use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use super::model::NetworkData;

/// Reads a network export from disk. Malformed files are reported with the
/// failing path; an empty (but well-formed) dataset is not an error, the
/// layout engines simply render nothing.
pub fn load_network(path: &Path) -> Result<NetworkData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read network dataset {}", path.display()))?;

    let data: NetworkData = serde_json::from_str(&raw)
        .with_context(|| format!("invalid network JSON in {}", path.display()))?;

    if data.nodes.is_empty() {
        warn!("dataset {} contains no nodes", path.display());
    }
    info!(
        "loaded {} nodes / {} links from {}",
        data.nodes.len(),
        data.links.len(),
        path.display()
    );

    Ok(data)
}
