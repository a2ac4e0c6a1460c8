use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    error::RunError,
    output,
    topology::{TopologySource, translate},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub nodes: usize,
    pub links: usize,
    pub overwritten: usize,
    pub path: PathBuf,
}

/// Fetches the document, translates it and writes the result to `path`.
/// Nothing is written unless every earlier step succeeded.
pub async fn export(source: &mut dyn TopologySource, path: &Path) -> Result<ExportSummary, RunError> {
    let document = source.fetch_document().await?;
    let translation = translate(&document)?;

    for name in &translation.overwritten {
        warn!(node = %name, "duplicate node name, later entry replaced the earlier one");
    }
    let topology = &translation.document.topology;
    let summary = ExportSummary {
        nodes: topology.nodes.len(),
        links: topology.links.len(),
        overwritten: translation.overwritten.len(),
        path: path.to_path_buf(),
    };
    info!(
        nodes = summary.nodes,
        links = summary.links,
        overwritten = summary.overwritten,
        "translated topology"
    );

    output::write_topology(path, &translation.document)?;
    info!(path = %path.display(), "wrote containerlab topology");
    Ok(summary)
}
