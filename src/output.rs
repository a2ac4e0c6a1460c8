/*!
Writes the containerlab topology file.

The document is serialized fully in memory first, then written to a temporary
sibling file and renamed over the destination, so a failed run never leaves a
partial file behind.
*/

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::topology::ClabDocument;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize topology: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn render(document: &ClabDocument) -> Result<String, OutputError> {
    Ok(serde_yaml::to_string(document)?)
}

/// Serializes and atomically replaces `path`.
pub fn write_topology(path: &Path, document: &ClabDocument) -> Result<(), OutputError> {
    let yaml = render(document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
    }

    let tmp_path = temp_path(path);
    let mut tmp_file = File::create(&tmp_path).map_err(|e| io_error(&tmp_path, e))?;
    let written = tmp_file
        .write_all(yaml.as_bytes())
        .and_then(|_| tmp_file.sync_all());
    drop(tmp_file);
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(&tmp_path, source));
    }

    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        io_error(path, source)
    })
}

fn io_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// `<dir>/.<file name>.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "topology".to_string());
    path.with_file_name(format!(".{file_name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::clab::{ClabLink, ClabNode};

    fn sample() -> ClabDocument {
        let mut document = ClabDocument::default();
        document.topology.nodes.insert("pe1".to_string(), ClabNode::new("192.168.96.1"));
        document.topology.links.push(ClabLink::new("pe1:eth1", "p1:eth1"));
        document
    }

    #[test]
    fn test_write_topology() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.clab.yaml");

        write_topology(&path, &sample()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: ClabDocument = serde_yaml::from_str(&written).unwrap();
        assert_eq!(parsed, sample());
        assert!(!dir.path().join(".data.clab.yaml.tmp").exists());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.yaml");
        fs::write(&path, "stale: true\n").unwrap();

        write_topology(&path, &ClabDocument::default()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.contains("nodes: {}"));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labs").join("nsp").join("data.clab.yaml");
        write_topology(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path(Path::new("out/data.clab.yaml")),
            PathBuf::from("out/.data.clab.yaml.tmp")
        );
    }
}
