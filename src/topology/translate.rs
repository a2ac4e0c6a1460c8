/*!
IETF L2 topology -> containerlab topology.

Pure and deterministic: the same document always produces the same `ClabDocument`.
Translation is structural only; link endpoints are not checked against node names.
*/

use serde_json::Value;

use super::{
    clab::{ClabDocument, ClabLink, ClabNode},
    ietf::{L2Topology, SchemaError},
};

pub const LINK_DELIMITER: &str = "--";

/// Result of a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub document: ClabDocument,
    /// Display names that replaced an earlier node with the same name, in processing order.
    pub overwritten: Vec<String>,
}

/// Splits `"<source>--<destination>"`. With more than one delimiter only the first and
/// last segments of a left-to-right split are kept, so `"A--B--C"` gives `["A", "C"]`
/// and `"A---B"` gives `["A", "-B"]`.
pub fn split_link_name<'a>(name: &'a str, path: &str) -> Result<[&'a str; 2], SchemaError> {
    let Some((source, _)) = name.split_once(LINK_DELIMITER) else {
        return Err(SchemaError::new(path, "a link name of the form `<source>--<destination>`"));
    };
    let destination = name.split(LINK_DELIMITER).last().unwrap_or_default();
    Ok([source, destination])
}

pub fn translate(document: &Value) -> Result<Translation, SchemaError> {
    let l2 = L2Topology::from_document(document)?;
    let mut translation = Translation {
        document: ClabDocument::default(),
        overwritten: Vec::new(),
    };
    let topology = &mut translation.document.topology;

    for node in &l2.nodes {
        let previous = topology
            .nodes
            .insert(node.name.to_string(), ClabNode::new(node.management_address));
        if previous.is_some() {
            translation.overwritten.push(node.name.to_string());
        }
    }

    for link in &l2.links {
        let [source, destination] = split_link_name(link.name, &link.name_path)?;
        topology.links.push(ClabLink::new(source, destination));
    }

    Ok(translation)
}
