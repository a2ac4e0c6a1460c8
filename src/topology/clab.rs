use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Emulation platform every translated node runs as.
pub const NODE_KIND: &str = "nokia-sros";
pub const NODE_IMAGE: &str = "containerlab/vr-sros";

/// Containerlab topology file contents.
/// Fields are declared in key order so the written file has sorted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClabDocument {
    pub topology: ClabTopology,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClabTopology {
    pub links: Vec<ClabLink>,
    pub nodes: BTreeMap<String, ClabNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClabNode {
    pub image: String,
    pub kind: String,
    #[serde(rename = "mgmt-ipv4")]
    pub mgmt_ipv4: String,
}

impl ClabNode {
    pub fn new(mgmt_ipv4: &str) -> Self {
        Self {
            image: NODE_IMAGE.to_string(),
            kind: NODE_KIND.to_string(),
            mgmt_ipv4: mgmt_ipv4.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClabLink {
    pub endpoints: [String; 2],
}

impl ClabLink {
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            endpoints: [source.to_string(), destination.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_node_serialization() {
        let node = ClabNode::new("10.0.0.1");
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"kind": "nokia-sros", "image": "containerlab/vr-sros", "mgmt-ipv4": "10.0.0.1"})
        );
    }

    #[test]
    fn test_yaml_shape() {
        let mut document = ClabDocument::default();
        document.topology.nodes.insert("r1".to_string(), ClabNode::new("10.0.0.1"));
        document.topology.links.push(ClabLink::new("r1:eth1", "r2:eth1"));

        let yaml = serde_yaml::to_string(&document).unwrap();
        assert!(yaml.starts_with("topology:\n"));
        let position = |key: &str| yaml.find(key).unwrap();
        assert!(position("links:") < position("nodes:"));
        assert!(position("image:") < position("kind:"));
        assert!(position("kind:") < position("mgmt-ipv4:"));

        let parsed: ClabDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, document);
    }
}
