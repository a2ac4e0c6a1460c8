/*!
Read-side view of the controller's IETF L2 topology document
(`ietf-network` + `ietf-network-topology` + `ietf-l2-topology`).

JSON structure (only the fields used here):
{
    "ietf-network:network": [
        {
            "node": [
                {
                    "node-id": [string],
                    "ietf-l2-topology:l2-node-attributes": {
                        "name": [string],
                        "management-address": [[string], ...]
                    }
                },
                ...
            ],
            "ietf-network-topology:link": [
                {
                    "ietf-l2-topology:l2-link-attributes": {
                        "name": [string like "<source>--<destination>"]
                    }
                },
                ...
            ]
        }
    ]
}

Every lookup goes through `Cursor`, which remembers the field path so a missing or
mistyped field is reported as e.g.
`ietf-network:network[0].node[2].ietf-l2-topology:l2-node-attributes.name`.
*/

use serde_json::Value;
use thiserror::Error;

pub const NETWORK: &str = "ietf-network:network";
pub const NODE: &str = "node";
pub const NODE_ID: &str = "node-id";
pub const L2_NODE_ATTRIBUTES: &str = "ietf-l2-topology:l2-node-attributes";
pub const NAME: &str = "name";
pub const MANAGEMENT_ADDRESS: &str = "management-address";
pub const LINK: &str = "ietf-network-topology:link";
pub const L2_LINK_ATTRIBUTES: &str = "ietf-l2-topology:l2-link-attributes";

/// The document does not have the shape the translator expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected topology document at `{path}`: expected {expected}")]
pub struct SchemaError {
    pub path: String,
    pub expected: &'static str,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, expected: &'static str) -> Self {
        Self {
            path: path.into(),
            expected,
        }
    }
}

/// A JSON value plus the path that led to it.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Cursor<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: String::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn field_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    pub fn field(&self, name: &str) -> Result<Cursor<'a>, SchemaError> {
        let path = self.field_path(name);
        let object = self
            .value
            .as_object()
            .ok_or_else(|| SchemaError::new(self.path.clone(), "an object"))?;
        let value = object
            .get(name)
            .ok_or_else(|| SchemaError::new(path.clone(), "a field"))?;
        Ok(Cursor { value, path })
    }

    pub fn items(&self) -> Result<Vec<Cursor<'a>>, SchemaError> {
        let array = self
            .value
            .as_array()
            .ok_or_else(|| SchemaError::new(self.path.clone(), "an array"))?;
        Ok(array
            .iter()
            .enumerate()
            .map(|(i, value)| Cursor {
                value,
                path: format!("{}[{}]", self.path, i),
            })
            .collect())
    }

    /// First element of an array; the array must not be empty.
    pub fn first(&self) -> Result<Cursor<'a>, SchemaError> {
        self.items()?
            .into_iter()
            .next()
            .ok_or_else(|| SchemaError::new(format!("{}[0]", self.path), "a non-empty array"))
    }

    pub fn as_str(&self) -> Result<&'a str, SchemaError> {
        self.value
            .as_str()
            .ok_or_else(|| SchemaError::new(self.path.clone(), "a string"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2Node<'a> {
    #[allow(dead_code)]
    pub node_id: &'a str,
    pub name: &'a str,
    /// First entry of `management-address`; later entries are not read.
    pub management_address: &'a str,
}

impl<'a> L2Node<'a> {
    fn from_cursor(node: &Cursor<'a>) -> Result<Self, SchemaError> {
        let node_id = node.field(NODE_ID)?.as_str()?;
        let attributes = node.field(L2_NODE_ATTRIBUTES)?;
        let name = attributes.field(NAME)?.as_str()?;
        let management_address = attributes.field(MANAGEMENT_ADDRESS)?.first()?.as_str()?;
        Ok(Self {
            node_id,
            name,
            management_address,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2Link<'a> {
    pub name: &'a str,
    /// Path of the `name` field, kept for error reporting during translation.
    pub name_path: String,
}

impl<'a> L2Link<'a> {
    fn from_cursor(link: &Cursor<'a>) -> Result<Self, SchemaError> {
        let name = link.field(L2_LINK_ATTRIBUTES)?.field(NAME)?;
        Ok(Self {
            name: name.as_str()?,
            name_path: name.path().to_string(),
        })
    }
}

/// Nodes and links of the first network in the document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2Topology<'a> {
    pub nodes: Vec<L2Node<'a>>,
    pub links: Vec<L2Link<'a>>,
}

impl<'a> L2Topology<'a> {
    pub fn from_document(document: &'a Value) -> Result<Self, SchemaError> {
        let network = Cursor::root(document).field(NETWORK)?.first()?;
        let nodes = network
            .field(NODE)?
            .items()?
            .iter()
            .map(L2Node::from_cursor)
            .collect::<Result<Vec<_>, _>>()?;
        let links = network
            .field(LINK)?
            .items()?
            .iter()
            .map(L2Link::from_cursor)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { nodes, links })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_fixture() {
        let raw = include_str!("../../test_data/nsp_l2_topology.json");
        let document: Value = serde_json::from_str(raw).unwrap();
        let topology = L2Topology::from_document(&document).unwrap();

        assert_eq!(topology.nodes.len(), 3);
        assert_eq!(topology.links.len(), 2);
        assert_eq!(topology.nodes[1].node_id, "92.168.96.2");
        assert_eq!(topology.nodes[1].management_address, "192.168.96.2");
        assert_eq!(topology.links[0].name, "pe1:eth1--p1:eth1");
        assert_eq!(
            topology.links[0].name_path,
            "ietf-network:network[0].ietf-network-topology:link[0].ietf-l2-topology:l2-link-attributes.name"
        );
    }

    #[test]
    fn test_missing_node_name_reports_path() {
        let document = json!({
            "ietf-network:network": [{
                "node": [
                    {
                        "node-id": "1",
                        "ietf-l2-topology:l2-node-attributes": {"name": "a", "management-address": ["10.0.0.1"]}
                    },
                    {
                        "node-id": "2",
                        "ietf-l2-topology:l2-node-attributes": {"management-address": ["10.0.0.2"]}
                    }
                ],
                "ietf-network-topology:link": []
            }]
        });
        let err = L2Topology::from_document(&document).unwrap_err();
        assert_eq!(
            err.path,
            "ietf-network:network[0].node[1].ietf-l2-topology:l2-node-attributes.name"
        );
    }

    #[test]
    fn test_empty_management_address_is_error() {
        let document = json!({
            "ietf-network:network": [{
                "node": [{
                    "node-id": "1",
                    "ietf-l2-topology:l2-node-attributes": {"name": "a", "management-address": []}
                }],
                "ietf-network-topology:link": []
            }]
        });
        let err = L2Topology::from_document(&document).unwrap_err();
        assert_eq!(
            err.path,
            "ietf-network:network[0].node[0].ietf-l2-topology:l2-node-attributes.management-address[0]"
        );
        assert_eq!(err.expected, "a non-empty array");
    }

    #[test]
    fn test_only_first_management_address_is_typed() {
        let document = json!({
            "ietf-network:network": [{
                "node": [{
                    "node-id": "1",
                    "ietf-l2-topology:l2-node-attributes": {"name": "a", "management-address": ["10.0.0.1", 42]}
                }],
                "ietf-network-topology:link": []
            }]
        });
        let topology = L2Topology::from_document(&document).unwrap();
        assert_eq!(topology.nodes[0].management_address, "10.0.0.1");

        let document = json!({
            "ietf-network:network": [{
                "node": [{
                    "node-id": "1",
                    "ietf-l2-topology:l2-node-attributes": {"name": "a", "management-address": [42, "10.0.0.1"]}
                }],
                "ietf-network-topology:link": []
            }]
        });
        let err = L2Topology::from_document(&document).unwrap_err();
        assert_eq!(
            err.path,
            "ietf-network:network[0].node[0].ietf-l2-topology:l2-node-attributes.management-address[0]"
        );
        assert_eq!(err.expected, "a string");
    }

    #[test]
    fn test_missing_link_collection_is_error() {
        let document = json!({"ietf-network:network": [{"node": []}]});
        let err = L2Topology::from_document(&document).unwrap_err();
        assert_eq!(err.path, "ietf-network:network[0].ietf-network-topology:link");
    }

    #[test]
    fn test_wrong_types_are_errors() {
        let err = L2Topology::from_document(&json!({"ietf-network:network": []})).unwrap_err();
        assert_eq!(err.path, "ietf-network:network[0]");

        let err = L2Topology::from_document(&json!({"ietf-network:network": {"node": []}})).unwrap_err();
        assert_eq!(err.expected, "an array");

        let err = L2Topology::from_document(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path, "");
        assert_eq!(err.expected, "an object");
    }
}
