use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property bag carried by nodes and relationships.
pub type Properties = BTreeMap<String, Value>;

/// A node as returned by a query or a neighbour fetch. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
	pub id: String,
	#[serde(default)]
	pub labels: BTreeSet<String>,
	#[serde(default)]
	pub properties: Properties,
}

impl GraphNode {
	pub fn new<I, S>(id: impl Into<String>, labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			id: id.into(),
			labels: labels.into_iter().map(Into::into).collect(),
			properties: Properties::new(),
		}
	}

	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}
}

/// A relationship references its endpoints by id only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRelationship {
	pub id: String,
	#[serde(rename = "type")]
	pub rel_type: String,
	pub start_node_id: String,
	pub end_node_id: String,
	#[serde(default)]
	pub properties: Properties,
}

impl GraphRelationship {
	pub fn new(
		id: impl Into<String>,
		rel_type: impl Into<String>,
		start_node_id: impl Into<String>,
		end_node_id: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			rel_type: rel_type.into(),
			start_node_id: start_node_id.into(),
			end_node_id: end_node_id.into(),
			properties: Properties::new(),
		}
	}

	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	pub fn touches(&self, node_id: &str) -> bool {
		self.start_node_id == node_id || self.end_node_id == node_id
	}

	/// The endpoint on the other side of `node_id`, if `node_id` is an endpoint.
	pub fn other_end(&self, node_id: &str) -> Option<&str> {
		if self.start_node_id == node_id {
			Some(self.end_node_id.as_str())
		} else if self.end_node_id == node_id {
			Some(self.start_node_id.as_str())
		} else {
			None
		}
	}
}

/// Something on the canvas that can be hovered or selected.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphItem {
	Node(GraphNode),
	Relationship(GraphRelationship),
}

impl GraphItem {
	pub fn id(&self) -> &str {
		match self {
			GraphItem::Node(node) => &node.id,
			GraphItem::Relationship(rel) => &rel.id,
		}
	}

	pub fn properties(&self) -> &Properties {
		match self {
			GraphItem::Node(node) => &node.properties,
			GraphItem::Relationship(rel) => &rel.properties,
		}
	}
}

/// Payload produced by a neighbour fetch. `count` is the total number of
/// neighbours not in the exclude list, which may exceed `nodes.len()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighbourResult {
	pub nodes: Vec<GraphNode>,
	pub relationships: Vec<GraphRelationship>,
	#[serde(default)]
	pub count: usize,
}

impl NeighbourResult {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.relationships.is_empty()
	}
}
