use std::collections::{BTreeMap, BTreeSet};

use super::graph::DisplayGraph;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegendEntry {
	pub count: usize,
	pub property_keys: BTreeSet<String>,
}

impl LegendEntry {
	pub fn property_keys(&self) -> Vec<String> {
		self.property_keys.iter().cloned().collect()
	}
}

/// Label and relationship-type counts for the legend, plus the order in
/// which each first appeared in the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	pub labels: BTreeMap<String, LegendEntry>,
	pub rel_types: BTreeMap<String, LegendEntry>,
	label_order: Vec<String>,
	rel_type_order: Vec<String>,
}

impl GraphStats {
	pub fn collect(graph: &DisplayGraph) -> Self {
		let mut stats = Self::default();
		for node in graph.nodes() {
			for label in &node.labels {
				let entry = stats.labels.entry(label.clone()).or_insert_with(|| {
					stats.label_order.push(label.clone());
					LegendEntry::default()
				});
				entry.count += 1;
				entry.property_keys.extend(node.properties.keys().cloned());
			}
		}
		for rel in graph.relationships() {
			let entry = stats.rel_types.entry(rel.rel_type.clone()).or_insert_with(|| {
				stats.rel_type_order.push(rel.rel_type.clone());
				LegendEntry::default()
			});
			entry.count += 1;
			entry.property_keys.extend(rel.properties.keys().cloned());
		}
		stats
	}

	/// Labels in the order they were first seen.
	pub fn labels_in_order(&self) -> impl Iterator<Item = &str> {
		self.label_order.iter().map(String::as_str)
	}

	pub fn rel_types_in_order(&self) -> impl Iterator<Item = &str> {
		self.rel_type_order.iter().map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::explorer::types::{GraphNode, GraphRelationship};

	#[test]
	fn counts_labels_and_types_in_first_seen_order() {
		let mut graph = DisplayGraph::new();
		graph.merge(
			vec![
				GraphNode::new("m1", ["Movie"]).with_property("title", "Heat"),
				GraphNode::new("p1", ["Person", "Actor"]).with_property("name", "Al"),
				GraphNode::new("p2", ["Person"]).with_property("born", 1940),
			],
			vec![
				GraphRelationship::new("r1", "ACTED_IN", "p1", "m1").with_property("roles", "Vincent"),
				GraphRelationship::new("r2", "KNOWS", "p1", "p2"),
			],
		);
		let stats = GraphStats::collect(&graph);

		assert_eq!(stats.labels["Person"].count, 2);
		assert_eq!(stats.labels["Person"].property_keys(), ["born", "name"]);
		assert_eq!(stats.labels["Movie"].count, 1);
		assert_eq!(stats.rel_types["ACTED_IN"].property_keys(), ["roles"]);
		let order: Vec<_> = stats.labels_in_order().collect();
		assert_eq!(order, ["Movie", "Actor", "Person"]);
		let types: Vec<_> = stats.rel_types_in_order().collect();
		assert_eq!(types, ["ACTED_IN", "KNOWS"]);
	}
}
