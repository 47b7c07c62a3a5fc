use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::error::Result;
use super::types::{GraphNode, GraphRelationship, NeighbourResult};

/// Source of a node's adjacent nodes and relationships.
///
/// Implementations return every neighbour not listed in `exclude_ids`.
/// `count` reports how many such neighbours exist in total.
#[async_trait(?Send)]
pub trait NeighbourFetcher {
	async fn fetch(&self, node_id: &str, exclude_ids: &[String]) -> Result<NeighbourResult>;
}

/// Fetcher handle shared between the explorer and its pending expansions.
pub type SharedFetcher = Arc<dyn NeighbourFetcher + Send + Sync>;

/// Answers neighbour requests from a graph held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryNeighbourFetcher {
	nodes: Vec<GraphNode>,
	relationships: Vec<GraphRelationship>,
}

impl InMemoryNeighbourFetcher {
	pub fn new(nodes: Vec<GraphNode>, relationships: Vec<GraphRelationship>) -> Self {
		Self {
			nodes,
			relationships,
		}
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	pub fn neighbours_of(&self, node_id: &str, exclude_ids: &[String]) -> NeighbourResult {
		let excluded: HashSet<&str> = exclude_ids.iter().map(String::as_str).collect();
		let mut seen = HashSet::new();
		let mut relationships = Vec::new();
		for rel in &self.relationships {
			let Some(other) = rel.other_end(node_id) else {
				continue;
			};
			if other == node_id || excluded.contains(other) {
				continue;
			}
			seen.insert(other);
			relationships.push(rel.clone());
		}
		let nodes: Vec<GraphNode> = self
			.nodes
			.iter()
			.filter(|node| seen.contains(node.id.as_str()))
			.cloned()
			.collect();
		debug!("{} neighbours of {} outside the exclude list", nodes.len(), node_id);
		NeighbourResult {
			count: nodes.len(),
			nodes,
			relationships,
		}
	}
}

#[async_trait(?Send)]
impl NeighbourFetcher for InMemoryNeighbourFetcher {
	async fn fetch(&self, node_id: &str, exclude_ids: &[String]) -> Result<NeighbourResult> {
		Ok(self.neighbours_of(node_id, exclude_ids))
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;

	fn fetcher() -> InMemoryNeighbourFetcher {
		InMemoryNeighbourFetcher::new(
			vec![
				GraphNode::new("a", ["Person"]),
				GraphNode::new("b", ["Person"]),
				GraphNode::new("c", ["Movie"]),
				GraphNode::new("d", ["Movie"]),
			],
			vec![
				GraphRelationship::new("r1", "KNOWS", "a", "b"),
				GraphRelationship::new("r2", "ACTED_IN", "a", "c"),
				GraphRelationship::new("r3", "DIRECTED", "d", "a"),
				GraphRelationship::new("r4", "ACTED_IN", "b", "c"),
			],
		)
	}

	#[test]
	fn fetch_returns_neighbours_in_both_directions() {
		let result = block_on(fetcher().fetch("a", &[])).unwrap();
		let ids: Vec<_> = result.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["b", "c", "d"]);
		assert_eq!(result.count, 3);
		assert_eq!(result.relationships.len(), 3);
	}

	#[test]
	fn self_loops_are_not_neighbours() {
		let mut db = fetcher();
		db.relationships
			.push(GraphRelationship::new("loop", "KNOWS", "a", "a"));
		let result = block_on(db.fetch("a", &[])).unwrap();
		assert_eq!(result.count, 3);
		assert!(result.nodes.iter().all(|n| n.id != "a"));
		assert!(result.relationships.iter().all(|r| r.id != "loop"));
	}

	#[test]
	fn fetch_skips_excluded_ids() {
		let result = block_on(fetcher().fetch("a", &["b".to_string()])).unwrap();
		let ids: Vec<_> = result.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["c", "d"]);
		assert!(result.relationships.iter().all(|r| !r.touches("b")));
	}
}
