//! The node/relationship set currently on screen.
//!
//! Nodes keep insertion order and are unique by id. The first copy of a node
//! ever seen wins: a later copy with the same id is discarded, even if its
//! properties differ. Relationships are unique by id as well. A relationship
//! is only admitted when both endpoints are displayed.

use std::collections::HashSet;

use log::{debug, warn};

use super::types::{GraphNode, GraphRelationship};

/// Keep the first node seen for each id, preserving order.
pub fn dedupe_nodes<I>(nodes: I) -> Vec<GraphNode>
where
	I: IntoIterator<Item = GraphNode>,
{
	let mut taken = HashSet::new();
	nodes
		.into_iter()
		.filter(|node| taken.insert(node.id.clone()))
		.collect()
}

/// Set when the initial result held more nodes than the display ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Truncation {
	pub displayed: usize,
	pub total: usize,
}

impl Truncation {
	pub fn message(&self) -> String {
		format!(
			"Not all return nodes are being displayed due to Initial Node Display setting. Only {} of {} nodes are being displayed.",
			self.displayed, self.total
		)
	}
}

/// What a merge actually changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeOutcome {
	pub added_nodes: Vec<GraphNode>,
	pub added_relationships: Vec<GraphRelationship>,
	/// Relationships discarded because an endpoint is not displayed.
	pub dropped_relationships: usize,
	/// New nodes left out because the neighbour budget was exhausted.
	pub capped_nodes: usize,
	/// Relationships skipped because they lead to a node left out by the cap.
	pub capped_relationships: usize,
}

impl MergeOutcome {
	pub fn is_empty(&self) -> bool {
		self.added_nodes.is_empty() && self.added_relationships.is_empty()
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayGraph {
	nodes: Vec<GraphNode>,
	relationships: Vec<GraphRelationship>,
	node_ids: HashSet<String>,
	relationship_ids: HashSet<String>,
}

impl DisplayGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build the initial view of a query result, honouring `initial_node_display`.
	pub fn from_query(
		nodes: Vec<GraphNode>,
		relationships: Vec<GraphRelationship>,
		initial_node_display: usize,
	) -> (Self, Option<Truncation>) {
		let mut nodes = dedupe_nodes(nodes);
		let total = nodes.len();
		let truncation = (total > initial_node_display).then(|| {
			nodes.truncate(initial_node_display);
			Truncation {
				displayed: nodes.len(),
				total,
			}
		});
		if let Some(t) = truncation {
			debug!("initial result truncated to {} of {} nodes", t.displayed, t.total);
		}

		let mut graph = Self::new();
		let outcome = graph.merge(nodes, relationships);
		if outcome.dropped_relationships > 0 && truncation.is_none() {
			warn!(
				"{} relationships reference nodes missing from the result",
				outcome.dropped_relationships
			);
		}
		(graph, truncation)
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn relationships(&self) -> &[GraphRelationship] {
		&self.relationships
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.node_ids.contains(id)
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	pub fn relationship(&self, id: &str) -> Option<&GraphRelationship> {
		self.relationships.iter().find(|rel| rel.id == id)
	}

	/// Ids of the displayed nodes adjacent to `node_id`, in first-seen order.
	pub fn neighbour_ids(&self, node_id: &str) -> Vec<String> {
		let mut seen = HashSet::new();
		self.relationships
			.iter()
			.filter_map(|rel| rel.other_end(node_id))
			.filter(|other| *other != node_id && seen.insert(other.to_string()))
			.map(str::to_string)
			.collect()
	}

	/// Union `nodes` and `relationships` into the graph without a node ceiling.
	pub fn merge(
		&mut self,
		nodes: Vec<GraphNode>,
		relationships: Vec<GraphRelationship>,
	) -> MergeOutcome {
		let mut outcome = MergeOutcome::default();
		for node in nodes {
			self.admit_node(node, &mut outcome);
		}
		for rel in relationships {
			self.admit_relationship(rel, &mut outcome);
		}
		outcome
	}

	/// Merge the neighbours fetched for `center`, leaving `center` with at
	/// most `max_neighbours` neighbours.
	///
	/// Candidates are taken in fetch order: the fetched nodes first, then
	/// displayed nodes reached only through a fetched relationship. A
	/// candidate that is already a neighbour is free. Any other candidate,
	/// displayed or not, uses one unit of budget. A displayed node that no
	/// fetched relationship links to `center` is not a candidate.
	/// Fetched relationships that would link `center` to a candidate left
	/// out, or that lead to an undisplayed node left out, are skipped and
	/// counted in `capped_relationships`.
	pub fn merge_expansion(
		&mut self,
		center: &str,
		nodes: Vec<GraphNode>,
		relationships: Vec<GraphRelationship>,
		max_neighbours: usize,
	) -> MergeOutcome {
		let current: HashSet<String> = self.neighbour_ids(center).into_iter().collect();
		let far_ends: Vec<String> = relationships
			.iter()
			.filter(|rel| rel.touches(center))
			.filter_map(|rel| rel.other_end(center))
			.filter(|other| *other != center)
			.map(str::to_string)
			.collect();
		let linked: HashSet<&str> = far_ends.iter().map(String::as_str).collect();

		let candidates = nodes
			.iter()
			.map(|node| node.id.as_str())
			.filter(|id| !self.contains_node(id) || linked.contains(id))
			.chain(
				far_ends
					.iter()
					.map(String::as_str)
					.filter(|id| self.contains_node(id)),
			);
		let budget = max_neighbours.saturating_sub(current.len());
		let mut admitted: HashSet<String> = HashSet::new();
		let mut capped: HashSet<String> = HashSet::new();
		for id in candidates {
			if id == center || current.contains(id) || admitted.contains(id) || capped.contains(id) {
				continue;
			}
			if admitted.len() < budget {
				admitted.insert(id.to_string());
			} else {
				capped.insert(id.to_string());
			}
		}

		let mut outcome = MergeOutcome::default();
		for node in nodes {
			if capped.contains(&node.id) {
				if !self.contains_node(&node.id) {
					outcome.capped_nodes += 1;
				}
				continue;
			}
			self.admit_node(node, &mut outcome);
		}
		for rel in relationships {
			let over_cap = if rel.touches(center) {
				rel.other_end(center).is_some_and(|other| capped.contains(other))
			} else {
				[&rel.start_node_id, &rel.end_node_id]
					.into_iter()
					.any(|id| capped.contains(id) && !self.contains_node(id))
			};
			if over_cap && !self.relationship_ids.contains(&rel.id) {
				outcome.capped_relationships += 1;
				continue;
			}
			self.admit_relationship(rel, &mut outcome);
		}
		outcome
	}

	fn admit_node(&mut self, node: GraphNode, outcome: &mut MergeOutcome) {
		if !self.node_ids.insert(node.id.clone()) {
			return;
		}
		self.nodes.push(node.clone());
		outcome.added_nodes.push(node);
	}

	fn admit_relationship(&mut self, rel: GraphRelationship, outcome: &mut MergeOutcome) {
		if self.relationship_ids.contains(&rel.id) {
			return;
		}
		if !self.node_ids.contains(&rel.start_node_id) || !self.node_ids.contains(&rel.end_node_id) {
			outcome.dropped_relationships += 1;
			return;
		}
		self.relationship_ids.insert(rel.id.clone());
		self.relationships.push(rel.clone());
		outcome.added_relationships.push(rel);
	}
}
