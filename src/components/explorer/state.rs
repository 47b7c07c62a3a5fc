use log::{debug, info, warn};

use super::config::ExplorerConfig;
use super::error::Result;
use super::fetcher::NeighbourFetcher;
use super::graph::{DisplayGraph, MergeOutcome};
use super::selection::{LegendItem, SelectionCursor};
use super::stats::GraphStats;
use super::style::{GraphStyle, StyleSheet};
use super::types::{GraphItem, GraphNode, GraphRelationship, NeighbourResult};

/// Where the legend reads its colours from.
///
/// After a style reset the legend must see the defaults before the graph
/// assigns palette colours. `PendingReset` holds that window open until
/// [`GraphViewState::complete_style_reset`] runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendPhase {
	#[default]
	Live,
	PendingReset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleReload {
	/// The payload equals the previous one.
	Unchanged,
	/// A payload was rebased over the defaults. Carries the new version.
	Applied(u64),
	/// The payload was cleared. Call `complete_style_reset` next.
	PendingReset,
}

/// A neighbour expansion that passed the saturation check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionRequest {
	pub seq: u64,
	pub node_id: String,
	pub current_neighbour_ids: Vec<String>,
}

/// What the inspector pane should show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inspected<'a> {
	Hovered(&'a GraphItem),
	Selected(&'a SelectionCursor),
}

/// What renderers receive. They re-render when `style_version` or the
/// node/relationship identities change.
#[derive(Clone, Copy, Debug)]
pub struct RenderSnapshot<'a> {
	pub nodes: &'a [GraphNode],
	pub relationships: &'a [GraphRelationship],
	pub graph_style: &'a GraphStyle,
	pub style_version: u64,
}

/// View-model behind the explorer: the displayed graph, the selection and
/// hover cursors, and the active style.
#[derive(Clone, Debug)]
pub struct GraphViewState {
	config: ExplorerConfig,
	graph: DisplayGraph,
	stats: GraphStats,
	selected: SelectionCursor,
	hovered: Option<GraphItem>,
	style: GraphStyle,
	style_payload: Option<StyleSheet>,
	style_version: u64,
	legend_phase: LegendPhase,
	issued_expansions: u64,
}

impl GraphViewState {
	pub fn new(
		nodes: Vec<GraphNode>,
		relationships: Vec<GraphRelationship>,
		config: ExplorerConfig,
		style_payload: Option<StyleSheet>,
	) -> Self {
		let style_payload = style_payload.filter(|sheet| !sheet.is_empty());
		let style = match &style_payload {
			Some(payload) => GraphStyle::rebased(payload),
			None => GraphStyle::default(),
		};
		let mut state = Self {
			config,
			graph: DisplayGraph::new(),
			stats: GraphStats::default(),
			selected: SelectionCursor::Empty,
			hovered: None,
			style,
			style_payload,
			style_version: 0,
			legend_phase: LegendPhase::Live,
			issued_expansions: 0,
		};
		state.load(nodes, relationships);
		state.assign_graph_colors();
		state
	}

	/// Replace the displayed graph with a fresh query result.
	pub fn reload(&mut self, nodes: Vec<GraphNode>, relationships: Vec<GraphRelationship>) {
		self.load(nodes, relationships);
		if self.assign_graph_colors() {
			self.style_version += 1;
		}
	}

	fn load(&mut self, nodes: Vec<GraphNode>, relationships: Vec<GraphRelationship>) {
		let (graph, truncation) =
			DisplayGraph::from_query(nodes, relationships, self.config.initial_node_display);
		self.graph = graph;
		self.hovered = None;
		self.selected = match truncation {
			Some(truncation) => {
				info!("{}", truncation.message());
				SelectionCursor::Status(truncation.message())
			}
			None => SelectionCursor::Empty,
		};
		self.stats = GraphStats::collect(&self.graph);
	}

	fn assign_graph_colors(&mut self) -> bool {
		match self.style.with_assigned_colors(self.stats.labels_in_order()) {
			Some(style) => {
				self.style = style;
				true
			}
			None => false,
		}
	}

	pub fn config(&self) -> &ExplorerConfig {
		&self.config
	}

	pub fn graph(&self) -> &DisplayGraph {
		&self.graph
	}

	pub fn stats(&self) -> &GraphStats {
		&self.stats
	}

	pub fn selected(&self) -> &SelectionCursor {
		&self.selected
	}

	pub fn hovered(&self) -> Option<&GraphItem> {
		self.hovered.as_ref()
	}

	/// The hovered item wins over the selection in the inspector.
	pub fn inspected(&self) -> Inspected<'_> {
		match &self.hovered {
			Some(item) => Inspected::Hovered(item),
			None => Inspected::Selected(&self.selected),
		}
	}

	pub fn style(&self) -> &GraphStyle {
		&self.style
	}

	pub fn style_version(&self) -> u64 {
		self.style_version
	}

	pub fn legend_phase(&self) -> LegendPhase {
		self.legend_phase
	}

	/// Style the legend should read. During a pending reset this is a fresh
	/// default instance rather than the live style.
	pub fn legend_style(&self) -> GraphStyle {
		match self.legend_phase {
			LegendPhase::Live => self.style.clone(),
			LegendPhase::PendingReset => GraphStyle::default(),
		}
	}

	pub fn render_snapshot(&self) -> RenderSnapshot<'_> {
		RenderSnapshot {
			nodes: self.graph.nodes(),
			relationships: self.graph.relationships(),
			graph_style: &self.style,
			style_version: self.style_version,
		}
	}

	pub fn neighbour_ids(&self, node_id: &str) -> Vec<String> {
		self.graph.neighbour_ids(node_id)
	}

	/// Register an expansion of `node`. Returns `None` without fetching when
	/// the neighbourhood already exceeds `max_neighbours`.
	pub fn begin_expansion(
		&mut self,
		node_id: &str,
		current_neighbour_ids: Vec<String>,
	) -> Option<ExpansionRequest> {
		if current_neighbour_ids.len() > self.config.max_neighbours {
			debug!(
				"not expanding {}: {} neighbours already exceed the limit of {}",
				node_id,
				current_neighbour_ids.len(),
				self.config.max_neighbours
			);
			return None;
		}
		let seq = self.issued_expansions;
		self.issued_expansions += 1;
		Some(ExpansionRequest {
			seq,
			node_id: node_id.to_string(),
			current_neighbour_ids,
		})
	}

	/// Settle a fetch started for `request`. The fetched neighbours are
	/// returned in full; the neighbour cap is only reported here and
	/// enforced by [`merge_neighbours`](Self::merge_neighbours).
	pub fn finish_expansion(
		&mut self,
		request: &ExpansionRequest,
		outcome: Result<NeighbourResult>,
	) -> NeighbourResult {
		let result = match outcome {
			Ok(result) => result,
			Err(err) => {
				warn!("expanding {} failed: {}", request.node_id, err);
				return NeighbourResult::empty();
			}
		};
		if request.seq + 1 != self.issued_expansions {
			debug!(
				"applying expansion {} of {} after a newer request was issued",
				request.seq, request.node_id
			);
		}

		let current = request.current_neighbour_ids.len();
		let max = self.config.max_neighbours;
		if result.count > max.saturating_sub(current) {
			self.selected = SelectionCursor::Status(format!(
				"Rendering was limited to {} of the node's total {} neighbours due to browser config maxNeighbours.",
				max,
				result.count + current
			));
		}
		result
	}

	/// Fetch the neighbours of `node`, excluding `current_neighbour_ids`.
	pub async fn expand<F>(
		&mut self,
		fetcher: &F,
		node: &GraphNode,
		current_neighbour_ids: &[String],
	) -> NeighbourResult
	where
		F: NeighbourFetcher + ?Sized,
	{
		let Some(request) = self.begin_expansion(&node.id, current_neighbour_ids.to_vec()) else {
			return NeighbourResult::empty();
		};
		let outcome = fetcher
			.fetch(&request.node_id, &request.current_neighbour_ids)
			.await;
		self.finish_expansion(&request, outcome)
	}

	/// Merge an expansion result for `node_id`, leaving it with at most
	/// `max_neighbours` neighbours.
	pub fn merge_neighbours(&mut self, node_id: &str, result: NeighbourResult) -> MergeOutcome {
		let outcome = self.graph.merge_expansion(
			node_id,
			result.nodes,
			result.relationships,
			self.config.max_neighbours,
		);
		if outcome.capped_nodes > 0 || outcome.capped_relationships > 0 {
			debug!(
				"maxNeighbours left out {} fetched nodes and {} relationships of {}",
				outcome.capped_nodes, outcome.capped_relationships, node_id
			);
		}
		if outcome.dropped_relationships > 0 {
			warn!(
				"{} fetched relationships point outside the displayed graph",
				outcome.dropped_relationships
			);
		}
		if !outcome.is_empty() {
			self.on_graph_model_change();
		}
		outcome
	}

	/// Recount the legend and colour any new labels. Returns the sheet to
	/// hand to the style persistence callback.
	pub fn on_graph_model_change(&mut self) -> StyleSheet {
		self.stats = GraphStats::collect(&self.graph);
		if self.legend_phase == LegendPhase::Live && self.assign_graph_colors() {
			self.style_version += 1;
		}
		self.style.to_sheet()
	}

	pub fn on_item_hover(&mut self, item: Option<GraphItem>) {
		self.hovered = item;
	}

	pub fn on_item_select(&mut self, cursor: SelectionCursor) {
		self.selected = cursor;
	}

	/// Select the displayed node or relationship with `id`, or clear the
	/// selection when nothing matches.
	pub fn select_item(&mut self, id: Option<&str>) {
		let item = id.and_then(|id| self.item(id));
		self.on_item_select(item.map_or(SelectionCursor::Empty, SelectionCursor::GraphItem));
	}

	pub fn hover_item(&mut self, id: Option<&str>) {
		let item = id.and_then(|id| self.item(id));
		self.on_item_hover(item);
	}

	fn item(&self, id: &str) -> Option<GraphItem> {
		self.graph
			.node(id)
			.cloned()
			.map(GraphItem::Node)
			.or_else(|| self.graph.relationship(id).cloned().map(GraphItem::Relationship))
	}

	pub fn on_label_selected(&mut self, label: &str, property_keys: Vec<String>) {
		self.selected = SelectionCursor::Legend(LegendItem::label(label, property_keys));
	}

	pub fn on_rel_type_selected(&mut self, rel_type: &str, property_keys: Vec<String>) {
		self.selected = SelectionCursor::Legend(LegendItem::rel_type(rel_type, property_keys));
	}

	/// React to a new persisted style payload. An empty sheet counts as absent.
	pub fn on_style_payload_changed(&mut self, payload: Option<StyleSheet>) -> StyleReload {
		let payload = payload.filter(|sheet| !sheet.is_empty());
		if payload == self.style_payload {
			return StyleReload::Unchanged;
		}
		self.style_payload = payload;

		match &self.style_payload {
			Some(payload) => {
				let rebased = GraphStyle::rebased(payload);
				self.style = rebased
					.with_assigned_colors(self.stats.labels_in_order())
					.unwrap_or(rebased);
				self.legend_phase = LegendPhase::Live;
				self.style_version += 1;
				info!("style reloaded, version {}", self.style_version);
				StyleReload::Applied(self.style_version)
			}
			None => {
				self.style = GraphStyle::default();
				self.legend_phase = LegendPhase::PendingReset;
				info!("style reset to defaults");
				StyleReload::PendingReset
			}
		}
	}

	/// Second step of a reset: colour the graph from the defaults in graph
	/// order and release the legend. Returns the sheet to persist, or `None`
	/// when no reset is pending.
	pub fn complete_style_reset(&mut self) -> Option<StyleSheet> {
		if self.legend_phase != LegendPhase::PendingReset {
			return None;
		}
		self.assign_graph_colors();
		self.legend_phase = LegendPhase::Live;
		self.style_version += 1;
		Some(self.style.to_sheet())
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use async_trait::async_trait;
	use futures::executor::block_on;

	use super::*;
	use crate::components::explorer::error::ExplorerError;
	use crate::components::explorer::style::label_selector;

	struct ScriptedFetcher {
		response: Option<NeighbourResult>,
		calls: Cell<usize>,
	}

	impl ScriptedFetcher {
		fn answering(response: NeighbourResult) -> Self {
			Self {
				response: Some(response),
				calls: Cell::new(0),
			}
		}

		fn failing() -> Self {
			Self {
				response: None,
				calls: Cell::new(0),
			}
		}
	}

	#[async_trait(?Send)]
	impl NeighbourFetcher for ScriptedFetcher {
		async fn fetch(&self, _node_id: &str, _exclude_ids: &[String]) -> Result<NeighbourResult> {
			self.calls.set(self.calls.get() + 1);
			self.response
				.clone()
				.ok_or_else(|| ExplorerError::Fetch("connection refused".into()))
		}
	}

	fn person(id: &str) -> GraphNode {
		GraphNode::new(id, ["Person"]).with_property("name", id)
	}

	fn knows(id: &str, start: &str, end: &str) -> GraphRelationship {
		GraphRelationship::new(id, "KNOWS", start, end)
	}

	fn config(initial_node_display: usize, max_neighbours: usize) -> ExplorerConfig {
		ExplorerConfig {
			initial_node_display,
			max_neighbours,
		}
	}

	fn ids(n: usize) -> Vec<String> {
		(0..n).map(|i| format!("n{i}")).collect()
	}

	fn neighbours(count: usize, returned: usize) -> NeighbourResult {
		NeighbourResult {
			nodes: (0..returned).map(|i| person(&format!("x{i}"))).collect(),
			relationships: (0..returned)
				.map(|i| knows(&format!("rx{i}"), "hub", &format!("x{i}")))
				.collect(),
			count,
		}
	}

	#[test]
	fn duplicate_input_nodes_keep_first_seen_properties() {
		let state = GraphViewState::new(
			vec![
				person("a").with_property("age", 1),
				person("b"),
				person("a").with_property("age", 2),
			],
			vec![],
			config(10, 10),
			None,
		);
		assert_eq!(state.graph().node_count(), 2);
		assert_eq!(state.graph().node("a").unwrap().properties["age"], 1);
		assert!(state.selected().is_empty());
	}

	#[test]
	fn truncated_result_reports_displayed_and_total_counts() {
		let nodes = (0..5).map(|i| person(&format!("p{i}"))).collect();
		let state = GraphViewState::new(nodes, vec![], config(3, 10), None);
		assert_eq!(state.graph().node_count(), 3);
		let message = state.selected().status_message().unwrap();
		assert!(message.contains("Only 3 of 5 nodes"), "{message}");
	}

	#[test]
	fn saturated_neighbourhood_is_never_fetched() {
		let mut state = GraphViewState::new(vec![person("hub")], vec![], config(10, 5), None);
		let fetcher = ScriptedFetcher::answering(neighbours(3, 3));
		let result = block_on(state.expand(&fetcher, &person("hub"), &ids(6)));
		assert!(result.is_empty());
		assert_eq!(fetcher.calls.get(), 0);
	}

	#[test]
	fn neighbourhood_at_the_limit_is_still_fetched() {
		let mut state = GraphViewState::new(vec![person("hub")], vec![], config(10, 5), None);
		let fetcher = ScriptedFetcher::answering(neighbours(0, 0));
		block_on(state.expand(&fetcher, &person("hub"), &ids(5)));
		assert_eq!(fetcher.calls.get(), 1);
	}

	#[test]
	fn over_budget_fetch_sets_limit_message_and_returns_everything() {
		let mut state = GraphViewState::new(vec![person("hub")], vec![], config(10, 30), None);
		let fetcher = ScriptedFetcher::answering(neighbours(50, 50));
		let result = block_on(state.expand(&fetcher, &person("hub"), &ids(10)));
		assert_eq!(result.nodes.len(), 50);
		assert_eq!(
			state.selected().status_message(),
			Some(
				"Rendering was limited to 30 of the node's total 60 neighbours due to browser config maxNeighbours."
			)
		);
	}

	#[test]
	fn within_budget_fetch_leaves_cursor_alone() {
		let mut state = GraphViewState::new(vec![person("hub")], vec![], config(10, 30), None);
		state.select_item(Some("hub"));
		let fetcher = ScriptedFetcher::answering(neighbours(20, 20));
		block_on(state.expand(&fetcher, &person("hub"), &ids(10)));
		assert!(matches!(state.selected(), SelectionCursor::GraphItem(GraphItem::Node(n)) if n.id == "hub"));
	}

	#[test]
	fn failed_fetch_resolves_empty_and_keeps_cursor() {
		let mut state = GraphViewState::new(vec![person("hub")], vec![], config(10, 30), None);
		state.on_label_selected("Person", vec!["name".into()]);
		let before = state.selected().clone();
		let fetcher = ScriptedFetcher::failing();
		let result = block_on(state.expand(&fetcher, &person("hub"), &[]));
		assert_eq!(fetcher.calls.get(), 1);
		assert!(result.nodes.is_empty() && result.relationships.is_empty());
		assert_eq!(state.selected(), &before);
	}

	#[test]
	fn merge_enforces_the_neighbour_cap() {
		let nodes = std::iter::once(person("hub"))
			.chain((0..25).map(|i| person(&format!("n{i}"))))
			.collect();
		let rels = (0..25)
			.map(|i| knows(&format!("rn{i}"), "hub", &format!("n{i}")))
			.collect();
		let mut state = GraphViewState::new(nodes, rels, config(100, 30), None);
		let outcome = state.merge_neighbours("hub", neighbours(50, 50));
		assert_eq!(outcome.added_nodes.len(), 5);
		assert_eq!(outcome.capped_nodes, 45);
		assert_eq!(outcome.capped_relationships, 45);
		assert_eq!(outcome.dropped_relationships, 0);
		assert_eq!(outcome.added_relationships.len(), 5);
		assert_eq!(state.neighbour_ids("hub").len(), 30);
		assert_eq!(state.stats().labels["Person"].count, 31);
	}

	#[test]
	fn displayed_node_joining_the_neighbourhood_uses_budget() {
		let mut state =
			GraphViewState::new(vec![person("hub"), person("x")], vec![], config(10, 2), None);
		state.merge_neighbours("hub", NeighbourResult {
			nodes: vec![person("x"), person("y"), person("z")],
			relationships: vec![
				knows("r1", "hub", "x"),
				knows("r2", "hub", "y"),
				knows("r3", "hub", "z"),
			],
			count: 3,
		});
		assert_eq!(state.neighbour_ids("hub"), ["x", "y"]);
	}

	#[test]
	fn stale_expansions_are_still_applied() {
		let mut state = GraphViewState::new(vec![person("hub")], vec![], config(10, 30), None);
		let first = state.begin_expansion("hub", vec![]).unwrap();
		let second = state.begin_expansion("hub", vec![]).unwrap();
		assert!(second.seq > first.seq);
		let result = state.finish_expansion(&first, Ok(neighbours(2, 2)));
		assert_eq!(result.nodes.len(), 2);
	}

	#[test]
	fn expansion_ids_come_from_displayed_relationships() {
		let state = GraphViewState::new(
			vec![person("hub"), person("a"), person("b")],
			vec![knows("r1", "hub", "a"), knows("r2", "b", "hub")],
			config(10, 10),
			None,
		);
		assert_eq!(state.neighbour_ids("hub"), ["a", "b"]);
	}

	#[test]
	fn select_fully_replaces_prior_cursor() {
		let nodes = (0..5).map(|i| person(&format!("p{i}"))).collect();
		let mut state = GraphViewState::new(nodes, vec![], config(3, 10), None);
		assert!(state.selected().status_message().is_some());

		let item = SelectionCursor::GraphItem(GraphItem::Node(person("p1")));
		state.on_item_select(item.clone());
		assert_eq!(state.selected(), &item);
		state.on_item_select(item.clone());
		assert_eq!(state.selected(), &item);

		state.select_item(None);
		assert!(state.selected().is_empty());
	}

	#[test]
	fn hover_does_not_touch_selection() {
		let mut state = GraphViewState::new(
			vec![person("a"), person("b")],
			vec![knows("r1", "a", "b")],
			config(10, 10),
			None,
		);
		state.select_item(Some("a"));
		state.hover_item(Some("r1"));
		assert!(matches!(state.hovered(), Some(GraphItem::Relationship(r)) if r.id == "r1"));
		assert!(matches!(state.inspected(), Inspected::Hovered(GraphItem::Relationship(_))));
		assert!(matches!(state.selected(), SelectionCursor::GraphItem(GraphItem::Node(_))));

		state.hover_item(None);
		assert!(matches!(state.inspected(), Inspected::Selected(SelectionCursor::GraphItem(_))));
	}

	#[test]
	fn legend_selection_carries_exactly_one_side() {
		let mut state = GraphViewState::new(vec![person("a")], vec![], config(10, 10), None);
		state.on_rel_type_selected("KNOWS", vec!["since".into()]);
		let SelectionCursor::Legend(item) = state.selected() else {
			panic!("expected a legend cursor");
		};
		assert!(item.selected_label.is_none());
		assert_eq!(item.selected_rel_type.as_ref().unwrap().rel_type, "KNOWS");

		state.on_label_selected("Person", vec![]);
		let SelectionCursor::Legend(item) = state.selected() else {
			panic!("expected a legend cursor");
		};
		assert!(item.selected_rel_type.is_none());
		assert_eq!(item.selected_label.as_ref().unwrap().label, "Person");
	}

	#[test]
	fn reload_resets_the_cursor() {
		let mut state = GraphViewState::new(vec![person("a")], vec![], config(10, 10), None);
		state.select_item(Some("a"));
		state.hover_item(Some("a"));
		state.reload(vec![person("b")], vec![]);
		assert!(state.selected().is_empty());
		assert!(state.hovered().is_none());
		assert!(state.graph().contains_node("b"));
	}

	#[test]
	fn style_payload_bumps_version_and_overrides_defaults() {
		let mut state = GraphViewState::new(vec![person("a")], vec![], config(10, 10), None);
		let version = state.style_version();
		let payload = StyleSheet::from_json(r##"{"node.Person": {"color": "#000000"}}"##).unwrap();

		assert_eq!(
			state.on_style_payload_changed(Some(payload.clone())),
			StyleReload::Applied(version + 1)
		);
		let labels = &state.graph().node("a").unwrap().labels;
		assert_eq!(state.style().for_node(labels).get("color"), Some("#000000"));
		assert_eq!(state.style().for_node(labels).get("diameter"), Some("50px"));

		assert_eq!(state.on_style_payload_changed(Some(payload)), StyleReload::Unchanged);
		assert_eq!(state.style_version(), version + 1);
	}

	#[test]
	fn clearing_the_payload_restores_defaults_in_two_steps() {
		let payload = StyleSheet::from_json(r##"{"node": {"color": "#000000"}}"##).unwrap();
		let mut state = GraphViewState::new(
			vec![person("a"), GraphNode::new("m", ["Movie"])],
			vec![],
			config(10, 10),
			Some(payload),
		);
		let version = state.style_version();

		assert_eq!(state.on_style_payload_changed(None), StyleReload::PendingReset);
		assert_eq!(state.legend_phase(), LegendPhase::PendingReset);
		assert_eq!(state.style().to_sheet(), GraphStyle::default().to_sheet());
		assert_eq!(state.legend_style(), GraphStyle::default());
		assert_eq!(state.style_version(), version);

		let persisted = state.complete_style_reset().unwrap();
		assert_eq!(state.legend_phase(), LegendPhase::Live);
		assert_eq!(state.style_version(), version + 1);
		let expected = GraphStyle::default()
			.with_assigned_colors(["Person", "Movie"])
			.unwrap()
			.to_sheet();
		assert_eq!(persisted, expected);
		assert!(persisted.rule(&label_selector("Movie")).is_some());
		assert_eq!(state.complete_style_reset(), None);
	}

	#[test]
	fn empty_sheet_counts_as_absent_payload() {
		let mut state = GraphViewState::new(vec![person("a")], vec![], config(10, 10), None);
		assert_eq!(
			state.on_style_payload_changed(Some(StyleSheet::default())),
			StyleReload::Unchanged
		);
	}

	#[test]
	fn render_snapshot_tracks_style_version() {
		let mut state = GraphViewState::new(vec![person("a")], vec![], config(10, 10), None);
		let before = state.render_snapshot().style_version;
		state.merge_neighbours("a", NeighbourResult {
			nodes: vec![GraphNode::new("m", ["Movie"])],
			relationships: vec![],
			count: 1,
		});
		let snapshot = state.render_snapshot();
		assert_eq!(snapshot.nodes.len(), 2);
		assert_eq!(snapshot.style_version, before + 1);
		assert!(snapshot.graph_style.sheet().rule("node.Movie").is_some());
	}
}
