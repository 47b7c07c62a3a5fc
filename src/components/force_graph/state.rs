use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use crate::components::explorer::state::RenderSnapshot;
use crate::components::explorer::style::GraphStyle;
use crate::components::explorer::types::{GraphNode, GraphRelationship};

/// Style diameters are in CSS pixels; the simulation works at a fifth of that.
const DIAMETER_SCALE: f64 = 0.2;
const DEFAULT_RADIUS: f64 = 5.0;
const HIT_PADDING: f64 = 7.0;
const EDGE_HIT_DISTANCE: f64 = 4.0;
/// Pointer travel, in screen pixels, below which a press counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub caption: String,
	pub color: String,
	pub border_color: String,
	pub radius: f64,
}

impl NodeInfo {
	fn styled(node: &GraphNode, style: &GraphStyle) -> Self {
		let rule = style.for_node(&node.labels);
		Self {
			id: node.id.clone(),
			caption: style.node_caption(node),
			color: rule.get("color").unwrap_or("#A5ABB6").to_string(),
			border_color: rule.get("border-color").unwrap_or("#9AA1AC").to_string(),
			radius: rule
				.get_px("diameter")
				.map_or(DEFAULT_RADIUS, |d| d / 2.0 * DIAMETER_SCALE),
		}
	}
}

#[derive(Clone, Debug)]
pub struct CanvasEdge {
	pub id: String,
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub caption: String,
	pub color: String,
}

impl CanvasEdge {
	fn restyle(&mut self, rel: &GraphRelationship, style: &GraphStyle) {
		self.caption = style.relationship_caption(rel);
		self.color = style
			.for_relationship(&rel.rel_type)
			.get("color")
			.unwrap_or("#A5ABB6")
			.to_string();
	}
}

/// What the pointer is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanvasHit {
	Node(String),
	Relationship(String),
}

impl CanvasHit {
	pub fn id(&self) -> &str {
		match self {
			CanvasHit::Node(id) | CanvasHit::Relationship(id) => id,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Press position used to tell clicks from drags.
#[derive(Clone, Debug, Default)]
pub struct PressState {
	pub x: f64,
	pub y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub edge: Option<String>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	/// Last item reported to the explorer, so hover events fire on change only.
	pub reported: Option<CanvasHit>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<CanvasEdge>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub press: PressState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	edge_ids: HashSet<String>,
	style_version: u64,
}

impl ForceGraphState {
	pub fn new(snapshot: &RenderSnapshot<'_>, width: f64, height: f64) -> Self {
		let graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut state = Self {
			graph,
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			press: PressState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			id_to_idx: HashMap::new(),
			edge_ids: HashSet::new(),
			style_version: snapshot.style_version,
		};

		let count = snapshot.nodes.len().max(1) as f64;
		for (i, node) in snapshot.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let (x, y) = (100.0 * angle.cos(), 100.0 * angle.sin());
			state.add_node(node, snapshot.graph_style, x as f32, y as f32);
		}
		for rel in snapshot.relationships {
			state.add_edge(rel, snapshot.graph_style);
		}
		state
	}

	fn add_node(&mut self, node: &GraphNode, style: &GraphStyle, x: f32, y: f32) {
		let idx = self.graph.add_node(NodeData {
			x,
			y,
			mass: 10.0,
			is_anchor: false,
			user_data: NodeInfo::styled(node, style),
		});
		self.id_to_idx.insert(node.id.clone(), idx);
	}

	fn add_edge(&mut self, rel: &GraphRelationship, style: &GraphStyle) {
		let (Some(&source), Some(&target)) = (
			self.id_to_idx.get(&rel.start_node_id),
			self.id_to_idx.get(&rel.end_node_id),
		) else {
			return;
		};
		self.graph.add_edge(source, target, EdgeData::default());
		self.edge_ids.insert(rel.id.clone());
		let mut edge = CanvasEdge {
			id: rel.id.clone(),
			source,
			target,
			caption: String::new(),
			color: String::new(),
		};
		edge.restyle(rel, style);
		self.edges.push(edge);
	}

	fn position_of(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	/// Bring the canvas in line with `snapshot`: add nodes and relationships
	/// it has not seen, rebuild when any drawn item is gone and restyle
	/// everything when the style version moved. Returns `true` if anything
	/// changed.
	pub fn sync(&mut self, snapshot: &RenderSnapshot<'_>) -> bool {
		if self.has_stale_items(snapshot) {
			self.rebuild(snapshot);
			return true;
		}
		let fresh: Vec<&GraphNode> = snapshot
			.nodes
			.iter()
			.filter(|node| !self.id_to_idx.contains_key(&node.id))
			.collect();
		let fresh_count = fresh.len();

		for (i, node) in fresh.into_iter().enumerate() {
			// Place new nodes in a ring around a displayed neighbour.
			let anchor = snapshot
				.relationships
				.iter()
				.filter_map(|rel| rel.other_end(&node.id))
				.find_map(|other| self.id_to_idx.get(other).copied())
				.and_then(|idx| self.position_of(idx))
				.unwrap_or((0.0, 0.0));
			let angle = (i as f64) * 2.0 * PI / fresh_count as f64;
			let (x, y) = (
				anchor.0 as f64 + 40.0 * angle.cos(),
				anchor.1 as f64 + 40.0 * angle.sin(),
			);
			self.add_node(node, snapshot.graph_style, x as f32, y as f32);
		}

		let mut added_edges = 0;
		for rel in snapshot.relationships {
			if !self.edge_ids.contains(&rel.id) {
				self.add_edge(rel, snapshot.graph_style);
				added_edges += 1;
			}
		}

		let restyled = snapshot.style_version != self.style_version;
		if restyled {
			self.restyle(snapshot);
		}
		if fresh_count > 0 || added_edges > 0 {
			debug!("canvas added {} nodes and {} relationships", fresh_count, added_edges);
			self.animation_running = true;
		}
		fresh_count > 0 || added_edges > 0 || restyled
	}

	fn has_stale_items(&self, snapshot: &RenderSnapshot<'_>) -> bool {
		let node_ids: HashSet<&str> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
		let rel_ids: HashSet<&str> = snapshot
			.relationships
			.iter()
			.map(|r| r.id.as_str())
			.collect();
		self.id_to_idx.keys().any(|id| !node_ids.contains(id.as_str()))
			|| self.edge_ids.iter().any(|id| !rel_ids.contains(id.as_str()))
	}

	/// Redraw from scratch, keeping the positions of nodes that survive.
	fn rebuild(&mut self, snapshot: &RenderSnapshot<'_>) {
		let mut kept: HashMap<String, (f32, f32)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			kept.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		let before = self.id_to_idx.len();

		self.graph.clear();
		self.id_to_idx.clear();
		self.edge_ids.clear();
		self.edges.clear();
		self.hover = HoverState::default();
		self.drag = DragState::default();
		self.pan = PanState::default();

		let count = snapshot.nodes.len().max(1) as f64;
		for (i, node) in snapshot.nodes.iter().enumerate() {
			let (x, y) = kept.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count;
				((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32)
			});
			self.add_node(node, snapshot.graph_style, x, y);
		}
		for rel in snapshot.relationships {
			self.add_edge(rel, snapshot.graph_style);
		}
		self.style_version = snapshot.style_version;
		self.animation_running = true;
		debug!(
			"canvas rebuilt: {} nodes before, {} after",
			before,
			self.id_to_idx.len()
		);
	}

	fn restyle(&mut self, snapshot: &RenderSnapshot<'_>) {
		let by_id: HashMap<&str, &GraphNode> =
			snapshot.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
		self.graph.visit_nodes_mut(|node| {
			if let Some(source) = by_id.get(node.data.user_data.id.as_str()) {
				node.data.user_data = NodeInfo::styled(source, snapshot.graph_style);
			}
		});
		let rels: HashMap<&str, &GraphRelationship> = snapshot
			.relationships
			.iter()
			.map(|r| (r.id.as_str(), r))
			.collect();
		for edge in &mut self.edges {
			if let Some(rel) = rels.get(edge.id.as_str()) {
				edge.restyle(rel, snapshot.graph_style);
			}
		}
		self.style_version = snapshot.style_version;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// Hit radius is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_PADDING {
				found = Some(node.index());
			}
		});
		found
	}

	fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn relationship_at_position(&self, sx: f64, sy: f64) -> Option<&CanvasEdge> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let positions = self.positions();
		self.edges.iter().find(|edge| {
			let (Some(&a), Some(&b)) = (positions.get(&edge.source), positions.get(&edge.target))
			else {
				return false;
			};
			segment_distance((gx, gy), a, b) < EDGE_HIT_DISTANCE / self.transform.k.max(0.1)
		})
	}

	/// Nodes take precedence over relationships drawn beneath them.
	pub fn item_at_position(&self, sx: f64, sy: f64) -> Option<CanvasHit> {
		if let Some(idx) = self.node_at_position(sx, sy) {
			return self.node_id(idx).map(CanvasHit::Node);
		}
		self.relationship_at_position(sx, sy)
			.map(|edge| CanvasHit::Relationship(edge.id.clone()))
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	/// Update hover highlighting for `hit`. Returns the hit when it differs
	/// from the last one reported, so callers can notify the explorer.
	pub fn hover_item(&mut self, hit: Option<CanvasHit>) -> Option<Option<CanvasHit>> {
		let node = match &hit {
			Some(CanvasHit::Node(id)) => self.id_to_idx.get(id).copied(),
			_ => None,
		};
		self.set_hover(node);
		self.hover.edge = match &hit {
			Some(CanvasHit::Relationship(id)) => Some(id.clone()),
			_ => None,
		};
		if self.hover.reported == hit {
			return None;
		}
		self.hover.reported = hit.clone();
		Some(hit)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::explorer::config::ExplorerConfig;
	use crate::components::explorer::state::GraphViewState;
	use crate::components::explorer::types::NeighbourResult;

	fn view_state() -> GraphViewState {
		GraphViewState::new(
			vec![
				GraphNode::new("a", ["Person"]).with_property("name", "Ann"),
				GraphNode::new("b", ["Person"]),
			],
			vec![GraphRelationship::new("r1", "KNOWS", "a", "b")],
			ExplorerConfig::default(),
			None,
		)
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		assert!((segment_distance((5.0, 3.0), (0.0, 0.0), (10.0, 0.0)) - 3.0).abs() < 1e-9);
		assert!((segment_distance((13.0, 4.0), (0.0, 0.0), (10.0, 0.0)) - 5.0).abs() < 1e-9);
	}

	#[test]
	fn canvas_is_built_from_the_render_snapshot() {
		let explorer = view_state();
		let canvas = ForceGraphState::new(&explorer.render_snapshot(), 800.0, 600.0);
		assert_eq!(canvas.node_count(), 2);
		assert_eq!(canvas.edges.len(), 1);
		assert_eq!(canvas.edges[0].caption, "KNOWS");
	}

	#[test]
	fn sync_adds_only_unseen_items() {
		let mut explorer = view_state();
		let mut canvas = ForceGraphState::new(&explorer.render_snapshot(), 800.0, 600.0);
		assert!(!canvas.sync(&explorer.render_snapshot()));

		explorer.merge_neighbours("a", NeighbourResult {
			nodes: vec![GraphNode::new("m", ["Movie"])],
			relationships: vec![GraphRelationship::new("r2", "ACTED_IN", "a", "m")],
			count: 1,
		});
		assert!(canvas.sync(&explorer.render_snapshot()));
		assert_eq!(canvas.node_count(), 3);
		assert_eq!(canvas.edges.len(), 2);
	}

	#[test]
	fn sync_after_reload_drops_items_that_are_gone() {
		let mut explorer = view_state();
		let mut canvas = ForceGraphState::new(&explorer.render_snapshot(), 800.0, 600.0);
		let a = canvas.id_to_idx.get("a").and_then(|&idx| canvas.position_of(idx));

		explorer.reload(
			vec![GraphNode::new("a", ["Person"]), GraphNode::new("c", ["Person"])],
			vec![],
		);
		assert!(canvas.sync(&explorer.render_snapshot()));
		assert_eq!(canvas.node_count(), 2);
		assert!(canvas.edges.is_empty());
		let mut drawn = 0;
		canvas.graph.visit_nodes(|_| drawn += 1);
		assert_eq!(drawn, 2);
		let a_after = canvas.id_to_idx.get("a").and_then(|&idx| canvas.position_of(idx));
		assert_eq!(a_after, a);

		explorer.reload(vec![GraphNode::new("c", ["Person"])], vec![]);
		canvas.sync(&explorer.render_snapshot());
		assert_eq!(canvas.node_count(), 1);
	}

	#[test]
	fn hover_reports_only_changes() {
		let explorer = view_state();
		let mut canvas = ForceGraphState::new(&explorer.render_snapshot(), 800.0, 600.0);
		let hit = Some(CanvasHit::Node("a".into()));
		assert_eq!(canvas.hover_item(hit.clone()), Some(hit.clone()));
		assert_eq!(canvas.hover_item(hit), None);
		assert!(canvas.has_active_highlight());
		assert_eq!(canvas.hover_item(None), Some(None));
	}
}
