use std::sync::Arc;

use leptos::prelude::*;
use log::{info, warn};

use crate::components::explorer::{
	Explorer, ExplorerConfig, GraphNode, GraphRelationship, InMemoryNeighbourFetcher,
	SharedFetcher, StyleSheet,
};

/// Browser settings for the demo; small ceilings so truncation and the
/// neighbour limit are easy to trigger.
const DEMO_SETTINGS: &str = r#"{"initialNodeDisplay": 25, "maxNeighbours": 8}"#;

const HIGHLIGHT_STYLE: &str = r##"{
	"node.Person": {"color": "#F16667", "border-color": "#EB2728"},
	"relationship.ACTED_IN": {"color": "#57C7E3", "text-color-internal": "#2A2C34"}
}"##;

/// Generate a small movie database (deterministic, like a seeded random graph).
fn sample_database(people: usize, movies: usize) -> (Vec<GraphNode>, Vec<GraphRelationship>) {
	let mut nodes: Vec<GraphNode> = (0..people)
		.map(|i| {
			GraphNode::new(format!("p{i}"), ["Person"])
				.with_property("name", format!("Person {i}"))
				.with_property("born", 1940 + (i % 60) as i64)
		})
		.collect();
	nodes.extend((0..movies).map(|i| {
		GraphNode::new(format!("m{i}"), ["Movie"])
			.with_property("title", format!("Movie {i}"))
			.with_property("released", 1970 + (i % 50) as i64)
	}));

	let mut relationships = Vec::new();
	for i in 0..people {
		let movie = (rand_simple(i) * movies as f64) as usize;
		relationships.push(
			GraphRelationship::new(format!("a{i}"), "ACTED_IN", format!("p{i}"), format!("m{movie}"))
				.with_property("roles", format!("Role {i}")),
		);
		if i > 0 {
			let friend = (rand_simple(i + people) * i as f64) as usize;
			relationships.push(GraphRelationship::new(
				format!("k{i}"),
				"KNOWS",
				format!("p{i}"),
				format!("p{friend}"),
			));
		}
	}
	for i in 0..movies {
		let director = (rand_simple(i * 7 + 3) * people as f64) as usize;
		relationships.push(GraphRelationship::new(
			format!("d{i}"),
			"DIRECTED",
			format!("p{director}"),
			format!("m{i}"),
		));
	}
	(nodes, relationships)
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// The result of a query returning a few movies with everyone around them.
/// People connected to several movies appear more than once.
fn initial_result(
	database: &InMemoryNeighbourFetcher,
	seeds: &[&str],
) -> (Vec<GraphNode>, Vec<GraphRelationship>) {
	let mut nodes = Vec::new();
	let mut relationships = Vec::new();
	for seed in seeds {
		let Some(node) = database.node(seed) else {
			continue;
		};
		let around = database.neighbours_of(seed, &[]);
		nodes.push(node.clone());
		nodes.extend(around.nodes);
		relationships.extend(around.relationships);
	}
	(nodes, relationships)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = ExplorerConfig::from_json(DEMO_SETTINGS).unwrap_or_else(|err| {
		warn!("falling back to default settings: {err}");
		ExplorerConfig::default()
	});
	let (db_nodes, db_relationships) = sample_database(120, 30);
	let database = InMemoryNeighbourFetcher::new(db_nodes, db_relationships);
	let (nodes, relationships) = initial_result(&database, &["m0", "m1", "m2", "m3", "m4", "m5"]);
	let fetcher: SharedFetcher = Arc::new(database);

	let style_data = RwSignal::new(None::<StyleSheet>);
	let saved_rules = RwSignal::new(0usize);
	let on_style_update = move |sheet: StyleSheet| {
		match sheet.to_json() {
			Ok(json) => info!("persisting style sheet: {json}"),
			Err(err) => warn!("style sheet not persisted: {err}"),
		}
		saved_rules.set(sheet.0.len());
	};
	let highlight = move |_| match StyleSheet::from_json(HIGHLIGHT_STYLE) {
		Ok(sheet) => style_data.set(Some(sheet)),
		Err(err) => warn!("{err}"),
	};
	let reset = move |_| style_data.set(None);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<Explorer
					nodes=nodes
					relationships=relationships
					fetcher=fetcher
					style_data=style_data
					on_style_update=on_style_update
					config=config
					fullscreen=true
				/>
				<div class="graph-overlay">
					<h1>"Graph Explorer"</h1>
					<p class="subtitle">
						"Double-click a node to expand it. Click to inspect. Drag nodes to reposition. Scroll to zoom."
					</p>
					<button on:click=highlight>"Highlight people"</button>
					<button on:click=reset>"Reset style"</button>
					<p class="subtitle">{move || format!("{} style rules saved", saved_rules.get())}</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::explorer::graph::DisplayGraph;

	#[test]
	fn sample_database_is_consistent() {
		let (nodes, relationships) = sample_database(50, 10);
		let (graph, truncation) = DisplayGraph::from_query(nodes, relationships.clone(), 1000);
		assert!(truncation.is_none());
		assert_eq!(graph.node_count(), 60);
		assert_eq!(graph.relationships().len(), relationships.len());
	}

	#[test]
	fn initial_result_relationships_stay_inside_the_result() {
		let (nodes, relationships) = sample_database(50, 10);
		let database = InMemoryNeighbourFetcher::new(nodes, relationships);
		let (nodes, relationships) = initial_result(&database, &["m0", "m1", "missing"]);
		assert!(nodes.iter().any(|n| n.id == "m0"));
		assert!(nodes.iter().all(|n| n.id != "missing"));
		for rel in &relationships {
			assert!(nodes.iter().any(|n| n.id == rel.start_node_id));
			assert!(nodes.iter().any(|n| n.id == rel.end_node_id));
		}
	}
}
