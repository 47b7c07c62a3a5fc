use leptos::prelude::*;

use super::selection::SelectionCursor;
use super::state::{GraphViewState, Inspected};
use super::style::GraphStyle;
use super::types::GraphItem;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendChip {
	pub name: String,
	pub count: usize,
	pub property_keys: Vec<String>,
	pub color: String,
	pub text_color: String,
}

impl LegendChip {
	fn css(&self) -> String {
		format!("background-color: {}; color: {};", self.color, self.text_color)
	}
}

/// Legend entries for labels and relationship types, coloured from the
/// style the legend is allowed to read.
pub fn legend_chips(state: &GraphViewState) -> (Vec<LegendChip>, Vec<LegendChip>) {
	let style = state.legend_style();
	let stats = state.stats();
	let labels = stats
		.labels_in_order()
		.filter_map(|label| {
			let entry = stats.labels.get(label)?;
			let rule = style.for_node([&label.to_string()]);
			Some(LegendChip {
				name: label.to_string(),
				count: entry.count,
				property_keys: entry.property_keys(),
				color: rule.get("color").unwrap_or_default().to_string(),
				text_color: rule.get("text-color-internal").unwrap_or_default().to_string(),
			})
		})
		.collect();
	let rel_types = stats
		.rel_types_in_order()
		.filter_map(|rel_type| {
			let entry = stats.rel_types.get(rel_type)?;
			let rule = style.for_relationship(rel_type);
			Some(LegendChip {
				name: rel_type.to_string(),
				count: entry.count,
				property_keys: entry.property_keys(),
				color: rule.get("color").unwrap_or_default().to_string(),
				text_color: rule.get("text-color-internal").unwrap_or_default().to_string(),
			})
		})
		.collect();
	(labels, rel_types)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InspectorContent {
	pub title: String,
	pub rows: Vec<(String, String)>,
}

fn item_content(item: &GraphItem, style: &GraphStyle) -> InspectorContent {
	let title = match item {
		GraphItem::Node(node) => {
			let labels: Vec<_> = node.labels.iter().map(|l| format!(":{l}")).collect();
			format!("{} {}", labels.join(""), style.node_caption(node))
		}
		GraphItem::Relationship(rel) => format!("[:{}]", rel.rel_type),
	};
	let mut rows = vec![("<id>".to_string(), item.id().to_string())];
	rows.extend(item.properties().iter().map(|(key, value)| {
		let value = match value {
			serde_json::Value::String(s) => s.clone(),
			other => other.to_string(),
		};
		(key.clone(), value)
	}));
	InspectorContent {
		title: title.trim().to_string(),
		rows,
	}
}

/// What the inspector pane shows for the current hover/selection.
pub fn inspector_content(state: &GraphViewState) -> InspectorContent {
	match state.inspected() {
		Inspected::Hovered(item) | Inspected::Selected(SelectionCursor::GraphItem(item)) => {
			item_content(item, state.style())
		}
		Inspected::Selected(SelectionCursor::Status(message)) => InspectorContent {
			title: message.clone(),
			rows: Vec::new(),
		},
		Inspected::Selected(SelectionCursor::Legend(legend)) => {
			let (title, keys) = match (&legend.selected_label, &legend.selected_rel_type) {
				(Some(label), _) => (format!("Label :{}", label.label), &label.property_keys),
				(None, Some(rel)) => (format!("Type [:{}]", rel.rel_type), &rel.property_keys),
				(None, None) => return InspectorContent::default(),
			};
			InspectorContent {
				title,
				rows: keys.iter().map(|k| ("property".to_string(), k.clone())).collect(),
			}
		}
		Inspected::Selected(SelectionCursor::Empty) => {
			let graph = state.graph();
			InspectorContent {
				title: format!(
					"Displaying {} nodes, {} relationships.",
					graph.node_count(),
					graph.relationships().len()
				),
				rows: Vec::new(),
			}
		}
	}
}

#[component]
pub fn LegendPanel(view_state: RwSignal<GraphViewState>) -> impl IntoView {
	let labels = move || {
		let (labels, _) = view_state.with(legend_chips);
		labels
			.into_iter()
			.map(|chip| {
				let style = chip.css();
				let text = format!("{} ({})", chip.name, chip.count);
				let LegendChip {
					name, property_keys, ..
				} = chip;
				view! {
					<button
						class="legend-label"
						style=style
						on:click=move |_| {
							view_state.update(|s| s.on_label_selected(&name, property_keys.clone()))
						}
					>
						{text}
					</button>
				}
			})
			.collect_view()
	};
	let rel_types = move || {
		let (_, rel_types) = view_state.with(legend_chips);
		rel_types
			.into_iter()
			.map(|chip| {
				let style = chip.css();
				let text = format!("{} ({})", chip.name, chip.count);
				let LegendChip {
					name, property_keys, ..
				} = chip;
				view! {
					<button
						class="legend-rel-type"
						style=style
						on:click=move |_| {
							view_state.update(|s| s.on_rel_type_selected(&name, property_keys.clone()))
						}
					>
						{text}
					</button>
				}
			})
			.collect_view()
	};

	view! {
		<div class="explorer-legend">
			<div class="legend-row">{labels}</div>
			<div class="legend-row">{rel_types}</div>
		</div>
	}
}

#[component]
pub fn InspectorPanel(view_state: RwSignal<GraphViewState>) -> impl IntoView {
	move || {
		let content = view_state.with(inspector_content);
		view! {
			<div class="explorer-inspector">
				<h3>{content.title}</h3>
				<table>
					{content
						.rows
						.into_iter()
						.map(|(key, value)| view! { <tr><td>{key}</td><td>{value}</td></tr> })
						.collect_view()}
				</table>
			</div>
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::explorer::config::ExplorerConfig;
	use crate::components::explorer::style::StyleSheet;
	use crate::components::explorer::types::{GraphNode, GraphRelationship};

	fn state() -> GraphViewState {
		GraphViewState::new(
			vec![
				GraphNode::new("p1", ["Person"]).with_property("name", "Ann"),
				GraphNode::new("m1", ["Movie"]).with_property("title", "Heat"),
			],
			vec![GraphRelationship::new("r1", "ACTED_IN", "p1", "m1").with_property("roles", "Eady")],
			ExplorerConfig::default(),
			None,
		)
	}

	#[test]
	fn legend_reads_assigned_colours() {
		let (labels, rel_types) = legend_chips(&state());
		assert_eq!(labels.len(), 2);
		assert_eq!(labels[0].name, "Person");
		assert_eq!(labels[0].color, "#604A0E");
		assert_eq!(labels[1].color, "#C990C0");
		assert_eq!(rel_types[0].name, "ACTED_IN");
		assert_eq!(rel_types[0].color, "#A5ABB6");
		assert_eq!(rel_types[0].property_keys, ["roles"]);
	}

	#[test]
	fn legend_reads_defaults_while_reset_is_pending() {
		let payload = StyleSheet::from_json(r##"{"node": {"color": "#000000"}}"##).unwrap();
		let mut state = GraphViewState::new(
			vec![GraphNode::new("p1", ["Person"])],
			vec![],
			ExplorerConfig::default(),
			Some(payload),
		);
		state.on_style_payload_changed(None);
		let (labels, _) = legend_chips(&state);
		assert_eq!(labels[0].color, "#A5ABB6");

		state.complete_style_reset();
		let (labels, _) = legend_chips(&state);
		assert_eq!(labels[0].color, "#604A0E");
	}

	#[test]
	fn inspector_prefers_hover_over_selection() {
		let mut state = state();
		state.select_item(Some("m1"));
		state.hover_item(Some("r1"));
		let content = inspector_content(&state);
		assert_eq!(content.title, "[:ACTED_IN]");
		assert!(content.rows.contains(&("roles".to_string(), "Eady".to_string())));

		state.hover_item(None);
		let content = inspector_content(&state);
		assert_eq!(content.title, ":Movie Heat");
		assert_eq!(content.rows[0], ("<id>".to_string(), "m1".to_string()));
	}

	#[test]
	fn inspector_shows_legend_and_summary() {
		let mut state = state();
		assert_eq!(
			inspector_content(&state).title,
			"Displaying 2 nodes, 1 relationships."
		);
		state.on_label_selected("Person", vec!["name".into()]);
		let content = inspector_content(&state);
		assert_eq!(content.title, "Label :Person");
		assert_eq!(content.rows, [("property".to_string(), "name".to_string())]);
	}
}
