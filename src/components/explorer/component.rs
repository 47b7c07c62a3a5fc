use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use super::config::ExplorerConfig;
use super::fetcher::SharedFetcher;
use super::panels::{InspectorPanel, LegendPanel};
use super::state::{GraphViewState, StyleReload};
use super::style::StyleSheet;
use super::types::{GraphNode, GraphRelationship};
use crate::components::force_graph::ForceGraphCanvas;

/// Interactive view of a query result with neighbour expansion, a legend
/// and an inspector.
///
/// `style_data` is the persisted style payload; `on_style_update` receives
/// the sheet to persist whenever the explorer assigns new colours or
/// finishes a style reset.
#[component]
pub fn Explorer(
	nodes: Vec<GraphNode>,
	relationships: Vec<GraphRelationship>,
	fetcher: SharedFetcher,
	#[prop(into)] style_data: Signal<Option<StyleSheet>>,
	on_style_update: impl Fn(StyleSheet) + 'static,
	#[prop(optional)] config: ExplorerConfig,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let view_state = RwSignal::new(GraphViewState::new(
		nodes,
		relationships,
		config,
		style_data.get_untracked(),
	));
	let persist: Rc<dyn Fn(StyleSheet)> = Rc::new(on_style_update);
	if let Some(sheet) = view_state.try_update(|s| s.on_graph_model_change()) {
		persist(sheet);
	}

	let persist_style = persist.clone();
	Effect::new(move |_| {
		let payload = style_data.get();
		let reload = view_state.try_update(|s| s.on_style_payload_changed(payload));
		if reload == Some(StyleReload::PendingReset) {
			if let Some(Some(sheet)) = view_state.try_update(|s| s.complete_style_reset()) {
				persist_style(sheet);
			}
		}
	});

	let on_expand = move |node_id: String| {
		let request = view_state
			.try_update(|s| {
				let current = s.neighbour_ids(&node_id);
				s.begin_expansion(&node_id, current)
			})
			.flatten();
		let Some(request) = request else {
			return;
		};
		let (fetcher, persist) = (fetcher.clone(), persist.clone());
		spawn_local(async move {
			let outcome = fetcher
				.fetch(&request.node_id, &request.current_neighbour_ids)
				.await;
			let merged = view_state
				.try_update(|s| {
					let result = s.finish_expansion(&request, outcome);
					let merged = s.merge_neighbours(&request.node_id, result);
					debug!(
						"expanded {}: {} nodes, {} relationships added",
						request.node_id,
						merged.added_nodes.len(),
						merged.added_relationships.len()
					);
					(!merged.is_empty()).then(|| s.style().to_sheet())
				})
				.flatten();
			if let Some(sheet) = merged {
				persist(sheet);
			}
		});
	};
	let on_hover = move |id: Option<String>| view_state.update(|s| s.hover_item(id.as_deref()));
	let on_select = move |id: Option<String>| view_state.update(|s| s.select_item(id.as_deref()));

	view! {
		<div class="explorer">
			<div class="explorer-graph">
				<ForceGraphCanvas
					view_state=view_state
					on_hover=on_hover
					on_select=on_select
					on_expand=on_expand
					fullscreen=fullscreen
				/>
			</div>
			<div class="explorer-side">
				<LegendPanel view_state=view_state />
				<InspectorPanel view_state=view_state />
			</div>
		</div>
	}
}
