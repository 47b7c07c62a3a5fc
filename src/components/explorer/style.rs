//! Visual rules for labels and relationship types.
//!
//! A [`GraphStyle`] is an immutable value. Every change produces a new style
//! that replaces the old one wholesale, and the explorer bumps its style
//! version alongside so renderers can dirty-check on a single integer.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ExplorerError, Result};
use super::types::{GraphNode, GraphRelationship};

pub const NODE_SELECTOR: &str = "node";
pub const RELATIONSHIP_SELECTOR: &str = "relationship";

/// Palette handed out, in order, to labels that have no colour rule yet.
/// Each entry is `(color, border-color, text-color-internal)`.
const PALETTE: &[(&str, &str, &str)] = &[
	("#604A0E", "#423204", "#FFFFFF"),
	("#C990C0", "#B261A5", "#FFFFFF"),
	("#F79767", "#F36924", "#FFFFFF"),
	("#57C7E3", "#23B3D7", "#2A2C34"),
	("#F16667", "#EB2728", "#FFFFFF"),
	("#D9C8AE", "#C0A378", "#604A0E"),
	("#8DCC93", "#5DB665", "#2A2C34"),
	("#ECB5C9", "#DA7298", "#2A2C34"),
	("#4C8EDA", "#2870C2", "#FFFFFF"),
	("#FFC454", "#D7A013", "#2A2C34"),
	("#DA7194", "#CC3C6C", "#FFFFFF"),
	("#569480", "#447666", "#FFFFFF"),
];

/// Properties tried, in order, when a node rule has no caption template.
const CAPTION_PROPERTIES: &[&str] = &["name", "title", "label"];

pub type Rule = BTreeMap<String, String>;

/// Serializable snapshot of every rule, keyed by selector
/// (`node`, `node.<Label>`, `relationship`, `relationship.<TYPE>`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet(pub BTreeMap<String, Rule>);

impl StyleSheet {
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn rule(&self, selector: &str) -> Option<&Rule> {
		self.0.get(selector)
	}

	pub fn set(&mut self, selector: impl Into<String>, attribute: impl Into<String>, value: impl Into<String>) {
		self.0
			.entry(selector.into())
			.or_default()
			.insert(attribute.into(), value.into());
	}

	/// Overlay `other` on top of `self`, one attribute at a time.
	pub fn merged_with(&self, other: &StyleSheet) -> StyleSheet {
		let mut merged = self.clone();
		for (selector, rule) in &other.0 {
			let target = merged.0.entry(selector.clone()).or_default();
			for (attribute, value) in rule {
				target.insert(attribute.clone(), value.clone());
			}
		}
		merged
	}

	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self).map_err(ExplorerError::StyleSheet)
	}

	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(ExplorerError::StyleSheet)
	}
}

pub fn label_selector(label: &str) -> String {
	format!("{NODE_SELECTOR}.{label}")
}

pub fn rel_type_selector(rel_type: &str) -> String {
	format!("{RELATIONSHIP_SELECTOR}.{rel_type}")
}

fn default_sheet() -> StyleSheet {
	let mut sheet = StyleSheet::default();
	for (attribute, value) in [
		("diameter", "50px"),
		("color", "#A5ABB6"),
		("border-color", "#9AA1AC"),
		("border-width", "2px"),
		("text-color-internal", "#FFFFFF"),
		("font-size", "10px"),
	] {
		sheet.set(NODE_SELECTOR, attribute, value);
	}
	for (attribute, value) in [
		("color", "#A5ABB6"),
		("shaft-width", "1px"),
		("font-size", "8px"),
		("padding", "3px"),
		("text-color-external", "#000000"),
		("text-color-internal", "#FFFFFF"),
		("caption", "<type>"),
	] {
		sheet.set(RELATIONSHIP_SELECTOR, attribute, value);
	}
	sheet
}

/// Resolved attributes for one node or relationship.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleHandle {
	attributes: Rule,
}

impl RuleHandle {
	pub fn get(&self, attribute: &str) -> Option<&str> {
		self.attributes.get(attribute).map(String::as_str)
	}

	/// Parse a pixel attribute such as `"50px"`.
	pub fn get_px(&self, attribute: &str) -> Option<f64> {
		self.get(attribute)?.trim_end_matches("px").trim().parse().ok()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphStyle {
	sheet: Arc<StyleSheet>,
}

impl Default for GraphStyle {
	fn default() -> Self {
		Self::from_sheet(default_sheet())
	}
}

impl GraphStyle {
	/// Use `sheet` exactly as given.
	pub fn from_sheet(sheet: StyleSheet) -> Self {
		Self {
			sheet: Arc::new(sheet),
		}
	}

	/// Overlay a persisted payload on the built-in defaults. Keys the payload
	/// leaves out keep their default value.
	pub fn rebased(payload: &StyleSheet) -> Self {
		Self::from_sheet(default_sheet().merged_with(payload))
	}

	pub fn to_sheet(&self) -> StyleSheet {
		self.sheet.as_ref().clone()
	}

	pub fn sheet(&self) -> &StyleSheet {
		&self.sheet
	}

	pub fn for_node<'a, I>(&self, labels: I) -> RuleHandle
	where
		I: IntoIterator<Item = &'a String>,
	{
		let mut attributes = self.sheet.rule(NODE_SELECTOR).cloned().unwrap_or_default();
		let specific = labels
			.into_iter()
			.find_map(|label| self.sheet.rule(&label_selector(label)));
		if let Some(rule) = specific {
			attributes.extend(rule.iter().map(|(k, v)| (k.clone(), v.clone())));
		}
		RuleHandle { attributes }
	}

	pub fn for_relationship(&self, rel_type: &str) -> RuleHandle {
		let mut attributes = self
			.sheet
			.rule(RELATIONSHIP_SELECTOR)
			.cloned()
			.unwrap_or_default();
		if let Some(rule) = self.sheet.rule(&rel_type_selector(rel_type)) {
			attributes.extend(rule.iter().map(|(k, v)| (k.clone(), v.clone())));
		}
		RuleHandle { attributes }
	}

	/// Give every label in `labels` without its own colour rule the next
	/// unused palette entry, in the order given. Returns `None` when every
	/// label was already styled.
	pub fn with_assigned_colors<'a, I>(&self, labels: I) -> Option<GraphStyle>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut sheet = self.to_sheet();
		let mut changed = false;
		for label in labels {
			let selector = label_selector(label);
			if sheet.rule(&selector).is_some_and(|rule| rule.contains_key("color")) {
				continue;
			}
			let (color, border, text) = next_palette_entry(&sheet);
			sheet.set(selector.as_str(), "color", color);
			sheet.set(selector.as_str(), "border-color", border);
			sheet.set(selector.as_str(), "text-color-internal", text);
			changed = true;
		}
		changed.then(|| GraphStyle::from_sheet(sheet))
	}

	pub fn node_caption(&self, node: &GraphNode) -> String {
		let rule = self.for_node(&node.labels);
		if let Some(template) = rule.get("caption") {
			let caption = render_caption(template, &node.id, None, &node.properties);
			if !caption.is_empty() {
				return caption;
			}
		}
		CAPTION_PROPERTIES
			.iter()
			.find_map(|key| node.properties.get(*key).map(value_text))
			.unwrap_or_else(|| node.id.clone())
	}

	pub fn relationship_caption(&self, rel: &GraphRelationship) -> String {
		let rule = self.for_relationship(&rel.rel_type);
		let template = rule.get("caption").unwrap_or("<type>");
		render_caption(template, &rel.id, Some(&rel.rel_type), &rel.properties)
	}
}

fn next_palette_entry(sheet: &StyleSheet) -> (&'static str, &'static str, &'static str) {
	let used: Vec<&str> = sheet
		.0
		.iter()
		.filter(|(selector, _)| selector.starts_with("node."))
		.filter_map(|(_, rule)| rule.get("color").map(String::as_str))
		.collect();
	PALETTE
		.iter()
		.copied()
		.find(|(color, _, _)| !used.iter().any(|u| u.eq_ignore_ascii_case(color)))
		.unwrap_or(PALETTE[used.len() % PALETTE.len()])
}

fn value_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Expand `<id>`, `<type>` and `{property}` placeholders.
fn render_caption(
	template: &str,
	id: &str,
	rel_type: Option<&str>,
	properties: &BTreeMap<String, Value>,
) -> String {
	let mut template = template.replace("<id>", id);
	if let Some(rel_type) = rel_type {
		template = template.replace("<type>", rel_type);
	}
	let mut out = String::with_capacity(template.len());
	let mut rest = template.as_str();
	while let Some(start) = rest.find('{') {
		let Some(len) = rest[start..].find('}') else {
			break;
		};
		out.push_str(&rest[..start]);
		let key = &rest[start + 1..start + len];
		if let Some(value) = properties.get(key) {
			out.push_str(&value_text(value));
		}
		rest = &rest[start + len + 1..];
	}
	out.push_str(rest);
	out.trim().to_string()
}
