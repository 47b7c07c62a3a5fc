use super::types::GraphItem;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelInfo {
	pub label: String,
	pub property_keys: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelTypeInfo {
	pub rel_type: String,
	pub property_keys: Vec<String>,
}

/// A legend entry picked by the user. Exactly one side is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendItem {
	pub selected_label: Option<LabelInfo>,
	pub selected_rel_type: Option<RelTypeInfo>,
}

impl LegendItem {
	pub fn label(label: impl Into<String>, property_keys: Vec<String>) -> Self {
		Self {
			selected_label: Some(LabelInfo {
				label: label.into(),
				property_keys,
			}),
			selected_rel_type: None,
		}
	}

	pub fn rel_type(rel_type: impl Into<String>, property_keys: Vec<String>) -> Self {
		Self {
			selected_label: None,
			selected_rel_type: Some(RelTypeInfo {
				rel_type: rel_type.into(),
				property_keys,
			}),
		}
	}
}

/// What the inspector shows when nothing is hovered.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SelectionCursor {
	#[default]
	Empty,
	Status(String),
	GraphItem(GraphItem),
	Legend(LegendItem),
}

impl SelectionCursor {
	pub fn is_empty(&self) -> bool {
		matches!(self, SelectionCursor::Empty)
	}

	pub fn status_message(&self) -> Option<&str> {
		match self {
			SelectionCursor::Status(message) => Some(message),
			_ => None,
		}
	}
}
