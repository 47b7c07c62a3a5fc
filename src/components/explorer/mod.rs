//! View-model for browsing a graph result: which nodes and relationships are
//! displayed, what is selected or hovered, and how everything is styled.

mod component;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod graph;
mod panels;
pub mod selection;
pub mod state;
pub mod stats;
pub mod style;
pub mod types;

pub use component::Explorer;
pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use fetcher::{InMemoryNeighbourFetcher, NeighbourFetcher, SharedFetcher};
pub use state::GraphViewState;
pub use style::{GraphStyle, StyleSheet};
pub use types::{GraphNode, GraphRelationship, NeighbourResult};
