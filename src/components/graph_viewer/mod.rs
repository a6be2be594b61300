//! Canvas view of a knowledge graph: ring layout, pan/zoom, hit-testing and export.

mod component;
pub mod details;
pub mod export;
pub mod layout;
pub mod palette;
pub mod render;
pub mod state;
pub mod surface;
pub mod transform;
pub mod types;

pub use component::GraphViewer;
pub use palette::{GraphViewerConfig, Palette};
pub use types::{Graph, GraphEdge, GraphNode};
