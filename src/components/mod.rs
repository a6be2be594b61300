//! Reusable UI components.

pub mod graph_viewer;
pub mod violation_card;
