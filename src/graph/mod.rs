//! Typed graph storage
//!
//! This module implements the typed graph data model:
//! - Nodes tagged with a category (`nodetype`) and a display label
//! - Simple edges, optionally carrying relation metadata
//! - Insertion-ordered storage, so iteration follows discovery order
//! - Construction helpers that turn parsed KEGG lists into graphs

pub mod builder;
pub mod edge;
pub mod export;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use builder::{kegg_link_graph, populate};
pub use edge::{Edge, Relation};
pub use export::NodeLinkData;
pub use node::Node;
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{categorize, Category, GraphKind, NodeCategories, NodeId};
