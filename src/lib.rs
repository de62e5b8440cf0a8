//! keggraph
//!
//! Typed graphs built from the KEGG REST API.
//!
//! # Architecture
//!
//! - [`parser`]: the four text layouts KEGG answers with (two-column and
//!   four-column lists, whitespace-aligned columns, nested flat-file entries)
//! - [`graph`]: an in-memory graph store whose nodes carry a category (the
//!   KEGG database or organism they come from)
//! - [`algo`]: derived graphs (neighbor, projected, connected, composed) and
//!   graph measures, backed by the `keggraph-algorithms` crate
//! - [`link`]: bipartite graphs between two databases
//! - [`chain`]: layered graphs over a sequence of databases
//! - [`kegg`]: the REST client, its configuration and the on-disk response cache
//!
//! # Example
//!
//! ```rust
//! use keggraph::{Bipartite, LinkGraph, NodeId};
//!
//! let sources: Vec<NodeId> = vec!["hsa:1".into(), "hsa:2".into()];
//! let targets: Vec<NodeId> = vec!["ko:K1".into(), "ko:K1".into()];
//!
//! let link = LinkGraph::from_links("hsa", "ko", sources, targets).unwrap();
//! assert_eq!(link.name(), "hsa_to_ko");
//!
//! let projection = link.projected_graph(None).unwrap();
//! assert!(projection.has_edge("hsa:1", "hsa:2"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod chain;
pub mod graph;
pub mod kegg;
pub mod link;
pub mod parser;

pub use graph::{
    Category, Edge, GraphError, GraphKind, GraphResult, GraphStore, Node, NodeCategories, NodeId,
    NodeLinkData, Relation,
};

pub use algo::{
    compose, connected_components, connected_subgraph, graph_measures, neighbor_graph,
    projected_graph, prune_isolated_nodes, shortest_path, GraphMeasures, MeasuresConfig,
};

pub use parser::{
    process_request_text, BipartiteList, ColumnRecord, FourWayList, NestedRecord, ParseError,
    ParseMode, ParseResult, ParsedRecord,
};

pub use kegg::{
    DatabaseInfo, HttpFetcher, KeggClient, KeggConfig, KeggError, KeggResult, KeggSource,
    ResponseCache, TextFetcher,
};

pub use link::{Bipartite, LinkError, LinkGraph, LinkResult};

pub use chain::{Chain, ChainError, ChainResult, ChainState, Chained};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
