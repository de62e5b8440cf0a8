//! Chains of link graphs across several KEGG databases
//!
//! A chain `c0 > c1 > ... > cn` holds one [`LinkGraph`] per adjacent pair
//! (its levels) and their composition. It moves through three states:
//!
//! - `Unbuilt`: categories only
//! - `Built`: levels fetched and composed into an undirected graph
//! - `Directed`: additionally holds a directed graph flowing c0 -> ... -> cn

use crate::algo::compose;
use crate::graph::{Category, GraphError, GraphStore, NodeId};
use crate::kegg::{KeggError, KeggSource};
use crate::link::{Bipartite, LinkError, LinkGraph};
use indexmap::IndexSet;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Unbuilt,
    Built,
    Directed,
}

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("KEGG database {source_db} has no direct link to {target_db}")]
    MissingCrossReference {
        source_db: Category,
        target_db: Category,
    },

    #[error("Level {level} is out of range for a chain with {levels} levels")]
    InvalidLevel { level: usize, levels: usize },

    #[error("Category {0} is not part of the chain")]
    UnknownCategory(Category),

    #[error("Propagation found no frontier node at level {level}")]
    DeadEnd { level: usize },

    #[error("A chain needs at least two categories, got {0}")]
    TooShort(usize),

    #[error("Level {level} starts at {found}, but the previous level ends at {expected}")]
    Discontinuous {
        level: usize,
        expected: Category,
        found: Category,
    },

    #[error("Chain is {state:?}, expected {expected:?}")]
    InvalidState {
        state: ChainState,
        expected: ChainState,
    },

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Kegg(#[from] KeggError),
}

pub type ChainResult<T> = Result<T, ChainError>;

/// Capability of sequences of link graphs
pub trait Chained {
    fn categories(&self) -> &[Category];
    fn levels(&self) -> &[LinkGraph];

    fn level(&self, index: usize) -> Option<&LinkGraph> {
        self.levels().get(index)
    }

    /// Index of the first occurrence of `category`
    fn resolve_level(&self, category: &str) -> Option<usize> {
        self.categories().iter().position(|c| c.as_str() == category)
    }
}

#[derive(Debug, Clone)]
pub struct Chain {
    categories: Vec<Category>,
    levels: Vec<LinkGraph>,
    graph: GraphStore,
    directed: Option<GraphStore>,
    state: ChainState,
}

impl Chain {
    pub fn new<I, C>(categories: I) -> ChainResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let categories: Vec<Category> = categories.into_iter().map(Into::into).collect();
        if categories.len() < 2 {
            return Err(ChainError::TooShort(categories.len()));
        }

        let graph = GraphStore::new(chain_name(&categories));
        Ok(Chain {
            categories,
            levels: Vec::new(),
            graph,
            directed: None,
            state: ChainState::Unbuilt,
        })
    }

    /// Create and build in one step
    pub fn fetch<S, I, C>(kegg: &S, categories: I) -> ChainResult<Self>
    where
        S: KeggSource + ?Sized,
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let mut chain = Self::new(categories)?;
        chain.build(kegg)?;
        Ok(chain)
    }

    /// Built chain over already constructed, contiguous link graphs
    pub fn from_links(links: Vec<LinkGraph>) -> ChainResult<Self> {
        let first = links.first().ok_or(ChainError::TooShort(0))?;

        let mut categories = vec![first.source_category().clone()];
        for (level, link) in links.iter().enumerate() {
            let expected = &categories[categories.len() - 1];
            if link.source_category() != expected {
                return Err(ChainError::Discontinuous {
                    level,
                    expected: expected.clone(),
                    found: link.source_category().clone(),
                });
            }
            categories.push(link.target_category().clone());
        }

        let mut chain = Self::new(categories)?;
        chain.install(links)?;
        Ok(chain)
    }

    pub fn name(&self) -> &str {
        self.graph.name()
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Composed undirected graph (empty until built)
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn directed_graph(&self) -> Option<&GraphStore> {
        self.directed.as_ref()
    }

    fn require_built(&self) -> ChainResult<()> {
        if self.state == ChainState::Unbuilt {
            return Err(ChainError::InvalidState {
                state: self.state,
                expected: ChainState::Built,
            });
        }
        Ok(())
    }

    /// Fetch every level and compose them.
    ///
    /// All adjacent pairs are checked against the cross-reference lists
    /// first; on any error the chain stays unbuilt.
    pub fn build<S: KeggSource + ?Sized>(&mut self, kegg: &S) -> ChainResult<()> {
        if self.state != ChainState::Unbuilt {
            return Err(ChainError::InvalidState {
                state: self.state,
                expected: ChainState::Unbuilt,
            });
        }

        for pair in self.categories.windows(2) {
            let info = kegg.fetch_metadata(pair[0].as_str())?;
            if !info.links_to(pair[1].as_str()) {
                return Err(ChainError::MissingCrossReference {
                    source_db: pair[0].clone(),
                    target_db: pair[1].clone(),
                });
            }
        }

        let levels = self
            .categories
            .windows(2)
            .map(|pair| LinkGraph::fetch(kegg, pair[0].as_str(), pair[1].as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        self.install(levels)
    }

    fn install(&mut self, levels: Vec<LinkGraph>) -> ChainResult<()> {
        let mut graph = compose(levels.iter().map(|link| link.graph()))?;
        graph.set_name(chain_name(&self.categories));

        info!(
            "Built chain '{}': {} levels, {} nodes, {} edges",
            graph.name(),
            levels.len(),
            graph.node_count(),
            graph.edge_count()
        );

        self.levels = levels;
        self.graph = graph;
        self.directed = None;
        self.state = ChainState::Built;
        Ok(())
    }

    /// Directed view of the chain, computed on first use.
    ///
    /// Every edge is taken in both directions, then at each level the edges
    /// from that level's target nodes back into its source nodes are dropped.
    pub fn to_directed(&mut self) -> ChainResult<&GraphStore> {
        self.require_built()?;

        if self.directed.is_none() {
            let mut directed = self.graph.to_directed();
            for level in &self.levels {
                for target in level.target_nodes().keys() {
                    let backwards: Vec<NodeId> = directed
                        .neighbors(target.as_str())
                        .filter(|n| level.source_nodes().contains_key(n.as_str()))
                        .cloned()
                        .collect();
                    for source in backwards {
                        directed.remove_edge(target.as_str(), source.as_str());
                    }
                }
            }
            debug!(
                "Directed chain '{}': {} edges",
                directed.name(),
                directed.edge_count()
            );
            self.directed = Some(directed);
            self.state = ChainState::Directed;
        }

        self.directed.as_ref().ok_or(ChainError::InvalidState {
            state: self.state,
            expected: ChainState::Directed,
        })
    }

    /// Nodes reached by walking the levels from `start_level` onwards.
    ///
    /// At each level the frontier (initially `seeds`) is expanded to its
    /// neighbors and the discovered target nodes become the next frontier.
    /// Returns the subgraph of the chain graph (or of its directed form)
    /// induced by everything visited.
    pub fn directed_propagation(
        &mut self,
        seeds: &[NodeId],
        start_level: usize,
        directed: bool,
    ) -> ChainResult<GraphStore> {
        self.require_built()?;
        if start_level >= self.levels.len() {
            return Err(ChainError::InvalidLevel {
                level: start_level,
                levels: self.levels.len(),
            });
        }

        let mut visited: IndexSet<NodeId> = IndexSet::new();
        let mut frontier: Vec<NodeId> = seeds.to_vec();

        for (level, link) in self.levels.iter().enumerate().skip(start_level) {
            let present: Vec<NodeId> = frontier
                .iter()
                .filter(|n| link.graph().has_node(n.as_str()))
                .cloned()
                .collect();
            if present.is_empty() {
                return Err(ChainError::DeadEnd { level });
            }

            let expanded = link.neighbor_graph(&present, false)?;
            visited.extend(expanded.graph().node_ids().cloned());
            frontier = expanded.target_nodes().keys().cloned().collect();
            debug!(
                "Propagation level {}: {} nodes, frontier of {}",
                level,
                expanded.graph().node_count(),
                frontier.len()
            );
        }

        let name = format!("propagation through {}", self.name());
        let base = if directed {
            self.to_directed()?
        } else {
            &self.graph
        };
        Ok(base.subgraph(visited.iter(), name))
    }

    /// Projection of `categories[level]` through `categories[level + 1]`.
    ///
    /// Defaults to the second-to-last category.
    pub fn projected_graph(&self, level: Option<usize>) -> ChainResult<GraphStore> {
        self.require_built()?;
        let level = level.unwrap_or(self.levels.len() - 1);
        let link = self.levels.get(level).ok_or(ChainError::InvalidLevel {
            level,
            levels: self.levels.len(),
        })?;
        Ok(link.projected_graph(None)?)
    }

    pub fn projected_graph_for(&self, category: &str) -> ChainResult<GraphStore> {
        let level = self
            .resolve_level(category)
            .ok_or_else(|| ChainError::UnknownCategory(Category::from(category)))?;
        self.projected_graph(Some(level))
    }
}

impl Chained for Chain {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn levels(&self) -> &[LinkGraph] {
        &self.levels
    }
}

fn chain_name(categories: &[Category]) -> String {
    let joined: Vec<&str> = categories.iter().map(Category::as_str).collect();
    format!("{} chain", joined.join(">"))
}
