pub mod bipartite;
pub mod common;
pub mod community;
pub mod pathfinding;
pub mod topology;

pub use bipartite::{is_bipartite, projected_pairs};
pub use common::{GraphView, NodeId};
pub use community::{weakly_connected_components, WccResult};
pub use pathfinding::{
    bfs, bfs_distances, eccentricities, radius_and_diameter, reachable_from, PathResult,
};
pub use topology::{count_all_cliques, CliqueCount};
