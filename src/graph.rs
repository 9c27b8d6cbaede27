pub mod dijkstra;
pub mod edmond_karp;
pub mod network;
pub mod prim;
pub mod road;

pub use dijkstra::ShortestPaths;
pub use edmond_karp::{parse_skill_set, FlowEdge, FlowNetwork, TeamAllocation};
pub use network::{DuplicateEdgePolicy, Edge, Graph, WeightedAdjacency};
pub use prim::MinimumSpanningTree;
pub use road::{Road, RoadGraph};
