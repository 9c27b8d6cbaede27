use log::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::dijkstra::{self, ShortestPaths};
use crate::graph::network::{merge_edge, DuplicateEdgePolicy, Graph, WeightedAdjacency};

/// A directed road with a blocked flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Road {
    pub to: usize,
    pub weight: u32,
    pub blocked: bool,
}

/// Evacuation network whose roads can be blocked and reopened between
/// route computations.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    adjacency: Vec<Vec<Road>>,
    names: Vec<String>,
    duplicate_policy: DuplicateEdgePolicy,
}

impl RoadGraph {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        RoadGraph {
            adjacency: vec![Vec::new(); names.len()],
            names,
            duplicate_policy: DuplicateEdgePolicy::default(),
        }
    }

    /// Copies every adjacency record of `graph` as an open road.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut roads = RoadGraph::new(graph.names().iter().cloned());
        roads.duplicate_policy = graph.duplicate_policy();
        for (src, dest, weight) in graph.edges() {
            roads.adjacency[src].push(Road {
                to: dest,
                weight,
                blocked: false,
            });
        }
        roads
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn name(&self, vertex: usize) -> Option<&str> {
        self.names.get(vertex).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn roads(&self, vertex: usize) -> &[Road] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Adds a directed road with the same dedup rules as
    /// [`Graph::add_directed_edge`].
    pub fn add_road(&mut self, src: usize, dest: usize, weight: u32) -> Result<()> {
        self.check_vertex(src)?;
        self.check_vertex(dest)?;
        if weight == 0 {
            warn!("dropping zero-weight road {src} -> {dest}");
            return Ok(());
        }
        merge_edge(
            &mut self.adjacency[src],
            dest,
            weight,
            self.duplicate_policy,
            |to, weight| Road {
                to,
                weight,
                blocked: false,
            },
            |road| (road.to, road.weight),
            |road, weight| road.weight = weight,
        );
        Ok(())
    }

    /// Blocks the road between `a` and `b` in both directions.
    ///
    /// Returns `false` if no road joins them in either direction.
    pub fn block_road(&mut self, a: usize, b: usize) -> Result<bool> {
        self.set_blocked(a, b, true)
    }

    /// Reopens the road between `a` and `b` in both directions.
    pub fn unblock_road(&mut self, a: usize, b: usize) -> Result<bool> {
        self.set_blocked(a, b, false)
    }

    /// Whether every `a -> b` record is blocked. `false` if there is none.
    pub fn is_blocked(&self, a: usize, b: usize) -> bool {
        let mut matching = self.roads(a).iter().filter(|road| road.to == b).peekable();
        matching.peek().is_some() && matching.all(|road| road.blocked)
    }

    /// Shortest routes from `start` over open roads, recomputed from scratch.
    pub fn evacuation_routes(&self, start: usize) -> Result<ShortestPaths> {
        dijkstra::shortest_paths(self, start)
    }

    fn set_blocked(&mut self, a: usize, b: usize, blocked: bool) -> Result<bool> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;

        let mut found = false;
        for (from, to) in [(a, b), (b, a)] {
            // every record for the pair, so a duplicate cannot stay open
            for road in self.adjacency[from].iter_mut().filter(|road| road.to == to) {
                road.blocked = blocked;
                found = true;
            }
        }
        debug!(
            "{} road {a} <-> {b}: {}",
            if blocked { "block" } else { "unblock" },
            if found { "ok" } else { "no such road" }
        );
        Ok(found)
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        Error::check_index(vertex, self.vertex_count())
    }
}

impl WeightedAdjacency for RoadGraph {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn traversable_edges(&self, vertex: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.roads(vertex)
            .iter()
            .filter(|road| !road.blocked)
            .map(|road| (road.to, road.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> RoadGraph {
        let mut roads = RoadGraph::new(["Shelter", "Bridge", "Market", "Harbor"]);
        for (a, b, w) in [(0, 1, 2), (1, 0, 2), (1, 2, 3), (2, 1, 3), (0, 3, 9)] {
            roads.add_road(a, b, w).unwrap();
        }
        roads
    }

    #[test]
    fn test_routes_with_open_roads() {
        let routes = city().evacuation_routes(0).unwrap();
        assert_eq!(routes.distance(2), Some(5));
        assert_eq!(routes.path_to(2).unwrap(), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_blocking_only_edge_makes_target_unreachable_until_unblocked() {
        let mut roads = city();
        assert!(roads.block_road(1, 2).unwrap());
        assert!(roads.is_blocked(1, 2));
        assert!(roads.is_blocked(2, 1));

        let routes = roads.evacuation_routes(0).unwrap();
        assert_eq!(routes.distance(2), None);
        assert_eq!(routes.path_to(2).unwrap(), None);
        assert_eq!(routes.distance(1), Some(2));

        assert!(roads.unblock_road(2, 1).unwrap());
        assert!(!roads.is_blocked(1, 2));
        let routes = roads.evacuation_routes(0).unwrap();
        assert_eq!(routes.distance(2), Some(5));
    }

    #[test]
    fn test_block_one_directional_road() {
        let mut roads = city();
        assert!(roads.block_road(3, 0).unwrap());
        assert!(roads.is_blocked(0, 3));
        assert!(!roads.is_blocked(3, 0));
        assert_eq!(roads.evacuation_routes(0).unwrap().distance(3), None);
    }

    #[test]
    fn test_block_missing_road() {
        let mut roads = city();
        assert!(!roads.block_road(2, 3).unwrap());
        assert!(!roads.unblock_road(2, 3).unwrap());
        assert!(!roads.is_blocked(2, 3));
    }

    #[test]
    fn test_block_out_of_range() {
        let mut roads = city();
        assert!(matches!(
            roads.block_road(0, 4),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn test_detour_after_block() {
        let mut roads = city();
        roads.add_road(0, 2, 20).unwrap();
        roads.block_road(0, 1).unwrap();
        let routes = roads.evacuation_routes(0).unwrap();
        assert_eq!(routes.distance(2), Some(20));
        assert_eq!(routes.distance(1), Some(23));
    }

    #[test]
    fn test_block_covers_appended_duplicates() {
        let mut graph =
            Graph::with_vertices(2).with_duplicate_policy(DuplicateEdgePolicy::AppendLower);
        graph.add_directed_edge(0, 1, 8).unwrap();
        graph.add_directed_edge(0, 1, 3).unwrap();
        let mut roads = RoadGraph::from_graph(&graph);
        assert_eq!(roads.roads(0).len(), 2);

        roads.block_road(0, 1).unwrap();
        assert!(roads.is_blocked(0, 1));
        assert_eq!(roads.evacuation_routes(0).unwrap().distance(1), None);
    }

    #[test]
    fn test_from_graph_copies_edges() {
        let mut graph = Graph::new(["A", "B"]);
        graph.add_directed_edge(0, 1, 6).unwrap();
        let roads = RoadGraph::from_graph(&graph);
        assert_eq!(roads.name(1), Some("B"));
        assert_eq!(
            roads.roads(0),
            &[Road {
                to: 1,
                weight: 6,
                blocked: false
            }]
        );
        assert_eq!(roads.evacuation_routes(0).unwrap().distance(1), Some(6));
    }
}
