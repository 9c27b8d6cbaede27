use log::debug;

use crate::collections::PriorityQueue;
use crate::error::{Error, Result};
use crate::graph::network::WeightedAdjacency;

const INFINITY: u64 = u64::MAX;

/// Single-source shortest-path tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    start: usize,
    distance: Vec<u64>,
    parent: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn vertex_count(&self) -> usize {
        self.distance.len()
    }

    /// Distance from `start`, or `None` if `target` is unreachable.
    pub fn distance(&self, target: usize) -> Option<u64> {
        self.distance
            .get(target)
            .copied()
            .filter(|&d| d != INFINITY)
    }

    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parent.get(vertex).copied().flatten()
    }

    pub fn is_reachable(&self, target: usize) -> bool {
        self.distance(target).is_some()
    }

    /// Vertices on the shortest path `start -> target`, both ends included.
    ///
    /// Returns `Ok(None)` when there is no path.
    pub fn path_to(&self, target: usize) -> Result<Option<Vec<usize>>> {
        Error::check_index(target, self.distance.len())?;
        if !self.is_reachable(target) {
            return Ok(None);
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.start {
            match self.parent[current] {
                Some(p) => {
                    path.push(p);
                    current = p;
                }
                None => return Ok(None),
            }
        }
        path.reverse();
        Ok(Some(path))
    }
}

/// Computes shortest distances from `start` to every vertex of `graph`
/// using Dijkstra's algorithm with an indexed priority queue.
///
/// Only edges reported by [`WeightedAdjacency::traversable_edges`] are
/// relaxed. The traversal ends early once the queue yields a vertex that is
/// still at distance ∞.
///
/// # Examples
/// ```
/// use reliefnet::graph::{dijkstra, Graph};
///
/// let mut graph = Graph::new(["A", "B", "C"]);
/// graph.add_directed_edge(0, 1, 4).unwrap();
/// graph.add_directed_edge(1, 2, 3).unwrap();
///
/// let paths = dijkstra::shortest_paths(&graph, 0).unwrap();
/// assert_eq!(paths.distance(2), Some(7));
/// assert_eq!(paths.path_to(2).unwrap(), Some(vec![0, 1, 2]));
/// ```
///
/// # Complexity
/// * Time: O((V + E) log V)
/// * Space: O(V)
pub fn shortest_paths<G: WeightedAdjacency>(graph: &G, start: usize) -> Result<ShortestPaths> {
    let n = graph.vertex_count();
    Error::check_index(start, n)?;

    let mut distance = vec![INFINITY; n];
    let mut parent = vec![None; n];
    let mut settled = vec![false; n];
    distance[start] = 0;

    let mut queue = PriorityQueue::new(n);
    for (v, &d) in distance.iter().enumerate() {
        queue.enqueue(v, d)?;
    }

    while !queue.is_empty() {
        let u = queue.dequeue()?.vertex();
        if distance[u] == INFINITY {
            break;
        }
        settled[u] = true;

        for (v, weight) in graph.traversable_edges(u) {
            if settled[v] {
                continue;
            }
            let candidate = distance[u].saturating_add(u64::from(weight));
            if candidate < distance[v] {
                distance[v] = candidate;
                parent[v] = Some(u);
                queue.decrease_key(v, candidate)?;
            }
        }
    }

    debug!(
        "dijkstra from {start}: {} of {n} vertices reachable",
        distance.iter().filter(|&&d| d != INFINITY).count()
    );
    Ok(ShortestPaths {
        start,
        distance,
        parent,
    })
}
