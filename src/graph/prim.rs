use log::debug;

use crate::collections::PriorityQueue;
use crate::error::{Error, Result};
use crate::graph::network::Graph;

const INFINITY: u64 = u64::MAX;

/// Parent-pointer tree produced by Prim's algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumSpanningTree {
    start: usize,
    parent: Vec<Option<usize>>,
    /// Weight of the edge connecting each vertex to its parent.
    key: Vec<u64>,
}

impl MinimumSpanningTree {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parent.get(vertex).copied().flatten()
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parent
    }

    /// Whether `vertex` is part of the tree grown from `start`.
    pub fn contains(&self, vertex: usize) -> bool {
        vertex == self.start || self.parent(vertex).is_some()
    }

    /// Tree edges as `(parent, child, weight)` in depth-first order from `start`.
    ///
    /// Only children whose parent is the current node are followed, so
    /// vertices outside the start component never appear.
    pub fn edges(&self) -> Vec<(usize, usize, u64)> {
        let n = self.parent.len();
        let mut children = vec![Vec::new(); n];
        for (child, parent) in self.parent.iter().enumerate() {
            if let Some(p) = *parent {
                children[p].push(child);
            }
        }

        let mut visited = vec![false; n];
        let mut edges = Vec::new();
        let mut stack = vec![self.start];

        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            if let Some(p) = self.parent[node] {
                edges.push((p, node, self.key[node]));
            }
            // push in reverse so lower ids are walked first
            stack.extend(children[node].iter().rev().filter(|&&c| !visited[c]));
        }
        edges
    }

    /// Sum of the parent-edge weights.
    ///
    /// Only vertices in the start component have a parent, so this equals
    /// the weight of [`edges`](Self::edges).
    pub fn total_weight(&self) -> u64 {
        self.parent
            .iter()
            .zip(&self.key)
            .filter(|(parent, _)| parent.is_some())
            .map(|(_, &w)| w)
            .sum()
    }
}

/// Computes a minimum spanning tree of the component containing `start`
/// using Prim's algorithm with an indexed priority queue.
///
/// Every vertex is queued at key ∞ except `start` at 0. The traversal stops
/// as soon as the queue yields a vertex still at ∞, so vertices in other
/// components keep no parent.
///
/// # Examples
/// ```
/// use reliefnet::graph::{prim, Graph};
///
/// let mut graph = Graph::new(["A", "B", "C"]);
/// graph.add_edge(0, 1, 4).unwrap();
/// graph.add_edge(0, 2, 2).unwrap();
/// graph.add_edge(1, 2, 1).unwrap();
///
/// let mst = prim::minimum_spanning_tree(&graph, 0).unwrap();
/// assert_eq!(mst.total_weight(), 3);
/// ```
///
/// # Complexity
/// * Time: O((V + E) log V)
/// * Space: O(V)
///
/// # Errors
/// * `IndexOutOfRange` if `start` is not a vertex of the graph
pub fn minimum_spanning_tree(graph: &Graph, start: usize) -> Result<MinimumSpanningTree> {
    let n = graph.vertex_count();
    Error::check_index(start, n)?;

    let mut parent = vec![None; n];
    let mut key = vec![INFINITY; n];
    let mut in_tree = vec![false; n];
    key[start] = 0;

    let mut queue = PriorityQueue::new(n);
    for (v, &k) in key.iter().enumerate() {
        queue.enqueue(v, k)?;
    }

    while !queue.is_empty() {
        let u = queue.dequeue()?.vertex();
        if key[u] == INFINITY {
            break;
        }
        in_tree[u] = true;

        for edge in graph.neighbors(u) {
            let v = edge.to;
            let weight = u64::from(edge.weight);
            if !in_tree[v] && weight < key[v] {
                parent[v] = Some(u);
                key[v] = weight;
                queue.decrease_key(v, weight)?;
            }
        }
    }

    let mst = MinimumSpanningTree { start, parent, key };
    debug!(
        "prim from {start}: {} edges, total weight {}",
        mst.edges().len(),
        mst.total_weight()
    );
    Ok(mst)
}
