use log::warn;

use crate::error::{Error, Result};

/// An outgoing adjacency record: destination vertex and edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: usize,
    pub weight: u32,
}

/// How `add_directed_edge` records a lower weight for an existing `(src, dest)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateEdgePolicy {
    /// Overwrite the existing record in place.
    #[default]
    Replace,
    /// Append a second, lower-weight record and leave the stale one in the list.
    /// Both stay traversable; `weight()` keeps reporting the first record.
    AppendLower,
}

/// Read access to weighted adjacency lists, the seam shortest-path
/// traversals run over.
pub trait WeightedAdjacency {
    fn vertex_count(&self) -> usize;

    /// Edges leaving `vertex` that a traversal may follow.
    fn traversable_edges(&self, vertex: usize) -> impl Iterator<Item = (usize, u32)> + '_;
}

/// Adjacency-list graph over vertices `0..n` with display names.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    names: Vec<String>,
    duplicate_policy: DuplicateEdgePolicy,
}

impl Graph {
    /// Creates a graph with one vertex per name and no edges.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Graph {
            adjacency: vec![Vec::new(); names.len()],
            names,
            duplicate_policy: DuplicateEdgePolicy::default(),
        }
    }

    /// Creates a graph with `n` vertices named `"0"`, `"1"`, ...
    pub fn with_vertices(n: usize) -> Self {
        Graph::new((0..n).map(|i| i.to_string()))
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicateEdgePolicy {
        self.duplicate_policy
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

    /// Position of the first vertex called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Adds an undirected edge by inserting both directions.
    ///
    /// Zero-weight edges are dropped. Parallel edges are kept as-is.
    pub fn add_edge(&mut self, src: usize, dest: usize, weight: u32) -> Result<()> {
        self.check_vertex(src)?;
        self.check_vertex(dest)?;
        if weight == 0 {
            warn!("dropping zero-weight edge {src} -- {dest}");
            return Ok(());
        }
        self.adjacency[src].push(Edge { to: dest, weight });
        self.adjacency[dest].push(Edge { to: src, weight });
        Ok(())
    }

    /// Adds a directed edge, never raising the weight of an existing pair.
    ///
    /// Zero-weight edges are dropped. If `src -> dest` already exists, a lower
    /// weight is recorded according to the graph's [`DuplicateEdgePolicy`] and
    /// a higher or equal weight is ignored.
    pub fn add_directed_edge(&mut self, src: usize, dest: usize, weight: u32) -> Result<()> {
        self.check_vertex(src)?;
        self.check_vertex(dest)?;
        if weight == 0 {
            warn!("dropping zero-weight edge {src} -> {dest}");
            return Ok(());
        }
        merge_edge(
            &mut self.adjacency[src],
            dest,
            weight,
            self.duplicate_policy,
            |to, weight| Edge { to, weight },
            |edge| (edge.to, edge.weight),
            |edge, weight| edge.weight = weight,
        );
        Ok(())
    }

    /// Weight of the first `src -> dest` record, if any.
    pub fn weight(&self, src: usize, dest: usize) -> Option<u32> {
        self.adjacency
            .get(src)?
            .iter()
            .find(|edge| edge.to == dest)
            .map(|edge| edge.weight)
    }

    /// Adjacency list of `vertex`; empty for unknown vertices.
    pub fn neighbors(&self, vertex: usize) -> &[Edge] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All adjacency records as `(src, dest, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(src, list)| list.iter().map(move |e| (src, e.to, e.weight)))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<()> {
        Error::check_index(vertex, self.vertex_count())
    }
}

impl WeightedAdjacency for Graph {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn traversable_edges(&self, vertex: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.neighbors(vertex).iter().map(|edge| (edge.to, edge.weight))
    }
}

/// Shared dedup rule for directed insertion into one adjacency list.
pub(crate) fn merge_edge<E>(
    list: &mut Vec<E>,
    dest: usize,
    weight: u32,
    policy: DuplicateEdgePolicy,
    make: impl Fn(usize, u32) -> E,
    view: impl Fn(&E) -> (usize, u32),
    set_weight: impl Fn(&mut E, u32),
) {
    let Some(existing) = list.iter().position(|edge| view(edge).0 == dest) else {
        list.push(make(dest, weight));
        return;
    };
    if weight >= view(&list[existing]).1 {
        return;
    }
    match policy {
        DuplicateEdgePolicy::Replace => set_weight(&mut list[existing], weight),
        DuplicateEdgePolicy::AppendLower => list.push(make(dest, weight)),
    }
}
