use log::{debug, trace};
use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::error::{Error, Result};

/// One direction of a flow edge. Edges are stored in pairs: the forward
/// edge at an even index `e` and its reverse at `e ^ 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub capacity: i32,
    pub flow: i32,
}

impl FlowEdge {
    pub fn residual(&self) -> i32 {
        self.capacity - self.flow
    }
}

/// Flow network over integer node ids with an edge-index adjacency list.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    edges: Vec<FlowEdge>,
    adjacency: Vec<Vec<usize>>,
}

impl FlowNetwork {
    pub fn new(node_count: usize) -> Self {
        FlowNetwork {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Adds `from -> to` with `capacity` plus its zero-capacity reverse edge.
    /// Returns the index of the forward edge.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: i32) -> Result<usize> {
        Error::check_index(from, self.node_count())?;
        Error::check_index(to, self.node_count())?;
        if capacity < 0 {
            return Err(Error::invalid_input(format!(
                "negative capacity {capacity} on edge {from} -> {to}"
            )));
        }

        let forward = self.edges.len();
        self.edges.push(FlowEdge {
            from,
            to,
            capacity,
            flow: 0,
        });
        self.edges.push(FlowEdge {
            from: to,
            to: from,
            capacity: 0,
            flow: 0,
        });
        self.adjacency[from].push(forward);
        self.adjacency[to].push(forward + 1);
        Ok(forward)
    }

    /// Augments along BFS-shortest paths until none remain and returns the
    /// flow added by this call.
    ///
    /// # Complexity
    /// * Time: O(VE²)
    /// * Space: O(V + E)
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Result<i32> {
        Error::check_index(source, self.node_count())?;
        Error::check_index(sink, self.node_count())?;
        if source == sink {
            return Ok(0);
        }

        let mut total = 0;
        while let Some(path) = self.find_augmenting_path(source, sink) {
            let path_flow = path
                .iter()
                .map(|&e| self.edges[e].residual())
                .min()
                .unwrap_or(0);
            for &e in &path {
                self.edges[e].flow += path_flow;
                self.edges[e ^ 1].flow -= path_flow;
            }
            trace!("augmented {path_flow} unit(s) over {} edges", path.len());
            total += path_flow;
        }
        Ok(total)
    }

    /// BFS over edges with remaining residual capacity. Returns the edge
    /// indices of a shortest augmenting path, sink first.
    fn find_augmenting_path(&self, source: usize, sink: usize) -> Option<Vec<usize>> {
        let n = self.node_count();
        let mut visited = vec![false; n];
        let mut via = vec![None; n];
        let mut queue = VecDeque::new();

        queue.push_back(source);
        visited[source] = true;

        while let Some(u) = queue.pop_front() {
            for &e in &self.adjacency[u] {
                let edge = &self.edges[e];
                if !visited[edge.to] && edge.flow < edge.capacity {
                    via[edge.to] = Some(e);
                    visited[edge.to] = true;
                    if edge.to == sink {
                        return Some(self.trace_back(&via, sink));
                    }
                    queue.push_back(edge.to);
                }
            }
        }
        None
    }

    /// Follows discovering edges from `sink` back to the node with none.
    fn trace_back(&self, via: &[Option<usize>], sink: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut v = sink;
        while let Some(e) = via[v] {
            path.push(e);
            v = self.edges[e].from;
        }
        path
    }
}

/// Bipartite team-to-node allocation solved as unit-capacity max flow.
///
/// Node ids: `0` source, `1..=teams` teams, `teams+1..=teams+nodes`
/// requirement nodes, sink last. A team can serve a node when its skills
/// are a superset of the node's requirements.
#[derive(Debug, Clone)]
pub struct TeamAllocation {
    network: FlowNetwork,
    team_count: usize,
    node_count: usize,
    total_flow: i32,
}

impl TeamAllocation {
    pub fn build<S>(team_skills: &[HashSet<S>], node_requirements: &[HashSet<S>]) -> Result<Self>
    where
        S: Eq + std::hash::Hash,
    {
        let team_count = team_skills.len();
        let node_count = node_requirements.len();
        let sink = team_count + node_count + 1;
        let mut network = FlowNetwork::new(sink + 1);

        for team in 0..team_count {
            network.add_edge(0, team + 1, 1)?;
        }
        for (team, skills) in team_skills.iter().enumerate() {
            for (node, requirements) in node_requirements.iter().enumerate() {
                if skills.is_superset(requirements) {
                    network.add_edge(team + 1, team_count + node + 1, 1)?;
                }
            }
        }
        for node in 0..node_count {
            network.add_edge(team_count + node + 1, sink, 1)?;
        }

        Ok(TeamAllocation {
            network,
            team_count,
            node_count,
            total_flow: 0,
        })
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn source(&self) -> usize {
        0
    }

    pub fn sink(&self) -> usize {
        self.team_count + self.node_count + 1
    }

    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }

    /// Maximum number of nodes that can be served. Repeated calls return the
    /// same total.
    pub fn max_flow(&mut self) -> Result<i32> {
        let (source, sink) = (self.source(), self.sink());
        self.total_flow += self.network.max_flow(source, sink)?;
        debug!(
            "team allocation: {} of {} teams placed on {} nodes",
            self.total_flow, self.team_count, self.node_count
        );
        Ok(self.total_flow)
    }

    /// Team index → node index (both 0-based) for every team→node edge
    /// carrying flow. May be partial or empty.
    pub fn allocation(&self) -> BTreeMap<usize, usize> {
        let sink = self.sink();
        self.network
            .edges()
            .iter()
            .filter(|edge| {
                edge.from > 0
                    && edge.from <= self.team_count
                    && edge.to > self.team_count
                    && edge.to < sink
                    && edge.flow > 0
            })
            .map(|edge| (edge.from - 1, edge.to - self.team_count - 1))
            .collect()
    }
}

/// Splits a comma-separated skill list, trimming blanks.
pub fn parse_skill_set(input: &str) -> HashSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(sets: &[&str]) -> Vec<HashSet<String>> {
        sets.iter().map(|s| parse_skill_set(s)).collect()
    }

    #[test]
    fn test_flow_network_simple_graph() {
        let mut network = FlowNetwork::new(6);
        for (from, to, capacity) in [
            (0, 1, 16),
            (0, 2, 13),
            (1, 2, 10),
            (2, 1, 4),
            (1, 3, 12),
            (2, 4, 14),
            (3, 2, 9),
            (3, 5, 20),
            (4, 3, 7),
            (4, 5, 4),
        ] {
            network.add_edge(from, to, capacity).unwrap();
        }
        assert_eq!(network.max_flow(0, 5).unwrap(), 23);
        for pair in network.edges().chunks(2) {
            assert!(0 <= pair[0].flow && pair[0].flow <= pair[0].capacity);
            assert_eq!(pair[1].flow, -pair[0].flow);
        }
    }

    #[test]
    fn test_flow_network_no_path() {
        let mut network = FlowNetwork::new(4);
        network.add_edge(0, 1, 10).unwrap();
        network.add_edge(2, 3, 10).unwrap();
        assert_eq!(network.max_flow(0, 3).unwrap(), 0);
    }

    #[test]
    fn test_flow_network_invalid_vertex() {
        let mut network = FlowNetwork::new(2);
        assert!(matches!(
            network.add_edge(0, 2, 1),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            network.max_flow(0, 2),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            network.add_edge(0, 1, -1),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_edge_pairs_use_xor_indexing() {
        let mut network = FlowNetwork::new(3);
        let e = network.add_edge(0, 1, 5).unwrap();
        let f = network.add_edge(1, 2, 5).unwrap();
        assert_eq!((e, f), (0, 2));
        assert_eq!(network.edges()[e ^ 1].from, 1);
        assert_eq!(network.edges()[f ^ 1].to, 1);
        assert_eq!(network.edges()[f ^ 1].capacity, 0);
    }

    #[test]
    fn test_allocation_java_sql_example() {
        let teams = skills(&["java", "python,sql"]);
        let nodes = skills(&["java", "sql"]);
        let mut allocation = TeamAllocation::build(&teams, &nodes).unwrap();

        assert_eq!(allocation.max_flow().unwrap(), 2);
        let assignment = allocation.allocation();
        assert_eq!(assignment.get(&0), Some(&0));
        assert_eq!(assignment.get(&1), Some(&1));
    }

    #[test]
    fn test_allocation_superset_not_equality() {
        let teams = skills(&["medic, driver, radio"]);
        let nodes = skills(&["medic,radio"]);
        let mut allocation = TeamAllocation::build(&teams, &nodes).unwrap();
        assert_eq!(allocation.max_flow().unwrap(), 1);
        assert_eq!(allocation.allocation().len(), 1);
    }

    #[test]
    fn test_allocation_requires_rerouting() {
        // greedy team 0 -> node 0 would strand team 1
        let teams = skills(&["a,b", "a"]);
        let nodes = skills(&["a", "b"]);
        let mut allocation = TeamAllocation::build(&teams, &nodes).unwrap();
        assert_eq!(allocation.max_flow().unwrap(), 2);
        let assignment = allocation.allocation();
        assert_eq!(assignment.get(&0), Some(&1));
        assert_eq!(assignment.get(&1), Some(&0));
    }

    #[test]
    fn test_allocation_partial_is_not_an_error() {
        let teams = skills(&["a", "a", "a"]);
        let nodes = skills(&["a", "z"]);
        let mut allocation = TeamAllocation::build(&teams, &nodes).unwrap();
        assert_eq!(allocation.max_flow().unwrap(), 1);
        assert_eq!(allocation.allocation().len(), 1);

        let mut empty = TeamAllocation::build(&skills(&["x"]), &skills(&["y"])).unwrap();
        assert_eq!(empty.max_flow().unwrap(), 0);
        assert!(empty.allocation().is_empty());
    }

    #[test]
    fn test_allocation_max_flow_idempotent() {
        let mut allocation =
            TeamAllocation::build(&skills(&["a", "b"]), &skills(&["a", "b"])).unwrap();
        assert_eq!(allocation.max_flow().unwrap(), 2);
        assert_eq!(allocation.max_flow().unwrap(), 2);
    }

    #[test]
    fn test_allocation_bounds_and_one_to_one() {
        let teams = skills(&["a,b,c", "a", "b", "c", "a,c"]);
        let nodes = skills(&["a", "b", "c", "", "a,b"]);
        let mut allocation = TeamAllocation::build(&teams, &nodes).unwrap();
        let flow = allocation.max_flow().unwrap();
        assert!(flow as usize <= teams.len().min(nodes.len()));

        let assignment = allocation.allocation();
        assert_eq!(assignment.len(), flow as usize);
        let mut used_nodes: Vec<usize> = assignment.values().copied().collect();
        used_nodes.sort();
        used_nodes.dedup();
        assert_eq!(used_nodes.len(), assignment.len());
        for (&team, &node) in &assignment {
            assert!(teams[team].is_superset(&nodes[node]));
        }
    }

    #[test]
    fn test_parse_skill_set() {
        let set = parse_skill_set(" java, sql ,,python ");
        assert_eq!(set.len(), 3);
        assert!(set.contains("sql"));
        assert!(parse_skill_set("").is_empty());
    }
}
