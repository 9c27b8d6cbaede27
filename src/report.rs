//! Plain-text rendering of analysis results for the console.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::cluster::Clustering;
use crate::error::Result;
use crate::graph::{Graph, MinimumSpanningTree, RoadGraph, ShortestPaths};
use crate::session::EmergencyRoute;

const NO_PATH: &str = "No path available";

fn label(names: &[String], vertex: usize) -> String {
    names
        .get(vertex)
        .cloned()
        .unwrap_or_else(|| vertex.to_string())
}

fn route(names: &[String], path: &[usize]) -> String {
    path.iter()
        .map(|&v| label(names, v))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// `A → B(3), C(5)` per vertex.
pub fn render_network(graph: &Graph) -> String {
    let names = graph.names();
    let mut out = String::from("Graph Structure:\n---------------\n");
    for v in 0..graph.vertex_count() {
        let neighbors: Vec<String> = graph
            .neighbors(v)
            .iter()
            .map(|e| format!("{}({})", label(names, e.to), e.weight))
            .collect();
        let _ = writeln!(out, "{:<2} → {}", label(names, v), neighbors.join(", "));
    }
    out.push_str("---------------\n");
    out
}

/// Like [`render_network`], marking blocked roads.
pub fn render_roads(roads: &RoadGraph) -> String {
    let names = roads.names();
    let mut out = String::from("Evacuation Network Structure:\n----------------------------\n");
    for v in 0..roads.vertex_count() {
        let neighbors: Vec<String> = roads
            .roads(v)
            .iter()
            .map(|r| {
                let mark = if r.blocked { "[BLOCKED]" } else { "" };
                format!("{}({}){mark}", label(names, r.to), r.weight)
            })
            .collect();
        let _ = writeln!(out, "{:<2} → {}", label(names, v), neighbors.join(", "));
    }
    out.push_str("----------------------------\n");
    out
}

pub fn render_mst(names: &[String], mst: &MinimumSpanningTree) -> String {
    let mut out =
        String::from("=== Minimum Spanning Tree ===\nEdge \t\tWeight\n----------------------\n");
    for (parent, child, weight) in mst.edges() {
        let _ = writeln!(
            out,
            "{} -- {} \t{weight}",
            label(names, parent),
            label(names, child)
        );
    }
    let _ = writeln!(
        out,
        "----------------------\nTotal MST Weight: {}",
        mst.total_weight()
    );
    out
}

/// Destination / distance / route table for every vertex except the start.
pub fn render_paths(names: &[String], paths: &ShortestPaths) -> Result<String> {
    let mut out = format!(
        "=== Shortest Paths from {} ===\nDestination\tDistance\tPath\n\
         ----------------------------------------\n",
        label(names, paths.start())
    );
    for target in (0..paths.vertex_count()).filter(|&t| t != paths.start()) {
        let distance = paths
            .distance(target)
            .map_or_else(|| "∞".to_string(), |d| d.to_string());
        let path = match paths.path_to(target)? {
            Some(path) => route(names, &path),
            None => NO_PATH.to_string(),
        };
        let _ = writeln!(out, "{:<12}\t{distance:<9}\t{path}", label(names, target));
    }
    Ok(out)
}

pub fn render_emergency_routes(names: &[String], routes: &[EmergencyRoute]) -> String {
    if routes.is_empty() {
        return "No emergency service stations or disaster sites available\n".to_string();
    }
    let mut out = String::new();
    let mut station = None;
    for r in routes {
        if station != Some(r.station) {
            station = Some(r.station);
            let _ = writeln!(
                out,
                "Routes for emergency service station: {}",
                label(names, r.station)
            );
        }
        match (&r.path, r.distance) {
            (Some(path), Some(distance)) => {
                let _ = writeln!(
                    out,
                    "Route to disaster site: {} (Distance: {distance})\nPath: {}",
                    label(names, r.site),
                    route(names, path)
                );
            }
            _ => {
                let _ = writeln!(
                    out,
                    "No accessible route to disaster site: {}",
                    label(names, r.site)
                );
            }
        }
    }
    out
}

pub fn render_clusters(names: &[String], clustering: &Clustering) -> String {
    let mut out = String::from("Clusters:\n");
    for (&medoid, members) in &clustering.clusters {
        let members: Vec<String> = members.iter().map(|&m| label(names, m)).collect();
        let _ = writeln!(
            out,
            "Medoid: {}\nNodes: {}",
            label(names, medoid),
            members.join(" ")
        );
    }
    out
}

/// Team and node numbers are shown 1-based.
pub fn render_allocation(flow: i32, allocation: &BTreeMap<usize, usize>) -> String {
    let mut out = format!("Maximum number of functional nodes: {flow}\nResource Allocation:\n");
    for (team, node) in allocation {
        let _ = writeln!(out, "Team {} -> Node {}", team + 1, node + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{k_medoids, KMedoidsConfig};
    use crate::graph::{dijkstra, prim};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_mst() {
        let mut graph = Graph::new(["A", "B", "C", "D", "E"]);
        graph.add_edge(0, 1, 10).unwrap();
        graph.add_edge(0, 2, 20).unwrap();
        graph.add_edge(1, 2, 5).unwrap();
        graph.add_edge(3, 4, 15).unwrap();
        let mst = prim::minimum_spanning_tree(&graph, 0).unwrap();

        let text = render_mst(graph.names(), &mst);
        assert!(text.contains("A -- B \t10"));
        assert!(text.contains("B -- C \t5"));
        assert!(!text.contains("D -- E"));
        assert!(text.contains("Total MST Weight: 15"));
    }

    #[test]
    fn test_render_paths() {
        let mut graph = Graph::new(["A", "B", "C"]);
        graph.add_directed_edge(0, 1, 7).unwrap();
        let paths = dijkstra::shortest_paths(&graph, 0).unwrap();

        let text = render_paths(graph.names(), &paths).unwrap();
        assert!(text.starts_with("=== Shortest Paths from A ==="));
        assert!(text.contains("A → B"));
        assert!(text.contains("∞"));
        assert!(text.contains(NO_PATH));
    }

    #[test]
    fn test_render_network_and_roads() {
        let mut graph = Graph::new(["A", "B"]);
        graph.add_directed_edge(0, 1, 3).unwrap();
        assert!(render_network(&graph).contains("A  → B(3)"));

        let mut roads = RoadGraph::from_graph(&graph);
        roads.block_road(0, 1).unwrap();
        assert!(render_roads(&roads).contains("B(3)[BLOCKED]"));
    }

    #[test]
    fn test_render_clusters() {
        let graph = Graph::new(["A", "B"]);
        let clustering = k_medoids(&graph, &KMedoidsConfig::new(2).with_seed(0)).unwrap();
        let text = render_clusters(graph.names(), &clustering);
        assert!(text.contains("Medoid: A\nNodes: A"));
        assert!(text.contains("Medoid: B\nNodes: B"));
    }

    #[test]
    fn test_render_allocation_is_one_based() {
        let allocation = BTreeMap::from([(0, 1), (2, 0)]);
        let text = render_allocation(2, &allocation);
        assert!(text.contains("Maximum number of functional nodes: 2"));
        assert!(text.contains("Team 1 -> Node 2"));
        assert!(text.contains("Team 3 -> Node 1"));
    }

    #[test]
    fn test_render_emergency_routes() {
        let routes = vec![
            EmergencyRoute {
                station: 0,
                site: 1,
                distance: Some(4),
                path: Some(vec![0, 1]),
            },
            EmergencyRoute {
                station: 0,
                site: 2,
                distance: None,
                path: None,
            },
        ];
        let text = render_emergency_routes(&names(&["Fire", "Mall", "Farm"]), &routes);
        assert!(text.contains("Routes for emergency service station: Fire"));
        assert!(text.contains("Route to disaster site: Mall (Distance: 4)\nPath: Fire → Mall"));
        assert!(text.contains("No accessible route to disaster site: Farm"));
        assert!(render_emergency_routes(&[], &[]).starts_with("No emergency"));
    }
}
