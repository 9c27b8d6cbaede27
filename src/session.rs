use log::{debug, info};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::cluster::{k_medoids, Clustering, KMedoidsConfig};
use crate::error::{Error, Result};
use crate::graph::{
    dijkstra, prim, Graph, MinimumSpanningTree, RoadGraph, ShortestPaths, TeamAllocation,
};
use crate::loader::{load_matrix, read_matrix, EdgeMode};

/// Role of an infrastructure site. Only affects which sites analyses start
/// from or route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteCategory {
    RescueStation,
    Hospital,
    GovernmentBuilding,
    #[default]
    Standard,
}

impl SiteCategory {
    /// Menu numbering: 1 rescue station, 2 hospital, 3 government building,
    /// anything else standard.
    pub fn from_choice(choice: u32) -> Self {
        match choice {
            1 => SiteCategory::RescueStation,
            2 => SiteCategory::Hospital,
            3 => SiteCategory::GovernmentBuilding,
            _ => SiteCategory::Standard,
        }
    }
}

impl fmt::Display for SiteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiteCategory::RescueStation => "RESCUE_STATION",
            SiteCategory::Hospital => "HOSPITAL",
            SiteCategory::GovernmentBuilding => "GOVERNMENT_BUILDING",
            SiteCategory::Standard => "STANDARD_NODE",
        };
        f.write_str(name)
    }
}

/// Per-vertex metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub name: String,
    pub category: SiteCategory,
    pub priority: bool,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Site {
            name: name.into(),
            category: SiteCategory::Standard,
            priority: false,
        }
    }
}

/// Shortest route from a rescue station to a disaster site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyRoute {
    pub station: usize,
    pub site: usize,
    pub distance: Option<u64>,
    pub path: Option<Vec<usize>>,
}

/// State shared by the analyses over one loaded network.
///
/// The same matrix is held three ways: undirected for the spanning tree,
/// directed and deduplicated for routing, and as blockable roads for
/// evacuation planning.
#[derive(Debug, Clone)]
pub struct Session {
    infrastructure: Graph,
    routing: Graph,
    roads: RoadGraph,
    sites: Vec<Site>,
}

impl Session {
    /// Builds a session from the undirected and directed views of one network.
    pub fn new(infrastructure: Graph, routing: Graph) -> Result<Self> {
        if infrastructure.names() != routing.names() {
            return Err(Error::invalid_input(
                "infrastructure and routing graphs must share vertex names",
            ));
        }
        let roads = RoadGraph::from_graph(&routing);
        let sites = routing.names().iter().map(Site::new).collect();
        Ok(Session {
            infrastructure,
            routing,
            roads,
            sites,
        })
    }

    /// Parses matrix text into both views.
    pub fn from_matrix(text: &str) -> Result<Self> {
        let infrastructure = read_matrix(text.as_bytes(), EdgeMode::Undirected)?;
        let routing = read_matrix(text.as_bytes(), EdgeMode::Directed)?;
        Session::new(infrastructure, routing)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let infrastructure = load_matrix(path, EdgeMode::Undirected)?;
        let routing = load_matrix(path, EdgeMode::Directed)?;
        info!("loaded network from {}", path.display());
        Session::new(infrastructure, routing)
    }

    pub fn names(&self) -> &[String] {
        self.routing.names()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn infrastructure(&self) -> &Graph {
        &self.infrastructure
    }

    pub fn routing(&self) -> &Graph {
        &self.routing
    }

    pub fn roads(&self) -> &RoadGraph {
        &self.roads
    }

    /// Flags `vertex` as a priority site of the given category.
    pub fn mark_priority(&mut self, vertex: usize, category: SiteCategory) -> Result<()> {
        Error::check_index(vertex, self.sites.len())?;
        let site = &mut self.sites[vertex];
        site.priority = true;
        site.category = category;
        debug!("{} marked as priority {category}", site.name);
        Ok(())
    }

    /// Lowest-numbered priority site.
    pub fn first_priority(&self) -> Option<usize> {
        self.sites.iter().position(|site| site.priority)
    }

    /// Spanning tree from the first priority site, or vertex 0.
    pub fn rebuild_infrastructure(&self) -> Result<MinimumSpanningTree> {
        prim::minimum_spanning_tree(&self.infrastructure, self.first_priority().unwrap_or(0))
    }

    /// Shortest paths from the first priority site, or vertex 0.
    pub fn plan_evacuation(&self) -> Result<ShortestPaths> {
        dijkstra::shortest_paths(&self.routing, self.first_priority().unwrap_or(0))
    }

    pub fn block_road(&mut self, a: usize, b: usize) -> Result<bool> {
        self.roads.block_road(a, b)
    }

    pub fn unblock_road(&mut self, a: usize, b: usize) -> Result<bool> {
        self.roads.unblock_road(a, b)
    }

    /// Routes over open roads from the first priority site.
    ///
    /// # Errors
    /// * `InvalidInput` if no priority site has been set
    pub fn evacuation_routes(&self) -> Result<ShortestPaths> {
        let start = self
            .first_priority()
            .ok_or_else(|| Error::invalid_input("no priority node set"))?;
        self.roads.evacuation_routes(start)
    }

    /// Routes from every rescue station to every standard site over open
    /// roads. Empty if either group is empty.
    pub fn emergency_routes(&self) -> Result<Vec<EmergencyRoute>> {
        let by_category = |category: SiteCategory| {
            self.sites
                .iter()
                .enumerate()
                .filter(move |(_, site)| site.category == category)
                .map(|(i, _)| i)
                .collect::<Vec<_>>()
        };
        let stations = by_category(SiteCategory::RescueStation);
        let targets = by_category(SiteCategory::Standard);

        let mut routes = Vec::new();
        if stations.is_empty() || targets.is_empty() {
            return Ok(routes);
        }
        for &station in &stations {
            let paths = self.roads.evacuation_routes(station)?;
            for &site in &targets {
                routes.push(EmergencyRoute {
                    station,
                    site,
                    distance: paths.distance(site),
                    path: paths.path_to(site)?,
                });
            }
        }
        Ok(routes)
    }

    /// Clusters the network around `config.k` supply points.
    pub fn supply_points(&self, config: &KMedoidsConfig) -> Result<Clustering> {
        k_medoids(&self.infrastructure, config)
    }

    /// Assigns teams to nodes one-to-one. Returns the flow value and
    /// the 0-based team → node map.
    pub fn allocate_teams(
        &self,
        team_skills: &[HashSet<String>],
        node_requirements: &[HashSet<String>],
    ) -> Result<(i32, BTreeMap<usize, usize>)> {
        let mut allocation = TeamAllocation::build(team_skills, node_requirements)?;
        let flow = allocation.max_flow()?;
        Ok((flow, allocation.allocation()))
    }
}
