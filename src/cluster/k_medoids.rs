use log::{debug, trace, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Pairwise distances between the items being clustered.
pub trait DistanceOracle {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distance from `a` to `b`. `u64::MAX` means "infinitely far".
    fn distance(&self, a: usize, b: usize) -> u64;
}

/// Graph vertices are at distance 0 from themselves, the edge weight from a
/// neighbour, and infinitely far from everything else.
impl DistanceOracle for Graph {
    fn len(&self) -> usize {
        self.vertex_count()
    }

    fn distance(&self, a: usize, b: usize) -> u64 {
        if a == b {
            return 0;
        }
        self.weight(a, b).map_or(u64::MAX, u64::from)
    }
}

/// Configuration options for k-medoids clustering.
#[derive(Debug, Clone)]
pub struct KMedoidsConfig {
    /// Number of clusters to find.
    pub k: usize,
    /// Maximum number of assign/update rounds.
    pub max_iterations: usize,
    /// Seed for the initial medoid draw. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl KMedoidsConfig {
    /// Create a new config with `max_iterations = 1000` and no fixed seed.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 1000,
            seed: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of a k-medoids run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    /// Final medoid → members (the medoid included), members ascending.
    pub clusters: BTreeMap<usize, Vec<usize>>,
    /// Number of assign/update rounds performed.
    pub iterations: usize,
    /// Whether the medoids reached a fixed point before the iteration cap.
    pub converged: bool,
    /// Total intra-cluster distance after each assignment step.
    pub cost_history: Vec<u64>,
}

impl Clustering {
    pub fn medoids(&self) -> Vec<usize> {
        self.clusters.keys().copied().collect()
    }

    /// Medoid of the cluster containing `item`.
    pub fn medoid_of(&self, item: usize) -> Option<usize> {
        self.clusters
            .iter()
            .find(|(_, members)| members.contains(&item))
            .map(|(&medoid, _)| medoid)
    }
}

/// Sum of distances from each member to its medoid.
pub fn total_cost<D: DistanceOracle>(oracle: &D, clusters: &BTreeMap<usize, Vec<usize>>) -> u64 {
    clusters
        .iter()
        .flat_map(|(&medoid, members)| members.iter().map(move |&m| (medoid, m)))
        .fold(0u64, |acc, (medoid, m)| {
            acc.saturating_add(oracle.distance(m, medoid))
        })
}

/// Partitions the items of `oracle` into at most `config.k` clusters around
/// medoids.
///
/// Initial medoids are drawn uniformly by rejection sampling. Each round
/// assigns every item to its nearest medoid (first minimum in medoid order
/// wins), then replaces each medoid with the member minimising the total
/// distance from the rest of its cluster. Empty clusters keep their medoid.
/// Stops when no medoid changes or after `max_iterations` rounds.
///
/// # Example
/// ```
/// use reliefnet::cluster::{k_medoids, KMedoidsConfig};
/// use reliefnet::graph::Graph;
///
/// let mut graph = Graph::new(["A", "B", "C"]);
/// graph.add_edge(0, 1, 2).unwrap();
/// graph.add_edge(1, 2, 3).unwrap();
///
/// let clustering = k_medoids(&graph, &KMedoidsConfig::new(3).with_seed(7)).unwrap();
/// assert_eq!(clustering.clusters.len(), 3);
/// ```
///
/// # Errors
/// * `InvalidInput` if `k` is 0 or there is nothing to cluster
pub fn k_medoids<D: DistanceOracle>(oracle: &D, config: &KMedoidsConfig) -> Result<Clustering> {
    let n = oracle.len();
    if n == 0 {
        return Err(Error::invalid_input("cannot cluster an empty graph"));
    }
    if config.k == 0 {
        return Err(Error::invalid_input("k must be at least 1"));
    }
    let k = if config.k > n {
        warn!("k = {} exceeds {n} vertices, clamping", config.k);
        n
    } else {
        config.k
    };

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut medoids: Vec<usize> = Vec::with_capacity(k);
    while medoids.len() < k {
        let candidate = rng.gen_range(0..n);
        if !medoids.contains(&candidate) {
            medoids.push(candidate);
        }
    }

    let mut cost_history = Vec::new();
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        let clusters = assign(oracle, &medoids);
        cost_history.push(total_cost(oracle, &clusters));

        let mut changed = false;
        let mut updated = Vec::with_capacity(medoids.len());
        for &medoid in &medoids {
            let best = match clusters.get(&medoid) {
                Some(members) if !members.is_empty() => best_medoid(oracle, medoid, members),
                _ => medoid,
            };
            if best != medoid {
                trace!("medoid {medoid} -> {best}");
                changed = true;
            }
            updated.push(best);
        }
        medoids = updated;

        if !changed {
            converged = true;
            break;
        }
    }

    // keyed by the final medoids, also when the cap was hit
    let clusters = assign(oracle, &medoids);

    debug!(
        "k-medoids: {} clusters after {iterations} iteration(s), converged = {converged}",
        clusters.len()
    );
    Ok(Clustering {
        clusters,
        iterations,
        converged,
        cost_history,
    })
}

/// Maps each medoid to the items whose nearest medoid it is.
fn assign<D: DistanceOracle>(oracle: &D, medoids: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for item in 0..oracle.len() {
        let mut nearest: Option<(usize, u64)> = None;
        for &medoid in medoids {
            let d = oracle.distance(item, medoid);
            if nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((medoid, d));
            }
        }
        if let Some((medoid, _)) = nearest {
            clusters.entry(medoid).or_default().push(item);
        }
    }
    clusters
}

/// Member of `members` with the smallest total distance from all members,
/// measured member → candidate as in [`assign`] and [`total_cost`].
/// The current medoid is only replaced by a strictly cheaper candidate.
fn best_medoid<D: DistanceOracle>(oracle: &D, current: usize, members: &[usize]) -> usize {
    let cost_of = |candidate: usize| {
        members.iter().fold(0u64, |acc, &m| {
            acc.saturating_add(oracle.distance(m, candidate))
        })
    };
    let mut best = current;
    let mut best_cost = cost_of(current);
    for &candidate in members {
        let cost = cost_of(candidate);
        if cost < best_cost {
            best_cost = cost;
            best = candidate;
        }
    }
    best
}
