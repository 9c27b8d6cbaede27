pub mod k_medoids;

pub use k_medoids::{k_medoids, total_cost, Clustering, DistanceOracle, KMedoidsConfig};
