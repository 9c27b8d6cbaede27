//! Graph analyses for disaster response planning: spanning trees for
//! rebuilding communication links, shortest and open-road evacuation routes,
//! k-medoids supply points, and team allocation by maximum flow.

pub mod cli;
pub mod cluster;
pub mod collections;
pub mod error;
pub mod graph;
pub mod loader;
pub mod report;
pub mod session;

pub use error::{Error, Result};
