//! # Adjacency-matrix text format
//!
//! ```text
//! A B C
//! A 0 4 0
//! B 4 0 2
//! C 0 2 0
//! ```
//!
//! The first non-empty line lists the vertex names and fixes their order.
//! Each following row starts with a label and holds the weights from that
//! vertex to every vertex in order. A weight `<= 0` means "no edge". Rows
//! may be shorter than the vertex count; missing columns are no edge.

use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::Graph;

/// How matrix cells become edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMode {
    /// Every positive cell inserts both directions via [`Graph::add_edge`].
    Undirected,
    /// Every positive cell inserts one direction via [`Graph::add_directed_edge`].
    Directed,
}

/// Reads a graph from adjacency-matrix text.
///
/// # Errors
/// * `Parse` for a missing header or row, a non-integer weight, or a row
///   with more weights than vertices
/// * `Io` if reading fails
pub fn read_matrix<R: BufRead>(reader: R, mode: EdgeMode) -> Result<Graph> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)))
        .filter(|line| !matches!(line, Ok((_, l)) if l.trim().is_empty()));

    let (_, header) = lines
        .next()
        .transpose()?
        .ok_or_else(|| Error::parse(1, "missing vertex names"))?;
    let names: Vec<&str> = header.split_whitespace().collect();
    let n = names.len();
    let mut graph = Graph::new(names.iter().copied());

    for src in 0..n {
        let (line_no, row) = lines.next().transpose()?.ok_or_else(|| {
            Error::parse(src + 2, format!("missing row for vertex {}", names[src]))
        })?;
        let weights: Vec<&str> = row.split_whitespace().skip(1).collect();
        if weights.len() > n {
            return Err(Error::parse(
                line_no,
                format!("{} weights for {n} vertices", weights.len()),
            ));
        }
        for (dest, cell) in weights.iter().enumerate() {
            let weight: i64 = cell
                .parse()
                .map_err(|_| Error::parse(line_no, format!("invalid weight {cell:?}")))?;
            if weight <= 0 {
                continue;
            }
            let weight = u32::try_from(weight)
                .map_err(|_| Error::parse(line_no, format!("weight {weight} out of range")))?;
            match mode {
                EdgeMode::Undirected => graph.add_edge(src, dest, weight)?,
                EdgeMode::Directed => graph.add_directed_edge(src, dest, weight)?,
            }
        }
    }

    debug!(
        "loaded {n} vertices and {} adjacency records ({mode:?})",
        graph.edge_count()
    );
    Ok(graph)
}

/// Opens `path` and reads it with [`read_matrix`].
pub fn load_matrix<P: AsRef<Path>>(path: P, mode: EdgeMode) -> Result<Graph> {
    let file = File::open(path)?;
    read_matrix(BufReader::new(file), mode)
}

/// Writes `graph` in adjacency-matrix form, one cell per ordered pair.
///
/// Each cell holds the weight of the first `i -> j` record, `0` if none.
/// Reading the output back with [`EdgeMode::Directed`] gives the same
/// adjacency as a deduplicated view of `graph`.
pub fn write_matrix<W: Write>(graph: &Graph, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", graph.names().join(" "))?;
    for (src, name) in graph.names().iter().enumerate() {
        write!(writer, "{name}")?;
        for dest in 0..graph.vertex_count() {
            write!(writer, " {}", graph.weight(src, dest).unwrap_or(0))?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
