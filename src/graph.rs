//! The input polyhedron graph and its `.grh` text format.
//!
//! The edge sequence is part of the graph's identity: edge `i` is decision
//! variable `i` of every diagram built over the graph, so callers are
//! expected to supply an ordering with small frontier width (produced by an
//! external path-decomposition tool).

use std::io::{BufRead, BufReader, Read, Write};

/// An undirected edge, stored with 0-indexed endpoints.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Edge {
    pub u: u16,
    pub v: u16,
}

/// An immutable undirected multigraph with a canonical edge order.
///
/// Endpoints are 0-indexed internally; the `.grh` surface format is
/// 1-indexed. Parallel edges are permitted, self-loops are not.
#[derive(Debug, Clone)]
pub struct Graph {
    num_vertices: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Maximum supported vertex count.
    pub const MAX_VERTICES: usize = 1 << 15;

    /// Creates a graph from 0-indexed endpoint pairs.
    pub fn new(num_vertices: usize, pairs: &[(u16, u16)]) -> Result<Graph, String> {
        if num_vertices > Self::MAX_VERTICES {
            return Err(format!(
                "vertex count {} exceeds maximum supported ({})",
                num_vertices,
                Self::MAX_VERTICES
            ));
        }
        let mut edges = Vec::with_capacity(pairs.len());
        for &(u, v) in pairs {
            if u == v {
                return Err(format!("self-loop at vertex {}", u));
            }
            if u as usize >= num_vertices || v as usize >= num_vertices {
                return Err(format!(
                    "edge ({}, {}) references a vertex outside [0, {})",
                    u, v, num_vertices
                ));
            }
            edges.push(Edge { u, v });
        }
        Ok(Graph { num_vertices, edges })
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, index: usize) -> Edge {
        self.edges[index]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Parses a graph from `.grh` text.
///
/// Recognised records (first whitespace-separated token decides):
///
/// - `p edge N M` — header; `N` fixes the vertex count. The announced edge
///   count `M` is not trusted: the `e` records actually read define |E|.
/// - `e u v` — an undirected edge with 1-indexed endpoints, appended in
///   file order.
/// - `c ...`, `l ...`, `t ...` and any unrecognised prefix — ignored.
pub fn read_grh<R: Read>(reader: R) -> Result<Graph, String> {
    let buf = BufReader::new(reader);
    let mut num_vertices: Option<usize> = None;
    let mut pairs: Vec<(u16, u16)> = Vec::new();

    for (lineno, line) in buf.lines().enumerate() {
        let line = line.map_err(|e| format!("IO error: {}", e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "p" => {
                if parts.len() < 4 || parts[1] != "edge" {
                    return Err(format!("line {}: invalid header: {}", lineno + 1, line));
                }
                let n = parts[2]
                    .parse::<usize>()
                    .map_err(|_| format!("line {}: invalid vertex count", lineno + 1))?;
                num_vertices = Some(n);
            }
            "e" => {
                if parts.len() < 3 {
                    return Err(format!("line {}: invalid edge record: {}", lineno + 1, line));
                }
                let u = parts[1]
                    .parse::<u32>()
                    .map_err(|_| format!("line {}: invalid endpoint", lineno + 1))?;
                let v = parts[2]
                    .parse::<u32>()
                    .map_err(|_| format!("line {}: invalid endpoint", lineno + 1))?;
                if u == 0 || v == 0 {
                    return Err(format!(
                        "line {}: endpoints are 1-indexed, got ({}, {})",
                        lineno + 1,
                        u,
                        v
                    ));
                }
                if u as usize > Graph::MAX_VERTICES || v as usize > Graph::MAX_VERTICES {
                    return Err(format!(
                        "line {}: endpoint exceeds maximum vertex count {}",
                        lineno + 1,
                        Graph::MAX_VERTICES
                    ));
                }
                pairs.push(((u - 1) as u16, (v - 1) as u16));
            }
            // Comments, length bounds and terminals are not this tool's
            // concern; unknown record types are likewise skipped.
            _ => {}
        }
    }

    let num_vertices =
        num_vertices.ok_or_else(|| "missing 'p edge N M' header".to_string())?;
    Graph::new(num_vertices, &pairs)
}

/// Writes a graph as `.grh` text, 1-indexed, edges in canonical order.
pub fn write_grh<W: Write>(graph: &Graph, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "p edge {} {}", graph.num_vertices(), graph.num_edges())?;
    for e in graph.edges() {
        writeln!(writer, "e {} {}", e.u + 1, e.v + 1)?;
    }
    Ok(())
}
