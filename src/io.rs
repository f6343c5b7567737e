//! JSON input files and the result report.
//!
//! Two side inputs accompany the graph: a line-oriented file of minimal
//! overlapping edge sets and a single JSON object describing the
//! automorphism group's action on edges. The result leaves the crate as
//! one serialised report on stdout; all counts are decimal strings since
//! they routinely exceed 64 bits.

use std::io::{BufRead, BufReader, Read};

use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct EdgeSetRecord {
    edges: Vec<usize>,
}

/// Reads minimal overlapping edge sets, one JSON object per line.
///
/// Empty lines are skipped and unknown fields are permitted. A record
/// with an empty `edges` array is dropped with a warning: an empty set
/// would reject every path, which is never what a precomputed overlap
/// analysis means.
pub fn read_edge_sets<R: Read>(reader: R) -> Result<Vec<Vec<usize>>, String> {
    let buf = BufReader::new(reader);
    let mut mopes = Vec::new();

    for (lineno, line) in buf.lines().enumerate() {
        let line = line.map_err(|e| format!("IO error: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: EdgeSetRecord = serde_json::from_str(&line)
            .map_err(|e| format!("line {}: {}", lineno + 1, e))?;
        if record.edges.is_empty() {
            log::warn!("empty edge set at line {}, skipping", lineno + 1);
            continue;
        }
        mopes.push(record.edges);
    }
    Ok(mopes)
}

/// The automorphism group's action on edge indices.
#[derive(Debug, Clone, Deserialize)]
pub struct Automorphisms {
    pub group_order: usize,
    pub edge_permutations: Vec<Vec<usize>>,
    #[serde(default)]
    pub zero_flags: Option<Vec<bool>>,
}

/// Reads and validates an automorphism file against the edge count.
///
/// A permutation of the wrong length is fatal; a permutation count that
/// disagrees with `group_order` is only warned about, since the sum is
/// still divided by the declared order.
pub fn read_automorphisms<R: Read>(reader: R, num_edges: usize) -> Result<Automorphisms, String> {
    let auto: Automorphisms =
        serde_json::from_reader(reader).map_err(|e| format!("invalid automorphism file: {}", e))?;

    if auto.group_order == 0 {
        return Err("group_order must be positive".to_string());
    }
    for (i, perm) in auto.edge_permutations.iter().enumerate() {
        if perm.len() != num_edges {
            return Err(format!(
                "permutation {} has length {} but the graph has {} edges",
                i,
                perm.len(),
                num_edges
            ));
        }
    }
    if auto.edge_permutations.len() != auto.group_order {
        log::warn!(
            "{} permutations listed but group_order is {}",
            auto.edge_permutations.len(),
            auto.group_order
        );
    }
    if let Some(flags) = &auto.zero_flags {
        let marked = flags.iter().filter(|&&z| z).count();
        log::info!(
            "loaded {} automorphisms, {} marked as fixed-point-free",
            auto.edge_permutations.len(),
            marked
        );
    } else {
        log::info!("loaded {} automorphisms", auto.edge_permutations.len());
    }

    Ok(auto)
}

/// The report printed on stdout.
#[derive(Debug, Serialize)]
pub struct Report {
    pub input_file: String,
    pub vertices: usize,
    pub edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_depth: Option<usize>,
    pub phase4: Phase4,
    pub phase5: Phase5,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase6: Option<Phase6>,
}

#[derive(Debug, Serialize)]
pub struct Phase4 {
    pub build_time_ms: f64,
    pub spanning_tree_count: String,
}

#[derive(Debug, Serialize)]
pub struct Phase5 {
    pub filter_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_mopes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subset_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_overlapping_count: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Phase6 {
    pub burnside_applied: bool,
    pub group_order: usize,
    pub burnside_time_ms: f64,
    pub burnside_sum: String,
    pub nonisomorphic_count: String,
    pub invariant_counts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_sets_parse_and_skip() {
        let text = r#"{"edges": [0, 3, 5]}

{"edges": [2], "area": 1.25}
{"edges": []}
"#;
        let mopes = read_edge_sets(text.as_bytes()).unwrap();
        assert_eq!(mopes, vec![vec![0, 3, 5], vec![2]]);
    }

    #[test]
    fn edge_sets_reject_malformed_lines() {
        assert!(read_edge_sets("{\"edges\": [0,".as_bytes()).is_err());
    }

    #[test]
    fn automorphisms_parse() {
        let text = r#"{
            "group_order": 2,
            "edge_permutations": [[0, 1, 2], [0, 2, 1]],
            "zero_flags": [false, false]
        }"#;
        let auto = read_automorphisms(text.as_bytes(), 3).unwrap();
        assert_eq!(auto.group_order, 2);
        assert_eq!(auto.edge_permutations.len(), 2);
        assert_eq!(auto.zero_flags.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn automorphisms_reject_bad_length() {
        let text = r#"{"group_order": 1, "edge_permutations": [[0, 1]]}"#;
        assert!(read_automorphisms(text.as_bytes(), 3).is_err());
    }

    #[test]
    fn report_serialises_counts_as_strings() {
        let report = Report {
            input_file: "k4.grh".to_string(),
            vertices: 4,
            edges: 6,
            split_depth: None,
            phase4: Phase4 {
                build_time_ms: 0.12,
                spanning_tree_count: "16".to_string(),
            },
            phase5: Phase5 {
                filter_applied: false,
                num_mopes: None,
                subset_time_ms: None,
                non_overlapping_count: None,
            },
            phase6: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"spanning_tree_count\":\"16\""));
        assert!(!json.contains("split_depth"));
        assert!(!json.contains("phase6"));
    }
}
