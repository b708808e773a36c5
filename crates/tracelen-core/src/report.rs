//! Length-graph assembly and shortest-path reporting.
//!
//! Segment records become an undirected weighted graph; the report lists the
//! shortest-path length between every unordered pair of nodes exactly once.
//! The graph is simple: when two records connect the same node pair the
//! first-seen edge is kept and later ones are discarded, deterministically
//! by input order.

use crate::error::{MeasureError, Result};
use crate::segment::SegmentRecord;
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Sentinel length recorded for node pairs with no connecting path.
pub const UNREACHABLE: f64 = -1.0;

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRow {
    pub port1: String,
    pub port2: String,
    pub length: f64,
}

/// Ordered table of measured port pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathReport {
    rows: Vec<PathRow>,
}

/// Builds the undirected length graph from segment records.
pub fn build_graph(records: &[SegmentRecord]) -> UnGraph<String, f64> {
    let mut graph = UnGraph::<String, f64>::new_undirected();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();
    let mut intern = |graph: &mut UnGraph<String, f64>, name: &str| -> NodeIndex {
        *nodes
            .entry(name.to_string())
            .or_insert_with(|| graph.add_node(name.to_string()))
    };
    for record in records {
        let a = intern(&mut graph, &record.node1);
        let b = intern(&mut graph, &record.node2);
        // Parallel geometric segments between the same ports: first wins.
        if graph.find_edge(a, b).is_none() {
            graph.add_edge(a, b, record.length);
        }
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "assembled length graph"
    );
    graph
}

/// Computes deduplicated all-pairs shortest-path lengths.
///
/// Unreachable pairs are kept with the [`UNREACHABLE`] sentinel rather than
/// omitted. Fails when the graph has no nodes at all.
pub fn all_pairs_report(graph: &UnGraph<String, f64>) -> Result<PathReport> {
    if graph.node_count() == 0 {
        return Err(MeasureError::EmptyGraph);
    }

    let mut rows = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for start in graph.node_indices() {
        let lengths = dijkstra(graph, start, None, |e| *e.weight());
        for end in graph.node_indices() {
            if start == end {
                continue;
            }
            let port1 = graph[start].clone();
            let port2 = graph[end].clone();
            // Canonical unordered pair, first occurrence wins.
            let key = if port1 <= port2 {
                (port1.clone(), port2.clone())
            } else {
                (port2.clone(), port1.clone())
            };
            if !seen.insert(key) {
                continue;
            }
            let length = lengths.get(&end).copied().unwrap_or(UNREACHABLE);
            rows.push(PathRow {
                port1,
                port2,
                length,
            });
        }
    }
    Ok(PathReport { rows })
}

impl PathReport {
    /// The report rows in order.
    pub fn rows(&self) -> &[PathRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drops unreachable and degenerate zero-length rows.
    ///
    /// Fails when nothing measurable remains.
    pub fn retain_positive(mut self) -> Result<PathReport> {
        self.rows.retain(|r| r.length > 0.0);
        if self.rows.is_empty() {
            return Err(MeasureError::NoMeasurablePairs);
        }
        Ok(self)
    }

    /// Restricts the report to rows whose endpoints are both in `nodes`.
    pub fn filter_nodes(mut self, nodes: &[String]) -> PathReport {
        self.rows
            .retain(|r| nodes.contains(&r.port1) && nodes.contains(&r.port2));
        self
    }

    /// Renders the report as CSV with a header row.
    pub fn to_csv_string(&self) -> String {
        let mut out = String::from("port1,port2,length\n");
        for row in &self.rows {
            out.push_str(&format!("{},{},{}\n", row.port1, row.port2, row.length));
        }
        out
    }
}

impl std::fmt::Display for PathReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name_width = self
            .rows
            .iter()
            .flat_map(|r| [r.port1.len(), r.port2.len()])
            .max()
            .unwrap_or(5)
            .max(5);
        writeln!(
            f,
            "{:<w$}  {:<w$}  {}",
            "port1",
            "port2",
            "length",
            w = name_width
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<w$}  {:<w$}  {:.6}",
                row.port1,
                row.port2,
                row.length,
                w = name_width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(a: &str, b: &str, length: f64) -> SegmentRecord {
        SegmentRecord {
            node1: a.to_string(),
            node2: b.to_string(),
            length,
        }
    }

    #[test]
    fn test_shortest_paths_sum_along_chain() {
        let graph = build_graph(&[record("a", "b", 2.0), record("b", "c", 3.0)]);
        let report = all_pairs_report(&graph).expect("report");
        let ac = report
            .rows()
            .iter()
            .find(|r| {
                (r.port1 == "a" && r.port2 == "c") || (r.port1 == "c" && r.port2 == "a")
            })
            .expect("a-c row");
        assert!((ac.length - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_each_unordered_pair_appears_once() {
        let graph = build_graph(&[record("a", "b", 2.0), record("b", "c", 3.0)]);
        let report = all_pairs_report(&graph).expect("report");
        assert_eq!(report.rows().len(), 3);
        for row in report.rows() {
            let reversed = report
                .rows()
                .iter()
                .any(|r| r.port1 == row.port2 && r.port2 == row.port1);
            assert!(!reversed, "found mirrored duplicate of {:?}", row);
        }
    }

    #[test]
    fn test_unreachable_pairs_get_sentinel_then_drop() {
        let graph = build_graph(&[record("a", "b", 2.0), record("x", "y", 3.0)]);
        let report = all_pairs_report(&graph).expect("report");
        let cross: Vec<&PathRow> = report
            .rows()
            .iter()
            .filter(|r| r.length == UNREACHABLE)
            .collect();
        // a-x, a-y, b-x, b-y.
        assert_eq!(cross.len(), 4);

        let positive = report.retain_positive().expect("positive rows remain");
        assert_eq!(positive.rows().len(), 2);
        assert!(positive.rows().iter().all(|r| r.length > 0.0));
    }

    #[test]
    fn test_parallel_edges_keep_first() {
        let graph = build_graph(&[record("a", "b", 2.0), record("a", "b", 1.0)]);
        assert_eq!(graph.edge_count(), 1);
        let report = all_pairs_report(&graph).expect("report");
        assert!((report.rows()[0].length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_graph_is_fatal() {
        let graph = build_graph(&[]);
        assert_eq!(all_pairs_report(&graph).unwrap_err(), MeasureError::EmptyGraph);
    }

    #[test]
    fn test_all_unreachable_is_fatal_after_filter() {
        let graph = build_graph(&[record("a", "b", 0.0)]);
        let report = all_pairs_report(&graph).expect("report");
        assert_eq!(
            report.retain_positive().unwrap_err(),
            MeasureError::NoMeasurablePairs
        );
    }

    #[test]
    fn test_filtering_to_full_node_set_is_identity() {
        let graph = build_graph(&[record("a", "b", 2.0), record("b", "c", 3.0)]);
        let report = all_pairs_report(&graph)
            .expect("report")
            .retain_positive()
            .expect("positive");
        let all: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let filtered = report.clone().filter_nodes(&all);
        assert_eq!(filtered, report);
    }

    #[test]
    fn test_filtering_requires_both_endpoints() {
        let graph = build_graph(&[record("a", "b", 2.0), record("b", "c", 3.0)]);
        let report = all_pairs_report(&graph)
            .expect("report")
            .retain_positive()
            .expect("positive");
        let subset: Vec<String> = ["a", "c"].iter().map(|s| s.to_string()).collect();
        let filtered = report.filter_nodes(&subset);
        assert_eq!(filtered.rows().len(), 1);
        assert!((filtered.rows()[0].length - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_csv_rendering() {
        let graph = build_graph(&[record("a", "b", 2.5)]);
        let report = all_pairs_report(&graph).expect("report");
        let csv = report.to_csv_string();
        assert!(csv.starts_with("port1,port2,length\n"));
        assert!(csv.contains("a,b,2.5") || csv.contains("b,a,2.5"));
    }
}
