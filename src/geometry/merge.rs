//! Stitch contour segments into continuous polylines
//!
//! Segment endpoints are graph nodes. A polyline runs between two nodes whose
//! degree is not 2, passing through every degree-2 node on the way. Edges left
//! over once all such runs are traced form closed rings.

use std::collections::HashMap;

use geo::{Coord, LineString};
use tracing::trace;

use crate::domain::Segment;
use crate::error::Result;

/// Merges disjoint two-point segments into maximal polylines
pub trait LineMerger: Send + Sync {
    fn merge(&self, segments: &[Segment]) -> Result<Vec<LineString<f64>>>;
}

/// Merges segments whose endpoints are exactly equal
#[derive(Debug, Clone, Copy, Default)]
pub struct NodedLineMerger;

type NodeKey = (u64, u64);

fn node_key(c: Coord<f64>) -> NodeKey {
    // +0.0 folds -0.0 into 0.0 so both hash to the same node
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

struct MergeGraph {
    edges: Vec<[Coord<f64>; 2]>,
    incident: HashMap<NodeKey, Vec<usize>>,
}

impl MergeGraph {
    fn build(segments: &[Segment]) -> Self {
        let mut edges = Vec::with_capacity(segments.len());
        let mut incident: HashMap<NodeKey, Vec<usize>> = HashMap::new();

        for seg in segments {
            if node_key(seg.start) == node_key(seg.end) {
                continue;
            }
            let id = edges.len();
            edges.push([seg.start, seg.end]);
            incident.entry(node_key(seg.start)).or_default().push(id);
            incident.entry(node_key(seg.end)).or_default().push(id);
        }

        Self { edges, incident }
    }

    fn degree(&self, c: Coord<f64>) -> usize {
        self.incident.get(&node_key(c)).map_or(0, Vec::len)
    }

    /// Follow edges from `from` along `edge` until reaching a node that is
    /// not degree 2 or an edge that was already consumed.
    fn trace(&self, from: Coord<f64>, mut edge: usize, visited: &mut [bool]) -> Vec<Coord<f64>> {
        let mut coords = vec![from];
        let mut at = from;

        loop {
            visited[edge] = true;
            let [a, b] = self.edges[edge];
            let next = if node_key(a) == node_key(at) { b } else { a };
            coords.push(next);
            at = next;

            let Some(around) = self.incident.get(&node_key(at)) else {
                break;
            };
            if around.len() != 2 {
                break;
            }
            let other = if around[0] == edge { around[1] } else { around[0] };
            if visited[other] {
                break;
            }
            edge = other;
        }

        coords
    }
}

impl LineMerger for NodedLineMerger {
    fn merge(&self, segments: &[Segment]) -> Result<Vec<LineString<f64>>> {
        let graph = MergeGraph::build(segments);
        let mut visited = vec![false; graph.edges.len()];
        let mut lines = Vec::new();

        // Open runs start at ends and junctions
        for id in 0..graph.edges.len() {
            for node in graph.edges[id] {
                if graph.degree(node) == 2 {
                    continue;
                }
                for &edge in &graph.incident[&node_key(node)] {
                    if !visited[edge] {
                        lines.push(LineString::new(graph.trace(node, edge, &mut visited)));
                    }
                }
            }
        }

        // Whatever is left only touches degree-2 nodes: closed rings
        for id in 0..graph.edges.len() {
            if !visited[id] {
                let start = graph.edges[id][0];
                lines.push(LineString::new(graph.trace(start, id, &mut visited)));
            }
        }

        trace!(segments = segments.len(), lines = lines.len(), "segments merged");
        Ok(lines)
    }
}
