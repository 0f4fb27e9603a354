//! Flow-stream analysis over a topology.
//!
//! A two-stream unit is split into its sides (`in1 -> out1` is side 1,
//! `in2 -> out2` is side 2) so that, for example, the refrigerant and the
//! consumer water passing through one condenser end up in different streams.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::catalog::PortDirection;
use crate::graph::{PortRef, Topology};

/// One side of a component, as visited by a stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamSide {
    pub component: String,
    /// 1-based side index.
    pub side: usize,
}

/// A connected flow path through the topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    /// Visited component sides, sorted.
    pub sides: Vec<StreamSide>,
    /// Connection labels belonging to the stream, sorted.
    pub connections: Vec<String>,
    /// Whether the stream contains a directed loop.
    pub closed: bool,
}

impl Stream {
    /// Whether the stream passes through `component` on any side.
    pub fn visits(&self, component: &str) -> bool {
        self.sides.iter().any(|s| s.component == component)
    }

    /// Whether the stream passes through the given side of `component`.
    pub fn visits_side(&self, component: &str, side: usize) -> bool {
        self.sides
            .iter()
            .any(|s| s.component == component && s.side == side)
    }
}

/// A declared port that no connection consumes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenPort {
    pub port: PortRef,
    pub direction: PortDirection,
}

impl Topology {
    /// Side-level flow graph: one vertex per component side, one edge per connection.
    fn side_graph(&self) -> DiGraph<StreamSide, String> {
        let mut graph = DiGraph::new();
        let mut index: HashMap<(&str, usize), NodeIndex> = HashMap::new();

        for component in self.components.values() {
            for side in 1..=component.kind.side_count() {
                let node = graph.add_node(StreamSide {
                    component: component.label.clone(),
                    side,
                });
                index.insert((component.label.as_str(), side), node);
            }
        }

        let locate = |port: &PortRef, direction: PortDirection| -> Option<NodeIndex> {
            let component = self.components.get(&port.component)?;
            let side = component.kind.side_of(&port.port, direction)?;
            index.get(&(component.label.as_str(), side)).copied()
        };

        for connection in self.connections.values() {
            let from = locate(&connection.source, PortDirection::Outlet);
            let to = locate(&connection.target, PortDirection::Inlet);
            if let (Some(from), Some(to)) = (from, to) {
                graph.add_edge(from, to, connection.label.clone());
            }
        }

        graph
    }

    /// Decompose the topology into flow streams.
    ///
    /// Sides without any connection do not form a stream. Streams are ordered
    /// by their first connection label.
    pub fn streams(&self) -> Vec<Stream> {
        let graph = self.side_graph();

        let mut groups = UnionFind::new(graph.node_count());
        for edge in graph.edge_references() {
            groups.union(edge.source().index(), edge.target().index());
        }
        let labeling = groups.into_labeling();

        let mut on_loop: HashSet<NodeIndex> = HashSet::new();
        for scc in tarjan_scc(&graph) {
            if scc.len() > 1 {
                on_loop.extend(scc);
            }
        }
        for edge in graph.edge_references() {
            if edge.source() == edge.target() {
                on_loop.insert(edge.source());
            }
        }

        let mut by_group: BTreeMap<usize, Stream> = BTreeMap::new();
        for edge in graph.edge_references() {
            let stream = by_group
                .entry(labeling[edge.source().index()])
                .or_insert_with(|| Stream {
                    sides: Vec::new(),
                    connections: Vec::new(),
                    closed: false,
                });
            stream.connections.push(edge.weight().clone());
        }
        for node in graph.node_indices() {
            if let Some(stream) = by_group.get_mut(&labeling[node.index()]) {
                stream.sides.push(graph[node].clone());
                stream.closed |= on_loop.contains(&node);
            }
        }

        let mut streams: Vec<Stream> = by_group.into_values().collect();
        for stream in &mut streams {
            stream.sides.sort();
            stream.connections.sort();
        }
        streams.sort_by(|a, b| a.connections.first().cmp(&b.connections.first()));
        streams
    }

    /// Number of streams that form a closed loop.
    pub fn closed_loop_count(&self) -> usize {
        self.streams().iter().filter(|s| s.closed).count()
    }

    /// Every declared port not consumed by a connection, sorted.
    pub fn open_ports(&self) -> Vec<OpenPort> {
        let mut open = Vec::new();
        for component in self.components.values() {
            for direction in [PortDirection::Inlet, PortDirection::Outlet] {
                for port in component.kind.ports(direction) {
                    let port_ref = PortRef::new(component.label.clone(), *port);
                    if !self.occupied.contains_key(&port_ref) {
                        open.push(OpenPort {
                            port: port_ref,
                            direction,
                        });
                    }
                }
            }
        }
        open.sort();
        open
    }
}
