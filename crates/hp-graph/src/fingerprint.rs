//! Content-based hashing of a topology.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::graph::{Component, Connection, Topology};

#[derive(Serialize)]
struct Canonical<'a> {
    components: &'a BTreeMap<String, Component>,
    connections: &'a BTreeMap<String, Connection>,
}

impl Topology {
    /// SHA-256 over the label-sorted component and connection tables.
    ///
    /// Two topologies with the same labels, kinds and port-to-port mappings
    /// share a fingerprint regardless of how they were built.
    pub fn fingerprint(&self) -> String {
        let canonical = Canonical {
            components: &self.components,
            connections: &self.connections,
        };

        let mut hasher = Sha256::new();
        let json = serde_json::to_string(&canonical).unwrap_or_default();
        hasher.update(json.as_bytes());

        let result = hasher.finalize();
        format!("{:x}", result)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::ComponentKind;
    use crate::graph::{Component, PortRef, Topology};

    fn build(order: &[(&str, ComponentKind)]) -> Topology {
        let mut topo = Topology::new();
        for (label, kind) in order {
            topo.add_component(Component::new(*label, *kind)).unwrap();
        }
        topo
    }

    #[test]
    fn fingerprint_ignores_insertion_order() {
        let a = build(&[("A", ComponentKind::Source), ("B", ComponentKind::Sink)]);
        let b = build(&[("B", ComponentKind::Sink), ("A", ComponentKind::Source)]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn fingerprint_tracks_wiring() {
        let mut a = build(&[("A", ComponentKind::Source), ("B", ComponentKind::Sink)]);
        let before = a.fingerprint();
        a.connect("a_to_b", PortRef::new("A", "out1"), PortRef::new("B", "in1"))
            .unwrap();
        assert_ne!(before, a.fingerprint());
    }
}
