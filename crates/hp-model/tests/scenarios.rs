//! End-to-end topology scenarios.

use hp_graph::{ComponentKind, NetworkEvent, PortRef, RecordingNetwork, Removal, Topology};
use hp_model::{CycleConfig, HeatPump, IntercoolerKind, build_topology};

fn build(config: CycleConfig) -> HeatPump<RecordingNetwork> {
    let hp = HeatPump::build(config, RecordingNetwork::new()).unwrap();
    hp.topology().check_integrity().unwrap();
    hp
}

/// Follow single-stream outlets (`out1`) starting at `start` until `stop` is reached.
fn walk(topo: &Topology, start: PortRef, stop: &str) -> Vec<String> {
    let mut visited = Vec::new();
    let mut at = start;
    for _ in 0..64 {
        let next = topo
            .downstream(&at.component, &at.port)
            .unwrap_or_else(|| panic!("{} is not connected", at))
            .clone();
        visited.push(next.component.clone());
        if next.component == stop {
            return visited;
        }
        // Continue on the same stream side that was entered
        let outlet = if next.port == "in2" { "out2" } else { "out1" };
        at = PortRef::new(next.component, outlet);
    }
    panic!("no path to {}", stop);
}

#[test]
fn cardinality_without_extras() {
    for (n, components, connections) in [(1, 11, 12), (2, 15, 17), (3, 19, 22)] {
        let hp = build(CycleConfig::new(["water", "NH3"], n));
        assert_eq!(hp.topology().component_count(), components, "N={}", n);
        assert_eq!(hp.topology().connection_count(), connections, "N={}", n);
        assert!(hp.topology().open_ports().is_empty());
    }
}

#[test]
fn single_stage_plain() {
    let hp = build(CycleConfig::single_stage("R134A", false));
    let topo = hp.topology();

    let mut labels: Vec<&str> = topo.components().map(|c| c.label.as_str()).collect();
    labels.sort();
    assert_eq!(
        labels,
        vec![
            "Compressor 1",
            "Condenser 1",
            "Consumer",
            "Consumer Cycle Closer",
            "Consumer Recirculation Pump",
            "Cycle Closer 1",
            "Evaporator 1",
            "Heat Source Back Flow",
            "Heat Source Feed Flow",
            "Heat Source Recirculation Pump",
            "Valve 1",
        ]
    );
    assert_eq!(topo.connection_count(), 12);

    let streams = topo.streams();
    assert_eq!(streams.len(), 3);
    assert_eq!(topo.closed_loop_count(), 2);

    let heat_source = streams
        .iter()
        .find(|s| s.visits("Heat Source Feed Flow"))
        .unwrap();
    assert!(!heat_source.closed);
    assert!(heat_source.visits_side("Evaporator 1", 1));

    let refrigerant = streams.iter().find(|s| s.visits("Cycle Closer 1")).unwrap();
    assert!(refrigerant.closed);
    assert!(refrigerant.visits_side("Evaporator 1", 2));
    assert!(refrigerant.visits_side("Condenser 1", 1));

    let consumer = streams.iter().find(|s| s.visits("Consumer")).unwrap();
    assert!(consumer.closed);
    assert!(consumer.visits_side("Condenser 1", 2));

    assert_eq!(
        walk(topo, PortRef::new("Cycle Closer 1", "out1"), "Cycle Closer 1"),
        vec![
            "Valve 1",
            "Evaporator 1",
            "Compressor 1",
            "Condenser 1",
            "Cycle Closer 1"
        ]
    );
}

#[test]
fn single_stage_with_internal_heat_exchanger() {
    let hp = build(CycleConfig::single_stage("NH3", true));
    let topo = hp.topology();
    let ihx = "Internal Heat Exchanger 1_1";

    assert_eq!(topo.component_count(), 12);
    assert_eq!(topo.connection_count(), 14);
    assert_eq!(topo.component(ihx).unwrap().kind, ComponentKind::HeatExchanger);

    // Cold chain: evaporator -> IHX -> compressor
    let c = topo.connection("evaporator1_to_int_heatex1_1").unwrap();
    assert_eq!(c.source, PortRef::new("Evaporator 1", "out2"));
    assert_eq!(c.target, PortRef::new(ihx, "in2"));
    let c = topo.connection("int_heatex1_1_to_comp1").unwrap();
    assert_eq!(c.source, PortRef::new(ihx, "out2"));
    assert_eq!(c.target, PortRef::new("Compressor 1", "in1"));

    // Hot chain: condenser -> IHX -> cycle closer
    let c = topo.connection("cond1_to_int_heatex1_1").unwrap();
    assert_eq!(c.source, PortRef::new("Condenser 1", "out1"));
    assert_eq!(c.target, PortRef::new(ihx, "in1"));
    let c = topo.connection("int_heatex1_1_to_cc1").unwrap();
    assert_eq!(c.source, PortRef::new(ihx, "out1"));
    assert_eq!(c.target, PortRef::new("Cycle Closer 1", "in1"));

    assert!(topo.connection("evaporator1_to_comp1").is_none());
    assert!(topo.connection("cond1_to_cc1").is_none());

    // Both IHX sides belong to the one refrigerant loop
    assert_eq!(topo.streams().len(), 3);
    assert_eq!(topo.closed_loop_count(), 2);
}

#[test]
fn two_cycles_with_intercooling_in_first() {
    let config = CycleConfig::new(["water", "NH3"], 2).with_intercooler(
        1,
        2,
        IntercoolerKind::HeatExchangerSimple,
    );
    let hp = build(config);
    let topo = hp.topology();

    assert_eq!(topo.component_count(), 19);
    assert_eq!(topo.connection_count(), 21);
    assert!(topo.open_ports().is_empty());

    assert_eq!(
        walk(topo, PortRef::new("Evaporator 1", "out2"), "Heat Exchanger 1_2"),
        vec![
            "Compressor 1-1",
            "Intercooler 1-1",
            "Compressor 1-2",
            "Intercooler 1-2",
            "Compressor 1-3",
            "Heat Exchanger 1_2",
        ]
    );
    assert_eq!(
        topo.downstream("Compressor 1-3", "out1"),
        Some(&PortRef::new("Heat Exchanger 1_2", "in1"))
    );

    // Cycle 2 is a plain single-compressor cycle feeding the condenser
    assert_eq!(
        walk(topo, PortRef::new("Cycle Closer 2", "out1"), "Cycle Closer 2"),
        vec![
            "Valve 2",
            "Heat Exchanger 1_2",
            "Compressor 2",
            "Condenser 2",
            "Cycle Closer 2"
        ]
    );
    assert_eq!(topo.closed_loop_count(), 3);
}

#[test]
fn two_stream_intercoolers_leave_coolant_side_open() {
    let config = CycleConfig::new(["water", "NH3"], 1).with_intercooler(
        1,
        2,
        IntercoolerKind::HeatExchanger,
    );
    let hp = build(config);
    let open: Vec<String> = hp
        .topology()
        .open_ports()
        .into_iter()
        .map(|p| p.port.to_string())
        .collect();
    assert_eq!(
        open,
        vec![
            "Intercooler 1-1.in2",
            "Intercooler 1-1.out2",
            "Intercooler 1-2.in2",
            "Intercooler 1-2.out2",
        ]
    );
}

#[test]
fn hot_chain_descends_regardless_of_input_order() {
    let config = CycleConfig::new(["water", "NH3"], 5).with_int_heatex(3, vec![2, 5, 3]);
    let hp = build(config);
    let topo = hp.topology();

    assert_eq!(
        walk(topo, PortRef::new("Heat Exchanger 3_4", "out1"), "Cycle Closer 3"),
        vec![
            "Internal Heat Exchanger 3_5",
            "Internal Heat Exchanger 3_3",
            "Internal Heat Exchanger 3_2",
            "Cycle Closer 3",
        ]
    );

    // Each unit sits on its target's cold side, before the compressor
    for (target, upstream) in [
        (2, "Heat Exchanger 1_2"),
        (3, "Heat Exchanger 2_3"),
        (5, "Heat Exchanger 4_5"),
    ] {
        let ihx = format!("Internal Heat Exchanger 3_{}", target);
        assert_eq!(
            topo.upstream(&ihx, "in2"),
            Some(&PortRef::new(upstream, "out2"))
        );
        assert_eq!(
            topo.downstream(&ihx, "out2"),
            Some(&PortRef::new(format!("Compressor {}", target), "in1"))
        );
    }
}

#[test]
fn internal_exchanger_on_adjacent_cycles() {
    let config = CycleConfig::new(["water", "NH3"], 2).with_int_heatex(1, 2);
    let mut hp = build(config);
    let ihx = "Internal Heat Exchanger 1_2";

    let topo = hp.topology();
    assert_eq!(topo.component_count(), 16);
    assert_eq!(topo.connection_count(), 19);
    assert!(topo.open_ports().is_empty());
    assert_eq!(topo.closed_loop_count(), 3);

    // The cascade exchanger feeds the unit on both streams, under distinct labels
    let hot = topo.connection("heatex1_2_to_int_heatex1_2").unwrap();
    assert_eq!(hot.source, PortRef::new("Heat Exchanger 1_2", "out1"));
    assert_eq!(hot.target, PortRef::new(ihx, "in1"));
    let cold = topo.connection("heatex1_2_to_int_heatex1_2_cold").unwrap();
    assert_eq!(cold.source, PortRef::new("Heat Exchanger 1_2", "out2"));
    assert_eq!(cold.target, PortRef::new(ihx, "in2"));

    assert_eq!(
        walk(topo, PortRef::new("Cycle Closer 1", "out1"), "Cycle Closer 1"),
        vec![
            "Valve 1",
            "Evaporator 1",
            "Compressor 1",
            "Heat Exchanger 1_2",
            ihx,
            "Cycle Closer 1",
        ]
    );
    assert_eq!(
        walk(topo, PortRef::new("Cycle Closer 2", "out1"), "Cycle Closer 2"),
        vec![
            "Valve 2",
            "Heat Exchanger 1_2",
            ihx,
            "Compressor 2",
            "Condenser 2",
            "Cycle Closer 2",
        ]
    );

    let removal = hp.delete_component(ihx);
    let removed: Vec<&str> = removal
        .connections()
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(
        removed,
        vec![
            "heatex1_2_to_int_heatex1_2",
            "heatex1_2_to_int_heatex1_2_cold",
            "int_heatex1_2_to_cc1",
            "int_heatex1_2_to_comp2",
        ]
    );
    hp.topology().check_integrity().unwrap();
}

#[test]
fn cold_chain_ascends_by_source_cycle() {
    let config = CycleConfig::new(["water", "NH3"], 3)
        .with_int_heatex(3, 1)
        .with_int_heatex(1, 1)
        .with_int_heatex(2, 1);
    let hp = build(config);
    let topo = hp.topology();

    assert_eq!(
        walk(topo, PortRef::new("Evaporator 1", "out2"), "Compressor 1"),
        vec![
            "Internal Heat Exchanger 1_1",
            "Internal Heat Exchanger 2_1",
            "Internal Heat Exchanger 3_1",
            "Compressor 1",
        ]
    );

    // Hot sides sit in their own cycles
    assert_eq!(
        topo.downstream("Internal Heat Exchanger 3_1", "out1"),
        Some(&PortRef::new("Cycle Closer 3", "in1"))
    );
    assert_eq!(
        topo.upstream("Internal Heat Exchanger 2_1", "in1"),
        Some(&PortRef::new("Heat Exchanger 2_3", "out1"))
    );
    assert_eq!(topo.closed_loop_count(), 4);
}

#[test]
fn builds_are_deterministic() {
    let config = CycleConfig::new(["water", "NH3"], 3)
        .with_int_heatex(2, vec![3, 1])
        .with_intercooler(3, 1, IntercoolerKind::HeatExchanger);
    let (a, _) = build_topology(&config).unwrap();
    let (b, _) = build_topology(&config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn deleting_two_port_component_cascades() {
    let mut hp = build(CycleConfig::new(["water", "NH3"], 2));
    let before = hp.topology().connection_count();

    let removal = hp.delete_component("Valve 2");
    let removed: Vec<&str> = removal
        .connections()
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(removed, vec!["cc2_to_valve2", "valve2_to_heatex1_2"]);

    let topo = hp.topology();
    assert_eq!(topo.component_count(), 14);
    assert_eq!(topo.connection_count(), before - 2);
    topo.check_integrity().unwrap();

    let live: Vec<String> = hp.network().live_connections().into_iter().collect();
    let expected: Vec<String> = topo.connections().map(|c| c.label.clone()).collect();
    assert_eq!(live, expected);
}

#[test]
fn deleting_missing_component_changes_nothing() {
    let mut hp = build(CycleConfig::new(["water", "NH3"], 2));
    let before = hp.topology().clone();
    let events = hp.network().events.len();

    assert_eq!(hp.delete_component("Compressor 7"), Removal::NotFound);
    assert_eq!(hp.topology(), &before);
    assert_eq!(hp.topology().fingerprint(), before.fingerprint());
    assert_eq!(hp.network().events.len(), events);
}

#[test]
fn deleting_internal_heat_exchanger_updates_index() {
    let mut hp = build(CycleConfig::single_stage("NH3", true));
    assert_eq!(hp.index().len(), 1);

    let removal = hp.delete_component("Internal Heat Exchanger 1_1");
    assert_eq!(removal.connections().len(), 4);
    assert!(hp.index().is_empty());
    assert_eq!(hp.topology().connection_count(), 10);

    let removed = hp
        .network()
        .events
        .iter()
        .filter(|e| matches!(e, NetworkEvent::ConnectionRemoved(_)))
        .count();
    assert_eq!(removed, 4);

    // Deleting again is a benign no-op
    assert!(!hp.delete_component("Internal Heat Exchanger 1_1").is_found());
}
