//! End-to-end pipeline: raw completion → plan → layout → routing → SVG.

use std::fs;
use std::path::PathBuf;

use schematica::prelude::*;
use schematica::{route_connections, CircuitGraph};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture should exist")
}

#[test]
fn every_component_receives_a_coordinate() {
    let design = parse_design(&fixture("blink_led.json")).unwrap();
    let config = LayoutConfig::default();
    let placed = layout(&design.circuit.components, &config);

    assert_eq!(placed.positions.len(), design.circuit.components.len());
    assert!(placed.scale > 0.0 && placed.scale <= 1.0);
    assert!(placed.width >= config.min_width && placed.width <= config.max_width);
    assert!(placed.height >= config.min_height && placed.height <= config.max_height);
}

#[test]
fn every_validated_connection_is_routable() {
    let design = parse_design(&fixture("blink_led.json")).unwrap();
    let placed = layout(&design.circuit.components, &LayoutConfig::default());
    let routed = route_connections(&design.circuit, &placed, &RouteConfig::default());

    // Referential closure upstream means nothing gets skipped here.
    assert_eq!(routed.len(), design.circuit.connections.len());
    for connection in &routed {
        assert!(connection.curve.control.y.is_finite());
        assert!(connection.curve.label_anchor.x.is_finite());
    }
}

#[test]
fn explicit_positions_scale_down_into_the_budget() {
    let raw = r#"{"response":"ok","circuit":{
        "components":[
            {"id":"a","label":"A","type":"Fuente","position":{"x":0,"y":0}},
            {"id":"b","label":"B","type":"LED","position":{"x":4000,"y":0}},
            {"id":"c","label":"C","type":"Tierra","position":{"x":2000,"y":3000}}],
        "connections":[{"from":"a","to":"b"},{"from":"b","to":"c"}]}}"#;
    let design = parse_design(raw).unwrap();
    let config = LayoutConfig::default();
    let placed = layout(&design.circuit.components, &config);

    assert!(placed.scale < 1.0);
    for position in placed.positions.values() {
        assert!(position.x >= 0.0 && position.x <= config.max_width);
        assert!(position.y >= 0.0 && position.y <= config.max_height);
    }

    // Relative ordering survives scaling.
    assert!(placed.positions["a"].x < placed.positions["c"].x);
    assert!(placed.positions["c"].x < placed.positions["b"].x);
}

#[test]
fn svg_renders_the_whole_fixture() {
    let design = parse_design(&fixture("blink_led.json")).unwrap();
    let svg = SvgRenderer::new().render(&design.circuit);

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(
        svg.matches(r#"class="schematic-node""#).count(),
        design.circuit.components.len()
    );
    assert_eq!(
        svg.matches(r#"class="schematic-connection""#).count(),
        design.circuit.connections.len()
    );
    // Labels make it into the document.
    assert!(svg.contains("U1 NE555"));
    assert!(svg.contains("VCC"));
}

#[test]
fn graph_stats_match_the_validated_plan() {
    let design = parse_design(&fixture("blink_led.json")).unwrap();
    let graph = CircuitGraph::from_plan(&design.circuit);
    let stats = graph.stats();

    assert_eq!(stats.components, 8);
    assert_eq!(stats.connections, 9);
    assert_eq!(stats.isolated, 0);
}

#[test]
fn pipeline_is_reproducible() {
    let raw = fixture("fenced_design.txt");
    let first = parse_design(&raw).unwrap();
    let second = parse_design(&raw).unwrap();
    assert_eq!(first, second);

    let layout_a = layout(&first.circuit.components, &LayoutConfig::default());
    let layout_b = layout(&second.circuit.components, &LayoutConfig::default());
    assert_eq!(layout_a.positions, layout_b.positions);

    let svg_a = SvgRenderer::new().render(&first.circuit);
    let svg_b = SvgRenderer::new().render(&second.circuit);
    assert_eq!(svg_a, svg_b);
}
