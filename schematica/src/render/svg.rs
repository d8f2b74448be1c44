//! Standalone SVG rendering of a validated plan.
//!
//! Produces a self-contained document: embedded styles, a dotted grid,
//! curved connections with arrowheads and labels, and one node card per
//! placed component. Deterministic for the same plan and configuration.

use std::fmt::Write as _;

use crate::circuit::types::{CircuitComponent, CircuitPlan};
use crate::layout::{layout, route_connections, Layout, LayoutConfig, RouteConfig};
use crate::render::icons::{IconClassifier, IconKind, SubstringClassifier};

const ICON_DIAMETER: f64 = 38.0;

/// Renders a [`CircuitPlan`] to an SVG string.
pub struct SvgRenderer {
    layout: LayoutConfig,
    route: RouteConfig,
    classifier: Box<dyn IconClassifier>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            layout: LayoutConfig::default(),
            route: RouteConfig::default(),
            classifier: Box::new(SubstringClassifier),
        }
    }

    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    pub fn with_route(mut self, config: RouteConfig) -> Self {
        self.route = config;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn IconClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Lay out, route and render the plan as a standalone SVG document.
    pub fn render(&self, plan: &CircuitPlan) -> String {
        let placed = layout(&plan.components, &self.layout);
        let mut svg = String::new();

        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{title}">"#,
            w = placed.width,
            h = placed.height,
            title = escape_xml(&plan.title),
        );
        svg.push('\n');
        svg.push_str(STYLE);
        svg.push_str(DEFS);

        let _ = writeln!(
            svg,
            r#"<rect class="schematic-grid" x="0" y="0" width="{}" height="{}" fill="url(#grid)"/>"#,
            placed.width, placed.height
        );

        self.render_connections(&mut svg, plan, &placed);
        for component in &plan.components {
            self.render_node(&mut svg, component, &placed);
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn render_connections(&self, svg: &mut String, plan: &CircuitPlan, placed: &Layout) {
        for routed in route_connections(plan, placed, &self.route) {
            let curve = routed.curve;
            let tooltip = routed
                .description
                .clone()
                .or_else(|| routed.label.clone())
                .unwrap_or_else(|| format!("{} → {}", routed.from, routed.to));

            let _ = writeln!(svg, r#"<g class="schematic-connection">"#);
            let _ = writeln!(
                svg,
                r#"<path class="schematic-connection-path" d="{}" marker-end="url(#arrow)"><title>{}</title></path>"#,
                curve.path_data(),
                escape_xml(&tooltip)
            );
            let _ = writeln!(
                svg,
                r#"<circle class="schematic-endpoint" cx="{}" cy="{}" r="5"/><circle class="schematic-endpoint" cx="{}" cy="{}" r="5"/>"#,
                curve.from.x, curve.from.y, curve.to.x, curve.to.y
            );
            if let Some(label) = &routed.label {
                let _ = writeln!(
                    svg,
                    r#"<text class="schematic-connection-label" x="{}" y="{}">{}</text>"#,
                    curve.label_anchor.x,
                    curve.label_anchor.y - 6.0,
                    escape_xml(label)
                );
            }
            if let Some(description) = &routed.description {
                let _ = writeln!(
                    svg,
                    r#"<text class="schematic-connection-description" x="{}" y="{}">{}</text>"#,
                    curve.label_anchor.x,
                    curve.label_anchor.y + 12.0,
                    escape_xml(description)
                );
            }
            let _ = writeln!(svg, "</g>");
        }
    }

    fn render_node(&self, svg: &mut String, component: &CircuitComponent, placed: &Layout) {
        let Some(position) = placed.positions.get(&component.id) else {
            return;
        };
        let width = self.layout.node_width;
        let height = self.layout.node_height;
        let glyph = icon_glyph(self.classifier.classify(&component.kind));
        let tooltip = component
            .description
            .clone()
            .unwrap_or_else(|| component.kind.clone());

        let _ = writeln!(
            svg,
            r#"<g class="schematic-node" transform="translate({}, {})" filter="url(#node-shadow)">"#,
            position.x - width / 2.0,
            position.y - height / 2.0
        );
        let _ = writeln!(svg, "<title>{}</title>", escape_xml(&tooltip));
        let _ = writeln!(
            svg,
            r#"<rect rx="18" ry="18" width="{width}" height="{height}"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<g class="schematic-icon" transform="translate({}, {ICON_DIAMETER})"><circle r="{}"/><g transform="translate(0, 2)">{glyph}</g></g>"#,
            width / 2.0,
            ICON_DIAMETER / 2.0
        );
        let _ = writeln!(
            svg,
            r#"<text class="schematic-node-label" x="{}" y="{}">{}</text>"#,
            width / 2.0,
            ICON_DIAMETER + 44.0,
            escape_xml(&component.label)
        );
        let _ = writeln!(
            svg,
            r#"<text class="schematic-node-type" x="{}" y="{}">{}</text>"#,
            width / 2.0,
            ICON_DIAMETER + 66.0,
            escape_xml(&component.kind)
        );
        let _ = writeln!(svg, "</g>");
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

const STYLE: &str = r#"<style>
.schematic-node rect { fill: #0f172a; stroke: #334155; stroke-width: 1.5; }
.schematic-node-label { fill: #e2e8f0; font: 600 15px sans-serif; text-anchor: middle; }
.schematic-node-type { fill: #94a3b8; font: 12px sans-serif; text-anchor: middle; }
.schematic-icon circle { fill: #1e293b; stroke: #475569; }
.schematic-icon line, .schematic-icon path, .schematic-icon polyline { stroke: #93c5fd; stroke-width: 1.6; fill: none; stroke-linecap: round; }
.schematic-icon polygon, .schematic-icon rect { stroke: #93c5fd; stroke-width: 1.6; fill: none; }
.schematic-connection-path { fill: none; stroke: rgba(148, 197, 255, 0.85); stroke-width: 2; }
.schematic-endpoint { fill: #60a5fa; }
.schematic-connection-label { fill: #bfdbfe; font: 12px sans-serif; text-anchor: middle; }
.schematic-connection-description { fill: #93a8c4; font: 11px sans-serif; text-anchor: middle; }
</style>
"#;

const DEFS: &str = r#"<defs>
<pattern id="grid" width="32" height="32" patternUnits="userSpaceOnUse">
<path d="M 32 0 L 0 0 0 32" fill="none" stroke="rgba(148, 163, 184, 0.12)" stroke-width="1"/>
</pattern>
<marker id="arrow" viewBox="0 0 10 10" refX="8" refY="5" markerWidth="6" markerHeight="6" orient="auto-start-reverse">
<path d="M 0 0 L 10 5 L 0 10 z" fill="rgba(148, 197, 255, 0.85)"/>
</marker>
<filter id="node-shadow" x="-20%" y="-20%" width="140%" height="140%">
<feDropShadow dx="0" dy="10" stdDeviation="8" flood-color="rgba(59, 130, 246, 0.25)"/>
</filter>
</defs>
"#;

fn icon_glyph(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Supply => {
            r#"<circle cx="0" cy="0" r="9"/><line x1="-12" y1="-12" x2="12" y2="-12"/><line x1="-12" y1="12" x2="12" y2="12"/><line x1="0" y1="-16" x2="0" y2="16"/>"#
        }
        IconKind::Led => {
            r#"<polygon points="-4,-6 6,0 -4,6"/><line x1="-12" y1="0" x2="-4" y2="0"/><line x1="6" y1="0" x2="14" y2="0"/><path d="M 2 -10 L 10 -18"/><path d="M 6 -8 L 14 -16"/>"#
        }
        IconKind::Transistor => {
            r#"<circle cx="-2" cy="0" r="10"/><line x1="-12" y1="-10" x2="6" y2="8"/><line x1="-12" y1="10" x2="8" y2="-12"/><polyline points="2,12 12,12 12,-2"/><polygon points="8,-2 12,-2 12,2"/>"#
        }
        IconKind::Switch => {
            r#"<line x1="-14" y1="8" x2="-2" y2="8"/><line x1="10" y1="-8" x2="14" y2="-8"/><circle cx="-2" cy="8" r="3"/><circle cx="10" cy="-8" r="3"/><line x1="-2" y1="8" x2="10" y2="-8"/>"#
        }
        IconKind::Resistor => {
            r#"<polyline points="-14,0 -10,-6 -6,6 -2,-6 2,6 6,-6 10,6 14,0"/>"#
        }
        IconKind::Ground => {
            r#"<line x1="-12" y1="8" x2="12" y2="8"/><line x1="-8" y1="12" x2="8" y2="12"/><line x1="-4" y1="16" x2="4" y2="16"/><line x1="0" y1="-6" x2="0" y2="8"/>"#
        }
        IconKind::Generic => {
            r#"<rect x="-10" y="-10" width="20" height="20" rx="4"/><circle cx="0" cy="0" r="3"/>"#
        }
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::validate::parse_design;

    fn sample_plan() -> CircuitPlan {
        parse_design(
            r#"{"response":"ok","circuit":{"title":"Circuito LED","summary":"S",
                "components":[{"id":"bat","label":"Batería 9V","type":"Fuente DC"},
                              {"id":"r1","label":"R1 <220Ω>","type":"Resistencia"},
                              {"id":"led","label":"D1","type":"LED rojo"}],
                "connections":[{"from":"bat","to":"r1","label":"V+"},
                               {"from":"r1","to":"led"}]}}"#,
        )
        .unwrap()
        .circuit
    }

    #[test]
    fn renders_one_node_per_component() {
        let svg = SvgRenderer::new().render(&sample_plan());
        assert_eq!(svg.matches(r#"class="schematic-node""#).count(), 3);
        assert_eq!(svg.matches(r#"class="schematic-connection""#).count(), 2);
    }

    #[test]
    fn text_is_xml_escaped() {
        let svg = SvgRenderer::new().render(&sample_plan());
        assert!(svg.contains("R1 &lt;220Ω&gt;"));
        assert!(!svg.contains("R1 <220Ω>"));
    }

    #[test]
    fn connection_label_is_rendered_near_the_curve() {
        let svg = SvgRenderer::new().render(&sample_plan());
        assert!(svg.contains(r#"class="schematic-connection-label""#));
        assert!(svg.contains(">V+<"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let plan = sample_plan();
        let renderer = SvgRenderer::new();
        assert_eq!(renderer.render(&plan), renderer.render(&plan));
    }

    #[test]
    fn empty_plan_renders_minimum_canvas() {
        let plan = CircuitPlan::default();
        let svg = SvgRenderer::new().render(&plan);
        assert!(svg.contains(r#"viewBox="0 0 640 480""#));
        assert!(!svg.contains("schematic-node\""));
    }

    #[test]
    fn icons_follow_classification() {
        let svg = SvgRenderer::new().render(&sample_plan());
        // Resistor glyph zig-zag appears once for R1.
        assert!(svg.contains("-14,0 -10,-6"));
    }
}
