//! Schematica - circuit design assistant core
//!
//! This library turns natural-language circuit requests into validated
//! circuit plans and rendered schematics. A language model produces a loose
//! JSON payload; schematica validates it into a typed plan, lays the
//! components out on a bounded canvas and renders an SVG schematic.
//!
//! # Quick Start
//!
//! ```
//! use schematica::{parse_design, layout, LayoutConfig, SvgRenderer};
//!
//! let raw = r#"{"response":"ok","circuit":{
//!     "title":"LED","summary":"Circuito básico",
//!     "components":[{"id":"bat","label":"9V","type":"Fuente DC"},
//!                   {"id":"led","label":"D1","type":"LED"}],
//!     "connections":[{"from":"bat","to":"led"}]}}"#;
//!
//! let design = parse_design(raw).unwrap();
//! let placed = layout(&design.circuit.components, &LayoutConfig::default());
//! assert_eq!(placed.positions.len(), 2);
//!
//! let svg = SvgRenderer::new().render(&design.circuit);
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! # Features
//!
//! - **Structured-output validation**: fail-hard on structure, fail-soft on
//!   leaves; dangling connections and malformed components are dropped
//! - **Layout engine**: grid placement, scale-to-fit, canvas clamping
//! - **Connection routing**: deterministic quadratic curves with label
//!   anchors
//! - **Completion providers**: OpenAI client with bounded retry

pub mod ai;
pub mod circuit;
pub mod core;
pub mod layout;
pub mod render;

// Re-export main types
pub use ai::{
    AiError, CompletionProvider, OpenAiClient, PromptMessage, Role, DEFAULT_MAX_RETRIES,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use circuit::graph::{CircuitGraph, GraphStats};
pub use circuit::types::{
    CircuitComponent, CircuitConnection, CircuitDesign, CircuitPlan, Position,
};
pub use circuit::validate::{parse_design, strip_code_fences, ValidateError};
pub use self::core::{CircuitDesigner, DesignOptions, SchematicaError};
pub use layout::route::{route, route_connections, EdgeCurve, RouteConfig, RoutedConnection};
pub use layout::{layout, Layout, LayoutConfig};
pub use render::icons::{IconClassifier, IconKind, SubstringClassifier};
pub use render::svg::SvgRenderer;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        layout, parse_design, CircuitDesign, CircuitDesigner, CircuitPlan, Layout, LayoutConfig,
        RouteConfig, SchematicaError, SvgRenderer, ValidateError,
    };
}
