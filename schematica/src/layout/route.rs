//! Curved connection routing.
//!
//! Each connection becomes a single quadratic curve so that edges between
//! aligned nodes stay visually distinguishable instead of collapsing into a
//! straight overlapping line. The bend direction is derived from the
//! endpoint geometry, never random.

use crate::circuit::types::{CircuitPlan, Position};

use super::Layout;

/// Curvature constants.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Smallest bend offset, applied to nearby endpoints.
    pub min_offset: f64,
    /// Largest bend offset, caps curvature on long edges.
    pub max_offset: f64,
    /// Fraction of the endpoint distance used as the bend offset.
    pub distance_factor: f64,
    /// Fraction of the curvature that pulls the label anchor off the path.
    pub label_pull: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            min_offset: 60.0,
            max_offset: 180.0,
            distance_factor: 0.35,
            label_pull: 0.25,
        }
    }
}

/// Geometry for one routed connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCurve {
    pub from: Position,
    pub to: Position,
    pub control: Position,
    pub label_anchor: Position,
}

impl EdgeCurve {
    /// SVG path data for the quadratic segment.
    pub fn path_data(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.from.x, self.from.y, self.control.x, self.control.y, self.to.x, self.to.y
        )
    }
}

/// Compute the curve and label anchor for one edge.
pub fn route(from: Position, to: Position, config: &RouteConfig) -> EdgeCurve {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let offset = (dx.hypot(dy) * config.distance_factor)
        .clamp(config.min_offset, config.max_offset);

    // Level endpoints bend by horizontal direction; coincident endpoints
    // bend upward.
    let curvature = if dy == 0.0 {
        offset * if dx < 0.0 { -1.0 } else { 1.0 }
    } else {
        offset * if dy < 0.0 { -1.0 } else { 1.0 }
    };

    let control = Position {
        x: from.x + dx / 2.0,
        y: from.y + dy / 2.0 - curvature,
    };
    let label_anchor = Position {
        x: (from.x + to.x) / 2.0,
        y: (from.y + to.y) / 2.0 - curvature * config.label_pull,
    };

    EdgeCurve {
        from,
        to,
        control,
        label_anchor,
    }
}

/// A connection resolved against a layout, ready to draw.
#[derive(Debug, Clone)]
pub struct RoutedConnection {
    pub id: String,
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub curve: EdgeCurve,
}

/// Route every connection of a plan against a computed layout.
///
/// Connections whose endpoints are missing from the position map produce no
/// geometry; the validator normally prevents this, but a hand-built plan may
/// still dangle.
pub fn route_connections(
    plan: &CircuitPlan,
    layout: &Layout,
    config: &RouteConfig,
) -> Vec<RoutedConnection> {
    plan.connections
        .iter()
        .enumerate()
        .filter_map(|(index, connection)| {
            let (Some(&from), Some(&to)) = (
                layout.positions.get(&connection.from),
                layout.positions.get(&connection.to),
            ) else {
                tracing::debug!(from = %connection.from, to = %connection.to,
                    "skipping connection without placed endpoints");
                return None;
            };
            Some(RoutedConnection {
                id: connection.fallback_id(index),
                from: connection.from.clone(),
                to: connection.to.clone(),
                label: connection.label.clone(),
                description: connection.description.clone(),
                curve: route(from, to, config),
            })
        })
        .collect()
}
