//! Schematic layout engine.
//!
//! Assigns a canvas coordinate to every component of a plan: explicit
//! positions pass through unchanged, the rest land on a column grid sized
//! from the component count. The combined bounding box is then scaled down
//! (never up) to fit the canvas budget and centered in any remaining slack.
//! Deterministic and infallible; an empty plan yields a minimum-size empty
//! canvas.

pub mod route;

use std::collections::HashMap;

use serde::Serialize;

use crate::circuit::types::{CircuitComponent, Position};

pub use route::{route, route_connections, EdgeCurve, RouteConfig, RoutedConnection};

/// Canvas and spacing constants, in layout units.
///
/// The defaults reproduce the reference rendering; tests may shrink the
/// canvas budget to exercise scaling.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub top_padding: f64,
    pub side_padding: f64,
    pub column_gap: f64,
    pub row_gap: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 120.0,
            top_padding: 160.0,
            side_padding: 140.0,
            column_gap: 140.0,
            row_gap: 150.0,
            min_width: 640.0,
            min_height: 480.0,
            max_width: 1280.0,
            max_height: 960.0,
        }
    }
}

/// Result of a layout pass: one coordinate per component id plus the final
/// canvas dimensions and the applied scale factor.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub positions: HashMap<String, Position>,
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl Layout {
    fn empty(config: &LayoutConfig) -> Self {
        Self {
            positions: HashMap::new(),
            width: config.min_width,
            height: config.min_height,
            scale: 1.0,
        }
    }
}

/// Number of grid columns for a given component count. More components get
/// more columns to keep the aspect ratio roughly balanced.
fn column_count(components: usize) -> usize {
    if components > 6 {
        4
    } else if components > 4 {
        3
    } else {
        2
    }
}

/// Compute canvas positions for every component.
pub fn layout(components: &[CircuitComponent], config: &LayoutConfig) -> Layout {
    let mut positions: HashMap<String, Position> = HashMap::new();
    let columns = column_count(components.len());
    let column_width = config.node_width + config.column_gap;

    for (index, component) in components.iter().enumerate() {
        if let Some(position) = component.position {
            positions.insert(component.id.clone(), position);
            continue;
        }
        let column = (index % columns) as f64;
        let row = (index / columns) as f64;
        positions.insert(
            component.id.clone(),
            Position {
                x: config.side_padding + column * column_width + config.node_width / 2.0,
                y: config.top_padding + row * config.row_gap,
            },
        );
    }

    // A lone auto-placed component anchors the first grid cell.
    if components.len() == 1 {
        if let Some(first) = components.first() {
            if first.position.is_none() {
                positions.insert(
                    first.id.clone(),
                    Position {
                        x: config.side_padding + config.node_width / 2.0,
                        y: config.top_padding,
                    },
                );
            }
        }
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for position in positions.values() {
        min_x = min_x.min(position.x);
        max_x = max_x.max(position.x);
        min_y = min_y.min(position.y);
        max_y = max_y.max(position.y);
    }

    if !min_x.is_finite() || !min_y.is_finite() {
        return Layout::empty(config);
    }

    let width_span = (max_x - min_x).max(1.0);
    let height_span = (max_y - min_y).max(1.0);
    let available_width = (config.max_width - config.side_padding * 2.0).max(1.0);
    let available_height = (config.max_height - config.top_padding - config.node_height).max(1.0);
    let scale = (available_width / width_span)
        .min(available_height / height_span)
        .min(1.0);

    let content_width = (max_x - min_x).max(0.0) * scale;
    let content_height = (max_y - min_y).max(0.0) * scale;
    let raw_width = content_width + config.side_padding * 2.0;
    let raw_height = content_height + config.top_padding + config.node_height;
    let width = raw_width.clamp(config.min_width, config.max_width);
    let height = raw_height.clamp(config.min_height, config.max_height);
    let horizontal_offset = config.side_padding + ((width - raw_width) / 2.0).max(0.0);
    let vertical_offset = config.top_padding + ((height - raw_height) / 2.0).max(0.0);

    let positions = positions
        .into_iter()
        .map(|(id, position)| {
            (
                id,
                Position {
                    x: (position.x - min_x) * scale + horizontal_offset,
                    y: (position.y - min_y) * scale + vertical_offset,
                },
            )
        })
        .collect();

    Layout {
        positions,
        width,
        height,
        scale,
    }
}
