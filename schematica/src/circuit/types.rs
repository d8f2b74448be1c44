//! Circuit plan data model.
//!
//! These types mirror the JSON interchange shape produced by the language
//! model: a plan owns an ordered component list, an ordered connection list
//! and a handful of narrative fields. A plan is built once per validated
//! completion and never mutated afterwards; the next completion replaces it
//! wholesale.

use serde::{Deserialize, Serialize};

/// Title substituted when the model omits one or sends a non-string.
pub const DEFAULT_TITLE: &str = "Esquema propuesto";

/// Summary substituted when the model omits one or sends a non-string.
pub const DEFAULT_SUMMARY: &str = "Sin resumen disponible.";

/// A 2-D point in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One electrical part in the circuit.
///
/// `kind` is free text from the model (serialized as `type`), not an enum;
/// icon classification over it is best-effort and happens at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitComponent {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pins: Option<u32>,
    /// Explicit layout position. Components without one are placed by the
    /// layout engine's default grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A directed edge between two component ids.
///
/// `from` and `to` always reference components of the owning plan; the
/// validator drops connections that would dangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitConnection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CircuitConnection {
    /// Identifier used downstream when the model did not supply one.
    ///
    /// Deterministic for a given plan: derived from the endpoints and the
    /// connection's ordinal position, never random.
    pub fn fallback_id(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}-{}-{}", self.from, self.to, index),
        }
    }
}

/// The validated, top-level circuit aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitPlan {
    pub title: String,
    pub summary: String,
    pub components: Vec<CircuitComponent>,
    pub connections: Vec<CircuitConnection>,
    pub notes: Vec<String>,
    pub assumptions: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for CircuitPlan {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            components: Vec::new(),
            connections: Vec::new(),
            notes: Vec::new(),
            assumptions: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl CircuitPlan {
    /// Look up a component by id.
    pub fn component(&self, id: &str) -> Option<&CircuitComponent> {
        self.components.iter().find(|c| c.id == id)
    }
}

/// A full model answer: conversational text plus the structured plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDesign {
    pub response: String,
    pub circuit: CircuitPlan,
}
