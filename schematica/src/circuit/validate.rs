//! Structured-output validation for model completions.
//!
//! The policy is fail-hard at the structural level and fail-soft below it:
//! a completion without a JSON root, a `response` string or a `circuit`
//! object is rejected outright, while malformed components, connections and
//! narrative entries inside `circuit` are dropped or defaulted one by one.
//! A single hallucinated component must not invalidate an otherwise usable
//! answer.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::circuit::types::{
    CircuitComponent, CircuitConnection, CircuitDesign, CircuitPlan, Position, DEFAULT_SUMMARY,
    DEFAULT_TITLE,
};

/// Structural validation failure for one completion attempt.
///
/// Leaf-level problems never surface here; they are absorbed by dropping or
/// defaulting the offending element.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("model response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model response violates the expected shape: {0}")]
    Schema(&'static str),
}

/// Validate a raw model completion into a typed [`CircuitDesign`].
///
/// Strips Markdown code fences, parses the remainder as JSON and applies the
/// schema contract. Pure: identical input yields identical output, so the
/// caller may safely retry a completion and re-validate.
pub fn parse_design(raw: &str) -> Result<CircuitDesign, ValidateError> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned)?;

    let root = value
        .as_object()
        .ok_or(ValidateError::Schema("invalid root"))?;
    let response = root
        .get("response")
        .and_then(Value::as_str)
        .ok_or(ValidateError::Schema("missing response"))?
        .to_string();
    let circuit = root
        .get("circuit")
        .and_then(Value::as_object)
        .ok_or(ValidateError::Schema("missing circuit"))?;

    Ok(CircuitDesign {
        response,
        circuit: validate_plan(circuit),
    })
}

/// Remove a leading Markdown code fence (with or without a language tag) and
/// a trailing one, then trim surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // The language tag, when present, sits between the fence and the
        // first newline.
        let tag_len = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .count();
        text = rest[tag_len..].trim_start();
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text
}

fn validate_plan(circuit: &Map<String, Value>) -> CircuitPlan {
    let title =
        string_field(circuit, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let summary =
        string_field(circuit, "summary").unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

    let mut components = Vec::new();
    let mut seen_ids = HashSet::new();
    for value in array_items(circuit.get("components")) {
        let Some(component) = validate_component(value) else {
            tracing::debug!("dropping malformed component entry");
            continue;
        };
        // Duplicate ids keep the first occurrence so the position map and
        // connection resolution stay deterministic.
        if !seen_ids.insert(component.id.clone()) {
            tracing::warn!(id = %component.id, "dropping component with duplicate id");
            continue;
        }
        components.push(component);
    }

    let ids: HashSet<&str> = components.iter().map(|c| c.id.as_str()).collect();
    let connections = array_items(circuit.get("connections"))
        .iter()
        .filter_map(|value| validate_connection(value, &ids))
        .collect();

    CircuitPlan {
        title,
        summary,
        components,
        connections,
        notes: string_items(circuit.get("notes")),
        assumptions: string_items(circuit.get("assumptions")),
        warnings: string_items(circuit.get("warnings")),
    }
}

fn validate_component(value: &Value) -> Option<CircuitComponent> {
    let object = value.as_object()?;

    let id = string_field(object, "id").filter(|id| !id.is_empty())?;
    let label = string_field(object, "label")?;
    let kind = string_field(object, "type")?;

    Some(CircuitComponent {
        id,
        label,
        kind,
        description: string_field(object, "description"),
        pins: u32_field(object, "pins").or_else(|| u32_field(object, "pinCount")),
        position: position_field(object.get("position")),
    })
}

fn validate_connection(value: &Value, ids: &HashSet<&str>) -> Option<CircuitConnection> {
    let object = value.as_object()?;

    let from = string_field(object, "from")?;
    let to = string_field(object, "to")?;
    if !ids.contains(from.as_str()) || !ids.contains(to.as_str()) {
        tracing::debug!(%from, %to, "dropping connection with unknown endpoint");
        return None;
    }

    Some(CircuitConnection {
        id: string_field(object, "id"),
        from,
        to,
        label: string_field(object, "label"),
        description: string_field(object, "description"),
    })
}

// Attempt-parse combinators. Each probes one field and yields `None` on a
// missing or wrong-typed value, leaving the drop-or-default decision to the
// caller.

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u32_field(object: &Map<String, Value>, key: &str) -> Option<u32> {
    object
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn position_field(value: Option<&Value>) -> Option<Position> {
    let object = value?.as_object()?;
    let x = object.get("x")?.as_f64()?;
    let y = object.get("y")?.as_f64()?;
    Some(Position { x, y })
}

fn array_items(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    array_items(value)
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
