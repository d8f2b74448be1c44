pub mod graph;
pub mod types;
pub mod validate;

pub use graph::{CircuitGraph, GraphStats};
pub use types::{CircuitComponent, CircuitConnection, CircuitDesign, CircuitPlan, Position};
pub use validate::{parse_design, strip_code_fences, ValidateError};
