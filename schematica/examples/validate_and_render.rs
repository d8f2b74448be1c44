//! Validate a canned model completion and print the resulting SVG.
//!
//! Run with: cargo run --example validate_and_render

use schematica::prelude::*;

const COMPLETION: &str = r#"```json
{
  "response": "Un circuito mínimo: batería, resistencia limitadora y LED en serie.",
  "circuit": {
    "title": "LED en serie",
    "summary": "La resistencia limita la corriente del LED a unos 15mA.",
    "components": [
      { "id": "bat", "label": "Batería 9V", "type": "Fuente DC" },
      { "id": "r1", "label": "R1 470Ω", "type": "Resistencia" },
      { "id": "led", "label": "D1 LED", "type": "LED" }
    ],
    "connections": [
      { "from": "bat", "to": "r1", "label": "V+" },
      { "from": "r1", "to": "led" },
      { "from": "led", "to": "bat", "label": "retorno" }
    ],
    "notes": ["Para 12V sube R1 a 680Ω."],
    "assumptions": [],
    "warnings": []
  }
}
```"#;

fn main() -> Result<(), ValidateError> {
    let design = parse_design(COMPLETION)?;

    eprintln!("{}", design.circuit.title);
    eprintln!(
        "{} componentes, {} conexiones",
        design.circuit.components.len(),
        design.circuit.connections.len()
    );

    print!("{}", SvgRenderer::new().render(&design.circuit));
    Ok(())
}
