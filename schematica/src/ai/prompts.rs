//! Prompt templates for the circuit design conversation.
//!
//! Templates use `{word}` placeholders filled by [`interpolate`]. Unknown
//! placeholders are left verbatim so a template bug is visible in the
//! outgoing prompt instead of silently vanishing.

use crate::ai::provider::{PromptMessage, Role};

/// JSON shape description appended to the system prompt and echoed to the
/// model verbatim. The validator enforces exactly this contract.
pub const FORMAT_INSTRUCTIONS: &str = "Devuelve un objeto JSON con la forma { \"response\": string, \"circuit\": { \"title\": string, \"summary\": string, \"components\": Array<Component>, \"connections\": Array<Connection>, \"notes\": string[], \"assumptions\": string[], \"warnings\": string[] } }. Cada Component debe tener id, label, type y opcionalmente description, pins, position (con x e y numéricos). Cada Connection requiere from y to que coincidan con ids de componentes y puede incluir label, description e id.";

const SYSTEM_TEMPLATE: &str = "Eres Schematicia, una ingeniera electrónica experta. Tu tarea es interpretar instrucciones del usuario para diseñar circuitos
electrónicos claros y didácticos. Siempre devuelves información estructurada en formato JSON siguiendo estrictamente las instrucciones de formato proporcionadas.

- Prioriza la claridad pedagógica, explica cómo funciona el circuito.
- Antes de generar una respuesta, valida que todas las referencias cruzadas (componentes y conexiones) coinciden.
- Propón valores realistas, orientados a prototipos en protoboard o PCBs sencillas.
- Cuando no puedas atender la solicitud, informa el motivo y sugiere alternativas seguras.

Incluye recomendaciones de pruebas y advertencias si el diseño involucra altos voltajes o corrientes elevadas.
{format_instructions}";

const USER_TEMPLATE: &str = "Contexto previo:
{history}

Nueva petición:
{input}";

/// Build the two-message prompt for one design request.
pub fn design_messages(input: &str, history: &str) -> Vec<PromptMessage> {
    vec![
        PromptMessage::new(
            Role::System,
            interpolate(
                SYSTEM_TEMPLATE,
                &[("format_instructions", FORMAT_INSTRUCTIONS)],
            ),
        ),
        PromptMessage::new(
            Role::User,
            interpolate(USER_TEMPLATE, &[("history", history), ("input", input)]),
        ),
    ]
}

/// Flatten earlier conversation turns into the `{history}` slot.
pub fn format_history(messages: &[PromptMessage]) -> String {
    if messages.is_empty() {
        return "No hay conversación previa.".to_string();
    }

    messages
        .iter()
        .map(|message| {
            let speaker = match message.role {
                Role::User => "Usuario",
                Role::Assistant => "Asistente",
                Role::System => "Sistema",
            };
            format!("{}: {}", speaker, message.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace `{word}` placeholders with the matching variable values.
pub fn interpolate(template: &str, variables: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let placeholder = after.find('}').map(|end| &after[..end]).filter(|key| {
            !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

        match placeholder {
            Some(key) => {
                match variables.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(key);
                        output.push('}');
                    }
                }
                rest = &after[key.len() + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
