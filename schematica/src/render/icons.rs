//! Icon classification from free-text component types.
//!
//! The `type` field of a component is natural language, not a schema enum.
//! Classification maps it onto a small closed set of glyphs for rendering.
//! This is a best-effort heuristic outside the validated data contract:
//! unseen vocabulary falls back to [`IconKind::Generic`] and
//! misclassification is acceptable.

use serde::{Deserialize, Serialize};

/// Closed set of schematic glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Supply,
    Led,
    Transistor,
    Switch,
    Resistor,
    Ground,
    Generic,
}

/// Maps a free-text component type onto an [`IconKind`].
pub trait IconClassifier: Send + Sync {
    fn classify(&self, type_text: &str) -> IconKind;
}

/// Default classifier: lower-cased substring matching over Spanish and
/// English electronics vocabulary. First match wins.
#[derive(Debug, Default, Clone)]
pub struct SubstringClassifier;

impl IconClassifier for SubstringClassifier {
    fn classify(&self, type_text: &str) -> IconKind {
        let normalized = type_text.to_lowercase();
        let has = |needle: &str| normalized.contains(needle);

        if has("fuente") || has("vcc") || has("dc") {
            IconKind::Supply
        } else if has("led") {
            IconKind::Led
        } else if has("transistor") || has("mosfet") {
            IconKind::Transistor
        } else if has("interruptor") || has("pulsador") || has("switch") {
            IconKind::Switch
        } else if has("resist") {
            IconKind::Resistor
        } else if has("gnd") || has("tierra") || has("ground") {
            IconKind::Ground
        } else {
            IconKind::Generic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_vocabulary() {
        let classifier = SubstringClassifier;
        assert_eq!(classifier.classify("Fuente de 9V"), IconKind::Supply);
        assert_eq!(classifier.classify("LED rojo"), IconKind::Led);
        assert_eq!(classifier.classify("Transistor NPN"), IconKind::Transistor);
        assert_eq!(classifier.classify("MOSFET canal N"), IconKind::Transistor);
        assert_eq!(classifier.classify("Pulsador momentáneo"), IconKind::Switch);
        assert_eq!(classifier.classify("Resistencia 220R"), IconKind::Resistor);
        assert_eq!(classifier.classify("Tierra"), IconKind::Ground);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let classifier = SubstringClassifier;
        assert_eq!(classifier.classify("RESISTOR"), IconKind::Resistor);
        assert_eq!(classifier.classify("Switch SPDT"), IconKind::Switch);
    }

    #[test]
    fn unknown_vocabulary_falls_back_to_generic() {
        let classifier = SubstringClassifier;
        assert_eq!(classifier.classify("Condensador 100nF"), IconKind::Generic);
        assert_eq!(classifier.classify(""), IconKind::Generic);
    }

    #[test]
    fn supply_wins_over_later_rules() {
        // "Fuente DC conmutada" matches both supply keywords; order keeps it
        // a supply.
        let classifier = SubstringClassifier;
        assert_eq!(classifier.classify("Fuente DC conmutada"), IconKind::Supply);
    }
}
