pub mod icons;
pub mod svg;

pub use icons::{IconClassifier, IconKind, SubstringClassifier};
pub use svg::SvgRenderer;
