//! Typography engine: vertical rhythm, modular scale and stylesheet
//! generation from a theme preset.

pub mod engine;
pub mod inject;
pub mod length;
pub mod preset;
pub mod stylesheet;

pub use engine::{ThemeError, Typography};
pub use inject::{DevStyleInjector, STYLE_ELEMENT_ID, inject_styles};
pub use length::{Length, Unit};
pub use preset::{GoogleFont, StyleHook, ThemePreset, wordpress_2016};
pub use stylesheet::{Declarations, FontScale, RuleBody, Stylesheet};
