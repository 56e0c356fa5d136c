//! Folio Generator Library
//!
//! Bio rendering and typography generation for Folio.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`bio`] - Author bio fragment rendering
//! - [`typography`] - Vertical rhythm, modular scale and stylesheet generation
//! - [`theme`] - The blog's overrides merged into a base preset
//! - [`assets`] - Profile image resolution with optional fingerprinting
//! - [`build`] - Build orchestration

pub mod assets;
pub mod bio;
pub mod build;
pub mod template;
pub mod theme;
pub mod typography;

pub use assets::{ProfileImage, ResolvedImage};
pub use bio::{BioLinks, BioRenderer, BioViewModel};
pub use build::{BuildStats, Builder};
pub use template::{Template, TemplateContext, TemplateRegistry};
pub use theme::{Theme, build_theme, customize, theme_overrides};
pub use typography::{Length, Stylesheet, ThemePreset, Typography};
