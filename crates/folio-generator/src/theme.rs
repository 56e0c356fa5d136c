//! The blog's theme: a base preset with the site's overrides applied.
//!
//! [`customize`] is pure. It takes the base preset by value and returns the
//! merged preset, so nothing global is modified. [`Theme`] wraps the engine
//! built from the merged preset and is meant to be built once and shared.

use tracing::info;

use crate::typography::{
    Declarations, FontScale, Length, Stylesheet, ThemeError, ThemePreset, Typography, engine,
};

/// Media query for visitors who prefer a light color scheme.
pub const LIGHT_SCHEME_QUERY: &str = "@media (prefers-color-scheme: light)";

/// Media query for visitors who prefer a dark color scheme.
pub const DARK_SCHEME_QUERY: &str = "@media (prefers-color-scheme: dark)";

/// Link class wrapped around responsive images in posts.
pub const IMAGE_LINK_SELECTOR: &str = "a.gatsby-resp-image-link";

/// Site rules layered over every preset.
pub fn theme_overrides() -> Stylesheet {
    Stylesheet::new()
        .rule("html", Declarations::new().with("color-scheme", "light dark"))
        .nest(
            LIGHT_SCHEME_QUERY,
            Stylesheet::new().rule(
                ":root",
                Declarations::new()
                    .with("--bg-code", "rgba(255, 229, 100, 0.2)")
                    .with("--text-code", "#1a1a1a"),
            ),
        )
        .nest(
            DARK_SCHEME_QUERY,
            Stylesheet::new()
                .rule("body", Declarations::new().with("color", "white"))
                .rule(
                    ":root",
                    Declarations::new()
                        .with("--bg-code", "rgba(0, 122, 204, 0.2)")
                        .with("--text-code", "#d0d0ff"),
                ),
        )
        .rule(IMAGE_LINK_SELECTOR, Declarations::new().with("boxShadow", "none"))
}

fn override_hook(_: &Typography) -> Stylesheet {
    theme_overrides()
}

/// Apply the site overrides to `base` and drop its web fonts.
#[must_use]
pub fn customize(base: ThemePreset) -> ThemePreset {
    ThemePreset {
        override_theme_styles: Some(override_hook),
        google_fonts: None,
        ..base
    }
}

/// Built theme: merged preset plus the engine derived from it.
#[derive(Debug, Clone)]
pub struct Theme {
    typography: Typography,
}

impl Theme {
    /// Customize `base` and build the engine.
    pub fn build(base: ThemePreset) -> engine::Result<Self> {
        let merged = customize(base);
        info!(preset = %merged.title, "building theme");
        Ok(Self {
            typography: Typography::new(merged)?,
        })
    }

    /// Build from a bundled preset name.
    pub fn from_preset_name(name: &str) -> engine::Result<Self> {
        let base =
            ThemePreset::by_name(name).ok_or_else(|| ThemeError::UnknownPreset(name.to_string()))?;
        Self::build(base)
    }

    /// The merged preset.
    #[must_use]
    pub fn preset(&self) -> &ThemePreset {
        self.typography.preset()
    }

    #[must_use]
    pub fn typography(&self) -> &Typography {
        &self.typography
    }

    #[must_use]
    pub fn rhythm(&self, lines: f64) -> Length {
        self.typography.rhythm(lines)
    }

    #[must_use]
    pub fn scale(&self, step: f64) -> FontScale {
        self.typography.scale(step)
    }

    #[must_use]
    pub fn to_css(&self) -> String {
        self.typography.to_css()
    }
}

/// Shorthand for [`Theme::build`].
pub fn build_theme(base: ThemePreset) -> engine::Result<Theme> {
    Theme::build(base)
}
