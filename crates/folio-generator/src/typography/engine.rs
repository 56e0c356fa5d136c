//! Vertical rhythm and modular scale engine.

use thiserror::Error;
use tracing::debug;

use super::{
    length::{Length, Unit},
    preset::{ThemePreset, font_family_value, gray},
    stylesheet::{Declarations, FontScale, Stylesheet},
};

/// Typography engine errors.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A preset value the engine cannot compute with.
    #[error("invalid preset `{preset}`: {message}")]
    InvalidPreset { preset: String, message: String },

    /// No bundled preset with that name.
    #[error("unknown typography preset: {0}")]
    UnknownPreset(String),
}

/// Result type for typography operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

/// A configured typography engine.
///
/// All derived values are pure functions of the preset, so one engine can be
/// shared by every render in the process.
#[derive(Debug, Clone)]
pub struct Typography {
    preset: ThemePreset,
    base_line_height_px: f64,
}

impl Typography {
    /// Build an engine, rejecting presets with non-positive metrics.
    pub fn new(preset: ThemePreset) -> Result<Self> {
        let checks = [
            ("base_font_size", preset.base_font_size),
            ("base_line_height", preset.base_line_height),
            ("scale_ratio", preset.scale_ratio),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ThemeError::InvalidPreset {
                    preset: preset.title.clone(),
                    message: format!("{field} must be a positive number, got {value}"),
                });
            }
        }
        if preset.min_line_padding < 0.0 {
            return Err(ThemeError::InvalidPreset {
                preset: preset.title.clone(),
                message: "min_line_padding cannot be negative".to_string(),
            });
        }

        let base_line_height_px = preset.base_font_size * preset.base_line_height;
        debug!(
            preset = %preset.title,
            base_font_size = preset.base_font_size,
            base_line_height_px,
            "configured typography"
        );

        Ok(Self {
            preset,
            base_line_height_px,
        })
    }

    /// The preset this engine was built from.
    #[must_use]
    pub fn preset(&self) -> &ThemePreset {
        &self.preset
    }

    /// Height of `lines` rhythm lines at the base font size.
    #[must_use]
    pub fn rhythm(&self, lines: f64) -> Length {
        self.rhythm_at(lines, self.preset.base_font_size, 0.0)
    }

    /// Height of `lines` rhythm lines in the context of `font_size` pixels,
    /// minus `offset` pixels.
    #[must_use]
    pub fn rhythm_at(&self, lines: f64, font_size: f64, offset: f64) -> Length {
        let px = lines * self.base_line_height_px - offset;
        let length = self.convert_px(px, self.preset.rhythm_unit, font_size);
        match length.unit {
            Unit::Px => Length::px(length.value.floor()),
            _ => length,
        }
    }

    /// Font size and line height for `step` steps along the modular scale.
    #[must_use]
    pub fn scale(&self, step: f64) -> FontScale {
        let font_size = self.preset.scale_ratio.powf(step) * self.preset.base_font_size;
        self.adjust_font_size_to(font_size, None)
    }

    /// Font size in the rhythm unit plus a line height that keeps the
    /// rhythm. `lines` defaults to [`Typography::lines_for_font_size`].
    #[must_use]
    pub fn adjust_font_size_to(&self, font_size_px: f64, lines: Option<f64>) -> FontScale {
        let base = self.preset.base_font_size;
        let lines = lines.unwrap_or_else(|| self.lines_for_font_size(font_size_px));
        FontScale {
            font_size: self.convert_px(font_size_px, self.preset.rhythm_unit, base),
            line_height: self.rhythm_at(lines, base, 0.0),
        }
    }

    /// Number of rhythm lines a font size occupies, leaving at least the
    /// preset's minimum padding above and below.
    #[must_use]
    pub fn lines_for_font_size(&self, font_size_px: f64) -> f64 {
        let line_height = self.base_line_height_px;
        let mut lines = if self.preset.round_to_nearest_half_line {
            (2.0 * font_size_px / line_height).ceil() / 2.0
        } else {
            (font_size_px / line_height).ceil()
        };

        if lines * line_height - font_size_px < self.preset.min_line_padding * 2.0 {
            lines += if self.preset.round_to_nearest_half_line {
                0.5
            } else {
                1.0
            };
        }
        lines
    }

    fn convert_px(&self, px: f64, unit: Unit, context_px: f64) -> Length {
        match unit {
            Unit::Px => Length::px(px),
            Unit::Rem => Length::rem(px / self.preset.base_font_size),
            Unit::Em => Length::em(px / context_px),
        }
    }

    /// Full stylesheet: base styles, then the theme's rules, then the site
    /// override hook.
    #[must_use]
    pub fn create_styles(&self) -> Stylesheet {
        let mut styles = self.base_styles();
        if let Some(theme_styles) = self.preset.theme_styles {
            styles.merge(theme_styles(self));
        }
        if let Some(overrides) = self.preset.override_theme_styles {
            styles.merge(overrides(self));
        }
        styles
    }

    /// CSS text for [`Typography::create_styles`].
    #[must_use]
    pub fn to_css(&self) -> String {
        self.create_styles().to_css()
    }

    /// Stylesheet link for the preset's web fonts, if it requests any.
    #[must_use]
    pub fn google_fonts_link(&self) -> Option<String> {
        let fonts = self.preset.google_fonts.as_ref()?;
        if fonts.is_empty() {
            return None;
        }

        let families = fonts
            .iter()
            .map(|font| {
                let name = font.name.replace(' ', "+");
                if font.styles.is_empty() {
                    name
                } else {
                    format!("{name}:{}", font.styles.join(","))
                }
            })
            .collect::<Vec<_>>()
            .join("|");

        Some(format!(
            r#"<link href="https://fonts.googleapis.com/css?family={families}" rel="stylesheet" type="text/css">"#
        ))
    }

    fn base_styles(&self) -> Stylesheet {
        let preset = &self.preset;
        let block_margin = self.rhythm(preset.block_margin_bottom);
        let zero = Length::new(0.0, preset.rhythm_unit);
        let half_block = format!("calc({block_margin} / 2)");

        let mut block = Declarations::new();
        for side in ["margin-left", "margin-right", "margin-top"] {
            block.set(side, zero);
        }
        for side in ["padding-bottom", "padding-left", "padding-right", "padding-top"] {
            block.set(side, zero);
        }
        block.set("margin-bottom", block_margin);

        let mut code: Declarations = self
            .adjust_font_size_to(0.85 * preset.base_font_size, None)
            .into();
        code.set("font-family", "monospace");

        let mut table: Declarations = self
            .adjust_font_size_to(preset.base_font_size, None)
            .into();
        table.extend(
            Declarations::new()
                .with("border-collapse", "collapse")
                .with("width", "100%"),
        );

        let mut sheet = Stylesheet::new()
            .rule(
                "html",
                Declarations::new()
                    .with(
                        "font",
                        format!(
                            "{}%/{} {}",
                            trim_float(preset.base_font_size / 16.0 * 100.0),
                            trim_float(preset.base_line_height),
                            font_family_value(&preset.body_font_family)
                        ),
                    )
                    .with("box-sizing", "border-box")
                    .with("overflow-y", "scroll"),
            )
            .rule("*", Declarations::new().with("box-sizing", "inherit"))
            .rule("*:before", Declarations::new().with("box-sizing", "inherit"))
            .rule("*:after", Declarations::new().with("box-sizing", "inherit"))
            .rule(
                "body",
                Declarations::new()
                    .with("color", &preset.body_color)
                    .with("font-family", font_family_value(&preset.body_font_family))
                    .with("font-weight", &preset.body_weight)
                    .with("word-wrap", "break-word")
                    .with("font-kerning", "normal")
                    .with("font-feature-settings", "\"kern\", \"liga\", \"clig\", \"calt\""),
            )
            .rule("img", Declarations::new().with("max-width", "100%"))
            .rule(
                "h1,h2,h3,h4,h5,h6,hgroup,ul,ol,dl,dd,p,figure,pre,table,fieldset,blockquote,form,noscript,iframe,img,hr,address",
                block,
            )
            .rule(
                "blockquote",
                Declarations::new()
                    .with("margin-right", self.rhythm(1.0))
                    .with("margin-bottom", block_margin)
                    .with("margin-left", self.rhythm(1.0)),
            )
            .rule(
                "b,strong,dt,th",
                Declarations::new().with("font-weight", &preset.bold_weight),
            )
            .rule(
                "hr",
                Declarations::new()
                    .with("background", gray(80.0))
                    .with("border", "none")
                    .with("height", "1px")
                    .with("margin-bottom", format!("calc({block_margin} - 1px)")),
            )
            .rule(
                "ol,ul",
                Declarations::new()
                    .with("list-style-position", "outside")
                    .with("list-style-image", "none")
                    .with("margin-left", self.rhythm(1.0)),
            )
            .rule("li", Declarations::new().with("margin-bottom", &half_block))
            .rule("ol li,ul li", Declarations::new().with("padding-left", zero))
            .rule(
                "li > ol,li > ul",
                Declarations::new()
                    .with("margin-left", self.rhythm(1.0))
                    .with("margin-bottom", &half_block)
                    .with("margin-top", &half_block),
            )
            .rule(
                "blockquote *:last-child,li *:last-child,p *:last-child",
                Declarations::new().with("margin-bottom", zero),
            )
            .rule("li > p", Declarations::new().with("margin-bottom", &half_block))
            .rule("code,kbd,pre,samp", code)
            .rule(
                "abbr,abbr[title]",
                Declarations::new()
                    .with("border-bottom", format!("1px dotted {}", gray(50.0)))
                    .with("cursor", "help"),
            )
            .rule("abbr[title]", Declarations::new().with("text-decoration", "none"))
            .rule("table", table)
            .rule("thead", Declarations::new().with("text-align", "left"))
            .rule(
                "td,th",
                Declarations::new()
                    .with("text-align", "left")
                    .with("border-bottom", format!("1px solid {}", gray(88.0)))
                    .with("font-feature-settings", "\"tnum\"")
                    .with("padding-left", self.rhythm(2.0 / 3.0))
                    .with("padding-right", self.rhythm(2.0 / 3.0))
                    .with("padding-top", self.rhythm(0.5))
                    .with(
                        "padding-bottom",
                        format!("calc({} - 1px)", self.rhythm(0.5)),
                    ),
            )
            .rule(
                "th:first-child,td:first-child",
                Declarations::new().with("padding-left", zero),
            )
            .rule(
                "th:last-child,td:last-child",
                Declarations::new().with("padding-right", zero),
            )
            .rule(
                "h1,h2,h3,h4,h5,h6",
                Declarations::new()
                    .with("color", &preset.header_color)
                    .with("font-family", font_family_value(&preset.header_font_family))
                    .with("font-weight", &preset.header_weight)
                    .with("text-rendering", "optimizeLegibility"),
            );

        let header_steps = [
            ("h1", 5.0 / 5.0),
            ("h2", 3.0 / 5.0),
            ("h3", 2.0 / 5.0),
            ("h4", 0.0),
            ("h5", -1.0 / 5.0),
            ("h6", -1.5 / 5.0),
        ];
        for (header, step) in header_steps {
            sheet = sheet.rule(header, self.scale(step).into());
        }

        sheet
    }
}

fn trim_float(value: f64) -> String {
    let fixed = format!("{value:.5}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
