//! Typography theme presets.

use super::{
    engine::Typography,
    length::{Length, Unit},
    stylesheet::{Declarations, Stylesheet},
};

/// Hook that contributes rules computed from a configured engine.
pub type StyleHook = fn(&Typography) -> Stylesheet;

/// Media query used by themes for narrow screens.
pub const MOBILE_MEDIA_QUERY: &str = "@media only screen and (max-width:480px)";

/// A web font family to request from Google Fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleFont {
    pub name: String,
    pub styles: Vec<String>,
}

impl GoogleFont {
    pub fn new(name: &str, styles: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            styles: styles.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Configuration for the typography engine.
#[derive(Debug, Clone)]
pub struct ThemePreset {
    pub title: String,
    /// Root font size in pixels.
    pub base_font_size: f64,
    /// Unitless line height.
    pub base_line_height: f64,
    pub scale_ratio: f64,
    pub header_font_family: Vec<String>,
    pub body_font_family: Vec<String>,
    pub header_color: String,
    pub body_color: String,
    pub header_weight: String,
    pub body_weight: String,
    pub bold_weight: String,
    /// Bottom margin of block elements, in rhythm lines.
    pub block_margin_bottom: f64,
    /// Minimum space above and below a line of text, in pixels.
    pub min_line_padding: f64,
    pub round_to_nearest_half_line: bool,
    pub rhythm_unit: Unit,
    /// Web fonts to load. `None` means no font request is made.
    pub google_fonts: Option<Vec<GoogleFont>>,
    /// Rules the theme itself adds on top of the engine's base styles.
    pub theme_styles: Option<StyleHook>,
    /// Site-level hook applied after the theme's own rules.
    pub override_theme_styles: Option<StyleHook>,
}

impl Default for ThemePreset {
    fn default() -> Self {
        Self {
            title: "default".to_string(),
            base_font_size: 16.0,
            base_line_height: 1.45,
            scale_ratio: 2.0,
            header_font_family: families(&[
                "-apple-system",
                "BlinkMacSystemFont",
                "Segoe UI",
                "Roboto",
                "Helvetica Neue",
                "Arial",
                "sans-serif",
            ]),
            body_font_family: families(&["georgia", "serif"]),
            header_color: "inherit".to_string(),
            body_color: "hsla(0,0%,0%,0.8)".to_string(),
            header_weight: "bold".to_string(),
            body_weight: "normal".to_string(),
            bold_weight: "bold".to_string(),
            block_margin_bottom: 1.0,
            min_line_padding: 2.0,
            round_to_nearest_half_line: true,
            rhythm_unit: Unit::Rem,
            google_fonts: None,
            theme_styles: None,
            override_theme_styles: None,
        }
    }
}

impl ThemePreset {
    /// Look up a bundled preset by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "wordpress-2016" | "wordpress2016" => Some(wordpress_2016()),
            _ => None,
        }
    }
}

fn families(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Render a font family list as a CSS `font-family` value.
pub fn font_family_value(families: &[String]) -> String {
    families
        .iter()
        .map(|family| {
            if family.contains(' ') {
                format!("'{family}'")
            } else {
                family.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Black at the opacity matching `lightness` percent on a white background.
pub fn gray(lightness: f64) -> String {
    let opacity = ((100.0 - lightness) / 100.0).clamp(0.0, 1.0);
    format!("hsla(0,0%,0%,{})", trim_number(opacity))
}

fn trim_number(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// The "Wordpress Theme 2016" preset.
pub fn wordpress_2016() -> ThemePreset {
    ThemePreset {
        title: "Wordpress Theme 2016".to_string(),
        base_font_size: 16.0,
        base_line_height: 1.75,
        scale_ratio: 5.0 / 2.0,
        header_font_family: families(&["Merriweather", "Georgia", "serif"]),
        body_font_family: families(&["Merriweather", "Georgia", "serif"]),
        body_color: "hsla(0,0%,0%,0.9)".to_string(),
        header_weight: "900".to_string(),
        body_weight: "400".to_string(),
        bold_weight: "700".to_string(),
        google_fonts: Some(vec![
            GoogleFont::new("Montserrat", &["700"]),
            GoogleFont::new("Merriweather", &["400", "400i", "700", "700i", "900", "900i"]),
        ]),
        theme_styles: Some(wordpress_2016_styles),
        ..ThemePreset::default()
    }
}

fn wordpress_2016_styles(typography: &Typography) -> Stylesheet {
    let preset = typography.preset();
    let rhythm = |lines: f64| typography.rhythm(lines);

    let mut blockquote: Declarations = typography.scale(1.0 / 5.0).into();
    blockquote.extend(
        Declarations::new()
            .with("color", gray(41.0))
            .with("font-style", "italic")
            .with("padding-left", rhythm(13.0 / 16.0))
            .with("margin-left", rhythm(-1.0))
            .with(
                "border-left",
                format!("{} solid {}", rhythm(3.0 / 16.0), gray(10.0)),
            ),
    );

    let mut cite: Declarations = typography
        .adjust_font_size_to(preset.base_font_size, None)
        .into();
    cite.extend(
        Declarations::new()
            .with("color", &preset.body_color)
            .with("font-weight", &preset.body_weight),
    );

    Stylesheet::new()
        .rule(
            "h1",
            Declarations::new().with("font-family", "Montserrat,sans-serif"),
        )
        .rule("blockquote", blockquote)
        .rule(
            "blockquote > :last-child",
            Declarations::new().with("margin-bottom", Length::new(0.0, preset.rhythm_unit)),
        )
        .rule("blockquote cite", cite)
        .rule(
            "blockquote cite:before",
            Declarations::new().with("content", "\"\u{2014} \""),
        )
        .rule("ul", Declarations::new().with("list-style", "disc"))
        .rule("ul,ol", Declarations::new().with("margin-left", "0"))
        .nest(
            MOBILE_MEDIA_QUERY,
            Stylesheet::new()
                .rule("ul,ol", Declarations::new().with("margin-left", rhythm(1.0)))
                .rule(
                    "blockquote",
                    Declarations::new()
                        .with("margin-left", rhythm(-3.0 / 4.0))
                        .with("margin-right", "0")
                        .with("padding-left", rhythm(9.0 / 16.0)),
                ),
        )
        .rule(
            "h1,h2,h3,h4,h5,h6",
            Declarations::new().with("margin-top", rhythm(2.0)),
        )
        .rule(
            "h4",
            Declarations::new()
                .with("letter-spacing", "0.140625em")
                .with("text-transform", "uppercase"),
        )
        .rule("h6", Declarations::new().with("font-style", "italic"))
        .rule(
            "a",
            Declarations::new()
                .with("box-shadow", "0 1px 0 0 currentColor")
                .with("color", "#007acc")
                .with("text-decoration", "none"),
        )
        .rule(
            "a:hover,a:active",
            Declarations::new().with("box-shadow", "none"),
        )
        .rule(
            "mark,ins",
            Declarations::new()
                .with("background", "#007acc")
                .with("color", "white")
                .with(
                    "padding",
                    format!("{} {}", rhythm(1.0 / 16.0), rhythm(1.0 / 8.0)),
                )
                .with("text-decoration", "none"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert!(ThemePreset::by_name("wordpress-2016").is_some());
        assert!(ThemePreset::by_name("default").is_some());
        assert!(ThemePreset::by_name("comic-sans").is_none());
    }

    #[test]
    fn test_wordpress_2016_values() {
        let preset = wordpress_2016();
        assert_eq!(preset.base_font_size, 16.0);
        assert_eq!(preset.base_line_height, 1.75);
        assert_eq!(preset.scale_ratio, 2.5);
        assert_eq!(preset.header_weight, "900");
        assert!(preset.theme_styles.is_some());
        assert!(preset.override_theme_styles.is_none());

        let fonts = preset.google_fonts.expect("wordpress 2016 loads web fonts");
        assert_eq!(fonts.len(), 2);
        assert_eq!(fonts[0].name, "Montserrat");
    }

    #[test]
    fn test_font_family_value_quotes_spaces() {
        let value = font_family_value(&families(&["Segoe UI", "serif"]));
        assert_eq!(value, "'Segoe UI',serif");
    }

    #[test]
    fn test_gray() {
        assert_eq!(gray(41.0), "hsla(0,0%,0%,0.59)");
        assert_eq!(gray(100.0), "hsla(0,0%,0%,0)");
        assert_eq!(gray(0.0), "hsla(0,0%,0%,1)");
    }
}
