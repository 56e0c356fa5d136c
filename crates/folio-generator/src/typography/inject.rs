//! Development-mode style injection.
//!
//! Outside production the generated CSS is written straight into the page as
//! a `<style>` element so edits to the theme show up on reload without a
//! separate stylesheet.

use folio_core::Environment;
use tracing::debug;

use super::engine::Typography;

/// `id` of the injected `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "typography.js";

/// Insert the typography `<style>` element into `html`, or replace the one
/// already there.
///
/// The element goes right before `</head>`, or at the very start when the
/// document has no head. Applying it twice yields the same document.
pub fn inject_styles(html: &str, css: &str) -> String {
    let element = format!("<style id=\"{STYLE_ELEMENT_ID}\">\n{css}</style>");
    let open_tag = format!("<style id=\"{STYLE_ELEMENT_ID}\">");

    if let Some(start) = html.find(&open_tag) {
        if let Some(close) = html[start..].find("</style>") {
            let end = start + close + "</style>".len();
            let mut out = String::with_capacity(html.len() + css.len());
            out.push_str(&html[..start]);
            out.push_str(&element);
            out.push_str(&html[end..]);
            return out;
        }
    }

    match html.find("</head>") {
        Some(head_end) => {
            let mut out = String::with_capacity(html.len() + element.len() + 1);
            out.push_str(&html[..head_end]);
            out.push_str(&element);
            out.push('\n');
            out.push_str(&html[head_end..]);
            out
        }
        None => format!("{element}\n{html}"),
    }
}

/// Applies [`inject_styles`] only when the environment is not production.
#[derive(Debug, Clone, Copy)]
pub struct DevStyleInjector {
    environment: Environment,
}

impl DevStyleInjector {
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    /// Whether [`DevStyleInjector::apply`] changes documents.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.environment.is_production()
    }

    /// Inject the engine's CSS into `html` in development; pass it through
    /// unchanged in production.
    pub fn apply(&self, html: &str, typography: &Typography) -> String {
        if !self.is_active() {
            return html.to_string();
        }
        debug!(preset = %typography.preset().title, "injecting typography styles");
        inject_styles(html, &typography.to_css())
    }
}
