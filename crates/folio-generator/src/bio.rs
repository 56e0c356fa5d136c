//! Author bio rendering.
//!
//! The renderer receives metadata that was already resolved by a
//! [`MetadataProvider`]; it never looks anything up itself. It holds only
//! immutable data, so one renderer can serve every page of a build.

use folio_core::{AuthorMetadata, BioConfig, BioVariant, CoreError, MetadataProvider};
use thiserror::Error;
use tracing::debug;

use crate::{
    assets::ResolvedImage,
    template::{DEFAULT_BIO_TEMPLATE, Template, TemplateContext, TemplateError, escape_html},
    theme::Theme,
    typography::Length,
};

/// Prefix of every Twitter profile link.
pub const TWITTER_BASE_URL: &str = "https://twitter.com/";

/// Bio rendering errors.
#[derive(Debug, Error)]
pub enum BioError {
    /// Metadata is missing a required field.
    #[error(transparent)]
    Metadata(#[from] CoreError),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for bio rendering.
pub type Result<T> = std::result::Result<T, BioError>;

/// Fixed outbound links shown in the bio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioLinks {
    pub project_name: String,
    pub project_url: String,
    pub sponsor_url: String,
}

impl From<&BioConfig> for BioLinks {
    fn from(config: &BioConfig) -> Self {
        Self {
            project_name: config.project_name.clone(),
            project_url: config.project_url.clone(),
            sponsor_url: config.sponsor_url.clone(),
        }
    }
}

impl Default for BioLinks {
    fn default() -> Self {
        Self::from(&BioConfig::default())
    }
}

/// A hyperlink in the bio paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioLink {
    pub label: String,
    pub href: String,
}

/// One run of the bio paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Strong(String),
    Link(BioLink),
}

/// Everything a bio shows, before it becomes markup.
#[derive(Debug, Clone, PartialEq)]
pub struct BioViewModel {
    pub image_src: String,
    pub image_alt: String,
    /// Square image edge, in pixels.
    pub image_size: u32,
    pub paragraph: Vec<Segment>,
}

impl BioViewModel {
    /// Links in paragraph order.
    pub fn links(&self) -> impl Iterator<Item = &BioLink> {
        self.paragraph.iter().filter_map(|segment| match segment {
            Segment::Link(link) => Some(link),
            _ => None,
        })
    }

    /// The paragraph as plain text.
    #[must_use]
    pub fn paragraph_text(&self) -> String {
        self.paragraph
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) | Segment::Strong(text) => text.as_str(),
                Segment::Link(link) => link.label.as_str(),
            })
            .collect()
    }

    /// The paragraph as HTML with every value escaped.
    #[must_use]
    pub fn paragraph_html(&self) -> String {
        self.paragraph
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => escape_html(text),
                Segment::Strong(text) => format!("<strong>{}</strong>", escape_html(text)),
                Segment::Link(link) => format!(
                    "<a href=\"{}\">{}</a>",
                    escape_html(&link.href),
                    escape_html(&link.label)
                ),
            })
            .collect()
    }
}

struct VariantLayout {
    image_size: u32,
    image_margin_lines: f64,
    container_margin_lines: f64,
    follow: &'static str,
    closing: &'static str,
}

fn layout(variant: BioVariant) -> VariantLayout {
    match variant {
        BioVariant::Canonical => VariantLayout {
            image_size: 50,
            image_margin_lines: 1.0 / 2.0,
            container_margin_lines: 2.5,
            follow: ". If you like what you read, you can follow me on ",
            closing: ".",
        },
        BioVariant::Compact => VariantLayout {
            image_size: 32,
            image_margin_lines: 1.0 / 4.0,
            container_margin_lines: 1.5,
            follow: ". Follow me on ",
            closing: ". \u{1F44B}",
        },
    }
}

/// Renders the author bio fragment.
#[derive(Debug, Clone)]
pub struct BioRenderer {
    template: Template,
    image: ResolvedImage,
    variant: BioVariant,
    links: BioLinks,
    image_margin: Length,
    container_margin: Length,
}

impl BioRenderer {
    /// Create a renderer whose spacing follows `theme`'s rhythm.
    #[must_use]
    pub fn new(theme: &Theme, image: ResolvedImage, variant: BioVariant, links: BioLinks) -> Self {
        let layout = layout(variant);
        Self {
            template: Template::new("bio", DEFAULT_BIO_TEMPLATE),
            image,
            variant,
            links,
            image_margin: theme.rhythm(layout.image_margin_lines),
            container_margin: theme.rhythm(layout.container_margin_lines),
        }
    }

    /// Use a custom outer template.
    ///
    /// It receives `container_style`, `image_src`, `image_alt`,
    /// `image_size`, `image_style` and `paragraph`.
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn variant(&self) -> BioVariant {
        self.variant
    }

    /// Build the view model, failing if a required field is missing.
    pub fn view_model(&self, metadata: &AuthorMetadata) -> Result<BioViewModel> {
        metadata.validate()?;
        let layout = layout(self.variant);

        let paragraph = vec![
            Segment::Text("Written by ".to_string()),
            Segment::Strong(metadata.author.clone()),
            Segment::Text(", author of ".to_string()),
            Segment::Link(BioLink {
                label: self.links.project_name.clone(),
                href: self.links.project_url.clone(),
            }),
            Segment::Text(layout.follow.to_string()),
            Segment::Link(BioLink {
                label: "Twitter".to_string(),
                href: format!("{TWITTER_BASE_URL}{}", metadata.social.twitter),
            }),
            Segment::Text(" or ".to_string()),
            Segment::Link(BioLink {
                label: "sponsor me".to_string(),
                href: self.links.sponsor_url.clone(),
            }),
            Segment::Text(layout.closing.to_string()),
        ];

        Ok(BioViewModel {
            image_src: self.image.url().to_string(),
            image_alt: metadata.author.clone(),
            image_size: layout.image_size,
            paragraph,
        })
    }

    /// Render the bio fragment for `metadata`.
    pub fn render(&self, metadata: &AuthorMetadata) -> Result<String> {
        let view = self.view_model(metadata)?;
        debug!(author = %view.image_alt, variant = ?self.variant, "rendering bio");

        let size = view.image_size;
        let ctx = TemplateContext::new()
            .with_var(
                "container_style",
                format!("display: flex; margin-bottom: {};", self.container_margin),
            )
            .with_var("image_src", escape_html(&view.image_src))
            .with_var("image_alt", escape_html(&view.image_alt))
            .with_var("image_size", size.to_string())
            .with_var(
                "image_style",
                format!(
                    "margin-right: {}; margin-bottom: 0; width: {size}px; height: {size}px; border-radius: 100%;",
                    self.image_margin
                ),
            )
            .with_var("paragraph", view.paragraph_html());

        Ok(self.template.render(&ctx)?)
    }

    /// Resolve metadata through `provider`, then render.
    pub fn render_from<P: MetadataProvider + ?Sized>(&self, provider: &P) -> Result<String> {
        let metadata = provider.site_metadata()?;
        self.render(&metadata)
    }
}

#[cfg(test)]
mod tests {
    use folio_core::StaticMetadata;

    use super::*;
    use crate::{theme::build_theme, typography::wordpress_2016};

    fn renderer(variant: BioVariant) -> BioRenderer {
        let theme = build_theme(wordpress_2016()).unwrap();
        BioRenderer::new(
            &theme,
            ResolvedImage::new("/assets/profile-pic.png"),
            variant,
            BioLinks::default(),
        )
    }

    fn jane() -> AuthorMetadata {
        AuthorMetadata::new("Jane Doe", "janedoe")
    }

    #[test]
    fn test_render_canonical() {
        let html = renderer(BioVariant::Canonical).render(&jane()).unwrap();

        assert!(html.contains("Written by <strong>Jane Doe</strong>, author of "));
        assert!(html.contains(r#"href="https://twitter.com/janedoe""#));
        assert!(html.contains(r#"alt="Jane Doe""#));
        assert!(html.contains(r#"src="/assets/profile-pic.png""#));
        assert!(html.contains("display: flex; margin-bottom: 4.375rem;"));
        assert!(html.contains("margin-right: 0.875rem; margin-bottom: 0; width: 50px; height: 50px; border-radius: 100%;"));
        assert!(html.contains("you can follow me on <a"));
        assert!(html.contains(">sponsor me</a>.</p>"));
    }

    #[test]
    fn test_render_compact() {
        let html = renderer(BioVariant::Compact).render(&jane()).unwrap();

        assert!(html.contains("width: 32px; height: 32px;"));
        assert!(html.contains("margin-right: 0.4375rem;"));
        assert!(html.contains(". Follow me on <a"));
        assert!(html.contains("sponsor me</a>. \u{1F44B}</p>"));
    }

    #[test]
    fn test_fixed_links_appear_once() {
        let links = BioLinks::default();
        let html = renderer(BioVariant::Canonical).render(&jane()).unwrap();

        assert_eq!(html.matches(&links.project_url).count(), 1);
        assert_eq!(html.matches(&links.sponsor_url).count(), 1);
    }

    #[test]
    fn test_view_model() {
        let view = renderer(BioVariant::Canonical).view_model(&jane()).unwrap();

        assert_eq!(view.image_alt, "Jane Doe");
        assert_eq!(view.image_size, 50);
        assert!(view.paragraph_text().starts_with("Written by Jane Doe, author of elm-review."));

        let hrefs: Vec<_> = view.links().map(|link| link.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "https://package.elm-lang.org/packages/jfmengels/elm-review/latest/",
                "https://twitter.com/janedoe",
                "https://github.com/sponsors/jfmengels",
            ]
        );
    }

    #[test]
    fn test_missing_author_fails() {
        let err = renderer(BioVariant::Canonical)
            .render(&AuthorMetadata::new("", "janedoe"))
            .unwrap_err();
        assert!(matches!(err, BioError::Metadata(CoreError::MissingField("author"))));
    }

    #[test]
    fn test_missing_twitter_fails() {
        let err = renderer(BioVariant::Canonical)
            .render(&AuthorMetadata::new("Jane Doe", ""))
            .unwrap_err();
        assert!(err.to_string().contains("social.twitter"));
    }

    #[test]
    fn test_values_are_escaped() {
        let meta = AuthorMetadata::new("Tom & \"Jerry\"", "a\"b");
        let html = renderer(BioVariant::Canonical).render(&meta).unwrap();

        assert!(html.contains("<strong>Tom &amp; &quot;Jerry&quot;</strong>"));
        assert!(html.contains(r#"alt="Tom &amp; &quot;Jerry&quot;""#));
        assert!(html.contains(r#"href="https://twitter.com/a&quot;b""#));
    }

    #[test]
    fn test_render_from_provider() {
        let provider = StaticMetadata(jane());
        let html = renderer(BioVariant::Canonical).render_from(&provider).unwrap();
        assert!(html.contains("<strong>Jane Doe</strong>"));
    }

    #[test]
    fn test_custom_template() {
        let html = renderer(BioVariant::Canonical)
            .with_template(Template::new("bio", "<aside>{{ paragraph }}</aside>"))
            .render(&jane())
            .unwrap();
        assert!(html.starts_with("<aside>Written by"));
    }

    #[test]
    fn test_renderer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BioRenderer>();
    }
}
