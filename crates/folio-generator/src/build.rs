//! Build orchestration.
//!
//! Resolves the profile image, builds the theme once, renders the bio and
//! writes the generated files into the output directory.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{Config, CoreError, Environment, MetadataProvider};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assets::{AssetError, ProfileImage, ResolvedImage},
    bio::{BioError, BioLinks, BioRenderer},
    template::{TemplateContext, TemplateError, TemplateRegistry, escape_html},
    theme::Theme,
    typography::{DevStyleInjector, ThemeError},
};

/// File name of the rendered bio fragment.
pub const BIO_FILE: &str = "bio.html";

/// File name of the generated stylesheet.
pub const STYLESHEET_FILE: &str = "typography.css";

/// File name of the preview page.
pub const PREVIEW_FILE: &str = "index.html";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Configuration or metadata error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Theme construction error.
    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),

    /// Bio rendering error.
    #[error("bio error: {0}")]
    Bio(#[from] BioError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Bytes written for the bio fragment.
    pub bio_bytes: usize,
    /// Bytes written for the stylesheet.
    pub css_bytes: usize,
    /// Whether styles were injected into the preview page.
    pub styles_injected: bool,
    /// URL of the profile image.
    pub profile_image: String,
    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Generates the bio, stylesheet and preview page.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    root: PathBuf,
    output_dir: PathBuf,
    environment: Environment,
    templates: TemplateRegistry,
}

impl Builder {
    /// Create a builder. Relative paths in `config` resolve against `root`.
    pub fn new(config: Config, root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            output_dir: output_dir.into(),
            environment: Environment::from_env(),
            templates: TemplateRegistry::new(),
        }
    }

    /// Override the environment read from the process.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Use a custom template registry.
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    /// Build the theme named in the configuration.
    pub fn theme(&self) -> Result<Theme> {
        Ok(Theme::from_preset_name(&self.config.typography.preset)?)
    }

    /// Create a bio renderer for an already-resolved image.
    #[must_use]
    pub fn bio_renderer(&self, theme: &Theme, image: ResolvedImage) -> BioRenderer {
        BioRenderer::new(
            theme,
            image,
            self.config.bio.variant,
            BioLinks::from(&self.config.bio),
        )
    }

    /// Run the build.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        info!(
            output = %self.output_dir.display(),
            environment = ?self.environment,
            "starting build"
        );

        let theme = self.theme()?;
        let metadata = self.config.site_metadata()?;
        metadata.validate()?;

        fs::create_dir_all(&self.output_dir)?;

        let image_path = self.root.join(&self.config.bio.profile_image);
        let image = ProfileImage::new(image_path, self.config.build.fingerprint)
            .resolve(&self.output_dir)?;

        let bio = self.bio_renderer(&theme, image.clone()).render(&metadata)?;
        let css = theme.to_css();

        self.write(BIO_FILE, &bio)?;
        self.write(STYLESHEET_FILE, &css)?;

        let injector = DevStyleInjector::new(self.environment);
        let page = self.preview_page(&theme, &bio, &injector)?;
        self.write(PREVIEW_FILE, &page)?;

        let stats = BuildStats {
            bio_bytes: bio.len(),
            css_bytes: css.len(),
            styles_injected: injector.is_active(),
            profile_image: image.url().to_string(),
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        info!(?stats, "build complete");
        Ok(stats)
    }

    fn preview_page(
        &self,
        theme: &Theme,
        bio: &str,
        injector: &DevStyleInjector,
    ) -> Result<String> {
        let site = &self.config.site;
        let mut ctx = TemplateContext::new()
            .with_var("lang", escape_html(&site.language))
            .with_var("title", escape_html(&site.title))
            .with_var("max_width", theme.rhythm(24.0).to_string())
            .with_var(
                "padding",
                format!("{} {}", theme.rhythm(1.5), theme.rhythm(3.0 / 4.0)),
            )
            .with_var("bio", bio);

        if let Some(description) = &site.description {
            ctx.insert("description", escape_html(description));
        }
        if let Some(fonts) = theme.typography().google_fonts_link() {
            ctx.insert("fonts", fonts);
        }
        if !injector.is_active() {
            ctx.insert(
                "stylesheet",
                format!(r#"<link rel="stylesheet" href="/{STYLESHEET_FILE}">"#),
            );
        }

        let page = self.templates.render("preview", &ctx)?;
        Ok(injector.apply(&page, theme.typography()))
    }

    fn write(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.output_dir.join(name);
        fs::write(&path, contents)?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn config() -> Config {
        toml::from_str(
            r#"
[site]
title = "Test Blog"

[site_metadata]
author = "Jane Doe"

[site_metadata.social]
twitter = "janedoe"
"#,
        )
        .unwrap()
    }

    fn site_root() -> TempDir {
        let root = TempDir::new().unwrap();
        let assets = root.path().join("content/assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("profile-pic.png"), b"png").unwrap();
        root
    }

    #[test]
    fn test_build_development() {
        let root = site_root();
        let output = root.path().join("public");

        let stats = Builder::new(config(), root.path(), &output)
            .with_environment(Environment::Development)
            .build()
            .unwrap();

        assert!(stats.styles_injected);
        assert_eq!(stats.profile_image, "/assets/profile-pic.png");

        let bio = fs::read_to_string(output.join(BIO_FILE)).unwrap();
        assert!(bio.contains(r#"href="https://twitter.com/janedoe""#));

        let page = fs::read_to_string(output.join(PREVIEW_FILE)).unwrap();
        assert!(page.contains(r#"<style id="typography.js">"#));
        assert!(!page.contains("typography.css"));
        assert!(!page.contains("fonts.googleapis.com"));

        let css = fs::read_to_string(output.join(STYLESHEET_FILE)).unwrap();
        assert_eq!(css.len(), stats.css_bytes);
    }

    #[test]
    fn test_build_production_links_stylesheet() {
        let root = site_root();
        let output = root.path().join("public");

        let stats = Builder::new(config(), root.path(), &output)
            .with_environment(Environment::Production)
            .build()
            .unwrap();

        assert!(!stats.styles_injected);
        let page = fs::read_to_string(output.join(PREVIEW_FILE)).unwrap();
        assert!(page.contains(r#"<link rel="stylesheet" href="/typography.css">"#));
        assert!(!page.contains(r#"<style id="typography.js">"#));
    }

    #[test]
    fn test_build_fails_without_author() {
        let root = site_root();
        let mut cfg = config();
        cfg.site_metadata.author.clear();

        let output = root.path().join("public");

        let err = Builder::new(cfg, root.path(), &output).build().unwrap_err();
        assert!(matches!(err, BuildError::Core(CoreError::MissingField("author"))));
        assert!(!output.exists());
    }

    #[test]
    fn test_build_with_custom_preview_template() {
        let root = site_root();
        let output = root.path().join("public");
        let mut templates = TemplateRegistry::new();
        templates.register(crate::Template::new(
            "preview",
            "<html><head>{{ stylesheet? }}</head><body>{{ title }}</body></html>",
        ));

        Builder::new(config(), root.path(), &output)
            .with_environment(Environment::Production)
            .with_templates(templates)
            .build()
            .unwrap();

        let page = fs::read_to_string(output.join(PREVIEW_FILE)).unwrap();
        assert_eq!(
            page,
            r#"<html><head><link rel="stylesheet" href="/typography.css"></head><body>Test Blog</body></html>"#
        );
    }

    #[test]
    fn test_build_fails_for_unknown_preset() {
        let root = site_root();
        let mut cfg = config();
        cfg.typography.preset = "unknown".to_string();

        let err = Builder::new(cfg, root.path(), root.path().join("public"))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::Theme(ThemeError::UnknownPreset(_))));
    }

    #[test]
    fn test_build_fails_without_profile_image() {
        let root = TempDir::new().unwrap();

        let err = Builder::new(config(), root.path(), root.path().join("public"))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::Asset(AssetError::NotFound(_))));
    }
}
