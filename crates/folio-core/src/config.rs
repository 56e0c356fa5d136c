//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    metadata::{AuthorMetadata, MetadataProvider},
};

/// Environment variable that selects the runtime environment.
pub const ENV_VAR: &str = "FOLIO_ENV";

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Author metadata shown in the bio.
    #[serde(default)]
    pub site_metadata: AuthorMetadata,

    /// Bio rendering settings.
    #[serde(default)]
    pub bio: BioConfig,

    /// Typography settings.
    #[serde(default)]
    pub typography: TypographyConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Default language code.
    #[serde(default = "default_language")]
    pub language: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,
}

/// Which bio template to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BioVariant {
    /// Full-size avatar and the long sign-off.
    #[default]
    Canonical,
    /// Smaller avatar, shorter text with a wave.
    Compact,
}

/// Bio configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioConfig {
    /// Template variant.
    #[serde(default)]
    pub variant: BioVariant,

    /// Local path of the profile picture.
    #[serde(default = "default_profile_image")]
    pub profile_image: String,

    /// Name of the project the author is known for.
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Link to the project page.
    #[serde(default = "default_project_url")]
    pub project_url: String,

    /// Link to the sponsorship page.
    #[serde(default = "default_sponsor_url")]
    pub sponsor_url: String,
}

/// Typography configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypographyConfig {
    /// Name of the base theme preset.
    #[serde(default = "default_preset")]
    pub preset: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether to fingerprint copied assets.
    #[serde(default)]
    pub fingerprint: bool,
}

// Default value functions
fn default_language() -> String {
    "en".to_string()
}

fn default_profile_image() -> String {
    "content/assets/profile-pic.png".to_string()
}

fn default_project_name() -> String {
    "elm-review".to_string()
}

fn default_project_url() -> String {
    "https://package.elm-lang.org/packages/jfmengels/elm-review/latest/".to_string()
}

fn default_sponsor_url() -> String {
    "https://github.com/sponsors/jfmengels".to_string()
}

fn default_preset() -> String {
    "wordpress-2016".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

impl Default for BioConfig {
    fn default() -> Self {
        Self {
            variant: BioVariant::default(),
            profile_image: default_profile_image(),
            project_name: default_project_name(),
            project_url: default_project_url(),
            sponsor_url: default_sponsor_url(),
        }
    }
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            fingerprint: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration using the config crate, layering `FOLIO__` env vars.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration with env overrides");
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Author metadata is checked when the bio renders, not here.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        Ok(())
    }
}

impl MetadataProvider for Config {
    fn site_metadata(&self) -> Result<AuthorMetadata> {
        Ok(self.site_metadata.clone())
    }
}

/// Runtime environment, read from [`ENV_VAR`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Anything that is not production.
    #[default]
    Development,
    /// Deployed output.
    Production,
}

impl Environment {
    /// Read the environment from the process, defaulting to development.
    pub fn from_env() -> Self {
        std::env::var(ENV_VAR)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Interpret an environment name. Unknown names are development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    /// Whether this is a production environment.
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}
