//! Bio command - prints the rendered bio fragment

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{BioVariant, Config, MetadataProvider};
use folio_generator::{BioLinks, BioRenderer, ResolvedImage, Theme};

/// Render the bio for the configured author.
///
/// `image_url` is used as-is; nothing is copied.
pub fn render(config: &Config, variant: Option<BioVariant>, image_url: &str) -> Result<String> {
    let theme = Theme::from_preset_name(&config.typography.preset)
        .wrap_err("Failed to build theme")?;
    let renderer = BioRenderer::new(
        &theme,
        ResolvedImage::new(image_url),
        variant.unwrap_or(config.bio.variant),
        BioLinks::from(&config.bio),
    );

    let metadata = config.site_metadata()?;
    renderer
        .render(&metadata)
        .wrap_err("Failed to render bio")
}

/// Run the bio command.
pub fn run(config_path: &Path, variant: Option<BioVariant>, image_url: &str) -> Result<()> {
    tracing::info!(?config_path, ?variant, "Rendering bio");
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    println!("{}", render(&config, variant, image_url)?);
    Ok(())
}
