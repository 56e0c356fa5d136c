//! CSS command - prints the generated stylesheet

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{Theme, theme_overrides};

/// Produce the stylesheet, or only the site overrides.
pub fn render(config: &Config, overrides_only: bool) -> Result<String> {
    if overrides_only {
        return Ok(theme_overrides().to_css());
    }
    let theme = Theme::from_preset_name(&config.typography.preset)
        .wrap_err("Failed to build theme")?;
    Ok(theme.to_css())
}

/// Run the css command.
pub fn run(config_path: &Path, overrides_only: bool) -> Result<()> {
    tracing::info!(?config_path, overrides_only, "Generating stylesheet");
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    print!("{}", render(&config, overrides_only)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(preset: &str) -> Config {
        toml::from_str(&format!(
            "[site]\ntitle = \"t\"\n[typography]\npreset = \"{preset}\"\n"
        ))
        .unwrap()
    }

    #[test]
    fn test_full_stylesheet() {
        let css = render(&config("wordpress-2016"), false).unwrap();
        assert!(css.starts_with("html {"));
        assert!(css.contains("--text-code: #1a1a1a;"));
    }

    #[test]
    fn test_overrides_only() {
        let css = render(&config("wordpress-2016"), true).unwrap();
        assert!(css.contains("--text-code: #1a1a1a;"));
        assert!(!css.contains("blockquote"));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(render(&config("missing"), false).is_err());
    }
}
