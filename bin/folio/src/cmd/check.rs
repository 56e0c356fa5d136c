//! Check command - validate configuration, metadata and theme

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_core::{Config, MetadataProvider};
use folio_generator::Theme;

use super::site_root;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    match Config::load_with_env(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            check_config(&config, &site_root(config_path), &mut result);
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check everything a build needs beyond parsing.
fn check_config(config: &Config, root: &Path, result: &mut ValidationResult) {
    match config.site_metadata().and_then(|meta| meta.validate()) {
        Ok(()) => println!("  ✓ Author metadata complete"),
        Err(e) => result.add_error(e.to_string()),
    }

    if config.site_metadata.social.twitter.starts_with('@') {
        result.add_warning("site_metadata.social.twitter should not start with '@'");
    }

    match Theme::from_preset_name(&config.typography.preset) {
        Ok(_) => println!("  ✓ Typography preset '{}'", config.typography.preset),
        Err(e) => result.add_error(e.to_string()),
    }

    let image = root.join(&config.bio.profile_image);
    if image.is_file() {
        println!("  ✓ Profile image {}", image.display());
    } else {
        result.add_error(format!("Profile image not found: {}", image.display()));
    }

    for (field, url) in [
        ("bio.project_url", &config.bio.project_url),
        ("bio.sponsor_url", &config.bio.sponsor_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_warning(format!("{field} should start with http:// or https://"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(twitter: &str, preset: &str) -> Config {
        toml::from_str(&format!(
            "[site]\ntitle = \"t\"\n[site_metadata]\nauthor = \"Jane\"\n\
             [site_metadata.social]\ntwitter = \"{twitter}\"\n\
             [typography]\npreset = \"{preset}\"\n"
        ))
        .unwrap()
    }

    #[test]
    fn test_check_reports_missing_image() {
        let root = tempfile::tempdir().unwrap();
        let mut result = ValidationResult::default();
        check_config(&config("jane", "wordpress-2016"), root.path(), &mut result);

        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Profile image not found"));
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_check_warns_on_at_handle_and_rejects_preset() {
        let root = tempfile::tempdir().unwrap();
        let mut result = ValidationResult::default();
        check_config(&config("@jane", "nope"), root.path(), &mut result);

        assert!(result.has_warnings());
        assert!(result.errors.iter().any(|e| e.contains("unknown typography preset")));
    }

    #[test]
    fn test_run_passes_for_complete_site() {
        let root = tempfile::tempdir().unwrap();
        let assets = root.path().join("content/assets");
        std::fs::create_dir_all(&assets).unwrap();
        std::fs::write(assets.join("profile-pic.png"), b"png").unwrap();

        let config_path = root.path().join("folio.toml");
        std::fs::write(
            &config_path,
            "[site]\ntitle = \"t\"\n[site_metadata]\nauthor = \"Jane\"\n\
             [site_metadata.social]\ntwitter = \"jane\"\n",
        )
        .unwrap();

        assert!(run(&config_path, true).is_ok());
    }
}
