//! Build command - writes the bio, stylesheet and preview page

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{Config, Environment};
use folio_generator::Builder;

use super::site_root;

/// Run the build command.
///
/// `output` overrides `build.output_dir` and `environment` overrides
/// `FOLIO_ENV` when given.
pub fn run(
    config_path: &Path,
    output: Option<&Path>,
    environment: Option<Environment>,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?environment, "Starting build");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let output = output_dir(&config, config_path, output);
    let mut builder = Builder::new(config, site_root(config_path), &output);
    if let Some(env) = environment {
        builder = builder.with_environment(env);
    }

    let stats = builder.build().wrap_err("Build failed")?;
    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Bio:        {} bytes", stats.bio_bytes);
    println!("  Stylesheet: {} bytes", stats.css_bytes);
    println!("  Image:      {}", stats.profile_image);
    println!(
        "  Styles:     {}",
        if stats.styles_injected {
            "injected (development)"
        } else {
            "linked (production)"
        }
    );
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    Ok(())
}

/// Output directory for a build: the `-o` flag if given, otherwise
/// `build.output_dir` relative to the config file's directory.
fn output_dir(config: &Config, config_path: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(dir) => dir.to_path_buf(),
        None => site_root(config_path).join(&config.build.output_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = r#"
[site]
title = "t"

[site_metadata]
author = "Jane"

[site_metadata.social]
twitter = "jane"

[build]
output_dir = "dist"
"#;

    #[test]
    fn test_output_dir_from_config() {
        let config: Config = toml::from_str(SITE).unwrap();
        assert_eq!(
            output_dir(&config, Path::new("blog/folio.toml"), None),
            PathBuf::from("blog/dist")
        );
    }

    #[test]
    fn test_output_dir_flag_wins() {
        let config: Config = toml::from_str(SITE).unwrap();
        assert_eq!(
            output_dir(&config, Path::new("blog/folio.toml"), Some(Path::new("out"))),
            PathBuf::from("out")
        );
    }

    #[test]
    fn test_run_writes_to_configured_output_dir() {
        let root = tempfile::tempdir().unwrap();
        let assets = root.path().join("content/assets");
        std::fs::create_dir_all(&assets).unwrap();
        std::fs::write(assets.join("profile-pic.png"), b"png").unwrap();

        let config_path = root.path().join("folio.toml");
        std::fs::write(&config_path, SITE).unwrap();

        run(&config_path, None, Some(Environment::Production)).unwrap();

        let dist = root.path().join("dist");
        assert!(dist.join("bio.html").is_file());
        assert!(dist.join("typography.css").is_file());
        assert!(dist.join("index.html").is_file());
        assert!(!root.path().join("public").exists());
    }
}
