//! Folio CLI
//!
//! Renders the author bio and the blog's typography stylesheet.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use folio_core::{BioVariant, Environment};

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Author bio and typography builder for a static blog"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Bio variants accepted on the command line.
#[derive(Clone, Copy, clap::ValueEnum)]
enum VariantArg {
    Canonical,
    Compact,
}

impl From<VariantArg> for BioVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Canonical => BioVariant::Canonical,
            VariantArg::Compact => BioVariant::Compact,
        }
    }
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Write bio.html, typography.css and a preview page
    Build {
        /// Output directory (defaults to `build.output_dir`)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Treat the build as production (no style injection)
        #[arg(long)]
        production: bool,
    },
    /// Print the rendered bio fragment
    Bio {
        /// Template variant (defaults to the configured one)
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
        /// URL to use for the profile image
        #[arg(long, default_value = "/assets/profile-pic.png")]
        image_url: String,
    },
    /// Print the generated stylesheet
    Css {
        /// Only print the site overrides
        #[arg(long)]
        overrides_only: bool,
    },
    /// Validate configuration and metadata
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, production } => {
            let environment = production.then_some(Environment::Production);
            folio::cmd::build::run(&cli.config, output.as_deref(), environment)?;
        }
        Commands::Bio { variant, image_url } => {
            folio::cmd::bio::run(&cli.config, variant.map(Into::into), &image_url)?;
        }
        Commands::Css { overrides_only } => {
            folio::cmd::css::run(&cli.config, overrides_only)?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["folio", "build", "--output", "dist"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("folio.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build { output, production } => {
                assert_eq!(output, Some(std::path::PathBuf::from("dist")));
                assert!(!production);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_output_defaults_to_config() {
        let cli = Cli::parse_from(["folio", "build"]);

        match cli.command {
            Commands::Build { output, .. } => assert!(output.is_none()),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_production() {
        let cli = Cli::parse_from(["folio", "build", "--production"]);

        match cli.command {
            Commands::Build { production, .. } => assert!(production),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_bio_command_parsing() {
        let cli = Cli::parse_from(["folio", "bio", "--variant", "compact", "--image-url", "/me.png"]);

        match cli.command {
            Commands::Bio { variant, image_url } => {
                assert_eq!(variant.map(BioVariant::from), Some(BioVariant::Compact));
                assert_eq!(image_url, "/me.png");
            }
            _ => panic!("Expected Bio command"),
        }
    }

    #[test]
    fn test_cli_bio_defaults() {
        let cli = Cli::parse_from(["folio", "bio"]);

        match cli.command {
            Commands::Bio { variant, image_url } => {
                assert!(variant.is_none());
                assert_eq!(image_url, "/assets/profile-pic.png");
            }
            _ => panic!("Expected Bio command"),
        }
    }

    #[test]
    fn test_cli_css_command_parsing() {
        let cli = Cli::parse_from(["folio", "css", "--overrides-only"]);

        match cli.command {
            Commands::Css { overrides_only } => assert!(overrides_only),
            _ => panic!("Expected Css command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let cli = Cli::parse_from(["folio", "check", "--strict"]);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["folio", "-vvv", "build"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let cli = Cli::parse_from(["folio", "--config", "site.toml", "css"]);
        assert_eq!(cli.config, std::path::PathBuf::from("site.toml"));
    }
}
