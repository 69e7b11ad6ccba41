//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::commands::cache::CacheArgs;

/// Sprout - scaffold mobile app projects from versioned templates.
#[derive(Debug, Parser)]
#[command(name = "sprout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.sprout/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Template cache directory
    #[arg(long, global = true, env = "SPROUT_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output (no per-stage progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template
    Create(CreateArgs),

    /// Manage the template cache
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `create` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CreateArgs {
    /// Directory to create the project in (must be missing or empty)
    pub path: PathBuf,

    /// Platform version of the template (defaults to the configured version)
    #[arg(long = "platform-version", visible_alias = "template-version", value_name = "VERSION")]
    pub platform_version: Option<String>,

    /// Archive URL pattern with a `{version}` placeholder
    #[arg(long, env = "SPROUT_TEMPLATE_URL", value_name = "URL")]
    pub template_url: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_with_version() {
        let cli = Cli::try_parse_from(["sprout", "create", "my-app", "--platform-version", "3.3.0"])
            .unwrap();
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.path, PathBuf::from("my-app"));
                assert_eq!(args.platform_version.as_deref(), Some("3.3.0"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn create_requires_path() {
        assert!(Cli::try_parse_from(["sprout", "create"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sprout", "create", "app", "--debug", "--quiet"]).unwrap();
        assert!(cli.debug);
        assert!(cli.quiet);
    }
}
