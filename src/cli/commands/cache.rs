//! Cache command implementation.
//!
//! Provides `sprout cache list`, `sprout cache remove`, `sprout cache clear`
//! and `sprout cache path`.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cache::{DiskTemplateCache, TemplateState};
use crate::config::SproutConfig;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// List cached templates.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Remove the cached template for one version.
    Remove {
        /// Platform version to remove.
        #[arg(id = "platform_version", value_name = "VERSION")]
        version: String,
    },
    /// Remove every cached template.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the cache directory.
    Path,
}

/// The cache command implementation.
pub struct CacheCommand {
    store: DiskTemplateCache,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(config: &SproutConfig, args: CacheArgs) -> Self {
        Self {
            store: DiskTemplateCache::new(config.cache_root()),
            args,
        }
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let exit_code = match &self.args.command {
            CacheSubcommand::List { json } => list_cache(&self.store, *json, ui)?,
            CacheSubcommand::Remove { version } => remove_version(&self.store, version, ui)?,
            CacheSubcommand::Clear { force } => clear_cache(&self.store, *force, ui)?,
            CacheSubcommand::Path => {
                ui.message(&self.store.root().display().to_string());
                0
            }
        };

        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

fn list_cache(store: &DiskTemplateCache, json: bool, ui: &mut dyn UserInterface) -> Result<i32> {
    let templates = store.list()?;

    if json {
        ui.message(&serde_json::to_string_pretty(&templates)?);
        return Ok(0);
    }

    if templates.is_empty() {
        ui.message("Cache is empty");
        return Ok(0);
    }

    ui.message(&format!("{} cached templates:\n", templates.len()));
    for template in &templates {
        let cached = template
            .modified_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        ui.message(&format!(
            "  {} [{}] {} bytes, cached {}",
            template.version,
            template.state.label(),
            template.size_bytes,
            cached
        ));
    }

    ui.message(&format!("\nTotal: {} bytes", store.total_size()?));

    let corrupt = templates
        .iter()
        .filter(|t| t.state == TemplateState::Corrupt)
        .count();
    if corrupt > 0 {
        ui.warning(&format!(
            "{} corrupt template(s) will be re-downloaded on next use",
            corrupt
        ));
    }

    Ok(0)
}

fn remove_version(
    store: &DiskTemplateCache,
    version: &str,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    // Reuses request validation so a version can never name a path outside the cache.
    crate::create::CreateRequest::new(".", version)?;

    if store.remove(version)? {
        ui.success(&format!("Removed template {}", version));
        Ok(0)
    } else {
        ui.warning(&format!("Template {} is not cached", version));
        Ok(1)
    }
}

fn clear_cache(store: &DiskTemplateCache, force: bool, ui: &mut dyn UserInterface) -> Result<i32> {
    let templates = store.list()?;
    if templates.is_empty() {
        ui.message("Cache is already empty");
        return Ok(0);
    }

    let count = templates.len();
    if !force
        && ui.is_interactive()
        && !ui.confirm(&format!("Remove {} cached templates?", count), false)?
    {
        ui.message("Cancelled");
        return Ok(0);
    }

    let cleared = store.clear()?;
    ui.success(&format!("Cleared {} templates", cleared));
    Ok(0)
}
