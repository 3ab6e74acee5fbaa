//! Site configuration commands

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::Path;

use freshpod_core::config::SiteConfig;

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[clap(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[clap(long)]
        force: bool,
    },

    /// Print the config and cache locations
    Path,

    /// Delete cached topology and limiter state
    ClearCache,
}

impl ConfigCommand {
    pub fn execute(self, config: &SiteConfig, path_override: Option<&Path>) -> Result<()> {
        let path = match path_override {
            Some(path) => path.to_path_buf(),
            None => SiteConfig::default_config_path()?,
        };

        match self.command {
            ConfigSubcommand::Show => {
                print!("{}", serde_yaml_ng::to_string(config)?);
            }
            ConfigSubcommand::Init { force } => {
                if path.exists() && !force {
                    bail!(
                        "Config already exists at {} (use --force to overwrite)",
                        path.display()
                    );
                }
                SiteConfig::default().save_to_path(&path)?;
                println!("Wrote default config to {}", path.display());
            }
            ConfigSubcommand::Path => {
                println!("Config: {}", path.display());
                println!("Cache:  {}", SiteConfig::cache_dir()?.display());
            }
            ConfigSubcommand::ClearCache => {
                let removed = SiteConfig::file_cache()?.clear()?;
                println!("Removed {removed} cache entries");
            }
        }

        Ok(())
    }
}
