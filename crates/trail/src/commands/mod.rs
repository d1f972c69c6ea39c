//! CLI command implementations.

pub(crate) mod breadcrumbs;
pub(crate) mod render;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::Args;
use trail_config::{CliSettings, Config};

use crate::error::CliError;
use crate::site::Site;

pub(crate) use breadcrumbs::BreadcrumbsArgs;
pub(crate) use render::RenderArgs;
pub(crate) use tree::TreeArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct MenuArgs {
    /// Request path to activate the menu for.
    #[arg(short, long, default_value = "/")]
    path: String,

    /// Path to configuration file (default: auto-discover trail.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Admin URL prefix (overrides config).
    #[arg(long, env = "TRAIL_ADMIN_ROOT")]
    admin_root: Option<String>,

    /// Translation scope for titles (overrides config).
    #[arg(long)]
    translation_scope: Option<String>,

    /// Highest section level class (overrides config).
    #[arg(long)]
    max_section_level: Option<u32>,

    /// Enable verbose output (show build and activation logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl MenuArgs {
    /// Load configuration and build the menu for the requested path.
    fn load_site(&self) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            admin_root: self.admin_root.clone(),
            translation_scope: self.translation_scope.clone(),
            max_section_level: self.max_section_level,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(config = %path.display(), "Loaded configuration");
        }
        Ok(Site::build(&config, &self.path)?)
    }
}
