//! CLI error types.

use trail_config::ConfigError;
use trail_menu::MenuError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Menu(#[from] MenuError),

    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}
