//! `trail tree` command implementation.

use clap::Args;

use super::MenuArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub menu: MenuArgs,

    /// Print compact JSON on a single line.
    #[arg(long)]
    compact: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the menu cannot be built or
    /// the snapshot cannot be serialized.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let site = self.menu.load_site()?;
        let snapshot = site.tree.snapshot(&site.titles);

        let json = if self.compact {
            serde_json::to_string(&snapshot)?
        } else {
            serde_json::to_string_pretty(&snapshot)?
        };
        Output::new().result(&json);
        Ok(())
    }
}
