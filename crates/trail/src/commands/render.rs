//! `trail render` command implementation.

use clap::Args;
use trail_menu::{HtmlTags, RenderContext};

use super::MenuArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub menu: MenuArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the menu cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let site = self.menu.load_site()?;
        let ctx = RenderContext::new(&HtmlTags, &site.titles);

        Output::new().result(&site.tree.render(&ctx));
        Ok(())
    }
}
