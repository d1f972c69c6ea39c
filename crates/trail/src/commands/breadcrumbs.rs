//! `trail breadcrumbs` command implementation.

use clap::Args;
use trail_menu::{HtmlTags, RenderContext};

use super::MenuArgs;
use crate::error::CliError;
use crate::output::Output;

/// Separator between breadcrumb titles in the text line.
const SEPARATOR: &str = " > ";

/// Arguments for the breadcrumbs command.
#[derive(Args)]
pub(crate) struct BreadcrumbsArgs {
    #[command(flatten)]
    pub menu: MenuArgs,

    /// Print only the text line, without markup.
    #[arg(long)]
    text_only: bool,
}

impl BreadcrumbsArgs {
    /// Execute the breadcrumbs command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the menu cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.menu.load_site()?;

        let Some(current) = site.current() else {
            output.warning(&format!("No menu item matches {}", site.path));
            return Ok(());
        };

        let trail = site.tree.breadcrumbs(current);
        let scope = &site.tree.settings().translation_scope;
        let titles: Vec<_> = trail
            .iter()
            .map(|crumb| crumb.title(&site.titles, scope))
            .collect();
        output.highlight(&titles.join(SEPARATOR));

        if !self.text_only {
            let ctx = RenderContext::new(&HtmlTags, &site.titles);
            output.result(&site.tree.render_breadcrumbs(&trail, &ctx));
        }
        Ok(())
    }
}
