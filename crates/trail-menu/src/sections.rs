//! Sections menu: an item owning a per-request list of sections.
//!
//! Sections are plain records fetched from the request [`Scope`] on every
//! build. They are not tree nodes but carry the URL, level and active flag
//! needed for activation and rendering.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::scope::Scope;

/// Prefix of a path up to and including the last `/sections/<digits>`.
static SECTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*/sections/\d+").unwrap());

/// Capability of refreshing dynamic content from the request scope.
///
/// Structural nodes implement it as a no-op.
pub trait Populate {
    /// Refresh dynamic content for this request.
    fn populate(&mut self, scope: &dyn Scope);
}

/// Section description returned by a population rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionSource {
    /// Section id, used by routing helpers.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Nesting level, 1 for top-level sections.
    pub level: u32,
}

impl SectionSource {
    /// Create a top-level section source.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            level: 1,
        }
    }

    /// Set the nesting level.
    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
}

/// Section record owned by a [`SectionsMenu`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Display title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Nesting level.
    pub level: u32,
    pub(crate) active: bool,
}

impl Section {
    /// Create an inactive section record.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>, level: u32) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            level,
            active: false,
        }
    }

    /// Result of the last activation pass.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

type SourceFn = dyn Fn(&dyn Scope) -> Vec<SectionSource> + Send + Sync;

/// Item variant that owns a dynamically populated sections list.
pub struct SectionsMenu {
    source: Arc<SourceFn>,
    sections: Vec<Section>,
}

impl SectionsMenu {
    /// Create a sections menu fed by a custom population rule.
    #[must_use]
    pub fn new<F>(source: F) -> Self
    where
        F: Fn(&dyn Scope) -> Vec<SectionSource> + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(source),
            sections: Vec::new(),
        }
    }

    /// Create a sections menu listing [`Scope::sections`].
    #[must_use]
    pub fn from_scope() -> Self {
        Self::new(|scope: &dyn Scope| scope.sections())
    }

    /// Current sections, in population order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First active section, if any.
    #[must_use]
    pub fn active_section(&self) -> Option<&Section> {
        self.sections.iter().find(|section| section.active)
    }

    /// Mark every section whose url starts with the path's `/sections/<id>`
    /// prefix active.
    ///
    /// This is a plain string prefix test, so `/sections/3` also matches
    /// `/sections/31`. Paths without such a prefix leave all sections untouched.
    pub(crate) fn activate(&mut self, path: &str) {
        let Some(prefix) = section_prefix(path) else {
            return;
        };
        for section in &mut self.sections {
            if section.url.starts_with(prefix) {
                section.active = true;
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        for section in &mut self.sections {
            section.active = false;
        }
    }
}

impl Populate for SectionsMenu {
    fn populate(&mut self, scope: &dyn Scope) {
        self.sections = (self.source)(scope)
            .into_iter()
            .map(|source| {
                let url = scope.section_contents_path(&source);
                Section::new(source.title, url, source.level)
            })
            .collect();
        tracing::debug!(count = self.sections.len(), "Populated sections menu");
    }
}

impl fmt::Debug for SectionsMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionsMenu")
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}

/// Extract the `.../sections/<digits>` prefix of a request path.
#[must_use]
pub fn section_prefix(path: &str) -> Option<&str> {
    SECTION_PREFIX.find(path).map(|m| m.as_str())
}
