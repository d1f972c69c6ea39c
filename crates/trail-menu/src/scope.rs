//! Request scope consumed by population rules and activation.

use crate::sections::SectionSource;

/// Per-request context.
///
/// Supplies the current request path and the routing helpers that
/// population rules need to build URLs.
pub trait Scope {
    /// Path of the current request, compared against node URLs.
    fn current_path(&self) -> &str;

    /// Admin URL of a section's contents.
    fn section_contents_path(&self, section: &SectionSource) -> String;

    /// Sections visible to this request.
    fn sections(&self) -> Vec<SectionSource> {
        Vec::new()
    }
}

/// Plain request scope backed by owned data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestScope {
    path: String,
    admin_root: String,
    sections: Vec<SectionSource>,
}

impl RequestScope {
    /// Create a scope for the given request path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            admin_root: "/admin".to_owned(),
            sections: Vec::new(),
        }
    }

    /// Set the admin URL prefix used by routing helpers.
    #[must_use]
    pub fn with_admin_root(mut self, root: impl Into<String>) -> Self {
        let root: String = root.into();
        self.admin_root = root.trim_end_matches('/').to_owned();
        self
    }

    /// Set the sections returned by [`Scope::sections`].
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<SectionSource>) -> Self {
        self.sections = sections;
        self
    }

    /// Admin URL prefix without trailing slash.
    #[must_use]
    pub fn admin_root(&self) -> &str {
        &self.admin_root
    }
}

impl Scope for RequestScope {
    fn current_path(&self) -> &str {
        &self.path
    }

    fn section_contents_path(&self, section: &SectionSource) -> String {
        format!("{}/sections/{}/contents", self.admin_root, section.id)
    }

    fn sections(&self) -> Vec<SectionSource> {
        self.sections.clone()
    }
}
