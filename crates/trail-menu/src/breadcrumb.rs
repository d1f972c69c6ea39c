//! Breadcrumb computation.
//!
//! A node's trail is the trail of its activation delegate followed by its
//! own contribution:
//! - menus and groups contribute their locally registered entries,
//! - items contribute themselves unless the inherited trail already
//!   carries their key,
//! - sections menus always contribute themselves, then the active section.

use crate::key::Key;
use crate::node::{Node, NodeIdx, NodeKind};
use crate::render::{Attributes, RenderContext, Tag};
use crate::translate::{Translator, resolve_key};
use crate::tree::MenuTree;

/// One breadcrumb segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Key of the represented location.
    pub key: Key,
    /// Link target.
    pub url: Option<String>,
    /// Display text overriding key translation.
    pub text: Option<String>,
    /// Menu node this entry stands for.
    pub node: Option<NodeIdx>,
}

impl Breadcrumb {
    /// Create a breadcrumb for a key.
    #[must_use]
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            url: None,
            text: None,
            node: None,
        }
    }

    /// Set the link target.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set explicit display text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn for_node(idx: NodeIdx, node: &Node) -> Self {
        Self {
            key: node.key.clone(),
            url: node.url.clone(),
            text: node.text_override.clone(),
            node: Some(idx),
        }
    }

    /// Display text: the explicit text, else the translated key.
    #[must_use]
    pub fn title(&self, translator: &dyn Translator, scope: &str) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => resolve_key(&self.key, translator, scope),
        }
    }
}

/// Append `crumb` unless an entry with the same key is present.
fn push_unique(trail: &mut Vec<Breadcrumb>, crumb: Breadcrumb) {
    if !trail.iter().any(|existing| existing.key == crumb.key) {
        trail.push(crumb);
    }
}

/// Drop later entries whose key already appeared.
fn dedup_keys(trail: Vec<Breadcrumb>) -> Vec<Breadcrumb> {
    let mut unique = Vec::with_capacity(trail.len());
    for crumb in trail {
        push_unique(&mut unique, crumb);
    }
    unique
}

impl MenuTree {
    /// Breadcrumb trail of `idx`, outermost entry first.
    #[must_use]
    pub fn breadcrumbs(&self, idx: NodeIdx) -> Vec<Breadcrumb> {
        let node = self.node(idx);
        let inherited = self
            .activates(idx)
            .map(|delegate| self.breadcrumbs(delegate))
            .unwrap_or_default();

        match &node.kind {
            NodeKind::Menu | NodeKind::Group => {
                let mut trail = inherited;
                trail.extend(node.breadcrumbs.iter().cloned());
                trail
            }
            NodeKind::Item => {
                let mut trail = dedup_keys(inherited);
                push_unique(&mut trail, Breadcrumb::for_node(idx, node));
                trail
            }
            NodeKind::Sections(menu) => {
                let mut trail = dedup_keys(inherited);
                trail.push(Breadcrumb::for_node(idx, node));
                if let Some(section) = menu.active_section() {
                    trail.push(Breadcrumb {
                        key: Key::symbol("section"),
                        url: Some(section.url.clone()),
                        text: Some(section.title.clone()),
                        node: Some(idx),
                    });
                }
                trail
            }
        }
    }

    /// Render a trail as a list, linking entries that have a url.
    #[must_use]
    pub fn render_breadcrumbs(&self, trail: &[Breadcrumb], ctx: &RenderContext<'_>) -> String {
        let scope = &self.settings().translation_scope;
        let attrs = Attributes::new().with_class("breadcrumbs");
        ctx.renderer.render(Tag::Ul, &attrs, &mut |out| {
            for crumb in trail {
                let title = crumb.title(ctx.translator, scope);
                let entry = match &crumb.url {
                    Some(url) => ctx.renderer.render(
                        Tag::A,
                        &Attributes::new().with_href(url),
                        &mut |link| ctx.renderer.text(link, &title),
                    ),
                    None => ctx.renderer.render(Tag::Span, &Attributes::new(), &mut |label| {
                        ctx.renderer.text(label, &title);
                    }),
                };
                out.push_str(&ctx.renderer.render(Tag::Li, &Attributes::new(), &mut |li| {
                    li.push_str(&entry);
                }));
            }
        })
    }
}
