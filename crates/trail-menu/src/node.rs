//! Menu nodes and node specifications.

use std::cell::OnceCell;
use std::fmt;

use crate::breadcrumb::Breadcrumb;
use crate::key::Key;
use crate::registry::MenuType;
use crate::scope::Scope;
use crate::sections::{Populate, Section, SectionsMenu};

/// Index of a node inside its [`MenuTree`](crate::MenuTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub(crate) usize);

impl NodeIdx {
    /// Position of the node in the tree's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural kind of a node.
///
/// Menus and groups are containers that render their children; items render
/// a link or label. A sections menu is an item that also owns a dynamically
/// populated list of [`Section`] records.
#[derive(Debug)]
pub enum NodeKind {
    /// Container rendered as a list.
    Menu,
    /// Container rendered as a generic block.
    Group,
    /// Link or label.
    Item,
    /// Item with a per-request sections list.
    Sections(SectionsMenu),
}

impl NodeKind {
    /// Short name used in logs and snapshots.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Group => "group",
            Self::Item => "item",
            Self::Sections(_) => "sections",
        }
    }

    /// True for items and sections menus.
    #[must_use]
    pub fn is_item(&self) -> bool {
        matches!(self, Self::Item | Self::Sections(_))
    }
}

impl Populate for NodeKind {
    fn populate(&mut self, scope: &dyn Scope) {
        if let Self::Sections(menu) = self {
            menu.populate(scope);
        }
    }
}

/// A node of the menu tree.
///
/// Nodes live in the tree's arena and are addressed by [`NodeIdx`].
/// Structure is changed through [`MenuTree`](crate::MenuTree) methods.
#[derive(Debug)]
pub struct Node {
    pub(crate) key: Key,
    pub(crate) kind: NodeKind,
    pub(crate) url: Option<String>,
    pub(crate) active: bool,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) children: Vec<NodeIdx>,
    pub(crate) activates: Option<NodeIdx>,
    pub(crate) breadcrumbs: Vec<Breadcrumb>,
    pub(crate) built: bool,
    pub(crate) menu_type: Option<MenuType>,
    pub(crate) class: Option<String>,
    pub(crate) html_id: Option<String>,
    pub(crate) text_override: Option<String>,
    pub(crate) text: OnceCell<String>,
    pub(crate) content: OnceCell<String>,
}

impl Node {
    pub(crate) fn from_spec(spec: NodeSpec, parent: Option<NodeIdx>) -> Self {
        let key = spec.key.unwrap_or_else(|| default_key(&spec.kind, spec.menu_type.as_ref()));
        let text = match &spec.text {
            Some(text) => OnceCell::from(text.clone()),
            None => OnceCell::new(),
        };
        Self {
            key,
            kind: spec.kind,
            url: spec.url,
            active: false,
            parent,
            children: Vec::new(),
            activates: None,
            breadcrumbs: Vec::new(),
            built: false,
            menu_type: spec.menu_type,
            class: spec.class,
            html_id: spec.html_id,
            text_override: spec.text,
            text,
            content: OnceCell::new(),
        }
    }

    /// Node key, unique among its siblings.
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Structural kind.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Link target, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Result of the last activation pass.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once the node's definitions have been applied.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeIdx> {
        self.parent
    }

    /// Children in render order.
    #[must_use]
    pub fn children(&self) -> &[NodeIdx] {
        &self.children
    }

    /// Explicitly assigned activation delegate (ignores the parent fallback).
    #[must_use]
    pub fn delegate(&self) -> Option<NodeIdx> {
        self.activates
    }

    /// Breadcrumb entries registered on this node.
    #[must_use]
    pub fn local_breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    /// Registered menu type whose definitions populate this node.
    #[must_use]
    pub fn menu_type(&self) -> Option<&MenuType> {
        self.menu_type.as_ref()
    }

    /// CSS class applied to the node's wrapper.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// HTML id applied to the node's wrapper.
    #[must_use]
    pub fn html_id(&self) -> Option<&str> {
        self.html_id.as_deref()
    }

    /// Explicit display text, bypassing key translation.
    #[must_use]
    pub fn text_override(&self) -> Option<&str> {
        self.text_override.as_deref()
    }

    /// Sections of a sections menu; empty for other kinds.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        match &self.kind {
            NodeKind::Sections(menu) => menu.sections(),
            _ => &[],
        }
    }
}

/// Key derived from a node's menu type or kind: `admin_menu` becomes `:admin`.
fn default_key(kind: &NodeKind, menu_type: Option<&MenuType>) -> Key {
    let name = menu_type.map_or(kind.name(), MenuType::as_str);
    Key::symbol(name.strip_suffix("_menu").unwrap_or(name))
}

/// Description of a node to insert.
///
/// ```
/// use trail_menu::NodeSpec;
///
/// let spec = NodeSpec::item("users").url("/admin/users").class("people");
/// ```
#[derive(Debug)]
pub struct NodeSpec {
    key: Option<Key>,
    kind: NodeKind,
    url: Option<String>,
    text: Option<String>,
    class: Option<String>,
    html_id: Option<String>,
    menu_type: Option<MenuType>,
}

impl NodeSpec {
    fn new(key: Option<Key>, kind: NodeKind) -> Self {
        Self {
            key,
            kind,
            url: None,
            text: None,
            class: None,
            html_id: None,
            menu_type: None,
        }
    }

    /// A menu container.
    #[must_use]
    pub fn menu(key: impl Into<Key>) -> Self {
        Self::new(Some(key.into()), NodeKind::Menu)
    }

    /// A group container.
    #[must_use]
    pub fn group(key: impl Into<Key>) -> Self {
        Self::new(Some(key.into()), NodeKind::Group)
    }

    /// A link or label.
    #[must_use]
    pub fn item(key: impl Into<Key>) -> Self {
        Self::new(Some(key.into()), NodeKind::Item)
    }

    /// A sections menu keyed `:sections` unless overridden with [`key`](Self::key).
    #[must_use]
    pub fn sections(menu: SectionsMenu) -> Self {
        Self::new(None, NodeKind::Sections(menu))
    }

    /// A menu populated from the definitions registered for `menu_type`.
    ///
    /// The key defaults to the type name without a trailing `_menu`.
    #[must_use]
    pub fn typed_menu(menu_type: impl Into<MenuType>) -> Self {
        Self::new(None, NodeKind::Menu).menu_type(menu_type)
    }

    /// A group populated from the definitions registered for `menu_type`.
    #[must_use]
    pub fn typed_group(menu_type: impl Into<MenuType>) -> Self {
        Self::new(None, NodeKind::Group).menu_type(menu_type)
    }

    /// Override the key.
    #[must_use]
    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the link target.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set explicit display text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the wrapper CSS class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the wrapper HTML id.
    #[must_use]
    pub fn html_id(mut self, id: impl Into<String>) -> Self {
        self.html_id = Some(id.into());
        self
    }

    /// Set the menu type used for registry lookups.
    #[must_use]
    pub fn menu_type(mut self, menu_type: impl Into<MenuType>) -> Self {
        self.menu_type = Some(menu_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_menu_key_strips_menu_suffix() {
        let node = Node::from_spec(NodeSpec::typed_menu("admin_menu"), None);
        assert_eq!(node.key(), &Key::symbol("admin"));
        assert_eq!(node.menu_type().map(MenuType::as_str), Some("admin_menu"));
    }

    #[test]
    fn test_sections_key_defaults_to_sections() {
        let node = Node::from_spec(NodeSpec::sections(SectionsMenu::from_scope()), None);
        assert_eq!(node.key(), &Key::symbol("sections"));
    }

    #[test]
    fn test_explicit_key_wins_over_type() {
        let node = Node::from_spec(NodeSpec::typed_menu("admin_menu").key("main"), None);
        assert_eq!(node.key(), &Key::symbol("main"));
    }

    #[test]
    fn test_explicit_text_is_preseeded() {
        let node = Node::from_spec(NodeSpec::item("home").text("Start"), None);
        assert_eq!(node.text.get().map(String::as_str), Some("Start"));
        assert_eq!(node.text_override(), Some("Start"));
    }

    #[test]
    fn test_new_node_is_inactive_and_unbuilt() {
        let node = Node::from_spec(NodeSpec::menu("main"), None);
        assert!(!node.is_active());
        assert!(!node.is_built());
        assert!(node.children().is_empty());
        assert!(node.sections().is_empty());
    }
}
