//! Menu tree storage, lookup and build lifecycle.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<Node>` with parent/children links and
//! activation delegates tracked by [`NodeIdx`]. Index 0 is always the root.
//! Nodes are only ever appended, so the structure stays a tree: a child
//! is created fresh under an existing parent and can never be an ancestor.

use std::ops::Index;
use std::sync::Arc;

use crate::breadcrumb::Breadcrumb;
use crate::builder::Builder;
use crate::error::MenuError;
use crate::key::{Key, KeyPath};
use crate::node::{Node, NodeIdx, NodeKind, NodeSpec};
use crate::registry::Registry;
use crate::scope::Scope;
use crate::sections::Populate;
use crate::settings::MenuSettings;

/// Request-scoped menu tree.
///
/// Lifecycle per request: construct, [`build`](Self::build) once, then
/// render and query. [`reset`](Self::reset) clears activation so the same
/// tree can be activated again for another path.
#[derive(Debug)]
pub struct MenuTree {
    nodes: Vec<Node>,
    registry: Arc<Registry>,
    settings: MenuSettings,
}

impl MenuTree {
    /// Create a tree without registered definitions.
    #[must_use]
    pub fn new(root: NodeSpec) -> Self {
        Self::with_registry(root, Arc::new(Registry::default()))
    }

    /// Create a tree whose nodes are populated from `registry`.
    #[must_use]
    pub fn with_registry(root: NodeSpec, registry: Arc<Registry>) -> Self {
        Self {
            nodes: vec![Node::from_spec(root, None)],
            registry,
            settings: MenuSettings::default(),
        }
    }

    /// Replace the rendering and translation settings.
    #[must_use]
    pub fn with_settings(mut self, settings: MenuSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Rendering and translation settings.
    #[must_use]
    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    /// Registry used by [`build`](Self::build).
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> NodeIdx {
        NodeIdx(0)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` was not issued by this tree.
    #[must_use]
    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.0]
    }

    /// Node at `idx`, `None` if it is not part of this tree.
    #[must_use]
    pub fn get(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(idx.0)
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.0]
    }

    fn check(&self, idx: NodeIdx) -> Result<(), MenuError> {
        if idx.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(MenuError::UnknownNode(idx.0))
        }
    }

    /// `idx` followed by all its descendants, depth-first in render order.
    #[must_use]
    pub fn descendants(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        let mut order = Vec::new();
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        order
    }

    /// Append a child to `parent`.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::UnknownNode` if `parent` is not in the tree and
    /// `MenuError::DuplicateKey` if a sibling already uses the key.
    pub fn insert(&mut self, parent: NodeIdx, spec: NodeSpec) -> Result<NodeIdx, MenuError> {
        self.check(parent)?;
        let node = Node::from_spec(spec, Some(parent));
        if self.child_with_key(parent, &node.key).is_some() {
            return Err(MenuError::DuplicateKey {
                parent: self.nodes[parent.0].key.clone(),
                key: node.key,
            });
        }
        if matches!(node.kind, NodeKind::Sections(_)) && node.url.is_none() {
            tracing::warn!(key = %node.key, "Sections menu has no url; its breadcrumb will not link");
        }

        let idx = NodeIdx(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(idx);
        Ok(idx)
    }

    /// Delegate `node`'s breadcrumb and activation chain to `target`.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::UnknownNode` for indices outside the tree and
    /// `MenuError::ActivationCycle` if `target`'s chain leads back to `node`.
    pub fn set_activates(&mut self, node: NodeIdx, target: NodeIdx) -> Result<(), MenuError> {
        self.check(node)?;
        self.check(target)?;

        let mut current = Some(target);
        while let Some(idx) = current {
            if idx == node {
                return Err(MenuError::ActivationCycle {
                    key: self.nodes[node.0].key.clone(),
                    target: self.nodes[target.0].key.clone(),
                });
            }
            current = self.activates(idx);
        }

        self.nodes[node.0].activates = Some(target);
        Ok(())
    }

    /// Register an extra breadcrumb entry on `node`.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::UnknownNode` if `node` is not in the tree.
    pub fn add_breadcrumb(&mut self, node: NodeIdx, breadcrumb: Breadcrumb) -> Result<(), MenuError> {
        self.check(node)?;
        self.nodes[node.0].breadcrumbs.push(breadcrumb);
        Ok(())
    }

    fn child_with_key(&self, parent: NodeIdx, key: &Key) -> Option<NodeIdx> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].key == *key)
    }

    /// Search the whole tree for a key, see [`find_in`](Self::find_in).
    #[must_use]
    pub fn find(&self, key: impl Into<Key>) -> Option<NodeIdx> {
        self.find_in(self.root(), &key.into())
    }

    /// Search below `node`: direct children first, then each child's subtree
    /// in order. Returns the first match.
    #[must_use]
    pub fn find_in(&self, node: NodeIdx, key: &Key) -> Option<NodeIdx> {
        self.child_with_key(node, key).or_else(|| {
            self.nodes[node.0]
                .children
                .iter()
                .find_map(|&child| self.find_in(child, key))
        })
    }

    /// Follow a path of direct-child lookups from the root.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::NotFound` with the first key that has no match.
    pub fn lookup(&self, path: impl Into<KeyPath>) -> Result<NodeIdx, MenuError> {
        self.lookup_in(self.root(), path)
    }

    /// Follow a path of direct-child lookups from `node`.
    ///
    /// An empty path returns `node` itself.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::NotFound` with the first key that has no match.
    pub fn lookup_in(&self, node: NodeIdx, path: impl Into<KeyPath>) -> Result<NodeIdx, MenuError> {
        self.check(node)?;
        path.into().keys().iter().try_fold(node, |current, key| {
            self.child_with_key(current, key)
                .ok_or_else(|| MenuError::NotFound { key: key.clone() })
        })
    }

    /// Activation delegate: the explicit one if set, otherwise the parent.
    #[must_use]
    pub fn activates(&self, idx: NodeIdx) -> Option<NodeIdx> {
        let node = &self.nodes[idx.0];
        node.activates.or(node.parent)
    }

    /// `idx` followed by its chain of activation delegates.
    #[must_use]
    pub fn activation_path(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        let mut path = vec![idx];
        let mut current = self.activates(idx);
        while let Some(next) = current {
            path.push(next);
            current = self.activates(next);
        }
        path
    }

    /// True if the node has unapplied definitions.
    #[must_use]
    pub fn needs_build(&self, idx: NodeIdx) -> bool {
        let node = &self.nodes[idx.0];
        !node.built
            && node
                .menu_type
                .as_ref()
                .is_some_and(|menu_type| self.registry.is_defined(menu_type))
    }

    /// Build the whole tree for a request, see [`build_node`](Self::build_node).
    ///
    /// # Errors
    ///
    /// Propagates errors raised by population rules.
    pub fn build(&mut self, scope: Option<&dyn Scope>) -> Result<(), MenuError> {
        self.build_node(self.root(), scope)
    }

    /// Build `idx` and its subtree.
    ///
    /// Applies registered definitions once per node, then refreshes dynamic
    /// children from `scope` and activates the scope's current path. Without
    /// a scope only the static definitions run.
    ///
    /// # Errors
    ///
    /// Propagates errors raised by population rules.
    pub fn build_node(&mut self, idx: NodeIdx, scope: Option<&dyn Scope>) -> Result<(), MenuError> {
        self.check(idx)?;
        self.build_definitions(idx, scope)?;

        if let Some(scope) = scope {
            self.populate(idx, scope);
            self.activate_in(idx, scope.current_path());
        }
        Ok(())
    }

    /// Apply registered definitions to `idx`, at most once.
    ///
    /// The node is marked built before any definition runs, so population
    /// rules that reach back to it do not rebuild it.
    pub(crate) fn build_definitions(
        &mut self,
        idx: NodeIdx,
        scope: Option<&dyn Scope>,
    ) -> Result<(), MenuError> {
        let node = &mut self.nodes[idx.0];
        if node.built {
            return Ok(());
        }
        node.built = true;

        let Some(menu_type) = node.menu_type.clone() else {
            return Ok(());
        };
        let registry = Arc::clone(&self.registry);
        let definitions = registry.definitions(&menu_type);
        tracing::debug!(
            menu_type = %menu_type,
            definitions = definitions.len(),
            "Building menu"
        );
        Builder::apply(self, idx, scope, definitions)
    }

    /// Refresh dynamic content of `idx` and its subtree from `scope`.
    pub fn populate(&mut self, idx: NodeIdx, scope: &dyn Scope) {
        for node in self.descendants(idx) {
            self.nodes[node.0].kind.populate(scope);
        }
    }
}

/// Dotted-path access for templates.
///
/// # Panics
///
/// Panics with the `NotFound` message if a segment has no matching child.
/// Use [`MenuTree::lookup`] to handle the error instead.
impl Index<&str> for MenuTree {
    type Output = Node;

    fn index(&self, path: &str) -> &Node {
        match self.lookup(path) {
            Ok(idx) => self.node(idx),
            Err(err) => panic!("{err}"),
        }
    }
}
