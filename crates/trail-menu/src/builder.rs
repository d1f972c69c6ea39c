//! Population DSL handed to registered definitions.

use crate::breadcrumb::Breadcrumb;
use crate::error::MenuError;
use crate::key::{Key, KeyPath};
use crate::node::{NodeIdx, NodeSpec};
use crate::registry::Definition;
use crate::scope::Scope;
use crate::sections::SectionsMenu;
use crate::tree::MenuTree;

/// Adds children to a target node while its definitions run.
///
/// ```
/// use std::sync::Arc;
/// use trail_menu::{DefinitionOptions, MenuTree, NodeSpec, Registry};
///
/// let registry = Registry::builder()
///     .define("admin_menu", DefinitionOptions::default(), |b| {
///         b.item("sites", "/admin/sites")?;
///         b.menu("users", |users| {
///             users.item("roles", "/admin/users/roles")?;
///             Ok(())
///         })?;
///         Ok(())
///     })
///     .build();
///
/// let mut tree = MenuTree::with_registry(NodeSpec::typed_menu("admin_menu"), Arc::new(registry));
/// tree.build(None).unwrap();
/// assert!(tree.lookup("users.roles").is_ok());
/// ```
pub struct Builder<'t, 's> {
    tree: &'t mut MenuTree,
    target: NodeIdx,
    scope: Option<&'s dyn Scope>,
}

impl<'s> Builder<'_, 's> {
    /// Run `definitions` against `target`.
    pub(crate) fn apply(
        tree: &mut MenuTree,
        target: NodeIdx,
        scope: Option<&'s dyn Scope>,
        definitions: &[Definition],
    ) -> Result<(), MenuError> {
        for definition in definitions {
            definition.options.apply(tree.node_mut(target));
            let mut builder = Builder {
                tree: &mut *tree,
                target,
                scope,
            };
            (definition.populate)(&mut builder)?;
        }
        Ok(())
    }

    /// Node receiving the children.
    #[must_use]
    pub fn target(&self) -> NodeIdx {
        self.target
    }

    /// Request scope, absent for scope-less builds.
    #[must_use]
    pub fn scope(&self) -> Option<&'s dyn Scope> {
        self.scope
    }

    /// Current request path, if a scope was supplied.
    #[must_use]
    pub fn current_path(&self) -> Option<&'s str> {
        self.scope.map(|scope| scope.current_path())
    }

    /// Read access to the tree under construction.
    #[must_use]
    pub fn tree(&self) -> &MenuTree {
        self.tree
    }

    /// Append a child to the target.
    ///
    /// Children with registered definitions of their own are built right away.
    pub fn add(&mut self, spec: NodeSpec) -> Result<NodeIdx, MenuError> {
        let child = self.tree.insert(self.target, spec)?;
        if self.tree.needs_build(child) {
            self.tree.build_definitions(child, self.scope)?;
        }
        Ok(child)
    }

    /// Append a linked item.
    pub fn item(&mut self, key: impl Into<Key>, url: impl Into<String>) -> Result<NodeIdx, MenuError> {
        self.add(NodeSpec::item(key).url(url))
    }

    /// Append a child and populate it with a nested builder.
    pub fn nest<F>(&mut self, spec: NodeSpec, populate: F) -> Result<NodeIdx, MenuError>
    where
        F: FnOnce(&mut Builder<'_, 's>) -> Result<(), MenuError>,
    {
        let child = self.add(spec)?;
        let mut nested = Builder {
            tree: &mut *self.tree,
            target: child,
            scope: self.scope,
        };
        populate(&mut nested)?;
        Ok(child)
    }

    /// Append a nested menu.
    pub fn menu<F>(&mut self, key: impl Into<Key>, populate: F) -> Result<NodeIdx, MenuError>
    where
        F: FnOnce(&mut Builder<'_, 's>) -> Result<(), MenuError>,
    {
        self.nest(NodeSpec::menu(key), populate)
    }

    /// Append a nested group.
    pub fn group<F>(&mut self, key: impl Into<Key>, populate: F) -> Result<NodeIdx, MenuError>
    where
        F: FnOnce(&mut Builder<'_, 's>) -> Result<(), MenuError>,
    {
        self.nest(NodeSpec::group(key), populate)
    }

    /// Append a sections menu linked to `url`, keyed `:sections`.
    pub fn sections(
        &mut self,
        menu: SectionsMenu,
        url: impl Into<String>,
    ) -> Result<NodeIdx, MenuError> {
        self.add(NodeSpec::sections(menu).url(url))
    }

    /// Delegate the target's activation to the node at `path` (from the root).
    pub fn activates(&mut self, path: impl Into<KeyPath>) -> Result<(), MenuError> {
        self.delegate(self.target, path)
    }

    /// Delegate `node`'s activation to the node at `path` (from the root).
    pub fn delegate(&mut self, node: NodeIdx, path: impl Into<KeyPath>) -> Result<(), MenuError> {
        let target = self.tree.lookup(path)?;
        self.tree.set_activates(node, target)
    }

    /// Register an extra breadcrumb on the target.
    pub fn breadcrumb(&mut self, breadcrumb: Breadcrumb) -> Result<(), MenuError> {
        self.tree.add_breadcrumb(self.target, breadcrumb)
    }

    /// Search the whole tree for a key.
    #[must_use]
    pub fn find(&self, key: impl Into<Key>) -> Option<NodeIdx> {
        self.tree.find(key)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::node::NodeKind;
    use crate::registry::{DefinitionOptions, Registry};
    use crate::scope::RequestScope;
    use crate::sections::SectionSource;

    fn tree_with(registry: Registry) -> MenuTree {
        MenuTree::with_registry(NodeSpec::typed_menu("admin_menu"), Arc::new(registry))
    }

    #[test]
    fn test_definitions_add_children_in_order() {
        let registry = Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |b| {
                b.item("sites", "/admin/sites")?;
                b.item("users", "/admin/users")?;
                Ok(())
            })
            .build();
        let mut tree = tree_with(registry);

        tree.build(None).unwrap();

        let keys: Vec<_> = tree
            .node(tree.root())
            .children()
            .iter()
            .map(|&c| tree.node(c).key().as_str().to_owned())
            .collect();
        assert_eq!(keys, vec!["sites", "users"]);
    }

    #[test]
    fn test_nested_builder_targets_child() {
        let registry = Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |b| {
                b.group("settings", |g| {
                    g.item("general", "/admin/settings")?;
                    Ok(())
                })?;
                Ok(())
            })
            .build();
        let mut tree = tree_with(registry);

        tree.build(None).unwrap();

        let general = tree.lookup("settings.general").unwrap();
        let settings = tree.lookup("settings").unwrap();
        assert_eq!(tree.node(general).parent(), Some(settings));
    }

    #[test]
    fn test_typed_children_are_built_recursively() {
        let registry = Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |b| {
                b.add(NodeSpec::typed_menu("users_menu"))?;
                Ok(())
            })
            .define("users_menu", DefinitionOptions::default().class("users"), |b| {
                b.item("roles", "/admin/roles")?;
                Ok(())
            })
            .build();
        let mut tree = tree_with(registry);

        tree.build(None).unwrap();

        let users = tree.lookup("users").unwrap();
        assert!(tree.node(users).is_built());
        assert_eq!(tree.node(users).class(), Some("users"));
        assert!(tree.lookup("users.roles").is_ok());
    }

    #[test]
    fn test_activates_sets_delegate() {
        let registry = Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |b| {
                b.item("sites", "/admin/sites")?;
                b.nest(NodeSpec::item("site").url("/admin/sites/1"), |site| {
                    site.activates("sites")
                })?;
                Ok(())
            })
            .build();
        let mut tree = tree_with(registry);

        tree.build(None).unwrap();

        let site = tree.lookup("site").unwrap();
        let sites = tree.lookup("sites").unwrap();
        assert_eq!(tree.activates(site), Some(sites));
    }

    #[test]
    fn test_activates_unknown_path_fails() {
        let registry = Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |b| b.activates("missing"))
            .build();
        let mut tree = tree_with(registry);

        let err = tree.build(None).unwrap_err();

        assert_eq!(err, MenuError::NotFound { key: Key::symbol("missing") });
    }

    #[test]
    fn test_builder_sees_scope() {
        let registry = Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |b| {
                let path = b.current_path().unwrap_or("/").to_owned();
                b.item("current", path)?;
                Ok(())
            })
            .build();
        let mut tree = tree_with(registry);
        let scope = RequestScope::new("/admin/here");

        tree.build(Some(&scope)).unwrap();

        let current = tree.lookup("current").unwrap();
        assert_eq!(tree.node(current).url(), Some("/admin/here"));
        assert!(tree.node(current).is_active());
    }

    #[test]
    fn test_populate_error_propagates() {
        let registry = Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |_| {
                Err(MenuError::Populate("no site".to_owned()))
            })
            .build();
        let mut tree = tree_with(registry);

        assert_eq!(
            tree.build(None),
            Err(MenuError::Populate("no site".to_owned()))
        );
    }

    #[test]
    fn test_sections_adds_sections_menu() {
        let registry = Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |b| {
                b.sections(SectionsMenu::from_scope(), "/admin/sections")?;
                Ok(())
            })
            .build();
        let mut tree = tree_with(registry);
        let scope = RequestScope::new("/admin/sections/2/contents").with_sections(vec![
            SectionSource::new(1, "Home"),
            SectionSource::new(2, "Blog"),
        ]);

        tree.build(Some(&scope)).unwrap();

        let sections = tree.lookup("sections").unwrap();
        let node = tree.node(sections);
        assert!(matches!(node.kind(), NodeKind::Sections(_)));
        assert_eq!(node.url(), Some("/admin/sections"));
        assert_eq!(node.sections().len(), 2);
        assert!(node.sections()[1].is_active());
    }

    fn dashboard_registry() -> Registry {
        Registry::builder()
            .define("admin_menu", DefinitionOptions::default(), |b| {
                b.breadcrumb(Breadcrumb::new("dashboard").with_url("/admin"))?;
                b.item("users", "/admin/users")?;
                if b.find("users").is_some() {
                    b.nest(NodeSpec::item("profile").url("/admin/users/me"), |profile| {
                        profile.activates("users")
                    })?;
                }
                if b.scope().is_some_and(|scope| !scope.sections().is_empty()) {
                    b.sections(SectionsMenu::from_scope(), "/admin/sections")?;
                }
                Ok(())
            })
            .build()
    }

    #[test]
    fn test_definition_breadcrumbs_lead_child_trails() {
        let mut tree = tree_with(dashboard_registry());
        let scope = RequestScope::new("/admin/users/me")
            .with_sections(vec![SectionSource::new(1, "Blog")]);

        tree.build(Some(&scope)).unwrap();

        let keys = |idx| -> Vec<String> {
            tree.breadcrumbs(idx)
                .iter()
                .map(|crumb| crumb.key.as_str().to_owned())
                .collect()
        };
        let users = tree.lookup("users").unwrap();
        let profile = tree.lookup("profile").unwrap();
        assert_eq!(keys(users), vec!["dashboard", "users"]);
        assert_eq!(keys(profile), vec!["dashboard", "users", "profile"]);
        assert_eq!(tree.breadcrumbs(users)[0].url.as_deref(), Some("/admin"));
        assert!(tree.node(users).is_active());
        assert!(tree.lookup("sections").is_ok());
    }

    #[test]
    fn test_definition_without_scope_skips_scoped_children() {
        let mut tree = tree_with(dashboard_registry());

        tree.build(None).unwrap();

        assert!(tree.lookup("profile").is_ok());
        assert!(tree.lookup("sections").is_err());
    }
}
