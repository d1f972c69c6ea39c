//! Activation: marking the nodes that correspond to the request path.
//!
//! Activation is a two-phase pass over a subtree. The first phase clears
//! every `active` flag (sections included); the second marks the
//! activation path of every node whose url equals the request path, and
//! lets each sections menu mark its sections under the path's
//! `/sections/<id>` prefix.

use crate::node::{NodeIdx, NodeKind};
use crate::tree::MenuTree;

impl MenuTree {
    /// Activate the whole tree for `path`.
    pub fn activate(&mut self, path: &str) {
        self.activate_in(self.root(), path);
    }

    /// Activate the subtree under `idx` for `path`.
    ///
    /// Delegates outside the subtree are marked too when a node inside it
    /// matches.
    pub fn activate_in(&mut self, idx: NodeIdx, path: &str) {
        let subtree = self.descendants(idx);
        for &node in &subtree {
            self.clear(node);
        }

        let mut matched = 0_usize;
        for &node in &subtree {
            if self.node(node).url() == Some(path) {
                matched += 1;
                for ancestor in self.activation_path(node) {
                    self.node_mut(ancestor).active = true;
                }
                tracing::trace!(key = %self.node(node).key(), path, "Matched menu node");
            }
            if let NodeKind::Sections(menu) = &mut self.node_mut(node).kind {
                menu.activate(path);
            }
        }

        tracing::debug!(path, matched, "Activated menu");
    }

    /// Clear activation across the whole tree.
    pub fn reset(&mut self) {
        self.reset_in(self.root());
    }

    /// Clear activation across the subtree under `idx`.
    ///
    /// Built state is kept.
    pub fn reset_in(&mut self, idx: NodeIdx) {
        for node in self.descendants(idx) {
            self.clear(node);
        }
    }

    fn clear(&mut self, idx: NodeIdx) {
        let node = self.node_mut(idx);
        node.active = false;
        if let NodeKind::Sections(menu) = &mut node.kind {
            menu.reset();
        }
    }

    /// Active nodes in render order.
    #[must_use]
    pub fn active_nodes(&self) -> Vec<NodeIdx> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&idx| self.node(idx).is_active())
            .collect()
    }

    /// Node representing `path`: the first node whose url equals it, else
    /// the first sections menu with an active section.
    #[must_use]
    pub fn current(&self, path: &str) -> Option<NodeIdx> {
        let order = self.descendants(self.root());
        order
            .iter()
            .copied()
            .find(|&idx| self.node(idx).url() == Some(path))
            .or_else(|| {
                order.iter().copied().find(|&idx| {
                    self.node(idx)
                        .sections()
                        .iter()
                        .any(crate::sections::Section::is_active)
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::key::Key;
    use crate::node::NodeSpec;
    use crate::scope::RequestScope;
    use crate::sections::{SectionSource, SectionsMenu};
    use crate::tree::MenuTree;

    fn site() -> MenuTree {
        let mut tree = MenuTree::new(NodeSpec::menu("main"));
        let root = tree.root();
        tree.insert(root, NodeSpec::item("home").url("/")).unwrap();
        let admin = tree.insert(root, NodeSpec::menu("admin").url("/admin")).unwrap();
        tree.insert(admin, NodeSpec::item("users").url("/admin/users")).unwrap();
        tree.insert(admin, NodeSpec::item("sites").url("/admin/sites")).unwrap();
        tree
    }

    fn active_keys(tree: &MenuTree) -> Vec<String> {
        tree.active_nodes()
            .into_iter()
            .map(|idx| tree.node(idx).key().as_str().to_owned())
            .collect()
    }

    #[test]
    fn test_activate_marks_match_and_ancestors() {
        let mut tree = site();

        tree.activate("/admin/users");

        assert_eq!(active_keys(&tree), vec!["main", "admin", "users"]);
    }

    #[test]
    fn test_activate_without_match_clears_everything() {
        let mut tree = site();
        tree.activate("/admin/users");

        tree.activate("/nowhere");

        assert!(active_keys(&tree).is_empty());
    }

    #[test]
    fn test_reactivate_moves_highlight() {
        let mut tree = site();
        tree.activate("/admin/users");

        tree.activate("/");

        assert_eq!(active_keys(&tree), vec!["main", "home"]);
    }

    #[test]
    fn test_activate_follows_delegate_not_parent() {
        let mut tree = site();
        let users = tree.find("users").unwrap();
        let home = tree.find("home").unwrap();
        tree.set_activates(users, home).unwrap();

        tree.activate("/admin/users");

        assert_eq!(active_keys(&tree), vec!["main", "home", "users"]);
    }

    #[test]
    fn test_delegate_to_later_sibling_stays_active() {
        let mut tree = site();
        let users = tree.find("users").unwrap();
        let sites = tree.find("sites").unwrap();
        tree.set_activates(users, sites).unwrap();

        tree.activate("/admin/users");

        assert!(tree.node(sites).is_active());
    }

    #[test]
    fn test_reset_clears_all_flags_and_keeps_built() {
        let mut tree = site();
        tree.build(None).unwrap();
        tree.activate("/admin/users");

        tree.reset();

        assert!(active_keys(&tree).is_empty());
        assert!(tree.node(tree.root()).is_built());
    }

    #[test]
    fn test_reset_clears_sections() {
        let mut tree = MenuTree::new(NodeSpec::menu("main"));
        let root = tree.root();
        let sections = tree
            .insert(root, NodeSpec::sections(SectionsMenu::from_scope()).url("/admin/sections"))
            .unwrap();
        let scope = RequestScope::new("/admin/sections/1/contents")
            .with_sections(vec![SectionSource::new(1, "Blog")]);
        tree.build(Some(&scope)).unwrap();
        assert!(tree.node(sections).sections()[0].is_active());

        tree.reset();

        assert!(!tree.node(sections).sections()[0].is_active());
    }

    #[test]
    fn test_current_prefers_exact_url() {
        let mut tree = site();
        tree.activate("/admin/sites");

        let current = tree.current("/admin/sites").unwrap();

        assert_eq!(tree.node(current).key(), &Key::symbol("sites"));
        assert!(tree.current("/missing").is_none());
    }

    #[test]
    fn test_home_about_scenario() {
        let mut tree = MenuTree::new(NodeSpec::menu("main"));
        let root = tree.root();
        let home = tree.insert(root, NodeSpec::item("home").url("/")).unwrap();
        let about = tree.insert(root, NodeSpec::item("about").url("/about")).unwrap();

        tree.build(Some(&RequestScope::new("/about"))).unwrap();

        assert!(tree.node(about).is_active());
        assert!(!tree.node(home).is_active());
        assert!(tree.node(root).is_active());
        assert_eq!(tree.breadcrumbs(about).len(), 1);
    }

    #[test]
    fn test_sections_activate_by_path_prefix() {
        let mut tree = MenuTree::new(NodeSpec::menu("main"));
        let root = tree.root();
        let sections = tree
            .insert(
                root,
                NodeSpec::sections(SectionsMenu::new(|_: &dyn crate::scope::Scope| {
                    vec![SectionSource::new(3, "Blog"), SectionSource::new(4, "Wiki")]
                }))
                .url("/admin/sections"),
            )
            .unwrap();

        tree.build(Some(&RequestScope::new("/admin/sections/3/edit/page/2")))
            .unwrap();

        let flags: Vec<_> = tree
            .node(sections)
            .sections()
            .iter()
            .map(crate::sections::Section::is_active)
            .collect();
        assert_eq!(flags, vec![true, false]);
        assert!(!tree.node(sections).is_active());
        assert_eq!(tree.current("/admin/sections/3/edit/page/2"), Some(sections));
    }
}
