//! Menu tree assembled from `trail.toml`.

use std::sync::Arc;

use trail_config::{Config, EntryKind, MenuEntry};
use trail_menu::{
    Builder, DefinitionOptions, Key, MenuError, MenuSettings, MenuTree, NodeIdx, NodeSpec,
    Registry, RequestScope, SectionSource, SectionsMenu, TitleTable,
};

/// Menu type the configured entries are registered under.
const SITE_MENU: &str = "site_menu";

/// Built and activated menu for one request path.
pub(crate) struct Site {
    pub(crate) tree: MenuTree,
    pub(crate) titles: TitleTable,
    pub(crate) path: String,
}

impl Site {
    /// Build the configured menu and activate it for `path`.
    pub(crate) fn build(config: &Config, path: &str) -> Result<Self, MenuError> {
        let registry = registry_from(config.menu.clone());
        let mut tree = MenuTree::with_registry(NodeSpec::typed_menu(SITE_MENU), Arc::new(registry))
            .with_settings(settings_from(config));
        let scope = scope_from(config, path);

        tree.build(Some(&scope))?;
        tracing::debug!(nodes = tree.node_count(), path, "Built site menu");

        Ok(Self {
            tree,
            titles: config.titles.clone().into_iter().collect(),
            path: path.to_owned(),
        })
    }

    /// Node representing the request path.
    ///
    /// Falls back to the deepest active node when no url matches exactly.
    pub(crate) fn current(&self) -> Option<NodeIdx> {
        self.tree
            .current(&self.path)
            .or_else(|| self.tree.active_nodes().last().copied())
    }
}

/// Registry with a single definition replaying the configured entries.
fn registry_from(entries: Vec<MenuEntry>) -> Registry {
    Registry::builder()
        .define(
            SITE_MENU,
            DefinitionOptions::default().html_id(SITE_MENU),
            move |b| {
                for entry in &entries {
                    add_entry(b, entry)?;
                }
                // Delegates may point at later siblings, so link after every node exists.
                let root = b.target();
                for entry in &entries {
                    link_delegates(b, root, entry)?;
                }
                Ok(())
            },
        )
        .build()
}

fn add_entry(b: &mut Builder<'_, '_>, entry: &MenuEntry) -> Result<NodeIdx, MenuError> {
    let spec = node_spec(entry);
    if entry.kind.is_container() {
        b.nest(spec, |nested| {
            for child in &entry.children {
                add_entry(nested, child)?;
            }
            Ok(())
        })
    } else {
        b.add(spec)
    }
}

fn node_spec(entry: &MenuEntry) -> NodeSpec {
    let key = Key::symbol(entry.id.as_str());
    let mut spec = match entry.kind {
        EntryKind::Item => NodeSpec::item(key),
        EntryKind::Menu => NodeSpec::menu(key),
        EntryKind::Group => NodeSpec::group(key),
        EntryKind::Sections => NodeSpec::sections(SectionsMenu::from_scope()).key(key),
    };
    if let Some(url) = &entry.url {
        spec = spec.url(url);
    }
    if let Some(text) = &entry.text {
        spec = spec.text(text);
    }
    if let Some(class) = &entry.class {
        spec = spec.class(class);
    }
    spec
}

fn link_delegates(
    b: &mut Builder<'_, '_>,
    parent: NodeIdx,
    entry: &MenuEntry,
) -> Result<(), MenuError> {
    let node = b.tree().lookup_in(parent, Key::symbol(entry.id.as_str()))?;
    if let Some(path) = &entry.activates {
        b.delegate(node, path.as_str())?;
    }
    for child in &entry.children {
        link_delegates(b, node, child)?;
    }
    Ok(())
}

fn settings_from(config: &Config) -> MenuSettings {
    MenuSettings {
        active_class: config.render.active_class.clone(),
        item_class: config.render.item_class.clone(),
        sections_list_id: config.render.sections_list_id.clone(),
        max_section_level: config.render.max_section_level,
        translation_scope: config.translation.scope.clone(),
    }
}

fn scope_from(config: &Config, path: &str) -> RequestScope {
    let sections = config
        .sections
        .iter()
        .map(|section| SectionSource::new(section.id, section.title.clone()).with_level(section.level))
        .collect();
    RequestScope::new(path)
        .with_admin_root(config.admin.root.as_str())
        .with_sections(sections)
}
