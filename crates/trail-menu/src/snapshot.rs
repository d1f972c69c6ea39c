//! Serializable view of an activated tree.

use serde::Serialize;

use crate::node::NodeIdx;
use crate::translate::Translator;
use crate::tree::MenuTree;

/// Node snapshot for JSON output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuSnapshot {
    /// Raw key name.
    pub key: String,
    /// Structural kind.
    pub kind: &'static str,
    /// Display text.
    pub title: String,
    /// Link target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Activation state.
    pub active: bool,
    /// Sections of a sections menu.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionSnapshot>,
    /// Child snapshots in render order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuSnapshot>,
}

/// Section snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionSnapshot {
    /// Display title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Nesting level.
    pub level: u32,
    /// Activation state.
    pub active: bool,
}

impl MenuTree {
    /// Snapshot of the whole tree.
    #[must_use]
    pub fn snapshot(&self, translator: &dyn Translator) -> MenuSnapshot {
        self.snapshot_node(self.root(), translator)
    }

    /// Snapshot of `idx` and its subtree.
    #[must_use]
    pub fn snapshot_node(&self, idx: NodeIdx, translator: &dyn Translator) -> MenuSnapshot {
        let node = self.node(idx);
        MenuSnapshot {
            key: node.key().as_str().to_owned(),
            kind: node.kind().name(),
            title: self.text(idx, translator).to_owned(),
            url: node.url().map(str::to_owned),
            active: node.is_active(),
            sections: node
                .sections()
                .iter()
                .map(|section| SectionSnapshot {
                    title: section.title.clone(),
                    url: section.url.clone(),
                    level: section.level,
                    active: section.is_active(),
                })
                .collect(),
            children: node
                .children()
                .iter()
                .map(|&child| self.snapshot_node(child, translator))
                .collect(),
        }
    }
}
