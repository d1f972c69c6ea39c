//! Rendering and translation settings.

/// Settings shared by every node of a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuSettings {
    /// Class marking active items and sections.
    pub active_class: String,
    /// Class on every item's `li`.
    pub item_class: String,
    /// Id of a sections menu's nested list.
    pub sections_list_id: String,
    /// Highest `level_N` class emitted for sections.
    pub max_section_level: u32,
    /// Translation scope for symbolic keys.
    pub translation_scope: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            active_class: "active".to_owned(),
            item_class: "item".to_owned(),
            sections_list_id: "sections_menu".to_owned(),
            max_section_level: 10,
            translation_scope: "titles".to_owned(),
        }
    }
}
