//! Definitions registry.
//!
//! Each [`MenuType`] maps to an ordered list of population rules registered
//! at startup. The frozen [`Registry`] is read-only and shared between
//! requests as `Arc<Registry>`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::builder::Builder;
use crate::error::MenuError;
use crate::node::Node;

/// Population rule applied by the [`Builder`].
pub type PopulateFn = dyn Fn(&mut Builder<'_, '_>) -> Result<(), MenuError> + Send + Sync;

/// Kind tag keying the registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MenuType(String);

impl MenuType {
    /// Type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MenuType {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for MenuType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options applied to the node a definition builds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinitionOptions {
    /// CSS class for the node's wrapper.
    pub class: Option<String>,
    /// HTML id for the node's wrapper.
    pub html_id: Option<String>,
}

impl DefinitionOptions {
    /// Set the wrapper class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the wrapper id.
    #[must_use]
    pub fn html_id(mut self, id: impl Into<String>) -> Self {
        self.html_id = Some(id.into());
        self
    }

    pub(crate) fn apply(&self, node: &mut Node) {
        if let Some(class) = &self.class {
            node.class = Some(class.clone());
        }
        if let Some(id) = &self.html_id {
            node.html_id = Some(id.clone());
        }
    }
}

/// A registered `(populate, options)` pair.
#[derive(Clone)]
pub struct Definition {
    pub(crate) populate: Arc<PopulateFn>,
    pub(crate) options: DefinitionOptions,
}

impl Definition {
    /// Options applied to the built node.
    #[must_use]
    pub fn options(&self) -> &DefinitionOptions {
        &self.options
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Frozen mapping from menu type to definitions.
#[derive(Debug, Default)]
pub struct Registry {
    definitions: HashMap<MenuType, Vec<Definition>>,
}

impl Registry {
    /// Start registering definitions.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Definitions for a type, empty if none were registered.
    #[must_use]
    pub fn definitions(&self, menu_type: &MenuType) -> &[Definition] {
        self.definitions.get(menu_type).map_or(&[], Vec::as_slice)
    }

    /// True if at least one definition is registered for the type.
    #[must_use]
    pub fn is_defined(&self, menu_type: &MenuType) -> bool {
        !self.definitions(menu_type).is_empty()
    }
}

/// Mutable registry used during startup.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    definitions: HashMap<MenuType, Vec<Definition>>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a population rule for `menu_type`.
    ///
    /// Rules run in registration order when a node of that type is built.
    #[must_use]
    pub fn define<F>(
        mut self,
        menu_type: impl Into<MenuType>,
        options: DefinitionOptions,
        populate: F,
    ) -> Self
    where
        F: Fn(&mut Builder<'_, '_>) -> Result<(), MenuError> + Send + Sync + 'static,
    {
        self.definitions
            .entry(menu_type.into())
            .or_default()
            .push(Definition {
                populate: Arc::new(populate),
                options,
            });
        self
    }

    /// Give `child` a copy of the definitions currently registered for
    /// `parent`, ahead of its own.
    ///
    /// Later definitions on either type do not propagate.
    #[must_use]
    pub fn inherit(mut self, child: impl Into<MenuType>, parent: impl Into<MenuType>) -> Self {
        let mut merged = self
            .definitions
            .get(&parent.into())
            .cloned()
            .unwrap_or_default();
        let own = self.definitions.entry(child.into()).or_default();
        merged.append(own);
        *own = merged;
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            definitions: self.definitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeSpec;

    fn noop(_: &mut Builder<'_, '_>) -> Result<(), MenuError> {
        Ok(())
    }

    #[test]
    fn test_undefined_type_has_no_definitions() {
        let registry = Registry::default();
        let menu_type = MenuType::from("admin");

        assert!(registry.definitions(&menu_type).is_empty());
        assert!(!registry.is_defined(&menu_type));
    }

    #[test]
    fn test_define_appends_in_order() {
        let registry = Registry::builder()
            .define("admin", DefinitionOptions::default().class("first"), noop)
            .define("admin", DefinitionOptions::default().class("second"), noop)
            .build();

        let classes: Vec<_> = registry
            .definitions(&MenuType::from("admin"))
            .iter()
            .map(|d| d.options().class.as_deref())
            .collect();
        assert_eq!(classes, vec![Some("first"), Some("second")]);
    }

    #[test]
    fn test_inherit_copies_parent_definitions_first() {
        let registry = Registry::builder()
            .define("base", DefinitionOptions::default().class("base"), noop)
            .define("admin", DefinitionOptions::default().class("admin"), noop)
            .inherit("admin", "base")
            .define("base", DefinitionOptions::default().class("late"), noop)
            .build();

        let classes: Vec<_> = registry
            .definitions(&MenuType::from("admin"))
            .iter()
            .map(|d| d.options().class.as_deref())
            .collect();
        assert_eq!(classes, vec![Some("base"), Some("admin")]);
        assert_eq!(registry.definitions(&MenuType::from("base")).len(), 2);
    }

    #[test]
    fn test_options_apply_to_node() {
        let mut node = Node::from_spec(NodeSpec::menu("main"), None);

        DefinitionOptions::default()
            .class("main")
            .html_id("nav")
            .apply(&mut node);

        assert_eq!(node.class(), Some("main"));
        assert_eq!(node.html_id(), Some("nav"));
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
