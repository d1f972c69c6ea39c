//! Configuration management for Trail.
//!
//! Parses `trail.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `admin.root`
//! - `menu[*].url` (nested entries included)

mod expand;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override admin URL prefix.
    pub admin_root: Option<String>,
    /// Override translation scope.
    pub translation_scope: Option<String>,
    /// Override highest section level class.
    pub max_section_level: Option<u32>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "trail.toml";

/// Highest accepted `render.max_section_level`.
const MAX_SECTION_LEVEL: u32 = 100;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markup settings.
    pub render: RenderConfig,
    /// Translation settings.
    pub translation: TranslationConfig,
    /// Display text for symbolic keys.
    pub titles: BTreeMap<String, String>,
    /// Admin routing settings.
    pub admin: AdminConfig,
    /// Preview menu entries, in render order.
    pub menu: Vec<MenuEntry>,
    /// Preview section sources.
    pub sections: Vec<SectionEntry>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markup settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Class marking active items and sections.
    pub active_class: String,
    /// Class on every item.
    pub item_class: String,
    /// Id of the sections list.
    pub sections_list_id: String,
    /// Highest `level_N` class emitted for sections.
    pub max_section_level: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            active_class: "active".to_owned(),
            item_class: "item".to_owned(),
            sections_list_id: "sections_menu".to_owned(),
            max_section_level: 10,
        }
    }
}

/// Translation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Scope prefix for title lookups.
    pub scope: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            scope: "titles".to_owned(),
        }
    }
}

/// Admin routing settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// URL prefix of admin routes.
    pub root: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            root: "/admin".to_owned(),
        }
    }
}

/// Kind of a configured menu entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Link or label.
    #[default]
    Item,
    /// Nested menu.
    Menu,
    /// Nested group.
    Group,
    /// Sections menu fed from `[[sections]]`.
    Sections,
}

impl EntryKind {
    /// True for kinds that may carry children.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Menu | Self::Group)
    }
}

/// Configured menu entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MenuEntry {
    /// Symbolic key, unique among siblings.
    pub id: String,
    /// Entry kind.
    #[serde(default)]
    pub kind: EntryKind,
    /// Link target.
    pub url: Option<String>,
    /// Explicit display text.
    pub text: Option<String>,
    /// Extra CSS class.
    pub class: Option<String>,
    /// Dotted path of the activation delegate, from the menu root.
    pub activates: Option<String>,
    /// Nested entries of menus and groups.
    #[serde(default)]
    pub children: Vec<MenuEntry>,
}

/// Configured section source.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SectionEntry {
    /// Section id.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Nesting level.
    #[serde(default = "default_section_level")]
    pub level: u32,
}

fn default_section_level() -> u32 {
    1
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`admin.root`").
        field: String,
        /// Error message (e.g., "${`SITE_ID`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `trail.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.admin_root {
            self.admin.root.clone_from(root);
        }
        if let Some(scope) = &settings.translation_scope {
            self.translation.scope.clone_from(scope);
        }
        if let Some(level) = settings.max_section_level {
            self.render.max_section_level = level;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        require_non_empty(&self.translation.scope, "translation.scope")?;
        if !self.admin.root.starts_with('/') {
            return Err(ConfigError::Validation(
                "admin.root must start with /".to_owned(),
            ));
        }
        validate_entries(&self.menu, "menu")?;
        self.validate_sections()?;
        Ok(())
    }

    /// Validate render configuration.
    fn validate_render(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.active_class, "render.active_class")?;
        require_non_empty(&self.render.item_class, "render.item_class")?;
        require_non_empty(&self.render.sections_list_id, "render.sections_list_id")?;

        let level = self.render.max_section_level;
        if level == 0 {
            return Err(ConfigError::Validation(
                "render.max_section_level must be greater than 0".to_owned(),
            ));
        }
        if level > MAX_SECTION_LEVEL {
            return Err(ConfigError::Validation(format!(
                "render.max_section_level cannot exceed {MAX_SECTION_LEVEL}"
            )));
        }
        Ok(())
    }

    /// Validate section sources.
    fn validate_sections(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id) {
                return Err(ConfigError::Validation(format!(
                    "sections: duplicate id {}",
                    section.id
                )));
            }
            if section.level == 0 {
                return Err(ConfigError::Validation(format!(
                    "sections: level of section {} must be greater than 0",
                    section.id
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.admin.root = expand::expand_env(&self.admin.root, "admin.root")?;
        expand_entries(&mut self.menu, "menu")
    }
}

/// Validate sibling entries and recurse into children.
fn validate_entries(entries: &[MenuEntry], field: &str) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for entry in entries {
        let path = format!("{field}.{}", entry.id);
        require_non_empty(&entry.id, &format!("{field}.id"))?;
        if entry.id.contains('.') {
            return Err(ConfigError::Validation(format!(
                "{field}: id {} cannot contain '.'",
                entry.id
            )));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "{field}: duplicate id {}",
                entry.id
            )));
        }
        if !entry.kind.is_container() && !entry.children.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{path}: only menus and groups can have children"
            )));
        }
        if let Some(class) = &entry.class {
            require_non_empty(class, &format!("{path}.class"))?;
        }
        validate_entries(&entry.children, &path)?;
    }
    Ok(())
}

/// Expand entry urls and recurse into children.
fn expand_entries(entries: &mut [MenuEntry], field: &str) -> Result<(), ConfigError> {
    for entry in entries {
        let path = format!("{field}.{}", entry.id);
        if let Some(url) = &entry.url {
            entry.url = Some(expand::expand_env(url, &format!("{path}.url"))?);
        }
        expand_entries(&mut entry.children, &path)?;
    }
    Ok(())
}
