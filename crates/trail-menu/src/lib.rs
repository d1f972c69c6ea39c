//! Navigation menus with activation and breadcrumbs for Trail.
//!
//! This crate provides:
//! - [`MenuTree`]: arena-backed menu tree with lookup, activation and rendering
//! - [`Registry`] and [`Builder`]: per-type population rules applied at build time
//! - [`SectionsMenu`]: an item owning a per-request list of sections
//! - [`Breadcrumb`] trails derived from activation delegates
//!
//! # Quick Start
//!
//! ```
//! use trail_menu::{HtmlTags, MenuTree, NodeSpec, RenderContext, RequestScope, TitleTable};
//!
//! let mut tree = MenuTree::new(NodeSpec::menu("main"));
//! let root = tree.root();
//! tree.insert(root, NodeSpec::item("home").url("/")).unwrap();
//! tree.insert(root, NodeSpec::item("about").url("/about")).unwrap();
//!
//! tree.build(Some(&RequestScope::new("/about"))).unwrap();
//!
//! let about = tree.find("about").unwrap();
//! assert!(tree.node(about).is_active());
//! assert_eq!(tree.breadcrumbs(about).len(), 1);
//!
//! let titles = TitleTable::new().with("home", "Home").with("about", "About");
//! let html = tree.render(&RenderContext::new(&HtmlTags, &titles));
//! assert!(html.contains(r#"<li class="item active"><a href="/about">About</a></li>"#));
//! ```

mod activation;
mod breadcrumb;
mod builder;
mod error;
mod key;
mod node;
mod registry;
mod render;
mod scope;
mod sections;
mod settings;
mod snapshot;
mod translate;
mod tree;

pub use breadcrumb::Breadcrumb;
pub use builder::Builder;
pub use error::MenuError;
pub use key::{Key, KeyPath};
pub use node::{Node, NodeIdx, NodeKind, NodeSpec};
pub use registry::{Definition, DefinitionOptions, MenuType, PopulateFn, Registry, RegistryBuilder};
pub use render::{Attributes, HtmlTags, RenderContext, Tag, TagRenderer, escape_html};
pub use scope::{RequestScope, Scope};
pub use sections::{Populate, Section, SectionSource, SectionsMenu, section_prefix};
pub use settings::MenuSettings;
pub use snapshot::{MenuSnapshot, SectionSnapshot};
pub use translate::{NoTranslations, TitleTable, Translator, humanize};
pub use tree::MenuTree;
