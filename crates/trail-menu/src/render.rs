//! Rendering seams.
//!
//! The tree decides structure, classes and link targets; turning a tag
//! into markup is delegated to a [`TagRenderer`]. [`HtmlTags`] is the
//! default HTML5 implementation.

use crate::node::{NodeIdx, NodeKind};
use crate::sections::SectionsMenu;
use crate::translate::{Translator, resolve_key};
use crate::tree::MenuTree;

/// Tags the menu asks a renderer to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// List wrapper for menus and section lists.
    Ul,
    /// Generic wrapper for groups.
    Div,
    /// List entry for items.
    Li,
    /// Link.
    A,
    /// Plain label.
    Span,
}

impl Tag {
    /// HTML element name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ul => "ul",
            Self::Div => "div",
            Self::Li => "li",
            Self::A => "a",
            Self::Span => "span",
        }
    }
}

/// Attribute bag passed with each tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    id: Option<String>,
    classes: Vec<String>,
    href: Option<String>,
}

impl Attributes {
    /// Empty attribute bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class. Empty class names are ignored.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.classes.push(class);
        }
        self
    }

    /// Set the link target.
    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Element id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Link target.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Space-separated class list, `None` when empty.
    #[must_use]
    pub fn class_attr(&self) -> Option<String> {
        (!self.classes.is_empty()).then(|| self.classes.join(" "))
    }
}

/// Markup producer.
pub trait TagRenderer {
    /// Render `tag` with `attrs`; `body` appends the element's content.
    fn render(&self, tag: Tag, attrs: &Attributes, body: &mut dyn FnMut(&mut String)) -> String;

    /// Append display text to `out`.
    fn text(&self, out: &mut String, text: &str) {
        out.push_str(&escape_html(text));
    }
}

/// HTML5 tag renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlTags;

impl TagRenderer for HtmlTags {
    fn render(&self, tag: Tag, attrs: &Attributes, body: &mut dyn FnMut(&mut String)) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(tag.name());
        if let Some(id) = attrs.id() {
            out.push_str(&format!(r#" id="{}""#, escape_html(id)));
        }
        if let Some(class) = attrs.class_attr() {
            out.push_str(&format!(r#" class="{}""#, escape_html(&class)));
        }
        if let Some(href) = attrs.href() {
            out.push_str(&format!(r#" href="{}""#, escape_html(href)));
        }
        out.push('>');
        body(&mut out);
        out.push_str("</");
        out.push_str(tag.name());
        out.push('>');
        out
    }
}

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// External capabilities used while rendering.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Markup producer.
    pub renderer: &'a dyn TagRenderer,
    /// Display text lookup for symbolic keys.
    pub translator: &'a dyn Translator,
}

impl<'a> RenderContext<'a> {
    /// Bundle a renderer and a translator.
    #[must_use]
    pub fn new(renderer: &'a dyn TagRenderer, translator: &'a dyn Translator) -> Self {
        Self {
            renderer,
            translator,
        }
    }
}

impl MenuTree {
    /// Display text of a node, computed once.
    ///
    /// Literal keys are used as-is; symbolic keys go through `translator`.
    pub fn text(&self, idx: NodeIdx, translator: &dyn Translator) -> &str {
        let node = self.node(idx);
        node.text
            .get_or_init(|| resolve_key(&node.key, translator, &self.settings().translation_scope))
    }

    /// Link (or label, without url) for a node, computed once.
    fn item_content(&self, idx: NodeIdx, ctx: &RenderContext<'_>) -> &str {
        let node = self.node(idx);
        node.content.get_or_init(|| {
            let text = self.text(idx, ctx.translator);
            let attrs = match &node.url {
                Some(url) => Attributes::new().with_href(url),
                None => Attributes::new(),
            };
            let tag = if node.url.is_some() { Tag::A } else { Tag::Span };
            ctx.renderer
                .render(tag, &attrs, &mut |out| ctx.renderer.text(out, text))
        })
    }

    /// Item content; sections menus append their sections list.
    #[must_use]
    pub fn content(&self, idx: NodeIdx, ctx: &RenderContext<'_>) -> String {
        let item = self.item_content(idx, ctx);
        match &self.node(idx).kind {
            NodeKind::Sections(menu) => format!("{item}{}", self.render_sections(menu, ctx)),
            _ => item.to_owned(),
        }
    }

    fn render_sections(&self, menu: &SectionsMenu, ctx: &RenderContext<'_>) -> String {
        let settings = self.settings();
        let attrs = Attributes::new().with_id(&settings.sections_list_id);
        ctx.renderer.render(Tag::Ul, &attrs, &mut |out| {
            for section in menu.sections() {
                let level = section.level.min(settings.max_section_level);
                let mut link_attrs = Attributes::new()
                    .with_class(format!("level_{level}"))
                    .with_href(&section.url);
                if section.is_active() {
                    link_attrs = link_attrs.with_class(&settings.active_class);
                }
                let link = ctx.renderer.render(Tag::A, &link_attrs, &mut |a| {
                    ctx.renderer.text(a, &section.title);
                });
                out.push_str(&ctx.renderer.render(Tag::Li, &Attributes::new(), &mut |li| {
                    li.push_str(&link);
                }));
            }
        })
    }

    /// Render the whole tree.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        self.render_node(self.root(), ctx)
    }

    /// Render `idx` and its subtree.
    ///
    /// Menus render as `ul`, groups as `div`, both wrapping their children
    /// in order. Items render as `li` around their content.
    #[must_use]
    pub fn render_node(&self, idx: NodeIdx, ctx: &RenderContext<'_>) -> String {
        let node = self.node(idx);
        let settings = self.settings();
        let mut attrs = Attributes::new();
        if let Some(id) = &node.html_id {
            attrs = attrs.with_id(id);
        }

        match &node.kind {
            NodeKind::Menu | NodeKind::Group => {
                let tag = if matches!(node.kind, NodeKind::Menu) {
                    Tag::Ul
                } else {
                    Tag::Div
                };
                if let Some(class) = &node.class {
                    attrs = attrs.with_class(class);
                }
                ctx.renderer.render(tag, &attrs, &mut |out| {
                    for &child in &node.children {
                        out.push_str(&self.render_node(child, ctx));
                    }
                })
            }
            NodeKind::Item | NodeKind::Sections(_) => {
                let content = self.content(idx, ctx);
                attrs = attrs.with_class(&settings.item_class);
                if let Some(class) = &node.class {
                    attrs = attrs.with_class(class);
                }
                if node.active {
                    attrs = attrs.with_class(&settings.active_class);
                }
                ctx.renderer
                    .render(Tag::Li, &attrs, &mut |out| out.push_str(&content))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::key::Key;
    use crate::node::NodeSpec;
    use crate::scope::RequestScope;
    use crate::sections::SectionSource;
    use crate::settings::MenuSettings;
    use crate::translate::{NoTranslations, TitleTable};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_html_tags_attribute_order() {
        let attrs = Attributes::new()
            .with_href("/x")
            .with_class("a")
            .with_class("")
            .with_class("b")
            .with_id("main");

        let html = HtmlTags.render(Tag::A, &attrs, &mut |out| out.push_str("X"));

        assert_eq!(html, r#"<a id="main" class="a b" href="/x">X</a>"#);
    }

    #[test]
    fn test_render_menu_with_items() {
        let mut tree = MenuTree::new(NodeSpec::menu("main").html_id("nav"));
        let root = tree.root();
        tree.insert(root, NodeSpec::item("home").url("/")).unwrap();
        tree.insert(root, NodeSpec::item(Key::literal("Help"))).unwrap();
        tree.activate("/");
        let titles = TitleTable::new().with("home", "Home");
        let ctx = RenderContext::new(&HtmlTags, &titles);

        let html = tree.render(&ctx);

        assert_eq!(
            html,
            concat!(
                r#"<ul id="nav">"#,
                r#"<li class="item active"><a href="/">Home</a></li>"#,
                r#"<li class="item"><span>Help</span></li>"#,
                "</ul>"
            )
        );
    }

    #[test]
    fn test_group_renders_as_div() {
        let mut tree = MenuTree::new(NodeSpec::group("actions").class("actions"));
        let root = tree.root();
        tree.insert(root, NodeSpec::item("new").url("/new")).unwrap();
        let ctx = RenderContext::new(&HtmlTags, &NoTranslations);

        let html = tree.render(&ctx);

        assert_eq!(
            html,
            r#"<div class="actions"><li class="item"><a href="/new">New</a></li></div>"#
        );
    }

    #[test]
    fn test_text_is_memoized() {
        let tree = MenuTree::new(NodeSpec::item("home"));
        let first = TitleTable::new().with("home", "First");
        let second = TitleTable::new().with("home", "Second");

        assert_eq!(tree.text(tree.root(), &first), "First");
        assert_eq!(tree.text(tree.root(), &second), "First");
    }

    #[test]
    fn test_sections_content_caps_level_and_marks_active() {
        let mut tree = MenuTree::new(NodeSpec::menu("main")).with_settings(MenuSettings {
            max_section_level: 2,
            ..MenuSettings::default()
        });
        let root = tree.root();
        let sections = tree
            .insert(
                root,
                NodeSpec::sections(crate::sections::SectionsMenu::from_scope())
                    .url("/admin/sections"),
            )
            .unwrap();
        let scope = RequestScope::new("/admin/sections/7/contents").with_sections(vec![
            SectionSource::new(7, "Blog"),
            SectionSource::new(8, "Deep").with_level(5),
        ]);
        tree.build(Some(&scope)).unwrap();
        let ctx = RenderContext::new(&HtmlTags, &NoTranslations);

        let html = tree.content(sections, &ctx);

        assert_eq!(
            html,
            concat!(
                r#"<a href="/admin/sections">Sections</a>"#,
                r#"<ul id="sections_menu">"#,
                r#"<li><a class="level_1 active" href="/admin/sections/7/contents">Blog</a></li>"#,
                r#"<li><a class="level_2" href="/admin/sections/8/contents">Deep</a></li>"#,
                "</ul>"
            )
        );
    }
}
