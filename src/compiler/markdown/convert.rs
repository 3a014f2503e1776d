//! Markdown to AST conversion using pulldown-cmark.
//!
//! Produces the same nested-array document model the FAQ transforms consume.
//! HTML comments are kept as text leaves so `<!-- new:DATE -->` tags survive.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::faq::{Element, Node};

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `### Question {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Markdown to AST converter
struct MarkdownConverter {
    /// Stack of open elements (for nested structures)
    stack: Vec<Element>,
    /// Root children (collected when stack is empty)
    root_children: Vec<Node>,
}

impl MarkdownConverter {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root_children: Vec::new(),
        }
    }

    /// Convert markdown string to top-level nodes
    fn convert(mut self, markdown: &str, options: &MarkdownOptions) -> Vec<Node> {
        let parser = Parser::new_ext(markdown, options.to_pulldown_options());

        for event in parser {
            self.handle_event(event);
        }

        // Close anything left open by malformed input
        while let Some(elem) = self.stack.pop() {
            self.add_node(Node::Element(elem));
        }

        self.root_children
    }

    /// Handle a single pulldown-cmark event
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(text.as_ref()),
            Event::Code(code) => self.add_inline_code(code.as_ref()),
            Event::Html(html) | Event::InlineHtml(html) => self.add_raw_html(html.as_ref()),
            Event::SoftBreak => self.add_text("\n"),
            Event::HardBreak => self.add_element("br", vec![]),
            Event::Rule => self.add_element("hr", vec![]),
            Event::FootnoteReference(name) => self.add_footnote_ref(name.as_ref()),
            Event::TaskListMarker(checked) => self.add_task_marker(checked),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.add_text(math.as_ref()),
        }
    }

    /// Start a new tag (push onto stack)
    fn start_tag(&mut self, tag: Tag) {
        // Raw HTML blocks are transparent: their fragments land in the parent
        if is_transparent(&tag) {
            return;
        }
        let (tag_name, attrs) = tag_to_element(&tag);
        let mut elem = Element::new(tag_name);
        for (key, value) in attrs {
            elem.attrs.insert(key, value.into());
        }
        self.stack.push(elem);
    }

    /// End a tag (pop from stack)
    fn end_tag(&mut self, tag: TagEnd) {
        if matches!(tag, TagEnd::HtmlBlock | TagEnd::MetadataBlock(_)) {
            return;
        }
        if let Some(elem) = self.stack.pop() {
            self.add_node(Node::Element(elem));
        }
    }

    /// Add text content, merging with a preceding text leaf
    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(last)) = self.current_children().last_mut() {
            last.push_str(text);
            return;
        }
        self.add_node(Node::text(text));
    }

    /// Add inline code
    fn add_inline_code(&mut self, code: &str) {
        let elem = Element::new("code").with_children(vec![Node::text(code)]);
        self.add_node(Node::Element(elem));
    }

    /// Add raw HTML - parse with tl and convert to AST elements
    fn add_raw_html(&mut self, html: &str) {
        let trimmed = html.trim();

        // Comments stay verbatim: they may carry a "new" tag
        if trimmed.starts_with("<!--") && trimmed.ends_with("-->") {
            self.add_text(html);
            return;
        }

        let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
            // Parse failed, store as raw text
            self.add_text(html);
            return;
        };

        let parser = dom.parser();
        for handle in dom.children() {
            if let Some(node) = tl_node_to_ast(*handle, parser) {
                match node {
                    Node::Text(text) => self.add_text(&text),
                    other => self.add_node(other),
                }
            }
        }
    }

    /// Add a simple self-closing element
    fn add_element(&mut self, tag: &str, attrs: Vec<(String, String)>) {
        let mut elem = Element::new(tag);
        for (key, value) in attrs {
            elem.attrs.insert(key, value.into());
        }
        self.add_node(Node::Element(elem));
    }

    /// Add footnote reference
    fn add_footnote_ref(&mut self, name: &str) {
        let link = Element::new("a")
            .with_attr("href", format!("#fn-{name}"))
            .with_attr("id", format!("fnref-{name}"))
            .with_children(vec![Node::text(format!("[{name}]"))]);
        let sup = Element::new("sup")
            .with_attr("class", "footnote-ref")
            .with_children(vec![Node::Element(link)]);
        self.add_node(Node::Element(sup));
    }

    /// Add task list marker
    fn add_task_marker(&mut self, checked: bool) {
        let mut attrs = vec![
            ("type".to_string(), "checkbox".to_string()),
            ("disabled".to_string(), String::new()),
        ];
        if checked {
            attrs.push(("checked".to_string(), String::new()));
        }
        self.add_element("input", attrs);
    }

    fn current_children(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(elem) => &mut elem.children,
            None => &mut self.root_children,
        }
    }

    /// Add a node to current context (top of stack or root)
    fn add_node(&mut self, node: Node) {
        self.current_children().push(node);
    }
}

/// Tags that do not produce an element of their own.
fn is_transparent(tag: &Tag) -> bool {
    matches!(tag, Tag::HtmlBlock | Tag::MetadataBlock(_))
}

/// Convert a tl node handle to an AST node
fn tl_node_to_ast(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();
            let mut elem = Element::new(tag_name);

            for (key, value) in tag.attributes().iter() {
                let value = value.map(|v| v.to_string()).unwrap_or_default();
                elem.attrs.insert(key.to_string(), value.into());
            }

            for child in tag.children().top().iter() {
                if let Some(child_node) = tl_node_to_ast(*child, parser) {
                    elem.children.push(child_node);
                }
            }

            Some(Node::Element(elem))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str().to_string();
            // Skip whitespace-only text
            if text.trim().is_empty() {
                None
            } else {
                Some(Node::Text(text))
            }
        }
        tl::Node::Comment(bytes) => Some(Node::Text(bytes.as_utf8_str().to_string())),
    }
}

/// Convert pulldown-cmark Tag to (tag_name, attributes)
fn tag_to_element(tag: &Tag) -> (String, Vec<(String, String)>) {
    match tag {
        // Block elements
        Tag::Paragraph => ("p".to_string(), vec![]),
        Tag::Heading { level, id, .. } => {
            let tag_name = heading_level_to_tag(*level);
            let attrs = id
                .as_ref()
                .map(|id| vec![("id".to_string(), id.to_string())])
                .unwrap_or_default();
            (tag_name, attrs)
        }
        Tag::BlockQuote(_) => ("blockquote".to_string(), vec![]),
        Tag::CodeBlock(kind) => {
            let attrs = match kind {
                pulldown_cmark::CodeBlockKind::Indented => vec![],
                pulldown_cmark::CodeBlockKind::Fenced(lang) => {
                    if lang.is_empty() {
                        vec![]
                    } else {
                        vec![("class".to_string(), format!("language-{}", lang))]
                    }
                }
            };
            ("pre".to_string(), attrs)
        }
        Tag::List(start) => {
            if let Some(start_num) = start {
                let attrs = if *start_num != 1 {
                    vec![("start".to_string(), start_num.to_string())]
                } else {
                    vec![]
                };
                ("ol".to_string(), attrs)
            } else {
                ("ul".to_string(), vec![])
            }
        }
        Tag::Item => ("li".to_string(), vec![]),
        Tag::FootnoteDefinition(name) => (
            "div".to_string(),
            vec![
                ("class".to_string(), "footnote".to_string()),
                ("id".to_string(), format!("fn-{}", name)),
            ],
        ),

        // Table elements
        Tag::Table(_) => ("table".to_string(), vec![]),
        Tag::TableHead => ("thead".to_string(), vec![]),
        Tag::TableRow => ("tr".to_string(), vec![]),
        Tag::TableCell => ("td".to_string(), vec![]),

        // Inline elements
        Tag::Emphasis => ("em".to_string(), vec![]),
        Tag::Strong => ("strong".to_string(), vec![]),
        Tag::Strikethrough => ("del".to_string(), vec![]),
        Tag::Link {
            dest_url, title, ..
        } => {
            let mut attrs = vec![("href".to_string(), dest_url.to_string())];
            if !title.is_empty() {
                attrs.push(("title".to_string(), title.to_string()));
            }
            ("a".to_string(), attrs)
        }
        Tag::Image {
            dest_url, title, ..
        } => {
            let mut attrs = vec![("src".to_string(), dest_url.to_string())];
            if !title.is_empty() {
                attrs.push(("title".to_string(), title.to_string()));
            }
            // alt text will be added as children (text content)
            ("img".to_string(), attrs)
        }

        // Transparent blocks, or extensions `to_pulldown_options` never enables
        Tag::MetadataBlock(_)
        | Tag::HtmlBlock
        | Tag::DefinitionList
        | Tag::DefinitionListTitle
        | Tag::DefinitionListDefinition
        | Tag::Superscript
        | Tag::Subscript => ("div".to_string(), vec![]),
    }
}

/// Convert heading level to tag name
fn heading_level_to_tag(level: HeadingLevel) -> String {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
    .to_string()
}

/// Convert markdown string to top-level AST nodes
pub fn from_markdown(markdown: &str, options: &MarkdownOptions) -> Vec<Node> {
    MarkdownConverter::new().convert(markdown, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::node::document_to_value;
    use serde_json::json;

    fn convert(md: &str) -> serde_json::Value {
        document_to_value(from_markdown(md, &MarkdownOptions::all()))
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(convert("Hello world"), json!([["p", {}, "Hello world"]]));
    }

    #[test]
    fn test_faq_structure() {
        let md = "## Basics\n\n### What is WCAG?\n\n{new:2026-10-15}\n\nWCAG is a standard.\n\n---\n";
        assert_eq!(
            convert(md),
            json!([
                ["h2", {}, "Basics"],
                ["h3", {}, "What is WCAG?"],
                ["p", {}, "{new:2026-10-15}"],
                ["p", {}, "WCAG is a standard."],
                ["hr", {}]
            ])
        );
    }

    #[test]
    fn test_html_comment_tag_preserved() {
        let md = "### Q\n\n<!-- new:2026-10-15 -->\n\nAnswer\n";
        let doc = convert(md);
        let items = doc.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[1].as_str().unwrap().contains("<!-- new:2026-10-15 -->"));
    }

    #[test]
    fn test_inline_comment_tag_preserved() {
        let doc = from_markdown("Updated <!-- new:2026-10-15 --> answer", &MarkdownOptions::all());
        let text = crate::faq::extract_text(&doc[0]);
        assert_eq!(text, "Updated <!-- new:2026-10-15 --> answer");
    }

    #[test]
    fn test_heading_id_and_inline_markup() {
        let doc = from_markdown("### How does `aria-label` work? {#aria}", &MarkdownOptions::all());
        let Node::Element(heading) = &doc[0] else {
            panic!("expected heading element");
        };
        assert_eq!(heading.tag, "h3");
        assert_eq!(heading.attrs.get("id"), Some(&json!("aria")));
        assert_eq!(
            crate::faq::extract_text(&doc[0]).trim_end(),
            "How does aria-label work?"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            convert("[WCAG](https://www.w3.org/WAI/)"),
            json!([["p", {}, ["a", {"href": "https://www.w3.org/WAI/"}, "WCAG"]]])
        );
    }

    #[test]
    fn test_nested_list() {
        let doc = convert("- Item 1\n  - Nested\n- Item 2");
        let items = doc.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0][0], json!("ul"));
    }

    #[test]
    fn test_raw_html_block() {
        let doc = convert("<div class=\"note\">Heads up</div>\n");
        assert_eq!(doc, json!([["div", {"class": "note"}, "Heads up"]]));
    }

    #[test]
    fn test_unsupported_extensions_stay_text() {
        assert_eq!(convert("E = mc^2^"), json!([["p", {}, "E = mc^2^"]]));
        assert_eq!(convert("Term\n: Definition"), json!([["p", {}, "Term\n: Definition"]]));
    }

    #[test]
    fn test_placeholder_text_kept_whole() {
        let doc = convert("Only {days_until_deadline} days left");
        assert_eq!(doc, json!([["p", {}, "Only {days_until_deadline} days left"]]));
    }
}
