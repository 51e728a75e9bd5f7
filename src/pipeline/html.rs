//! HTML structural rendering: a parsed HTML tree in, layout-aware plain
//! text out.
//!
//! ## Why a context value instead of walker state?
//!
//! Indent level, preformatted mode, and table mode are *scoped* properties:
//! they hold for one subtree and must vanish the moment that subtree ends.
//! Mutable walker fields would need save/restore discipline at every element
//! boundary; threading a small [`RenderContext`] by value gets the same
//! effect from the borrow checker for free. Each child receives a copy
//! derived from its parent's context, and whatever the child's subtree does
//! to that copy is discarded when the recursion returns — sibling subtrees
//! can never observe each other's indent or table state.
//!
//! The one deliberate exception is the table row buffer: `td`/`th` cells
//! append tokens that the enclosing `tr` joins on exit, so the buffer lives
//! on the walker where child mutations survive. `table` and `tr` reset it on
//! entry, which also bounds the damage from malformed nesting — structure is
//! reproduced as encountered, never corrected.
//!
//! ## Output shape
//!
//! `<script>`, `<style>`, comments, and doctypes contribute nothing. Block
//! elements end their line; lists indent by two spaces per level with `"* "`
//! item markers; blockquotes prefix `"> "` and indent; preformatted text
//! passes through verbatim; table rows become `"cell | cell |"` lines. A
//! final post-pass collapses every whitespace run containing a newline into
//! a single `"\n"` and drops spaces left hanging before newlines.

use once_cell::sync::Lazy;
use regex::Regex;
use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node, Selector};

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// Render parsed HTML to plain text, preserving coarse layout.
///
/// Walks the `<body>` subtree when one exists (the lenient parser inserts
/// one for full documents), otherwise the whole tree. Deterministic: the
/// same input yields byte-identical output.
pub fn render(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document
        .select(&BODY)
        .next()
        .map(|body| *body)
        .unwrap_or_else(|| document.tree.root());

    let mut walker = Walker::default();
    walker.walk(root, RenderContext::default());
    collapse_whitespace(&walker.out)
}

// ── Render context ───────────────────────────────────────────────────────

/// Scoped rendering state, threaded by value down the recursion.
#[derive(Debug, Clone, Copy, Default)]
struct RenderContext {
    /// Current indent level; two spaces are written per level.
    indent: usize,
    /// Inside `<pre>`/`<code>`: text passes through verbatim.
    in_preformatted: bool,
    /// Inside `<table>`: text is buffered into row tokens instead of
    /// written directly.
    in_table: bool,
}

// ── Tag dispatch ─────────────────────────────────────────────────────────

/// Closed set of tags the renderer reacts to; everything else is inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Paragraph,
    Heading,
    UnorderedList,
    OrderedList,
    ListItem,
    LineBreak,
    HorizontalRule,
    Preformatted,
    Blockquote,
    Table,
    TableRow,
    TableCell,
    Anchor,
    Image,
    Script,
    Style,
    Inline,
}

impl Tag {
    fn from_name(name: &str) -> Tag {
        match name {
            "p" => Tag::Paragraph,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Tag::Heading,
            "ul" => Tag::UnorderedList,
            "ol" => Tag::OrderedList,
            "li" => Tag::ListItem,
            "br" => Tag::LineBreak,
            "hr" => Tag::HorizontalRule,
            "pre" | "code" => Tag::Preformatted,
            "blockquote" => Tag::Blockquote,
            "table" => Tag::Table,
            "tr" => Tag::TableRow,
            "td" | "th" => Tag::TableCell,
            "a" => Tag::Anchor,
            "img" => Tag::Image,
            "script" => Tag::Script,
            "style" => Tag::Style,
            _ => Tag::Inline,
        }
    }

    /// Block-level elements get one trailing newline after their children
    /// render, unless preformatted mode is active.
    fn is_block(self) -> bool {
        matches!(
            self,
            Tag::Paragraph
                | Tag::Heading
                | Tag::UnorderedList
                | Tag::OrderedList
                | Tag::ListItem
                | Tag::LineBreak
                | Tag::HorizontalRule
                | Tag::Preformatted
                | Tag::Blockquote
                | Tag::Table
                | Tag::TableRow
                | Tag::TableCell
        )
    }

    /// Attributes worth keeping, per tag. Order here is irrelevant: output
    /// follows the node's own attribute order.
    fn attr_whitelist(self) -> &'static [&'static str] {
        match self {
            Tag::Anchor => &["href"],
            Tag::Image => &["src", "alt"],
            _ => &[],
        }
    }
}

// ── Tree walk ────────────────────────────────────────────────────────────

#[derive(Default)]
struct Walker {
    out: String,
    /// Pending cell tokens for the innermost open table row.
    row: Vec<String>,
}

impl Walker {
    fn walk(&mut self, node: NodeRef<'_, Node>, ctx: RenderContext) {
        match node.value() {
            Node::Text(text) => self.visit_text(&text.text, ctx),
            Node::Element(element) => {
                let tag = Tag::from_name(element.name());
                if matches!(tag, Tag::Script | Tag::Style) {
                    return;
                }
                let child_ctx = self.enter(tag, &element, ctx);
                for child in node.children() {
                    self.walk(child, child_ctx);
                }
                self.leave(tag, child_ctx);
            }
            Node::Document | Node::Fragment => {
                for child in node.children() {
                    self.walk(child, ctx);
                }
            }
            // Comments, doctypes, and processing instructions never reach
            // the output.
            _ => {}
        }
    }

    fn visit_text(&mut self, text: &str, ctx: RenderContext) {
        if ctx.in_preformatted {
            self.out.push_str(text);
            return;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        if ctx.in_table {
            self.row.push(trimmed.to_string());
        } else {
            self.write_indent(ctx.indent);
            self.out.push_str(trimmed);
            self.out.push(' ');
        }
    }

    fn enter(&mut self, tag: Tag, element: &Element, mut ctx: RenderContext) -> RenderContext {
        match tag {
            Tag::Preformatted => {
                ctx.in_preformatted = true;
                self.out.push('\n');
            }
            Tag::Blockquote => {
                // Marker sits at the pre-increment indent.
                self.write_indent(ctx.indent);
                self.out.push_str("> ");
                ctx.indent += 2;
            }
            Tag::UnorderedList | Tag::OrderedList => ctx.indent += 1,
            Tag::ListItem => {
                // Clamp to zero for an <li> outside any list.
                self.write_indent(ctx.indent.saturating_sub(1));
                self.out.push_str("* ");
            }
            Tag::Table => {
                ctx.in_table = true;
                self.row.clear();
            }
            Tag::TableRow => self.row.clear(),
            Tag::LineBreak => {
                if !ctx.in_preformatted {
                    self.out.push('\n');
                }
            }
            Tag::Anchor | Tag::Image => self.write_attrs(tag, element),
            _ => {}
        }
        ctx
    }

    fn leave(&mut self, tag: Tag, ctx: RenderContext) {
        match tag {
            Tag::Preformatted => self.out.push('\n'),
            Tag::Blockquote => self.out.push('\n'),
            Tag::UnorderedList | Tag::OrderedList => self.out.push('\n'),
            Tag::TableCell => {
                if ctx.in_table {
                    self.row.push("|".to_string());
                }
            }
            Tag::TableRow => {
                if ctx.in_table && !self.row.is_empty() {
                    self.write_indent(ctx.indent);
                    self.out.push_str(&self.row.join(" "));
                    self.out.push('\n');
                    self.row.clear();
                }
            }
            Tag::Table => self.out.push('\n'),
            _ => {}
        }
        if tag.is_block() && !ctx.in_preformatted {
            self.out.push('\n');
        }
    }

    /// Whitelisted attributes as bracketed `[key="value"]` tokens, in the
    /// node's own attribute order.
    fn write_attrs(&mut self, tag: Tag, element: &Element) {
        let whitelist = tag.attr_whitelist();
        for (key, value) in element.attrs() {
            if whitelist.contains(&key) {
                self.out.push_str(&format!("[{key}={value:?}]"));
            }
        }
    }

    fn write_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str("  ");
        }
    }
}

// ── Whitespace post-pass ─────────────────────────────────────────────────

static RE_NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// Collapse every whitespace run containing a newline into one `"\n"` and
/// drop any space left immediately before a newline.
fn collapse_whitespace(input: &str) -> String {
    let collapsed = RE_NEWLINE_RUN.replace_all(input, "\n");
    collapsed.replace(" \n", "\n")
}

// ── Tests ────────────────────────────────────────────────────────────────
