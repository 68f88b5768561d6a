//! Event-stream to tree conversion
//!
//! pulldown-cmark emits a flat event stream; the layout engine wants a tree it
//! can traverse with explicit nesting. The builder keeps a stack of open
//! nodes: `Start` pushes, `End` pops and attaches. Every event is handled, so
//! conversion is total and order-preserving.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

use super::{ListAttrs, Node, NodeKind};

/// Default marker delimiter for ordered lists; the parser does not surface
/// the source delimiter.
const ORDERED_DELIMITER: char = '.';

/// Parse markdown source into a document tree rooted at a `Document` node.
pub fn parse(source: &str) -> Node {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut stack = vec![Node::new(NodeKind::Document)];

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(tag) => stack.push(Node::new(start_kind(&tag))),
            Event::End(_) => {
                if stack.len() > 1 {
                    let node = finish(stack.pop().unwrap_or_else(|| Node::new(NodeKind::Document)));
                    attach(&mut stack, node);
                }
            }
            Event::Text(text) => literal(&mut stack, &text),
            Event::Code(code) => {
                attach(&mut stack, Node::new(NodeKind::InlineCode(code.into_string())));
            }
            Event::Html(html) => literal(&mut stack, &html),
            Event::InlineHtml(html) => {
                attach(&mut stack, Node::new(NodeKind::RawInline(html.into_string())));
            }
            Event::Rule => attach(&mut stack, Node::new(NodeKind::ThematicBreak)),
            Event::SoftBreak => attach(&mut stack, Node::new(NodeKind::SoftBreak)),
            Event::HardBreak => attach(&mut stack, Node::new(NodeKind::HardBreak)),
            Event::FootnoteReference(name) => {
                attach(&mut stack, Node::new(NodeKind::Text(format!("[^{name}]"))));
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                attach(&mut stack, Node::new(NodeKind::Text(marker.to_string())));
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                attach(&mut stack, Node::new(NodeKind::RawInline(math.into_string())));
            }
        }
    }

    // Balance any unclosed containers so malformed input still yields a tree.
    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            attach(&mut stack, finish(node));
        }
    }
    stack.pop().unwrap_or_else(|| Node::new(NodeKind::Document))
}

fn start_kind(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading(heading_level(*level)),
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(_) => NodeKind::CodeBlock(String::new()),
        Tag::List(start) => NodeKind::List(ListAttrs {
            ordered: start.is_some(),
            start: start.unwrap_or(1),
            delimiter: ORDERED_DELIMITER,
            tight: true,
        }),
        Tag::Item => NodeKind::ListItem,
        Tag::Table(_) => NodeKind::Table,
        // The header row is just the first row; it gets no special styling.
        Tag::TableHead | Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::StrongEmphasis,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link { dest_url, .. } => NodeKind::Link(dest_url.to_string()),
        Tag::Image { dest_url, .. } => NodeKind::Image(dest_url.to_string()),
        Tag::HtmlBlock => NodeKind::RawBlock(String::new()),
        // Extensions we do not enable still need a total mapping; a plain
        // container keeps their text visible.
        _ => NodeKind::Paragraph,
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Text events inside code and html blocks accumulate into the literal;
/// elsewhere they become `Text` nodes.
fn literal(stack: &mut Vec<Node>, text: &str) {
    if let Some(open) = stack.last_mut() {
        match &mut open.kind {
            NodeKind::CodeBlock(lit) | NodeKind::RawBlock(lit) => {
                lit.push_str(text);
                return;
            }
            _ => {}
        }
    }
    attach(stack, Node::new(NodeKind::Text(text.to_string())));
}

/// Post-processing applied when a container closes.
///
/// Lists: the parser does not surface tightness, so it is derived. A loose
/// list wraps item content in paragraphs; a tight one does not.
fn finish(mut node: Node) -> Node {
    if let NodeKind::List(attrs) = &mut node.kind {
        attrs.tight = !node.children.iter().any(|item| {
            matches!(
                item.children.first().map(|c| &c.kind),
                Some(NodeKind::Paragraph)
            )
        });
    }
    node
}

fn attach(stack: &mut [Node], node: Node) {
    if let Some(open) = stack.last_mut() {
        open.children.push(node);
    }
}
