//! Markdown document tree
//!
//! An immutable typed node tree produced once per document by the parser.
//! Nodes own their children and traversal is forward-only, so the renderer
//! never needs parent pointers or shared mutable state.

mod parser;

pub use parser::parse;

/// Attributes carried on a `List` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAttrs {
    pub ordered: bool,
    /// Starting number for ordered lists.
    pub start: u64,
    /// Marker delimiter for ordered lists, e.g. `.` in `3.`.
    pub delimiter: char,
    /// Tight lists render items without blank lines between them.
    pub tight: bool,
}

/// Every node kind the layout engine understands.
///
/// The set is closed: unknown markup degrades to `RawInline` / `RawBlock`
/// literals at parse time, never to a new variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    /// Heading with level 1-6.
    Heading(u8),
    Text(String),
    Emphasis,
    StrongEmphasis,
    Strikethrough,
    InlineCode(String),
    CodeBlock(String),
    /// Link with its destination.
    Link(String),
    /// Image with its source; rendered as an opaque block.
    Image(String),
    List(ListAttrs),
    ListItem,
    BlockQuote,
    ThematicBreak,
    Table,
    TableRow,
    TableCell,
    SoftBreak,
    HardBreak,
    RawInline(String),
    RawBlock(String),
}

/// A node in the document tree. Children are stored in document order; that
/// order drives wrapping, reading order, and click-region registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }
}

/// A parsed document plus its resolved display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
    /// Plain text of the first level-1 heading, if the document has one.
    pub title: Option<String>,
}

impl Document {
    /// Parse markdown source into a document.
    ///
    /// Parsing is total: malformed input degrades to literal text, it never
    /// fails.
    pub fn parse(source: &str) -> Self {
        let root = parser::parse(source);
        let title = first_heading_title(&root);
        Self { root, title }
    }
}

/// Concatenated text of the first level-1 heading.
pub fn first_heading_title(root: &Node) -> Option<String> {
    fn collect(node: &Node, out: &mut String) {
        if let NodeKind::Text(text) | NodeKind::InlineCode(text) = &node.kind {
            out.push_str(text);
        }
        for child in &node.children {
            collect(child, out);
        }
    }

    root.children
        .iter()
        .find(|node| matches!(node.kind, NodeKind::Heading(1)))
        .map(|heading| {
            let mut title = String::new();
            collect(heading, &mut title);
            title.trim().to_string()
        })
}
