//! Active text attributes

/// Logical text color. Backends map these through a theme; the engine never
/// deals in concrete color values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextColor {
    #[default]
    Default,
    /// Tint applied inside block quotes.
    Quote,
    Link,
    Code,
}

/// Snapshot of the inline text attributes in effect at a point in the
/// traversal.
///
/// Scoped constructs (emphasis, links, quotes, headings) copy the snapshot,
/// mutate it for their children, and restore the copy on exit. The snapshot is
/// `Copy` so restoration is a plain assignment with no failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub color: TextColor,
}
