//! Single-pass layout and paint traversal
//!
//! Walks the document tree once, top to bottom, word-wrapping as it draws.
//! There is no separate measure pass and no backtracking: every decision is
//! made with the pen state at hand. The pass owns all of its state, so
//! repeated passes over the same tree produce identical output.

use crate::document::{ListAttrs, Node, NodeKind};
use crate::layout::commands::{DrawCmd, Fill, Rect};
use crate::layout::cursor::Cursor;
use crate::layout::metrics::{size_to_width, wrap, FontFace, FontMetrics};
use crate::layout::style::{Style, TextColor};
use crate::regions::ClickableRegion;

/// Marker glyph for unordered list items.
const BULLET: &str = "\u{2022}";

/// Output of one layout/paint pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Paint instructions in emission order (document space).
    pub commands: Vec<DrawCmd>,
    /// Clickable regions in traversal order (document space).
    pub regions: Vec<ClickableRegion>,
    /// Total laid-out height, including the last partial line.
    pub content_height: i32,
}

/// Lay out and paint `root` at the given wrap width.
pub fn render<M: FontMetrics + ?Sized>(root: &Node, width: i32, metrics: &M) -> LayoutResult {
    let mut pass = Pass {
        metrics,
        cursor: Cursor::new(width),
        style: Style::default(),
        tight: false,
        scale: 1.0,
        scale_origin: 0,
        link: None,
        commands: Vec::new(),
        regions: Vec::new(),
    };
    pass.visit(root, false);
    pass.finish_line();
    LayoutResult {
        commands: pass.commands,
        regions: pass.regions,
        content_height: pass.cursor.y,
    }
}

/// Link bounds being captured while the link's children are visited.
struct LinkCapture {
    destination: String,
    bounds: Option<Rect>,
}

struct Pass<'a, M: ?Sized> {
    metrics: &'a M,
    cursor: Cursor,
    style: Style,
    /// Tightness of the innermost list being laid out.
    tight: bool,
    /// Heading transform: glyphs scale around `scale_origin` on the y axis.
    scale: f32,
    scale_origin: i32,
    link: Option<LinkCapture>,
    commands: Vec<DrawCmd>,
    regions: Vec<ClickableRegion>,
}

impl<M: FontMetrics + ?Sized> Pass<'_, M> {
    fn visit(&mut self, node: &Node, has_next: bool) {
        match &node.kind {
            NodeKind::Document => self.visit_children(node),
            NodeKind::Paragraph => {
                self.visit_children(node);
                self.line_break(has_next);
            }
            NodeKind::Text(text) => self.draw_text(text),
            NodeKind::Emphasis => self.scoped(|p| {
                p.style.italic = true;
                p.visit_children(node);
            }),
            NodeKind::StrongEmphasis => self.scoped(|p| {
                p.style.bold = true;
                p.visit_children(node);
            }),
            NodeKind::Strikethrough => self.scoped(|p| {
                p.style.strikethrough = true;
                p.visit_children(node);
            }),
            NodeKind::Heading(level) => self.heading(node, *level),
            NodeKind::BlockQuote => self.block_quote(node, has_next),
            NodeKind::InlineCode(lit) => self.inline_code(lit),
            NodeKind::CodeBlock(lit) => self.code_block(lit, has_next),
            NodeKind::List(attrs) => self.list(node, attrs, has_next),
            NodeKind::ListItem => self.list_item(node, has_next),
            NodeKind::Link(dest) => self.link(node, dest),
            NodeKind::Image(_) => {
                // Opaque block: the alt text renders between forced breaks.
                self.line_break(has_next);
                self.visit_children(node);
                self.line_break(has_next);
            }
            NodeKind::ThematicBreak => self.draw_rule(),
            NodeKind::Table => self.table(node, has_next),
            // Only meaningful under a Table; orphans just show their content.
            NodeKind::TableRow | NodeKind::TableCell => self.visit_children(node),
            NodeKind::SoftBreak => {
                self.cursor.x += self.metrics.space_width();
                if self.cursor.x > self.cursor.width {
                    self.finish_line();
                }
            }
            NodeKind::HardBreak => self.line_break(has_next),
            NodeKind::RawInline(lit) => {
                self.draw_text(lit);
                self.visit_children(node);
            }
            NodeKind::RawBlock(lit) => {
                self.draw_text(lit);
                self.visit_children(node);
                self.line_break(has_next);
            }
        }
    }

    fn visit_children(&mut self, node: &Node) {
        let last = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            self.visit(child, i < last);
        }
    }

    /// Run `f` with the current style snapshot saved; the snapshot is restored
    /// on exit, so scoped constructs can never leak attributes to siblings.
    fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        let saved = self.style;
        f(self);
        self.style = saved;
    }

    // -- pen movement ------------------------------------------------------

    /// Close the current line if anything is on it.
    fn finish_line(&mut self) {
        if self.cursor.x != 0 {
            self.cursor.y += self.metrics.line_height();
            self.cursor.x = 0;
        }
    }

    /// Block separator: close the line, and leave a gap when more siblings
    /// follow.
    fn line_break(&mut self, has_next: bool) {
        self.finish_line();
        if has_next {
            self.cursor.y += self.metrics.line_height();
        }
    }

    // -- emission ----------------------------------------------------------

    fn tx(&self, x: i32) -> i32 {
        if self.scale == 1.0 {
            x
        } else {
            (x as f32 * self.scale).round() as i32
        }
    }

    fn ty(&self, y: i32) -> i32 {
        if self.scale == 1.0 {
            y
        } else {
            self.scale_origin + ((y - self.scale_origin) as f32 * self.scale).round() as i32
        }
    }

    fn emit_text(&mut self, x: i32, y: i32, text: &str, face: FontFace) {
        if text.is_empty() {
            return;
        }
        let width = self.metrics.face_width(face, text);
        let mut style = self.style;
        if face == FontFace::Mono {
            style.color = TextColor::Code;
        }
        let rect = Rect {
            x: self.tx(x),
            y: self.ty(y),
            w: (width as f32 * self.scale).round() as i32,
            h: (self.metrics.line_height() as f32 * self.scale).round() as i32,
        };
        if let Some(capture) = &mut self.link {
            capture.bounds = Some(match capture.bounds {
                Some(bounds) => bounds.union(&rect),
                None => rect,
            });
        }
        self.commands.push(DrawCmd::Glyphs {
            x: rect.x,
            y: rect.y,
            text: text.to_string(),
            style,
            face,
            scale: self.scale,
        });
    }

    fn fill(&mut self, rect: Rect, kind: Fill) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        self.commands.push(DrawCmd::Fill { rect, kind });
    }

    // -- text --------------------------------------------------------------

    /// Greedy word-wrap of a text literal starting at the current pen.
    ///
    /// If the pen is mid-line and the first word cannot fit the remaining
    /// width, the line breaks before anything is drawn. After wrapping, the
    /// pen rests at the end of the last drawn line.
    fn draw_text(&mut self, text: &str) {
        let first_word = text
            .trim_start()
            .split([' ', '\n'])
            .next()
            .unwrap_or_default();
        if self.cursor.x != 0
            && self.cursor.width - self.cursor.x < self.metrics.string_width(first_word)
        {
            self.cursor.x = 0;
            self.cursor.y += self.metrics.line_height();
        }

        let avail = self.cursor.width - self.cursor.x;
        let mut cut = size_to_width(self.metrics, text, avail, FontFace::Proportional);
        if cut == 0 && !text.is_empty() && !text.starts_with('\n') {
            cut = text.chars().next().map_or(text.len(), char::len_utf8);
        }
        let first = &text[..cut];
        self.emit_text(
            self.cursor.base_x + self.cursor.x,
            self.cursor.y,
            first.trim(),
            FontFace::Proportional,
        );
        if cut >= text.len() {
            self.cursor.x += self.metrics.string_width(first);
            return;
        }

        let mut rest = &text[cut..];
        if let Some(c) = rest.chars().next() {
            if c == ' ' || c == '\n' {
                rest = &rest[c.len_utf8()..];
            }
        }
        let rest = rest.trim_start_matches(' ');
        self.cursor.y += self.metrics.line_height();
        let lines = wrap(self.metrics, rest, self.cursor.width, FontFace::Proportional);
        for line in &lines[..lines.len() - 1] {
            self.emit_text(self.cursor.base_x, self.cursor.y, line, FontFace::Proportional);
            self.cursor.y += self.metrics.line_height();
        }
        let last = &lines[lines.len() - 1];
        self.emit_text(self.cursor.base_x, self.cursor.y, last, FontFace::Proportional);
        self.cursor.x = self.metrics.string_width(last);
    }

    // -- blocks ------------------------------------------------------------

    /// Headings render their children at `1 + 1/level` scale (levels 1-4).
    /// Children lay out in unscaled space against a narrowed width; emitted
    /// coordinates are scaled around the heading's top edge, and the final
    /// pen advance accounts for the scaled height. Levels 1 and 2 get an
    /// underline rule.
    fn heading(&mut self, node: &Node, level: u8) {
        let scale = if level < 5 {
            1.0 + 1.0 / f32::from(level)
        } else {
            1.0
        };
        let old_width = self.cursor.width;
        let old_y = self.cursor.y;
        self.scoped(|p| {
            p.style.bold = true;
            p.cursor.width = (old_width as f32 / scale) as i32;
            let (prev_scale, prev_origin) = (p.scale, p.scale_origin);
            p.scale = scale;
            p.scale_origin = old_y;
            p.visit_children(node);
            p.scale = prev_scale;
            p.scale_origin = prev_origin;
        });
        self.cursor.width = old_width;
        let grown = self.cursor.y - old_y + self.metrics.line_height();
        self.cursor.y = old_y + (grown as f32 * scale) as i32;
        if level < 3 {
            self.draw_rule();
        }
        self.cursor.x = 0;
    }

    fn draw_rule(&mut self) {
        let inset = self.metrics.rule_inset();
        self.fill(
            Rect {
                x: inset,
                y: self.cursor.y + self.metrics.line_height() / 2,
                w: self.cursor.width - inset * 2,
                h: 1,
            },
            Fill::Rule,
        );
        self.cursor.y += self.metrics.line_height();
        self.cursor.x = 0;
    }

    /// Indented, tinted, with a vertical bar spanning the quote's final
    /// measured height.
    fn block_quote(&mut self, node: &Node, has_next: bool) {
        let old_y = self.cursor.y;
        let bar_x = self.cursor.base_x;
        let indent = self.metrics.quote_indent();
        self.scoped(|p| {
            p.style.color = TextColor::Quote;
            p.cursor.base_x += indent;
            p.visit_children(node);
            p.cursor.base_x -= indent;
        });
        self.finish_line();
        self.fill(
            Rect {
                x: bar_x,
                y: old_y,
                w: (indent / 4).max(1),
                h: self.cursor.y - old_y,
            },
            Fill::QuoteBar,
        );
        self.line_break(has_next);
    }

    /// Monospace run flowing inline, with a background rectangle fitted to
    /// each drawn line (never the full content width).
    fn inline_code(&mut self, lit: &str) {
        let bg_height = (self.metrics.line_height() - 1).max(1);
        let avail = self.cursor.width - self.cursor.x;
        let cut = size_to_width(self.metrics, lit, avail, FontFace::Mono);

        if cut >= lit.len() {
            let width = self.metrics.mono_string_width(lit);
            self.fill(
                Rect {
                    x: self.cursor.base_x + self.cursor.x,
                    y: self.cursor.y,
                    w: width,
                    h: bg_height,
                },
                Fill::CodeBackground,
            );
            self.emit_text(
                self.cursor.base_x + self.cursor.x,
                self.cursor.y,
                lit,
                FontFace::Mono,
            );
            self.cursor.x += width;
            return;
        }

        let first = &lit[..cut];
        self.fill(
            Rect {
                x: self.cursor.base_x + self.cursor.x,
                y: self.cursor.y,
                w: self.metrics.mono_string_width(first),
                h: bg_height,
            },
            Fill::CodeBackground,
        );
        self.emit_text(
            self.cursor.base_x + self.cursor.x,
            self.cursor.y,
            first,
            FontFace::Mono,
        );
        let mut rest = &lit[cut..];
        if let Some(c) = rest.chars().next() {
            if c == ' ' || c == '\n' {
                rest = &rest[c.len_utf8()..];
            }
        }
        for line in wrap(self.metrics, rest, self.cursor.width, FontFace::Mono) {
            self.cursor.y += self.metrics.line_height();
            let width = self.metrics.mono_string_width(&line);
            self.fill(
                Rect {
                    x: self.cursor.base_x,
                    y: self.cursor.y,
                    w: width,
                    h: bg_height,
                },
                Fill::CodeBackground,
            );
            self.emit_text(self.cursor.base_x, self.cursor.y, &line, FontFace::Mono);
            self.cursor.x = width;
        }
    }

    /// One full-width background panel behind the whole block, monospace
    /// lines inside with symmetric padding.
    fn code_block(&mut self, lit: &str, has_next: bool) {
        let lh = self.metrics.line_height();
        let pad = self.metrics.code_padding();
        let lit = lit.strip_suffix('\n').unwrap_or(lit);
        let old_base = self.cursor.base_x;
        let old_width = self.cursor.width;

        self.cursor.base_x += pad;
        self.cursor.width -= pad * 2;
        self.cursor.y += pad;
        let lines = wrap(self.metrics, lit, self.cursor.width, FontFace::Mono);
        self.fill(
            Rect {
                x: old_base,
                y: self.cursor.y - pad,
                w: old_width,
                h: lines.len() as i32 * lh + pad * 2,
            },
            Fill::CodeBackground,
        );
        for line in &lines {
            self.emit_text(self.cursor.base_x, self.cursor.y, line, FontFace::Mono);
            self.cursor.y += lh;
        }
        self.cursor.y += pad;
        self.cursor.base_x = old_base;
        self.cursor.width = old_width;
        self.line_break(has_next);
    }

    /// Indents by one level and hands each item its marker: `•` for bullets,
    /// `start`, `start+1`, ... plus the delimiter for ordered lists. The
    /// counter advances once per top-level child, so nested lists never
    /// disturb it.
    fn list(&mut self, node: &Node, attrs: &ListAttrs, has_next: bool) {
        let indent = self.metrics.list_indent();
        self.cursor.base_x += indent;
        self.cursor.width -= indent;
        self.cursor.x = 0;
        let old_tight = self.tight;
        self.tight = attrs.tight;

        let last = node.children.len().saturating_sub(1);
        let mut number = attrs.start;
        for (i, item) in node.children.iter().enumerate() {
            self.cursor.marker = Some(if attrs.ordered {
                let marker = format!("{}{}", number, attrs.delimiter);
                number += 1;
                marker
            } else {
                BULLET.to_string()
            });
            self.visit(item, i < last);
        }

        self.tight = old_tight;
        self.cursor.base_x -= indent;
        self.cursor.width += indent;
        self.line_break(has_next);
        self.cursor.marker = None;
    }

    fn list_item(&mut self, node: &Node, has_next: bool) {
        if let Some(marker) = self.cursor.marker.take() {
            // Markers sit in the indent gutter and ignore inline styling.
            let saved = self.style;
            self.style = Style::default();
            self.emit_text(
                self.cursor.base_x - self.metrics.list_indent(),
                self.cursor.y,
                &marker,
                FontFace::Proportional,
            );
            self.style = saved;
        }
        self.visit_children(node);
        if self.tight {
            self.finish_line();
        } else {
            self.line_break(has_next);
        }
    }

    /// Link text renders in the link color; the union of its glyph rectangles
    /// becomes one clickable region carrying the destination.
    fn link(&mut self, node: &Node, dest: &str) {
        let outer = self.link.take();
        self.link = Some(LinkCapture {
            destination: dest.to_string(),
            bounds: None,
        });
        self.scoped(|p| {
            p.style.color = TextColor::Link;
            p.visit_children(node);
        });
        if let Some(capture) = self.link.take() {
            if let Some(bounds) = capture.bounds {
                self.regions.push(ClickableRegion {
                    bounds,
                    tooltip: Some(vec![capture.destination.clone()]),
                    destination: capture.destination,
                });
            }
        }
        self.link = outer;
    }

    /// Column count comes from the first row; every row gets an equal share
    /// of the width minus per-cell padding. Rows are as tall as their tallest
    /// cell; short rows leave trailing cells blank.
    fn table(&mut self, node: &Node, has_next: bool) {
        let cols = node.children.first().map_or(0, |row| row.children.len()) as i32;
        if cols == 0 {
            self.line_break(has_next);
            return;
        }
        let last = node.children.len().saturating_sub(1);
        for (i, row) in node.children.iter().enumerate() {
            self.table_row(row, cols, i == last);
        }
        self.line_break(has_next);
    }

    fn table_row(&mut self, row: &Node, cols: i32, is_last: bool) {
        let pad = self.metrics.cell_padding();
        let old_base = self.cursor.base_x;
        let old_width = self.cursor.width;
        let col_width = old_width / cols;
        let start_y = self.cursor.y;

        self.fill(
            Rect { x: old_base, y: start_y, w: old_width, h: 1 },
            Fill::Rule,
        );

        self.cursor.width = col_width - pad * 2;
        self.cursor.base_x += pad;
        self.cursor.x = 0;
        self.cursor.y = start_y + pad;
        let mut max_y = self.cursor.y;
        for i in 0..cols {
            if let Some(cell) = row.children.get(i as usize) {
                self.visit_children(cell);
            }
            self.finish_line();
            max_y = max_y.max(self.cursor.y);
            self.cursor.base_x += col_width;
            self.cursor.y = start_y + pad;
        }

        self.cursor.y = max_y;
        self.cursor.base_x = old_base;
        self.cursor.width = old_width;
        self.cursor.x = 0;

        for i in 0..cols {
            self.fill(
                Rect {
                    x: old_base + col_width * i,
                    y: start_y,
                    w: 1,
                    h: max_y - start_y,
                },
                Fill::Rule,
            );
        }
        self.fill(
            Rect {
                x: old_base + old_width - 1,
                y: start_y,
                w: 1,
                h: max_y - start_y,
            },
            Fill::Rule,
        );
        if is_last {
            self.fill(
                Rect { x: old_base, y: max_y, w: old_width, h: 1 },
                Fill::Rule,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::layout::metrics::CellMetrics;

    /// Fixed-width pixel metrics: 6px glyphs, 4px mono, 9px lines.
    struct PxMetrics;

    impl FontMetrics for PxMetrics {
        fn char_width(&self, _c: char) -> i32 {
            6
        }
        fn mono_char_width(&self, _c: char) -> i32 {
            4
        }
        fn line_height(&self) -> i32 {
            9
        }
        fn code_padding(&self) -> i32 {
            0
        }
    }

    fn glyph_runs(result: &LayoutResult) -> Vec<(&str, Style, i32, i32)> {
        result
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Glyphs { x, y, text, style, .. } => {
                    Some((text.as_str(), *style, *x, *y))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn repeated_passes_are_identical() {
        let doc = Document::parse(
            "# Title\n\nSome *styled* text with [a link](x.md).\n\n- one\n- two\n",
        );
        let a = render(&doc.root, 60, &CellMetrics);
        let b = render(&doc.root, 60, &CellMetrics);
        assert_eq!(a, b);
    }

    #[test]
    fn style_restored_after_scoped_constructs() {
        let doc = Document::parse("plain **bold** plain again\n");
        let result = render(&doc.root, 200, &CellMetrics);
        let runs = glyph_runs(&result);
        assert_eq!(runs[0].0, "plain");
        assert!(!runs[0].1.bold);
        assert_eq!(runs[1].0, "bold");
        assert!(runs[1].1.bold);
        assert!(!runs[2].1.bold);
    }

    #[test]
    fn quote_tint_does_not_leak() {
        let doc = Document::parse("> quoted\n\nafter\n");
        let result = render(&doc.root, 200, &CellMetrics);
        let runs = glyph_runs(&result);
        assert_eq!(runs[0].1.color, TextColor::Quote);
        assert_eq!(runs[1].1.color, TextColor::Default);
    }

    #[test]
    fn heading_scales_and_underlines() {
        let doc = Document::parse("# Hi\n");
        let result = render(&doc.root, 400, &PxMetrics);
        let runs = glyph_runs(&result);
        assert_eq!(runs[0].0, "Hi");
        assert!(runs[0].1.bold);
        // Level 1 scale is 2.0: one 9px line advances the pen 18px, then the
        // rule advances one more line.
        assert!(result
            .commands
            .iter()
            .any(|c| matches!(c, DrawCmd::Fill { kind: Fill::Rule, .. })));
        assert_eq!(result.content_height, 18 + 9);
    }

    #[test]
    fn deep_headings_are_unscaled() {
        let doc = Document::parse("##### deep\n");
        let result = render(&doc.root, 400, &PxMetrics);
        match &result.commands[0] {
            DrawCmd::Glyphs { scale, .. } => assert_eq!(*scale, 1.0),
            other => panic!("expected glyphs, got {other:?}"),
        }
        // No rule below level 2.
        assert!(!result
            .commands
            .iter()
            .any(|c| matches!(c, DrawCmd::Fill { kind: Fill::Rule, .. })));
    }

    #[test]
    fn first_word_breaks_before_drawing() {
        // Width 10: "aaaa" (4) then "bbbbbbb" (7) cannot fit the remainder,
        // so it starts on a fresh line instead of being split.
        let doc = Document::parse("aaaa bbbbbbb\n");
        let result = render(&doc.root, 10, &CellMetrics);
        let runs = glyph_runs(&result);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "aaaa");
        assert_eq!(runs[1].0, "bbbbbbb");
        assert_eq!(runs[1].2, 0);
        assert!(runs[1].3 > runs[0].3);
    }

    #[test]
    fn styled_first_word_breaks_from_mid_line() {
        // "aaaa " leaves the pen at column 5; the bold "bbbbbbb" (7 wide)
        // cannot fit the remaining 5 columns and must start a fresh line
        // whole, not split.
        let doc = Document::parse("aaaa **bbbbbbb**\n");
        let result = render(&doc.root, 10, &CellMetrics);
        let runs = glyph_runs(&result);
        let bold = runs
            .iter()
            .find(|r| r.0 == "bbbbbbb")
            .expect("bold run drawn");
        assert!(bold.1.bold);
        assert_eq!(bold.2, 0);
        assert!(bold.3 > runs[0].3);
    }

    #[test]
    fn wrapped_lines_respect_width() {
        let doc = Document::parse("words of modest size flowing onward forever more\n");
        for width in [8, 12, 20, 30] {
            let result = render(&doc.root, width, &CellMetrics);
            for (text, ..) in glyph_runs(&result) {
                assert!(
                    CellMetrics.string_width(text) <= width,
                    "line {text:?} exceeds width {width}"
                );
            }
        }
    }

    #[test]
    fn ordered_numbering_advances_per_item() {
        let doc = Document::parse("3. three\n4. four\n5. five\n");
        let result = render(&doc.root, 200, &CellMetrics);
        let texts: Vec<&str> = glyph_runs(&result).iter().map(|r| r.0).collect();
        assert!(texts.contains(&"3."));
        assert!(texts.contains(&"4."));
        assert!(texts.contains(&"5."));
    }

    #[test]
    fn nested_list_does_not_disturb_numbering() {
        let doc = Document::parse("1. one\n   - sub\n2. two\n");
        let result = render(&doc.root, 200, &CellMetrics);
        let texts: Vec<&str> = glyph_runs(&result).iter().map(|r| r.0).collect();
        assert!(texts.contains(&"1."));
        assert!(texts.contains(&BULLET));
        assert!(texts.contains(&"2."));
        assert!(!texts.contains(&"3."));
    }

    #[test]
    fn table_columns_share_width_equally() {
        let doc = Document::parse("|aa|bb|cc|\n|-|-|-|\n|x|y|z|\n");
        let result = render(&doc.root, 60, &CellMetrics);
        let runs = glyph_runs(&result);
        let xs: Vec<i32> = ["x", "y", "z"]
            .iter()
            .map(|t| runs.iter().find(|r| r.0 == *t).map(|r| r.2).unwrap_or(-1))
            .collect();
        // 60 / 3 = 20 per column, content offset by the cell padding.
        assert_eq!(xs, vec![1, 21, 41]);
    }

    #[test]
    fn short_table_rows_render_blank_cells() {
        let doc = Document::parse("|a|b|c|\n|-|-|-|\n|1|2|\n");
        let result = render(&doc.root, 60, &CellMetrics);
        let texts: Vec<&str> = glyph_runs(&result).iter().map(|r| r.0).collect();
        assert!(texts.contains(&"1"));
        assert!(texts.contains(&"2"));
    }

    #[test]
    fn code_block_wraps_with_single_panel() {
        // 500 mono chars at width 200 with 4px glyphs: 50 chars per line,
        // ceil(2000 / 200) = 10 lines.
        let source = format!("```\n{}\n```\n", "x".repeat(500));
        let doc = Document::parse(&source);
        let result = render(&doc.root, 200, &PxMetrics);
        let lines = glyph_runs(&result).len();
        assert_eq!(lines, 10);
        let panels: Vec<&DrawCmd> = result
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Fill { kind: Fill::CodeBackground, .. }))
            .collect();
        assert_eq!(panels.len(), 1);
        match panels[0] {
            DrawCmd::Fill { rect, .. } => {
                assert_eq!(rect.w, 200);
                assert_eq!(rect.h, 10 * 9);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn inline_code_backgrounds_fit_each_line() {
        let source = format!("`{}`\n", "y".repeat(120));
        let doc = Document::parse(&source);
        // Width 200, 4px mono: 50 chars on the first line, 50, then 20.
        let result = render(&doc.root, 200, &PxMetrics);
        let mut backgrounds = 0;
        for cmd in &result.commands {
            if let DrawCmd::Fill { rect, kind: Fill::CodeBackground } = cmd {
                backgrounds += 1;
                assert!(rect.w <= 200);
            }
        }
        assert_eq!(backgrounds, 3);
    }

    #[test]
    fn link_region_covers_its_glyphs() {
        let doc = Document::parse("Hello [world](./other.md).\n");
        let result = render(&doc.root, 400, &PxMetrics);
        assert_eq!(result.regions.len(), 1);
        let region = &result.regions[0];
        assert_eq!(region.destination, "./other.md");
        let world = glyph_runs(&result)
            .into_iter()
            .find(|r| r.0 == "world")
            .map(|r| (r.2, r.3));
        let (x, y) = world.expect("link text drawn");
        assert!(region.bounds.contains(x, y));
        assert_eq!(region.tooltip.as_deref(), Some(&["./other.md".to_string()][..]));
    }

    #[test]
    fn soft_break_is_a_space_until_the_margin() {
        let doc = Document::parse("one\ntwo\n");
        let result = render(&doc.root, 200, &CellMetrics);
        let runs = glyph_runs(&result);
        assert_eq!(runs[0].3, runs[1].3, "soft break stays on the line");
        assert_eq!(runs[1].2, 4, "one space between the runs");
    }

    #[test]
    fn hard_break_forces_a_new_line() {
        let doc = Document::parse("one  \ntwo\n");
        let result = render(&doc.root, 200, &CellMetrics);
        let runs = glyph_runs(&result);
        assert!(runs[1].3 > runs[0].3);
    }

    #[test]
    fn quote_bar_spans_quote_height() {
        let doc = Document::parse("> a\n> b\n");
        let result = render(&doc.root, 6, &CellMetrics);
        let bar = result.commands.iter().find_map(|c| match c {
            DrawCmd::Fill { rect, kind: Fill::QuoteBar } => Some(*rect),
            _ => None,
        });
        let bar = bar.expect("quote bar drawn");
        assert_eq!(bar.x, 0);
        assert_eq!(bar.y, 0);
        assert!(bar.h >= 1);
    }

    #[test]
    fn content_height_counts_partial_last_line() {
        let doc = Document::parse("just one line\n");
        let result = render(&doc.root, 200, &CellMetrics);
        assert_eq!(result.content_height, 1);
    }
}
