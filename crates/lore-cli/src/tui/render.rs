//! Frame composition
//!
//! Blits the core's document-space draw commands into the terminal buffer
//! with the scroll offset applied, then draws the chrome around them: entry
//! list, scrollbar gutter, status bar.

use lore_core::{CellMetrics, DrawCmd, Fill, Style as CoreStyle};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::app::App;
use super::themes::Theme;

const LIST_WIDTH: u16 = 30;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [main, status] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());
    let [list, viewport] =
        Layout::horizontal([Constraint::Length(LIST_WIDTH), Constraint::Min(10)]).areas(main);
    draw_entry_list(frame, list, app);
    draw_viewport(frame, viewport, app);
    draw_status(frame, status, app);
}

fn base_style(theme: &Theme) -> Style {
    Style::default().bg(theme.background).fg(theme.text)
}

fn draw_entry_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = if app.filter.is_empty() && !app.filter_active {
        " Entries ".to_string()
    } else {
        format!(" Entries /{} ", app.filter)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(base_style(&app.theme));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.areas.entry_list = Some(inner);

    let entries = app.visible_entries();
    app.list.set_visible_height(inner.height as usize);
    app.list.set_total(entries.len());

    let buf = frame.buffer_mut();
    for (row, index) in app.list.visible_range().enumerate() {
        let Some(entry) = entries.get(index) else {
            break;
        };
        let style = if app.list.is_selected(index) {
            Style::default()
                .bg(app.theme.selection)
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD)
        } else {
            base_style(&app.theme)
        };
        let padded = format!("{:<width$}", entry.title, width = inner.width as usize);
        buf.set_stringn(
            inner.x,
            inner.y + row as u16,
            padded,
            inner.width as usize,
            style,
        );
    }
}

fn draw_viewport(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.current_title))
        .style(base_style(&app.theme));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.areas.viewport = Some(inner);
    if inner.width < 3 || inner.height < 1 {
        return;
    }

    // The last column is the scrollbar, with one column of gap before it.
    let content_width = i32::from(inner.width) - 2;
    app.view.resize(content_width, i32::from(inner.height));
    let output = app.view.paint(&CellMetrics);
    let offset = app.view.scroll().offset();

    let buf = frame.buffer_mut();
    for cmd in &output.commands {
        blit(buf, inner, content_width, offset, cmd, &app.theme);
    }
    draw_scrollbar(buf, inner, app);
}

fn blit(
    buf: &mut Buffer,
    inner: Rect,
    content_width: i32,
    offset: i32,
    cmd: &DrawCmd,
    theme: &Theme,
) {
    let height = i32::from(inner.height);
    match cmd {
        DrawCmd::Glyphs { x, y, text, style, .. } => {
            let row = y - offset;
            if row < 0 || row >= height || *x < 0 || *x >= content_width {
                return;
            }
            buf.set_stringn(
                inner.x + *x as u16,
                inner.y + row as u16,
                text,
                (content_width - x) as usize,
                text_style(style, theme),
            );
        }
        DrawCmd::Fill { rect, kind } => {
            let x0 = rect.x.max(0);
            let x1 = (rect.x + rect.w).min(content_width);
            let y0 = (rect.y - offset).max(0);
            let y1 = (rect.y + rect.h - offset).min(height);
            for row in y0..y1 {
                for col in x0..x1 {
                    let Some(cell) = buf.cell_mut((inner.x + col as u16, inner.y + row as u16))
                    else {
                        continue;
                    };
                    match kind {
                        Fill::CodeBackground => {
                            cell.set_bg(theme.code_background);
                        }
                        Fill::QuoteBar => {
                            cell.set_symbol("│");
                            cell.set_fg(theme.dim);
                        }
                        Fill::Rule => {
                            // Tall one-column fills are table separators.
                            let symbol = if rect.w == 1 && rect.h > 1 { "│" } else { "─" };
                            cell.set_symbol(symbol);
                            cell.set_fg(theme.rule);
                        }
                    }
                }
            }
        }
    }
}

fn text_style(style: &CoreStyle, theme: &Theme) -> Style {
    let mut tui = Style::default().fg(theme.text_color(style.color));
    if style.bold {
        tui = tui.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        tui = tui.add_modifier(Modifier::ITALIC);
    }
    if style.strikethrough {
        tui = tui.add_modifier(Modifier::CROSSED_OUT);
    }
    tui
}

fn draw_scrollbar(buf: &mut Buffer, inner: Rect, app: &App) {
    let x = inner.x + inner.width - 1;
    let thumb = app.view.scroll().thumb();
    for row in 0..inner.height {
        let y = i32::from(row);
        let Some(cell) = buf.cell_mut((x, inner.y + row)) else {
            continue;
        };
        if y >= thumb.y && y < thumb.y + thumb.height {
            cell.set_symbol("█");
            cell.set_fg(app.theme.scrollbar_thumb);
        } else {
            cell.set_symbol("░");
            cell.set_fg(app.theme.scrollbar_track);
        }
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some(status) = &app.status {
        status.clone()
    } else if let Some(link) = &app.hover {
        format!("open: {link}")
    } else {
        String::from("q quit  / filter  Enter open  r refresh  j/k scroll  g/G top/bottom")
    };
    let style = Style::default().bg(app.theme.selection).fg(app.theme.text);
    frame.render_widget(Paragraph::new(text).style(style), area);
}
