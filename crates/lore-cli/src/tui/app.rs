//! Application state and event loop
//!
//! Owns the entry store, the document viewport, and the chrome state, and
//! routes terminal events to them. Pointer events inside the viewport are
//! translated to viewport-local coordinates and dispatched through the core;
//! entry navigation requested by a click is applied after dispatch returns.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use lore_core::{DocView, Interaction, PointerEvent};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use ratatui::Terminal;

use super::entries::{display_title, EntryStore, EntrySummary, UNTITLED};
use super::list_scroll::ListScroll;
use super::render;
use super::resolver::LinkResolver;
use super::themes::Theme;

/// Rows of slack kept below the last line of a document.
const BOTTOM_PADDING: i32 = 2;
/// Rows scrolled per wheel notch.
const WHEEL_STEP: f32 = 3.0;

/// Screen areas recorded during the last draw, for mouse routing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutAreas {
    pub entry_list: Option<Rect>,
    /// Inner viewport area; its last column is the scrollbar.
    pub viewport: Option<Rect>,
}

pub struct App {
    pub store: EntryStore,
    pub view: DocView,
    pub theme: Theme,
    pub current_path: Option<PathBuf>,
    pub current_title: String,
    pub filter: String,
    pub filter_active: bool,
    pub list: ListScroll,
    pub areas: LayoutAreas,
    /// Destination under the mouse, surfaced in the status bar.
    pub hover: Option<String>,
    /// Transient message, e.g. a failed link open.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: EntryStore, theme: Theme) -> Self {
        let mut view = DocView::new(0, 0);
        view.scroll_mut().set_bottom_padding(BOTTOM_PADDING);
        // Wheel deltas arrive pre-scaled in rows.
        view.scroll_mut().set_sensitivity(1.0);
        Self {
            store,
            view,
            theme,
            current_path: None,
            current_title: UNTITLED.to_string(),
            filter: String::new(),
            filter_active: false,
            list: ListScroll::default(),
            areas: LayoutAreas::default(),
            hover: None,
            status: None,
            should_quit: false,
        }
    }

    /// Entries shown in the list pane, filter applied.
    pub fn visible_entries(&self) -> Vec<EntrySummary> {
        if self.filter.is_empty() {
            self.store.snapshot()
        } else {
            self.store.filtered(&self.filter)
        }
    }

    pub fn open_entry(&mut self, path: PathBuf) {
        match self.store.load(&path) {
            Ok(doc) => {
                self.current_title = display_title(&doc, &path);
                self.view.bind(doc);
                self.current_path = Some(path);
                self.hover = None;
                self.status = None;
            }
            Err(e) => {
                tracing::warn!("failed to load {}: {e}", path.display());
                self.status = Some(format!("could not load {}", path.display()));
            }
        }
    }

    fn open_selected(&mut self) {
        let entries = self.visible_entries();
        if let Some(entry) = entries.get(self.list.selected) {
            self.open_entry(entry.path.clone());
        }
    }

    fn sync_list(&mut self) {
        let total = self.visible_entries().len();
        self.list.set_total(total);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        if self.filter_active {
            match key.code {
                KeyCode::Esc => {
                    self.filter.clear();
                    self.filter_active = false;
                    self.sync_list();
                }
                KeyCode::Enter => self.filter_active = false,
                KeyCode::Backspace => {
                    self.filter.pop();
                    self.sync_list();
                }
                KeyCode::Char(c) => {
                    self.filter.push(c);
                    self.sync_list();
                }
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('/') => self.filter_active = true,
            KeyCode::Char('r') => self.store.refresh(),
            KeyCode::Down => self.list.next(),
            KeyCode::Up => self.list.prev(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('j') => self.view.scroll_mut().scroll_by(1),
            KeyCode::Char('k') => self.view.scroll_mut().scroll_by(-1),
            KeyCode::PageDown => {
                let page = self.view.scroll().viewport_height().saturating_sub(1);
                self.view.scroll_mut().scroll_by(page);
            }
            KeyCode::PageUp => {
                let page = self.view.scroll().viewport_height().saturating_sub(1);
                self.view.scroll_mut().scroll_by(-page);
            }
            KeyCode::Home | KeyCode::Char('g') => self.view.scroll_mut().scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.view.scroll_mut().scroll_to_bottom(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(list) = self.areas.entry_list {
                    if list.contains(Position::new(mouse.column, mouse.row)) {
                        let row = usize::from(mouse.row - list.y);
                        if let Some(index) = self.list.index_at_row(row) {
                            self.list.selected = index;
                            self.open_selected();
                        }
                        return;
                    }
                }
                if self.in_viewport(mouse.column, mouse.row) {
                    if let Some((x, y)) = self.viewport_local(mouse.column, mouse.row) {
                        self.dispatch_pointer(PointerEvent::ButtonDown { x, y });
                    }
                }
            }
            // Drags keep driving the scrollbar even when the pointer leaves
            // the viewport.
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((x, y)) = self.viewport_local(mouse.column, mouse.row) {
                    self.dispatch_pointer(PointerEvent::Move { x, y });
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some((x, y)) = self.viewport_local(mouse.column, mouse.row) {
                    self.dispatch_pointer(PointerEvent::ButtonUp { x, y });
                }
            }
            MouseEventKind::Moved => {
                if self.in_viewport(mouse.column, mouse.row) {
                    if let Some((x, y)) = self.viewport_local(mouse.column, mouse.row) {
                        self.hover = self
                            .view
                            .tooltip_at(x, y)
                            .and_then(|lines| lines.first().cloned());
                    }
                } else {
                    self.hover = None;
                }
            }
            MouseEventKind::ScrollDown => {
                if self.in_viewport(mouse.column, mouse.row) {
                    self.dispatch_pointer(PointerEvent::Wheel { delta: WHEEL_STEP });
                }
            }
            MouseEventKind::ScrollUp => {
                if self.in_viewport(mouse.column, mouse.row) {
                    self.dispatch_pointer(PointerEvent::Wheel { delta: -WHEEL_STEP });
                }
            }
            _ => {}
        }
    }

    fn in_viewport(&self, column: u16, row: u16) -> bool {
        self.areas
            .viewport
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Screen position to viewport-local coordinates. Unclamped, so drags
    /// past the edges still map (the core clamps the resulting offset).
    fn viewport_local(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        let inner = self.areas.viewport?;
        Some((
            i32::from(column) - i32::from(inner.x),
            i32::from(row) - i32::from(inner.y),
        ))
    }

    fn dispatch_pointer(&mut self, event: PointerEvent) {
        let mut resolver = LinkResolver::new(&self.store, self.current_path.as_deref());
        let interaction = self.view.handle_pointer(event, &mut resolver);
        let pending = resolver.pending_entry.take();
        if let Interaction::LinkFailed { destination, .. } = &interaction {
            self.status = Some(format!("could not open {destination}"));
        }
        if let Some(path) = pending {
            self.open_entry(path);
        }
    }
}

/// Bring up the terminal, run the viewer, and put everything back.
pub fn run(root: PathBuf, landing: &str, theme: Theme) -> Result<()> {
    let store = EntryStore::new(&root);
    store.refresh();

    let mut app = App::new(store, theme);
    let landing_path = root.join(landing);
    if landing_path.exists() {
        app.open_entry(landing_path);
    } else {
        tracing::info!("no landing entry at {}", landing_path.display());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render::draw(frame, app))?;
        if app.should_quit {
            return Ok(());
        }
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}
