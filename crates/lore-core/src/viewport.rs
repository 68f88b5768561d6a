//! Document viewport
//!
//! [`DocView`] owns a bound document, its scroll state, and the
//! clickable-region registry, and translates pointer input into scrolls and
//! link activations. Layout is recomputed on every paint - document-space
//! output does not depend on the scroll offset - while regions are cached per
//! bind, since their coordinates never change between frames.

use crate::document::Document;
use crate::error::OpenError;
use crate::layout::commands::DrawCmd;
use crate::layout::engine::{render, LayoutResult};
use crate::layout::metrics::FontMetrics;
use crate::regions::RegionRegistry;
use crate::scroll::ScrollState;

/// A pointer event in viewport-local coordinates. `x` values at or past the
/// content width address the scrollbar track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: i32, y: i32 },
    ButtonDown { x: i32, y: i32 },
    ButtonUp { x: i32, y: i32 },
    Wheel { delta: f32 },
}

/// Outcome of dispatching one pointer event.
#[derive(Debug)]
pub enum Interaction {
    /// Nothing interactive under the event.
    Ignored,
    /// Scroll or drag state changed.
    Consumed,
    /// A clickable region dispatched its destination successfully.
    LinkOpened(String),
    /// A clickable region was hit but the opener refused; reported, never
    /// propagated as a panic or a corrupted pass.
    LinkFailed {
        destination: String,
        error: OpenError,
    },
}

impl Interaction {
    pub fn consumed(&self) -> bool {
        !matches!(self, Interaction::Ignored)
    }
}

/// Capability for opening link destinations, supplied by the embedder at
/// dispatch time. The core resolves which region was hit; what the
/// destination means is entirely the opener's business.
pub trait LinkOpener {
    fn open(&mut self, destination: &str) -> Result<(), OpenError>;
}

/// Output of [`DocView::paint`].
#[derive(Debug, Clone, PartialEq)]
pub struct PaintOutput {
    /// Draw commands in document space; apply the scroll offset when
    /// compositing.
    pub commands: Vec<DrawCmd>,
    pub content_height: i32,
}

/// A fixed-size viewport over one document.
pub struct DocView {
    doc: Option<Document>,
    width: i32,
    height: i32,
    scroll: ScrollState,
    registry: RegionRegistry,
    regions_valid: bool,
}

impl DocView {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            doc: None,
            width,
            height,
            scroll: ScrollState::new(height),
            registry: RegionRegistry::default(),
            regions_valid: false,
        }
    }

    /// Bind a document, resetting scroll position and cached regions.
    pub fn bind(&mut self, doc: Document) {
        self.doc = Some(doc);
        self.scroll.reset();
        self.registry.clear();
        self.regions_valid = false;
    }

    pub fn document(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.doc.as_ref().and_then(|d| d.title.as_deref())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Resize the viewport. The wrap width changes, so cached regions are
    /// invalid until the next paint.
    pub fn resize(&mut self, width: i32, height: i32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.scroll.set_viewport_height(height);
        self.registry.clear();
        self.regions_valid = false;
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    pub fn regions(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Run a full layout/paint pass over the bound document.
    ///
    /// The scroll range is recomputed from the measured content height after
    /// every pass, so wrapping changes can never leave a stale offset.
    pub fn paint<M: FontMetrics + ?Sized>(&mut self, metrics: &M) -> PaintOutput {
        let Some(doc) = &self.doc else {
            self.scroll.set_content_height(0);
            return PaintOutput {
                commands: Vec::new(),
                content_height: 0,
            };
        };
        let LayoutResult {
            commands,
            regions,
            content_height,
        } = render(&doc.root, self.width, metrics);
        self.scroll.set_content_height(content_height);
        if !self.regions_valid {
            self.registry.replace(regions);
            self.regions_valid = true;
        }
        PaintOutput {
            commands,
            content_height,
        }
    }

    /// Viewport-local point to document space: add the scroll offset.
    fn to_document(&self, x: i32, y: i32) -> (i32, i32) {
        (x, y + self.scroll.offset())
    }

    /// Tooltip lines for the region under a viewport-local point.
    pub fn tooltip_at(&self, x: i32, y: i32) -> Option<&[String]> {
        let (dx, dy) = self.to_document(x, y);
        self.registry.resolve(dx, dy).and_then(|r| r.tooltip.as_deref())
    }

    /// Dispatch one pointer event.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        opener: &mut dyn LinkOpener,
    ) -> Interaction {
        match event {
            PointerEvent::Wheel { delta } => {
                self.scroll.wheel(delta);
                Interaction::Consumed
            }
            PointerEvent::ButtonDown { x, y } => {
                if x >= self.width {
                    return if self.scroll.pointer_down(y) {
                        Interaction::Consumed
                    } else {
                        Interaction::Ignored
                    };
                }
                let (dx, dy) = self.to_document(x, y);
                let Some(region) = self.registry.resolve(dx, dy) else {
                    return Interaction::Ignored;
                };
                let destination = region.destination.clone();
                match opener.open(&destination) {
                    Ok(()) => Interaction::LinkOpened(destination),
                    Err(error) => {
                        tracing::warn!("failed to open `{destination}`: {error}");
                        Interaction::LinkFailed { destination, error }
                    }
                }
            }
            PointerEvent::Move { y, .. } => {
                if self.scroll.pointer_move(y) {
                    Interaction::Consumed
                } else {
                    Interaction::Ignored
                }
            }
            PointerEvent::ButtonUp { .. } => {
                if self.scroll.is_dragging() {
                    self.scroll.pointer_up();
                    Interaction::Consumed
                } else {
                    Interaction::Ignored
                }
            }
        }
    }
}
