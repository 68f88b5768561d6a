//! lore-core - markdown layout and interaction engine
//!
//! A single-pass layout+paint traversal over a typed markdown tree, plus the
//! scroll controller and clickable-region registry that make a document
//! viewport interactive.
//!
//! The crate is backend-agnostic: all text measurement goes through a
//! [`FontMetrics`] provider and output is a flat list of [`DrawCmd`]s in
//! document-space coordinates. Embedders blit the commands with the current
//! scroll offset applied and feed pointer input back through [`DocView`].

pub mod document;
pub mod error;
pub mod layout;
pub mod regions;
pub mod scroll;
pub mod viewport;

pub use document::{Document, ListAttrs, Node, NodeKind};
pub use error::OpenError;
pub use layout::commands::{DrawCmd, Fill, Rect};
pub use layout::engine::{render, LayoutResult};
pub use layout::metrics::{CellMetrics, FontFace, FontMetrics};
pub use layout::style::{Style, TextColor};
pub use regions::{ClickableRegion, RegionRegistry};
pub use scroll::{ScrollState, Thumb};
pub use viewport::{DocView, Interaction, LinkOpener, PaintOutput, PointerEvent};
