//! Layout and paint
//!
//! Everything between the document tree and the draw-command list: text
//! measurement, the pen cursor, the style snapshot, and the single-pass
//! traversal engine.

pub mod commands;
pub mod cursor;
pub mod engine;
pub mod metrics;
pub mod style;
