//! Terminal user interface for Lore

pub mod app;
pub mod entries;
pub mod list_scroll;
pub mod render;
pub mod resolver;
pub mod themes;

pub use app::run;
pub use themes::THEME_REGISTRY;
