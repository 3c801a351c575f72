#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

pub use config::{Config, LayoutConfig, load_config};
pub use layout::{Layout, LayoutError, compute_layout};
pub use render::{DrawOp, emit_draw_ops};
pub use theme::Theme;

#[cfg(feature = "cli")]
pub use cli::run;
