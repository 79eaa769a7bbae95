// lib.rs - Presentation and playback layer for a Game of Life universe

pub mod cells;
pub mod config;
pub mod coords;
pub mod engine;
pub mod frames;
pub mod geometry;
pub mod playback;
pub mod render;
pub mod ui;
pub mod view;

pub use cells::{StateView, bit_is_set};
pub use config::{ConfigError, SeedKind, ViewConfig};
pub use coords::{CellCoord, cell_at};
pub use engine::Engine;
pub use frames::{FrameHandle, FrameQueue, FrameScheduler, RepaintFrames};
pub use geometry::CanvasGeometry;
pub use playback::{FrameOutcome, PlaybackController, PlaybackState, TickAccumulator};
pub use render::{Canvas, GridLine, GridRenderer, Palette, PixelCanvas};
pub use ui::LifeApp;
pub use view::LifeView;
