// config.rs - Command line / environment configuration

use clap::{Parser, ValueEnum};
use thiserror::Error;
use universe::{Seed, UniverseError};

use crate::geometry::CanvasGeometry;
use crate::playback::TICKS_PER_FRAME_RANGE;
use crate::render::Palette;

/// Largest canvas side we are willing to upload as one texture.
pub const MAX_CANVAS_SIDE: usize = 8192;
pub const MAX_CELL_SIZE: usize = 64;

pub const DEFAULT_WIDTH: usize = 128;
pub const DEFAULT_HEIGHT: usize = 128;
pub const DEFAULT_CELL_SIZE: usize = 5;
pub const DEFAULT_TICKS_PER_FRAME: f64 = 1.0;
pub const DEFAULT_PATTERN: &str = "Glider";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedKind {
    /// Every second and every seventh cell alive.
    Classic,
    Empty,
    /// About a third of the cells alive, from `--rng-seed`.
    Random,
    /// The pattern named by `--pattern`, centred.
    Pattern,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1 (got {width}x{height})")]
    EmptyGrid { width: usize, height: usize },
    #[error("cell size must be between 1 and {max} pixels (got {cell_size})")]
    CellSize { cell_size: usize, max: usize },
    #[error("a {width}x{height} grid with {cell_size}px cells does not fit in a {max}px canvas")]
    CanvasTooLarge {
        width: usize,
        height: usize,
        cell_size: usize,
        max: usize,
    },
    #[error(transparent)]
    Universe(#[from] UniverseError),
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "conway-view",
    version,
    about = "Interactive Game of Life viewer with frame-rate independent speed control"
)]
pub struct ViewConfig {
    /// Grid columns.
    #[arg(long, env = "CONWAY_VIEW_WIDTH", default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid rows.
    #[arg(long, env = "CONWAY_VIEW_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Pixel size of one cell, not counting its border.
    #[arg(long, env = "CONWAY_VIEW_CELL_SIZE", default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: usize,

    /// Generations per displayed frame; fractions spread one generation over several frames.
    #[arg(
        long,
        env = "CONWAY_VIEW_TICKS_PER_FRAME",
        default_value_t = DEFAULT_TICKS_PER_FRAME,
        value_parser = parse_ticks_per_frame
    )]
    pub ticks_per_frame: f64,

    /// Initial population.
    #[arg(long, value_enum, env = "CONWAY_VIEW_SEED", default_value_t = SeedKind::Classic)]
    pub seed: SeedKind,

    /// Pattern used by `--seed pattern`.
    #[arg(long, env = "CONWAY_VIEW_PATTERN", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Seed value used by `--seed random`.
    #[arg(long, env = "CONWAY_VIEW_RNG_SEED", default_value_t = 0)]
    pub rng_seed: u64,

    /// Draw set bits in the dead colour and clear bits in the live colour.
    #[arg(long, env = "CONWAY_VIEW_INVERTED_PALETTE")]
    pub inverted_palette: bool,

    /// Pause when the universe repeats one of its recent states.
    #[arg(long, env = "CONWAY_VIEW_STOP_ON_CYCLE")]
    pub stop_on_cycle: bool,

    /// Open paused instead of playing immediately.
    #[arg(long, env = "CONWAY_VIEW_START_PAUSED")]
    pub start_paused: bool,

    /// Run this many frames without a window, log a summary and exit.
    #[arg(long, env = "CONWAY_VIEW_HEADLESS_FRAMES")]
    pub headless_frames: Option<u64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            ticks_per_frame: DEFAULT_TICKS_PER_FRAME,
            seed: SeedKind::Classic,
            pattern: DEFAULT_PATTERN.to_string(),
            rng_seed: 0,
            inverted_palette: false,
            stop_on_cycle: false,
            start_paused: false,
            headless_frames: None,
        }
    }
}

impl ViewConfig {
    /// Canvas layout, checked against [`MAX_CANVAS_SIDE`].
    pub fn geometry(&self) -> Result<CanvasGeometry, ConfigError> {
        let (width, height, cell_size) = (self.width, self.height, self.cell_size);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if cell_size == 0 || cell_size > MAX_CELL_SIZE {
            return Err(ConfigError::CellSize {
                cell_size,
                max: MAX_CELL_SIZE,
            });
        }

        let fits = |cells: usize| {
            (cell_size + 1)
                .checked_mul(cells)
                .and_then(|side| side.checked_add(1))
                .is_some_and(|side| side <= MAX_CANVAS_SIDE)
        };
        if !fits(width) || !fits(height) {
            return Err(ConfigError::CanvasTooLarge {
                width,
                height,
                cell_size,
                max: MAX_CANVAS_SIDE,
            });
        }

        Ok(CanvasGeometry::new(width, height, cell_size))
    }

    pub fn initial_seed(&self) -> Result<Seed, ConfigError> {
        Ok(match self.seed {
            SeedKind::Classic => Seed::Classic,
            SeedKind::Empty => Seed::Empty,
            SeedKind::Random => Seed::Random(self.rng_seed),
            SeedKind::Pattern => Seed::pattern(&self.pattern)?,
        })
    }

    pub fn palette(&self) -> Palette {
        if self.inverted_palette {
            Palette::inverted()
        } else {
            Palette::standard()
        }
    }
}

fn parse_ticks_per_frame(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("`{raw}` is not a number: {err}"))?;
    if !value.is_finite() || !TICKS_PER_FRAME_RANGE.contains(&value) {
        return Err(format!(
            "must be between {} and {}",
            TICKS_PER_FRAME_RANGE.start(),
            TICKS_PER_FRAME_RANGE.end()
        ));
    }
    Ok(value)
}
