// lib.rs - Bit-packed Conway universe with row coroutines
//
// Each generation is computed by spawning one task per row on a
// current-thread tokio runtime. Rows read a frozen snapshot of the
// previous generation and yield cooperatively while they work.

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::task::JoinSet;
use tracing::{debug, error};

mod error;
pub mod grid;
pub mod patterns;

pub use error::UniverseError;
pub use grid::{MAX_CELLS, PackedCells, packed_len};
pub use patterns::{PATTERNS, Pattern};

/// How many recent states are remembered for cycle detection.
pub const HISTORY_LEN: usize = 10;

/// A row task yields back to the scheduler after this many cells.
const YIELD_EVERY: usize = 64;

/// Initial population of a universe.
#[derive(Debug, Clone, Copy)]
pub enum Seed {
    Empty,
    /// Cell `i` starts alive iff `i % 2 == 0 || i % 7 == 0`.
    Classic,
    /// Roughly a third of the cells alive, reproducible from the seed value.
    Random(u64),
    /// A named pattern centred on an otherwise empty grid.
    Pattern(&'static Pattern),
}

impl Seed {
    pub fn pattern(name: &str) -> Result<Self, UniverseError> {
        Pattern::find(name)
            .map(Seed::Pattern)
            .ok_or_else(|| UniverseError::UnknownPattern(name.to_string()))
    }
}

pub struct Universe {
    width: usize,
    height: usize,
    cells: Arc<PackedCells>,
    generation: u64,
    history: VecDeque<u64>,
    cycling: bool,
    runtime: Runtime,
}

impl Universe {
    /// An empty `width` x `height` universe.
    pub fn new(width: usize, height: usize) -> Result<Self, UniverseError> {
        if width == 0 || height == 0 {
            return Err(UniverseError::EmptyDimension { width, height });
        }
        let len = width
            .checked_mul(height)
            .filter(|&len| len <= MAX_CELLS)
            .ok_or(UniverseError::TooLarge { width, height })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(UniverseError::Runtime)?;

        let mut universe = Self {
            width,
            height,
            cells: Arc::new(PackedCells::new(len)),
            generation: 0,
            history: VecDeque::with_capacity(HISTORY_LEN),
            cycling: false,
            runtime,
        };
        universe.reset_history();
        Ok(universe)
    }

    pub fn with_seed(width: usize, height: usize, seed: Seed) -> Result<Self, UniverseError> {
        let mut universe = Self::new(width, height)?;
        universe.reseed(seed);
        Ok(universe)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major index of `(row, col)`.
    #[inline]
    pub fn get_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Read-only view over the packed cell bits.
    ///
    /// The backing buffer is replaced on every tick, so callers should not
    /// hold on to this slice across generations.
    pub fn cells(&self) -> &[u8] {
        self.cells.as_bytes()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells.get(self.get_index(row, col))
    }

    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.get_index(row, col);
        Arc::make_mut(&mut self.cells).set(idx, alive);
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        let idx = self.get_index(row, col);
        Arc::make_mut(&mut self.cells).toggle(idx);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.count_ones()
    }

    /// True when the last tick produced a state seen in the previous
    /// [`HISTORY_LEN`] generations.
    pub fn is_cycling(&self) -> bool {
        self.cycling
    }

    /// Advance one generation.
    pub fn tick(&mut self) {
        let (width, height) = (self.width, self.height);
        let current = Arc::clone(&self.cells);

        let rows = self.runtime.block_on(async move {
            let mut tasks = JoinSet::new();
            for row in 0..height {
                tasks.spawn(process_row(row, width, height, Arc::clone(&current)));
            }

            let mut rows = Vec::with_capacity(height);
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(row) => rows.push(row),
                    Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                    Err(err) => error!(%err, "row task did not complete"),
                }
            }
            rows
        });

        let mut next = PackedCells::new(width * height);
        for (row, states) in rows {
            for (col, alive) in states.into_iter().enumerate() {
                if alive {
                    next.set(row * width + col, true);
                }
            }
        }

        self.cells = Arc::new(next);
        self.generation += 1;
        self.cycling = self.check_for_cycle();
        if self.cycling {
            debug!(generation = self.generation, "universe revisited a recent state");
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        Arc::make_mut(&mut self.cells).clear();
        self.generation = 0;
        self.reset_history();
    }

    pub fn reseed(&mut self, seed: Seed) {
        match seed {
            Seed::Empty => self.clear(),
            Seed::Classic => {
                let cells = Arc::make_mut(&mut self.cells);
                for idx in 0..cells.len() {
                    cells.set(idx, idx % 2 == 0 || idx % 7 == 0);
                }
                self.generation = 0;
                self.reset_history();
            }
            Seed::Random(value) => {
                // Hash the seed, then run a simple LCG over the cells.
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                let mut state = hasher.finish();

                let cells = Arc::make_mut(&mut self.cells);
                for idx in 0..cells.len() {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    cells.set(idx, (state >> 33) % 3 == 0);
                }
                self.generation = 0;
                self.reset_history();
            }
            Seed::Pattern(pattern) => self.apply_pattern(pattern),
        }
    }

    /// Clear the grid and centre `pattern` on it, wrapping at the edges.
    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        let (rows, cols) = pattern.extent();
        let top = self.height.saturating_sub(rows) / 2;
        let left = self.width.saturating_sub(cols) / 2;
        let (width, height) = (self.width, self.height);

        let cells = Arc::make_mut(&mut self.cells);
        cells.clear();
        for &(row, col) in pattern.cells {
            let row = (top + row) % height;
            let col = (left + col) % width;
            cells.set(row * width + col, true);
        }
        self.generation = 0;
        self.reset_history();
    }

    fn hash_cells(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    fn check_for_cycle(&mut self) -> bool {
        let current = self.hash_cells();
        let seen = self.history.contains(&current);
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(current);
        seen
    }

    fn reset_history(&mut self) {
        self.history.clear();
        self.cycling = false;
        let current = self.hash_cells();
        self.history.push_back(current);
    }

    fn live_neighbor_count(cells: &PackedCells, width: usize, height: usize, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for delta_row in [height - 1, 0, 1] {
            for delta_col in [width - 1, 0, 1] {
                if delta_row == 0 && delta_col == 0 {
                    continue;
                }
                let neighbor_row = (row + delta_row) % height;
                let neighbor_col = (col + delta_col) % width;
                count += cells.get(neighbor_row * width + neighbor_col) as u8;
            }
        }
        count
    }
}

/// Row coroutine: computes the next state of one row from a frozen snapshot.
async fn process_row(
    row: usize,
    width: usize,
    height: usize,
    current: Arc<PackedCells>,
) -> (usize, Vec<bool>) {
    let mut next_row = Vec::with_capacity(width);
    for col in 0..width {
        let count = Universe::live_neighbor_count(&current, width, height, row, col);
        let alive = current.get(row * width + col);

        let next_state = match (alive, count) {
            (true, 2) | (true, 3) => true, // Survival
            (false, 3) => true,            // Birth
            _ => false,                    // Death or stays dead
        };
        next_row.push(next_state);

        if col % YIELD_EVERY == YIELD_EVERY - 1 {
            tokio::task::yield_now().await;
        }
    }
    (row, next_row)
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("generation", &self.generation)
            .field("population", &self.population())
            .finish_non_exhaustive()
    }
}

/// One text line per row: `◼` alive, `◻` dead.
impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.is_alive(row, col) { '◼' } else { '◻' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
