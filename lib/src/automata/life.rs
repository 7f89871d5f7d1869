//! Conway's Game of Life.

use crate::{
    automaton::{check_generations, Automaton, CellState, Progress, Snapshot, Status},
    config::{Dimensions, LifeParams},
    error::Error,
    grid::{Coord, Grid},
    random::{RandomSource, RngSource},
};
use std::mem;

/// A run of the Game of Life.
struct Run {
    /// The current generation. `true` means alive.
    cells: Grid<bool>,
    /// The buffer the next generation is written to.
    ///
    /// Its border always equals the border of `cells`.
    next: Grid<bool>,
    progress: Progress,
}

impl Run {
    /// Number of living cells among the eight neighbours.
    fn neighbors(&self, (row, col): Coord) -> usize {
        let mut count = 0;
        for r in row - 1..=row + 1 {
            for c in col - 1..=col + 1 {
                if (r, c) != (row, col) && self.cells[(r, c)] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Computes the interior of the next generation, then swaps the buffers.
    ///
    /// Border cells keep their initial states for the whole run.
    fn step(&mut self) {
        for coord in self.cells.interior() {
            let alive = matches!(
                (self.cells[coord], self.neighbors(coord)),
                (true, 2) | (true, 3) | (false, 3)
            );
            self.next[coord] = alive;
        }
        mem::swap(&mut self.cells, &mut self.next);
    }
}

/// Conway's Game of Life on a grid with fixed edges.
///
/// The first generation is random. Cells on the border never change.
pub struct GameOfLife {
    name: String,
    dimensions: Dimensions,
    params: LifeParams,
    random: Box<dyn RandomSource>,
    run: Option<Run>,
}

impl GameOfLife {
    /// Creates a new automaton. It uses a random number generator seeded
    /// from the operating system unless [`with_random`](Self::with_random)
    /// is called.
    pub fn new(dimensions: Dimensions, params: LifeParams) -> Self {
        GameOfLife {
            name: String::from("Game of Life"),
            dimensions,
            params,
            random: Box::new(RngSource::from_entropy()),
            run: None,
        }
    }

    /// Replaces the source of randomness.
    pub fn with_random<S: RandomSource + 'static>(mut self, random: S) -> Self {
        self.random = Box::new(random);
        self
    }

    /// Renames the automaton.
    pub fn with_name<S: ToString>(mut self, name: S) -> Self {
        self.name = name.to_string();
        self
    }

    /// The cells of the current generation, `true` meaning alive.
    pub fn cells(&self) -> Option<&Grid<bool>> {
        self.run.as_ref().map(|run| &run.cells)
    }
}

impl Automaton for GameOfLife {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) -> Result<Snapshot, Error> {
        let (rows, columns) = self.dimensions.grid_size()?;
        check_generations(self.params.generations)?;
        self.params.validate()?;

        let alive_ratio = self.params.alive_ratio;
        let random = &mut self.random;
        let cells = Grid::from_fn(rows, columns, |_| random.next_f64() < alive_ratio);
        log::debug!(
            "Initialized a {}x{} Game of Life with {} living cells",
            rows,
            columns,
            cells.iter().filter(|&&alive| alive).count()
        );
        self.run = Some(Run {
            next: cells.clone(),
            cells,
            progress: Progress::start(self.params.generations),
        });
        self.snapshot()
    }

    fn advance(&mut self) -> Result<Snapshot, Error> {
        let run = self.run.as_mut().ok_or(Error::Uninitialized)?;
        if !run.progress.is_finished() {
            run.step();
            run.progress.step();
            log::debug!("Game of Life generation {}", run.progress.current());
        }
        self.snapshot()
    }

    fn snapshot(&self) -> Result<Snapshot, Error> {
        let run = self.run.as_ref().ok_or(Error::Uninitialized)?;
        Ok(Snapshot {
            generation: run.progress.current(),
            status: run.progress.status(),
            cells: run.cells.map(|&alive| {
                if alive {
                    CellState::Alive
                } else {
                    CellState::Dead
                }
            }),
        })
    }

    fn status(&self) -> Status {
        self.run
            .as_ref()
            .map_or(Status::Uninitialized, |run| run.progress.status())
    }

    fn current_generation(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.progress.current())
    }

    fn generations(&self) -> usize {
        self.params.generations
    }
}
