//! The contract shared by all automata.

use crate::{error::Error, grid::Grid};
use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Status of an automaton.
///
/// It is returned with every snapshot, so that whoever drives the
/// automaton knows when to stop asking for new generations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// `initialize` has not been called yet.
    Uninitialized,
    /// More generations can be computed.
    Ready,
    /// The generation budget is exhausted.
    ///
    /// Further calls to `advance` return the last snapshot again.
    Finished,
}

/// The state of a cell, as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellState {
    /// A dead cell in the Game of Life.
    Dead,
    /// A living cell in the Game of Life.
    Alive,
    /// An off cell of an elementary automaton.
    Off,
    /// An on cell of an elementary automaton.
    On,
    /// A cell of the two-rule automaton.
    Combined {
        /// The combined state.
        state: bool,
        /// Whether the first rule fired.
        rule1: bool,
        /// Whether the second rule fired.
        rule2: bool,
    },
    /// An empty place in the epidemic.
    Empty,
    /// A healthy individual.
    Healthy,
    /// A sick individual.
    Sick,
}

impl CellState {
    /// The character used by [`Snapshot::plaintext`].
    pub fn to_char(self) -> char {
        match self {
            CellState::Dead | CellState::Off | CellState::Empty => '.',
            CellState::Alive | CellState::On => 'o',
            CellState::Combined { state: false, .. } => '.',
            CellState::Combined {
                rule1: true,
                rule2: false,
                ..
            } => '1',
            CellState::Combined {
                rule1: false,
                rule2: true,
                ..
            } => '2',
            CellState::Combined { .. } => 'o',
            CellState::Healthy => 'h',
            CellState::Sick => 'S',
        }
    }
}

/// A read-only picture of one generation.
///
/// It contains everything needed to render the generation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    /// The current generation, starting at 1.
    pub generation: usize,
    /// The status after computing this generation.
    pub status: Status,
    /// The cells.
    pub cells: Grid<CellState>,
}

impl Snapshot {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.cells.columns()
    }

    /// The state of a cell. Returns `None` if there is no such cell.
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row, col).copied()
    }

    /// Number of cells in a given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Displays the snapshot, one character per cell and one line per row.
    ///
    /// * **Dead**, **Off** and **Empty** cells are represented by `.`;
    /// * **Alive** and **On** cells are represented by `o`;
    /// * cells of the two-rule automaton are `1` or `2` when only that
    ///   rule fired, `o` when they are on otherwise, `.` when off;
    /// * **Healthy** cells are represented by `h`, **Sick** cells by `S`.
    pub fn plaintext(&self) -> String {
        let mut str = String::with_capacity((self.columns() + 1) * self.rows());
        for row in 0..self.rows() {
            for &cell in self.cells.row(row) {
                str.push(cell.to_char());
            }
            str.push('\n');
        }
        str
    }

    /// Same as [`plaintext`](Snapshot::plaintext), with a header line.
    pub fn plaintext_with_header(&self) -> String {
        let mut str = String::new();
        writeln!(
            str,
            "generation = {}, rows = {}, columns = {}, status = {:?}",
            self.generation,
            self.rows(),
            self.columns(),
            self.status
        )
        .ok();
        str.push_str(&self.plaintext());
        str
    }
}

/// A cellular automaton that is computed one generation at a time.
///
/// Calls must not overlap; taking `&mut self` enforces this.
pub trait Automaton {
    /// A human readable name.
    fn name(&self) -> &str;

    /// Allocates a fresh grid from the configuration and computes the
    /// first generation. Any previous run is discarded.
    ///
    /// Configuration errors are reported here, before any cell is set.
    fn initialize(&mut self) -> Result<Snapshot, Error>;

    /// Computes the next generation.
    ///
    /// When the automaton has already [`Finished`](Status::Finished),
    /// nothing changes and the last snapshot is returned again.
    ///
    /// Returns [`Error::Uninitialized`] if `initialize` was never called.
    fn advance(&mut self) -> Result<Snapshot, Error>;

    /// The current generation, without computing anything.
    fn snapshot(&self) -> Result<Snapshot, Error>;

    /// The current status.
    fn status(&self) -> Status;

    /// The current generation, or 0 before `initialize`.
    fn current_generation(&self) -> usize;

    /// The generation budget.
    ///
    /// The automaton finishes when the current generation reaches
    /// `generations() - 1`.
    fn generations(&self) -> usize;

    /// Advances until the automaton finishes, returning the last snapshot.
    ///
    /// Initializes the automaton first if needed.
    fn run_to_end(&mut self) -> Result<Snapshot, Error> {
        let mut snapshot = match self.status() {
            Status::Uninitialized => self.initialize()?,
            _ => self.snapshot()?,
        };
        while snapshot.status != Status::Finished {
            snapshot = self.advance()?;
        }
        Ok(snapshot)
    }
}

/// Generation bookkeeping shared by all automata.
///
/// The current generation starts at 1 and stops at `generations - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Progress {
    current: usize,
    generations: usize,
}

impl Progress {
    /// A run that has just been initialized.
    ///
    /// `generations` must be at least 2.
    pub(crate) fn start(generations: usize) -> Self {
        debug_assert!(generations >= 2);
        Progress {
            current: 1,
            generations,
        }
    }

    pub(crate) fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn generations(&self) -> usize {
        self.generations
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.current >= self.generations - 1
    }

    pub(crate) fn status(&self) -> Status {
        if self.is_finished() {
            Status::Finished
        } else {
            Status::Ready
        }
    }

    /// Moves to the next generation unless the cap is reached.
    pub(crate) fn step(&mut self) {
        if !self.is_finished() {
            self.current += 1;
            if self.is_finished() {
                log::info!("Reached the last generation {}", self.current);
            }
        }
    }
}

/// Checks the generation budget.
pub(crate) fn check_generations(generations: usize) -> Result<(), Error> {
    if generations < 2 {
        Err(Error::GenerationsError(generations))
    } else {
        Ok(())
    }
}
