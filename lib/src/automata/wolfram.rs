//! Wolfram's elementary cellular automaton.

use super::start_row;
use crate::{
    automaton::{check_generations, Automaton, CellState, Progress, Snapshot, Status},
    config::{Dimensions, WolframParams},
    error::Error,
    grid::Grid,
    random::{RandomSource, RngSource},
};

/// A run of an elementary automaton.
struct Run {
    /// Row `g` is generation `g`. Rows after the current generation
    /// are still off.
    history: Grid<bool>,
    progress: Progress,
}

/// Wolfram's elementary cellular automaton with fixed edges.
///
/// The whole history is kept: row `g` of the grid is generation `g`,
/// so the automaton runs for as many generations as the grid has rows.
/// The first and last columns are never computed and stay off, except
/// in the first row.
pub struct Wolfram {
    name: String,
    dimensions: Dimensions,
    params: WolframParams,
    random: Box<dyn RandomSource>,
    run: Option<Run>,
}

impl Wolfram {
    /// Creates a new automaton. It uses a random number generator seeded
    /// from the operating system unless [`with_random`](Self::with_random)
    /// is called.
    pub fn new(dimensions: Dimensions, params: WolframParams) -> Self {
        Wolfram {
            name: String::from("Wolfram CA"),
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

    /// The history, `true` meaning on.
    pub fn history(&self) -> Option<&Grid<bool>> {
        self.run.as_ref().map(|run| &run.history)
    }
}

impl Automaton for Wolfram {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) -> Result<Snapshot, Error> {
        let (rows, columns) = self.dimensions.grid_size()?;
        check_generations(rows)?;

        let mut history = Grid::new(rows, columns, false);
        let first = start_row(columns, self.params.start, self.random.as_mut());
        history.row_mut(0).copy_from_slice(&first);
        log::debug!(
            "Initialized rule {} on {} columns for {} generations, starting from {}",
            self.params.rule,
            columns,
            rows,
            self.params.start
        );
        self.run = Some(Run {
            history,
            progress: Progress::start(rows),
        });
        self.snapshot()
    }

    fn advance(&mut self) -> Result<Snapshot, Error> {
        let table = self.params.rule.table();
        let run = self.run.as_mut().ok_or(Error::Uninitialized)?;
        if !run.progress.is_finished() {
            let g = run.progress.current();
            let columns = run.history.columns();
            let prev = run.history.row(g - 1);
            let next: Vec<bool> = (1..columns - 1)
                .map(|j| table.lookup(prev[j - 1], prev[j], prev[j + 1]))
                .collect();
            run.history.row_mut(g)[1..columns - 1].copy_from_slice(&next);
            run.progress.step();
            log::debug!("Rule {} generation {}", self.params.rule, g);
        }
        self.snapshot()
    }

    fn snapshot(&self) -> Result<Snapshot, Error> {
        let run = self.run.as_ref().ok_or(Error::Uninitialized)?;
        Ok(Snapshot {
            generation: run.progress.current(),
            status: run.progress.status(),
            cells: run
                .history
                .map(|&on| if on { CellState::On } else { CellState::Off }),
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

    /// The number of rows, or 0 if the dimensions are invalid.
    fn generations(&self) -> usize {
        match &self.run {
            Some(run) => run.progress.generations(),
            None => self.dimensions.grid_size().map_or(0, |(rows, _)| rows),
        }
    }
}
