//! Two elementary rules competing for the same cells.

use super::start_row;
use crate::{
    automaton::{check_generations, Automaton, CellState, Progress, Snapshot, Status},
    config::{Dimensions, WhoWinsParams},
    error::Error,
    grid::Grid,
    random::{RandomSource, RngSource},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell of [`WhoWins`]: its state, and which rules produced it.
///
/// The rule flags cannot be recovered from the state, since a renderer
/// distinguishes cells where only one of the rules fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Outcome {
    /// The two rule outputs combined by the operator.
    pub state: bool,
    /// The output of the first rule.
    pub rule1: bool,
    /// The output of the second rule.
    pub rule2: bool,
}

impl From<Outcome> for CellState {
    fn from(outcome: Outcome) -> Self {
        CellState::Combined {
            state: outcome.state,
            rule1: outcome.rule1,
            rule2: outcome.rule2,
        }
    }
}

struct Run {
    history: Grid<Outcome>,
    progress: Progress,
}

/// An elementary automaton whose next state combines two rules with
/// `AND` or `OR`.
///
/// Like [`Wolfram`](super::Wolfram), the whole history is kept and the
/// automaton runs for as many generations as the grid has rows.
pub struct WhoWins {
    name: String,
    dimensions: Dimensions,
    params: WhoWinsParams,
    random: Box<dyn RandomSource>,
    run: Option<Run>,
}

impl WhoWins {
    /// Creates a new automaton. It uses a random number generator seeded
    /// from the operating system unless [`with_random`](Self::with_random)
    /// is called.
    pub fn new(dimensions: Dimensions, params: WhoWinsParams) -> Self {
        WhoWins {
            name: String::from("Who Wins"),
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

    /// The history.
    pub fn history(&self) -> Option<&Grid<Outcome>> {
        self.run.as_ref().map(|run| &run.history)
    }

    /// Computes the interior of row `g` from row `g - 1`.
    fn next_row(&self, history: &Grid<Outcome>, g: usize) -> Vec<Outcome> {
        let prev = history.row(g - 1);
        let left = |j: usize| {
            if self.params.legacy_left_read {
                prev.get(g - 1).map_or(false, |cell| cell.state)
            } else {
                prev[j - 1].state
            }
        };
        (1..history.columns() - 1)
            .map(|j| self.evaluate(left(j), prev[j].state, prev[j + 1].state))
            .collect()
    }

    /// Evaluates both rules on one neighbourhood.
    pub fn evaluate(&self, left: bool, center: bool, right: bool) -> Outcome {
        let rule1 = self.params.rule1.table().lookup(left, center, right);
        let rule2 = self.params.rule2.table().lookup(left, center, right);
        Outcome {
            state: self.params.operator.apply(rule1, rule2),
            rule1,
            rule2,
        }
    }
}

impl Automaton for WhoWins {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) -> Result<Snapshot, Error> {
        let (rows, columns) = self.dimensions.grid_size()?;
        check_generations(rows)?;

        let mut history = Grid::new(rows, columns, Outcome::default());
        let first = start_row(columns, self.params.start, self.random.as_mut());
        for (cell, state) in history.row_mut(0).iter_mut().zip(first) {
            cell.state = state;
        }
        log::debug!(
            "Initialized rule {} {} rule {} on {} columns for {} generations",
            self.params.rule1,
            self.params.operator,
            self.params.rule2,
            columns,
            rows
        );
        self.run = Some(Run {
            history,
            progress: Progress::start(rows),
        });
        self.snapshot()
    }

    fn advance(&mut self) -> Result<Snapshot, Error> {
        let run = self.run.as_ref().ok_or(Error::Uninitialized)?;
        if !run.progress.is_finished() {
            let g = run.progress.current();
            let next = self.next_row(&run.history, g);
            let run = self.run.as_mut().ok_or(Error::Uninitialized)?;
            let columns = run.history.columns();
            run.history.row_mut(g)[1..columns - 1].copy_from_slice(&next);
            run.progress.step();
            log::debug!("Who Wins generation {}", g);
        }
        self.snapshot()
    }

    fn snapshot(&self) -> Result<Snapshot, Error> {
        let run = self.run.as_ref().ok_or(Error::Uninitialized)?;
        Ok(Snapshot {
            generation: run.progress.current(),
            status: run.progress.status(),
            cells: run.history.map(|&outcome| outcome.into()),
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
