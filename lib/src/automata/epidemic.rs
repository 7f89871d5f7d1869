//! A simple model of an epidemic.
//!
//! Individuals live on a grid with empty places. In each generation,
//! sick individuals infect their healthy neighbours, everyone tries to
//! move to an empty place, and the sick get a generation closer to
//! recovery.

use crate::{
    automaton::{check_generations, Automaton, CellState, Progress, Snapshot, Status},
    config::{Dimensions, EpidemicParams},
    error::Error,
    grid::{Coord, Grid},
    random::{RandomSource, RngSource},
};
use std::mem;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Health of a place on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Health {
    /// Nobody lives here.
    #[default]
    Empty,
    /// A healthy individual.
    Healthy,
    /// A sick individual.
    Sick,
}

/// A place on the grid of the epidemic.
///
/// The name `EpidemicCell` is chosen to avoid ambiguity with
/// [`std::cell::Cell`].
///
/// The countdown is positive exactly when the individual is sick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpidemicCell {
    health: Health,
    countdown: u32,
}

impl EpidemicCell {
    /// A healthy individual.
    pub const HEALTHY: Self = EpidemicCell {
        health: Health::Healthy,
        countdown: 0,
    };

    /// A sick individual who recovers after `duration` generations.
    ///
    /// `duration` must be positive.
    pub fn sick(duration: u32) -> Self {
        debug_assert!(duration > 0);
        EpidemicCell {
            health: Health::Sick,
            countdown: duration,
        }
    }

    /// The health.
    pub fn health(&self) -> Health {
        self.health
    }

    /// Generations until recovery; 0 unless sick.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Brings a sick individual a generation closer to recovery.
    fn recover_step(&mut self) {
        if self.health == Health::Sick {
            self.countdown = self.countdown.saturating_sub(1);
            if self.countdown == 0 {
                self.health = Health::Healthy;
            }
        }
    }
}

impl From<EpidemicCell> for CellState {
    fn from(cell: EpidemicCell) -> Self {
        match cell.health {
            Health::Empty => CellState::Empty,
            Health::Healthy => CellState::Healthy,
            Health::Sick => CellState::Sick,
        }
    }
}

/// The von Neumann neighbour in a direction: left, up, right, down.
///
/// Only called on interior cells, so it never leaves the grid.
fn neighbor((row, col): Coord, direction: usize) -> Coord {
    match direction {
        0 => (row, col - 1),
        1 => (row - 1, col),
        2 => (row, col + 1),
        _ => (row + 1, col),
    }
}

struct Run {
    cells: Grid<EpidemicCell>,
    /// The buffer infections are written to.
    next: Grid<EpidemicCell>,
    progress: Progress,
}

impl Run {
    /// Sick individuals in the interior infect their healthy neighbours.
    ///
    /// Every infection is decided on the grid as it was before this phase.
    fn infect(&mut self, params: &EpidemicParams) {
        self.next.clone_from(&self.cells);
        for coord in self.cells.interior() {
            if self.cells[coord].health != Health::Sick {
                continue;
            }
            for direction in 0..4 {
                let target = neighbor(coord, direction);
                if params.frozen_border && self.cells.is_border(target) {
                    continue;
                }
                if self.cells[target].health == Health::Healthy {
                    self.next[target] = EpidemicCell::sick(params.sickness_duration);
                }
            }
        }
        mem::swap(&mut self.cells, &mut self.next);
    }

    /// Every individual in the interior picks a random direction,
    /// and moves there if the place is empty.
    ///
    /// Moves happen one after another, row by row. An individual that
    /// moved right or down is not visited again at its new place.
    fn migrate(&mut self, params: &EpidemicParams, random: &mut dyn RandomSource) {
        let mut moved = Grid::new(self.cells.rows(), self.cells.columns(), false);
        for coord in self.cells.interior() {
            if moved[coord] || self.cells[coord].health == Health::Empty {
                continue;
            }
            let direction = ((random.next_f64() * 4.0) as usize).min(3);
            let target = neighbor(coord, direction);
            if params.frozen_border && self.cells.is_border(target) {
                continue;
            }
            if self.cells[target].health == Health::Empty {
                self.cells.swap(coord, target);
                moved[target] = true;
            }
        }
    }

    /// Sick individuals get a generation closer to recovery.
    fn recover(&mut self, params: &EpidemicParams) {
        if params.frozen_border {
            for coord in self.cells.interior() {
                self.cells[coord].recover_step();
            }
        } else {
            self.cells.iter_mut().for_each(EpidemicCell::recover_step);
        }
    }
}

/// An epidemic spreading among moving individuals.
///
/// Each generation runs three phases, each over the whole grid before
/// the next one starts: infection, movement and recovery.
pub struct Epidemic {
    name: String,
    dimensions: Dimensions,
    params: EpidemicParams,
    random: Box<dyn RandomSource>,
    run: Option<Run>,
}

impl Epidemic {
    /// Creates a new automaton. It uses a random number generator seeded
    /// from the operating system unless [`with_random`](Self::with_random)
    /// is called.
    pub fn new(dimensions: Dimensions, params: EpidemicParams) -> Self {
        Epidemic {
            name: String::from("Epidemic"),
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

    /// The cells of the current generation.
    pub fn cells(&self) -> Option<&Grid<EpidemicCell>> {
        self.run.as_ref().map(|run| &run.cells)
    }
}

impl Automaton for Epidemic {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) -> Result<Snapshot, Error> {
        let (rows, columns) = self.dimensions.grid_size()?;
        check_generations(self.params.generations)?;
        self.params.validate()?;

        let params = self.params;
        let random = &mut self.random;
        let mut cells = Grid::from_fn(rows, columns, |_| {
            if random.next_f64() < params.empty_ratio {
                EpidemicCell::default()
            } else {
                EpidemicCell::HEALTHY
            }
        });
        // One draw per place, occupied or not.
        for cell in cells.iter_mut() {
            let draw = random.next_f64();
            if cell.health == Health::Healthy && draw >= params.healthy_ratio {
                *cell = EpidemicCell::sick(params.sickness_duration);
            }
        }
        log::debug!(
            "Initialized a {}x{} epidemic with {} sick individuals",
            rows,
            columns,
            cells.iter().filter(|c| c.health == Health::Sick).count()
        );
        self.run = Some(Run {
            next: cells.clone(),
            cells,
            progress: Progress::start(params.generations),
        });
        self.snapshot()
    }

    fn advance(&mut self) -> Result<Snapshot, Error> {
        let run = self.run.as_mut().ok_or(Error::Uninitialized)?;
        if !run.progress.is_finished() {
            run.infect(&self.params);
            run.migrate(&self.params, self.random.as_mut());
            run.recover(&self.params);
            run.progress.step();
            log::debug!(
                "Epidemic generation {}: {} sick",
                run.progress.current(),
                run.cells
                    .iter()
                    .filter(|c| c.health == Health::Sick)
                    .count()
            );
        }
        self.snapshot()
    }

    fn snapshot(&self) -> Result<Snapshot, Error> {
        let run = self.run.as_ref().ok_or(Error::Uninitialized)?;
        Ok(Snapshot {
            generation: run.progress.current(),
            status: run.progress.status(),
            cells: run.cells.map(|&cell| cell.into()),
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
