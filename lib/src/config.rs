//! Run configuration.

use crate::{
    automata::{Epidemic, GameOfLife, WhoWins, Wolfram},
    automaton::Automaton,
    error::Error,
    random::RngSource,
    rules::Rule,
};
use educe::Educe;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Image size and cell size, in pixels.
///
/// The grid has `height / cell_size` rows and `width / cell_size` columns.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Dimensions {
    /// Image width.
    #[educe(Default = 600)]
    pub width: u32,

    /// Image height.
    #[educe(Default = 600)]
    pub height: u32,

    /// Side length of a cell.
    #[educe(Default = 10)]
    pub cell_size: u32,
}

impl Dimensions {
    /// Creates new dimensions.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Dimensions {
            width,
            height,
            cell_size,
        }
    }

    /// Dimensions giving exactly a `rows × columns` grid with 1-pixel cells.
    ///
    /// Image sizes are `u32`, so larger counts saturate at `u32::MAX`.
    pub fn cells(rows: usize, columns: usize) -> Self {
        let pixels = |count: usize| u32::try_from(count).unwrap_or(u32::MAX);
        Dimensions::new(pixels(columns), pixels(rows), 1)
    }

    /// `(rows, columns)` of the grid.
    ///
    /// Every automaton needs at least one interior cell,
    /// so both must be at least 3.
    pub fn grid_size(&self) -> Result<(usize, usize), Error> {
        if self.cell_size == 0 {
            return Err(Error::CellSizeError);
        }
        let rows = (self.height / self.cell_size) as usize;
        let columns = (self.width / self.cell_size) as usize;
        if rows < 3 || columns < 3 {
            return Err(Error::GridSizeError {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
                rows,
                columns,
            });
        }
        Ok((rows, columns))
    }
}

fn check_ratio(name: &'static str, ratio: f64) -> Result<(), Error> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(Error::RatioError(name))
    }
}

/// How the first row of an elementary automaton is filled.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum StartConfig {
    /// A single on cell in the middle.
    #[educe(Default)]
    Middle,
    /// Each cell is on with probability `1/2`.
    Random,
}

impl FromStr for StartConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "middle" | "m" => Ok(StartConfig::Middle),
            "random" | "r" => Ok(StartConfig::Random),
            _ => Err(String::from("invalid start configuration")),
        }
    }
}

impl Display for StartConfig {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let s = match self {
            StartConfig::Middle => "middle",
            StartConfig::Random => "random",
        };
        write!(f, "{}", s)
    }
}

/// How the two rules of [`WhoWins`] are combined.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Operator {
    /// On when both rules fire.
    And,
    /// On when at least one rule fires.
    #[educe(Default)]
    Or,
}

impl Operator {
    /// Combines the outputs of the two rules.
    #[inline]
    pub fn apply(self, rule1: bool, rule2: bool) -> bool {
        match self {
            Operator::And => rule1 && rule2,
            Operator::Or => rule1 || rule2,
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" | "&" => Ok(Operator::And),
            "or" | "|" => Ok(Operator::Or),
            _ => Err(String::from("invalid operator")),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let s = match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        };
        write!(f, "{}", s)
    }
}

/// Parameters of [`GameOfLife`].
#[derive(Clone, Copy, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LifeParams {
    /// Generation budget.
    #[educe(Default = 100)]
    pub generations: usize,

    /// Probability for a cell to be alive at the start.
    #[educe(Default = 0.5)]
    pub alive_ratio: f64,
}

impl LifeParams {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        check_ratio("alive", self.alive_ratio)
    }
}

/// Parameters of [`Wolfram`].
///
/// There is no generation budget: the automaton always runs for
/// as many generations as the grid has rows.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WolframParams {
    /// How the first row is filled.
    pub start: StartConfig,

    /// The rule.
    #[educe(Default(expression = "Rule::Rule30"))]
    pub rule: Rule,
}

/// Parameters of [`WhoWins`].
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WhoWinsParams {
    /// How the first row is filled.
    pub start: StartConfig,

    /// The first rule.
    #[educe(Default(expression = "Rule::Rule190"))]
    pub rule1: Rule,

    /// The second rule.
    #[educe(Default(expression = "Rule::Rule30"))]
    pub rule2: Rule,

    /// How the rules are combined.
    pub operator: Operator,

    /// Reads the left neighbour of column `j` in generation `g` from
    /// column `g - 1` instead of `j - 1`.
    ///
    /// Only useful to reproduce images drawn by older versions,
    /// which had this indexing mistake.
    pub legacy_left_read: bool,
}

/// Parameters of [`Epidemic`].
#[derive(Clone, Copy, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EpidemicParams {
    /// Generation budget.
    #[educe(Default = 10)]
    pub generations: usize,

    /// Probability for a place to be empty at the start.
    #[educe(Default = 0.3)]
    pub empty_ratio: f64,

    /// Probability for an individual to be healthy at the start.
    #[educe(Default = 0.99)]
    pub healthy_ratio: f64,

    /// For how many generations an individual stays sick.
    #[educe(Default = 2)]
    pub sickness_duration: u32,

    /// Keeps the outermost rows and columns as they were at the start.
    ///
    /// When `false`, infection and movement reach into the border,
    /// and sick individuals on the border recover.
    #[educe(Default = true)]
    pub frozen_border: bool,
}

impl EpidemicParams {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        check_ratio("empty", self.empty_ratio)?;
        check_ratio("healthy", self.healthy_ratio)?;
        if self.sickness_duration == 0 {
            return Err(Error::SicknessDurationError);
        }
        Ok(())
    }
}

/// Which automaton to run, and its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "kebab-case")
)]
pub enum AutomatonConfig {
    /// Conway's Game of Life.
    Life(LifeParams),
    /// Wolfram's elementary automaton.
    Wolfram(WolframParams),
    /// Two elementary rules competing.
    WhoWins(WhoWinsParams),
    /// Epidemic spread.
    Epidemic(EpidemicParams),
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        AutomatonConfig::Life(LifeParams::default())
    }
}

/// Run configuration.
///
/// The automaton will be generated from this configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    /// Image size and cell size.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub dimensions: Dimensions,

    /// Seed of the random number generator.
    ///
    /// `None` means that it is seeded from the operating system.
    pub seed: Option<u64>,

    /// Which automaton to run.
    pub automaton: AutomatonConfig,
}

impl Config {
    /// Sets up a new configuration for an automaton with default size.
    pub fn new(automaton: AutomatonConfig) -> Self {
        Config {
            automaton,
            ..Config::default()
        }
    }

    /// Sets the image size.
    pub fn set_size(mut self, width: u32, height: u32) -> Self {
        self.dimensions.width = width;
        self.dimensions.height = height;
        self
    }

    /// Sets the cell size.
    pub fn set_cell_size(mut self, cell_size: u32) -> Self {
        self.dimensions.cell_size = cell_size;
        self
    }

    /// Sets the seed.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// Sets the generation budget.
    ///
    /// Ignored by elementary automata, whose budget is the number of rows.
    pub fn set_generations(mut self, generations: usize) -> Self {
        match &mut self.automaton {
            AutomatonConfig::Life(params) => params.generations = generations,
            AutomatonConfig::Epidemic(params) => params.generations = generations,
            AutomatonConfig::Wolfram(_) | AutomatonConfig::WhoWins(_) => {
                log::debug!("Elementary automata ignore the generation budget")
            }
        }
        self
    }

    /// Checks the configuration without creating an automaton.
    pub fn validate(&self) -> Result<(), Error> {
        let (rows, _) = self.dimensions.grid_size()?;
        match &self.automaton {
            AutomatonConfig::Life(params) => {
                crate::automaton::check_generations(params.generations)?;
                params.validate()
            }
            AutomatonConfig::Epidemic(params) => {
                crate::automaton::check_generations(params.generations)?;
                params.validate()
            }
            AutomatonConfig::Wolfram(_) | AutomatonConfig::WhoWins(_) => {
                crate::automaton::check_generations(rows)
            }
        }
    }

    /// Creates a new automaton from the configuration.
    /// Returns an error if the configuration is invalid.
    ///
    /// The automaton still has to be initialized.
    pub fn automaton(&self) -> Result<Box<dyn Automaton>, Error> {
        self.validate()?;
        let random = RngSource::new(self.seed);
        let dimensions = self.dimensions;
        Ok(match self.automaton {
            AutomatonConfig::Life(params) => {
                Box::new(GameOfLife::new(dimensions, params).with_random(random))
            }
            AutomatonConfig::Wolfram(params) => {
                Box::new(Wolfram::new(dimensions, params).with_random(random))
            }
            AutomatonConfig::WhoWins(params) => {
                Box::new(WhoWins::new(dimensions, params).with_random(random))
            }
            AutomatonConfig::Epidemic(params) => {
                Box::new(Epidemic::new(dimensions, params).with_random(random))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_dimensions() {
        assert_eq!(Dimensions::cells(4, 7), Dimensions::new(7, 4, 1));
        assert_eq!(Dimensions::cells(4, 7).grid_size(), Ok((4, 7)));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn huge_cell_counts_saturate() {
        let huge = u32::MAX as usize + 5;
        assert_eq!(
            Dimensions::cells(huge, 3),
            Dimensions::new(3, u32::MAX, 1)
        );
    }
}
