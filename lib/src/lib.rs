//! __cellgen__ runs a few classic cellular automata one generation at a time:
//!
//! * [Conway's Game of Life](GameOfLife),
//! * [Wolfram's elementary automaton](Wolfram),
//! * [two elementary rules combined with `AND` or `OR`](WhoWins),
//! * [a simple epidemic](Epidemic).
//!
//! Every automaton implements [`Automaton`]: call
//! [`initialize`](Automaton::initialize) once, then
//! [`advance`](Automaton::advance) until the returned [`Snapshot`] says
//! the run is [`Finished`](Status::Finished). Snapshots contain everything
//! a renderer needs.
//!
//! # Example
//!
//! ```rust
//! use cellgen_lib::{Automaton, AutomatonConfig, Config, Status, WolframParams};
//!
//! let config = Config::new(AutomatonConfig::Wolfram(WolframParams::default()))
//!     .set_size(90, 90)
//!     .set_cell_size(10);
//! let mut automaton = config.automaton().unwrap();
//! let mut snapshot = automaton.initialize().unwrap();
//! while snapshot.status != Status::Finished {
//!     snapshot = automaton.advance().unwrap();
//! }
//! assert_eq!(snapshot.generation, 8);
//! ```

mod automata;
mod automaton;
mod config;
mod error;
mod grid;
pub mod random;
pub mod rules;

pub use automata::{Epidemic, EpidemicCell, GameOfLife, Health, Outcome, WhoWins, Wolfram};
pub use automaton::{Automaton, CellState, Snapshot, Status};
pub use config::{
    AutomatonConfig, Config, Dimensions, EpidemicParams, LifeParams, Operator, StartConfig,
    WhoWinsParams, WolframParams,
};
pub use error::Error;
pub use grid::{Coord, Grid};
pub use random::{RandomSource, RngSource, SequenceSource};
pub use rules::{Rule, RuleTable};
