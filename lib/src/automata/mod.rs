//! The automata.
//!
//! Each automaton owns its grid and a [`RandomSource`], and implements
//! [`Automaton`](crate::Automaton).

mod epidemic;
mod life;
mod who_wins;
mod wolfram;

use crate::{config::StartConfig, random::RandomSource};

pub use epidemic::{Epidemic, EpidemicCell, Health};
pub use life::GameOfLife;
pub use who_wins::{Outcome, WhoWins};
pub use wolfram::Wolfram;

/// The first row of an elementary automaton.
///
/// Border cells are included: a random start may turn them on.
fn start_row(columns: usize, start: StartConfig, random: &mut dyn RandomSource) -> Vec<bool> {
    match start {
        StartConfig::Middle => {
            let mut row = vec![false; columns];
            row[columns / 2] = true;
            row
        }
        StartConfig::Random => (0..columns).map(|_| random.next_f64() >= 0.5).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;

    #[test]
    fn middle_start() {
        let mut random = SequenceSource::constant(0.9);
        let row = start_row(7, StartConfig::Middle, &mut random);
        assert_eq!(row, [false, false, false, true, false, false, false]);
        assert_eq!(random.taken(), 0);
        let row = start_row(4, StartConfig::Middle, &mut random);
        assert_eq!(row, [false, false, true, false]);
    }

    #[test]
    fn random_start() {
        let mut random = SequenceSource::new([0.2, 0.5, 0.7, 0.49]);
        let row = start_row(4, StartConfig::Random, &mut random);
        assert_eq!(row, [false, true, true, false]);
    }
}
