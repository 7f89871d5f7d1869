use cellgen_lib::{
    Automaton, AutomatonConfig, CellState, Config, Dimensions, EpidemicParams, Error, GameOfLife,
    LifeParams, Rule, SequenceSource, StartConfig, Status, WhoWinsParams, WolframParams,
};

fn life(rows: usize, columns: usize, generations: usize, draws: Vec<f64>) -> GameOfLife {
    let params = LifeParams {
        generations,
        alive_ratio: 0.5,
    };
    GameOfLife::new(Dimensions::cells(rows, columns), params).with_random(SequenceSource::new(draws))
}

/// Draws that make exactly the given cells alive when the alive ratio is `1/2`.
fn pattern(rows: usize, columns: usize, alive: &[(usize, usize)]) -> Vec<f64> {
    let mut draws = Vec::new();
    for row in 0..rows {
        for col in 0..columns {
            draws.push(if alive.contains(&(row, col)) { 0.0 } else { 0.9 });
        }
    }
    draws
}

#[test]
fn default() -> Result<(), Box<dyn std::error::Error>> {
    let mut automaton = Config::default().set_seed(1).automaton()?;
    assert_eq!(automaton.status(), Status::Uninitialized);
    let snapshot = automaton.run_to_end()?;
    assert_eq!(snapshot.rows(), 60);
    assert_eq!(snapshot.columns(), 60);
    assert_eq!(snapshot.generation, 99);
    assert_eq!(snapshot.status, Status::Finished);
    Ok(())
}

#[test]
fn blinker() -> Result<(), Box<dyn std::error::Error>> {
    let mut automaton = life(5, 5, 10, pattern(5, 5, &[(2, 1), (2, 2), (2, 3)]));
    let snapshot = automaton.initialize()?;
    assert_eq!(
        snapshot.plaintext(),
        String::from(
            ".....\n\
             .....\n\
             .ooo.\n\
             .....\n\
             .....\n"
        )
    );
    let snapshot = automaton.advance()?;
    assert_eq!(snapshot.generation, 2);
    assert_eq!(
        snapshot.plaintext(),
        String::from(
            ".....\n\
             ..o..\n\
             ..o..\n\
             ..o..\n\
             .....\n"
        )
    );
    let snapshot = automaton.advance()?;
    assert_eq!(snapshot.get(2, 1), Some(CellState::Alive));
    assert_eq!(snapshot.get(1, 2), Some(CellState::Dead));
    Ok(())
}

#[test]
fn border_is_frozen() -> Result<(), Box<dyn std::error::Error>> {
    // A full border around an empty interior: the interior cells next to
    // the border are born, but the border itself never changes.
    let mut border = Vec::new();
    for i in 0..6 {
        border.extend([(0, i), (5, i), (i, 0), (i, 5)]);
    }
    let mut automaton = life(6, 6, 8, pattern(6, 6, &border));
    let first = automaton.initialize()?;
    let mut changed = false;
    for _ in 0..6 {
        let snapshot = automaton.advance()?;
        for (coord, state) in snapshot.cells.enumerate() {
            if snapshot.cells.is_border(coord) {
                assert_eq!(Some(*state), first.get(coord.0, coord.1));
            } else if *state != first.cells[coord] {
                changed = true;
            }
        }
    }
    assert!(changed);
    Ok(())
}

#[test]
fn generation_cap() -> Result<(), Box<dyn std::error::Error>> {
    let mut automaton = life(6, 6, 4, vec![0.3, 0.8, 0.6, 0.1, 0.9]);
    assert_eq!(automaton.generations(), 4);
    let snapshot = automaton.initialize()?;
    assert_eq!((snapshot.generation, snapshot.status), (1, Status::Ready));
    let snapshot = automaton.advance()?;
    assert_eq!((snapshot.generation, snapshot.status), (2, Status::Ready));
    let last = automaton.advance()?;
    assert_eq!((last.generation, last.status), (3, Status::Finished));
    for _ in 0..3 {
        assert_eq!(automaton.advance()?, last);
        assert_eq!(automaton.current_generation(), 3);
    }
    Ok(())
}

#[test]
fn every_engine_stops_at_the_cap() -> Result<(), Box<dyn std::error::Error>> {
    let configs = [
        AutomatonConfig::Wolfram(WolframParams::default()),
        AutomatonConfig::WhoWins(WhoWinsParams::default()),
        AutomatonConfig::Epidemic(EpidemicParams::default()),
    ];
    for automaton in configs {
        // Five rows, so the elementary automata also get five generations.
        let config = Config::new(automaton)
            .set_size(9, 5)
            .set_cell_size(1)
            .set_seed(3)
            .set_generations(5);
        let mut automaton = config.automaton()?;
        let mut last = automaton.initialize()?;
        for _ in 0..3 {
            assert_eq!(last.status, Status::Ready, "{}", automaton.name());
            last = automaton.advance()?;
        }
        assert_eq!((last.generation, last.status), (4, Status::Finished));
        for _ in 0..3 {
            assert_eq!(automaton.advance()?, last, "{}", automaton.name());
            assert_eq!(automaton.current_generation(), 4);
        }
    }
    Ok(())
}

#[test]
fn reinitialize_starts_over() -> Result<(), Box<dyn std::error::Error>> {
    let mut automaton = life(6, 6, 3, vec![0.3, 0.8, 0.6, 0.1, 0.9]);
    automaton.initialize()?;
    automaton.run_to_end()?;
    assert_eq!(automaton.status(), Status::Finished);
    let snapshot = automaton.initialize()?;
    assert_eq!(snapshot.generation, 1);
    assert_eq!(automaton.status(), Status::Ready);
    Ok(())
}

#[test]
fn advance_before_initialize() {
    let mut automaton = life(5, 5, 10, vec![0.5]);
    assert_eq!(automaton.status(), Status::Uninitialized);
    assert_eq!(automaton.current_generation(), 0);
    assert_eq!(automaton.advance(), Err(Error::Uninitialized));
    assert_eq!(automaton.snapshot(), Err(Error::Uninitialized));
}

#[test]
fn configuration_errors() {
    let life = |params: LifeParams| Config::new(AutomatonConfig::Life(params));

    let config = life(LifeParams::default()).set_cell_size(0);
    assert_eq!(config.automaton().err(), Some(Error::CellSizeError));

    let config = life(LifeParams::default()).set_size(600, 20);
    assert!(matches!(
        config.automaton().err(),
        Some(Error::GridSizeError {
            rows: 2,
            columns: 60,
            ..
        })
    ));

    let config = life(LifeParams::default()).set_generations(1);
    assert_eq!(config.automaton().err(), Some(Error::GenerationsError(1)));

    let config = life(LifeParams {
        alive_ratio: 1.5,
        ..LifeParams::default()
    });
    assert_eq!(config.automaton().err(), Some(Error::RatioError("alive")));

    let config = Config::new(AutomatonConfig::Epidemic(EpidemicParams {
        sickness_duration: 0,
        ..EpidemicParams::default()
    }));
    assert_eq!(config.validate(), Err(Error::SicknessDurationError));

    // The same checks run again when initializing.
    let mut automaton = GameOfLife::new(Dimensions::new(600, 600, 0), LifeParams::default());
    assert_eq!(automaton.initialize(), Err(Error::CellSizeError));
    assert_eq!(automaton.status(), Status::Uninitialized);
}

#[test]
fn elementary_ignore_generation_budget() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new(AutomatonConfig::Wolfram(WolframParams::default()))
        .set_size(120, 70)
        .set_generations(1000);
    let mut automaton = config.automaton()?;
    assert_eq!(automaton.generations(), 7);
    let snapshot = automaton.run_to_end()?;
    assert_eq!(snapshot.generation, 6);
    assert_eq!(snapshot.columns(), 12);
    Ok(())
}

#[test]
fn seeded_runs_are_reproducible() -> Result<(), Box<dyn std::error::Error>> {
    let automata = [
        AutomatonConfig::Life(LifeParams::default()),
        AutomatonConfig::Wolfram(WolframParams {
            start: StartConfig::Random,
            ..WolframParams::default()
        }),
        AutomatonConfig::WhoWins(WhoWinsParams {
            start: StartConfig::Random,
            ..WhoWinsParams::default()
        }),
        AutomatonConfig::Epidemic(EpidemicParams::default()),
    ];
    for kind in automata {
        let config = Config::new(kind)
            .set_size(200, 150)
            .set_seed(2024)
            .set_generations(12);
        let mut a = config.automaton()?;
        let mut b = config.automaton()?;
        assert_eq!(a.initialize()?, b.initialize()?);
        for _ in 0..12 {
            assert_eq!(a.advance()?, b.advance()?);
        }
    }
    Ok(())
}

#[test]
#[cfg(feature = "serde")]
fn config_files() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new(AutomatonConfig::WhoWins(WhoWinsParams::default())).set_seed(7);
    let json = serde_json::to_string(&config)?;
    let back: Config = serde_json::from_str(&json)?;
    assert_eq!(back, config);

    // Missing fields take their defaults, unknown rules fall back to 222.
    let json = r#"{"cell_size": 5, "automaton": {"kind": "wolfram", "rule": "184"}}"#;
    let config: Config = serde_json::from_str(json)?;
    assert_eq!(config.dimensions, Dimensions::new(600, 600, 5));
    assert_eq!(
        config.automaton,
        AutomatonConfig::Wolfram(WolframParams {
            rule: Rule::Rule222,
            ..WolframParams::default()
        })
    );
    Ok(())
}
