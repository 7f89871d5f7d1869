use crate::{args::Args, render};
use anyhow::{Context, Result};
use cellgen_lib::{Automaton, Snapshot, Status};
use std::{
    io::{self, Write},
    thread,
};

fn show<W: Write>(args: &Args, snapshot: &Snapshot, out: &mut W) -> Result<()> {
    if args.json {
        serde_json::to_writer(&mut *out, snapshot)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", snapshot.plaintext_with_header())?;
    }
    Ok(())
}

/// Runs the automaton until it finishes.
///
/// With `--print` or `--json` every generation is written to `out`.
/// Otherwise only the last one is, unless it is saved as an image.
pub(crate) fn run<W: Write>(args: &Args, out: &mut W) -> Result<Snapshot> {
    let mut automaton = args.config.automaton().context("Invalid configuration")?;
    log::info!(
        "Running {} for at most {} generations",
        automaton.name(),
        automaton.generations()
    );
    let every = args.print || args.json;

    let mut snapshot = automaton.initialize()?;
    loop {
        if every {
            show(args, &snapshot, out)?;
        }
        if snapshot.status == Status::Finished {
            break;
        }
        if let Some(delay) = args.delay {
            thread::sleep(delay);
        }
        snapshot = automaton.advance()?;
    }

    match &args.output {
        Some(path) => {
            render::save(&snapshot, args.config.dimensions.cell_size, path)?;
        }
        None if !every => show(args, &snapshot, out)?,
        None => (),
    }
    Ok(snapshot)
}

pub(crate) fn main(args: Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.dump_config {
        serde_json::to_writer_pretty(&mut out, &args.config)?;
        writeln!(out)?;
        return Ok(());
    }
    run(&args, &mut out)?;
    Ok(())
}
