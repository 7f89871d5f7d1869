mod args;
mod cli;
mod render;

use anyhow::Result;
use args::Args;
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let matches = args::command().get_matches();
    SimpleLogger::new()
        .with_level(args::log_level(&matches))
        .init()?;
    log::debug!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let args = Args::from_matches(&matches)?;
    cli::main(args)
}
