//! Parsing command-line arguments.

use anyhow::{bail, Context, Result};
use cellgen_lib::{
    AutomatonConfig, Config, EpidemicParams, LifeParams, Operator, Rule, StartConfig,
    WhoWinsParams, WolframParams,
};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

fn parse_ratio(s: &str) -> Result<f64, String> {
    let ratio = s.parse::<f64>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(String::from("must be between 0 and 1"))
    }
}

fn start_arg() -> Arg {
    Arg::new("START")
        .help("How the first row is filled")
        .long_help(
            "How the first row is filled\n\
             \"middle\" turns on a single cell in the middle of the row.\n\
             \"random\" turns on each cell with probability 1/2.\n",
        )
        .short('s')
        .long("start")
        .value_parser(StartConfig::from_str)
}

fn rule_arg(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .help(help)
        .long_help(format!(
            "{}\n\
             One of 30, 90, 110, 190 and 222.\n\
             The tables of 190 and 222 are stored from pattern 000 to 111, \
             so they behave like Wolfram's rules 125 and 123.\n",
            help
        ))
        .long(long)
        .value_name("RULE")
        .value_parser(Rule::from_str)
}

/// Builds the command-line interface.
pub(crate) fn command() -> Command {
    command!()
        .long_about(
            "Runs classic cellular automata one generation at a time\n\
             \n\
             Every generation can be printed as plain text:\n\
             * Dead, off and empty cells are represented by `.`;\n\
             * Living and on cells are represented by `o`;\n\
             * When two rules are combined, cells where only one of them fired \
             are represented by `1` or `2`;\n\
             * Healthy individuals are represented by `h`, sick ones by `S`.\n\
             \n\
             The last generation can be saved as a PNG image.\n",
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads the configuration from a file")
                .long_help(
                    "Reads the configuration from a file\n\
                     The format is chosen by the extension: .toml, .yaml, .yml or .json.\n\
                     Other options override the values in the file.\n",
                )
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("WIDTH")
                .help("Width of the image, in pixels")
                .long("width")
                .value_parser(value_parser!(u32).range(1..))
                .global(true),
        )
        .arg(
            Arg::new("HEIGHT")
                .help("Height of the image, in pixels")
                .long("height")
                .value_parser(value_parser!(u32).range(1..))
                .global(true),
        )
        .arg(
            Arg::new("CELL_SIZE")
                .help("Side length of a cell, in pixels")
                .long("cell-size")
                .value_parser(value_parser!(u32).range(1..))
                .global(true),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Generation budget")
                .long_help(
                    "Generation budget\n\
                     The run stops at generation GENERATIONS - 1.\n\
                     Ignored by wolfram and who-wins, which run for as many \
                     generations as there are rows.\n",
                )
                .short('g')
                .long("generations")
                .value_parser(value_parser!(usize))
                .global(true),
        )
        .arg(
            Arg::new("SEED")
                .help("Seeds the random number generator")
                .long("seed")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("OUTPUT")
                .help("Saves the last generation as a PNG image")
                .long_help(
                    "Saves the last generation as a PNG image\n\
                     `.png` is appended to the file name if it is missing.\n",
                )
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("PRINT")
                .help("Prints every generation as plain text")
                .short('p')
                .long("print")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("JSON")
                .help("Prints every generation as JSON")
                .long("json")
                .action(ArgAction::SetTrue)
                .conflicts_with("PRINT")
                .global(true),
        )
        .arg(
            Arg::new("DUMP_CONFIG")
                .help("Prints the configuration as JSON and exits")
                .long("dump-config")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("DELAY")
                .help("Waits between generations, in milliseconds")
                .short('d')
                .long("delay")
                .value_name("MS")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("VERBOSE")
                .help("Logs more; repeat for even more")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("QUIET")
                .help("Only logs errors")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("VERBOSE")
                .global(true),
        )
        .subcommand(
            Command::new("life").about("Conway's Game of Life").arg(
                Arg::new("ALIVE_RATIO")
                    .help("Probability for a cell to be alive at the start")
                    .short('a')
                    .long("alive-ratio")
                    .value_name("RATIO")
                    .value_parser(parse_ratio),
            ),
        )
        .subcommand(
            Command::new("wolfram")
                .about("Wolfram's elementary automaton")
                .arg(start_arg())
                .arg(rule_arg("RULE", "rule", "The rule").short('r')),
        )
        .subcommand(
            Command::new("who-wins")
                .about("Two elementary rules combined with AND or OR")
                .arg(start_arg())
                .arg(rule_arg("RULE1", "rule1", "The first rule"))
                .arg(rule_arg("RULE2", "rule2", "The second rule"))
                .arg(
                    Arg::new("OPERATOR")
                        .help("How the two rules are combined")
                        .long("operator")
                        .value_parser(Operator::from_str),
                )
                .arg(
                    Arg::new("LEGACY_LEFT_READ")
                        .help("Reads left neighbours the way old versions did")
                        .long_help(
                            "Reads left neighbours the way old versions did\n\
                             In generation g, the left neighbour of every cell is \
                             read from column g - 1 of the previous row.\n",
                        )
                        .long("legacy-left-read")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("epidemic")
                .about("An epidemic spreading among moving individuals")
                .arg(
                    Arg::new("EMPTY_RATIO")
                        .help("Probability for a place to be empty at the start")
                        .long("empty-ratio")
                        .value_name("RATIO")
                        .value_parser(parse_ratio),
                )
                .arg(
                    Arg::new("HEALTHY_RATIO")
                        .help("Probability for an individual to be healthy at the start")
                        .long("healthy-ratio")
                        .value_name("RATIO")
                        .value_parser(parse_ratio),
                )
                .arg(
                    Arg::new("SICKNESS_DURATION")
                        .help("For how many generations an individual stays sick")
                        .long("sickness-duration")
                        .value_name("GENERATIONS")
                        .value_parser(value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new("OPEN_BORDER")
                        .help("Lets the epidemic reach the outermost rows and columns")
                        .long("open-border")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// The log level chosen by `-v` and `-q`.
pub(crate) fn log_level(matches: &ArgMatches) -> LevelFilter {
    let matches = innermost(matches);
    if matches.get_flag("QUIET") {
        return LevelFilter::Error;
    }
    match matches.get_count("VERBOSE") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Global arguments given after the subcommand only show up in the
/// subcommand's matches; those given before are propagated there.
fn innermost(matches: &ArgMatches) -> &ArgMatches {
    matches.subcommand().map_or(matches, |(_, sub)| sub)
}

/// Reads a configuration file. The format is chosen by the extension.
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config = match path.extension().and_then(OsStr::to_str) {
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        _ => bail!(
            "Unknown configuration format: {} (expected .toml, .yaml, .yml or .json)",
            path.display()
        ),
    };
    log::info!("Loaded the configuration from {}", path.display());
    Ok(config)
}

/// The parameters of the automaton chosen by a subcommand.
///
/// Parameters come from `base` when it is the same kind of automaton,
/// from the defaults otherwise; options override both.
fn automaton(name: &str, matches: &ArgMatches, base: AutomatonConfig) -> Result<AutomatonConfig> {
    let automaton = match name {
        "life" => {
            let mut params = match base {
                AutomatonConfig::Life(params) => params,
                _ => LifeParams::default(),
            };
            if let Some(&alive_ratio) = matches.get_one::<f64>("ALIVE_RATIO") {
                params.alive_ratio = alive_ratio;
            }
            AutomatonConfig::Life(params)
        }
        "wolfram" => {
            let mut params = match base {
                AutomatonConfig::Wolfram(params) => params,
                _ => WolframParams::default(),
            };
            if let Some(&start) = matches.get_one::<StartConfig>("START") {
                params.start = start;
            }
            if let Some(&rule) = matches.get_one::<Rule>("RULE") {
                params.rule = rule;
            }
            AutomatonConfig::Wolfram(params)
        }
        "who-wins" => {
            let mut params = match base {
                AutomatonConfig::WhoWins(params) => params,
                _ => WhoWinsParams::default(),
            };
            if let Some(&start) = matches.get_one::<StartConfig>("START") {
                params.start = start;
            }
            if let Some(&rule) = matches.get_one::<Rule>("RULE1") {
                params.rule1 = rule;
            }
            if let Some(&rule) = matches.get_one::<Rule>("RULE2") {
                params.rule2 = rule;
            }
            if let Some(&operator) = matches.get_one::<Operator>("OPERATOR") {
                params.operator = operator;
            }
            if matches.get_flag("LEGACY_LEFT_READ") {
                params.legacy_left_read = true;
            }
            AutomatonConfig::WhoWins(params)
        }
        "epidemic" => {
            let mut params = match base {
                AutomatonConfig::Epidemic(params) => params,
                _ => EpidemicParams::default(),
            };
            if let Some(&ratio) = matches.get_one::<f64>("EMPTY_RATIO") {
                params.empty_ratio = ratio;
            }
            if let Some(&ratio) = matches.get_one::<f64>("HEALTHY_RATIO") {
                params.healthy_ratio = ratio;
            }
            if let Some(&duration) = matches.get_one::<u32>("SICKNESS_DURATION") {
                params.sickness_duration = duration;
            }
            if matches.get_flag("OPEN_BORDER") {
                params.frozen_border = false;
            }
            AutomatonConfig::Epidemic(params)
        }
        _ => bail!("Unknown automaton: {}", name),
    };
    Ok(automaton)
}

/// A struct to store the parse results.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) output: Option<PathBuf>,
    pub(crate) print: bool,
    pub(crate) json: bool,
    pub(crate) dump_config: bool,
    pub(crate) delay: Option<Duration>,
}

impl Args {
    /// Collects the parse results, reading the configuration file if any.
    pub(crate) fn from_matches(top: &ArgMatches) -> Result<Self> {
        let matches = innermost(top);

        let mut config = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };
        if let Some((name, sub)) = top.subcommand() {
            config.automaton = automaton(name, sub, config.automaton)?;
        }

        if let Some(&width) = matches.get_one::<u32>("WIDTH") {
            config.dimensions.width = width;
        }
        if let Some(&height) = matches.get_one::<u32>("HEIGHT") {
            config.dimensions.height = height;
        }
        if let Some(&cell_size) = matches.get_one::<u32>("CELL_SIZE") {
            config = config.set_cell_size(cell_size);
        }
        if let Some(&generations) = matches.get_one::<usize>("GENERATIONS") {
            config = config.set_generations(generations);
        }
        if let Some(&seed) = matches.get_one::<u64>("SEED") {
            config = config.set_seed(seed);
        }

        Ok(Args {
            config,
            output: matches.get_one::<PathBuf>("OUTPUT").cloned(),
            print: matches.get_flag("PRINT"),
            json: matches.get_flag("JSON"),
            dump_config: matches.get_flag("DUMP_CONFIG"),
            delay: matches
                .get_one::<u64>("DELAY")
                .map(|&ms| Duration::from_millis(ms)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        let matches = command().try_get_matches_from(args)?;
        Args::from_matches(&matches)
    }

    #[test]
    fn valid_command() {
        command().debug_assert();
    }

    #[test]
    fn defaults() -> Result<()> {
        let args = parse(&["cellgen"])?;
        assert_eq!(args.config, Config::default());
        assert!(!args.print);
        assert_eq!(args.output, None);
        assert_eq!(args.delay, None);
        Ok(())
    }

    #[test]
    fn subcommand_options() -> Result<()> {
        let args = parse(&[
            "cellgen",
            "--width",
            "300",
            "who-wins",
            "--rule1",
            "rule110",
            "--operator",
            "and",
            "--seed",
            "3",
            "-p",
        ])?;
        assert_eq!(args.config.dimensions.width, 300);
        assert_eq!(args.config.dimensions.height, 600);
        assert_eq!(args.config.seed, Some(3));
        assert!(args.print);
        assert_eq!(
            args.config.automaton,
            AutomatonConfig::WhoWins(WhoWinsParams {
                rule1: Rule::Rule110,
                operator: Operator::And,
                ..WhoWinsParams::default()
            })
        );
        Ok(())
    }

    #[test]
    fn generations_and_flags() -> Result<()> {
        let args = parse(&["cellgen", "epidemic", "--open-border", "-g", "25", "-d", "40"])?;
        assert_eq!(
            args.config.automaton,
            AutomatonConfig::Epidemic(EpidemicParams {
                generations: 25,
                frozen_border: false,
                ..EpidemicParams::default()
            })
        );
        assert_eq!(args.delay, Some(Duration::from_millis(40)));
        Ok(())
    }

    #[test]
    fn invalid_values() {
        assert!(parse(&["cellgen", "life", "--alive-ratio", "1.5"]).is_err());
        assert!(parse(&["cellgen", "wolfram", "--rule", "184"]).is_err());
        assert!(parse(&["cellgen", "--cell-size", "0"]).is_err());
        assert!(parse(&["cellgen", "--print", "--json"]).is_err());
    }

    #[test]
    fn log_levels() -> Result<()> {
        let level = |args: &[&str]| -> Result<LevelFilter> {
            Ok(log_level(&command().try_get_matches_from(args)?))
        };
        assert_eq!(level(&["cellgen"])?, LevelFilter::Warn);
        assert_eq!(level(&["cellgen", "-vv", "life"])?, LevelFilter::Debug);
        assert_eq!(level(&["cellgen", "life", "-q"])?, LevelFilter::Error);
        Ok(())
    }

    #[test]
    fn config_file_formats() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("cellgen-args-{}", std::process::id()));
        fs::create_dir_all(&dir)?;

        let toml = dir.join("run.toml");
        fs::write(
            &toml,
            "cell_size = 20\nseed = 5\n\n[automaton]\nkind = \"epidemic\"\ngenerations = 30\n",
        )?;
        let args = parse(&["cellgen", "--config", toml.to_str().context("path")?])?;
        assert_eq!(args.config.dimensions.cell_size, 20);
        assert_eq!(args.config.seed, Some(5));
        assert_eq!(
            args.config.automaton,
            AutomatonConfig::Epidemic(EpidemicParams {
                generations: 30,
                ..EpidemicParams::default()
            })
        );

        // Options override the file, and parameters of the same kind are kept.
        let yaml = dir.join("run.yaml");
        fs::write(
            &yaml,
            "width: 200\nautomaton:\n  kind: wolfram\n  rule: 90\n  start: random\n",
        )?;
        let path = yaml.to_str().context("path")?;
        let args = parse(&["cellgen", "-c", path, "--width", "100", "wolfram", "-s", "middle"])?;
        assert_eq!(args.config.dimensions.width, 100);
        assert_eq!(
            args.config.automaton,
            AutomatonConfig::Wolfram(WolframParams {
                start: StartConfig::Middle,
                rule: Rule::Rule90,
            })
        );

        // Rule numbers may be written without quotes.
        let toml = dir.join("who-wins.toml");
        fs::write(&toml, "[automaton]\nkind = \"who-wins\"\nrule1 = 110\n")?;
        let args = parse(&["cellgen", "-c", toml.to_str().context("path")?])?;
        assert_eq!(
            args.config.automaton,
            AutomatonConfig::WhoWins(WhoWinsParams {
                rule1: Rule::Rule110,
                ..WhoWinsParams::default()
            })
        );

        let json = dir.join("run.json");
        fs::write(&json, r#"{"automaton": {"kind": "life", "alive_ratio": 0.25}}"#)?;
        let args = parse(&["cellgen", "-c", json.to_str().context("path")?])?;
        assert_eq!(
            args.config.automaton,
            AutomatonConfig::Life(LifeParams {
                alive_ratio: 0.25,
                ..LifeParams::default()
            })
        );

        let unknown = dir.join("run.ini");
        fs::write(&unknown, "")?;
        assert!(load_config(&unknown).is_err());

        fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
