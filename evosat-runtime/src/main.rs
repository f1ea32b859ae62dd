use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use evosat_algorithms::{metaheuristics, Settings};
use evosat_challenges::{read_dimacs, write_dimacs, Formula, Solution};
use evosat_utils::{compress_obj, dejsonify, jsonify, resolve_seed, seeded_rng};
use std::{collections::HashSet, fs, io::Read, path::PathBuf};

fn cli() -> Command {
    Command::new("evosat")
        .about("Solves, verifies and generates SAT instances")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Searches for a satisfying assignment")
                .arg(
                    arg!(--instance <INSTANCE> "Path to a formula in DIMACS format")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--settings [SETTINGS] "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(--Npop [N] "Population size").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(--Ncross [N] "Number of crossovers per iteration")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--IndMut [P] "Probability of mutating a child")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--GeneMut [P] "Probability of flipping each gene of a mutated child")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--MNI [N] "Maximum number of iterations")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--Meta [META] "Metaheuristic: GA or Placebo")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--Heur [HEUR] "Heuristic: none, flip, sls or walksat")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--Nsteps [N] "Step budget of sls and walksat")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(arg!(--Cb [CB] "Break exponent of sls").value_parser(clap::value_parser!(f64)))
                .arg(
                    arg!(--Eps [EPS] "Break offset of sls")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--q [Q] "Random move probability of walksat")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--seed [SEED] "Random seed, 0 for a random one")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the report will be saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress [COMPRESS] "If output file is set, the report will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a solution")
                .arg(
                    arg!(<INSTANCE> "Path to a formula in DIMACS format")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random formula")
                .arg(
                    arg!(--letters <N> "Number of letters")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--clauses <M> "Number of clauses")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--length <K> "Number of literals per clause")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--seed [SEED] "Random seed, 0 for a random one")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the formula will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cmd = cli();
    let args = drop_unknown_options(&cmd, std::env::args().collect());
    let matches = cmd.get_matches_from(args);

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => settings_from_matches(sub_m).and_then(|settings| {
            solve(
                sub_m.get_one::<PathBuf>("instance").unwrap().clone(),
                settings,
                sub_m.get_one::<PathBuf>("output").cloned(),
                *sub_m.get_one::<bool>("compress").unwrap(),
            )
        }),
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<PathBuf>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        Some(("generate", sub_m)) => generate(
            *sub_m.get_one::<usize>("letters").unwrap(),
            *sub_m.get_one::<usize>("clauses").unwrap(),
            *sub_m.get_one::<usize>("length").unwrap(),
            *sub_m.get_one::<u64>("seed").unwrap(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Removes `--name [value]` options the selected subcommand does not declare,
/// logging a warning for each. A following token is taken as the value unless
/// it starts with `--` or the subcommand takes positional arguments, which
/// the token could be.
fn drop_unknown_options(cmd: &Command, args: Vec<String>) -> Vec<String> {
    let Some(sub) = args.get(1).and_then(|name| cmd.find_subcommand(name)) else {
        return args;
    };
    let known: HashSet<&str> = sub
        .get_arguments()
        .filter_map(|a| a.get_long())
        .chain(["help"])
        .collect();
    let takes_positionals = sub.get_positionals().next().is_some();

    let mut kept = Vec::with_capacity(args.len());
    let mut args = args.into_iter().peekable();
    kept.extend(args.by_ref().take(2));
    while let Some(arg) = args.next() {
        if let Some(option) = arg.strip_prefix("--") {
            let (name, inline_value) = match option.split_once('=') {
                Some((name, _)) => (name, true),
                None => (option, false),
            };
            if !name.is_empty() && !known.contains(name) {
                let value = if inline_value || takes_positionals {
                    None
                } else {
                    args.next_if(|next| !next.starts_with("--"))
                };
                match value {
                    Some(value) => {
                        log::warn!("Ignoring unknown option '{}' with value '{}'", arg, value)
                    }
                    None => log::warn!("Ignoring unknown option '{}'", arg),
                }
                continue;
            }
        }
        kept.push(arg);
    }
    kept
}

fn settings_from_matches(sub_m: &ArgMatches) -> Result<Settings> {
    let mut settings = match sub_m.get_one::<String>("settings") {
        Some(settings) => load_settings(settings)?,
        None => Settings::default(),
    };
    if let Some(&v) = sub_m.get_one::<usize>("Npop") {
        settings.population_size = v;
    }
    if let Some(&v) = sub_m.get_one::<usize>("Ncross") {
        settings.number_of_crossovers = v;
    }
    if let Some(&v) = sub_m.get_one::<f64>("IndMut") {
        settings.individual_mutation_probability = v;
    }
    if let Some(&v) = sub_m.get_one::<f64>("GeneMut") {
        settings.gene_mutation_probability = v;
    }
    if let Some(&v) = sub_m.get_one::<usize>("MNI") {
        settings.max_iterations = v;
    }
    if let Some(name) = sub_m.get_one::<String>("Meta") {
        settings.metaheuristic = name.parse()?;
    }
    if let Some(name) = sub_m.get_one::<String>("Heur") {
        settings.heuristic = name.parse()?;
    }
    if let Some(&v) = sub_m.get_one::<usize>("Nsteps") {
        settings.steps = v;
    }
    if let Some(&v) = sub_m.get_one::<f64>("Cb") {
        settings.cb = v;
    }
    if let Some(&v) = sub_m.get_one::<f64>("Eps") {
        settings.epsilon = v;
    }
    if let Some(&v) = sub_m.get_one::<f64>("q") {
        settings.q = v;
    }
    if let Some(&v) = sub_m.get_one::<u64>("seed") {
        settings.seed = v;
    }
    Ok(settings)
}

pub fn solve(
    instance: PathBuf,
    mut settings: Settings,
    output_file: Option<PathBuf>,
    compress: bool,
) -> Result<()> {
    let heuristic = settings.build_heuristic()?;
    let strategy = settings.build_strategy()?;
    let formula = read_dimacs(&instance)?;

    settings.seed = resolve_seed(settings.seed);
    log::info!("Using seed {}", settings.seed);

    let report = metaheuristics::solve(
        strategy.as_ref(),
        &formula,
        heuristic.as_ref(),
        settings.seed,
    );
    println!("{}", report);

    if let Some(path) = output_file {
        if compress {
            fs::write(&path, compress_obj(&report)?)?;
        } else {
            fs::write(&path, jsonify(&report)?)?;
        }
        log::info!("Report saved to {}", path.display());
    }
    Ok(())
}

pub fn verify(instance: PathBuf, solution: String) -> Result<()> {
    let formula = read_dimacs(&instance)?;
    let solution = load_solution(&solution)?;
    formula.verify_solution(&solution)?;
    println!("Solution is valid");
    Ok(())
}

pub fn generate(
    num_letters: usize,
    num_clauses: usize,
    clause_length: usize,
    seed: u64,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let seed = resolve_seed(seed);
    let formula =
        Formula::generate_random(num_letters, num_clauses, clause_length, &mut seeded_rng(seed))?;
    let text = format!("c seed = {}\n{}", seed, write_dimacs(&formula));

    match output_file {
        Some(path) => {
            fs::write(&path, text)
                .with_context(|| format!("Failed to write formula file: {}", path.display()))?;
            log::info!("Formula saved to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn load_settings(settings: &str) -> Result<Settings> {
    let settings = if settings.ends_with(".json") {
        fs::read_to_string(settings)
            .with_context(|| format!("Failed to read settings file: {}", settings))?
    } else {
        settings.to_string()
    };

    dejsonify::<Settings>(&settings).context("Failed to parse settings")
}

fn load_solution(solution: &str) -> Result<Solution> {
    let solution = if solution == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read solution from stdin")?;
        buffer
    } else if solution.ends_with(".json") {
        fs::read_to_string(solution)
            .with_context(|| format!("Failed to read solution file: {}", solution))?
    } else {
        solution.to_string()
    };

    dejsonify::<Solution>(&solution).context("Failed to parse solution")
}
