use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use threesum_bench::config::{self, Config, Settings};
use threesum_bench::errors::BenchError;
use threesum_bench::harness;
use threesum_bench::report;
use threesum_bench::triples::Algorithm;
use threesum_bench::verify;

#[derive(Parser)]
#[command(
    name = "threesum-bench",
    version,
    about = "Time the sort + binary-search three-sum counter over doubling input sizes",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,

    /// TOML config file (default: <config dir>/threesum-bench/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log per-trial details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run every configured experiment, then the self-check (default)
    Run(RunArgs),
    /// Only run the self-check on the two fixed arrays
    Verify,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Directory the results files are written to
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Results file name; repeat for several runs
    #[arg(long = "run", value_name = "FILE")]
    runs: Vec<String>,

    /// Trials averaged per input size
    #[arg(long)]
    trials: Option<usize>,

    /// Smallest input size
    #[arg(long)]
    min_size: Option<usize>,

    /// Largest input size
    #[arg(long)]
    max_size: Option<usize>,

    /// Inclusive lower bound of random values
    #[arg(long, allow_hyphen_values = true)]
    min_value: Option<i64>,

    /// Exclusive upper bound of random values
    #[arg(long, allow_hyphen_values = true)]
    max_value: Option<i64>,

    /// Seed for reproducible inputs
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Skip the untimed warm-up trial before each batch
    #[arg(long)]
    no_warmup: bool,

    /// Skip the self-check after the runs
    #[arg(long)]
    skip_verify: bool,

    /// Print a JSON summary instead of the console table
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn settings(&self) -> Settings {
        Settings {
            results_dir: self.results_dir.clone(),
            runs: (!self.runs.is_empty()).then(|| self.runs.clone()),
            trials: self.trials,
            min_size: self.min_size,
            max_size: self.max_size,
            min_value: self.min_value,
            max_value: self.max_value,
            seed: self.seed,
            algorithm: self.algorithm,
            warmup: self.no_warmup.then_some(false),
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_self_check(to_stderr: bool) -> Result<()> {
    let check = verify::self_check();
    let line = report::format_self_check(&check);
    if to_stderr {
        eprint!("{}", line);
    } else {
        print!("{}", line);
    }
    check.into_result()?;
    Ok(())
}

fn run_benchmarks(args: &RunArgs, config_path: Option<&std::path::Path>) -> Result<()> {
    let file_settings = config::resolve_file_settings(config_path)?;
    let config = Config::default().merge(file_settings).merge(args.settings());
    let bench = config.bench_config()?;

    let paths = config.run_paths();
    let total = paths.len();
    let mut completed = Vec::new();
    let mut failed = 0;

    for (i, path) in paths.into_iter().enumerate() {
        info!(
            "running experiment {}/{} into {} ({} trials, sizes {}..={})",
            i + 1,
            total,
            path.display(),
            bench.trials,
            bench.min_size,
            bench.max_size
        );

        match harness::run_to_file(&bench, &path) {
            Ok(report) => {
                if !args.json {
                    print!("{}", report::format_summary(&path, &report));
                }
                completed.push((path, report));
            }
            Err(err) => {
                error!("{:#}", err);
                failed += 1;
            }
        }
    }

    if args.json {
        println!("{}", report::format_json(&bench, &completed));
    }

    let check = if args.skip_verify {
        Ok(())
    } else {
        run_self_check(args.json)
    };

    if failed > 0 {
        warn!("{} of {} runs failed", failed, total);
        return Err(BenchError::RunsFailed { failed, total }.into());
    }
    check
}

fn run() -> Result<()> {
    let Cli {
        command,
        run,
        config,
        verbose,
        quiet,
    } = Cli::parse();

    init_logging(verbose, quiet);

    match command.unwrap_or(Command::Run(run)) {
        Command::Run(args) => run_benchmarks(&args, config.as_deref()),
        Command::Verify => run_self_check(false),
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
