use std::{fs::File, path::PathBuf, time::Duration};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dpll_cut::{
    catalog,
    generator::ClauseSetCache,
    io::{self, report::ReportOptions},
    ladder::{run_ladder, LadderEnd},
    solver::{verify, DeadlinePolicy, Solver, SolverConfig, DEFAULT_TIMEOUT},
    types::Problem,
};

#[derive(Parser)]
#[command(name = "dpll-cut")]
#[command(version, about = "Backtracking SAT solver with a wall-clock deadline", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a DIMACS CNF file
    Solve(SolveArgs),
    /// Solve unsatisfiable benchmarks of growing size until one times out
    Bench(BenchArgs),
    /// Run the built-in instances and check every verdict
    Demo(DeadlineArgs),
}

#[derive(Args, Clone, Copy)]
struct DeadlineArgs {
    /// Wall-clock limit for one search, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs_f64())]
    timeout: f64,

    /// Keep a verdict reached before the deadline even if the call overran it
    #[arg(long)]
    keep_late_verdict: bool,
}

impl DeadlineArgs {
    fn config(self) -> anyhow::Result<SolverConfig> {
        let timeout = Duration::try_from_secs_f64(self.timeout)
            .with_context(|| format!("invalid timeout {}", self.timeout))?;
        let policy = if self.keep_late_verdict {
            DeadlinePolicy::KeepVerdict
        } else {
            DeadlinePolicy::Strict
        };
        Ok(SolverConfig::default()
            .with_timeout(timeout)
            .with_deadline_policy(policy))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Dimacs,
}

#[derive(Args)]
struct SolveArgs {
    /// Input file in DIMACS CNF format
    input: PathBuf,

    #[command(flatten)]
    deadline: DeadlineArgs,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the model of a satisfiable formula (text format)
    #[arg(long)]
    model: bool,

    /// Echo the clause set (text format)
    #[arg(long)]
    clauses: bool,
}

#[derive(Args)]
struct BenchArgs {
    /// Variable count of the first benchmark
    #[arg(long, default_value_t = 3)]
    start: usize,

    /// Variable count of the last benchmark
    #[arg(long, default_value_t = 20)]
    ceiling: usize,

    #[command(flatten)]
    deadline: DeadlineArgs,
}

fn solve(args: SolveArgs) -> anyhow::Result<()> {
    let config = args.deadline.config()?;
    let mut input =
        File::open(&args.input).with_context(|| format!("cannot open {}", args.input.display()))?;
    let problem = io::read_problem(&mut input)
        .with_context(|| format!("cannot parse {}", args.input.display()))?;

    info!(
        vars = problem.var_count,
        clauses = problem.clauses.len(),
        "problem loaded"
    );
    let result = Solver::with_config(problem, config)?.solve();

    let mut output = std::io::stdout();
    match args.format {
        Format::Text => {
            let options = ReportOptions {
                model: args.model,
                clauses: args.clauses,
            };
            io::report::write_report(&mut output, &result, options)?
        }
        Format::Dimacs => io::write_solution(&mut output, &result)?,
    }
    Ok(())
}

fn bench(args: BenchArgs) -> anyhow::Result<()> {
    if args.start > args.ceiling {
        bail!("start ({}) exceeds ceiling ({})", args.start, args.ceiling);
    }
    let config = args.deadline.config()?;

    let mut cache = ClauseSetCache::new();
    cache.preload(args.ceiling)?;
    info!(ceiling = args.ceiling, "benchmarks preloaded");

    let mut output = std::io::stdout();
    let mut report_err = Ok(());
    let end = run_ladder(&mut cache, args.start, args.ceiling, config, |_, result| {
        if report_err.is_ok() {
            report_err = io::report::write_report(&mut output, result, ReportOptions::default());
        }
    })?;
    report_err?;

    if end == LadderEnd::Ceiling {
        println!("Reached end of pre-generated clause sets. Terminating...");
    }
    Ok(())
}

fn demo(args: DeadlineArgs) -> anyhow::Result<()> {
    let config = args.config()?;
    let mut output = std::io::stdout();
    let mut cache = ClauseSetCache::new();

    println!("=== Satisfiable test cases BEGIN ===");
    let clauses = cache.get(3)?.to_vec();
    let without_last = clauses[..clauses.len() - 1].to_vec();
    let without_first = clauses[1..].to_vec();
    for clauses in [without_last, without_first] {
        let result = Solver::with_config(Problem::from_clauses(clauses), config)?.solve();
        let options = ReportOptions {
            model: true,
            clauses: false,
        };
        io::report::write_report(&mut output, &result, options)?;
    }
    println!("=== Satisfiable test cases END ===");

    let mut failed = vec![];
    let battery = catalog::satisfiable()
        .into_iter()
        .map(|instance| (instance, true))
        .chain(catalog::unsatisfiable().into_iter().map(|instance| (instance, false)));
    for (instance, sat) in battery {
        let result = Solver::with_config(instance.problem(), config)?.solve();
        if !verify(&instance.clauses, sat, &result) {
            failed.push(instance.name);
        }
    }

    if !failed.is_empty() {
        bail!("wrong verdict for: {}", failed.join(", "));
    }
    println!("All built-in instances decided correctly.");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve(args) => solve(args),
        Commands::Bench(args) => bench(args),
        Commands::Demo(args) => demo(args),
    }
}
