//! Command-line driver (spec.md §6): loads a `.mtx` matrix, runs the BRKGA
//! driver to a wall-clock deadline, and reports the best profile found.
//! Grounded on `examples/vigna-webgraph-rs/cli/src/sccs.rs`'s
//! `clap::Parser` layout and `examples/vigna-webgraph-rs/src/main.rs`'s
//! top-level error handling.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::shells::Shell;

use profile_reduce::brkga::{self, BrkgaParams, InitMethod};
use profile_reduce::mtx;
use profile_reduce::rng;

const UNBOUNDED_SENTINEL: &str = "unbounded";

/// Minimizes the profile of a sparse symmetric matrix with a biased
/// random-key genetic algorithm over Sloan/MGPS/MPG/multilevel labelers.
#[derive(Parser, Debug)]
#[command(name = "profile-reduce", version)]
struct Cli {
    /// Path to the input .mtx file.
    filename: PathBuf,

    /// Wall-clock deadline, in seconds.
    #[arg(long, default_value_t = 10)]
    max_time: u64,

    /// 0 = constructive-N, 1 = msW-constructive.
    #[arg(long, default_value_t = 1)]
    init: u8,

    /// Population size P.
    #[arg(long, default_value_t = 20)]
    pop: usize,

    /// Elite count E.
    #[arg(long, default_value_t = 8)]
    elite: usize,

    /// Mutant count R.
    #[arg(long, default_value_t = 4)]
    mutants: usize,

    /// Elite-inheritance probability for biased crossover.
    #[arg(long, default_value_t = 0.75)]
    prob: f64,

    /// Reserved for the constructive-N sampler; unused by the BRKGA driver
    /// itself (spec.md §6).
    #[arg(long, default_value_t = 0.0)]
    alpha: f64,

    /// 0 = verbose console output; non-zero = print only the best profile.
    #[arg(long, default_value_t = 0)]
    irace: u8,

    /// Materialize every stored entry's transpose regardless of the .mtx
    /// header's symmetry keyword.
    #[arg(long, default_value_t = false)]
    force_symmetric: bool,

    /// Seed the RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Print shell completions for the given shell and exit.
    #[arg(long, value_enum, exclusive = true)]
    completions: Option<Shell>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "profile-reduce", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    env_logger::init();

    if let Some(seed) = cli.seed {
        rng::seed(seed);
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    log::debug!("{cli:?}");

    let mut g = mtx::load(&cli.filename, cli.force_symmetric)?;
    g.assert_feasible()?;
    g.max_time = Duration::from_secs(cli.max_time);

    let best_profile = Arc::new(AtomicUsize::new(usize::MAX));
    install_sigterm_handler(Arc::clone(&best_profile), cli.irace != 0);

    let initial_profile = g.evaluate_profile();
    best_profile.store(initial_profile, Ordering::Relaxed);

    if cli.irace == 0 {
        println!("initial profile: {initial_profile}");
        println!("{:>12} {:>12}", "generation", "best profile");
    }

    let params = BrkgaParams {
        pop: cli.pop,
        elite: cli.elite,
        mutants: cli.mutants,
        prob: cli.prob,
        init: match cli.init {
            0 => InitMethod::ConstructiveN,
            _ => InitMethod::MsWConstructive,
        },
    };

    let start = Instant::now();
    let best = brkga::run(&mut g, &params)?;
    best_profile.store(best, Ordering::Relaxed);
    g.assert_feasible()?;

    if cli.irace == 0 {
        println!("best profile: {best}");
        println!("elapsed: {:.3}s", start.elapsed().as_secs_f64());
    } else {
        println!("{best}");
    }

    Ok(ExitCode::SUCCESS)
}

/// Installs the process-level termination hook required by spec.md §5/§6:
/// on SIGTERM/SIGINT, print the currently recorded best profile (or the
/// unbounded sentinel if none was ever recorded) and exit 143.
fn install_sigterm_handler(best_profile: Arc<AtomicUsize>, irace: bool) {
    let result = ctrlc::set_handler(move || {
        let best = best_profile.load(Ordering::Relaxed);
        let mut stderr = std::io::stderr();
        if best == usize::MAX {
            let _ = writeln!(stderr, "{UNBOUNDED_SENTINEL}");
        } else if irace {
            let _ = writeln!(stderr, "{best}");
        } else {
            let _ = writeln!(stderr, "best profile: {best}");
        }
        std::process::exit(143);
    });
    if let Err(err) = result {
        log::warn!("failed to install termination handler: {err}");
    }
}
