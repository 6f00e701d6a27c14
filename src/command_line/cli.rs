#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tango_solver::tango::puzzle::parse_pair;
use tango_solver::tango::{
    Board, CompiledConstraints, Puzzle, SAMPLES, Sample, SolveStats, Solver, parse_file, validate,
};
use tikv_jemalloc_ctl::{epoch, stats};

/// File extension of puzzle files picked up when solving a directory.
pub(crate) const PUZZLE_EXTENSION: &str = "tango";

/// Defines the command-line interface for the tango solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "tango", version, about = "A backtracking Tango puzzle solver")]
pub(crate) struct Cli {
    /// An optional path. If provided without a subcommand it is solved as a
    /// puzzle file, or as a directory of `.tango` puzzle files.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `samples`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Options shared by every command. They may be given before or after
    /// the subcommand.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,
    },

    /// Solve a puzzle given on the command line.
    Text {
        /// The board as 36 digits: 0 = sun, 1 = moon, 2 = blank.
        #[arg(short, long)]
        board: String,

        /// A constraint as "FROM TO RELATION", e.g. "2 3 x" or "6 7 =".
        /// May be repeated.
        #[arg(short, long = "constraint")]
        constraints: Vec<String>,
    },

    /// Solve the bundled sample puzzles and check them against their known solutions.
    Samples,

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output. `RUST_LOG` takes precedence when set.
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check the solution with the independent board validator.
    #[arg(long, global = true, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(long, global = true, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) stats: bool,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: true,
        }
    }
}

/// Outcome of a single solve, as reported to the user.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Report {
    /// The solved board, if a solution was found.
    pub(crate) solution: Option<Board>,
    /// Time spent in the search.
    pub(crate) elapsed: Duration,
    /// Counters collected by the solver.
    pub(crate) stats: SolveStats,
}

/// Runs the parsed command line.
///
/// # Errors
///
/// If no path or subcommand was given, or the selected command fails.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let common = &cli.common;

    match cli.command {
        Some(Commands::File { path }) => solve_path(&path, common),
        Some(Commands::Text { board, constraints }) => solve_text(&board, &constraints, common),
        Some(Commands::Samples) => solve_samples(common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_path(&path, common),
            None => bail!("no command provided, use --help for more information"),
        },
    }
}

/// Solves `path`, which is either a puzzle file or a directory of them.
///
/// # Errors
///
/// If the path does not exist, or a puzzle cannot be parsed or fails
/// verification.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> Result<()> {
    if path.is_dir() {
        solve_dir(path, common)
    } else {
        solve_file(path, common).map(|_| ())
    }
}

/// Solves every `.tango` file below `path`.
///
/// # Errors
///
/// If any puzzle file cannot be parsed or fails verification.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<()> {
    if !path.is_dir() {
        bail!("provided path is not a directory: {}", path.display());
    }

    let mut solved = 0usize;
    let mut total = 0usize;

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !file_path.is_file() {
            continue;
        }

        if file_path
            .extension()
            .is_none_or(|ext| ext != PUZZLE_EXTENSION)
        {
            log::info!("skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        total += 1;
        if solve_file(file_path, common)? {
            solved += 1;
        }
    }

    println!("\nSolved {solved} of {total} puzzles in {}", path.display());
    Ok(())
}

/// Parses and solves a single puzzle file. Returns whether it was solved.
///
/// # Errors
///
/// If the file cannot be read or parsed, or the solution fails verification.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<bool> {
    if !path.exists() {
        bail!("puzzle file does not exist: {}", path.display());
    }

    let time = Instant::now();
    let puzzle = parse_file(path)
        .with_context(|| format!("failed to parse puzzle file {}", path.display()))?;
    let parse_time = time.elapsed();

    let report = solve_and_report(&puzzle, common, Some(path), parse_time)?;
    Ok(report.solution.is_some())
}

/// Solves a puzzle given as a board string and constraint strings.
///
/// # Errors
///
/// If the board or any constraint is malformed, or the solution fails
/// verification.
pub(crate) fn solve_text(
    board: &str,
    constraints: &[String],
    common: &CommonOptions,
) -> Result<()> {
    let time = Instant::now();
    let board: Board = board.parse().context("invalid board")?;
    let pairs = constraints
        .iter()
        .enumerate()
        .map(|(i, text)| parse_pair(text, i + 1))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid constraint")?;
    let parse_time = time.elapsed();

    solve_and_report(&Puzzle::new(board, pairs), common, None, parse_time)?;
    Ok(())
}

/// Solves the bundled samples and compares each result with its known
/// solution.
///
/// # Errors
///
/// If any sample is unsolved or solves to a board other than its expected
/// solution.
pub(crate) fn solve_samples(common: &CommonOptions) -> Result<()> {
    check_samples(&SAMPLES, common)
}

/// Solves each of `samples` and compares the result with its solution.
///
/// # Errors
///
/// If any sample is unsolved or solves to a board other than its expected
/// solution.
pub(crate) fn check_samples(samples: &[Sample], common: &CommonOptions) -> Result<()> {
    let mut failures = Vec::new();

    for (index, sample) in samples.iter().enumerate() {
        println!("Testcase {}: {}", index + 1, sample.name);

        let puzzle = sample.puzzle()?;
        let expected = sample.solution()?;
        let report = solve_and_report(&puzzle, common, None, Duration::ZERO)?;

        match report.solution {
            Some(board) if board == expected => println!("Success"),
            Some(board) => {
                println!("Failure. Expected:\n{expected}Got:\n{board}");
                failures.push(sample.name);
            }
            None => {
                println!("Failure: could not solve");
                failures.push(sample.name);
            }
        }
        println!("...");
    }

    if !failures.is_empty() {
        bail!(
            "{} of {} samples failed: {}",
            failures.len(),
            samples.len(),
            failures.join(", ")
        );
    }
    Ok(())
}

/// Solves a puzzle and reports results including stats and verification.
///
/// # Arguments
/// * `puzzle` - The puzzle to solve.
/// * `common` - `CommonOptions` providing the verification and statistics switches.
/// * `label` - An optional label for the problem (e.g. file path).
/// * `parse_time` - The time taken to parse the puzzle input.
///
/// # Errors
///
/// If verification is enabled and the solution breaks a rule.
pub(crate) fn solve_and_report(
    puzzle: &Puzzle,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<Report> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }
    println!("Parsed puzzle:\n{puzzle}");

    let constraints = puzzle.compile();
    let report = solve(puzzle, &constraints);

    if common.verify {
        verify_solution(report.solution.as_ref(), &constraints)?;
    }

    if common.stats {
        let (allocated, resident) = memory_usage()?;
        print_stats(
            parse_time,
            puzzle,
            &constraints,
            &report,
            allocated,
            resident,
        );
    }

    match report.solution {
        Some(board) => println!("Solution:\n{board}\nSOLVED"),
        None => println!("No solution found\n\nUNSOLVABLE"),
    }

    Ok(report)
}

/// Runs the solver on a copy of the puzzle's board.
pub(crate) fn solve(puzzle: &Puzzle, constraints: &CompiledConstraints) -> Report {
    let mut board = puzzle.board;
    let mut solver = Solver::new(constraints);

    let time = Instant::now();
    let solved = solver.solve(&mut board);
    let elapsed = time.elapsed();

    log::debug!("solve took {elapsed:?}");

    Report {
        solution: solved.then_some(board),
        elapsed,
        stats: solver.stats(),
    }
}

/// Verifies a solved board against the puzzle rules.
///
/// Prints whether the verification was successful. If the puzzle was not
/// solved there is nothing to verify.
///
/// # Errors
///
/// If the board breaks any rule.
pub(crate) fn verify_solution(
    solution: Option<&Board>,
    constraints: &CompiledConstraints,
) -> Result<()> {
    let Some(board) = solution else {
        println!("Verified: nothing to verify");
        return Ok(());
    };

    validate(board, constraints)
        .map_err(|violation| anyhow!("solution failed verification: {violation}"))?;
    println!("Verified: true");
    Ok(())
}

/// Reads the allocated and resident memory from jemalloc, in MiB.
///
/// # Errors
///
/// If the jemalloc statistics cannot be read.
pub(crate) fn memory_usage() -> Result<(f64, f64)> {
    epoch::advance().map_err(|e| anyhow!("failed to refresh jemalloc stats: {e}"))?;

    let allocated = stats::allocated::read()
        .map_err(|e| anyhow!("failed to read allocated bytes: {e}"))?;
    let resident = stats::resident::read()
        .map_err(|e| anyhow!("failed to read resident bytes: {e}"))?;

    Ok((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The raw count for the statistic.
/// * `elapsed` - The elapsed time in seconds, used to calculate the rate.
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    puzzle: &Puzzle,
    constraints: &CompiledConstraints,
    report: &Report,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = report.elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Blank cells", puzzle.board.blanks());
    stat_line("Constraint pairs", puzzle.pairs.len());
    stat_line("Compiled rules", constraints.rule_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Placements", report.stats.placements, elapsed_secs);
    stat_line_with_rate("Rejections", report.stats.rejections, elapsed_secs);
    stat_line_with_rate("Backtracks", report.stats.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.6}"));
    println!("=====================================================================\n");
}
