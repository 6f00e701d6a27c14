//! # tango
//!
//! `tango` is a command-line solver for Tango logic puzzles: 6×6 grids of
//! suns and moons with balanced rows and columns, no three equal symbols in a
//! line, and `=` / `x` marks between neighbouring cells.
//!
//! ## Usage
//!
//! ```sh
//! tango [OPTIONS] [PATH] [SUBCOMMAND]
//! ```
//!
//! -   `PATH`: if provided without a subcommand it is solved as a puzzle file,
//!     or, for a directory, every `.tango` file below it is solved.
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve a puzzle file.
//!     ```sh
//!     tango file --path puzzle.tango
//!     ```
//!
//! 2.  **`text`**: Solve a puzzle given inline.
//!     ```sh
//!     tango text --board 222222222222220022221022221122220022 -c "2 3 x" -c "6 7 ="
//!     ```
//!
//! 3.  **`samples`**: Solve the bundled sample puzzles and compare them with their
//!     known solutions.
//!
//! 4.  **`completions`**: Print a shell completion script.
//!
//! ### Common Options
//!
//! These may be given before or after the subcommand.
//!
//! -   `-d, --debug`: Enable debug logging (default: `false`). `RUST_LOG` overrides it.
//! -   `--verify <BOOL>`: Check the solution with the board validator (default: `true`).
//! -   `--stats <BOOL>`: Print problem and search statistics (default: `true`).
//!
//! ## Puzzle files
//!
//! The first non-comment line is the board as 36 digits (`0` sun, `1` moon,
//! `2` blank); each following line is a constraint `FROM TO RELATION` with
//! `=` or `==` for equal and `x`, `X` or `!=` for different. Lines starting
//! with `#` are comments.

use crate::command_line::cli::{Cli, run};
use anyhow::Result;
use clap::Parser;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also provides the
/// memory figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Sets up `env_logger`. `RUST_LOG` wins over the `--debug` switch.
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.common.debug);
    run(cli)
}
