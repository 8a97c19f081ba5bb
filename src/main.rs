//! CLI entry point for fscout

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use fscout::output::{TablePrinter, print_json};
use fscout::{SearchConfig, SearchError, SearchWalker};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fscout")]
#[command(about = "Walk a directory tree and classify every file and folder")]
#[command(version)]
struct Args {
    /// Directory to search
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Do not descend into subdirectories
    #[arg(short = 'n', long = "no-recurse")]
    no_recurse: bool,

    /// Emit every visited entry, including non-matches
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Exclude paths containing this substring (repeatable, case-insensitive)
    #[arg(short = 'e', long = "exclude", value_name = "SUBSTRING")]
    exclude: Vec<String>,

    /// Include paths containing this substring (repeatable, case-insensitive)
    #[arg(short = 'i', long = "include", value_name = "SUBSTRING")]
    include: Vec<String>,

    /// Output the full records as JSON
    #[arg(long = "json")]
    json: bool,

    /// Worker threads for record extraction
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "1")]
    jobs: usize,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = fscout::logging::init() {
        eprintln!("fscout: failed to install logger: {e}");
    }

    let config = SearchConfig {
        root_path: args.path,
        recursive: !args.no_recurse,
        return_all: args.all,
        exclude: args.exclude,
        include: args.include,
        parallel_workers: args.jobs,
    };
    let walker = SearchWalker::new(config);

    let result = if args.json {
        match walker.execute() {
            Ok(outcome) => print_json(&outcome.records),
            Err(e) => fatal(&e),
        }
    } else {
        let mut printer = TablePrinter::new(should_use_color(args.color));
        match walker.execute_streaming(&mut printer) {
            Ok(_) => Ok(()),
            Err(e) => fatal(&e),
        }
    };

    if let Err(e) = result {
        eprintln!("fscout: error writing output: {e}");
        process::exit(1);
    }
}

fn fatal(err: &SearchError) -> ! {
    eprintln!("fscout: {err}");
    process::exit(1);
}
