//! Command-line front-end for the `sary` suffix-array search engine,
//! mirroring the flag table and output conventions of the original
//! `sary` tool.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use sary::build::ipoint::{Bytes, Lines, Paragraphs, Words};
use sary::build::Builder;
use sary::progress::QuietProgress;
use sary::Searcher;

#[derive(Parser)]
#[command(name = "sary", version, about = "Substring search over a memory-mapped suffix array")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a text file for PATTERN using its suffix array.
    Search(SearchArgs),
    /// Build the suffix array for a text file.
    Index(IndexArgs),
}

#[derive(Parser)]
struct SearchArgs {
    pattern: String,
    file: PathBuf,

    /// Path to the array file (default: FILE.ary).
    #[arg(short = 'a', long = "array")]
    array: Option<PathBuf>,

    /// Only print the number of occurrences.
    #[arg(short = 'c', long = "count")]
    count: bool,

    /// Ignore ASCII case distinctions.
    #[arg(short = 'i', long = "ignore-case")]
    ignore_case: bool,

    /// Print matches in array order instead of sorting by text offset.
    #[arg(short = 'l', long = "lexicographical")]
    lexicographical: bool,

    /// Lines of trailing context.
    #[arg(short = 'A', long = "after-context")]
    after_context: Option<usize>,

    /// Lines of leading context.
    #[arg(short = 'B', long = "before-context")]
    before_context: Option<usize>,

    /// Lines of context on both sides (default 2 if given with no value).
    #[arg(short = 'C', long = "context", num_args = 0..=1, default_missing_value = "2")]
    context: Option<usize>,

    /// Start tag for tagged-region output; requires --end.
    #[arg(short = 's', long = "start")]
    start: Option<String>,

    /// End tag for tagged-region output; requires --start.
    #[arg(short = 'e', long = "end")]
    end: Option<String>,
}

#[derive(Parser)]
struct IndexArgs {
    file: PathBuf,

    /// Path to write the array file (default: FILE.ary).
    #[arg(short = 'a', long = "array")]
    array: Option<PathBuf>,

    /// Index-point strategy: bytes, words, lines, or paragraphs.
    #[arg(long = "strategy", default_value = "bytes")]
    strategy: String,
}

enum Mode {
    Count,
    Line,
    Context { before: usize, after: usize },
    Tagged { start: Vec<u8>, end: Vec<u8> },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Search(args) => run_search(args),
        Command::Index(args) => run_index(args),
    }
}

fn default_array_path(file: &PathBuf) -> PathBuf {
    let mut name = file.clone().into_os_string();
    name.push(".ary");
    PathBuf::from(name)
}

fn run_index(args: IndexArgs) -> Result<()> {
    let array_path = args.array.unwrap_or_else(|| default_array_path(&args.file));
    let mut progress = QuietProgress;

    log::info!("indexing {} -> {}", args.file.display(), array_path.display());

    match args.strategy.as_str() {
        "bytes" => {
            let builder = Builder::with_strategy(Bytes);
            builder.build_file_to_array(&args.file, &array_path, &mut progress)
        }
        "words" => {
            let builder = Builder::with_strategy(Words);
            builder.build_file_to_array(&args.file, &array_path, &mut progress)
        }
        "lines" => {
            let builder = Builder::with_strategy(Lines);
            builder.build_file_to_array(&args.file, &array_path, &mut progress)
        }
        "paragraphs" => {
            let builder = Builder::with_strategy(Paragraphs);
            builder.build_file_to_array(&args.file, &array_path, &mut progress)
        }
        other => bail!("unknown index-point strategy: {other}"),
    }
    .with_context(|| format!("failed to build array for {}", args.file.display()))
}

fn run_search(args: SearchArgs) -> Result<()> {
    if args.start.is_some() != args.end.is_some() {
        bail!("--start and --end must be given together");
    }

    let mode = if args.count {
        Mode::Count
    } else if let (Some(start), Some(end)) = (&args.start, &args.end) {
        Mode::Tagged {
            start: start.clone().into_bytes(),
            end: end.clone().into_bytes(),
        }
    } else if args.after_context.is_some() || args.before_context.is_some() || args.context.is_some() {
        let before = args.context.or(args.before_context).unwrap_or(0);
        let after = args.context.or(args.after_context).unwrap_or(0);
        Mode::Context { before, after }
    } else {
        Mode::Line
    };

    let array_path = args.array.clone().unwrap_or_else(|| default_array_path(&args.file));
    let mut searcher = Searcher::open(&args.file, &array_path)
        .with_context(|| format!("failed to open {} / {}", args.file.display(), array_path.display()))?;

    let pattern = args.pattern.as_bytes();
    let found = if args.ignore_case {
        searcher.icase_search(pattern)
    } else {
        searcher.search(pattern)
    };

    if let Mode::Count = mode {
        println!("{}", if found { searcher.count_occurrences() } else { 0 });
        return Ok(());
    }

    if !found {
        return Ok(());
    }

    if !args.lexicographical {
        searcher.sort_occurrences();
    }

    let (separator, separator2): (&[u8], &[u8]) = match &mode {
        Mode::Line => (b"", b""),
        Mode::Context { .. } => (b"--\n", b""),
        Mode::Tagged { .. } => (b"--\n", b"\n"),
        Mode::Count => unreachable!(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut sep: Option<&[u8]> = None;
    let mut sep2: Option<&[u8]> = None;
    let mut count = 0usize;

    loop {
        let region = match &mode {
            Mode::Line => searcher.next_line(),
            Mode::Context { before, after } => searcher.next_context(*before, *after),
            Mode::Tagged { start, end } => searcher.next_tagged_region(start, end),
            Mode::Count => unreachable!(),
        };
        let Some(range) = region else { break };

        if let Some(s2) = sep2 {
            out.write_all(s2)?;
        }
        if let Some(s) = sep {
            out.write_all(s)?;
        }
        out.write_all(&searcher.slice_region(range))?;

        sep = Some(separator);
        sep2 = Some(separator2);
        count += 1;
    }

    if count > 1 {
        if let Some(s2) = sep2 {
            out.write_all(s2)?;
        }
    }

    Ok(())
}
