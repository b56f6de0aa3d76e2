// egrep: print every match of a pattern in a file

use std::path::PathBuf;
use std::time::Instant;

use automata_search::{Config, LineMatch, Searcher};
use clap::Parser;

/// Search a file for a pattern, line by line
///
/// Literal patterns are searched with KMP, every other pattern with a DFA.
#[derive(Parser, Debug)]
#[command(name = "egrep")]
#[command(about = "Search a file with a regular expression", long_about = None)]
#[command(version)]
struct Args {
    /// Pattern built from characters, '.', '|', '*', '+' and parentheses
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// File to search
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Search with the DFA from subset construction instead of the minimal one
    #[arg(long)]
    no_minimize: bool,

    /// Time the search with and without minimization
    #[arg(long)]
    compare: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let text = std::fs::read_to_string(&args.file)?;

    let config = Config::new().minimize(!args.no_minimize);
    let searcher = Searcher::with_config(&args.pattern, &config)?;
    let found = searcher.grep(&text);
    print_matches(&found);

    if args.compare && !searcher.is_literal() {
        compare(&args.pattern, &text)?;
    }
    if found.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_matches(found: &[LineMatch]) {
    // A line with several matches is printed once, at its first match.
    let mut last_line = 0;
    for m in found {
        if m.line_number != last_line {
            println!("{}:{}: {}", m.line_number, m.column, m.text);
            last_line = m.line_number;
        }
    }
}

fn compare(
    pattern: &str,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n===============================");
    for minimize in [true, false] {
        let start = Instant::now();
        let searcher =
            Searcher::with_config(pattern, &Config::new().minimize(minimize))?;
        let found = searcher.grep(text);
        let elapsed = start.elapsed();
        let states = searcher.dfa().map_or(0, |dfa| dfa.state_len());
        println!(
            "{:<20} {:>4} states  {:>6} matches  {:.6} s",
            if minimize { "with minimization" } else { "without minimization" },
            states,
            found.len(),
            elapsed.as_secs_f64(),
        );
    }
    println!("===============================");
    Ok(())
}
