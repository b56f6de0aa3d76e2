// search-index: rank the documents of an inverted index against a query

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use automata_search::{
    vocabulary_size, Config, IndexSearch, InvertedIndex, ScoredDoc, Vocabulary,
};
use clap::Parser;
use serde::de::DeserializeOwned;

/// Search an inverted index with a regular expression or with keywords
#[derive(Parser, Debug)]
#[command(name = "search-index")]
#[command(about = "Rank indexed documents by regex or keyword matches", long_about = None)]
#[command(version)]
struct Args {
    /// Pattern, or keywords with --terms. Several arguments are joined with
    /// spaces. Without a query, queries are read from stdin one per line.
    #[arg(value_name = "QUERY")]
    query: Vec<String>,

    /// Inverted index: word -> document ID -> count
    #[arg(long, default_value = "index.json")]
    index: PathBuf,

    /// Vocabulary: document ID -> words. Optional.
    #[arg(long, default_value = "vocab.json")]
    vocab: PathBuf,

    /// Treat the query as already normalized keywords that must all occur
    #[arg(short, long)]
    terms: bool,

    /// Maximum number of documents to display
    #[arg(short, long, default_value = "20")]
    limit: usize,

    /// Maximum number of matched index words to display
    #[arg(long, default_value = "30")]
    words: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let index: InvertedIndex = load_json(&args.index)?;
    let vocab: Vocabulary = if args.vocab.exists() {
        load_json(&args.vocab)?
    } else {
        Vocabulary::new()
    };
    let search =
        IndexSearch::with_config(&index, Config::new().top_k(Some(args.limit)));

    if !args.query.is_empty() {
        return run_query(&search, &vocab, &args, &args.query.join(" "));
    }

    println!(
        "Interactive mode: {} words indexed. Type 'quit' or 'exit' to leave.",
        index.len()
    );
    let prompt = if args.terms { "\nQuery > " } else { "\nRegEx > " };
    print!("{}", prompt);
    io::stdout().flush()?;
    for line in io::stdin().lines() {
        let line = line?;
        match read_query(&line) {
            None => break,
            Some("") => {}
            Some(query) => {
                if let Err(err) = run_query(&search, &vocab, &args, query) {
                    println!("Error: {}", err);
                }
            }
        }
        print!("{}", prompt);
        io::stdout().flush()?;
    }
    Ok(())
}

/// The query typed on an interactive line, `None` when the user leaves.
fn read_query(line: &str) -> Option<&str> {
    let query = line.trim();
    if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit")
    {
        return None;
    }
    Some(query)
}

fn run_query(
    search: &IndexSearch<'_>,
    vocab: &Vocabulary,
    args: &Args,
    query: &str,
) -> Result<(), Box<dyn Error>> {
    let documents = if args.terms {
        let terms: Vec<&str> = query.split_whitespace().collect();
        println!("Terms: {:?}", terms);
        search.search_terms(&terms)
    } else {
        println!("Pattern: {}", query);
        let hits = search.search_regex(query)?;
        println!(
            "\nIndex words matching the pattern ({} found):",
            hits.matched_words.len()
        );
        for word in hits.matched_words.iter().take(args.words) {
            println!("  - {}", word);
        }
        if hits.matched_words.len() > args.words {
            println!("  ... (+{} more)", hits.matched_words.len() - args.words);
        }
        hits.documents
    };
    print_documents(&documents, vocab);
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let file = File::open(path)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn print_documents(documents: &[ScoredDoc], vocab: &Vocabulary) {
    if documents.is_empty() {
        println!("\nNo document matches.");
        return;
    }
    println!("\n=== Documents ===");
    for (rank, doc) in documents.iter().enumerate() {
        println!(
            "{:2}. Doc {} | score={} | vocab_size={}",
            rank + 1,
            doc.doc_id,
            doc.score,
            vocabulary_size(vocab, &doc.doc_id),
        );
    }
}
