use clap::Parser;
use regex_automaton::{
    render::{DfaDot, NfaDot},
    Automata, Builder,
};

/// Prints the syntax tree, NFA, DFA and minimal DFA of each pattern.
#[derive(Debug, Parser)]
#[command(name = "regex_automaton")]
struct Args {
    /// Patterns to compile. A built-in set is used when none are given.
    patterns: Vec<String>,

    /// Print Graphviz digraphs instead of state tables.
    #[arg(long)]
    dot: bool,
}

fn main() {
    let Args { mut patterns, dot } = Args::parse();

    println!("Regex Automaton Compiler - Automaton Structure Demo");
    println!("===================================================");

    if patterns.is_empty() {
        patterns = [
            "(a(bc))",
            "a*b",
            "(a|b)*c",
            "(a|b)*abb",
            "S(a|g|r)+on",
            "ba+",
            "(ba)+",
            "a.c",
            // Errors are reported per pattern.
            "a(",
            "()",
            "|a",
        ]
        .iter()
        .map(|p| p.to_string())
        .collect();
    }

    let builder = Builder::new();
    for pattern in &patterns {
        println!("\n=== Pattern: '{}' ===", pattern);
        let automata = match builder.build(pattern) {
            Ok(automata) => automata,
            Err(e) => {
                println!("Failed to compile: {}", e);
                continue;
            }
        };
        if dot {
            print_dot(&automata);
        } else {
            print_automata(&automata);
        }
    }
}

fn print_automata(automata: &Automata) {
    println!("Syntax tree: {}", automata.syntax);

    println!("\n--- NFA ({} states) ---", automata.nfa.state_len());
    print!("{}", automata.nfa);

    println!("\n--- DFA ({} states) ---", automata.dfa.state_len());
    print!("{}", automata.dfa);

    println!("\n--- Minimal DFA ({} states) ---", automata.minimal.state_len());
    print!("{}", automata.minimal);
}

fn print_dot(automata: &Automata) {
    print!("{}", NfaDot(&automata.nfa));
    print!("{}", DfaDot(&automata.dfa));
    print!("{}", DfaDot(&automata.minimal));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments() {
        let args = Args::try_parse_from(["regex_automaton"]).unwrap();
        assert!(args.patterns.is_empty());
        assert!(!args.dot);

        let args =
            Args::try_parse_from(["regex_automaton", "a*b", "--dot", "(a|b)*c"])
                .unwrap();
        assert!(args.dot);
        assert_eq!(args.patterns, vec!["a*b", "(a|b)*c"]);

        assert!(Args::try_parse_from(["regex_automaton", "--png"]).is_err());
    }
}
