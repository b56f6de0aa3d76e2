use automata_search::{accepts_word, exact_search};
use quickcheck::{Arbitrary, Gen, QuickCheck};
use regex_automaton::{compile, minimize};

/// A random pattern over `a`, `b`, `c` and `.`. Every operand of an operator
/// is parenthesized, so the generated text always parses as built.
#[derive(Clone, Debug)]
struct Pattern(String);

impl Pattern {
    fn generate(g: &mut Gen, depth: usize) -> String {
        let pick = if depth == 0 { 0 } else { u8::arbitrary(g) % 6 };
        match pick {
            0 | 1 => g.choose(&["a", "b", "c", "."]).unwrap().to_string(),
            2 => format!(
                "({})({})",
                Pattern::generate(g, depth - 1),
                Pattern::generate(g, depth - 1)
            ),
            3 => format!(
                "({})|({})",
                Pattern::generate(g, depth - 1),
                Pattern::generate(g, depth - 1)
            ),
            4 => format!("({})*", Pattern::generate(g, depth - 1)),
            _ => format!("({})+", Pattern::generate(g, depth - 1)),
        }
    }
}

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        let depth = usize::arbitrary(g) % 4;
        Pattern(Pattern::generate(g, depth))
    }
}

/// A short word over `a`, `b`, `c` and `d`. `d` only ever matches `.`.
#[derive(Clone, Debug)]
struct Word(String);

impl Arbitrary for Word {
    fn arbitrary(g: &mut Gen) -> Word {
        let len = usize::arbitrary(g) % 8;
        Word((0..len).map(|_| *g.choose(&['a', 'b', 'c', 'd']).unwrap()).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Word>> {
        Box::new(self.0.shrink().map(Word))
    }
}

fn brute_force(pattern: &[char], text: &[char]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return vec![];
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| text[i..i + pattern.len()] == *pattern)
        .collect()
}

fn qc() -> QuickCheck {
    QuickCheck::new().tests(300).max_tests(3000)
}

#[test]
fn exact_search_equals_brute_force() {
    fn prop(pattern: Word, text: Word) -> bool {
        // Short patterns over a small alphabet, so occurrences are common.
        let pattern: String = pattern.0.chars().take(4).collect();
        let text = text.0.repeat(3);
        let starts: Vec<usize> =
            exact_search(&pattern, &text).into_iter().map(|s| s.start).collect();
        let p: Vec<char> = pattern.chars().collect();
        let t: Vec<char> = text.chars().collect();
        starts == brute_force(&p, &t)
    }
    qc().quickcheck(prop as fn(Word, Word) -> bool);
}

#[test]
fn minimal_dfa_agrees_with_dfa() {
    fn prop(pattern: Pattern, words: Vec<Word>) -> bool {
        let automata = match compile(&pattern.0) {
            Ok(automata) => automata,
            Err(_) => return false,
        };
        words.iter().all(|w| {
            accepts_word(&automata.dfa, &w.0)
                == accepts_word(&automata.minimal, &w.0)
        })
    }
    qc().quickcheck(prop as fn(Pattern, Vec<Word>) -> bool);
}

#[test]
fn minimal_dfa_agrees_with_nfa_simulation() {
    fn prop(pattern: Pattern, words: Vec<Word>) -> bool {
        let automata = match compile(&pattern.0) {
            Ok(automata) => automata,
            Err(_) => return false,
        };
        words.iter().all(|w| {
            automata.nfa.is_match(&w.0)
                == accepts_word(&automata.minimal, &w.0)
        })
    }
    qc().quickcheck(prop as fn(Pattern, Vec<Word>) -> bool);
}

#[test]
fn minimization_never_grows_and_is_idempotent() {
    fn prop(pattern: Pattern) -> bool {
        let automata = match compile(&pattern.0) {
            Ok(automata) => automata,
            Err(_) => return false,
        };
        automata.minimal.state_len() <= automata.dfa.state_len()
            && minimize(&automata.minimal) == automata.minimal
    }
    qc().quickcheck(prop as fn(Pattern) -> bool);
}
