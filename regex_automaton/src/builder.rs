use crate::{
    compiler::Compiler,
    determinize::Determinizer,
    dfa::DFA,
    minimize::minimize,
    nfa::NFA,
    parser::{parse_with_nest_limit, SyntaxNode, DEFAULT_NEST_LIMIT},
    CompileResult,
};

/// The configuration used for compiling a pattern.
///
/// The default configuration places no limit on the size of the DFA and
/// rejects patterns nesting deeper than [`DEFAULT_NEST_LIMIT`].
#[derive(Clone, Debug)]
pub struct Config {
    dfa_size_limit: Option<usize>,
    nest_limit: u32,
}

impl Default for Config {
    fn default() -> Config {
        Config { dfa_size_limit: None, nest_limit: DEFAULT_NEST_LIMIT }
    }
}

impl Config {
    pub fn new() -> Config {
        Config::default()
    }

    /// Fail with [`CompileError::TooManyStates`](crate::CompileError) when
    /// subset construction would create more than `limit` DFA states.
    /// Subset construction can be exponential in the size of the pattern.
    pub fn dfa_size_limit(mut self, limit: Option<usize>) -> Config {
        self.dfa_size_limit = limit;
        self
    }

    /// Fail with [`ParseError::NestLimitExceeded`](crate::ParseError) when
    /// the syntax tree of a pattern could be deeper than `limit`.
    ///
    /// Every stage after parsing recurses over the tree, so a very deep
    /// pattern could otherwise overflow the stack.
    pub fn nest_limit(mut self, limit: u32) -> Config {
        self.nest_limit = limit;
        self
    }

    pub fn get_dfa_size_limit(&self) -> Option<usize> {
        self.dfa_size_limit
    }

    pub fn get_nest_limit(&self) -> u32 {
        self.nest_limit
    }
}

/// Every stage of a compiled pattern. None of them change once built.
#[derive(Clone, Debug)]
pub struct Automata {
    pub syntax: SyntaxNode,
    pub nfa: NFA,
    pub dfa: DFA,
    pub minimal: DFA,
}

/// Runs the whole pipeline: parse, Thompson construction, subset
/// construction and minimization.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = config;
        self
    }

    pub fn build(&self, pattern: &str) -> CompileResult<Automata> {
        let syntax =
            parse_with_nest_limit(pattern, self.config.get_nest_limit())?;
        debug!("parsed {:?} into {}", pattern, syntax);
        let nfa = Compiler::new().compile(&syntax);
        let dfa = Determinizer::new(&nfa)
            .size_limit(self.config.get_dfa_size_limit())
            .build()?;
        let minimal = minimize(&dfa);
        Ok(Automata { syntax, nfa, dfa, minimal })
    }
}

/// Compiles a pattern with the default configuration.
pub fn compile(pattern: &str) -> CompileResult<Automata> {
    Builder::new().build(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompileError, ParseError};

    #[test]
    fn every_stage_is_kept() {
        let automata = compile("(a|b)*c").unwrap();
        assert!(!automata.syntax.has_groups());
        assert_eq!(automata.nfa.state_len(), 10);
        assert!(automata.minimal.state_len() <= automata.dfa.state_len());
    }

    #[test]
    fn parse_errors_propagate() {
        let err = compile("a(").unwrap_err();
        assert_eq!(
            err,
            CompileError::Parse(ParseError::UnbalancedParenthesis { offset: 1 })
        );
    }

    #[test]
    fn size_limit_is_applied() {
        let mut builder = Builder::new();
        builder.configure(Config::new().dfa_size_limit(Some(1)));
        assert_eq!(
            builder.build("ab").unwrap_err(),
            CompileError::TooManyStates { limit: 1 }
        );
        builder.configure(Config::new().dfa_size_limit(Some(2)));
        assert!(builder.build("a*").is_ok());
    }

    #[test]
    fn nest_limit_is_applied() {
        let deep = format!("{}a{}", "(".repeat(20_000), ")".repeat(20_000));
        assert_eq!(
            compile(&deep).unwrap_err(),
            CompileError::Parse(ParseError::NestLimitExceeded {
                limit: DEFAULT_NEST_LIMIT
            })
        );

        let mut builder = Builder::new();
        builder.configure(Config::new().nest_limit(3));
        assert!(builder.build("(a*)b").is_ok());
        assert_eq!(
            builder.build("((a*))b").unwrap_err(),
            CompileError::Parse(ParseError::NestLimitExceeded { limit: 3 })
        );
    }
}
