use std::fmt;

use crate::{symbol::Symbol, ParseError};

/// A node of the abstract syntax tree produced by [`parse`].
///
/// Binary operators always have exactly two children and repetitions exactly
/// one. `Group` only exists while parsing; a tree returned by [`parse`] never
/// contains one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyntaxNode {
    /// A single character or the `.` wildcard.
    Literal(Symbol),
    /// `lr`
    Concat(Box<SyntaxNode>, Box<SyntaxNode>),
    /// `l|r`
    Alternation(Box<SyntaxNode>, Box<SyntaxNode>),
    /// `x*`
    Star(Box<SyntaxNode>),
    /// `x+`
    Plus(Box<SyntaxNode>),
    /// `(x)`
    Group(Box<SyntaxNode>),
}

impl SyntaxNode {
    pub fn literal(ch: char) -> SyntaxNode {
        SyntaxNode::Literal(Symbol::Char(ch))
    }

    pub fn any() -> SyntaxNode {
        SyntaxNode::Literal(Symbol::Any)
    }

    pub fn concat(left: SyntaxNode, right: SyntaxNode) -> SyntaxNode {
        SyntaxNode::Concat(Box::new(left), Box::new(right))
    }

    pub fn alternation(left: SyntaxNode, right: SyntaxNode) -> SyntaxNode {
        SyntaxNode::Alternation(Box::new(left), Box::new(right))
    }

    pub fn star(sub: SyntaxNode) -> SyntaxNode {
        SyntaxNode::Star(Box::new(sub))
    }

    pub fn plus(sub: SyntaxNode) -> SyntaxNode {
        SyntaxNode::Plus(Box::new(sub))
    }

    /// Returns true if any `Group` wrapper remains in this tree.
    pub fn has_groups(&self) -> bool {
        match self {
            SyntaxNode::Literal(_) => false,
            SyntaxNode::Group(_) => true,
            SyntaxNode::Star(sub) | SyntaxNode::Plus(sub) => sub.has_groups(),
            SyntaxNode::Concat(l, r) | SyntaxNode::Alternation(l, r) => {
                l.has_groups() || r.has_groups()
            }
        }
    }

    fn strip_groups(self) -> SyntaxNode {
        match self {
            SyntaxNode::Literal(_) => self,
            SyntaxNode::Group(sub) => (*sub).strip_groups(),
            SyntaxNode::Star(sub) => SyntaxNode::star((*sub).strip_groups()),
            SyntaxNode::Plus(sub) => SyntaxNode::plus((*sub).strip_groups()),
            SyntaxNode::Concat(l, r) => {
                SyntaxNode::concat((*l).strip_groups(), (*r).strip_groups())
            }
            SyntaxNode::Alternation(l, r) => SyntaxNode::alternation(
                (*l).strip_groups(),
                (*r).strip_groups(),
            ),
        }
    }
}

/// Prefix notation, e.g. `cat(star(a),b)` for `a*b`.
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxNode::Literal(sym) => write!(f, "{}", sym),
            SyntaxNode::Concat(l, r) => write!(f, "cat({},{})", l, r),
            SyntaxNode::Alternation(l, r) => write!(f, "alt({},{})", l, r),
            SyntaxNode::Star(sub) => write!(f, "star({})", sub),
            SyntaxNode::Plus(sub) => write!(f, "plus({})", sub),
            SyntaxNode::Group(sub) => write!(f, "group({})", sub),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Operator {
    Open,
    Close,
    Star,
    Plus,
    Alternation,
}

impl Operator {
    fn as_char(self) -> char {
        match self {
            Operator::Open => '(',
            Operator::Close => ')',
            Operator::Star => '*',
            Operator::Plus => '+',
            Operator::Alternation => '|',
        }
    }
}

/// Either a resolved subtree or an operator that still waits for its
/// operands. Operators remember their character offset for error reporting.
#[derive(Clone, Debug)]
enum Token {
    Node(SyntaxNode),
    Op { op: Operator, offset: usize },
}

impl Token {
    fn new(ch: char, offset: usize) -> Token {
        let op = match ch {
            '(' => Operator::Open,
            ')' => Operator::Close,
            '*' => Operator::Star,
            '+' => Operator::Plus,
            '|' => Operator::Alternation,
            '.' => return Token::Node(SyntaxNode::any()),
            _ => return Token::Node(SyntaxNode::literal(ch)),
        };
        Token::Op { op, offset }
    }
}

/// The nest limit used by [`parse`].
pub const DEFAULT_NEST_LIMIT: u32 = 250;

/// Parses a pattern into a syntax tree.
///
/// Operators are resolved in a fixed priority order: groups, then `*`, then
/// `+`, then implicit concatenation and finally `|`. Each stage runs to
/// completion over the whole token list before the next one starts.
///
/// Patterns nesting deeper than [`DEFAULT_NEST_LIMIT`] are rejected, see
/// [`parse_with_nest_limit`].
pub fn parse(pattern: &str) -> Result<SyntaxNode, ParseError> {
    parse_with_nest_limit(pattern, DEFAULT_NEST_LIMIT)
}

/// Like [`parse`], but fails with [`ParseError::NestLimitExceeded`] when the
/// syntax tree could be deeper than `limit`.
///
/// Every later stage walks the tree recursively, so this bounds the stack
/// they use. Groups, each `*` or `+` applied to the same operand and each
/// `|` of the same group count as one level.
pub fn parse_with_nest_limit(
    pattern: &str,
    limit: u32,
) -> Result<SyntaxNode, ParseError> {
    check_nesting(pattern, limit)?;
    let tokens: Vec<Token> = pattern
        .chars()
        .enumerate()
        .map(|(offset, ch)| Token::new(ch, offset))
        .collect();
    let node = parse_tokens(tokens)?;
    Ok(node.strip_groups())
}

/// An upper bound on the depth of the tree, checked before any recursion
/// starts. Implicit concatenation is balanced and left out.
fn check_nesting(pattern: &str, limit: u32) -> Result<(), ParseError> {
    struct Level {
        base: u32,
        deepest: u32,
    }

    let mut levels = vec![Level { base: 0, deepest: 0 }];
    // Depth at which the next operand of the current group starts.
    let mut depth: u32 = 0;
    // Depth of the last operand, including the repetitions applied to it.
    let mut operand: Option<u32> = None;
    for ch in pattern.chars() {
        match ch {
            '(' => {
                levels.push(Level { base: depth, deepest: depth + 1 });
                depth += 1;
                operand = None;
            }
            ')' if levels.len() > 1 => {
                if let Some(level) = levels.pop() {
                    depth = level.base;
                    operand = Some(level.deepest);
                }
            }
            // Unbalanced, reported by the parser.
            ')' => {}
            '|' => {
                depth += 1;
                operand = None;
            }
            '*' | '+' => operand = operand.map(|d| d.saturating_add(1)),
            _ => operand = Some(depth + 1),
        }
        let deepest = depth.max(operand.unwrap_or(0));
        if deepest > limit {
            return Err(ParseError::NestLimitExceeded { limit });
        }
        if let Some(level) = levels.last_mut() {
            level.deepest = level.deepest.max(deepest);
        }
    }
    Ok(())
}

fn parse_tokens(tokens: Vec<Token>) -> Result<SyntaxNode, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyPattern);
    }
    let tokens = resolve_groups(tokens)?;
    let tokens = resolve_postfix(tokens, Operator::Star)?;
    let tokens = resolve_postfix(tokens, Operator::Plus)?;
    let tokens = resolve_concat(tokens);
    let tokens = resolve_alternation(tokens)?;

    let mut nodes = Vec::with_capacity(1);
    for token in tokens {
        match token {
            Token::Node(node) => nodes.push(node),
            Token::Op { op, offset } => {
                return Err(ParseError::MissingOperand {
                    operator: op.as_char(),
                    offset,
                })
            }
        }
    }
    // Concatenation merges every pair of adjacent nodes, so at most one
    // node survives.
    nodes.pop().ok_or(ParseError::EmptyPattern)
}

fn find_op(
    tokens: &[Token],
    wanted: Operator,
    from_end: bool,
) -> Option<(usize, usize)> {
    let matching = |(i, token): (usize, &Token)| match *token {
        Token::Op { op, offset } if op == wanted => Some((i, offset)),
        _ => None,
    };
    if from_end {
        tokens.iter().enumerate().rev().find_map(matching)
    } else {
        tokens.iter().enumerate().find_map(matching)
    }
}

fn resolve_groups(mut tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    while let Some((close, close_offset)) =
        find_op(&tokens, Operator::Close, false)
    {
        let (open, open_offset) =
            find_op(&tokens[..close], Operator::Open, true).ok_or(
                ParseError::UnbalancedParenthesis { offset: close_offset },
            )?;
        let inner: Vec<Token> = tokens.drain(open + 1..close).collect();
        if inner.is_empty() {
            return Err(ParseError::EmptyGroup { offset: open_offset });
        }
        let group = SyntaxNode::Group(Box::new(parse_tokens(inner)?));
        // After the drain, '(' sits at `open` and ')' right after it.
        tokens.remove(open + 1);
        tokens[open] = Token::Node(group);
    }
    if let Some((_, offset)) = find_op(&tokens, Operator::Open, false) {
        return Err(ParseError::UnbalancedParenthesis { offset });
    }
    Ok(tokens)
}

fn resolve_postfix(
    tokens: Vec<Token>,
    wanted: Operator,
) -> Result<Vec<Token>, ParseError> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::Op { op, offset } if op == wanted => {
                let sub = match out.pop() {
                    Some(Token::Node(sub)) => sub,
                    _ => {
                        return Err(ParseError::MissingOperand {
                            operator: op.as_char(),
                            offset,
                        })
                    }
                };
                let node = match wanted {
                    Operator::Star => SyntaxNode::star(sub),
                    _ => SyntaxNode::plus(sub),
                };
                out.push(Token::Node(node));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn resolve_concat(mut tokens: Vec<Token>) -> Vec<Token> {
    loop {
        let mut changed = false;
        let mut out = Vec::with_capacity(tokens.len());
        let mut it = tokens.into_iter().peekable();
        while let Some(token) = it.next() {
            let left = match token {
                Token::Node(left) => left,
                op => {
                    out.push(op);
                    continue;
                }
            };
            match it.next_if(|t| matches!(t, Token::Node(_))) {
                Some(Token::Node(right)) => {
                    out.push(Token::Node(SyntaxNode::concat(left, right)));
                    changed = true;
                }
                _ => out.push(Token::Node(left)),
            }
        }
        tokens = out;
        if !changed {
            return tokens;
        }
    }
}

fn resolve_alternation(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut it = tokens.into_iter();
    while let Some(token) = it.next() {
        match token {
            Token::Op { op: Operator::Alternation, offset } => {
                let missing =
                    ParseError::MissingOperand { operator: '|', offset };
                let left = match out.pop() {
                    Some(Token::Node(left)) => left,
                    _ => return Err(missing),
                };
                let right = match it.next() {
                    Some(Token::Node(right)) => right,
                    _ => return Err(missing),
                };
                out.push(Token::Node(SyntaxNode::alternation(left, right)));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
