/*
    This module reads grammar rules of the form `A -> b C | ε`, one per line
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use log::{debug, info};
use lexer::*;
use verifier::check_rule;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line does not split into exactly one left and one right side
    MalformedRule,
    // Something other than a single symbol is being defined
    MissingNonterminal,
    // An alternative starts with the symbol it defines
    LeftRecursion(String),
    // The rules could not be turned into a grammar
    InvalidGrammar(GrammarErrorType),
    // There was an issue with reading the input
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::LeftRecursion(a), CompileErrorType::LeftRecursion(b)) => a == b,
            (CompileErrorType::InvalidGrammar(a), CompileErrorType::InvalidGrammar(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MalformedRule => write!(f, "Invalid rule format. Use: NonTerminal -> production1 | production2"),
            CompileErrorType::MissingNonterminal => write!(f, "Expected a single nonterminal before the arrow"),
            CompileErrorType::LeftRecursion(nonterminal) => write!(f, "Left recursion detected in `{}`, grammar is invalid for top-down parsing", nonterminal),
            CompileErrorType::InvalidGrammar(e) => write!(f, "{}", e),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;

// How rule input is read
#[derive(Debug, Clone)]
pub struct Settings {
    // Case-insensitive line that ends input
    pub end_token: String,
    // Start symbol override
    pub start: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            end_token: "end".to_string(),
            start: None
        }
    }
}

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Vec<Vec<String>>,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Vec<String> {
    tokens.iter().filter_map(|t| match t {
        Token::Symbol(s) => Some(s.clone()),
        _ => None
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Vec<Vec<String>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let (lhs, rhs) = match split_sides(tokens).as_slice() {
        [lhs, rhs] => (*lhs, *rhs),
        _ => return Err(CompileErrorType::MalformedRule)
    };

    let symbol = match lhs {
        [Token::Symbol(s)] => s.clone(),
        _ => return Err(CompileErrorType::MissingNonterminal)
    };

    let rewrite = parse_rewrite(rhs);

    // Nothing is committed from a rule with a left recursive alternative
    check_rule(&symbol, &rewrite)?;

    Ok(Rule {
        symbol,
        rewrite,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lexer::lex_line(line), location.clone())
        .map_err(|error| error.at(location))
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(';')
}

fn is_end_line(line: &str, end_token: &str) -> bool {
    line.trim().to_lowercase() == end_token.to_lowercase()
}

/// Builds a grammar from a sequence of rule lines.
///
/// Reading stops at the end token or when `lines` runs out. The first bad
/// line aborts the whole run.
pub fn parse_lines<I>(lines: I, source: &Path, settings: &Settings) -> LineResult<Grammar>
where
    I: IntoIterator<Item = std::io::Result<String>>
{
    let mut builder = GrammarBuilder::new();

    for (num, line) in lines.into_iter().enumerate() {
        let location = Location {
            file: source.to_path_buf(),
            line: num + 1
        };
        let line = line.map_err(|e| CompileErrorType::FileError(e).at(location.clone()))?;

        if is_end_line(&line, &settings.end_token) {
            debug!("end token reached at {}", location);
            break;
        }
        if !is_rule_line(&line) {
            continue;
        }

        let rule = parse_lex_line(&line, location)?;
        builder.add_rule(&rule.symbol, rule.rewrite);
    }

    let grammar = builder
        .classify_symbols(settings.start.as_deref())
        .map_err(|e| CompileErrorType::InvalidGrammar(e).at(Location::whole(source.to_path_buf())))?;
    info!("read {} rule(s) from {}", grammar.nonterminals.len(), source.display());

    Ok(grammar)
}

pub fn parse_file(path: &PathBuf, settings: &Settings) -> LineResult<Grammar> {
    let file = File::open(path)
        .map_err(|e| CompileErrorType::FileError(e).at(Location::whole(path.clone())))?;

    parse_lines(std::io::BufReader::new(file).lines(), path, settings)
}

// Reads rules from standard input, prompting for each one when a person is
// typing them
pub fn parse_stdin(settings: &Settings) -> LineResult<Grammar> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut lines = stdin.lock().lines();

    if interactive {
        eprintln!("Enter grammar rules, or `{}` to finish", settings.end_token);
    }
    let prompted = std::iter::from_fn(|| {
        if interactive {
            eprint!("Enter rule: ");
        }
        lines.next()
    });

    parse_lines(prompted, Path::new("<stdin>"), settings)
}
