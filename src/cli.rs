use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::parser::Settings;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Boxed table
    Table,
    /// One `FIRST(A) = { ... }` line and one `FOLLOW(A) = { ... }` line per nonterminal
    Plain,
}

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar rules (default: read them from stdin)
    pub file: Option<PathBuf>,

    /// Start symbol (default: first one defined)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Line that ends rule input, case-insensitive
    #[arg(short, long, value_name = "TOKEN", default_value = "end")]
    pub end_token: String,

    /// How to print the sets
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            end_token: self.end_token.clone(),
            start: self.start.clone()
        }
    }
}
