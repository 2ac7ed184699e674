mod analysis;
mod cli;
mod error_handling;
mod grammar;
mod parser;
mod report;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Format};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let settings = cli.settings();

    let parsed = match &cli.file {
        Some(path) => parser::parse_file(path, &settings),
        None => parser::parse_stdin(&settings),
    };
    let grammar = match parsed {
        Ok(grammar) => grammar,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let analysis = analysis::analyze(&grammar);
    let rows = analysis.rows(&grammar);
    let rendered = match cli.format {
        Format::Table => report::table(rows),
        Format::Plain => report::plain(rows),
    };
    println!("{}", rendered);

    ExitCode::SUCCESS
}
