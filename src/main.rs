mod ast;
mod env;
mod error;
mod evaluator;
mod lexer;
mod parser;
mod repl;
mod runner;
mod value;

use clap::{Arg, Command};
use std::fs;
use std::path::Path;

fn main() {
    let matches = Command::new("pyrite")
        .about("A small indentation-structured scripting language")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    match matches.get_one::<String>("file") {
        Some(file_path) if !matches.get_flag("interactive") => run_file(file_path),
        _ => repl::start(),
    }
}

fn run_file(path: &str) {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            runner::run(&source, path.to_str());
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
