use crate::ast;
use crate::evaluator::Evaluator;
use crate::lexer::{self, Lexer};
use crate::parser::Parser;
use std::io::{self, Write};

/// Interactive driver. A line ending in ':' opens a block, so the REPL
/// keeps reading continuation lines until a blank one, then hands the
/// whole unit to the interpreter. Evaluator state persists across inputs.
pub fn start() {
    println!("pyrite v0.1.0");
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let mut evaluator = Evaluator::new();
    let mut debug = false;

    loop {
        print!(">> ");
        io::stdout().flush().unwrap();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim_end();
                if line.trim().is_empty() {
                    continue;
                }
                if line.trim().eq_ignore_ascii_case("exit") {
                    println!("Goodbye!");
                    break;
                }

                let mut source = line.to_string();
                if line.ends_with(':') {
                    collect_block(&mut source);
                }

                run_command(&source, &mut evaluator, &mut debug);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

/// Read continuation lines (keeping their indentation) until a blank
/// line closes the block.
fn collect_block(source: &mut String) {
    loop {
        print!(".. ");
        io::stdout().flush().unwrap();

        let mut next = String::new();
        match io::stdin().read_line(&mut next) {
            Ok(0) => break,
            Ok(_) => {
                let next = next.trim_end();
                if next.trim().is_empty() {
                    break;
                }
                source.push('\n');
                source.push_str(next);
            }
            Err(_) => break,
        }
    }
}

fn run_command(source: &str, evaluator: &mut Evaluator, debug: &mut bool) {
    let mut lexer = Lexer::new(source.to_string());
    let lines = match lexer.scan_lines() {
        Ok(lines) => lines,
        Err(error) => {
            error.report(source, None);
            return;
        }
    };

    if let Some(flag) = lexer.debug_directive() {
        *debug = flag;
        println!("debug {}", if flag { "on" } else { "off" });
    }
    if lines.is_empty() {
        return;
    }

    if *debug {
        print!("{}", lexer::dump_tokens(&lines));
    }

    let mut parser = Parser::new(lines);
    let program = match parser.parse() {
        Ok(program) => program,
        Err(error) => {
            error.report(source, None);
            return;
        }
    };

    if *debug {
        println!("************AST**************");
        for stmt in &program.statements {
            print!("{}", ast::dump(stmt));
        }
        println!("*****************************");
    }

    if let Err(error) = evaluator.run_program(&program) {
        error.report(source, None);
    }

    if *debug {
        for var in evaluator.env().iter() {
            println!("{} = {}", var.name, var.value);
        }
    }
}
