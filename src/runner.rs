use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;

/// Run a whole script: lex the source into the line table, parse it,
/// evaluate it. The first error aborts, reported against the file.
pub fn run(source: &str, filename: Option<&str>) {
    let mut lexer = Lexer::new(source.to_string());
    let lines = match lexer.scan_lines() {
        Ok(lines) => lines,
        Err(error) => {
            error.report(source, filename);
            return;
        }
    };

    let mut parser = Parser::new(lines);
    let program = match parser.parse() {
        Ok(program) => program,
        Err(error) => {
            error.report(source, filename);
            return;
        }
    };

    let mut evaluator = Evaluator::new();
    if let Err(error) = evaluator.run_program(&program) {
        error.report(source, filename);
    }
}
