// pyrite: a small indentation-structured scripting language.
//
// The pipeline is lexing -> parsing -> tree-walking evaluation: the lexer
// turns source text into a table of token lines, the parser builds an AST
// with indentation-delimited blocks, and the evaluator walks the tree
// against a mutable variable store.

// Public modules
pub mod ast;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, Program, Stmt};
pub use env::Environment;
pub use error::{ErrorKind, PyriteError, Span};
pub use evaluator::{Evaluator, Signal};
pub use lexer::{Lexer, Line, Token, TokenType};
pub use parser::Parser;
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;
