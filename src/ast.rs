use crate::error::Span;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Binary operator codes. `and`/`or`/`not` live here too: unary `not`
/// (and unary `+`/`-`) are parsed as binary nodes with a synthesized left
/// operand, so every operator application has exactly two children.
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Equal,
    NotEqual,
    And,
    Or,
    Not,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Not => "not",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal {
        value: Value,
        span: Span,
    },
    Variable {
        name: String,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Literal { span, .. } => span,
            Expr::Variable { span, .. } => span,
            Expr::Binary { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression {
        expr: Expr,
        span: Span,
    },
    Assign {
        name: String,
        value: Expr,
        span: Span,
    },
    Print {
        value: Expr,
        span: Span,
    },
    Pass {
        span: Span,
    },
    Break {
        span: Span,
    },
    Block {
        statements: Vec<Stmt>,
        span: Span,
    },
    /// `if` and `elif` share this node; an `elif` is an `If` hanging off
    /// the previous construct's `next` link, an `else` terminates a chain.
    If {
        condition: Expr,
        body: Box<Stmt>,
        next: Option<Box<Stmt>>,
        span: Span,
    },
    Else {
        body: Box<Stmt>,
        span: Span,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        /// Trailing `else` block, run when the condition goes falsy
        /// without a `break`.
        else_block: Option<Box<Stmt>>,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Expression { span, .. } => span,
            Stmt::Assign { span, .. } => span,
            Stmt::Print { span, .. } => span,
            Stmt::Pass { span } => span,
            Stmt::Break { span } => span,
            Stmt::Block { span, .. } => span,
            Stmt::If { span, .. } => span,
            Stmt::Else { span, .. } => span,
            Stmt::While { span, .. } => span,
        }
    }
}

/// Render a statement as the `|-` indented tree shown by the REPL's
/// debug mode.
pub fn dump(stmt: &Stmt) -> String {
    let mut out = String::new();
    write_stmt(&mut out, stmt, 0);
    out
}

fn prefix(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("|-");
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    prefix(out, depth);
    match stmt {
        Stmt::Expression { expr, .. } => {
            out.push_str("EXPRESSION\n");
            write_expr(out, expr, depth + 1);
        }
        Stmt::Assign { name, value, .. } => {
            out.push_str(&format!("ASSIGN {}\n", name));
            write_expr(out, value, depth + 1);
        }
        Stmt::Print { value, .. } => {
            out.push_str("PRINT\n");
            write_expr(out, value, depth + 1);
        }
        Stmt::Pass { .. } => out.push_str("PASS\n"),
        Stmt::Break { .. } => out.push_str("BREAK\n"),
        Stmt::Block { statements, .. } => {
            out.push_str("BLOCK\n");
            for statement in statements {
                write_stmt(out, statement, depth + 1);
            }
        }
        Stmt::If {
            condition,
            body,
            next,
            ..
        } => {
            out.push_str("IF\n");
            write_expr(out, condition, depth + 1);
            write_stmt(out, body, depth + 1);
            if let Some(next) = next {
                write_stmt(out, next, depth);
            }
        }
        Stmt::Else { body, .. } => {
            out.push_str("ELSE\n");
            write_stmt(out, body, depth + 1);
        }
        Stmt::While {
            condition,
            body,
            else_block,
            ..
        } => {
            out.push_str("WHILE\n");
            write_expr(out, condition, depth + 1);
            write_stmt(out, body, depth + 1);
            if let Some(else_block) = else_block {
                write_stmt(out, else_block, depth);
            }
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr, depth: usize) {
    prefix(out, depth);
    match expr {
        Expr::Literal { value, .. } => match value {
            Value::Str(s) => out.push_str(&format!("STRING \"{}\"\n", s)),
            other => out.push_str(&format!("{} {}\n", other.type_name().to_uppercase(), other)),
        },
        Expr::Variable { name, .. } => {
            out.push_str(&format!("IDENTIFIER {}\n", name));
        }
        Expr::Binary {
            left,
            operator,
            right,
            ..
        } => {
            out.push_str(&format!("OPERATOR '{}'\n", operator.symbol()));
            write_expr(out, left, depth + 1);
            write_expr(out, right, depth + 1);
        }
    }
}
