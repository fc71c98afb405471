use crate::ast::{BinaryOp, Expr, Program, Stmt};
use crate::env::Environment;
use crate::error::{PyriteError, Span};
use crate::value::Value;

/// Control signal threaded through statement evaluation. `Break` stops
/// the enclosing block sequence and the nearest loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Normal,
    Break,
}

/// Tree-walking evaluator. Owns the variable store, so independent
/// interpreter instances never share state.
pub struct Evaluator {
    env: Environment,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Run a whole program. A `break` escaping to the top level stops
    /// the remaining statements, the same way it stops a block.
    pub fn run_program(&mut self, program: &Program) -> Result<(), PyriteError> {
        for statement in &program.statements {
            if self.execute(statement)? == Signal::Break {
                break;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, stmt: &Stmt) -> Result<Signal, PyriteError> {
        match stmt {
            Stmt::Expression { expr, .. } => {
                // A bare expression prints its resolved value.
                let value = self.eval_expr(expr)?;
                println!("{}", value);
                Ok(Signal::Normal)
            }
            Stmt::Assign { name, value, .. } => {
                let value = self.eval_expr(value)?;
                self.env.set(name, value);
                Ok(Signal::Normal)
            }
            Stmt::Print { value, .. } => {
                let value = self.eval_expr(value)?;
                println!("{}", value);
                Ok(Signal::Normal)
            }
            Stmt::Pass { .. } => Ok(Signal::Normal),
            Stmt::Break { .. } => Ok(Signal::Break),
            Stmt::Block { statements, .. } => {
                for statement in statements {
                    if self.execute(statement)? == Signal::Break {
                        return Ok(Signal::Break);
                    }
                }
                Ok(Signal::Normal)
            }
            Stmt::If {
                condition,
                body,
                next,
                ..
            } => {
                if self.eval_expr(condition)?.is_truthy() {
                    self.execute(body)
                } else if let Some(next) = next {
                    self.execute(next)
                } else {
                    Ok(Signal::Normal)
                }
            }
            Stmt::Else { body, .. } => self.execute(body),
            Stmt::While {
                condition,
                body,
                else_block,
                ..
            } => {
                loop {
                    if !self.eval_expr(condition)?.is_truthy() {
                        // Normal exit runs the attached else once.
                        if let Some(else_block) = else_block {
                            return self.execute(else_block);
                        }
                        return Ok(Signal::Normal);
                    }
                    if self.execute(body)? == Signal::Break {
                        // break skips the attached else entirely.
                        return Ok(Signal::Normal);
                    }
                }
            }
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value, PyriteError> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.clone()),
            Expr::Variable { name, span } => self.env.get(name).ok_or_else(|| {
                PyriteError::name(span.clone(), format!("Undefined variable '{}'", name))
            }),
            Expr::Binary {
                left,
                operator,
                right,
                span,
            } => match operator {
                // `and`/`or` resolve both operands, then yield the
                // selecting operand's value rather than a boolean.
                BinaryOp::And => {
                    let left = self.eval_expr(left)?;
                    let right = self.eval_expr(right)?;
                    Ok(if left.is_truthy() { right } else { left })
                }
                BinaryOp::Or => {
                    let left = self.eval_expr(left)?;
                    let right = self.eval_expr(right)?;
                    Ok(if left.is_truthy() { left } else { right })
                }
                // `not` ignores its synthesized left operand.
                BinaryOp::Not => {
                    let right = self.eval_expr(right)?;
                    Ok(Value::Bool(!right.is_truthy()))
                }
                _ => {
                    let left = self.eval_expr(left)?;
                    let right = self.eval_expr(right)?;
                    self.binary_op(operator, left, right, span)
                }
            },
        }
    }

    fn binary_op(
        &self,
        operator: &BinaryOp,
        left: Value,
        right: Value,
        span: &Span,
    ) -> Result<Value, PyriteError> {
        // Zero divisor check comes before type dispatch.
        if *operator == BinaryOp::Divide {
            if let Some(divisor) = right.as_number() {
                if divisor == 0.0 {
                    return Err(PyriteError::zero_division(span.clone()));
                }
            }
        }

        match operator {
            BinaryOp::Add
            | BinaryOp::Subtract
            | BinaryOp::Multiply
            | BinaryOp::Divide => self.arithmetic(operator, left, right, span),
            BinaryOp::Greater
            | BinaryOp::GreaterEqual
            | BinaryOp::Less
            | BinaryOp::LessEqual
            | BinaryOp::Equal
            | BinaryOp::NotEqual => self.comparison(operator, left, right, span),
            BinaryOp::And | BinaryOp::Or | BinaryOp::Not => unreachable!(),
        }
    }

    fn arithmetic(
        &self,
        operator: &BinaryOp,
        left: Value,
        right: Value,
        span: &Span,
    ) -> Result<Value, PyriteError> {
        // int/bool pairs stay integral, except `/` which is always true
        // float division.
        if let (Some(l), Some(r)) = (left.as_int(), right.as_int()) {
            return Ok(match operator {
                BinaryOp::Add => Value::Int(l + r),
                BinaryOp::Subtract => Value::Int(l - r),
                BinaryOp::Multiply => Value::Int(l * r),
                BinaryOp::Divide => Value::Float(l as f64 / r as f64),
                _ => unreachable!(),
            });
        }

        // Any float operand promotes the whole operation to float.
        if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
            return Ok(Value::Float(match operator {
                BinaryOp::Add => l + r,
                BinaryOp::Subtract => l - r,
                BinaryOp::Multiply => l * r,
                BinaryOp::Divide => l / r,
                _ => unreachable!(),
            }));
        }

        match (&left, &right, operator) {
            (Value::Str(l), Value::Str(r), BinaryOp::Add) => {
                Ok(Value::Str(format!("{}{}", l, r)))
            }
            (Value::Str(s), Value::Int(n), BinaryOp::Multiply) => {
                // Non-positive repetition yields the empty string.
                Ok(Value::Str(s.repeat((*n).max(0) as usize)))
            }
            _ => Err(self.type_mismatch(operator, &left, &right, span)),
        }
    }

    fn comparison(
        &self,
        operator: &BinaryOp,
        left: Value,
        right: Value,
        span: &Span,
    ) -> Result<Value, PyriteError> {
        // Comparisons work on the float-promoted view of any
        // numeric/boolean pair and always yield a boolean.
        let (l, r) = match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(self.type_mismatch(operator, &left, &right, span)),
        };
        Ok(Value::Bool(match operator {
            BinaryOp::Greater => l > r,
            BinaryOp::GreaterEqual => l >= r,
            BinaryOp::Less => l < r,
            BinaryOp::LessEqual => l <= r,
            BinaryOp::Equal => l == r,
            BinaryOp::NotEqual => l != r,
            _ => unreachable!(),
        }))
    }

    fn type_mismatch(
        &self,
        operator: &BinaryOp,
        left: &Value,
        right: &Value,
        span: &Span,
    ) -> PyriteError {
        PyriteError::type_error(
            span.clone(),
            format!(
                "Unsupported operand type(s) for '{}': '{}' and '{}'",
                operator.symbol(),
                left.type_name(),
                right.type_name()
            ),
        )
    }
}
