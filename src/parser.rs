use crate::ast::{BinaryOp, Expr, Program, Stmt};
use crate::error::PyriteError;
use crate::lexer::{Line, Token, TokenType};
use crate::value::Value;

/// Precedence table, low to high. Parentheses reset to 0.
fn precedence(op: &BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => 1,
        BinaryOp::And => 2,
        BinaryOp::Not => 3,
        BinaryOp::Greater
        | BinaryOp::GreaterEqual
        | BinaryOp::Less
        | BinaryOp::LessEqual
        | BinaryOp::Equal
        | BinaryOp::NotEqual => 4,
        BinaryOp::Add | BinaryOp::Subtract => 5,
        BinaryOp::Multiply | BinaryOp::Divide => 6,
    }
}

fn binary_op_of(token_type: &TokenType) -> Option<BinaryOp> {
    match token_type {
        TokenType::Plus => Some(BinaryOp::Add),
        TokenType::Minus => Some(BinaryOp::Subtract),
        TokenType::Star => Some(BinaryOp::Multiply),
        TokenType::Slash => Some(BinaryOp::Divide),
        TokenType::Greater => Some(BinaryOp::Greater),
        TokenType::GreaterEqual => Some(BinaryOp::GreaterEqual),
        TokenType::Less => Some(BinaryOp::Less),
        TokenType::LessEqual => Some(BinaryOp::LessEqual),
        TokenType::EqualEqual => Some(BinaryOp::Equal),
        TokenType::NotEqual => Some(BinaryOp::NotEqual),
        TokenType::And => Some(BinaryOp::And),
        TokenType::Or => Some(BinaryOp::Or),
        TokenType::Not => Some(BinaryOp::Not),
        _ => None,
    }
}

/// The construct a block reader serves; decides which `elif`/`else`
/// continuations may attach at equal indent.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Construct {
    If,
    While,
    Else,
}

/// Recursive-descent parser over the pre-lexed line table. Expression
/// parsing is precedence climbing; blocks are read line by line against
/// the opening construct's indentation.
pub struct Parser {
    lines: Vec<Line>,
    line: usize,
    current: usize,
}

impl Parser {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            line: 0,
            current: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Program, PyriteError> {
        let mut statements = Vec::new();

        while self.line < self.lines.len() {
            let line = &self.lines[self.line];
            if line.indent > 0 {
                return Err(PyriteError::indentation(
                    line.span.clone(),
                    "Unexpected indent".to_string(),
                ));
            }
            self.parse_line(&mut statements)?;
        }

        Ok(Program { statements })
    }

    /// Parse every statement on the current line and move past it. A
    /// construct opener is necessarily the line's last statement (its `:`
    /// must end the line) and consumes its body lines before returning.
    fn parse_line(&mut self, out: &mut Vec<Stmt>) -> Result<(), PyriteError> {
        loop {
            if self.check(&TokenType::Eof) {
                self.next_line();
                return Ok(());
            }
            let stmt = self.parse_statement()?;
            let is_construct = matches!(stmt, Stmt::If { .. } | Stmt::While { .. });
            out.push(stmt);
            if is_construct {
                // Already positioned at the first line after the block.
                return Ok(());
            }
            if self.check(&TokenType::Semicolon) {
                self.advance();
            }
        }
    }

    pub fn parse_statement(&mut self) -> Result<Stmt, PyriteError> {
        match self.peek().token_type {
            TokenType::Print => self.print_statement(),
            TokenType::Pass => {
                let token = self.advance().clone();
                Ok(Stmt::Pass { span: token.span })
            }
            TokenType::Break => {
                let token = self.advance().clone();
                Ok(Stmt::Break { span: token.span })
            }
            TokenType::If => self.if_statement(),
            TokenType::While => self.while_statement(),
            TokenType::Elif => Err(PyriteError::syntax(
                self.peek().span.clone(),
                "'elif' without a matching 'if'".to_string(),
            )),
            TokenType::Else => Err(PyriteError::syntax(
                self.peek().span.clone(),
                "'else' without a matching 'if' or 'while'".to_string(),
            )),
            TokenType::Exit => Err(PyriteError::syntax(
                self.peek().span.clone(),
                "'exit' is only available at the interactive prompt".to_string(),
            )),
            TokenType::LeftBrace | TokenType::RightBrace => Err(PyriteError::syntax(
                self.peek().span.clone(),
                "Braces are reserved and have no meaning".to_string(),
            )),
            TokenType::Identifier if self.peek_next_is(&TokenType::Assign) => self.assignment(),
            _ => self.expression_statement(),
        }
    }

    fn print_statement(&mut self) -> Result<Stmt, PyriteError> {
        let keyword = self.advance().clone();
        let value = self.parse_expression()?;
        let span = keyword.span.merge(value.span());
        Ok(Stmt::Print { value, span })
    }

    fn assignment(&mut self) -> Result<Stmt, PyriteError> {
        let name_token = self.advance().clone();
        self.advance(); // '='
        let value = self.parse_expression()?;
        let span = name_token.span.merge(value.span());
        Ok(Stmt::Assign {
            name: name_token.lexeme,
            value,
            span,
        })
    }

    fn expression_statement(&mut self) -> Result<Stmt, PyriteError> {
        let expr = self.parse_expression()?;
        if self.check(&TokenType::Assign) {
            return Err(PyriteError::assignment(
                self.peek().span.clone(),
                "Invalid assignment target".to_string(),
            )
            .with_help("Only a bare variable name can appear left of '='.".to_string()));
        }
        let span = expr.span().clone();
        Ok(Stmt::Expression { expr, span })
    }

    fn if_statement(&mut self) -> Result<Stmt, PyriteError> {
        let keyword = self.advance().clone(); // 'if' or 'elif'
        let construct_indent = self.lines[self.line].indent;
        let condition = self.parse_expression()?;
        self.consume(
            TokenType::Colon,
            &format!("Expected ':' after '{}' condition", keyword.lexeme),
        )?;
        self.end_construct_line(&keyword)?;

        let (body, tail) = self.parse_block(construct_indent, Construct::If, &keyword)?;
        let span = match &tail {
            Some(next) => keyword.span.merge(next.span()),
            None => keyword.span.merge(body.span()),
        };
        Ok(Stmt::If {
            condition,
            body: Box::new(body),
            next: tail.map(Box::new),
            span,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, PyriteError> {
        let keyword = self.advance().clone();
        let construct_indent = self.lines[self.line].indent;
        let condition = self.parse_expression()?;
        self.consume(TokenType::Colon, "Expected ':' after 'while' condition")?;
        self.end_construct_line(&keyword)?;

        let (body, tail) = self.parse_block(construct_indent, Construct::While, &keyword)?;
        let span = match &tail {
            Some(else_block) => keyword.span.merge(else_block.span()),
            None => keyword.span.merge(body.span()),
        };
        Ok(Stmt::While {
            condition,
            body: Box::new(body),
            else_block: tail.map(Box::new),
            span,
        })
    }

    fn else_statement(&mut self) -> Result<Stmt, PyriteError> {
        let keyword = self.advance().clone();
        let construct_indent = self.lines[self.line].indent;
        self.consume(TokenType::Colon, "Expected ':' after 'else'")?;
        self.end_construct_line(&keyword)?;

        let (body, _tail) = self.parse_block(construct_indent, Construct::Else, &keyword)?;
        let span = keyword.span.merge(body.span());
        Ok(Stmt::Else {
            body: Box::new(body),
            span,
        })
    }

    /// A construct line ends right after its ':'.
    fn end_construct_line(&mut self, keyword: &Token) -> Result<(), PyriteError> {
        if !self.check(&TokenType::Eof) {
            return Err(PyriteError::syntax(
                self.peek().span.clone(),
                format!(
                    "Expected end of line after ':' in '{}' statement",
                    keyword.lexeme
                ),
            )
            .with_help("A block body goes on the following lines, indented one level.".to_string()));
        }
        self.next_line();
        Ok(())
    }

    /// Read a construct's body: subsequent lines indented deeper than the
    /// construct itself. A line at the construct's own indent starting
    /// with `elif`/`else` attaches as the continuation and ends the
    /// block; any other line at or below the construct's indent ends the
    /// block and is left for the enclosing reader.
    fn parse_block(
        &mut self,
        construct_indent: usize,
        construct: Construct,
        keyword: &Token,
    ) -> Result<(Stmt, Option<Stmt>), PyriteError> {
        let mut statements = Vec::new();

        let tail = loop {
            if self.line >= self.lines.len() {
                break None;
            }
            let indent = self.lines[self.line].indent;
            if indent > construct_indent {
                self.parse_line(&mut statements)?;
                continue;
            }
            if indent < construct_indent {
                break None;
            }
            match self.peek().token_type {
                TokenType::Elif => {
                    if statements.is_empty() {
                        return Err(self.empty_block_error(keyword));
                    }
                    match construct {
                        Construct::If => break Some(self.if_statement()?),
                        Construct::While => {
                            return Err(PyriteError::syntax(
                                self.peek().span.clone(),
                                "'elif' cannot follow 'while'".to_string(),
                            ))
                        }
                        Construct::Else => {
                            return Err(PyriteError::syntax(
                                self.peek().span.clone(),
                                "'elif' cannot follow 'else'".to_string(),
                            ))
                        }
                    }
                }
                TokenType::Else => {
                    if statements.is_empty() {
                        return Err(self.empty_block_error(keyword));
                    }
                    match construct {
                        Construct::If | Construct::While => break Some(self.else_statement()?),
                        Construct::Else => {
                            return Err(PyriteError::syntax(
                                self.peek().span.clone(),
                                "'else' cannot follow 'else'".to_string(),
                            ))
                        }
                    }
                }
                _ => break None,
            }
        };

        if statements.is_empty() {
            return Err(self.empty_block_error(keyword));
        }

        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => keyword.span.clone(),
        };
        Ok((Stmt::Block { statements, span }, tail))
    }

    fn empty_block_error(&self, keyword: &Token) -> PyriteError {
        PyriteError::indentation(
            keyword.span.clone(),
            format!("Expected an indented block after '{}'", keyword.lexeme),
        )
    }

    pub fn parse_expression(&mut self) -> Result<Expr, PyriteError> {
        self.parse_precedence(0)
    }

    fn parse_precedence(&mut self, min_prec: u8) -> Result<Expr, PyriteError> {
        let mut left = self.parse_operand()?;

        while let Some(operator) = binary_op_of(&self.peek().token_type) {
            let prec = precedence(&operator);
            if prec < min_prec {
                break;
            }
            let op_token = self.advance().clone();

            // Precedence climbing: the right side binds at prec + 1.
            let right = self.parse_precedence(prec + 1).map_err(|_| {
                PyriteError::syntax(
                    op_token.span.clone(),
                    format!("Expected expression after '{}'", op_token.lexeme),
                )
            })?;
            let span = left.span().merge(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// Operand position. A leading `+`/`-` synthesizes an implicit zero
    /// left operand (`-5` parses as `0 - 5`); a leading `not` synthesizes
    /// an implicit `True` it will ignore at evaluation.
    fn parse_operand(&mut self) -> Result<Expr, PyriteError> {
        match self.peek().token_type {
            TokenType::Plus | TokenType::Minus => {
                let op_token = self.advance().clone();
                let operator = if op_token.token_type == TokenType::Plus {
                    BinaryOp::Add
                } else {
                    BinaryOp::Subtract
                };
                let zero = Expr::Literal {
                    value: Value::Int(0),
                    span: op_token.span.clone(),
                };
                self.finish_unary(zero, operator, op_token)
            }
            TokenType::Not => {
                let op_token = self.advance().clone();
                let truth = Expr::Literal {
                    value: Value::Bool(true),
                    span: op_token.span.clone(),
                };
                self.finish_unary(truth, BinaryOp::Not, op_token)
            }
            _ => self.parse_primary(),
        }
    }

    fn finish_unary(
        &mut self,
        left: Expr,
        operator: BinaryOp,
        op_token: Token,
    ) -> Result<Expr, PyriteError> {
        let right = self.parse_precedence(precedence(&operator) + 1).map_err(|_| {
            PyriteError::syntax(
                op_token.span.clone(),
                format!("Expected expression after '{}'", op_token.lexeme),
            )
        })?;
        let span = op_token.span.merge(right.span());
        Ok(Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, PyriteError> {
        let token = self.advance().clone();

        match token.token_type {
            TokenType::NoneLiteral => Ok(Expr::Literal {
                value: Value::None,
                span: token.span,
            }),
            TokenType::True => Ok(Expr::Literal {
                value: Value::Bool(true),
                span: token.span,
            }),
            TokenType::False => Ok(Expr::Literal {
                value: Value::Bool(false),
                span: token.span,
            }),
            TokenType::Integer => {
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    PyriteError::value(token.span.clone(), "Invalid integer literal".to_string())
                })?;
                Ok(Expr::Literal {
                    value: Value::Int(value),
                    span: token.span,
                })
            }
            TokenType::Float => {
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    PyriteError::value(token.span.clone(), "Invalid float literal".to_string())
                })?;
                Ok(Expr::Literal {
                    value: Value::Float(value),
                    span: token.span,
                })
            }
            TokenType::Str => Ok(Expr::Literal {
                value: Value::Str(token.lexeme),
                span: token.span,
            }),
            TokenType::Identifier => Ok(Expr::Variable {
                name: token.lexeme,
                span: token.span,
            }),
            TokenType::LeftParen => {
                if self.check(&TokenType::RightParen) {
                    return Err(PyriteError::syntax(
                        token.span.merge(&self.peek().span),
                        "Empty parentheses are not allowed".to_string(),
                    ));
                }
                let expr = self.parse_expression()?;
                self.consume(TokenType::RightParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            TokenType::Eof => Err(PyriteError::syntax(
                token.span,
                "Expected expression, found end of line".to_string(),
            )),
            _ => Err(PyriteError::syntax(
                token.span,
                format!("Expected expression, found '{}'", token.lexeme),
            )),
        }
    }

    fn peek(&self) -> &Token {
        &self.lines[self.line].tokens[self.current]
    }

    fn peek_next_is(&self, token_type: &TokenType) -> bool {
        self.lines[self.line]
            .tokens
            .get(self.current + 1)
            .map_or(false, |t| &t.token_type == token_type)
    }

    fn check(&self, token_type: &TokenType) -> bool {
        &self.peek().token_type == token_type
    }

    /// Return the current token, moving forward unless at the line's Eof.
    fn advance(&mut self) -> &Token {
        let idx = self.current;
        if !self.check(&TokenType::Eof) {
            self.current += 1;
        }
        &self.lines[self.line].tokens[idx]
    }

    fn next_line(&mut self) {
        self.line += 1;
        self.current = 0;
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<&Token, PyriteError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(PyriteError::syntax(
                self.peek().span.clone(),
                message.to_string(),
            ))
        }
    }
}
