use crate::error::{PyriteError, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Literals
    NoneLiteral,
    Integer,
    Float,
    Str,
    True,
    False,

    Identifier,

    // Keywords
    Print,
    If,
    Elif,
    Else,
    While,
    Pass,
    Break,
    Exit,

    // Operators. Multi-character source forms (`==`, `>=`, `and`, ...)
    // collapse to one variant each.
    Plus,
    Minus,
    Star,
    Slash,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    EqualEqual,
    NotEqual,
    And,
    Or,
    Not,

    // Structure. Braces are lexed but reserved; the grammar rejects them.
    Assign,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Colon,
    Semicolon,

    Eof,
}

impl TokenType {
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::NoneLiteral => "NONE",
            TokenType::Integer => "INTEGER",
            TokenType::Float => "FLOAT",
            TokenType::Str => "STRING",
            TokenType::True | TokenType::False => "BOOLEAN",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::Print
            | TokenType::If
            | TokenType::Elif
            | TokenType::Else
            | TokenType::While
            | TokenType::Pass
            | TokenType::Break
            | TokenType::Exit => "KEYWORD",
            TokenType::Plus
            | TokenType::Minus
            | TokenType::Star
            | TokenType::Slash
            | TokenType::Greater
            | TokenType::GreaterEqual
            | TokenType::Less
            | TokenType::LessEqual
            | TokenType::EqualEqual
            | TokenType::NotEqual
            | TokenType::And
            | TokenType::Or
            | TokenType::Not => "OPERATOR",
            TokenType::Assign => "ASSIGN",
            TokenType::LeftParen => "L_PAREN",
            TokenType::RightParen => "R_PAREN",
            TokenType::LeftBrace => "L_BRACE",
            TokenType::RightBrace => "R_BRACE",
            TokenType::Colon => "COLON",
            TokenType::Semicolon => "SEMI_COLON",
            TokenType::Eof => "EOF",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

/// One logical line of source: its indentation depth (tabs or 4-space runs
/// at the line start, one unit each) and its tokens, terminated by `Eof`.
///
/// The whole source is lexed into a line table up front so the parser's
/// block reader can walk lines by position instead of re-entering the lexer.
#[derive(Debug, Clone)]
pub struct Line {
    pub indent: usize,
    pub tokens: Vec<Token>,
    pub span: Span,
}

pub struct Lexer {
    source: String,
    debug_directive: Option<bool>,
}

impl Lexer {
    pub fn new(source: String) -> Self {
        Self {
            source,
            debug_directive: None,
        }
    }

    /// The `debug` pseudo-keyword toggles diagnostics as a side effect
    /// instead of producing a token; drivers query the last toggle here
    /// after scanning.
    pub fn debug_directive(&self) -> Option<bool> {
        self.debug_directive
    }

    pub fn scan_lines(&mut self) -> Result<Vec<Line>, PyriteError> {
        let source = std::mem::take(&mut self.source);
        let mut lines = Vec::new();
        let mut offset = 0;

        for raw in source.split('\n') {
            let chars: Vec<char> = raw.chars().collect();
            if let Some(line) = self.scan_line(&chars, offset)? {
                lines.push(line);
            }
            offset += chars.len() + 1;
        }

        self.source = source;
        Ok(lines)
    }

    fn scan_line(&mut self, chars: &[char], offset: usize) -> Result<Option<Line>, PyriteError> {
        let mut tokens = Vec::new();
        let mut indent = 0;
        let mut i = 0;

        // Leading indentation: a tab or a run of 4 spaces is one unit.
        // A trailing run of 1-3 spaces carries no meaning.
        let mut spaces = 0;
        while i < chars.len() {
            match chars[i] {
                '\t' => {
                    indent += 1;
                    spaces = 0;
                    i += 1;
                }
                ' ' => {
                    spaces += 1;
                    if spaces == 4 {
                        indent += 1;
                        spaces = 0;
                    }
                    i += 1;
                }
                _ => break,
            }
        }

        while i < chars.len() {
            let start = i;
            let c = chars[i];

            match c {
                ' ' | '\t' | '\r' => {
                    i += 1;
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_')
                    {
                        i += 1;
                    }
                    let text: String = chars[start..i].iter().collect();
                    let span = Span::new(offset + start, offset + i);
                    let token_type = match text.as_str() {
                        "True" => TokenType::True,
                        "False" => TokenType::False,
                        "None" => TokenType::NoneLiteral,
                        "and" => TokenType::And,
                        "or" => TokenType::Or,
                        "not" => TokenType::Not,
                        "print" => TokenType::Print,
                        "if" => TokenType::If,
                        "elif" => TokenType::Elif,
                        "else" => TokenType::Else,
                        "while" => TokenType::While,
                        "pass" => TokenType::Pass,
                        "break" => TokenType::Break,
                        "exit" => TokenType::Exit,
                        "debug" => {
                            // Diagnostic toggle; consumes the rest of the line.
                            while i < chars.len() && chars[i] == ' ' {
                                i += 1;
                            }
                            match chars.get(i) {
                                Some('1') => self.debug_directive = Some(true),
                                Some('0') => self.debug_directive = Some(false),
                                _ => {
                                    return Err(PyriteError::syntax(
                                        Span::new(offset + start, offset + (i + 1).min(chars.len())),
                                        "Improper debug directive".to_string(),
                                    )
                                    .with_help(
                                        "Use 'debug 1' to enable diagnostics or 'debug 0' to disable them.".to_string(),
                                    ));
                                }
                            }
                            break;
                        }
                        _ => TokenType::Identifier,
                    };
                    tokens.push(Token::new(token_type, text, span));
                }
                c if c.is_ascii_digit() || c == '.' => {
                    if c == '.' && !chars.get(i + 1).map_or(false, |d| d.is_ascii_digit()) {
                        return Err(PyriteError::value(
                            Span::single(offset + i),
                            "Improper floating point literal (dot not followed by digit)"
                                .to_string(),
                        ));
                    }
                    let mut dots = 0;
                    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                        if chars[i] == '.' {
                            dots += 1;
                        }
                        i += 1;
                    }
                    let span = Span::new(offset + start, offset + i);
                    if dots > 1 {
                        return Err(PyriteError::value(
                            span,
                            "Improper floating point literal (multiple dots)".to_string(),
                        ));
                    }
                    let text: String = chars[start..i].iter().collect();
                    if dots == 1 {
                        if text.parse::<f64>().is_err() {
                            return Err(PyriteError::value(
                                span,
                                format!("Invalid float literal: {}", text),
                            ));
                        }
                        tokens.push(Token::new(TokenType::Float, text, span));
                    } else {
                        if text.parse::<i64>().is_err() {
                            return Err(PyriteError::value(
                                span,
                                format!("Invalid integer literal: {}", text),
                            ));
                        }
                        tokens.push(Token::new(TokenType::Integer, text, span));
                    }
                }
                '\'' | '"' => {
                    let quote = c;
                    i += 1;
                    let mut text = String::new();
                    let mut closed = false;
                    while i < chars.len() {
                        let ch = chars[i];
                        if ch == quote {
                            closed = true;
                            i += 1;
                            break;
                        }
                        if ch == '\\' {
                            i += 1;
                            match chars.get(i) {
                                Some('n') => text.push('\n'),
                                Some('r') => text.push('\r'),
                                Some('t') => text.push('\t'),
                                Some('\\') => text.push('\\'),
                                Some('\'') => text.push('\''),
                                Some('"') => text.push('"'),
                                Some(other) => {
                                    return Err(PyriteError::literal(
                                        Span::new(offset + i - 1, offset + i + 1),
                                        format!("Invalid escape sequence -> '\\{}'", other),
                                    ));
                                }
                                None => break,
                            }
                            i += 1;
                        } else {
                            text.push(ch);
                            i += 1;
                        }
                    }
                    if !closed {
                        return Err(PyriteError::literal(
                            Span::new(offset + start, offset + i),
                            "Unterminated string literal".to_string(),
                        ));
                    }
                    tokens.push(Token::new(
                        TokenType::Str,
                        text,
                        Span::new(offset + start, offset + i),
                    ));
                }
                '=' => {
                    if chars.get(i + 1) == Some(&'=') {
                        tokens.push(Token::new(
                            TokenType::EqualEqual,
                            "==".to_string(),
                            Span::new(offset + i, offset + i + 2),
                        ));
                        i += 2;
                    } else {
                        tokens.push(Token::new(
                            TokenType::Assign,
                            "=".to_string(),
                            Span::single(offset + i),
                        ));
                        i += 1;
                    }
                }
                '!' => {
                    if chars.get(i + 1) == Some(&'=') {
                        tokens.push(Token::new(
                            TokenType::NotEqual,
                            "!=".to_string(),
                            Span::new(offset + i, offset + i + 2),
                        ));
                        i += 2;
                    } else {
                        return Err(PyriteError::syntax(
                            Span::single(offset + i),
                            "Unexpected character: '!'".to_string(),
                        )
                        .with_help("Negation is spelled 'not'; '!' only appears in '!='.".to_string()));
                    }
                }
                '>' => {
                    if chars.get(i + 1) == Some(&'=') {
                        tokens.push(Token::new(
                            TokenType::GreaterEqual,
                            ">=".to_string(),
                            Span::new(offset + i, offset + i + 2),
                        ));
                        i += 2;
                    } else {
                        tokens.push(Token::new(
                            TokenType::Greater,
                            ">".to_string(),
                            Span::single(offset + i),
                        ));
                        i += 1;
                    }
                }
                '<' => {
                    if chars.get(i + 1) == Some(&'=') {
                        tokens.push(Token::new(
                            TokenType::LessEqual,
                            "<=".to_string(),
                            Span::new(offset + i, offset + i + 2),
                        ));
                        i += 2;
                    } else {
                        tokens.push(Token::new(
                            TokenType::Less,
                            "<".to_string(),
                            Span::single(offset + i),
                        ));
                        i += 1;
                    }
                }
                _ => {
                    let single = |t: TokenType| {
                        Token::new(t, c.to_string(), Span::single(offset + start))
                    };
                    let token = match c {
                        '+' => single(TokenType::Plus),
                        '-' => single(TokenType::Minus),
                        '*' => single(TokenType::Star),
                        '/' => single(TokenType::Slash),
                        '(' => single(TokenType::LeftParen),
                        ')' => single(TokenType::RightParen),
                        '{' => single(TokenType::LeftBrace),
                        '}' => single(TokenType::RightBrace),
                        ';' => single(TokenType::Semicolon),
                        ':' => single(TokenType::Colon),
                        _ => {
                            return Err(PyriteError::syntax(
                                Span::single(offset + start),
                                format!("Unexpected character: '{}'", c),
                            ));
                        }
                    };
                    tokens.push(token);
                    i += 1;
                }
            }
        }

        if tokens.is_empty() {
            // Blank line, or a bare debug directive.
            return Ok(None);
        }

        tokens.push(Token::new(
            TokenType::Eof,
            "".to_string(),
            Span::single(offset + chars.len()),
        ));

        Ok(Some(Line {
            indent,
            tokens,
            span: Span::new(offset, offset + chars.len()),
        }))
    }
}

/// Token dump used by the REPL's debug mode.
pub fn dump_tokens(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        for token in &line.tokens {
            out.push_str(&format!(
                "{}({})\n",
                token.token_type.name(),
                token.lexeme
            ));
        }
    }
    out
}
