use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both operands, used for binary nodes.
    pub fn merge(&self, other: &Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Name,
    Type,
    ZeroDivision,
    Value,
    Literal,
    Assignment,
    Indentation,
}

impl ErrorKind {
    fn label(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Name => "Name Error",
            ErrorKind::Type => "Type Error",
            ErrorKind::ZeroDivision => "Zero Division Error",
            ErrorKind::Value => "Value Error",
            ErrorKind::Literal => "Literal Error",
            ErrorKind::Assignment => "Assignment Error",
            ErrorKind::Indentation => "Indentation Error",
        }
    }

    fn color(&self) -> Color {
        match self {
            ErrorKind::Syntax | ErrorKind::Value | ErrorKind::Literal => Color::Red,
            ErrorKind::Indentation => Color::Yellow,
            ErrorKind::Name
            | ErrorKind::Type
            | ErrorKind::ZeroDivision
            | ErrorKind::Assignment => Color::Magenta,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PyriteError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl PyriteError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn syntax(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Syntax, span, message)
    }

    pub fn name(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Name, span, message)
    }

    pub fn type_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Type, span, message)
    }

    pub fn zero_division(span: Span) -> Self {
        Self::new(ErrorKind::ZeroDivision, span, "Division by zero".to_string())
    }

    pub fn value(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Value, span, message)
    }

    pub fn literal(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Literal, span, message)
    }

    pub fn assignment(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Assignment, span, message)
    }

    pub fn indentation(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Indentation, span, message)
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");
        let color = self.kind.color();

        let mut builder = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("{}: {}", self.kind.label().fg(color), self.message))
            .with_label(
                Label::new((filename, self.span.start..self.span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            builder = builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        builder
            .finish()
            .print((filename, Source::from(source)))
            .unwrap();
    }
}

impl fmt::Display for PyriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

impl std::error::Error for PyriteError {}
