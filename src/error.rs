use std::sync::atomic::{AtomicBool, Ordering};

use crate::token::{Token, Type};

static HAD_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Checks if an error occurred during scanning, parsing, resolving, or interpreting.
pub fn did_error() -> bool {
    HAD_ERROR.load(Ordering::Relaxed) || HAD_RUNTIME_ERROR.load(Ordering::Relaxed)
}

/// Checks if an error occurred during runtime (as opposed to static analysis).
pub fn did_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::Relaxed)
}

/// Clears both error flags. Used between prompts in the REPL so one bad line
/// doesn't poison the exit code of the whole session.
pub fn reset_error() {
    HAD_ERROR.store(false, Ordering::Relaxed);
    HAD_RUNTIME_ERROR.store(false, Ordering::Relaxed);
}

fn mark_static_error() {
    HAD_ERROR.store(true, Ordering::Relaxed);
}

fn mark_runtime_error() {
    HAD_RUNTIME_ERROR.store(true, Ordering::Relaxed);
}

/// Every error taxon shares this shape: a pure, bit-exact message and a side
/// effect that reports it to stderr and flips the matching process flag.
pub trait LoxError {
    /// The bit-exact text, without a trailing newline.
    fn message(&self) -> String;

    /// Writes the message to stderr and marks the error flag.
    fn report(&self);
}

/// An error found while scanning raw source text: an unterminated string, an
/// unterminated block comment, or an unrecognized character.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl LoxError for ScanError {
    fn message(&self) -> String {
        format!("[line {}] Error: {}", self.line, self.message)
    }

    fn report(&self) {
        eprintln!("{}", self.message());
        mark_static_error();
    }
}

fn where_clause(token: &Token) -> String {
    if token.kind == Type::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// An error found while parsing a token stream into an AST.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl LoxError for ParseError {
    fn message(&self) -> String {
        format!("[line {}] Error{}: {}", self.token.line, where_clause(&self.token), self.message)
    }

    fn report(&self) {
        eprintln!("{}", self.message());
        mark_static_error();
    }
}

/// An error found by the resolver: a static, semantic rule violation that is
/// syntactically valid but meaningless (redeclaration, `this` outside a class, ...).
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl LoxError for ResolveError {
    fn message(&self) -> String {
        format!("[line {}] Error{}: {}", self.token.line, where_clause(&self.token), self.message)
    }

    fn report(&self) {
        eprintln!("{}", self.message());
        mark_static_error();
    }
}

/// An error raised while evaluating the AST: a type mismatch, an arity mismatch,
/// an undefined name, or division by zero. Aborts the running script.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError { token, message: message.into() }
    }
}

impl LoxError for RuntimeError {
    fn message(&self) -> String {
        format!("{}\n[line {}]", self.message, self.token.line)
    }

    fn report(&self) {
        eprintln!("{}", self.message());
        mark_runtime_error();
    }
}
