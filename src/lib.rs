#![allow(clippy::needless_return)]

//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping and first-class functions. Rocks is a tree-walk interpreter with a hand-written
//! recursive descent parser. Rocks is a hobby project and is not intended for production use.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node. This is in contrast to a compiler, which would convert the AST
//! into bytecode or machine code. Tree-walk interpreters are generally easier to implement than
//! compilers, but are generally slower than compilers.
//!
//! Rocks is a hobby project and is not intended for production use. The goal of this project is to
//! learn more about programming languages and interpreters. This project is inspired by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as an iterator over the characters
//! in the source code. It is a simple state machine that returns the next token in the source code
//! when called.
//!
//! The scanner reports syntax errors in the source code as a [`ScanError`](error::ScanError).
//! These errors are trivial problems like an unterminated string literal or an unexpected character.
//! Scan errors are reported as soon as they are encountered. This means that the scanner will
//! continue scanning the source code even if it has already encountered a syntax error. This is
//! useful because it allows the user to fix multiple syntax errors at once.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The whole program parses down to a single top-level
//! [`Block`](stmt::Stmt::Block) statement, so the evaluator always has exactly one `Stmt` to run
//! regardless of how many declarations the source holds. [`Expressions`](expr::Expr) are pieces of
//! code that produce a value, specifically an [`Object`](object::Object). Objects are an umbrella
//! term for all types of values in Rocks including literals, functions, classes and instances.
//! [`Statements`](stmt::Stmt) are pieces of code that do not produce a value but instead perform
//! some action; these actions modify the state of the program and thus, are called side-effects.
//!
//! The parser reports syntax errors in the source code as a [`ParseError`](error::ParseError).
//! Unlike the scanner, the parser catches errors that span multiple tokens. However, much like the
//! scanner, the parser will continue parsing the source code even if it has already encountered a
//! syntax error using a technique called synchronization. This is useful because it allows the user
//! to fix multiple syntax errors at once.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process of statically analyzing
//! the AST to determine the scope of each variable. While this requires a pre-pass of the AST, it
//! is necessary to construct robust lexical scoping. The resolver is implemented in the
//! [`resolver`](resolver) module as a tree-walk visitor. The resolver is run after the parser
//! because it requires the AST to be fully constructed. The resolver reports errors as a
//! [`ResolveError`](error::ResolveError). These errors are syntactically valid but semantically
//! invalid, and therefore cannot be caught by the scanner or the parser. For example, the following
//! expression is valid Rocks syntax but it is semantically invalid because the variable `a` is
//! defined twice in the same scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step in the interpreter is _interpreting_. Interpreting is the process of evaluating the
//! AST. The interpreter is implemented in the [`interpreter`](interpreter) module as a tree-walk
//! evaluator. Thanks to all the previous steps, the interpreter is able to evaluate the AST and
//! produce a result. The interpreter reports errors as a [`RuntimeError`](error::RuntimeError). While
//! the scanner, the parser and the resolver try to catch as many errors as possible before running
//! the code, most errors can only be caught at runtime. For example, the following expression is
//! valid Rocks syntax but it is semantically invalid because it tries to add a string and a number:
//! ```text
//! var a = "123";
//! var b = a + 123;
//! ```
//! The interpreter is also responsible for managing the environment. The environment is a chain of
//! lexical scopes mapping variable names to their values, implemented in the
//! [`environment`](environment) module. Each link in the chain represents a scope in the program;
//! this allows the interpreter to implement lexical scoping.

use std::fs;
use std::process::ExitCode;

use log::debug;

pub mod ast;
pub mod class;
pub mod config;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use ast::Printer;
use config::RunConfig;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The top-level driver: owns the interpreter across an entire file run or an
/// entire REPL session, so top-level `fun`/`class` declarations made in one
/// REPL line are never visible to the next (each line parses to its own
/// top-level `Block`, scoped under the driver's persistent interpreter).
#[allow(non_camel_case_types)]
pub struct rocks {
    interpreter: interpreter::Interpreter,
}

impl rocks {
    pub fn new() -> Self {
        rocks { interpreter: interpreter::Interpreter::new() }
    }

    /// Runs a whole file and maps the process-level error flags to an exit code:
    /// 0 on success, 65 on a scan/parse/resolve error, 70 on a runtime error.
    pub fn run_file(&mut self, path: &str, config: &RunConfig, print_ast: bool) -> ExitCode {
        let contents = fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("Could not read file '{path}': {err}");
            std::process::exit(74);
        });

        self.run(&contents, config, print_ast);

        if error::did_runtime_error() {
            ExitCode::from(70)
        } else if error::did_error() {
            ExitCode::from(65)
        } else {
            ExitCode::SUCCESS
        }
    }

    /// Runs a `rustyline`-backed REPL. Each line is parsed and interpreted
    /// independently; the error flags are reset between prompts so one bad
    /// line never poisons the rest of the session.
    pub fn run_prompt(&mut self, config: &RunConfig, print_ast: bool) {
        let mut editor = rustyline::DefaultEditor::new().expect("failed to start line editor");

        if let Some(history_path) = &config.history_path {
            let _ = editor.load_history(history_path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line, config, print_ast);
                    error::reset_error();
                }
                Err(rustyline::error::ReadlineError::Interrupted) => continue,
                Err(rustyline::error::ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error reading line: {err}");
                    break;
                }
            }
        }

        if let Some(history_path) = &config.history_path {
            let _ = editor.save_history(history_path);
        }
    }

    fn run(&mut self, source: &str, config: &RunConfig, print_ast: bool) {
        let tokens = Scanner::new(source, config).scan_tokens();
        debug!("scanned {} tokens", tokens.len());

        if error::did_error() {
            return;
        }

        let statement = Parser::new(tokens).parse();

        if error::did_error() {
            return;
        }

        if print_ast {
            println!("{}", Printer.print(&statement));
        }

        Resolver::new(&mut self.interpreter).resolve_program(&statement);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statement);
    }
}

impl Default for rocks {
    fn default() -> Self {
        Self::new()
    }
}
