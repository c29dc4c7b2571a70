//! claspc-drv - Compiler driver.
//!
//! The driver owns one compiler invocation: it parses the command line
//! into a [`Config`], reads the input, runs the front-end pipeline
//! (lex, parse, print), and renders collected diagnostics to stderr.
//!
//! # Pipeline
//!
//! ```text
//! source file / stdin
//!        |
//!        v
//!   [Lexer]  -> token window
//!        |
//!        v
//!   [Parser] -> AST (Block root)
//!        |
//!        v
//!   [Printer] -> stdout
//! ```
//!
//! # Exit codes
//!
//! - `0` - success
//! - `1` - every failure: fatal diagnostics during lex or parse, I/O
//!   errors, usage errors
//!
//! The single non-zero code is deliberate; callers only need to test
//! for success.

use std::fs;
use std::path::PathBuf;

use claspc_lex::{Lexer, ReaderSource, StrSource};
use claspc_par::print::print_ast;
use claspc_par::Parser;
use claspc_util::Handler;
use thiserror::Error;

/// Usage text for `-h`/`--help`.
pub const USAGE: &str = "\
Usage: claspc [OPTIONS] [INPUT]

Compile a Clasp source file and print its syntax tree.

Arguments:
  [INPUT]          Source file to compile; omit or pass '-' for stdin

Options:
      --emit <WHAT>  What to print: 'tokens' or 'ast' (default: ast)
      --verbose      Trace pipeline phases to stderr
  -h, --help         Print help
  -V, --version      Print version";

/// Driver error.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Reading the input failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The command line did not parse.
    #[error("{0}")]
    Usage(String),

    /// The front-end reported fatal diagnostics (already rendered to
    /// stderr).
    #[error("compilation failed")]
    CompilationFailed,
}

/// What the driver prints on stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitType {
    /// One token per line, as scanned.
    Tokens,
    /// The printed AST.
    #[default]
    Ast,
}

/// Configuration for one driver invocation.
#[derive(Debug, Default)]
pub struct Config {
    /// Input path; `None` reads stdin.
    pub input: Option<PathBuf>,
    /// What to print.
    pub emit: EmitType,
    /// Trace pipeline phases to stderr.
    pub verbose: bool,
}

/// Outcome of command-line parsing.
#[derive(Debug)]
pub enum CliAction {
    /// Run the pipeline with this configuration.
    Run(Config),
    /// Print usage and exit successfully.
    Help,
    /// Print the version and exit successfully.
    Version,
}

/// Parse command-line arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliAction, CompileError> {
    let mut config = Config::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "--verbose" => config.verbose = true,
            "--emit" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CompileError::Usage("'--emit' needs a value".into()))?;
                config.emit = parse_emit(value)?;
            }
            "-" => config.input = None,
            other if other.starts_with('-') => {
                return Err(CompileError::Usage(format!("unknown option '{}'", other)));
            }
            path => {
                if config.input.is_some() {
                    return Err(CompileError::Usage(
                        "expected at most one input file".into(),
                    ));
                }
                config.input = Some(PathBuf::from(path));
            }
        }
    }

    Ok(CliAction::Run(config))
}

fn parse_emit(value: &str) -> Result<EmitType, CompileError> {
    match value {
        "tokens" => Ok(EmitType::Tokens),
        "ast" => Ok(EmitType::Ast),
        other => Err(CompileError::Usage(format!(
            "unknown emit kind '{}' (expected 'tokens' or 'ast')",
            other
        ))),
    }
}

/// One compiler invocation: configuration plus the diagnostic handler
/// shared by every phase.
pub struct Session {
    /// Configuration.
    pub config: Config,
    /// Diagnostic handler.
    pub handler: Handler,
}

impl Session {
    /// Create a session.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handler: Handler::new(),
        }
    }

    /// Run the pipeline. Diagnostics are rendered to stderr before this
    /// returns.
    pub fn compile(&self) -> Result<(), CompileError> {
        let lexer = match &self.config.input {
            Some(path) => {
                if self.config.verbose {
                    eprintln!("Reading: {}", path.display());
                }
                let text = fs::read_to_string(path).map_err(|source| CompileError::Io {
                    path: path.clone(),
                    source,
                })?;
                Lexer::new(Box::new(StrSource::new(&text)), &self.handler)
            }
            None => {
                if self.config.verbose {
                    eprintln!("Reading: <stdin>");
                }
                Lexer::new(Box::new(ReaderSource::new(std::io::stdin())), &self.handler)
            }
        };

        match self.config.emit {
            EmitType::Tokens => self.emit_tokens(lexer),
            EmitType::Ast => self.emit_ast(lexer),
        }
    }

    /// Drain the lexer, printing one token per line, ending with the
    /// end-of-input token.
    fn emit_tokens(&self, mut lexer: Lexer<'_>) -> Result<(), CompileError> {
        if self.config.verbose {
            eprintln!("Lexing");
        }
        loop {
            let token = lexer.advance();
            println!("{}", token);
            if token.is_eof() {
                break;
            }
        }
        self.report()
    }

    /// Parse and print the AST.
    fn emit_ast(&self, lexer: Lexer<'_>) -> Result<(), CompileError> {
        if self.config.verbose {
            eprintln!("Parsing");
        }
        let mut parser = Parser::new(lexer);
        let ast = parser.compile();
        self.report()?;

        match ast {
            Some(ast) => {
                print!("{}", print_ast(&ast));
                Ok(())
            }
            None => Err(CompileError::CompilationFailed),
        }
    }

    /// Render collected diagnostics to stderr; error out if any were
    /// fatal.
    fn report(&self) -> Result<(), CompileError> {
        for diagnostic in self.handler.diagnostics() {
            eprintln!("{}", diagnostic.render());
        }
        if self.handler.has_errors() {
            Err(CompileError::CompilationFailed)
        } else {
            Ok(())
        }
    }
}

/// Entry point shared by the binary: parse arguments and act on them.
pub fn run(args: &[String]) -> Result<(), CompileError> {
    match parse_args(args)? {
        CliAction::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliAction::Version => {
            println!("claspc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliAction::Run(config) => Session::new(config).compile(),
    }
}
