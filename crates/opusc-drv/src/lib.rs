//! opusc-drv - Compiler driver.
//!
//! The driver orchestrates the front-end pipeline: read the source file,
//! lex and parse (the parser pulls tokens from the lexer on demand), and —
//! only when parsing produced no errors — run the semantic analyzer. Every
//! collected diagnostic is printed to the error stream in its phase's wire
//! format; debug dumps (tokens, AST, symbol table) go to standard output.
//!
//! Only host-level failures end compilation early: a missing or unreadable
//! file, or a file without the `.opus` extension. Everything else flows
//! through the diagnostic handler.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use opusc_lex::Lexer;
use opusc_par::Parser;
use opusc_sem::SemanticAnalyzer;
use opusc_util::Handler;

/// The only recognized source-file extension.
pub const SOURCE_EXTENSION: &str = "opus";

/// What the driver should produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitKind {
    /// Full front-end run, no dumps.
    #[default]
    Check,
    /// Lex only and dump the token stream.
    Tokens,
    /// Parse and dump the AST.
    Ast,
    /// Analyze and dump the symbol table.
    Symbols,
}

/// Driver configuration for one invocation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path to the source file.
    pub input: PathBuf,
    /// Requested output.
    pub emit: EmitKind,
}

impl Config {
    /// Builds a default (check-only) configuration for a path.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            emit: EmitKind::default(),
        }
    }

    /// Parses command-line arguments (program name excluded).
    ///
    /// Exactly one input path is required; `--emit=` flags select a dump.
    pub fn from_args(args: &[String]) -> Result<Config, CompileError> {
        let mut emit = EmitKind::default();
        let mut input: Option<PathBuf> = None;

        for arg in args {
            match arg.as_str() {
                "--emit=tokens" => emit = EmitKind::Tokens,
                "--emit=ast" => emit = EmitKind::Ast,
                "--emit=symbols" => emit = EmitKind::Symbols,
                _ if arg.starts_with('-') => return Err(CompileError::Usage),
                _ => {
                    if input.is_some() {
                        return Err(CompileError::Usage);
                    }
                    input = Some(PathBuf::from(arg));
                }
            }
        }

        let input = input.ok_or(CompileError::Usage)?;
        Ok(Config { input, emit })
    }
}

/// Driver failures, each mapping to a distinct exit code.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Wrong number or shape of command-line arguments.
    #[error("Usage: opusc <source_file.opus>")]
    Usage,

    /// The input file does not carry the `.opus` extension.
    #[error("'{}' is not the source code", .0.display())]
    NotSourceCode(PathBuf),

    /// The input file could not be read.
    #[error("cannot read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The lexer or parser reported errors.
    #[error("compilation failed with {0} syntax error(s)")]
    Syntax(usize),

    /// The analyzer reported errors.
    #[error("compilation failed with {0} semantic error(s)")]
    Semantic(usize),
}

impl CompileError {
    /// Process exit code for this failure (sysexits-style).
    pub fn exit_code(&self) -> i32 {
        match self {
            CompileError::Usage => 64,
            CompileError::NotSourceCode(_) | CompileError::Io { .. } => 66,
            CompileError::Syntax(_) | CompileError::Semantic(_) => 65,
        }
    }
}

/// One compiler invocation.
///
/// # Example
///
/// ```
/// use opusc_drv::{Config, Session};
///
/// let mut session = Session::new(Config::new("program.opus"));
/// assert!(session.compile_source("let x: Int = 1\n").is_ok());
/// ```
pub struct Session {
    /// Invocation configuration.
    config: Config,
    /// Diagnostic handler shared across all phases.
    handler: Handler,
}

impl Session {
    /// Creates a session for the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handler: Handler::new(),
        }
    }

    /// The diagnostic handler.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Runs the full pipeline on the configured input file.
    pub fn compile(&mut self) -> Result<(), CompileError> {
        let source = self.read_source()?;
        self.compile_source(&source)
    }

    /// Reads the input file, refusing anything without the `.opus`
    /// extension before tokenizing a single byte.
    fn read_source(&self) -> Result<String, CompileError> {
        let path = &self.config.input;
        if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            return Err(CompileError::NotSourceCode(path.clone()));
        }
        fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: path.clone(),
            source,
        })
    }

    /// Runs the front-end pipeline over in-memory source text.
    pub fn compile_source(&mut self, source: &str) -> Result<(), CompileError> {
        if self.config.emit == EmitKind::Tokens {
            let mut lexer = Lexer::new(source, &self.handler);
            for token in lexer.tokenize() {
                println!("{}", token);
            }
            self.flush_diagnostics();
            if self.handler.has_errors() {
                return Err(CompileError::Syntax(self.handler.error_count()));
            }
            return Ok(());
        }

        let mut program = {
            let lexer = Lexer::new(source, &self.handler);
            let mut parser = Parser::new(lexer, &self.handler);
            parser.parse()
        };

        if self.handler.has_errors() {
            self.flush_diagnostics();
            return Err(CompileError::Syntax(self.handler.error_count()));
        }

        if self.config.emit == EmitKind::Ast {
            print!("{}", program);
            return Ok(());
        }

        let mut analyzer = SemanticAnalyzer::new(&self.handler);
        let analyzed = analyzer.analyze(&mut program);

        if self.config.emit == EmitKind::Symbols {
            print!("{}", analyzer.table().dump());
        }

        self.flush_diagnostics();
        if !analyzed || self.handler.has_errors() {
            return Err(CompileError::Semantic(self.handler.error_count()));
        }
        Ok(())
    }

    /// Prints every collected diagnostic to the error stream, in emission
    /// order. Each phase formats its own messages.
    fn flush_diagnostics(&self) {
        for diagnostic in self.handler.diagnostics() {
            eprintln!("{}", diagnostic.message);
        }
    }
}
