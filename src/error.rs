use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidInstruction(#[from] InvalidInstruction),
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// An instruction name that could never match in isolation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidInstruction {
    #[error("instruction name is empty")]
    EmptyName,
    #[error("instruction name '{0}' contains whitespace")]
    WhitespaceInName(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid instruction definition on line {line_number}: {error}")]
pub struct DefinitionError {
    line_number: usize,
    #[source]
    error: InvalidInstruction,
}

impl DefinitionError {
    pub(crate) fn new(line_number: usize, error: InvalidInstruction) -> DefinitionError {
        DefinitionError { line_number, error }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn error(&self) -> &InvalidInstruction {
        &self.error
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan cancelled after {lines_scanned} lines")]
    Cancelled { lines_scanned: usize },
    #[error("failed to read source line: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        inner: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown match policy '{0}' (expected token-equality or substring-isolation)")]
    UnknownPolicy(String),
    #[error("unknown export order '{0}' (expected line-number or instruction)")]
    UnknownOrder(String),
}
