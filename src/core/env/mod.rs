//! The session environment every command runs against.

mod session;
mod shared;
mod symbols;

pub use session::ShellEnvironment;
pub use shared::{SharedValue, DIR_STACK_KEY};
pub use symbols::{Symbol, Symbols};

use std::path::{Path, PathBuf};

use crate::core::commands::CommandRegistry;
use crate::path::{self, PathExpander};

#[derive(Debug)]
pub enum EnvError {
    IoError(std::io::Error),
    /// Reading the input stream itself failed.
    InputError(std::io::Error),
    InputClosed,
    Interrupted,
    HomeDirNotFound,
    InvalidPath(PathBuf),
    InvalidValue(&'static str),
}

impl EnvError {
    /// Errors after which no further input can be read.
    pub fn is_input_failure(&self) -> bool {
        matches!(self, EnvError::InputClosed | EnvError::InputError(_))
    }
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::IoError(e) => write!(f, "IO error: {}", e),
            EnvError::InputError(e) => write!(f, "input error: {}", e),
            EnvError::InputClosed => write!(f, "input closed"),
            EnvError::Interrupted => write!(f, "interrupted"),
            EnvError::HomeDirNotFound => write!(f, "Home directory not found"),
            EnvError::InvalidPath(path) => write!(f, "'{}' is not a valid directory", path.display()),
            EnvError::InvalidValue(val) => write!(f, "Invalid value: {}", val),
        }
    }
}

impl std::error::Error for EnvError {}

impl From<std::io::Error> for EnvError {
    fn from(e: std::io::Error) -> Self {
        EnvError::IoError(e)
    }
}

/// Mutable session context handed to every command.
///
/// Output goes straight to the user. Symbols are never absent and the current
/// directory always names an existing directory.
pub trait Environment {
    fn read_line(&mut self) -> Result<String, EnvError>;

    fn write(&mut self, text: &str) -> Result<(), EnvError>;

    fn writeln(&mut self, text: &str) -> Result<(), EnvError> {
        self.write(&format!("{}\n", text))
    }

    fn commands(&self) -> &CommandRegistry;

    fn symbol(&self, symbol: Symbol) -> char;

    fn set_symbol(&mut self, symbol: Symbol, value: char) -> Result<(), EnvError>;

    fn current_directory(&self) -> &Path;

    /// Fails with [`EnvError::InvalidPath`] unless `path` is an existing
    /// directory. Relative paths are taken from the current directory.
    fn set_current_directory(&mut self, path: &Path) -> Result<(), EnvError>;

    fn shared_data(&self, key: &str) -> Option<&SharedValue>;

    fn shared_data_mut(&mut self, key: &str) -> Option<&mut SharedValue>;

    fn set_shared_data(&mut self, key: &str, value: SharedValue);

    fn remove_shared_data(&mut self, key: &str) -> Option<SharedValue>;

    fn prompt_symbol(&self) -> char {
        self.symbol(Symbol::Prompt)
    }

    fn set_prompt_symbol(&mut self, value: char) -> Result<(), EnvError> {
        self.set_symbol(Symbol::Prompt, value)
    }

    fn multiline_symbol(&self) -> char {
        self.symbol(Symbol::Multiline)
    }

    fn set_multiline_symbol(&mut self, value: char) -> Result<(), EnvError> {
        self.set_symbol(Symbol::Multiline, value)
    }

    fn morelines_symbol(&self) -> char {
        self.symbol(Symbol::Morelines)
    }

    fn set_morelines_symbol(&mut self, value: char) -> Result<(), EnvError> {
        self.set_symbol(Symbol::Morelines, value)
    }

    fn write_prompt(&mut self) -> Result<(), EnvError> {
        let prompt = format!(
            "{}{} ",
            self.current_directory().display(),
            self.prompt_symbol()
        );
        self.write(&prompt)
    }

    fn write_multiline(&mut self) -> Result<(), EnvError> {
        let prompt = format!("{} ", self.multiline_symbol());
        self.write(&prompt)
    }

    /// Absolute, normalized form of a user supplied path. Does not touch the
    /// filesystem.
    fn resolve_path(&self, path: &str) -> Result<PathBuf, EnvError> {
        let expanded = PathExpander::new().expand(path)?;
        Ok(path::resolve(self.current_directory(), &expanded))
    }
}
