use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::Path;

use crate::core::env::EnvError;

/// User facing input and output channel of a session.
pub trait Console {
    fn read_line(&mut self) -> Result<String, EnvError>;

    fn write(&mut self, text: &str) -> Result<(), EnvError>;

    /// Called after the session's current directory changed.
    fn directory_changed(&mut self, _dir: &Path) {}

    /// Called once when the session ends.
    fn close(&mut self) -> Result<(), EnvError> {
        Ok(())
    }
}

/// Console fed from a fixed list of lines. Reading past the last line fails
/// with [`EnvError::InputClosed`].
pub struct ScriptedConsole<W: Write> {
    input: VecDeque<String>,
    output: W,
}

impl<W: Write> ScriptedConsole<W> {
    pub fn new<I, S>(lines: I, output: W) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output,
        }
    }

    /// Lines not yet read.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    pub fn writer(&self) -> &W {
        &self.output
    }
}

impl ScriptedConsole<io::Stdout> {
    pub fn from_script(script: &str) -> Self {
        Self::new(script.lines(), io::stdout())
    }
}

impl ScriptedConsole<Vec<u8>> {
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines, Vec::new())
    }

    pub fn empty() -> Self {
        Self::with_input(Vec::<String>::new())
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl<W: Write> Console for ScriptedConsole<W> {
    fn read_line(&mut self) -> Result<String, EnvError> {
        self.input.pop_front().ok_or(EnvError::InputClosed)
    }

    fn write(&mut self, text: &str) -> Result<(), EnvError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}
