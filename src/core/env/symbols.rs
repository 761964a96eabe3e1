use std::fmt;
use std::str::FromStr;

use super::EnvError;

pub const DEFAULT_PROMPT: char = '>';
pub const DEFAULT_MULTILINE: char = '|';
pub const DEFAULT_MORELINES: char = '\\';

/// Roles a special character can play in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Ends the prompt written before every new command.
    Prompt,
    /// Written at the start of every continuation line.
    Multiline,
    /// Typed by the user at the end of a line to continue it.
    Morelines,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::Prompt, Symbol::Multiline, Symbol::Morelines];

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Prompt => "PROMPT",
            Symbol::Multiline => "MULTILINE",
            Symbol::Morelines => "MORELINES",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::ALL
            .into_iter()
            .find(|symbol| symbol.name().eq_ignore_ascii_case(s))
            .ok_or(EnvError::InvalidValue("unknown symbol name"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    prompt: char,
    multiline: char,
    morelines: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT,
            multiline: DEFAULT_MULTILINE,
            morelines: DEFAULT_MORELINES,
        }
    }
}

impl Symbols {
    pub fn get(&self, symbol: Symbol) -> char {
        match symbol {
            Symbol::Prompt => self.prompt,
            Symbol::Multiline => self.multiline,
            Symbol::Morelines => self.morelines,
        }
    }

    pub fn set(&mut self, symbol: Symbol, value: char) -> Result<(), EnvError> {
        if value == '\0' {
            return Err(EnvError::InvalidValue("symbol must not be the null character"));
        }

        let slot = match symbol {
            Symbol::Prompt => &mut self.prompt,
            Symbol::Multiline => &mut self.multiline,
            Symbol::Morelines => &mut self.morelines,
        };
        *slot = value;
        Ok(())
    }
}
