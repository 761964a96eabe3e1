use std::collections::BTreeMap;

mod args;
mod cat;
mod charsets;
mod copy;
mod dirstack;
mod exit;
mod help;
mod hexdump;
mod ls;
mod massrename;
mod mkdir;
mod navigation;
mod symbol;
mod tree;

pub use args::{parse_arguments, split_arguments};
pub use cat::CatCommand;
pub use charsets::CharsetsCommand;
pub use copy::CopyCommand;
pub use dirstack::{DropdCommand, ListdCommand, PopdCommand, PushdCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use hexdump::HexdumpCommand;
pub use ls::LsCommand;
pub use massrename::MassrenameCommand;
pub use mkdir::MkdirCommand;
pub use navigation::{CdCommand, PwdCommand};
pub use symbol::SymbolCommand;
pub use tree::TreeCommand;

use crate::core::env::{EnvError, Environment};

#[derive(Debug)]
pub enum CommandError {
    UnknownCommand(String),
    InvalidArguments(String),
    Usage(&'static str),
    IoError(std::io::Error),
    EnvError(EnvError),
}

impl CommandError {
    /// True when the failure came from the input stream itself, after which
    /// the session cannot continue.
    pub fn is_input_failure(&self) -> bool {
        matches!(self, CommandError::EnvError(e) if e.is_input_failure())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::UnknownCommand(cmd) => write!(f, "unknown command: {}", cmd),
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::Usage(usage) => write!(f, "usage: {}", usage),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::EnvError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<EnvError> for CommandError {
    fn from(err: EnvError) -> Self {
        CommandError::EnvError(err)
    }
}

/// What the shell loop does after a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    Continue,
    Terminate,
}

pub trait ShellCommand {
    fn name(&self) -> &'static str;

    /// Help text, one entry per output line.
    fn description(&self) -> &'static [&'static str];

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError>;
}

#[derive(Debug, Clone, Copy)]
pub enum CommandType {
    Ls(LsCommand),
    Copy(CopyCommand),
    Cat(CatCommand),
    Tree(TreeCommand),
    Charsets(CharsetsCommand),
    Symbol(SymbolCommand),
    Exit(ExitCommand),
    Help(HelpCommand),
    Mkdir(MkdirCommand),
    Hexdump(HexdumpCommand),
    Cd(CdCommand),
    Pwd(PwdCommand),
    Pushd(PushdCommand),
    Popd(PopdCommand),
    Listd(ListdCommand),
    Dropd(DropdCommand),
    Massrename(MassrenameCommand),
}

impl CommandType {
    fn inner(&self) -> &dyn ShellCommand {
        match self {
            CommandType::Ls(cmd) => cmd,
            CommandType::Copy(cmd) => cmd,
            CommandType::Cat(cmd) => cmd,
            CommandType::Tree(cmd) => cmd,
            CommandType::Charsets(cmd) => cmd,
            CommandType::Symbol(cmd) => cmd,
            CommandType::Exit(cmd) => cmd,
            CommandType::Help(cmd) => cmd,
            CommandType::Mkdir(cmd) => cmd,
            CommandType::Hexdump(cmd) => cmd,
            CommandType::Cd(cmd) => cmd,
            CommandType::Pwd(cmd) => cmd,
            CommandType::Pushd(cmd) => cmd,
            CommandType::Popd(cmd) => cmd,
            CommandType::Listd(cmd) => cmd,
            CommandType::Dropd(cmd) => cmd,
            CommandType::Massrename(cmd) => cmd,
        }
    }
}

impl ShellCommand for CommandType {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn description(&self) -> &'static [&'static str] {
        self.inner().description()
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        self.inner().execute(env, arguments)
    }
}

/// The fixed, name ordered set of built-in commands.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, CommandType>,
}

impl CommandRegistry {
    pub fn builtin() -> Self {
        let commands = [
            CommandType::Ls(LsCommand),
            CommandType::Copy(CopyCommand),
            CommandType::Cat(CatCommand),
            CommandType::Tree(TreeCommand),
            CommandType::Charsets(CharsetsCommand),
            CommandType::Symbol(SymbolCommand),
            CommandType::Exit(ExitCommand),
            CommandType::Help(HelpCommand),
            CommandType::Mkdir(MkdirCommand),
            CommandType::Hexdump(HexdumpCommand),
            CommandType::Cd(CdCommand),
            CommandType::Pwd(PwdCommand),
            CommandType::Pushd(PushdCommand),
            CommandType::Popd(PopdCommand),
            CommandType::Listd(ListdCommand),
            CommandType::Dropd(DropdCommand),
            CommandType::Massrename(MassrenameCommand),
        ];

        Self {
            commands: commands.into_iter().map(|cmd| (cmd.name(), cmd)).collect(),
        }
    }

    /// Case sensitive exact lookup.
    pub fn get(&self, name: &str) -> Option<CommandType> {
        self.commands.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, CommandType)> + '_ {
        self.commands.iter().map(|(name, cmd)| (*name, *cmd))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = CommandRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();

        assert_eq!(
            names,
            [
                "cat", "cd", "charsets", "copy", "dropd", "exit", "help", "hexdump", "listd",
                "ls", "massrename", "mkdir", "popd", "pushd", "pwd", "symbol", "tree",
            ]
        );
        assert_eq!(registry.len(), 17);
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = CommandRegistry::builtin();
        assert!(registry.get("ls").is_some());
        assert!(registry.get("LS").is_none());
        assert!(registry.get("ls ").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_every_command_has_help() {
        for (name, cmd) in CommandRegistry::builtin().iter() {
            assert_eq!(cmd.name(), name);
            assert!(!cmd.description().is_empty(), "{} has no description", name);
        }
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::UnknownCommand("bogus".to_string()),
            CommandError::InvalidArguments("bad args".to_string()),
            CommandError::Usage("ls [DIR]"),
            CommandError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "io error",
            )),
            CommandError::EnvError(EnvError::InputClosed),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_input_failure_detection() {
        assert!(CommandError::EnvError(EnvError::InputClosed).is_input_failure());
        assert!(!CommandError::Usage("x").is_input_failure());
        assert!(!CommandError::EnvError(EnvError::Interrupted).is_input_failure());
        let unreadable = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin");
        assert!(CommandError::EnvError(EnvError::InputError(unreadable)).is_input_failure());
        let unwritable = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout");
        assert!(!CommandError::EnvError(EnvError::IoError(unwritable)).is_input_failure());
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    use crate::core::env::ShellEnvironment;
    use crate::input::ScriptedConsole;

    pub type TestEnv = ShellEnvironment<ScriptedConsole<Vec<u8>>>;

    pub fn setup_test_env(dir: &Path) -> TestEnv {
        ShellEnvironment::with_directory(ScriptedConsole::empty(), dir)
    }

    pub fn setup_test_env_with_input(dir: &Path, input: &[&str]) -> TestEnv {
        ShellEnvironment::with_directory(ScriptedConsole::with_input(input.iter().copied()), dir)
    }

    pub fn output(env: &TestEnv) -> String {
        env.console().output()
    }
}
