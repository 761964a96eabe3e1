//! `pushd`, `popd`, `listd` and `dropd` share one stack of directories kept
//! in the environment under [`DIR_STACK_KEY`].

use std::path::PathBuf;

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::{Environment, SharedValue, DIR_STACK_KEY};

fn pop_directory(env: &mut dyn Environment) -> Result<PathBuf, CommandError> {
    env.shared_data_mut(DIR_STACK_KEY)
        .and_then(SharedValue::as_path_stack_mut)
        .and_then(Vec::pop)
        .ok_or_else(|| CommandError::InvalidArguments("directory stack is empty".to_string()))
}

fn push_directory(env: &mut dyn Environment, dir: PathBuf) {
    match env
        .shared_data_mut(DIR_STACK_KEY)
        .and_then(SharedValue::as_path_stack_mut)
    {
        Some(stack) => stack.push(dir),
        None => env.set_shared_data(DIR_STACK_KEY, SharedValue::PathStack(vec![dir])),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PushdCommand;

impl ShellCommand for PushdCommand {
    fn name(&self) -> &'static str {
        "pushd"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: pushd DIR",
            "Saves the current directory on the directory stack and changes to DIR.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 1..=1, "pushd DIR")?;
        let target = env.resolve_path(&args[0])?;
        let previous = env.current_directory().to_path_buf();

        env.set_current_directory(&target)?;
        push_directory(env, previous);
        Ok(ShellStatus::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PopdCommand;

impl ShellCommand for PopdCommand {
    fn name(&self) -> &'static str {
        "popd"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: popd",
            "Removes the top of the directory stack and changes to it.",
            "A directory that no longer exists is removed without changing directory.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        parse_arguments(arguments, 0..=0, "popd")?;
        let dir = pop_directory(env)?;

        if env.set_current_directory(&dir).is_err() {
            return Err(CommandError::InvalidArguments(format!(
                "'{}' is no longer a directory; removed it from the stack",
                dir.display()
            )));
        }
        Ok(ShellStatus::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListdCommand;

impl ShellCommand for ListdCommand {
    fn name(&self) -> &'static str {
        "listd"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: listd",
            "Prints the directory stack, most recently pushed first.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        parse_arguments(arguments, 0..=0, "listd")?;

        let lines: Vec<String> = env
            .shared_data(DIR_STACK_KEY)
            .and_then(SharedValue::as_path_stack)
            .map(|stack| stack.iter().rev().map(|dir| dir.display().to_string()).collect())
            .unwrap_or_default();

        if lines.is_empty() {
            env.writeln("No stored directories.")?;
        }
        for line in lines {
            env.writeln(&line)?;
        }
        Ok(ShellStatus::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DropdCommand;

impl ShellCommand for DropdCommand {
    fn name(&self) -> &'static str {
        "dropd"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: dropd",
            "Removes the top of the directory stack without changing directory.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        parse_arguments(arguments, 0..=0, "dropd")?;
        pop_directory(env)?;
        Ok(ShellStatus::Continue)
    }
}
