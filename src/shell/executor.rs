use tracing::debug;

use crate::core::commands::{CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

/// Splits a logical line into the command name and its raw arguments.
/// Blank lines give `None`.
pub(crate) fn split_command(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.find(char::is_whitespace) {
        Some(idx) => Some((&trimmed[..idx], trimmed[idx..].trim_start())),
        None => Some((trimmed, "")),
    }
}

/// Looks up and runs the command named on `line`.
pub fn execute_line(env: &mut dyn Environment, line: &str) -> Result<ShellStatus, CommandError> {
    let Some((name, arguments)) = split_command(line) else {
        return Ok(ShellStatus::Continue);
    };

    let command = env
        .commands()
        .get(name)
        .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

    debug!(command = name, arguments, "dispatching");
    command.execute(env, arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{output, setup_test_env};
    use tempfile::tempdir;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("ls"), Some(("ls", "")));
        assert_eq!(split_command("  cat  a.txt  utf8 "), Some(("cat", "a.txt  utf8 ")));
        assert_eq!(split_command("cd\t\"my dir\""), Some(("cd", "\"my dir\"")));
        assert_eq!(split_command("   "), None);
        assert_eq!(split_command(""), None);
    }

    #[test]
    fn test_execute_known_command() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        assert_eq!(execute_line(&mut env, "pwd").unwrap(), ShellStatus::Continue);
        assert_eq!(output(&env), format!("{}\n", temp.path().display()));
        assert_eq!(execute_line(&mut env, " exit ").unwrap(), ShellStatus::Terminate);
    }

    #[test]
    fn test_execute_unknown_command() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        assert!(matches!(
            execute_line(&mut env, "bogus arg"),
            Err(CommandError::UnknownCommand(name)) if name == "bogus"
        ));
        assert!(matches!(
            execute_line(&mut env, "EXIT"),
            Err(CommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());
        assert_eq!(execute_line(&mut env, "  ").unwrap(), ShellStatus::Continue);
        assert_eq!(output(&env), "");
    }
}
