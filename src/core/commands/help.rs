use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "help [COMMAND]";

#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommand;

impl ShellCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: help [COMMAND]",
            "Lists all commands, or describes COMMAND.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 0..=1, USAGE)?;

        match args.first() {
            None => {
                let names: Vec<&'static str> = env.commands().names().collect();
                env.writeln("Available commands:")?;
                for name in names {
                    env.writeln(&format!("  {}", name))?;
                }
            }
            Some(name) => {
                let command = env.commands().get(name).ok_or_else(|| {
                    CommandError::InvalidArguments(format!("no help for unknown command '{}'", name))
                })?;
                env.writeln(command.name())?;
                for line in command.description() {
                    env.writeln(&format!("  {}", line))?;
                }
            }
        }
        Ok(ShellStatus::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{output, setup_test_env};
    use tempfile::tempdir;

    #[test]
    fn test_lists_commands() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        HelpCommand.execute(&mut env, "").unwrap();
        let out = output(&env);
        assert_eq!(out.lines().count(), 1 + 17);
        assert!(out.contains("  massrename\n"));
    }

    #[test]
    fn test_describes_command() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        HelpCommand.execute(&mut env, "cat").unwrap();
        let out = output(&env);
        assert!(out.starts_with("cat\n"));
        assert!(out.contains("Usage: cat FILE [CHARSET]"));
    }

    #[test]
    fn test_unknown_command() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        assert!(matches!(
            HelpCommand.execute(&mut env, "bogus"),
            Err(CommandError::InvalidArguments(_))
        ));
    }
}
