use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "exit";

#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCommand;

impl ShellCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static [&'static str] {
        &["Usage: exit", "Ends the shell session."]
    }

    fn execute(
        &self,
        _env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        parse_arguments(arguments, 0..=0, USAGE)?;
        Ok(ShellStatus::Terminate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::setup_test_env;
    use tempfile::tempdir;

    #[test]
    fn test_exit_command() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        assert_eq!(ExitCommand.execute(&mut env, "").unwrap(), ShellStatus::Terminate);
        assert_eq!(ExitCommand.execute(&mut env, "   ").unwrap(), ShellStatus::Terminate);
        assert!(ExitCommand.execute(&mut env, "now").is_err());
    }
}
