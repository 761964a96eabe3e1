use std::fs;

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "mkdir DIR";

#[derive(Debug, Clone, Copy, Default)]
pub struct MkdirCommand;

impl ShellCommand for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: mkdir DIR",
            "Creates DIR together with any missing parent directories.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 1..=1, USAGE)?;
        let dir = env.resolve_path(&args[0])?;

        if dir.exists() && !dir.is_dir() {
            return Err(CommandError::InvalidArguments(format!(
                "'{}' exists and is not a directory",
                dir.display()
            )));
        }

        fs::create_dir_all(&dir)?;
        Ok(ShellStatus::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::setup_test_env;
    use tempfile::tempdir;

    #[test]
    fn test_creates_nested() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        MkdirCommand.execute(&mut env, r#""a b/c/d""#).unwrap();
        assert!(temp.path().join("a b").join("c").join("d").is_dir());

        // existing directory is fine
        MkdirCommand.execute(&mut env, r#""a b""#).unwrap();

        // unquoted name with a space is two arguments
        assert!(matches!(
            MkdirCommand.execute(&mut env, "a b"),
            Err(CommandError::Usage(USAGE))
        ));
    }

    #[test]
    fn test_rejects_existing_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("f"), "").unwrap();

        let mut env = setup_test_env(temp.path());
        assert!(matches!(
            MkdirCommand.execute(&mut env, "f"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            MkdirCommand.execute(&mut env, ""),
            Err(CommandError::Usage(USAGE))
        ));
    }
}
