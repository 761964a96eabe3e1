use std::path::PathBuf;

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;
use crate::path::PathExpander;

const CD_USAGE: &str = "cd [DIR]";
const PWD_USAGE: &str = "pwd";

#[derive(Debug, Clone, Copy, Default)]
pub struct CdCommand;

impl ShellCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: cd [DIR]",
            "Changes the current directory to DIR, or to the home directory.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 0..=1, CD_USAGE)?;
        let target: PathBuf = match args.first() {
            Some(arg) => env.resolve_path(arg)?,
            None => PathExpander::new().home_dir()?,
        };

        env.set_current_directory(&target)?;
        Ok(ShellStatus::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PwdCommand;

impl ShellCommand for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn description(&self) -> &'static [&'static str] {
        &["Usage: pwd", "Prints the current directory."]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        parse_arguments(arguments, 0..=0, PWD_USAGE)?;
        let current = env.current_directory().display().to_string();
        env.writeln(&current)?;
        Ok(ShellStatus::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{output, setup_test_env};
    use crate::core::env::EnvError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cd_relative_and_back() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let mut env = setup_test_env(temp.path());
        CdCommand.execute(&mut env, "sub").unwrap();
        assert_eq!(env.current_directory(), temp.path().join("sub"));

        CdCommand.execute(&mut env, "..").unwrap();
        assert_eq!(env.current_directory(), temp.path());
    }

    #[test]
    fn test_cd_invalid() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("file"), "").unwrap();

        let mut env = setup_test_env(temp.path());
        for bad in ["file", "missing"] {
            assert!(matches!(
                CdCommand.execute(&mut env, bad),
                Err(CommandError::EnvError(EnvError::InvalidPath(_)))
            ));
        }
        assert_eq!(env.current_directory(), temp.path());
    }

    #[test]
    fn test_cd_home() {
        let Some(home) = dirs::home_dir().filter(|home| {
            fs::symlink_metadata(home)
                .map(|meta| meta.is_dir())
                .unwrap_or(false)
        }) else {
            return;
        };
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        CdCommand.execute(&mut env, "").unwrap();
        assert_eq!(env.current_directory(), crate::path::normalize(&home));
    }

    #[test]
    fn test_pwd() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        PwdCommand.execute(&mut env, "").unwrap();
        assert_eq!(output(&env), format!("{}\n", temp.path().display()));
        assert!(PwdCommand.execute(&mut env, "x").is_err());
    }
}
