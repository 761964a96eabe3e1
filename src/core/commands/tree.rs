use walkdir::WalkDir;

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "tree [DIR]";
const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeCommand;

impl ShellCommand for TreeCommand {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: tree [DIR]",
            "Prints DIR (default: the current directory) and everything below it,",
            "indenting each level by two spaces.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 0..=1, USAGE)?;
        let root = match args.first() {
            Some(arg) => env.resolve_path(arg)?,
            None => env.current_directory().to_path_buf(),
        };

        if !root.is_dir() {
            return Err(CommandError::InvalidArguments(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        for entry in WalkDir::new(&root).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    let indent = INDENT.repeat(entry.depth());
                    env.writeln(&format!("{}{}", indent, entry.file_name().to_string_lossy()))?;
                }
                Err(e) => {
                    let indent = INDENT.repeat(e.depth());
                    env.writeln(&format!("{}<unreadable: {}>", indent, e))?;
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
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_tree_layout() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("b").join("c")).unwrap();
        fs::write(root.join("a.txt"), "").unwrap();
        fs::write(root.join("b").join("c").join("d.txt"), "").unwrap();

        let mut env = setup_test_env(temp.path());
        TreeCommand.execute(&mut env, "root").unwrap();

        assert_eq!(output(&env), "root\n  a.txt\n  b\n    c\n      d.txt\n");
    }

    #[test]
    fn test_tree_rejects_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("f"), "").unwrap();

        let mut env = setup_test_env(temp.path());
        assert!(matches!(
            TreeCommand.execute(&mut env, "f"),
            Err(CommandError::InvalidArguments(_))
        ));
    }
}
