use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{EnvError, Environment, SharedValue, Symbol, Symbols};
use crate::core::commands::CommandRegistry;
use crate::input::Console;
use crate::path;

pub struct ShellEnvironment<C: Console> {
    console: C,
    commands: CommandRegistry,
    symbols: Symbols,
    current_dir: PathBuf,
    shared_data: HashMap<String, SharedValue>,
}

impl<C: Console> ShellEnvironment<C> {
    /// Starts in the process working directory.
    pub fn new(console: C) -> Result<Self, EnvError> {
        let current_dir = std::env::current_dir()?;
        Ok(Self::with_directory(console, &current_dir))
    }

    /// `dir` is trusted to be an existing absolute directory.
    pub fn with_directory(console: C, dir: &Path) -> Self {
        Self {
            console,
            commands: CommandRegistry::builtin(),
            symbols: Symbols::default(),
            current_dir: path::normalize(dir),
            shared_data: HashMap::new(),
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }
}

impl<C: Console> Environment for ShellEnvironment<C> {
    fn read_line(&mut self) -> Result<String, EnvError> {
        self.console.read_line()
    }

    fn write(&mut self, text: &str) -> Result<(), EnvError> {
        self.console.write(text)
    }

    fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    fn symbol(&self, symbol: Symbol) -> char {
        self.symbols.get(symbol)
    }

    fn set_symbol(&mut self, symbol: Symbol, value: char) -> Result<(), EnvError> {
        self.symbols.set(symbol, value)
    }

    fn current_directory(&self) -> &Path {
        &self.current_dir
    }

    fn set_current_directory(&mut self, dir: &Path) -> Result<(), EnvError> {
        let resolved = path::resolve(&self.current_dir, dir);

        let is_dir = fs::symlink_metadata(&resolved)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(EnvError::InvalidPath(dir.to_path_buf()));
        }

        debug!(from = %self.current_dir.display(), to = %resolved.display(), "changing directory");
        self.console.directory_changed(&resolved);
        self.current_dir = resolved;
        Ok(())
    }

    fn shared_data(&self, key: &str) -> Option<&SharedValue> {
        self.shared_data.get(key)
    }

    fn shared_data_mut(&mut self, key: &str) -> Option<&mut SharedValue> {
        self.shared_data.get_mut(key)
    }

    fn set_shared_data(&mut self, key: &str, value: SharedValue) {
        self.shared_data.insert(key.to_string(), value);
    }

    fn remove_shared_data(&mut self, key: &str) -> Option<SharedValue> {
        self.shared_data.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedConsole;
    use tempfile::tempdir;

    fn setup_test_env(dir: &Path) -> ShellEnvironment<ScriptedConsole<Vec<u8>>> {
        ShellEnvironment::with_directory(ScriptedConsole::empty(), dir)
    }

    #[test]
    fn test_set_directory_normalizes() {
        let temp = tempdir().unwrap();
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let mut env = setup_test_env(temp.path());
        env.set_current_directory(&sub.join("..").join("sub").join("."))
            .unwrap();
        assert_eq!(env.current_directory(), sub.as_path());

        env.set_current_directory(Path::new("..")).unwrap();
        assert_eq!(env.current_directory(), temp.path());
    }

    #[test]
    fn test_set_directory_rejects_non_directories() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let mut env = setup_test_env(temp.path());
        for bad in [file.clone(), temp.path().join("missing")] {
            assert!(matches!(
                env.set_current_directory(&bad),
                Err(EnvError::InvalidPath(_))
            ));
            assert_eq!(env.current_directory(), temp.path());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_set_directory_does_not_follow_symlink() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("link");
        fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let mut env = setup_test_env(temp.path());
        assert!(env.set_current_directory(&link).is_err());
        assert_eq!(env.current_directory(), temp.path());
    }

    #[test]
    fn test_prompt_uses_symbol() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        assert_eq!(env.prompt_symbol(), '>');
        env.set_prompt_symbol('$').unwrap();
        env.write_prompt().unwrap();
        env.write_multiline().unwrap();

        let expected = format!("{}$ | ", temp.path().display());
        assert_eq!(env.console().output(), expected);
    }

    #[test]
    fn test_symbol_setters_round_trip() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        env.set_prompt_symbol('#').unwrap();
        env.set_multiline_symbol('+').unwrap();
        env.set_morelines_symbol('&').unwrap();

        assert_eq!(env.prompt_symbol(), '#');
        assert_eq!(env.multiline_symbol(), '+');
        assert_eq!(env.morelines_symbol(), '&');
        assert!(env.set_multiline_symbol('\0').is_err());
        assert_eq!(env.multiline_symbol(), '+');
    }

    #[test]
    fn test_shared_data() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());

        assert!(env.shared_data("missing").is_none());

        env.set_shared_data("note", SharedValue::Text("hello".into()));
        assert_eq!(
            env.shared_data("note"),
            Some(&SharedValue::Text("hello".into()))
        );

        env.set_shared_data("stack", SharedValue::PathStack(Vec::new()));
        if let Some(stack) = env
            .shared_data_mut("stack")
            .and_then(SharedValue::as_path_stack_mut)
        {
            stack.push(temp.path().to_path_buf());
        }
        assert_eq!(
            env.remove_shared_data("stack"),
            Some(SharedValue::PathStack(vec![temp.path().to_path_buf()]))
        );
        assert!(env.shared_data("stack").is_none());
    }

    #[test]
    fn test_registry_is_fixed() {
        let temp = tempdir().unwrap();
        let env = setup_test_env(temp.path());

        let names: Vec<&str> = env.commands().names().collect();
        assert_eq!(names.len(), 17);
        assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(env.commands().get("exit").is_some());
        assert!(env.commands().get("Exit").is_none());
    }

    #[test]
    fn test_resolve_path() {
        let temp = tempdir().unwrap();
        let env = setup_test_env(temp.path());

        assert_eq!(
            env.resolve_path("a/./b/..").unwrap(),
            temp.path().join("a")
        );
        assert_eq!(env.resolve_path("/").unwrap(), PathBuf::from("/"));
    }
}
