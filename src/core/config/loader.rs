use std::{fs, path::Path};

use tracing::debug;

use super::{ConfigError, ConfigPaths};

/// Reads the startup file into the command lines it contains.
pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    /// Lines of the default startup file, or nothing when it is absent.
    pub fn load_commands(&self) -> Result<Vec<String>, ConfigError> {
        self.source_if_exists(&self.paths.rc_path)
    }

    /// Lines of a startup file the user named explicitly, which must exist.
    pub fn load_required(&self) -> Result<Vec<String>, ConfigError> {
        let path = &self.paths.rc_path;
        if !path.is_file() {
            return Err(ConfigError::ConfigFileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }
        self.source_if_exists(path)
    }

    fn source_if_exists(&self, path: &Path) -> Result<Vec<String>, ConfigError> {
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let commands: Vec<String> = content
            .lines()
            .filter_map(Self::process_line)
            .map(String::from)
            .collect();

        debug!(path = %path.display(), count = commands.len(), "loaded startup file");
        Ok(commands)
    }

    fn process_line(line: &str) -> Option<&str> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            None
        } else {
            Some(line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_process_line() {
        assert_eq!(ConfigLoader::process_line("  symbol PROMPT $ "), Some("symbol PROMPT $"));
        assert_eq!(ConfigLoader::process_line("# comment"), None);
        assert_eq!(ConfigLoader::process_line("   "), None);
    }

    #[test]
    fn test_load_commands() {
        let temp = tempdir().unwrap();
        let paths = ConfigPaths::from_home(temp.path());
        fs::write(
            &paths.rc_path,
            "# startup\nsymbol PROMPT $\n\n  cd /tmp\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(&paths);
        assert_eq!(
            loader.load_commands().unwrap(),
            vec!["symbol PROMPT $", "cd /tmp"]
        );
    }

    #[test]
    fn test_missing_file() {
        let temp = tempdir().unwrap();
        let paths = ConfigPaths::from_home(temp.path());
        let loader = ConfigLoader::new(&paths);

        assert!(loader.load_commands().unwrap().is_empty());
        assert!(matches!(
            loader.load_required(),
            Err(ConfigError::ConfigFileNotFound(_))
        ));
    }
}
