use tracing::warn;

use crate::core::env::{EnvError, Environment};

/// Reads one logical line: writes the prompt, then keeps reading while the
/// text ends with the MORELINES marker. Each marker is replaced by a single
/// space joining the next physical line.
///
/// Only a trailing marker continues the line; markers elsewhere, including
/// the ones left after stripping the last, are ordinary text.
pub(crate) fn read_logical_line(env: &mut dyn Environment) -> Result<String, EnvError> {
    if let Err(e) = env.write_prompt() {
        warn!("Couldn't write prompt: {}", e);
    }
    let mut line = env.read_line()?;

    let marker = env.morelines_symbol();
    while line.ends_with(marker) {
        line.pop();
        if let Err(e) = env.write_multiline() {
            warn!("Couldn't write prompt: {}", e);
        }
        let next = env.read_line()?;
        line.push(' ');
        line.push_str(&next);
    }

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::ShellEnvironment;
    use crate::input::ScriptedConsole;
    use tempfile::tempdir;

    fn read(input: &[&str]) -> (Result<String, EnvError>, String) {
        let temp = tempdir().unwrap();
        let mut env = ShellEnvironment::with_directory(
            ScriptedConsole::with_input(input.iter().copied()),
            temp.path(),
        );
        let line = read_logical_line(&mut env);
        let prompt_prefix = format!("{}", temp.path().display());
        let out = env.console().output().replacen(&prompt_prefix, "<cwd>", 1);
        (line, out)
    }

    #[test]
    fn test_single_line() {
        let (line, out) = read(&["ls dir", "ignored"]);
        assert_eq!(line.unwrap(), "ls dir");
        assert_eq!(out, "<cwd>> ");
    }

    #[test]
    fn test_continuation_joins_with_space() {
        let (line, out) = read(&["mkdir \\", "foo"]);
        assert_eq!(line.unwrap(), "mkdir  foo");
        assert_eq!(out, "<cwd>> | ");
    }

    #[test]
    fn test_several_continuations() {
        let (line, _) = read(&["copy\\", "a\\", "b"]);
        assert_eq!(line.unwrap(), "copy a b");
    }

    #[test]
    fn test_only_last_marker_continues() {
        let (line, out) = read(&["\\\\\\", "x"]);
        assert_eq!(line.unwrap(), "\\\\ x");
        assert_eq!(out.matches("| ").count(), 1);
    }

    #[test]
    fn test_marker_only_lines_keep_accumulating() {
        let (line, out) = read(&["\\", "\\", "exit"]);
        assert_eq!(line.unwrap(), "  exit");
        assert_eq!(out.matches("| ").count(), 2);
    }

    #[test]
    fn test_input_ends_mid_continuation() {
        let (line, _) = read(&["mkdir \\"]);
        assert!(matches!(line, Err(EnvError::InputClosed)));
    }

    #[test]
    fn test_custom_marker() {
        let temp = tempdir().unwrap();
        let mut env = ShellEnvironment::with_directory(
            ScriptedConsole::with_input(["tree &", "sub\\"]),
            temp.path(),
        );
        env.set_morelines_symbol('&').unwrap();
        assert_eq!(read_logical_line(&mut env).unwrap(), "tree  sub\\");
    }
}
