use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "copy SOURCE DESTINATION";

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyCommand;

impl ShellCommand for CopyCommand {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: copy SOURCE DESTINATION",
            "Copies the file SOURCE to DESTINATION.",
            "If DESTINATION is a directory the file keeps its name inside it.",
            "Asks before overwriting an existing file.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 2..=2, USAGE)?;
        let source = env.resolve_path(&args[0])?;
        let mut target = env.resolve_path(&args[1])?;

        if !source.is_file() {
            return Err(CommandError::InvalidArguments(format!(
                "'{}' is not a file",
                source.display()
            )));
        }

        if target.is_dir() {
            if let Some(name) = source.file_name() {
                target.push(name);
            }
        }

        if target == source || (target.exists() && same_file(&source, &target)?) {
            return Err(CommandError::InvalidArguments(
                "source and destination are the same file".to_string(),
            ));
        }

        if target.exists() {
            env.write(&format!("Overwrite '{}'? (Y/N) ", target.display()))?;
            let answer = env.read_line()?;
            if !answer.trim().eq_ignore_ascii_case("y") {
                env.writeln("Copy cancelled.")?;
                return Ok(ShellStatus::Continue);
            }
        }

        let mut reader = BufReader::new(File::open(&source)?);
        let mut writer = BufWriter::new(File::create(&target)?);
        let copied = io::copy(&mut reader, &mut writer)?;
        writer.flush()?;

        debug!(bytes = copied, from = %source.display(), to = %target.display(), "copied");
        env.writeln(&format!(
            "Copied '{}' to '{}'.",
            source.display(),
            target.display()
        ))?;
        Ok(ShellStatus::Continue)
    }
}

/// True when both paths name one file, through links or aliases.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let (a, b) = (fs::metadata(a)?, fs::metadata(b)?);
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}
