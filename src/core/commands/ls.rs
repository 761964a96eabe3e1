use std::fs::{self, Metadata};
use std::path::Path;

use chrono::{DateTime, Local};

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "ls [DIR]";

#[derive(Debug, Clone, Copy, Default)]
pub struct LsCommand;

impl ShellCommand for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: ls [DIR]",
            "Lists the directory (default: the current one), one entry per line:",
            "drwx flags, size in bytes, modification time and name.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 0..=1, USAGE)?;
        let dir = match args.first() {
            Some(arg) => env.resolve_path(arg)?,
            None => env.current_directory().to_path_buf(),
        };

        if !dir.is_dir() {
            return Err(CommandError::InvalidArguments(format!(
                "'{}' is not a directory",
                dir.display()
            )));
        }

        let mut entries = fs::read_dir(&dir)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            // Broken symlinks still get a line
            let metadata = fs::metadata(&path).or_else(|_| fs::symlink_metadata(&path))?;
            env.writeln(&format_entry(&path, &metadata))?;
        }

        Ok(ShellStatus::Continue)
    }
}

fn format_entry(path: &Path, metadata: &Metadata) -> String {
    let modified = metadata
        .modified()
        .map(|time| DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| "-".repeat(19));

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    format!(
        "{} {:>10} {} {}",
        flags(path, metadata),
        metadata.len(),
        modified,
        name
    )
}

fn flags(path: &Path, metadata: &Metadata) -> String {
    let (readable, writable, executable) = access(path, metadata);
    [
        (metadata.is_dir(), 'd'),
        (readable, 'r'),
        (writable, 'w'),
        (executable, 'x'),
    ]
    .into_iter()
    .map(|(set, flag)| if set { flag } else { '-' })
    .collect()
}

#[cfg(unix)]
fn access(path: &Path, _metadata: &Metadata) -> (bool, bool, bool) {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return (false, false, false);
    };
    // access(2) checks against the real uid, like the kernel would on open
    let check = |mode| unsafe { libc::access(c_path.as_ptr(), mode) == 0 };
    (check(libc::R_OK), check(libc::W_OK), check(libc::X_OK))
}

#[cfg(not(unix))]
fn access(_path: &Path, metadata: &Metadata) -> (bool, bool, bool) {
    (true, !metadata.permissions().readonly(), metadata.is_dir())
}
