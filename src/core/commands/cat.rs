use std::fs::File;
use std::io::{BufRead, BufReader};

use encoding_rs::UTF_8;
use encoding_rs_io::DecodeReaderBytesBuilder;

use super::{charsets, parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "cat FILE [CHARSET]";

#[derive(Debug, Clone, Copy, Default)]
pub struct CatCommand;

impl ShellCommand for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: cat FILE [CHARSET]",
            "Prints the contents of FILE decoded with CHARSET (default UTF-8).",
            "See 'charsets' for the supported charset names.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 1..=2, USAGE)?;
        let path = env.resolve_path(&args[0])?;

        let encoding = match args.get(1) {
            Some(label) => charsets::lookup(label).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unsupported charset '{}'", label))
            })?,
            None => UTF_8,
        };

        if !path.is_file() {
            return Err(CommandError::InvalidArguments(format!(
                "'{}' is not a file",
                path.display()
            )));
        }

        let decoder = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .build(File::open(&path)?);
        let mut reader = BufReader::new(decoder);

        let mut line = String::new();
        let mut ends_with_newline = true;
        while reader.read_line(&mut line)? > 0 {
            ends_with_newline = line.ends_with('\n');
            env.write(&line)?;
            line.clear();
        }

        // Keep the next prompt on its own line
        if !ends_with_newline {
            env.writeln("")?;
        }
        Ok(ShellStatus::Continue)
    }
}
