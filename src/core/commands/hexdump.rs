use std::fs::File;
use std::io::{self, BufReader, Read};

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "hexdump FILE";
const BYTES_PER_LINE: usize = 16;
const GROUP: usize = BYTES_PER_LINE / 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct HexdumpCommand;

impl ShellCommand for HexdumpCommand {
    fn name(&self) -> &'static str {
        "hexdump"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: hexdump FILE",
            "Prints FILE sixteen bytes per line: offset, bytes in hex and the",
            "bytes as text, with non printable bytes shown as '.'.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 1..=1, USAGE)?;
        let path = env.resolve_path(&args[0])?;

        if !path.is_file() {
            return Err(CommandError::InvalidArguments(format!(
                "'{}' is not a file",
                path.display()
            )));
        }

        let mut reader = BufReader::new(File::open(&path)?);
        let mut buffer = [0u8; BYTES_PER_LINE];
        let mut offset = 0;

        loop {
            let read = read_chunk(&mut reader, &mut buffer)?;
            if read == 0 {
                break;
            }
            env.writeln(&format_line(offset, &buffer[..read]))?;
            offset += read;
        }
        Ok(ShellStatus::Continue)
    }
}

/// Fills `buffer` unless the reader runs dry first.
fn read_chunk(reader: &mut impl Read, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn format_line(offset: usize, bytes: &[u8]) -> String {
    let hex_group = |range: std::ops::Range<usize>| {
        range
            .map(|i| match bytes.get(i) {
                Some(byte) => format!("{:02X}", byte),
                None => "  ".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let text: String = bytes
        .iter()
        .map(|&byte| {
            if (32..=127).contains(&byte) {
                byte as char
            } else {
                '.'
            }
        })
        .collect();

    format!(
        "{:08X}: {}|{} | {}",
        offset,
        hex_group(0..GROUP),
        hex_group(GROUP..BYTES_PER_LINE),
        text
    )
}
