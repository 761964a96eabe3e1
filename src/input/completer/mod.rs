mod command;
mod path;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use command::CommandCompleter;
use path::PathCompleter;

use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line editor helper: completes built-in names in the first word and paths
/// (relative to the shell's current directory) everywhere else.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
    current_dir: PathBuf,
}

impl ShellCompleter {
    pub fn new<'a>(commands: impl IntoIterator<Item = &'a str>, current_dir: &Path) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(commands),
            path_completer: PathCompleter::new(),
            highlighter: SyntaxHighlighter::new(),
            current_dir: current_dir.to_path_buf(),
        }
    }

    pub fn set_current_dir(&mut self, dir: &Path) {
        self.current_dir = dir.to_path_buf();
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let known = line
            .split_whitespace()
            .next()
            .is_some_and(|word| self.command_completer.contains(word));
        Cow::Owned(self.highlighter.highlight_command(line, known))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();

        if line_up_to_cursor.ends_with(char::is_whitespace) {
            words.push("");
        }

        let (start, matches) = match words.as_slice() {
            [] => (0, self.command_completer.complete_command("")),
            [word] => {
                let start = line_up_to_cursor.rfind(word).unwrap_or(0);
                (start, self.command_completer.complete_command(word))
            }
            [.., last_word] => {
                let start = if last_word.is_empty() {
                    pos
                } else {
                    line_up_to_cursor.rfind(last_word).unwrap_or(pos)
                };
                (
                    start,
                    self.path_completer
                        .complete_path(&self.current_dir, last_word),
                )
            }
        };

        Ok((start, matches))
    }
}
