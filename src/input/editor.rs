use std::io::{self, Write};
use std::mem;
use std::path::{Path, PathBuf};

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};
use tracing::warn;

use super::{Console, ShellCompleter};
use crate::core::env::EnvError;

/// Interactive console backed by a line editor.
///
/// Output that does not end in a newline is held back and becomes the
/// editor prompt of the next read, so `write_prompt` followed by
/// `read_line` behaves like a plain terminal.
pub struct EditorConsole {
    editor: Editor<ShellCompleter, FileHistory>,
    pending: String,
    history_file: Option<PathBuf>,
}

impl EditorConsole {
    pub fn new(
        completer: ShellCompleter,
        history_file: Option<PathBuf>,
    ) -> Result<Self, ReadlineError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        if let Some(file) = &history_file {
            // A missing history file is normal on first start
            if file.exists() {
                if let Err(e) = editor.load_history(file) {
                    warn!("Couldn't load history from {}: {}", file.display(), e);
                }
            }
        }

        Ok(Self {
            editor,
            pending: String::new(),
            history_file,
        })
    }

    fn emit(&mut self, text: &str) -> Result<(), EnvError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(self.pending.as_bytes())?;
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        self.pending.clear();
        Ok(())
    }
}

impl Console for EditorConsole {
    fn read_line(&mut self) -> Result<String, EnvError> {
        let prompt = mem::take(&mut self.pending);
        match self.editor.readline(&prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => Err(EnvError::Interrupted),
            Err(ReadlineError::Eof) => Err(EnvError::InputClosed),
            Err(ReadlineError::Io(e)) => Err(EnvError::InputError(e)),
            Err(e) => Err(EnvError::InputError(io::Error::other(e.to_string()))),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), EnvError> {
        match text.rfind('\n') {
            Some(idx) => {
                let (complete, rest) = text.split_at(idx + 1);
                self.emit(complete)?;
                self.pending.push_str(rest);
                Ok(())
            }
            None => {
                self.pending.push_str(text);
                Ok(())
            }
        }
    }

    fn directory_changed(&mut self, dir: &Path) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_current_dir(dir);
        }
    }

    fn close(&mut self) -> Result<(), EnvError> {
        if !self.pending.is_empty() {
            self.emit("\n")?;
        }

        if let Some(file) = &self.history_file {
            if let Err(e) = self.editor.save_history(file) {
                warn!("Couldn't save history to {}: {}", file.display(), e);
            }
        }
        Ok(())
    }
}
