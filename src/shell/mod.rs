use std::{fs, io, path::PathBuf};

use tracing::{debug, warn};

mod executor;
mod reader;

pub use executor::execute_line;

use crate::{
    core::{
        commands::{CommandRegistry, ShellStatus},
        config::{ConfigLoader, ConfigPaths},
        env::{EnvError, Environment, ShellEnvironment},
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{Console, EditorConsole, ScriptedConsole, ShellCompleter},
};

/// A session: an environment plus the read, dispatch and report loop.
pub struct Shell<C: Console> {
    env: ShellEnvironment<C>,
    highlighter: SyntaxHighlighter,
}

impl Shell<EditorConsole> {
    pub fn interactive(history_file: Option<PathBuf>) -> Result<Self, ShellError> {
        let current_dir = std::env::current_dir()?;
        let registry = CommandRegistry::builtin();
        let completer = ShellCompleter::new(registry.names(), &current_dir);
        let console = EditorConsole::new(completer, history_file)?;

        Ok(Shell::new(
            ShellEnvironment::with_directory(console, &current_dir),
            SyntaxHighlighter::new(),
        ))
    }
}

impl Shell<ScriptedConsole<io::Stdout>> {
    pub fn scripted(script: &str) -> Result<Self, ShellError> {
        let env = ShellEnvironment::new(ScriptedConsole::from_script(script))?;
        Ok(Shell::new(env, SyntaxHighlighter::plain()))
    }
}

impl<C: Console> Shell<C> {
    pub fn new(env: ShellEnvironment<C>, highlighter: SyntaxHighlighter) -> Self {
        Self { env, highlighter }
    }

    pub fn environment(&self) -> &ShellEnvironment<C> {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut ShellEnvironment<C> {
        &mut self.env
    }

    /// Runs startup lines one by one. Failures are reported and skipped;
    /// `exit` stops both the startup file and the session.
    pub fn source(&mut self, commands: &[String]) -> ShellStatus {
        for line in commands {
            if self.execute(line) == ShellStatus::Terminate {
                return ShellStatus::Terminate;
            }
        }
        ShellStatus::Continue
    }

    /// Reads and runs logical lines until `exit` or the input ends, then
    /// closes the console.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let line = match reader::read_logical_line(&mut self.env) {
                Ok(line) => line,
                Err(EnvError::Interrupted) => {
                    debug!("line discarded by interrupt");
                    continue;
                }
                Err(EnvError::InputClosed) => break,
                Err(e) => {
                    self.report(&e.to_string());
                    break;
                }
            };

            if self.execute(&line) == ShellStatus::Terminate {
                break;
            }
        }

        self.finish()
    }

    /// Runs one logical line, reporting any failure to the user. Only `exit`
    /// and a broken input stream end the session.
    pub fn execute(&mut self, line: &str) -> ShellStatus {
        match execute_line(&mut self.env, line) {
            Ok(status) => status,
            Err(e) => {
                self.report(&e.to_string());
                if e.is_input_failure() {
                    ShellStatus::Terminate
                } else {
                    ShellStatus::Continue
                }
            }
        }
    }

    pub fn finish(&mut self) -> Result<(), ShellError> {
        self.env.console_mut().close()?;
        Ok(())
    }

    fn greet(&mut self) {
        let banner = format!(
            "Welcome to atrium {}! Type 'help' to list the commands.",
            env!("CARGO_PKG_VERSION")
        );
        if let Err(e) = self.env.writeln(&banner) {
            warn!("Couldn't write banner: {}", e);
        }
    }

    fn report(&mut self, message: &str) {
        let message = self.highlighter.highlight_error(message);
        if let Err(e) = self.env.writeln(&message) {
            warn!("Couldn't report error '{}': {}", message, e);
        }
    }
}

/// Builds the session the flags ask for and runs it to completion.
pub fn start(flags: &Flags) -> Result<(), ShellError> {
    let paths = match ConfigPaths::new() {
        Ok(paths) => Some(paths),
        Err(e) => {
            warn!("{}, running without history or startup file", e);
            None
        }
    };
    let startup = startup_commands(flags, paths.as_ref())?;

    ctrlc::set_handler(move || {
        println!("\nUse 'exit' to exit the shell");
    })?;

    match flags.get_value("script") {
        Some(script) => {
            let script = fs::read_to_string(script)?;
            launch(Shell::scripted(&script)?, &startup, false)
        }
        None => {
            let history = paths.map(|paths| paths.history_path);
            launch(
                Shell::interactive(history)?,
                &startup,
                !flags.is_set("quiet"),
            )
        }
    }
}

fn startup_commands(
    flags: &Flags,
    paths: Option<&ConfigPaths>,
) -> Result<Vec<String>, ShellError> {
    let Some(paths) = paths else {
        return Ok(Vec::new());
    };

    match flags.get_value("config") {
        Some(rc) => {
            let paths = paths.clone().with_rc_path(rc);
            Ok(ConfigLoader::new(&paths).load_required()?)
        }
        None => Ok(ConfigLoader::new(paths).load_commands()?),
    }
}

fn launch<C: Console>(
    mut shell: Shell<C>,
    startup: &[String],
    banner: bool,
) -> Result<(), ShellError> {
    if shell.source(startup) == ShellStatus::Terminate {
        return shell.finish();
    }
    if banner {
        shell.greet();
    }
    shell.run()
}
