mod completer;
mod console;
mod editor;

pub use completer::ShellCompleter;
pub use console::{Console, ScriptedConsole};
pub use editor::EditorConsole;
