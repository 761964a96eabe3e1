use std::collections::BTreeSet;

use rustyline::completion::Pair;

#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new<'a>(commands: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            commands: commands.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    pub fn complete_command(&self, line: &str) -> Vec<Pair> {
        let input = line.trim();

        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}
