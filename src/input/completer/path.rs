use std::{
    fs,
    path::Path,
};

use rustyline::completion::Pair;

#[derive(Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    /// Completes `incomplete` as typed by the user. Relative input is looked
    /// up in `current_dir`, but replacements keep the user's own prefix.
    pub fn complete_path(&self, current_dir: &Path, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = self.parse_path_input(incomplete);
        let dir_to_search = current_dir.join(typed_dir.as_deref().unwrap_or(""));

        let Ok(entries) = fs::read_dir(&dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                let typed = match &typed_dir {
                    Some(dir) => format!("{}{}", dir, name),
                    None => name,
                };
                Some(self.create_completion_pair(typed, &entry.path()))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    /// Splits into the directory part as typed (with its trailing `/`) and
    /// the file name prefix.
    fn parse_path_input<'a>(&self, incomplete: &'a str) -> (Option<String>, &'a str) {
        match incomplete.rfind('/') {
            Some(idx) => (
                Some(incomplete[..=idx].to_string()),
                &incomplete[idx + 1..],
            ),
            None => (None, incomplete),
        }
    }

    fn create_completion_pair(&self, typed: String, path: &Path) -> Pair {
        if path.is_dir() {
            let display = format!("{}/", typed);
            Pair {
                replacement: display.clone(),
                display,
            }
        } else {
            Pair {
                replacement: format!("{} ", typed),
                display: typed,
            }
        }
    }
}
