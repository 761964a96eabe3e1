mod name_builder;

pub use name_builder::NameBuilder;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "massrename DIR1 DIR2 filter|groups|show|execute MASK [EXPRESSION]";

#[derive(Debug, Clone, Copy, Default)]
pub struct MassrenameCommand;

impl ShellCommand for MassrenameCommand {
    fn name(&self) -> &'static str {
        "massrename"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: massrename DIR1 DIR2 CMD MASK [EXPRESSION]",
            "Works on the files in DIR1 whose whole name matches the regular",
            "expression MASK (case insensitive). CMD is one of:",
            "  filter   prints the matching names",
            "  groups   prints the matching names with all their capture groups",
            "  show     prints the new name EXPRESSION gives each file",
            "  execute  moves each file from DIR1 to its new name in DIR2",
            "EXPRESSION inserts groups with ${n}, or ${n,w} padded to width w",
            "(zero padded when w has a leading zero).",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 4..=5, USAGE)?;
        let source_dir = existing_dir(env, &args[0])?;
        let mask = compile_mask(&args[3])?;

        let builder = args
            .get(4)
            .map(|expression| {
                NameBuilder::parse(expression).map_err(CommandError::InvalidArguments)
            })
            .transpose()?;

        if let Some(max) = builder.as_ref().and_then(NameBuilder::max_group) {
            let groups = mask.captures_len() - 1;
            if max > groups {
                return Err(CommandError::InvalidArguments(format!(
                    "expression uses group {} but the mask only has {}",
                    max, groups
                )));
            }
        }

        let files = matching_files(&source_dir, &mask)?;

        match (args[2].as_str(), builder) {
            ("filter", None) => {
                for name in &files {
                    env.writeln(name)?;
                }
            }
            ("groups", None) => {
                for name in &files {
                    env.writeln(&describe_groups(&mask, name))?;
                }
            }
            ("show", Some(builder)) => {
                for name in &files {
                    let new_name = rename_target(&mask, &builder, name);
                    env.writeln(&format!("{} => {}", name, new_name))?;
                }
            }
            ("execute", Some(builder)) => {
                let target_dir = existing_dir(env, &args[1])?;
                let moves = plan_moves(&source_dir, &target_dir, &mask, &builder, &files)?;
                for (from, to) in moves {
                    fs::rename(&from, &to)?;
                    debug!(from = %from.display(), to = %to.display(), "renamed");
                    env.writeln(&format!("{} => {}", from.display(), to.display()))?;
                }
            }
            _ => return Err(CommandError::Usage(USAGE)),
        }
        Ok(ShellStatus::Continue)
    }
}

fn existing_dir(env: &dyn Environment, arg: &str) -> Result<PathBuf, CommandError> {
    let dir = env.resolve_path(arg)?;
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(CommandError::InvalidArguments(format!(
            "'{}' is not a directory",
            dir.display()
        )))
    }
}

fn compile_mask(mask: &str) -> Result<Regex, CommandError> {
    RegexBuilder::new(&format!("^(?:{})$", mask))
        .case_insensitive(true)
        .unicode(true)
        .build()
        .map_err(|e| CommandError::InvalidArguments(format!("invalid mask: {}", e)))
}

/// Names of the regular files directly inside `dir` fully matching `mask`,
/// sorted.
fn matching_files(dir: &Path, mask: &Regex) -> Result<Vec<String>, CommandError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if mask.is_match(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn describe_groups(mask: &Regex, name: &str) -> String {
    let mut line = name.to_string();
    if let Some(captures) = mask.captures(name) {
        for (index, group) in captures.iter().enumerate() {
            let value = group.map_or("null", |m| m.as_str());
            line.push_str(&format!(" {}: {}", index, value));
        }
    }
    line
}

/// Source and target of every move. Fails before anything is moved when a
/// target already exists or two files would get the same name.
fn plan_moves(
    source_dir: &Path,
    target_dir: &Path,
    mask: &Regex,
    builder: &NameBuilder,
    files: &[String],
) -> Result<Vec<(PathBuf, PathBuf)>, CommandError> {
    let mut targets = HashSet::new();
    let mut moves = Vec::with_capacity(files.len());

    for name in files {
        let from = source_dir.join(name);
        let to = target_dir.join(rename_target(mask, builder, name));

        if !targets.insert(to.clone()) {
            return Err(CommandError::InvalidArguments(format!(
                "more than one file would be renamed to '{}'",
                to.display()
            )));
        }
        if from != to && to.symlink_metadata().is_ok() {
            return Err(CommandError::InvalidArguments(format!(
                "'{}' already exists",
                to.display()
            )));
        }
        moves.push((from, to));
    }
    Ok(moves)
}

fn rename_target(mask: &Regex, builder: &NameBuilder, name: &str) -> String {
    mask.captures(name)
        .map(|captures| builder.build(&captures))
        .unwrap_or_else(|| name.to_string())
}
