use std::path::PathBuf;

/// Key of the directory stack used by `pushd`, `popd`, `listd` and `dropd`.
pub const DIR_STACK_KEY: &str = "cdstack";

/// Value kept in the environment's shared data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedValue {
    Path(PathBuf),
    PathStack(Vec<PathBuf>),
    Text(String),
}

impl SharedValue {
    pub fn as_path_stack(&self) -> Option<&Vec<PathBuf>> {
        match self {
            SharedValue::PathStack(stack) => Some(stack),
            _ => None,
        }
    }

    pub fn as_path_stack_mut(&mut self) -> Option<&mut Vec<PathBuf>> {
        match self {
            SharedValue::PathStack(stack) => Some(stack),
            _ => None,
        }
    }
}
