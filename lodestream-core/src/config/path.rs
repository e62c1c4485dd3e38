//! Path helpers: home-directory expansion and lexical cleaning.

use crate::error::{ConfigError, Result};
use std::path::{MAIN_SEPARATOR, PathBuf};

/// Source of the current user's home directory
pub trait HomeDir {
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Home directory of the running process, from the platform environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessHome;

impl HomeDir for ProcessHome {
    fn home_dir(&self) -> Option<PathBuf> {
        std::env::home_dir()
    }
}

impl<F> HomeDir for F
where
    F: Fn() -> Option<PathBuf>,
{
    fn home_dir(&self) -> Option<PathBuf> {
        self()
    }
}

/// Replace a leading `~/` with the home directory.
///
/// Any other path is returned unchanged. The home directory is only looked
/// up when the prefix is present.
pub fn expand_home(path: &str, home: &dyn HomeDir) -> Result<String> {
    let Some(rest) = path
        .strip_prefix('~')
        .filter(|rest| rest.starts_with(MAIN_SEPARATOR))
    else {
        return Ok(path.to_string());
    };

    let dir = home
        .home_dir()
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or_else(|| ConfigError::HomeDirectoryUnavailable(path.to_string()))?;

    let dir = dir.to_string_lossy();
    Ok(format!("{}{rest}", dir.trim_end_matches(MAIN_SEPARATOR)))
}

/// Lexically clean a slash-separated path.
///
/// Collapses repeated separators, drops `.` elements and resolves `..`
/// against the preceding element. `..` above the root of an absolute path is
/// dropped; an empty result becomes `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            s => parts.push(s),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
