//! Lexical normalization of filesystem paths.
//!
//! Input is made absolute against a base location, `~` is replaced by the
//! home directory and `.`/`..` segments are folded away. The filesystem is
//! never consulted, so wildcard characters survive unchanged and a pattern
//! can be normalized before it is expanded.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

fn invalid(path: impl Into<String>, reason: &str) -> Error {
    Error::InvalidPath {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Replaces a leading `~` or `~/` with the home directory.
///
/// Anything not starting with `~` is returned as is. `~name` forms are
/// rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] for `~name` input or when no home
/// directory is known.
///
/// ```
/// use provpath::provider::normalize::expand_home;
/// use std::path::Path;
///
/// assert!(expand_home("~/project").unwrap().ends_with("project"));
/// assert_eq!(expand_home("/srv").unwrap(), Path::new("/srv"));
/// assert!(expand_home("~alice").is_err());
/// ```
pub fn expand_home(raw: &str) -> Result<PathBuf> {
    let Some(after) = raw.strip_prefix('~') else {
        return Ok(PathBuf::from(raw));
    };

    let rest = match after.chars().next() {
        None => "",
        Some('/' | '\\') => &after[1..],
        Some(_) => return Err(invalid(raw, "only ~ and ~/ are supported, not ~name")),
    };

    let home = home::home_dir().ok_or_else(|| invalid(raw, "home directory is unknown"))?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

/// Folds `.` and `..` out of `path` without touching the disk.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] when a `..` would climb above the root.
///
/// ```
/// use provpath::provider::normalize::fold_dots;
/// use std::path::Path;
///
/// assert_eq!(fold_dots(Path::new("/a/./b/../c")).unwrap(), Path::new("/a/c"));
/// assert!(fold_dots(Path::new("/a/../..")).is_err());
/// ```
pub fn fold_dots(path: &Path) -> Result<PathBuf> {
    let mut anchor = PathBuf::new();
    let mut segments: Vec<&std::ffi::OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if segments.pop().is_none() {
                    return Err(invalid(
                        path.display().to_string(),
                        "'..' leads above the root",
                    ));
                }
            }
            Component::Normal(segment) => segments.push(segment),
        }
    }

    anchor.extend(segments);
    Ok(anchor)
}

/// Turns user input into an absolute native path string.
///
/// `base` must already be absolute; relative input is joined onto it.
///
/// # Errors
///
/// Fails with [`Error::InvalidPath`] if home expansion fails, the path
/// climbs above the root or the result is not UTF-8.
///
/// ```
/// use provpath::provider::normalize::normalize;
/// use std::path::Path;
///
/// # #[cfg(unix)] {
/// assert_eq!(normalize("./src/../lib", Path::new("/work")).unwrap(), "/work/lib");
/// assert_eq!(normalize("logs/*.txt", Path::new("/work")).unwrap(), "/work/logs/*.txt");
/// # }
/// ```
pub fn normalize(raw: &str, base: &Path) -> Result<String> {
    let expanded = expand_home(raw)?;
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };

    fold_dots(&joined)?
        .into_os_string()
        .into_string()
        .map_err(|_| invalid(raw, "not valid UTF-8"))
}
