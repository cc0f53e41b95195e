// SPDX-License-Identifier: MIT OR Apache-2.0

//! Functions that panic instead of returning errors.
//!
//! Meant for tests and setup code where a failure should abort immediately.

use std::path::{Component, Path, PathBuf};

/// Absolute, lexically cleaned form of `path`, resolved against the current
/// directory. An empty path resolves to the current directory.
///
/// `.` components are dropped and `..` pops the preceding component without
/// touching the filesystem, so symlinks are not resolved.
///
/// # Panics
///
/// Panics if `path` is relative and the current directory cannot be
/// determined.
pub fn filepath_abs(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        return clean(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => clean(&cwd.join(path)),
        Err(err) => panic!("cannot make {} absolute: {err}", path.display()),
    }
}

fn clean(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut out, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    out.pop();
                }
                other => out.push(other),
            }
            out
        })
}
