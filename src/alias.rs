//! Maintenance of the "latest recording" alias.
//!
//! The alias is a relative symbolic link living next to the recordings, e.g.
//! `morning_show.mp3 -> morning_show_20240115_060000.mp3`, so it stays valid
//! when the whole directory is moved.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::RecorderError;

/// Point `alias_path` at `target_name`, a file name in the same directory.
///
/// The new link is created under a temporary name and renamed over the alias,
/// so whatever was there before (a file, a link, a dangling link) is replaced
/// in one step and readers never observe a missing alias.
pub fn refresh_alias(alias_path: &Path, target_name: &Path) -> Result<(), RecorderError> {
    let staging = staging_path(alias_path);

    let result = replace_with_link(&staging, alias_path, target_name);
    if result.is_err() {
        let _ = remove_entry(&staging);
    }

    result.map_err(|source| RecorderError::Alias {
        path: alias_path.to_path_buf(),
        source,
    })
}

fn replace_with_link(staging: &Path, alias_path: &Path, target_name: &Path) -> io::Result<()> {
    remove_entry(staging)?;
    symlink(target_name, staging)?;
    fs::rename(staging, alias_path)?;
    debug!(
        "Alias {} now points at {}",
        alias_path.display(),
        target_name.display()
    );
    Ok(())
}

/// Hidden sibling of the alias used while the new link is built.
fn staging_path(alias_path: &Path) -> PathBuf {
    let name = alias_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    alias_path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

/// Remove a file or link if present. Directories are left alone.
fn remove_entry(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} is a directory", path.display()),
        )),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
