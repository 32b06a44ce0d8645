#[cfg(unix)]
use std::os::unix::fs::symlink;
#[cfg(windows)]
use std::os::windows::fs::{symlink_dir, symlink_file};
use std::{
    ffi::OsStr,
    fs, io,
    path::Path,
};

use filetime::FileTime;

/// Copy the contents of `source` into `dest`, recursively.
///
/// Existing entries in `dest` are overwritten, file modification times are
/// preserved, and symbolic links are recreated rather than followed. Two
/// kinds of entries are excluded: `dest` itself wherever it appears under
/// `source` (so a cache directory nested in the published tree never copies
/// into itself), and hidden entries: any name starting with a single `.`
/// followed by a non-dot character.
pub fn copy_tree(source: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    // Canonicalize once so the self-exclusion check tolerates relative inputs.
    let skip = dest.canonicalize()?;
    copy_dir(source, dest, &skip)
}

/// Recursively copy the entries of `dir` into `dest`, skipping `skip` and
/// hidden names.
fn copy_dir(dir: &Path, dest: &Path, skip: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if is_hidden(&name) {
            continue;
        }

        let path = entry.path();
        let target = dest.join(&name);
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            copy_symlink(&path, &target)?;
        } else if file_type.is_dir() {
            if paths_match(&path, skip) {
                continue;
            }
            fs::create_dir_all(&target)?;
            copy_dir(&path, &target, skip)?;
        } else {
            copy_file(&path, &target)?;
        }
    }
    Ok(())
}

/// Hidden-name rule: a leading `.` followed by a non-dot character. A lone
/// `.` or a `..`-prefixed name does not count as hidden.
fn is_hidden(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    let mut chars = name.chars();
    chars.next() == Some('.') && chars.next().is_some_and(|c| c != '.')
}

/// Best-effort path comparison that tolerates absolute vs relative inputs.
fn paths_match(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

/// Copy a single file, overwriting `target` and carrying over the source
/// modification time.
fn copy_file(source: &Path, target: &Path) -> io::Result<()> {
    fs::copy(source, target)?;
    let metadata = source.metadata()?;
    filetime::set_file_mtime(target, FileTime::from_last_modification_time(&metadata))?;
    Ok(())
}

/// Recreate the symbolic link at `source` as `target`, replacing whatever
/// occupies the destination.
fn copy_symlink(source: &Path, target: &Path) -> io::Result<()> {
    let link_target = fs::read_link(source)?;

    match target.symlink_metadata() {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(target)?,
        Ok(_) => fs::remove_file(target)?,
        Err(_) => {}
    }

    #[cfg(unix)]
    symlink(&link_target, target)?;
    #[cfg(windows)]
    if source.metadata().map(|m| m.is_dir()).unwrap_or(false) {
        symlink_dir(&link_target, target)?;
    } else {
        symlink_file(&link_target, target)?;
    }

    Ok(())
}
