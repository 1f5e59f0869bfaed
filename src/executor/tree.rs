//! Recursive directory copy

use super::copy::{copy_file_atomic, special_file_error};
use std::fs;
use std::io;
use std::path::Path;

/// Copy the tree rooted at `src` to a new directory `dest`.
///
/// `dest` itself must not exist: it is created with a non-recursive
/// `create_dir` and the call fails with `AlreadyExists` otherwise. Entries
/// are visited in file-name order. With `preserve_symlinks` links are
/// recreated as links; otherwise they are followed and their targets
/// copied. FIFOs, sockets and device nodes fail the copy with
/// `InvalidInput` instead of being opened.
///
/// Returns the number of file bytes copied.
pub fn copy_tree(src: &Path, dest: &Path, preserve_symlinks: bool) -> io::Result<u64> {
    fs::create_dir(dest)?;

    // Walk the resolved root so a symlinked source directory is still descended
    let root = fs::canonicalize(src)?;
    let walker = ignore::WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(!preserve_symlinks)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut total_bytes = 0u64;
    let mut dirs = vec![(root.clone(), dest.to_path_buf())];

    for result in walker {
        let entry = result.map_err(walk_error)?;
        let relative = match entry.path().strip_prefix(&root) {
            Ok(rel) if rel.as_os_str().is_empty() => continue,
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let target = dest.join(relative);

        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };

        if file_type.is_symlink() {
            // Only reachable when links are not followed
            let link_target = fs::read_link(entry.path())?;
            create_symlink(&link_target, &target)?;
        } else if file_type.is_dir() {
            fs::create_dir(&target)?;
            dirs.push((entry.path().to_path_buf(), target));
        } else if file_type.is_file() {
            total_bytes += copy_file_atomic(entry.path(), &target)?;
        } else {
            return Err(special_file_error(entry.path()));
        }
    }

    // Children touch their parent's mtime, so stamp the deepest dirs first
    for (src_dir, dest_dir) in dirs.iter().rev() {
        copy_dir_metadata(src_dir, dest_dir)?;
    }
    Ok(total_bytes)
}

/// Carry a source directory's timestamps and permissions over to its copy.
fn copy_dir_metadata(src: &Path, dest: &Path) -> io::Result<()> {
    let metadata = fs::metadata(src)?;
    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    let atime = filetime::FileTime::from_last_access_time(&metadata);
    filetime::set_file_times(dest, atime, mtime)?;
    fs::set_permissions(dest, metadata.permissions())
}

fn walk_error(err: ignore::Error) -> io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::other(message))
}

#[cfg(unix)]
fn create_symlink(target: &Path, link_path: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link_path)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link_path: &Path) -> io::Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};

    match symlink_file(target, link_path) {
        Ok(()) => Ok(()),
        Err(file_err) => match symlink_dir(target, link_path) {
            Ok(()) => Ok(()),
            Err(_) => Err(file_err),
        },
    }
}
