//! Atomic file copy implementation

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 128 * 1024;

/// Suffix of the temp files a copy is written to before the final rename.
pub const PART_SUFFIX: &str = ".part";

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Stream into a uniquely named hidden `.part` file next to `dest`
/// 2. Flush and sync to disk
/// 3. Preserve metadata (permissions, atime, mtime)
/// 4. Rename into place
///
/// The temp file is created exclusively, so an existing entry in the
/// destination folder is never truncated or replaced, and it is removed if
/// any step fails. Parent directories are not created here. Anything other
/// than a regular file (FIFO, socket, device) is refused with
/// `InvalidInput` before it is opened.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
///
/// # Example
/// ```no_run
/// use stagecopy::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.txt"), Path::new("dest.txt"))?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> io::Result<u64> {
    // Opening a FIFO for reading blocks until a writer shows up
    if !fs::metadata(src)?.is_file() {
        return Err(special_file_error(src));
    }
    let mut src_file = File::open(src)?;

    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut prefix = std::ffi::OsString::from(".");
    if let Some(name) = dest.file_name() {
        prefix.push(name);
        prefix.push(".");
    }

    // Dropping `part` on any early return deletes the temp file
    let mut part = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(PART_SUFFIX)
        .tempfile_in(parent)?;

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        part.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part.as_file().sync_all()?;

    let src_metadata = src_file.metadata()?;
    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    let atime = filetime::FileTime::from_last_access_time(&src_metadata);
    filetime::set_file_handle_times(part.as_file(), Some(atime), Some(mtime))?;
    fs::set_permissions(part.path(), src_metadata.permissions())?;

    part.persist(dest).map_err(|e| e.error)?;

    Ok(total_bytes)
}

pub(super) fn special_file_error(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!(
            "'{}' is not a regular file (FIFO, socket or device)",
            path.display()
        ),
    )
}
