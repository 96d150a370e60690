//! Single-file copy with metadata

use crate::types::LinkError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Copy one file, replacing whatever is at `dest`.
///
/// Content is streamed into a hidden sibling of `dest`, flushed, given the
/// source's permissions and mtime, then renamed over `dest`. Missing parent
/// directories are created. On Unix a symlink is recreated as a symlink.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied (0 for symlinks)
/// * `Err(LinkError::Copy)` - the failing source path and I/O error
///
/// # Example
/// ```no_run
/// use pkgsync::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("lib/a.js"), Path::new("out/lib/a.js"))?;
/// # Ok::<(), pkgsync::types::LinkError>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, LinkError> {
    let wrap = |source: std::io::Error| LinkError::Copy {
        path: src.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }

    let link_meta = fs::symlink_metadata(src).map_err(wrap)?;
    if cfg!(unix) && link_meta.file_type().is_symlink() {
        return copy_symlink(src, dest).map(|_| 0).map_err(wrap);
    }

    let part_path = part_path(dest);
    let result = stream_into(src, &part_path).and_then(|bytes| {
        fs::rename(&part_path, dest)?;
        Ok(bytes)
    });
    if result.is_err() {
        let _ = fs::remove_file(&part_path);
    }
    result.map_err(wrap)
}

fn stream_into(src: &Path, part_path: &Path) -> std::io::Result<u64> {
    let mut src_file = File::open(src)?;
    let mut part_file = File::create(part_path)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;
    loop {
        let bytes_read = src_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        part_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part_file.sync_all()?;
    // Drop the handle before touching metadata / renaming (required on Windows)
    drop(part_file);

    let src_metadata = fs::metadata(src)?;
    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_mtime(part_path, mtime)?;
    fs::set_permissions(part_path, src_metadata.permissions())?;

    Ok(total_bytes)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> std::io::Result<()> {
    let target = fs::read_link(src)?;
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(dest)?,
        Ok(_) => fs::remove_file(dest)?,
        Err(_) => {}
    }
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(not(unix))]
fn copy_symlink(_src: &Path, _dest: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are only recreated on unix",
    ))
}

/// Temporary sibling used while writing `dest`
fn part_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(dest.file_name().unwrap_or_default());
    name.push(".pkgsync-part");
    dest.with_file_name(name)
}
