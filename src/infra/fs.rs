//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system primitives used by jar discovery:
//! ordered directory listings, a recursive jar walk, and a streaming search for
//! a byte marker inside a file.
//!
//! 此模块提供 jar 发现所用的文件系统原语：
//! 有序的目录列表、递归的 jar 遍历，以及在文件内流式搜索字节标记。

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const READ_CHUNK: usize = 64 * 1024;

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Lists the entries of `dir` sorted by file name, the way a shell glob expands.
///
/// # Arguments
/// * `dir` - Directory to list
///
/// # Returns
/// The full paths of all entries, or the I/O error from reading the directory.
pub fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect::<Vec<_>>();
    entries.sort();
    Ok(entries)
}

/// Immediate subdirectories of `dir`, sorted by name.
pub fn sorted_subdirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_dir())
        .collect())
}

/// Every file with a `jar` extension below `root`, in walk order.
///
/// Unreadable subtrees are skipped. A missing `root` yields nothing.
///
/// 返回 `root` 下所有扩展名为 `jar` 的文件，按遍历顺序排列。
/// 跳过无法读取的子树；`root` 不存在时返回空列表。
pub fn find_jars_recursive(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(root = %root.display(), error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("jar"))
        .map(|entry| entry.into_path())
        .collect()
}

/// Searches `path` for `marker` without loading the whole file.
///
/// # Arguments
/// * `path` - File to search
/// * `marker` - Non-empty byte sequence to look for
///
/// # Returns
/// `true` if the marker occurs anywhere in the file.
///
/// 在不加载整个文件的情况下搜索 `path` 中的 `marker`。
pub fn file_contains(path: &Path, marker: &[u8]) -> io::Result<bool> {
    if marker.is_empty() {
        return Ok(true);
    }
    let mut file = File::open(path)?;
    let mut buf = vec![0u8; READ_CHUNK + marker.len()];
    // Bytes carried over from the previous chunk so a marker split across
    // two reads is still found.
    let mut carried = 0usize;

    loop {
        let read = file.read(&mut buf[carried..])?;
        if read == 0 {
            return Ok(false);
        }
        let filled = carried + read;
        if contains_bytes(&buf[..filled], marker) {
            return Ok(true);
        }
        let keep = (marker.len() - 1).min(filled);
        buf.copy_within(filled - keep..filled, 0);
        carried = keep;
    }
}

/// Returns `true` if `needle` occurs in `haystack`.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Creates `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !is_directory(dir) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
