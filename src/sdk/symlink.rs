//! Bounded symbolic-link resolution.
//!
//! SDK version probes do not follow a symlinked SDK path themselves, so an
//! explicit path is chased to its real location first. Traversal is bounded
//! the way the OS bounds it (MAXSYMLINKS) so a link cycle terminates with an
//! error instead of spinning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{Result, ScoutError};

/// Conventional OS limit on symlink traversal.
const MAX_HOPS: u32 = 32;

/// Filesystem view used by the traversal; a seam for hop-count tests.
trait LinkReader {
    fn is_symlink(&self, path: &Path) -> bool;
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;
}

struct FsLinkReader;

impl LinkReader for FsLinkReader {
    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }
}

/// Resolve `path` through symbolic links to the real path.
///
/// Each hop composes the link target with the parent directory of the
/// current path (after trimming any trailing separator). Fails with
/// [`ScoutError::SymlinkLoop`], carrying the original input, once 32 hops
/// have been taken without reaching a non-link.
pub fn resolve(path: &Path) -> Result<PathBuf> {
    resolve_with(&FsLinkReader, path)
}

fn resolve_with(reader: &dyn LinkReader, path: &Path) -> Result<PathBuf> {
    let mut current = path.to_path_buf();
    let mut hops = 0;
    while reader.is_symlink(&current) {
        hops += 1;
        if hops > MAX_HOPS {
            return Err(ScoutError::SymlinkLoop {
                path: path.to_path_buf(),
            });
        }
        let trimmed = trim_trailing_separator(&current);
        let target = reader.read_link(&trimmed)?;
        let parent = trimmed.parent().unwrap_or(Path::new("")).to_path_buf();
        current = parent.join(target);
        tracing::debug!(hop = hops, next = %current.display(), "followed symlink");
    }
    Ok(current)
}

fn trim_trailing_separator(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    PathBuf::from(text.trim_end_matches(MAIN_SEPARATOR).to_string())
}
