use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::Error;

/// Where discovery gets its directory listings and file sizes from.
pub trait FileSource {
    /// Names (not paths) of the regular entries in `dir`, sorted.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, Error>;

    /// Size in bytes, or `None` if the file cannot be queried.
    fn file_size(&self, path: &Path) -> Option<u64>;
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSource for LocalFs {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, Error> {
        let unavailable = |e: std::io::Error| Error::DirectoryUnavailable {
            path: dir.to_path_buf(),
            source: e,
        };

        let rd = fs::read_dir(dir).map_err(unavailable)?;

        let mut names = Vec::new();
        for ent in rd {
            let ent = ent.map_err(unavailable)?;
            let ty = ent.file_type().map_err(unavailable)?;

            // Follow symlinks so a link to a directory is skipped too.
            if ty.is_dir() || (ty.is_symlink() && ent.path().is_dir()) {
                trace!(dir = %dir.display(), name = ?ent.file_name(), "skipping directory");
                continue;
            }
            names.push(ent.file_name().to_string_lossy().into_owned());
        }

        // Deterministic order for discovery and goldens.
        names.sort();
        debug!(dir = %dir.display(), files = names.len(), "listed directory");
        Ok(names)
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        match fs::metadata(path) {
            Ok(meta) => Some(meta.len()),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot read file size");
                None
            }
        }
    }
}

/// Directory to list for a path prefix as split off a filename: the prefix
/// itself, or `.` for a bare name.
pub(crate) fn listing_dir(path: &str) -> &Path {
    if path.is_empty() {
        Path::new(".")
    } else {
        Path::new(path)
    }
}
