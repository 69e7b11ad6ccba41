//! Template archive extraction.
//!
//! Template archives are gzip-compressed tarballs with a single top-level
//! directory (e.g. `phonegap-app-hello-world-3.3.0/`). That directory is
//! stripped so the template content lands directly in the cache location.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tar::Archive;

/// Unpack a `.tar.gz` stream into `destination`, stripping the first path
/// component of every entry.
///
/// Returns the number of entries written. Only regular files and
/// directories are extracted; links and special files are skipped, as is
/// any entry whose path or resolved parent would leave `destination`.
pub fn unpack_template<R: Read>(reader: R, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create {}", destination.display()))?;
    let root = destination
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", destination.display()))?;

    let mut archive = Archive::new(GzDecoder::new(reader));
    let mut written = 0;

    for entry in archive.entries().context("Failed to read template archive")? {
        let mut entry = entry.context("Corrupt entry in template archive")?;
        let path = entry.path()?.into_owned();

        let entry_type = entry.header().entry_type();
        if !entry_type.is_file() && !entry_type.is_dir() {
            tracing::debug!("Skipping {:?} entry {}", entry_type, path.display());
            continue;
        }

        let Some(relative) = strip_first_component(&path) else {
            continue;
        };

        let target = root.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
            let resolved = parent
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", parent.display()))?;
            if !resolved.starts_with(&root) {
                tracing::warn!("Skipping {} outside the template root", path.display());
                continue;
            }
        }

        entry
            .unpack(&target)
            .with_context(|| format!("Failed to extract {}", relative.display()))?;
        written += 1;
    }

    tracing::debug!("Extracted {} entries into {}", written, destination.display());
    Ok(written)
}

/// Drop the leading directory of an archive path.
///
/// Returns `None` for the top-level directory itself and for any path that
/// is absolute or contains `..`.
fn strip_first_component(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(_)) => {}
        _ => return None,
    }

    let mut relative = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}
