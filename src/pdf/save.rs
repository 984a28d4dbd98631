//! Writing finished documents to disk

use std::fs;
use std::path::Path;

use lopdf::Document;
use tempfile::Builder;

use crate::error::Result;

/// Save `doc` to `path` without ever leaving a half-written file there.
///
/// The document is written to a temporary file next to the destination and
/// renamed into place once complete. On any error the temporary file is
/// removed when it drops.
///
/// A new file gets the same mode a plain `File::create` would give it. An
/// existing destination keeps its permissions.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // the umask applies on creation, as with File::create
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut temp = builder.tempfile_in(dir)?;

    doc.save_to(&mut temp)?;
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    log::debug!("wrote {}", path.display());
    Ok(())
}
