use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, error, info, warn};

use crate::errors::WikiError;
use crate::types::Page;
use crate::utils::decode_title;

const RECORD_SUFFIX: &str = ".txt";

/// Flat-file page storage: one `<title>.txt` per page under a single root
#[derive(Debug, Clone)]
pub struct PageStore {
    root: PathBuf,
}

impl PageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        debug!("Creating PageStore with root directory: {:?}", root);
        Self { root }
    }

    /// Location of the record for `title`, after decoding the title
    pub fn record_path(&self, title: &str) -> Result<PathBuf, WikiError> {
        let decoded = decode_title(title);
        ensure_safe_title(&decoded)?;
        Ok(self.root.join(format!("{}{}", decoded, RECORD_SUFFIX)))
    }

    /// Read a page. Absence is `WikiError::NotFound`; any other failure is
    /// `WikiError::Io` or `WikiError::InvalidPath`.
    pub fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.record_path(title)?;
        debug!("Loading page '{}' from {:?}", title, path);

        let body = fs::read(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                debug!("No record for '{}'", title);
                WikiError::NotFound
            } else {
                warn!("Failed to read {:?}: {}", path, e);
                WikiError::Io(e)
            }
        })?;
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();

        Ok(Page {
            title: decode_title(title).into_owned(),
            body,
            modified,
        })
    }

    /// Create or overwrite the record for `page`
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.record_path(&page.title)?;
        debug!("Saving page '{}' to {:?}", page.title, path);

        write_record(&path, &page.body).map_err(|e| {
            error!("Failed to write {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved page '{}', {} bytes", page.title, page.body.len());
        Ok(())
    }
}

/// Titles become file names, so refuse anything that would leave the root
fn ensure_safe_title(title: &str) -> Result<(), WikiError> {
    if title.is_empty() {
        return Err(WikiError::InvalidPath);
    }
    for comp in Path::new(title).components() {
        match comp {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                warn!("Rejecting unsafe title '{}'", title);
                return Err(WikiError::InvalidPath);
            }
        }
    }
    Ok(())
}

#[cfg(unix)]
fn write_record(path: &Path, body: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(body)?;
    file.flush()
}

#[cfg(not(unix))]
fn write_record(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(body)?;
    file.flush()
}
