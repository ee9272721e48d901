pub mod script;

pub use script::{OutputFormat, parse_document, render_document};

use crate::error::PipelineError;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

pub struct Writer;

impl Writer {
    /// Writes `contents` to a sibling temp file and renames it over `path`,
    /// so a failed run never leaves a half-written asset behind.
    pub fn write_atomic(path: &Path, contents: &str) -> Result<(), PipelineError> {
        let write_error = |source| PipelineError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let tmp_path = Self::temp_path(path);
        debug!("Writing {} bytes to {:?}", contents.len(), tmp_path);
        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_error(e));
        }
        std::fs::rename(&tmp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            write_error(e)
        })
    }

    fn temp_path(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("output");
        path.with_file_name(format!(".{}.tmp", file_name))
    }
}
