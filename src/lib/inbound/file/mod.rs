pub mod csv;
pub mod excel;

pub use self::csv::Csv;
pub use self::excel::Excel;

use crate::{domain::models::Grid, error::PipelineError};
use std::{ffi::OsStr, path::Path};

pub struct Reader;

impl Reader {
    /// Loads the first worksheet of `path`, picking the backend by extension.
    pub fn load_grid(path: &Path, has_header: bool) -> Result<Grid, PipelineError> {
        if !path.is_file() {
            return Err(PipelineError::Load {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }
        let ext_lower = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext_lower.as_str() {
            "csv" => <Self as Csv>::load_csv_grid(path, has_header),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => {
                <Self as Excel>::load_excel_grid(path, has_header)
            }
            other => Err(PipelineError::Load {
                path: path.to_path_buf(),
                reason: format!("unsupported file type '{}'", other),
            }),
        }
    }

    pub(crate) fn file_name(path: &Path) -> String {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown file")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Reader::load_grid(&dir.path().join("trestnciciny.xlsx"), false).unwrap_err();
        assert!(matches!(err, PipelineError::Load { .. }));
    }

    #[test]
    fn unsupported_extension_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        let err = Reader::load_grid(&path, false).unwrap_err();
        assert!(err.to_string().contains("unsupported file type 'txt'"));
    }

    #[test]
    fn corrupt_workbook_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svitidelplzen.xlsx");
        std::fs::write(&path, "not a zip archive").unwrap();
        let err = Reader::load_grid(&path, true).unwrap_err();
        assert!(matches!(err, PipelineError::Load { .. }));
    }
}
