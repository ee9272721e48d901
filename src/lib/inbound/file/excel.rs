use crate::{
    domain::models::{Cell, Grid},
    error::PipelineError,
    inbound::file::Reader,
};
use calamine::{Data, Range, Reader as CalamineReader, open_workbook_auto};
use std::path::Path;

pub trait Excel {
    fn load_excel_grid(path: &Path, has_header: bool) -> Result<Grid, PipelineError>;
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::text(s.as_str()),
            Data::Float(f) => Cell::Float(*f),
            Data::Int(i) => Cell::Int(*i),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::Float(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.as_str()),
        }
    }
}

/// calamine trims a worksheet to its used range; pad it back out so that
/// indices line up with sheet positions (row 0, column 0 is A1).
fn rows_from_range(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(Cell::from));
        rows.push(cells);
    }
    rows
}

impl Excel for Reader {
    fn load_excel_grid(path: &Path, has_header: bool) -> Result<Grid, PipelineError> {
        let file_name = Reader::file_name(path);
        let load_error = |reason: String| PipelineError::Load {
            path: path.to_path_buf(),
            reason,
        };
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| load_error(format!("failed to open excel file: {}", e)))?;
        let first_sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| load_error("excel file has no worksheets".to_string()))?;
        let range = workbook.worksheet_range(&first_sheet_name).map_err(|e| {
            load_error(format!(
                "failed to read worksheet '{}': {}",
                first_sheet_name, e
            ))
        })?;
        let rows = rows_from_range(&range);
        tracing::debug!(
            "Loaded {} rows from worksheet '{}' of excel file '{}'",
            rows.len(),
            first_sheet_name,
            file_name
        );
        Ok(Grid::from_rows(file_name, rows, has_header))
    }
}
