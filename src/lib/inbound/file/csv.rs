use crate::{
    domain::models::{Cell, Grid},
    error::PipelineError,
    inbound::file::Reader,
};
use ::csv::ReaderBuilder;
use std::path::Path;

pub trait Csv {
    fn load_csv_grid(path: &Path, has_header: bool) -> Result<Grid, PipelineError>;
}

impl Csv for Reader {
    /// Every non-empty field loads as text; typing happens in the normalizer.
    fn load_csv_grid(path: &Path, has_header: bool) -> Result<Grid, PipelineError> {
        let file_name = Reader::file_name(path);
        let load_error = |e: ::csv::Error| PipelineError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(load_error)?;
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(load_error)?;
            rows.push(record.iter().map(Cell::text).collect());
        }
        tracing::debug!("Loaded {} rows from csv file '{}'", rows.len(), file_name);
        Ok(Grid::from_rows(file_name, rows, has_header))
    }
}
