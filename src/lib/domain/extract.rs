use crate::{
    domain::models::{Cell, Grid},
    error::PipelineError,
};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowSpan {
    /// Data rows `start..end`; every row in the range must exist.
    Range(Range<usize>),
    /// Every data row from `skip` onwards.
    From(usize),
}

/// Which rows and columns of a grid make up a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub rows: RowSpan,
    pub columns: Vec<ColumnRef>,
    /// Required grid width, for sheets bound entirely by position.
    pub exact_width: Option<usize>,
}

impl Selection {
    pub fn fixed_range(rows: Range<usize>, columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            rows: RowSpan::Range(rows),
            columns: columns.into_iter().map(ColumnRef::Index).collect(),
            exact_width: None,
        }
    }

    pub fn named_columns(skip: usize, names: &[&str]) -> Self {
        Self {
            rows: RowSpan::From(skip),
            columns: names
                .iter()
                .map(|name| ColumnRef::Name(name.to_string()))
                .collect(),
            exact_width: None,
        }
    }

    pub fn positional_columns(skip: usize, columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            rows: RowSpan::From(skip),
            columns: columns.into_iter().map(ColumnRef::Index).collect(),
            exact_width: None,
        }
    }

    pub fn with_exact_width(mut self, width: usize) -> Self {
        self.exact_width = Some(width);
        self
    }
}

/// Selected cells of one source row, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub source_row: usize,
    pub cells: Vec<Cell>,
}

fn schema_error(grid: &Grid, reason: String) -> PipelineError {
    PipelineError::Schema {
        grid: grid.name().to_string(),
        reason,
    }
}

fn resolve_columns(grid: &Grid, columns: &[ColumnRef]) -> Result<Vec<usize>, PipelineError> {
    let width = grid.width();
    columns
        .iter()
        .map(|column| match column {
            ColumnRef::Index(idx) if *idx < width => Ok(*idx),
            ColumnRef::Index(idx) => Err(schema_error(
                grid,
                format!("column {} is past the last column ({} columns)", idx, width),
            )),
            ColumnRef::Name(name) => {
                if grid.headers().is_none() {
                    return Err(schema_error(
                        grid,
                        format!("column '{}' requested but the grid has no header row", name),
                    ));
                }
                grid.column_index(name).ok_or_else(|| {
                    schema_error(
                        grid,
                        format!(
                            "column '{}' not found. Available columns: [{}]",
                            name,
                            grid.headers().unwrap_or_default().join(", ")
                        ),
                    )
                })
            }
        })
        .collect()
}

fn resolve_rows(grid: &Grid, rows: &RowSpan) -> Result<Range<usize>, PipelineError> {
    let row_count = grid.row_count();
    match rows {
        RowSpan::Range(range) if range.start > range.end => Err(schema_error(
            grid,
            format!("row range {}..{} is reversed", range.start, range.end),
        )),
        RowSpan::Range(range) if range.end > row_count => Err(schema_error(
            grid,
            format!(
                "row range {}..{} reaches past the last row ({} rows)",
                range.start, range.end, row_count
            ),
        )),
        RowSpan::Range(range) => Ok(range.clone()),
        RowSpan::From(skip) => Ok((*skip).min(row_count)..row_count),
    }
}

pub fn extract(grid: &Grid, selection: &Selection) -> Result<Vec<RawRow>, PipelineError> {
    if let Some(expected) = selection.exact_width
        && grid.width() != expected
    {
        return Err(schema_error(
            grid,
            format!("expected {} columns, found {}", expected, grid.width()),
        ));
    }
    let columns = resolve_columns(grid, &selection.columns)?;
    let rows = resolve_rows(grid, &selection.rows)?;
    tracing::debug!(
        "Extracting rows {}..{} and columns {:?} from '{}'",
        rows.start,
        rows.end,
        columns,
        grid.name()
    );
    Ok(rows
        .map(|row| RawRow {
            source_row: row,
            cells: columns
                .iter()
                .map(|&column| grid.cell(row, column).clone())
                .collect(),
        })
        .collect())
}
