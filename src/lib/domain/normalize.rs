use crate::{
    domain::{extract::RawRow, models::Cell},
    error::PipelineError,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Coerced to text and trimmed.
    Text,
    /// Typed numbers pass through; text is trimmed and parsed as-is.
    Number,
    /// Like [`FieldKind::Number`], but decimal commas in text become points.
    LocaleDecimal,
    /// Typed integers pass through; floats are truncated.
    Integer,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number | FieldKind::LocaleDecimal => "a number",
            FieldKind::Integer => "an integer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i64),
}

/// A typed record built from one normalized row.
pub trait TabularRecord: Sized {
    /// Required fields, in the same order as the selection's columns.
    const FIELDS: &'static [FieldSpec];

    /// `values` matches [`Self::FIELDS`] in length and kind.
    fn from_values(values: Vec<FieldValue>) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowErrorPolicy {
    /// Abort on the first unparseable row.
    #[default]
    FailFast,
    /// Keep going and report unparseable rows alongside the records.
    SkipInvalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    pub source_row: usize,
    pub missing: Vec<&'static str>,
}

#[derive(Debug)]
pub struct RowFailure {
    pub source_row: usize,
    pub error: PipelineError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Values(Vec<FieldValue>),
    Dropped(DroppedRow),
}

#[derive(Debug)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub dropped: Vec<DroppedRow>,
    pub failed: Vec<RowFailure>,
}

fn parse_error(row: usize, field: &FieldSpec, value: impl Into<String>) -> PipelineError {
    PipelineError::Parse {
        row,
        field: field.name,
        value: value.into(),
        expected: field.kind.expected(),
    }
}

fn parse_float(row: usize, field: &FieldSpec, raw: &str) -> Result<f64, PipelineError> {
    let mut cleaned = raw.trim().to_string();
    if field.kind == FieldKind::LocaleDecimal {
        cleaned = cleaned.replace(',', ".");
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(parse_error(row, field, raw)),
    }
}

fn convert(row: usize, field: &FieldSpec, cell: &Cell) -> Result<FieldValue, PipelineError> {
    match (field.kind, cell) {
        (FieldKind::Text, cell) => Ok(FieldValue::Text(cell.to_string().trim().to_string())),
        (FieldKind::Number | FieldKind::LocaleDecimal, Cell::Float(f)) if f.is_finite() => {
            Ok(FieldValue::Number(*f))
        }
        (FieldKind::Number | FieldKind::LocaleDecimal, Cell::Int(i)) => {
            Ok(FieldValue::Number(*i as f64))
        }
        (FieldKind::Number | FieldKind::LocaleDecimal, Cell::Text(s)) => {
            parse_float(row, field, s).map(FieldValue::Number)
        }
        (FieldKind::Integer, Cell::Int(i)) => Ok(FieldValue::Integer(*i)),
        (FieldKind::Integer, Cell::Float(f)) if f.is_finite() => {
            Ok(FieldValue::Integer(f.trunc() as i64))
        }
        (FieldKind::Integer, Cell::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| parse_error(row, field, s.as_str())),
        (_, cell) => Err(parse_error(row, field, cell.to_string())),
    }
}

/// Converts one raw row, or reports which required cells it is missing.
///
/// The missing check runs over every field before any conversion, so a row
/// with both a missing and an unparseable cell is dropped, not failed.
pub fn normalize_row(row: &RawRow, fields: &[FieldSpec]) -> Result<RowOutcome, PipelineError> {
    if row.cells.len() != fields.len() {
        return Err(PipelineError::Schema {
            grid: format!("row {}", row.source_row),
            reason: format!(
                "{} cells selected for {} fields",
                row.cells.len(),
                fields.len()
            ),
        });
    }
    let missing: Vec<&'static str> = fields
        .iter()
        .zip(&row.cells)
        .filter(|(_, cell)| cell.is_missing())
        .map(|(field, _)| field.name)
        .collect();
    if !missing.is_empty() {
        return Ok(RowOutcome::Dropped(DroppedRow {
            source_row: row.source_row,
            missing,
        }));
    }
    fields
        .iter()
        .zip(&row.cells)
        .map(|(field, cell)| convert(row.source_row, field, cell))
        .collect::<Result<Vec<_>, _>>()
        .map(RowOutcome::Values)
}

pub fn normalize_rows<T: TabularRecord>(
    rows: &[RawRow],
    policy: RowErrorPolicy,
) -> Result<Normalized<T>, PipelineError> {
    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = Vec::new();
    let mut failed = Vec::new();
    for row in rows {
        match normalize_row(row, T::FIELDS) {
            Ok(RowOutcome::Values(values)) => {
                let record = T::from_values(values).ok_or_else(|| PipelineError::Schema {
                    grid: format!("row {}", row.source_row),
                    reason: "field values do not match the record type".to_string(),
                })?;
                records.push(record);
            }
            Ok(RowOutcome::Dropped(drop)) => {
                debug!(
                    "Dropping row {}: missing [{}]",
                    drop.source_row,
                    drop.missing.join(", ")
                );
                dropped.push(drop);
            }
            Err(error @ PipelineError::Parse { .. }) => match policy {
                RowErrorPolicy::FailFast => return Err(error),
                RowErrorPolicy::SkipInvalid => {
                    warn!("Skipping row {}: {}", row.source_row, error);
                    failed.push(RowFailure {
                        source_row: row.source_row,
                        error,
                    });
                }
            },
            Err(error) => return Err(error),
        }
    }
    Ok(Normalized {
        records,
        dropped,
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Sample {
        label: String,
        value: f64,
    }

    impl TabularRecord for Sample {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::new("label", FieldKind::Text),
            FieldSpec::new("value", FieldKind::LocaleDecimal),
        ];

        fn from_values(values: Vec<FieldValue>) -> Option<Self> {
            match <[FieldValue; 2]>::try_from(values).ok()? {
                [FieldValue::Text(label), FieldValue::Number(value)] => Some(Self { label, value }),
                _ => None,
            }
        }
    }

    fn raw(source_row: usize, cells: Vec<Cell>) -> RawRow {
        RawRow { source_row, cells }
    }

    const DECIMAL: FieldSpec = FieldSpec::new("area", FieldKind::LocaleDecimal);
    const NUMBER: FieldSpec = FieldSpec::new("lat", FieldKind::Number);
    const INTEGER: FieldSpec = FieldSpec::new("lights", FieldKind::Integer);

    #[test]
    fn decimal_comma_is_cleaned() {
        assert_eq!(
            convert(0, &DECIMAL, &Cell::text("1,2345")).unwrap(),
            FieldValue::Number(1.2345)
        );
        assert_eq!(
            convert(0, &DECIMAL, &Cell::text("  12,5 ")).unwrap(),
            FieldValue::Number(12.5)
        );
        assert_eq!(
            convert(0, &DECIMAL, &Cell::Float(3.25)).unwrap(),
            FieldValue::Number(3.25)
        );
    }

    #[test]
    fn plain_number_keeps_comma_strict() {
        assert_eq!(
            convert(0, &NUMBER, &Cell::text(" 49.7475 ")).unwrap(),
            FieldValue::Number(49.7475)
        );
        assert!(matches!(
            convert(0, &NUMBER, &Cell::text("49,7475")),
            Err(PipelineError::Parse { field: "lat", .. })
        ));
    }

    #[test]
    fn non_finite_and_bool_are_rejected() {
        assert!(convert(0, &DECIMAL, &Cell::text("NaN")).is_err());
        assert!(convert(0, &DECIMAL, &Cell::text("inf")).is_err());
        assert!(convert(0, &DECIMAL, &Cell::Bool(true)).is_err());
    }

    #[test]
    fn integers() {
        assert_eq!(
            convert(0, &INTEGER, &Cell::Int(1520)).unwrap(),
            FieldValue::Integer(1520)
        );
        assert_eq!(
            convert(0, &INTEGER, &Cell::Float(87.9)).unwrap(),
            FieldValue::Integer(87)
        );
        assert_eq!(
            convert(0, &INTEGER, &Cell::text(" 42 ")).unwrap(),
            FieldValue::Integer(42)
        );
        assert!(convert(0, &INTEGER, &Cell::text("4,2")).is_err());
    }

    #[test]
    fn text_is_trimmed_and_numbers_coerced() {
        let text = FieldSpec::new("district", FieldKind::Text);
        assert_eq!(
            convert(0, &text, &Cell::text("  Plzeň 3 ")).unwrap(),
            FieldValue::Text("Plzeň 3".to_string())
        );
        assert_eq!(
            convert(0, &text, &Cell::Int(4)).unwrap(),
            FieldValue::Text("4".to_string())
        );
    }

    #[test]
    fn missing_rows_are_dropped_and_counted() {
        let rows = vec![
            raw(0, vec![Cell::text("a"), Cell::text("1,5")]),
            raw(1, vec![Cell::Empty, Cell::text("2")]),
            raw(2, vec![Cell::text("c"), Cell::Empty]),
            raw(3, vec![Cell::text("d"), Cell::Float(4.0)]),
        ];
        let out = normalize_rows::<Sample>(&rows, RowErrorPolicy::FailFast).unwrap();
        assert_eq!(out.records.len(), rows.len() - out.dropped.len());
        assert_eq!(
            out.dropped,
            vec![
                DroppedRow {
                    source_row: 1,
                    missing: vec!["label"]
                },
                DroppedRow {
                    source_row: 2,
                    missing: vec!["value"]
                },
            ]
        );
        assert_eq!(
            out.records[0],
            Sample {
                label: "a".to_string(),
                value: 1.5
            }
        );
    }

    #[test]
    fn missing_check_precedes_conversion() {
        let row = raw(7, vec![Cell::Empty, Cell::text("not a number")]);
        let outcome = normalize_row(&row, Sample::FIELDS).unwrap();
        assert!(matches!(outcome, RowOutcome::Dropped(_)));
    }

    #[test]
    fn fail_fast_aborts_on_parse_error() {
        let rows = vec![
            raw(0, vec![Cell::text("a"), Cell::text("1")]),
            raw(1, vec![Cell::text("b"), Cell::text("x,y")]),
        ];
        let err = normalize_rows::<Sample>(&rows, RowErrorPolicy::FailFast).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { row: 1, .. }));
    }

    #[test]
    fn skip_invalid_keeps_the_rest() {
        let rows = vec![
            raw(0, vec![Cell::text("a"), Cell::text("1")]),
            raw(1, vec![Cell::text("b"), Cell::text("x,y")]),
            raw(2, vec![Cell::text("c"), Cell::text("3,0")]),
        ];
        let out = normalize_rows::<Sample>(&rows, RowErrorPolicy::SkipInvalid).unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.failed.len(), 1);
        assert_eq!(out.failed[0].source_row, 1);
    }

    #[test]
    fn width_mismatch_is_schema_error() {
        let row = raw(0, vec![Cell::text("only one")]);
        assert!(matches!(
            normalize_row(&row, Sample::FIELDS),
            Err(PipelineError::Schema { .. })
        ));
    }
}
