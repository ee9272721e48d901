use crate::{
    domain::{
        extract::Selection,
        normalize::{FieldKind, FieldSpec, FieldValue, TabularRecord},
        order::sort_descending_by,
        pipelines::Pipeline,
    },
    outbound::file::OutputFormat,
};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Offences per inhabitant by district, worst first.
pub struct CrimeRates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeRecord {
    pub district: String,
    pub per_capita: f64,
}

impl TabularRecord for CrimeRecord {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("district", FieldKind::Text),
        FieldSpec::new("per_capita", FieldKind::LocaleDecimal),
    ];

    fn from_values(values: Vec<FieldValue>) -> Option<Self> {
        match <[FieldValue; 2]>::try_from(values).ok()? {
            [FieldValue::Text(district), FieldValue::Number(per_capita)] => Some(Self {
                district,
                per_capita,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeColumns {
    pub districts: Vec<String>,
    pub per_capita: Vec<f64>,
}

const DATA_ROWS: Range<usize> = 44..53;
const DISTRICT_COLUMN: usize = 15;
const PER_CAPITA_COLUMN: usize = 16;
const PER_CAPITA_DECIMALS: i32 = 4;
const TOP_N: usize = 3;

fn round_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl Pipeline for CrimeRates {
    const NAME: &'static str = "crime";
    const INPUT_FILE: &'static str = "trestnciciny.xlsx";
    const OUTPUT_FILE: &'static str = "crime_data.js";
    const HAS_HEADER: bool = false;

    type Record = CrimeRecord;
    type Document = CrimeColumns;

    fn selection() -> Selection {
        Selection::fixed_range(DATA_ROWS, [DISTRICT_COLUMN, PER_CAPITA_COLUMN])
    }

    fn format() -> OutputFormat {
        OutputFormat::script("CRIME_DATA")
    }

    fn order(records: Vec<CrimeRecord>) -> Vec<CrimeRecord> {
        sort_descending_by(records, |r| r.per_capita)
    }

    fn document(records: &[CrimeRecord]) -> CrimeColumns {
        CrimeColumns {
            districts: records.iter().map(|r| r.district.clone()).collect(),
            per_capita: records
                .iter()
                .map(|r| round_decimals(r.per_capita, PER_CAPITA_DECIMALS))
                .collect(),
        }
    }

    fn highlights(records: &[CrimeRecord]) -> Vec<String> {
        let mut lines = vec![
            format!("Districts: {}", records.len()),
            format!("Top {} by offences per inhabitant:", TOP_N.min(records.len())),
        ];
        lines.extend(
            records
                .iter()
                .take(TOP_N)
                .enumerate()
                .map(|(i, r)| format!("  {}. {}: {:.4}", i + 1, r.district, r.per_capita)),
        );
        lines
    }
}
