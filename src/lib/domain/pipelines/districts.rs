use crate::{
    domain::{
        extract::Selection,
        normalize::{FieldKind, FieldSpec, FieldValue, TabularRecord},
        pipelines::Pipeline,
    },
    outbound::file::OutputFormat,
};
use serde::{Deserialize, Serialize};

/// Light counts, area and light density per city district.
pub struct DistrictStatistics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictStats {
    pub district: String,
    pub lights: i64,
    pub area: f64,
    pub density: i64,
}

impl TabularRecord for DistrictStats {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("district", FieldKind::Text),
        FieldSpec::new("lights", FieldKind::Integer),
        FieldSpec::new("area", FieldKind::LocaleDecimal),
        FieldSpec::new("density", FieldKind::Integer),
    ];

    fn from_values(values: Vec<FieldValue>) -> Option<Self> {
        match <[FieldValue; 4]>::try_from(values).ok()? {
            [
                FieldValue::Text(district),
                FieldValue::Integer(lights),
                FieldValue::Number(area),
                FieldValue::Integer(density),
            ] => Some(Self {
                district,
                lights,
                area,
                density,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictColumns {
    pub labels: Vec<String>,
    pub lights: Vec<i64>,
    pub area: Vec<f64>,
    pub density: Vec<i64>,
}

// The sheet carries a second header line (units) under the column names.
const UNIT_ROWS: usize = 1;
const PREVIEW_N: usize = 3;

impl Pipeline for DistrictStatistics {
    const NAME: &'static str = "districts";
    const INPUT_FILE: &'static str = "svitidelplzen.xlsx";
    const OUTPUT_FILE: &'static str = "districts_data.js";
    const HAS_HEADER: bool = true;

    type Record = DistrictStats;
    type Document = DistrictColumns;

    fn selection() -> Selection {
        let width = DistrictStats::FIELDS.len();
        Selection::positional_columns(UNIT_ROWS, 0..width).with_exact_width(width)
    }

    fn format() -> OutputFormat {
        OutputFormat::script("DISTRICTS_DATA")
    }

    fn document(records: &[DistrictStats]) -> DistrictColumns {
        DistrictColumns {
            labels: records.iter().map(|r| r.district.clone()).collect(),
            lights: records.iter().map(|r| r.lights).collect(),
            area: records.iter().map(|r| r.area).collect(),
            density: records.iter().map(|r| r.density).collect(),
        }
    }

    fn highlights(records: &[DistrictStats]) -> Vec<String> {
        let total_lights: i64 = records.iter().map(|r| r.lights).sum();
        let mut lines = vec![
            format!("Districts: {}", records.len()),
            format!("Total lights: {}", total_lights),
            format!("First {} districts:", PREVIEW_N.min(records.len())),
        ];
        lines.extend(records.iter().take(PREVIEW_N).map(|r| {
            format!(
                "  {}: {} lights, density {}/km²",
                r.district, r.lights, r.density
            )
        }));
        lines
    }
}
