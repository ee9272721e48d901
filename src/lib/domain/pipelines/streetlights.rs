use crate::{
    domain::{
        extract::Selection,
        normalize::{FieldKind, FieldSpec, FieldValue, TabularRecord},
        pipelines::Pipeline,
    },
    outbound::file::OutputFormat,
};
use serde::{Deserialize, Serialize};

/// Street light positions, one JSON object per light.
pub struct StreetLights;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetLight {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl TabularRecord for StreetLight {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("lat", FieldKind::Number),
        FieldSpec::new("lng", FieldKind::Number),
        FieldSpec::new("name", FieldKind::Text),
    ];

    fn from_values(values: Vec<FieldValue>) -> Option<Self> {
        match <[FieldValue; 3]>::try_from(values).ok()? {
            [
                FieldValue::Number(lat),
                FieldValue::Number(lng),
                FieldValue::Text(name),
            ] => Some(Self { lat, lng, name }),
            _ => None,
        }
    }
}

const LAT_COLUMN: &str = "Zeměpisná šířka";
const LNG_COLUMN: &str = "Zeměpisná délka";
const NAME_COLUMN: &str = "Název";

impl Pipeline for StreetLights {
    const NAME: &'static str = "streetlights";
    const INPUT_FILE: &'static str = "svetelnamista.xlsx";
    const OUTPUT_FILE: &'static str = "streetlights.json";
    const HAS_HEADER: bool = true;

    type Record = StreetLight;
    type Document = Vec<StreetLight>;

    fn selection() -> Selection {
        Selection::named_columns(0, &[LAT_COLUMN, LNG_COLUMN, NAME_COLUMN])
    }

    fn format() -> OutputFormat {
        OutputFormat::Json
    }

    fn document(records: &[StreetLight]) -> Vec<StreetLight> {
        records.to_vec()
    }

    fn highlights(records: &[StreetLight]) -> Vec<String> {
        let mut lines = vec![format!("Converted {} street lights", records.len())];
        if let Some(first) = records.first() {
            lines.push(format!(
                "Sample: {} at ({}, {})",
                first.name, first.lat, first.lng
            ));
        }
        lines
    }
}
