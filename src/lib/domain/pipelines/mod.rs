pub mod crime;
pub mod districts;
pub mod streetlights;

pub use crime::{CrimeColumns, CrimeRates, CrimeRecord};
pub use districts::{DistrictColumns, DistrictStats, DistrictStatistics};
pub use streetlights::{StreetLight, StreetLights};

use crate::{
    domain::{
        extract::{Selection, extract},
        models::Grid,
        normalize::{
            DroppedRow, Normalized, RowErrorPolicy, RowFailure, TabularRecord, normalize_rows,
        },
    },
    error::PipelineError,
    outbound::file::{OutputFormat, render_document},
};
use serde::Serialize;
use std::fmt;

/// One spreadsheet-to-asset conversion: where its data sits in the input
/// grid, what records it yields and how they are written out.
pub trait Pipeline {
    const NAME: &'static str;
    const INPUT_FILE: &'static str;
    const OUTPUT_FILE: &'static str;
    const HAS_HEADER: bool;

    type Record: TabularRecord;
    type Document: Serialize;

    fn selection() -> Selection;
    fn format() -> OutputFormat;

    fn order(records: Vec<Self::Record>) -> Vec<Self::Record> {
        records
    }

    fn document(records: &[Self::Record]) -> Self::Document;

    /// Console lines describing the result; never fails on short datasets.
    fn highlights(records: &[Self::Record]) -> Vec<String>;
}

#[derive(Debug)]
pub struct Prepared<R> {
    pub records: Vec<R>,
    pub dropped: Vec<DroppedRow>,
    pub failed: Vec<RowFailure>,
    pub contents: String,
}

/// Extract, normalize, order and render, without touching the filesystem.
pub fn prepare<P: Pipeline>(
    grid: &Grid,
    policy: RowErrorPolicy,
) -> Result<Prepared<P::Record>, PipelineError> {
    let rows = extract(grid, &P::selection())?;
    let Normalized {
        records,
        dropped,
        failed,
    } = normalize_rows::<P::Record>(&rows, policy)?;
    let records = P::order(records);
    let contents = render_document(&P::document(&records), &P::format())?;
    Ok(Prepared {
        records,
        dropped,
        failed,
        contents,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    Crime,
    Streetlights,
    Districts,
}

impl PipelineKind {
    pub const ALL: [PipelineKind; 3] = [
        PipelineKind::Crime,
        PipelineKind::Streetlights,
        PipelineKind::Districts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PipelineKind::Crime => CrimeRates::NAME,
            PipelineKind::Streetlights => StreetLights::NAME,
            PipelineKind::Districts => DistrictStatistics::NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
