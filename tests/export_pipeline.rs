use plzen_data_export::{
    domain::{
        export::{RunOptions, export_grid},
        normalize::RowErrorPolicy,
        pipelines::{
            CrimeColumns, CrimeRates, DistrictColumns, DistrictStatistics, Pipeline, prepare,
        },
    },
    inbound::file::Reader,
    outbound::file::parse_document,
};
use std::path::{Path, PathBuf};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// 53 rows, 17 columns; district names in column 15, rates in column 16.
fn crime_csv(values: &[(usize, &str, &str)]) -> String {
    let mut lines = Vec::new();
    for row in 0..53 {
        let mut cells = vec![String::new(); 17];
        if row == 0 {
            cells[0] = "Trestná činnost v Plzni".to_string();
        }
        if let Some((_, district, value)) = values.iter().find(|(r, _, _)| *r == row) {
            cells[15] = district.to_string();
            cells[16] = format!("\"{}\"", value);
        }
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

#[test]
fn crime_csv_to_script_asset() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_file(
        dir.path(),
        "trestnciciny.csv",
        &crime_csv(&[(44, "Lochotín", "5,2"), (45, "Slovany", "7,8")]),
    );
    let grid = Reader::load_grid(&input, CrimeRates::HAS_HEADER).expect("load csv");
    let output = dir.path().join("web").join(CrimeRates::OUTPUT_FILE);

    let summary =
        export_grid::<CrimeRates>(&grid, &output, &RunOptions::default()).expect("export");
    assert_eq!(summary.records, 2);
    assert_eq!(summary.records + summary.dropped, 9);

    let written = std::fs::read_to_string(&output).expect("read output");
    assert!(written.starts_with("const CRIME_DATA = "));
    assert!(written.ends_with(';'));
    let columns: CrimeColumns =
        serde_json::from_value(parse_document(&written, &CrimeRates::format()).expect("parse"))
            .expect("columns");
    assert_eq!(columns.districts, vec!["Slovany", "Lochotín"]);
    assert_eq!(columns.per_capita, vec![7.8, 5.2]);
}

#[test]
fn crime_rates_round_to_four_places() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_file(
        dir.path(),
        "trestnciciny.csv",
        &crime_csv(&[
            (44, "Bory", "0,0312549"),
            (48, "Doubravka", "1,2345"),
            (52, "Lobzy", "0,0312549"),
        ]),
    );
    let grid = Reader::load_grid(&input, false).expect("load csv");
    let prepared = prepare::<CrimeRates>(&grid, RowErrorPolicy::FailFast).expect("prepare");
    let columns: CrimeColumns = serde_json::from_value(
        parse_document(&prepared.contents, &CrimeRates::format()).expect("parse"),
    )
    .expect("columns");

    assert_eq!(columns.districts, vec!["Doubravka", "Bory", "Lobzy"]);
    assert_eq!(columns.per_capita, vec![1.2345, 0.0313, 0.0313]);
    for (i, record) in prepared.records.iter().enumerate() {
        assert!((columns.per_capita[i] - record.per_capita).abs() <= 0.00005);
    }
}

#[test]
fn districts_csv_with_unit_row() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_file(
        dir.path(),
        "svitidelplzen.csv",
        "Obvod,Svítidla,Rozloha,Hustota\n\
         ,ks,km²,ks/km²\n\
         Plzeň 1,6120,\"35,69\",171\n\
         Plzeň 2-Slovany,4810,\"22,48\",214\n\
         ,,,\n\
         Plzeň 3,7350,\"26,79\",274\n",
    );
    let grid = Reader::load_grid(&input, DistrictStatistics::HAS_HEADER).expect("load csv");
    let prepared =
        prepare::<DistrictStatistics>(&grid, RowErrorPolicy::FailFast).expect("prepare");
    assert_eq!(prepared.dropped.len(), 1);

    let columns: DistrictColumns = serde_json::from_value(
        parse_document(&prepared.contents, &DistrictStatistics::format()).expect("parse"),
    )
    .expect("columns");
    assert_eq!(columns.labels, vec!["Plzeň 1", "Plzeň 2-Slovany", "Plzeň 3"]);
    assert_eq!(columns.lights, vec![6120, 4810, 7350]);
    assert_eq!(columns.area, vec![35.69, 22.48, 26.79]);
    assert_eq!(columns.density, vec![171, 214, 274]);
}
