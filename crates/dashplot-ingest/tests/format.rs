// File: crates/dashplot-ingest/tests/format.rs
// Purpose: Format inference from MIME types, extensions, names, and ping-log sniffing.

use dashplot_ingest::format::{preview, route_file};
use dashplot_ingest::{looks_like_ping_log, DataFormat, IngestError};

#[test]
fn mime_types() {
    assert_eq!(DataFormat::from_mime("application/json"), DataFormat::Json);
    assert_eq!(DataFormat::from_mime("text/tab-separated-values; tsv"), DataFormat::Tsv);
    assert_eq!(DataFormat::from_mime("TEXT/TSV"), DataFormat::Tsv);
    assert_eq!(DataFormat::from_mime("text/csv"), DataFormat::Csv);
    assert_eq!(DataFormat::from_mime(""), DataFormat::Csv);
}

#[test]
fn extensions() {
    assert_eq!(DataFormat::from_extension("JSON"), DataFormat::Json);
    assert_eq!(DataFormat::from_extension("tsv"), DataFormat::Tsv);
    assert_eq!(DataFormat::from_extension("txt"), DataFormat::Csv);
    assert_eq!("ping".parse::<DataFormat>(), Ok(DataFormat::PingLog));
    assert_eq!(DataFormat::Tsv.delimiter(), Some('\t'));
    assert_eq!(DataFormat::Json.delimiter(), None);
}

#[test]
fn ping_sniffing_needs_two_samples_and_a_real_time() {
    assert!(looks_like_ping_log("header\n10:00:01 gw:12 dns:30\n"));
    assert!(!looks_like_ping_log("10:00:01 gw:12\n"));
    assert!(!looks_like_ping_log("99:99:99 gw:12 dns:30\n"));
    assert!(!looks_like_ping_log("just some notes"));
    assert!(looks_like_ping_log("10:00:01 a:5.5 b:10\n"));
}

#[test]
fn routing_by_name() {
    assert_eq!(route_file("data.JSON", "").ok(), Some(DataFormat::Json));
    assert_eq!(route_file("data.tsv", "").ok(), Some(DataFormat::Tsv));
    assert_eq!(route_file("data.csv", "").ok(), Some(DataFormat::Csv));
    assert_eq!(route_file("data.dat", "").ok(), Some(DataFormat::Csv));
    assert_eq!(route_file("ping.txt", "12:00:00 a:1 b:2").ok(), Some(DataFormat::PingLog));
}

#[test]
fn plain_text_files_carry_a_preview() {
    let text: String = (1..=15).map(|i| format!("line {i}\n")).collect();
    match route_file("notes.txt", &text) {
        Err(IngestError::UnrecognizedText { preview: p }) => {
            assert_eq!(p.lines().count(), 10);
            assert!(p.starts_with("line 1\n"));
            assert!(p.ends_with("line 10"));
        }
        other => panic!("expected unrecognized text, got {other:?}"),
    }
    assert_eq!(preview("a\r\nb"), "a\nb");
}
