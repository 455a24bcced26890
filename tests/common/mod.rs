#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const ODS_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

const ODS_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2"><manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/><manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/></manifest:manifest>"#;

/// Writes a one-sheet OpenDocument spreadsheet. `None` leaves the cell empty.
pub fn write_ods(path: &Path, first_column: &[Option<&str>]) {
    let rows: String = first_column
        .iter()
        .map(|cell| match cell {
            Some(value) => format!(
                "<table:table-row><table:table-cell office:value-type=\"string\"><text:p>{}</text:p></table:table-cell><table:table-cell office:value-type=\"string\"><text:p>notes</text:p></table:table-cell></table:table-row>",
                escape(value)
            ),
            None => "<table:table-row><table:table-cell/><table:table-cell office:value-type=\"string\"><text:p>notes</text:p></table:table-cell></table:table-row>".to_string(),
        })
        .collect();

    write_ods_content(path, &format!("<table:table table:name=\"Repos\">{}</table:table>", rows));
}

/// Writes an OpenDocument spreadsheet without any sheet.
pub fn write_ods_without_sheets(path: &Path) {
    write_ods_content(path, "");
}

fn write_ods_content(path: &Path, tables: &str) {
    let content = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" office:version="1.2"><office:body><office:spreadsheet>{}</office:spreadsheet></office:body></office:document-content>"#,
        tables
    );

    let mut zip = ZipWriter::new(File::create(path).unwrap());
    zip.start_file(
        "mimetype",
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
    )
    .unwrap();
    zip.write_all(ODS_MIMETYPE.as_bytes()).unwrap();
    zip.start_file("META-INF/manifest.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(ODS_MANIFEST.as_bytes()).unwrap();
    zip.start_file("content.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(content.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// A pull request object shaped like the GitHub pulls listing.
pub fn pull_request(
    login: &str,
    kind: &str,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
) -> Value {
    json!({
        "number": 1,
        "state": if closed_at.is_some() { "closed" } else { "open" },
        "title": "Update dependencies",
        "user": { "login": login, "type": kind },
        "created_at": timestamp(created_at),
        "updated_at": timestamp(created_at),
        "closed_at": closed_at.map(timestamp),
    })
}

pub fn human(created_at: DateTime<Utc>, closed_at: Option<DateTime<Utc>>) -> Value {
    pull_request("octocat", "User", created_at, closed_at)
}

pub fn dependabot(created_at: DateTime<Utc>) -> Value {
    pull_request("dependabot[bot]", "Bot", created_at, None)
}
