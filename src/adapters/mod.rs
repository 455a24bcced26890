// Adapters layer: concrete implementations for external systems (spreadsheet, GitHub, CSV, files).

pub mod csv_report;
pub mod github;
pub mod spreadsheet;
pub mod storage;
