use crate::domain::model::RepoReport;
use crate::utils::error::Result;

pub const COLUMNS: [&str; 5] = [
    "repo",
    "num_prs",
    "avg_close_time_hours",
    "num_open_prs",
    "avg_age_open_prs_hours",
];

/// Renders reports as CSV: header row, then one row per report in order.
///
/// Absent means become empty cells. The header is written even for an empty batch.
pub fn render<'a, I>(reports: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a RepoReport>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for report in reports {
        writer.serialize(report)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}
