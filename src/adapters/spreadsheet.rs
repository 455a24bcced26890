use crate::domain::ports::Storage;
use crate::utils::error::{Result, TurnaroundError};
use calamine::{open_workbook_auto_from_rs, open_workbook_from_rs, Data, Range, Reader, Sheets};
use std::io::Cursor;
use std::path::Path;

/// Reads the repository URL list from the first column of a spreadsheet's first sheet.
pub struct SpreadsheetSource<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> SpreadsheetSource<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub async fn load_urls(&self, path: &str) -> Result<Vec<String>> {
        let file_format = |reason: String| TurnaroundError::FileFormat {
            path: path.to_string(),
            reason,
        };

        let bytes = self
            .storage
            .read_file(path)
            .await
            .map_err(|e| file_format(e.to_string()))?;

        let mut workbook = open_sheets(path, bytes).map_err(|e| file_format(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| file_format("document has no sheets".to_string()))?
            .map_err(|e| file_format(e.to_string()))?;

        let urls = first_column_values(&range);
        tracing::info!("Found {} repositories in {}", urls.len(), path);
        Ok(urls)
    }
}

/// Picks the reader from the file extension; unknown extensions are sniffed.
fn open_sheets(
    path: &str,
    bytes: Vec<u8>,
) -> std::result::Result<Sheets<Cursor<Vec<u8>>>, calamine::Error> {
    let cursor = Cursor::new(bytes);
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("ods") => Ok(Sheets::Ods(open_workbook_from_rs(cursor)?)),
        Some("xlsx") | Some("xlsm") => Ok(Sheets::Xlsx(open_workbook_from_rs(cursor)?)),
        Some("xls") => Ok(Sheets::Xls(open_workbook_from_rs(cursor)?)),
        _ => open_workbook_auto_from_rs(cursor),
    }
}

/// Non-empty cells of column A, top to bottom, trimmed.
pub fn first_column_values(range: &Range<Data>) -> Vec<String> {
    let (Some((start_row, _)), Some((end_row, _))) = (range.start(), range.end()) else {
        return Vec::new();
    };

    (start_row..=end_row)
        .filter_map(|row| range.get_value((row, 0)))
        .filter_map(|cell| match cell {
            Data::Empty => None,
            Data::String(value) => Some(value.trim().to_string()),
            other => Some(other.to_string().trim().to_string()),
        })
        .filter(|value| !value.is_empty())
        .collect()
}
