//! Workbook rendering with `rust_xlsxwriter`.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::error::ExportError;
use crate::models::ProcessedRecord;

use super::schema::{ExportSchema, RowHighlight};
use super::{DateFilter, Result, filter_records};

const HEADER_FILL: Color = Color::RGB(0xD9E1F2);
const DUPLICATE_FILL: Color = Color::RGB(0xFFC7CE);
const MISSING_FILL: Color = Color::RGB(0xFFEB9C);

/// Render records into a styled workbook and return the file bytes.
///
/// The date filter runs first; if no row survives, no workbook is
/// produced and `NoRows` is returned. Flagged rows get their fill on
/// every cell, duplicates before missing-section warnings.
pub fn write_workbook(
    schema: &ExportSchema,
    records: &[ProcessedRecord],
    filter: &DateFilter,
) -> Result<Vec<u8>> {
    let rows = filter_records(records, filter);
    if rows.is_empty() {
        return Err(ExportError::NoRows);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(schema.tool)?;

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_background_color(HEADER_FILL);
    let duplicate_format = Format::new().set_background_color(DUPLICATE_FILL);
    let missing_format = Format::new().set_background_color(MISSING_FILL);

    for (col, column) in schema.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column.header, &header_format)?;
    }

    let mut next_row: u32 = 1;
    if schema.filler_row {
        let filler_format = Format::new().set_border(FormatBorder::Thin);
        for col in 0..schema.columns.len() {
            worksheet.write_string_with_format(next_row, col as u16, "", &filler_format)?;
        }
        next_row += 1;
    }

    let counts = schema.key_counts(rows.iter().copied());
    for (offset, record) in rows.iter().enumerate() {
        let row = next_row + offset as u32;
        let fill = match schema.highlight(record, &counts) {
            RowHighlight::Duplicate => Some(&duplicate_format),
            RowHighlight::MissingSections => Some(&missing_format),
            RowHighlight::None => None,
        };
        for (col, value) in schema.project(record).into_iter().enumerate() {
            match fill {
                Some(format) => {
                    worksheet.write_string_with_format(row, col as u16, &value, format)?
                }
                None => worksheet.write_string(row, col as u16, &value)?,
            };
        }
    }

    for col in 0..schema.columns.len() {
        worksheet.set_column_width(col as u16, schema.column_width)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tools;
    use serde_json::json;
    use std::io::Read;

    fn record(name: &str) -> ProcessedRecord {
        serde_json::from_value(json!({
            "Produktname": name,
            "CAS-Nummer": "67-64-1",
            "Anzahl fehlender Abschnitte": 0,
            "created_at": "2024-05-03",
        }))
        .unwrap()
    }

    /// Row elements in the first worksheet of a saved workbook.
    fn sheet_rows(bytes: &[u8]) -> usize {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        sheet.matches("</row>").count()
    }

    #[test]
    fn test_empty_input_produces_no_workbook() {
        let schema = tools::builtin("dataprocess").unwrap();
        let err = write_workbook(&schema, &[], &DateFilter::default()).unwrap_err();
        assert!(matches!(err, ExportError::NoRows));
    }

    #[test]
    fn test_fully_filtered_input_produces_no_workbook() {
        let schema = tools::builtin("dataprocess").unwrap();
        let records = vec![record("Aceton")];
        let filter = DateFilter::new(
            "created_at",
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            None,
        );
        let err = write_workbook(&schema, &records, &filter).unwrap_err();
        assert!(matches!(err, ExportError::NoRows));
    }

    #[test]
    fn test_workbook_bytes_are_a_zip_archive() {
        let schema = tools::builtin("dataprocess").unwrap();
        let records = vec![record("Aceton"), record("Ethanol"), record("Aceton")];
        let bytes = write_workbook(&schema, &records, &DateFilter::default()).unwrap();
        assert!(bytes.len() > 1000);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_sheet_rows_are_header_filler_then_surviving_records() {
        let schema = tools::builtin("dataprocess").unwrap();
        let mut old = record("Altbestand");
        old.set("created_at", "2023-01-15");
        let records = vec![record("Aceton"), old, record("Ethanol")];
        let filter = DateFilter::new(
            "created_at",
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            None,
        );

        let bytes = write_workbook(&schema, &records, &filter).unwrap();
        // Header row, filler row, then one row per record past the filter.
        assert_eq!(sheet_rows(&bytes), 4);
    }

    #[test]
    fn test_schema_without_filler_row_renders() {
        let schema = tools::builtin("werthenbach").unwrap();
        assert!(!schema.filler_row);
        let bytes = write_workbook(&schema, &[record("Aceton")], &DateFilter::default()).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
        // Header plus the single data row; customer layouts have no filler.
        assert_eq!(sheet_rows(&bytes), 2);
    }
}
