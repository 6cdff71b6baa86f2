//! Generic CSV writer for [`Exportable`] rows.
//!
//! The header comes from the row type's column table and every record is
//! rendered cell by cell in the same order, so one writer serves any row
//! type.

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::report::Exportable;

/// Write `rows` to `path` as CSV, replacing any existing file.
///
/// Parent directories are created as needed. The data is flushed and
/// synced to disk before this returns. An empty slice produces a
/// header-only file.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns [`ReportError::Filesystem`] if the directory or file cannot be
/// created, or if any write, flush or sync fails.
pub fn write_csv<T: Exportable>(path: &Path, rows: &[T]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::filesystem(parent, e))?;
    }

    let file = File::create(path).map_err(|e| ReportError::filesystem(path, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(T::headers())
        .map_err(|e| ReportError::filesystem(path, e))?;
    for row in rows {
        writer
            .write_record(row.cells().map(Cow::into_owned))
            .map_err(|e| ReportError::filesystem(path, e))?;
    }

    // `into_inner` flushes the buffer and reports any deferred write error.
    let flushed = writer
        .into_inner()
        .map_err(|e| ReportError::filesystem(path, e.into_error()))?;
    flushed.sync_all().map_err(|e| ReportError::filesystem(path, e))?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "csv written");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Cell, Column, ReportRow};

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn writes_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.csv");
        let rows = vec![
            ReportRow {
                transaction_hash: "0x1".to_owned(),
                asset_symbol_name: "USDC USD Coin".to_owned(),
                ..ReportRow::default()
            },
            ReportRow {
                transaction_hash: "0x2".to_owned(),
                asset_symbol_name: "Odd, \"quoted\" token".to_owned(),
                ..ReportRow::default()
            },
        ];

        let written = write_csv(&path, &rows).unwrap();
        assert_eq!(written, 2, "row count");

        let text = read(&path);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3, "header + two rows");
        assert_eq!(
            lines[0],
            "Transaction Hash,Date Time,From Address,To Address,Transaction Type,\
             Asset Contract Address,Asset Symbol/Name,Token ID,Value Amount,Gas Fee (ETH)",
            "header"
        );
        assert_eq!(lines[1], "0x1,,,,,,USDC USD Coin,,,", "plain row");
        assert_eq!(
            lines[2], r#"0x2,,,,,,"Odd, ""quoted"" token",,,"#,
            "fields with commas and quotes are escaped"
        );
    }

    #[test]
    fn truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale content that is much longer than the new file\n".repeat(50))
            .unwrap();

        write_csv::<ReportRow>(&path, &[]).unwrap();

        let text = read(&path);
        assert_eq!(text.lines().count(), 1, "header only");
        assert!(text.starts_with("Transaction Hash,"), "fresh header");
    }

    struct Sample {
        label: &'static str,
        count: i64,
        ratio: f64,
        ok: bool,
        note: Option<&'static str>,
    }

    impl Exportable for Sample {
        const COLUMNS: &'static [Column<Self>] = &[
            Column {
                name: "label",
                value: |s| Cell::Text(s.label),
            },
            Column {
                name: "count",
                value: |s| Cell::Int(s.count),
            },
            Column {
                name: "ratio",
                value: |s| Cell::Decimal(s.ratio),
            },
            Column {
                name: "ok",
                value: |s| Cell::Bool(s.ok),
            },
            Column {
                name: "note",
                value: |s| Cell::from(s.note),
            },
        ];
    }

    #[test]
    fn serializes_any_exportable_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        let rows = [
            Sample {
                label: "a",
                count: -3,
                ratio: 12_500_000_000_000_000_000_000.0,
                ok: true,
                note: None,
            },
            Sample {
                label: "b",
                count: 7,
                ratio: 0.25,
                ok: false,
                note: Some("n"),
            },
        ];

        write_csv(&path, &rows).unwrap();

        assert_eq!(
            read(&path),
            "label,count,ratio,ok,note\n\
             a,-3,12500000000000000000000,true,\n\
             b,7,0.25,false,n\n",
            "typed cells"
        );
    }

    #[test]
    fn unwritable_target_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_csv::<ReportRow>(&blocker.join("out.csv"), &[]).unwrap_err();
        assert!(matches!(err, ReportError::Filesystem { .. }), "got {err:?}");
    }
}
