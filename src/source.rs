use crate::error::Result;
use crate::types::SourceRow;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

/// A data row together with its 1-based position after the header block
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRow {
    pub index: usize,
    pub cells: SourceRow,
}

/// Reads the spreadsheet export. Rows may have any length; cells are kept untrimmed.
pub struct SheetReader {
    delimiter: u8,
    header_rows: usize,
}

impl SheetReader {
    pub fn new(delimiter: u8, header_rows: usize) -> Self {
        Self {
            delimiter,
            header_rows,
        }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_path(&self, path: &Path) -> Result<Vec<IndexedRow>> {
        let file = std::fs::File::open(path)?;
        let rows = self.read_from(file)?;
        info!("Read {} data rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<IndexedRow>> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (position, result) in csv_reader.records().enumerate() {
            let record = result?;
            if position < self.header_rows {
                debug!("Skipping header record {}", position + 1);
                continue;
            }
            rows.push(IndexedRow {
                index: position - self.header_rows + 1,
                cells: to_cells(&record),
            });
        }
        Ok(rows)
    }
}

fn to_cells(record: &StringRecord) -> SourceRow {
    record.iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXPORT: &str = "\
AUDITORIA MAESTRA OTAS,,,
Generated,2026-01-10,,
ID,Activity,Supplier,Location
T1,Holbox Tour,Holbox Adventures,Holbox
T2,\"Cenote, Swim\"
,Missing id,Someone,Nowhere,extra,cells
";

    #[test]
    fn test_skips_three_header_records() {
        let rows = SheetReader::new(b',', 3).read_from(EXPORT.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].cells[0], "T1");
        assert_eq!(rows[2].index, 3);
    }

    #[test]
    fn test_flexible_row_lengths_and_quoting() {
        let rows = SheetReader::new(b',', 3).read_from(EXPORT.as_bytes()).unwrap();
        assert_eq!(rows[1].cells, vec!["T2", "Cenote, Swim"]);
        assert_eq!(rows[2].cells.len(), 6);
        assert_eq!(rows[2].cells[0], "");
    }

    #[test]
    fn test_quoted_multiline_cell_stays_in_one_record() {
        let data = "h1\nh2\nh3\nT1,x,\"a.jpg,\nb.jpg\"\n";
        let rows = SheetReader::new(b',', 3).read_from(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[2], "a.jpg,\nb.jpg");
    }

    #[test]
    fn test_fewer_records_than_header_block() {
        let rows = SheetReader::new(b',', 3).read_from("only,one\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_semicolon_delimiter() {
        let data = "a\nb\nc\nT9;Name;Prov\n";
        let rows = SheetReader::new(b';', 3).read_from(data.as_bytes()).unwrap();
        assert_eq!(rows[0].cells, vec!["T9", "Name", "Prov"]);
    }

    #[test]
    fn test_read_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        let rows = SheetReader::new(b',', 3).read_path(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SheetReader::new(b',', 3)
            .read_path(&dir.path().join("missing.csv"))
            .is_err());
    }
}
