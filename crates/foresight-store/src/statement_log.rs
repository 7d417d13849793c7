//! Append-only statement log and its tolerant reader

use crate::rows::{
    statement_columns, StatementRow, CATEGORY_COLUMN, EXTRACTION_DATE_COLUMN, SENTENCE_COLUMN,
    SPEAKER_COLUMN,
};
use crate::StoreError;
use encoding_rs::{Encoding, GBK, WINDOWS_1252};
use foresight_domain::{FinancialMetric, MetricValues, TranscriptMetadata};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Handle to the statement CSV shared by a whole batch
///
/// The file only ever grows: rows are appended, never rewritten.
#[derive(Debug, Clone)]
pub struct StatementLog {
    path: PathBuf,
}

impl StatementLog {
    /// Create a handle; the file is created lazily on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append rows, writing the header first if the file is new or empty
    ///
    /// A final line left unterminated by an interrupted write is closed off
    /// first, so new rows always start on a line of their own.
    ///
    /// Returns the number of rows written.
    pub fn append(&self, rows: &[StatementRow]) -> Result<usize, StoreError> {
        let needs_header = fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);
        let needs_terminator = !needs_header && !ends_with_newline(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if needs_terminator {
            warn!("{} ends mid-line; terminating it before appending", self.path.display());
            file.write_all(b"\n")?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(statement_columns())?;
        }
        for row in rows {
            writer.write_record(row.to_record())?;
        }
        writer.flush()?;

        debug!("Appended {} rows to {}", rows.len(), self.path.display());
        Ok(rows.len())
    }
}

fn ends_with_newline(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Read every row of a statement log
///
/// The file is decoded as UTF-8, then GBK, then Windows-1252; the first
/// encoding that decodes the whole file wins. Columns are matched by header
/// name, missing columns read as empty, and short trailing records are kept.
pub fn read_statement_rows(path: impl AsRef<Path>) -> Result<Vec<StatementRow>, StoreError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let text = decode(&bytes).ok_or_else(|| StoreError::Encoding(path.display().to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let index: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim(), i))
        .collect();

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() < headers.len() {
            warn!(
                "Record {} in {} has {} of {} fields; reading what is present",
                line + 1,
                path.display(),
                record.len(),
                headers.len()
            );
        }

        let field = |name: &str| -> String {
            index
                .get(name)
                .and_then(|&i| record.get(i))
                .unwrap_or("")
                .to_string()
        };

        let values: MetricValues = FinancialMetric::ALL
            .iter()
            .map(|metric| (*metric, field(metric.as_str())))
            .collect();

        rows.push(StatementRow {
            metadata: TranscriptMetadata {
                year: field("year"),
                month: field("month"),
                day: field("day"),
                ticker: field("ticker"),
                exchange: field("exchange"),
                filename: field("filename"),
            },
            financial_category: field(CATEGORY_COLUMN),
            sentence: field(SENTENCE_COLUMN),
            values,
            speaker: field(SPEAKER_COLUMN),
            extraction_date: field(EXTRACTION_DATE_COLUMN),
        });
    }

    debug!("Read {} statement rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn decode(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_string());
    }

    let fallbacks: [&'static Encoding; 2] = [GBK, WINDOWS_1252];
    for encoding in fallbacks {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            warn!("Statement file is not UTF-8; decoded as {}", encoding.name());
            return Some(text.into_owned());
        }
    }
    None
}
