//! Row types and their CSV column layout

use foresight_domain::{
    ConsolidationKey, FinancialMetric, ForwardLookingStatement, MetricValues, TranscriptMetadata,
};

/// Metadata columns shared by both CSV files, in output order
pub const METADATA_COLUMNS: [&str; 6] = ["year", "month", "day", "ticker", "exchange", "filename"];

/// Column holding the statement's metric category
pub const CATEGORY_COLUMN: &str = "financial_category";

/// Column holding the verbatim sentence
pub const SENTENCE_COLUMN: &str = "forward_looking_sentence";

/// Column holding the speaker
pub const SPEAKER_COLUMN: &str = "speaker";

/// Column holding the extraction timestamp
pub const EXTRACTION_DATE_COLUMN: &str = "extraction_date";

/// Full header of the statement log
pub fn statement_columns() -> Vec<&'static str> {
    let mut columns = METADATA_COLUMNS.to_vec();
    columns.push(CATEGORY_COLUMN);
    columns.push(SENTENCE_COLUMN);
    columns.extend(FinancialMetric::ALL.iter().map(FinancialMetric::as_str));
    columns.push(SPEAKER_COLUMN);
    columns.push(EXTRACTION_DATE_COLUMN);
    columns
}

/// One line of the statement log
///
/// The category is kept as text so that rows written by other tools, or with
/// categories no longer recognised, survive a read/consolidate cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementRow {
    /// Transcript metadata
    pub metadata: TranscriptMetadata,
    /// Category label
    pub financial_category: String,
    /// Verbatim sentence
    pub sentence: String,
    /// Metric values
    pub values: MetricValues,
    /// Speaker, or empty
    pub speaker: String,
    /// `%Y-%m-%d %H:%M:%S` timestamp of extraction
    pub extraction_date: String,
}

impl StatementRow {
    /// Stamp a statement with its transcript metadata and extraction time
    pub fn from_statement(
        metadata: &TranscriptMetadata,
        statement: &ForwardLookingStatement,
        extraction_date: impl Into<String>,
    ) -> Self {
        Self {
            metadata: metadata.clone(),
            financial_category: statement.category.as_str().to_string(),
            sentence: statement.sentence.clone(),
            values: statement.values.clone(),
            speaker: statement.speaker.clone(),
            extraction_date: extraction_date.into(),
        }
    }

    /// Key this row is consolidated under
    pub fn consolidation_key(&self) -> ConsolidationKey {
        self.metadata.consolidation_key()
    }

    pub(crate) fn to_record(&self) -> Vec<&str> {
        let mut record = metadata_record(&self.metadata);
        record.push(&self.financial_category);
        record.push(&self.sentence);
        record.extend(FinancialMetric::ALL.iter().map(|m| self.values.get_or_empty(*m)));
        record.push(&self.speaker);
        record.push(&self.extraction_date);
        record
    }
}

/// One company reporting event with its merged metric values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedRow {
    /// Metadata of the first statement row seen for the key
    pub metadata: TranscriptMetadata,
    /// Last non-empty value per metric
    pub values: MetricValues,
}

impl ConsolidatedRow {
    /// Start a row from base metadata
    pub fn new(metadata: TranscriptMetadata) -> Self {
        Self {
            metadata,
            values: MetricValues::new(),
        }
    }

    /// Key of this row
    pub fn key(&self) -> ConsolidationKey {
        self.metadata.consolidation_key()
    }
}

pub(crate) fn metadata_record(metadata: &TranscriptMetadata) -> Vec<&str> {
    vec![
        metadata.year.as_str(),
        metadata.month.as_str(),
        metadata.day.as_str(),
        metadata.ticker.as_str(),
        metadata.exchange.as_str(),
        metadata.filename.as_str(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_columns_layout() {
        let columns = statement_columns();
        assert_eq!(columns.len(), 6 + 2 + 15 + 2);
        assert_eq!(columns[0], "year");
        assert_eq!(columns[6], "financial_category");
        assert_eq!(columns[8], "revenue_growth");
        assert_eq!(columns[22], "dividend_yield");
        assert_eq!(columns[24], "extraction_date");
    }

    #[test]
    fn test_record_matches_columns() {
        let metadata = TranscriptMetadata {
            year: "2024".to_string(),
            month: "Mar".to_string(),
            day: "15".to_string(),
            ticker: "AAPL".to_string(),
            exchange: "NASDAQ".to_string(),
            filename: "2024-Mar-15-AAPL.NASDAQ-Transcript.txt".to_string(),
        };
        let statement =
            ForwardLookingStatement::new(FinancialMetric::GrossMargin, "Margins near 20%.")
                .with_speaker("CFO")
                .with_value(FinancialMetric::GrossMargin, "20%");

        let row = StatementRow::from_statement(&metadata, &statement, "2024-03-16 09:00:00");
        let record = row.to_record();

        assert_eq!(record.len(), statement_columns().len());
        assert_eq!(record[6], "gross_margin");
        assert_eq!(record[11], "20%");
        assert_eq!(record[8], "");
        assert_eq!(record[23], "CFO");
    }
}
