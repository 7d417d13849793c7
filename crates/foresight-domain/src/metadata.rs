//! Transcript metadata recovered from filenames

/// Company and reporting date for one transcript
///
/// Derived once per file and never mutated afterwards. When the filename does
/// not follow the `YYYY-MMM-DD-TICKER.EXCHANGE-...` convention every field
/// except `filename` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptMetadata {
    /// Four-digit year, or empty
    pub year: String,
    /// Three-letter month code (e.g. `Mar`), or empty
    pub month: String,
    /// Two-digit day, or empty
    pub day: String,
    /// Ticker symbol
    pub ticker: String,
    /// Uppercase exchange code
    pub exchange: String,
    /// Base name of the transcript file
    pub filename: String,
}

impl TranscriptMetadata {
    /// Metadata for a filename that could not be parsed
    pub fn unparsed(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Whether the filename matched the naming convention
    pub fn is_parsed(&self) -> bool {
        !self.year.is_empty()
    }

    /// The key rows from this transcript are consolidated under
    pub fn consolidation_key(&self) -> ConsolidationKey {
        ConsolidationKey {
            ticker: self.ticker.clone(),
            year: self.year.clone(),
            month: self.month.clone(),
            day: self.day.clone(),
            exchange: self.exchange.clone(),
        }
    }
}

/// Identity of one company reporting event
///
/// Two rows belong to the same consolidated record exactly when all five
/// components are equal. Empty components are legal and compare like any
/// other string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsolidationKey {
    /// Ticker symbol
    pub ticker: String,
    /// Year
    pub year: String,
    /// Month code
    pub month: String,
    /// Day
    pub day: String,
    /// Exchange code
    pub exchange: String,
}
