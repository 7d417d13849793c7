//! Transcript metadata from file names

use foresight_domain::TranscriptMetadata;
use regex::Regex;
use std::sync::LazyLock;

static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})-(\w{3})-(\d{2})-(.+?)\.([A-Z]+)-").expect("valid regex")
});

/// Recover company and date from a `YYYY-MMM-DD-TICKER.EXCHANGE-...` name
///
/// The pattern may appear anywhere in the name; the first match wins. Names
/// that do not match yield metadata with only `filename` set.
///
/// ```
/// use foresight_extractor::parse_filename;
///
/// let meta = parse_filename("2024-Mar-15-AAPL.NASDAQ-Transcript.txt");
/// assert_eq!(meta.ticker, "AAPL");
/// assert_eq!(meta.exchange, "NASDAQ");
/// ```
pub fn parse_filename(filename: &str) -> TranscriptMetadata {
    let Some(caps) = FILENAME_RE.captures(filename) else {
        return TranscriptMetadata::unparsed(filename);
    };

    TranscriptMetadata {
        year: caps[1].to_string(),
        month: caps[2].to_string(),
        day: caps[3].to_string(),
        ticker: caps[4].to_string(),
        exchange: caps[5].to_string(),
        filename: filename.to_string(),
    }
}
