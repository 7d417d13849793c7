//! Prompt engineering for forward-looking statement extraction

use foresight_domain::{FinancialMetric, MetricUnit};
use std::fmt::Write;

/// Builds the extraction prompt for one transcript
pub struct PromptBuilder<'a> {
    transcript: &'a str,
    max_text_length: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(transcript: &'a str) -> Self {
        Self {
            transcript,
            max_text_length: usize::MAX,
        }
    }

    /// Limit how many characters of the transcript are included
    pub fn with_max_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    /// The transcript text that will be sent, cut at a character boundary
    pub fn truncated_text(&self) -> &'a str {
        match self.transcript.char_indices().nth(self.max_text_length) {
            Some((byte_index, _)) => &self.transcript[..byte_index],
            None => self.transcript,
        }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ROLE);
        prompt.push_str("\n\nTarget financial categories:\n");
        for (i, metric) in FinancialMetric::ALL.iter().enumerate() {
            let _ = writeln!(prompt, "{}. {} ({})", i + 1, metric.description(), metric);
        }

        prompt.push('\n');
        prompt.push_str(NORMALIZATION_RULES);
        prompt.push_str("\n\n");
        prompt.push_str(&response_schema());
        prompt.push_str("\n\nTranscript:\n---\n");
        prompt.push_str(self.truncated_text());
        prompt.push_str("\n---\n");

        prompt
    }
}

const ROLE: &str = "You are a financial analysis engine that extracts forward-looking \
statements from earnings call transcripts. Use US GAAP terminology.";

const NORMALIZATION_RULES: &str = r#"Rules:
1. Extract only statements about future periods. For a 2023 call, 2024 and later; never historical results.
2. Read the whole transcript before answering.
3. Every value must be a bare number:
   - Drop qualifiers such as "approximately", "about", "around", "over", "under".
   - "over X%" / "above X" and "under X%" / "below X" are recorded as X.
   - Drop currency symbols and thousands separators: "$1,000" -> "1000".
   - Expand units: "150 million" -> "150000000", "2.5 billion" -> "2500000000", "500 thousand" -> "500000".
   - Ranges become their midpoint: "2%-5%" -> "3.5%".
   - Growth or increase is positive; decline or decrease is negative: "decrease by 8%" -> "-8%", "decrease by 2%-5%" -> "-3.5%".
   - Percentage fields always keep the % sign: "28%", never "28".
   - Ratio fields are bare numbers without %: "1.5 to 1" -> "1.5".
   - If no specific number is given, leave the field empty."#;

fn unit_hint(unit: MetricUnit) -> &'static str {
    match unit {
        MetricUnit::Percentage => "number with % and correct sign",
        MetricUnit::Ratio => "bare number, no %",
        MetricUnit::Amount => "bare number, no currency symbols",
        MetricUnit::Growth => "number; include % for percentages, with correct sign",
    }
}

fn response_schema() -> String {
    let categories: Vec<&str> = FinancialMetric::ALL.iter().map(FinancialMetric::as_str).collect();

    let mut schema = String::from("Respond with JSON only, in this shape:\n{\n  \"forward_looking_statements\": [\n    {\n");
    let _ = writeln!(schema, "      \"category\": \"{}\",", categories.join("|"));
    schema.push_str("      \"sentence\": \"the complete sentence containing the projection\",\n");
    for metric in FinancialMetric::ALL {
        let _ = writeln!(schema, "      \"{}\": \"{}\",", metric, unit_hint(metric.unit()));
    }
    schema.push_str("      \"speaker\": \"speaker name if known\"\n    }\n  ]\n}");
    schema
}
