//! Output formatting for the CLI.

use colored::*;
use foresight_consolidator::ConsolidationReport;
use foresight_extractor::BatchReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format an extraction run: statements per file, then failures.
    pub fn batch_report(&self, report: &BatchReport) -> String {
        if report.discovered == 0 {
            return self.warning("No transcript files found.");
        }

        let mut sections = Vec::new();

        if !report.per_file.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["File", "Statements"]);
            for (file, count) in &report.per_file {
                builder.push_record([file.clone(), count.to_string()]);
            }
            sections.push(self.render(builder));
        }

        if !report.failed.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Failed file", "Reason"]);
            for (file, reason) in &report.failed {
                builder.push_record([file.as_str(), reason.as_str()]);
            }
            sections.push(self.render(builder));
        }

        let summary = if report.failed.is_empty() {
            self.success(&report.summary())
        } else {
            self.warning(&report.summary())
        };
        sections.push(summary);

        sections.join("\n")
    }

    /// Format a consolidation run.
    pub fn consolidation_report(&self, report: &ConsolidationReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Input rows", "Output rows", "Unique tickers", "Metric columns"]);
        builder.push_record([
            report.input_rows.to_string(),
            report.output_rows.to_string(),
            report.unique_tickers.to_string(),
            report.metric_columns.to_string(),
        ]);
        self.render(builder)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Hide all but the first and last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
