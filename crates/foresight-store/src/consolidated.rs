//! Consolidated CSV writer

use crate::rows::{metadata_record, ConsolidatedRow, METADATA_COLUMNS};
use crate::StoreError;
use foresight_domain::FinancialMetric;
use std::path::Path;
use tracing::debug;

/// Write consolidated rows, replacing any existing file
///
/// Metadata columns come first, followed by every metric populated in at
/// least one row, in canonical metric order. Metrics a row lacks are written
/// as empty cells.
pub fn write_consolidated(
    path: impl AsRef<Path>,
    rows: &[ConsolidatedRow],
) -> Result<(), StoreError> {
    let path = path.as_ref();
    let present: Vec<FinancialMetric> = FinancialMetric::ALL
        .into_iter()
        .filter(|metric| rows.iter().any(|row| row.values.contains(*metric)))
        .collect();

    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = METADATA_COLUMNS.to_vec();
    header.extend(present.iter().map(FinancialMetric::as_str));
    writer.write_record(&header)?;

    for row in rows {
        let mut record = metadata_record(&row.metadata);
        record.extend(present.iter().map(|metric| row.values.get_or_empty(*metric)));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    debug!(
        "Wrote {} consolidated rows ({} metric columns) to {}",
        rows.len(),
        present.len(),
        path.display()
    );
    Ok(())
}
