use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Dataset;

/// Write the normalized records as CSV (`year,month,variance,temperature`).
/// Months are written zero-based, as held in memory.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_records(dataset, file)
}

fn write_records<W: Write>(dataset: &Dataset, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for record in &dataset.records {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
