//! Writing risk tables

use std::path::Path;

use crate::error::Result;
use crate::models::RiskTable;
use crate::utils::io::write_record_batches;

/// Write a risk table to Parquet, one row per cause in ranking order
pub fn write_risk_table_parquet(path: &Path, table: &RiskTable) -> Result<()> {
    let batch = table.to_record_batch()?;
    write_record_batches(path, &[batch])
}

/// Write a risk table as pretty-printed JSON
pub fn write_risk_table_json(path: &Path, table: &RiskTable) -> Result<()> {
    std::fs::write(path, table.to_json()?)?;
    log::info!("Wrote {} causes to {}", table.len(), path.display());
    Ok(())
}
