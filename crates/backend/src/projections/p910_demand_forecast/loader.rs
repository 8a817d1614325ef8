use contracts::projections::p910_demand_forecast::ForecastRow;
use std::io::Read;
use std::path::Path;

use crate::shared::data::csv_source;
use crate::shared::data::LoadError;

pub const DATASET: &str = "forecast";

const DS: &str = "ds";
const YHAT: &str = "yhat";
const REORDER_POINT: &str = "Reorder_Point";

/// Parse forecast rows (`ds`, `yhat`, `Reorder_Point`).
///
/// An empty series is rejected: the default date filter spans it.
pub fn read_forecast<R: Read>(input: R, date_format: &str) -> Result<Vec<ForecastRow>, LoadError> {
    let rows = csv_source::read_rows(DATASET, input, &[DS, YHAT, REORDER_POINT], |fields| {
        Ok(ForecastRow {
            timestamp: fields.date(DS, date_format)?,
            predicted_demand: fields.number(YHAT)?,
            reorder_threshold: fields.number(REORDER_POINT)?,
        })
    })?;

    if rows.is_empty() {
        return Err(LoadError::EmptySource { dataset: DATASET });
    }
    Ok(rows)
}

pub fn load_forecast(path: &Path, date_format: &str) -> Result<Vec<ForecastRow>, LoadError> {
    let file = csv_source::open(DATASET, path)?;
    let rows = read_forecast(file, date_format)?;
    tracing::info!("Loaded {} forecast rows from {}", rows.len(), path.display());
    Ok(rows)
}
