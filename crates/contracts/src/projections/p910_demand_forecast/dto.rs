use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Single row of the demand forecast series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Forecast date (`ds`)
    pub timestamp: NaiveDate,
    /// Predicted demand (`yhat`)
    pub predicted_demand: f64,
    /// Reorder point for this row (`Reorder_Point`)
    pub reorder_threshold: f64,
}

impl ForecastRow {
    /// A row breaches when predicted demand is strictly above its reorder point.
    pub fn is_breach(&self) -> bool {
        self.predicted_demand > self.reorder_threshold
    }
}
