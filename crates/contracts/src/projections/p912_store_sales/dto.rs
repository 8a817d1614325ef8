use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::store::StoreId;

/// Historical weekly sales of one store with its exogenous drivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub store: StoreId,
    pub date: NaiveDate,
    pub weekly_sales: f64,
    pub unemployment: f64,
    pub fuel_price: f64,
    pub temperature: f64,
    pub holiday_flag: bool,
}
