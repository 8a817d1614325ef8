use contracts::projections::p912_store_sales::SalesRecord;
use std::io::Read;
use std::path::Path;

use crate::shared::data::csv_source;
use crate::shared::data::LoadError;

pub const DATASET: &str = "sales";

const STORE: &str = "Store";
const DATE: &str = "Date";
const WEEKLY_SALES: &str = "Weekly_Sales";
const UNEMPLOYMENT: &str = "Unemployment";
const FUEL_PRICE: &str = "Fuel_Price";
const TEMPERATURE: &str = "Temperature";
const HOLIDAY_FLAG: &str = "Holiday_Flag";

/// Parse weekly store sales with their drivers. Dates are day-first.
pub fn read_sales<R: Read>(input: R, date_format: &str) -> Result<Vec<SalesRecord>, LoadError> {
    csv_source::read_rows(
        DATASET,
        input,
        &[
            STORE,
            DATE,
            WEEKLY_SALES,
            UNEMPLOYMENT,
            FUEL_PRICE,
            TEMPERATURE,
            HOLIDAY_FLAG,
        ],
        |fields| {
            Ok(SalesRecord {
                store: fields.store_id(STORE)?,
                date: fields.date(DATE, date_format)?,
                weekly_sales: fields.number(WEEKLY_SALES)?,
                unemployment: fields.number(UNEMPLOYMENT)?,
                fuel_price: fields.number(FUEL_PRICE)?,
                temperature: fields.number(TEMPERATURE)?,
                holiday_flag: fields.flag(HOLIDAY_FLAG)?,
            })
        },
    )
}

pub fn load_sales(path: &Path, date_format: &str) -> Result<Vec<SalesRecord>, LoadError> {
    let file = csv_source::open(DATASET, path)?;
    let records = read_sales(file, date_format)?;
    tracing::info!(
        "Loaded {} sales records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::shared::store::StoreId;

    const HEADER: &str =
        "Store,Date,Weekly_Sales,Holiday_Flag,Temperature,Fuel_Price,CPI,Unemployment\n";

    #[test]
    fn test_read_walmart_rows() {
        let text = format!(
            "{HEADER}1,05-02-2010,1643690.9,0,42.31,2.572,211.0963582,8.106\n\
             1,12-02-2010,1641957.44,1,38.51,2.548,211.2421698,8.106\n"
        );
        let records = read_sales(text.as_bytes(), "%d-%m-%Y").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].store, StoreId(1));
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2010, 2, 5).unwrap());
        assert!(!records[0].holiday_flag);
        assert!(records[1].holiday_flag);
        assert_eq!(records[1].unemployment, 8.106);
    }

    #[test]
    fn test_iso_date_is_rejected_for_day_first_source() {
        let text = format!("{HEADER}1,2010-02-05,1.0,0,1.0,1.0,1.0,1.0\n");
        let err = read_sales(text.as_bytes(), "%d-%m-%Y").unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { column: "Date", .. }));
    }

    #[test]
    fn test_bad_holiday_flag_is_rejected() {
        let text = format!("{HEADER}1,05-02-2010,1.0,2,1.0,1.0,1.0,1.0\n");
        let err = read_sales(text.as_bytes(), "%d-%m-%Y").unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { column: "Holiday_Flag", .. }));
    }
}
