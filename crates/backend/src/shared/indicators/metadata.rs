use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub const TOTAL_FORECAST_VOLUME: &str = "total_forecast_volume";
    pub const MEAN_LIFT: &str = "mean_lift";
    pub const BREACH_COUNT: &str = "breach_count";
    pub const STORE_COUNT: &str = "store_count";

    pub fn total_forecast_volume() -> IndicatorId {
        IndicatorId::new(TOTAL_FORECAST_VOLUME)
    }
    pub fn mean_lift() -> IndicatorId {
        IndicatorId::new(MEAN_LIFT)
    }
    pub fn breach_count() -> IndicatorId {
        IndicatorId::new(BREACH_COUNT)
    }
    pub fn store_count() -> IndicatorId {
        IndicatorId::new(STORE_COUNT)
    }
}

/// Build the catalogue of summary cards, in display order.
pub fn build_catalog() -> Vec<IndicatorMeta> {
    vec![
        IndicatorMeta {
            id: ids::total_forecast_volume(),
            label: "Total Forecast Sales".into(),
            icon: "dollar-sign".into(),
            format: ValueFormat::MoneyMillions {
                currency: "$".into(),
            },
            description: Some("Sum of predicted demand over the whole forecast horizon".into()),
        },
        IndicatorMeta {
            id: ids::mean_lift(),
            label: "Average Association Lift".into(),
            icon: "link".into(),
            format: ValueFormat::Multiplier { decimals: 2 },
            description: Some("Mean lift over all association rules".into()),
        },
        IndicatorMeta {
            id: ids::breach_count(),
            label: "Restock Alerts".into(),
            icon: "alert-triangle".into(),
            format: ValueFormat::Integer,
            description: Some("Forecast rows where demand exceeds the reorder point".into()),
        },
        IndicatorMeta {
            id: ids::store_count(),
            label: "Stores Analyzed".into(),
            icon: "store".into(),
            format: ValueFormat::Integer,
            description: None,
        },
    ]
}
