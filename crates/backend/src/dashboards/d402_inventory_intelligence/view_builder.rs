use contracts::dashboards::d402_inventory_intelligence::{
    AlertRow, DerivedViews, ForecastChartData, ForecastPoint, LiftMatrix,
};
use contracts::projections::p910_demand_forecast::ForecastRow;
use contracts::projections::p912_store_sales::SalesRecord;
use contracts::shared::pivot::AggregateFunction;

use super::filter_engine::{FilteredAssociations, FilteredForecast};
use crate::shared::pivot::MatrixBuilder;

/// Build all four artifacts from one filtered snapshot.
///
/// Each artifact depends only on the inputs, so an empty filter result
/// simply yields empty artifacts.
pub fn build(
    forecast: &FilteredForecast<'_>,
    associations: &FilteredAssociations<'_>,
    sales: &[SalesRecord],
    lift_aggregate: AggregateFunction,
) -> DerivedViews {
    DerivedViews {
        forecast_chart_data: forecast_chart_data(forecast),
        lift_matrix: lift_matrix(associations, lift_aggregate),
        driver_scatter_data: driver_scatter_data(sales),
        alert_rows: alert_rows(forecast),
    }
}

/// Stable sort by timestamp
fn ordered_rows<'a>(forecast: &FilteredForecast<'a>) -> Vec<&'a ForecastRow> {
    let mut rows = forecast.rows.clone();
    rows.sort_by_key(|row| row.timestamp);
    rows
}

/// Forecast line with the mean reorder point of the same rows as overlay
pub fn forecast_chart_data(forecast: &FilteredForecast<'_>) -> ForecastChartData {
    let points = ordered_rows(forecast)
        .into_iter()
        .map(|row| ForecastPoint {
            timestamp: row.timestamp,
            predicted_demand: row.predicted_demand,
        })
        .collect();

    let threshold_overlay = if forecast.rows.is_empty() {
        None
    } else {
        let total: f64 = forecast.rows.iter().map(|row| row.reorder_threshold).sum();
        Some(total / forecast.rows.len() as f64)
    };

    ForecastChartData {
        points,
        threshold_overlay,
    }
}

/// Antecedent × consequent pivot of lift; absent pairs stay `None`
pub fn lift_matrix(
    associations: &FilteredAssociations<'_>,
    aggregate: AggregateFunction,
) -> LiftMatrix {
    let mut builder = MatrixBuilder::new(aggregate);
    for rule in &associations.rules {
        builder.push(rule.antecedent.clone(), rule.consequent.clone(), rule.lift);
    }
    builder.build()
}

/// The whole sales table; the driver view ignores the filter
pub fn driver_scatter_data(sales: &[SalesRecord]) -> Vec<SalesRecord> {
    sales.to_vec()
}

/// Breach rows, oldest first
pub fn alert_rows(forecast: &FilteredForecast<'_>) -> Vec<AlertRow> {
    ordered_rows(forecast)
        .into_iter()
        .filter(|row| row.is_breach())
        .map(AlertRow::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::projections::p911_product_associations::{AssociationRule, ProductSet};
    use contracts::shared::store::StoreId;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn forecast_row(day: u32, demand: f64, threshold: f64) -> ForecastRow {
        ForecastRow {
            timestamp: date(day),
            predicted_demand: demand,
            reorder_threshold: threshold,
        }
    }

    fn rule(antecedent: &str, consequent: &str, lift: f64) -> AssociationRule {
        AssociationRule {
            antecedent: antecedent.parse().unwrap(),
            consequent: consequent.parse().unwrap(),
            lift,
            store: StoreId(1),
        }
    }

    fn set(s: &str) -> ProductSet {
        s.parse().unwrap()
    }

    #[test]
    fn test_chart_points_sorted_with_mean_overlay() {
        let rows = vec![
            forecast_row(3, 150.0, 90.0),
            forecast_row(1, 120.0, 100.0),
            forecast_row(2, 90.0, 110.0),
        ];
        let filtered = FilteredForecast {
            rows: rows.iter().collect(),
        };

        let chart = forecast_chart_data(&filtered);
        let days: Vec<NaiveDate> = chart.points.iter().map(|p| p.timestamp).collect();
        assert_eq!(days, vec![date(1), date(2), date(3)]);
        assert_eq!(chart.threshold_overlay, Some(100.0));
    }

    #[test]
    fn test_alert_rows_only_strict_breaches() {
        let rows = vec![
            forecast_row(4, 101.0, 100.0),
            forecast_row(2, 100.0, 100.0),
            forecast_row(1, 150.0, 100.0),
            forecast_row(3, 20.0, 100.0),
        ];
        let filtered = FilteredForecast {
            rows: rows.iter().collect(),
        };

        let alerts = alert_rows(&filtered);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].timestamp, date(1));
        assert_eq!(alerts[1].timestamp, date(4));
        assert!(alerts.iter().all(|a| a.predicted_demand > a.reorder_threshold));
    }

    #[test]
    fn test_lift_matrix_pivot() {
        let rules = vec![
            rule("milk", "bread", 1.5),
            rule("bread", "milk", 1.7),
            rule("milk", "eggs", 0.9),
            rule("milk", "bread", 2.5),
        ];
        let filtered = FilteredAssociations {
            rules: rules.iter().collect(),
        };

        let matrix = lift_matrix(&filtered, AggregateFunction::Mean);
        assert_eq!(matrix.row_keys, vec![set("bread"), set("milk")]);
        assert_eq!(matrix.column_keys, vec![set("bread"), set("eggs"), set("milk")]);
        assert_eq!(matrix.get(&set("milk"), &set("bread")), Some(2.0));
        assert_eq!(matrix.get(&set("bread"), &set("milk")), Some(1.7));
        // no rule for the pair: empty, not zero
        assert_eq!(matrix.get(&set("bread"), &set("eggs")), None);
        assert_eq!(matrix.cells[0][1], None);

        let last = lift_matrix(&filtered, AggregateFunction::Last);
        assert_eq!(last.get(&set("milk"), &set("bread")), Some(2.5));
    }

    #[test]
    fn test_empty_inputs_give_empty_artifacts() {
        let views = build(
            &FilteredForecast::default(),
            &FilteredAssociations::default(),
            &[],
            AggregateFunction::Mean,
        );
        assert!(views.forecast_chart_data.points.is_empty());
        assert_eq!(views.forecast_chart_data.threshold_overlay, None);
        assert!(views.lift_matrix.is_empty());
        assert!(views.driver_scatter_data.is_empty());
        assert!(views.alert_rows.is_empty());
    }
}
