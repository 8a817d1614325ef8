use contracts::dashboards::d402_inventory_intelligence::KpiSummary;
use contracts::projections::p910_demand_forecast::ForecastRow;
use contracts::projections::p911_product_associations::AssociationRule;
use contracts::projections::p912_store_sales::SalesRecord;
use std::collections::HashSet;

/// Summary scalars over the full, unfiltered tables.
///
/// Computed once after load; filter changes never touch it.
pub fn aggregate(
    forecast: &[ForecastRow],
    associations: &[AssociationRule],
    sales: &[SalesRecord],
) -> KpiSummary {
    let total_forecast_volume = forecast.iter().map(|r| r.predicted_demand).sum();

    let mean_lift = if associations.is_empty() {
        None
    } else {
        let total: f64 = associations.iter().map(|r| r.lift).sum();
        Some(total / associations.len() as f64)
    };

    let breach_count = forecast.iter().filter(|r| r.is_breach()).count();
    let store_count = sales.iter().map(|r| r.store).collect::<HashSet<_>>().len();

    KpiSummary {
        total_forecast_volume,
        mean_lift,
        breach_count,
        store_count,
    }
}
