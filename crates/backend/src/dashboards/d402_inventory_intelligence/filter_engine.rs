use contracts::dashboards::d402_inventory_intelligence::FilterState;
use contracts::projections::p910_demand_forecast::ForecastRow;
use contracts::projections::p911_product_associations::AssociationRule;
use contracts::projections::p912_store_sales::SalesRecord;
use contracts::shared::store::StoreOption;
use std::collections::BTreeSet;

/// Forecast rows inside the selected date range, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredForecast<'a> {
    pub rows: Vec<&'a ForecastRow>,
}

/// Association rules of the selected stores, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredAssociations<'a> {
    pub rules: Vec<&'a AssociationRule>,
}

/// Narrow the base tables to the filter state.
///
/// Pure: the same state over the same tables always gives the same rows.
pub fn apply<'a>(
    filter: &FilterState,
    forecast: &'a [ForecastRow],
    associations: &'a [AssociationRule],
) -> (FilteredForecast<'a>, FilteredAssociations<'a>) {
    (
        filter_forecast(filter, forecast),
        filter_associations(filter, associations),
    )
}

/// Rows with `start <= timestamp <= end`; nothing for an inverted range
pub fn filter_forecast<'a>(filter: &FilterState, forecast: &'a [ForecastRow]) -> FilteredForecast<'a> {
    let range = filter.date_range;
    if range.is_empty() {
        return FilteredForecast::default();
    }
    FilteredForecast {
        rows: forecast
            .iter()
            .filter(|row| range.contains(row.timestamp))
            .collect(),
    }
}

/// Rules whose store is selected; an empty selection selects nothing
pub fn filter_associations<'a>(
    filter: &FilterState,
    associations: &'a [AssociationRule],
) -> FilteredAssociations<'a> {
    FilteredAssociations {
        rules: associations
            .iter()
            .filter(|rule| filter.selected_stores.contains(&rule.store))
            .collect(),
    }
}

/// Options for the store selector: distinct stores of the sales table
pub fn store_options(sales: &[SalesRecord]) -> Vec<StoreOption> {
    sales
        .iter()
        .map(|r| r.store)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(StoreOption::from)
        .collect()
}
