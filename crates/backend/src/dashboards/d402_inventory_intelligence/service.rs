use anyhow::Result;
use contracts::dashboards::d402_inventory_intelligence::{
    DerivedViews, FilterEvent, FilterEventResponse, FilterState, InitialViewResponse, KpiResponse,
    KpiSummary,
};
use contracts::shared::pivot::AggregateFunction;
use contracts::shared::store::{StoreId, StoreOption};
use once_cell::sync::OnceCell;

use super::{filter_engine, kpi_aggregator, view_builder};
use crate::shared::config::DashboardConfig;
use crate::shared::data::dataset_store::Datasets;
use crate::shared::indicators::kpi_cards;

static CONTEXT: OnceCell<DashboardContext<'static>> = OnceCell::new();

/// Dashboard settings taken from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub default_stores: Vec<StoreId>,
    pub lift_aggregate: AggregateFunction,
}

impl From<&DashboardConfig> for DashboardSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            default_stores: config.default_stores.clone(),
            lift_aggregate: config.lift_aggregate,
        }
    }
}

/// Everything fixed at startup: base tables, KPIs and the default filter
#[derive(Debug)]
pub struct DashboardContext<'a> {
    datasets: &'a Datasets,
    kpis: KpiSummary,
    store_options: Vec<StoreOption>,
    initial_filter: FilterState,
    settings: DashboardSettings,
}

impl<'a> DashboardContext<'a> {
    /// Computes the KPI summary once; fails only for an empty forecast series
    pub fn new(datasets: &'a Datasets, settings: DashboardSettings) -> Result<Self> {
        let initial_filter =
            FilterState::initial(&datasets.forecast, settings.default_stores.iter().copied())
                .ok_or_else(|| anyhow::anyhow!("forecast series is empty, no default date range"))?;

        let kpis = kpi_aggregator::aggregate(
            &datasets.forecast,
            &datasets.associations,
            &datasets.sales,
        );

        Ok(Self {
            datasets,
            kpis,
            store_options: filter_engine::store_options(&datasets.sales),
            initial_filter,
            settings,
        })
    }

    pub fn kpis(&self) -> &KpiSummary {
        &self.kpis
    }

    pub fn kpi_response(&self) -> KpiResponse {
        KpiResponse {
            summary: self.kpis.clone(),
            cards: kpi_cards(&self.kpis),
        }
    }

    pub fn store_options(&self) -> &[StoreOption] {
        &self.store_options
    }

    pub fn initial_filter(&self) -> &FilterState {
        &self.initial_filter
    }

    /// Filter, then build. The filtered snapshot is complete before the
    /// builder sees it and is dropped once the views are built.
    pub fn views(&self, filter: &FilterState) -> DerivedViews {
        let (forecast, associations) =
            filter_engine::apply(filter, &self.datasets.forecast, &self.datasets.associations);
        tracing::debug!(
            "D402 Dashboard: filtered {} forecast rows, {} rules for {}..{} ({} stores)",
            forecast.rows.len(),
            associations.rules.len(),
            filter.date_range.start,
            filter.date_range.end,
            filter.selected_stores.len(),
        );

        let views = view_builder::build(
            &forecast,
            &associations,
            &self.datasets.sales,
            self.settings.lift_aggregate,
        );
        tracing::debug!(
            "D402 Dashboard: rendered {} points, {}x{} lift matrix, {} alerts",
            views.forecast_chart_data.points.len(),
            views.lift_matrix.row_keys.len(),
            views.lift_matrix.column_keys.len(),
            views.alert_rows.len(),
        );
        views
    }

    /// Apply one filter control change and rebuild the views for the new state
    pub fn on_filter_event(&self, state: &FilterState, event: FilterEvent) -> FilterEventResponse {
        let state = state.apply_event(event);
        let views = self.views(&state);
        FilterEventResponse { state, views }
    }

    /// First render: default filter with its views, KPIs and store options
    pub fn initial_view(&self) -> InitialViewResponse {
        InitialViewResponse {
            filter: self.initial_filter.clone(),
            kpis: self.kpi_response(),
            store_options: self.store_options.clone(),
            views: self.views(&self.initial_filter),
        }
    }
}

/// Build the dashboard context over the loaded datasets, once per process.
pub fn initialize(
    datasets: &'static Datasets,
    settings: DashboardSettings,
) -> Result<&'static DashboardContext<'static>> {
    let context = DashboardContext::new(datasets, settings)?;
    CONTEXT
        .try_insert(context)
        .map_err(|_| anyhow::anyhow!("dashboard context is already initialized"))
}

/// `None` until `initialize` has succeeded
pub fn get_context() -> Option<&'static DashboardContext<'static>> {
    CONTEXT.get()
}
