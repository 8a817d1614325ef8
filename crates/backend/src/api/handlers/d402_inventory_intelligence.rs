use axum::{http::StatusCode, Json};
use contracts::dashboards::d402_inventory_intelligence::{
    DerivedViews, FilterEventRequest, FilterEventResponse, FilterState, InitialViewResponse,
    KpiResponse,
};
use contracts::shared::store::StoreOption;

use crate::dashboards::d402_inventory_intelligence::service::{self, DashboardContext};

fn context() -> Result<&'static DashboardContext<'static>, StatusCode> {
    service::get_context().ok_or_else(|| {
        tracing::error!("D402 Dashboard: request received before datasets were loaded");
        StatusCode::SERVICE_UNAVAILABLE
    })
}

/// GET /api/d402/kpis
pub async fn get_kpis() -> Result<Json<KpiResponse>, StatusCode> {
    Ok(Json(context()?.kpi_response()))
}

/// GET /api/d402/stores
pub async fn get_store_options() -> Result<Json<Vec<StoreOption>>, StatusCode> {
    Ok(Json(context()?.store_options().to_vec()))
}

/// GET /api/d402/initial
pub async fn get_initial_view() -> Result<Json<InitialViewResponse>, StatusCode> {
    let response = context()?.initial_view();
    tracing::info!(
        "D402 Dashboard: initial view for {}..{}, {} alerts",
        response.filter.date_range.start,
        response.filter.date_range.end,
        response.views.alert_rows.len()
    );
    Ok(Json(response))
}

/// POST /api/d402/views
pub async fn post_views(
    Json(filter): Json<FilterState>,
) -> Result<Json<DerivedViews>, StatusCode> {
    tracing::info!(
        "D402 Dashboard: building views for {}..{}, stores {:?}",
        filter.date_range.start,
        filter.date_range.end,
        filter.selected_stores
    );
    Ok(Json(context()?.views(&filter)))
}

/// POST /api/d402/filter_event
pub async fn post_filter_event(
    Json(request): Json<FilterEventRequest>,
) -> Result<Json<FilterEventResponse>, StatusCode> {
    tracing::info!("D402 Dashboard: filter event {:?}", request.event);
    let response = context()?.on_filter_event(&request.state, request.event);
    Ok(Json(response))
}
