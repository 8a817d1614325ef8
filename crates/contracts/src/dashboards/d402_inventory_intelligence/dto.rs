use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::projections::p910_demand_forecast::ForecastRow;
use crate::projections::p911_product_associations::ProductSet;
use crate::projections::p912_store_sales::SalesRecord;
use crate::shared::indicators::IndicatorCardsResponse;
use crate::shared::pivot::PivotMatrix;
use crate::shared::store::{StoreId, StoreOption};

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Date range, inclusive on both ends.
///
/// `start > end` is allowed and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Inverted range, matches no date
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Smallest range covering every row, `None` for an empty series
    pub fn spanning(rows: &[ForecastRow]) -> Option<Self> {
        let start = rows.iter().map(|r| r.timestamp).min()?;
        let end = rows.iter().map(|r| r.timestamp).max()?;
        Some(Self { start, end })
    }
}

/// User-selected scope driving every derived view.
///
/// Never patched in place: each user action yields a whole new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub date_range: DateRange,
    /// Empty selection means "no stores", not "all stores"
    pub selected_stores: BTreeSet<StoreId>,
}

impl FilterState {
    /// Default state: full span of the forecast series and the default stores.
    pub fn initial(
        forecast: &[ForecastRow],
        default_stores: impl IntoIterator<Item = StoreId>,
    ) -> Option<Self> {
        Some(Self {
            date_range: DateRange::spanning(forecast)?,
            selected_stores: default_stores.into_iter().collect(),
        })
    }

    /// Apply one filter control change, carrying over the other field.
    pub fn apply_event(&self, event: FilterEvent) -> Self {
        match event {
            FilterEvent::DateRangeChanged { start, end } => Self {
                date_range: DateRange::new(start, end),
                selected_stores: self.selected_stores.clone(),
            },
            FilterEvent::StoresChanged { stores } => Self {
                date_range: self.date_range,
                selected_stores: stores,
            },
        }
    }
}

/// Change coming from one of the two filter controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterEvent {
    DateRangeChanged { start: NaiveDate, end: NaiveDate },
    StoresChanged { stores: BTreeSet<StoreId> },
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Point of the forecast line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDate,
    pub predicted_demand: f64,
}

/// Forecast line plus the reorder point reference line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastChartData {
    /// Ordered by timestamp
    pub points: Vec<ForecastPoint>,
    /// Mean reorder threshold of the filtered rows, `None` without rows
    pub threshold_overlay: Option<f64>,
}

/// Lift heatmap: antecedents as rows, consequents as columns
pub type LiftMatrix = PivotMatrix<ProductSet, ProductSet>;

/// Row of the restock alerts table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRow {
    pub timestamp: NaiveDate,
    pub predicted_demand: f64,
    pub reorder_threshold: f64,
}

impl From<&ForecastRow> for AlertRow {
    fn from(row: &ForecastRow) -> Self {
        Self {
            timestamp: row.timestamp,
            predicted_demand: row.predicted_demand,
            reorder_threshold: row.reorder_threshold,
        }
    }
}

/// Everything the charts and the alerts table need for one filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedViews {
    pub forecast_chart_data: ForecastChartData,
    pub lift_matrix: LiftMatrix,
    /// Whole sales table, independent of the filter
    pub driver_scatter_data: Vec<SalesRecord>,
    pub alert_rows: Vec<AlertRow>,
}

// ---------------------------------------------------------------------------
// KPI summary
// ---------------------------------------------------------------------------

/// Global health indicators over the unfiltered datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_forecast_volume: f64,
    /// `None` when there are no association rules
    pub mean_lift: Option<f64>,
    pub breach_count: usize,
    pub store_count: usize,
}

// ---------------------------------------------------------------------------
// API request / response
// ---------------------------------------------------------------------------

/// Response for GET /api/d402/kpis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiResponse {
    pub summary: KpiSummary,
    pub cards: IndicatorCardsResponse,
}

/// Response for GET /api/d402/initial (first render)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialViewResponse {
    pub filter: FilterState,
    pub kpis: KpiResponse,
    pub store_options: Vec<StoreOption>,
    pub views: DerivedViews,
}

/// Request for POST /api/d402/filter_event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterEventRequest {
    pub state: FilterState,
    pub event: FilterEvent,
}

/// Response for POST /api/d402/filter_event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterEventResponse {
    pub state: FilterState,
    pub views: DerivedViews,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn forecast(dates: &[NaiveDate]) -> Vec<ForecastRow> {
        dates
            .iter()
            .map(|&timestamp| ForecastRow {
                timestamp,
                predicted_demand: 1.0,
                reorder_threshold: 1.0,
            })
            .collect()
    }

    #[test]
    fn test_date_range_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 3));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 3)));
        assert!(!range.contains(date(2024, 1, 4)));
        assert!(!range.is_empty());

        let inverted = DateRange::new(date(2024, 1, 3), date(2024, 1, 1));
        assert!(inverted.is_empty());
        assert!(!inverted.contains(date(2024, 1, 2)));
    }

    #[test]
    fn test_initial_spans_unordered_series() {
        let rows = forecast(&[date(2024, 3, 1), date(2024, 1, 5), date(2024, 2, 1)]);
        let state = FilterState::initial(&rows, [StoreId(1)]).unwrap();
        assert_eq!(state.date_range, DateRange::new(date(2024, 1, 5), date(2024, 3, 1)));
        assert_eq!(state.selected_stores, BTreeSet::from([StoreId(1)]));

        assert!(FilterState::initial(&[], [StoreId(1)]).is_none());
    }

    #[test]
    fn test_apply_event_replaces_one_field() {
        let rows = forecast(&[date(2024, 1, 1), date(2024, 1, 31)]);
        let state = FilterState::initial(&rows, [StoreId(1)]).unwrap();

        let narrowed = state.apply_event(FilterEvent::DateRangeChanged {
            start: date(2024, 1, 10),
            end: date(2024, 1, 20),
        });
        assert_eq!(narrowed.date_range.start, date(2024, 1, 10));
        assert_eq!(narrowed.selected_stores, state.selected_stores);

        let restored = narrowed.apply_event(FilterEvent::StoresChanged {
            stores: BTreeSet::from([StoreId(2), StoreId(3)]),
        });
        assert_eq!(restored.date_range, narrowed.date_range);
        assert_eq!(restored.selected_stores.len(), 2);
        // the source state is untouched
        assert_eq!(state.date_range.start, date(2024, 1, 1));
    }

    #[test]
    fn test_filter_event_wire_format() {
        let event: FilterEvent = serde_json::from_str(
            r#"{"type":"date_range_changed","start":"2024-01-01","end":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            FilterEvent::DateRangeChanged {
                start: date(2024, 1, 1),
                end: date(2024, 1, 2),
            }
        );

        let event: FilterEvent =
            serde_json::from_str(r#"{"type":"stores_changed","stores":[3,1]}"#).unwrap();
        assert_eq!(
            event,
            FilterEvent::StoresChanged {
                stores: BTreeSet::from([StoreId(1), StoreId(3)]),
            }
        );
    }
}
