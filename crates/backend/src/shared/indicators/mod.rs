pub mod metadata;

use contracts::dashboards::d402_inventory_intelligence::KpiSummary;
use contracts::shared::indicators::*;

use crate::shared::format::render_value;
use metadata::ids;

/// Turn the KPI summary into card values, in catalogue order.
pub fn kpi_cards(summary: &KpiSummary) -> IndicatorCardsResponse {
    let indicators = metadata::build_catalog();

    let values = indicators
        .iter()
        .map(|meta| {
            let (value, status) = card_value(&meta.id, summary);

            IndicatorValue {
                id: meta.id.clone(),
                value,
                display: render_value(&meta.format, value),
                status,
            }
        })
        .collect();

    IndicatorCardsResponse { indicators, values }
}

/// Value and status of one card; ids outside the catalogue stay empty
fn card_value(id: &IndicatorId, summary: &KpiSummary) -> (Option<f64>, IndicatorStatus) {
    match id.0.as_str() {
        ids::TOTAL_FORECAST_VOLUME => (Some(summary.total_forecast_volume), IndicatorStatus::Neutral),
        ids::MEAN_LIFT => (summary.mean_lift, lift_status(summary.mean_lift)),
        ids::BREACH_COUNT => {
            let status = if summary.breach_count > 0 {
                IndicatorStatus::Warning
            } else {
                IndicatorStatus::Good
            };
            (Some(summary.breach_count as f64), status)
        }
        ids::STORE_COUNT => (Some(summary.store_count as f64), IndicatorStatus::Neutral),
        other => {
            tracing::warn!("No KPI value for indicator '{}'", other);
            (None, IndicatorStatus::Neutral)
        }
    }
}

fn lift_status(mean_lift: Option<f64>) -> IndicatorStatus {
    match mean_lift {
        Some(lift) if lift > 1.0 => IndicatorStatus::Good,
        Some(lift) if lift < 1.0 => IndicatorStatus::Bad,
        _ => IndicatorStatus::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(mean_lift: Option<f64>, breach_count: usize) -> KpiSummary {
        KpiSummary {
            total_forecast_volume: 2_500_000.0,
            mean_lift,
            breach_count,
            store_count: 45,
        }
    }

    #[test]
    fn test_cards_follow_catalogue() {
        let cards = kpi_cards(&summary(Some(1.234), 3));
        let displays: Vec<&str> = cards.values.iter().map(|v| v.display.as_str()).collect();
        assert_eq!(displays, vec!["$2.50M", "1.23x", "3", "45"]);
        assert_eq!(cards.values[1].status, IndicatorStatus::Good);
        assert_eq!(cards.values[2].status, IndicatorStatus::Warning);
        assert_eq!(cards.indicators.len(), cards.values.len());
    }

    #[test]
    fn test_undefined_lift_card() {
        let cards = kpi_cards(&summary(None, 0));
        assert_eq!(cards.values[1].value, None);
        assert_eq!(cards.values[1].display, PLACEHOLDER);
        assert_eq!(cards.values[1].status, IndicatorStatus::Neutral);
        assert_eq!(cards.values[2].status, IndicatorStatus::Good);
    }

    #[test]
    fn test_cards_are_keyed_by_id() {
        let cards = kpi_cards(&summary(Some(0.8), 0));
        let store_card = cards
            .values
            .iter()
            .find(|v| v.id == ids::store_count())
            .unwrap();
        assert_eq!(store_card.value, Some(45.0));

        let lift_card = cards.values.iter().find(|v| v.id == ids::mean_lift()).unwrap();
        assert_eq!(lift_card.status, IndicatorStatus::Bad);
    }

    #[test]
    fn test_unknown_indicator_has_no_value() {
        let (value, status) = card_value(&IndicatorId::new("gross_margin"), &summary(Some(1.5), 2));
        assert_eq!(value, None);
        assert_eq!(status, IndicatorStatus::Neutral);
    }
}
