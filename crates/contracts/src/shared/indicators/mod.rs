use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Indicator identity & display metadata
// ---------------------------------------------------------------------------

/// Unique indicator identifier, used as key for summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub String);

impl IndicatorId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How to format the numeric value on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    /// Currency amount shown in millions, e.g. `$12.34M`
    MoneyMillions { currency: String },
    /// Ratio with a trailing `x`, e.g. `1.27x`
    Multiplier { decimals: u8 },
    Integer,
}

/// Visual status of the indicator (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
    Warning,
}

/// Static metadata describing one indicator (label, format, icon, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorMeta {
    pub id: IndicatorId,
    pub label: String,
    pub icon: String,
    pub format: ValueFormat,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Computed values
// ---------------------------------------------------------------------------

/// Text shown instead of an undefined value.
pub const PLACEHOLDER: &str = "—";

/// A single indicator value ready for a summary card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub id: IndicatorId,
    /// Raw value (`None` when undefined, e.g. a mean over zero rows).
    pub value: Option<f64>,
    /// Value formatted per the indicator's `ValueFormat`, or `PLACEHOLDER`.
    pub display: String,
    pub status: IndicatorStatus,
}

/// Catalogue plus values for the card row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorCardsResponse {
    pub indicators: Vec<IndicatorMeta>,
    pub values: Vec<IndicatorValue>,
}
